pub mod analysis;
pub mod data;
pub mod project;
pub mod properties;
pub mod reports;
pub mod settings;

pub use analysis::AnalysisPage;
pub use data::DataPage;
pub use project::ProjectPage;
pub use properties::PropertiesPage;
pub use reports::ReportsPage;
pub use settings::SettingsPage;
