//! Valuation logic and the project model live here.

pub mod analysis;
pub mod app_state;
pub mod entities;
pub mod pricing;
pub mod project;
pub mod projection;
pub mod report;
pub mod valuation;

pub use app_state::AppState;
pub use entities::{PropertyDraft, PropertyRecord};
pub use project::{CompanyInfo, Project, ProjectMetadata};
pub use report::ProjectReport;
pub use valuation::compute_valuation_methods;
