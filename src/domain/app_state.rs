use time::OffsetDateTime;
use tracing::info;

use super::entities::{PropertyDraft, PropertyRecord};
use super::project::{Project, ProjectError, ProjectMetadata};
use super::valuation::{project_stats, ProjectStats};
use crate::util::persistence::Preferences;
use crate::util::transfer::{self, ImportError};

/// Everything a session owns: the one active project and the user's
/// preferences. All mutations go through these methods.
#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    pub project: Project,
    pub preferences: Preferences,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_preferences(Preferences::default(), OffsetDateTime::now_utc())
    }
}

impl AppState {
    pub fn with_preferences(preferences: Preferences, now: OffsetDateTime) -> Self {
        Self {
            project: Project::new(preferences.default_company.clone(), now),
            preferences,
        }
    }

    pub fn add_property(&mut self, draft: &PropertyDraft, now: OffsetDateTime) -> &PropertyRecord {
        let record = self.project.add_property(draft, now);
        info!(property_id = %record.id, "property added");
        record
    }

    pub fn update_property(
        &mut self,
        id: &str,
        draft: &PropertyDraft,
        now: OffsetDateTime,
    ) -> Result<&PropertyRecord, ProjectError> {
        let record = self.project.update_property(id, draft, now)?;
        info!(property_id = %record.id, "property updated");
        Ok(record)
    }

    pub fn delete_property(&mut self, id: &str) -> Result<PropertyRecord, ProjectError> {
        let removed = self.project.delete_property(id)?;
        info!(property_id = %removed.id, "property deleted");
        Ok(removed)
    }

    pub fn update_metadata(&mut self, metadata: ProjectMetadata) {
        self.project.update_metadata(metadata);
    }

    /// Replaces the project with the imported one. On error the current
    /// project is left exactly as it was.
    pub fn import_document(&mut self, json: &str, now: OffsetDateTime) -> Result<usize, ImportError> {
        let imported = transfer::import_document(json, &self.project, now)?;
        self.project = imported;
        Ok(self.project.properties.len())
    }

    pub fn export_document(&self, now: OffsetDateTime) -> Result<String, serde_json::Error> {
        transfer::export_document(&self.project, now)
    }

    /// Starts over with an empty project using the default company.
    pub fn new_project(&mut self, now: OffsetDateTime) {
        self.project = Project::new(self.preferences.default_company.clone(), now);
        info!("started new project");
    }

    pub fn stats(&self) -> ProjectStats {
        project_stats(&self.project.properties)
    }

    pub fn apply_preferences(&mut self, preferences: Preferences) {
        self.preferences = preferences;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::project::CompanyInfo;
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2024-05-11 9:00 UTC);

    fn house(area: &str) -> PropertyDraft {
        PropertyDraft {
            address: "Jihlavská 12, Brno".to_string(),
            area: area.to_string(),
            ..PropertyDraft::blank()
        }
    }

    fn state() -> AppState {
        let preferences = Preferences {
            default_company: CompanyInfo {
                name: "Reality Novák".to_string(),
                ..CompanyInfo::default()
            },
            ..Preferences::default()
        };
        AppState::with_preferences(preferences, NOW)
    }

    #[test]
    fn new_project_uses_default_company() {
        let mut state = state();
        state.add_property(&house("100"), NOW);
        state.new_project(NOW);
        assert!(state.project.properties.is_empty());
        assert_eq!(state.project.company.name, "Reality Novák");
    }

    #[test]
    fn stats_follow_mutations() {
        let mut state = state();
        let id = state.add_property(&house("100"), NOW).id.clone();
        state.add_property(&house("50"), NOW);
        let stats = state.stats();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.total_value, 7_087_500.0);

        state.update_property(&id, &house("200"), NOW).unwrap();
        assert_eq!(state.stats().total_value, 11_812_500.0);

        state.delete_property(&id).unwrap();
        assert_eq!(state.stats().count, 1);
        assert_eq!(state.stats().average_value, 2_362_500.0);
    }

    #[test]
    fn failed_import_leaves_project_untouched() {
        let mut state = state();
        state.add_property(&house("100"), NOW);
        let before = state.project.clone();

        assert!(state.import_document("{ broken", NOW).is_err());
        assert!(state.import_document(r#"{"version":"4.0"}"#, NOW).is_err());
        assert_eq!(state.project, before);
    }

    #[test]
    fn import_replaces_project() {
        let mut source = state();
        source.add_property(&house("100"), NOW);
        source.add_property(&house("80"), NOW);
        source.update_metadata(ProjectMetadata {
            name: "Brno 2024".to_string(),
            ..source.project.metadata()
        });
        let json = source.export_document(NOW).unwrap();

        let mut target = AppState::with_preferences(Preferences::default(), NOW);
        assert_eq!(target.import_document(&json, NOW).unwrap(), 2);
        assert_eq!(target.project.name, "Brno 2024");
        assert_eq!(target.project.properties, source.project.properties);
        assert_eq!(target.project.imported, Some(NOW));
    }

    #[test]
    fn missing_ids_are_reported() {
        let mut state = state();
        assert!(matches!(
            state.delete_property("missing"),
            Err(ProjectError::PropertyNotFound(_))
        ));
    }
}
