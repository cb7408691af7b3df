use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, warn};

use super::entities::{PropertyDraft, PropertyRecord};
use crate::util::timestamp_id;

pub const DEFAULT_PROJECT_NAME: &str = "Nový Projekt";
pub const DEFAULT_COMPANY_NAME: &str = "MEVERIK SOLUTION s.r.o.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectError {
    #[error("property {0} not found in project")]
    PropertyNotFound(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyInfo {
    pub name: String,
    /// Company registration number (IČO).
    pub ico: String,
    pub address: String,
    pub contact: String,
}

impl Default for CompanyInfo {
    fn default() -> Self {
        Self {
            name: DEFAULT_COMPANY_NAME.to_string(),
            ico: String::new(),
            address: String::new(),
            contact: String::new(),
        }
    }
}

/// The editable header of a project.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectMetadata {
    pub name: String,
    pub company: CompanyInfo,
    pub notes: String,
}

/// The single document a session works on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
    #[serde(default)]
    pub properties: Vec<PropertyRecord>,
    #[serde(default)]
    pub company: CompanyInfo,
    #[serde(default)]
    pub notes: String,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub imported: Option<OffsetDateTime>,
}

impl Project {
    pub fn new(company: CompanyInfo, now: OffsetDateTime) -> Self {
        Self {
            id: Some(uuid::Uuid::new_v4().to_string()),
            name: DEFAULT_PROJECT_NAME.to_string(),
            created: now,
            properties: Vec::new(),
            company,
            notes: String::new(),
            imported: None,
        }
    }

    pub fn metadata(&self) -> ProjectMetadata {
        ProjectMetadata {
            name: self.name.clone(),
            company: self.company.clone(),
            notes: self.notes.clone(),
        }
    }

    pub fn update_metadata(&mut self, metadata: ProjectMetadata) {
        self.name = metadata.name;
        self.company = metadata.company;
        self.notes = metadata.notes;
    }

    pub fn property(&self, id: &str) -> Option<&PropertyRecord> {
        self.properties.iter().find(|property| property.id == id)
    }

    pub fn add_property(&mut self, draft: &PropertyDraft, now: OffsetDateTime) -> &PropertyRecord {
        let mut record = PropertyRecord::from_draft(draft, now);
        while self.property(&record.id).is_some() {
            record.id = timestamp_id();
        }
        debug!(property_id = %record.id, "adding property");
        let index = self.properties.len();
        self.properties.push(record);
        &self.properties[index]
    }

    pub fn update_property(
        &mut self,
        id: &str,
        draft: &PropertyDraft,
        now: OffsetDateTime,
    ) -> Result<&PropertyRecord, ProjectError> {
        let property = self
            .properties
            .iter_mut()
            .find(|property| property.id == id)
            .ok_or_else(|| ProjectError::PropertyNotFound(id.to_string()))?;
        property.apply_draft(draft);
        property.updated = Some(now);
        Ok(property)
    }

    pub fn delete_property(&mut self, id: &str) -> Result<PropertyRecord, ProjectError> {
        let index = self
            .properties
            .iter()
            .position(|property| property.id == id)
            .ok_or_else(|| ProjectError::PropertyNotFound(id.to_string()))?;
        Ok(self.properties.remove(index))
    }

    /// Re-issues ids that collide with an earlier property. Returns how many
    /// were changed.
    pub fn ensure_unique_ids(&mut self) -> usize {
        let mut seen = HashSet::new();
        let mut reassigned = 0;
        for index in 0..self.properties.len() {
            if seen.insert(self.properties[index].id.clone()) {
                continue;
            }
            let mut fresh = timestamp_id();
            while seen.contains(&fresh) || self.property(&fresh).is_some() {
                fresh = timestamp_id();
            }
            warn!(
                old_id = %self.properties[index].id,
                new_id = %fresh,
                "duplicate property id, reassigning"
            );
            seen.insert(fresh.clone());
            self.properties[index].id = fresh;
            reassigned += 1;
        }
        reassigned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Condition, PropertyType};
    use time::macros::datetime;

    fn draft(address: &str, area: &str) -> PropertyDraft {
        PropertyDraft {
            address: address.to_string(),
            area: area.to_string(),
            ..PropertyDraft::blank()
        }
    }

    #[test]
    fn new_project_uses_company_defaults() {
        let project = Project::new(CompanyInfo::default(), datetime!(2024-01-01 0:00 UTC));
        assert_eq!(project.name, DEFAULT_PROJECT_NAME);
        assert_eq!(project.company.name, DEFAULT_COMPANY_NAME);
        assert!(project.id.is_some());
        assert!(project.properties.is_empty());
    }

    #[test]
    fn add_keeps_insertion_order_and_unique_ids() {
        let now = datetime!(2024-01-01 0:00 UTC);
        let mut project = Project::new(CompanyInfo::default(), now);
        let first = project.add_property(&draft("A", "10"), now).id.clone();
        let second = project.add_property(&draft("B", "20"), now).id.clone();
        let third = project.add_property(&draft("C", "30"), now).id.clone();

        assert_ne!(first, second);
        assert_ne!(second, third);
        let addresses: Vec<_> = project.properties.iter().map(|p| p.address.as_str()).collect();
        assert_eq!(addresses, ["A", "B", "C"]);
        assert_eq!(project.properties[0].created, Some(now));
    }

    #[test]
    fn update_refreshes_timestamp_and_keeps_identity() {
        let created = datetime!(2024-01-01 0:00 UTC);
        let edited = datetime!(2024-02-01 12:30 UTC);
        let mut project = Project::new(CompanyInfo::default(), created);
        let id = project.add_property(&draft("Old", "10"), created).id.clone();

        let changes = PropertyDraft {
            condition: "new".to_string(),
            property_type: "byt".to_string(),
            ..draft("New", "55")
        };
        let updated = project.update_property(&id, &changes, edited).unwrap();

        assert_eq!(updated.id, id);
        assert_eq!(updated.address, "New");
        assert_eq!(updated.area, 55.0);
        assert_eq!(updated.condition, Condition::New);
        assert_eq!(updated.property_type, PropertyType::Apartment);
        assert_eq!(updated.created, Some(created));
        assert_eq!(updated.updated, Some(edited));
    }

    #[test]
    fn update_and_delete_report_missing_ids() {
        let now = datetime!(2024-01-01 0:00 UTC);
        let mut project = Project::new(CompanyInfo::default(), now);
        assert_eq!(
            project.update_property("nope", &draft("X", "1"), now).unwrap_err(),
            ProjectError::PropertyNotFound("nope".to_string())
        );
        assert!(project.delete_property("nope").is_err());
    }

    #[test]
    fn delete_removes_only_the_target() {
        let now = datetime!(2024-01-01 0:00 UTC);
        let mut project = Project::new(CompanyInfo::default(), now);
        let keep = project.add_property(&draft("keep", "1"), now).id.clone();
        let drop = project.add_property(&draft("drop", "2"), now).id.clone();

        let removed = project.delete_property(&drop).unwrap();
        assert_eq!(removed.address, "drop");
        assert_eq!(project.properties.len(), 1);
        assert_eq!(project.properties[0].id, keep);
    }

    #[test]
    fn duplicate_ids_are_reassigned() {
        let now = datetime!(2024-01-01 0:00 UTC);
        let mut project = Project::new(CompanyInfo::default(), now);
        project.add_property(&draft("a", "1"), now);
        project.add_property(&draft("b", "1"), now);
        project.properties[1].id = project.properties[0].id.clone();

        assert_eq!(project.ensure_unique_ids(), 1);
        assert_ne!(project.properties[0].id, project.properties[1].id);
        assert_eq!(project.ensure_unique_ids(), 0);
    }

    #[test]
    fn metadata_updates_header_only() {
        let now = datetime!(2024-01-01 0:00 UTC);
        let mut project = Project::new(CompanyInfo::default(), now);
        project.add_property(&draft("a", "1"), now);
        project.update_metadata(ProjectMetadata {
            name: "Ocenění Brno".to_string(),
            company: CompanyInfo {
                ico: "12345678".to_string(),
                ..CompanyInfo::default()
            },
            notes: "pro banku".to_string(),
        });
        assert_eq!(project.metadata().name, "Ocenění Brno");
        assert_eq!(project.company.ico, "12345678");
        assert_eq!(project.properties.len(), 1);
    }
}
