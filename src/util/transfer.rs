//! JSON export/import of whole projects, including migration of the legacy
//! single-property documents.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::domain::entities::{
    area_from_json, key_from_json, Condition, PropertyRecord, PropertyType, Zone,
};
use crate::domain::{CompanyInfo, Project, ProjectReport};
use crate::util::format::format_iso_date;
use crate::util::persistence::{app_data_dir, Preferences};
use crate::util::timestamp_id;
use crate::util::version::{classify_format, is_newer_format, DocumentFormat, EXPORT_FORMAT_VERSION};

const LEGACY_PROJECT_NAME: &str = "Importovaný projekt";

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid data format: missing project")]
    InvalidFormat,
    #[error("import failed: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("no directory available for saving files")]
    NoTargetDir,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct ExportDocument<'a> {
    version: &'a str,
    #[serde(with = "time::serde::rfc3339")]
    exported: OffsetDateTime,
    project: &'a Project,
}

/// Pretty-printed export document for `project`.
pub fn export_document(project: &Project, now: OffsetDateTime) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ExportDocument {
        version: EXPORT_FORMAT_VERSION,
        exported: now,
        project,
    })
}

/// Parses an export document and overlays it on `current`.
///
/// Fields the document does not carry keep their value from `current`; the
/// result is stamped with `imported = now`. `current` itself is never
/// touched, so a failed import leaves the session as it was.
pub fn import_document(json: &str, current: &Project, now: OffsetDateTime) -> Result<Project, ImportError> {
    let Value::Object(mut document) = serde_json::from_str::<Value>(json)? else {
        return Err(ImportError::InvalidFormat);
    };
    let version = document
        .get("version")
        .and_then(Value::as_str)
        .map(str::to_string);

    let incoming = match classify_format(version.as_deref()) {
        DocumentFormat::Legacy => {
            info!(version = version.as_deref().unwrap_or_default(), "migrating legacy document");
            migrate_legacy(Value::Object(document), now)?
        }
        DocumentFormat::Current => match document.remove("project") {
            Some(Value::Object(project)) => project,
            _ => return Err(ImportError::InvalidFormat),
        },
    };
    if let Some(version) = version.as_deref().filter(|v| is_newer_format(v)) {
        warn!(version, "document was written by a newer format version");
    }

    let Value::Object(mut merged) = serde_json::to_value(current)? else {
        return Err(ImportError::InvalidFormat);
    };
    merged.extend(incoming);

    let mut project: Project = serde_json::from_value(Value::Object(merged))?;
    project.imported = Some(now);
    project.ensure_unique_ids();
    info!(
        properties = project.properties.len(),
        name = %project.name,
        "imported project"
    );
    Ok(project)
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct LegacyDocument {
    basic: LegacyBasic,
    company: LegacyCompany,
    property: Option<LegacyProperty>,
    mode: LegacyMode,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct LegacyBasic {
    location: Option<String>,
    notes: Option<String>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct LegacyCompany {
    name: String,
    ico: String,
    address: String,
    contact: String,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct LegacyProperty {
    #[serde(rename = "type")]
    property_type: Value,
    area: Value,
    land: Value,
    condition: Value,
    zone: Value,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct LegacyMode {
    #[serde(rename = "recText")]
    rec_text: Option<String>,
}

/// Converts a 3.x document into the project fields it maps onto.
fn migrate_legacy(document: Value, now: OffsetDateTime) -> Result<Map<String, Value>, ImportError> {
    let legacy: LegacyDocument = serde_json::from_value(document)?;
    let location = legacy.basic.location.unwrap_or_default();

    let properties: Vec<PropertyRecord> = legacy
        .property
        .map(|property| PropertyRecord {
            id: timestamp_id(),
            address: location.clone(),
            cadastral_number: None,
            cadastral_territory: None,
            property_type: PropertyType::from(key_from_json(&property.property_type)),
            area: area_from_json(&property.area),
            land_area: area_from_json(&property.land),
            condition: Condition::from(key_from_json(&property.condition)),
            zone: Zone::from(key_from_json(&property.zone)),
            notes: legacy.mode.rec_text.unwrap_or_default(),
            created: Some(now),
            updated: None,
        })
        .into_iter()
        .collect();

    let name = if location.is_empty() {
        LEGACY_PROJECT_NAME.to_string()
    } else {
        location
    };
    let company = CompanyInfo {
        name: legacy.company.name,
        ico: legacy.company.ico,
        address: legacy.company.address,
        contact: legacy.company.contact,
    };

    let mut converted = Map::new();
    converted.insert("name".to_string(), Value::String(name));
    converted.insert("properties".to_string(), serde_json::to_value(properties)?);
    converted.insert("company".to_string(), serde_json::to_value(company)?);
    converted.insert(
        "notes".to_string(),
        Value::String(legacy.basic.notes.unwrap_or_default()),
    );
    Ok(converted)
}

/// `<project name with non-alphanumerics replaced>_<YYYY-MM-DD>.<extension>`
pub fn export_file_name(project_name: &str, now: OffsetDateTime, extension: &str) -> String {
    let stem: String = project_name
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
        .collect();
    format!("{stem}_{}.{extension}", format_iso_date(now))
}

/// Directory exports and reports are written to.
pub fn output_dir(preferences: &Preferences) -> Result<PathBuf, TransferError> {
    preferences
        .export_dir
        .clone()
        .or_else(dirs::download_dir)
        .or_else(app_data_dir)
        .ok_or(TransferError::NoTargetDir)
}

pub fn write_export(dir: &Path, project: &Project, now: OffsetDateTime) -> Result<PathBuf, TransferError> {
    let json = export_document(project, now)?;
    let path = dir.join(export_file_name(&project.name, now, "json"));
    write_file(&path, &json)?;
    info!(path = %path.display(), "exported project");
    Ok(path)
}

pub fn write_report(dir: &Path, report: &ProjectReport) -> Result<PathBuf, TransferError> {
    let path = dir.join(export_file_name(&report.project_name, report.generated_at, "txt"));
    write_file(&path, &report.render_text())?;
    info!(path = %path.display(), "saved report");
    Ok(path)
}

pub fn read_import_file(path: &Path) -> Result<String, TransferError> {
    Ok(fs::read_to_string(path)?)
}

fn write_file(path: &Path, contents: &str) -> Result<(), TransferError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}
