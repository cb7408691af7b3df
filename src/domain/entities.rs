use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use crate::util::timestamp_id;

/// Property category. Keys are the ones used by the export format; any
/// other key is carried verbatim so it can be reported instead of guessed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum PropertyType {
    #[default]
    House,
    Apartment,
    ApartmentBuilding,
    Commercial,
    Land,
    Other,
    Unrecognized(String),
}

impl PropertyType {
    pub const KNOWN: [PropertyType; 6] = [
        PropertyType::House,
        PropertyType::Apartment,
        PropertyType::ApartmentBuilding,
        PropertyType::Commercial,
        PropertyType::Land,
        PropertyType::Other,
    ];

    pub fn key(&self) -> &str {
        match self {
            PropertyType::House => "rodinny",
            PropertyType::Apartment => "byt",
            PropertyType::ApartmentBuilding => "bytovy",
            PropertyType::Commercial => "komercni",
            PropertyType::Land => "pozemek",
            PropertyType::Other => "ostatni",
            PropertyType::Unrecognized(raw) => raw,
        }
    }

    pub fn is_land(&self) -> bool {
        matches!(self, PropertyType::Land)
    }
}

impl From<String> for PropertyType {
    fn from(raw: String) -> Self {
        match raw.trim() {
            "" | "rodinny" | "house" => PropertyType::House,
            "byt" | "apartment" => PropertyType::Apartment,
            "bytovy" | "apartment-building" => PropertyType::ApartmentBuilding,
            "komercni" | "commercial" => PropertyType::Commercial,
            "pozemek" | "land" => PropertyType::Land,
            "ostatni" | "other" => PropertyType::Other,
            _ => PropertyType::Unrecognized(raw),
        }
    }
}

impl From<PropertyType> for String {
    fn from(value: PropertyType) -> Self {
        match value {
            PropertyType::Unrecognized(raw) => raw,
            known => known.key().to_string(),
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Physical state of the structure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum Condition {
    New,
    Renovated,
    #[default]
    Average,
    Old,
    Unrecognized(String),
}

impl Condition {
    pub const KNOWN: [Condition; 4] = [
        Condition::New,
        Condition::Renovated,
        Condition::Average,
        Condition::Old,
    ];

    pub fn key(&self) -> &str {
        match self {
            Condition::New => "new",
            Condition::Renovated => "reno",
            Condition::Average => "avg",
            Condition::Old => "old",
            Condition::Unrecognized(raw) => raw,
        }
    }

    /// Price multiplier; anything unrecognized is neutral.
    pub fn factor(&self) -> f64 {
        match self {
            Condition::New => 1.15,
            Condition::Renovated => 1.08,
            Condition::Average => 1.0,
            Condition::Old => 0.85,
            Condition::Unrecognized(_) => 1.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Condition::New => "Novostavba",
            Condition::Renovated => "Po rekonstrukci",
            Condition::Old => "Původní stav",
            Condition::Average | Condition::Unrecognized(_) => "Standard",
        }
    }
}

impl From<String> for Condition {
    fn from(raw: String) -> Self {
        match raw.trim() {
            "new" => Condition::New,
            "reno" | "renovated" => Condition::Renovated,
            "" | "avg" | "average" => Condition::Average,
            "old" => Condition::Old,
            _ => Condition::Unrecognized(raw),
        }
    }
}

impl From<Condition> for String {
    fn from(value: Condition) -> Self {
        match value {
            Condition::Unrecognized(raw) => raw,
            known => known.key().to_string(),
        }
    }
}

/// Location quality tier, A best to D worst.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum Zone {
    A,
    #[default]
    B,
    C,
    D,
    Unrecognized(String),
}

impl Zone {
    pub const KNOWN: [Zone; 4] = [Zone::A, Zone::B, Zone::C, Zone::D];

    pub fn key(&self) -> &str {
        match self {
            Zone::A => "A",
            Zone::B => "B",
            Zone::C => "C",
            Zone::D => "D",
            Zone::Unrecognized(raw) => raw,
        }
    }

    pub fn factor(&self) -> f64 {
        match self {
            Zone::A => 1.2,
            Zone::B => 1.05,
            Zone::C => 1.0,
            Zone::D => 0.9,
            Zone::Unrecognized(_) => 1.0,
        }
    }
}

impl From<String> for Zone {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "A" => Zone::A,
            "" | "B" => Zone::B,
            "C" => Zone::C,
            "D" => Zone::D,
            _ => Zone::Unrecognized(raw),
        }
    }
}

impl From<Zone> for String {
    fn from(value: Zone) -> Self {
        match value {
            Zone::Unrecognized(raw) => raw,
            known => known.key().to_string(),
        }
    }
}

/// A single valued property inside a project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    #[serde(default = "timestamp_id")]
    pub id: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadastral_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadastral_territory: Option<String>,
    #[serde(rename = "type", default)]
    pub property_type: PropertyType,
    /// Floor area in m².
    #[serde(default, deserialize_with = "lenient_area")]
    pub area: f64,
    /// Land area in m².
    #[serde(default, deserialize_with = "lenient_area")]
    pub land_area: f64,
    #[serde(default)]
    pub condition: Condition,
    #[serde(default)]
    pub zone: Zone,
    #[serde(default)]
    pub notes: String,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created: Option<OffsetDateTime>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated: Option<OffsetDateTime>,
}

impl PropertyRecord {
    pub fn from_draft(draft: &PropertyDraft, now: OffsetDateTime) -> Self {
        let mut record = Self {
            id: timestamp_id(),
            address: String::new(),
            cadastral_number: None,
            cadastral_territory: None,
            property_type: PropertyType::default(),
            area: 0.0,
            land_area: 0.0,
            condition: Condition::default(),
            zone: Zone::default(),
            notes: String::new(),
            created: Some(now),
            updated: None,
        };
        record.apply_draft(draft);
        record
    }

    /// Overwrites the editable fields, leaving id and timestamps alone.
    pub fn apply_draft(&mut self, draft: &PropertyDraft) {
        self.address = draft.address.trim().to_string();
        self.cadastral_number = non_empty(&draft.cadastral_number);
        self.cadastral_territory = non_empty(&draft.cadastral_territory);
        self.property_type = PropertyType::from(draft.property_type.clone());
        self.area = parse_area(&draft.area);
        self.land_area = parse_area(&draft.land_area);
        self.condition = Condition::from(draft.condition.clone());
        self.zone = Zone::from(draft.zone.clone());
        self.notes = draft.notes.clone();
    }

    pub fn display_address(&self) -> &str {
        if self.address.trim().is_empty() {
            "No address"
        } else {
            &self.address
        }
    }
}

/// Raw form input for a property, exactly as typed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyDraft {
    pub address: String,
    pub cadastral_number: String,
    pub cadastral_territory: String,
    pub property_type: String,
    pub area: String,
    pub land_area: String,
    pub condition: String,
    pub zone: String,
    pub notes: String,
}

impl PropertyDraft {
    /// Blank form with the same defaults a new record gets.
    pub fn blank() -> Self {
        Self {
            property_type: PropertyType::default().key().to_string(),
            condition: Condition::default().key().to_string(),
            zone: Zone::default().key().to_string(),
            ..Self::default()
        }
    }

    pub fn from_record(record: &PropertyRecord) -> Self {
        Self {
            address: record.address.clone(),
            cadastral_number: record.cadastral_number.clone().unwrap_or_default(),
            cadastral_territory: record.cadastral_territory.clone().unwrap_or_default(),
            property_type: record.property_type.key().to_string(),
            area: format_area_input(record.area),
            land_area: format_area_input(record.land_area),
            condition: record.condition.key().to_string(),
            zone: record.zone.key().to_string(),
            notes: record.notes.clone(),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn format_area_input(value: f64) -> String {
    if value == 0.0 {
        String::new()
    } else {
        value.to_string()
    }
}

/// Reads the leading number of a free-form area field ("120", "85,5",
/// "120 m2"). Anything unreadable, negative or non-finite becomes 0.
pub fn parse_area(input: &str) -> f64 {
    let normalized = input.trim().replace(',', ".");
    let mut end = 0;
    for (idx, ch) in normalized.char_indices() {
        let sign = idx == 0 && (ch == '-' || ch == '+');
        if ch.is_ascii_digit() || ch == '.' || sign {
            end = idx + ch.len_utf8();
        } else {
            break;
        }
    }
    // Trim back until the prefix parses, e.g. "12.5." or "1.2.3".
    let mut prefix = &normalized[..end];
    while !prefix.is_empty() {
        if let Ok(value) = prefix.parse::<f64>() {
            return sanitize_area(value);
        }
        prefix = &prefix[..prefix.len() - 1];
    }
    0.0
}

pub fn sanitize_area(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Area from a JSON value that may be a number, a numeric string or absent.
pub fn area_from_json(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().map(sanitize_area).unwrap_or(0.0),
        Value::String(text) => parse_area(text),
        _ => 0.0,
    }
}

/// Enum key from a JSON value. Anything other than a string reads as blank,
/// which each enum maps to its default.
pub fn key_from_json(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        _ => String::new(),
    }
}

fn lenient_key<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().map(key_from_json).unwrap_or_default())
}

impl<'de> Deserialize<'de> for PropertyType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient_key(deserializer).map(PropertyType::from)
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient_key(deserializer).map(Condition::from)
    }
}

impl<'de> Deserialize<'de> for Zone {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient_key(deserializer).map(Zone::from)
    }
}

fn lenient_area<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().map(area_from_json).unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use time::macros::datetime;

    #[test]
    fn enum_keys_round_trip_through_strings() {
        for kind in PropertyType::KNOWN {
            assert_eq!(PropertyType::from(String::from(kind.clone())), kind);
        }
        for condition in Condition::KNOWN {
            assert_eq!(Condition::from(String::from(condition.clone())), condition);
        }
        for zone in Zone::KNOWN {
            assert_eq!(Zone::from(String::from(zone.clone())), zone);
        }
    }

    #[test]
    fn blank_keys_take_defaults() {
        assert_eq!(PropertyType::from(String::new()), PropertyType::House);
        assert_eq!(Condition::from(String::new()), Condition::Average);
        assert_eq!(Zone::from(" ".to_string()), Zone::B);
    }

    #[test]
    fn unknown_keys_are_kept_verbatim() {
        let kind = PropertyType::from("castle".to_string());
        assert_eq!(kind, PropertyType::Unrecognized("castle".to_string()));
        assert_eq!(String::from(kind), "castle");
        assert_eq!(Condition::from("ruin".to_string()).factor(), 1.0);
        assert_eq!(Zone::from("Z".to_string()).factor(), 1.0);
    }

    #[test]
    fn english_aliases_are_accepted() {
        assert_eq!(PropertyType::from("land".to_string()), PropertyType::Land);
        assert_eq!(Condition::from("renovated".to_string()), Condition::Renovated);
        assert_eq!(Zone::from("a".to_string()), Zone::A);
    }

    #[test]
    fn parse_area_is_lenient() {
        assert_eq!(parse_area("120"), 120.0);
        assert_eq!(parse_area(" 85,5 "), 85.5);
        assert_eq!(parse_area("120 m2"), 120.0);
        assert_eq!(parse_area("1.2.3"), 1.2);
        assert_eq!(parse_area(""), 0.0);
        assert_eq!(parse_area("abc"), 0.0);
        assert_eq!(parse_area("-40"), 0.0);
    }

    #[test]
    fn condition_labels() {
        assert_eq!(Condition::Renovated.label(), "Po rekonstrukci");
        assert_eq!(Condition::from("???".to_string()).label(), "Standard");
    }

    #[test]
    fn record_deserializes_with_defaults() {
        let record: PropertyRecord =
            serde_json::from_str(r#"{"id":"1","area":"75","landArea":null}"#).unwrap();
        assert_eq!(record.property_type, PropertyType::House);
        assert_eq!(record.condition, Condition::Average);
        assert_eq!(record.zone, Zone::B);
        assert_eq!(record.area, 75.0);
        assert_eq!(record.land_area, 0.0);
        assert_eq!(record.created, None);
    }

    #[test]
    fn null_or_non_string_enum_fields_take_defaults() {
        let record: PropertyRecord = serde_json::from_str(
            r#"{"id":"1","type":null,"area":80,"condition":7,"zone":{"tier":"A"}}"#,
        )
        .unwrap();
        assert_eq!(record.property_type, PropertyType::House);
        assert_eq!(record.condition, Condition::Average);
        assert_eq!(record.zone, Zone::B);
        assert_eq!(record.area, 80.0);
    }

    #[test]
    fn record_uses_export_field_names() {
        let draft = PropertyDraft {
            address: "Dlouhá 5, Praha".to_string(),
            cadastral_number: "123/4".to_string(),
            property_type: "pozemek".to_string(),
            land_area: "800".to_string(),
            ..PropertyDraft::blank()
        };
        let mut record = PropertyRecord::from_draft(&draft, datetime!(2024-03-01 10:00 UTC));
        record.id = "42".to_string();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "pozemek");
        assert_eq!(json["landArea"], 800.0);
        assert_eq!(json["cadastralNumber"], "123/4");
        assert_eq!(json["condition"], "avg");
        assert!(json.get("cadastralTerritory").is_none());
        assert!(json["created"].as_str().unwrap().starts_with("2024-03-01T10:00:00"));
    }

    #[test]
    fn draft_round_trips_through_record() {
        let draft = PropertyDraft {
            address: "Na Poříčí 1".to_string(),
            area: "64.5".to_string(),
            condition: "new".to_string(),
            zone: "A".to_string(),
            ..PropertyDraft::blank()
        };
        let record = PropertyRecord::from_draft(&draft, OffsetDateTime::UNIX_EPOCH);
        assert_eq!(PropertyDraft::from_record(&record), draft);
    }
}
