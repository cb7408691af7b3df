use std::fmt;

use time::OffsetDateTime;

use super::entities::PropertyRecord;
use super::pricing::PRICING;
use super::project::Project;
use super::valuation::{compute_valuation_methods, project_stats, ProjectStats, ValuationError, ValuationResult};
use crate::util::format::{format_area, format_currency, format_date, format_percent};
use crate::util::version::APP_NAME;

#[derive(Clone, Debug, PartialEq)]
pub struct PropertySection {
    pub property_id: String,
    pub address: String,
    pub type_label: String,
    pub floor_area: f64,
    pub land_area: f64,
    pub condition_label: &'static str,
    pub valuation: Result<ValuationResult, ValuationError>,
}

impl PropertySection {
    pub fn from_property(property: &PropertyRecord) -> Self {
        Self {
            property_id: property.id.clone(),
            address: property.display_address().to_string(),
            type_label: PRICING.type_label(&property.property_type),
            floor_area: property.area,
            land_area: property.land_area,
            condition_label: property.condition.label(),
            valuation: compute_valuation_methods(property),
        }
    }
}

/// Summary valuation report for a whole project.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectReport {
    pub project_name: String,
    pub company_name: String,
    pub generated_at: OffsetDateTime,
    pub stats: ProjectStats,
    pub sections: Vec<PropertySection>,
}

impl ProjectReport {
    pub fn generate(project: &Project, now: OffsetDateTime) -> Self {
        Self {
            project_name: project.name.clone(),
            company_name: project.company.name.clone(),
            generated_at: now,
            stats: project_stats(&project.properties),
            sections: project
                .properties
                .iter()
                .map(PropertySection::from_property)
                .collect(),
        }
    }

    /// Plain-text rendering used for the downloadable report.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        if let Err(err) = self.write_to(&mut out) {
            tracing::warn!(%err, "report rendering stopped early");
        }
        out
    }

    pub fn write_to(&self, out: &mut impl fmt::Write) -> fmt::Result {
        writeln!(out, "VALUATION SUMMARY REPORT")?;
        writeln!(out, "========================")?;
        writeln!(out, "Project: {}", self.project_name)?;
        writeln!(out, "Date:    {}", format_date(self.generated_at))?;
        writeln!(out, "Company: {}", self.company_name)?;
        writeln!(out)?;
        writeln!(out, "Properties:    {}", self.stats.count)?;
        writeln!(out, "Total value:   {}", format_currency(self.stats.total_value))?;
        writeln!(out, "Average value: {}", format_currency(self.stats.average_value))?;

        for section in &self.sections {
            writeln!(out)?;
            writeln!(out, "{}", section.address)?;
            writeln!(out, "{}", "-".repeat(section.address.chars().count()))?;
            writeln!(out, "Type:      {}", section.type_label)?;
            writeln!(out, "Area:      {}", format_area(section.floor_area))?;
            writeln!(out, "Land:      {}", format_area(section.land_area))?;
            writeln!(out, "Condition: {}", section.condition_label)?;

            match &section.valuation {
                Ok(valuation) => {
                    for method in &valuation.methods {
                        writeln!(
                            out,
                            "  {:<20} {:>16}  {:>4}  {}",
                            method.name,
                            format_currency(method.value),
                            format_percent(method.confidence),
                            method.description
                        )?;
                    }
                    writeln!(
                        out,
                        "Recommended value: {}",
                        format_currency(valuation.recommended_value)
                    )?;
                }
                Err(err) => writeln!(out, "Valuation unavailable: {err}")?,
            }
        }

        writeln!(out)?;
        writeln!(out, "Generated by {APP_NAME} on {}", format_date(self.generated_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::PropertyDraft;
    use crate::domain::project::CompanyInfo;
    use time::macros::datetime;

    fn project() -> Project {
        let now = datetime!(2024-05-10 9:00 UTC);
        let mut project = Project::new(CompanyInfo::default(), now);
        project.name = "Ocenění Plzeň".to_string();
        project.add_property(
            &PropertyDraft {
                address: "Americká 12, Plzeň".to_string(),
                area: "100".to_string(),
                ..PropertyDraft::blank()
            },
            now,
        );
        project.add_property(
            &PropertyDraft {
                property_type: "castle".to_string(),
                area: "900".to_string(),
                ..PropertyDraft::blank()
            },
            now,
        );
        project
    }

    #[test]
    fn report_collects_sections_and_stats() {
        let report = ProjectReport::generate(&project(), datetime!(2024-05-11 8:00 UTC));
        assert_eq!(report.sections.len(), 2);
        assert_eq!(report.stats.count, 2);
        assert_eq!(report.sections[0].type_label, "Rodinný dům");
        assert_eq!(report.sections[1].address, "No address");
        assert!(report.sections[1].valuation.is_err());
    }

    #[test]
    fn text_report_mentions_every_property() {
        let text = ProjectReport::generate(&project(), datetime!(2024-05-11 8:00 UTC)).render_text();
        assert!(text.contains("Project: Ocenění Plzeň"));
        assert!(text.contains("Date:    11.05.2024"));
        assert!(text.contains("Americká 12, Plzeň"));
        assert!(text.contains("Recommended value: 4 807 174 Kč"));
        assert!(text.contains("Valuation unavailable: unknown property type: castle"));
    }

    struct Capped {
        written: String,
        limit: usize,
    }

    impl fmt::Write for Capped {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            if self.written.len() + s.len() > self.limit {
                return Err(fmt::Error);
            }
            self.written.push_str(s);
            Ok(())
        }
    }

    #[test]
    fn write_to_matches_render_and_stops_on_writer_error() {
        let report = ProjectReport::generate(&project(), datetime!(2024-05-11 8:00 UTC));
        let mut full = String::new();
        report.write_to(&mut full).unwrap();
        assert_eq!(full, report.render_text());

        let mut capped = Capped { written: String::new(), limit: 40 };
        assert_eq!(report.write_to(&mut capped), Err(fmt::Error));
        assert!(capped.written.starts_with("VALUATION SUMMARY REPORT"));
        assert!(!capped.written.contains("Company:"));
    }
}
