use super::entities::{PropertyRecord, PropertyType};
use super::pricing::{DEFAULT_REGION, FALLBACK_BASE_PRICE, PRICING};

/// Floor area assumed for the price series when a property has none.
pub const SERIES_FALLBACK_AREA: f64 = 100.0;
/// Years before the current one included in a series.
pub const SERIES_YEARS_BACK: i32 = 3;
/// Years after the current one included in a series.
pub const SERIES_YEARS_AHEAD: i32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectionDirection {
    /// Discount back from today's price.
    Historical,
    /// Compound forward from today's price.
    Future,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesPoint {
    pub year: i32,
    pub value: f64,
    pub direction: ProjectionDirection,
}

/// Price per m² `year_offset` years away from today, in whole currency units.
///
/// Unknown regions use the default region and unknown property types use
/// [`FALLBACK_BASE_PRICE`]; this never fails.
pub fn project_price(
    property_type: &PropertyType,
    region: &str,
    year_offset: u32,
    direction: ProjectionDirection,
) -> f64 {
    let base_price = PRICING
        .property_type(property_type)
        .map(|entry| entry.base_price)
        .unwrap_or(FALLBACK_BASE_PRICE);
    let region = PRICING.region_or_default(region);

    let offset = i32::try_from(year_offset).unwrap_or(i32::MAX);
    let exponent = match direction {
        ProjectionDirection::Historical => -offset,
        ProjectionDirection::Future => offset,
    };

    (base_price * region.multiplier * (1.0 + region.growth).powi(exponent)).round()
}

pub fn historical_price(
    property_type: &PropertyType,
    region: &str,
    target_year: i32,
    current_year: i32,
) -> f64 {
    let offset = current_year.saturating_sub(target_year).max(0) as u32;
    project_price(property_type, region, offset, ProjectionDirection::Historical)
}

pub fn future_price(property_type: &PropertyType, region: &str, years_ahead: u32) -> f64 {
    project_price(property_type, region, years_ahead, ProjectionDirection::Future)
}

/// Total value of `property` for each year from three years back to two
/// years ahead, priced in the default region.
pub fn generate_series(property: &PropertyRecord, current_year: i32) -> Vec<SeriesPoint> {
    generate_series_for_region(property, DEFAULT_REGION, current_year)
}

pub fn generate_series_for_region(
    property: &PropertyRecord,
    region: &str,
    current_year: i32,
) -> Vec<SeriesPoint> {
    let area = if property.area > 0.0 {
        property.area
    } else {
        SERIES_FALLBACK_AREA
    };

    (-SERIES_YEARS_BACK..=SERIES_YEARS_AHEAD)
        .map(|step| {
            let year = current_year + step;
            let (price, direction) = if step <= 0 {
                (
                    historical_price(&property.property_type, region, year, current_year),
                    ProjectionDirection::Historical,
                )
            } else {
                (
                    future_price(&property.property_type, region, step as u32),
                    ProjectionDirection::Future,
                )
            };
            SeriesPoint {
                year,
                value: price * area,
                direction,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::PropertyDraft;
    use proptest::prelude::*;
    use time::OffsetDateTime;

    fn house(area: &str) -> PropertyRecord {
        let draft = PropertyDraft {
            area: area.to_string(),
            ..PropertyDraft::blank()
        };
        PropertyRecord::from_draft(&draft, OffsetDateTime::UNIX_EPOCH)
    }

    #[test]
    fn zero_offset_is_base_times_multiplier() {
        for direction in [ProjectionDirection::Historical, ProjectionDirection::Future] {
            assert_eq!(project_price(&PropertyType::House, "praha", 0, direction), 81_000.0);
            assert_eq!(project_price(&PropertyType::Apartment, "brno", 0, direction), 67_600.0);
        }
    }

    #[test]
    fn historical_discounts_and_future_compounds() {
        // 45000 * 1.8 / 1.06^2 and 45000 * 1.8 * 1.06^2
        assert_eq!(
            project_price(&PropertyType::House, "praha", 2, ProjectionDirection::Historical),
            72_090.0
        );
        assert_eq!(
            project_price(&PropertyType::House, "praha", 2, ProjectionDirection::Future),
            91_012.0
        );
    }

    #[test]
    fn unknown_keys_fall_back_silently() {
        let castle = PropertyType::from("castle".to_string());
        assert_eq!(
            project_price(&castle, "atlantis", 0, ProjectionDirection::Future),
            FALLBACK_BASE_PRICE
        );
        assert_eq!(
            project_price(&PropertyType::Land, "nowhere", 1, ProjectionDirection::Future),
            2_600.0
        );
    }

    #[test]
    fn historical_price_uses_year_difference() {
        assert_eq!(
            historical_price(&PropertyType::House, "default", 2021, 2024),
            project_price(&PropertyType::House, "default", 3, ProjectionDirection::Historical)
        );
    }

    #[test]
    fn series_spans_six_years() {
        let series = generate_series(&house("120"), 2024);
        let years: Vec<i32> = series.iter().map(|p| p.year).collect();
        assert_eq!(years, [2021, 2022, 2023, 2024, 2025, 2026]);
        assert_eq!(series[3].value, 45_000.0 * 120.0);
        assert_eq!(series[3].direction, ProjectionDirection::Historical);
        assert_eq!(series[4].direction, ProjectionDirection::Future);
        assert!(series.windows(2).all(|pair| pair[0].value < pair[1].value));
    }

    #[test]
    fn series_defaults_area_to_hundred() {
        let series = generate_series(&house(""), 2024);
        assert_eq!(series[3].value, 45_000.0 * SERIES_FALLBACK_AREA);
    }

    #[test]
    fn series_is_restartable() {
        let property = house("80");
        assert_eq!(generate_series(&property, 2030), generate_series(&property, 2030));
    }

    #[test]
    fn unknown_chart_region_falls_back_to_default_series() {
        let property = house("90");
        let region = PRICING.region_or_default("atlantis");
        assert_eq!(region.key, DEFAULT_REGION);
        assert_eq!(
            generate_series(&property, 2024),
            generate_series_for_region(&property, region.key, 2024)
        );
    }

    proptest! {
        #[test]
        fn zero_offset_ignores_growth(region in "[a-z]{0,8}", kind in 0usize..6) {
            let property_type = PropertyType::KNOWN[kind].clone();
            let historical = project_price(&property_type, &region, 0, ProjectionDirection::Historical);
            let future = project_price(&property_type, &region, 0, ProjectionDirection::Future);
            let entry = PRICING.region_or_default(&region);
            let base = PRICING.property_type(&property_type).unwrap().base_price;
            prop_assert_eq!(historical, future);
            prop_assert_eq!(historical, (base * entry.multiplier).round());
        }
    }
}
