//! Market overview figures for the analysis page. These are illustrative
//! constants, not a financial model.

use super::valuation::ProjectStats;

/// Assumed gross rental yield used for the ROI and payback figures.
const ASSUMED_YIELD: f64 = 0.06;
const PLACEHOLDER_IRR_PCT: f64 = 6.5;
const PLACEHOLDER_CAP_RATE_PCT: f64 = 5.8;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionalPrice {
    pub name: &'static str,
    /// Average asking price per m².
    pub price_per_m2: f64,
    /// Year-on-year change in percent.
    pub change_pct: f64,
}

pub const REGIONAL_COMPARISON: [RegionalPrice; 4] = [
    RegionalPrice {
        name: "Praha",
        price_per_m2: 85_000.0,
        change_pct: 5.2,
    },
    RegionalPrice {
        name: "Brno",
        price_per_m2: 62_000.0,
        change_pct: 3.8,
    },
    RegionalPrice {
        name: "Ostrava",
        price_per_m2: 45_000.0,
        change_pct: 2.1,
    },
    RegionalPrice {
        name: "Plzeň",
        price_per_m2: 52_000.0,
        change_pct: 4.1,
    },
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InvestmentMetrics {
    pub roi_pct: f64,
    pub payback_years: f64,
    pub irr_pct: f64,
    pub cap_rate_pct: f64,
}

/// `None` when there is nothing to value yet.
pub fn investment_metrics(stats: &ProjectStats) -> Option<InvestmentMetrics> {
    if stats.count == 0 || stats.total_value <= 0.0 {
        return None;
    }

    let annual_income = stats.total_value * ASSUMED_YIELD;
    Some(InvestmentMetrics {
        roi_pct: annual_income / stats.total_value * 100.0,
        payback_years: stats.total_value / annual_income,
        irr_pct: PLACEHOLDER_IRR_PCT,
        cap_rate_pct: PLACEHOLDER_CAP_RATE_PCT,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_project_has_no_metrics() {
        assert_eq!(investment_metrics(&ProjectStats::default()), None);
        let unvalued = ProjectStats {
            count: 2,
            total_value: 0.0,
            average_value: 0.0,
        };
        assert_eq!(investment_metrics(&unvalued), None);
    }

    #[test]
    fn metrics_follow_assumed_yield() {
        let stats = ProjectStats {
            count: 1,
            total_value: 4_725_000.0,
            average_value: 4_725_000.0,
        };
        let metrics = investment_metrics(&stats).unwrap();
        assert!((metrics.roi_pct - 6.0).abs() < 1e-9);
        assert!((metrics.payback_years - 16.666_666).abs() < 1e-3);
        assert_eq!(metrics.irr_pct, 6.5);
        assert_eq!(metrics.cap_rate_pct, 5.8);
    }
}
