use dioxus::prelude::*;
use time::OffsetDateTime;

use crate::domain::analysis::{investment_metrics, REGIONAL_COMPARISON};
use crate::domain::pricing::{DEFAULT_REGION, PRICING};
use crate::domain::projection::{generate_series, generate_series_for_region};
use crate::domain::AppState;
use crate::ui::components::kpi_card::KpiCard;
use crate::ui::components::trend_chart::TrendChart;
use crate::ui::theme;
use crate::util::format::{format_currency, format_number};

#[component]
pub fn AnalysisPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let current_year = OffsetDateTime::now_utc().year();

    let (series, subject, region_name) = state.with(|st| {
        let region = PRICING.region_or_default(&st.preferences.chart_region);
        let first = st.project.properties.first();
        (
            first
                .map(|property| {
                    if region.key == DEFAULT_REGION {
                        generate_series(property, current_year)
                    } else {
                        generate_series_for_region(property, region.key, current_year)
                    }
                })
                .unwrap_or_default(),
            first.map(|property| property.display_address().to_string()),
            region.name,
        )
    });
    let metrics = state.with(|st| investment_metrics(&st.stats()));

    let dash = || "-".to_string();
    let roi = metrics.map(|m| format!("{:.1}%", m.roi_pct)).unwrap_or_else(dash);
    let payback = metrics
        .map(|m| format!("{:.1} years", m.payback_years))
        .unwrap_or_else(dash);
    let irr = metrics.map(|m| format!("{:.1}%", m.irr_pct)).unwrap_or_else(dash);
    let cap_rate = metrics
        .map(|m| format!("{:.1}%", m.cap_rate_pct))
        .unwrap_or_else(dash);

    rsx! {
        div { class: "space-y-8",
            section { class: theme::PANEL,
                h2 { class: theme::PANEL_TITLE, "Price trend" }
                if let Some(subject) = subject {
                    p { class: "mt-1 text-xs {theme::TEXT_MUTED}", "{subject} · region {region_name}" }
                }
                div { class: "mt-4",
                    TrendChart { series }
                }
            }

            section { class: theme::PANEL,
                h2 { class: theme::PANEL_TITLE, "Regional comparison" }
                div { class: "mt-4 {theme::TABLE_CONTAINER}",
                    table { class: "w-full text-left text-sm",
                        thead { class: theme::TABLE_HEADER,
                            tr {
                                th { class: "px-4 py-2", "Region" }
                                th { class: "px-4 py-2 text-right", "Price / m²" }
                                th { class: "px-4 py-2 text-right", "Change" }
                            }
                        }
                        tbody { class: theme::TABLE_DIVIDER,
                            for region in REGIONAL_COMPARISON {
                                tr { key: "{region.name}",
                                    td { class: "px-4 py-2 text-slate-200", "{region.name}" }
                                    td { class: "px-4 py-2 text-right tabular-nums", "{format_currency(region.price_per_m2)}" }
                                    td { class: "px-4 py-2 text-right {theme::ACCENT_TEXT}", "+{format_number(region.change_pct)}%" }
                                }
                            }
                        }
                    }
                }
            }

            section {
                h2 { class: theme::PANEL_TITLE, "Investment indicators" }
                p { class: "mt-1 text-xs {theme::TEXT_MUTED}", "Indicative figures, not a financial model." }
                div { class: "mt-4 grid gap-4 sm:grid-cols-4",
                    KpiCard { title: "ROI", value: roi }
                    KpiCard { title: "Payback", value: payback }
                    KpiCard { title: "IRR", value: irr }
                    KpiCard { title: "Cap rate", value: cap_rate }
                }
            }
        }
    }
}
