use dioxus::prelude::*;
use time::OffsetDateTime;

use crate::domain::{AppState, ProjectReport};
use crate::ui::components::confidence_badge::ConfidenceBadge;
use crate::ui::components::kpi_card::KpiCard;
use crate::ui::components::toast::{push_toast, ToastKind, ToastMessage};
use crate::ui::theme;
use crate::util::format::{format_area, format_currency, format_date};
use crate::util::transfer::{output_dir, write_report};

#[component]
pub fn ReportsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let report = state.with(|st| ProjectReport::generate(&st.project, OffsetDateTime::now_utc()));

    let on_save = move |_| {
        let (report, preferences) = state.with(|st| {
            (
                ProjectReport::generate(&st.project, OffsetDateTime::now_utc()),
                st.preferences.clone(),
            )
        });
        let saved = output_dir(&preferences).and_then(|dir| write_report(&dir, &report));
        match saved {
            Ok(path) => push_toast(toasts, ToastKind::Success, format!("Report saved to {}", path.display())),
            Err(err) => push_toast(toasts, ToastKind::Error, format!("Could not save report: {err}")),
        }
    };

    rsx! {
        div { class: "space-y-8",
            section { class: "{theme::PANEL} flex flex-wrap items-start justify-between gap-4",
                div {
                    h2 { class: "text-lg font-semibold text-slate-100", "Valuation summary report" }
                    p { class: "mt-1 text-sm text-slate-400", "{report.project_name} · {report.company_name}" }
                    p { class: "text-xs {theme::TEXT_MUTED}", "{format_date(report.generated_at)}" }
                }
                button { class: theme::BTN_PRIMARY, onclick: on_save, "Download report" }
            }

            div { class: "grid gap-4 sm:grid-cols-3",
                KpiCard { title: "Properties", value: report.stats.count.to_string() }
                KpiCard { title: "Total value", value: format_currency(report.stats.total_value) }
                KpiCard { title: "Average value", value: format_currency(report.stats.average_value) }
            }

            for section in report.sections {
                article { key: "{section.property_id}", class: "{theme::PANEL} space-y-3",
                    h3 { class: "text-base font-semibold text-slate-100", "{section.address}" }
                    p { class: "text-sm text-slate-400",
                        "{section.type_label} · {format_area(section.floor_area)} · land {format_area(section.land_area)} · {section.condition_label}"
                    }
                    match section.valuation {
                        Ok(valuation) => rsx! {
                            ul { class: "space-y-1 text-sm",
                                for method in valuation.methods {
                                    li { key: "{method.name}", class: "flex items-center justify-between gap-4",
                                        span { class: "text-slate-300", "{method.name}" }
                                        span { class: "flex items-center gap-2 tabular-nums",
                                            "{format_currency(method.value)}"
                                            ConfidenceBadge { value: method.confidence }
                                        }
                                    }
                                }
                            }
                            p { class: "text-sm font-semibold {theme::ACCENT_TEXT}",
                                "Recommended value: {format_currency(valuation.recommended_value)}"
                            }
                        },
                        Err(err) => rsx! {
                            p { class: "text-sm text-rose-300", "Valuation unavailable: {err}" }
                        },
                    }
                }
            }
        }
    }
}
