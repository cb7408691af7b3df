use dioxus::prelude::*;

use crate::domain::{compute_valuation_methods, PropertyRecord};
use crate::ui::components::confidence_badge::ConfidenceBadge;
use crate::ui::theme;
use crate::util::format::{format_area, format_currency};

/// Method breakdown and recommended value for one property.
#[component]
pub fn ValuationTable(property: PropertyRecord) -> Element {
    let valuation = match compute_valuation_methods(&property) {
        Ok(valuation) => valuation,
        Err(err) => {
            return rsx! {
                p { class: "rounded-lg border border-rose-500/40 bg-rose-500/10 px-3 py-2 text-sm text-rose-200",
                    "Valuation unavailable: {err}"
                }
            };
        }
    };
    let base = &valuation.base;

    rsx! {
        div { class: theme::TABLE_CONTAINER,
            table { class: "w-full text-left text-sm",
                thead { class: theme::TABLE_HEADER,
                    tr {
                        th { class: "px-4 py-2", "Method" }
                        th { class: "px-4 py-2 text-right", "Value" }
                        th { class: "px-4 py-2 text-right", "Confidence" }
                    }
                }
                tbody { class: theme::TABLE_DIVIDER,
                    for method in valuation.methods.iter() {
                        tr { key: "{method.name}",
                            td { class: "px-4 py-2",
                                p { class: "font-medium text-slate-200", "{method.name}" }
                                p { class: "text-xs {theme::TEXT_MUTED}", "{method.description}" }
                            }
                            td { class: "px-4 py-2 text-right tabular-nums", "{format_currency(method.value)}" }
                            td { class: "px-4 py-2 text-right", ConfidenceBadge { value: method.confidence } }
                        }
                    }
                }
            }
            div { class: "flex flex-wrap items-center justify-between gap-3 border-t border-slate-800 px-4 py-3",
                p { class: "text-xs {theme::TEXT_MUTED}",
                    "{format_currency(base.price_per_m2)} / m² × {format_area(base.effective_area)}"
                }
                div { class: "flex items-center gap-3",
                    span { class: "text-xs uppercase {theme::TEXT_MUTED}", "Recommended" }
                    span { class: "text-lg font-semibold {theme::ACCENT_TEXT}",
                        "{format_currency(valuation.recommended_value)}"
                    }
                    ConfidenceBadge { value: valuation.confidence }
                }
            }
        }
    }
}
