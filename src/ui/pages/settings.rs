use std::path::PathBuf;

use dioxus::prelude::*;

use crate::{
    app::persist_preferences,
    domain::{pricing::PRICING, AppState},
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        theme,
    },
    util::{
        persistence::Preferences,
        transfer::output_dir,
        version::{version_label, APP_AUTHOR, APP_NAME, EXPORT_FORMAT_VERSION},
    },
};

#[component]
pub fn SettingsPage() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let initial = state.with(|st| st.preferences.clone());
    let mut company_name = use_signal(|| initial.default_company.name.clone());
    let mut company_ico = use_signal(|| initial.default_company.ico.clone());
    let mut company_address = use_signal(|| initial.default_company.address.clone());
    let mut company_contact = use_signal(|| initial.default_company.contact.clone());
    let mut chart_region = use_signal(|| initial.chart_region.clone());
    let mut export_dir = use_signal(|| {
        initial
            .export_dir
            .as_ref()
            .map(|dir| dir.display().to_string())
            .unwrap_or_default()
    });

    let effective_dir = state.with(|st| {
        output_dir(&st.preferences)
            .map(|dir| dir.display().to_string())
            .unwrap_or_else(|err| err.to_string())
    });

    let on_apply = move |_| {
        let mut preferences = state.with(|st| st.preferences.clone());
        preferences.default_company.name = company_name().trim().to_string();
        preferences.default_company.ico = company_ico().trim().to_string();
        preferences.default_company.address = company_address().trim().to_string();
        preferences.default_company.contact = company_contact().trim().to_string();
        preferences.chart_region = chart_region();
        let dir = export_dir();
        preferences.export_dir = (!dir.trim().is_empty()).then(|| PathBuf::from(dir.trim()));

        state.with_mut(|st| st.apply_preferences(preferences));
        persist_preferences(&state, toasts);
        push_toast(toasts, ToastKind::Success, "Settings saved.");
    };

    let on_reset = move |_| {
        let defaults = Preferences::default();
        company_name.set(defaults.default_company.name.clone());
        company_ico.set(defaults.default_company.ico.clone());
        company_address.set(defaults.default_company.address.clone());
        company_contact.set(defaults.default_company.contact.clone());
        chart_region.set(defaults.chart_region.clone());
        export_dir.set(String::new());
        state.with_mut(|st| st.apply_preferences(defaults));
        persist_preferences(&state, toasts);
        push_toast(toasts, ToastKind::Info, "Restored default settings.");
    };

    rsx! {
        div { class: "space-y-8",
            section { class: theme::PANEL,
                h2 { class: theme::PANEL_TITLE, "Default company" }
                p { class: "mt-2 text-sm text-slate-400", "Filled into every new project." }
                div { class: "mt-4 grid gap-4 sm:grid-cols-2",
                    div {
                        label { class: theme::LABEL, "Company" }
                        input { class: theme::INPUT, value: company_name(), oninput: move |evt| company_name.set(evt.value()) }
                    }
                    div {
                        label { class: theme::LABEL, "Company ID (IČO)" }
                        input { class: theme::INPUT, value: company_ico(), oninput: move |evt| company_ico.set(evt.value()) }
                    }
                    div {
                        label { class: theme::LABEL, "Address" }
                        input { class: theme::INPUT, value: company_address(), oninput: move |evt| company_address.set(evt.value()) }
                    }
                    div {
                        label { class: theme::LABEL, "Contact" }
                        input { class: theme::INPUT, value: company_contact(), oninput: move |evt| company_contact.set(evt.value()) }
                    }
                }
            }

            section { class: theme::PANEL,
                h2 { class: theme::PANEL_TITLE, "Analysis & files" }
                div { class: "mt-4 grid gap-4 sm:grid-cols-2",
                    div {
                        label { class: theme::LABEL, "Trend chart region" }
                        select {
                            class: theme::INPUT,
                            value: chart_region(),
                            onchange: move |evt| chart_region.set(evt.value()),
                            for region in PRICING.regions() {
                                option {
                                    value: region.key,
                                    selected: chart_region() == region.key,
                                    "{region.name}"
                                }
                            }
                        }
                    }
                    div {
                        label { class: theme::LABEL, "Export folder" }
                        input {
                            class: theme::INPUT,
                            placeholder: "Downloads folder",
                            value: export_dir(),
                            oninput: move |evt| export_dir.set(evt.value()),
                        }
                        p { class: "mt-1 text-xs {theme::TEXT_MUTED}", "Currently writing to {effective_dir}" }
                    }
                }
            }

            div { class: "flex gap-3",
                button { class: theme::BTN_PRIMARY, onclick: on_apply, "Save settings" }
                button { class: theme::BTN_SECONDARY, onclick: on_reset, "Reset defaults" }
            }

            section {
                class: "flex flex-col items-center gap-1 rounded-xl border border-slate-800 bg-slate-900/40 p-6 text-center text-sm text-slate-400",
                p { class: "font-semibold text-slate-200", "{APP_NAME} {version_label()}" }
                p { "Export format {EXPORT_FORMAT_VERSION}" }
                p { class: "text-xs {theme::TEXT_MUTED}", "© {APP_AUTHOR}" }
            }
        }
    }
}
