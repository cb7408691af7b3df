use dioxus::prelude::*;
use time::OffsetDateTime;

use crate::domain::{AppState, ProjectMetadata};
use crate::ui::components::kpi_card::KpiCard;
use crate::ui::components::toast::{push_toast, ToastKind, ToastMessage};
use crate::ui::theme;
use crate::util::format::{format_currency, format_date};

#[component]
pub fn ProjectPage() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let stats = state.with(|st| st.stats());
    let (metadata, form_key, created, imported) = state.with(|st| {
        (
            st.project.metadata(),
            st.project.id.clone().unwrap_or_default(),
            format_date(st.project.created),
            st.project.imported.map(format_date),
        )
    });

    let on_new_project = move |_| {
        state.with_mut(|st| st.new_project(OffsetDateTime::now_utc()));
        push_toast(toasts, ToastKind::Info, "Started a new project.");
    };

    rsx! {
        div { class: "space-y-8",
            div { class: "grid gap-4 sm:grid-cols-3",
                KpiCard { title: "Properties", value: stats.count.to_string() }
                KpiCard { title: "Total value", value: format_currency(stats.total_value) }
                KpiCard { title: "Average value", value: format_currency(stats.average_value) }
            }

            MetadataForm { key: "{form_key}", initial: metadata }

            section { class: "{theme::PANEL} flex flex-wrap items-center justify-between gap-4",
                div { class: "text-sm text-slate-400",
                    p { "Created {created}" }
                    if let Some(imported) = imported {
                        p { "Imported {imported}" }
                    }
                }
                button { class: theme::BTN_DANGER, onclick: on_new_project, "New project" }
            }
        }
    }
}

#[component]
fn MetadataForm(initial: ProjectMetadata) -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let mut form = use_signal(|| initial.clone());
    let current = form();

    let on_save = move |_| {
        let metadata = form();
        state.with_mut(|st| st.update_metadata(metadata));
        push_toast(toasts, ToastKind::Success, "Project details saved.");
    };

    rsx! {
        section { class: theme::PANEL,
            h2 { class: theme::PANEL_TITLE, "Project" }
            div { class: "mt-4 grid gap-4 sm:grid-cols-2",
                div { class: "sm:col-span-2",
                    label { class: theme::LABEL, "Project name" }
                    input {
                        class: theme::INPUT,
                        value: current.name.clone(),
                        oninput: move |evt| form.with_mut(|f| f.name = evt.value()),
                    }
                }
                div {
                    label { class: theme::LABEL, "Company" }
                    input {
                        class: theme::INPUT,
                        value: current.company.name.clone(),
                        oninput: move |evt| form.with_mut(|f| f.company.name = evt.value()),
                    }
                }
                div {
                    label { class: theme::LABEL, "Company ID (IČO)" }
                    input {
                        class: theme::INPUT,
                        value: current.company.ico.clone(),
                        oninput: move |evt| form.with_mut(|f| f.company.ico = evt.value()),
                    }
                }
                div {
                    label { class: theme::LABEL, "Company address" }
                    input {
                        class: theme::INPUT,
                        value: current.company.address.clone(),
                        oninput: move |evt| form.with_mut(|f| f.company.address = evt.value()),
                    }
                }
                div {
                    label { class: theme::LABEL, "Contact" }
                    input {
                        class: theme::INPUT,
                        value: current.company.contact.clone(),
                        oninput: move |evt| form.with_mut(|f| f.company.contact = evt.value()),
                    }
                }
                div { class: "sm:col-span-2",
                    label { class: theme::LABEL, "Notes" }
                    textarea {
                        class: theme::INPUT,
                        rows: "4",
                        value: current.notes.clone(),
                        oninput: move |evt| form.with_mut(|f| f.notes = evt.value()),
                    }
                }
            }
            button { class: "mt-4 {theme::BTN_PRIMARY}", onclick: on_save, "Save" }
        }
    }
}
