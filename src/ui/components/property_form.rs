use dioxus::prelude::*;

use crate::domain::entities::{Condition, PropertyDraft, Zone};
use crate::domain::pricing::PRICING;
use crate::infra::cadastral::{self, CadastralRecord, MockCadastralClient};
use crate::ui::components::toast::{push_toast, ToastKind, ToastMessage};
use crate::ui::theme;
use crate::util::format::format_area;

/// Add/edit form. Remount it (via `key`) to load a different draft.
#[component]
pub fn PropertyForm(
    initial: PropertyDraft,
    editing: bool,
    on_submit: EventHandler<PropertyDraft>,
    on_cancel: EventHandler<()>,
) -> Element {
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let client = use_context::<MockCadastralClient>();

    let mut draft = use_signal(|| initial.clone());
    let mut search_input = use_signal(String::new);
    let mut searching = use_signal(|| false);
    let mut found = use_signal(|| None::<CadastralRecord>);

    let on_search = move |_| {
        let client = client.clone();
        let input = search_input();
        searching.set(true);
        spawn(async move {
            match cadastral::search(&client, &input).await {
                Ok(record) => {
                    draft.with_mut(|d| record.fill_draft(d));
                    found.set(Some(record));
                    push_toast(toasts, ToastKind::Success, "Cadastral data loaded.");
                }
                Err(err) => push_toast(toasts, ToastKind::Error, format!("Cadastral search failed: {err}")),
            }
            searching.set(false);
        });
    };

    let current = draft();
    let title = if editing { "Edit property" } else { "New property" };
    let submit_label = if editing { "Save changes" } else { "Add property" };

    rsx! {
        section { class: theme::PANEL,
            h2 { class: theme::PANEL_TITLE, "{title}" }

            div { class: "mt-4 flex gap-3",
                input {
                    class: theme::INPUT,
                    placeholder: "Parcel and municipality, e.g. 123/4 Kolín",
                    value: search_input(),
                    oninput: move |evt| search_input.set(evt.value()),
                }
                button {
                    class: theme::BTN_SECONDARY,
                    disabled: searching(),
                    onclick: on_search,
                    if searching() { "Searching…" } else { "Search cadastre" }
                }
            }
            if let Some(record) = found() {
                CadastralSummary { record }
            }

            div { class: "mt-4 grid gap-4 sm:grid-cols-2",
                div { class: "sm:col-span-2",
                    label { class: theme::LABEL, "Address" }
                    input {
                        class: theme::INPUT,
                        value: current.address.clone(),
                        oninput: move |evt| draft.with_mut(|d| d.address = evt.value()),
                    }
                }
                div {
                    label { class: theme::LABEL, "Parcel number" }
                    input {
                        class: theme::INPUT,
                        value: current.cadastral_number.clone(),
                        oninput: move |evt| draft.with_mut(|d| d.cadastral_number = evt.value()),
                    }
                }
                div {
                    label { class: theme::LABEL, "Cadastral territory" }
                    input {
                        class: theme::INPUT,
                        value: current.cadastral_territory.clone(),
                        oninput: move |evt| draft.with_mut(|d| d.cadastral_territory = evt.value()),
                    }
                }
                div {
                    label { class: theme::LABEL, "Property type" }
                    select {
                        class: theme::INPUT,
                        value: current.property_type.clone(),
                        onchange: move |evt| draft.with_mut(|d| d.property_type = evt.value()),
                        for entry in PRICING.property_types() {
                            option {
                                value: entry.key,
                                selected: current.property_type == entry.key,
                                "{entry.name}"
                            }
                        }
                    }
                }
                div {
                    label { class: theme::LABEL, "Condition" }
                    select {
                        class: theme::INPUT,
                        value: current.condition.clone(),
                        onchange: move |evt| draft.with_mut(|d| d.condition = evt.value()),
                        for condition in Condition::KNOWN {
                            option {
                                value: condition.key(),
                                selected: current.condition == condition.key(),
                                "{condition.label()}"
                            }
                        }
                    }
                }
                div {
                    label { class: theme::LABEL, "Floor area (m²)" }
                    input {
                        class: theme::INPUT,
                        value: current.area.clone(),
                        oninput: move |evt| draft.with_mut(|d| d.area = evt.value()),
                    }
                }
                div {
                    label { class: theme::LABEL, "Land area (m²)" }
                    input {
                        class: theme::INPUT,
                        value: current.land_area.clone(),
                        oninput: move |evt| draft.with_mut(|d| d.land_area = evt.value()),
                    }
                }
                div {
                    label { class: theme::LABEL, "Location zone" }
                    select {
                        class: theme::INPUT,
                        value: current.zone.clone(),
                        onchange: move |evt| draft.with_mut(|d| d.zone = evt.value()),
                        for zone in Zone::KNOWN {
                            option {
                                value: zone.key(),
                                selected: current.zone == zone.key(),
                                "Zone {zone.key()}"
                            }
                        }
                    }
                }
                div { class: "sm:col-span-2",
                    label { class: theme::LABEL, "Notes" }
                    textarea {
                        class: theme::INPUT,
                        rows: "3",
                        value: current.notes.clone(),
                        oninput: move |evt| draft.with_mut(|d| d.notes = evt.value()),
                    }
                }
            }

            div { class: "mt-4 flex gap-3",
                button {
                    class: theme::BTN_PRIMARY,
                    onclick: move |_| on_submit.call(draft()),
                    "{submit_label}"
                }
                button {
                    class: theme::BTN_SECONDARY,
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
            }
        }
    }
}

#[component]
fn CadastralSummary(record: CadastralRecord) -> Element {
    let links = record.map_links();
    rsx! {
        div { class: "mt-3 rounded-lg border border-emerald-500/30 bg-emerald-500/5 px-4 py-3 text-sm text-slate-300",
            p { class: "font-semibold text-emerald-200", "Found in cadastre" }
            p { "Address: {record.address}" }
            p { "Area: {format_area(record.area)}" }
            p { "Land use: {record.land_use}" }
            p { "Owner: {record.owner}" }
            div { class: "mt-2 flex gap-4 text-xs",
                a { href: "{links.map_url}", target: "_blank", rel: "noreferrer", class: "text-emerald-300 hover:underline", "Map" }
                a { href: "{links.cadastral_url}", target: "_blank", rel: "noreferrer", class: "text-emerald-300 hover:underline", "Cadastral viewer" }
            }
        }
    }
}
