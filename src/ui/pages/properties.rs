use dioxus::prelude::*;
use time::OffsetDateTime;

use crate::domain::pricing::PRICING;
use crate::domain::{AppState, PropertyDraft, PropertyRecord};
use crate::ui::components::property_form::PropertyForm;
use crate::ui::components::toast::{push_toast, ToastKind, ToastMessage};
use crate::ui::components::valuation_table::ValuationTable;
use crate::ui::theme;
use crate::util::format::format_area;

#[derive(Clone, Debug, PartialEq)]
enum FormMode {
    Closed,
    Adding,
    Editing(String),
}

#[component]
pub fn PropertiesPage() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let mut mode = use_signal(|| FormMode::Closed);

    let properties = state.with(|st| st.project.properties.clone());
    let is_empty = properties.is_empty();

    let on_submit = move |draft: PropertyDraft| {
        let now = OffsetDateTime::now_utc();
        match mode() {
            FormMode::Editing(id) => {
                let result = state.with_mut(|st| st.update_property(&id, &draft, now).map(|_| ()));
                match result {
                    Ok(()) => push_toast(toasts, ToastKind::Success, "Property updated."),
                    Err(err) => push_toast(toasts, ToastKind::Error, err.to_string()),
                }
            }
            FormMode::Adding | FormMode::Closed => {
                state.with_mut(|st| {
                    st.add_property(&draft, now);
                });
                push_toast(toasts, ToastKind::Success, "Property added.");
            }
        }
        mode.set(FormMode::Closed);
    };

    let form = match mode() {
        FormMode::Closed => None,
        FormMode::Adding => Some(("new".to_string(), PropertyDraft::blank(), false)),
        FormMode::Editing(id) => properties
            .iter()
            .find(|property| property.id == id)
            .map(|property| (id.clone(), PropertyDraft::from_record(property), true)),
    };

    rsx! {
        div { class: "space-y-8",
            div { class: "flex items-center justify-between",
                h2 { class: "text-lg font-semibold text-slate-200", "Properties" }
                button {
                    class: theme::BTN_PRIMARY,
                    onclick: move |_| mode.set(FormMode::Adding),
                    "Add property"
                }
            }

            if let Some((form_key, initial, editing)) = form {
                PropertyForm {
                    key: "{form_key}",
                    initial,
                    editing,
                    on_submit,
                    on_cancel: move |_| mode.set(FormMode::Closed),
                }
            }

            if is_empty {
                p { class: "rounded-xl border border-dashed border-slate-800 px-6 py-10 text-center text-sm {theme::TEXT_MUTED}",
                    "No properties yet. Add one to get a valuation."
                }
            }
            for property in properties {
                PropertyCard {
                    key: "{property.id}",
                    property,
                    on_edit: move |id: String| mode.set(FormMode::Editing(id)),
                    on_delete: move |id: String| {
                        match state.with_mut(|st| st.delete_property(&id)) {
                            Ok(_) => push_toast(toasts, ToastKind::Info, "Property deleted."),
                            Err(err) => push_toast(toasts, ToastKind::Error, err.to_string()),
                        }
                        if mode() == FormMode::Editing(id) {
                            mode.set(FormMode::Closed);
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn PropertyCard(property: PropertyRecord, on_edit: EventHandler<String>, on_delete: EventHandler<String>) -> Element {
    let edit_id = property.id.clone();
    let delete_id = property.id.clone();

    rsx! {
        article { class: "{theme::PANEL} space-y-4",
            div { class: "flex flex-wrap items-start justify-between gap-4",
                div {
                    h3 { class: "text-base font-semibold text-slate-100", "{property.display_address()}" }
                    p { class: "mt-1 text-sm text-slate-400",
                        "{PRICING.type_label(&property.property_type)} · {format_area(property.area)} · land {format_area(property.land_area)}"
                    }
                    p { class: "mt-1 text-xs {theme::TEXT_MUTED}",
                        "{property.condition.label()} · zone {property.zone.key()}"
                    }
                    if let Some(parcel) = property.cadastral_number.as_deref() {
                        p { class: "mt-1 text-xs {theme::TEXT_MUTED}",
                            "Parcel {parcel} {property.cadastral_territory.as_deref().unwrap_or_default()}"
                        }
                    }
                }
                div { class: "flex gap-2",
                    button { class: theme::BTN_SMALL, onclick: move |_| on_edit.call(edit_id.clone()), "Edit" }
                    button { class: theme::BTN_DANGER, onclick: move |_| on_delete.call(delete_id.clone()), "Delete" }
                }
            }
            ValuationTable { property: property.clone() }
            if !property.notes.is_empty() {
                p { class: "text-sm text-slate-400 whitespace-pre-line", "{property.notes}" }
            }
        }
    }
}
