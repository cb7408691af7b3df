use std::path::PathBuf;

use dioxus::prelude::*;
use time::OffsetDateTime;

use crate::domain::AppState;
use crate::ui::components::toast::{push_toast, ToastKind, ToastMessage};
use crate::ui::theme;
use crate::util::transfer::{output_dir, read_import_file, write_export};

#[component]
pub fn DataPage() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let mut preview = use_signal(String::new);
    let mut import_path = use_signal(String::new);
    let mut import_text = use_signal(String::new);

    let on_export = move |_| {
        let now = OffsetDateTime::now_utc();
        let (project, preferences) = state.with(|st| (st.project.clone(), st.preferences.clone()));
        match output_dir(&preferences).and_then(|dir| write_export(&dir, &project, now)) {
            Ok(path) => push_toast(toasts, ToastKind::Success, format!("Project exported to {}", path.display())),
            Err(err) => push_toast(toasts, ToastKind::Error, format!("Export failed: {err}")),
        }
    };

    let on_preview = move |_| match state.with(|st| st.export_document(OffsetDateTime::now_utc())) {
        Ok(json) => preview.set(json),
        Err(err) => push_toast(toasts, ToastKind::Error, format!("Export failed: {err}")),
    };

    let mut apply_import = move |json: String| {
        let result = state.with_mut(|st| st.import_document(&json, OffsetDateTime::now_utc()));
        match result {
            Ok(count) => push_toast(
                toasts,
                ToastKind::Success,
                format!("Project imported with {count} properties."),
            ),
            Err(err) => push_toast(toasts, ToastKind::Error, err.to_string()),
        }
    };

    let on_import_file = move |_| {
        let path = PathBuf::from(import_path().trim());
        match read_import_file(&path) {
            Ok(json) => apply_import(json),
            Err(err) => push_toast(toasts, ToastKind::Error, format!("Could not read {}: {err}", path.display())),
        }
    };

    let on_import_text = move |_| {
        let json = import_text();
        if json.trim().is_empty() {
            push_toast(toasts, ToastKind::Error, "Paste an exported project first.");
            return;
        }
        apply_import(json);
        import_text.set(String::new());
    };

    rsx! {
        div { class: "space-y-8",
            section { class: theme::PANEL,
                h2 { class: theme::PANEL_TITLE, "Export" }
                p { class: "mt-2 text-sm text-slate-400",
                    "Saves the whole project as JSON to the export folder set in Settings, or your downloads folder."
                }
                div { class: "mt-4 flex gap-3",
                    button { class: theme::BTN_PRIMARY, onclick: on_export, "Export project" }
                    button { class: theme::BTN_SECONDARY, onclick: on_preview, "Show JSON" }
                }
                if !preview().is_empty() {
                    textarea {
                        class: "mt-4 h-64 {theme::TEXTAREA}",
                        readonly: true,
                        value: preview(),
                    }
                }
            }

            section { class: theme::PANEL,
                h2 { class: theme::PANEL_TITLE, "Import" }
                p { class: "mt-2 text-sm text-slate-400",
                    "Replaces the current project. Files from version 3 are converted automatically."
                }
                div { class: "mt-4 flex gap-3",
                    input {
                        class: theme::INPUT,
                        placeholder: "/path/to/project.json",
                        value: import_path(),
                        oninput: move |evt| import_path.set(evt.value()),
                    }
                    button { class: theme::BTN_SECONDARY, onclick: on_import_file, "Import file" }
                }
                textarea {
                    class: "mt-4 h-40 {theme::TEXTAREA}",
                    placeholder: "…or paste exported JSON here",
                    value: import_text(),
                    oninput: move |evt| import_text.set(evt.value()),
                }
                button { class: "mt-3 {theme::BTN_SECONDARY}", onclick: on_import_text, "Import pasted JSON" }
            }
        }
    }
}
