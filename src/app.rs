use dioxus::prelude::*;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::{
    domain::AppState,
    infra::cadastral::MockCadastralClient,
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::{AnalysisPage, DataPage, ProjectPage, PropertiesPage, ReportsPage, SettingsPage},
        shell::Shell,
    },
    util::{
        assets,
        persistence::{load_preferences, save_preferences},
        version::version_label,
    },
};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Project {},
    #[route("/properties")]
    Properties {},
    #[route("/analysis")]
    Analysis {},
    #[route("/reports")]
    Reports {},
    #[route("/data")]
    Data {},
    #[route("/settings")]
    Settings {},
}

#[component]
pub fn App() -> Element {
    let state = use_signal(|| {
        let preferences = load_preferences().unwrap_or_default();
        info!(version = %version_label(), "starting session");
        AppState::with_preferences(preferences, OffsetDateTime::now_utc())
    });
    use_context_provider(|| state);

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    use_context_provider(MockCadastralClient::new);

    rsx! {
        document::Link { rel: "icon", href: assets::favicon_data_uri() }
        document::Style { "{assets::main_css()}" }
        document::Style { "{assets::tailwind_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

/// Writes the session's preferences to disk, telling the user if that fails.
pub fn persist_preferences(state: &Signal<AppState>, toasts: Signal<Vec<ToastMessage>>) {
    let snapshot = state.with(|st| st.preferences.clone());
    if let Err(err) = save_preferences(&snapshot) {
        warn!(%err, "failed to persist preferences");
        push_toast(toasts, ToastKind::Error, format!("Settings could not be saved: {err}"));
    }
}

#[component]
pub fn Project() -> Element {
    rsx! { Shell { ProjectPage {} } }
}

#[component]
pub fn Properties() -> Element {
    rsx! { Shell { PropertiesPage {} } }
}

#[component]
pub fn Analysis() -> Element {
    rsx! { Shell { AnalysisPage {} } }
}

#[component]
pub fn Reports() -> Element {
    rsx! { Shell { ReportsPage {} } }
}

#[component]
pub fn Data() -> Element {
    rsx! { Shell { DataPage {} } }
}

#[component]
pub fn Settings() -> Element {
    rsx! { Shell { SettingsPage {} } }
}
