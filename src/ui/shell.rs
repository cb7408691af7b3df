use dioxus::prelude::*;

use crate::app::Route;
use crate::domain::AppState;
use crate::util::version::{version_label, APP_AUTHOR, APP_NAME};

#[component]
pub fn Shell(children: Element) -> Element {
    let state = use_context::<Signal<AppState>>();
    let project_name = state.with(|s| s.project.name.clone());
    let property_count = state.with(|s| s.project.properties.len());

    let current_route = use_route::<Route>();
    let nav = use_navigator();

    rsx! {
        div { class: "min-h-screen bg-slate-950 text-slate-100 font-sans",
            header {
                class: "border-b border-slate-900/60 bg-slate-950/90 backdrop-blur px-6 py-4",
                div { class: "mx-auto flex max-w-6xl items-center justify-between gap-4",
                    div {
                        h1 { class: "text-xl font-semibold tracking-tight text-emerald-200", "{APP_NAME}" }
                        p { class: "text-xs text-slate-500",
                            "{project_name} · {property_count} properties"
                        }
                    }
                    nav { class: "flex gap-2 text-sm",
                        NavButton { active: matches!(current_route, Route::Project {}), onclick: move |_| { nav.push(Route::Project {}); }, label: "Project" }
                        NavButton { active: matches!(current_route, Route::Properties {}), onclick: move |_| { nav.push(Route::Properties {}); }, label: "Properties" }
                        NavButton { active: matches!(current_route, Route::Analysis {}), onclick: move |_| { nav.push(Route::Analysis {}); }, label: "Analysis" }
                        NavButton { active: matches!(current_route, Route::Reports {}), onclick: move |_| { nav.push(Route::Reports {}); }, label: "Reports" }
                        NavButton { active: matches!(current_route, Route::Data {}), onclick: move |_| { nav.push(Route::Data {}); }, label: "Import / Export" }
                        NavButton { active: matches!(current_route, Route::Settings {}), onclick: move |_| { nav.push(Route::Settings {}); }, label: "⚙️" }
                    }
                }
            }
            main { class: "mx-auto max-w-6xl px-6 py-10",
                {children}
            }
            footer { class: "mx-auto max-w-6xl px-6 pb-8 text-xs text-slate-600",
                "{APP_NAME} {version_label()} · {APP_AUTHOR}"
            }
        }
    }
}

#[component]
fn NavButton(active: bool, onclick: EventHandler<()>, label: &'static str) -> Element {
    let class = if active {
        "min-w-[5.5rem] rounded-lg border border-emerald-500/60 bg-emerald-500/15 px-4 py-2 font-semibold text-emerald-300"
    } else {
        "min-w-[5.5rem] rounded-lg border border-transparent px-4 py-2 text-slate-400 transition hover:border-slate-700 hover:bg-slate-900/80 hover:text-slate-200"
    };

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}
