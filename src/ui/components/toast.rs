use std::time::Duration;

use dioxus::prelude::*;
use tracing::{info, warn};

use crate::util::generate_id;

const MAX_VISIBLE: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl ToastKind {
    fn lifetime(self) -> Duration {
        match self {
            ToastKind::Error => Duration::from_secs(8),
            ToastKind::Info | ToastKind::Success => Duration::from_secs(4),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToastMessage {
    pub id: String,
    pub kind: ToastKind,
    pub text: String,
}

impl ToastMessage {
    pub fn new(kind: ToastKind, text: impl Into<String>) -> Self {
        Self {
            id: generate_id("toast"),
            kind,
            text: text.into(),
        }
    }
}

/// Queues a notification; the oldest one is dropped once the stack is full.
pub fn push_toast(mut toasts: Signal<Vec<ToastMessage>>, kind: ToastKind, message: impl Into<String>) {
    let text = message.into();
    match kind {
        ToastKind::Error => warn!(message = %text, "notified user of failure"),
        _ => info!(message = %text, "notified user"),
    }
    toasts.with_mut(|entries| {
        if entries.len() >= MAX_VISIBLE {
            entries.remove(0);
        }
        entries.push(ToastMessage::new(kind, text));
    });
}

#[component]
pub fn Toast() -> Element {
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let entries = toasts();

    if entries.is_empty() {
        return rsx! { Fragment {} };
    }

    rsx! {
        div {
            class: "pointer-events-none fixed right-4 top-4 z-50 flex flex-col items-end",
            ul {
                class: "space-y-3",
                for message in entries {
                    ToastCard { key: "{message.id}", message, toasts }
                }
            }
        }
    }
}

#[component]
fn ToastCard(message: ToastMessage, toasts: Signal<Vec<ToastMessage>>) -> Element {
    let timer_id = message.id.clone();
    let lifetime = message.kind.lifetime();
    let _auto_dismiss = use_future(move || {
        let mut toasts = toasts;
        let id = timer_id.clone();
        async move {
            tokio::time::sleep(lifetime).await;
            toasts.with_mut(|items| items.retain(|toast| toast.id != id));
        }
    });

    let (theme, icon) = match message.kind {
        ToastKind::Info => ("border-sky-500/40 bg-sky-500/10 text-sky-100", "ℹ️"),
        ToastKind::Success => ("border-emerald-500/40 bg-emerald-500/10 text-emerald-100", "✅"),
        ToastKind::Error => ("border-rose-500/40 bg-rose-500/10 text-rose-100", "⛔"),
    };
    let dismiss_id = message.id.clone();

    rsx! {
        li {
            class: "pointer-events-auto flex max-w-sm items-start gap-3 rounded-xl border px-4 py-3 shadow-lg backdrop-blur {theme}",
            span { class: "text-lg", "{icon}" }
            p { class: "text-sm font-medium", "{message.text}" }
            button {
                class: "ml-3 text-xs uppercase tracking-wide text-slate-300 hover:text-white",
                onclick: move |_| {
                    let target = dismiss_id.clone();
                    toasts.with_mut(|items| items.retain(|toast| toast.id != target));
                },
                "×"
            }
        }
    }
}
