//! Transient toast notifications.
//!
//! `ToastService` is provided once at the app root; any component can push
//! a toast, which expires on its own after a few seconds.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

const TOAST_LIFETIME_MS: u32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl ToastKind {
    fn class(&self) -> &'static str {
        match self {
            ToastKind::Info => "toast toast-info",
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    id: u64,
    kind: ToastKind,
    text: String,
}

#[derive(Clone, Copy)]
pub struct ToastService {
    toasts: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u64>,
}

impl ToastService {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(1),
        }
    }

    pub fn push(&self, kind: ToastKind, text: impl Into<String>) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);
        self.toasts.update(|list| {
            list.push(Toast {
                id,
                kind,
                text: text.into(),
            });
        });

        let toasts = self.toasts;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_LIFETIME_MS).await;
            toasts.update(|list| list.retain(|t| t.id != id));
        });
    }

    pub fn info(&self, text: impl Into<String>) {
        self.push(ToastKind::Info, text);
    }

    pub fn success(&self, text: impl Into<String>) {
        self.push(ToastKind::Success, text);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.push(ToastKind::Error, text);
    }
}

pub fn use_toasts() -> ToastService {
    use_context::<ToastService>().expect("ToastService not found. Provide it at the app root.")
}

/// Renders the active toasts; mounted once at the app root.
#[component]
pub fn ToastHost() -> impl IntoView {
    let svc = use_toasts();
    view! {
        <div class="toast-host">
            <For
                each=move || svc.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    view! { <div class=toast.kind.class()>{toast.text.clone()}</div> }
                }
            />
        </div>
    }
}
