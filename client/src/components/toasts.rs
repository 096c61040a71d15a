//! Toast list for session and page notices.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthContext` and pages emit notices through the [`Notifier`] seam;
//! [`SignalNotifier`] pushes them into the reactive queue this component
//! renders. Each toast dismisses itself after [`TOAST_LIFETIME`].

#[cfg(test)]
#[path = "toasts_test.rs"]
mod toasts_test;

use std::time::Duration;

use leptos::prelude::*;

use crate::state::notice::{Notice, NoticeLevel, NoticeState, Notifier};

/// How long a toast stays visible.
pub const TOAST_LIFETIME: Duration = Duration::from_secs(4);

/// `Notifier` backed by the toast queue signal.
#[derive(Clone, Copy)]
pub struct SignalNotifier(pub RwSignal<NoticeState>);

impl Notifier for SignalNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => log::warn!("notice: {}", notice.message),
            NoticeLevel::Success | NoticeLevel::Info => log::info!("notice: {}", notice.message),
        }
        let notices = self.0;
        let id = notices.try_update(|state| state.push(notice));

        #[cfg(feature = "hydrate")]
        {
            if let Some(id) = id {
                leptos::task::spawn_local(async move {
                    gloo_timers::future::sleep(TOAST_LIFETIME).await;
                    notices.try_update(|state| state.dismiss(id));
                });
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = id;
        }
    }
}

pub(crate) fn toast_class(level: NoticeLevel) -> String {
    format!("toast {}", level.css_modifier())
}

/// Fixed-position list of active toasts.
#[component]
pub fn Toasts() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();

    view! {
        <div class="toasts" role="status" aria-live="polite">
            <For
                each=move || notices.get().items
                key=|(id, _)| *id
                children=move |(id, notice)| {
                    view! {
                        <div class=toast_class(notice.level)>
                            <span class="toast__message">{notice.message}</span>
                            <button
                                class="toast__close"
                                aria-label="Dismiss"
                                on:click=move |_| notices.update(|state| state.dismiss(id))
                            >
                                "x"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
