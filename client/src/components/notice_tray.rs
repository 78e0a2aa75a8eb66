//! Toast tray for session notices.

use leptos::prelude::*;

use crate::state::notice::{NoticeKind, NoticeState};

fn notice_class(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Success => "notice notice--success",
        NoticeKind::Error => "notice notice--error",
    }
}

/// Stack of transient notices. Entries expire on their own; clicking one
/// dismisses it early.
#[component]
pub fn NoticeTray() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();

    view! {
        <div class="notice-tray" role="status" aria-live="polite">
            <For
                each=move || notices.get().items
                key=|(id, _)| *id
                children=move |(id, notice)| {
                    view! {
                        <div class=notice_class(notice.kind) on:click=move |_| notices.update(|n| n.dismiss(id))>
                            {notice.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
