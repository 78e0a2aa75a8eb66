use leptos::prelude::*;

use super::PageCard;

/// Staff working hours and breaks.
#[component]
pub fn SchedulePage() -> impl IntoView {
    view! { <PageCard title="My Schedule" body="Your working hours and breaks will appear here..."/> }
}
