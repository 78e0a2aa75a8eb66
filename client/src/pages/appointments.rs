use leptos::prelude::*;

use super::PageCard;

#[component]
pub fn AppointmentsPage() -> impl IntoView {
    view! { <PageCard title="My Appointments" body="Your appointments will appear here..."/> }
}
