use leptos::prelude::*;

use super::PageCard;

#[component]
pub fn BookingPage() -> impl IntoView {
    view! { <PageCard title="Book an Appointment" body="Booking form coming soon..."/> }
}
