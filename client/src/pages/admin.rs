use leptos::prelude::*;

use super::PageCard;

#[component]
pub fn AdminPage() -> impl IntoView {
    view! {
        <PageCard title="Admin Dashboard" body="Admin analytics and management coming soon..."/>
    }
}
