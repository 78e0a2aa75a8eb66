//! Signup page: account registration.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::types::RegisterData;
use crate::state::session::AppSession;

/// Raw form values as typed.
#[derive(Clone, Debug, Default)]
struct SignupForm {
    email: String,
    password: String,
    confirm: String,
    first_name: String,
    last_name: String,
    phone: String,
}

impl SignupForm {
    /// Trim text fields, drop a blank phone, and check the password was typed
    /// the same way twice.
    fn into_register_data(self) -> Result<RegisterData, &'static str> {
        if self.password != self.confirm {
            return Err("Passwords do not match");
        }
        let phone = self.phone.trim();
        let data = RegisterData {
            email: self.email.trim().to_owned(),
            password: self.password,
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            phone: (!phone.is_empty()).then(|| phone.to_owned()),
            timezone: None,
        };
        data.validate()?;
        Ok(data)
    }
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let navigate = use_navigate();

    let form = RwSignal::new(SignupForm::default());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let data = match form.get().into_register_data() {
            Ok(data) => data,
            Err(message) => {
                error.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        error.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let session = session.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match session.register(&data).await {
                    Ok(_) => navigate("/", NavigateOptions::default()),
                    Err(e) => error.set(e.to_string()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&session, &navigate, data);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Create an account"</h1>
                <form class="auth-form" on:submit=on_submit>
                    <div class="auth-form__row">
                        <input
                            class="auth-input"
                            type="text"
                            placeholder="First name"
                            required
                            prop:value=move || form.get().first_name
                            on:input=move |ev| form.update(|f| f.first_name = event_target_value(&ev))
                        />
                        <input
                            class="auth-input"
                            type="text"
                            placeholder="Last name"
                            required
                            prop:value=move || form.get().last_name
                            on:input=move |ev| form.update(|f| f.last_name = event_target_value(&ev))
                        />
                    </div>
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="you@example.com"
                        required
                        prop:value=move || form.get().email
                        on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="tel"
                        placeholder="Phone (optional)"
                        prop:value=move || form.get().phone
                        on:input=move |ev| form.update(|f| f.phone = event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Password"
                        required
                        prop:value=move || form.get().password
                        on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Confirm password"
                        required
                        prop:value=move || form.get().confirm
                        on:input=move |ev| form.update(|f| f.confirm = event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating account..." } else { "Sign up" }}
                    </button>
                </form>
                <Show when=move || !error.get().is_empty()>
                    <p class="auth-message auth-message--error">{move || error.get()}</p>
                </Show>
                <p class="auth-card__footer">
                    "Already registered? "
                    <a href="/login">"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
