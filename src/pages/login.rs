//! Login Page
//!
//! On success the token is stored and the user lands on the dashboard;
//! failures show a toast and keep the typed values.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::components::{FieldError, Navbar, PasswordInput};
use crate::context::use_app_context;
use crate::forms::FormController;
use crate::hooks::run_mutation;
use crate::queries::SIGN_IN;
use crate::validation::LoginValues;

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app_context();
    let navigate = use_navigate();
    let form = RwSignal::new(FormController::create(LoginValues::default()));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(request) = form.try_update(|f| f.begin_submit()).flatten() else {
            return;
        };
        let api = ctx.api();
        let navigate = navigate.clone();
        run_mutation(ctx, SIGN_IN, async move { api.login(&request).await }, move |result| {
            form.try_update(|f| f.finish_submit(result.is_ok()));
            if let Ok(response) = result {
                ctx.sign_in(&response.token);
                navigate("/dashboard", Default::default());
            }
        });
    };

    let error = move |field: &'static str| Signal::derive(move || form.with(|f| f.error(field).map(str::to_string)));
    let pending = move || form.with(|f| f.is_pending());

    view! {
        <Navbar />
        <div class="auth-page">
            <form class="auth-form" on:submit=on_submit>
                <h4>"Login"</h4>
                <div class="form-field">
                    <input
                        type="text"
                        placeholder="Email"
                        prop:value=move || form.with(|f| f.values().email.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.update(|v| v.email = value));
                        }
                    />
                    <FieldError message=error("email") />
                </div>
                <div class="form-field">
                    <PasswordInput
                        value=Signal::derive(move || form.with(|f| f.values().password.clone()))
                        on_input=Callback::new(move |value: String| form.update(|f| f.update(|v| v.password = value)))
                    />
                    <FieldError message=error("password") />
                </div>
                <button type="submit" class="submit-btn" disabled=pending>
                    {move || if pending() { "Loading..." } else { "Login" }}
                </button>
                <p class="auth-switch">
                    "Not registered yet? "
                    <A href="/sign-up">"Create an Account"</A>
                </p>
            </form>
        </div>
    }
}
