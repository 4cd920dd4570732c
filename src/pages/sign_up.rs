//! Sign-up Page

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::components::{FieldError, Navbar, PasswordInput};
use crate::config::SIGN_UP_SUCCESS_TOAST_MS;
use crate::context::{use_app_context, AppContext};
use crate::forms::FormController;
use crate::hooks::run_mutation;
use crate::queries::SIGN_UP;
use crate::toast::Toast;
use crate::validation::SignUpValues;

#[component]
pub fn SignUpPage() -> impl IntoView {
    let ctx = use_app_context();
    let navigate = use_navigate();
    let form = RwSignal::new(FormController::create(SignUpValues::default()));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(request) = form.try_update(|f| f.begin_submit()).flatten() else {
            return;
        };
        let api = ctx.api();
        let navigate = navigate.clone();
        run_mutation(ctx, SIGN_UP, async move { api.register(&request).await }, move |result| {
            finish_sign_up(ctx, form, result.is_ok(), |path| navigate(path, Default::default()));
        });
    };

    let error = move |field: &'static str| Signal::derive(move || form.with(|f| f.error(field).map(str::to_string)));
    let pending = move || form.with(|f| f.is_pending());

    view! {
        <Navbar />
        <div class="auth-page">
            <form class="auth-form" on:submit=on_submit>
                <h4>"SignUp"</h4>
                <div class="form-field">
                    <input
                        type="text"
                        placeholder="Name"
                        prop:value=move || form.with(|f| f.values().name.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.update(|v| v.name = value));
                        }
                    />
                    <FieldError message=error("name") />
                </div>
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
                    {move || if pending() { "Loading..." } else { "Create Account" }}
                </button>
                <p class="auth-switch">
                    "Already have an account? "
                    <A href="/login">"Login"</A>
                </p>
            </form>
        </div>
    }
}

/// A successful sign-up confirms with a toast and moves on to login
fn finish_sign_up(
    ctx: AppContext,
    form: RwSignal<FormController<SignUpValues>>,
    succeeded: bool,
    navigate: impl FnOnce(&str),
) {
    form.try_update(|f| f.finish_submit(succeeded));
    if succeeded {
        ctx.notify(Toast::success(SIGN_UP.title, "Sign up success, please login.", SIGN_UP_SUCCESS_TOAST_MS));
        navigate("/login");
    }
}
