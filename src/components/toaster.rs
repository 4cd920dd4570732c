//! Toaster Component
//!
//! Renders the toast queue from `AppContext`; click a toast to dismiss it.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::toast::ToastVariant;

#[component]
pub fn Toaster() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="toaster">
            <For
                each=move || ctx.toasts.get().visible().to_vec()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let class = match toast.variant {
                        ToastVariant::Default => "toast",
                        ToastVariant::Destructive => "toast destructive",
                    };
                    view! {
                        <div class=class role="status" on:click=move |_| ctx.dismiss(id)>
                            <div class="toast-title">{toast.title}</div>
                            <div class="toast-description">{toast.description}</div>
                        </div>
                    }
                }
            />
        </div>
    }
}
