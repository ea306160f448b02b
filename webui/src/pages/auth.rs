//! Sign-in, registration and the two password-reset pages.

use dioxus::prelude::*;
use dioxus_router::prelude::*;
use web_sys::console;

use mycloud_web::error::ClientError;
use mycloud_web::types::RegisterRequest;

use crate::types::AppContext;
use crate::ui_utils::{query_param, show_toast};
use crate::Route;

#[component]
pub fn Login() -> Element {
    let ctx = use_context::<AppContext>();
    let nav = use_navigator();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut loading = use_signal(|| false);
    let mut error = use_signal(|| None as Option<String>);

    // Already signed in (or just signed in): go to the files
    use_effect(move || {
        if *ctx.ready.read() && ctx.session.read().is_authenticated() {
            nav.replace(Route::Dashboard {});
        }
    });

    let submit = move |e: FormEvent| {
        e.prevent_default();
        let user = username.read().trim().to_string();
        let pass = password.read().clone();
        if user.is_empty() || pass.is_empty() {
            error.set(Some("Enter your username and password".to_string()));
            return;
        }
        loading.set(true);
        error.set(None);
        spawn(async move {
            match ctx.client().obtain_token(&user, &pass).await {
                Ok(pair) => {
                    if let Err(e) = ctx.sign_in(&pair.access).await {
                        console::warn_1(&format!("profile after login: {}", e).into());
                    }
                }
                Err(e) => {
                    console::warn_1(&format!("login failed: {}", e).into());
                    error.set(Some("Invalid credentials".to_string()));
                }
            }
            loading.set(false);
        });
    };

    rsx! {
        section { class: "card", style: "max-width:460px;",
            div { class: "card-header", "Log in" }
            div { class: "card-body",
                form { onsubmit: submit,
                    div { class: "field",
                        label { "Username" }
                        input { class: "input", placeholder: "user", value: "{username}",
                            oninput: move |e: Event<FormData>| username.set(e.value()) }
                    }
                    div { class: "field mt-3",
                        label { "Password" }
                        input { class: "input", r#type: "password", value: "{password}",
                            oninput: move |e: Event<FormData>| password.set(e.value()) }
                    }
                    div { class: "mt-4", style: "display:flex;gap:12px;align-items:center;",
                        button { class: "btn", r#type: "submit", disabled: *loading.read(),
                            if *loading.read() { span { class: "spinner" } } else { "Log in" }
                        }
                        span { class: "muted",
                            "No account? "
                            Link { to: Route::Register {}, "Register" }
                            " · "
                            Link { to: Route::PasswordReset {}, "Forgot password?" }
                        }
                    }
                    { error.read().as_ref().map(|e| rsx!(div { class: "alert alert-error", style: "margin-top:16px;", "{e}" })) }
                }
            }
        }
    }
}

#[component]
pub fn Register() -> Element {
    let ctx = use_context::<AppContext>();
    let nav = use_navigator();
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut loading = use_signal(|| false);
    let mut message = use_signal(|| None as Option<String>);

    let submit = move |e: FormEvent| {
        e.prevent_default();
        let req = RegisterRequest {
            username: username.read().trim().to_string(),
            email: email.read().trim().to_string(),
            password: password.read().clone(),
        };
        loading.set(true);
        message.set(None);
        spawn(async move {
            match ctx.client().register(&req).await {
                Ok(()) => {
                    show_toast("Registration complete, please log in");
                    nav.push(Route::Login {});
                }
                Err(ClientError::Http { detail, .. }) => message.set(Some(detail)),
                Err(e) => {
                    console::warn_1(&format!("register failed: {}", e).into());
                    message.set(Some("Registration failed".to_string()));
                }
            }
            loading.set(false);
        });
    };

    rsx! {
        section { class: "card", style: "max-width:520px;",
            div { class: "card-header", "Register" }
            div { class: "card-body",
                form { onsubmit: submit,
                    div { class: "grid cols-2",
                        div { class: "field",
                            label { "Username" }
                            input { class: "input", placeholder: "user", value: "{username}",
                                oninput: move |e: Event<FormData>| username.set(e.value()) }
                        }
                        div { class: "field",
                            label { "Email" }
                            input { class: "input", placeholder: "you@example.com", value: "{email}",
                                oninput: move |e: Event<FormData>| email.set(e.value()) }
                        }
                    }
                    div { class: "field mt-3",
                        label { "Password" }
                        input { class: "input", r#type: "password", placeholder: "at least 8 characters", value: "{password}",
                            oninput: move |e: Event<FormData>| password.set(e.value()) }
                    }
                    div { class: "mt-4", style: "display:flex;gap:12px;align-items:center;",
                        button { class: "btn", r#type: "submit", disabled: *loading.read(),
                            if *loading.read() { span { class: "spinner" } } else { "Create account" }
                        }
                        span { class: "muted", "Already registered? ", Link { to: Route::Login {}, "Log in" } }
                    }
                    { message.read().as_ref().map(|m| rsx!(div { class: "alert alert-error", style: "margin-top:16px;", "{m}" })) }
                }
            }
        }
    }
}

/// Request a reset mail. The answer never reveals whether the address exists.
#[component]
pub fn PasswordReset() -> Element {
    let ctx = use_context::<AppContext>();
    let mut email = use_signal(String::new);
    let mut message = use_signal(|| None as Option<String>);

    let submit = move |e: FormEvent| {
        e.prevent_default();
        let address = email.read().trim().to_string();
        spawn(async move {
            match ctx.client().request_password_reset(&address).await {
                Ok(()) => message.set(Some("If the address is registered, a mail is on its way".to_string())),
                Err(e) => {
                    console::warn_1(&format!("reset request failed: {}", e).into());
                    message.set(Some("Request failed, try again later".to_string()));
                }
            }
        });
    };

    rsx! {
        div { class: "card", style: "max-width:520px;margin:40px auto;",
            div { class: "card-header", "Reset password" }
            div { class: "card-body",
                form { class: "grid", onsubmit: submit,
                    input { class: "input", r#type: "email", required: true, placeholder: "Email", value: "{email}",
                        oninput: move |e: Event<FormData>| email.set(e.value()) }
                    button { class: "btn", r#type: "submit", "Send link" }
                }
                { message.read().as_ref().map(|m| rsx!(div { style: "margin-top:12px;", "{m}" })) }
            }
        }
    }
}

/// Target of the reset mail: `?uid=..&token=..` prefill the form.
#[component]
pub fn PasswordResetConfirm() -> Element {
    let ctx = use_context::<AppContext>();
    let mut uid = use_signal(|| query_param("uid").unwrap_or_default());
    let mut token = use_signal(|| query_param("token").unwrap_or_default());
    let mut new_password = use_signal(String::new);
    let mut message = use_signal(|| None as Option<String>);

    let submit = move |e: FormEvent| {
        e.prevent_default();
        let (u, t, p) = (uid.read().clone(), token.read().clone(), new_password.read().clone());
        spawn(async move {
            match ctx.client().confirm_password_reset(&u, &t, &p).await {
                Ok(()) => message.set(Some("Password updated. You can log in now.".to_string())),
                Err(e) => {
                    console::warn_1(&format!("reset confirm failed: {}", e).into());
                    message.set(Some("Invalid or expired link".to_string()));
                }
            }
        });
    };

    rsx! {
        div { class: "card", style: "max-width:520px;margin:40px auto;",
            div { class: "card-header", "New password" }
            div { class: "card-body",
                form { class: "grid", onsubmit: submit,
                    input { class: "input", placeholder: "UID", value: "{uid}",
                        oninput: move |e: Event<FormData>| uid.set(e.value()) }
                    input { class: "input", placeholder: "Token", value: "{token}",
                        oninput: move |e: Event<FormData>| token.set(e.value()) }
                    input { class: "input", r#type: "password", placeholder: "New password", value: "{new_password}",
                        oninput: move |e: Event<FormData>| new_password.set(e.value()) }
                    button { class: "btn", r#type: "submit", "Change password" }
                }
                { message.read().as_ref().map(|m| rsx!(
                    div { style: "margin-top:12px;", "{m} " Link { to: Route::Login {}, "Log in" } }
                )) }
            }
        }
    }
}
