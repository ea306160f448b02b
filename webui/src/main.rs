use dioxus::prelude::*;
use dioxus_router::prelude::*;

mod actions;
mod api;
mod components;
mod pages;
mod types;
mod ui_utils;

use pages::{Admin, AdminUserFiles, Dashboard, Home, Login, PasswordReset, PasswordResetConfirm, Register};
use types::AppContext;

// ----- Routing -----
#[derive(Routable, Clone, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(AppShell)]
        #[route("/")]
        Home {},
        #[route("/login")]
        Login {},
        #[route("/register")]
        Register {},
        #[route("/dashboard")]
        Dashboard {},
        #[route("/admin")]
        Admin {},
        #[route("/admin/users/:id")]
        AdminUserFiles { id: String },
        #[route("/password-reset")]
        PasswordReset {},
        #[route("/password-reset/confirm")]
        PasswordResetConfirm {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

pub fn main() {
    console_error_panic_hook::set_once();
    dioxus_web::launch::launch(app, vec![], Default::default());
}

fn app() -> Element {
    let ctx = use_context_provider(AppContext::new);
    use_effect(move || {
        spawn(ctx.bootstrap());
    });

    rsx! {
        Router::<Route> {}
    }
}

#[component]
fn AppShell() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let (signed_in, admin, username) = {
        let session = ctx.session.read();
        let username = session.profile().map(|p| p.name().to_string()).unwrap_or_default();
        (session.is_authenticated(), session.is_admin(), username)
    };

    rsx! {
        div {
            div { class: "app-header",
                div { class: "container",
                    div { class: "brand",
                        Link { to: Route::Home {}, span { "MyCloud" } }
                    }
                    nav {
                        if signed_in {
                            Link { to: Route::Dashboard {}, "My files" }
                            if admin {
                                Link { to: Route::Admin {}, "Admin" }
                            }
                            span { class: "muted", style: "margin-left:12px;", "{username}" }
                            button { class: "btn", style: "margin-left:8px;",
                                onclick: move |_| {
                                    ctx.sign_out();
                                    navigator.push(Route::Login {});
                                },
                                "Log out"
                            }
                        } else {
                            Link { to: Route::Login {}, "Log in" }
                            Link { to: Route::Register {}, "Register" }
                        }
                    }
                }
            }
            div { class: "container",
                Outlet::<Route> {}
            }
            div { id: "toasts", class: "toast-container" }
        }
    }
}

/// Unknown paths land on the home page.
#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let nav = use_navigator();
    use_effect(move || {
        nav.replace(Route::Home {});
    });
    rsx! {}
}
