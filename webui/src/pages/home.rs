use dioxus::prelude::*;
use dioxus_router::prelude::*;

use crate::types::AppContext;
use crate::Route;

#[component]
pub fn Home() -> Element {
    let ctx = use_context::<AppContext>();
    let admin_email = ctx.config.read().admin_email.clone();

    rsx! {
        div { class: "grid cols-2",
            section { class: "card",
                div { class: "card-header", "About" }
                div { class: "card-body",
                    p { "MyCloud is a lightweight cloud storage: upload, download and share files through public links." }
                    p { class: "mt-3",
                        "Start by "
                        Link { to: Route::Register {}, "registering" }
                        ", then sign in and upload your first file."
                    }
                    p { class: "muted mt-3",
                        "Questions? Contact the administrator at "
                        a { href: "mailto:{admin_email}", "{admin_email}" }
                    }
                }
            }
            section { class: "card",
                div { class: "card-header", "Quick start" }
                div { class: "card-body",
                    div { class: "grid",
                        div {
                            div { class: "kbd", "1" }
                            div { class: "mt-2", "Create an account: ", Link { to: Route::Register {}, "Register" } }
                        }
                        div {
                            div { class: "kbd", "2" }
                            div { class: "mt-2", "Sign in: ", Link { to: Route::Login {}, "Log in" } }
                        }
                        div {
                            div { class: "kbd", "3" }
                            div { class: "mt-2", "Upload a file: ", Link { to: Route::Dashboard {}, "My files" } }
                        }
                    }
                }
            }
        }
    }
}
