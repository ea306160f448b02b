use dioxus::prelude::*;
use dioxus_router::prelude::*;

use mycloud_web::format::EMPTY;
use mycloud_web::listing::{ListController, SortKey};

use crate::types::AppContext;
use crate::Route;

/// Once bootstrap is done, visitors without a session go to the login page
/// and, for `admin_only` pages, non-admins go to their dashboard.
pub fn use_access_guard(admin_only: bool) {
    let ctx = use_context::<AppContext>();
    let nav = use_navigator();
    use_effect(move || {
        if !*ctx.ready.read() {
            return;
        }
        let session = ctx.session.read();
        if !session.is_authenticated() {
            nav.replace(Route::Login {});
        } else if admin_only && !session.is_admin() {
            nav.replace(Route::Dashboard {});
        }
    });
}

/// Clickable column header bound to a page's list controller.
pub fn sort_header<K: SortKey>(mut ctl: Signal<ListController<K>>, key: K, label: &str) -> Element {
    let cell = ctl.read().header(key, label);
    let text = cell.text();
    let class = if cell.active { "sortable active" } else { "sortable" };
    rsx! {
        th { class: "{class}", style: "cursor:pointer;white-space:nowrap;",
            onclick: move |_| ctl.write().set_sort_key(key),
            "{text}"
        }
    }
}

#[component]
pub fn Modal(title: String, on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div { class: "modal-backdrop",
            style: "position:fixed;inset:0;background:rgba(0,0,0,.4);display:flex;align-items:center;justify-content:center;z-index:1000;",
            div { class: "panel", style: "width:min(720px,92vw);padding:16px;border-radius:10px;box-shadow:0 10px 30px rgba(0,0,0,.35);",
                div { style: "display:flex;justify-content:space-between;align-items:center;gap:12px;",
                    h3 { style: "margin:6px 0 14px;", "{title}" }
                    button { class: "btn", onclick: move |_| on_close.call(()), "Close" }
                }
                {children}
            }
        }
    }
}

/// Alert slot shown above a table when loading failed.
pub fn alert_view(alert: Signal<Option<String>>) -> Element {
    rsx! {
        { alert.read().as_ref().map(|e| rsx!(div { class: "alert alert-error", "{e}" })) }
    }
}

/// Table cell text; empty values show the placeholder dash.
pub fn non_empty_or_dash(s: &str) -> String {
    if s.is_empty() { EMPTY.to_string() } else { s.to_string() }
}
