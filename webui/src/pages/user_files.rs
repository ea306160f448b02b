use chrono::Utc;
use dioxus::prelude::*;
use dioxus_router::prelude::*;
use web_sys::console;

use mycloud_web::error::ActionKind;
use mycloud_web::export::file_export_spec;
use mycloud_web::format::{export_filename, format_bytes, format_bytes_opt, format_date};
use mycloud_web::listing::{FileSortKey, ListController, SortDirection};
use mycloud_web::types::{FileRecord, UserRecord};

use crate::actions;
use crate::components::{alert_view, non_empty_or_dash, sort_header, use_access_guard};
use crate::types::AppContext;
use crate::ui_utils::{show_toast, BlobSaver};
use crate::Route;

/// One user's storage, as seen by an admin.
#[component]
pub fn AdminUserFiles(id: String) -> Element {
    use_access_guard(true);
    let ctx = use_context::<AppContext>();
    let nav = use_navigator();
    let mut user = use_signal(|| None as Option<UserRecord>);
    let mut files = use_signal(Vec::<FileRecord>::new);
    let ctl = use_signal(|| ListController::new(FileSortKey::UploadedAt, SortDirection::Descending));
    let mut alert = use_signal(|| None as Option<String>);

    use_effect(use_reactive((&id,), move |(id,)| {
        if !*ctx.ready.read() || !ctx.session.read().is_admin() {
            return;
        }
        let owner = id.clone();
        spawn(async move {
            match ctx.client().admin_get_user(&owner).await {
                Ok(u) => user.set(Some(u)),
                Err(e) if e.is_auth() => ctx.report(ActionKind::Read, "Could not load the user", &e, alert),
                Err(e) => {
                    console::warn_1(&format!("admin user {}: {}", owner, e).into());
                    show_toast("User not found");
                    nav.replace(Route::Admin {});
                }
            }
        });
        spawn(async move {
            match ctx.client().admin_list_user_files(&id).await {
                Ok(list) => {
                    files.set(list);
                    alert.set(None);
                }
                Err(e) => ctx.report(ActionKind::Read, "Could not load files", &e, alert),
            }
        });
    }));

    let export_id = id.clone();
    let export = move |_| {
        let rows = ctl.read().project(&files.read());
        let name = export_filename(&format!("user_{}_files_", export_id), Utc::now());
        ctl.read().export(&name, &file_export_spec(), &rows, &BlobSaver);
    };

    let rows = ctl.read().project(&files.read());
    let heading = match user.read().as_ref() {
        Some(u) => u.name().to_string(),
        None => format!("id:{}", id),
    };
    let summary = user.read().as_ref().map(|u| {
        format!(
            "Email: {} • Role: {} • Files: {} • Storage: {}",
            non_empty_or_dash(u.email_text()),
            if u.is_staff { "Admin" } else { "User" },
            u.file_count(),
            format_bytes(u.total_size()),
        )
    });

    rsx! {
        div { class: "container", style: "padding-bottom:60px;max-width:1400px;",
            div { class: "panel", style: "display:flex;justify-content:space-between;align-items:center;",
                div {
                    div { style: "margin-bottom:6px;",
                        Link { class: "btn", to: Route::Admin {}, "← Back to users" }
                    }
                    h2 { style: "margin:0;", "Storage of " b { "{heading}" } }
                    if let Some(summary) = summary {
                        div { class: "muted", style: "margin-top:6px;", "{summary}" }
                    }
                }
                div { button { class: "btn", onclick: export, "Export files (CSV)" } }
            }
            div { class: "panel", style: "margin-top:18px;",
                {alert_view(alert)}
                div { class: "table", style: "overflow-x:auto;",
                    table { style: "width:100%;table-layout:fixed;min-width:1150px;",
                        thead {
                            tr {
                                {sort_header(ctl, FileSortKey::Id, "ID")}
                                {sort_header(ctl, FileSortKey::Name, "File name")}
                                {sort_header(ctl, FileSortKey::Size, "Size")}
                                {sort_header(ctl, FileSortKey::UploadedAt, "Date")}
                                {sort_header(ctl, FileSortKey::Description, "Description")}
                                th { "Actions" }
                            }
                        }
                        tbody {
                            for f in rows {
                                {file_row(ctx, files, alert, f)}
                            }
                            if files.read().is_empty() {
                                tr { td { colspan: "6", class: "muted", style: "text-align:center;padding:18px;", "No files" } }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn file_row(ctx: AppContext, files: Signal<Vec<FileRecord>>, alert: Signal<Option<String>>, f: FileRecord) -> Element {
    let id = f.id;
    let name = non_empty_or_dash(f.name());
    let size = format_bytes_opt(f.size);
    let date = format_date(f.timestamp());
    let description = non_empty_or_dash(f.description_text());
    let suggested = f.original_name.clone();
    let ellipsis = "overflow:hidden;text-overflow:ellipsis;white-space:nowrap;";

    rsx! {
        tr { key: "{id}",
            td { "{id}" }
            td { style: ellipsis, "{name}" }
            td { "{size}" }
            td { "{date}" }
            td { style: ellipsis, "{description}" }
            td { style: "min-width:280px;",
                div { style: "display:flex;gap:8px;flex-wrap:nowrap;",
                    button { class: "btn",
                        onclick: move |_| {
                            let path = ctx.client().admin_download_path(id);
                            actions::download(ctx, path, suggested.clone(), alert);
                        },
                        "Download"
                    }
                    button { class: "btn", title: "Edit description",
                        onclick: move |_| actions::prompt_description(ctx, files, &f, alert),
                        "✎"
                    }
                    button { class: "btn danger", onclick: move |_| actions::delete(ctx, files, id, alert), "Delete" }
                }
            }
        }
    }
}
