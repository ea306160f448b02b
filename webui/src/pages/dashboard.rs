use chrono::Utc;
use dioxus::prelude::*;
use web_sys::console;

use mycloud_web::api::UploadForm;
use mycloud_web::error::ActionKind;
use mycloud_web::export::file_export_spec;
use mycloud_web::format::{export_filename, format_bytes_opt, format_date};
use mycloud_web::listing::{FileSortKey, ListController, SortDirection};
use mycloud_web::types::FileRecord;

use crate::actions;
use crate::components::{alert_view, non_empty_or_dash, sort_header, use_access_guard, Modal};
use crate::types::AppContext;
use crate::ui_utils::{clear_file_input, file_bytes, selected_file, show_toast, BlobSaver};

const UPLOAD_INPUT: &str = "upload-file";

fn load_files(ctx: AppContext, mut files: Signal<Vec<FileRecord>>, mut alert: Signal<Option<String>>) {
    spawn(async move {
        match ctx.client().list_files().await {
            Ok(list) => {
                files.set(list);
                alert.set(None);
            }
            Err(e) => ctx.report(ActionKind::Read, "Could not load files", &e, alert),
        }
    });
}

/// Description edit in progress: file id and the current text.
#[derive(Debug, Clone, PartialEq)]
struct EditState {
    file_id: i64,
    text: String,
}

#[component]
pub fn Dashboard() -> Element {
    use_access_guard(false);
    let ctx = use_context::<AppContext>();
    let files = use_signal(Vec::<FileRecord>::new);
    let ctl = use_signal(|| ListController::new(FileSortKey::UploadedAt, SortDirection::Descending));
    let alert = use_signal(|| None as Option<String>);
    let mut description = use_signal(String::new);
    let mut uploading = use_signal(|| false);
    let mut editing = use_signal(|| None as Option<EditState>);
    let mut reset_open = use_signal(|| false);
    let mut reset_email = use_signal(String::new);
    let mut reset_loading = use_signal(|| false);

    use_effect(move || {
        if *ctx.ready.read() && ctx.session.read().is_authenticated() {
            load_files(ctx, files, alert);
        }
    });

    let upload = move |e: FormEvent| {
        e.prevent_default();
        let Some(file) = selected_file(UPLOAD_INPUT) else {
            show_toast("Choose a file first");
            return;
        };
        let desc = description.read().trim().to_string();
        uploading.set(true);
        spawn(async move {
            let bytes = match file_bytes(&file).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    console::error_1(&format!("reading {} failed: {}", file.name(), e).into());
                    show_toast("Could not read the file");
                    uploading.set(false);
                    return;
                }
            };
            let form = UploadForm { file_name: file.name(), bytes, description: Some(desc) };
            match ctx.client().upload_file(form).await {
                Ok(_) => {
                    clear_file_input(UPLOAD_INPUT);
                    description.set(String::new());
                    show_toast("File uploaded");
                    load_files(ctx, files, alert);
                }
                Err(e) => ctx.report(ActionKind::Mutation, "Upload failed", &e, alert),
            }
            uploading.set(false);
        });
    };

    let export = move |_| {
        let rows = ctl.read().project(&files.read());
        let name = export_filename("my_files_", Utc::now());
        ctl.read().export(&name, &file_export_spec(), &rows, &BlobSaver);
    };

    let open_reset = move |_| {
        let email = ctx.session.read().profile().map(|p| p.email_text().to_string()).unwrap_or_default();
        reset_email.set(email);
        reset_open.set(true);
    };

    let submit_reset = move |e: FormEvent| {
        e.prevent_default();
        let email = reset_email.read().trim().to_string();
        if email.is_empty() {
            show_toast("Enter an email address");
            return;
        }
        reset_loading.set(true);
        spawn(async move {
            match ctx.client().request_password_reset(&email).await {
                Ok(()) => {
                    show_toast("If the address is registered, a mail is on its way");
                    reset_open.set(false);
                }
                Err(e) => ctx.report(ActionKind::Mutation, "Could not send the mail", &e, alert),
            }
            reset_loading.set(false);
        });
    };

    let save_edit = move |_| {
        let edit = editing.write().take();
        if let Some(edit) = edit {
            actions::save_description(ctx, files, edit.file_id, edit.text, alert);
        }
    };

    let (username, email) = {
        let session = ctx.session.read();
        let profile = session.profile();
        (
            profile.map(|p| p.name().to_string()).unwrap_or_default(),
            profile.map(|p| p.email_text().to_string()).unwrap_or_default(),
        )
    };
    let rows = ctl.read().project(&files.read());
    let edit_text = editing.read().as_ref().map(|e| e.text.clone());

    rsx! {
        div { class: "container", style: "padding-bottom:60px;max-width:1400px;",
            div { class: "panel", style: "display:flex;justify-content:space-between;",
                div {
                    h1 { style: "margin:0;", "My files" }
                    div { style: "margin-top:10px;",
                        "User: " b { "{username}" }
                        if !email.is_empty() { " ({email})" }
                    }
                }
                div { button { class: "btn", onclick: open_reset, "Reset password" } }
            }

            div { class: "panel", style: "margin-top:18px;",
                h3 { style: "margin-top:0;", "Upload a file" }
                form { class: "grid", style: "gap:12px;", onsubmit: upload,
                    div { class: "field", input { id: UPLOAD_INPUT, r#type: "file" } }
                    div { class: "field", style: "flex:1;",
                        input { class: "input", placeholder: "Description (optional)", value: "{description}",
                            oninput: move |e: Event<FormData>| description.set(e.value()) }
                    }
                    div {
                        button { class: "btn", r#type: "submit", disabled: *uploading.read(),
                            if *uploading.read() { span { class: "spinner" } } else { "Upload" }
                        }
                    }
                }
            }

            div { class: "panel", style: "margin-top:18px;",
                div { style: "display:flex;align-items:center;justify-content:space-between;gap:12px;",
                    h3 { style: "margin-top:0;", "Stored files" }
                    button { class: "btn", onclick: export, "Export my files (CSV)" }
                }
                {alert_view(alert)}
                div { class: "table", style: "overflow-x:auto;",
                    table { style: "width:100%;table-layout:fixed;min-width:1150px;",
                        thead {
                            tr {
                                {sort_header(ctl, FileSortKey::Name, "Name")}
                                {sort_header(ctl, FileSortKey::Size, "Size")}
                                {sort_header(ctl, FileSortKey::UploadedAt, "Date")}
                                {sort_header(ctl, FileSortKey::Description, "Description")}
                                th { style: "white-space:nowrap;", "Actions" }
                            }
                        }
                        tbody {
                            for f in rows {
                                {file_row(ctx, files, editing, alert, f)}
                            }
                            if files.read().is_empty() {
                                tr { td { colspan: "5", style: "text-align:center;padding:18px;", class: "muted", "No files yet" } }
                            }
                        }
                    }
                }
            }

            if let Some(text) = edit_text {
                Modal { title: "Edit file".to_string(), on_close: move |_| editing.set(None),
                    div { class: "field",
                        label { class: "label", "Description" }
                        textarea { class: "input", value: "{text}", placeholder: "File description",
                            style: "width:100%;resize:vertical;min-height:120px;padding:10px 12px;",
                            oninput: move |e: Event<FormData>| {
                                if let Some(edit) = editing.write().as_mut() {
                                    edit.text = e.value();
                                }
                            }
                        }
                    }
                    div { style: "display:flex;gap:8px;justify-content:flex-end;",
                        button { class: "btn", onclick: save_edit, "Save" }
                        button { class: "btn", onclick: move |_| editing.set(None), "Cancel" }
                    }
                }
            }

            if *reset_open.read() {
                Modal { title: "Reset password".to_string(),
                    on_close: move |_| if !*reset_loading.read() { reset_open.set(false) },
                    form { class: "grid", style: "gap:12px;", onsubmit: submit_reset,
                        div { class: "field",
                            label { class: "label", "Email for the reset link" }
                            input { class: "input", r#type: "email", placeholder: "you@example.com", value: "{reset_email}",
                                oninput: move |e: Event<FormData>| reset_email.set(e.value()) }
                            div { class: "muted", style: "font-size:12px;margin-top:6px;",
                                "A mail with a link to change the password is sent to this address."
                            }
                        }
                        div { style: "display:flex;gap:8px;justify-content:flex-end;",
                            button { class: "btn", r#type: "submit", disabled: *reset_loading.read(),
                                if *reset_loading.read() { span { class: "spinner" } } else { "Send mail" }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn file_row(
    ctx: AppContext,
    files: Signal<Vec<FileRecord>>,
    mut editing: Signal<Option<EditState>>,
    alert: Signal<Option<String>>,
    f: FileRecord,
) -> Element {
    let id = f.id;
    let name = f.name().to_string();
    let description = non_empty_or_dash(f.description_text());
    let size = format_bytes_opt(f.size);
    let date = format_date(f.timestamp());
    let suggested = f.original_name.clone();
    let current = f.description_text().to_string();
    let ellipsis = "overflow:hidden;text-overflow:ellipsis;white-space:nowrap;";

    rsx! {
        tr { key: "{id}",
            td { style: ellipsis, title: "{name}", "{name}" }
            td { "{size}" }
            td { "{date}" }
            td { style: ellipsis, "{description}" }
            td { style: "min-width:260px;",
                div { style: "display:flex;gap:8px;flex-wrap:nowrap;",
                    button { class: "btn",
                        onclick: move |_| {
                            let path = ctx.client().file_download_path(id);
                            actions::download(ctx, path, suggested.clone(), alert);
                        },
                        "Download"
                    }
                    button { class: "btn", onclick: move |_| actions::share(ctx, id, alert), "Link" }
                    button { class: "btn", title: "Edit description",
                        onclick: move |_| editing.set(Some(EditState { file_id: id, text: current.clone() })),
                        "✎"
                    }
                    button { class: "btn danger", onclick: move |_| actions::delete(ctx, files, id, alert), "Delete" }
                }
            }
        }
    }
}
