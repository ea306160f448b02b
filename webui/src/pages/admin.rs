use chrono::Utc;
use dioxus::prelude::*;
use dioxus_router::prelude::*;

use mycloud_web::clipboard::ClipboardWriter;
use mycloud_web::confirm::confirm;
use mycloud_web::error::ActionKind;
use mycloud_web::export::{admin_file_export_spec, user_export_spec};
use mycloud_web::format::{export_filename, format_bytes, format_bytes_opt, format_date, EMPTY};
use mycloud_web::listing::{FileSortKey, ListController, SortDirection, UserSortKey};
use mycloud_web::types::{FileRecord, UserRecord};

use crate::actions;
use crate::components::{alert_view, non_empty_or_dash, sort_header, use_access_guard};
use crate::types::AppContext;
use crate::ui_utils::{prompt_text, show_toast, BlobSaver, DomClipboard, DomConfirmer};
use crate::Route;

fn load_users(ctx: AppContext, mut users: Signal<Vec<UserRecord>>, mut alert: Signal<Option<String>>) {
    spawn(async move {
        match ctx.client().admin_list_users().await {
            Ok(list) => {
                users.set(list);
                alert.set(None);
            }
            Err(e) => ctx.report(ActionKind::Read, "Could not load users", &e, alert),
        }
    });
}

fn load_files(
    ctx: AppContext,
    owner: Option<String>,
    mut files: Signal<Vec<FileRecord>>,
    mut alert: Signal<Option<String>>,
) {
    spawn(async move {
        match ctx.client().admin_list_files(owner.as_deref()).await {
            Ok(list) => {
                files.set(list);
                alert.set(None);
            }
            Err(e) => ctx.report(ActionKind::Read, "Could not load files", &e, alert),
        }
    });
}

/// Handles shared by the row renderers.
#[derive(Clone, Copy)]
struct AdminState {
    ctx: AppContext,
    users: Signal<Vec<UserRecord>>,
    files: Signal<Vec<FileRecord>>,
    owner_filter: Signal<Option<String>>,
    busy_user: Signal<Option<i64>>,
    users_alert: Signal<Option<String>>,
    files_alert: Signal<Option<String>>,
}

impl AdminState {
    fn reload_users(self) {
        load_users(self.ctx, self.users, self.users_alert);
    }

    fn reload_files(self) {
        load_files(self.ctx, self.owner_filter.peek().clone(), self.files, self.files_alert);
    }

    fn set_filter(mut self, owner: Option<String>) {
        self.owner_filter.set(owner);
        self.reload_files();
    }
}

#[component]
pub fn Admin() -> Element {
    use_access_guard(true);
    let ctx = use_context::<AppContext>();
    let state = AdminState {
        ctx,
        users: use_signal(Vec::<UserRecord>::new),
        files: use_signal(Vec::<FileRecord>::new),
        owner_filter: use_signal(|| None as Option<String>),
        busy_user: use_signal(|| None as Option<i64>),
        users_alert: use_signal(|| None as Option<String>),
        files_alert: use_signal(|| None as Option<String>),
    };
    let user_ctl = use_signal(|| ListController::new(UserSortKey::Id, SortDirection::Descending));
    let file_ctl = use_signal(|| ListController::new(FileSortKey::UploadedAt, SortDirection::Descending));
    let mut filter_input = use_signal(String::new);

    use_effect(move || {
        let session = ctx.session.read();
        if *ctx.ready.read() && session.is_admin() {
            state.reload_users();
            state.reload_files();
        }
    });

    let export_users = move |_| {
        let rows = user_ctl.read().project(&state.users.read());
        let name = export_filename("users_", Utc::now());
        user_ctl.read().export(&name, &user_export_spec(), &rows, &BlobSaver);
    };

    let export_files = move |_| {
        let rows = file_ctl.read().project(&state.files.read());
        let prefix = match state.owner_filter.read().as_deref() {
            Some(owner) => format!("files_user_{}_", owner),
            None => "files_".to_string(),
        };
        let name = export_filename(&prefix, Utc::now());
        file_ctl.read().export(&name, &admin_file_export_spec(), &rows, &BlobSaver);
    };

    let apply_filter = move |e: FormEvent| {
        e.prevent_default();
        let owner = filter_input.read().trim().to_string();
        state.set_filter(if owner.is_empty() { None } else { Some(owner) });
    };

    let users = user_ctl.read().project(&state.users.read());
    let files = file_ctl.read().project(&state.files.read());
    let filter = state.owner_filter.read().clone();

    rsx! {
        div { class: "container", style: "padding-bottom:60px;max-width:1400px;",
            div { class: "panel",
                div { style: "display:flex;align-items:center;justify-content:space-between;",
                    h3 { style: "margin-top:0;", "Users" }
                    button { class: "btn", onclick: export_users, "Export users (CSV)" }
                }
                {alert_view(state.users_alert)}
                div { class: "table", style: "overflow-x:auto;",
                    table { style: "width:100%;table-layout:fixed;min-width:1300px;",
                        thead {
                            tr {
                                {sort_header(user_ctl, UserSortKey::Id, "ID")}
                                {sort_header(user_ctl, UserSortKey::Username, "Username")}
                                {sort_header(user_ctl, UserSortKey::Email, "Email")}
                                {sort_header(user_ctl, UserSortKey::Role, "Role")}
                                {sort_header(user_ctl, UserSortKey::Active, "Active")}
                                {sort_header(user_ctl, UserSortKey::FilesCount, "Files")}
                                {sort_header(user_ctl, UserSortKey::TotalSize, "Storage")}
                                {sort_header(user_ctl, UserSortKey::DateJoined, "Joined")}
                                th { "Actions" }
                            }
                        }
                        tbody {
                            for u in users {
                                {user_row(state, u)}
                            }
                            if state.users.read().is_empty() {
                                tr { td { colspan: "9", class: "muted", style: "text-align:center;padding:18px;", "No data" } }
                            }
                        }
                    }
                }
            }

            div { class: "panel", style: "margin-top:18px;",
                div { style: "display:flex;align-items:center;justify-content:space-between;gap:12px;",
                    h3 { style: "margin-top:0;", "User files" }
                    div { style: "display:flex;align-items:center;gap:8px;",
                        button { class: "btn", onclick: export_files, "Export files (CSV)" }
                        form { style: "display:flex;gap:8px;", onsubmit: apply_filter,
                            input { class: "input", placeholder: "Owner id", value: "{filter_input}",
                                oninput: move |e: Event<FormData>| filter_input.set(e.value()) }
                            button { class: "btn", r#type: "submit", "Filter" }
                        }
                        match filter {
                            Some(owner) => rsx! {
                                div { class: "muted", "Filtered by user id: {owner}" }
                                button { class: "btn",
                                    onclick: move |_| {
                                        filter_input.set(String::new());
                                        state.set_filter(None);
                                    },
                                    "Clear filter"
                                }
                            },
                            None => rsx! { div { class: "muted", "Showing files of all users" } },
                        }
                    }
                }
                {alert_view(state.files_alert)}
                div { class: "table", style: "overflow-x:auto;",
                    table { style: "width:100%;table-layout:fixed;min-width:1400px;",
                        thead {
                            tr {
                                {sort_header(file_ctl, FileSortKey::Id, "ID")}
                                {sort_header(file_ctl, FileSortKey::Name, "File name")}
                                {sort_header(file_ctl, FileSortKey::Size, "Size")}
                                {sort_header(file_ctl, FileSortKey::UploadedAt, "Date")}
                                {sort_header(file_ctl, FileSortKey::Owner, "Owner")}
                                {sort_header(file_ctl, FileSortKey::Description, "Description")}
                                th { "Actions" }
                            }
                        }
                        tbody {
                            for f in files {
                                {file_row(state, f)}
                            }
                            if state.files.read().is_empty() {
                                tr { td { colspan: "7", class: "muted", style: "text-align:center;padding:18px;", "No files" } }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn send_reset_link(state: AdminState, user: &UserRecord) {
    let email = if user.email_text().is_empty() { "(no email)" } else { user.email_text() };
    let Some(confirmed) = confirm(&DomConfirmer, &format!("Send a password reset link to {}?", email)) else {
        return;
    };
    let (ctx, id, mut busy) = (state.ctx, user.id, state.busy_user);
    busy.set(Some(id));
    spawn(async move {
        match ctx.client().admin_send_reset_link(id, confirmed).await {
            Ok(()) => show_toast("Reset link sent (if mail is configured)"),
            Err(e) => ctx.report(ActionKind::Mutation, "Could not send the link", &e, state.users_alert),
        }
        busy.set(None);
    });
}

fn toggle_admin(state: AdminState, user: UserRecord) {
    let verb = if user.is_staff { "Revoke" } else { "Grant" };
    let question = format!("{} admin rights for {}?", verb, user.name());
    let Some(confirmed) = confirm(&DomConfirmer, &question) else {
        return;
    };
    let ctx = state.ctx;
    spawn(async move {
        match ctx.client().admin_set_staff(&user, !user.is_staff, confirmed).await {
            Ok(()) => {
                show_toast("Role updated");
                state.reload_users();
            }
            Err(e) => ctx.report(ActionKind::Mutation, "Could not change the role", &e, state.users_alert),
        }
    });
}

fn issue_temp_password(state: AdminState, user: &UserRecord) {
    let question = format!("Set a temporary password for {}? The current one stops working.", user.name());
    let Some(confirmed) = confirm(&DomConfirmer, &question) else {
        return;
    };
    let (ctx, id) = (state.ctx, user.id);
    spawn(async move {
        let issued = match ctx.client().admin_issue_temp_password(id, confirmed).await {
            Ok(issued) => issued,
            Err(e) => {
                ctx.report(ActionKind::Mutation, "Could not set a temporary password", &e, state.users_alert);
                return;
            }
        };
        let Some(password) = issued.temp_password.filter(|p| !p.is_empty()) else {
            show_toast("The backend returned no password");
            return;
        };
        if ClipboardWriter::new(DomClipboard).copy(&password).await {
            show_toast("Temporary password copied to clipboard");
        } else {
            let _ = prompt_text("Temporary password:", &password);
        }
    });
}

fn deactivate_user(state: AdminState, user: &UserRecord) {
    let Some(confirmed) = confirm(&DomConfirmer, &format!("Deactivate {}?", user.name())) else {
        return;
    };
    let (ctx, id) = (state.ctx, user.id);
    spawn(async move {
        match ctx.client().admin_deactivate_user(id, confirmed).await {
            Ok(()) => {
                show_toast("User deactivated");
                state.reload_users();
            }
            Err(e) => ctx.report(ActionKind::Mutation, "Could not deactivate", &e, state.users_alert),
        }
    });
}

fn delete_user(state: AdminState, user: &UserRecord) {
    let question = format!("Delete user {}? This cannot be undone.", user.name());
    let Some(confirmed) = confirm(&DomConfirmer, &question) else {
        return;
    };
    let (ctx, id) = (state.ctx, user.id);
    spawn(async move {
        match ctx.client().admin_delete_user(id, confirmed).await {
            Ok(()) => {
                show_toast("User deleted");
                state.reload_users();
                if state.owner_filter.peek().as_deref() == Some(id.to_string().as_str()) {
                    state.set_filter(None);
                } else {
                    state.reload_files();
                }
            }
            Err(e) => ctx.report(ActionKind::Mutation, "Could not delete the user", &e, state.users_alert),
        }
    });
}

fn user_row(state: AdminState, u: UserRecord) -> Element {
    let id = u.id;
    let is_active = u.is_active;
    let role = if u.is_staff { "Admin" } else { "User" };
    let active = if u.is_active { "Yes" } else { "No" };
    let staff_label = if u.is_staff { "Revoke admin" } else { "Make admin" };
    let busy = *state.busy_user.read() == Some(id);
    let name = u.name().to_string();
    let email = u.email_text().to_string();
    let count = u.file_count();
    let total = format_bytes(u.total_size());
    let joined = format_date(u.date_joined.as_deref());
    let ellipsis = "overflow:hidden;text-overflow:ellipsis;white-space:nowrap;";
    let (u1, u2, u3, u4) = (u.clone(), u.clone(), u.clone(), u.clone());

    rsx! {
        tr { key: "{id}",
            td { "{id}" }
            td { style: ellipsis, "{name}" }
            td { style: ellipsis, "{email}" }
            td { "{role}" }
            td { "{active}" }
            td { "{count}" }
            td { "{total}" }
            td { "{joined}" }
            td { style: "min-width:320px;",
                div { style: "display:flex;gap:8px;flex-wrap:wrap;",
                    Link { class: "btn", to: Route::AdminUserFiles { id: id.to_string() }, "Files" }
                    button { class: "btn", onclick: move |_| state.set_filter(Some(id.to_string())), "Filter" }
                    button { class: "btn", disabled: busy, onclick: move |_| send_reset_link(state, &u1),
                        if busy { "Sending…" } else { "Reset link" }
                    }
                    button { class: "btn", onclick: move |_| toggle_admin(state, u2.clone()), "{staff_label}" }
                    button { class: "btn", onclick: move |_| issue_temp_password(state, &u3), "Temp password" }
                    if is_active {
                        button { class: "btn", onclick: move |_| deactivate_user(state, &u4), "Deactivate" }
                    }
                    button { class: "btn danger", onclick: move |_| delete_user(state, &u), "Delete" }
                }
            }
        }
    }
}

fn file_row(state: AdminState, f: FileRecord) -> Element {
    let AdminState { ctx, files, files_alert: alert, .. } = state;
    let id = f.id;
    let name = non_empty_or_dash(f.name());
    let size = format_bytes_opt(f.size);
    let date = format_date(f.timestamp());
    let owner = match (f.owner_username(), f.owner_id()) {
        ("", None) => EMPTY.to_string(),
        (name, Some(owner_id)) => format!("{} (id:{})", name, owner_id),
        (name, None) => name.to_string(),
    };
    let description = non_empty_or_dash(f.description_text());
    let suggested = f.original_name.clone();
    let ellipsis = "overflow:hidden;text-overflow:ellipsis;white-space:nowrap;";

    rsx! {
        tr { key: "{id}",
            td { "{id}" }
            td { style: ellipsis, "{name}" }
            td { "{size}" }
            td { "{date}" }
            td { style: ellipsis, "{owner}" }
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
