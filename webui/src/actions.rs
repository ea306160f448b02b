//! Row actions shared by the dashboard and the admin file tables.

use dioxus::prelude::*;

use mycloud_web::clipboard::ClipboardWriter;
use mycloud_web::confirm::confirm;
use mycloud_web::error::ActionKind;
use mycloud_web::transfer::TransferHelper;
use mycloud_web::types::{FileRecord, Identified};

use crate::types::AppContext;
use crate::ui_utils::{page_origin, prompt_text, show_toast, BlobSaver, DomClipboard, DomConfirmer};

/// Authenticated download of `path`, saved under the server's file name.
pub fn download(ctx: AppContext, path: String, suggested: Option<String>, alert: Signal<Option<String>>) {
    spawn(async move {
        let client = ctx.client();
        let saver = BlobSaver;
        if let Err(e) = TransferHelper::new(&client, &saver).download(&path, suggested.as_deref()).await {
            ctx.report(ActionKind::Mutation, "Download failed", &e, alert);
        }
    });
}

/// Create a share link and copy it; falls back to a prompt for manual copy.
pub fn share(ctx: AppContext, file_id: i64, alert: Signal<Option<String>>) {
    spawn(async move {
        let link = match ctx.client().create_share_link(file_id).await {
            Ok(link) => link,
            Err(e) => {
                ctx.report(ActionKind::Mutation, "Could not create link", &e, alert);
                return;
            }
        };
        let url = link.absolute_url(&page_origin());
        if ClipboardWriter::new(DomClipboard).copy(&url).await {
            show_toast("Link copied to clipboard");
        } else {
            let _ = prompt_text("Copy the link manually:", &url);
            show_toast("Link ready");
        }
    });
}

/// PATCH the description and update the row in place.
pub fn save_description(
    ctx: AppContext,
    mut files: Signal<Vec<FileRecord>>,
    file_id: i64,
    text: String,
    alert: Signal<Option<String>>,
) {
    spawn(async move {
        match ctx.client().update_description(file_id, &text).await {
            Ok(()) => {
                if let Some(f) = files.write().iter_mut().find(|f| f.record_id() == file_id) {
                    f.description = Some(text);
                }
                show_toast("Description saved");
            }
            Err(e) => ctx.report(ActionKind::Mutation, "Could not save", &e, alert),
        }
    });
}

/// Description edit through a prompt (admin tables).
pub fn prompt_description(ctx: AppContext, files: Signal<Vec<FileRecord>>, file: &FileRecord, alert: Signal<Option<String>>) {
    if let Some(text) = prompt_text("File description:", file.description_text()) {
        save_description(ctx, files, file.id, text, alert);
    }
}

/// Confirmed delete; the row disappears once the backend agrees.
pub fn delete(ctx: AppContext, mut files: Signal<Vec<FileRecord>>, file_id: i64, alert: Signal<Option<String>>) {
    let Some(confirmed) = confirm(&DomConfirmer, "Delete this file?") else {
        return;
    };
    spawn(async move {
        match ctx.client().delete_file(file_id, confirmed).await {
            Ok(()) => {
                files.write().retain(|f| f.record_id() != file_id);
                show_toast("File deleted");
            }
            Err(e) => ctx.report(ActionKind::Mutation, "Could not delete", &e, alert),
        }
    });
}
