use async_trait::async_trait;
use dioxus::prelude::*;
use js_sys::{Array, Reflect, Uint8Array};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{console, Blob, BlobPropertyBag, HtmlDocument, HtmlElement, HtmlInputElement, HtmlTextAreaElement, Url};

use mycloud_web::clipboard::{ClipboardBackend, ClipboardError};
use mycloud_web::confirm::Confirmer;
use mycloud_web::error::{Notice, NoticeKind, TOAST_TTL_MS};
use mycloud_web::export::FileSaver;
use mycloud_web::session::TokenStore;

const TOKEN_KEY: &str = "token";

fn js_err(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

// Show a transient toast in the #toasts container
pub fn show_toast(message: &str) {
    show_toast_for(message, TOAST_TTL_MS);
}

fn show_toast_for(message: &str, ttl_ms: u32) {
    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            if let Some(container) = doc.get_element_by_id("toasts") {
                if let Ok(toast) = doc.create_element("div") {
                    toast.set_class_name("toast fade-in");
                    toast.set_text_content(Some(message));
                    if container.append_child(&toast).is_err() {
                        return;
                    }

                    let container_clone = container.clone();
                    let toast_clone = toast.clone();
                    let cb = Closure::wrap(Box::new(move || {
                        let _ = container_clone.remove_child(&toast_clone);
                    }) as Box<dyn FnMut()>);
                    let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
                        cb.as_ref().unchecked_ref(),
                        ttl_ms as i32,
                    );
                    cb.forget();
                }
            }
        }
    }
}

/// Alerts go to the page's alert slot, toasts to the toast container.
pub fn show_notice(notice: Notice, mut alert: Signal<Option<String>>) {
    match notice.kind {
        NoticeKind::Alert => alert.set(Some(notice.message)),
        NoticeKind::Toast { ttl_ms } => show_toast_for(&notice.message, ttl_ms),
    }
}

pub fn bytes_to_blob(bytes: &[u8], mime: &str) -> Result<Blob, JsValue> {
    let parts = Array::new();
    parts.push(&Uint8Array::from(bytes));
    let opts = BlobPropertyBag::new();
    opts.set_type(mime);
    Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
}

/// Saves generated or downloaded bytes through a temporary object URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlobSaver;

impl BlobSaver {
    fn try_save(&self, filename: &str, mime: &str, bytes: &[u8]) -> Result<(), JsValue> {
        let blob = bytes_to_blob(bytes, mime)?;
        let url = Url::create_object_url_with_blob(&blob)?;
        let doc = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
        let a: HtmlElement = doc.create_element("a")?.unchecked_into();
        a.set_attribute("href", &url)?;
        a.set_attribute("download", filename)?;
        body.append_child(&a)?;
        a.click();
        let _ = body.remove_child(&a);
        Url::revoke_object_url(&url)
    }
}

impl FileSaver for BlobSaver {
    fn save(&self, filename: &str, mime: &str, bytes: &[u8]) {
        if let Err(e) = self.try_save(filename, mime, bytes) {
            console::error_1(&format!("saving {} failed: {}", filename, js_err(e)).into());
            show_toast("Saving the file failed");
        }
    }
}

/// Browser clipboard: async Clipboard API, then `execCommand("copy")`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomClipboard;

#[async_trait(?Send)]
impl ClipboardBackend for DomClipboard {
    fn is_secure_context(&self) -> bool {
        web_sys::window().map(|w| w.is_secure_context()).unwrap_or(false)
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let win = web_sys::window().ok_or(ClipboardError::Unavailable)?;
        // navigator.clipboard is undefined on plain http
        let clipboard = Reflect::get(&win.navigator(), &JsValue::from_str("clipboard"))
            .map_err(|_| ClipboardError::Unavailable)?;
        if clipboard.is_undefined() || clipboard.is_null() {
            return Err(ClipboardError::Unavailable);
        }
        let clipboard: web_sys::Clipboard = clipboard.unchecked_into();
        JsFuture::from(clipboard.write_text(text))
            .await
            .map(|_| ())
            .map_err(|e| ClipboardError::Rejected(js_err(e)))
    }

    fn legacy_copy(&self, text: &str) -> Result<bool, ClipboardError> {
        let doc = web_sys::window().and_then(|w| w.document()).ok_or(ClipboardError::Unavailable)?;
        let body = doc.body().ok_or(ClipboardError::Unavailable)?;
        let area: HtmlTextAreaElement = doc
            .create_element("textarea")
            .map_err(|e| ClipboardError::Rejected(js_err(e)))?
            .unchecked_into();
        area.set_value(text);
        let _ = area.set_attribute("readonly", "");
        let style = area.style();
        let _ = style.set_property("position", "absolute");
        let _ = style.set_property("left", "-9999px");
        body.append_child(&area).map_err(|e| ClipboardError::Rejected(js_err(e)))?;

        let selection = doc.get_selection().ok().flatten();
        let previous = selection
            .as_ref()
            .filter(|s| s.range_count() > 0)
            .and_then(|s| s.get_range_at(0).ok());

        area.select();
        let copied = match doc.dyn_ref::<HtmlDocument>() {
            Some(html) => html.exec_command("copy").map_err(|e| ClipboardError::Rejected(js_err(e))),
            None => Err(ClipboardError::Unavailable),
        };

        let _ = body.remove_child(&area);
        if let (Some(sel), Some(range)) = (selection, previous) {
            let _ = sel.remove_all_ranges();
            let _ = sel.add_range(&range);
        }
        copied
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DomConfirmer;

impl Confirmer for DomConfirmer {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

/// `window.prompt`; `None` when cancelled.
pub fn prompt_text(message: &str, default: &str) -> Option<String> {
    web_sys::window()?.prompt_with_message_and_default(message, default).ok().flatten()
}

/// Token persisted in `localStorage["token"]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocalTokenStore;

impl LocalTokenStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl TokenStore for LocalTokenStore {
    fn load(&self) -> Option<String> {
        Self::storage()?.get_item(TOKEN_KEY).ok().flatten()
    }

    fn save(&self, token: &str) {
        if let Some(storage) = Self::storage() {
            if let Err(e) = storage.set_item(TOKEN_KEY, token) {
                console::warn_1(&format!("could not persist token: {}", js_err(e)).into());
            }
        }
    }

    fn evict(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(TOKEN_KEY);
        }
    }
}

/// First file chosen in the `<input type=file>` with the given id.
pub fn selected_file(input_id: &str) -> Option<web_sys::File> {
    let doc = web_sys::window()?.document()?;
    let input: HtmlInputElement = doc.get_element_by_id(input_id)?.dyn_into().ok()?;
    input.files()?.get(0)
}

pub fn clear_file_input(input_id: &str) {
    if let Some(input) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(input_id))
        .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
    {
        input.set_value("");
    }
}

pub async fn file_bytes(file: &web_sys::File) -> Result<Vec<u8>, String> {
    let buffer = JsFuture::from(file.array_buffer()).await.map_err(js_err)?;
    Ok(Uint8Array::new(&buffer).to_vec())
}

pub fn page_origin() -> String {
    web_sys::window().and_then(|w| w.location().origin().ok()).unwrap_or_default()
}

pub fn query_param(name: &str) -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    web_sys::UrlSearchParams::new_with_str(&search).ok()?.get(name)
}
