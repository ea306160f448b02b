//! Typed client for the MyCloud REST backend.
//!
//! The client only builds requests and interprets responses; moving bytes
//! is delegated to an [`ApiTransport`] (fetch in the browser, a fake in
//! tests). Futures are `?Send` because the browser runs everything on one
//! thread.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::confirm::Confirmed;
use crate::error::ClientError;
use crate::transfer::{BinaryPayload, BinarySource};
use crate::types::{
    decode_list, FileRecord, RegisterRequest, ShareLink, TempPassword, TokenPair, UserRecord,
};

/// Same-origin base path of the backend.
pub const DEFAULT_API_BASE: &str = "/api";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// Multipart upload form: a `file` part and an optional `description`.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadForm {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    Multipart(UploadForm),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Base path + endpoint path + query string.
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<RequestBody>,
}

impl ApiRequest {
    /// Value of the `Authorization` header, present only with a token.
    pub fn authorization(&self) -> Option<String> {
        self.bearer.as_ref().map(|t| format!("Bearer {}", t))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApiResponse {
    pub status: u16,
    /// Lowercase header names.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// `text/html` answers come from a page host (an SPA fallback or a
    /// login portal), never from the REST backend.
    pub fn is_html(&self) -> bool {
        self.header("content-type")
            .map(|ct| ct.trim_start().to_ascii_lowercase().starts_with("text/html"))
            .unwrap_or(false)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        if self.is_html() {
            return Err(ClientError::Decode("expected JSON, got an HTML page".to_string()));
        }
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Body as JSON; an empty body (204) is `null`.
    pub fn value(&self) -> Result<Value, ClientError> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        self.json()
    }
}

#[async_trait(?Send)]
pub trait ApiTransport {
    /// Perform the request. Only transport failures are errors here; HTTP
    /// error statuses come back as responses.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError>;
}

#[async_trait(?Send)]
impl<T: ApiTransport + ?Sized> ApiTransport for &T {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        (**self).send(request).await
    }
}

/// Request builder bound to a base path and an optional bearer token.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    transport: T,
    base: String,
    token: Option<String>,
}

impl<T: ApiTransport> ApiClient<T> {
    pub fn new(transport: T, base: &str, token: Option<String>) -> Self {
        let base = base.trim().trim_end_matches('/');
        let base = if base.is_empty() { DEFAULT_API_BASE } else { base };
        Self { transport, base: base.to_string(), token: token.filter(|t| !t.is_empty()) }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
    ) -> Result<ApiResponse, ClientError> {
        let request = ApiRequest { method, url: self.url(path), bearer: self.token.clone(), body };
        tracing::debug!(method = method.as_str(), url = %request.url, "api request");
        let response = self.transport.send(request).await?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(ClientError::from_status(response.status, &response.body))
        }
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ClientError> {
        self.execute(Method::Get, path, None).await?.json()
    }

    async fn get_list<R: DeserializeOwned>(&self, path: &str) -> Result<Vec<R>, ClientError> {
        Ok(decode_list(self.execute(Method::Get, path, None).await?.value()?))
    }

    async fn post_json(&self, path: &str, body: Value) -> Result<ApiResponse, ClientError> {
        self.execute(Method::Post, path, Some(RequestBody::Json(body))).await
    }

    // ----- auth -----

    pub async fn obtain_token(&self, username: &str, password: &str) -> Result<TokenPair, ClientError> {
        self.post_json("/token/", json!({ "username": username, "password": password }))
            .await?
            .json()
    }

    pub async fn register(&self, req: &RegisterRequest) -> Result<(), ClientError> {
        self.post_json("/auth/register/", serde_json::to_value(req)?).await.map(|_| ())
    }

    pub async fn me(&self) -> Result<UserRecord, ClientError> {
        self.get_json("/auth/me/").await
    }

    pub async fn request_password_reset(&self, email: &str) -> Result<(), ClientError> {
        self.post_json("/auth/password/reset-request/", json!({ "email": email }))
            .await
            .map(|_| ())
    }

    pub async fn confirm_password_reset(
        &self,
        uid: &str,
        token: &str,
        new_password: &str,
    ) -> Result<(), ClientError> {
        self.post_json(
            "/auth/password/reset-confirm/",
            json!({ "uid": uid, "token": token, "new_password": new_password }),
        )
        .await
        .map(|_| ())
    }

    // ----- own files -----

    pub async fn list_files(&self) -> Result<Vec<FileRecord>, ClientError> {
        self.get_list("/files/").await
    }

    pub async fn upload_file(&self, form: UploadForm) -> Result<FileRecord, ClientError> {
        let form = UploadForm { description: form.description.filter(|d| !d.is_empty()), ..form };
        self.execute(Method::Post, "/files/", Some(RequestBody::Multipart(form))).await?.json()
    }

    pub fn file_download_path(&self, id: i64) -> String {
        format!("/files/{}/download/", id)
    }

    pub async fn update_description(&self, id: i64, description: &str) -> Result<(), ClientError> {
        self.execute(
            Method::Patch,
            &format!("/files/{}/", id),
            Some(RequestBody::Json(json!({ "description": description }))),
        )
        .await
        .map(|_| ())
    }

    pub async fn delete_file(&self, id: i64, _confirmed: Confirmed) -> Result<(), ClientError> {
        self.execute(Method::Delete, &format!("/files/{}/", id), None).await.map(|_| ())
    }

    pub async fn create_share_link(&self, file_id: i64) -> Result<ShareLink, ClientError> {
        self.post_json("/links/", json!({ "file_id": file_id })).await?.json()
    }

    // ----- admin -----

    pub async fn admin_list_users(&self) -> Result<Vec<UserRecord>, ClientError> {
        self.get_list("/admin/users/").await
    }

    pub async fn admin_get_user(&self, id: &str) -> Result<UserRecord, ClientError> {
        self.get_json(&format!("/admin/users/{}/", urlencoding::encode(id))).await
    }

    /// All files, or one owner's files when `owner` is given.
    pub async fn admin_list_files(&self, owner: Option<&str>) -> Result<Vec<FileRecord>, ClientError> {
        match owner {
            Some(id) => self.get_list(&format!("/admin/files/?user={}", urlencoding::encode(id))).await,
            None => self.get_list("/admin/files/").await,
        }
    }

    /// One owner's files. Backends that ignore `?user=` get a second try
    /// with `?user_id=` when the first answer is empty.
    pub async fn admin_list_user_files(&self, owner: &str) -> Result<Vec<FileRecord>, ClientError> {
        let files = self.admin_list_files(Some(owner)).await?;
        if !files.is_empty() {
            return Ok(files);
        }
        tracing::debug!(owner, "no files for ?user=, retrying with ?user_id=");
        self.get_list(&format!("/admin/files/?user_id={}", urlencoding::encode(owner))).await
    }

    pub fn admin_download_path(&self, id: i64) -> String {
        format!("/admin/files/{}/download/", id)
    }

    /// Grant or revoke the admin role. Falls back to the `toggle_staff`
    /// action when the backend rejects the PATCH.
    pub async fn admin_set_staff(&self, user: &UserRecord, staff: bool, _confirmed: Confirmed) -> Result<(), ClientError> {
        let patched = self
            .execute(
                Method::Patch,
                &format!("/admin/users/{}/", user.id),
                Some(RequestBody::Json(json!({ "is_staff": staff }))),
            )
            .await;
        match patched {
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::warn!(user = user.id, "PATCH is_staff failed ({}), using toggle_staff", e);
                self.post_json(&format!("/admin/users/{}/toggle_staff/", user.id), json!({}))
                    .await
                    .map(|_| ())
            }
        }
    }

    pub async fn admin_delete_user(&self, id: i64, _confirmed: Confirmed) -> Result<(), ClientError> {
        self.execute(Method::Delete, &format!("/admin/users/{}/", id), None).await.map(|_| ())
    }

    pub async fn admin_deactivate_user(&self, id: i64, _confirmed: Confirmed) -> Result<(), ClientError> {
        self.post_json(&format!("/admin/users/{}/deactivate/", id), json!({})).await.map(|_| ())
    }

    pub async fn admin_send_reset_link(&self, id: i64, _confirmed: Confirmed) -> Result<(), ClientError> {
        self.post_json(&format!("/admin/users/{}/send_reset_link/", id), json!({}))
            .await
            .map(|_| ())
    }

    pub async fn admin_issue_temp_password(
        &self,
        id: i64,
        _confirmed: Confirmed,
    ) -> Result<TempPassword, ClientError> {
        self.post_json(&format!("/admin/users/{}/set_temp_password/", id), json!({}))
            .await?
            .json()
    }
}

#[async_trait(?Send)]
impl<T: ApiTransport> BinarySource for ApiClient<T> {
    async fn fetch_binary(&self, path: &str) -> Result<BinaryPayload, ClientError> {
        let response = self.execute(Method::Get, path, None).await?;
        // Backend downloads are attachments; a bare HTML page is the UI shell
        if response.is_html() && response.header("content-disposition").is_none() {
            tracing::warn!(path, "download answered with an HTML page, not saving it");
            return Err(ClientError::Decode("download answered with an HTML page".to_string()));
        }
        Ok(BinaryPayload {
            content_disposition: response.header("content-disposition").map(str::to_string),
            content_type: response.header("content-type").map(str::to_string),
            bytes: response.body,
        })
    }
}
