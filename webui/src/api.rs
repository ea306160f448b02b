use async_trait::async_trait;
use reqwasm::http::{Method as HttpMethod, Request};
use web_sys::{console, FormData};

use mycloud_web::api::{ApiRequest, ApiResponse, ApiTransport, Method, RequestBody, UploadForm};
use mycloud_web::error::ClientError;
use mycloud_web::types::RuntimeConfig;

use crate::ui_utils::bytes_to_blob;

/// Headers the core looks at; fetch exposes no way to list them all.
const READ_HEADERS: [&str; 2] = ["content-type", "content-disposition"];

fn map_net(e: impl std::fmt::Display) -> ClientError {
    ClientError::Network(e.to_string())
}

/// `fetch` transport used by every client in the UI.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReqwasmTransport;

#[async_trait(?Send)]
impl ApiTransport for ReqwasmTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let method = match request.method {
            Method::Get => HttpMethod::GET,
            Method::Post => HttpMethod::POST,
            Method::Patch => HttpMethod::PATCH,
            Method::Delete => HttpMethod::DELETE,
        };
        let mut req = Request::new(&request.url).method(method);
        if let Some(auth) = request.authorization() {
            req = req.header("Authorization", &auth);
        }
        req = match request.body {
            None => req,
            Some(RequestBody::Json(value)) => {
                req.header("Content-Type", "application/json").body(value.to_string())
            }
            // The browser sets the multipart boundary itself
            Some(RequestBody::Multipart(form)) => req.body(multipart(&form)?),
        };

        let resp = req.send().await.map_err(map_net)?;
        let status = resp.status();
        let headers = READ_HEADERS
            .iter()
            .filter_map(|name| resp.headers().get(name).map(|v| (name.to_string(), v)))
            .collect();
        let body = resp.binary().await.map_err(map_net)?;
        Ok(ApiResponse { status, headers, body })
    }
}

fn multipart(form: &UploadForm) -> Result<FormData, ClientError> {
    let js = |e: wasm_bindgen::JsValue| ClientError::Network(format!("{:?}", e));
    let data = FormData::new().map_err(js)?;
    let blob = bytes_to_blob(&form.bytes, "application/octet-stream").map_err(js)?;
    data.append_with_blob_and_filename("file", &blob, &form.file_name).map_err(js)?;
    if let Some(description) = &form.description {
        data.append_with_str("description", description).map_err(js)?;
    }
    Ok(data)
}

/// Host-provided settings; built-in defaults when the host has none.
pub async fn fetch_runtime_config() -> RuntimeConfig {
    let resp = match Request::get("/app-config.json").send().await {
        Ok(resp) if resp.ok() => resp,
        Ok(resp) => {
            console::warn_1(&format!("app-config.json: HTTP {}", resp.status()).into());
            return RuntimeConfig::default();
        }
        Err(e) => {
            console::warn_1(&format!("app-config.json: {}", e).into());
            return RuntimeConfig::default();
        }
    };
    resp.json().await.unwrap_or_else(|e| {
        console::warn_1(&format!("app-config.json: {}", e).into());
        RuntimeConfig::default()
    })
}
