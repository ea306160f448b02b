use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use serde_json::Value;

use crate::api::{ApiRequest, ApiResponse, ApiTransport};
use crate::confirm::Confirmer;
use crate::error::ClientError;
use crate::export::FileSaver;
use crate::types::FileRecord;

/// Replays queued responses in order and records every request.
#[derive(Default)]
pub struct FakeTransport {
    requests: RefCell<Vec<ApiRequest>>,
    responses: RefCell<VecDeque<Result<ApiResponse, ClientError>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, response: ApiResponse) -> Self {
        self.responses.borrow_mut().push_back(Ok(response));
        self
    }

    pub fn respond_json(self, status: u16, body: Value) -> Self {
        self.respond(json_response(status, body))
    }

    pub fn fail(self, err: ClientError) -> Self {
        self.responses.borrow_mut().push_back(Err(err));
        self
    }

    pub fn sent(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl ApiTransport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Network("no response queued".into())))
    }
}

pub fn json_response(status: u16, body: Value) -> ApiResponse {
    ApiResponse {
        status,
        headers: vec![("content-type".into(), "application/json".into())],
        body: serde_json::to_vec(&body).unwrap(),
    }
}

pub fn empty_response(status: u16) -> ApiResponse {
    ApiResponse { status, headers: Vec::new(), body: Vec::new() }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SavedFile {
    pub filename: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl SavedFile {
    pub fn text(&self) -> String {
        String::from_utf8(self.bytes.clone()).unwrap()
    }
}

#[derive(Default)]
pub struct RecordingSaver {
    pub saved: RefCell<Vec<SavedFile>>,
}

impl FileSaver for RecordingSaver {
    fn save(&self, filename: &str, mime: &str, bytes: &[u8]) {
        self.saved.borrow_mut().push(SavedFile {
            filename: filename.to_string(),
            mime: mime.to_string(),
            bytes: bytes.to_vec(),
        });
    }
}

/// Always answers `answer`, remembering what it was asked.
pub struct ScriptedConfirmer {
    pub answer: bool,
    pub asked: RefCell<Vec<String>>,
}

impl ScriptedConfirmer {
    pub fn new(answer: bool) -> Self {
        Self { answer, asked: RefCell::new(Vec::new()) }
    }
}

impl Confirmer for ScriptedConfirmer {
    fn confirm(&self, message: &str) -> bool {
        self.asked.borrow_mut().push(message.to_string());
        self.answer
    }
}

pub fn file(id: i64, name: &str, size: Option<i64>, uploaded_at: Option<&str>) -> FileRecord {
    FileRecord {
        id,
        original_name: Some(name.to_string()),
        size,
        uploaded_at: uploaded_at.map(str::to_string),
        ..FileRecord::default()
    }
}
