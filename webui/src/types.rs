//! Shared UI state.
//!
//! The session and the host's runtime settings live in one [`AppContext`]
//! provided at the root; pages read it with `use_context`.

use dioxus::prelude::*;
use web_sys::console;

use mycloud_web::api::ApiClient;
use mycloud_web::error::{ActionKind, ClientError, Notice};
use mycloud_web::session::{fetch_profile, Session};
use mycloud_web::types::RuntimeConfig;

use crate::api::{fetch_runtime_config, ReqwasmTransport};
use crate::ui_utils::{show_notice, LocalTokenStore};

pub type AppSession = Session<LocalTokenStore>;
pub type Client = ApiClient<ReqwasmTransport>;

#[derive(Clone, Copy)]
pub struct AppContext {
    pub session: Signal<AppSession>,
    pub config: Signal<RuntimeConfig>,
    /// Set once the runtime config and the stored token's profile are known.
    pub ready: Signal<bool>,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            session: Signal::new(Session::init(LocalTokenStore)),
            config: Signal::new(RuntimeConfig::default()),
            ready: Signal::new(false),
        }
    }

    pub fn api_base(&self) -> String {
        self.config.peek().api_base.clone()
    }

    pub fn client(&self) -> Client {
        self.session.peek().client(ReqwasmTransport, &self.api_base())
    }

    pub async fn bootstrap(mut self) {
        let cfg = fetch_runtime_config().await;
        self.config.set(cfg);

        let token = self.session.peek().token().map(str::to_string);
        if let Some(token) = token {
            if let Err(e) = self.load_profile(&token).await {
                console::warn_1(&format!("profile not loaded: {}", e).into());
            }
        }
        self.ready.set(true);
    }

    /// Store a freshly issued token and load its profile.
    pub async fn sign_in(mut self, token: &str) -> Result<(), ClientError> {
        self.session.write().set_token(token);
        self.load_profile(token).await
    }

    /// Fetch the profile for `token` without holding the session, then apply
    /// the outcome to whatever the session is by the time it arrives.
    async fn load_profile(mut self, token: &str) -> Result<(), ClientError> {
        let fetched = fetch_profile(ReqwasmTransport, &self.api_base(), token).await;
        self.session.write().apply_profile(token, fetched)
    }

    pub fn sign_out(mut self) {
        self.session.write().clear();
    }

    /// Show the notice for a failed action; a rejected token also ends the
    /// session.
    pub fn report(mut self, action: ActionKind, context: &str, err: &ClientError, alert: Signal<Option<String>>) {
        if *err == ClientError::Unauthorized {
            self.session.write().clear();
        }
        show_notice(Notice::for_failure(action, context, err), alert);
    }
}
