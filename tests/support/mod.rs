#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use nrv_vocab::{
    AnalysisKind, AnalysisResult, ApiFailure, ApiResult, Browser, Control, Element, Field,
    HealthStatus, HistoryRecord, LoginRequest, LoginResponse, MessageKind, PrintWindow,
    RegisterRequest, RegisterResponse, Route, ScreenShell, SessionContext, SessionToken,
    UserInfo, VocabApi,
};
use parking_lot::Mutex;

pub const TOKEN: &str = "3f6c1c2e-token";

pub const BASIC_TEXT: &str = "**발음기호**: [rʌn]\n1. 달리다\n- 예문: I run every day.";
pub const ADVANCED_TEXT: &str = "🟢 어원: Old English rinnan";

/// Every backend call the fake received, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    UserInfo(String),
    Analyze(AnalysisKind, String),
    Register(RegisterRequest),
    Login(String),
    Logout(String),
    History(String),
    Health,
}

struct Script {
    user_info: ApiResult<UserInfo>,
    basic: ApiResult<AnalysisResult>,
    advanced: ApiResult<AnalysisResult>,
    register: ApiResult<RegisterResponse>,
    login: ApiResult<LoginResponse>,
    logout: ApiResult<()>,
    history: ApiResult<Vec<HistoryRecord>>,
}

/// Backend that answers from a script and records what it was asked.
pub struct FakeApi {
    script: Mutex<Script>,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(Script {
                user_info: Ok(user("alice")),
                basic: Ok(analysis(BASIC_TEXT)),
                advanced: Ok(analysis(ADVANCED_TEXT)),
                register: Ok(RegisterResponse::default()),
                login: Ok(LoginResponse {
                    session_id: TOKEN.to_string(),
                    message: None,
                }),
                logout: Ok(()),
                history: Ok(Vec::new()),
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_user_info(self, result: ApiResult<UserInfo>) -> Self {
        self.script.lock().user_info = result;
        self
    }

    pub fn with_basic(self, result: ApiResult<AnalysisResult>) -> Self {
        self.script.lock().basic = result;
        self
    }

    pub fn with_advanced(self, result: ApiResult<AnalysisResult>) -> Self {
        self.script.lock().advanced = result;
        self
    }

    pub fn with_register(self, result: ApiResult<RegisterResponse>) -> Self {
        self.script.lock().register = result;
        self
    }

    pub fn with_login(self, result: ApiResult<LoginResponse>) -> Self {
        self.script.lock().login = result;
        self
    }

    pub fn with_logout(self, result: ApiResult<()>) -> Self {
        self.script.lock().logout = result;
        self
    }

    pub fn with_history(self, result: ApiResult<Vec<HistoryRecord>>) -> Self {
        self.script.lock().history = result;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl VocabApi for FakeApi {
    async fn user_info(&self, token: &SessionToken) -> ApiResult<UserInfo> {
        self.record(Call::UserInfo(token.as_str().to_string()));
        self.script.lock().user_info.clone()
    }

    async fn analyze(
        &self,
        kind: AnalysisKind,
        word: &str,
        _token: &SessionToken,
    ) -> ApiResult<AnalysisResult> {
        self.record(Call::Analyze(kind, word.to_string()));
        let script = self.script.lock();
        match kind {
            AnalysisKind::Basic => script.basic.clone(),
            AnalysisKind::Advanced => script.advanced.clone(),
        }
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<RegisterResponse> {
        self.record(Call::Register(request.clone()));
        self.script.lock().register.clone()
    }

    async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        self.record(Call::Login(request.username.clone()));
        self.script.lock().login.clone()
    }

    async fn logout(&self, token: &SessionToken) -> ApiResult<()> {
        self.record(Call::Logout(token.as_str().to_string()));
        self.script.lock().logout.clone()
    }

    async fn history(&self, token: &SessionToken) -> ApiResult<Vec<HistoryRecord>> {
        self.record(Call::History(token.as_str().to_string()));
        self.script.lock().history.clone()
    }

    async fn health(&self) -> ApiResult<HealthStatus> {
        self.record(Call::Health);
        Ok(HealthStatus {
            status: "healthy".to_string(),
            timestamp: None,
            users_count: None,
            active_sessions: None,
        })
    }
}

/// What happened to one opened print window.
#[derive(Debug, Default, Clone)]
pub struct WindowLog {
    pub document: String,
    pub loaded: bool,
    pub focused: bool,
    pub printed: bool,
    pub closed: bool,
}

pub struct RecordingWindow {
    log: Arc<Mutex<WindowLog>>,
}

#[async_trait]
impl PrintWindow for RecordingWindow {
    fn write(&mut self, document: &str) -> std::io::Result<()> {
        self.log.lock().document.push_str(document);
        Ok(())
    }

    async fn loaded(&mut self) {
        self.log.lock().loaded = true;
    }

    fn focus(&mut self) {
        self.log.lock().focused = true;
    }

    fn print(&mut self) {
        self.log.lock().printed = true;
    }

    async fn printed(&mut self) {}

    fn close(&mut self) {
        self.log.lock().closed = true;
    }
}

#[derive(Default)]
struct Page {
    navigations: Vec<Route>,
    alerts: Vec<String>,
    confirms: Vec<String>,
    text: Vec<(Element, String)>,
    html: Vec<(Element, String)>,
    enabled: Vec<(Control, bool)>,
    loading: Vec<bool>,
    messages: Vec<(String, MessageKind)>,
    focused: Vec<Field>,
    values: Vec<(Field, String)>,
    register_resets: usize,
    windows: Vec<Arc<Mutex<WindowLog>>>,
}

/// Browser that records every call the screens make.
pub struct RecordingBrowser {
    confirm_answer: bool,
    popups_blocked: bool,
    page: Mutex<Page>,
}

impl RecordingBrowser {
    pub fn new() -> Self {
        Self {
            confirm_answer: true,
            popups_blocked: false,
            page: Mutex::new(Page::default()),
        }
    }

    pub fn declining(mut self) -> Self {
        self.confirm_answer = false;
        self
    }

    pub fn blocking_popups(mut self) -> Self {
        self.popups_blocked = true;
        self
    }

    pub fn navigations(&self) -> Vec<Route> {
        self.page.lock().navigations.clone()
    }

    pub fn last_navigation(&self) -> Option<Route> {
        self.page.lock().navigations.last().copied()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.page.lock().alerts.clone()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.page.lock().confirms.clone()
    }

    pub fn text(&self, element: Element) -> Option<String> {
        last_for(&self.page.lock().text, element)
    }

    pub fn html(&self, element: Element) -> Option<String> {
        last_for(&self.page.lock().html, element)
    }

    pub fn enabled(&self, control: Control) -> Option<bool> {
        last_for(&self.page.lock().enabled, control)
    }

    pub fn loading(&self) -> Vec<bool> {
        self.page.lock().loading.clone()
    }

    pub fn messages(&self) -> Vec<(String, MessageKind)> {
        self.page.lock().messages.clone()
    }

    pub fn focused(&self) -> Option<Field> {
        self.page.lock().focused.last().copied()
    }

    pub fn value(&self, field: Field) -> Option<String> {
        last_for(&self.page.lock().values, field)
    }

    pub fn register_resets(&self) -> usize {
        self.page.lock().register_resets
    }

    pub fn windows(&self) -> Vec<WindowLog> {
        self.page
            .lock()
            .windows
            .iter()
            .map(|log| log.lock().clone())
            .collect()
    }
}

fn last_for<K: PartialEq + Copy, V: Clone>(entries: &[(K, V)], key: K) -> Option<V> {
    entries
        .iter()
        .rev()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.clone())
}

impl Browser for RecordingBrowser {
    fn navigate(&self, route: Route) {
        self.page.lock().navigations.push(route);
    }

    fn alert(&self, message: &str) {
        self.page.lock().alerts.push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.page.lock().confirms.push(message.to_string());
        self.confirm_answer
    }

    fn set_text(&self, element: Element, text: &str) {
        self.page.lock().text.push((element, text.to_string()));
    }

    fn set_html(&self, element: Element, html: &str) {
        self.page.lock().html.push((element, html.to_string()));
    }

    fn set_enabled(&self, control: Control, enabled: bool) {
        self.page.lock().enabled.push((control, enabled));
    }

    fn set_loading(&self, visible: bool) {
        self.page.lock().loading.push(visible);
    }

    fn show_message(&self, message: &str, kind: MessageKind) {
        self.page.lock().messages.push((message.to_string(), kind));
    }

    fn focus(&self, field: Field) {
        self.page.lock().focused.push(field);
    }

    fn set_value(&self, field: Field, value: &str) {
        self.page.lock().values.push((field, value.to_string()));
    }

    fn reset_register_form(&self) {
        self.page.lock().register_resets += 1;
    }

    fn open_window(&self) -> Option<Box<dyn PrintWindow>> {
        if self.popups_blocked {
            return None;
        }
        let log = Arc::new(Mutex::new(WindowLog::default()));
        self.page.lock().windows.push(log.clone());
        Some(Box::new(RecordingWindow { log }))
    }
}

/// Fake backend, recording browser and an in-memory session wired together.
pub struct Harness {
    pub api: Arc<FakeApi>,
    pub browser: Arc<RecordingBrowser>,
    pub session: SessionContext,
}

impl Harness {
    pub fn new(api: FakeApi, browser: RecordingBrowser) -> Self {
        Self {
            api: Arc::new(api),
            browser: Arc::new(browser),
            session: SessionContext::in_memory(),
        }
    }

    pub fn signed_in(api: FakeApi, browser: RecordingBrowser) -> Self {
        let harness = Self::new(api, browser);
        harness.session.set_token(&SessionToken::new(TOKEN));
        harness
    }

    pub fn shell(&self) -> ScreenShell {
        ScreenShell::new(self.api.clone(), self.browser.clone(), self.session.clone())
    }
}

pub fn user(username: &str) -> UserInfo {
    UserInfo {
        username: username.to_string(),
        name: None,
        email: None,
    }
}

pub fn analysis(text: &str) -> AnalysisResult {
    AnalysisResult {
        analysis: text.to_string(),
        word: None,
        record_id: None,
    }
}

pub fn record(word: &str, basic: Option<&str>, advanced: Option<&str>) -> HistoryRecord {
    HistoryRecord {
        id: Some(format!("rec-{word}")),
        word: word.to_string(),
        timestamp: "2024-05-01 09:30:00".to_string(),
        basic_analysis: basic.map(str::to_string),
        advanced_analysis: advanced.map(str::to_string),
    }
}

pub fn rejected(status: u16, detail: &str) -> ApiFailure {
    ApiFailure::rejected(status, Some(detail.to_string()))
}
