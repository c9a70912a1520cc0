//! Client for the nrv vocabulary analyzer.
//!
//! The crate drives the four screens of the analyzer (login, basic analysis,
//! advanced analysis, history) against the backend service. Everything the
//! screens touch outside themselves sits behind a trait: [`VocabApi`] for the
//! backend, [`Browser`] for the host surface and [`ClientStorage`] for
//! persisted session state.

pub mod api;
pub mod browser;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod messages;
pub mod screen;
pub mod storage;
pub mod validate;

pub use api::{
    AnalysisKind, AnalysisResult, ApiResult, HealthStatus, HistoryRecord, HttpVocabApi,
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserInfo, VocabApi,
};
pub use browser::{Browser, Control, Element, Field, MessageKind, PrintWindow, Route};
pub use config::ClientConfig;
pub use error::{ApiFailure, Error, ValidationError};
pub use export::{ExportOutcome, HistoryExporter};
pub use format::{format_analysis, format_for_print};
pub use screen::{
    AdvancedScreen, AuthScreen, BasicScreen, HistoryScreen, Outcome, PageLoad, Screen, ScreenShell,
};
pub use validate::{LoginForm, RegistrationForm, validate_word};
pub use storage::{ClientStorage, FileStorage, MemoryStorage, SessionContext, SessionToken};
