//! Screen controllers: one per route.
//!
//! Every protected screen composes a [`ScreenShell`] that owns the session
//! gate, the header bootstrap and logout. The screens add their own actions
//! on top.

mod advanced;
mod auth;
mod basic;
mod history;
mod shell;

pub use advanced::AdvancedScreen;
pub use auth::AuthScreen;
pub use basic::BasicScreen;
pub use history::{HistoryScreen, render_history_list};
pub use shell::ScreenShell;

use crate::browser::Route;
use crate::error::{ApiFailure, ValidationError};
use async_trait::async_trait;

/// Result of running a screen's initializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageLoad {
    Ready,
    /// The screen gave up and navigated elsewhere.
    Redirected(Route),
    /// The page is shown but its on-load request failed.
    Failed(ApiFailure),
}

/// Result of a single user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Done(T),
    /// Input was rejected locally; no request was sent.
    Invalid(ValidationError),
    Failed(ApiFailure),
    /// A prerequisite was missing and the screen navigated away.
    Redirected(Route),
}

impl<T> Outcome<T> {
    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done(_))
    }

    pub fn done(self) -> Option<T> {
        match self {
            Outcome::Done(value) => Some(value),
            _ => None,
        }
    }

    /// Page state after running this outcome as a screen's on-load action.
    pub fn into_page_load(self) -> PageLoad {
        match self {
            Outcome::Done(_) | Outcome::Invalid(_) => PageLoad::Ready,
            Outcome::Failed(err) => PageLoad::Failed(err),
            Outcome::Redirected(route) => PageLoad::Redirected(route),
        }
    }
}

/// A screen behind the session gate.
#[async_trait]
pub trait Screen: Send + Sync {
    fn shell(&self) -> &ScreenShell;

    /// Gate, bootstrap and the screen's own on-load work.
    async fn initialize(&mut self) -> PageLoad;

    /// Asks for confirmation, then signs out. Returns `false` when the user
    /// declined.
    async fn logout(&self) -> bool {
        self.shell().logout().await
    }
}
