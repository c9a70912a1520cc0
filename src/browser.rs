//! The host surface screens draw on.
//!
//! A [`Browser`] is whatever shows the page: the terminal frontend in the
//! CLI, a recording fake in tests. Screens only ever talk to it through
//! these methods, so every visible effect of an action is observable.

use async_trait::async_trait;
use std::fmt;
use std::io;

/// Top-level screens. Moving between them is a full navigation.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Route {
    Login,
    Basic,
    Advanced,
    History,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Basic => "/chat",
            Route::Advanced => "/advanced",
            Route::History => "/history",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Regions whose content a screen replaces.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Element {
    Username,
    AnalysisResult,
    AdvancedResult,
    WordTitle,
    HistoryContent,
}

/// Buttons a screen enables or disables.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Control {
    AnalyzeButton,
    AdvancedButton,
    ExportButton,
}

/// Input fields that can take focus or have their value set.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Field {
    Word,
    RegisterUsername,
    RegisterEmail,
    RegisterPassword,
    LoginUsername,
    LoginPassword,
}

/// Tone of an inline status line.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MessageKind {
    Success,
    Error,
}

pub trait Browser: Send + Sync {
    /// Leaves the current screen for `route`.
    fn navigate(&self, route: Route);

    /// Blocking notice the user has to dismiss.
    fn alert(&self, message: &str);

    /// Yes/no question; `true` when the user accepts.
    fn confirm(&self, message: &str) -> bool;

    fn set_text(&self, element: Element, text: &str);

    /// Replaces `element` with an HTML fragment, unescaped.
    fn set_html(&self, element: Element, html: &str);

    fn set_enabled(&self, control: Control, enabled: bool);

    fn set_loading(&self, visible: bool);

    /// Inline status line on the auth screen.
    fn show_message(&self, message: &str, kind: MessageKind);

    fn focus(&self, field: Field);

    fn set_value(&self, field: Field, value: &str);

    /// Clears every field of the registration form.
    fn reset_register_form(&self);

    /// Opens a new browsing context for printing, or `None` when the host
    /// refuses (popup blocked).
    fn open_window(&self) -> Option<Box<dyn PrintWindow>>;
}

/// A separate browsing context holding a generated document.
#[async_trait]
pub trait PrintWindow: Send {
    fn write(&mut self, document: &str) -> io::Result<()>;

    /// Resolves once the written document has finished loading.
    async fn loaded(&mut self);

    fn focus(&mut self) {}

    fn print(&mut self);

    /// Resolves once the print dialog has been dismissed.
    async fn printed(&mut self);

    fn close(&mut self);
}
