use super::{Outcome, PageLoad, Screen, ScreenShell};
use crate::api::{AnalysisKind, AnalysisResult, UserInfo};
use crate::browser::{Control, Element, Field, Route};
use crate::format::format_analysis;
use crate::messages;
use crate::storage::SessionToken;
use crate::validate::validate_word;
use async_trait::async_trait;
use tracing::{error, info};

/// `/chat`: type a word, get the basic analysis.
pub struct BasicScreen {
    shell: ScreenShell,
    token: Option<SessionToken>,
    user: Option<UserInfo>,
    current_word: Option<String>,
}

impl BasicScreen {
    pub fn new(shell: ScreenShell) -> Self {
        Self {
            shell,
            token: None,
            user: None,
            current_word: None,
        }
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    /// Word of the last successful analysis on this screen.
    pub fn current_word(&self) -> Option<&str> {
        self.current_word.as_deref()
    }

    fn set_busy(&self, busy: bool) {
        self.shell.set_loading(busy);
        self.shell
            .browser()
            .set_enabled(Control::AnalyzeButton, !busy);
    }

    /// Validates `input` and requests its basic analysis.
    pub async fn analyze(&mut self, input: &str) -> Outcome<AnalysisResult> {
        let browser = self.shell.browser();
        let word = match validate_word(input) {
            Ok(word) => word.to_string(),
            Err(err) => {
                browser.alert(&err.to_string());
                browser.focus(err.field(false));
                return Outcome::Invalid(err);
            }
        };
        let Some(token) = self.token.clone().or_else(|| self.shell.gate()) else {
            return Outcome::Redirected(Route::Login);
        };

        info!(%word, "requesting basic analysis");
        self.set_busy(true);
        let result = self
            .shell
            .api()
            .analyze(AnalysisKind::Basic, &word, &token)
            .await;
        self.set_busy(false);

        let browser = self.shell.browser();
        match result {
            Ok(result) => {
                self.shell.session().set_current_word(&word);
                self.current_word = Some(word);
                browser.set_html(Element::AnalysisResult, &format_analysis(&result.analysis));
                browser.set_enabled(Control::AdvancedButton, true);
                Outcome::Done(result)
            }
            Err(err) => {
                error!(error = %err, %word, "basic analysis failed");
                let message = err.user_message(messages::BASIC_FALLBACK);
                browser.alert(&messages::failure_alert(messages::BASIC_FAILED, &message));
                browser.set_html(Element::AnalysisResult, messages::BASIC_PANEL_ERROR);
                Outcome::Failed(err)
            }
        }
    }

    /// Moves to the advanced screen for the word analyzed here.
    pub fn go_to_advanced(&self) -> bool {
        let Some(word) = self.current_word.as_deref() else {
            self.shell.browser().alert(messages::BASIC_FIRST);
            return false;
        };
        self.shell.session().set_current_word(word);
        self.shell.navigate(Route::Advanced);
        true
    }

    pub fn go_to_history(&self) {
        self.shell.navigate(Route::History);
    }
}

#[async_trait]
impl Screen for BasicScreen {
    fn shell(&self) -> &ScreenShell {
        &self.shell
    }

    async fn initialize(&mut self) -> PageLoad {
        info!("basic analysis screen loaded");
        self.shell
            .browser()
            .set_enabled(Control::AdvancedButton, false);
        let Some(token) = self.shell.gate() else {
            return PageLoad::Redirected(Route::Login);
        };
        let Some(user) = self.shell.bootstrap(&token).await else {
            return PageLoad::Redirected(Route::Login);
        };
        self.token = Some(token);
        self.user = Some(user);
        self.shell.browser().focus(Field::Word);
        PageLoad::Ready
    }
}
