use super::{Outcome, PageLoad, Screen, ScreenShell};
use crate::api::{AnalysisKind, AnalysisResult, UserInfo};
use crate::browser::{Element, Route};
use crate::format::format_analysis;
use crate::messages;
use crate::storage::SessionToken;
use async_trait::async_trait;
use tracing::{error, info, warn};

/// `/advanced`: runs the advanced analysis for the stored current word as
/// soon as the page loads.
pub struct AdvancedScreen {
    shell: ScreenShell,
    token: Option<SessionToken>,
    user: Option<UserInfo>,
    word: Option<String>,
}

impl AdvancedScreen {
    pub fn new(shell: ScreenShell) -> Self {
        Self {
            shell,
            token: None,
            user: None,
            word: None,
        }
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    pub fn word(&self) -> Option<&str> {
        self.word.as_deref()
    }

    /// Requests the advanced analysis again for the same word.
    pub async fn analyze(&self) -> Outcome<AnalysisResult> {
        let Some(token) = self.token.clone().or_else(|| self.shell.gate()) else {
            return Outcome::Redirected(Route::Login);
        };
        let Some(word) = self.word.as_deref() else {
            self.redirect_missing_word();
            return Outcome::Redirected(Route::Basic);
        };

        info!(%word, "requesting advanced analysis");
        self.shell.set_loading(true);
        let result = self
            .shell
            .api()
            .analyze(AnalysisKind::Advanced, word, &token)
            .await;
        self.shell.set_loading(false);

        let browser = self.shell.browser();
        match result {
            Ok(result) => {
                browser.set_html(Element::AdvancedResult, &format_analysis(&result.analysis));
                Outcome::Done(result)
            }
            Err(err) => {
                error!(error = %err, %word, "advanced analysis failed");
                let message = err.user_message(messages::ADVANCED_FALLBACK);
                browser.alert(&messages::failure_alert(messages::ADVANCED_FAILED, &message));
                browser.set_html(Element::AdvancedResult, messages::ADVANCED_PANEL_ERROR);
                Outcome::Failed(err)
            }
        }
    }

    fn redirect_missing_word(&self) {
        warn!("no current word, redirecting to basic analysis");
        self.shell.browser().alert(messages::NO_CURRENT_WORD);
        self.shell.navigate(Route::Basic);
    }

    pub fn go_back(&self) {
        self.shell.navigate(Route::Basic);
    }

    pub fn go_to_history(&self) {
        self.shell.navigate(Route::History);
    }
}

#[async_trait]
impl Screen for AdvancedScreen {
    fn shell(&self) -> &ScreenShell {
        &self.shell
    }

    async fn initialize(&mut self) -> PageLoad {
        info!("advanced analysis screen loaded");
        let Some(token) = self.shell.gate() else {
            return PageLoad::Redirected(Route::Login);
        };
        let Some(word) = self.shell.session().current_word() else {
            self.redirect_missing_word();
            return PageLoad::Redirected(Route::Basic);
        };
        let Some(user) = self.shell.bootstrap(&token).await else {
            return PageLoad::Redirected(Route::Login);
        };
        self.token = Some(token);
        self.user = Some(user);
        self.shell.browser().set_text(Element::WordTitle, &word);
        self.word = Some(word);

        self.analyze().await.into_page_load()
    }
}
