use crate::api::{UserInfo, VocabApi};
use crate::browser::{Browser, Element, Route};
use crate::messages;
use crate::storage::{SessionContext, SessionToken};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What every protected screen shares: backend, host surface and session.
#[derive(Clone)]
pub struct ScreenShell {
    api: Arc<dyn VocabApi>,
    browser: Arc<dyn Browser>,
    session: SessionContext,
}

impl ScreenShell {
    pub fn new(api: Arc<dyn VocabApi>, browser: Arc<dyn Browser>, session: SessionContext) -> Self {
        Self {
            api,
            browser,
            session,
        }
    }

    pub fn api(&self) -> &dyn VocabApi {
        self.api.as_ref()
    }

    pub fn browser(&self) -> &dyn Browser {
        self.browser.as_ref()
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn navigate(&self, route: Route) {
        info!(%route, "navigating");
        self.browser.navigate(route);
    }

    pub fn set_loading(&self, visible: bool) {
        debug!(visible, "loading overlay");
        self.browser.set_loading(visible);
    }

    /// Returns the stored token, or alerts and sends the user to login.
    pub fn gate(&self) -> Option<SessionToken> {
        let token = self.session.token();
        if token.is_none() {
            warn!("no session token, redirecting to login");
            self.browser.alert(messages::LOGIN_REQUIRED);
            self.navigate(Route::Login);
        }
        token
    }

    /// Loads the signed-in user into the header. Any failure counts as an
    /// expired session: the token is dropped and the user sent to login.
    pub async fn bootstrap(&self, token: &SessionToken) -> Option<UserInfo> {
        match self.api.user_info(token).await {
            Ok(user) => {
                debug!(username = %user.username, "user info loaded");
                self.browser
                    .set_text(Element::Username, &messages::header_for(&user.username));
                Some(user)
            }
            Err(err) => {
                warn!(error = %err, "user info failed, treating session as expired");
                self.browser.alert(messages::SESSION_EXPIRED);
                self.session.clear_token();
                self.navigate(Route::Login);
                None
            }
        }
    }

    /// Confirms, notifies the backend best-effort, then clears local state
    /// and goes to login whatever the backend said.
    pub async fn logout(&self) -> bool {
        if !self.browser.confirm(messages::LOGOUT_CONFIRM) {
            debug!("logout cancelled");
            return false;
        }
        if let Some(token) = self.session.token() {
            match self.api.logout(&token).await {
                Ok(()) => debug!("logout notified"),
                Err(err) => warn!(error = %err, "logout notification failed"),
            }
        }
        self.session.clear();
        info!("local session cleared");
        self.navigate(Route::Login);
        true
    }
}
