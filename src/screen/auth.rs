use super::{Outcome, PageLoad, ScreenShell};
use crate::api::{LoginRequest, RegisterRequest, RegisterResponse};
use crate::browser::{Field, MessageKind, Route};
use crate::messages;
use crate::storage::SessionToken;
use crate::validate::{LoginForm, RegistrationForm};
use tracing::{error, info};

/// `/`: registration and login.
///
/// Unlike the other screens this one is reachable without a session; a
/// stored token is checked once and, if still valid, skips straight to the
/// basic analysis screen.
pub struct AuthScreen {
    shell: ScreenShell,
}

impl AuthScreen {
    pub fn new(shell: ScreenShell) -> Self {
        Self { shell }
    }

    pub fn shell(&self) -> &ScreenShell {
        &self.shell
    }

    pub async fn initialize(&mut self) -> PageLoad {
        info!("auth screen loaded");
        if let Some(token) = self.shell.session().token() {
            match self.shell.api().user_info(&token).await {
                Ok(_) => {
                    info!("existing session is valid");
                    self.shell.navigate(Route::Basic);
                    return PageLoad::Redirected(Route::Basic);
                }
                Err(err) => {
                    info!(error = %err, "discarding stale session");
                    self.shell.session().clear_token();
                }
            }
        }
        self.shell.browser().focus(Field::RegisterUsername);
        PageLoad::Ready
    }

    pub async fn register(&self, form: &RegistrationForm) -> Outcome<RegisterResponse> {
        let browser = self.shell.browser();
        let form = match form.validate() {
            Ok(form) => form,
            Err(err) => {
                browser.show_message(&err.to_string(), MessageKind::Error);
                browser.focus(err.field(false));
                return Outcome::Invalid(err);
            }
        };

        info!(username = %form.username, "registering");
        let request = RegisterRequest {
            username: form.username.clone(),
            password: form.password.clone(),
            name: form.username.clone(),
            email: form.email.clone(),
        };
        self.shell.set_loading(true);
        let result = self.shell.api().register(&request).await;
        self.shell.set_loading(false);

        match result {
            Ok(response) => {
                browser.show_message(messages::REGISTER_OK, MessageKind::Success);
                browser.reset_register_form();
                browser.set_value(Field::LoginUsername, &form.username);
                browser.focus(Field::LoginPassword);
                Outcome::Done(response)
            }
            Err(err) => {
                error!(error = %err, "registration failed");
                browser.show_message(
                    &err.user_message(messages::REGISTER_FALLBACK),
                    MessageKind::Error,
                );
                Outcome::Failed(err)
            }
        }
    }

    pub async fn login(&self, form: &LoginForm) -> Outcome<SessionToken> {
        let browser = self.shell.browser();
        let form = match form.validate() {
            Ok(form) => form,
            Err(err) => {
                browser.show_message(&err.to_string(), MessageKind::Error);
                browser.focus(err.field(true));
                return Outcome::Invalid(err);
            }
        };

        info!(username = %form.username, "logging in");
        let request = LoginRequest {
            username: form.username,
            password: form.password,
        };
        self.shell.set_loading(true);
        let result = self.shell.api().login(&request).await;
        self.shell.set_loading(false);

        match result {
            Ok(response) => {
                let token = SessionToken::new(response.session_id);
                self.shell.session().set_token(&token);
                browser.show_message(messages::LOGIN_OK, MessageKind::Success);
                self.shell.navigate(Route::Basic);
                Outcome::Done(token)
            }
            Err(err) => {
                error!(error = %err, "login failed");
                browser.show_message(
                    &err.user_message(messages::LOGIN_FALLBACK),
                    MessageKind::Error,
                );
                Outcome::Failed(err)
            }
        }
    }
}
