//! Login tasks

use action_flow::Task;
use action_primitives::{Click, Enter, Open};
use actor_core::ScreenplayError;

use crate::pages::LoginPage;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin";

/// Open the site, fill in the credentials and submit the form.
pub struct LoginTask;

impl LoginTask {
    pub const NAME: &'static str = "log in";

    pub fn as_admin() -> Result<Task, ScreenplayError> {
        Self::with_credentials(ADMIN_USERNAME, ADMIN_PASSWORD)
    }

    /// Fails with `InvalidTaskParameters` when either credential is blank.
    pub fn with_credentials(username: &str, password: &str) -> Result<Task, ScreenplayError> {
        credentials(Self::NAME, username, password)
            .describe_as(format!("logs in with username {}", username))
            .then(Open::home())
            .then(Enter::the_value(username).into(LoginPage::username_field()))
            .then(
                Enter::the_value(password)
                    .into(LoginPage::password_field())
                    .sensitive(),
            )
            .then(Click::on(LoginPage::login_button()))
            .build()
    }
}

/// Login with the optional remember-me checkbox.
pub struct AdvancedLoginTask;

impl AdvancedLoginTask {
    pub const NAME: &'static str = "log in (advanced)";

    pub fn as_admin() -> Result<Task, ScreenplayError> {
        Self::build(ADMIN_USERNAME, ADMIN_PASSWORD, false)
    }

    pub fn as_user(username: &str, password: &str) -> Result<Task, ScreenplayError> {
        Self::build(username, password, false)
    }

    pub fn with_remember_me(username: &str, password: &str) -> Result<Task, ScreenplayError> {
        Self::build(username, password, true)
    }

    /// The checkbox click is part of the task only when `remember_me` is set.
    pub fn build(username: &str, password: &str, remember_me: bool) -> Result<Task, ScreenplayError> {
        credentials(Self::NAME, username, password)
            .describe_as(format!(
                "performs advanced login with username {} (remember me: {})",
                username, remember_me
            ))
            .then(Open::home())
            .then(Enter::the_value(username).into(LoginPage::username_field()))
            .then(
                Enter::the_value(password)
                    .into(LoginPage::password_field())
                    .sensitive(),
            )
            .then_if(remember_me, Click::on(LoginPage::remember_me_checkbox()))
            .then(Click::on(LoginPage::login_button()))
            .build()
    }
}

fn credentials(task: &str, username: &str, password: &str) -> action_flow::TaskBuilder {
    Task::named(task)
        .require(!username.trim().is_empty(), "username must not be empty")
        .require(!password.is_empty(), "password must not be empty")
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_core::FailureKind;

    #[test]
    fn admin_login_outline() {
        let task = LoginTask::as_admin().unwrap();
        assert_eq!(
            task.outline(),
            vec![
                "opens /",
                "enters \"admin\" into the username field",
                "enters \"****\" into the password field",
                "clicks on the login button",
            ]
        );
    }

    #[test]
    fn blank_credentials_are_rejected() {
        let err = LoginTask::with_credentials("", "secret").unwrap_err();
        assert_eq!(err.kind(), FailureKind::InvalidTaskParameters);
        let err = LoginTask::with_credentials("admin", "").unwrap_err();
        assert!(err.to_string().contains("password must not be empty"));
    }

    #[test]
    fn remember_me_adds_the_checkbox_click() {
        let plain = AdvancedLoginTask::as_user("jose", "pw").unwrap();
        let remembered = AdvancedLoginTask::with_remember_me("jose", "pw").unwrap();
        assert_eq!(plain.len(), 4);
        assert_eq!(remembered.len(), 5);
        assert_eq!(remembered.outline()[3], "clicks on the remember me checkbox");
    }
}
