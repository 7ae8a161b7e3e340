use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern compiles"));

pub fn valid_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthTab {
    #[default]
    Login,
    Register,
    Forgot,
}

impl AuthTab {
    pub fn title(&self) -> &'static str {
        match self {
            AuthTab::Login => "Sign in to your account",
            AuthTab::Register => "Create an account",
            AuthTab::Forgot => "Reset your password",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            AuthTab::Login => "Enter your credentials to access your account",
            AuthTab::Register => "Fill in the form to create your account",
            AuthTab::Forgot => "We'll send you instructions to reset your password",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthField {
    LoginEmail,
    LoginPassword,
    RegisterName,
    RegisterEmail,
    RegisterPassword,
    RegisterConfirm,
    ForgotEmail,
}

impl AuthField {
    pub fn label(&self) -> &'static str {
        match self {
            AuthField::LoginEmail | AuthField::RegisterEmail | AuthField::ForgotEmail => "Email",
            AuthField::LoginPassword | AuthField::RegisterPassword => "Password",
            AuthField::RegisterName => "Full Name",
            AuthField::RegisterConfirm => "Confirm Password",
        }
    }

    pub fn is_secret(&self) -> bool {
        matches!(
            self,
            AuthField::LoginPassword | AuthField::RegisterPassword | AuthField::RegisterConfirm
        )
    }
}

pub fn validate_login(email: &str, password: &str) -> Vec<(AuthField, &'static str)> {
    let mut errors = Vec::new();
    if email.is_empty() {
        errors.push((AuthField::LoginEmail, "Email is required"));
    } else if !valid_email(email) {
        errors.push((AuthField::LoginEmail, "Email is invalid"));
    }
    if password.is_empty() {
        errors.push((AuthField::LoginPassword, "Password is required"));
    }
    errors
}

pub fn validate_register(
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Vec<(AuthField, &'static str)> {
    let mut errors = Vec::new();
    if name.is_empty() {
        errors.push((AuthField::RegisterName, "Name is required"));
    }
    if email.is_empty() {
        errors.push((AuthField::RegisterEmail, "Email is required"));
    } else if !valid_email(email) {
        errors.push((AuthField::RegisterEmail, "Email is invalid"));
    }
    if password.is_empty() {
        errors.push((AuthField::RegisterPassword, "Password is required"));
    } else if password.chars().count() < 8 {
        errors.push((
            AuthField::RegisterPassword,
            "Password must be at least 8 characters",
        ));
    }
    if confirm.is_empty() {
        errors.push((AuthField::RegisterConfirm, "Please confirm your password"));
    } else if password != confirm {
        errors.push((AuthField::RegisterConfirm, "Passwords do not match"));
    }
    errors
}

pub fn validate_forgot(email: &str) -> Vec<(AuthField, &'static str)> {
    let mut errors = Vec::new();
    if email.is_empty() {
        errors.push((AuthField::ForgotEmail, "Email is required"));
    } else if !valid_email(email) {
        errors.push((AuthField::ForgotEmail, "Email is invalid"));
    }
    errors
}

/// Account screen state. Each tab keeps its own draft fields; errors hold
/// the outcome of the last submit attempt on the active tab.
#[derive(Debug, Default)]
pub struct LoginScreen {
    pub tab: AuthTab,
    pub focus: usize,
    pub login_email: String,
    pub login_password: String,
    pub register_name: String,
    pub register_email: String,
    pub register_password: String,
    pub register_confirm: String,
    pub forgot_email: String,
    pub errors: HashMap<AuthField, &'static str>,
}

impl LoginScreen {
    pub fn fields(&self) -> &'static [AuthField] {
        match self.tab {
            AuthTab::Login => &[AuthField::LoginEmail, AuthField::LoginPassword],
            AuthTab::Register => &[
                AuthField::RegisterName,
                AuthField::RegisterEmail,
                AuthField::RegisterPassword,
                AuthField::RegisterConfirm,
            ],
            AuthTab::Forgot => &[AuthField::ForgotEmail],
        }
    }

    pub fn focused_field(&self) -> AuthField {
        let fields = self.fields();
        fields[self.focus.min(fields.len() - 1)]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields().len();
    }

    pub fn focus_prev(&mut self) {
        let len = self.fields().len();
        self.focus = (self.focus + len - 1) % len;
    }

    pub fn switch_tab(&mut self, tab: AuthTab) {
        self.tab = tab;
        self.focus = 0;
        self.errors.clear();
    }

    pub fn value(&self, field: AuthField) -> &str {
        match field {
            AuthField::LoginEmail => &self.login_email,
            AuthField::LoginPassword => &self.login_password,
            AuthField::RegisterName => &self.register_name,
            AuthField::RegisterEmail => &self.register_email,
            AuthField::RegisterPassword => &self.register_password,
            AuthField::RegisterConfirm => &self.register_confirm,
            AuthField::ForgotEmail => &self.forgot_email,
        }
    }

    pub fn value_mut(&mut self, field: AuthField) -> &mut String {
        match field {
            AuthField::LoginEmail => &mut self.login_email,
            AuthField::LoginPassword => &mut self.login_password,
            AuthField::RegisterName => &mut self.register_name,
            AuthField::RegisterEmail => &mut self.register_email,
            AuthField::RegisterPassword => &mut self.register_password,
            AuthField::RegisterConfirm => &mut self.register_confirm,
            AuthField::ForgotEmail => &mut self.forgot_email,
        }
    }

    /// Validate the active tab, storing per-field errors. True when clean.
    pub fn validate_active(&mut self) -> bool {
        let errors = match self.tab {
            AuthTab::Login => validate_login(&self.login_email, &self.login_password),
            AuthTab::Register => validate_register(
                &self.register_name,
                &self.register_email,
                &self.register_password,
                &self.register_confirm,
            ),
            AuthTab::Forgot => validate_forgot(&self.forgot_email),
        };
        self.errors = errors.into_iter().collect();
        self.errors.is_empty()
    }

    /// After a successful registration: land on the login tab with the new
    /// email pre-filled.
    pub fn register_succeeded(&mut self) {
        self.login_email = self.register_email.clone();
        self.login_password.clear();
        self.switch_tab(AuthTab::Login);
    }

    pub fn forgot_succeeded(&mut self) {
        self.switch_tab(AuthTab::Login);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_format() {
        assert!(valid_email("name@example.com"));
        assert!(valid_email("a@b.co"));
        assert!(!valid_email("name@example"));
        assert!(!valid_email("name example.com"));
        assert!(!valid_email(""));
    }

    #[test]
    fn test_login_validation() {
        assert!(validate_login("name@example.com", "hunter2").is_empty());
        assert_eq!(
            validate_login("", ""),
            vec![
                (AuthField::LoginEmail, "Email is required"),
                (AuthField::LoginPassword, "Password is required"),
            ]
        );
        assert_eq!(
            validate_login("bogus", "pw"),
            vec![(AuthField::LoginEmail, "Email is invalid")]
        );
    }

    #[test]
    fn test_register_validation() {
        assert!(validate_register("Jane", "jane@example.com", "longenough", "longenough").is_empty());

        let errors = validate_register("", "", "", "");
        assert_eq!(errors.len(), 4);

        assert_eq!(
            validate_register("Jane", "jane@example.com", "short", "short"),
            vec![(
                AuthField::RegisterPassword,
                "Password must be at least 8 characters"
            )]
        );
        assert_eq!(
            validate_register("Jane", "jane@example.com", "longenough", "different"),
            vec![(AuthField::RegisterConfirm, "Passwords do not match")]
        );
    }

    #[test]
    fn test_register_success_prefills_login_email() {
        let mut screen = LoginScreen::default();
        screen.switch_tab(AuthTab::Register);
        screen.register_email = "new@example.com".to_string();
        screen.register_password = "longenough".to_string();

        screen.register_succeeded();

        assert_eq!(screen.tab, AuthTab::Login);
        assert_eq!(screen.login_email, "new@example.com");
        assert!(screen.login_password.is_empty());
    }

    #[test]
    fn test_focus_wraps_per_tab() {
        let mut screen = LoginScreen::default();
        assert_eq!(screen.focused_field(), AuthField::LoginEmail);
        screen.focus_next();
        assert_eq!(screen.focused_field(), AuthField::LoginPassword);
        screen.focus_next();
        assert_eq!(screen.focused_field(), AuthField::LoginEmail);
        screen.focus_prev();
        assert_eq!(screen.focused_field(), AuthField::LoginPassword);
    }

    #[test]
    fn test_switch_tab_resets_focus_and_errors() {
        let mut screen = LoginScreen::default();
        screen.validate_active();
        assert!(!screen.errors.is_empty());
        screen.focus_next();

        screen.switch_tab(AuthTab::Forgot);
        assert_eq!(screen.focus, 0);
        assert!(screen.errors.is_empty());
        assert_eq!(screen.fields(), &[AuthField::ForgotEmail]);
    }
}
