// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error type for infrastructure failures.
//!
//! Validation outcomes are plain values (`bool`, `Option`, [`ValidationErrors`])
//! and never flow through this type.
//!
//! [`ValidationErrors`]: crate::domain::payment::ValidationErrors

use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Cli(String),
    InvalidLogin(LoginError),
}

/// Reasons a login attempt is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginError {
    /// The user name is empty or whitespace only.
    EmptyUser,
    /// Someone is already logged in; log out first.
    AlreadyLoggedIn,
}

impl LoginError {
    /// Returns the i18n message key for this error.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            LoginError::EmptyUser => "error-login-empty-user",
            LoginError::AlreadyLoggedIn => "error-login-already-logged-in",
        }
    }
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginError::EmptyUser => write!(f, "user name must not be empty"),
            LoginError::AlreadyLoggedIn => write!(f, "a user is already logged in"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Cli(e) => write!(f, "Usage Error: {}", e),
            Error::InvalidLogin(e) => write!(f, "Login Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<pico_args::Error> for Error {
    fn from(err: pico_args::Error) -> Self {
        Error::Cli(err.to_string())
    }
}

impl From<LoginError> for Error {
    fn from(err: LoginError) -> Self {
        Error::InvalidLogin(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn io_error_converts_with_message() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "settings.toml").into();
        assert!(matches!(err, Error::Io(ref msg) if msg.contains("settings.toml")));
    }

    #[test]
    fn display_prefixes_category() {
        assert_eq!(
            Error::Config("bad value".into()).to_string(),
            "Config Error: bad value"
        );
        assert_eq!(
            Error::from(LoginError::EmptyUser).to_string(),
            "Login Error: user name must not be empty"
        );
    }

    #[test]
    fn login_errors_have_distinct_keys() {
        assert_ne!(
            LoginError::EmptyUser.i18n_key(),
            LoginError::AlreadyLoggedIn.i18n_key()
        );
    }
}
