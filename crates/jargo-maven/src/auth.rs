//! Repository credentials from `Jargo.toml`.
//!
//! ```toml
//! [repositories]
//! private = { url = "https://nexus.example.com/maven", username = "ci", password = "..." }
//! tokens = { url = "https://maven.example.com", password = "<token>" }
//! ```
//!
//! A password without a username is sent as a bearer token.

use reqwest::blocking::RequestBuilder;

use crate::repository::MavenRepository;

/// How requests to a repository authenticate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credentials<'a> {
    Anonymous,
    Basic {
        username: &'a str,
        password: Option<&'a str>,
    },
    Bearer(&'a str),
}

impl<'a> Credentials<'a> {
    pub fn of(repo: &'a MavenRepository) -> Self {
        match (repo.username.as_deref(), repo.password.as_deref()) {
            (Some(username), password) => Credentials::Basic { username, password },
            (None, Some(token)) => Credentials::Bearer(token),
            (None, None) => Credentials::Anonymous,
        }
    }

    pub fn apply(self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Credentials::Anonymous => request,
            Credentials::Basic { username, password } => request.basic_auth(username, password),
            Credentials::Bearer(token) => request.bearer_auth(token),
        }
    }
}
