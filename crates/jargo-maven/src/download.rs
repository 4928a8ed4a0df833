//! Blocking downloads from Maven repositories.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;

use jargo_util::errors::JargoError;

use crate::auth;
use crate::repository::MavenRepository;

const RETRY_DELAY: Duration = Duration::from_secs(2);

/// HTTP client plus retry policy shared by every repository request.
#[derive(Debug, Clone)]
pub struct Downloader {
    client: Client,
    retries: u32,
}

impl Downloader {
    /// Build a client with the given request timeout. `retries` counts extra
    /// attempts after the first one for timeouts, connection failures and
    /// 5xx responses.
    pub fn new(timeout: Duration, retries: u32) -> miette::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("jargo/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| JargoError::Network {
                message: format!("Failed to create HTTP client: {e}"),
            })?;
        Ok(Self { client, retries })
    }

    /// Download raw bytes from a URL, with authentication and retries.
    ///
    /// Returns `Ok(None)` for 404 (not present in this repository).
    pub fn bytes(&self, repo: &MavenRepository, url: &str) -> miette::Result<Option<Vec<u8>>> {
        let attempts = self.retries + 1;
        let mut last_err = String::new();

        for attempt in 0..attempts {
            if attempt > 0 {
                std::thread::sleep(RETRY_DELAY * attempt);
                tracing::debug!("retrying {url} (attempt {})", attempt + 1);
            }

            let req = auth::Credentials::of(repo).apply(self.client.get(url));
            match req.send() {
                Ok(resp) => {
                    let status = resp.status();
                    if status == StatusCode::NOT_FOUND {
                        return Ok(None);
                    }
                    if status.is_server_error() {
                        last_err = format!("HTTP {status} from {url}");
                        continue;
                    }
                    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                        let why = if repo.has_auth() {
                            "rejected the configured credentials"
                        } else {
                            "requires credentials"
                        };
                        return Err(JargoError::Network {
                            message: format!("repository `{}` {why} (HTTP {status} for {url})", repo.name),
                        }
                        .into());
                    }
                    if !status.is_success() {
                        return Err(JargoError::Network {
                            message: format!("HTTP {status} fetching {url}"),
                        }
                        .into());
                    }
                    let bytes = resp.bytes().map_err(|e| JargoError::Network {
                        message: format!("Failed to read response from {url}: {e}"),
                    })?;
                    return Ok(Some(bytes.to_vec()));
                }
                Err(e) if e.is_timeout() || e.is_connect() => {
                    last_err = e.to_string();
                    continue;
                }
                Err(e) => {
                    return Err(JargoError::Network {
                        message: format!("Request to {url} failed: {e}"),
                    }
                    .into());
                }
            }
        }

        Err(JargoError::Network {
            message: format!("Failed after {attempts} attempts for {url}: {last_err}"),
        }
        .into())
    }

    /// Download a text file (POM, metadata).
    pub fn text(&self, repo: &MavenRepository, url: &str) -> miette::Result<Option<String>> {
        Ok(self
            .bytes(repo, url)?
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
    }
}
