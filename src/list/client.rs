use anyhow::{Context, Result};
use std::time::Duration;

/// Build the HTTP client shared by every document fetch.
///
/// The request timeout bounds how long a hung fetch can hold up the fan-in
/// barrier; there is no retry, a timed-out fetch is terminal for its item.
pub fn create_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("demonboard/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to create HTTP client")
}
