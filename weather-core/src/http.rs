use anyhow::{Context, Result};
use reqwest::Client;

use crate::Config;

/// Shared HTTP client honouring the configured user agent and timeout.
pub fn client(config: &Config) -> Result<Client> {
    let mut builder = Client::builder().user_agent(config.user_agent.as_str());
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }

    builder.build().context("Failed to build HTTP client")
}

pub(crate) fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
