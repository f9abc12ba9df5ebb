//! Outbound HTTP client shared by all calls to peer services.

use crate::config::HttpClientConfig;

/// Build a `reqwest::Client` with the configured connect and read timeouts.
pub fn build_http_client(config: &HttpClientConfig) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .connect_timeout(config.connect_timeout)
        .read_timeout(config.read_timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn builds_with_default_timeouts() {
        assert!(build_http_client(&HttpClientConfig::default()).is_ok());
    }

    #[test]
    fn builds_with_custom_timeouts() {
        let config = HttpClientConfig {
            connect_timeout: Duration::from_millis(250),
            read_timeout: Duration::from_millis(1_500),
        };
        assert!(build_http_client(&config).is_ok());
    }
}
