//! HTTP client construction and endpoint addressing

use reqwest::Client;
use url::Url;

use crate::{Error, Result, config::ClientSettings};

/// Build the HTTP client for the submitter
pub fn build_client(settings: &ClientSettings) -> Result<Client> {
    let mut client_builder = Client::builder().user_agent(settings.user_agent.as_str());

    if let Some(timeout) = settings.timeout() {
        client_builder = client_builder.timeout(timeout);
    }

    Ok(client_builder.build()?)
}

/// `{base}/api/{gid}/config`
///
/// The gid is appended as one path segment, so `/`, `?`, `#` and friends
/// are percent-encoded rather than changing the route.
pub fn config_endpoint(base: &Url, gid: &str) -> Result<Url> {
    if gid.is_empty() {
        return Err(Error::config("gid", "Guild id cannot be empty"));
    }

    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|_| {
            Error::config(
                "base_url".to_string(),
                format!("'{}' cannot be used as a base URL", base),
            )
        })?
        .pop_if_empty()
        .extend(["api", gid, "config"]);

    Ok(url)
}
