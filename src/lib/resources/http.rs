//! Module for fetching remote images over HTTP.

use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;

use crate::model::DEFAULT_HTTP_TIMEOUT;
use super::Loader;


/// Error while fetching a remote resource.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request couldn't be completed at all.
    #[error("request to {url} failed: {error}")]
    Transport {
        url: String,
        #[source]
        error: reqwest::Error,
    },
    /// The server responded with a non-success status.
    #[error("{url} responded with HTTP {status}")]
    Status {
        url: String,
        status: u16,
    },
}

impl FetchError {
    /// URL that couldn't be fetched.
    pub fn url(&self) -> &str {
        match *self {
            FetchError::Transport{ref url, ..} => url,
            FetchError::Status{ref url, ..} => url,
        }
    }
}


/// Loader of raw bytes from HTTP(S) URLs.
///
/// Every `load` call performs a single blocking GET request.
#[derive(Clone, Debug)]
pub struct HttpLoader {
    client: Client,
}

impl HttpLoader {
    /// Create a loader with the default request timeout.
    #[inline]
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_timeout(DEFAULT_HTTP_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(HttpLoader{client})
    }
}

impl Loader for HttpLoader {
    type Item = Vec<u8>;
    type Err = FetchError;

    /// Fetch the response body from given URL.
    /// Any status other than 2xx is an error.
    fn load(&self, url: &str) -> Result<Self::Item, Self::Err> {
        debug!("Fetching {}", url);
        let transport_error = |error| FetchError::Transport{url: url.to_owned(), error};

        let response = self.client.get(url).send().map_err(transport_error)?;
        let status = response.status();
        if !status.is_success() {
            warn!("Fetching {} failed with HTTP {}", url, status);
            return Err(FetchError::Status{url: url.to_owned(), status: status.as_u16()});
        }

        let bytes = response.bytes().map_err(transport_error)?;
        trace!("Fetched {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}


#[cfg(test)]
mod tests {
    use crate::resources::Loader;
    use super::{FetchError, HttpLoader};

    #[test]
    fn status_error_message() {
        let error = FetchError::Status{url: "https://x/img.jpg".into(), status: 404};
        assert_eq!("https://x/img.jpg", error.url());
        assert_eq!("https://x/img.jpg responded with HTTP 404", error.to_string());
    }

    #[test]
    fn invalid_url_is_transport_error() {
        let loader = HttpLoader::new().unwrap();
        match loader.load("not a url") {
            Err(FetchError::Transport{url, ..}) => assert_eq!("not a url", url),
            other => panic!("expected a transport error, got {:?}", other),
        }
    }
}
