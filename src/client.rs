//! Request client for the CreativeFuse backend.
//!
//! [`Backend`] is the seam the form and the async facade talk to.
//! [`HttpBackend`] is the real implementation: one blocking `reqwest` call
//! per submission, no retries.

use crate::api::{BoostRequest, GenerateRequest};
#[cfg(feature = "http")]
use crate::api::{BoostResponse, ErrorBody, IdeaResponse, RootResponse};
use crate::{Error, Result};
#[cfg(feature = "http")]
use crate::ClientConfig;

#[cfg(feature = "http")]
use log::{debug, warn};
#[cfg(feature = "http")]
use reqwest::blocking::Client;
#[cfg(feature = "http")]
use std::time::Duration;
#[cfg(feature = "http")]
use url::Url;

/// Fallback shown when `/generate` fails without a `detail`
pub const GENERATE_FAILED: &str = "Failed to generate idea";
/// Fallback shown when `/boost` fails without a `detail`
pub const BOOST_FAILED: &str = "Failed to enhance idea";

/// Something that can turn a submission into raw idea text.
pub trait Backend {
    /// `POST /generate`; returns the generated idea text
    fn generate(&self, request: &GenerateRequest) -> Result<String>;

    /// `POST /boost`; returns the boosted idea text
    fn boost(&self, request: &BoostRequest) -> Result<String>;

    /// `GET /`; returns the backend's welcome message
    fn ping(&self) -> Result<String> {
        Err(Error::Other("ping is not supported by this backend".into()))
    }
}

/// HTTP backend over a blocking `reqwest` client.
#[cfg(feature = "http")]
pub struct HttpBackend {
    client: Client,
    base: Url,
    timeout_ms: u64,
}

#[cfg(feature = "http")]
impl HttpBackend {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut base = Url::parse(&config.base_url)?;
        if base.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "'{}' cannot be used as a base URL",
                config.base_url
            )));
        }
        // Url::join replaces the last path segment unless the path ends in '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if config.timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(config.timeout_ms));
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base,
            timeout_ms: config.timeout_ms,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base.join(path)?)
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout(self.timeout_ms)
        } else {
            Error::from(err)
        }
    }

    fn post_json<T, R>(&self, path: &str, body: &T, fallback: &str) -> Result<R>
    where
        T: serde::Serialize + ?Sized,
        R: serde::de::DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        debug!("POST {}", url);
        let response = self
            .client
            .post(url.clone())
            .json(body)
            .send()
            .map_err(|e| self.transport_error(e))?;
        self.decode(url, response, fallback)
    }

    fn decode<R>(&self, url: Url, response: reqwest::blocking::Response, fallback: &str) -> Result<R>
    where
        R: serde::de::DeserializeOwned,
    {
        let status = response.status();
        if status.is_success() {
            debug!("{} answered {}", url, status);
            return response.json::<R>().map_err(|e| match self.transport_error(e) {
                Error::Network(msg) => Error::Decode(msg),
                other => other,
            });
        }

        let detail = response
            .json::<ErrorBody>()
            .ok()
            .and_then(|body| body.detail)
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());
        warn!("{} answered {}: {}", url, status, detail);
        Err(Error::Server {
            status: status.as_u16(),
            detail,
        })
    }
}

#[cfg(feature = "http")]
impl Backend for HttpBackend {
    fn generate(&self, request: &GenerateRequest) -> Result<String> {
        request.validate()?;
        let res: IdeaResponse = self.post_json("generate", request, GENERATE_FAILED)?;
        Ok(res.idea)
    }

    fn boost(&self, request: &BoostRequest) -> Result<String> {
        request.validate()?;
        let res: BoostResponse = self.post_json("boost", request, BOOST_FAILED)?;
        Ok(res.boosted_idea)
    }

    fn ping(&self) -> Result<String> {
        let url = self.endpoint("")?;
        debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| self.transport_error(e))?;
        let res: RootResponse = self.decode(url, response, "Backend is not healthy")?;
        Ok(res.message)
    }
}
