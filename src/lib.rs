//! CreativeFuse client
//!
//! Submits ideas to the CreativeFuse backend and renders the text it sends
//! back, which may use a small markdown subset.
//!
//! # Layout
//!
//! - [`rendering`]: the text renderer (raw text → structured markup → HTML)
//! - [`client`]: the `Backend` trait and the blocking HTTP backend
//! - [`form`]: one form's request/render state (busy, error, result)
//! - [`async_api`]: worker-backed async facade with timeout and cancellation
//!
//! # Example
//!
//! ```no_run
//! use creativefuse::{ClientConfig, HttpBackend, IdeaForm};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = HttpBackend::new(ClientConfig::default())?;
//! let mut form = IdeaForm::new(backend);
//! form.set_idea("A neighbourhood tool library");
//! form.submit_boost()?;
//! println!("{}", form.view().html);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod api;
pub mod async_api;
pub mod client;
pub mod form;
pub mod rendering;

pub use api::{BoostRequest, GenerateRequest, Style};
pub use async_api::{CancelToken, Studio};
pub use client::Backend;
#[cfg(feature = "http")]
pub use client::HttpBackend;
pub use form::{FormView, IdeaForm};
pub use rendering::{parse, render, Markup};

/// Default backend origin
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
/// Default per-request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Configuration for talking to the backend
///
/// # Examples
///
/// ```
/// let cfg = creativefuse::ClientConfig::default();
/// assert_eq!(cfg.base_url, "http://localhost:8000");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Origin the `/generate` and `/boost` endpoints live under
    pub base_url: String,
    /// User agent string to send with requests
    pub user_agent: String,
    /// Timeout per request in milliseconds; 0 disables it
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: format!("creativefuse/{}", env!("CARGO_PKG_VERSION")),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}
