//! Request/render orchestration for one idea form.
//!
//! An [`IdeaForm`] owns the state one form instance would hold on screen:
//! its inputs, the last raw result, the last error text and the busy flag.
//! It is created per form and dropped with it; nothing is shared.

use crate::api::{BoostRequest, GenerateRequest, Style};
use crate::client::Backend;
use crate::{Error, Result};
use log::{debug, warn};
use std::sync::Arc;

type OnBusyHandler = Arc<dyn Fn(bool) + Send + Sync>;

/// Snapshot of what the form currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormView {
    /// A request is in flight and the submit controls are disabled
    pub busy: bool,
    /// Error text, if the last submission failed
    pub error: Option<String>,
    /// Rendered HTML of the last result; empty when there is none
    pub html: String,
    pub can_boost: bool,
    pub can_generate: bool,
}

/// A single idea form bound to a backend.
pub struct IdeaForm<B: Backend> {
    backend: B,
    idea: String,
    domain: String,
    keywords: String,
    style: Style,
    result: Option<String>,
    error: Option<String>,
    busy: bool,
    on_busy: Option<OnBusyHandler>,
}

impl<B: Backend> IdeaForm<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            idea: String::new(),
            domain: String::new(),
            keywords: String::new(),
            style: Style::default(),
            result: None,
            error: None,
            busy: false,
            on_busy: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn set_idea(&mut self, idea: impl Into<String>) {
        self.idea = idea.into();
    }

    pub fn set_domain(&mut self, domain: impl Into<String>) {
        self.domain = domain.into();
    }

    pub fn set_keywords(&mut self, keywords: impl Into<String>) {
        self.keywords = keywords.into();
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    pub fn idea(&self) -> &str {
        &self.idea
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn keywords(&self) -> &str {
        &self.keywords
    }

    pub fn style(&self) -> Style {
        self.style
    }

    /// Raw text of the last successful submission
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Register a callback fired whenever the busy flag flips.
    pub fn on_busy<F>(&mut self, cb: F)
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.on_busy = Some(Arc::new(cb));
    }

    pub fn clear_on_busy(&mut self) {
        self.on_busy = None;
    }

    pub fn can_boost(&self) -> bool {
        !self.busy && !self.idea.trim().is_empty()
    }

    pub fn can_generate(&self) -> bool {
        !self.busy && !self.domain.trim().is_empty()
    }

    /// Send the idea to `/boost` and keep the returned text.
    ///
    /// A blank idea is rejected before anything is sent and leaves the
    /// displayed state untouched.
    pub fn submit_boost(&mut self) -> Result<String> {
        if self.busy {
            return Err(Error::Busy);
        }
        let request = BoostRequest::new(self.idea.clone());
        request.validate()?;

        self.begin("boost");
        let outcome = self.backend.boost(&request);
        self.settle(outcome)
    }

    /// Send domain/keywords/style to `/generate` and keep the returned text.
    pub fn submit_generate(&mut self) -> Result<String> {
        if self.busy {
            return Err(Error::Busy);
        }
        let request = GenerateRequest::new(self.domain.clone())
            .keywords(self.keywords.clone())
            .style(self.style);
        request.validate()?;

        self.begin("generate");
        let outcome = self.backend.generate(&request);
        self.settle(outcome)
    }

    /// Reset inputs, result and error.
    pub fn clear(&mut self) {
        self.idea.clear();
        self.domain.clear();
        self.keywords.clear();
        self.style = Style::default();
        self.result = None;
        self.error = None;
    }

    pub fn view(&self) -> FormView {
        FormView {
            busy: self.busy,
            error: self.error.clone(),
            html: crate::render(self.result.as_deref()),
            can_boost: self.can_boost(),
            can_generate: self.can_generate(),
        }
    }

    fn begin(&mut self, what: &str) {
        debug!("submitting {}", what);
        self.error = None;
        self.result = None;
        self.set_busy(true);
    }

    // Busy is cleared on every path before the outcome is stored.
    fn settle(&mut self, outcome: Result<String>) -> Result<String> {
        self.set_busy(false);
        match outcome {
            Ok(text) => {
                debug!("submission settled with {} bytes", text.len());
                self.result = Some(text.clone());
                Ok(text)
            }
            Err(err) => {
                warn!("submission failed: {}", err);
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
        if let Some(cb) = &self.on_busy {
            cb(busy);
        }
    }
}
