//! Render supervisor isolating a failing subtree.
//!
//! An [`ErrorBoundary`] runs a render closure. A returned error or a panic
//! inside the closure switches the boundary to its fallback view for the
//! rest of its lifetime. Only failures raised while rendering are caught;
//! event handlers and async callbacks are not covered.
//!
//! A failure is written once to the logger. For panics the process panic
//! hook has already run by the time the boundary catches the payload, so
//! the hook's own stderr output is not suppressed.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;

use curricula_core::traits::sink::{Channel, LogRecord};

use crate::logger::{Logger, trace_text};

/// Fallback view shown in place of a failed subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FallbackView {
    pub title: &'static str,
    pub body: &'static str,
}

impl Default for FallbackView {
    fn default() -> Self {
        Self {
            title: "Oops! Something went wrong.",
            body: "We're sorry for the inconvenience. Please try refreshing the page.",
        }
    }
}

/// Result of [`ErrorBoundary::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered<T> {
    /// The subtree rendered normally.
    Children(T),
    /// The boundary has failed.
    Fallback(FallbackView),
}

impl<T> Rendered<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Boundary lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryState {
    Normal,
    Failed,
}

/// Where a render failure happened.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderInfo {
    pub boundary: String,
    pub component_stack: Vec<String>,
}

/// Render supervisor with one-way `Normal -> Failed` transition.
///
/// There is no reset: build a new boundary to render the subtree again.
#[derive(Debug)]
pub struct ErrorBoundary {
    label: String,
    state: BoundaryState,
    fallback: FallbackView,
    logger: Logger,
}

impl ErrorBoundary {
    pub fn new(label: impl Into<String>, logger: Logger) -> Self {
        Self {
            label: label.into(),
            state: BoundaryState::Normal,
            fallback: FallbackView::default(),
            logger,
        }
    }

    /// Replaces the default fallback view.
    pub fn with_fallback(mut self, fallback: FallbackView) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn state(&self) -> BoundaryState {
        self.state
    }

    /// Renders `component` through `children`, or the fallback once failed.
    ///
    /// After a failure `children` is never invoked again.
    pub fn render<T, E, F>(&mut self, component: &str, children: F) -> Rendered<T>
    where
        F: FnOnce() -> Result<T, E>,
        E: std::error::Error + 'static,
    {
        if self.state == BoundaryState::Failed {
            return Rendered::Fallback(self.fallback);
        }

        let failure = match panic::catch_unwind(AssertUnwindSafe(children)) {
            Ok(Ok(view)) => return Rendered::Children(view),
            Ok(Err(err)) => LogRecord::new("Uncaught error:")
                .with_subject(err.to_string())
                .with_stack(trace_text(&err)),
            Err(payload) => {
                LogRecord::new("Uncaught error:").with_subject(panic_payload_text(payload.as_ref()))
            }
        };

        self.state = BoundaryState::Failed;
        let info = RenderInfo {
            boundary: self.label.clone(),
            component_stack: vec![component.to_string(), self.label.clone()],
        };
        let record = match serde_json::to_value(&info) {
            Ok(info) => failure.with_payload(info),
            Err(_) => failure,
        };
        self.logger.emit(Channel::Error, record);

        Rendered::Fallback(self.fallback)
    }
}

/// Text of a panic payload; `panic!` produces `&str` or `String` payloads.
pub fn panic_payload_text(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "<opaque panic payload>".to_string()
    }
}
