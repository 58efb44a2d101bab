use std::fmt;

use thiserror::Error;

use crate::source::Location;

pub const ERROR_TAG: &str = "\x1b[31mERROR\x1b[0m";
pub const FRAME_TAG_OPEN: &str = "\x1b[33m";
pub const FRAME_TAG_CLOSE: &str = "\x1b[0m";

/// One level of call context, recorded as a failure unwinds through a
/// function invocation. Frames accumulate innermost-first.
#[derive(Clone, Debug)]
pub struct TraceFrame {
    pub function: String,
    pub fn_location: Location,
    pub call_site: Location,
}

#[derive(Clone, Debug, Default)]
pub struct ErrorContext {
    pub location: Option<Location>,
    pub stack: Vec<TraceFrame>,
}

impl ErrorContext {
    fn set_location(&mut self, location: Location) {
        if self.location.is_none() {
            self.location = Some(location);
        }
    }
}

#[derive(Clone, Debug)]
pub struct RuntimeErrorData {
    pub message: String,
    pub context: ErrorContext,
}

impl RuntimeErrorData {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }
}

impl fmt::Display for RuntimeErrorData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[derive(Error, Debug, Clone)]
pub enum LaurelError {
    #[error("unable to resolve symbol: {0}")]
    UnboundSymbol(RuntimeErrorData),

    #[error("arity mismatch: {0}")]
    Arity(RuntimeErrorData),

    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: String,
        actual: String,
        context: ErrorContext,
    },

    #[error("{0}")]
    Message(RuntimeErrorData),
}

impl LaurelError {
    pub fn unbound_symbol(message: impl Into<String>) -> Self {
        LaurelError::UnboundSymbol(RuntimeErrorData::new(message))
    }

    pub fn arity(message: impl Into<String>) -> Self {
        LaurelError::Arity(RuntimeErrorData::new(message))
    }

    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        LaurelError::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        LaurelError::Message(RuntimeErrorData::new(message))
    }

    /// Attaches the failure location; the first one attached wins, so
    /// outer re-decoration never clobbers the innermost span.
    pub fn with_location(mut self, location: Location) -> Self {
        self.context_mut().set_location(location);
        self
    }

    /// Appends one call frame as the failure unwinds outward.
    pub fn push_frame(mut self, frame: TraceFrame) -> Self {
        self.context_mut().stack.push(frame);
        self
    }

    pub fn location(&self) -> Option<&Location> {
        self.context_ref().location.as_ref()
    }

    pub fn stack(&self) -> &[TraceFrame] {
        &self.context_ref().stack
    }

    fn context_ref(&self) -> &ErrorContext {
        match self {
            LaurelError::UnboundSymbol(data)
            | LaurelError::Arity(data)
            | LaurelError::Message(data) => &data.context,
            LaurelError::TypeMismatch { context, .. } => context,
        }
    }

    fn context_mut(&mut self) -> &mut ErrorContext {
        match self {
            LaurelError::UnboundSymbol(data)
            | LaurelError::Arity(data)
            | LaurelError::Message(data) => &mut data.context,
            LaurelError::TypeMismatch { context, .. } => context,
        }
    }
}

/// Renders the error with its call-stack trace, one line per entry.
/// Frames come out innermost-first, each followed by an excerpt of the
/// callee's defining lines with one line of context on either side.
pub fn format_error(err: &LaurelError) -> Vec<String> {
    let mut lines = Vec::new();
    for (index, frame) in err.stack().iter().enumerate() {
        lines.push(format!(
            "{}{}: In function '{}' at '{}'{}",
            FRAME_TAG_OPEN,
            index,
            frame.function,
            frame.call_site.source.path(),
            FRAME_TAG_CLOSE,
        ));
        lines.extend(format_excerpt(&frame.fn_location));
    }
    lines.push(format!("{}: {}", ERROR_TAG, err));
    if let Some(location) = err.location() {
        lines.push(format!("At: {} to {}", location.start, location.end));
    }
    lines
}

fn format_excerpt(location: &Location) -> Vec<String> {
    let source = &location.source;
    let last = source.line_count();
    if last == 0 {
        return Vec::new();
    }
    let from = location.start_line().saturating_sub(1).max(1);
    let to = (location.end_line() + 1).min(last);
    let mut lines = Vec::new();
    for number in from..=to {
        if let Some(text) = source.line(number) {
            lines.push(format!("{}:\t{}", number, text));
        }
    }
    lines
}
