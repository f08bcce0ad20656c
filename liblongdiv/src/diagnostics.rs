//! Structured diagnostics for conversion inputs.
//!
//! liblongdiv never prints. Failures of a conversion are described by [Diagnostic]s, which front
//! ends (the `longdiv` CLI, a web renderer) present however they like.

use crate::common::Span;
use crate::errors::ConversionDiagnostics;

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::Serialize;

/// A record of a diagnostic code and its long-form explanation.
pub(crate) trait DiagnosticRecord {
    const CODE: &'static str;
    const EXPLANATION: &'static str;
}

/// A collection of [DiagnosticRecord]s.
pub(crate) trait DiagnosticRegistry {
    fn codes_with_explanations() -> Vec<(&'static str, &'static str)>;
}

/// The kind of a diagnostic.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum DiagnosticKind {
    /// An error diagnostic. The conversion produced no result.
    Error,
    /// A warning diagnostic. The conversion produced a result, but the result may not be what the
    /// user expects; for example, a decimal expansion cut off at the digit budget.
    Warning,
    /// A generic annotation, usually expanding on a primary diagnostic.
    Note,
    /// Instructs the user how their input can be changed to be accepted.
    Help,
}

/// A secondary diagnostic associated with a primary [Diagnostic].
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Clone, Debug)]
pub struct AssociatedDiagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
    pub msg: String,
}

/// A diagnostic for a conversion input.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub code: Option<&'static str>,
    pub span: Span,
    pub title: String,
    pub msg: Option<String>,
    pub associated_diagnostics: Vec<AssociatedDiagnostic>,
    pub unspanned_associated_diagnostics: Vec<AssociatedDiagnostic>,
}

impl Diagnostic {
    /// Returns all diagnostic codes and their explanations.
    pub fn all_codes_with_explanations() -> HashMap<&'static str, String> {
        ConversionDiagnostics::codes_with_explanations()
            .into_iter()
            .map(|(code, explanation)| (code, explanation.to_owned()))
            .collect()
    }

    fn new<S, M, N>(
        kind: DiagnosticKind,
        span: S,
        title: M,
        code: &'static str,
        msg: N,
    ) -> Diagnostic
    where
        S: Into<Span>,
        M: Into<String>,
        N: Into<Option<String>>,
    {
        Diagnostic {
            kind,
            code: Some(code),
            span: span.into(),
            title: title.into(),
            msg: msg.into(),
            associated_diagnostics: Vec::with_capacity(2),
            unspanned_associated_diagnostics: Vec::with_capacity(2),
        }
    }

    /// Creates an error diagnostic at a span.
    pub(crate) fn span_err<S, M, N>(span: S, title: M, code: &'static str, msg: N) -> Diagnostic
    where
        S: Into<Span>,
        M: Into<String>,
        N: Into<Option<String>>,
    {
        Self::new(DiagnosticKind::Error, span, title, code, msg)
    }

    /// Creates a warning diagnostic at a span.
    pub(crate) fn span_warn<S, M, N>(span: S, title: M, code: &'static str, msg: N) -> Diagnostic
    where
        S: Into<Span>,
        M: Into<String>,
        N: Into<Option<String>>,
    {
        Self::new(DiagnosticKind::Warning, span, title, code, msg)
    }

    /// Adds a note to the diagnostic.
    pub(crate) fn with_note<M>(mut self, note: M) -> Diagnostic
    where
        M: Into<String>,
    {
        self.unspanned_associated_diagnostics
            .push(AssociatedDiagnostic {
                kind: DiagnosticKind::Note,
                span: self.span,
                msg: note.into(),
            });
        self
    }

    /// Adds a help message to the diagnostic.
    pub(crate) fn with_help<M>(mut self, note: M) -> Diagnostic
    where
        M: Into<String>,
    {
        self.unspanned_associated_diagnostics
            .push(AssociatedDiagnostic {
                kind: DiagnosticKind::Help,
                span: self.span,
                msg: note.into(),
            });
        self
    }

    /// Whether this diagnostic prevents a conversion result from being produced.
    pub fn is_fatal(&self) -> bool {
        self.kind == DiagnosticKind::Error
    }
}
