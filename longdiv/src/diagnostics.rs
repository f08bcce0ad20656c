//! User-facing longdiv diagnostics.
//!
//! The diagnostics module demarshalls [liblongdiv diagnostics][liblongdiv::diagnostics] into a
//! form pleasant for standard output.

use liblongdiv::common::Span;
use liblongdiv::diagnostics::{AssociatedDiagnostic, Diagnostic, DiagnosticKind};

use annotate_snippets::{
    display_list::{DisplayList, FormatOptions},
    snippet::{Annotation, AnnotationType, Slice, Snippet, SourceAnnotation},
};

pub fn sanitize_source_for_diagnostics(source: &str) -> String {
    let source = source.to_owned();
    source + " " // an empty input is reported past its end, so add extra space.
}

pub fn emit_longdiv_diagnostics(
    file: Option<&str>,
    source: &str,
    diagnostics: &[Diagnostic],
    color: bool,
) -> String {
    if diagnostics.is_empty() {
        return String::new();
    }

    let last_i = diagnostics.len() - 1;
    let mut emitted_diagnostics = String::new();

    for (i, diagnostic) in diagnostics.iter().enumerate() {
        let main_annotation_type = convert_diagnostic_kind(&diagnostic.kind);
        let mut annotations = Vec::with_capacity(diagnostic.associated_diagnostics.len() + 1);
        // The first annotation always points to the input that raised this diagnostic.
        let label = diagnostic.msg.clone().unwrap_or_default();
        annotations.push(SourceAnnotation {
            label: &label,
            annotation_type: main_annotation_type,
            range: visible_range(diagnostic.span),
        });
        for associated_diagnostic in diagnostic.associated_diagnostics.iter() {
            annotations.push(SourceAnnotation {
                label: &associated_diagnostic.msg,
                annotation_type: convert_diagnostic_kind(&associated_diagnostic.kind),
                range: visible_range(associated_diagnostic.span),
            });
        }
        let footer = diagnostic
            .unspanned_associated_diagnostics
            .iter()
            .map(convert_associated_diagnostic)
            .collect();

        let snippet = Snippet {
            title: Some(Annotation {
                label: Some(&diagnostic.title),
                id: diagnostic.code,
                annotation_type: main_annotation_type,
            }),
            footer,
            slices: vec![Slice {
                source: &source,
                line_start: 1,
                origin: file,
                fold: true,
                annotations,
            }],
            opt: FormatOptions {
                color,
                ..Default::default()
            },
        };
        let suffix = if i != last_i { "\n" } else { "" };
        emitted_diagnostics.push_str(&format!("{}\n{}", DisplayList::from(snippet), suffix));
    }
    emitted_diagnostics
}

/// The character range a span is underlined over. Empty spans, like the end of an empty input,
/// are widened to the character after them.
fn visible_range(span: Span) -> (usize, usize) {
    if span.is_empty() {
        (span.lo, span.lo + 1)
    } else {
        span.into()
    }
}

/// Converts a longdiv AssociatedDiagnostic to an Annotation.
fn convert_associated_diagnostic(diagnostic: &AssociatedDiagnostic) -> Annotation<'_> {
    Annotation {
        label: Some(&diagnostic.msg),
        id: None,
        annotation_type: convert_diagnostic_kind(&diagnostic.kind),
    }
}

/// Converts a longdiv DiagnosticKind to an AnnotationType.
fn convert_diagnostic_kind(diagnostic_kind: &DiagnosticKind) -> AnnotationType {
    match diagnostic_kind {
        DiagnosticKind::Error => AnnotationType::Error,
        DiagnosticKind::Warning => AnnotationType::Warning,
        DiagnosticKind::Note => AnnotationType::Note,
        DiagnosticKind::Help => AnnotationType::Help,
    }
}
