//! Builder-pattern printer for rendering diagnostics.
//!
//! Diagnostic ranges are UTF-16 offsets; snippets are rendered against the
//! lossy UTF-8 view of the source, so every range is converted first.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use text_size::TextRange;
use xqsyntax_core::SourceText;

use super::message::{DiagnosticMessage, Severity};

/// Builder for rendering diagnostics with various options.
pub struct DiagnosticsPrinter<'a> {
    diagnostics: Vec<DiagnosticMessage>,
    source: &'a SourceText,
    path: Option<&'a str>,
    colored: bool,
}

impl<'a> DiagnosticsPrinter<'a> {
    pub fn new(diagnostics: Vec<DiagnosticMessage>, source: &'a SourceText) -> Self {
        Self {
            diagnostics,
            source,
            path: None,
            colored: false,
        }
    }

    pub fn path(mut self, path: &'a str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        if self.diagnostics.is_empty() {
            return Ok(());
        }

        let text = self.source.to_lossy_string();
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diag) in self.diagnostics.iter().enumerate() {
            let range = self.utf8_range(diag.range, &text);

            let mut snippet = Snippet::source(text.as_str()).line_start(1).annotation(
                AnnotationKind::Primary
                    .span(range.clone())
                    .label(&diag.message),
            );

            if let Some(p) = self.path {
                snippet = snippet.path(p);
            }

            for related in &diag.related {
                snippet = snippet.annotation(
                    AnnotationKind::Context
                        .span(self.utf8_range(related.range, &text))
                        .label(&related.message),
                );
            }

            let level = severity_to_level(diag.severity);
            let mut report: Vec<Group> = vec![level.primary_title(&diag.message).element(snippet)];
            for hint in &diag.hints {
                report.push(Group::with_title(Level::HELP.secondary_title(hint)));
            }

            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", renderer.render(&report))?;
        }

        Ok(())
    }

    fn utf8_range(&self, range: TextRange, text: &str) -> std::ops::Range<usize> {
        let start = self.source.to_utf8_offset(range.start());
        let end = self.source.to_utf8_offset(range.end());
        adjust_range(start, end, text)
    }
}

fn severity_to_level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}

/// Widens an empty range to cover the next character so it stays visible.
fn adjust_range(start: usize, end: usize, text: &str) -> std::ops::Range<usize> {
    if start != end {
        return start..end;
    }
    let next = text[start..].chars().next().map_or(0, char::len_utf8);
    start..start + next
}
