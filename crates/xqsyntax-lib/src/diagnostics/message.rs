use serde::Serialize;
use text_size::TextRange;

/// Diagnostic kinds ordered by priority (highest priority first).
///
/// When two diagnostics have overlapping spans, the higher-priority one
/// suppresses the lower-priority one. This prevents cascading error noise.
///
/// Priority rationale:
/// - Unterminated constructs swallow the rest of the input
/// - Expected token errors are root causes the user should fix first
/// - Lexical errors are local and specific
/// - Discouraged-but-parsed constructs come last
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // These cause cascading errors throughout the rest of the file
    IncompleteString,
    IncompleteComment,
    IncompleteMarkup,
    NestingTooDeep,

    // User omitted something required - root cause errors
    Expected,
    MismatchedClosingTag,

    // User wrote something that doesn't belong
    UnexpectedToken,
    ReturnWithoutFlwor,
    BadCharacter,
    UnmatchedCommentEnd,
    IncompleteDoubleExponent,
    PartialEntityReference,
    EmptyEntityReference,
    UnknownEntityReference,

    // Valid syntax, discouraged
    MultipleParenthesizedCatch,
}

impl DiagnosticKind {
    /// Default severity for this kind.
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::MultipleParenthesizedCatch => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Whether this kind suppresses `other` when spans overlap.
    ///
    /// Uses enum discriminant ordering: lower position = higher priority.
    pub fn suppresses(&self, other: &DiagnosticKind) -> bool {
        self < other
    }

    /// Unterminated constructs: everything after them is suspect.
    pub fn is_structural_error(&self) -> bool {
        matches!(
            self,
            Self::IncompleteString | Self::IncompleteComment | Self::IncompleteMarkup
        )
    }

    /// Root cause errors - user omitted something required.
    /// These suppress structural errors at the same position.
    pub fn is_root_cause_error(&self) -> bool {
        matches!(self, Self::Expected | Self::MismatchedClosingTag)
    }

    /// Default hint for this kind, automatically included in diagnostics.
    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::ReturnWithoutFlwor => Some("start the expression with a `for` or `let` clause"),
            Self::UnknownEntityReference => {
                Some("only `&lt;`, `&gt;`, `&amp;`, `&quot;` and `&apos;` are predefined")
            }
            Self::IncompleteDoubleExponent => Some("e.g., `1.5e3`"),
            Self::MultipleParenthesizedCatch => {
                Some("only the first `catch ($var)` clause can be reached")
            }
            _ => None,
        }
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::IncompleteString => "incomplete string",
            Self::IncompleteComment => "incomplete comment",
            Self::IncompleteMarkup => "incomplete markup",
            Self::NestingTooDeep => "nesting too deep",

            Self::Expected => "expected a token",
            Self::MismatchedClosingTag => "closing tag does not match",

            Self::UnexpectedToken => "unexpected token",
            Self::ReturnWithoutFlwor => "return without FLWOR",
            Self::BadCharacter => "invalid character",
            Self::UnmatchedCommentEnd => "`:)` without matching `(:`",
            Self::IncompleteDoubleExponent => "incomplete double exponent",
            Self::PartialEntityReference => "incomplete entity reference",
            Self::EmptyEntityReference => "empty entity reference",
            Self::UnknownEntityReference => "unknown entity reference",

            Self::MultipleParenthesizedCatch => "multiple catch clauses of that kind",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::Expected => "expected {}".to_string(),
            Self::UnexpectedToken => "unexpected {}".to_string(),
            Self::MismatchedClosingTag => "closing tag does not match `{}`".to_string(),
            Self::UnknownEntityReference => "unknown entity reference `{}`".to_string(),

            // Standard pattern: fallback + context
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedInfo {
    #[serde(serialize_with = "serialize_range")]
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }
}

/// One diagnostic. Ranges are UTF-16 code-unit offsets into the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticMessage {
    #[serde(skip)]
    pub(crate) kind: DiagnosticKind,
    pub(crate) severity: Severity,
    /// The range shown to the user (underlined in output).
    #[serde(serialize_with = "serialize_range")]
    pub(crate) range: TextRange,
    pub(crate) message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) related: Vec<RelatedInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            range,
            message: message.into(),
            related: Vec::new(),
            hints: kind.default_hint().map(String::from).into_iter().collect(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, range: TextRange) -> Self {
        Self::new(kind, range, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity,
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.range.start()),
                u32::from(related.range.end())
            )?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct RangeJson {
    start: u32,
    end: u32,
}

pub(crate) fn serialize_range<S: serde::Serializer>(
    range: &TextRange,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    RangeJson {
        start: range.start().into(),
        end: range.end().into(),
    }
    .serialize(serializer)
}
