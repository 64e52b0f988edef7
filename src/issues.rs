//! Issue types produced while processing patch sets.
//!
//! Each issue carries everything the reporter needs to print it.

use enum_dispatch::enum_dispatch;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
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

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    SyntaxError,
    ParseError,
    Overlay,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::SyntaxError => write!(f, "syntax-error"),
            Rule::ParseError => write!(f, "parse-error"),
            Rule::Overlay => write!(f, "overlay"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// Syntax diagnostic found while validating a translated script.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SyntaxErrorIssue {
    pub file_path: String,
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub col: usize,
    pub message: String,
    /// The offending source line, when it could be read.
    pub source_line: Option<String>,
}

impl SyntaxErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::SyntaxError
    }
}

/// File could not be read or parsed and was skipped.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

/// Overlay entry that could not be applied to the host configuration.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct OverlayIssue {
    /// Dotted path of the table or label.
    pub target: String,
    pub error: String,
}

impl OverlayIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::Overlay
    }
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    SyntaxError(SyntaxErrorIssue),
    ParseError(ParseErrorIssue),
    Overlay(OverlayIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::SyntaxError(_) => SyntaxErrorIssue::severity(),
            Issue::ParseError(_) => ParseErrorIssue::severity(),
            Issue::Overlay(_) => OverlayIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::SyntaxError(_) => SyntaxErrorIssue::rule(),
            Issue::ParseError(_) => ParseErrorIssue::rule(),
            Issue::Overlay(_) => OverlayIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Position inside a script, with the line for context display.
    Source {
        path: &'a str,
        line: usize,
        col: usize,
        source_line: Option<&'a str>,
    },
    /// File-level only.
    File { path: &'a str },
    /// Overlay target inside the host configuration.
    Target { path: &'a str },
}

#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;
}

impl Report for SyntaxErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source {
            path: &self.file_path,
            line: self.line,
            col: self.col,
            source_line: self.source_line.as_deref(),
        }
    }

    fn message(&self) -> String {
        self.message.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for OverlayIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Target { path: &self.target }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

// ============================================================
// Ordering
// ============================================================

impl Issue {
    fn sort_key(&self) -> (&str, usize, usize) {
        match self.location() {
            ReportLocation::Source {
                path, line, col, ..
            } => (path, line, col),
            ReportLocation::File { path } | ReportLocation::Target { path } => (path, 0, 0),
        }
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_key()
            .cmp(&other.sort_key())
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}
