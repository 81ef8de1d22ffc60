//! Diagnostic - Rust-style error messages
//!
//! Generates detailed error messages with:
//! - Error code (EP001, EP002, etc.)
//! - Precise location
//! - Input snippet with the offending character underlined
//! - Notes and fix hints

use crate::span::Span;
use std::fmt;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Fatal error - the expression has no value
    Error,
    /// Note - additional information
    Note,
    /// Help - fix hint
    Help,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Note => "note",
            Level::Help => "help",
        }
    }

    /// Returns the ANSI code for coloring
    pub fn color_code(&self) -> &'static str {
        match self {
            Level::Error => "\x1b[1;31m", // Bold Red
            Level::Note => "\x1b[1;36m",  // Bold Cyan
            Level::Help => "\x1b[1;32m",  // Bold Green
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A label pointing to a specific region of the input
#[derive(Debug, Clone)]
pub struct Label {
    /// Span of the region
    pub span: Span,
    /// Label message
    pub message: String,
    /// Whether this is the primary or secondary label
    pub primary: bool,
}

impl Label {
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            primary: true,
        }
    }

    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            primary: false,
        }
    }
}

/// Structured error code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode {
    /// Category (P = Parser)
    pub category: char,
    /// Error number
    pub number: u16,
}

impl ErrorCode {
    pub const fn new(category: char, number: u16) -> Self {
        Self { category, number }
    }

    // Parser errors
    pub const UNEXPECTED_CHAR: Self = Self::new('P', 1);
    pub const EXPECTED_NUMBER: Self = Self::new('P', 2);
    pub const UNCLOSED_PAREN: Self = Self::new('P', 3);
    pub const LONE_STAR: Self = Self::new('P', 4);
    pub const TRAILING_INPUT: Self = Self::new('P', 5);
    pub const NESTING_TOO_DEEP: Self = Self::new('P', 6);
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}{:03}", self.category, self.number)
    }
}

/// A complete diagnostic
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level
    pub level: Level,
    /// Error code (optional)
    pub code: Option<ErrorCode>,
    /// Main message
    pub message: String,
    /// Labels pointing to the input
    pub labels: Vec<Label>,
    /// Additional notes
    pub notes: Vec<String>,
    /// Fix hints
    pub help: Vec<String>,
}

impl Diagnostic {
    /// Creates a new error
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Sets the error code
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Adds a primary label
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Adds a secondary label
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Adds a note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Adds a fix hint
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}

/// Stores the inputs diagnostics point into
#[derive(Debug, Default)]
pub struct SourceCache {
    files: Vec<SourceFile>,
}

#[derive(Debug)]
pub struct SourceFile {
    pub name: String,
    pub source: String,
    /// Offset of each line (for fast lookup)
    line_starts: Vec<usize>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        Self {
            name: name.into(),
            source,
            line_starts,
        }
    }

    /// Returns the text of a 1-indexed line, without its terminator
    pub fn get_line(&self, line: u32) -> Option<&str> {
        let line_idx = line.checked_sub(1)? as usize;
        let start = *self.line_starts.get(line_idx)?;
        let end = self
            .line_starts
            .get(line_idx + 1)
            .map(|&e| e.saturating_sub(1))
            .unwrap_or(self.source.len());

        self.source.get(start..end)
    }
}

impl SourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an input and returns its ID
    pub fn add(&mut self, name: impl Into<String>, source: impl Into<String>) -> u32 {
        let id = self.files.len() as u32;
        self.files.push(SourceFile::new(name, source));
        id
    }

    pub fn get(&self, id: u32) -> Option<&SourceFile> {
        self.files.get(id as usize)
    }
}

/// Renders a diagnostic for display
pub struct DiagnosticRenderer<'a> {
    cache: &'a SourceCache,
    use_colors: bool,
}

impl<'a> DiagnosticRenderer<'a> {
    pub fn new(cache: &'a SourceCache) -> Self {
        Self {
            cache,
            use_colors: true,
        }
    }

    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Renders the diagnostic as a string
    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let mut output = String::new();

        // Line 1: error[EP001]: message
        let reset = if self.use_colors { "\x1b[0m" } else { "" };
        let color = if self.use_colors {
            diagnostic.level.color_code()
        } else {
            ""
        };
        let bold = if self.use_colors { "\x1b[1m" } else { "" };
        let blue = if self.use_colors { "\x1b[1;34m" } else { "" };

        output.push_str(color);
        output.push_str(diagnostic.level.as_str());

        if let Some(code) = &diagnostic.code {
            output.push('[');
            output.push_str(&code.to_string());
            output.push(']');
        }

        output.push_str(reset);
        output.push_str(bold);
        output.push_str(": ");
        output.push_str(&diagnostic.message);
        output.push_str(reset);
        output.push('\n');

        // Labels with input snippets
        for label in &diagnostic.labels {
            let Some(file) = self.cache.get(label.span.file_id) else {
                continue;
            };

            // --> name:line:column
            output.push_str(&format!(
                " {}-->{} {}:{}:{}\n",
                blue, reset, file.name, label.span.start.line, label.span.start.column
            ));

            let Some(line_content) = file.get_line(label.span.start.line) else {
                continue;
            };

            let line_num = label.span.start.line;
            let padding = " ".repeat(line_num.to_string().len());

            // Empty line with bar
            output.push_str(&format!(" {} {}|{}\n", padding, blue, reset));

            // Line with the input
            output.push_str(&format!(
                " {}{}{} |{} {}\n",
                blue, line_num, reset, reset, line_content
            ));

            // Line with underline
            let col_start = label.span.start.column as usize;
            let underline_len = if label.span.start.line == label.span.end.line {
                label.span.end.column.saturating_sub(label.span.start.column).max(1) as usize
            } else {
                1
            };

            let spaces = " ".repeat(col_start.saturating_sub(1));
            let underline_char = if label.primary { '^' } else { '-' };
            let underline = underline_char.to_string().repeat(underline_len);
            let label_color = if label.primary { color } else { blue };

            output.push_str(&format!(
                " {} {}|{} {}{}{} {}{}\n",
                padding, blue, reset, spaces, label_color, underline, label.message, reset
            ));
        }

        for note in &diagnostic.notes {
            output.push_str(&format!("  = {}note{}: {}\n", bold, reset, note));
        }

        for help in &diagnostic.help {
            let green = if self.use_colors { Level::Help.color_code() } else { "" };
            output.push_str(&format!("  = {}help{}: {}\n", green, reset, help));
        }

        output
    }
}
