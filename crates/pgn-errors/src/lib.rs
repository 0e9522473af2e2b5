//! Diagnostics describing defects in PGN source text.
//!
//! A [`Diagnostic`] is a plain value: the terminal that detects a defect
//! supplies the code, length and arguments, and whoever walks the tree
//! supplies the absolute start.

use std::fmt::{self, Display};

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use text_size::{TextRange, TextSize};

/// Closed set of source-text defects the syntax tree can report.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DiagnosticCode {
    IllegalCharacter,
    UnterminatedComment,
    UnterminatedTagValue,
    EmptyNag,
    OverflowNag,
    OrphanParenthesisClose,
}

impl DiagnosticCode {
    /// Message template; `{0}`, `{1}`, ... are replaced by the diagnostic's arguments.
    pub const fn template(self) -> &'static str {
        match self {
            Self::IllegalCharacter => "illegal character",
            Self::UnterminatedComment => "unterminated comment, expected '}'",
            Self::UnterminatedTagValue => "unterminated tag value, expected '\"'",
            Self::EmptyNag => "missing annotation glyph number after '$'",
            Self::OverflowNag => "annotation glyph {0} is out of range 0..=255",
            Self::OrphanParenthesisClose => "unmatched ')'",
        }
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Diagnostic {
    code: DiagnosticCode,
    start: TextSize,
    len: TextSize,
    args: Vec<String>,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, start: TextSize, len: TextSize) -> Self {
        Self { code, start, len, args: Vec::new() }
    }

    pub fn with_args(
        code: DiagnosticCode,
        start: TextSize,
        len: TextSize,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self { code, start, len, args: args.into_iter().map(Into::into).collect() }
    }

    pub fn code(&self) -> DiagnosticCode {
        self.code
    }

    pub fn start(&self) -> TextSize {
        self.start
    }

    pub fn len(&self) -> TextSize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == TextSize::new(0)
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn range(&self) -> TextRange {
        TextRange::at(self.start, self.len)
    }

    /// The code's template with arguments substituted.
    pub fn message(&self) -> String {
        let mut message = self.code.template().to_owned();
        for (index, arg) in self.args.iter().enumerate() {
            message = message.replace(&format!("{{{index}}}"), arg);
        }
        message
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        RenderedDiagnostic { message: self.message(), diagnostic: self, renderer, path, text }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}: {}", self.code, self.range(), self.message())
    }
}

struct RenderedDiagnostic<'a> {
    message: String,
    diagnostic: &'a Diagnostic,
    renderer: &'a Renderer,
    path: &'a str,
    text: &'a str,
}

impl Display for RenderedDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = Level::Error.title(&self.message).snippet(
            Snippet::source(self.text)
                .origin(self.path)
                .annotation(Level::Error.span(self.diagnostic.range().into()).label("here"))
                .fold(true),
        );
        write!(f, "{}", self.renderer.render(message))
    }
}
