//! Terminals: one lexical unit each.

use pgn_errors::{Diagnostic, DiagnosticCode};
use text_size::TextSize;
use triomphe::Arc;

use crate::error::{GreenError, reject};
use crate::{GreenNode, Symbol, SymbolKind};

/// Terminal whose only payload is its text.
macro_rules! text_terminal {
    ($(#[$meta:meta])* $name:ident, $kind:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Eq, Hash, PartialEq)]
        pub struct $name {
            text: Box<str>,
        }

        impl $name {
            pub fn new(text: &str) -> Result<Self, GreenError> {
                if text.is_empty() {
                    return reject(GreenError::EmptyTerminal { kind: SymbolKind::$kind });
                }
                Ok(Self { text: text.into() })
            }

            pub fn text(&self) -> &str {
                &self.text
            }
        }

        impl GreenNode for $name {
            fn text_len(&self) -> TextSize {
                TextSize::of(&*self.text)
            }
        }
    };
}

/// Payload-free terminal with exactly one process-wide instance.
///
/// Instances cannot be built outside `shared()`, so equality is identity.
macro_rules! singleton_terminal {
    ($(#[$meta:meta])* $name:ident, $text:literal) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name {
            text: &'static str,
        }

        impl $name {
            pub fn shared() -> &'static Self {
                static SHARED: $name = $name { text: $text };
                &SHARED
            }

            pub fn text(&self) -> &'static str {
                self.text
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                std::ptr::eq(self, other)
            }
        }

        impl Eq for $name {}

        impl GreenNode for $name {
            fn text_len(&self) -> TextSize {
                TextSize::of(self.text)
            }
        }
    };
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct GreenWhitespace {
    len: TextSize,
}

impl GreenWhitespace {
    pub fn new(len: TextSize) -> Result<Self, GreenError> {
        if len == TextSize::new(0) {
            return reject(GreenError::EmptyTerminal { kind: SymbolKind::Whitespace });
        }
        Ok(Self { len })
    }
}

impl GreenNode for GreenWhitespace {
    fn text_len(&self) -> TextSize {
        self.len
    }
}

impl Symbol for GreenWhitespace {
    fn kind(&self) -> SymbolKind {
        SymbolKind::Whitespace
    }
}

text_terminal!(
    /// A terminated `{...}` comment or a `;` comment up to the end of the line.
    GreenComment,
    Comment
);

impl Symbol for GreenComment {
    fn kind(&self) -> SymbolKind {
        SymbolKind::Comment
    }
}

text_terminal!(
    /// A `{` comment running to the end of the text.
    GreenUnterminatedComment,
    UnterminatedComment
);

impl Symbol for GreenUnterminatedComment {
    fn kind(&self) -> SymbolKind {
        SymbolKind::UnterminatedComment
    }

    fn diagnostic(&self, start: TextSize) -> Option<Diagnostic> {
        Some(Diagnostic::new(DiagnosticCode::UnterminatedComment, start, self.text_len()))
    }
}

text_terminal!(
    /// A `%` escape line.
    GreenEscape,
    Escape
);

impl Symbol for GreenEscape {
    fn kind(&self) -> SymbolKind {
        SymbolKind::Escape
    }
}

/// A character that cannot start any PGN token.
///
/// There is one shared instance per UTF-8 width.
#[derive(Debug)]
pub struct GreenIllegalCharacter {
    len: TextSize,
}

static ILLEGAL_CHARACTERS: [GreenIllegalCharacter; 4] = [
    GreenIllegalCharacter { len: TextSize::new(1) },
    GreenIllegalCharacter { len: TextSize::new(2) },
    GreenIllegalCharacter { len: TextSize::new(3) },
    GreenIllegalCharacter { len: TextSize::new(4) },
];

impl GreenIllegalCharacter {
    /// The single-byte instance.
    pub fn shared() -> &'static Self {
        &ILLEGAL_CHARACTERS[0]
    }

    pub fn for_char(ch: char) -> &'static Self {
        &ILLEGAL_CHARACTERS[ch.len_utf8() - 1]
    }
}

impl PartialEq for GreenIllegalCharacter {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl Eq for GreenIllegalCharacter {}

impl GreenNode for GreenIllegalCharacter {
    fn text_len(&self) -> TextSize {
        self.len
    }
}

impl Symbol for GreenIllegalCharacter {
    fn kind(&self) -> SymbolKind {
        SymbolKind::IllegalCharacter
    }

    fn diagnostic(&self, start: TextSize) -> Option<Diagnostic> {
        Some(Diagnostic::new(DiagnosticCode::IllegalCharacter, start, self.len))
    }
}

singleton_terminal!(GreenBracketOpen, "[");

impl Symbol for GreenBracketOpen {
    fn kind(&self) -> SymbolKind {
        SymbolKind::BracketOpen
    }
}

singleton_terminal!(GreenBracketClose, "]");

impl Symbol for GreenBracketClose {
    fn kind(&self) -> SymbolKind {
        SymbolKind::BracketClose
    }
}

text_terminal!(GreenTagName, TagName);

impl Symbol for GreenTagName {
    fn kind(&self) -> SymbolKind {
        SymbolKind::TagName
    }
}

/// A quoted tag value, opening quote included.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct GreenTagValue {
    text: Box<str>,
    terminated: bool,
}

impl GreenTagValue {
    pub fn new(text: &str, terminated: bool) -> Result<Self, GreenError> {
        if text.is_empty() {
            return reject(GreenError::EmptyTerminal { kind: SymbolKind::TagValue });
        }
        Ok(Self { text: text.into(), terminated })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }
}

impl GreenNode for GreenTagValue {
    fn text_len(&self) -> TextSize {
        TextSize::of(&*self.text)
    }
}

impl Symbol for GreenTagValue {
    fn kind(&self) -> SymbolKind {
        SymbolKind::TagValue
    }

    fn diagnostic(&self, start: TextSize) -> Option<Diagnostic> {
        (!self.terminated).then(|| {
            Diagnostic::new(DiagnosticCode::UnterminatedTagValue, start, self.text_len())
        })
    }
}

text_terminal!(GreenMoveNumber, MoveNumber);

impl Symbol for GreenMoveNumber {
    fn kind(&self) -> SymbolKind {
        SymbolKind::MoveNumber
    }
}

singleton_terminal!(GreenPeriod, ".");

impl Symbol for GreenPeriod {
    fn kind(&self) -> SymbolKind {
        SymbolKind::Period
    }
}

text_terminal!(GreenMove, Move);

impl Symbol for GreenMove {
    fn kind(&self) -> SymbolKind {
        SymbolKind::Move
    }
}

/// A `$n` annotation glyph with `n` in `0..=255`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct GreenNag {
    text: Box<str>,
    annotation: u8,
}

impl GreenNag {
    pub fn new(text: &str) -> Result<Self, GreenError> {
        match nag_digits(text).map(str::parse::<u8>) {
            Some(Ok(annotation)) => Ok(Self { text: text.into(), annotation }),
            _ => reject(GreenError::InvalidNag { text: text.to_owned() }),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn annotation(&self) -> u8 {
        self.annotation
    }
}

impl GreenNode for GreenNag {
    fn text_len(&self) -> TextSize {
        TextSize::of(&*self.text)
    }
}

impl Symbol for GreenNag {
    fn kind(&self) -> SymbolKind {
        SymbolKind::Nag
    }
}

/// Digits after the `$`, `None` unless `text` is `$` followed by ASCII digits only.
fn nag_digits(text: &str) -> Option<&str> {
    text.strip_prefix('$').filter(|digits| digits.bytes().all(|byte| byte.is_ascii_digit()))
}

singleton_terminal!(
    /// A `$` without digits.
    GreenEmptyNag,
    "$"
);

impl Symbol for GreenEmptyNag {
    fn kind(&self) -> SymbolKind {
        SymbolKind::EmptyNag
    }

    fn diagnostic(&self, start: TextSize) -> Option<Diagnostic> {
        Some(Diagnostic::new(DiagnosticCode::EmptyNag, start, self.text_len()))
    }
}

/// A `$n` annotation glyph with `n` above 255.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct GreenOverflowNag {
    text: Box<str>,
}

impl GreenOverflowNag {
    pub fn new(text: &str) -> Result<Self, GreenError> {
        match nag_digits(text) {
            Some(digits) if !digits.is_empty() && digits.parse::<u8>().is_err() => {
                Ok(Self { text: text.into() })
            }
            _ => reject(GreenError::InvalidNag { text: text.to_owned() }),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl GreenNode for GreenOverflowNag {
    fn text_len(&self) -> TextSize {
        TextSize::of(&*self.text)
    }
}

impl Symbol for GreenOverflowNag {
    fn kind(&self) -> SymbolKind {
        SymbolKind::OverflowNag
    }

    fn diagnostic(&self, start: TextSize) -> Option<Diagnostic> {
        Some(Diagnostic::with_args(
            DiagnosticCode::OverflowNag,
            start,
            self.text_len(),
            [self.text()],
        ))
    }
}

singleton_terminal!(
    /// A `)` without a matching `(`.
    GreenOrphanParenthesisClose,
    ")"
);

impl Symbol for GreenOrphanParenthesisClose {
    fn kind(&self) -> SymbolKind {
        SymbolKind::OrphanParenthesisClose
    }

    fn diagnostic(&self, start: TextSize) -> Option<Diagnostic> {
        Some(Diagnostic::new(DiagnosticCode::OrphanParenthesisClose, start, self.text_len()))
    }
}

text_terminal!(
    /// `1-0`, `0-1`, `1/2-1/2` or `*`.
    GreenGameTermination,
    GameTermination
);

impl Symbol for GreenGameTermination {
    fn kind(&self) -> SymbolKind {
        SymbolKind::GameTermination
    }
}

/// Any terminal that is insignificant to move semantics.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GreenBackground {
    Whitespace(GreenWhitespace),
    Comment(Arc<GreenComment>),
    UnterminatedComment(Arc<GreenUnterminatedComment>),
    Escape(Arc<GreenEscape>),
    IllegalCharacter(&'static GreenIllegalCharacter),
}

impl GreenBackground {
    pub fn illegal_character(ch: char) -> Self {
        Self::IllegalCharacter(GreenIllegalCharacter::for_char(ch))
    }
}

impl GreenNode for GreenBackground {
    fn text_len(&self) -> TextSize {
        match self {
            Self::Whitespace(node) => node.text_len(),
            Self::Comment(node) => node.text_len(),
            Self::UnterminatedComment(node) => node.text_len(),
            Self::Escape(node) => node.text_len(),
            Self::IllegalCharacter(node) => node.text_len(),
        }
    }
}

impl Symbol for GreenBackground {
    fn kind(&self) -> SymbolKind {
        match self {
            Self::Whitespace(node) => node.kind(),
            Self::Comment(node) => node.kind(),
            Self::UnterminatedComment(node) => node.kind(),
            Self::Escape(node) => node.kind(),
            Self::IllegalCharacter(node) => node.kind(),
        }
    }

    fn diagnostic(&self, start: TextSize) -> Option<Diagnostic> {
        match self {
            Self::Whitespace(node) => node.diagnostic(start),
            Self::Comment(node) => node.diagnostic(start),
            Self::UnterminatedComment(node) => node.diagnostic(start),
            Self::Escape(node) => node.diagnostic(start),
            Self::IllegalCharacter(node) => node.diagnostic(start),
        }
    }
}

impl From<GreenWhitespace> for GreenBackground {
    fn from(node: GreenWhitespace) -> Self {
        Self::Whitespace(node)
    }
}

impl From<GreenComment> for GreenBackground {
    fn from(node: GreenComment) -> Self {
        Self::Comment(Arc::new(node))
    }
}

impl From<GreenUnterminatedComment> for GreenBackground {
    fn from(node: GreenUnterminatedComment) -> Self {
        Self::UnterminatedComment(Arc::new(node))
    }
}

impl From<GreenEscape> for GreenBackground {
    fn from(node: GreenEscape) -> Self {
        Self::Escape(Arc::new(node))
    }
}

impl From<&'static GreenIllegalCharacter> for GreenBackground {
    fn from(node: &'static GreenIllegalCharacter) -> Self {
        Self::IllegalCharacter(node)
    }
}

/// Any foreground terminal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GreenSymbol {
    BracketOpen(&'static GreenBracketOpen),
    BracketClose(&'static GreenBracketClose),
    TagName(Arc<GreenTagName>),
    TagValue(Arc<GreenTagValue>),
    MoveNumber(Arc<GreenMoveNumber>),
    Period(&'static GreenPeriod),
    Move(Arc<GreenMove>),
    Nag(Arc<GreenNag>),
    EmptyNag(&'static GreenEmptyNag),
    OverflowNag(Arc<GreenOverflowNag>),
    OrphanParenthesisClose(&'static GreenOrphanParenthesisClose),
    GameTermination(Arc<GreenGameTermination>),
}

impl GreenSymbol {
    pub fn bracket_open() -> Self {
        Self::BracketOpen(GreenBracketOpen::shared())
    }

    pub fn bracket_close() -> Self {
        Self::BracketClose(GreenBracketClose::shared())
    }

    pub fn period() -> Self {
        Self::Period(GreenPeriod::shared())
    }

    pub fn orphan_parenthesis_close() -> Self {
        Self::OrphanParenthesisClose(GreenOrphanParenthesisClose::shared())
    }

    /// Classifies `$...` text: the shared empty glyph, an in-range glyph or
    /// an overflowing one.
    pub fn nag(text: &str) -> Result<Self, GreenError> {
        let Some(digits) = nag_digits(text) else {
            return reject(GreenError::InvalidNag { text: text.to_owned() });
        };
        if digits.is_empty() {
            return Ok(Self::EmptyNag(GreenEmptyNag::shared()));
        }
        match digits.parse::<u8>() {
            Ok(annotation) => Ok(Self::Nag(Arc::new(GreenNag { text: text.into(), annotation }))),
            Err(_) => Ok(Self::OverflowNag(Arc::new(GreenOverflowNag::new(text)?))),
        }
    }
}

impl GreenNode for GreenSymbol {
    fn text_len(&self) -> TextSize {
        match self {
            Self::BracketOpen(node) => node.text_len(),
            Self::BracketClose(node) => node.text_len(),
            Self::TagName(node) => node.text_len(),
            Self::TagValue(node) => node.text_len(),
            Self::MoveNumber(node) => node.text_len(),
            Self::Period(node) => node.text_len(),
            Self::Move(node) => node.text_len(),
            Self::Nag(node) => node.text_len(),
            Self::EmptyNag(node) => node.text_len(),
            Self::OverflowNag(node) => node.text_len(),
            Self::OrphanParenthesisClose(node) => node.text_len(),
            Self::GameTermination(node) => node.text_len(),
        }
    }
}

impl Symbol for GreenSymbol {
    fn kind(&self) -> SymbolKind {
        match self {
            Self::BracketOpen(node) => node.kind(),
            Self::BracketClose(node) => node.kind(),
            Self::TagName(node) => node.kind(),
            Self::TagValue(node) => node.kind(),
            Self::MoveNumber(node) => node.kind(),
            Self::Period(node) => node.kind(),
            Self::Move(node) => node.kind(),
            Self::Nag(node) => node.kind(),
            Self::EmptyNag(node) => node.kind(),
            Self::OverflowNag(node) => node.kind(),
            Self::OrphanParenthesisClose(node) => node.kind(),
            Self::GameTermination(node) => node.kind(),
        }
    }

    fn diagnostic(&self, start: TextSize) -> Option<Diagnostic> {
        match self {
            Self::BracketOpen(node) => node.diagnostic(start),
            Self::BracketClose(node) => node.diagnostic(start),
            Self::TagName(node) => node.diagnostic(start),
            Self::TagValue(node) => node.diagnostic(start),
            Self::MoveNumber(node) => node.diagnostic(start),
            Self::Period(node) => node.diagnostic(start),
            Self::Move(node) => node.diagnostic(start),
            Self::Nag(node) => node.diagnostic(start),
            Self::EmptyNag(node) => node.diagnostic(start),
            Self::OverflowNag(node) => node.diagnostic(start),
            Self::OrphanParenthesisClose(node) => node.diagnostic(start),
            Self::GameTermination(node) => node.diagnostic(start),
        }
    }
}

macro_rules! symbol_from_arc {
    ($($variant:ident($node:ty)),* $(,)?) => {
        $(
            impl From<$node> for GreenSymbol {
                fn from(node: $node) -> Self {
                    Self::$variant(Arc::new(node))
                }
            }
        )*
    };
}

symbol_from_arc!(
    TagName(GreenTagName),
    TagValue(GreenTagValue),
    MoveNumber(GreenMoveNumber),
    Move(GreenMove),
    Nag(GreenNag),
    OverflowNag(GreenOverflowNag),
    GameTermination(GreenGameTermination),
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singletons_are_identical() {
        assert!(std::ptr::eq(GreenPeriod::shared(), GreenPeriod::shared()));
        assert!(std::ptr::eq(GreenEmptyNag::shared(), GreenEmptyNag::shared()));
        assert!(std::ptr::eq(
            GreenOrphanParenthesisClose::shared(),
            GreenOrphanParenthesisClose::shared()
        ));
        let hash = GreenIllegalCharacter::for_char('#');
        assert!(std::ptr::eq(GreenIllegalCharacter::shared(), hash));
        assert_eq!(GreenSymbol::period(), GreenSymbol::period());
    }

    #[test]
    fn payload_terminals_are_never_identical() {
        let first = Arc::new(GreenComment::new("{a}").unwrap());
        let second = Arc::new(GreenComment::new("{b}").unwrap());

        assert_eq!(first.text_len(), second.text_len());
        assert!(!Arc::ptr_eq(&first, &second));
        assert_ne!(first, second);

        let copy = Arc::new(GreenComment::new("{a}").unwrap());
        assert_eq!(first, copy);
        assert!(!Arc::ptr_eq(&first, &copy));
    }

    #[test]
    fn illegal_character_width() {
        assert_eq!(GreenIllegalCharacter::shared().text_len(), TextSize::new(1));
        assert_eq!(GreenIllegalCharacter::for_char('é').text_len(), TextSize::new(2));
        assert_eq!(GreenIllegalCharacter::for_char('♞').text_len(), TextSize::new(3));
        let accented = GreenIllegalCharacter::for_char('é');
        assert!(!std::ptr::eq(GreenIllegalCharacter::shared(), accented));
    }

    #[test]
    fn illegal_character_diagnostic() {
        let illegal = GreenIllegalCharacter::shared();

        let diagnostics = illegal.diagnostics(TextSize::new(7)).collect::<Vec<_>>();

        assert_eq!(
            diagnostics,
            [Diagnostic::new(DiagnosticCode::IllegalCharacter, TextSize::new(7), TextSize::new(1))]
        );
    }

    #[test]
    fn harmless_terminals_have_no_diagnostics() {
        let comment = GreenComment::new("{fine}").unwrap();
        let tag_value = GreenTagValue::new("\"Casual\"", true).unwrap();

        assert_eq!(comment.diagnostics(TextSize::new(0)).count(), 0);
        assert_eq!(tag_value.diagnostic(TextSize::new(3)), None);
        assert_eq!(GreenSymbol::period().diagnostics(TextSize::new(1)).count(), 0);
    }

    #[test]
    fn unterminated_tag_value_diagnostic() {
        let tag_value = GreenTagValue::new("\"Casu", false).unwrap();

        let diagnostic = tag_value.diagnostic(TextSize::new(5)).unwrap();

        assert_eq!(diagnostic.code(), DiagnosticCode::UnterminatedTagValue);
        assert_eq!(diagnostic.start(), TextSize::new(5));
        assert_eq!(diagnostic.len(), TextSize::new(5));
    }

    #[test]
    fn nag_classification() {
        assert_eq!(GreenSymbol::nag("$").unwrap(), GreenSymbol::EmptyNag(GreenEmptyNag::shared()));
        assert_eq!(GreenSymbol::nag("$14").unwrap().kind(), SymbolKind::Nag);
        assert_eq!(GreenSymbol::nag("$255").unwrap().kind(), SymbolKind::Nag);
        assert_eq!(GreenSymbol::nag("$256").unwrap().kind(), SymbolKind::OverflowNag);
        assert_eq!(GreenSymbol::nag("$99999999999").unwrap().kind(), SymbolKind::OverflowNag);
        assert!(matches!(GreenSymbol::nag("14"), Err(GreenError::InvalidNag { .. })));
        assert!(matches!(GreenSymbol::nag("$1a"), Err(GreenError::InvalidNag { .. })));

        let GreenSymbol::Nag(nag) = GreenSymbol::nag("$007").unwrap() else {
            panic!("expected an in-range glyph");
        };
        assert_eq!(nag.annotation(), 7);
    }

    #[test]
    fn overflow_nag_diagnostic_carries_text() {
        let nag = GreenSymbol::nag("$300").unwrap();

        let diagnostic = nag.diagnostic(TextSize::new(2)).unwrap();

        assert_eq!(diagnostic.code(), DiagnosticCode::OverflowNag);
        assert_eq!(diagnostic.args(), ["$300"]);
        assert_eq!(diagnostic.range().end(), TextSize::new(6));
    }

    #[test]
    fn empty_terminals_are_rejected() {
        assert_eq!(
            GreenWhitespace::new(TextSize::new(0)),
            Err(GreenError::EmptyTerminal { kind: SymbolKind::Whitespace })
        );
        assert_eq!(GreenMove::new(""), Err(GreenError::EmptyTerminal { kind: SymbolKind::Move }));
        assert!(GreenTagValue::new("", true).is_err());
    }

    #[test]
    fn overflow_nag_requires_out_of_range_glyph() {
        for text in ["$12", "$255", "$", "e4", "$3x0", ""] {
            assert_eq!(
                GreenOverflowNag::new(text),
                Err(GreenError::InvalidNag { text: text.to_owned() }),
                "{text:?}"
            );
        }
        assert_eq!(GreenOverflowNag::new("$256").unwrap().text(), "$256");
        assert_eq!(GreenNag::new("$300"), Err(GreenError::InvalidNag { text: "$300".to_owned() }));
    }
}
