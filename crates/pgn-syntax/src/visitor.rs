//! Double dispatch over the closed sets of background and foreground
//! terminals.
//!
//! Each family comes in three shapes: no result, a typed result, and a typed
//! result with a caller-supplied argument threaded through. Every per-kind
//! method falls back to the family's default method, and visiting an absent
//! node returns the default result without calling anything.

use crate::{
    GreenBackground, GreenBracketClose, GreenBracketOpen, GreenComment, GreenEmptyNag,
    GreenEscape, GreenGameTermination, GreenIllegalCharacter, GreenMove, GreenMoveNumber,
    GreenNag, GreenOrphanParenthesisClose, GreenOverflowNag, GreenPeriod, GreenSymbol,
    GreenTagName, GreenTagValue, GreenUnterminatedComment, GreenWhitespace, Symbol,
};

pub trait BackgroundVisitor {
    fn default_background(&mut self, _node: &dyn Symbol) {}

    fn visit_whitespace(&mut self, node: &GreenWhitespace) {
        self.default_background(node);
    }

    fn visit_comment(&mut self, node: &GreenComment) {
        self.default_background(node);
    }

    fn visit_unterminated_comment(&mut self, node: &GreenUnterminatedComment) {
        self.default_background(node);
    }

    fn visit_escape(&mut self, node: &GreenEscape) {
        self.default_background(node);
    }

    fn visit_illegal_character(&mut self, node: &GreenIllegalCharacter) {
        self.default_background(node);
    }

    fn visit_background(&mut self, node: Option<&GreenBackground>) {
        if let Some(node) = node {
            node.accept(self);
        }
    }
}

pub trait BackgroundResultVisitor {
    type Output: Default;

    fn default_background(&mut self, _node: &dyn Symbol) -> Self::Output {
        Self::Output::default()
    }

    fn visit_whitespace(&mut self, node: &GreenWhitespace) -> Self::Output {
        self.default_background(node)
    }

    fn visit_comment(&mut self, node: &GreenComment) -> Self::Output {
        self.default_background(node)
    }

    fn visit_unterminated_comment(&mut self, node: &GreenUnterminatedComment) -> Self::Output {
        self.default_background(node)
    }

    fn visit_escape(&mut self, node: &GreenEscape) -> Self::Output {
        self.default_background(node)
    }

    fn visit_illegal_character(&mut self, node: &GreenIllegalCharacter) -> Self::Output {
        self.default_background(node)
    }

    fn visit_background(&mut self, node: Option<&GreenBackground>) -> Self::Output {
        match node {
            Some(node) => node.accept_with_result(self),
            None => Self::Output::default(),
        }
    }
}

/// Like [`BackgroundResultVisitor`], with an argument passed along to every
/// method.
pub trait BackgroundArgVisitor<A> {
    type Output: Default;

    fn default_background(&mut self, _node: &dyn Symbol, _arg: A) -> Self::Output {
        Self::Output::default()
    }

    fn visit_whitespace(&mut self, node: &GreenWhitespace, arg: A) -> Self::Output {
        self.default_background(node, arg)
    }

    fn visit_comment(&mut self, node: &GreenComment, arg: A) -> Self::Output {
        self.default_background(node, arg)
    }

    fn visit_unterminated_comment(
        &mut self,
        node: &GreenUnterminatedComment,
        arg: A,
    ) -> Self::Output {
        self.default_background(node, arg)
    }

    fn visit_escape(&mut self, node: &GreenEscape, arg: A) -> Self::Output {
        self.default_background(node, arg)
    }

    fn visit_illegal_character(&mut self, node: &GreenIllegalCharacter, arg: A) -> Self::Output {
        self.default_background(node, arg)
    }

    fn visit_background(&mut self, node: Option<&GreenBackground>, arg: A) -> Self::Output {
        match node {
            Some(node) => node.accept_with_arg(self, arg),
            None => Self::Output::default(),
        }
    }
}

impl GreenBackground {
    pub fn accept<V: BackgroundVisitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::Whitespace(node) => visitor.visit_whitespace(node),
            Self::Comment(node) => visitor.visit_comment(node),
            Self::UnterminatedComment(node) => visitor.visit_unterminated_comment(node),
            Self::Escape(node) => visitor.visit_escape(node),
            Self::IllegalCharacter(node) => visitor.visit_illegal_character(node),
        }
    }

    pub fn accept_with_result<V>(&self, visitor: &mut V) -> V::Output
    where
        V: BackgroundResultVisitor + ?Sized,
    {
        match self {
            Self::Whitespace(node) => visitor.visit_whitespace(node),
            Self::Comment(node) => visitor.visit_comment(node),
            Self::UnterminatedComment(node) => visitor.visit_unterminated_comment(node),
            Self::Escape(node) => visitor.visit_escape(node),
            Self::IllegalCharacter(node) => visitor.visit_illegal_character(node),
        }
    }

    pub fn accept_with_arg<A, V>(&self, visitor: &mut V, arg: A) -> V::Output
    where
        V: BackgroundArgVisitor<A> + ?Sized,
    {
        match self {
            Self::Whitespace(node) => visitor.visit_whitespace(node, arg),
            Self::Comment(node) => visitor.visit_comment(node, arg),
            Self::UnterminatedComment(node) => visitor.visit_unterminated_comment(node, arg),
            Self::Escape(node) => visitor.visit_escape(node, arg),
            Self::IllegalCharacter(node) => visitor.visit_illegal_character(node, arg),
        }
    }
}

/// Generates the three foreground visitor traits and the matching `accept`
/// methods on [`GreenSymbol`] from one list of `variant => method(node type)`.
macro_rules! symbol_visitors {
    ($($variant:ident => $method:ident($node:ty)),* $(,)?) => {
        pub trait SymbolVisitor {
            fn default_symbol(&mut self, _node: &dyn Symbol) {}

            $(
                fn $method(&mut self, node: &$node) {
                    self.default_symbol(node);
                }
            )*

            fn visit_symbol(&mut self, node: Option<&GreenSymbol>) {
                if let Some(node) = node {
                    node.accept(self);
                }
            }
        }

        pub trait SymbolResultVisitor {
            type Output: Default;

            fn default_symbol(&mut self, _node: &dyn Symbol) -> Self::Output {
                Self::Output::default()
            }

            $(
                fn $method(&mut self, node: &$node) -> Self::Output {
                    self.default_symbol(node)
                }
            )*

            fn visit_symbol(&mut self, node: Option<&GreenSymbol>) -> Self::Output {
                match node {
                    Some(node) => node.accept_with_result(self),
                    None => Self::Output::default(),
                }
            }
        }

        /// Like [`SymbolResultVisitor`], with an argument passed along to
        /// every method.
        pub trait SymbolArgVisitor<A> {
            type Output: Default;

            fn default_symbol(&mut self, _node: &dyn Symbol, _arg: A) -> Self::Output {
                Self::Output::default()
            }

            $(
                fn $method(&mut self, node: &$node, arg: A) -> Self::Output {
                    self.default_symbol(node, arg)
                }
            )*

            fn visit_symbol(&mut self, node: Option<&GreenSymbol>, arg: A) -> Self::Output {
                match node {
                    Some(node) => node.accept_with_arg(self, arg),
                    None => Self::Output::default(),
                }
            }
        }

        impl GreenSymbol {
            pub fn accept<V: SymbolVisitor + ?Sized>(&self, visitor: &mut V) {
                match self {
                    $(Self::$variant(node) => visitor.$method(node),)*
                }
            }

            pub fn accept_with_result<V>(&self, visitor: &mut V) -> V::Output
            where
                V: SymbolResultVisitor + ?Sized,
            {
                match self {
                    $(Self::$variant(node) => visitor.$method(node),)*
                }
            }

            pub fn accept_with_arg<A, V>(&self, visitor: &mut V, arg: A) -> V::Output
            where
                V: SymbolArgVisitor<A> + ?Sized,
            {
                match self {
                    $(Self::$variant(node) => visitor.$method(node, arg),)*
                }
            }
        }
    };
}

symbol_visitors!(
    BracketOpen => visit_bracket_open(GreenBracketOpen),
    BracketClose => visit_bracket_close(GreenBracketClose),
    TagName => visit_tag_name(GreenTagName),
    TagValue => visit_tag_value(GreenTagValue),
    MoveNumber => visit_move_number(GreenMoveNumber),
    Period => visit_period(GreenPeriod),
    Move => visit_move(GreenMove),
    Nag => visit_nag(GreenNag),
    EmptyNag => visit_empty_nag(GreenEmptyNag),
    OverflowNag => visit_overflow_nag(GreenOverflowNag),
    OrphanParenthesisClose => visit_orphan_parenthesis_close(GreenOrphanParenthesisClose),
    GameTermination => visit_game_termination(GreenGameTermination),
);

#[cfg(test)]
mod tests {
    use text_size::TextSize;

    use super::*;
    use crate::SymbolKind;

    #[derive(Default)]
    struct KindLog {
        kinds: Vec<SymbolKind>,
        comments: Vec<String>,
    }

    impl BackgroundVisitor for KindLog {
        fn default_background(&mut self, node: &dyn Symbol) {
            self.kinds.push(node.kind());
        }

        fn visit_comment(&mut self, node: &GreenComment) {
            self.comments.push(node.text().to_owned());
        }
    }

    impl SymbolVisitor for KindLog {
        fn default_symbol(&mut self, node: &dyn Symbol) {
            self.kinds.push(node.kind());
        }
    }

    struct Annotation;

    impl SymbolResultVisitor for Annotation {
        type Output = Option<u8>;

        fn visit_nag(&mut self, node: &GreenNag) -> Option<u8> {
            Some(node.annotation())
        }
    }

    /// Sums lengths onto a caller-supplied base.
    struct EndOf;

    impl BackgroundArgVisitor<TextSize> for EndOf {
        type Output = TextSize;

        fn default_background(&mut self, node: &dyn Symbol, start: TextSize) -> TextSize {
            start + node.text_len()
        }
    }

    impl SymbolArgVisitor<TextSize> for EndOf {
        type Output = TextSize;

        fn visit_period(&mut self, _node: &GreenPeriod, start: TextSize) -> TextSize {
            start
        }
    }

    #[test]
    fn absent_node_yields_default() {
        let mut log = KindLog::default();
        log.visit_background(None);
        log.visit_symbol(None);
        assert!(log.kinds.is_empty());

        assert_eq!(Annotation.visit_symbol(None), None);
        assert_eq!(EndOf.visit_background(None, TextSize::new(9)), TextSize::new(0));
        assert_eq!(EndOf.visit_symbol(None, TextSize::new(9)), TextSize::new(0));
    }

    #[test]
    fn each_node_dispatches_once() {
        let mut log = KindLog::default();
        let comment = GreenBackground::from(GreenComment::new("{hi}").unwrap());
        let escape = GreenBackground::from(GreenEscape::new("%x").unwrap());

        log.visit_background(Some(&comment));
        log.visit_background(Some(&escape));
        log.visit_background(Some(&GreenBackground::illegal_character('#')));
        log.visit_symbol(Some(&GreenSymbol::period()));
        log.visit_symbol(Some(&GreenSymbol::nag("$").unwrap()));

        assert_eq!(log.comments, ["{hi}"]);
        assert_eq!(
            log.kinds,
            [
                SymbolKind::Escape,
                SymbolKind::IllegalCharacter,
                SymbolKind::Period,
                SymbolKind::EmptyNag,
            ]
        );
    }

    #[test]
    fn typed_results() {
        let nag = GreenSymbol::nag("$18").unwrap();
        let overflow = GreenSymbol::nag("$600").unwrap();

        assert_eq!(Annotation.visit_symbol(Some(&nag)), Some(18));
        assert_eq!(Annotation.visit_symbol(Some(&overflow)), None);
        assert_eq!(nag.accept_with_result(&mut Annotation), Some(18));
    }

    #[test]
    fn argument_is_threaded() {
        let escape = GreenBackground::from(GreenEscape::new("%abc").unwrap());
        let start = TextSize::new(10);

        assert_eq!(EndOf.visit_background(Some(&escape), start), TextSize::new(14));
        assert_eq!(EndOf.visit_symbol(Some(&GreenSymbol::period()), start), start);
        assert_eq!(
            EndOf.visit_symbol(Some(&GreenSymbol::bracket_open()), start),
            TextSize::new(0)
        );
    }

    macro_rules! kind_methods {
        (unit; $($method:ident($node:ty) => $kind:ident),* $(,)?) => {
            $(
                fn $method(&mut self, _node: &$node) {
                    self.0.push(SymbolKind::$kind);
                }
            )*
        };
        (result; $($method:ident($node:ty) => $kind:ident),* $(,)?) => {
            $(
                fn $method(&mut self, _node: &$node) -> Vec<SymbolKind> {
                    vec![SymbolKind::$kind]
                }
            )*
        };
        (arg; $($method:ident($node:ty) => $kind:ident),* $(,)?) => {
            $(
                fn $method(&mut self, _node: &$node, arg: u32) -> Vec<(SymbolKind, u32)> {
                    vec![(SymbolKind::$kind, arg)]
                }
            )*
        };
    }

    macro_rules! background_methods {
        ($mode:ident) => {
            kind_methods!($mode;
                visit_whitespace(GreenWhitespace) => Whitespace,
                visit_comment(GreenComment) => Comment,
                visit_unterminated_comment(GreenUnterminatedComment) => UnterminatedComment,
                visit_escape(GreenEscape) => Escape,
                visit_illegal_character(GreenIllegalCharacter) => IllegalCharacter,
            );
        };
    }

    macro_rules! symbol_methods {
        ($mode:ident) => {
            kind_methods!($mode;
                visit_bracket_open(GreenBracketOpen) => BracketOpen,
                visit_bracket_close(GreenBracketClose) => BracketClose,
                visit_tag_name(GreenTagName) => TagName,
                visit_tag_value(GreenTagValue) => TagValue,
                visit_move_number(GreenMoveNumber) => MoveNumber,
                visit_period(GreenPeriod) => Period,
                visit_move(GreenMove) => Move,
                visit_nag(GreenNag) => Nag,
                visit_empty_nag(GreenEmptyNag) => EmptyNag,
                visit_overflow_nag(GreenOverflowNag) => OverflowNag,
                visit_orphan_parenthesis_close(GreenOrphanParenthesisClose) =>
                    OrphanParenthesisClose,
                visit_game_termination(GreenGameTermination) => GameTermination,
            );
        };
    }

    fn fell_back(node: &dyn Symbol) -> ! {
        panic!("{:?} reached the default method", node.kind())
    }

    /// Overrides every kind method, so a fallback is a dispatch bug.
    #[derive(Default)]
    struct Reached(Vec<SymbolKind>);

    impl BackgroundVisitor for Reached {
        fn default_background(&mut self, node: &dyn Symbol) {
            fell_back(node)
        }

        background_methods!(unit);
    }

    impl SymbolVisitor for Reached {
        fn default_symbol(&mut self, node: &dyn Symbol) {
            fell_back(node)
        }

        symbol_methods!(unit);
    }

    struct ReachedResult;

    impl BackgroundResultVisitor for ReachedResult {
        type Output = Vec<SymbolKind>;

        fn default_background(&mut self, node: &dyn Symbol) -> Vec<SymbolKind> {
            fell_back(node)
        }

        background_methods!(result);
    }

    impl SymbolResultVisitor for ReachedResult {
        type Output = Vec<SymbolKind>;

        fn default_symbol(&mut self, node: &dyn Symbol) -> Vec<SymbolKind> {
            fell_back(node)
        }

        symbol_methods!(result);
    }

    struct ReachedArg;

    impl BackgroundArgVisitor<u32> for ReachedArg {
        type Output = Vec<(SymbolKind, u32)>;

        fn default_background(&mut self, node: &dyn Symbol, _arg: u32) -> Self::Output {
            fell_back(node)
        }

        background_methods!(arg);
    }

    impl SymbolArgVisitor<u32> for ReachedArg {
        type Output = Vec<(SymbolKind, u32)>;

        fn default_symbol(&mut self, node: &dyn Symbol, _arg: u32) -> Self::Output {
            fell_back(node)
        }

        symbol_methods!(arg);
    }

    #[test]
    fn every_kind_reaches_its_own_method() {
        let backgrounds = [
            GreenWhitespace::new(TextSize::new(1)).unwrap().into(),
            GreenComment::new("{c}").unwrap().into(),
            GreenUnterminatedComment::new("{u").unwrap().into(),
            GreenEscape::new("%e").unwrap().into(),
            GreenBackground::illegal_character('#'),
        ];
        let symbols = [
            GreenSymbol::bracket_open(),
            GreenSymbol::bracket_close(),
            GreenTagName::new("Event").unwrap().into(),
            GreenTagValue::new("\"x\"", true).unwrap().into(),
            GreenMoveNumber::new("1").unwrap().into(),
            GreenSymbol::period(),
            GreenMove::new("e4").unwrap().into(),
            GreenSymbol::nag("$1").unwrap(),
            GreenSymbol::nag("$").unwrap(),
            GreenSymbol::nag("$300").unwrap(),
            GreenSymbol::orphan_parenthesis_close(),
            GreenGameTermination::new("1-0").unwrap().into(),
        ];
        let covered = backgrounds.iter().map(Symbol::kind).chain(symbols.iter().map(Symbol::kind));
        assert!(covered.eq(SymbolKind::ALL));

        for (arg, node) in (0..).zip(&backgrounds) {
            let kind = node.kind();
            let mut reached = Reached::default();
            reached.visit_background(Some(node));
            assert_eq!(reached.0, [kind]);
            assert_eq!(ReachedResult.visit_background(Some(node)), [kind]);
            assert_eq!(ReachedArg.visit_background(Some(node), arg), [(kind, arg)]);
        }
        for (arg, node) in (0..).zip(&symbols) {
            let kind = node.kind();
            let mut reached = Reached::default();
            reached.visit_symbol(Some(node));
            assert_eq!(reached.0, [kind]);
            assert_eq!(ReachedResult.visit_symbol(Some(node)), [kind]);
            assert_eq!(ReachedArg.visit_symbol(Some(node), arg), [(kind, arg)]);
        }
    }
}
