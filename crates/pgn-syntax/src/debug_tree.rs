//! Human-readable dump of a red tree, for tests and debugging.

use std::convert::Infallible;
use std::fmt::Write as _;
use std::ops::ControlFlow;

use crate::{
    BackgroundResultVisitor, GreenComment, GreenDocument, GreenEscape, GreenGameTermination,
    GreenMove, GreenMoveNumber, GreenNag, GreenOverflowNag, GreenTagName, GreenTagValue,
    GreenUnterminatedComment, NodeKind, RedNode, RedParent, RedTerminal, SymbolResultVisitor,
    Walk, WalkEvent,
};

/// Quotes the text of terminals that carry any.
struct PayloadLabel;

impl PayloadLabel {
    fn quote(text: &str) -> Option<String> {
        Some(format!("{text:?}"))
    }
}

impl BackgroundResultVisitor for PayloadLabel {
    type Output = Option<String>;

    fn visit_comment(&mut self, node: &GreenComment) -> Option<String> {
        Self::quote(node.text())
    }

    fn visit_unterminated_comment(&mut self, node: &GreenUnterminatedComment) -> Option<String> {
        Self::quote(node.text())
    }

    fn visit_escape(&mut self, node: &GreenEscape) -> Option<String> {
        Self::quote(node.text())
    }
}

impl SymbolResultVisitor for PayloadLabel {
    type Output = Option<String>;

    fn visit_tag_name(&mut self, node: &GreenTagName) -> Option<String> {
        Self::quote(node.text())
    }

    fn visit_tag_value(&mut self, node: &GreenTagValue) -> Option<String> {
        Self::quote(node.text())
    }

    fn visit_move_number(&mut self, node: &GreenMoveNumber) -> Option<String> {
        Self::quote(node.text())
    }

    fn visit_move(&mut self, node: &GreenMove) -> Option<String> {
        Self::quote(node.text())
    }

    fn visit_nag(&mut self, node: &GreenNag) -> Option<String> {
        Self::quote(node.text())
    }

    fn visit_overflow_nag(&mut self, node: &GreenOverflowNag) -> Option<String> {
        Self::quote(node.text())
    }

    fn visit_game_termination(&mut self, node: &GreenGameTermination) -> Option<String> {
        Self::quote(node.text())
    }
}

fn is_hidden(node: &dyn RedParent) -> bool {
    node.kind() == NodeKind::Trivia && node.range().is_empty()
}

impl RedNode<'_, GreenDocument> {
    /// Indented `Kind@start..end` listing of the whole tree, one node per
    /// line. Empty trivia is left out.
    pub fn debug_tree(&self) -> String {
        let mut out = String::new();
        let mut depth = 0usize;

        let ControlFlow::Continue(()) = self.walk::<Infallible>(&mut |event| {
            let indent = depth * 2;
            match event {
                WalkEvent::Enter(node) | WalkEvent::Leave(node) if is_hidden(node) => {}
                WalkEvent::Enter(node) => {
                    let _ = writeln!(out, "{:indent$}{:?}@{:?}", "", node.kind(), node.range());
                    depth += 1;
                }
                WalkEvent::Leave(_) => depth -= 1,
                WalkEvent::Terminal(terminal) => {
                    let label = match terminal {
                        RedTerminal::Background(node) => {
                            PayloadLabel.visit_background(Some(node.green()))
                        }
                        RedTerminal::Symbol(node) => PayloadLabel.visit_symbol(Some(node.green())),
                    };
                    let (kind, range) = (terminal.kind(), terminal.range());
                    let _ = write!(out, "{:indent$}{kind:?}@{range:?}", "");
                    if let Some(label) = label {
                        let _ = write!(out, " {label}");
                    }
                    out.push('\n');
                }
            }
            ControlFlow::Continue(())
        });

        out
    }
}

#[cfg(test)]
mod tests {
    use expect_test::expect;
    use text_size::TextSize;
    use triomphe::Arc;

    use crate::{
        GreenBackground, GreenComment, GreenDocument, GreenMove, GreenMoveNumber, GreenPly,
        GreenSymbol, GreenTagName, GreenTagPair, GreenTagValue, GreenWhitespace, RedNode,
        TriviaBuilder,
    };

    fn space() -> GreenBackground {
        GreenWhitespace::new(TextSize::new(1)).unwrap().into()
    }

    /// `[Event "x"] 1e4 {best}#$1 `
    #[test]
    fn dump_lists_every_node() {
        let mut trivia = TriviaBuilder::new();

        let open = trivia.attach_tag_element(GreenSymbol::bracket_open()).unwrap();
        let name = trivia.attach_tag_element(GreenTagName::new("Event").unwrap().into()).unwrap();
        trivia.push(space());
        let value = GreenTagValue::new("\"x\"", true).unwrap();
        let value = trivia.attach_tag_element(value.into()).unwrap();
        let close = trivia.attach_tag_element(GreenSymbol::bracket_close()).unwrap();
        let pair = GreenTagPair::new([open, name, value, close]).unwrap();

        trivia.push(space());
        let move_number = trivia.attach(GreenMoveNumber::new("1").unwrap().into());
        let ply_move = trivia.attach(GreenMove::new("e4").unwrap().into());
        trivia.push(space());
        trivia.push_comment(Arc::new(GreenComment::new("{best}").unwrap()));
        trivia.push(GreenBackground::illegal_character('#'));
        let nag = trivia.attach(GreenSymbol::nag("$1").unwrap());
        let ply = GreenPly::new(Some(move_number), Some(ply_move), [nag]).unwrap();

        trivia.push(space());
        let green = GreenDocument::new([pair.into(), ply.into()], trivia.finish());

        expect![[r#"
            Document@0..26
              TagPair@0..11
                TagElementWithTrivia@0..1
                  BracketOpen@0..1
                TagElementWithTrivia@1..6
                  TagName@1..6 "Event"
                TagElementWithTrivia@6..10
                  Trivia@6..7
                    Whitespace@6..7
                  TagValue@7..10 "\"x\""
                TagElementWithTrivia@10..11
                  BracketClose@10..11
              Ply@11..25
                WithTrivia@11..13
                  Trivia@11..12
                    Whitespace@11..12
                  MoveNumber@12..13 "1"
                WithTrivia@13..15
                  Move@13..15 "e4"
                WithTrivia@15..25
                  Trivia@15..23
                    TriviaElement@15..22
                      Whitespace@15..16
                      Comment@16..22 "{best}"
                    IllegalCharacter@22..23
                  Nag@23..25 "$1"
              Trivia@25..26
                Whitespace@25..26
        "#]]
        .assert_eq(&RedNode::new(&green).debug_tree());
    }
}
