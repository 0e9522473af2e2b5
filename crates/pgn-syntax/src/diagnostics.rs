//! Diagnostic collection over a red tree, in document order.

use std::convert::Infallible;
use std::ops::ControlFlow;

use pgn_errors::Diagnostic;
use text_size::TextSize;

use crate::{
    BackgroundArgVisitor, GreenBackground, GreenSymbol, RedTerminal, Symbol, SymbolArgVisitor,
    Walk,
};

/// Gathers the diagnostics of every terminal, given each terminal's absolute
/// start.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    visited: usize,
}

impl DiagnosticCollector {
    /// All diagnostics under `root`, in document order.
    pub fn collect(root: &impl Walk) -> Vec<Diagnostic> {
        let _span = tracing::trace_span!("collect_diagnostics").entered();

        let mut collector = Self::default();
        let mut diagnostics = Vec::new();
        let ControlFlow::Continue(()) = root.walk_terminals::<Infallible>(&mut |terminal| {
            diagnostics.extend(collector.visit_terminal(terminal));
            ControlFlow::Continue(())
        });

        tracing::trace!(terminals = collector.visited, found = diagnostics.len(), "collected");
        diagnostics
    }

    pub fn visit_terminal(&mut self, terminal: RedTerminal<'_>) -> Vec<Diagnostic> {
        match terminal {
            RedTerminal::Background(node) => {
                self.visit_background(Some(node.green()), node.start())
            }
            RedTerminal::Symbol(node) => self.visit_symbol(Some(node.green()), node.start()),
        }
    }

    fn diagnostics_of(&mut self, node: &dyn Symbol, start: TextSize) -> Vec<Diagnostic> {
        self.visited += 1;
        let found = node.diagnostic(start).into_iter().collect::<Vec<_>>();
        if !found.is_empty() {
            tracing::trace!(kind = ?node.kind(), ?start, "defective terminal");
        }
        found
    }
}

impl BackgroundArgVisitor<TextSize> for DiagnosticCollector {
    type Output = Vec<Diagnostic>;

    fn default_background(&mut self, node: &dyn Symbol, start: TextSize) -> Vec<Diagnostic> {
        self.diagnostics_of(node, start)
    }
}

impl SymbolArgVisitor<TextSize> for DiagnosticCollector {
    type Output = Vec<Diagnostic>;

    fn default_symbol(&mut self, node: &dyn Symbol, start: TextSize) -> Vec<Diagnostic> {
        self.diagnostics_of(node, start)
    }
}

impl GreenBackground {
    /// Shorthand for running a [`DiagnosticCollector`] over this one node.
    pub fn collect_diagnostics(&self, start: TextSize) -> Vec<Diagnostic> {
        DiagnosticCollector::default().visit_background(Some(self), start)
    }
}

impl GreenSymbol {
    /// Shorthand for running a [`DiagnosticCollector`] over this one node.
    pub fn collect_diagnostics(&self, start: TextSize) -> Vec<Diagnostic> {
        DiagnosticCollector::default().visit_symbol(Some(self), start)
    }
}
