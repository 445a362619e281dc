//! Scope resolution: which symbols are visible at a given line.

use serde::Serialize;

use crate::ast::{Ast, NodeId, NodeKind};

/// A symbol visible at some line of the document.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Symbol {
    pub name: String,
    /// The declaring AST node.
    pub node: NodeId,
    /// The declaration line.
    pub line: usize,
    pub kind: NodeKind,
}

/// Collect the symbols textually visible at `line`.
///
/// Walks from the root to the innermost node whose span contains `line`,
/// gathering at every level the variable and function children declared at
/// or before `line`. Declarations after `line` in the same block are not
/// visible (no hoisting). When an inner declaration reuses an outer name,
/// the inner one wins.
pub fn symbols_at_line(ast: &Ast, line: usize) -> Vec<Symbol> {
    let mut names: Vec<String> = Vec::new();
    let mut symbols: Vec<Symbol> = Vec::new();

    let mut current = ast.root();
    loop {
        for &child in ast.children(current) {
            let data = ast.node(child);
            if matches!(data.kind, NodeKind::Variable | NodeKind::Function) && data.line <= line {
                let symbol = Symbol {
                    name: data.name.clone(),
                    node: child,
                    line: data.line,
                    kind: data.kind,
                };
                // Last write wins per name.
                match names.iter().position(|n| n == &data.name) {
                    Some(i) => symbols[i] = symbol,
                    None => {
                        names.push(data.name.clone());
                        symbols.push(symbol);
                    }
                }
            }
        }
        let next = ast
            .children(current)
            .iter()
            .copied()
            .find(|&c| {
                let d = ast.node(c);
                d.kind != NodeKind::Variable && d.start_line <= line && line <= d.end_line
            });
        match next {
            Some(child) => current = child,
            None => break,
        }
    }
    symbols
}
