//! Skiff structural parser: line-oriented document tree construction.
//!
//! This crate turns a document's raw text into an ordered tree of
//! class/actor/function/variable/block nodes with inclusive line spans
//! ([`ast::Ast`]), and answers "what is visible at line N" queries over
//! that tree ([`scope::symbols_at_line`]).
//!
//! Parsing is best-effort and total: unrecognized lines are skipped, and a
//! block whose braces never balance extends to the last line of the
//! document. Every call builds a fresh tree; nothing is cached here.

pub mod ast;
mod parse;
pub mod scope;

pub use ast::{Ast, NodeData, NodeId, NodeKind};
pub use parse::{parse, split_lines};
pub use scope::{symbols_at_line, Symbol};
