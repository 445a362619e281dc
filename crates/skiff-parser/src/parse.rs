//! Line-oriented structural parser.
//!
//! Builds the [`Ast`] by scanning lines for class/actor headers, function
//! signatures, and `var`/`val` declarations, and by balancing braces to find
//! where each block ends. The parser never fails: unrecognized lines are
//! skipped and an unterminated block absorbs the rest of the document.

use skiff_patterns as patterns;
use skiff_patterns::TypeKeyword;

use crate::ast::{Ast, NodeId, NodeKind};

/// Split a document into lines, tolerating both `\n` and `\r\n` endings.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l)).collect()
}

/// Parse a document into its structural tree.
///
/// The root is always a `Program` node spanning the whole document.
/// Re-parsing identical text yields an identical arena.
pub fn parse(text: &str) -> Ast {
    let lines = split_lines(text);
    let last_line = lines.len().saturating_sub(1);
    let mut ast = Ast::with_root(last_line);
    let root = ast.root();
    tracing::debug!(lines = lines.len(), "parsing document");

    // Top level: only class/actor headers open scopes.
    let mut i = 0;
    while i < lines.len() {
        if let Some(header) = patterns::match_type_header(lines[i]) {
            let kind = match header.keyword {
                TypeKeyword::Class => NodeKind::Class,
                TypeKeyword::Actor => NodeKind::Actor,
            };
            let end = block_end(&lines, i);
            let node = ast.push(root, kind, header.name, i, i, end);
            attach_params(&mut ast, node, lines[i], i);
            parse_block_body(&mut ast, &lines, node, i + 1, end);
            i = end + 1;
        } else {
            i += 1;
        }
    }
    ast
}

/// Whether a line opens a control block.
///
/// This is a substring test, not a token match: any line merely containing
/// `while`, `if`, `else`, or `for` counts. Identifiers like `format` trigger
/// it too; callers that match declarations and signatures first avoid the
/// common false positives.
fn is_control_line(line: &str) -> bool {
    ["while", "if", "else", "for"].iter().any(|kw| line.contains(kw))
}

/// Scan a block body between `start` and `end` (inclusive), attaching
/// function, variable, and nested control-block nodes to `parent`.
fn parse_block_body(ast: &mut Ast, lines: &[&str], parent: NodeId, start: usize, end: usize) {
    let mut i = start;
    while i <= end && i < lines.len() {
        let line = lines[i];
        if let Some(sig) = patterns::match_function(line) {
            let fn_end = block_end(lines, i).min(end);
            let node = ast.push(parent, NodeKind::Function, sig.name, i, i, fn_end);
            attach_params(ast, node, line, i);
            if fn_end > i {
                parse_block_body(ast, lines, node, i + 1, fn_end);
            }
            i = fn_end + 1;
        } else if let Some(decl) = patterns::match_declaration(line) {
            ast.push(parent, NodeKind::Variable, decl.name, i, i, i);
            i += 1;
        } else if is_control_line(line) {
            let blk_end = block_end(lines, i).min(end);
            let node = ast.push(parent, NodeKind::Block, "", i, i, blk_end);
            if blk_end > i {
                parse_block_body(ast, lines, node, i + 1, blk_end);
            }
            i = blk_end + 1;
        } else {
            i += 1;
        }
    }
}

/// Attach one `Variable` child per `name: Type` parameter on a header line.
fn attach_params(ast: &mut Ast, node: NodeId, line: &str, line_no: usize) {
    for param in patterns::match_params(line) {
        ast.push(node, NodeKind::Variable, param.name, line_no, line_no, line_no);
    }
}

/// Find the line on which the block starting at `header` closes.
///
/// Scans `{` as +1 and `}` as -1; counting begins at the first `{`, so a
/// leading `}` (as in `} else {`) is ignored. If the braces never balance,
/// the block is taken to end at the last line of the document.
fn block_end(lines: &[&str], header: usize) -> usize {
    let mut depth = 0i32;
    let mut started = false;
    for (offset, line) in lines[header..].iter().enumerate() {
        for c in line.chars() {
            match c {
                '{' => {
                    depth += 1;
                    started = true;
                }
                '}' if started => depth -= 1,
                _ => {}
            }
        }
        if started && depth == 0 {
            return header + offset;
        }
    }
    lines.len().saturating_sub(1)
}
