//! String-bearing file classifier.
//!
//! Decides whether a script holds any string literal or template literal,
//! which is the signal that a patch candidate has text worth translating.
//! The check runs on the parsed tree, so quotes inside comments never count.

use swc_ecma_ast::{Expr, Module, ModuleItem, Stmt, Str, Tpl};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::parsers::script::{ParseError, parse_script_source};

/// Depth-first search for the first string or template node.
///
/// `Visit` has no early exit, so the high-fanout nodes stop descending once
/// a string has been found.
#[derive(Debug, Default)]
struct StringLiteralFinder {
    found: bool,
}

impl Visit for StringLiteralFinder {
    fn visit_module_item(&mut self, node: &ModuleItem) {
        if !self.found {
            node.visit_children_with(self);
        }
    }

    fn visit_stmt(&mut self, node: &Stmt) {
        if !self.found {
            node.visit_children_with(self);
        }
    }

    fn visit_expr(&mut self, node: &Expr) {
        if !self.found {
            node.visit_children_with(self);
        }
    }

    fn visit_str(&mut self, _node: &Str) {
        self.found = true;
    }

    fn visit_tpl(&mut self, _node: &Tpl) {
        self.found = true;
    }
}

/// Returns true if the module contains at least one string literal or
/// template literal, at any nesting depth.
pub fn has_string_literal(module: &Module) -> bool {
    let mut finder = StringLiteralFinder::default();
    module.visit_with(&mut finder);
    finder.found
}

/// Parse `content` (dialect chosen from `file_name`) and classify it.
///
/// # Examples
///
/// ```
/// use patchset::core::has_string_literal_in_content;
///
/// assert!(has_string_literal_in_content("let x = 'a';", "file.js").unwrap());
/// assert!(!has_string_literal_in_content("// 'x'", "file.js").unwrap());
/// assert!(!has_string_literal_in_content("", "file.js").unwrap());
/// ```
pub fn has_string_literal_in_content(content: &str, file_name: &str) -> Result<bool, ParseError> {
    let parsed = parse_script_source(content.to_string(), file_name)?;
    Ok(has_string_literal(&parsed.module))
}

/// Heuristic used when the parser cannot make sense of a fragment.
pub fn contains_quote_char(text: &str) -> bool {
    text.chars().any(|c| matches!(c, '"' | '\'' | '`'))
}
