use std::path::Path;
use std::sync::Arc;

use swc_common::{FileName, Globals, SourceMap, Span, Spanned};
use swc_ecma_ast::{Decl, Module, ModuleItem, Stmt};
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax, error::Error as SwcError};
use thiserror::Error;

/// Source dialect, picked from the file name only to configure the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    Js,
    Jsx,
    Ts,
    Tsx,
}

impl ScriptKind {
    /// Unknown or missing extensions fall back to plain JavaScript.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some("jsx") => Self::Jsx,
            Some("ts") | Some("mts") | Some("cts") => Self::Ts,
            Some("tsx") => Self::Tsx,
            _ => Self::Js,
        }
    }

    fn syntax(self) -> Syntax {
        match self {
            Self::Js => Syntax::Es(EsSyntax::default()),
            Self::Jsx => Syntax::Es(EsSyntax {
                jsx: true,
                ..Default::default()
            }),
            Self::Ts => Syntax::Typescript(TsSyntax::default()),
            Self::Tsx => Syntax::Typescript(TsSyntax {
                tsx: true,
                ..Default::default()
            }),
        }
    }
}

/// A syntax error with its resolved position (1-based line and column).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxDiagnostic {
    pub line: usize,
    pub col: usize,
    pub message: String,
}

/// The parser gave up on the file entirely.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to parse {file_path}:{}:{}: {}", .diagnostic.line, .diagnostic.col, .diagnostic.message)]
pub struct ParseError {
    pub file_path: String,
    pub diagnostic: SyntaxDiagnostic,
}

#[derive(Debug)]
pub struct ParsedScript {
    /// For sources that only parse as a function body (Foundry script macros
    /// use top-level `return`), this holds the single wrapper function.
    pub module: Module,
    /// Errors the parser recovered from. The module is still usable.
    pub recovered: Vec<SyntaxDiagnostic>,
}

const BODY_FN: &str = "__script_body__";
const BODY_PREFIX: &str = "async function __script_body__() {\n";
const BODY_SUFFIX: &str = "\n}";

/// Best-effort parse of a script file.
///
/// Recoverable syntax errors are kept in `ParsedScript::recovered` instead of
/// failing the parse. When the source is not a clean module, it is retried as
/// a function body and whichever parse reports fewer errors wins; when both
/// fail outright the module error is returned. The function body parse only
/// counts when the wrapper's own braces enclose the whole source, so
/// unbalanced braces in the source are never hidden. Diagnostic positions
/// always refer to the original source.
pub fn parse_script_source(code: String, file_path: &str) -> Result<ParsedScript, ParseError> {
    let kind = ScriptKind::from_path(file_path);
    let wrapped = format!("{}{}{}", BODY_PREFIX, code, BODY_SUFFIX);

    let as_module = parse_with(kind, code, file_path);
    if matches!(&as_module, Ok(parsed) if parsed.recovered.is_empty()) {
        return as_module;
    }

    let mut as_body = match parse_with(kind, wrapped, file_path) {
        Ok(parsed) if encloses_whole_source(&parsed.module) => parsed,
        _ => return as_module,
    };
    for diagnostic in &mut as_body.recovered {
        diagnostic.line = diagnostic.line.saturating_sub(1).max(1);
    }

    match as_module {
        Ok(parsed) if parsed.recovered.len() <= as_body.recovered.len() => Ok(parsed),
        _ => Ok(as_body),
    }
}

/// The wrapped parse holds exactly the wrapper function. A brace in the
/// source that closes the wrapper early leaves the wrapper's own closing
/// brace to another item, or to a fatal error.
fn encloses_whole_source(module: &Module) -> bool {
    match module.body.as_slice() {
        [ModuleItem::Stmt(Stmt::Decl(Decl::Fn(f)))] => &*f.ident.sym == BODY_FN,
        _ => false,
    }
}

fn parse_with(kind: ScriptKind, code: String, file_path: &str) -> Result<ParsedScript, ParseError> {
    use swc_common::GLOBALS;

    let source_map: Arc<SourceMap> = Default::default();

    // Wrap in GLOBALS.set() so span hygiene data has a home
    GLOBALS.set(&Globals::new(), || {
        let source_file =
            source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let mut parser = Parser::new(kind.syntax(), StringInput::from(&*source_file), None);

        let parsed = parser.parse_module();
        let recovered: Vec<SyntaxDiagnostic> = parser
            .take_errors()
            .into_iter()
            .map(|err| to_diagnostic(&source_map, &err))
            .collect();

        match parsed {
            Ok(module) => Ok(ParsedScript { module, recovered }),
            Err(err) => Err(ParseError {
                file_path: file_path.to_string(),
                diagnostic: to_diagnostic(&source_map, &err),
            }),
        }
    })
}

fn to_diagnostic(source_map: &SourceMap, err: &SwcError) -> SyntaxDiagnostic {
    let (line, col) = position(source_map, err.span());
    SyntaxDiagnostic {
        line,
        col,
        message: err.kind().msg().to_string(),
    }
}

fn position(source_map: &SourceMap, span: Span) -> (usize, usize) {
    let loc = source_map.lookup_char_pos(span.lo);
    (loc.line, loc.col_display + 1)
}
