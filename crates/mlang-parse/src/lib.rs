//! Recursive-descent parser producing a lossless [`SyntaxTree`].
//!
//! Recoverable problems leave missing tokens or `ERROR` nodes in the tree
//! and a diagnostic in [`SyntaxTree::diagnostics`]. Bracket mismatches and
//! unknown class members abort with a [`ParseFailure`].

mod grammar;
mod parser;

pub use mlang_errors::ParseFailure;
use mlang_lexer::Lexer;
use mlang_yellow::{Diagnostic, GreenNode, SyntaxTree};

/// Knobs for where parsing starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Parse as if already inside `[...]`, where whitespace separates
    /// elements and `a -b` is two expressions.
    pub inside_brackets: bool,
}

/// The green root and every diagnostic from lexing and parsing, in source
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct Parse {
    green: GreenNode,
    diagnostics: Vec<Diagnostic>,
}

impl Parse {
    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn syntax_tree(&self, source_name: Option<&str>) -> SyntaxTree {
        SyntaxTree::new(self.green.clone(), self.diagnostics.clone(), source_name)
    }
}

pub fn parse(text: &str) -> Result<SyntaxTree, ParseFailure> {
    Ok(parse_green(text, None, ParseOptions::default())?.syntax_tree(None))
}

pub fn parse_named(text: &str, source_name: &str) -> Result<SyntaxTree, ParseFailure> {
    let parse = parse_green(text, Some(source_name), ParseOptions::default())?;
    Ok(parse.syntax_tree(Some(source_name)))
}

pub fn parse_with_options(
    text: &str,
    source_name: Option<&str>,
    options: ParseOptions,
) -> Result<SyntaxTree, ParseFailure> {
    Ok(parse_green(text, source_name, options)?.syntax_tree(source_name))
}

pub fn parse_green(
    text: &str,
    source_name: Option<&str>,
    options: ParseOptions,
) -> Result<Parse, ParseFailure> {
    let lexer = match source_name {
        Some(name) => Lexer::with_source_name(text, name),
        None => Lexer::new(text),
    };
    let lexed = lexer.tokenize()?;

    let mut parser = parser::Parser::new(&lexed.tokens, options);
    let green = grammar::file(&mut parser)?;

    let mut diagnostics = lexed.diagnostics;
    diagnostics.extend(parser.finish());
    let mut diagnostics = diagnostics.into_vec();
    diagnostics.sort_by_key(Diagnostic::start);

    tracing::debug!(
        source = source_name.unwrap_or("<input>"),
        width = u32::from(green.width()),
        diagnostics = diagnostics.len(),
        "parsed"
    );
    debug_assert_eq!(usize::from(green.width()), text.len());

    Ok(Parse { green, diagnostics })
}
