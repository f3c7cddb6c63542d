//! Incremental front end. A [`File`] is a salsa input; its parse and line
//! index are memoized until the text changes.

use camino::Utf8PathBuf;
pub use line_index::{LineCol, LineIndex};
use mlang_errors::{ParseFailure, RenderDiagnostic as _, Renderer};
pub use mlang_parse::Parse;
use mlang_parse::ParseOptions;
use mlang_yellow::{Diagnostic, SyntaxTree};
use text_size::TextSize;

#[salsa::input(debug)]
pub struct File {
    #[returns(ref)]
    pub path: Utf8PathBuf,
    #[returns(deref)]
    pub text: String,
}

#[salsa::tracked]
impl File {
    #[salsa::tracked(returns(ref), no_eq)]
    pub fn parse(self, db: &dyn salsa::Database) -> Result<Parse, ParseFailure> {
        let path = self.path(db);
        tracing::debug!(%path, "parsing file");
        mlang_parse::parse_green(self.text(db), Some(path.as_str()), ParseOptions::default())
    }

    #[salsa::tracked(returns(ref), no_eq)]
    pub fn line_index(self, db: &dyn salsa::Database) -> LineIndex {
        LineIndex::new(self.text(db))
    }
}

impl File {
    /// A fresh red tree over the memoized green root.
    pub fn syntax_tree(self, db: &dyn salsa::Database) -> Result<SyntaxTree, ParseFailure> {
        let source_name = self.path(db).as_str();
        self.parse(db).as_ref().map(|parse| parse.syntax_tree(Some(source_name))).map_err(Clone::clone)
    }

    /// Every diagnostic of the file. A fatal failure is the only one.
    pub fn diagnostics(self, db: &dyn salsa::Database) -> Vec<Diagnostic> {
        match self.parse(db) {
            Ok(parse) => parse.diagnostics().to_vec(),
            Err(failure) => vec![failure.diagnostic().clone()],
        }
    }

    /// Zero-based line and column of `offset`.
    pub fn line_col(self, db: &dyn salsa::Database, offset: TextSize) -> LineCol {
        self.line_index(db).line_col(offset)
    }

    pub fn render_diagnostics(self, db: &dyn salsa::Database, renderer: &Renderer) -> Vec<String> {
        let path = self.path(db).as_str();
        let text = self.text(db);
        self.diagnostics(db).iter().map(|diagnostic| diagnostic.render(renderer, path, text)).collect()
    }
}

#[salsa::db]
#[derive(Default, Clone)]
pub struct RootDatabase {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl salsa::Database for RootDatabase {}
