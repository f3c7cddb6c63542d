use mlang_db::{File, LineCol, RootDatabase};
use mlang_errors::Renderer;
use mlang_yellow::DiagnosticKind;
use salsa::Setter as _;

fn file(db: &RootDatabase, text: &str) -> File {
    File::new(db, "script.m".into(), text.to_owned())
}

#[test]
fn parse_is_memoized() {
    let db = RootDatabase::default();
    let file = file(&db, "x = 1;\n");

    let first = file.parse(&db);
    let second = file.parse(&db);
    assert!(std::ptr::eq(first, second));

    let tree = file.syntax_tree(&db).unwrap();
    assert_eq!(tree.full_text(), "x = 1;\n");
    assert_eq!(tree.source_name(), Some("script.m"));
}

#[test]
fn edits_reparse() {
    let mut db = RootDatabase::default();
    let file = file(&db, "x = 1;\n");
    assert!(file.diagnostics(&db).is_empty());

    file.set_text(&mut db).to("x = 1 +\n".to_owned());
    let diagnostics = file.diagnostics(&db);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::MissingToken(mlang_yellow::SyntaxKind::IDENTIFIER));
    assert_eq!(file.syntax_tree(&db).unwrap().full_text(), "x = 1 +\n");
}

#[test]
fn diagnostic_positions() {
    let db = RootDatabase::default();
    let file = file(&db, "x = 1\ny = 'oops\n");

    let diagnostics = file.diagnostics(&db);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::UnterminatedStringLiteral);
    assert_eq!(file.line_col(&db, diagnostics[0].range.start()).line, 1);
    assert_eq!(file.line_col(&db, 10.into()), LineCol { line: 1, col: 4 });
}

#[test]
fn fatal_failure() {
    let db = RootDatabase::default();
    let file = file(&db, "x = (1]\n");

    assert!(file.syntax_tree(&db).is_err());
    let diagnostics = file.diagnostics(&db);
    assert!(matches!(
        diagnostics.as_slice(),
        [only] if matches!(only.kind, DiagnosticKind::UnmatchedClosingBracket(_))
    ));

    let rendered = file.render_diagnostics(&db, &Renderer::plain());
    assert_eq!(rendered.len(), 1);
    assert!(rendered[0].contains("script.m"), "{}", rendered[0]);
}
