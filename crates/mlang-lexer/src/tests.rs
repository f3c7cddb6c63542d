use std::fmt::Write as _;

use expect_test::{Expect, expect};
use mlang_yellow::{DiagnosticKind, TokenValue, TriviaPieceKind};

use super::*;

fn lex(text: &str) -> Lexed {
    tokenize(text).unwrap_or_else(|failure| panic!("{text:?} failed: {failure}"))
}

fn kinds(text: &str) -> Vec<SyntaxKind> {
    lex(text).tokens.iter().map(LexedToken::kind).collect()
}

#[track_caller]
fn check(text: &str, expect: Expect) {
    let lexed = lex(text);
    let mut actual = String::new();
    for token in &lexed.tokens {
        _ = writeln!(actual, "{:?} {:?}", token.kind(), token.token.text());
    }
    for diagnostic in &lexed.diagnostics {
        _ = writeln!(actual, "error {diagnostic}");
    }
    expect.assert_eq(&actual);

    let rebuilt: String = lexed.tokens.iter().map(|token| token.token.text()).collect();
    assert_eq!(rebuilt, text);
}

fn single_value(text: &str) -> Option<TokenValue> {
    let lexed = lex(text);
    assert_eq!(lexed.tokens.len(), 2, "{text:?}");
    assert_eq!(lexed.tokens[0].token.text(), text);
    lexed.tokens[0].token.value().cloned()
}

#[test]
fn assignment_with_transpose() {
    check(
        "x = y'",
        expect![[r#"
            IDENTIFIER "x "
            EQUALS "= "
            IDENTIFIER "y"
            APOSTROPHE "'"
            EOF ""
        "#]],
    );
}

#[test]
fn apostrophe_after_trivia_starts_a_string() {
    assert_eq!(kinds("a'"), [IDENTIFIER, APOSTROPHE, EOF]);
    assert_eq!(kinds("x = [1 2]'"), [
        IDENTIFIER,
        EQUALS,
        OPEN_SQUARE_BRACKET,
        NUMBER_LITERAL,
        NUMBER_LITERAL,
        CLOSE_SQUARE_BRACKET,
        APOSTROPHE,
        EOF
    ]);
    check(
        "x = a '",
        expect![[r#"
            IDENTIFIER "x "
            EQUALS "= "
            IDENTIFIER "a "
            STRING_LITERAL "'"
            EOF ""
            error 6..7: unterminated string literal
        "#]],
    );
}

#[test]
fn string_values() {
    let lexed = lex("x = 'it''s'");
    assert_eq!(lexed.tokens[2].kind(), STRING_LITERAL);
    assert_eq!(lexed.tokens[2].token.value(), Some(&TokenValue::String("it's".into())));

    let lexed = lex(r#"s = "say ""hi""""#);
    assert_eq!(lexed.tokens[2].kind(), DOUBLE_QUOTED_STRING_LITERAL);
    assert_eq!(lexed.tokens[2].token.value(), Some(&TokenValue::String(r#"say "hi""#.into())));
}

#[test]
fn unterminated_string_stops_at_line_end() {
    check(
        "s = 'abc\nt",
        expect![[r#"
            IDENTIFIER "s "
            EQUALS "= "
            STRING_LITERAL "'abc\n"
            IDENTIFIER "t"
            EOF ""
            error 4..8: unterminated string literal
        "#]],
    );
}

#[test]
fn number_values() {
    let cases = [
        ("42", TokenValue::Number(42.0)),
        ("3.25", TokenValue::Number(3.25)),
        (".5", TokenValue::Number(0.5)),
        ("7.", TokenValue::Number(7.0)),
        ("1e3", TokenValue::Number(1000.0)),
        ("1.5E-2", TokenValue::Number(0.015)),
        ("2.5e+1", TokenValue::Number(25.0)),
        ("2i", TokenValue::Imaginary(2.0)),
        ("2.5j", TokenValue::Imaginary(2.5)),
        ("1e2i", TokenValue::Imaginary(100.0)),
        ("7.e2", TokenValue::Number(700.0)),
        ("7.i", TokenValue::Imaginary(7.0)),
    ];

    for (text, value) in cases {
        assert_eq!(single_value(text), Some(value), "{text:?}");
    }
}

#[test]
fn dot_operators_after_integers() {
    check(
        "1.^2",
        expect![[r#"
            NUMBER_LITERAL "1"
            DOT_CARET ".^"
            NUMBER_LITERAL "2"
            EOF ""
        "#]],
    );
    assert_eq!(kinds("1.'"), [NUMBER_LITERAL, DOT_APOSTROPHE, EOF]);
    assert_eq!(kinds("1./x"), [NUMBER_LITERAL, DOT_SLASH, IDENTIFIER, EOF]);
    assert_eq!(kinds("1.*x"), [NUMBER_LITERAL, DOT_STAR, IDENTIFIER, EOF]);
    assert_eq!(kinds("1.\\x"), [NUMBER_LITERAL, DOT_BACKSLASH, IDENTIFIER, EOF]);
}

#[test]
fn continuation_after_integer() {
    check(
        "1...\n+2",
        expect![[r#"
            NUMBER_LITERAL "1...\n"
            PLUS "+"
            NUMBER_LITERAL "2"
            EOF ""
        "#]],
    );
}

#[test]
fn malformed_exponent() {
    check(
        "1ex",
        expect![[r#"
            NUMBER_LITERAL "1e"
            IDENTIFIER "x"
            EOF ""
            error 2..3: unexpected character 'x' while parsing number
        "#]],
    );

    let lexed = lex("1e");
    assert_eq!(lexed.tokens[0].token.value(), None);
    assert_eq!(lexed.tokens[0].token.diagnostics().len(), 1);
}

#[test]
fn exponent_after_trailing_dot() {
    check(
        "7.e2",
        expect![[r#"
            NUMBER_LITERAL "7.e2"
            EOF ""
        "#]],
    );
}

#[test]
fn second_dot_ends_fraction() {
    check(
        "1.5.*2",
        expect![[r#"
            NUMBER_LITERAL "1.5"
            DOT_STAR ".*"
            NUMBER_LITERAL "2"
            EOF ""
        "#]],
    );
}

#[test]
fn malformed_signed_exponent() {
    check(
        "1e+x",
        expect![[r#"
            NUMBER_LITERAL "1e+"
            IDENTIFIER "x"
            EOF ""
            error 3..4: unexpected character 'x' while parsing number
        "#]],
    );

    let lexed = lex("n = 1e+;");
    assert_eq!(lexed.tokens[2].token.text(), "1e+");
    assert_eq!(lexed.tokens[2].token.value(), None);
    assert!(matches!(
        lexed.diagnostics.as_slice(),
        [only] if only.kind == DiagnosticKind::UnexpectedCharacterInNumber(';')
            && only.range == TextRange::new(7.into(), 8.into())
    ));
}

#[test]
fn comments_end_at_line_break() {
    check(
        "x = 1 % set x\ny = 2",
        expect![[r#"
            IDENTIFIER "x "
            EQUALS "= "
            NUMBER_LITERAL "1 % set x\n"
            IDENTIFIER "y "
            EQUALS "= "
            NUMBER_LITERAL "2"
            EOF ""
        "#]],
    );
}

#[test]
fn trailing_trivia_stops_after_newline() {
    let lexed = lex("x\n\n  y");
    let x = &lexed.tokens[0].token;
    let y = &lexed.tokens[1].token;

    assert_eq!(x.text(), "x\n");
    assert!(x.ends_line());
    assert_eq!(y.text(), "\n  y");
    let leading: Vec<_> = y.leading().pieces().iter().map(|piece| piece.kind).collect();
    assert_eq!(leading, [TriviaPieceKind::Newline, TriviaPieceKind::Whitespace]);
}

#[test]
fn crlf_is_one_newline() {
    let lexed = lex("x\r\ny");
    let trailing = lexed.tokens[0].token.trailing().pieces();
    assert_eq!(trailing.len(), 1);
    assert_eq!(trailing[0].kind, TriviaPieceKind::Newline);
    assert_eq!(trailing[0].len, TextSize::from(2));
}

#[test]
fn block_comment() {
    let lexed = lex("%{\nhidden\n%}\nx");
    assert_eq!(lexed.tokens.len(), 2);
    assert!(lexed.diagnostics.is_empty());

    let x = &lexed.tokens[0].token;
    assert_eq!(x.kind(), IDENTIFIER);
    assert_eq!(x.text_trimmed(), "x");
    let leading: Vec<_> = x.leading().pieces().iter().map(|piece| piece.kind).collect();
    assert_eq!(leading, [TriviaPieceKind::MultilineComment, TriviaPieceKind::Newline]);
    assert_eq!(x.leading().pieces()[0].len, TextSize::from(12));
}

#[test]
fn block_comment_needs_its_own_line() {
    let lexed = lex("x = 1 %{\ny");
    let one = &lexed.tokens[2].token;
    let trailing: Vec<_> = one.trailing().pieces().iter().map(|piece| piece.kind).collect();
    assert_eq!(trailing, [
        TriviaPieceKind::Whitespace,
        TriviaPieceKind::Comment,
        TriviaPieceKind::Newline
    ]);
}

#[test]
fn unterminated_block_comment() {
    check(
        "%{\nnever closed",
        expect![[r#"
            EOF "%{\nnever closed"
            error 0..15: unexpected end of file
        "#]],
    );
}

#[test]
fn command_syntax() {
    check(
        "hold on\nx = 1",
        expect![[r#"
            IDENTIFIER "hold "
            UNQUOTED_STRING_LITERAL "on\n"
            IDENTIFIER "x "
            EQUALS "= "
            NUMBER_LITERAL "1"
            EOF ""
        "#]],
    );
    check(
        "format long g; y",
        expect![[r#"
            IDENTIFIER "format "
            UNQUOTED_STRING_LITERAL "long "
            UNQUOTED_STRING_LITERAL "g"
            SEMICOLON "; "
            IDENTIFIER "y"
            EOF ""
        "#]],
    );
}

#[test]
fn command_words_keep_quoted_segments() {
    let lexed = lex("disp 'hello world'");
    assert_eq!(lexed.tokens[1].kind(), UNQUOTED_STRING_LITERAL);
    assert_eq!(lexed.tokens[1].token.text(), "'hello world'");
    assert_eq!(lexed.tokens[1].token.value(), Some(&TokenValue::String("hello world".into())));
}

#[test]
fn binary_operator_is_not_a_command() {
    assert_eq!(kinds("a + b"), [IDENTIFIER, PLUS, IDENTIFIER, EOF]);
    assert_eq!(kinds("a +b"), [IDENTIFIER, UNQUOTED_STRING_LITERAL, EOF]);
    assert_eq!(kinds("a == b"), [IDENTIFIER, EQUALS_EQUALS, IDENTIFIER, EOF]);
    assert_eq!(kinds("a (1)"), [
        IDENTIFIER,
        OPEN_PARENTHESIS,
        NUMBER_LITERAL,
        CLOSE_PARENTHESIS,
        EOF
    ]);
    assert_eq!(kinds("end x"), [IDENTIFIER, IDENTIFIER, EOF]);
    assert_eq!(kinds("y = a b"), [IDENTIFIER, EQUALS, IDENTIFIER, IDENTIFIER, EOF]);
}

#[test]
fn unknown_symbol() {
    check(
        "x = $",
        expect![[r#"
            IDENTIFIER "x "
            EQUALS "= "
            BAD_TOKEN "$"
            EOF ""
            error 4..5: unknown symbol '$'
        "#]],
    );

    let lexed = lex("x = $");
    let diagnostics = lexed.tokens[2].token.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::UnknownSymbol('$'));
    assert_eq!(diagnostics[0].range, TextRange::new(0.into(), 1.into()));
}

#[test]
fn unmatched_brackets_are_fatal() {
    let failure = tokenize("(1]").unwrap_err();
    assert_eq!(
        failure.diagnostic().kind,
        DiagnosticKind::UnmatchedClosingBracket(CLOSE_SQUARE_BRACKET)
    );
    assert_eq!(failure.diagnostic().range, TextRange::new(2.into(), 3.into()));

    let failure = tokenize("f(1))").unwrap_err();
    assert_eq!(failure.diagnostic().range, TextRange::new(4.into(), 5.into()));

    let failure = tokenize("x = (1").unwrap_err();
    assert_eq!(
        failure.diagnostic().kind,
        DiagnosticKind::UnmatchedOpeningBracket(OPEN_PARENTHESIS)
    );
    assert_eq!(failure.diagnostic().range, TextRange::new(4.into(), 5.into()));
}

#[test]
fn positions() {
    let lexed = lex("a\n  bb");
    let bb = &lexed.tokens[1];

    assert_eq!(bb.position, Position { offset: 2.into(), line: 1, column: 0 });
    assert_eq!(bb.start(), TextSize::from(4));
    assert_eq!(bb.range(), TextRange::new(4.into(), 6.into()));
    assert_eq!(bb.full_range(), TextRange::new(2.into(), 6.into()));
}

#[test]
fn source_name() {
    let lexer = Lexer::with_source_name("x", "script.m");
    assert_eq!(lexer.source_name(), Some("script.m"));
}

#[test]
fn round_trips_a_program() {
    let text = "\
function [a, b] = swap(x, y) % swap two values
    a = y; b = x;
end

%{
block
%}
r = swap(1, ...
    2)';
disp done
";
    let lexed = lex(text);
    let rebuilt: String = lexed.tokens.iter().map(|token| token.token.text()).collect();
    assert_eq!(rebuilt, text);
    assert!(lexed.diagnostics.is_empty());
    assert_eq!(lexed.tokens.last().map(LexedToken::kind), Some(EOF));
}
