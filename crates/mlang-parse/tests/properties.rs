use mlang_lexer::{SyntaxKind, tokenize};
use mlang_parse::parse;
use mlang_yellow::ast::{self, AstNode as _, Expression, Statement, Visitor};
use mlang_yellow::{SyntaxTrivia, TextRange};

const PROGRAMS: &[&str] = &[
    "",
    "% Comment\n  2 + 3",
    "x = [1, 2; 3 4]';\n",
    "function y = f(x)\n  y = x.^2; % square\nend\n",
    "%{\nblock comment\n%}\nx = 1 ...\n  + 2;\n",
    "disp('it''s')\nhold on\n",
    "s = \"double\" + 'single';\r\nt = s';\r\n",
    "x = 1 $ 2",
    "y = 'unterminated\nz = 3\n",
    "n = 1e+;\n",
    "if x, y = 1; else y = 2; end",
    "end end\n",
    "2 + ;",
    "c = {@(a) a + 1, @sin};\nc{1}(2)\n",
];

fn kinds(text: &str) -> Vec<SyntaxKind> {
    let lexed = tokenize(text).unwrap();
    lexed.tokens.iter().map(|token| token.kind()).filter(|&kind| kind != SyntaxKind::EOF).collect()
}

#[test]
fn round_trip() {
    for text in PROGRAMS {
        let tree = parse(text).unwrap_or_else(|failure| panic!("{text:?}: {failure}"));
        assert_eq!(tree.full_text(), *text);
        assert_eq!(usize::from(tree.root().full_span().len()), text.len(), "{text:?}");
    }
}

#[test]
fn single_token() {
    for kind in SyntaxKind::FIXED_TEXT_TOKENS {
        // A quote with nothing before it opens a string.
        if kind == SyntaxKind::APOSTROPHE {
            continue;
        }

        let text = kind.fixed_text().unwrap();
        // Brackets have to balance, so they are lexed as a pair.
        let (source, expected) = match kind {
            SyntaxKind::OPEN_PARENTHESIS => ("()", vec![kind, SyntaxKind::CLOSE_PARENTHESIS]),
            SyntaxKind::OPEN_SQUARE_BRACKET => ("[]", vec![kind, SyntaxKind::CLOSE_SQUARE_BRACKET]),
            SyntaxKind::OPEN_BRACE => ("{}", vec![kind, SyntaxKind::CLOSE_BRACE]),
            SyntaxKind::CLOSE_PARENTHESIS => ("()", vec![SyntaxKind::OPEN_PARENTHESIS, kind]),
            SyntaxKind::CLOSE_SQUARE_BRACKET => ("[]", vec![SyntaxKind::OPEN_SQUARE_BRACKET, kind]),
            SyntaxKind::CLOSE_BRACE => ("{}", vec![SyntaxKind::OPEN_BRACE, kind]),
            _ => (text, vec![kind]),
        };
        assert_eq!(kinds(source), expected, "{text:?}");
    }
}

/// Every fixed-text token plus one sample of each variable-text kind. A
/// lone quote opens a string, so `'` only appears as a transpose below.
fn samples() -> Vec<(SyntaxKind, &'static str)> {
    let mut samples: Vec<_> = SyntaxKind::FIXED_TEXT_TOKENS
        .into_iter()
        .filter(|&kind| kind != SyntaxKind::APOSTROPHE)
        .map(|kind| (kind, kind.fixed_text().unwrap()))
        .collect();
    samples.extend([
        (SyntaxKind::IDENTIFIER, "x"),
        (SyntaxKind::NUMBER_LITERAL, "1"),
        (SyntaxKind::STRING_LITERAL, "'s'"),
        (SyntaxKind::DOUBLE_QUOTED_STRING_LITERAL, "\"s\""),
    ]);
    samples
}

fn requires_separator(
    (first, first_text): (SyntaxKind, &str),
    (second, second_text): (SyntaxKind, &str),
) -> bool {
    use SyntaxKind::*;

    match (first, second) {
        (IDENTIFIER, IDENTIFIER | NUMBER_LITERAL)
        | (NUMBER_LITERAL, NUMBER_LITERAL | DOT)
        | (DOT, NUMBER_LITERAL) => true,
        // A doubled quote stays inside the string.
        (STRING_LITERAL, STRING_LITERAL)
        | (DOUBLE_QUOTED_STRING_LITERAL, DOUBLE_QUOTED_STRING_LITERAL) => true,
        // A quote right after an operand is a transpose.
        (IDENTIFIER, STRING_LITERAL) => true,
        (_, STRING_LITERAL) if first.is_closing_bracket() => true,
        _ => {
            let joined: String =
                first_text.chars().last().into_iter().chain(second_text.chars().next()).collect();
            first_text.len() == 1
                && SyntaxKind::FIXED_TEXT_TOKENS.iter().any(|kind| kind.fixed_text() == Some(joined.as_str()))
        }
    }
}

fn opener_of(kind: SyntaxKind) -> Option<SyntaxKind> {
    [SyntaxKind::OPEN_PARENTHESIS, SyntaxKind::OPEN_SQUARE_BRACKET, SyntaxKind::OPEN_BRACE]
        .into_iter()
        .find(|open| open.closing_bracket() == Some(kind))
}

/// Lexes `first separator second` inside `[...]`, which keeps command
/// syntax out of the way, with brackets balanced around the pair. Returns
/// the kinds between the padding, `None` for a pair that cannot balance or
/// a text that fails to lex.
fn pair_kinds(pair: [SyntaxKind; 2], text: &str) -> Option<Vec<SyntaxKind>> {
    let mut open = Vec::new();
    let mut prefix = Vec::new();
    for kind in pair {
        if kind.is_opening_bracket() {
            open.push(kind);
        } else if let Some(opener) = opener_of(kind) {
            match open.pop() {
                Some(last) if last == opener => {}
                Some(_) => return None,
                None => prefix.insert(0, opener),
            }
        }
    }
    let suffix: Vec<SyntaxKind> = open.iter().rev().filter_map(|kind| kind.closing_bracket()).collect();

    let padding =
        |kinds: &[SyntaxKind]| kinds.iter().map(|kind| kind.fixed_text().unwrap()).collect::<String>();
    let source = format!("[{}{text}{}]", padding(&prefix), padding(&suffix));
    let lexed = tokenize(&source).ok()?;
    let all: Vec<SyntaxKind> =
        lexed.tokens.iter().map(|token| token.kind()).filter(|&kind| kind != SyntaxKind::EOF).collect();

    let front = prefix.len() + 1;
    let back = suffix.len() + 1;
    (all.len() >= front + back).then(|| all[front..all.len() - back].to_vec())
}

#[test]
fn token_pairs() {
    let samples = samples();
    for &first in &samples {
        for &second in &samples {
            let pair = [first.0, second.0];
            let bare = format!("{}{}", first.1, second.1);
            // `(]` and friends can never balance.
            if first.0.is_opening_bracket()
                && second.0.is_closing_bracket()
                && first.0.closing_bracket() != Some(second.0)
            {
                continue;
            }

            if !requires_separator(first, second) {
                assert_eq!(pair_kinds(pair, &bare), Some(pair.to_vec()), "{bare:?}");
                continue;
            }

            assert_ne!(pair_kinds(pair, &bare), Some(pair.to_vec()), "{bare:?}");
            for separator in [" ", "\n", "\t", "\r\n"] {
                let text = format!("{}{separator}{}", first.1, second.1);
                assert_eq!(pair_kinds(pair, &text), Some(pair.to_vec()), "{text:?}");
            }
        }
    }
}

#[test]
fn transpose_needs_no_separator() {
    use SyntaxKind::*;

    assert_eq!(kinds("x'"), [IDENTIFIER, APOSTROPHE]);
    assert_eq!(kinds("(x)'"), [OPEN_PARENTHESIS, IDENTIFIER, CLOSE_PARENTHESIS, APOSTROPHE]);
    assert_eq!(kinds("x.'"), [IDENTIFIER, DOT_APOSTROPHE]);
}

#[test]
fn identifiers_need_a_line_break() {
    use SyntaxKind::*;

    assert_eq!(kinds("ab"), [IDENTIFIER]);
    assert_eq!(kinds("a\nb"), [IDENTIFIER, IDENTIFIER]);
    assert_eq!(kinds("a b"), [IDENTIFIER, UNQUOTED_STRING_LITERAL]);
}

#[test]
fn positions() {
    let tree = parse("% Comment\n  2 + 3").unwrap();
    let Some(Statement::ExpressionStatement(statement)) = tree.file().unwrap().statements().iter().next()
    else {
        panic!("expected an expression statement");
    };
    let Some(Expression::BinaryOperationExpression(binary)) = statement.expression() else {
        panic!("expected a binary expression");
    };

    assert_eq!(u32::from(binary.lhs().unwrap().syntax().span().start()), 12);
    assert_eq!(u32::from(binary.operation().unwrap().span().start()), 14);
    assert_eq!(u32::from(binary.rhs().unwrap().syntax().span().start()), 16);
    assert_eq!(binary.syntax().full_span(), TextRange::new(0.into(), 17.into()));
    assert_eq!(binary.syntax().span(), TextRange::new(12.into(), 17.into()));
}

#[test]
fn fatal_errors() {
    for text in [
        "x = (1]",
        "x = [1, 2",
        "y = 3)",
        "classdef A\n  x = 1\nend",
        "classdef A\n  methods\n    1\n  end\nend",
    ] {
        assert!(parse(text).is_err(), "{text:?}");
    }
}

#[derive(Default)]
struct Collector {
    identifiers: Vec<String>,
    functions: Vec<String>,
    comments: usize,
}

impl Visitor for Collector {
    fn visit_identifier_name_expression(&mut self, node: &ast::IdentifierNameExpression) {
        self.identifiers.push(node.syntax().text());
        self.visit_node(node.syntax());
    }

    fn visit_function_declaration(&mut self, node: &ast::FunctionDeclaration) {
        self.functions.push(node.name().map(|name| name.text()).unwrap_or_default());
        self.visit_node(node.syntax());
    }

    fn visit_trivia(&mut self, trivia: &SyntaxTrivia<'_>) {
        if trivia.kind == SyntaxKind::COMMENT {
            self.comments += 1;
        }
    }
}

#[test]
fn visitor() {
    let tree = parse("function y = f(x)\n  % body\n  y = g(x) + h;\nend\n").unwrap();
    let mut collector = Collector::default();
    ast::accept(tree.root(), &mut collector);

    assert_eq!(collector.functions, ["f"]);
    assert_eq!(collector.identifiers, ["y", "g", "x", "h"]);
    assert_eq!(collector.comments, 1);
}
