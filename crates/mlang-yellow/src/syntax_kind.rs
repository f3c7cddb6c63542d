#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    WHITESPACE,
    NEWLINE,
    COMMENT,
    MULTILINE_COMMENT,
    LINE_CONTINUATION,

    EOF,
    BAD_TOKEN,
    IDENTIFIER,
    NUMBER_LITERAL,
    STRING_LITERAL,
    DOUBLE_QUOTED_STRING_LITERAL,
    UNQUOTED_STRING_LITERAL,

    EQUALS,
    PIPE_PIPE,
    AMPERSAND_AMPERSAND,
    PIPE,
    AMPERSAND,
    LESS,
    LESS_OR_EQUALS,
    GREATER,
    GREATER_OR_EQUALS,
    EQUALS_EQUALS,
    TILDE_EQUALS,
    COLON,
    PLUS,
    MINUS,
    STAR,
    DOT_STAR,
    SLASH,
    DOT_SLASH,
    BACKSLASH,
    DOT_BACKSLASH,
    CARET,
    DOT_CARET,
    TILDE,
    APOSTROPHE,
    DOT_APOSTROPHE,
    AT,
    DOT,
    COMMA,
    SEMICOLON,
    OPEN_PARENTHESIS,
    CLOSE_PARENTHESIS,
    OPEN_SQUARE_BRACKET,
    CLOSE_SQUARE_BRACKET,
    OPEN_BRACE,
    CLOSE_BRACE,

    FILE,
    LIST,
    ERROR,

    EXPRESSION_STATEMENT,
    EMPTY_STATEMENT,
    FUNCTION_DECLARATION,
    FUNCTION_OUTPUT_DESCRIPTION,
    FUNCTION_INPUT_DESCRIPTION,
    CLASS_DECLARATION,
    ATTRIBUTE_LIST,
    ATTRIBUTE,
    ATTRIBUTE_ASSIGNMENT,
    BASE_CLASS_LIST,
    PROPERTIES_LIST,
    METHODS_LIST,
    EVENTS_LIST,
    ENUMERATION_LIST,
    ENUMERATION_ITEM,
    ENUMERATION_ITEM_VALUE,
    METHOD_DEFINITION,
    ABSTRACT_METHOD_DECLARATION,
    SWITCH_STATEMENT,
    SWITCH_CASE,
    WHILE_LOOP_STATEMENT,
    IF_STATEMENT,
    ELSEIF_CLAUSE,
    ELSE_CLAUSE,
    FOR_LOOP_STATEMENT,
    TRY_CATCH_STATEMENT,
    CATCH_CLAUSE,

    ASSIGNMENT_EXPRESSION,
    BINARY_OPERATION_EXPRESSION,
    UNARY_PREFIX_OPERATION_EXPRESSION,
    UNARY_POSTFIX_OPERATION_EXPRESSION,
    IDENTIFIER_NAME_EXPRESSION,
    NUMBER_LITERAL_EXPRESSION,
    STRING_LITERAL_EXPRESSION,
    DOUBLE_QUOTED_STRING_LITERAL_EXPRESSION,
    UNQUOTED_STRING_LITERAL_EXPRESSION,
    ARRAY_LITERAL_EXPRESSION,
    CELL_ARRAY_LITERAL_EXPRESSION,
    EMPTY_EXPRESSION,
    PARENTHESIZED_EXPRESSION,
    CELL_ARRAY_ELEMENT_ACCESS_EXPRESSION,
    FUNCTION_CALL_EXPRESSION,
    MEMBER_ACCESS_EXPRESSION,
    INDIRECT_MEMBER_ACCESS_EXPRESSION,
    COMMAND_EXPRESSION,
    BASE_CLASS_INVOKATION_EXPRESSION,
    NAMED_FUNCTION_HANDLE_EXPRESSION,
    LAMBDA_EXPRESSION,
    COMPOUND_NAME,
}

use SyntaxKind::*;

impl SyntaxKind {
    /// Token kinds with a single fixed spelling.
    pub const FIXED_TEXT_TOKENS: [Self; 35] = [
        EQUALS,
        PIPE_PIPE,
        AMPERSAND_AMPERSAND,
        PIPE,
        AMPERSAND,
        LESS,
        LESS_OR_EQUALS,
        GREATER,
        GREATER_OR_EQUALS,
        EQUALS_EQUALS,
        TILDE_EQUALS,
        COLON,
        PLUS,
        MINUS,
        STAR,
        DOT_STAR,
        SLASH,
        DOT_SLASH,
        BACKSLASH,
        DOT_BACKSLASH,
        CARET,
        DOT_CARET,
        TILDE,
        APOSTROPHE,
        DOT_APOSTROPHE,
        AT,
        DOT,
        COMMA,
        SEMICOLON,
        OPEN_PARENTHESIS,
        CLOSE_PARENTHESIS,
        OPEN_SQUARE_BRACKET,
        CLOSE_SQUARE_BRACKET,
        OPEN_BRACE,
        CLOSE_BRACE,
    ];

    pub const fn is_trivia(self) -> bool {
        matches!(self, WHITESPACE | NEWLINE | COMMENT | MULTILINE_COMMENT | LINE_CONTINUATION)
    }

    pub fn is_token(self) -> bool {
        self < FILE
    }

    pub fn is_node(self) -> bool {
        self >= FILE
    }

    pub fn is_list(self) -> bool {
        self == LIST
    }

    pub const fn fixed_text(self) -> Option<&'static str> {
        Some(match self {
            EQUALS => "=",
            PIPE_PIPE => "||",
            AMPERSAND_AMPERSAND => "&&",
            PIPE => "|",
            AMPERSAND => "&",
            LESS => "<",
            LESS_OR_EQUALS => "<=",
            GREATER => ">",
            GREATER_OR_EQUALS => ">=",
            EQUALS_EQUALS => "==",
            TILDE_EQUALS => "~=",
            COLON => ":",
            PLUS => "+",
            MINUS => "-",
            STAR => "*",
            DOT_STAR => ".*",
            SLASH => "/",
            DOT_SLASH => "./",
            BACKSLASH => "\\",
            DOT_BACKSLASH => ".\\",
            CARET => "^",
            DOT_CARET => ".^",
            TILDE => "~",
            APOSTROPHE => "'",
            DOT_APOSTROPHE => ".'",
            AT => "@",
            DOT => ".",
            COMMA => ",",
            SEMICOLON => ";",
            OPEN_PARENTHESIS => "(",
            CLOSE_PARENTHESIS => ")",
            OPEN_SQUARE_BRACKET => "[",
            CLOSE_SQUARE_BRACKET => "]",
            OPEN_BRACE => "{",
            CLOSE_BRACE => "}",
            _ => return None,
        })
    }

    pub const fn is_opening_bracket(self) -> bool {
        matches!(self, OPEN_PARENTHESIS | OPEN_SQUARE_BRACKET | OPEN_BRACE)
    }

    pub const fn is_closing_bracket(self) -> bool {
        matches!(self, CLOSE_PARENTHESIS | CLOSE_SQUARE_BRACKET | CLOSE_BRACE)
    }

    /// The closer that balances an opening bracket.
    pub const fn closing_bracket(self) -> Option<Self> {
        match self {
            OPEN_PARENTHESIS => Some(CLOSE_PARENTHESIS),
            OPEN_SQUARE_BRACKET => Some(CLOSE_SQUARE_BRACKET),
            OPEN_BRACE => Some(CLOSE_BRACE),
            _ => None,
        }
    }
}

const KEYWORDS: [&str; 18] = [
    "break",
    "case",
    "catch",
    "classdef",
    "continue",
    "else",
    "elseif",
    "end",
    "for",
    "function",
    "if",
    "otherwise",
    "parfor",
    "return",
    "spmd",
    "switch",
    "try",
    "while",
];

/// Keywords are lexed as identifiers; this tells them apart by text.
pub fn is_keyword(text: &str) -> bool {
    KEYWORDS.contains(&text)
}
