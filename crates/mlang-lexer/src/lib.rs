//! Turns MATLAB source into a flat list of tokens.
//!
//! Every character of the input ends up in exactly one token, either as its
//! significant text or as leading or trailing trivia. The lexer is
//! context-sensitive: whether `'` starts a string depends on the token
//! before it, and an identifier at the start of a statement may switch the
//! rest of the line into command syntax.

mod text_window;

use mlang_errors::{DiagnosticBag, ParseFailure};
pub use mlang_yellow::SyntaxKind;
use mlang_yellow::SyntaxKind::*;
use mlang_yellow::{
    Diagnostic, GreenToken, GreenTrivia, TokenValue, TriviaPiece, TriviaPieceKind, is_keyword,
};
use text_size::{TextLen as _, TextRange, TextSize};
pub use text_window::{EOF_CHAR, NullTerminatedTextWindow, Position, TextWindow};

/// A token together with where its full text starts.
#[derive(Debug, Clone)]
pub struct LexedToken {
    pub token: GreenToken,
    pub position: Position,
}

impl LexedToken {
    pub fn kind(&self) -> SyntaxKind {
        self.token.kind()
    }

    /// Start of the token including leading trivia.
    pub fn full_start(&self) -> TextSize {
        self.position.offset
    }

    /// Start of the significant text.
    pub fn start(&self) -> TextSize {
        self.position.offset + self.token.leading().len()
    }

    pub fn full_range(&self) -> TextRange {
        TextRange::at(self.position.offset, self.token.width())
    }

    pub fn range(&self) -> TextRange {
        TextRange::at(self.start(), self.token.text_trimmed().text_len())
    }
}

/// The result of lexing a whole file.
#[derive(Debug, Clone)]
pub struct Lexed {
    pub tokens: Vec<LexedToken>,
    pub diagnostics: DiagnosticBag,
}

pub fn tokenize(text: &str) -> Result<Lexed, ParseFailure> {
    Lexer::new(text).tokenize()
}

pub struct Lexer<'a> {
    window: NullTerminatedTextWindow<'a>,
    diagnostics: DiagnosticBag,
    token_diagnostics: Vec<Diagnostic>,
    trivia_pieces: Vec<TriviaPiece>,
    brackets: Vec<(SyntaxKind, TextRange)>,
    last_kind: Option<SyntaxKind>,
    last_had_trailing_trivia: bool,
    at_line_start: bool,
    tokens_on_statement: usize,
    command_candidate: bool,
    in_command: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self::from_window(TextWindow::new(text))
    }

    pub fn with_source_name(text: &'a str, source_name: &'a str) -> Self {
        Self::from_window(TextWindow::with_source_name(text, source_name))
    }

    fn from_window(window: TextWindow<'a>) -> Self {
        Self {
            window: NullTerminatedTextWindow::new(window),
            diagnostics: DiagnosticBag::new(),
            token_diagnostics: Vec::new(),
            trivia_pieces: Vec::with_capacity(4),
            brackets: Vec::new(),
            last_kind: None,
            last_had_trailing_trivia: false,
            at_line_start: true,
            tokens_on_statement: 0,
            command_candidate: false,
            in_command: false,
        }
    }

    pub fn source_name(&self) -> Option<&'a str> {
        self.window.window().source_name()
    }

    /// Lexes to the end of the input. The last token is always `EOF`.
    pub fn tokenize(mut self) -> Result<Lexed, ParseFailure> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind() == EOF;
            tokens.push(token);
            if done {
                break;
            }
        }

        tracing::debug!(
            source = self.source_name().unwrap_or("<input>"),
            tokens = tokens.len(),
            diagnostics = self.diagnostics.len(),
            "lexed"
        );
        Ok(Lexed { tokens, diagnostics: self.diagnostics })
    }

    pub fn next_token(&mut self) -> Result<LexedToken, ParseFailure> {
        let position = self.window.position();

        self.trivia(false);
        let trailing_start = self.trivia_pieces.len();
        if self.trivia_pieces.iter().any(|piece| piece.kind == TriviaPieceKind::Newline) {
            self.end_statement();
        }

        let start = self.window.offset();
        let (kind, value) = if self.command_word_follows() {
            self.command_word()
        } else {
            self.significant()
        };
        let range = TextRange::new(start, self.window.offset());
        self.trivia(true);

        let (leading, trailing) = self.trivia_pieces.split_at(trailing_start);
        let leading = GreenTrivia::new(leading);
        let trailing = GreenTrivia::new(trailing);
        self.trivia_pieces.clear();

        let text = self.window.text_from(position.offset);
        let mut token = GreenToken::new(kind, text, leading, trailing);
        if let Some(value) = value {
            token = token.with_value(value);
        }
        if !self.token_diagnostics.is_empty() {
            let relative = self.token_diagnostics.drain(..).map(|diagnostic| Diagnostic {
                range: diagnostic.range - position.offset,
                ..diagnostic
            });
            token = token.with_diagnostics(relative);
        }

        self.track_brackets(kind, range)?;
        self.after_token(&token);

        Ok(LexedToken { token, position })
    }

    fn after_token(&mut self, token: &GreenToken) {
        let kind = token.kind();
        let trailing = token.trailing();

        self.command_candidate = kind == IDENTIFIER
            && self.tokens_on_statement == 0
            && !self.in_command
            && !is_keyword(token.text_trimmed())
            && !trailing.is_empty()
            && trailing.pieces().iter().all(|piece| piece.kind == TriviaPieceKind::Whitespace);

        self.last_kind = Some(kind);
        self.last_had_trailing_trivia = !trailing.is_empty();
        self.tokens_on_statement += 1;
        self.at_line_start = token.ends_line();

        let separator = matches!(kind, SEMICOLON | COMMA) && self.brackets.is_empty();
        if token.ends_line() || separator {
            self.end_statement();
        }
    }

    fn end_statement(&mut self) {
        self.tokens_on_statement = 0;
        self.in_command = false;
        self.command_candidate = false;
    }

    fn track_brackets(&mut self, kind: SyntaxKind, range: TextRange) -> Result<(), ParseFailure> {
        if kind.is_opening_bracket() {
            self.brackets.push((kind, range));
        } else if kind.is_closing_bracket() {
            match self.brackets.last() {
                Some(&(open, _)) if open.closing_bracket() == Some(kind) => {
                    self.brackets.pop();
                }
                _ => {
                    tracing::warn!(?kind, ?range, "unmatched closing bracket");
                    return Err(ParseFailure::unmatched_closing_bracket(kind, range));
                }
            }
        } else if kind == EOF
            && let Some(&(open, open_range)) = self.brackets.last()
        {
            tracing::warn!(kind = ?open, range = ?open_range, "unmatched opening bracket");
            return Err(ParseFailure::unmatched_opening_bracket(open, open_range));
        }
        Ok(())
    }

    fn trivia(&mut self, trailing: bool) {
        let mut at_line_start = !trailing && self.at_line_start;

        loop {
            let start = self.window.offset();
            let kind = match self.window.peek_char() {
                ' ' | '\t' | '\x0b' | '\x0c' => {
                    self.window.consume_while(is_horizontal_whitespace);
                    TriviaPieceKind::Whitespace
                }
                '\r' if self.window.peek_char_at(1) == '\n' => {
                    self.window.consume_chars(2);
                    TriviaPieceKind::Newline
                }
                '\r' => {
                    self.window.consume_char();
                    TriviaPieceKind::Whitespace
                }
                '\n' => {
                    self.window.consume_char();
                    TriviaPieceKind::Newline
                }
                '%' if at_line_start && self.block_comment_opens() => {
                    self.block_comment();
                    TriviaPieceKind::MultilineComment
                }
                '%' => {
                    self.consume_rest_of_line();
                    TriviaPieceKind::Comment
                }
                '.' if self.window.peek_char_at(1) == '.' && self.window.peek_char_at(2) == '.' => {
                    self.consume_rest_of_line();
                    self.consume_newline();
                    TriviaPieceKind::LineContinuation
                }
                _ => break,
            };

            self.trivia_pieces.push(TriviaPiece::new(kind, self.window.offset() - start));
            match kind {
                TriviaPieceKind::Newline if trailing => break,
                TriviaPieceKind::Newline | TriviaPieceKind::MultilineComment => at_line_start = true,
                TriviaPieceKind::Whitespace => {}
                _ => at_line_start = false,
            }
        }
    }

    fn consume_rest_of_line(&mut self) {
        self.window.consume_while(|c| c != '\n' && c != '\r');
    }

    fn consume_newline(&mut self) {
        match self.window.peek_char() {
            '\r' if self.window.peek_char_at(1) == '\n' => self.window.consume_chars(2),
            '\n' | '\r' => self.window.consume_chars(1),
            _ => {}
        }
    }

    /// `%{` opens a block comment only when it is alone on its line.
    fn block_comment_opens(&self) -> bool {
        let line = self.window.rest_of_line();
        line.starts_with("%{") && line[2..].trim().is_empty()
    }

    fn block_comment(&mut self) {
        let start = self.window.offset();
        loop {
            self.consume_rest_of_line();
            if self.window.is_eof() {
                let range = TextRange::new(start, self.window.offset());
                let diagnostic = self.diagnostics.unexpected_end_of_file(range);
                self.token_diagnostics.push(diagnostic);
                return;
            }
            self.consume_newline();
            if self.window.rest_of_line().trim() == "%}" {
                self.consume_rest_of_line();
                return;
            }
        }
    }

    fn command_word_follows(&self) -> bool {
        if self.in_command {
            return !matches!(self.window.peek_char(), ';' | ',') && !self.window.is_eof();
        }
        self.command_candidate && self.brackets.is_empty() && self.starts_bare_word()
    }

    /// Decides whether the text after `name ` reads as command arguments
    /// rather than the rest of an expression.
    fn starts_bare_word(&self) -> bool {
        if self.window.is_eof() {
            return false;
        }
        match self.window.peek_char() {
            '\n' | '\r' | ';' | ',' | '=' | '(' | '%' => false,
            _ => match binary_operator_len(self.window.window().rest()) {
                Some(len) => {
                    let next = self.window.peek_char_at(len);
                    !(next.is_whitespace() || next == EOF_CHAR)
                }
                None => true,
            },
        }
    }

    fn command_word(&mut self) -> (SyntaxKind, Option<TokenValue>) {
        let mut value = String::new();
        loop {
            match self.window.peek_char() {
                ' ' | '\t' | '\x0b' | '\x0c' | '\n' | '\r' | ';' | ',' => break,
                EOF_CHAR if self.window.is_eof() => break,
                '\'' => {
                    self.window.consume_char();
                    self.quoted_word_segment(&mut value);
                }
                c => {
                    self.window.consume_char();
                    value.push(c);
                }
            }
        }

        if !self.in_command {
            tracing::trace!(offset = ?self.window.offset(), "command syntax");
        }
        self.in_command = true;
        (UNQUOTED_STRING_LITERAL, Some(TokenValue::String(value.into())))
    }

    fn quoted_word_segment(&mut self, value: &mut String) {
        loop {
            match self.window.peek_char() {
                '\'' if self.window.peek_char_at(1) == '\'' => {
                    self.window.consume_chars(2);
                    value.push('\'');
                }
                '\'' => {
                    self.window.consume_char();
                    return;
                }
                '\n' | '\r' => return,
                EOF_CHAR if self.window.is_eof() => return,
                c => {
                    self.window.consume_char();
                    value.push(c);
                }
            }
        }
    }

    fn significant(&mut self) -> (SyntaxKind, Option<TokenValue>) {
        match self.window.peek_char() {
            EOF_CHAR if self.window.is_eof() => (EOF, None),
            c if c.is_ascii_alphabetic() => {
                self.window.consume_while(|c| c.is_ascii_alphanumeric() || c == '_');
                (IDENTIFIER, None)
            }
            '0'..='9' => self.number(),
            '.' if self.window.peek_char_at(1).is_ascii_digit() => self.number(),
            '\'' if self.apostrophe_is_transpose() => {
                self.window.consume_char();
                (APOSTROPHE, None)
            }
            '\'' => self.string_literal('\'', STRING_LITERAL),
            '"' => self.string_literal('"', DOUBLE_QUOTED_STRING_LITERAL),
            _ => (self.punctuation(), None),
        }
    }

    /// `'` directly after a name or a closing bracket is a transpose.
    fn apostrophe_is_transpose(&self) -> bool {
        let after_operand = self
            .last_kind
            .is_some_and(|kind| kind == IDENTIFIER || kind.is_closing_bracket());
        after_operand && !self.last_had_trailing_trivia
    }

    fn number(&mut self) -> (SyntaxKind, Option<TokenValue>) {
        #[derive(Clone, Copy)]
        enum State {
            Start,
            DigitsBeforeDot,
            AfterDot,
            DigitsAfterDot,
            AfterE,
            SignAfterE,
            DigitsAfterE,
        }
        use State::*;

        let start = self.window.offset();
        let mut state = Start;
        loop {
            let c = self.window.peek_char();
            state = match (state, c) {
                (Start | DigitsBeforeDot, '0'..='9') => DigitsBeforeDot,
                (Start, '.') => AfterDot,
                (DigitsBeforeDot, '.') => {
                    let next = self.window.peek_char_at(1);
                    let continuation = next == '.' && self.window.peek_char_at(2) == '.';
                    if continuation || matches!(next, '^' | '*' | '/' | '\\' | '\'') {
                        break;
                    }
                    AfterDot
                }
                (AfterDot | DigitsAfterDot, '0'..='9') => DigitsAfterDot,
                (DigitsBeforeDot | AfterDot | DigitsAfterDot, 'e' | 'E') => AfterE,
                (AfterE, '+' | '-') => SignAfterE,
                (AfterE | SignAfterE | DigitsAfterE, '0'..='9') => DigitsAfterE,
                (AfterE | SignAfterE, c) => {
                    let range = if self.window.is_eof() {
                        TextRange::empty(self.window.offset())
                    } else {
                        TextRange::at(self.window.offset(), c.text_len())
                    };
                    let diagnostic = self.diagnostics.unexpected_character_in_number(c, range);
                    self.token_diagnostics.push(diagnostic);
                    break;
                }
                (_, 'i' | 'j' | 'I' | 'J') => {
                    self.window.consume_char();
                    let text = self.window.text_from(start);
                    let value = text[..text.len() - 1].parse().ok().map(TokenValue::Imaginary);
                    return (NUMBER_LITERAL, value);
                }
                _ => break,
            };
            self.window.consume_char();
        }

        let value = self.window.text_from(start).parse().ok().map(TokenValue::Number);
        (NUMBER_LITERAL, value)
    }

    /// Lexes a string delimited by `quote`, where a doubled quote stands for
    /// itself. Strings end at the line break if the closing quote is missing.
    fn string_literal(&mut self, quote: char, kind: SyntaxKind) -> (SyntaxKind, Option<TokenValue>) {
        let start = self.window.offset();
        self.window.consume_char();

        let mut value = String::new();
        loop {
            match self.window.peek_char() {
                c if c == quote && self.window.peek_char_at(1) == quote => {
                    self.window.consume_chars(2);
                    value.push(quote);
                }
                c if c == quote => {
                    self.window.consume_char();
                    break;
                }
                '\n' | '\r' => {
                    self.unterminated_string(start);
                    break;
                }
                EOF_CHAR if self.window.is_eof() => {
                    self.unterminated_string(start);
                    break;
                }
                c => {
                    self.window.consume_char();
                    value.push(c);
                }
            }
        }

        (kind, Some(TokenValue::String(value.into())))
    }

    fn unterminated_string(&mut self, start: TextSize) {
        let range = TextRange::new(start, self.window.offset());
        let diagnostic = self.diagnostics.unterminated_string_literal(range);
        self.token_diagnostics.push(diagnostic);
    }

    fn punctuation(&mut self) -> SyntaxKind {
        if let Some(kind) = two_char_operator(self.window.peek_char(), self.window.peek_char_at(1)) {
            self.window.consume_chars(2);
            return kind;
        }

        let start = self.window.offset();
        let c = self.window.consume_char();
        match one_char_operator(c) {
            Some(kind) => kind,
            None => {
                let range = TextRange::new(start, self.window.offset());
                let diagnostic = self.diagnostics.unknown_symbol(c, range);
                self.token_diagnostics.push(diagnostic);
                BAD_TOKEN
            }
        }
    }
}

fn is_horizontal_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0b' | '\x0c')
}

fn two_char_operator(first: char, second: char) -> Option<SyntaxKind> {
    Some(match (first, second) {
        ('=', '=') => EQUALS_EQUALS,
        ('~', '=') => TILDE_EQUALS,
        ('<', '=') => LESS_OR_EQUALS,
        ('>', '=') => GREATER_OR_EQUALS,
        ('&', '&') => AMPERSAND_AMPERSAND,
        ('|', '|') => PIPE_PIPE,
        ('.', '*') => DOT_STAR,
        ('.', '/') => DOT_SLASH,
        ('.', '\\') => DOT_BACKSLASH,
        ('.', '^') => DOT_CARET,
        ('.', '\'') => DOT_APOSTROPHE,
        _ => return None,
    })
}

fn one_char_operator(c: char) -> Option<SyntaxKind> {
    Some(match c {
        '=' => EQUALS,
        '|' => PIPE,
        '&' => AMPERSAND,
        '<' => LESS,
        '>' => GREATER,
        ':' => COLON,
        '+' => PLUS,
        '-' => MINUS,
        '*' => STAR,
        '/' => SLASH,
        '\\' => BACKSLASH,
        '^' => CARET,
        '~' => TILDE,
        '\'' => APOSTROPHE,
        '@' => AT,
        '.' => DOT,
        ',' => COMMA,
        ';' => SEMICOLON,
        '(' => OPEN_PARENTHESIS,
        ')' => CLOSE_PARENTHESIS,
        '[' => OPEN_SQUARE_BRACKET,
        ']' => CLOSE_SQUARE_BRACKET,
        '{' => OPEN_BRACE,
        '}' => CLOSE_BRACE,
        _ => return None,
    })
}

/// Length of the binary operator at the start of `text`, if any.
fn binary_operator_len(text: &str) -> Option<usize> {
    let mut chars = text.chars();
    let first = chars.next()?;
    let second = chars.next().unwrap_or(EOF_CHAR);

    if two_char_operator(first, second).is_some_and(|kind| kind != DOT_APOSTROPHE) {
        return Some(2);
    }
    matches!(first, '+' | '-' | '*' | '/' | '\\' | '^' | '<' | '>' | '&' | '|' | ':').then_some(1)
}

#[cfg(test)]
mod tests;
