use text_size::{TextLen as _, TextSize};

pub const EOF_CHAR: char = '\0';

/// Line, column and byte offset of a point in the source. Lines and
/// columns start at zero; columns count characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub offset: TextSize,
    pub line: u32,
    pub column: u32,
}

/// A cursor over source text that keeps track of where it is.
#[derive(Debug, Clone)]
pub struct TextWindow<'a> {
    text: &'a str,
    source_name: Option<&'a str>,
    position: Position,
}

impl<'a> TextWindow<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, source_name: None, position: Position::default() }
    }

    pub fn with_source_name(text: &'a str, source_name: &'a str) -> Self {
        Self { source_name: Some(source_name), ..Self::new(text) }
    }

    pub fn source_name(&self) -> Option<&'a str> {
        self.source_name
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn offset(&self) -> TextSize {
        self.position.offset
    }

    pub fn is_eof(&self) -> bool {
        self.position.offset == self.text.text_len()
    }

    /// Text not consumed yet.
    pub fn rest(&self) -> &'a str {
        &self.text[usize::from(self.position.offset)..]
    }

    /// Text between `start` and the current offset.
    pub fn text_from(&self, start: TextSize) -> &'a str {
        &self.text[usize::from(start)..usize::from(self.position.offset)]
    }

    /// The remainder of the current line, without its line break.
    pub fn rest_of_line(&self) -> &'a str {
        let rest = self.rest();
        rest.find('\n').map_or(rest, |end| &rest[..end])
    }

    pub fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn peek_char_at(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    pub fn consume_char(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.position.offset += c.text_len();
        if c == '\n' {
            self.position.line += 1;
            self.position.column = 0;
        } else {
            self.position.column += 1;
        }
        Some(c)
    }

    pub fn consume_chars(&mut self, n: usize) {
        for _ in 0..n {
            if self.consume_char().is_none() {
                break;
            }
        }
    }

    pub fn get_and_consume_chars(&mut self, n: usize) -> &'a str {
        let start = self.offset();
        self.consume_chars(n);
        self.text_from(start)
    }
}

/// A [`TextWindow`] that answers [`EOF_CHAR`] for any peek past the end,
/// so lookahead needs no bounds checks.
#[derive(Debug, Clone)]
pub struct NullTerminatedTextWindow<'a> {
    window: TextWindow<'a>,
}

impl<'a> NullTerminatedTextWindow<'a> {
    pub fn new(window: TextWindow<'a>) -> Self {
        Self { window }
    }

    pub fn window(&self) -> &TextWindow<'a> {
        &self.window
    }

    pub fn peek_char(&self) -> char {
        self.window.peek_char().unwrap_or(EOF_CHAR)
    }

    pub fn peek_char_at(&self, n: usize) -> char {
        self.window.peek_char_at(n).unwrap_or(EOF_CHAR)
    }

    pub fn consume_char(&mut self) -> char {
        self.window.consume_char().unwrap_or(EOF_CHAR)
    }

    pub fn consume_chars(&mut self, n: usize) {
        self.window.consume_chars(n);
    }

    pub fn consume_while(&mut self, predicate: impl Fn(char) -> bool) {
        while !self.is_eof() && predicate(self.peek_char()) {
            self.consume_char();
        }
    }

    pub fn get_and_consume_chars(&mut self, n: usize) -> &'a str {
        self.window.get_and_consume_chars(n)
    }

    pub fn is_eof(&self) -> bool {
        self.window.is_eof()
    }

    pub fn offset(&self) -> TextSize {
        self.window.offset()
    }

    pub fn position(&self) -> Position {
        self.window.position()
    }

    pub fn text_from(&self, start: TextSize) -> &'a str {
        self.window.text_from(start)
    }

    pub fn rest_of_line(&self) -> &'a str {
        self.window.rest_of_line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_lines_and_columns() {
        let mut window = TextWindow::new("ab\ncd");
        window.consume_chars(2);
        assert_eq!(window.position(), Position { offset: 2.into(), line: 0, column: 2 });

        assert_eq!(window.consume_char(), Some('\n'));
        assert_eq!(window.position(), Position { offset: 3.into(), line: 1, column: 0 });

        assert_eq!(window.get_and_consume_chars(5), "cd");
        assert!(window.is_eof());
        assert_eq!(window.consume_char(), None);
    }

    #[test]
    fn columns_count_characters() {
        let mut window = TextWindow::new("é=1");
        window.consume_char();
        assert_eq!(window.position(), Position { offset: 2.into(), line: 0, column: 1 });
        assert_eq!(window.peek_char_at(1), Some('1'));
    }

    #[test]
    fn null_terminated_peeks_past_the_end() {
        let mut window = NullTerminatedTextWindow::new(TextWindow::with_source_name("x", "a.m"));
        assert_eq!(window.peek_char(), 'x');
        assert_eq!(window.peek_char_at(1), EOF_CHAR);
        assert_eq!(window.peek_char_at(10), EOF_CHAR);
        assert_eq!(window.consume_char(), 'x');
        assert_eq!(window.consume_char(), EOF_CHAR);
        assert_eq!(window.window().source_name(), Some("a.m"));
    }

    #[test]
    fn rest_of_line() {
        let mut window = TextWindow::new("%{  \r\nbody\n%}");
        assert_eq!(window.rest_of_line(), "%{  \r");
        window.consume_chars(6);
        assert_eq!(window.rest_of_line(), "body");
    }
}
