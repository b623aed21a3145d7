use std::borrow::Cow;

use crate::error::WkxError;

/// A read position over WKT text.
///
/// Input is never copied or shrunk; consuming a token only advances `pos`.
pub(super) struct TextCursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> TextCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    fn rest(&self) -> &'a [u8] {
        &self.text.as_bytes()[self.pos..]
    }

    pub fn peek(&self) -> Option<u8> {
        self.rest().first().copied()
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    pub fn skip_whitespace(&mut self) {
        let skipped = self
            .rest()
            .iter()
            .take_while(|b| b.is_ascii_whitespace())
            .count();
        self.pos += skipped;
    }

    /// Consume `byte` if it is next, after skipping whitespace.
    pub fn eat(&mut self, byte: u8) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, byte: u8) -> Result<(), WkxError> {
        if self.eat(byte) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{}'", byte as char)))
        }
    }

    /// Whether the next word is exactly `word`, not followed by another letter.
    pub fn at_word(&mut self, word: &str) -> bool {
        self.skip_whitespace();
        let rest = self.rest();
        rest.starts_with(word.as_bytes())
            && !rest
                .get(word.len())
                .is_some_and(|next| next.is_ascii_alphabetic())
    }

    /// Consume `word` if it is next.
    pub fn eat_word(&mut self, word: &str) -> bool {
        if self.at_word(word) {
            self.pos += word.len();
            true
        } else {
            false
        }
    }

    /// Consume a literal prefix such as `SRID=`.
    pub fn eat_prefix(&mut self, prefix: &str) -> bool {
        self.skip_whitespace();
        if self.rest().starts_with(prefix.as_bytes()) {
            self.pos += prefix.len();
            true
        } else {
            false
        }
    }

    /// A run of upper-case ASCII letters.
    pub fn keyword(&mut self) -> &'a str {
        self.skip_whitespace();
        let start = self.pos;
        let len = self
            .rest()
            .iter()
            .take_while(|b| b.is_ascii_uppercase())
            .count();
        self.pos += len;
        &self.text[start..self.pos]
    }

    /// Everything up to the next whitespace, `,` or `)`.
    ///
    /// An empty token means there are no more numbers in the current vertex.
    pub fn number_token(&mut self) -> &'a str {
        self.skip_whitespace();
        let start = self.pos;
        let len = self
            .rest()
            .iter()
            .take_while(|b| !(b.is_ascii_whitespace() || **b == b',' || **b == b')'))
            .count();
        self.pos += len;
        &self.text[start..self.pos]
    }

    /// Everything up to `terminator`, which is not consumed.
    pub fn token_until(&mut self, terminator: u8) -> &'a str {
        let start = self.pos;
        let len = self
            .rest()
            .iter()
            .take_while(|b| **b != terminator && !b.is_ascii_whitespace())
            .count();
        self.pos += len;
        &self.text[start..self.pos]
    }

    pub fn error_at(&self, position: usize, message: impl Into<Cow<'static, str>>) -> WkxError {
        WkxError::malformed(position, message)
    }

    pub fn error(&self, message: impl Into<Cow<'static, str>>) -> WkxError {
        self.error_at(self.pos, message)
    }

    /// An error naming what was expected and what was found instead.
    pub fn unexpected(&self, expected: &str) -> WkxError {
        let found = match self.text[self.pos..].chars().next() {
            Some(c) => format!("'{}'", c),
            None => "end of input".to_string(),
        };
        self.error(format!("expected {} but found {}", expected, found))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tokens() {
        let mut cursor = TextCursor::new("  POINT Z (1.5 -2,3)");
        assert_eq!(cursor.keyword(), "POINT");
        assert!(!cursor.at_word("ZM"));
        assert!(cursor.eat_word("Z"));
        assert!(cursor.eat(b'('));
        assert_eq!(cursor.number_token(), "1.5");
        assert_eq!(cursor.number_token(), "-2");
        assert_eq!(cursor.number_token(), "");
        assert!(cursor.eat(b','));
        assert_eq!(cursor.number_token(), "3");
        assert!(cursor.expect(b')').is_ok());
        cursor.skip_whitespace();
        assert!(cursor.at_end());
    }

    #[test]
    fn word_boundary() {
        let mut cursor = TextCursor::new("EMPTYISH");
        assert!(!cursor.at_word("EMPTY"));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn error_offsets() {
        let mut cursor = TextCursor::new("POINT [");
        cursor.keyword();
        let err = cursor.expect(b'(').unwrap_err();
        assert_eq!(err.position(), Some(6));
        assert!(err.to_string().contains("'['"));
    }
}
