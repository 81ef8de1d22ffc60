//! Character sources
//!
//! The evaluator pulls one character at a time and never looks further
//! than the next one, so anything that can yield characters in order
//! can drive it: a string, stdin, or a file.

use std::io::{self, BufRead};
use std::str::Chars;

/// A stream of characters with an end-of-input sentinel
pub trait CharSource {
    /// Returns the next character, or `None` once the input is exhausted
    fn next_char(&mut self) -> io::Result<Option<char>>;
}

impl CharSource for Chars<'_> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        Ok(self.next())
    }
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        (**self).next_char()
    }
}

/// Decodes UTF-8 characters from a byte stream.
///
/// Only the bytes of the character being returned are consumed, so input
/// after the expression stays in the reader. A malformed or truncated
/// sequence becomes `U+FFFD`. Every character handed out is recorded,
/// which lets a failed evaluation show the input it stopped on.
pub struct ReaderSource<R> {
    reader: R,
    text: String,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            text: String::new(),
        }
    }

    /// Characters read so far
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl<R: BufRead> ReaderSource<R> {
    fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

/// Length of the UTF-8 sequence a lead byte starts, if it can start one
fn sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

impl<R: BufRead> CharSource for ReaderSource<R> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        let Some(lead) = self.peek_byte()? else {
            return Ok(None);
        };
        self.reader.consume(1);

        let mut bytes = [lead, 0, 0, 0];
        let mut len = 1;
        let want = sequence_len(lead).unwrap_or(1);

        while len < want {
            match self.peek_byte()? {
                Some(byte) if byte & 0xC0 == 0x80 => {
                    self.reader.consume(1);
                    bytes[len] = byte;
                    len += 1;
                }
                _ => break,
            }
        }

        let ch = match std::str::from_utf8(&bytes[..len]) {
            Ok(decoded) if len == want => decoded.chars().next(),
            _ => None,
        }
        .unwrap_or(char::REPLACEMENT_CHARACTER);

        self.text.push(ch);
        Ok(Some(ch))
    }
}
