//! Character cursor shared by the game and pretty script parsers
//!
//! The scanner works on Unicode scalar values, so command prefixes and
//! reported columns are counted in characters rather than bytes.

use crate::error::ScannerError;

/// Characters treated as whitespace between pretty-script arguments.
const WHITESPACE: &[char] = &[' ', '\t', '\n', '\r'];

/// Forward-only cursor over a script.
#[derive(Debug, Clone)]
pub struct Scanner {
    input: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Scanner {
    /// Create a scanner positioned at the start of `input`.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
            line: 1,
            column: 0,
        }
    }

    /// Build an error at the current position.
    #[must_use]
    pub fn error(&self, message: impl Into<String>) -> ScannerError {
        ScannerError::new(self.line, self.column, message)
    }

    /// Current `(line, column)`.
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    #[must_use]
    pub fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// The current character, or `None` at the end of input.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    /// Character `offset` places past the cursor.
    #[must_use]
    pub fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied()
    }

    /// Up to `len` characters starting at the cursor, without consuming them.
    #[must_use]
    pub fn peek_str(&self, len: usize) -> String {
        let end = (self.pos + len).min(self.input.len());
        self.input[self.pos..end].iter().collect()
    }

    /// True if the next characters are exactly `text`.
    #[must_use]
    pub fn looking_at(&self, text: &str) -> bool {
        text.chars()
            .enumerate()
            .all(|(i, c)| self.peek_at(i) == Some(c))
    }

    /// Consume and return the current character, or `None` at the end of input.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consume and return the current character.
    pub fn next_char(&mut self) -> Result<char, ScannerError> {
        self.bump()
            .ok_or_else(|| self.error("Reached end of input while parsing."))
    }

    /// Consume `count` characters.
    pub fn advance(&mut self, count: usize) -> Result<(), ScannerError> {
        for _ in 0..count {
            self.next_char()?;
        }
        Ok(())
    }

    /// Consume one character and fail unless it is `expected`.
    pub fn expect(&mut self, expected: char) -> Result<(), ScannerError> {
        let before = self.error("");
        let actual = self.next_char().map_err(|_| ScannerError {
            message: format!("Expected \"{expected}\" but reached end of input."),
            ..before.clone()
        })?;
        if actual == expected {
            Ok(())
        } else {
            Err(ScannerError {
                message: format!("Expected \"{expected}\" but found \"{actual}\" instead."),
                ..before
            })
        }
    }

    /// Consume characters until one of `terminators` or the end of input.
    ///
    /// The terminator itself is left in place.
    pub fn scan_until(&mut self, terminators: &[char]) -> String {
        self.scan_while(|c| !terminators.contains(&c))
    }

    /// Consume characters while `predicate` holds, stopping at the end of input.
    pub fn scan_while(&mut self, predicate: impl Fn(char) -> bool) -> String {
        let mut res = String::new();
        while let Some(c) = self.peek().filter(|&c| predicate(c)) {
            res.push(c);
            self.bump();
        }
        res
    }

    /// Discard characters contained in `chars`.
    pub fn skip_while(&mut self, chars: &[char]) {
        self.scan_while(|c| chars.contains(&c));
    }

    pub fn skip_whitespace(&mut self) {
        self.skip_while(WHITESPACE);
    }

    pub fn scan_alnum(&mut self) -> String {
        self.scan_while(char::is_alphanumeric)
    }

    /// Consume an optionally signed decimal integer.
    pub fn scan_number(&mut self) -> Result<i32, ScannerError> {
        let start = self.error("");
        let mut digits = String::new();
        if self.peek() == Some('-') {
            digits.push('-');
            self.next_char()?;
        }
        digits.push_str(&self.scan_while(|c| c.is_ascii_digit()));
        if digits.is_empty() || digits == "-" {
            return Err(ScannerError {
                message: "Expected number.".to_string(),
                ..start
            });
        }
        digits.parse().map_err(|_| ScannerError {
            message: format!("Number {digits} is out of range."),
            ..start
        })
    }
}
