//! Splits a command line into tokens.
//!
//! Tokens are separated by spaces or newlines. A token starting with `"`
//! runs until the next unescaped `"` and may contain spaces; inside it `\"`
//! yields a quote and `\\` a backslash. Any other backslash is kept as is.
//! An unterminated quoted token extends to the end of the line.
//!
//! # Examples
//!
//! ```
//! use ramfs_cli::tokenizer::Tokens;
//!
//! let tokens: Vec<Vec<u8>> = Tokens::new(br#"write /f "hello \"world\"""#).collect();
//! assert_eq!(tokens, [&b"write"[..], b"/f", br#"hello "world""#]);
//! ```

const DELIMITERS: [u8; 2] = [b' ', b'\n'];

/// Iterator over the tokens of one line.
///
/// Works on raw bytes, so content that is not valid UTF-8 passes through
/// unchanged.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a [u8],
}

impl<'a> Tokens<'a> {
    /// Starts tokenizing `line`.
    #[must_use]
    pub const fn new(line: &'a [u8]) -> Self {
        Self { rest: line }
    }

    fn quoted(&mut self) -> Vec<u8> {
        let mut token = Vec::new();
        let mut bytes = self.rest.iter().enumerate();

        while let Some((i, &byte)) = bytes.next() {
            match byte {
                b'"' => {
                    self.rest = &self.rest[i + 1..];
                    return token;
                }
                b'\\' => match bytes.clone().next() {
                    Some((_, &(next @ (b'"' | b'\\')))) => {
                        token.push(next);
                        bytes.next();
                    }
                    _ => token.push(b'\\'),
                },
                _ => token.push(byte),
            }
        }

        self.rest = &[];
        token
    }
}

impl Iterator for Tokens<'_> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Vec<u8>> {
        let Some(start) = self.rest.iter().position(|b| !DELIMITERS.contains(b)) else {
            self.rest = &[];
            return None;
        };
        self.rest = &self.rest[start..];

        if let Some(quoted) = self.rest.strip_prefix(b"\"") {
            self.rest = quoted;
            return Some(self.quoted());
        }

        let end = self
            .rest
            .iter()
            .position(|b| DELIMITERS.contains(b))
            .unwrap_or(self.rest.len());
        let (token, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(token.to_vec())
    }
}
