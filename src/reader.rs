//! Byte cursor over an in-memory PBM/PGM file.
//!
//! Models a textual stream: once a numeric token fails to parse the cursor
//! latches into a failed state and every later read yields nothing.

/// Whitespace as classified by C `isspace`, which includes vertical tab.
#[inline]
pub(crate) fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// Why a numeric token could not be read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TokenError {
    /// Input ended (or the cursor already failed) before any digit.
    Eof,
    /// The next token does not start with a decimal digit.
    Malformed,
    /// The token does not fit in a `u32`.
    Overflow,
}

impl TokenError {
    pub(crate) fn describe(self) -> &'static str {
        match self {
            TokenError::Eof => "unexpected end of input",
            TokenError::Malformed => "expected a decimal integer",
            TokenError::Overflow => "integer does not fit in 32 bits",
        }
    }
}

pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
    failed: bool,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            failed: false,
        }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn eof(&self) -> bool {
        self.failed || self.pos >= self.data.len()
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        if self.failed {
            return None;
        }
        self.data.get(self.pos).copied()
    }

    pub(crate) fn advance(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n).min(self.data.len());
    }

    /// Consume bytes while `pred` holds. Returns how many were skipped.
    pub(crate) fn skip_while(&mut self, pred: impl Fn(u8) -> bool) -> usize {
        if self.failed {
            return 0;
        }
        let start = self.pos;
        while let Some(&byte) = self.data.get(self.pos) {
            if !pred(byte) {
                break;
            }
            self.pos += 1;
        }
        self.pos - start
    }

    pub(crate) fn skip_whitespace(&mut self) -> usize {
        self.skip_while(is_space)
    }

    /// Skip whitespace and any number of `#` comment lines.
    pub(crate) fn skip_whitespace_and_comments(&mut self) {
        loop {
            self.skip_whitespace();
            if self.peek() != Some(b'#') {
                break;
            }
            self.read_line();
        }
    }

    /// Read up to (not including) the next `\n`, consuming the newline.
    ///
    /// Returns `None` only when no bytes remain. A final line without a
    /// terminating newline is still returned.
    pub(crate) fn read_line(&mut self) -> Option<&'a [u8]> {
        if self.eof() {
            return None;
        }
        let rest = &self.data[self.pos..];
        match rest.iter().position(|&b| b == b'\n') {
            Some(end) => {
                self.pos += end + 1;
                Some(&rest[..end])
            }
            None => {
                self.pos = self.data.len();
                Some(rest)
            }
        }
    }

    /// Take up to `n` bytes. The result is shorter than `n` if input runs out.
    pub(crate) fn read_bytes(&mut self, n: usize) -> &'a [u8] {
        if self.failed {
            return &[];
        }
        let end = self.pos.saturating_add(n).min(self.data.len());
        let out = &self.data[self.pos..end];
        self.pos = end;
        out
    }

    /// Parse one whitespace-separated unsigned decimal integer.
    ///
    /// Any error latches the cursor into the failed state.
    pub(crate) fn read_uint(&mut self) -> Result<u32, TokenError> {
        if self.failed {
            return Err(TokenError::Eof);
        }
        self.skip_whitespace();

        let start = self.pos;
        let mut value: u32 = 0;
        let mut overflow = false;
        while let Some(&byte) = self.data.get(self.pos) {
            if !byte.is_ascii_digit() {
                break;
            }
            match value
                .checked_mul(10)
                .and_then(|v| v.checked_add(u32::from(byte - b'0')))
            {
                Some(v) => value = v,
                None => overflow = true,
            }
            self.pos += 1;
        }

        if self.pos == start {
            self.failed = true;
            return Err(if start >= self.data.len() {
                TokenError::Eof
            } else {
                TokenError::Malformed
            });
        }
        if overflow {
            self.failed = true;
            return Err(TokenError::Overflow);
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_lines_and_tokens() {
        let mut cur = Cursor::new(b"P2\n# hi\n 12\t7\n255");
        assert_eq!(cur.read_line(), Some(&b"P2"[..]));
        assert_eq!(cur.peek(), Some(b'#'));
        assert_eq!(cur.read_line(), Some(&b"# hi"[..]));
        assert_eq!(cur.read_uint(), Ok(12));
        assert_eq!(cur.read_uint(), Ok(7));
        assert_eq!(cur.read_uint(), Ok(255));
        assert_eq!(cur.read_uint(), Err(TokenError::Eof));
        assert!(cur.eof());
    }

    #[test]
    fn malformed_token_latches_failure() {
        let mut cur = Cursor::new(b"4 x 5 \x01\x02");
        assert_eq!(cur.read_uint(), Ok(4));
        assert_eq!(cur.read_uint(), Err(TokenError::Malformed));
        // Later reads see nothing, even though "5" would parse.
        assert_eq!(cur.read_uint(), Err(TokenError::Eof));
        assert!(cur.read_bytes(2).is_empty());
        assert_eq!(cur.peek(), None);
    }

    #[test]
    fn overflow_is_reported() {
        let mut cur = Cursor::new(b"99999999999 1");
        assert_eq!(cur.read_uint(), Err(TokenError::Overflow));
        assert!(cur.eof());
    }

    #[test]
    fn skip_while_counts_vertical_tab() {
        let mut cur = Cursor::new(b" \x0B\x0C\r\n\tA");
        assert_eq!(cur.skip_whitespace(), 6);
        assert_eq!(cur.peek(), Some(b'A'));
    }

    #[test]
    fn comments_are_skipped_between_tokens() {
        let mut cur = Cursor::new(b"  # one\n# two\n 3");
        cur.skip_whitespace_and_comments();
        assert_eq!(cur.read_uint(), Ok(3));
    }

    #[test]
    fn read_bytes_is_clamped() {
        let mut cur = Cursor::new(b"abc");
        cur.advance(1);
        assert_eq!(cur.read_bytes(10), b"bc");
        assert!(cur.eof());
        assert_eq!(cur.position(), 3);
    }
}
