//! Tokenization for the template renderer
//!
//! Provides O(n) delimiter scanning using a state machine.

/// A `{{...}}` occurrence found by the scanner
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token<'a> {
    /// Complete `{{ ... }}` span
    Placeholder {
        /// Byte position of `{{`
        start: usize,
        /// Byte position just after `}}`
        end: usize,
        /// Raw text between the delimiters (untrimmed)
        content: &'a str,
        line: usize,
        column: usize,
    },

    /// `{{` that reached the end of input without a `}}`
    Unclosed {
        start: usize,
        line: usize,
        column: usize,
    },
}

/// Scanner state
///
/// ```text
/// Scanning ──{───> SeenLBrace ──{───> InsidePlaceholder ──}───> SeenRBrace ──}───> [Yield] → Scanning
///   │                 │                    │                        │
///   │ (EOF)           │ (not {)            │ (EOF)                  │ (not })
///   v                 └──> Scanning        v                        └──> InsidePlaceholder
///  Done                                  [Unclosed] → Done
/// ```
///
/// Each byte is visited once; the position never moves backward.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ScanState {
    /// Plain text
    Scanning,

    /// Seen one `{`, checking for the second
    SeenLBrace {
        /// Position of the first `{`
        pos: usize,
    },

    /// Inside `{{...}}`, scanning until `}}`
    InsidePlaceholder {
        /// Byte position of the opening `{{`
        start: usize,
        /// Line and column of the opening `{{`
        line: usize,
        column: usize,
    },

    /// Seen one `}` inside a placeholder, checking for the second
    SeenRBrace {
        start: usize,
        line: usize,
        column: usize,
        /// Position of the first `}`
        rbrace_pos: usize,
    },

    /// End of input reached
    Done,
}

/// Iterator over delimiter spans in a template string
///
/// Nested delimiters are not recognised: after `{{`, the first `}}` closes
/// the span whatever comes in between.
pub(crate) struct TokenStream<'a> {
    /// Template text
    text: &'a str,
    /// Current byte position
    pos: usize,
    /// State machine state
    state: ScanState,
    /// Current line number (1-based)
    line: usize,
    /// Byte position where the current line starts
    line_start: usize,
}

impl<'a> TokenStream<'a> {
    /// Create a new TokenStream from template text
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            state: ScanState::Scanning,
            line: 1,
            line_start: 0,
        }
    }

    /// Column (1-based, in characters) of a byte position on the current line
    fn column_of(&self, pos: usize) -> usize {
        self.text[self.line_start..pos].chars().count() + 1
    }

    fn newline(&mut self) {
        self.line += 1;
        self.line_start = self.pos + 1;
    }

    /// Record step for O(n) performance verification in tests
    #[cfg(test)]
    #[inline]
    fn record_test_step() {
        test_counter::inc();
    }

    fn process_scanning(&mut self, byte: u8) {
        match byte {
            b'{' => self.state = ScanState::SeenLBrace { pos: self.pos },
            b'\n' => self.newline(),
            _ => {}
        }
        self.pos += 1;
    }

    /// A non-brace byte is left in place and reprocessed as plain text
    fn process_seen_lbrace(&mut self, byte: u8, lbrace_pos: usize) {
        if byte == b'{' {
            self.state = ScanState::InsidePlaceholder {
                start: lbrace_pos,
                line: self.line,
                column: self.column_of(lbrace_pos),
            };
            self.pos += 1;
        } else {
            // Just a single {, not a placeholder
            self.state = ScanState::Scanning;
        }
    }

    fn process_inside(&mut self, byte: u8, start: usize, line: usize, column: usize) {
        match byte {
            b'}' => {
                self.state = ScanState::SeenRBrace {
                    start,
                    line,
                    column,
                    rbrace_pos: self.pos,
                }
            }
            b'\n' => self.newline(),
            _ => {}
        }
        self.pos += 1;
    }

    /// Returns the completed token, or None if the byte must be reprocessed
    fn process_seen_rbrace(
        &mut self,
        byte: u8,
        start: usize,
        line: usize,
        column: usize,
        rbrace_pos: usize,
    ) -> Option<Token<'a>> {
        if byte == b'}' {
            self.state = ScanState::Scanning;
            self.pos += 1;
            Some(Token::Placeholder {
                start,
                end: self.pos,
                content: &self.text[start + 2..rbrace_pos],
                line,
                column,
            })
        } else {
            // Single } inside content
            self.state = ScanState::InsidePlaceholder {
                start,
                line,
                column,
            };
            None
        }
    }

    /// Handle end of input; yields a token only for an unclosed placeholder
    fn finish(&mut self) -> Option<Token<'a>> {
        let state = std::mem::replace(&mut self.state, ScanState::Done);
        match state {
            ScanState::InsidePlaceholder {
                start,
                line,
                column,
            }
            | ScanState::SeenRBrace {
                start,
                line,
                column,
                ..
            } => Some(Token::Unclosed {
                start,
                line,
                column,
            }),
            _ => None,
        }
    }
}

impl<'a> Iterator for TokenStream<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let bytes = self.text.as_bytes();

        loop {
            if self.state == ScanState::Done {
                return None;
            }
            if self.pos >= bytes.len() {
                return self.finish();
            }

            let byte = bytes[self.pos];
            #[cfg(test)]
            Self::record_test_step();

            match self.state.clone() {
                ScanState::Scanning => self.process_scanning(byte),
                ScanState::SeenLBrace { pos } => self.process_seen_lbrace(byte, pos),
                ScanState::InsidePlaceholder {
                    start,
                    line,
                    column,
                } => self.process_inside(byte, start, line, column),
                ScanState::SeenRBrace {
                    start,
                    line,
                    column,
                    rbrace_pos,
                } => {
                    if let Some(token) =
                        self.process_seen_rbrace(byte, start, line, column, rbrace_pos)
                    {
                        return Some(token);
                    }
                }
                ScanState::Done => return None,
            }
        }
    }
}
