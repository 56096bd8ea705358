//! Tokenizer for the mask grammar.
//!
//! Tokens are `,` `.` `(` `)` `*`, plain keys matching `[a-zA-Z0-9_]+` and
//! double-quoted keys with JSON escapes. Spaces, tabs and line breaks between tokens
//! are skipped. Quoted keys are decoded while lexing, so the parser only ever sees
//! key values.

use std::borrow::Cow;
use std::fmt;

use crate::key::{is_simple_byte, quote, unquote};
use crate::{Error, ParseErrorKind, Result};

const SPACE_CHARS: &[u8] = b" \r\n\t";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Comma,
    Dot,
    LBrace,
    RBrace,
    WildCard,
    PlainKey,
    QuotedKey,
    Eol,
}

impl TokenKind {
    fn name(self) -> &'static str {
        match self {
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "DOT",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::WildCard => "WILD_CARD",
            TokenKind::PlainKey => "PLAIN_KEY",
            TokenKind::QuotedKey => "QUOTED_KEY",
            TokenKind::Eol => "EOL",
        }
    }
}

/// A token with its byte offset. For quoted keys `value` is already decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub kind: TokenKind,
    pub value: Cow<'a, str>,
    pub pos: usize,
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({} pos {})",
            self.kind.name(),
            quote(&self.value, false),
            self.pos
        )
    }
}

pub(crate) struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer {
            source,
            pos: 0,
            done: false,
        }
    }

    fn peek_byte(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek_byte() {
            if SPACE_CHARS.contains(&b) {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn punct(&mut self, kind: TokenKind) -> Token<'a> {
        let start = self.pos;
        self.pos += 1;
        Token {
            kind,
            value: Cow::Borrowed(&self.source[start..self.pos]),
            pos: start,
        }
    }

    pub fn next_token(&mut self) -> Result<Token<'a>> {
        self.skip_whitespace();

        let Some(b) = self.peek_byte() else {
            return Ok(Token {
                kind: TokenKind::Eol,
                value: Cow::Borrowed(""),
                pos: self.pos,
            });
        };

        match b {
            b',' => Ok(self.punct(TokenKind::Comma)),
            b'.' => Ok(self.punct(TokenKind::Dot)),
            b'(' => Ok(self.punct(TokenKind::LBrace)),
            b')' => Ok(self.punct(TokenKind::RBrace)),
            b'*' => Ok(self.punct(TokenKind::WildCard)),
            b'"' => self.scan_quoted_key(),
            b if is_simple_byte(b) => Ok(self.scan_plain_key()),
            _ => Err(Error::parse(
                ParseErrorKind::UnexpectedSymbol,
                self.source,
                self.pos,
                "unexpected symbol",
            )),
        }
    }

    fn scan_plain_key(&mut self) -> Token<'a> {
        let start = self.pos;
        while self.peek_byte().map_or(false, is_simple_byte) {
            self.pos += 1;
        }
        Token {
            kind: TokenKind::PlainKey,
            value: Cow::Borrowed(&self.source[start..self.pos]),
            pos: start,
        }
    }

    fn scan_quoted_key(&mut self) -> Result<Token<'a>> {
        let start = self.pos;
        let bytes = self.source.as_bytes();
        self.pos += 1;
        while self.pos < bytes.len() && bytes[self.pos] != b'"' {
            // An escape consumes the next byte whatever it is.
            self.pos += if bytes[self.pos] == b'\\' { 2 } else { 1 };
        }
        if self.pos >= bytes.len() {
            self.pos = bytes.len();
            return Err(Error::parse(
                ParseErrorKind::UnterminatedString,
                self.source,
                start,
                "unterminated quoted string",
            ));
        }
        self.pos += 1;

        let literal = &self.source[start..self.pos];
        let value = unquote(literal).ok_or_else(|| {
            Error::parse(
                ParseErrorKind::InvalidQuotedKey,
                self.source,
                start,
                &format!("invalid quoted key {}", literal),
            )
        })?;
        Ok(Token {
            kind: TokenKind::QuotedKey,
            value: Cow::Owned(value),
            pos: start,
        })
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_token() {
            Ok(token) if token.kind == TokenKind::Eol => {
                self.done = true;
                None
            }
            Ok(token) => Some(Ok(token)),
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
