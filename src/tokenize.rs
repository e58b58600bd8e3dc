// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Splitting input text into tokens. Tokenization never fails: any
//! input, including malformed or empty input, yields a token
//! sequence; structural checks happen in [read](../read/index.html).

use crate::chars::str_chars;
use crate::pos::Pos;
use crate::value::{dispatch_closing, Parenkind};
use kstring::KString;

pub const DISPATCH: char = '#';
pub const STRING_DELIMITER: char = '"';

/// Comma counts as insignificant whitespace, mirroring list-friendly
/// notations.
pub fn is_whitespace_char(c: char) -> bool {
    c.is_whitespace() || c == ','
}

fn delimiter(c: char) -> Option<&'static str> {
    match c {
        '(' => Some("("),
        ')' => Some(")"),
        '[' => Some("["),
        ']' => Some("]"),
        '{' => Some("{"),
        '}' => Some("}"),
        '"' => Some("\""),
        _ => None
    }
}

pub fn is_delimiter_char(c: char) -> bool {
    delimiter(c).is_some()
}

/// One lexical unit: a single delimiter character, a contiguous run
/// of non-delimiter characters, or a dispatch-prefixed run. The text
/// is kept verbatim; classification happens through the methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token(KString);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_text(self) -> KString {
        self.0
    }

    fn single_char(&self) -> Option<char> {
        let mut cs = self.0.chars();
        let c = cs.next()?;
        if cs.next().is_none() { Some(c) } else { None }
    }

    pub fn opening(&self) -> Option<Parenkind> {
        Parenkind::from_opening(self.single_char()?)
    }

    pub fn closing(&self) -> Option<Parenkind> {
        Parenkind::from_closing(self.single_char()?)
    }

    pub fn is_string_delimiter(&self) -> bool {
        self.single_char() == Some(STRING_DELIMITER)
    }

    pub fn is_dispatch(&self) -> bool {
        self.0.starts_with(DISPATCH)
    }

    /// For a dispatch token whose trailing character is an opening
    /// delimiter, the token that ends the dispatched region.
    pub fn dispatch_closing(&self) -> Option<&'static str> {
        dispatch_closing(&self.0)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenWithPos(pub Token, pub Pos);

pub fn tokenize(cs: impl Iterator<Item = (char, Pos)>) -> Vec<TokenWithPos> {
    let mut cs = cs.peekable();
    let mut tokens = Vec::new();
    while let Some((c, pos)) = cs.next() {
        if is_whitespace_char(c) {
            continue;
        }
        if let Some(s) = delimiter(c) {
            tokens.push(TokenWithPos(Token(KString::from_static(s)), pos));
            continue;
        }
        let mut text = String::new();
        text.push(c);
        while let Some(&(c2, _)) = cs.peek() {
            if is_whitespace_char(c2) || is_delimiter_char(c2) {
                break;
            }
            text.push(c2);
            cs.next();
        }
        if c == DISPATCH {
            // A dispatch run swallows exactly one character past its
            // usual end, gluing the trailing delimiter onto the
            // macro name (`#{`, `#fancy[`, `#"`).
            if let Some((c2, _)) = cs.next() {
                text.push(c2);
            }
        }
        tokens.push(TokenWithPos(Token(KString::from_string(text)), pos));
    }
    tokens
}

pub fn tokenize_str(s: &str) -> Vec<TokenWithPos> {
    tokenize(str_chars(s))
}
