// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Building [Form](crate::value::Form) trees from the token
//! sequence, enforcing delimiter nesting. The reader never silently
//! drops or mismatches a delimiter: every opener is paired with its
//! correct closer, or the whole read fails.

use crate::chars::{buffered_chars, str_chars};
use crate::context::{self, Context};
use crate::pos::Pos;
use crate::tokenize::{tokenize, TokenWithPos};
use crate::value::{Form, FormWithPos, Parenkind};
use std::fmt::{Formatter, Display};
use std::io::{Read, Write};
use std::path::Path;
use std::fs::File;
use kstring::KString;
use thiserror::Error;

const DEPTH_FUEL: u32 = 500;
// ^ the limit with default settings on Linux is around 1200

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("IO error ({0}) after")]
    IO(anyhow::Error),
    #[error("nesting too deep")]
    NestingTooDeep,
    #[error("unmatched open '{}', expecting closing '{}'",
            .0.opening(), .0.closing())]
    UnmatchedOpen(Parenkind),
    #[error("unexpected closing character '{}'", .0.closing())]
    UnexpectedClosing(Parenkind),
    #[error("'{}' {1} expects '{}', got '{}'",
            .0.opening(), .0.closing(), .2.closing())]
    ClosingMismatch(Parenkind, Pos, Parenkind),
    #[error("unmatched open string")]
    UnmatchedOpenString,
    #[error("unmatched closing token for dispatch '{0}'")]
    UnmatchedDispatch(KString),
}

#[derive(Error, Debug)]
#[error("{err} {pos}")]
pub struct ReadErrorWithPos {
    pub err: ReadError,
    pub pos: Pos
}

impl ReadError {
    fn at(self, p: Pos) -> ReadErrorWithPos {
        ReadErrorWithPos {
            err: self,
            pos: p
        }
    }
}

#[derive(Error, Debug)]
pub struct ReadErrorWithPosContext {
    err_with_pos: ReadErrorWithPos,
    container: Box<dyn Context>
}

impl Display for ReadErrorWithPosContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        f.write_fmt(format_args!("{} ",
                                 self.err_with_pos.err))?;
        self.container.format_with_pos(self.err_with_pos.pos, f)?;
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ReadErrorWithContext {
    #[error("{}: {0}", .1.to_string_without_pos())]
    IO(std::io::Error, Box<dyn Context>)
}

#[derive(Error, Debug)]
pub enum ReadErrorWithLocation {
    #[error("{0}")]
    PC(Box<ReadErrorWithPosContext>),
    #[error("{0}")]
    IO(Box<ReadErrorWithContext>)
}

impl ReadErrorWithPos {
    pub fn in_context(self, container: Box<dyn Context>) -> ReadErrorWithLocation {
        ReadErrorWithLocation::PC(Box::new(
            ReadErrorWithPosContext {
                err_with_pos: self,
                container
            }))
    }
}

pub fn io_error_in_context(
    e: std::io::Error,
    container: Box<dyn Context>
) -> ReadErrorWithLocation {
    ReadErrorWithLocation::IO(Box::new(
        ReadErrorWithContext::IO(e, container)))
}


/// The token sequence handed to the reader: an immutable sequence
/// plus a cursor. A nested read signals "this level is closed" by
/// stepping the cursor back onto the terminator, leaving it for the
/// level that consumed the opener.
#[derive(Debug)]
pub struct Tokens {
    tokens: Vec<TokenWithPos>,
    index: usize,
}

impl Tokens {
    pub fn new(tokens: Vec<TokenWithPos>) -> Tokens {
        Tokens { tokens, index: 0 }
    }

    fn next(&mut self) -> Option<TokenWithPos> {
        let t = self.tokens.get(self.index)?.clone();
        self.index += 1;
        Some(t)
    }

    fn unread(&mut self) {
        self.index -= 1;
    }

    /// Index of the next token spelled exactly `s`, scanning from
    /// the cursor.
    fn find(&self, s: &str) -> Option<usize> {
        self.tokens[self.index..].iter()
            .position(|TokenWithPos(t, _)| t.as_str() == s)
            .map(|i| self.index + i)
    }

    /// Cut out the tokens from the cursor up to (not including)
    /// `end`, leaving the cursor past `end`.
    fn cut_until(&mut self, end: usize) -> Vec<TokenWithPos> {
        let sub = self.tokens[self.index..end].to_vec();
        self.index = end + 1;
        sub
    }
}

// The nested read returns with the cursor on the terminator, or at
// the end of input if the closer never appeared.
fn expect_closing(ts: &mut Tokens, pk: Parenkind, openpos: Pos)
                  -> Result<(), ReadErrorWithPos> {
    match ts.next() {
        Some(TokenWithPos(t, _)) if t.closing() == Some(pk) => Ok(()),
        _ => Err(ReadError::UnmatchedOpen(pk).at(openpos)),
    }
}

/// Read forms until the token sequence is exhausted or a closing
/// delimiter matching `enclosing` is reached; that closer is left on
/// the cursor for the caller to consume. A closer that matches
/// nothing currently open is an error.
pub fn read_forms(
    ts: &mut Tokens,
    enclosing: Option<(Parenkind, Pos)>,
    depth_fuel: u32,
) -> Result<Vec<FormWithPos>, ReadErrorWithPos> {
    let mut result = Vec::new();
    while let Some(TokenWithPos(t, pos)) = ts.next() {
        if let Some(pk) = t.opening() {
            if depth_fuel == 0 {
                return Err(ReadError::NestingTooDeep.at(pos));
            }
            let children = read_forms(ts, Some((pk, pos)), depth_fuel - 1)?;
            expect_closing(ts, pk, pos)?;
            result.push(Form::Sequence(pk, children).at(pos));
        } else if t.is_string_delimiter() {
            let mut text = String::new();
            loop {
                match ts.next() {
                    None => return Err(ReadError::UnmatchedOpenString.at(pos)),
                    Some(TokenWithPos(t2, _)) => {
                        if t2.is_string_delimiter() {
                            break;
                        }
                        // Tokens are concatenated verbatim; the
                        // whitespace that separated them is gone.
                        text.push_str(t2.as_str());
                    }
                }
            }
            result.push(Form::String(KString::from_string(text)).at(pos));
        } else if t.is_dispatch() {
            let closing = t.dispatch_closing();
            let tag = t.into_text();
            let children = if let Some(closing) = closing {
                if depth_fuel == 0 {
                    return Err(ReadError::NestingTooDeep.at(pos));
                }
                match ts.find(closing) {
                    None => return Err(
                        ReadError::UnmatchedDispatch(tag).at(pos)),
                    Some(end) => {
                        let sub = ts.cut_until(end);
                        read_forms(&mut Tokens::new(sub), None,
                                   depth_fuel - 1)?
                    }
                }
            } else {
                Vec::new()
            };
            result.push(Form::Dispatch(tag, children).at(pos));
        } else if let Some(pk) = t.closing() {
            match enclosing {
                Some((open_pk, _)) if open_pk == pk => {
                    ts.unread();
                    return Ok(result);
                }
                Some((open_pk, openpos)) => {
                    return Err(ReadError::ClosingMismatch(open_pk, openpos, pk)
                               .at(pos));
                }
                None => {
                    return Err(ReadError::UnexpectedClosing(pk).at(pos));
                }
            }
        } else {
            result.push(Form::Literal(t.into_text()).at(pos));
        }
    }
    Ok(result)
}

pub fn read_str(s: &str) -> Result<Vec<FormWithPos>, ReadErrorWithPos> {
    let mut ts = Tokens::new(tokenize(str_chars(s)));
    read_forms(&mut ts, None, DEPTH_FUEL)
}

pub fn read_all(
    fh: impl Read,
) -> Result<Vec<FormWithPos>, ReadErrorWithPos>
{
    let mut chars = Vec::new();
    let mut lastpos = Pos::origin();
    for r in buffered_chars(fh) {
        match r {
            Err(e) => return Err(ReadError::IO(e).at(lastpos)),
            Ok((c, pos)) => {
                lastpos = pos;
                chars.push((c, pos));
            }
        }
    }
    let mut ts = Tokens::new(tokenize(chars.into_iter()));
    read_forms(&mut ts, None, DEPTH_FUEL)
}

pub fn read_file(path: &Path) -> Result<Vec<FormWithPos>, ReadErrorWithLocation> {
    let file_context = || -> Box<dyn Context> {
        Box::new(context::FileContext { path: path.to_path_buf() })
    };
    let fh = File::open(path).map_err(|e| io_error_in_context(e, file_context()))?;
    read_all(fh).map_err(|e| e.in_context(file_context()))
}

pub fn write_all<'t>(
    out: impl Write,
    forms: impl IntoIterator<Item = &'t FormWithPos>
) -> Result<(), std::io::Error> {
    let mut out = out; // for `File`
    for form in forms.into_iter() {
        write!(out, "{}\n", form)?;
    }
    Ok(())
}

pub fn write_file<'t>(path: &Path, forms: impl IntoIterator<Item = &'t FormWithPos>)
                      -> Result<(), std::io::Error> {
    write_all(File::create(path)?, forms)
}
