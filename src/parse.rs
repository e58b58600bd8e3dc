// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Turning [Form](crate::value::Form) trees into
//! [Expr](crate::value::Expr) trees: literals are classified as
//! numbers or symbols, and vector/map/set literals desugar into
//! call-like expressions with a synthetic head symbol (`vector`,
//! `hash-map`, `hash-set`).

use crate::context::{self, Context};
use crate::pos::Pos;
use crate::read::{read_all, read_file, read_str,
                  ReadError, ReadErrorWithPos, ReadErrorWithLocation};
use crate::value::{symbol, Expr, ExprWithPos, FormWithPos, Form, Parenkind};
use std::fmt::{Formatter, Display};
use std::io::Read;
use std::path::Path;
use kstring::KString;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("{0}")]
    Read(ReadError),
    #[error("dispatch unknown: '{0}'")]
    UnknownDispatch(KString),
}

#[derive(Error, Debug)]
#[error("{err} {pos}")]
pub struct ParseErrorWithPos {
    pub err: ParseError,
    pub pos: Pos
}

impl ParseError {
    fn at(self, p: Pos) -> ParseErrorWithPos {
        ParseErrorWithPos {
            err: self,
            pos: p
        }
    }
}

impl From<ReadErrorWithPos> for ParseErrorWithPos {
    fn from(ep: ReadErrorWithPos) -> ParseErrorWithPos {
        let ReadErrorWithPos { err, pos } = ep;
        ParseErrorWithPos {
            err: ParseError::Read(err),
            pos
        }
    }
}

#[derive(Error, Debug)]
pub struct ParseErrorWithPosContext {
    err_with_pos: ParseErrorWithPos,
    container: Box<dyn Context>
}

impl Display for ParseErrorWithPosContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        f.write_fmt(format_args!("{} ",
                                 self.err_with_pos.err))?;
        self.container.format_with_pos(self.err_with_pos.pos, f)?;
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ParseErrorWithLocation {
    #[error("{0}")]
    PC(Box<ParseErrorWithPosContext>),
    #[error("{0}")]
    Read(ReadErrorWithLocation)
}

impl ParseErrorWithPos {
    pub fn in_context(self, container: Box<dyn Context>) -> ParseErrorWithLocation {
        ParseErrorWithLocation::PC(Box::new(
            ParseErrorWithPosContext {
                err_with_pos: self,
                container
            }))
    }
}

/// A literal with a leading digit, or a leading `-` followed by a
/// digit, is a number; the remaining characters are not validated
/// (so `12234dd` is a number). Everything else is a symbol.
fn classify_literal(text: KString) -> Expr {
    let mut cs = text.chars();
    let is_number = match cs.next() {
        Some(c0) if c0.is_ascii_digit() => true,
        Some('-') => matches!(cs.next(), Some(c1) if c1.is_ascii_digit()),
        _ => false,
    };
    if is_number {
        Expr::Number(text)
    } else {
        Expr::Symbol(text)
    }
}

// Desugared literals become an ordinary call form; the synthetic
// head symbol takes the position of the whole literal.
fn sugared(
    head: &str,
    children: Vec<FormWithPos>,
    pos: Pos,
) -> Result<ExprWithPos, ParseErrorWithPos> {
    let mut v = Vec::with_capacity(children.len() + 1);
    v.push(symbol(head).at(pos));
    for child in children {
        v.push(parse_form(child)?);
    }
    Ok(Expr::SExpr(v).at(pos))
}

pub fn parse_form(form: FormWithPos) -> Result<ExprWithPos, ParseErrorWithPos> {
    let FormWithPos(form, pos) = form;
    match form {
        Form::Literal(text) => Ok(classify_literal(text).at(pos)),
        Form::String(text) => Ok(Expr::String(text).at(pos)),
        Form::Sequence(Parenkind::Round, children) => {
            let v = children.into_iter().map(parse_form)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Expr::SExpr(v).at(pos))
        }
        Form::Sequence(Parenkind::Square, children) =>
            sugared("vector", children, pos),
        Form::Sequence(Parenkind::Curly, children) =>
            sugared("hash-map", children, pos),
        Form::Dispatch(tag, children) => {
            if tag.as_str() == "#{" {
                sugared("hash-set", children, pos)
            } else {
                Err(ParseError::UnknownDispatch(tag).at(pos))
            }
        }
    }
}

pub fn parse_forms(
    forms: Vec<FormWithPos>
) -> Result<Vec<ExprWithPos>, ParseErrorWithPos> {
    forms.into_iter().map(parse_form).collect()
}

pub fn parse_str(s: &str) -> Result<Vec<ExprWithPos>, ParseErrorWithPos> {
    parse_forms(read_str(s)?)
}

pub fn parse_all(fh: impl Read) -> Result<Vec<ExprWithPos>, ParseErrorWithPos> {
    parse_forms(read_all(fh)?)
}

pub fn parse_file(path: &Path) -> Result<Vec<ExprWithPos>, ParseErrorWithLocation> {
    let forms = read_file(path).map_err(ParseErrorWithLocation::Read)?;
    parse_forms(forms).map_err(|e| e.in_context(
        Box::new(context::FileContext { path: path.to_path_buf() })))
}
