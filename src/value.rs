// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The tree types produced by the two structural stages.

//! [Form](Form) is the intermediate tree built by the reader, prior
//! to semantic classification; [Expr](Expr) is the final tree handed
//! to an evaluator. Both are strict trees: children are owned by
//! their parent node, with no sharing and no cycles.

use crate::pos::Pos;
use std::fmt::Write;
use kstring::KString;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parenkind {
    Round,
    Square,
    Curly
}

impl Parenkind {
    pub fn opening(self) -> char {
        match self {
            Parenkind::Round => '(',
            Parenkind::Square => '[',
            Parenkind::Curly => '{'
        }
    }
    pub fn closing(self) -> char {
        match self {
            Parenkind::Round => ')',
            Parenkind::Square => ']',
            Parenkind::Curly => '}'
        }
    }
    pub fn from_opening(c: char) -> Option<Parenkind> {
        match c {
            '(' => Some(Parenkind::Round),
            '[' => Some(Parenkind::Square),
            '{' => Some(Parenkind::Curly),
            _ => None
        }
    }
    pub fn from_closing(c: char) -> Option<Parenkind> {
        match c {
            ')' => Some(Parenkind::Round),
            ']' => Some(Parenkind::Square),
            '}' => Some(Parenkind::Curly),
            _ => None
        }
    }
}

/// The token that ends a dispatched region, chosen by the trailing
/// character of the dispatch tag when that character is an opening
/// delimiter; `None` for tags that open no region.
pub fn dispatch_closing(tag: &str) -> Option<&'static str> {
    match tag.chars().last()? {
        '(' => Some(")"),
        '[' => Some("]"),
        '{' => Some("}"),
        '"' => Some("\""),
        _ => None
    }
}

/// Tree node produced by the reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Form {
    /// A bare token not recognized as a bracket, quote or dispatch.
    Literal(KString),
    /// The concatenation of the tokens between an opening and a
    /// closing quote; the quote delimiters are consumed but not
    /// retained.
    String(KString),
    /// `()`, `[]` or `{}` with the intervening forms as children.
    Sequence(Parenkind, Vec<FormWithPos>),
    /// A `#`-prefixed tag, kept verbatim; children are present only
    /// when the tag's trailing character opens a region.
    Dispatch(KString, Vec<FormWithPos>),
}

fn fmt_spaced<T: std::fmt::Display>(
    f: &mut std::fmt::Formatter<'_>,
    items: &[T]
) -> Result<(), std::fmt::Error> {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_char(' ')?;
        }
        item.fmt(f)?;
    }
    Ok(())
}

impl std::fmt::Display for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        match self {
            Form::Literal(s) => f.write_str(s),
            Form::String(s) => f.write_fmt(format_args!("\"{}\"", s)),
            Form::Sequence(pk, children) => {
                f.write_char(pk.opening())?;
                fmt_spaced(f, children)?;
                f.write_char(pk.closing())
            }
            Form::Dispatch(tag, children) => {
                if let Some(closing) = dispatch_closing(tag) {
                    f.write_str(tag)?;
                    fmt_spaced(f, children)?;
                    f.write_str(closing)
                } else {
                    f.write_str(tag)
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormWithPos(pub Form, pub Pos);

impl std::fmt::Display for FormWithPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        self.0.fmt(f)
    }
}

impl Form {
    pub fn at(self, p: Pos) -> FormWithPos {
        FormWithPos(self, p)
    }
}

/// Tree node produced by the parser, ready for evaluation. Number
/// keeps the literal spelling; classifying, not validating, is the
/// parser's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Symbol(KString),
    Number(KString),
    String(KString),
    SExpr(Vec<ExprWithPos>),
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        match self {
            Expr::Symbol(s) => f.write_str(s),
            Expr::Number(s) => f.write_str(s),
            Expr::String(s) => f.write_fmt(format_args!("\"{}\"", s)),
            Expr::SExpr(children) => {
                f.write_char('(')?;
                fmt_spaced(f, children)?;
                f.write_char(')')
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprWithPos(pub Expr, pub Pos);

impl std::fmt::Display for ExprWithPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        self.0.fmt(f)
    }
}

impl Expr {
    pub fn at(self, p: Pos) -> ExprWithPos {
        ExprWithPos(self, p)
    }
}

/// Easily create a symbol
pub fn symbol(s: &str) -> Expr {
    Expr::Symbol(KString::from_ref(s))
}
