// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A reader for the "fancy" expression notation, a Lisp/Clojure
//! flavored data syntax: parenthesized lists, bracketed vectors,
//! braced maps, quoted strings, and `#`-prefixed dispatch macros
//! such as the `#{...}` set literal.
//!
//! The pipeline has three stages, each consuming the output of the
//! previous one and each usable on its own:
//!
//! * `fancyexpr::tokenize` splits input text into tokens; any input
//!   tokenizes.
//!
//! * `fancyexpr::read` builds `Form` trees from the tokens while
//!   enforcing delimiter nesting and reading quoted strings and
//!   dispatch regions.
//!
//! * `fancyexpr::parse` turns `Form` trees into `Expr` trees for a
//!   downstream evaluator: literals are classified as numbers or
//!   symbols, and vector/map/set literals desugar into ordinary
//!   call-like expressions (`vector`, `hash-map`, `hash-set`).
//!
//! Any syntactic defect aborts the whole read; there are no partial
//! trees and no recovery. Errors carry precise location information
//! (and the source file where one is involved).

pub mod chars;
pub mod context;
pub mod parse;
pub mod pos;
pub mod read;
pub mod tokenize;
pub mod value;
