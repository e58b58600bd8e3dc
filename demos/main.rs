// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use anyhow::{bail, Result};
use clap::Parser as ClapParser;
use fancyexpr::context::{Context, SpecialContext};
use fancyexpr::parse::{parse_all, parse_file, parse_str};
use fancyexpr::read::{read_all, read_file, read_str};
use fancyexpr::tokenize::{tokenize_str, TokenWithPos};
use fancyexpr::value::{ExprWithPos, FormWithPos};
use std::io::{stdin, Read};
use std::path::PathBuf;

#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Parse an expression given on the command line
    #[clap(short, long, value_parser)]
    str: Option<String>,
    /// Parse stdin
    #[clap(short, long, value_parser)]
    pipe: bool,
    /// Stop after tokenization and print the token stream
    #[clap(long, value_parser)]
    tokens: bool,
    /// Stop after reading and print the form trees
    #[clap(long, value_parser)]
    forms: bool,
    /// Show source positions
    #[clap(long, value_parser)]
    pos: bool,
    /// Path to the input file
    #[clap(value_parser)]
    input_path: Option<PathBuf>,
}

fn print_tokens(tokens: &[TokenWithPos], with_pos: bool) {
    for TokenWithPos(token, pos) in tokens {
        if with_pos {
            println!("{pos} {token}");
        } else {
            println!("{token}");
        }
    }
}

fn print_forms(forms: &[FormWithPos], with_pos: bool) {
    for FormWithPos(form, pos) in forms {
        if with_pos {
            println!("{pos} {form}");
        } else {
            println!("{form}");
        }
    }
}

fn print_exprs(exprs: &[ExprWithPos], with_pos: bool) {
    for ExprWithPos(expr, pos) in exprs {
        if with_pos {
            println!("{pos} {expr}");
        } else {
            println!("{expr}");
        }
    }
}

fn stdin_context() -> Box<dyn Context> {
    Box::new(SpecialContext::new("stdin"))
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.tokens {
        let text = if let Some(s) = &args.str {
            s.clone()
        } else if args.pipe {
            let mut s = String::new();
            stdin().lock().read_to_string(&mut s)?;
            s
        } else if let Some(path) = &args.input_path {
            std::fs::read_to_string(path)?
        } else {
            bail!("missing input (use --str, --pipe, or a file path)")
        };
        print_tokens(&tokenize_str(&text), args.pos);
        return Ok(());
    }

    if args.forms {
        let forms = if let Some(s) = &args.str {
            read_str(s)?
        } else if args.pipe {
            read_all(stdin().lock())
                .map_err(|e| e.in_context(stdin_context()))?
        } else if let Some(path) = &args.input_path {
            read_file(path)?
        } else {
            bail!("missing input (use --str, --pipe, or a file path)")
        };
        print_forms(&forms, args.pos);
        return Ok(());
    }

    let exprs = if let Some(s) = &args.str {
        parse_str(s)?
    } else if args.pipe {
        parse_all(stdin().lock())
            .map_err(|e| e.in_context(stdin_context()))?
    } else if let Some(path) = &args.input_path {
        parse_file(path)?
    } else {
        bail!("missing input (use --str, --pipe, or a file path)")
    };
    print_exprs(&exprs, args.pos);
    Ok(())
}
