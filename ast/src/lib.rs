// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The typed AST the jswalk evaluator walks.
//!
//! This crate carries no lexer or parser: it is the node catalogue a parser
//! (out of scope for this workspace) is expected to produce. Nodes are plain
//! data, cheap to build by hand, which is how the evaluator's own test suite
//! constructs programs.

mod class;
mod expression;
mod operators;
mod pattern;
mod span;
mod statement;

pub use class::*;
pub use expression::*;
pub use operators::*;
pub use pattern::*;
pub use span::Span;
pub use statement::*;

use serde::{Deserialize, Serialize};

/// The root of a parsed unit of source text.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Program {
    pub span: Span,
    pub body: Vec<Statement>,
    /// Whether the source had a top-level `"use strict"` directive prologue.
    /// A parser resolves this; the evaluator only consumes the flag.
    pub strict: bool,
}
