// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::{Expression, Span};
use serde::{Deserialize, Serialize};

/// A name used as an object-literal or member-access key. Reused for object
/// patterns, class members, and object expressions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum PropertyKey {
    Identifier(String),
    String(String),
    Number(f64),
    Private(String),
    Computed(Box<Expression>),
}

/// A destructuring or simple binding target, as produced for
/// `VariableDeclarator::id`, function parameters, catch parameters, and the
/// pattern side of a destructuring assignment. See spec.md §4.D.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum BindingPattern {
    Identifier(String),
    Array(ArrayPattern),
    Object(ObjectPattern),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArrayPattern {
    pub span: Span,
    /// `None` entries are elisions (`[, x]`).
    pub elements: Vec<Option<ArrayPatternElement>>,
    pub rest: Option<Box<BindingPattern>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArrayPatternElement {
    pub pattern: BindingPattern,
    pub default: Option<Expression>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObjectPattern {
    pub span: Span,
    pub properties: Vec<ObjectPatternProperty>,
    pub rest: Option<Box<BindingPattern>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObjectPatternProperty {
    pub key: PropertyKey,
    pub pattern: BindingPattern,
    pub default: Option<Expression>,
}

/// One formal parameter, with an optional default.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Param {
    pub pattern: BindingPattern,
    pub default: Option<Expression>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Params {
    pub items: Vec<Param>,
    pub rest: Option<BindingPattern>,
}

/// The left-hand side of `for-in`/`for-of`: either an existing assignment
/// target (`for (x of xs)`) or a fresh declaration (`for (let x of xs)`).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ForBinding {
    Pattern(AssignmentTarget),
    Declaration(VariableKind, BindingPattern),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

/// The target of a plain or destructuring assignment.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum AssignmentTarget {
    /// An identifier, member, or private-member reference, evaluated the
    /// same way a read reference would be (spec.md §4.C).
    Simple(Box<Expression>),
    Pattern(BindingPattern),
}
