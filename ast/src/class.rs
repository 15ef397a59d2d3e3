// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::{Expression, Params, PropertyKey, Span, Statement};
use serde::{Deserialize, Serialize};

/// A function body is its own node (rather than a bare `Vec<Statement>`) so
/// the hoisting pass (spec.md §4.B, §4.J) has a span to hang diagnostics on.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FunctionBody {
    pub span: Span,
    pub statements: Vec<Statement>,
}

/// Shared by function declarations, function expressions, and methods.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub span: Span,
    pub name: Option<String>,
    pub params: Params,
    pub body: FunctionBody,
    pub is_async: bool,
    pub is_generator: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MethodKind {
    Method,
    Get,
    Set,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassMethod {
    pub span: Span,
    pub key: PropertyKey,
    pub kind: MethodKind,
    pub is_static: bool,
    pub params: Params,
    pub body: FunctionBody,
    pub is_async: bool,
    pub is_generator: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassField {
    pub span: Span,
    pub key: PropertyKey,
    pub is_static: bool,
    pub value: Option<Expression>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ClassMember {
    Constructor(ClassMethod),
    Method(ClassMethod),
    Field(ClassField),
    StaticBlock(Span, Vec<Statement>),
}

/// See spec.md §4.I (Class Builder) and §3 (`PrivateNameScope`).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub span: Span,
    pub name: Option<String>,
    pub super_class: Option<Box<Expression>>,
    pub body: Vec<ClassMember>,
}

impl ClassDefinition {
    /// Whether any member uses a private name, which decides whether the
    /// class builder needs to allocate a `PrivateNameScope` at all.
    pub fn has_private_members(&self) -> bool {
        self.body.iter().any(|member| {
            matches!(
                member,
                ClassMember::Constructor(ClassMethod { key: PropertyKey::Private(_), .. })
                    | ClassMember::Method(ClassMethod { key: PropertyKey::Private(_), .. })
                    | ClassMember::Field(ClassField { key: PropertyKey::Private(_), .. })
            )
        })
    }
}
