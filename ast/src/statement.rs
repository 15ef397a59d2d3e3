// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::{
    BindingPattern, ClassDefinition, Expression, ForBinding, FunctionDefinition, Span,
    VariableKind,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Statement {
    Block(BlockStatement),
    If(IfStatement),
    Loop(LoopStatement),
    ForIn(ForInStatement),
    ForOf(ForOfStatement),
    Return(ReturnStatement),
    Throw(ThrowStatement),
    Try(TryStatement),
    Break(BreakStatement),
    Continue(ContinueStatement),
    Labeled(LabeledStatement),
    VariableDeclaration(VariableDeclaration),
    With(WithStatement),
    ClassDeclaration(ClassDefinition),
    FunctionDeclaration(FunctionDefinition),
    Switch(SwitchStatement),
    Expression(ExpressionStatement),
    Empty(Span),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlockStatement {
    pub span: Span,
    pub body: Vec<Statement>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IfStatement {
    pub span: Span,
    pub test: Expression,
    pub consequent: Box<Statement>,
    pub alternate: Option<Box<Statement>>,
}

/// Loops normalized to the plan spec.md §4.G describes, covering `while`,
/// `do-while`, and C-style `for`. The normalizer (a parser-contract concern,
/// out of scope) is expected to have already desugared all three shapes into
/// this one plan; the loop plan executor (spec.md component G) only ever
/// sees this.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoopPlan {
    pub span: Span,
    /// `for (let i = 0; ...)`'s init clause, or a `var`/`let` statement that
    /// must run exactly once before the first test.
    pub leading_statements: Vec<Statement>,
    /// Re-run before each `condition` test when present (used to re-declare
    /// per-iteration `let` bindings copied from the previous iteration).
    pub condition_prologue: Option<Box<Statement>>,
    /// Absent means "always truthy" (`for (;;)`).
    pub condition: Option<Expression>,
    pub body: Box<Statement>,
    /// `for (...; ...; i++)`'s update clause.
    pub post_iteration: Option<Expression>,
    /// `true` for `do-while` (test runs after the body on the first
    /// iteration too), `false` for `while`/`for`.
    pub condition_after_body: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoopStatement {
    pub span: Span,
    pub plan: LoopPlan,
    pub label: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForInStatement {
    pub span: Span,
    pub left: ForBinding,
    pub right: Expression,
    pub body: Box<Statement>,
    pub label: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForOfStatement {
    pub span: Span,
    pub is_await: bool,
    pub left: ForBinding,
    pub right: Expression,
    pub body: Box<Statement>,
    pub label: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReturnStatement {
    pub span: Span,
    pub argument: Option<Expression>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThrowStatement {
    pub span: Span,
    pub argument: Expression,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatchClause {
    pub span: Span,
    pub param: Option<BindingPattern>,
    pub body: BlockStatement,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TryStatement {
    pub span: Span,
    pub block: BlockStatement,
    pub handler: Option<CatchClause>,
    pub finalizer: Option<BlockStatement>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BreakStatement {
    pub span: Span,
    pub label: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContinueStatement {
    pub span: Span,
    pub label: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LabeledStatement {
    pub span: Span,
    pub label: String,
    pub body: Box<Statement>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VariableDeclarator {
    pub span: Span,
    pub id: BindingPattern,
    pub init: Option<Expression>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VariableDeclaration {
    pub span: Span,
    pub kind: VariableKind,
    pub declarations: Vec<VariableDeclarator>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WithStatement {
    pub span: Span,
    pub object: Expression,
    pub body: Box<Statement>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SwitchCase {
    pub span: Span,
    /// `None` marks the `default:` clause.
    pub test: Option<Expression>,
    pub consequent: Vec<Statement>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SwitchStatement {
    pub span: Span,
    pub discriminant: Expression,
    pub cases: Vec<SwitchCase>,
    pub label: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExpressionStatement {
    pub span: Span,
    pub expression: Expression,
}
