// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hand-built `ast::Program` helpers shared by the integration tests. There
//! is no parser in this workspace (see SPEC_FULL.md §0), so every test
//! assembles its own AST directly, the same way the teacher's own unit
//! tests build heap values directly without going through `oxc_parser`.

#![allow(dead_code)]

use ast::*;
use jswalk_vm::agent::{CancellationToken, EvalOutcome, EvaluatorOptions};
use jswalk_vm::program::{evaluate_program, ExecutionKind};
use jswalk_vm::realm::Realm;
use jswalk_vm::values::JsValue;

pub fn span() -> Span {
    Span::default()
}

pub fn ident(name: &str) -> Expression {
    Expression::Identifier(Identifier { span: span(), name: name.to_string() })
}

pub fn number(value: f64) -> Expression {
    Expression::Literal(Literal { span: span(), value: LiteralValue::Number(value) })
}

pub fn string_lit(value: &str) -> Expression {
    Expression::Literal(Literal { span: span(), value: LiteralValue::String(value.to_string()) })
}

pub fn binary(op: BinaryOperator, left: Expression, right: Expression) -> Expression {
    Expression::Binary(BinaryExpression { span: span(), operator: op, left: Box::new(left), right: Box::new(right) })
}

pub fn expr_stmt(expression: Expression) -> Statement {
    Statement::Expression(ExpressionStatement { span: span(), expression })
}

pub fn var_decl(kind: VariableKind, name: &str, init: Option<Expression>) -> Statement {
    Statement::VariableDeclaration(VariableDeclaration {
        span: span(),
        kind,
        declarations: vec![VariableDeclarator { span: span(), id: BindingPattern::Identifier(name.to_string()), init }],
    })
}

pub fn assign(target: Expression, value: Expression) -> Expression {
    Expression::Assignment(AssignmentExpression {
        span: span(),
        operator: AssignmentOperator::Assign,
        target: AssignmentTarget::Simple(Box::new(target)),
        value: Box::new(value),
    })
}

pub fn call(callee: Expression, args: Vec<Expression>) -> Expression {
    Expression::Call(CallExpression {
        span: span(),
        callee: Box::new(callee),
        arguments: args.into_iter().map(Argument::Normal).collect(),
        optional: false,
    })
}

pub fn member(object: Expression, property: &str) -> Expression {
    Expression::Member(MemberExpression {
        span: span(),
        object: Box::new(object),
        property: MemberProperty::Identifier(property.to_string()),
        optional: false,
    })
}

pub fn private_member(object: Expression, name: &str) -> Expression {
    Expression::Member(MemberExpression {
        span: span(),
        object: Box::new(object),
        property: MemberProperty::Private(name.to_string()),
        optional: false,
    })
}

pub fn program(body: Vec<Statement>, strict: bool) -> Program {
    Program { span: span(), body, strict }
}

pub fn run(prog: &Program) -> Result<JsValue, EvalOutcome> {
    let realm = Realm::new();
    let global_environment = realm.global_environment();
    evaluate_program(
        prog,
        global_environment,
        realm,
        EvaluatorOptions::default(),
        CancellationToken::new(),
        ExecutionKind::Script,
        false,
    )
}

/// Pulls the `message` property text out of a thrown error value, panicking
/// if the outcome wasn't a plain JS throw of an ordinary error object.
pub fn thrown_message(outcome: &EvalOutcome) -> String {
    let EvalOutcome::Thrown(err) = outcome else {
        panic!("expected a thrown completion, got {outcome:?}");
    };
    let JsValue::Object(obj) = err.value() else {
        panic!("expected the thrown value to be an object, got {:?}", err.value());
    };
    let message = obj
        .get_own_property(&jswalk_vm::values::PropKey::from("message"))
        .expect("error objects always carry an own `message` property");
    match message.kind {
        jswalk_vm::values::PropertyKind::Data { value: JsValue::String(s), .. } => s.to_string(),
        other => panic!("unexpected `message` property shape: {other:?}"),
    }
}
