// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hand-built `ast::Program` trees standing in for a parser's output
//! (`jswalk_cli` has no lexer/parser of its own, see SPEC_FULL.md §0).
//! Each demo is a small, self-contained program exercising a different
//! corner of the evaluator.

use ast::*;

fn span() -> Span {
    Span::default()
}

fn ident(name: &str) -> Expression {
    Expression::Identifier(Identifier { span: span(), name: name.to_string() })
}

fn number(value: f64) -> Expression {
    Expression::Literal(Literal { span: span(), value: LiteralValue::Number(value) })
}

fn binary(op: BinaryOperator, left: Expression, right: Expression) -> Expression {
    Expression::Binary(BinaryExpression { span: span(), operator: op, left: Box::new(left), right: Box::new(right) })
}

fn expr_stmt(expression: Expression) -> Statement {
    Statement::Expression(ExpressionStatement { span: span(), expression })
}

fn let_decl(name: &str, init: Expression) -> Statement {
    Statement::VariableDeclaration(VariableDeclaration {
        span: span(),
        kind: VariableKind::Let,
        declarations: vec![VariableDeclarator { span: span(), id: BindingPattern::Identifier(name.to_string()), init: Some(init) }],
    })
}

/// `(1 + 2) * 3;`
fn arithmetic() -> Program {
    let sum = binary(BinaryOperator::Addition, number(1.0), number(2.0));
    let product = binary(BinaryOperator::Multiplication, sum, number(3.0));
    Program { span: span(), body: vec![expr_stmt(product)], strict: true }
}

/// ```js
/// let x = 10;
/// let y = x + 5;
/// y;
/// ```
fn variables() -> Program {
    let body = vec![
        let_decl("x", number(10.0)),
        let_decl("y", binary(BinaryOperator::Addition, ident("x"), number(5.0))),
        expr_stmt(ident("y")),
    ];
    Program { span: span(), body, strict: true }
}

/// ```js
/// function add(a, b) { return a + b; }
/// add(2, 3);
/// ```
fn function_call() -> Program {
    let add = FunctionDefinition {
        span: span(),
        name: Some("add".to_string()),
        params: Params {
            items: vec![
                Param { pattern: BindingPattern::Identifier("a".to_string()), default: None },
                Param { pattern: BindingPattern::Identifier("b".to_string()), default: None },
            ],
            rest: None,
        },
        body: FunctionBody {
            span: span(),
            statements: vec![Statement::Return(ReturnStatement {
                span: span(),
                argument: Some(binary(BinaryOperator::Addition, ident("a"), ident("b"))),
            })],
        },
        is_async: false,
        is_generator: false,
    };
    let call = Expression::Call(CallExpression {
        span: span(),
        callee: Box::new(ident("add")),
        arguments: vec![Argument::Normal(number(2.0)), Argument::Normal(number(3.0))],
        optional: false,
    });
    Program {
        span: span(),
        body: vec![Statement::FunctionDeclaration(add), expr_stmt(call)],
        strict: true,
    }
}

/// ```js
/// class Counter {
///   #count = 0;
///   constructor(start) { this.#count = start; }
///   increment() { this.#count = this.#count + 1; return this.#count; }
/// }
/// const c = new Counter(5);
/// c.increment();
/// c.increment();
/// ```
fn class_counter() -> Program {
    let this_count = Expression::Member(MemberExpression {
        span: span(),
        object: Box::new(Expression::This(span())),
        property: MemberProperty::Private("count".to_string()),
        optional: false,
    });

    let constructor = ClassMethod {
        span: span(),
        key: PropertyKey::Identifier("constructor".to_string()),
        kind: MethodKind::Method,
        is_static: false,
        params: Params { items: vec![Param { pattern: BindingPattern::Identifier("start".to_string()), default: None }], rest: None },
        body: FunctionBody {
            span: span(),
            statements: vec![expr_stmt(Expression::Assignment(AssignmentExpression {
                span: span(),
                operator: AssignmentOperator::Assign,
                target: AssignmentTarget::Simple(Box::new(this_count.clone())),
                value: Box::new(ident("start")),
            }))],
        },
        is_async: false,
        is_generator: false,
    };

    let increment = ClassMethod {
        span: span(),
        key: PropertyKey::Identifier("increment".to_string()),
        kind: MethodKind::Method,
        is_static: false,
        params: Params::default(),
        body: FunctionBody {
            span: span(),
            statements: vec![
                expr_stmt(Expression::Assignment(AssignmentExpression {
                    span: span(),
                    operator: AssignmentOperator::Assign,
                    target: AssignmentTarget::Simple(Box::new(this_count.clone())),
                    value: Box::new(binary(BinaryOperator::Addition, this_count.clone(), number(1.0))),
                })),
                Statement::Return(ReturnStatement { span: span(), argument: Some(this_count.clone()) }),
            ],
        },
        is_async: false,
        is_generator: false,
    };

    let count_field = ClassField { span: span(), key: PropertyKey::Private("count".to_string()), is_static: false, value: Some(number(0.0)) };

    let class_def = ClassDefinition {
        span: span(),
        name: Some("Counter".to_string()),
        super_class: None,
        body: vec![ClassMember::Field(count_field), ClassMember::Constructor(constructor), ClassMember::Method(increment)],
    };

    let new_counter = Expression::New(NewExpression {
        span: span(),
        callee: Box::new(Expression::Class(class_def)),
        arguments: vec![Argument::Normal(number(5.0))],
    });

    let increment_call = |object: Expression| {
        Expression::Call(CallExpression {
            span: span(),
            callee: Box::new(Expression::Member(MemberExpression {
                span: span(),
                object: Box::new(object),
                property: MemberProperty::Identifier("increment".to_string()),
                optional: false,
            })),
            arguments: Vec::new(),
            optional: false,
        })
    };

    let body = vec![
        Statement::VariableDeclaration(VariableDeclaration {
            span: span(),
            kind: VariableKind::Const,
            declarations: vec![VariableDeclarator { span: span(), id: BindingPattern::Identifier("c".to_string()), init: Some(new_counter) }],
        }),
        expr_stmt(increment_call(ident("c"))),
        expr_stmt(increment_call(ident("c"))),
    ];
    Program { span: span(), body, strict: true }
}

pub struct Demo {
    pub name: &'static str,
    pub description: &'static str,
    pub build: fn() -> Program,
}

pub const DEMOS: &[Demo] = &[
    Demo { name: "arithmetic", description: "(1 + 2) * 3", build: arithmetic },
    Demo { name: "variables", description: "let bindings and a read", build: variables },
    Demo { name: "function", description: "a function declaration and call", build: function_call },
    Demo { name: "class", description: "a class with a private field", build: class_counter },
];

pub fn find(name: &str) -> Option<&'static Demo> {
    DEMOS.iter().find(|demo| demo.name == name)
}
