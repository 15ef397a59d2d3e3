// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod common;

use ast::*;
use common::*;
use jswalk_vm::agent::EvalOutcome;
use jswalk_vm::values::JsValue;

#[test]
fn arithmetic_respects_operator_precedence() {
    let sum = binary(BinaryOperator::Addition, number(1.0), number(2.0));
    let product = binary(BinaryOperator::Multiplication, sum, number(3.0));
    let prog = program(vec![expr_stmt(product)], true);
    let value = run(&prog).expect("evaluates without error");
    assert!(matches!(value, JsValue::Number(n) if n == 9.0));
}

/// A `let` binding exists from block entry but is in the temporal dead zone
/// until its declaration statement runs; reading it earlier is a
/// `ReferenceError`, not `undefined`.
#[test]
fn reading_a_let_binding_before_its_declaration_throws_reference_error() {
    let prog = program(vec![expr_stmt(ident("x")), var_decl(VariableKind::Let, "x", Some(number(1.0)))], true);
    let err = run(&prog).expect_err("TDZ read must throw");
    assert!(thrown_message(&err).contains("before initialization"));
}

#[test]
fn reassigning_a_const_binding_throws_type_error() {
    let prog = program(
        vec![var_decl(VariableKind::Const, "c", Some(number(1.0))), expr_stmt(assign(ident("c"), number(2.0)))],
        true,
    );
    let err = run(&prog).expect_err("const reassignment must throw");
    assert!(thrown_message(&err).contains("constant"));
}

/// `var` and function declarations are hoisted and initialized before the
/// first statement of their enclosing scope runs, so a function defined
/// later in the program can already see the (as yet unassigned) `var`
/// without a `ReferenceError`.
#[test]
fn var_and_function_declarations_are_hoisted_to_scope_entry() {
    let read_typeof_x = FunctionDefinition {
        span: span(),
        name: Some("readTypeofX".to_string()),
        params: Params::default(),
        body: FunctionBody {
            span: span(),
            statements: vec![Statement::Return(ReturnStatement {
                span: span(),
                argument: Some(Expression::Unary(UnaryExpression { span: span(), operator: UnaryOperator::TypeOf, argument: Box::new(ident("x")) })),
            })],
        },
        is_async: false,
        is_generator: false,
    };
    let prog = program(
        vec![
            Statement::FunctionDeclaration(read_typeof_x),
            var_decl(VariableKind::Let, "output", Some(call(ident("readTypeofX"), vec![]))),
            var_decl(VariableKind::Var, "x", Some(number(5.0))),
            expr_stmt(ident("output")),
        ],
        true,
    );
    let value = run(&prog).expect("hoisting lets the call through without a reference error");
    assert!(matches!(value, JsValue::String(s) if &*s == "undefined"));
}

#[test]
fn strict_mode_assignment_to_an_undeclared_identifier_throws_reference_error() {
    let prog = program(vec![expr_stmt(assign(ident("y"), number(10.0)))], true);
    let err = run(&prog).expect_err("strict mode forbids implicit globals");
    assert!(thrown_message(&err).contains("not defined"));
}

#[test]
fn sloppy_mode_assignment_to_an_undeclared_identifier_creates_a_global_binding() {
    let prog = program(vec![expr_stmt(assign(ident("z"), number(10.0))), expr_stmt(ident("z"))], false);
    let value = run(&prog).expect("sloppy mode creates an implicit global instead of throwing");
    assert!(matches!(value, JsValue::Number(n) if n == 10.0));
}

/// `{a, ...rest}` must collect every own enumerable property not already
/// destructured, in the source object's insertion order.
#[test]
fn object_rest_destructuring_preserves_remaining_insertion_order() {
    let source = Expression::Object(ObjectExpression {
        span: span(),
        properties: vec![
            ObjectPropertyNode::Property(ObjectProperty { key: PropertyKey::Identifier("a".to_string()), value: number(1.0), kind: ObjectPropertyKind::Init, shorthand: false }),
            ObjectPropertyNode::Property(ObjectProperty { key: PropertyKey::Identifier("b".to_string()), value: number(2.0), kind: ObjectPropertyKind::Init, shorthand: false }),
            ObjectPropertyNode::Property(ObjectProperty { key: PropertyKey::Identifier("c".to_string()), value: number(3.0), kind: ObjectPropertyKind::Init, shorthand: false }),
        ],
    });
    let pattern = BindingPattern::Object(ObjectPattern {
        span: span(),
        properties: vec![ObjectPatternProperty { key: PropertyKey::Identifier("a".to_string()), pattern: BindingPattern::Identifier("a".to_string()), default: None }],
        rest: Some(Box::new(BindingPattern::Identifier("rest".to_string()))),
    });
    let destructure = Statement::VariableDeclaration(VariableDeclaration {
        span: span(),
        kind: VariableKind::Let,
        declarations: vec![VariableDeclarator { span: span(), id: pattern, init: Some(source) }],
    });
    let prog = program(vec![destructure, expr_stmt(ident("rest"))], true);
    let value = run(&prog).expect("destructuring succeeds");
    let JsValue::Object(rest) = value else { panic!("rest binding is not an object") };
    let keys: Vec<String> = rest.enumerable_own_string_keys().iter().map(|k| k.to_string()).collect();
    assert_eq!(keys, vec!["b".to_string(), "c".to_string()]);
}

/// Accessing a private field requires the accessing object to carry the
/// declaring class's brand (spec.md §9); an unrelated plain object never
/// satisfies it even if it happens to carry a same-named public property.
#[test]
fn accessing_a_private_field_on_an_object_without_the_brand_throws_type_error() {
    let field = ClassField { span: span(), key: PropertyKey::Private("secret".to_string()), is_static: false, value: Some(number(1.0)) };
    let reader = ClassMethod {
        span: span(),
        key: PropertyKey::Identifier("read".to_string()),
        kind: MethodKind::Method,
        is_static: false,
        params: Params { items: vec![Param { pattern: BindingPattern::Identifier("other".to_string()), default: None }], rest: None },
        body: FunctionBody { span: span(), statements: vec![Statement::Return(ReturnStatement { span: span(), argument: Some(private_member(ident("other"), "secret")) })] },
        is_async: false,
        is_generator: false,
    };
    let class_def = ClassDefinition { span: span(), name: Some("Box".to_string()), super_class: None, body: vec![ClassMember::Field(field), ClassMember::Method(reader)] };

    let make_instance = Expression::New(NewExpression { span: span(), callee: Box::new(Expression::Class(class_def)), arguments: vec![] });
    let plain_object = Expression::Object(ObjectExpression { span: span(), properties: vec![] });

    let prog = program(
        vec![
            var_decl(VariableKind::Const, "boxed", Some(make_instance)),
            var_decl(VariableKind::Const, "other", Some(plain_object)),
            expr_stmt(call(member(ident("boxed"), "read"), vec![ident("other")])),
        ],
        true,
    );
    let err = run(&prog).expect_err("reading #secret off an unrelated object must throw");
    assert!(thrown_message(&err).contains("private"));
}

/// Every `for-of` iteration, including one abandoned by `break`, must call
/// the iterator's `return()` exactly once (spec.md §4.H `IteratorClose`).
#[test]
fn breaking_out_of_a_for_of_loop_closes_the_iterator() {
    use std::cell::Cell;
    use std::rc::Rc;

    use jswalk_vm::agent::{CancellationToken, EvaluatorOptions};
    use jswalk_vm::host::StandardLibrary;
    use jswalk_vm::realm::Realm;
    use jswalk_vm::values::{FunctionData, JsObject, NativeFunction, ObjectKind, PropKey, PropertyDescriptor, WellKnownSymbol};
    use jswalk_vm::{Agent, JsResult};

    let realm = Realm::new();
    let closed = Rc::new(Cell::new(false));

    let iterator = JsObject::new(Some(realm.host.object_prototype()), ObjectKind::Ordinary);
    let step = Rc::new(Cell::new(0));
    let step_for_next = step.clone();
    let next_fn: NativeFunction = Rc::new(move |agent: &mut Agent, _this, _args| -> JsResult<JsValue> {
        let n = step_for_next.get();
        step_for_next.set(n + 1);
        let result = agent.realm.host.new_ordinary_object();
        result.define_property(PropKey::from("value"), PropertyDescriptor::data(JsValue::Number(n as f64), true, true, true));
        result.define_property(PropKey::from("done"), PropertyDescriptor::data(JsValue::Boolean(false), true, true, true));
        Ok(JsValue::Object(result))
    });
    let closed_for_return = closed.clone();
    let return_fn: NativeFunction = Rc::new(move |agent: &mut Agent, _this, args| -> JsResult<JsValue> {
        closed_for_return.set(true);
        let result = agent.realm.host.new_ordinary_object();
        result.define_property(PropKey::from("value"), PropertyDescriptor::data(args.first().cloned().unwrap_or(JsValue::Undefined), true, true, true));
        result.define_property(PropKey::from("done"), PropertyDescriptor::data(JsValue::Boolean(true), true, true, true));
        Ok(JsValue::Object(result))
    });
    let function_prototype = realm.host.function_prototype();
    let next_obj = JsObject::new(Some(function_prototype.clone()), ObjectKind::Function(FunctionData::Native(next_fn, std::rc::Rc::from("next"))));
    let return_obj = JsObject::new(Some(function_prototype.clone()), ObjectKind::Function(FunctionData::Native(return_fn, std::rc::Rc::from("return"))));
    iterator.define_property(PropKey::from("next"), PropertyDescriptor::data(JsValue::Object(next_obj), true, false, true));
    iterator.define_property(PropKey::from("return"), PropertyDescriptor::data(JsValue::Object(return_obj), true, false, true));

    let iterator_for_symbol = iterator.clone();
    let iterator_method: NativeFunction = Rc::new(move |_agent, _this, _args| Ok(JsValue::Object(iterator_for_symbol.clone())));
    let iterator_method_obj = JsObject::new(Some(function_prototype), ObjectKind::Function(FunctionData::Native(iterator_method, std::rc::Rc::from("[Symbol.iterator]"))));

    let iterable = JsObject::new(Some(realm.host.object_prototype()), ObjectKind::Ordinary);
    let iterator_symbol = realm.well_known_symbol(WellKnownSymbol::Iterator);
    iterable.define_property(PropKey::Symbol(iterator_symbol), PropertyDescriptor::data(JsValue::Object(iterator_method_obj), true, false, true));

    // Stash the iterable as a global so the program can reach it without a
    // parser to thread an external value through.
    let global_environment = realm.global_environment();
    let mut agent = Agent::new(realm.clone(), EvaluatorOptions::default(), CancellationToken::new());
    global_environment.create_mutable_binding(&mut agent, std::rc::Rc::from("iterable"), false).unwrap();
    global_environment.initialize_binding(&mut agent, "iterable", JsValue::Object(iterable)).unwrap();

    let for_of = Statement::ForOf(ForOfStatement {
        span: span(),
        is_await: false,
        left: ForBinding::Declaration(VariableKind::Let, BindingPattern::Identifier("v".to_string())),
        right: ident("iterable"),
        body: Box::new(Statement::Break(BreakStatement { span: span(), label: None })),
        label: None,
    });
    let prog = program(vec![for_of], true);

    let result = jswalk_vm::program::evaluate_program(
        &prog,
        global_environment,
        realm,
        EvaluatorOptions::default(),
        CancellationToken::new(),
        jswalk_vm::program::ExecutionKind::Script,
        false,
    );
    result.expect("the loop completes normally after breaking");
    assert!(closed.get(), "iterator.return() must be called when a for-of loop is exited via break");
}

/// `IteratorClose` on an otherwise-normal completion (here, a `break`) must
/// surface a throw from the iterator's own `return()` method rather than
/// silently discarding it (spec.md §4.H step 7).
#[test]
fn a_throw_from_iterator_return_wins_over_a_plain_break() {
    use std::rc::Rc;

    use jswalk_vm::agent::{CancellationToken, EvaluatorOptions};
    use jswalk_vm::host::StandardLibrary;
    use jswalk_vm::realm::Realm;
    use jswalk_vm::values::{FunctionData, JsObject, NativeFunction, ObjectKind, PropKey, PropertyDescriptor, WellKnownSymbol};
    use jswalk_vm::{Agent, JsResult};

    let realm = Realm::new();

    let iterator = JsObject::new(Some(realm.host.object_prototype()), ObjectKind::Ordinary);
    let next_fn: NativeFunction = Rc::new(move |agent: &mut Agent, _this, _args| -> JsResult<JsValue> {
        let result = agent.realm.host.new_ordinary_object();
        result.define_property(PropKey::from("value"), PropertyDescriptor::data(JsValue::Number(0.0), true, true, true));
        result.define_property(PropKey::from("done"), PropertyDescriptor::data(JsValue::Boolean(false), true, true, true));
        Ok(JsValue::Object(result))
    });
    let return_fn: NativeFunction = Rc::new(move |agent: &mut Agent, _this, _args| -> JsResult<JsValue> {
        Err(agent.throw_exception(jswalk_vm::agent::ExceptionType::TypeError, "return() blew up"))
    });
    let function_prototype = realm.host.function_prototype();
    let next_obj = JsObject::new(Some(function_prototype.clone()), ObjectKind::Function(FunctionData::Native(next_fn, std::rc::Rc::from("next"))));
    let return_obj = JsObject::new(Some(function_prototype.clone()), ObjectKind::Function(FunctionData::Native(return_fn, std::rc::Rc::from("return"))));
    iterator.define_property(PropKey::from("next"), PropertyDescriptor::data(JsValue::Object(next_obj), true, false, true));
    iterator.define_property(PropKey::from("return"), PropertyDescriptor::data(JsValue::Object(return_obj), true, false, true));

    let iterator_for_symbol = iterator.clone();
    let iterator_method: NativeFunction = Rc::new(move |_agent, _this, _args| Ok(JsValue::Object(iterator_for_symbol.clone())));
    let iterator_method_obj = JsObject::new(Some(function_prototype), ObjectKind::Function(FunctionData::Native(iterator_method, std::rc::Rc::from("[Symbol.iterator]"))));

    let iterable = JsObject::new(Some(realm.host.object_prototype()), ObjectKind::Ordinary);
    let iterator_symbol = realm.well_known_symbol(WellKnownSymbol::Iterator);
    iterable.define_property(PropKey::Symbol(iterator_symbol), PropertyDescriptor::data(JsValue::Object(iterator_method_obj), true, false, true));

    let global_environment = realm.global_environment();
    let mut agent = Agent::new(realm.clone(), EvaluatorOptions::default(), CancellationToken::new());
    global_environment.create_mutable_binding(&mut agent, std::rc::Rc::from("iterable"), false).unwrap();
    global_environment.initialize_binding(&mut agent, "iterable", JsValue::Object(iterable)).unwrap();

    let for_of = Statement::ForOf(ForOfStatement {
        span: span(),
        is_await: false,
        left: ForBinding::Declaration(VariableKind::Let, BindingPattern::Identifier("v".to_string())),
        right: ident("iterable"),
        body: Box::new(Statement::Break(BreakStatement { span: span(), label: None })),
        label: None,
    });
    let prog = program(vec![for_of], true);

    let result = jswalk_vm::program::evaluate_program(
        &prog,
        global_environment,
        realm,
        EvaluatorOptions::default(),
        CancellationToken::new(),
        jswalk_vm::program::ExecutionKind::Script,
        false,
    );
    let err = result.expect_err("a throwing return() must surface, not be swallowed by the break it's closing");
    assert!(thrown_message(&err).contains("return() blew up"));
}

/// A generator suspends at `yield`, resumes with the value passed to
/// `.next()`, and `.return()` forces an early, `finally`-respecting exit.
#[test]
fn generator_suspends_at_yield_and_return_ends_it_early() {
    let yield_expr = |arg: Expression| Expression::Yield(YieldExpression { span: span(), argument: Some(Box::new(arg)), delegate: false });
    let body = FunctionBody {
        span: span(),
        statements: vec![
            expr_stmt(yield_expr(number(1.0))),
            expr_stmt(yield_expr(number(2.0))),
            expr_stmt(yield_expr(number(3.0))),
        ],
    };
    let gen_def = FunctionDefinition { span: span(), name: Some("gen".to_string()), params: Params::default(), body, is_async: false, is_generator: true };

    let make_iter = var_decl(VariableKind::Const, "it", Some(call(ident("gen"), vec![])));
    let first = var_decl(VariableKind::Const, "first", Some(call(member(ident("it"), "next"), vec![])));
    let returned = var_decl(VariableKind::Const, "returned", Some(call(member(ident("it"), "return"), vec![number(99.0)])));
    let result_value = member(ident("returned"), "value");
    let result_done = member(ident("returned"), "done");
    let pair = Expression::Array(ArrayExpression { span: span(), elements: vec![Some(ArrayElement::Normal(member(ident("first"), "value"))), Some(ArrayElement::Normal(result_value)), Some(ArrayElement::Normal(result_done))] });

    let prog = program(vec![Statement::FunctionDeclaration(gen_def), make_iter, first, returned, expr_stmt(pair)], true);
    let value = run(&prog).expect("generator drives to a forced return");
    let JsValue::Object(arr) = value else { panic!("expected an array result") };
    let get = |i: usize| arr.get_own_property(&jswalk_vm::values::PropKey::from(i.to_string())).unwrap();
    match get(0).kind {
        jswalk_vm::values::PropertyKind::Data { value: JsValue::Number(n), .. } => assert_eq!(n, 1.0),
        other => panic!("unexpected first() result: {other:?}"),
    }
    match get(1).kind {
        jswalk_vm::values::PropertyKind::Data { value: JsValue::Number(n), .. } => assert_eq!(n, 99.0),
        other => panic!("unexpected return() value: {other:?}"),
    }
    match get(2).kind {
        jswalk_vm::values::PropertyKind::Data { value: JsValue::Boolean(b), .. } => assert!(b),
        other => panic!("unexpected return() done flag: {other:?}"),
    }
}

/// `yield*` re-yields every value an inner generator produces before
/// resuming the outer generator's own body.
#[test]
fn yield_star_delegates_to_an_inner_generator() {
    let inner_body = FunctionBody {
        span: span(),
        statements: vec![
            expr_stmt(Expression::Yield(YieldExpression { span: span(), argument: Some(Box::new(number(1.0))), delegate: false })),
            expr_stmt(Expression::Yield(YieldExpression { span: span(), argument: Some(Box::new(number(2.0))), delegate: false })),
        ],
    };
    let inner = FunctionDefinition { span: span(), name: Some("inner".to_string()), params: Params::default(), body: inner_body, is_async: false, is_generator: true };

    let outer_body = FunctionBody {
        span: span(),
        statements: vec![expr_stmt(Expression::Yield(YieldExpression {
            span: span(),
            argument: Some(Box::new(call(ident("inner"), vec![]))),
            delegate: true,
        }))],
    };
    let outer = FunctionDefinition { span: span(), name: Some("outer".to_string()), params: Params::default(), body: outer_body, is_async: false, is_generator: true };

    let make_iter = var_decl(VariableKind::Const, "it", Some(call(ident("outer"), vec![])));
    let first = var_decl(VariableKind::Const, "first", Some(call(member(ident("it"), "next"), vec![])));
    let second = var_decl(VariableKind::Const, "second", Some(call(member(ident("it"), "next"), vec![])));
    let pair = Expression::Array(ArrayExpression {
        span: span(),
        elements: vec![Some(ArrayElement::Normal(member(ident("first"), "value"))), Some(ArrayElement::Normal(member(ident("second"), "value")))],
    });
    let prog = program(
        vec![Statement::FunctionDeclaration(inner), Statement::FunctionDeclaration(outer), make_iter, first, second, expr_stmt(pair)],
        true,
    );
    let value = run(&prog).expect("delegation drives the inner generator's values out");
    let JsValue::Object(arr) = value else { panic!("expected an array result") };
    let get = |i: usize| arr.get_own_property(&jswalk_vm::values::PropKey::from(i.to_string())).unwrap();
    for (index, expected) in [(0, 1.0), (1, 2.0)] {
        match get(index).kind {
            jswalk_vm::values::PropertyKind::Data { value: JsValue::Number(n), .. } => assert_eq!(n, expected),
            other => panic!("unexpected delegated value at {index}: {other:?}"),
        }
    }
}

/// A derived class's constructor must run `super()` before `this` becomes
/// usable, and the child's own field initializers only run once it has.
#[test]
fn derived_class_constructor_runs_super_then_its_own_field_initializers() {
    let parent_ctor = ClassMethod {
        span: span(),
        key: PropertyKey::Identifier("constructor".to_string()),
        kind: MethodKind::Method,
        is_static: false,
        params: Params { items: vec![Param { pattern: BindingPattern::Identifier("value".to_string()), default: None }], rest: None },
        body: FunctionBody {
            span: span(),
            statements: vec![expr_stmt(assign(member(Expression::This(span()), "base"), ident("value")))],
        },
        is_async: false,
        is_generator: false,
    };
    let parent = ClassDefinition { span: span(), name: Some("Parent".to_string()), super_class: None, body: vec![ClassMember::Constructor(parent_ctor)] };

    let child_field = ClassField { span: span(), key: PropertyKey::Identifier("extra".to_string()), is_static: false, value: Some(number(7.0)) };
    let child_ctor = ClassMethod {
        span: span(),
        key: PropertyKey::Identifier("constructor".to_string()),
        kind: MethodKind::Method,
        is_static: false,
        params: Params { items: vec![Param { pattern: BindingPattern::Identifier("value".to_string()), default: None }], rest: None },
        body: FunctionBody {
            span: span(),
            statements: vec![expr_stmt(call(Expression::Super(span()), vec![ident("value")]))],
        },
        is_async: false,
        is_generator: false,
    };
    let child = ClassDefinition {
        span: span(),
        name: Some("Child".to_string()),
        super_class: Some(Box::new(Expression::Class(parent))),
        body: vec![ClassMember::Field(child_field), ClassMember::Constructor(child_ctor)],
    };

    let make_instance = Expression::New(NewExpression { span: span(), callee: Box::new(Expression::Class(child)), arguments: vec![number(5.0)] });
    let instance_decl = var_decl(VariableKind::Const, "instance", Some(make_instance));
    let result = Expression::Array(ArrayExpression {
        span: span(),
        elements: vec![Some(ArrayElement::Normal(member(ident("instance"), "base"))), Some(ArrayElement::Normal(member(ident("instance"), "extra")))],
    });
    let prog = program(vec![instance_decl, expr_stmt(result)], true);
    let value = run(&prog).expect("construction succeeds");
    let JsValue::Object(arr) = value else { panic!("expected an array result") };
    let get = |i: usize| arr.get_own_property(&jswalk_vm::values::PropKey::from(i.to_string())).unwrap();
    match get(0).kind {
        jswalk_vm::values::PropertyKind::Data { value: JsValue::Number(n), .. } => assert_eq!(n, 5.0),
        other => panic!("unexpected base value: {other:?}"),
    }
    match get(1).kind {
        jswalk_vm::values::PropertyKind::Data { value: JsValue::Number(n), .. } => assert_eq!(n, 7.0),
        other => panic!("unexpected extra value: {other:?}"),
    }
}

#[test]
fn a_derived_constructor_that_never_calls_super_errors_on_implicit_this_return() {
    let empty_ctor = ClassMethod {
        span: span(),
        key: PropertyKey::Identifier("constructor".to_string()),
        kind: MethodKind::Method,
        is_static: false,
        params: Params::default(),
        body: FunctionBody { span: span(), statements: vec![] },
        is_async: false,
        is_generator: false,
    };
    let parent = ClassDefinition { span: span(), name: Some("Parent".to_string()), super_class: None, body: vec![] };
    let child = ClassDefinition {
        span: span(),
        name: Some("Child".to_string()),
        super_class: Some(Box::new(Expression::Class(parent))),
        body: vec![ClassMember::Constructor(empty_ctor)],
    };
    let make_instance = Expression::New(NewExpression { span: span(), callee: Box::new(Expression::Class(child)), arguments: vec![] });
    let prog = program(vec![expr_stmt(make_instance)], true);
    let outcome = run(&prog);
    assert!(matches!(outcome, Err(EvalOutcome::Thrown(_))), "a derived constructor's implicit `this` return must fail when `super()` was never called");
}

fn arguments_index(index: f64) -> Expression {
    Expression::Member(MemberExpression {
        span: span(),
        object: Box::new(ident("arguments")),
        property: MemberProperty::Computed(Box::new(number(index))),
        optional: false,
    })
}

fn single_param_function(name: &str, param: &str, statements: Vec<Statement>) -> FunctionDefinition {
    FunctionDefinition {
        span: span(),
        name: Some(name.to_string()),
        params: Params { items: vec![Param { pattern: BindingPattern::Identifier(param.to_string()), default: None }], rest: None },
        body: FunctionBody { span: span(), statements },
        is_async: false,
        is_generator: false,
    }
}

/// In sloppy mode with a simple parameter list, writing the named parameter
/// must be observable through the matching `arguments` slot (spec.md §4.J
/// "mapped `arguments`").
#[test]
fn mapped_arguments_observe_writes_to_the_named_parameter() {
    let f = single_param_function(
        "f",
        "a",
        vec![
            expr_stmt(assign(ident("a"), number(7.0))),
            Statement::Return(ReturnStatement { span: span(), argument: Some(arguments_index(0.0)) }),
        ],
    );
    let prog = program(vec![Statement::FunctionDeclaration(f), expr_stmt(call(ident("f"), vec![number(1.0)]))], false);
    let value = run(&prog).expect("mapped arguments read succeeds");
    assert!(matches!(value, JsValue::Number(n) if n == 7.0), "writing the parameter must be visible through arguments[0]");
}

/// The alias runs both ways: writing `arguments[0]` must update the
/// parameter binding the function body reads back (spec.md §4.J).
#[test]
fn mapped_arguments_writes_are_observed_by_the_named_parameter() {
    let f = single_param_function(
        "f",
        "a",
        vec![
            expr_stmt(assign(arguments_index(0.0), number(42.0))),
            Statement::Return(ReturnStatement { span: span(), argument: Some(ident("a")) }),
        ],
    );
    let prog = program(vec![Statement::FunctionDeclaration(f), expr_stmt(call(ident("f"), vec![number(1.0)]))], false);
    let value = run(&prog).expect("mapped arguments write succeeds");
    assert!(matches!(value, JsValue::Number(n) if n == 42.0), "writing arguments[0] must be visible through the named parameter");
}

/// Strict mode never gets a mapped `arguments` object, even with a simple
/// parameter list: the parameter and the slot are independent (spec.md
/// §4.J).
#[test]
fn strict_mode_arguments_object_is_never_mapped() {
    let f = single_param_function(
        "f",
        "a",
        vec![
            expr_stmt(assign(ident("a"), number(7.0))),
            Statement::Return(ReturnStatement { span: span(), argument: Some(arguments_index(0.0)) }),
        ],
    );
    let prog = program(vec![Statement::FunctionDeclaration(f), expr_stmt(call(ident("f"), vec![number(1.0)]))], true);
    let value = run(&prog).expect("unmapped arguments read succeeds");
    assert!(matches!(value, JsValue::Number(n) if n == 1.0), "strict mode must never alias arguments to parameters");
}
