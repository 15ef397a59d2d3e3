// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [10.2 ECMAScript Function Objects](https://tc39.es/ecma262/#sec-ecmascript-function-objects)
//! ### [10.2.1.1 PrepareForOrdinaryCall](https://tc39.es/ecma262/#sec-prepareforordinarycall), [9.2.3 OrdinaryCallBindThis](https://tc39.es/ecma262/#sec-ordinarycallbindthis)
//! ### [10.2.2 \[\[Construct\]\]](https://tc39.es/ecma262/#sec-ecmascript-function-objects-construct-argumentslist-newtarget)
//!
//! The single place every call, `new`, and `super(...)` in the evaluator
//! eventually goes through. [`call_function`] is the universal entry point
//! `Callable::call` (host.rs), accessor invocation (`values/object.rs`), and
//! private accessor get/set (`reference.rs`) all forward to by name; this
//! module is otherwise only reached from `eval/expression.rs` naming it
//! directly (spec.md §4.J).
//!
//! Generator/async-generator bodies don't run here directly: calling one
//! returns the generator object (`crate::generator::create_generator`), and
//! every `.next()`/`.throw()`/`.return()` re-enters [`run_function_body`]
//! through `crate::generator::resume` instead.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::agent::{Agent, EngineError, ExceptionType, JsError, JsResult};
use crate::binding_patterns::{bound_names, initialize_pattern};
use crate::completion::{Completion, StatementResult};
use crate::environment::{Environment, PrivateEnvironment};
use crate::eval::expression::{evaluate_expression, evaluate_property_key_literal};
use crate::eval::statement::{complete, declare_lexical_bindings, evaluate_statement_list};
use crate::execution_context::EvaluationContext;
use crate::generator::GeneratorReplay;
use crate::hoisting;
use crate::host::{PromiseAdapter, StandardLibrary};
use crate::values::{
    EcmaFunctionData, EcmaFunctionKind, FunctionBodyKind, FunctionData, JsObject, JsValue, NativeFunction, ObjectKind,
    PropKey, PropertyDescriptor, PropertyKind, ThisMode,
};

fn stamp_own_brand(this_value: &JsValue, data: &EcmaFunctionData) {
    if let (JsValue::Object(obj), Some(brand)) = (this_value, &data.own_brand) {
        obj.add_private_brand(brand.clone());
    }
}

fn ecma_function_data(obj: &JsObject) -> Option<EcmaFunctionData> {
    match obj.function_data()? {
        FunctionData::Ecmascript(data) => Some(data),
        FunctionData::Native(..) => None,
    }
}

/// `IsConstructor` (spec.md §4.I `extends`): native functions are always
/// assumed constructible here, since this evaluator has no builtin that
/// isn't (there is no `Array.prototype.map`-style non-constructor native to
/// distinguish against).
pub fn is_constructor_object(obj: &JsObject) -> bool {
    match obj.function_data() {
        Some(FunctionData::Native(..)) => true,
        Some(FunctionData::Ecmascript(data)) => data.is_constructor(),
        None => false,
    }
}

/// `Call` (spec.md §4.J): dispatches to a native builtin or runs an
/// ECMAScript function body, wrapping the result in a promise for `async`
/// functions (spec.md §4.K) and handing generator/async-generator bodies off
/// to [`crate::generator::create_generator`] instead of running them inline.
pub fn call_function(agent: &mut Agent, function: &JsObject, this: JsValue, args: &[JsValue]) -> JsResult<JsValue> {
    let Some(kind) = function.function_data() else {
        return Err(agent.throw_exception(ExceptionType::TypeError, "value is not a function"));
    };
    match kind {
        FunctionData::Native(native, _) => native(agent, this, args),
        FunctionData::Ecmascript(data) => {
            if matches!(data.kind, EcmaFunctionKind::BaseConstructor | EcmaFunctionKind::DerivedConstructor { .. }) {
                return Err(agent.throw_exception(ExceptionType::TypeError, "Class constructor cannot be invoked without 'new'"));
            }
            if data.is_generator {
                return Ok(JsValue::Object(crate::generator::create_generator(agent, function.clone(), this, args.to_vec())));
            }
            let completion = run_function_body(agent, function, this, args, None, None).map_err(|err| engine_error_to_js(agent, err))?;
            let result = match completion {
                Completion::Normal(_) => Ok(JsValue::Undefined),
                Completion::Return(value) => Ok(value),
                Completion::Throw(err) => Err(err),
                Completion::Suspend(_) => unreachable!("a non-generator function body never suspends"),
                Completion::Break(_) | Completion::Continue(_) => {
                    Err(agent.throw_exception(ExceptionType::Error, "illegal break/continue escaped a function body"))
                }
            };
            if data.is_async {
                let host = agent.realm.host.clone();
                let promise = host.new_pending();
                match &result {
                    Ok(value) => host.resolve(agent, &promise, value.clone()),
                    Err(err) => host.reject(agent, &promise, err.value()),
                }
                Ok(JsValue::Object(promise))
            } else {
                result
            }
        }
    }
}

/// `Construct` (spec.md §4.J): allocates the new instance from
/// `new_target`'s `"prototype"` (base classes/ordinary functions) or leaves
/// `this` unbound until `super(...)` runs (derived constructors), then runs
/// the constructor body.
pub fn construct(agent: &mut Agent, constructor: &JsObject, args: &[JsValue], new_target: &JsObject) -> JsResult<JsValue> {
    let data = ecma_function_data(constructor).ok_or_else(|| agent.throw_exception(ExceptionType::TypeError, "not a constructor"))?;
    if !data.is_constructor() {
        return Err(agent.throw_exception(ExceptionType::TypeError, "not a constructor"));
    }
    let this_value = if data.is_derived_constructor() {
        JsValue::Undefined
    } else {
        let proto = constructor_prototype(agent, new_target)?;
        JsValue::Object(JsObject::new(Some(proto), ObjectKind::Ordinary))
    };
    let completion =
        run_function_body(agent, constructor, this_value, args, Some(new_target.clone()), None).map_err(|err| engine_error_to_js(agent, err))?;
    match completion {
        Completion::Return(JsValue::Object(obj)) => Ok(JsValue::Object(obj)),
        Completion::Throw(err) => Err(err),
        _ => Err(agent.throw_exception(ExceptionType::Error, "constructor exited without producing an instance")),
    }
}

fn constructor_prototype(agent: &mut Agent, new_target: &JsObject) -> JsResult<JsObject> {
    let proto_value = new_target.get(agent, &PropKey::from("prototype"), JsValue::Object(new_target.clone()))?;
    match proto_value {
        JsValue::Object(obj) => Ok(obj),
        _ => Ok(agent.realm.host.object_prototype()),
    }
}

/// `super(...)` (spec.md §4.I/§4.J): constructs the parent with the
/// *original* `new_target`, binds the result as `this` in the derived
/// constructor's own function environment, then runs this class's own
/// instance field initializers now that `this` exists.
pub fn evaluate_super_call(agent: &mut Agent, ctx: &EvaluationContext, args: &[JsValue]) -> JsResult<JsValue> {
    let function_object = ctx
        .function
        .clone()
        .ok_or_else(|| agent.throw_exception(ExceptionType::SyntaxError, "'super' keyword is only valid inside a derived class constructor"))?;
    let data = ecma_function_data(&function_object)
        .ok_or_else(|| agent.throw_exception(ExceptionType::SyntaxError, "'super' keyword is only valid inside a derived class constructor"))?;
    let EcmaFunctionKind::DerivedConstructor { parent } = &data.kind else {
        return Err(agent.throw_exception(ExceptionType::SyntaxError, "'super' keyword is only valid inside a derived class constructor"));
    };
    let this_env = ctx.lexical_environment.get_this_environment();
    if this_env.this_binding_is_initialized() {
        return Err(agent.throw_exception(ExceptionType::ReferenceError, "Super constructor may only be called once"));
    }
    let new_target = this_env.new_target().unwrap_or_else(|| function_object.clone());
    let result = construct(agent, parent, args, &new_target)?;
    this_env.bind_this_value(result.clone());
    stamp_own_brand(&result, &data);
    run_field_initializers(agent, &data.closure_env, data.private_scope.as_ref(), &result, &data.instance_field_initializers)?;
    Ok(result)
}

/// Runs a class's non-static field initializers against a freshly bound
/// `this`, in the class's own closure scope rather than the constructor
/// invocation's parameter scope (spec.md §4.I).
fn run_field_initializers(
    agent: &mut Agent,
    class_closure_env: &Environment,
    private_environment: Option<&PrivateEnvironment>,
    this_value: &JsValue,
    initializers: &[Rc<ast::ClassField>],
) -> JsResult<()> {
    if initializers.is_empty() {
        return Ok(());
    }
    let JsValue::Object(this_obj) = this_value else {
        return Ok(());
    };
    let field_env = Environment::new_function(Some(class_closure_env.clone()), this_obj.clone(), None, false);
    field_env.bind_this_value(this_value.clone());
    let ctx = EvaluationContext {
        lexical_environment: field_env.clone(),
        variable_environment: field_env,
        private_environment: private_environment.cloned(),
        function: None,
        is_strict: true,
        generator: None,
    };
    for field in initializers {
        let value = match &field.value {
            Some(expr) => evaluate_expression(agent, &ctx, expr)?,
            None => JsValue::Undefined,
        };
        match &field.key {
            ast::PropertyKey::Private(name) => {
                if let Some(private_env) = &ctx.private_environment {
                    if let Some((mangled, _)) = private_env.resolve(name) {
                        this_obj.set_private_field(mangled, value);
                    }
                }
            }
            _ => {
                let key = evaluate_property_key_literal(agent, &ctx, &field.key)?;
                this_obj.define_property(key, PropertyDescriptor::data(value, true, true, true));
            }
        }
    }
    Ok(())
}

/// `OrdinaryCallEvaluateBody` + `FunctionDeclarationInstantiation`
/// (spec.md §4.J): builds the call's environment chain, binds parameters,
/// hoists `var`/function declarations, and runs the body. Returns the raw
/// [`Completion`] rather than collapsing it, since [`crate::generator`]
/// needs to see a `Suspend` distinctly from a normal return.
pub fn run_function_body(
    agent: &mut Agent,
    function_object: &JsObject,
    this_value: JsValue,
    arguments: &[JsValue],
    new_target: Option<JsObject>,
    generator_replay: Option<Rc<GeneratorReplay>>,
) -> StatementResult {
    let data = ecma_function_data(function_object).expect("run_function_body called on a non-ECMAScript function");

    let lexical_this = matches!(data.this_mode(), ThisMode::Lexical);
    let function_env = Environment::new_function(Some(data.closure_env.clone()), function_object.clone(), new_target, lexical_this);
    if !lexical_this && !data.is_derived_constructor() {
        function_env.bind_this_value(this_value.clone());
    }

    let param_env = Environment::new_declarative(Some(function_env.clone()));
    let param_ctx = EvaluationContext {
        lexical_environment: param_env.clone(),
        variable_environment: param_env.clone(),
        private_environment: data.private_scope.clone(),
        function: Some(function_object.clone()),
        is_strict: data.is_strict,
        generator: generator_replay,
    };

    if !matches!(data.kind, EcmaFunctionKind::Arrow) {
        let arguments_obj = build_arguments_object(agent, arguments, &param_env, &data.params, data.is_strict);
        complete!(param_env.create_mutable_binding(agent, Rc::from("arguments"), false));
        complete!(param_env.initialize_binding(agent, "arguments", JsValue::Object(arguments_obj)));
    }

    complete!(bind_parameters(agent, &param_ctx, &param_env, &data.params, arguments));

    let param_names: HashSet<Rc<str>> = data
        .params
        .items
        .iter()
        .flat_map(|p| bound_names(&p.pattern))
        .chain(data.params.rest.iter().flat_map(bound_names))
        .collect();

    let statements: &[ast::Statement] = match &data.body {
        FunctionBodyKind::Statements(body) => &body.statements,
        FunctionBodyKind::Expression(_) => &[],
    };

    for name in hoisting::var_declared_names(statements) {
        if !param_names.contains(&name) && !complete!(param_env.has_binding(agent, &name)) {
            complete!(param_env.create_mutable_binding(agent, name.clone(), false));
            complete!(param_env.initialize_binding(agent, &name, JsValue::Undefined));
        }
    }
    for func_def in hoisting::var_scoped_function_declarations(statements) {
        let name = func_def
            .name
            .clone()
            .expect("var-scoped function declarations are always named");
        let func_value = JsValue::Object(instantiate_ordinary_function(agent, &param_ctx, &func_def));
        if !complete!(param_env.has_binding(agent, &name)) {
            complete!(param_env.create_mutable_binding(agent, Rc::from(name.as_str()), false));
        }
        complete!(param_env.initialize_binding(agent, &name, func_value));
    }
    declare_lexical_bindings(agent, &param_env, statements);

    // Base constructors (and ordinary function/method calls) already have
    // `this` bound above; derived constructors run theirs from
    // `evaluate_super_call` once `super()` has produced a `this`.
    if matches!(data.kind, EcmaFunctionKind::BaseConstructor) {
        stamp_own_brand(&this_value, &data);
        complete!(run_field_initializers(
            agent,
            &data.closure_env,
            data.private_scope.as_ref(),
            &this_value,
            &data.instance_field_initializers
        ));
    }

    let mut completion = match &data.body {
        FunctionBodyKind::Statements(body) => evaluate_statement_list(agent, &param_ctx, &body.statements)?,
        FunctionBodyKind::Expression(expr) => match evaluate_expression(agent, &param_ctx, expr) {
            Ok(value) => Completion::Return(value),
            Err(err) => Completion::from(err),
        },
    };

    // A constructor that runs off its end without an explicit `return`
    // implicitly returns `this` — for a derived constructor that never
    // called `super()`, this is exactly the ReferenceError `this` access
    // should raise.
    if matches!(data.kind, EcmaFunctionKind::BaseConstructor | EcmaFunctionKind::DerivedConstructor { .. }) {
        if let Completion::Normal(_) = completion {
            completion = match function_env.get_this_binding(agent) {
                Ok(value) => Completion::Return(value),
                Err(err) => Completion::from(err),
            };
        }
    }

    Ok(completion)
}

fn bind_parameters(agent: &mut Agent, ctx: &EvaluationContext, env: &Environment, params: &ast::Params, args: &[JsValue]) -> JsResult<()> {
    for name in params.items.iter().flat_map(|p| bound_names(&p.pattern)) {
        env.create_mutable_binding(agent, name, false)?;
    }
    if let Some(rest) = &params.rest {
        for name in bound_names(rest) {
            env.create_mutable_binding(agent, name, false)?;
        }
    }

    let mut iter = args.iter().cloned();
    for param in &params.items {
        let value = iter.next().unwrap_or(JsValue::Undefined);
        let value = if value.is_undefined() {
            match &param.default {
                Some(default) => evaluate_expression(agent, ctx, default)?,
                None => value,
            }
        } else {
            value
        };
        initialize_pattern(agent, ctx, &param.pattern, value, env)?;
    }
    if let Some(rest) = &params.rest {
        let remaining: Vec<JsValue> = iter.collect();
        let rest_array = JsValue::Object(agent.realm.host.new_array(remaining));
        initialize_pattern(agent, ctx, rest, rest_array, env)?;
    }
    Ok(())
}

/// `IsSimpleParameterList` (spec.md §4.J): no rest parameter, no default
/// initializers, no destructuring — only then is a mapped `arguments`
/// object legal at all.
fn is_simple_parameter_list(params: &ast::Params) -> bool {
    params.rest.is_none()
        && params
            .items
            .iter()
            .all(|p| p.default.is_none() && matches!(p.pattern, ast::BindingPattern::Identifier(_)))
}

/// `CreateMappedArgumentsObject` / `CreateUnmappedArgumentsObject`
/// (spec.md §4.J): in strict mode, or whenever the parameter list isn't
/// simple, `arguments` is built from a snapshot of the passed-in values with
/// no further linkage to the parameters (`CreateUnmappedArgumentsObject`).
/// Otherwise each argument index below the parameter count is installed as
/// an accessor pair that reads/writes the same named binding the
/// corresponding parameter lives in, so `arguments[i]` and that parameter
/// observe each other's mutations (`CreateMappedArgumentsObject`'s
/// `MakeArgGetter`/`MakeArgSetter`). Indices at or beyond the parameter
/// count (extra arguments) are always plain, unlinked data properties.
///
/// Known simplification: a parameter name repeated in the formal list
/// (legal only in sloppy, non-simple-in-spirit-but-still-"simple" lists)
/// maps every repeated index to the same last-declared binding rather than
/// the spec's "skip already-mapped names" bookkeeping — indistinguishable
/// in practice since they already share one binding in this evaluator's
/// parameter environment. Deleting or redefining a mapped index to a
/// non-default descriptor is also not modeled as un-mapping the slot, which
/// only matters for scripts that `delete`/`Object.defineProperty` on
/// `arguments` and then still expect live aliasing to have stopped.
fn build_arguments_object(agent: &mut Agent, args: &[JsValue], param_env: &Environment, params: &ast::Params, is_strict: bool) -> JsObject {
    let obj = JsObject::new(Some(agent.realm.host.object_prototype()), ObjectKind::Arguments);
    let mapped = !is_strict && is_simple_parameter_list(params);
    for (index, value) in args.iter().enumerate() {
        let key = PropKey::from(index.to_string());
        let mapped_name = mapped.then(|| params.items.get(index)).flatten().map(|param| match &param.pattern {
            ast::BindingPattern::Identifier(name) => Rc::<str>::from(name.as_str()),
            _ => unreachable!("is_simple_parameter_list guarantees plain identifier parameters"),
        });
        match mapped_name {
            Some(name) => {
                let getter = make_arg_getter(agent, param_env, name.clone());
                let setter = make_arg_setter(agent, param_env, name);
                obj.define_property(
                    key,
                    PropertyDescriptor {
                        kind: PropertyKind::Accessor { get: Some(getter), set: Some(setter) },
                        enumerable: true,
                        configurable: true,
                    },
                );
            }
            None => {
                obj.define_property(key, PropertyDescriptor::data(value.clone(), true, true, true));
            }
        }
    }
    obj.define_property(
        PropKey::from("length"),
        PropertyDescriptor::data(JsValue::Number(args.len() as f64), true, false, true),
    );
    obj
}

/// `MakeArgGetter` (spec.md §4.J): reads the live value of `name` in the
/// call's own parameter environment, not a snapshot taken at `arguments`
/// construction time.
fn make_arg_getter(agent: &Agent, param_env: &Environment, name: Rc<str>) -> JsObject {
    let env = param_env.clone();
    let native: NativeFunction = Rc::new(move |agent, _this, _args| env.get_binding_value(agent, &name, false));
    JsObject::new(Some(agent.realm.host.function_prototype()), ObjectKind::Function(FunctionData::Native(native, Rc::from(""))))
}

/// `MakeArgSetter` (spec.md §4.J): writing `arguments[i]` assigns straight
/// into the parameter's own binding, so the parameter observes the write.
fn make_arg_setter(agent: &Agent, param_env: &Environment, name: Rc<str>) -> JsObject {
    let env = param_env.clone();
    let native: NativeFunction = Rc::new(move |agent, _this, call_args| {
        let value = call_args.first().cloned().unwrap_or(JsValue::Undefined);
        env.set_mutable_binding(agent, &name, value, false)?;
        Ok(JsValue::Undefined)
    });
    JsObject::new(Some(agent.realm.host.function_prototype()), ObjectKind::Function(FunctionData::Native(native, Rc::from(""))))
}

/// Converts a host-level [`EngineError`] into a thrown [`JsError`] at a call
/// boundary — the only channel [`call_function`]/[`construct`] have to
/// report it through, since `Callable::call` (host.rs) is `JsResult`-shaped.
/// A cancellation requested mid-call therefore only surfaces cleanly as
/// `EvalOutcome::Cancelled` when it's observed between statements/loop
/// iterations of the outermost call; once it crosses a nested function call
/// it becomes an ordinary thrown `Error` instead (documented simplification,
/// see DESIGN.md).
pub fn engine_error_to_js(agent: &Agent, err: EngineError) -> JsError {
    agent.throw_exception(ExceptionType::Error, err.to_string())
}

/// `InstantiateOrdinaryFunctionObject`/`InstantiateOrdinaryFunctionExpression`
/// (spec.md §4.J): a named function expression gets its own declarative
/// scope binding itself, so the function can recurse by name even when
/// assigned elsewhere.
pub fn instantiate_ordinary_function(agent: &mut Agent, ctx: &EvaluationContext, def: &ast::FunctionDefinition) -> JsObject {
    let closure_env = match &def.name {
        Some(name) => {
            let env = Environment::new_declarative(Some(ctx.lexical_environment.clone()));
            env.create_immutable_binding(Rc::from(name.as_str()), false);
            env
        }
        None => ctx.lexical_environment.clone(),
    };
    let data = EcmaFunctionData {
        name: Rc::new(RefCell::new(Rc::from(def.name.as_deref().unwrap_or("")))),
        params: Rc::new(def.params.clone()),
        body: FunctionBodyKind::Statements(Rc::new(def.body.clone())),
        closure_env: closure_env.clone(),
        kind: EcmaFunctionKind::Function,
        home_object: Rc::new(RefCell::new(None)),
        is_async: def.is_async,
        is_generator: def.is_generator,
        is_strict: ctx.is_strict,
        instance_field_initializers: Rc::new(Vec::new()),
        private_scope: ctx.private_environment.clone(),
        own_brand: None,
    };
    let is_constructor = data.is_constructor();
    let func = JsObject::new(Some(agent.realm.host.function_prototype()), ObjectKind::Function(FunctionData::Ecmascript(data)));
    if is_constructor {
        install_prototype_property(agent, &func);
    }
    if let Some(name) = &def.name {
        let _ = closure_env.initialize_binding(agent, name, JsValue::Object(func.clone()));
    }
    func
}

/// `InstantiateArrowFunctionExpression` (spec.md §4.J): arrows never get
/// their own `this`/`arguments`/`super`/`new.target`, are never generators,
/// and are never constructible.
pub fn instantiate_arrow_function(agent: &mut Agent, ctx: &EvaluationContext, arrow: &ast::ArrowFunctionExpression) -> JsObject {
    let body = match &arrow.body {
        ast::ArrowBody::Expression(expr) => FunctionBodyKind::Expression(Rc::new((**expr).clone())),
        ast::ArrowBody::Block(block) => FunctionBodyKind::Statements(Rc::new(block.clone())),
    };
    let data = EcmaFunctionData {
        name: Rc::new(RefCell::new(Rc::from(""))),
        params: Rc::new(arrow.params.clone()),
        body,
        closure_env: ctx.lexical_environment.clone(),
        kind: EcmaFunctionKind::Arrow,
        home_object: Rc::new(RefCell::new(None)),
        is_async: arrow.is_async,
        is_generator: false,
        is_strict: ctx.is_strict,
        instance_field_initializers: Rc::new(Vec::new()),
        private_scope: ctx.private_environment.clone(),
        own_brand: None,
    };
    JsObject::new(Some(agent.realm.host.function_prototype()), ObjectKind::Function(FunctionData::Ecmascript(data)))
}

fn install_prototype_property(agent: &Agent, func: &JsObject) {
    let prototype = JsObject::new(Some(agent.realm.host.object_prototype()), ObjectKind::Ordinary);
    prototype.define_property(PropKey::from("constructor"), PropertyDescriptor::data(JsValue::Object(func.clone()), true, false, true));
    func.define_property(PropKey::from("prototype"), PropertyDescriptor::data(JsValue::Object(prototype), true, false, false));
}

/// `NamedEvaluation`'s effect on an already-built function/class object: a
/// name assigned from `var x = function () {}`/object-literal shorthand/etc.
/// only takes if the value is still anonymous.
pub fn set_name_if_anonymous(obj: &JsObject, name: &str) {
    obj.set_name_if_anonymous(name);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{CancellationToken, EvaluatorOptions};
    use crate::realm::new_realm;
    use ast::{FunctionBody, FunctionDefinition, Params, Span};

    fn test_agent() -> Agent {
        let realm = new_realm().expect("realm construction is infallible in this evaluator");
        Agent::new(realm, EvaluatorOptions::default(), CancellationToken::new())
    }

    fn test_ctx(agent: &Agent) -> EvaluationContext {
        EvaluationContext::new_program(agent.realm.global_environment(), false)
    }

    #[test]
    fn calling_an_ordinary_function_returns_the_explicit_return_value() {
        let mut agent = test_agent();
        let ctx = test_ctx(&agent);
        let def = FunctionDefinition {
            span: Span::default(),
            name: None,
            params: Params { items: Vec::new(), rest: None },
            body: FunctionBody {
                span: Span::default(),
                statements: vec![ast::Statement::Return(ast::ReturnStatement {
                    span: Span::default(),
                    argument: Some(ast::Expression::Literal(ast::Literal {
                        span: Span::default(),
                        value: ast::LiteralValue::Number(7.0),
                    })),
                })],
            },
            is_async: false,
            is_generator: false,
        };
        let func = instantiate_ordinary_function(&mut agent, &ctx, &def);
        let result = call_function(&mut agent, &func, JsValue::Undefined, &[]).expect("call succeeds");
        assert!(matches!(result, JsValue::Number(n) if n == 7.0));
    }

    #[test]
    fn calling_a_class_constructor_without_new_throws_type_error() {
        let mut agent = test_agent();
        let data = EcmaFunctionData {
            name: Rc::new(RefCell::new(Rc::from("C"))),
            params: Rc::new(Params { items: Vec::new(), rest: None }),
            body: FunctionBodyKind::Statements(Rc::new(FunctionBody {
                span: Span::default(),
                statements: Vec::new(),
            })),
            closure_env: agent.realm.global_environment(),
            kind: EcmaFunctionKind::BaseConstructor,
            home_object: Rc::new(RefCell::new(None)),
            is_async: false,
            is_generator: false,
            is_strict: true,
            instance_field_initializers: Rc::new(Vec::new()),
            private_scope: None,
            own_brand: None,
        };
        let ctor = JsObject::new(Some(agent.realm.host.function_prototype()), ObjectKind::Function(FunctionData::Ecmascript(data)));
        let err = call_function(&mut agent, &ctor, JsValue::Undefined, &[]).unwrap_err();
        let JsError::Thrown(JsValue::Object(err_obj)) = err else {
            panic!("expected a thrown error object");
        };
        let name = err_obj
            .get(&mut agent, &PropKey::from("name"), JsValue::Object(err_obj.clone()))
            .expect("error objects always expose .name");
        assert!(matches!(name, JsValue::String(s) if &*s == "TypeError"));
    }

    #[test]
    fn constructing_a_base_class_binds_this_to_a_fresh_instance() {
        let mut agent = test_agent();
        let ctx = test_ctx(&agent);
        let def = FunctionDefinition {
            span: Span::default(),
            name: None,
            params: Params { items: Vec::new(), rest: None },
            body: FunctionBody {
                span: Span::default(),
                statements: Vec::new(),
            },
            is_async: false,
            is_generator: false,
        };
        let plain = instantiate_ordinary_function(&mut agent, &ctx, &def);
        // Promote it to a base constructor the way class_builder would.
        let data = ecma_function_data(&plain).unwrap();
        let ctor_data = EcmaFunctionData {
            kind: EcmaFunctionKind::BaseConstructor,
            ..data
        };
        let ctor = JsObject::new(
            Some(agent.realm.host.function_prototype()),
            ObjectKind::Function(FunctionData::Ecmascript(ctor_data)),
        );
        let result = construct(&mut agent, &ctor, &[], &ctor).expect("construct succeeds");
        assert!(matches!(result, JsValue::Object(_)));
    }
}
