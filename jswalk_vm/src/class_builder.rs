// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [15.7 Class Definitions](https://tc39.es/ecma262/#sec-class-definitions)
//!
//! `ClassDefinitionEvaluation` (spec.md §4.I): resolves `extends`, builds the
//! constructor and its `.prototype`, installs methods/accessors/private
//! members, and runs static field initializers and static blocks. Every
//! other piece of constructor-invocation machinery (parameter binding,
//! `super()`, non-static field initializers) already lives in
//! [`crate::function_invocation`]; this module only has to hand it a
//! correctly-shaped [`EcmaFunctionData`].

use std::cell::RefCell;
use std::rc::Rc;

use crate::agent::{Agent, ExceptionType, JsResult};
use crate::completion::Completion;
use crate::environment::{Environment, PrivateEnvironment, PrivateMember};
use crate::eval::expression::{evaluate_expression, evaluate_property_key_literal};
use crate::eval::statement::evaluate_statement_list;
use crate::execution_context::EvaluationContext;
use crate::function_invocation::is_constructor_object;
use crate::host::StandardLibrary;
use crate::values::{
    EcmaFunctionData, EcmaFunctionKind, FunctionBodyKind, FunctionData, JsObject, JsValue, ObjectKind, PropKey,
    PropertyDescriptor, PropertyKind,
};

/// `ClassDefinitionEvaluation` + `ClassFieldDefinitionEvaluation` +
/// `ClassStaticBlockDefinitionEvaluation` (spec.md §4.I): builds and returns
/// the class's constructor function object.
pub fn evaluate_class(agent: &mut Agent, ctx: &EvaluationContext, def: &ast::ClassDefinition) -> JsResult<JsObject> {
    let (super_constructor, super_prototype, is_derived) = resolve_extends(agent, ctx, def)?;

    // Every member of a class body, and every field initializer, evaluates
    // strict, regardless of the enclosing context (spec.md §4.I).
    let own_private_environment = def
        .has_private_members()
        .then(|| PrivateEnvironment::new(ctx.private_environment.clone()));
    let class_private_environment = own_private_environment
        .clone()
        .or_else(|| ctx.private_environment.clone());

    let class_scope_env = Environment::new_declarative(Some(ctx.lexical_environment.clone()));
    if let Some(name) = &def.name {
        class_scope_env.create_immutable_binding(Rc::from(name.as_str()), true);
    }

    let class_ctx = EvaluationContext {
        lexical_environment: class_scope_env.clone(),
        variable_environment: class_scope_env.clone(),
        private_environment: class_private_environment.clone(),
        function: None,
        is_strict: true,
        generator: None,
    };

    // `extends null` is still derived but leaves the prototype parentless;
    // omitting `extends` entirely defaults it to `Object.prototype`.
    let prototype_parent = if is_derived { super_prototype } else { Some(agent.realm.host.object_prototype()) };
    let prototype = JsObject::new(prototype_parent, ObjectKind::Ordinary);

    let instance_fields: Vec<Rc<ast::ClassField>> = def
        .body
        .iter()
        .filter_map(|member| match member {
            ast::ClassMember::Field(field) if !field.is_static => Some(Rc::new(field.clone())),
            _ => None,
        })
        .collect();

    let constructor_method = def.body.iter().find_map(|member| match member {
        ast::ClassMember::Constructor(method) => Some(method),
        _ => None,
    });

    let constructor_kind = match (&super_constructor, is_derived) {
        (parent, true) => EcmaFunctionKind::DerivedConstructor {
            parent: parent.clone().unwrap_or_else(|| agent.realm.host.function_prototype()),
        },
        (_, false) => EcmaFunctionKind::BaseConstructor,
    };

    let constructor_data = match constructor_method {
        Some(method) => EcmaFunctionData {
            name: Rc::new(RefCell::new(Rc::from(def.name.as_deref().unwrap_or("")))),
            params: Rc::new(method.params.clone()),
            body: FunctionBodyKind::Statements(Rc::new(method.body.clone())),
            closure_env: class_scope_env.clone(),
            kind: constructor_kind,
            home_object: Rc::new(RefCell::new(Some(prototype.clone()))),
            is_async: false,
            is_generator: false,
            is_strict: true,
            instance_field_initializers: Rc::new(instance_fields),
            private_scope: class_private_environment.clone(),
            own_brand: own_private_environment.as_ref().map(PrivateEnvironment::brand),
        },
        None => synthesize_default_constructor(
            is_derived,
            &class_scope_env,
            &prototype,
            &instance_fields,
            &class_private_environment,
            own_private_environment.as_ref(),
            constructor_kind,
        ),
    };

    let constructor_function_prototype = super_constructor.clone().unwrap_or_else(|| agent.realm.host.function_prototype());
    let constructor = JsObject::new(
        Some(constructor_function_prototype),
        ObjectKind::Function(FunctionData::Ecmascript(constructor_data)),
    );
    constructor.define_property(
        PropKey::from("prototype"),
        PropertyDescriptor::data(JsValue::Object(prototype.clone()), false, false, false),
    );
    prototype.define_property(
        PropKey::from("constructor"),
        PropertyDescriptor::data(JsValue::Object(constructor.clone()), true, false, true),
    );

    if let Some(name) = &def.name {
        let _ = class_scope_env.initialize_binding(agent, name, JsValue::Object(constructor.clone()));
    }

    for member in &def.body {
        match member {
            ast::ClassMember::Constructor(_) => {}
            ast::ClassMember::Method(method) => install_method(agent, &class_ctx, method, &constructor, &prototype, &class_private_environment)?,
            ast::ClassMember::Field(field) if field.is_static => {
                run_static_field(agent, &class_ctx, field, &constructor)?;
            }
            ast::ClassMember::Field(field) => {
                // Already collected into `instance_fields` above; only the
                // private-name declaration still needs to happen here so
                // methods elsewhere in the body can resolve `#name`.
                if let ast::PropertyKey::Private(name) = &field.key {
                    if let Some(scope) = &class_private_environment {
                        scope.declare(name, PrivateMember::Field);
                    }
                }
            }
            ast::ClassMember::StaticBlock(_, statements) => {
                run_static_block(agent, &class_ctx, statements, &constructor)?;
            }
        }
    }

    Ok(constructor)
}

/// `extends` (spec.md §4.I step 1): `extends null` still yields a derived
/// class (so `super()` is meaningful and required) but with no instance
/// prototype parent; omitting `extends` yields an ordinary, non-derived
/// class.
fn resolve_extends(
    agent: &mut Agent,
    ctx: &EvaluationContext,
    def: &ast::ClassDefinition,
) -> JsResult<(Option<JsObject>, Option<JsObject>, bool)> {
    let Some(super_class_expr) = &def.super_class else {
        return Ok((None, None, false));
    };
    let value = evaluate_expression(agent, ctx, super_class_expr)?;
    match value {
        JsValue::Null => Ok((None, None, true)),
        JsValue::Object(ctor) if is_constructor_object(&ctor) => {
            let proto_value = ctor.get(agent, &PropKey::from("prototype"), JsValue::Object(ctor.clone()))?;
            let proto = match proto_value {
                JsValue::Object(obj) => Some(obj),
                JsValue::Null => None,
                _ => return Err(agent.throw_exception(ExceptionType::TypeError, "Class extends value does not have a valid prototype property")),
            };
            Ok((Some(ctor), proto, true))
        }
        _ => Err(agent.throw_exception(ExceptionType::TypeError, "Class extends value is not a constructor")),
    }
}

/// The implicit constructor ECMAScript synthesizes for a class body with no
/// explicit `constructor` member: `constructor(...args) { super(...args); }`
/// for a derived class, an empty body for a base class.
fn synthesize_default_constructor(
    is_derived: bool,
    class_scope_env: &Environment,
    prototype: &JsObject,
    instance_fields: &[Rc<ast::ClassField>],
    class_private_environment: &Option<PrivateEnvironment>,
    own_private_environment: Option<&PrivateEnvironment>,
    kind: EcmaFunctionKind,
) -> EcmaFunctionData {
    let rest_name = "args";
    let body = if is_derived {
        ast::FunctionBody {
            span: ast::Span::default(),
            statements: vec![ast::Statement::Expression(ast::ExpressionStatement {
                span: ast::Span::default(),
                expression: ast::Expression::Call(ast::CallExpression {
                    span: ast::Span::default(),
                    callee: Box::new(ast::Expression::Super(ast::Span::default())),
                    arguments: vec![ast::Argument::Spread(ast::Expression::Identifier(ast::Identifier {
                        span: ast::Span::default(),
                        name: rest_name.to_string(),
                    }))],
                    optional: false,
                }),
            })],
        }
    } else {
        ast::FunctionBody {
            span: ast::Span::default(),
            statements: Vec::new(),
        }
    };
    let params = if is_derived {
        ast::Params {
            items: Vec::new(),
            rest: Some(ast::BindingPattern::Identifier(rest_name.to_string())),
        }
    } else {
        ast::Params { items: Vec::new(), rest: None }
    };
    EcmaFunctionData {
        name: Rc::new(RefCell::new(Rc::from(""))),
        params: Rc::new(params),
        body: FunctionBodyKind::Statements(Rc::new(body)),
        closure_env: class_scope_env.clone(),
        kind,
        home_object: Rc::new(RefCell::new(Some(prototype.clone()))),
        is_async: false,
        is_generator: false,
        is_strict: true,
        instance_field_initializers: Rc::new(instance_fields.to_vec()),
        private_scope: class_private_environment.clone(),
        own_brand: own_private_environment.map(PrivateEnvironment::brand),
    }
}

fn member_home_object<'a>(is_static: bool, constructor: &'a JsObject, prototype: &'a JsObject) -> &'a JsObject {
    if is_static {
        constructor
    } else {
        prototype
    }
}

/// Builds the function object for one method/getter/setter body, without
/// installing it anywhere (spec.md §4.I step 5, `MethodDefinitionEvaluation`
/// minus the property-installation half).
fn build_method_function(
    agent: &Agent,
    method: &ast::ClassMethod,
    class_scope_env: &Environment,
    home_object: &JsObject,
    private_scope: &Option<PrivateEnvironment>,
    name: &str,
) -> JsObject {
    let data = EcmaFunctionData {
        name: Rc::new(RefCell::new(Rc::from(name))),
        params: Rc::new(method.params.clone()),
        body: FunctionBodyKind::Statements(Rc::new(method.body.clone())),
        closure_env: class_scope_env.clone(),
        kind: EcmaFunctionKind::Method,
        home_object: Rc::new(RefCell::new(Some(home_object.clone()))),
        is_async: method.is_async,
        is_generator: method.is_generator,
        is_strict: true,
        instance_field_initializers: Rc::new(Vec::new()),
        private_scope: private_scope.clone(),
        own_brand: None,
    };
    JsObject::new(Some(agent.realm.host.function_prototype()), ObjectKind::Function(FunctionData::Ecmascript(data)))
}

fn property_key_name(key: &PropKey) -> String {
    match key {
        PropKey::String(s) => s.to_string(),
        PropKey::Symbol(_) => String::new(),
    }
}

fn install_method(
    agent: &mut Agent,
    ctx: &EvaluationContext,
    method: &ast::ClassMethod,
    constructor: &JsObject,
    prototype: &JsObject,
    private_scope: &Option<PrivateEnvironment>,
) -> JsResult<()> {
    let target = member_home_object(method.is_static, constructor, prototype);

    if let ast::PropertyKey::Private(name) = &method.key {
        let func = build_method_function(agent, method, &ctx.lexical_environment, target, private_scope, name);
        let member = match method.kind {
            ast::MethodKind::Method => PrivateMember::Method(func),
            ast::MethodKind::Get => PrivateMember::Accessor { get: Some(func), set: None },
            ast::MethodKind::Set => PrivateMember::Accessor { get: None, set: Some(func) },
        };
        if let Some(scope) = private_scope {
            merge_private_accessor(scope, name, member);
        }
        return Ok(());
    }

    // Evaluated once: a computed key's expression must not run twice.
    let key = evaluate_property_key_literal(agent, ctx, &method.key)?;
    let name = property_key_name(&key);
    let named = match method.kind {
        ast::MethodKind::Get => format!("get {name}"),
        ast::MethodKind::Set => format!("set {name}"),
        ast::MethodKind::Method => name,
    };
    let func = build_method_function(agent, method, &ctx.lexical_environment, target, private_scope, &named);

    match method.kind {
        ast::MethodKind::Method => {
            target.define_property(key, PropertyDescriptor::data(JsValue::Object(func), true, false, true));
        }
        ast::MethodKind::Get => merge_accessor(target, key, Some(func), None),
        ast::MethodKind::Set => merge_accessor(target, key, None, Some(func)),
    }
    Ok(())
}

fn merge_accessor(target: &JsObject, key: PropKey, get: Option<JsObject>, set: Option<JsObject>) {
    let existing = target.get_own_property(&key);
    let (merged_get, merged_set) = match existing {
        Some(PropertyDescriptor { kind: PropertyKind::Accessor { get: existing_get, set: existing_set }, .. }) => {
            (get.or(existing_get), set.or(existing_set))
        }
        _ => (get, set),
    };
    target.define_property(
        key,
        PropertyDescriptor {
            kind: PropertyKind::Accessor { get: merged_get, set: merged_set },
            enumerable: false,
            configurable: true,
        },
    );
}

/// Private accessors declared across two members (`get #x`/`set #x`) must
/// merge into one [`PrivateMember::Accessor`] the same way public ones do.
fn merge_private_accessor(scope: &PrivateEnvironment, surface_name: &str, member: PrivateMember) {
    let merged = match (scope.resolve(surface_name), member) {
        (Some((_, PrivateMember::Accessor { get: existing_get, set: existing_set })), PrivateMember::Accessor { get, set }) => {
            PrivateMember::Accessor { get: get.or(existing_get), set: set.or(existing_set) }
        }
        (_, member) => member,
    };
    scope.declare(surface_name, merged);
}

/// A class's static field initializers and static blocks run with `this`
/// bound to the constructor itself, in their own function-shaped environment
/// (the same shape [`crate::function_invocation::run_field_initializers`]
/// uses for instance fields).
fn static_this_context(ctx: &EvaluationContext, constructor: &JsObject) -> EvaluationContext {
    let this_env = Environment::new_function(Some(ctx.lexical_environment.clone()), constructor.clone(), None, false);
    this_env.bind_this_value(JsValue::Object(constructor.clone()));
    EvaluationContext {
        lexical_environment: this_env.clone(),
        variable_environment: this_env,
        private_environment: ctx.private_environment.clone(),
        function: None,
        is_strict: true,
        generator: None,
    }
}

fn run_static_field(agent: &mut Agent, ctx: &EvaluationContext, field: &ast::ClassField, constructor: &JsObject) -> JsResult<()> {
    if let ast::PropertyKey::Private(name) = &field.key {
        if let Some(scope) = &ctx.private_environment {
            scope.declare(name, PrivateMember::Field);
        }
    }
    let static_ctx = static_this_context(ctx, constructor);
    let value = match &field.value {
        Some(expr) => evaluate_expression(agent, &static_ctx, expr)?,
        None => JsValue::Undefined,
    };
    match &field.key {
        ast::PropertyKey::Private(name) => {
            if let Some(scope) = &ctx.private_environment {
                if let Some((mangled, _)) = scope.resolve(name) {
                    constructor.set_private_field(mangled, value);
                }
            }
        }
        _ => {
            let key = evaluate_property_key_literal(agent, ctx, &field.key)?;
            constructor.define_property(key, PropertyDescriptor::data(value, true, true, true));
        }
    }
    Ok(())
}

fn run_static_block(agent: &mut Agent, ctx: &EvaluationContext, statements: &[ast::Statement], constructor: &JsObject) -> JsResult<()> {
    let block_ctx = static_this_context(ctx, constructor);
    let block_env = Environment::new_declarative(Some(block_ctx.lexical_environment.clone()));
    let inner_ctx = block_ctx.with_lexical_environment(block_env);
    let completion = evaluate_statement_list(agent, &inner_ctx, statements)
        .map_err(|err| crate::function_invocation::engine_error_to_js(agent, err))?;
    match completion {
        Completion::Throw(err) => Err(err),
        // Static blocks have no enclosing loop/switch to break/continue out
        // of and ignore any bare `return`, matching `ClassStaticBlockBody`.
        _ => Ok(()),
    }
}
