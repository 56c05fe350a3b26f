//! Blueprint declaration, instantiation and `super` dispatch.

use std::rc::Rc;

use rill_ir::{ClassDecl, Position};
use tracing::debug;

use super::Interpreter;
use crate::environment::MethodContext;
use crate::function::UserFunction;
use crate::object::{Blueprint, ObjectInstance};
use crate::{Environment, Fault, Value};

impl Interpreter {
    /// Bind a blueprint for `decl` in `env`, resolving its parent there.
    pub(crate) fn declare_class(&self, decl: &ClassDecl, env: &Environment) -> Result<(), Fault> {
        let parent = match &decl.parent {
            None => None,
            Some(name) => match env.get(name) {
                Some(Value::Blueprint(parent)) => Some(parent),
                Some(other) => {
                    return Err(Fault::type_mismatch(format!(
                        "`{}` cannot extend `{name}`: it is a {}, not a blueprint",
                        decl.name,
                        other.type_name()
                    )))
                }
                None => return Err(Fault::undeclared_variable(name)),
            },
        };
        let blueprint = Blueprint::declare(decl, parent, env.clone());
        env.set(&decl.name, Value::Blueprint(blueprint))
    }

    /// Create an instance of `blueprint`.
    ///
    /// The instance frame is a child of the blueprint's declaring frame. Field
    /// defaults are evaluated in declaration order (parent fields first),
    /// then every method is bound to the frame, then `self`/`this`, and
    /// finally `constructor` runs with `args` if the blueprint has one.
    #[tracing::instrument(level = "debug", skip_all, fields(blueprint = %blueprint.name))]
    pub(crate) fn instantiate(
        &self,
        blueprint: &Rc<Blueprint>,
        args: Vec<Value>,
        pos: Position,
    ) -> Result<Value, Fault> {
        let frame = blueprint.env.child();
        for (name, default) in blueprint.fields() {
            let value = match default {
                Some(expr) => self.eval_expr(expr, &frame)?,
                None => Value::Nil,
            };
            frame.define(name, value);
        }
        for (name, entry) in blueprint.methods() {
            let owner = entry.owner.upgrade().unwrap_or_else(|| Rc::clone(blueprint));
            let method = UserFunction::bound(Rc::clone(&entry.def), frame.clone(), owner);
            frame.define(name, Value::Function(Rc::new(method)));
        }

        let instance = Rc::new(ObjectInstance {
            blueprint: Rc::clone(blueprint),
            env: frame.clone(),
        });
        frame.define("self", Value::Object(Rc::clone(&instance)));
        frame.define("this", Value::Object(Rc::clone(&instance)));

        if let Some(Value::Function(constructor)) = frame.get_local("constructor") {
            self.call_function(&constructor, args, pos)?;
        }
        debug!("instantiated");
        Ok(Value::Object(instance))
    }

    /// `super(args)` (no member) or `super.member(args)`.
    ///
    /// Resolves against the parent of the blueprint that declared the running
    /// method, and runs the parent method in the caller's own frame so
    /// assignments it makes land on the same instance.
    pub(crate) fn call_super(
        &self,
        member: Option<&str>,
        args: Vec<Value>,
        env: &Environment,
        pos: Position,
    ) -> Result<Value, Fault> {
        let (frame, ctx) = env
            .method_frame()
            .ok_or_else(|| Fault::invalid_super("`super` used outside a method").at(pos))?;
        let name = member.unwrap_or(ctx.method.as_str());
        let parent = ctx.owner.parent.as_ref().ok_or_else(|| {
            Fault::invalid_super(format!("`{}` has no parent blueprint", ctx.owner.name)).at(pos)
        })?;
        let entry = parent.find_method(name).ok_or_else(|| {
            Fault::invalid_super(format!("parent `{}` has no method `{name}`", parent.name)).at(pos)
        })?;

        let owner = entry.owner.upgrade().unwrap_or_else(|| Rc::clone(parent));
        let previous = frame.replace_method_context(Some(MethodContext {
            owner,
            method: name.to_string(),
        }));
        let result = self.invoke(&entry.def, &frame, args, pos);
        frame.replace_method_context(previous);
        result
    }
}
