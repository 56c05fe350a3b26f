//! Callable values: host natives and user closures.

use std::fmt;
use std::rc::Rc;

use rill_ir::FunctionDef;

use crate::object::Blueprint;
use crate::{Environment, Fault, Interpreter, Value};

/// Signature of a host function.
pub type NativeFn = dyn Fn(&Interpreter, Vec<Value>) -> Result<Value, Fault>;

/// A function implemented by the host.
pub struct NativeFunction {
    pub name: String,
    func: Box<NativeFn>,
}

impl NativeFunction {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Interpreter, Vec<Value>) -> Result<Value, Fault> + 'static,
    {
        NativeFunction {
            name: name.into(),
            func: Box::new(func),
        }
    }

    #[inline]
    pub fn call(&self, interpreter: &Interpreter, args: Vec<Value>) -> Result<Value, Fault> {
        (self.func)(interpreter, args)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// The blueprint a bound method belongs to, for `super` resolution.
#[derive(Clone)]
pub struct MethodBinding {
    pub owner: Rc<Blueprint>,
    pub name: String,
}

/// A closure: a function definition plus the frame it was created in.
///
/// The frame is captured by reference, so the closure sees later updates to
/// the variables it closes over.
pub struct UserFunction {
    pub def: Rc<FunctionDef>,
    pub env: Environment,
    pub method: Option<MethodBinding>,
}

impl UserFunction {
    pub fn new(def: Rc<FunctionDef>, env: Environment) -> Self {
        UserFunction {
            def,
            env,
            method: None,
        }
    }

    /// A copy of a blueprint method bound to an instance frame.
    pub fn bound(def: Rc<FunctionDef>, env: Environment, owner: Rc<Blueprint>) -> Self {
        let name = def.display_name().to_string();
        UserFunction {
            def,
            env,
            method: Some(MethodBinding { owner, name }),
        }
    }

    pub fn name(&self) -> &str {
        self.def.display_name()
    }
}
