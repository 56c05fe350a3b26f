//! Environment frames for variable scoping.
//!
//! Frames form a parent-linked chain. Blocks, calls, loop passes and
//! instances each get a fresh child frame; closures keep their defining frame
//! alive by holding an [`Environment`] handle to it.
//!
//! Besides bindings a frame carries the working directory for imports, the
//! import set shared by every frame of one execution, an optional method
//! context for `super`, and the execution's limiter.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::limiter::LimiterHandle;
use crate::object::Blueprint;
use crate::{Fault, Interpreter, Value};

/// Whether a binding can be reassigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutability {
    /// `let` / `var`, parameters, loop variables.
    Mutable,
    /// `const`.
    Immutable,
}

impl Mutability {
    #[inline]
    pub fn is_mutable(self) -> bool {
        matches!(self, Mutability::Mutable)
    }
}

/// A single-threaded shared cell.
///
/// Wraps `Rc<RefCell<T>>` so every frame allocation goes through
/// [`LocalScope::new`].
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

/// The blueprint and method a call frame is running, for `super`.
#[derive(Clone)]
pub struct MethodContext {
    pub owner: Rc<Blueprint>,
    pub method: String,
}

#[derive(Clone, Debug)]
struct Binding {
    value: Value,
    mutability: Mutability,
}

/// The contents of one frame.
pub struct Scope {
    bindings: FxHashMap<String, Binding>,
    parent: Option<Environment>,
    dir: String,
    imports: Rc<RefCell<FxHashSet<String>>>,
    method_ctx: Option<MethodContext>,
    limiter: LimiterHandle,
}

/// Handle to a frame. Cloning the handle shares the frame.
#[derive(Clone)]
pub struct Environment {
    scope: LocalScope<Scope>,
}

impl Environment {
    /// A root frame for a brand-new execution.
    pub fn new_root(limiter: LimiterHandle) -> Self {
        Environment {
            scope: LocalScope::new(Scope {
                bindings: FxHashMap::default(),
                parent: None,
                dir: ".".to_string(),
                imports: Rc::default(),
                method_ctx: None,
                limiter,
            }),
        }
    }

    /// A frame whose parent is `self`. The directory is copied; the import
    /// set and limiter are shared.
    #[must_use]
    pub fn child(&self) -> Self {
        let scope = self.scope.borrow();
        Environment {
            scope: LocalScope::new(Scope {
                bindings: FxHashMap::default(),
                parent: Some(self.clone()),
                dir: scope.dir.clone(),
                imports: Rc::clone(&scope.imports),
                method_ctx: None,
                limiter: scope.limiter.clone(),
            }),
        }
    }

    pub fn parent(&self) -> Option<Environment> {
        self.scope.borrow().parent.clone()
    }

    /// Look `name` up, walking outward from this frame.
    pub fn get(&self, name: &str) -> Option<Value> {
        let mut current = self.clone();
        loop {
            let parent = {
                let scope = current.scope.borrow();
                if let Some(binding) = scope.bindings.get(name) {
                    return Some(binding.value.clone());
                }
                scope.parent.clone()
            };
            current = parent?;
        }
    }

    /// Look `name` up in this frame only.
    pub fn get_local(&self, name: &str) -> Option<Value> {
        self.scope
            .borrow()
            .bindings
            .get(name)
            .map(|binding| binding.value.clone())
    }

    pub fn has_local(&self, name: &str) -> bool {
        self.scope.borrow().bindings.contains_key(name)
    }

    /// Bind `name` mutably in this frame, shadowing outer bindings.
    ///
    /// Fails if this frame already holds a constant of that name.
    pub fn set(&self, name: &str, value: Value) -> Result<(), Fault> {
        let mut scope = self.scope.borrow_mut();
        if let Some(existing) = scope.bindings.get(name) {
            if !existing.mutability.is_mutable() {
                return Err(Fault::already_declared(name));
            }
        }
        scope.bindings.insert(
            name.to_string(),
            Binding {
                value,
                mutability: Mutability::Mutable,
            },
        );
        Ok(())
    }

    /// Bind `name` immutably in this frame. Fails if this frame already
    /// declares it.
    pub fn set_const(&self, name: &str, value: Value) -> Result<(), Fault> {
        let mut scope = self.scope.borrow_mut();
        if scope.bindings.contains_key(name) {
            return Err(Fault::already_declared(name));
        }
        scope.bindings.insert(
            name.to_string(),
            Binding {
                value,
                mutability: Mutability::Immutable,
            },
        );
        Ok(())
    }

    /// Bind `name` mutably in this frame regardless of what it held.
    /// Used for parameters, loop variables, fields and host natives.
    pub fn define(&self, name: &str, value: Value) {
        self.scope.borrow_mut().bindings.insert(
            name.to_string(),
            Binding {
                value,
                mutability: Mutability::Mutable,
            },
        );
    }

    /// Reassign the nearest existing binding of `name`.
    pub fn update(&self, name: &str, value: Value) -> Result<(), Fault> {
        let mut current = self.clone();
        loop {
            let parent = {
                let mut scope = current.scope.borrow_mut();
                if let Some(binding) = scope.bindings.get_mut(name) {
                    if !binding.mutability.is_mutable() {
                        return Err(Fault::immutable_binding(name));
                    }
                    binding.value = value;
                    return Ok(());
                }
                scope.parent.clone()
            };
            match parent {
                Some(parent) => current = parent,
                None => return Err(Fault::undeclared_variable(name)),
            }
        }
    }

    /// Register a host function under `name`.
    pub fn define_native<F>(&self, name: &str, func: F)
    where
        F: Fn(&Interpreter, Vec<Value>) -> Result<Value, Fault> + 'static,
    {
        self.define(name, Value::native(name, func));
    }

    /// This frame's own bindings, sorted by name.
    pub fn local_bindings(&self) -> Vec<(String, Value)> {
        let scope = self.scope.borrow();
        let mut bindings: Vec<_> = scope
            .bindings
            .iter()
            .map(|(name, binding)| (name.clone(), binding.value.clone()))
            .collect();
        bindings.sort_by(|a, b| a.0.cmp(&b.0));
        bindings
    }

    pub fn set_dir(&self, dir: impl Into<String>) {
        self.scope.borrow_mut().dir = dir.into();
    }

    pub fn dir(&self) -> String {
        self.scope.borrow().dir.clone()
    }

    pub fn mark_imported(&self, key: &str) {
        self.scope
            .borrow()
            .imports
            .borrow_mut()
            .insert(key.to_string());
    }

    pub fn is_imported(&self, key: &str) -> bool {
        self.scope.borrow().imports.borrow().contains(key)
    }

    pub fn limiter(&self) -> LimiterHandle {
        self.scope.borrow().limiter.clone()
    }

    /// Replace this frame's method context, returning the previous one.
    pub fn replace_method_context(&self, ctx: Option<MethodContext>) -> Option<MethodContext> {
        std::mem::replace(&mut self.scope.borrow_mut().method_ctx, ctx)
    }

    /// The nearest frame (this one or an ancestor) running a method.
    pub fn method_frame(&self) -> Option<(Environment, MethodContext)> {
        let mut current = self.clone();
        loop {
            let (ctx, parent) = {
                let scope = current.scope.borrow();
                (scope.method_ctx.clone(), scope.parent.clone())
            };
            if let Some(ctx) = ctx {
                return Some((current, ctx));
            }
            current = parent?;
        }
    }

    /// Whether two handles refer to the same frame.
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        self.scope.ptr_eq(&other.scope)
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = self.scope.borrow();
        let mut names: Vec<_> = scope.bindings.keys().collect();
        names.sort();
        f.debug_struct("Environment")
            .field("bindings", &names)
            .field("dir", &scope.dir)
            .field("has_parent", &scope.parent.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests;
