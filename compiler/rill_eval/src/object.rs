//! Blueprints (classes) and their instances.
//!
//! A blueprint flattens its parent's members into its own tables when it is
//! declared, so member lookup never walks the inheritance chain. Each method
//! entry remembers the blueprint that declared it; `super` resolves against
//! that owner's parent.

use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use rill_ir::{ClassDecl, Expr, FunctionDef};

use crate::{Environment, Value};

/// A method as stored on a blueprint.
#[derive(Clone)]
pub struct MethodEntry {
    pub def: Rc<FunctionDef>,
    /// The declaring blueprint. Weak because a blueprint owns its own entries.
    pub owner: Weak<Blueprint>,
}

pub struct Blueprint {
    pub name: String,
    pub parent: Option<Rc<Blueprint>>,
    methods: IndexMap<String, MethodEntry>,
    /// Field defaults, parent fields first.
    fields: IndexMap<String, Option<Expr>>,
    /// Frame the declaration was evaluated in; instance frames hang off it.
    pub env: Environment,
}

impl Blueprint {
    /// Build a blueprint from its declaration, merging in `parent`'s members.
    pub fn declare(decl: &ClassDecl, parent: Option<Rc<Blueprint>>, env: Environment) -> Rc<Self> {
        Rc::new_cyclic(|me: &Weak<Blueprint>| {
            let mut methods = IndexMap::new();
            let mut fields = IndexMap::new();
            if let Some(parent) = &parent {
                methods.extend(parent.methods.iter().map(|(k, v)| (k.clone(), v.clone())));
                fields.extend(parent.fields.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
            for field in &decl.fields {
                fields.insert(field.name.clone(), field.default.clone());
            }
            for method in &decl.methods {
                methods.insert(
                    method.display_name().to_string(),
                    MethodEntry {
                        def: Rc::clone(method),
                        owner: me.clone(),
                    },
                );
            }
            Blueprint {
                name: decl.name.clone(),
                parent,
                methods,
                fields,
                env,
            }
        })
    }

    pub fn find_method(&self, name: &str) -> Option<&MethodEntry> {
        self.methods.get(name)
    }

    pub fn methods(&self) -> impl Iterator<Item = (&str, &MethodEntry)> {
        self.methods.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, Option<&Expr>)> {
        self.fields
            .iter()
            .map(|(name, default)| (name.as_str(), default.as_ref()))
    }

    /// Whether `self` is `other` or inherits from it.
    pub fn is_a(&self, other: &Blueprint) -> bool {
        let mut current = Some(self);
        while let Some(blueprint) = current {
            if std::ptr::eq(blueprint, other) {
                return true;
            }
            current = blueprint.parent.as_deref();
        }
        false
    }
}

/// An instance: its blueprint plus a private frame holding fields, bound
/// methods and `self`/`this`.
pub struct ObjectInstance {
    pub blueprint: Rc<Blueprint>,
    pub env: Environment,
}

impl ObjectInstance {
    /// A field or bound method, looked up in the instance frame only.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.env.get_local(name)
    }

    pub fn set(&self, name: &str, value: Value) {
        self.env.define(name, value);
    }
}
