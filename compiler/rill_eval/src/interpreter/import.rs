//! `import` statements.

use indexmap::IndexMap;
use tracing::debug;

use super::Interpreter;
use crate::{Environment, Fault, Value};

impl Interpreter {
    /// Load `path` through the module loader and bind its top-level names in
    /// `env`, or bind them as one record under `alias`.
    ///
    /// A module runs once per execution; later imports of the same key reuse
    /// its frame. Importing a module that is still being evaluated is a
    /// cycle and faults.
    #[tracing::instrument(level = "debug", skip(self, env))]
    pub(crate) fn exec_import(&self, path: &str, alias: Option<&str>, env: &Environment) -> Result<(), Fault> {
        let Some(loader) = &self.loader else {
            return Err(Fault::import(format!(
                "cannot import `{path}`: no module loader configured"
            )));
        };
        let module = loader.resolve(&env.dir(), path)?;

        if self.loading.borrow().contains(&module.key) {
            let mut chain = self.loading.borrow().clone();
            chain.push(module.key);
            return Err(Fault::import(format!("import cycle: {}", chain.join(" -> "))));
        }

        let cached = self.modules.borrow().get(&module.key).cloned();
        let frame = match cached {
            Some(frame) if env.is_imported(&module.key) => {
                debug!(key = %module.key, "module already loaded");
                frame
            }
            _ => {
                let program = rill_parse::parse_with_base_dir(&module.source, &module.dir)
                    .map_err(|err| Fault::import(format!("{}: {err}", module.key)))?;
                let frame = env.child();
                frame.set_dir(module.dir.as_str());

                self.loading.borrow_mut().push(module.key.clone());
                let result = self.exec_program(&program, &frame);
                self.loading.borrow_mut().pop();
                result?;

                env.mark_imported(&module.key);
                self.modules.borrow_mut().insert(module.key.clone(), frame.clone());
                debug!(key = %module.key, "module loaded");
                frame
            }
        };

        let exports = frame.local_bindings();
        match alias {
            Some(alias) => {
                let fields: IndexMap<String, Value> = exports.into_iter().collect();
                env.set(alias, Value::record(fields))
            }
            None => exports
                .into_iter()
                .try_for_each(|(name, value)| env.set(&name, value)),
        }
    }
}
