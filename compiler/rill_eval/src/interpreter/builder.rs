//! `InterpreterBuilder` for configuring an [`Interpreter`].

use std::cell::RefCell;
use std::rc::Rc;

use super::Interpreter;
use crate::limiter::{CancelToken, LimiterConfig, LimiterHandle};
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::{Environment, ModuleLoader};

/// Builder for [`Interpreter`]. Every built interpreter owns a fresh root
/// frame and a fresh limiter.
#[derive(Default)]
pub struct InterpreterBuilder {
    limits: LimiterConfig,
    cancel: Option<CancelToken>,
    loader: Option<Rc<dyn ModuleLoader>>,
    print_handler: Option<SharedPrintHandler>,
    base_dir: Option<String>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn limits(mut self, limits: LimiterConfig) -> Self {
        self.limits = limits;
        self
    }

    /// Token the host can use to cancel the run from another thread.
    #[must_use]
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Loader for `import`. Without one, `import` faults.
    #[must_use]
    pub fn loader(mut self, loader: impl ModuleLoader + 'static) -> Self {
        self.loader = Some(Rc::new(loader));
        self
    }

    /// Where script output goes. Defaults to stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Directory the root frame resolves imports against.
    #[must_use]
    pub fn base_dir(mut self, dir: impl Into<String>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn build(self) -> Interpreter {
        let limiter = LimiterHandle::new(self.limits, self.cancel.unwrap_or_default());
        let globals = Environment::new_root(limiter);
        if let Some(dir) = self.base_dir {
            globals.set_dir(dir);
        }
        Interpreter {
            globals,
            loader: self.loader,
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            loading: RefCell::new(Vec::new()),
            modules: RefCell::default(),
        }
    }
}
