//! Execution limiter: iteration, call-depth, wall-clock and cancellation
//! budgets for one top-level execution.
//!
//! One limiter is created per run and shared by every frame of that run
//! through a [`LimiterHandle`]. Loops call [`LimiterHandle::tick`] once per
//! iteration after their condition and before their body; calls go through
//! [`LimiterHandle::enter_call`], whose guard pops the call on drop so the
//! depth stays balanced when a fault unwinds.
//!
//! The iteration counter is global to the execution, not per loop: nested
//! loops draw from the same budget.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rill_ir::Position;
use tracing::{debug, trace};

use crate::Fault;

pub const DEFAULT_MAX_ITERATIONS: u64 = 1_000_000;
pub const DEFAULT_MAX_DEPTH: usize = 1000;
pub const DEFAULT_MAX_DURATION: Duration = Duration::from_secs(30);

/// Limiter settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LimiterConfig {
    pub max_iterations: u64,
    pub max_depth: usize,
    pub max_duration: Duration,
    pub enabled: bool,
}

impl Default for LimiterConfig {
    fn default() -> Self {
        LimiterConfig {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_depth: DEFAULT_MAX_DEPTH,
            max_duration: DEFAULT_MAX_DURATION,
            enabled: true,
        }
    }
}

impl LimiterConfig {
    /// Limits switched off entirely.
    pub fn unlimited() -> Self {
        LimiterConfig {
            enabled: false,
            ..LimiterConfig::default()
        }
    }

    #[must_use]
    pub fn with_max_iterations(mut self, max: u64) -> Self {
        self.max_iterations = max;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max: usize) -> Self {
        self.max_depth = max;
        self
    }

    #[must_use]
    pub fn with_max_duration(mut self, max: Duration) -> Self {
        self.max_duration = max;
        self
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Cross-thread cancellation flag, polled at loop iterations and call entry.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Clear a previous cancellation so the token can be reused.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

/// Which budget was exceeded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BreachKind {
    While,
    For,
    ForIn,
    Recursion,
    Timeout,
    Cancelled,
}

impl BreachKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            BreachKind::While => "while",
            BreachKind::For => "for",
            BreachKind::ForIn => "for-in",
            BreachKind::Recursion => "recursion",
            BreachKind::Timeout => "timeout",
            BreachKind::Cancelled => "cancelled",
        }
    }

    pub const fn hint(self) -> &'static str {
        match self {
            BreachKind::While => "check that the while condition can become false",
            BreachKind::For => "make sure the increment modifies the condition",
            BreachKind::ForIn => "check that the collection is not grown while it is iterated",
            BreachKind::Recursion => "add a base case that ends the recursion",
            BreachKind::Timeout => "consider splitting the work into smaller parts",
            BreachKind::Cancelled => "the host cancelled this execution",
        }
    }

    pub const fn is_loop(self) -> bool {
        matches!(self, BreachKind::While | BreachKind::For | BreachKind::ForIn)
    }
}

impl fmt::Display for BreachKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Details of an exceeded budget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Breach {
    pub kind: BreachKind,
    /// Iterations performed so far in this execution.
    pub iterations: u64,
    pub elapsed: Duration,
    pub location: Option<Position>,
    pub hint: &'static str,
    /// The budget that was hit, in the kind's own unit: iterations, call
    /// frames, or milliseconds for a timeout.
    pub limit: u64,
    /// Innermost call when the breach was a recursion breach.
    pub function: Option<String>,
}

impl fmt::Display for Breach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            BreachKind::While | BreachKind::For | BreachKind::ForIn => write!(
                f,
                "iteration limit of {} exceeded in `{}` loop",
                self.limit, self.kind
            ),
            BreachKind::Recursion => {
                write!(f, "maximum call depth of {} exceeded", self.limit)?;
                if let Some(function) = &self.function {
                    write!(f, " calling `{function}`")?;
                }
                Ok(())
            }
            BreachKind::Timeout => write!(
                f,
                "execution exceeded the time limit of {}ms",
                self.limit
            ),
            BreachKind::Cancelled => f.write_str("execution cancelled"),
        }
    }
}

/// Budget state for one execution.
#[derive(Debug)]
pub struct ExecutionLimiter {
    config: LimiterConfig,
    iterations: u64,
    call_stack: Vec<String>,
    started: Instant,
    cancel: CancelToken,
}

impl ExecutionLimiter {
    pub fn new(config: LimiterConfig, cancel: CancelToken) -> Self {
        ExecutionLimiter {
            config,
            iterations: 0,
            call_stack: Vec::new(),
            started: Instant::now(),
            cancel,
        }
    }

    fn breach(&self, kind: BreachKind, limit: u64, location: Option<Position>) -> Breach {
        Breach {
            kind,
            iterations: self.iterations,
            elapsed: self.started.elapsed(),
            location,
            hint: kind.hint(),
            limit,
            function: None,
        }
    }

    fn check_interrupts(&self, location: Option<Position>) -> Result<(), Breach> {
        if self.cancel.is_cancelled() {
            return Err(self.breach(BreachKind::Cancelled, 0, location));
        }
        if self.started.elapsed() > self.config.max_duration {
            let limit_ms = u64::try_from(self.config.max_duration.as_millis()).unwrap_or(u64::MAX);
            return Err(self.breach(BreachKind::Timeout, limit_ms, location));
        }
        Ok(())
    }

    /// Check the budgets for one more loop iteration, then count it.
    pub fn check_iteration(
        &mut self,
        kind: BreachKind,
        location: Option<Position>,
    ) -> Result<(), Breach> {
        if !self.config.enabled {
            return Ok(());
        }
        self.check_interrupts(location)?;
        if self.iterations >= self.config.max_iterations {
            return Err(self.breach(kind, self.config.max_iterations, location));
        }
        self.iterations += 1;
        Ok(())
    }

    /// Check the budgets for entering `name`, then push it.
    pub fn check_call(&mut self, name: &str, location: Option<Position>) -> Result<(), Breach> {
        if self.config.enabled {
            self.check_interrupts(location)?;
            if self.call_stack.len() >= self.config.max_depth {
                let mut breach =
                    self.breach(BreachKind::Recursion, self.config.max_depth as u64, location);
                breach.function = Some(name.to_string());
                return Err(breach);
            }
        }
        self.call_stack.push(name.to_string());
        Ok(())
    }

    pub fn pop_call(&mut self) {
        self.call_stack.pop();
    }

    pub fn depth(&self) -> usize {
        self.call_stack.len()
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn config(&self) -> &LimiterConfig {
        &self.config
    }

    /// Active calls, innermost first.
    pub fn backtrace(&self) -> Vec<String> {
        self.call_stack.iter().rev().cloned().collect()
    }

    /// Start the budgets over: zero iterations, empty call stack, fresh clock.
    pub fn reset(&mut self) {
        self.iterations = 0;
        self.call_stack.clear();
        self.started = Instant::now();
    }
}

/// Shared handle to the limiter of one execution.
#[derive(Clone, Debug)]
pub struct LimiterHandle(Rc<RefCell<ExecutionLimiter>>);

impl LimiterHandle {
    pub fn new(config: LimiterConfig, cancel: CancelToken) -> Self {
        LimiterHandle(Rc::new(RefCell::new(ExecutionLimiter::new(config, cancel))))
    }

    /// Loop-iteration check, raised as a [`Fault`] on breach.
    pub fn tick(&self, kind: BreachKind, location: Position) -> Result<(), Fault> {
        trace!(%kind, "iteration");
        let result = self
            .0
            .borrow_mut()
            .check_iteration(kind, location.is_known().then_some(location));
        result.map_err(|breach| self.raise(breach))
    }

    /// Register a call to `name`; the returned guard pops it when dropped.
    pub fn enter_call(&self, name: &str, location: Position) -> Result<CallGuard, Fault> {
        let result = self
            .0
            .borrow_mut()
            .check_call(name, location.is_known().then_some(location));
        match result {
            Ok(()) => Ok(CallGuard {
                limiter: self.clone(),
            }),
            Err(breach) => Err(self.raise(breach)),
        }
    }

    fn raise(&self, breach: Breach) -> Fault {
        debug!(kind = %breach.kind, iterations = breach.iterations, "limiter breach");
        let backtrace = self.backtrace();
        Fault::limit_exceeded(breach).with_backtrace(backtrace)
    }

    pub fn depth(&self) -> usize {
        self.0.borrow().depth()
    }

    pub fn iterations(&self) -> u64 {
        self.0.borrow().iterations()
    }

    pub fn config(&self) -> LimiterConfig {
        self.0.borrow().config().clone()
    }

    pub fn backtrace(&self) -> Vec<String> {
        self.0.borrow().backtrace()
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.0.borrow().cancel.clone()
    }

    pub fn disable(&self) {
        self.0.borrow_mut().config.enabled = false;
    }

    pub fn enable(&self) {
        self.0.borrow_mut().config.enabled = true;
    }

    pub fn reconfigure(&self, config: LimiterConfig) {
        self.0.borrow_mut().config = config;
    }

    pub fn reset(&self) {
        self.0.borrow_mut().reset();
    }

    /// Whether two handles share one limiter.
    pub fn ptr_eq(&self, other: &LimiterHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Pops one call-stack entry on drop.
#[must_use = "dropping the guard immediately pops the call"]
pub struct CallGuard {
    limiter: LimiterHandle,
}

impl Drop for CallGuard {
    fn drop(&mut self) {
        self.limiter.0.borrow_mut().pop_call();
    }
}
