//! Process-wide error handler
//!
//! One instance per process, created on first call to [`ErrorHandler::global`].
//! Creation hooks the two places errors escape unobserved:
//!
//! - **Panics**: a panic hook logs the panic, then runs the previously
//!   installed hook (so the default message still prints)
//! - **Detached tasks**: [`ErrorHandler::watch_task`] awaits a spawned task
//!   and logs its error or panic
//!
//! Everything is observational. Nothing is retried or recovered.

use log::{debug, error};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use tokio::task::JoinHandle;

use crate::domain::ErrorSource;

static INSTANCE: OnceLock<ErrorHandler> = OnceLock::new();

#[derive(Debug)]
pub struct ErrorHandler {
    observed: AtomicU64,
}

impl ErrorHandler {
    /// The process-wide handler, installing the panic hook on first call.
    pub fn global() -> &'static ErrorHandler {
        INSTANCE.get_or_init(|| {
            install_panic_hook();
            debug!("Global error handler installed");
            ErrorHandler { observed: AtomicU64::new(0) }
        })
    }

    /// Log an error under `source`.
    // TODO: forward to a remote error-reporting endpoint once one exists
    pub fn report(&self, source: ErrorSource, error: impl fmt::Display) {
        self.observed.fetch_add(1, Ordering::Relaxed);
        error!("{source} error: {error}");
    }

    /// Number of errors observed so far, across all sources.
    pub fn observed(&self) -> u64 {
        self.observed.load(Ordering::Relaxed)
    }

    /// Watch a spawned task, logging its failure instead of losing it.
    ///
    /// Must be called inside a tokio runtime. The returned handle yields the
    /// task's value, or `None` if it failed, panicked or was cancelled.
    pub fn watch_task<T, E>(&'static self, task: JoinHandle<Result<T, E>>) -> JoinHandle<Option<T>>
    where
        T: Send + 'static,
        E: fmt::Display + Send + 'static,
    {
        tokio::spawn(async move {
            match task.await {
                Ok(Ok(value)) => Some(value),
                Ok(Err(e)) => {
                    self.report(ErrorSource::Task, e);
                    None
                }
                Err(e) if e.is_cancelled() => {
                    debug!("Watched task cancelled");
                    None
                }
                Err(e) => {
                    self.report(ErrorSource::Task, e);
                    None
                }
            }
        })
    }
}

fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        // Not `global()`: the hook must never initialise the handler
        if let Some(handler) = INSTANCE.get() {
            handler.report(ErrorSource::Panic, info);
        }
        previous(info);
    }));
}
