//! Function-call tracing helpers.
//!
//! Wrap a call so its arguments or its runtime are written to a store at
//! DEBUG. They work with any [`LogStore`], including `dyn LogStore`.

use std::fmt::Debug;
use std::time::{Duration, Instant};

use crate::error::LogError;
use crate::store::{LogStore, Logged};
use crate::types::Severity;

/// Log the arguments of `name`, then call `f` with them.
///
/// If logging fails, `f` is not called.
pub fn with_args<S, A, T>(store: &S, name: &str, args: A, f: impl FnOnce(A) -> T) -> Result<T, LogError>
where
    S: LogStore + ?Sized,
    A: Debug,
{
    store.log_at(
        &format!("The function {name} was called with the following arguments: {args:?}"),
        Severity::Debug,
    )?;
    Ok(f(args))
}

/// Result of [`with_runtime`]: the call's value is kept even if logging failed.
#[derive(Debug)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
    pub logged: Result<Logged, LogError>,
}

/// Call `f` and log how long it took.
pub fn with_runtime<S, T>(store: &S, name: &str, f: impl FnOnce() -> T) -> Timed<T>
where
    S: LogStore + ?Sized,
{
    let start = Instant::now();
    let value = f();
    let elapsed = start.elapsed();
    let logged = store.log_at(
        &format!("The function {name} took {elapsed:?} to run"),
        Severity::Debug,
    );
    Timed {
        value,
        elapsed,
        logged,
    }
}
