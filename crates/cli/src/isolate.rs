// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic output isolation.
//!
//! Detectors write progress chatter through [`diag!`](crate::diag), which
//! goes to a per-thread sink (stderr unless a scope says otherwise). An
//! [`IsolationScope`] swaps that sink for the current thread only and puts
//! the previous one back when dropped, so scopes on different threads never
//! interfere and a failing or panicking detector cannot leave the sink
//! redirected.

use std::cell::RefCell;
use std::fmt;
use std::io::Write;
use std::marker::PhantomData;
use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::error::{Error, Result};

/// Where diagnostic output goes.
#[derive(Debug, Default)]
enum Sink {
    #[default]
    Stderr,
    Discard,
    Capture(Vec<u8>),
}

thread_local! {
    static SINK: RefCell<Sink> = RefCell::new(Sink::default());
}

/// Write formatted diagnostic output to the current thread's sink.
///
/// Use through the [`diag!`](crate::diag) macro.
pub fn emit(args: fmt::Arguments<'_>) {
    let _ = SINK.try_with(|sink| {
        // Re-entrant writes (a Display impl that itself emits) are dropped.
        let Ok(mut sink) = sink.try_borrow_mut() else {
            return;
        };
        match &mut *sink {
            Sink::Stderr => {
                let _ = std::io::stderr().lock().write_fmt(args);
            }
            Sink::Discard => {}
            Sink::Capture(buf) => {
                let _ = buf.write_fmt(args);
            }
        }
    });
}

/// True while an [`IsolationScope`] is active on the current thread.
pub fn is_isolated() -> bool {
    SINK.try_with(|sink| {
        sink.try_borrow()
            .map(|sink| !matches!(*sink, Sink::Stderr))
            .unwrap_or(true)
    })
    .unwrap_or(false)
}

/// Write a diagnostic line to the current thread's diagnostic sink.
#[macro_export]
macro_rules! diag {
    ($($arg:tt)*) => {
        $crate::isolate::emit(format_args!("{}\n", format_args!($($arg)*)))
    };
}

/// Scoped replacement of the current thread's diagnostic sink.
///
/// The previous sink is restored on drop, including during unwinding.
/// The scope is not `Send`: it must end on the thread that opened it.
#[must_use = "the sink is restored as soon as the scope is dropped"]
pub struct IsolationScope {
    previous: Option<Sink>,
    _not_send: PhantomData<*const ()>,
}

impl IsolationScope {
    fn install(sink: Sink) -> Self {
        let previous = SINK.with(|current| current.replace(sink));
        Self {
            previous: Some(previous),
            _not_send: PhantomData,
        }
    }

    /// Discard diagnostics until the scope ends.
    pub fn discard() -> Self {
        Self::install(Sink::Discard)
    }

    /// Buffer diagnostics until the scope ends.
    pub fn capture() -> Self {
        Self::install(Sink::Capture(Vec::new()))
    }

    /// End the scope, returning whatever was captured.
    pub fn finish(mut self) -> Vec<u8> {
        match self.restore() {
            Some(Sink::Capture(buf)) => buf,
            _ => Vec::new(),
        }
    }

    fn restore(&mut self) -> Option<Sink> {
        let previous = self.previous.take()?;
        Some(SINK.with(|current| current.replace(previous)))
    }
}

impl Drop for IsolationScope {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

fn guarded<T>(f: impl FnOnce() -> Result<T>) -> Result<T> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(Error::Internal(format!(
            "panicked: {}",
            panic_message(payload.as_ref())
        ))),
    }
}

/// Run `f` with diagnostics discarded.
///
/// A panic in `f` is returned as [`Error::Internal`].
pub fn run_isolated<T>(f: impl FnOnce() -> Result<T>) -> Result<T> {
    let _scope = IsolationScope::discard();
    guarded(f)
}

/// Run `f` with diagnostics captured, returning them alongside the result.
pub fn run_captured<T>(f: impl FnOnce() -> Result<T>) -> (Result<T>, String) {
    let scope = IsolationScope::capture();
    let result = guarded(f);
    let captured = scope.finish();
    (result, String::from_utf8_lossy(&captured).into_owned())
}

#[cfg(test)]
#[path = "isolate_tests.rs"]
mod tests;
