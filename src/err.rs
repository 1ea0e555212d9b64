//! # Error handling
//!
//! Two layers:
//!
//! - Raw system call failures are `Errno`, straight from the `syscalls` crate.
//! - A spawn-wait cycle fails with `SpawnError`, one variant per protocol step that can fail.
//!   None of them are retried; the caller decides what to do with the cycle.
//!
//! Unrecoverable scenarios at the binary edge go through `or_abort()`, which prints a message to
//! stderr and terminates the whole process with exit code 1.
//!
//! Our print machinery does not support typical Rust `{}`-formatting.  Instead, each error type
//! knows how to print its own details via `ErrorDetail`.

use crate::os::*;
use crate::spawn::{ChildFailure, ChildStage};

pub type Errno = syscalls::Errno;

/// Why a spawn-wait cycle did not produce an exit status
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnError {
    /// Installing the all-blocked signal mask failed; nothing was spawned
    SignalMask(Errno),
    /// vfork()/fork() (or the report pipe) failed; no child exists
    SpawnFailed(Errno),
    /// The child terminated with a reserved code before replacing its image
    ChildSetupFailed(ChildFailure),
    /// Reaping the child failed; its fate is unknown
    WaitFailed(Errno),
}

impl SpawnError {
    /// The underlying errno, whichever step produced it
    pub fn errno(&self) -> Errno {
        match self {
            SpawnError::SignalMask(e) | SpawnError::SpawnFailed(e) | SpawnError::WaitFailed(e) => {
                *e
            }
            SpawnError::ChildSetupFailed(failure) => failure.errno,
        }
    }

    /// Which protocol step went wrong, without the errno
    pub const fn step(&self) -> &'static str {
        match self {
            SpawnError::SignalMask(_) => "unable to set the signal mask",
            // Covers vfork, fork, the report pipe, and an invalid request
            SpawnError::SpawnFailed(_) => "unable to spawn",
            SpawnError::ChildSetupFailed(_) => "child failed to ",
            SpawnError::WaitFailed(_) => "unable to wait for the child",
        }
    }

    /// True if the child ran its setup but execve() itself failed
    pub fn is_replace_failure(&self) -> bool {
        matches!(
            self,
            SpawnError::ChildSetupFailed(ChildFailure {
                stage: ChildStage::Replace,
                ..
            })
        )
    }
}

/// Print the details of an error after an `ERROR: <msg>` prefix
pub trait ErrorDetail {
    fn eprint_detail(&self);
}

impl ErrorDetail for Errno {
    fn eprint_detail(&self) {
        if let Some(e) = self.description() {
            eprint(": ");
            eprint(e);
        }
    }
}

impl ErrorDetail for SpawnError {
    fn eprint_detail(&self) {
        eprint(": ");
        eprint(self.step());
        match self {
            SpawnError::SignalMask(e) | SpawnError::SpawnFailed(e) | SpawnError::WaitFailed(e) => {
                e.eprint_detail();
            }
            SpawnError::ChildSetupFailed(failure) => {
                eprint(failure.stage.action());
                eprint(" (exit code ");
                eprint(failure.stage.exit_code());
                eprint(")");
                failure.errno.eprint_detail();
            }
        }
    }
}

fn abort() -> ! {
    exit(1);
}

pub trait OrAbortResult<T> {
    fn or_abort<M: Print>(self, msg: M) -> T;
}

impl<T, E: ErrorDetail> OrAbortResult<T> for Result<T, E> {
    fn or_abort<M: Print>(self, msg: M) -> T {
        let e = match self {
            Ok(t) => return t,
            Err(e) => e,
        };

        eprint("ERROR: ");
        eprint(msg);
        e.eprint_detail();
        eprint("\n");

        abort();
    }
}
