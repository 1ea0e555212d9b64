//! The child continuation
//!
//! Runs between vfork and execve inside the parent's address space, so everything here is
//! allocation-free and calls nothing but `SpawnOs`.  Steps, each of which may end the child with
//! a reserved exit code:
//!
//! ```text
//! QueryDisposition → ResetDisposition → RestoreMask → Prepare (chdir) → Replace (execve)
//! ```

use crate::constants::NSIG;
use crate::err::*;
use crate::os::Fd;
use crate::spawn::{ChildFailure, ChildStage, SpawnOs, SpawnRequest};
use crate::types::sigset_t;

/// Point every signal with a custom handler back at SIG_DFL
///
/// Ignored signals stay ignored.  EINVAL means the kernel does not let this signal be changed and
/// is skipped; any other failure stops the loop.
pub fn reset_dispositions<O: SpawnOs>(os: &O) -> Result<(), ChildFailure> {
    for signo in 1..NSIG {
        let disposition = os
            .query_disposition(signo)
            .map_err(|e| ChildFailure::new(ChildStage::QueryDisposition, e))?;

        if !disposition.is_handler() {
            continue;
        }

        match os.reset_disposition(signo) {
            Ok(()) | Err(Errno::EINVAL) => {}
            Err(e) => return Err(ChildFailure::new(ChildStage::ResetDisposition, e)),
        }
    }

    Ok(())
}

fn prepare<O: SpawnOs>(
    os: &O,
    request: &SpawnRequest<'_>,
    old_mask: sigset_t,
) -> Result<(), ChildFailure> {
    reset_dispositions(os)?;

    os.set_signal_mask(&old_mask)
        .map_err(|e| ChildFailure::new(ChildStage::RestoreMask, e))?;

    if let Some(cwd) = request.cwd() {
        os.chdir(cwd)
            .map_err(|e| ChildFailure::new(ChildStage::Prepare, e))?;
    }

    Ok(())
}

/// Run every setup step and execve()
///
/// Only returns if something failed, with the stage it failed at.
pub fn prepare_and_exec<O: SpawnOs>(
    os: &O,
    request: &SpawnRequest<'_>,
    old_mask: sigset_t,
) -> ChildFailure {
    if let Err(failure) = prepare(os, request, old_mask) {
        return failure;
    }

    ChildFailure::new(ChildStage::Replace, os.execve(request))
}

/// Entry point of the child after vfork/fork
///
/// Never inlined: the child gets a fresh frame below the spawner's and never returns into it.
#[inline(never)]
pub(super) fn run<O: SpawnOs>(
    os: &O,
    request: &SpawnRequest<'_>,
    old_mask: sigset_t,
    report: &Fd,
) -> ! {
    let failure = prepare_and_exec(os, request, old_mask);
    // A lost report still leaves the reserved exit code for the parent
    let _ = os.write_report(report, &failure.encode());
    os.exit(failure.exit_code())
}
