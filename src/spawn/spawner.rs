use crate::constants::REPORT_SIZE;
use crate::err::*;
use crate::os::{Fd, ForkResult};
use crate::spawn::{ChildFailure, ExitStatus, MaskGuard, SpawnMode, SpawnOs, SpawnRequest, child};
use crate::types::pid_t;

/// Run `request` to completion in a vfork child
pub fn spawn_and_wait<O: SpawnOs>(
    os: &O,
    request: &SpawnRequest<'_>,
) -> Result<ExitStatus, SpawnError> {
    spawn_and_wait_in(os, request, SpawnMode::Vfork)
}

/// One spawn-wait cycle
///
/// The thread's signal mask is the same afterwards as before, whatever the outcome.  A target
/// program that exits with a reserved code is `Ok`; only a failure report from the child's own
/// setup turns into `ChildSetupFailed`.
///
/// Credential changes on sibling threads must not happen during the cycle.  Callers that cannot
/// rule that out hold a `SpawnPermit` around this call.
pub fn spawn_and_wait_in<O: SpawnOs>(
    os: &O,
    request: &SpawnRequest<'_>,
    mode: SpawnMode,
) -> Result<ExitStatus, SpawnError> {
    let (report_read, report_write) = os.new_report_pipe().map_err(SpawnError::SpawnFailed)?;

    let guard = match MaskGuard::block_all(os) {
        Ok(guard) => guard,
        Err(e) => {
            let _ = os.close(report_write);
            let _ = os.close(report_read);
            return Err(SpawnError::SignalMask(e));
        }
    };

    // SAFETY: the child branch goes straight into `child::run`, which never returns.  It reads
    // the request and the old mask; nothing in this frame is written.
    let pid = match unsafe { os.spawn(mode) } {
        Ok(ForkResult::Child) => child::run(os, request, guard.old_mask(), &report_write),
        Ok(ForkResult::Parent(pid)) => pid,
        Err(e) => {
            drop(guard);
            let _ = os.close(report_write);
            let _ = os.close(report_read);
            return Err(SpawnError::SpawnFailed(e));
        }
    };

    let restored = guard.restore();

    // Our copy of the write end must go, or the read below never sees end of file
    let _ = os.close(report_write);
    let report = read_report(os, &report_read);
    let _ = os.close(report_read);

    let status = reap(os, pid)?;
    restored.map_err(SpawnError::SignalMask)?;

    match report {
        Some(failure) if status == ExitStatus::Exited(failure.exit_code() as u8) => {
            Err(SpawnError::ChildSetupFailed(failure))
        }
        _ => Ok(status),
    }
}

/// Read the child's failure report, if it wrote one
///
/// End of file before a full report (the usual case: execve closed the write end) is no report.
fn read_report<O: SpawnOs>(os: &O, fd: &Fd) -> Option<ChildFailure> {
    let mut buf = [0u8; REPORT_SIZE];
    let mut filled = 0;

    while filled < REPORT_SIZE {
        let rest = buf.get_mut(filled..)?;
        match os.read(fd, rest) {
            Ok(0) => return None,
            Ok(n) => filled += n,
            Err(Errno::EINTR) => continue,
            Err(_) => return None,
        }
    }

    ChildFailure::decode(&buf)
}

/// Block until `pid` terminates
fn reap<O: SpawnOs>(os: &O, pid: pid_t) -> Result<ExitStatus, SpawnError> {
    loop {
        match os.waitpid(pid) {
            Ok(raw) => {
                if let Some(status) = ExitStatus::from_raw(raw) {
                    return Ok(status);
                }
            }
            // Interrupted, not failed: the child is still there to be reaped
            Err(Errno::EINTR) => continue,
            Err(e) => return Err(SpawnError::WaitFailed(e)),
        }
    }
}
