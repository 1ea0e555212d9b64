use crate::err::*;
use crate::types::*;
use core::ffi::c_int;
use syscalls::{Sysno, syscall};

// `man 2 wait4`:
//
// SYNOPSIS
//       pid_t wait4(pid_t pid, int *_Nullable wstatus, int options,
//                   struct rusage *_Nullable rusage);
//
// RETURN VALUE
//       On success, returns the process ID of the child whose state has changed.  On error, -1 is
//       returned and errno is set to indicate the error.
//
// Blocks until the child with exactly this pid changes state; no options, no rusage.  Returns
// (pid, raw status).
pub unsafe fn wait4(pid: pid_t) -> Result<(pid_t, c_int), Errno> {
    let mut status: c_int = 0;
    let status_ptr = &mut status as *mut c_int;

    syscall!(
        Sysno::wait4,
        pid,
        status_ptr,
        0, // options
        0  // rusage pointer (NULL)
    )
    .map(|ret| (ret as pid_t, status))
}

/// Extract exit status from wait status
pub const fn wexitstatus(status: c_int) -> c_int {
    (status >> 8) & 0xff
}

/// Check if process exited normally
pub const fn wifexited(status: c_int) -> bool {
    wtermsig(status) == 0
}

/// Check if process was terminated by signal
pub const fn wifsignaled(status: c_int) -> bool {
    ((status & 0x7f) + 1) as i8 >= 2
}

/// Extract termination signal from wait status
pub const fn wtermsig(status: c_int) -> c_int {
    status & 0x7f
}

/// Check if the child produced a core dump when it was killed
pub const fn wcoredump(status: c_int) -> bool {
    status & 0x80 != 0
}
