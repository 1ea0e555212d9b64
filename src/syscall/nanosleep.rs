use crate::err::*;
use crate::types::*;
use syscalls::{Sysno, syscall};

// `man 2 nanosleep`:
//
// SYNOPSIS
//        int nanosleep(const struct timespec *req, struct timespec *rem);
//
// RETURN VALUE
//        On successfully sleeping for the requested interval, nanosleep() returns 0.  If the call
//        is interrupted by a signal handler, nanosleep() returns -1, sets errno to EINTR, and loads
//        the remaining time into `rem`.
//
// We only ever use short back-off sleeps, so the remaining time is not reported.
pub unsafe fn nanosleep(request: &timespec) -> Result<(), Errno> {
    syscall!(
        Sysno::nanosleep,
        request as *const timespec,
        core::ptr::null_mut::<timespec>()
    )
    .map(|_| ())
}
