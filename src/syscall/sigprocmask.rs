use crate::err::*;
use crate::types::*;
use syscalls::{Sysno, syscall};

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SigprocmaskHow {
    SIG_BLOCK = 0,
    SIG_UNBLOCK = 1,
    SIG_SETMASK = 2,
}

// `man 2 sigprocmask`:
//
// SYNOPSIS
//       int sigprocmask(int how, const sigset_t *_Nullable restrict set,
//                       sigset_t *_Nullable restrict oldset);
//
// DESCRIPTION
//       The signal mask is a per-thread attribute.  rt_sigprocmask() only ever touches the mask of
//       the calling thread, which is what pthread_sigmask() relies on as well.
//
// RETURN VALUE
//      On success, sigprocmask() returns 0; on error, -1 is returned, and errno is set to indicate
//      the error.
//
// Returns the mask that was in effect before the call.  With `set` of `None` the mask is only
// read and `how` is ignored by the kernel.
pub unsafe fn rt_sigprocmask(how: SigprocmaskHow, set: Option<&sigset_t>) -> Result<sigset_t, Errno> {
    let mut old = sigset_t::new_empty_set();
    let set_ptr = set
        .map(|set| set as *const sigset_t)
        .unwrap_or(core::ptr::null());

    // Clippy is confused here; the cast is necessary in the macro.
    #[allow(clippy::unnecessary_cast)]
    syscall!(
        Sysno::rt_sigprocmask,
        how as c_int,
        set_ptr,
        &mut old as *mut sigset_t,
        core::mem::size_of::<sigset_t>()
    )
    .map(|_| old)
}
