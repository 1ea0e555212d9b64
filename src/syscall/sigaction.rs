use crate::err::*;
use crate::types::*;
use syscalls::{Sysno, syscall};

#[cfg(not(any(
    all(target_os = "linux", target_arch = "aarch64"),
    all(target_os = "linux", target_arch = "x86_64"),
)))]
compile_error!("src/syscall/sigaction.rs only supports Linux x86_64 and Linux AArch64.");

/// Handler value meaning "take the default action"
pub const SIG_DFL: usize = 0;
/// Handler value meaning "discard the signal"
pub const SIG_IGN: usize = 1;

/// Kernel `struct sigaction`
///
/// This is the layout rt_sigaction() reads, not glibc's.  x86_64 and aarch64 both carry
/// `sa_restorer` between the flags and the mask.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SigAction {
    pub sa_handler: usize,
    pub sa_flags: u64,
    pub sa_restorer: usize,
    pub sa_mask: sigset_t,
}
const _: () = assert!(core::mem::size_of::<SigAction>() == 32);

impl SigAction {
    /// `SIG_DFL` with an empty mask and no flags
    pub const DEFAULT: Self = Self {
        sa_handler: SIG_DFL,
        sa_flags: 0,
        sa_restorer: 0,
        sa_mask: sigset_t::new_empty_set(),
    };

    pub const fn empty() -> Self {
        Self::DEFAULT
    }
}

// `man 2 sigaction`:
//
// SYNOPSIS
//       int sigaction(int signum, const struct sigaction *_Nullable restrict act,
//                     struct sigaction *_Nullable restrict oldact);
//
// RETURN VALUE
//       sigaction() returns 0 on success; on error, -1 is returned, and errno is set to indicate
//       the error.
//
// ERRORS
//       EINVAL An invalid signal was specified.  This will also be generated if an attempt is
//              made to change the action for SIGKILL or SIGSTOP, which cannot be caught or
//              ignored.
//
// Returns the action that was installed before the call.  With `act` of `None` the action is only
// read.
pub unsafe fn rt_sigaction(signum: c_int, act: Option<&SigAction>) -> Result<SigAction, Errno> {
    let mut old = SigAction::empty();
    let act_ptr = act
        .map(|act| act as *const SigAction)
        .unwrap_or(core::ptr::null());

    syscall!(
        Sysno::rt_sigaction,
        signum,
        act_ptr,
        &mut old as *mut SigAction,
        core::mem::size_of::<sigset_t>()
    )
    .map(|_| old)
}
