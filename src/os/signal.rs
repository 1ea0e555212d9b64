use crate::err::*;
use crate::syscall::{SIG_DFL, SIG_IGN, SigAction, SigprocmaskHow, rt_sigaction, rt_sigprocmask};
use crate::types::*;

/// What the kernel does when a signal is delivered
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// `SIG_DFL`
    Default,
    /// `SIG_IGN`
    Ignore,
    /// A custom handler at this address
    Handler(usize),
}

impl Disposition {
    pub const fn from_action(action: &SigAction) -> Self {
        match action.sa_handler {
            SIG_DFL => Disposition::Default,
            SIG_IGN => Disposition::Ignore,
            addr => Disposition::Handler(addr),
        }
    }

    pub const fn is_handler(self) -> bool {
        matches!(self, Disposition::Handler(_))
    }
}

/// Block every signal for the calling thread, returning the mask that was in effect
///
/// The kernel silently keeps SIGKILL and SIGSTOP deliverable.
#[inline]
pub fn block_all_signals() -> Result<sigset_t, Errno> {
    let sigset = sigset_t::new_full_set();
    unsafe { rt_sigprocmask(SigprocmaskHow::SIG_BLOCK, Some(&sigset)) }
}

/// Add `signals` to the calling thread's mask, returning the previous mask
#[inline]
pub fn block_signals(signals: &sigset_t) -> Result<sigset_t, Errno> {
    unsafe { rt_sigprocmask(SigprocmaskHow::SIG_BLOCK, Some(signals)) }
}

/// Replace the calling thread's mask outright
#[inline]
pub fn set_signal_mask(mask: &sigset_t) -> Result<(), Errno> {
    unsafe { rt_sigprocmask(SigprocmaskHow::SIG_SETMASK, Some(mask)).map(|_| ()) }
}

#[inline]
pub fn current_signal_mask() -> Result<sigset_t, Errno> {
    unsafe { rt_sigprocmask(SigprocmaskHow::SIG_BLOCK, None) }
}

/// Read the disposition of `signo` without changing it
#[inline]
pub fn query_disposition(signo: c_int) -> Result<Disposition, Errno> {
    unsafe { rt_sigaction(signo, None).map(|old| Disposition::from_action(&old)) }
}

/// Set `signo` to `SIG_DFL` with an empty mask and no flags
///
/// EINVAL means the kernel refuses to change this signal (SIGKILL, SIGSTOP).
#[inline]
pub fn reset_disposition(signo: c_int) -> Result<(), Errno> {
    unsafe { rt_sigaction(signo, Some(&SigAction::DEFAULT)).map(|_| ()) }
}
