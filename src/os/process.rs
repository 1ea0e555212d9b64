use crate::err::*;
use crate::types::*;

pub use crate::syscall::{ForkResult, wcoredump, wexitstatus, wifexited, wifsignaled, wtermsig};

/// Fork the current process
///
/// # Safety
///
/// In a multi-threaded process the child holds a copy of every lock other threads held at the
/// time of the fork.  It must only make async-signal-safe calls until it execs or exits.
pub unsafe fn fork() -> Result<ForkResult, Errno> {
    unsafe { crate::syscall::fork() }
}

/// Fork the current process with vfork semantics
///
/// # Safety
///
/// This function is unsafe because even in single-threaded contexts:
/// - The child must not return from the function that called vfork
/// - The child must not modify any data other than a variable of type pid_t used to store the return value
/// - The child must call exec or _exit before doing anything else
///
/// The caller must ensure these constraints are met.
#[inline(always)]
pub unsafe fn vfork() -> Result<ForkResult, Errno> {
    unsafe { crate::syscall::vfork() }
}

/// Replace the process image
///
/// Only returns on failure.
///
/// # Safety
///
/// `argv` and `envp` must point to null-terminated arrays of pointers to null-terminated strings.
pub unsafe fn execve(path: &CStr, argv: *const *const c_char, envp: *const *const c_char) -> Errno {
    unsafe { crate::syscall::execve(path, argv, envp) }
}

/// Terminate the whole process immediately, without running destructors or atexit handlers
#[inline]
pub fn exit(status: c_int) -> ! {
    unsafe { crate::syscall::exit_group(status) }
}

/// Block until the child `pid` changes state, returning the raw wait status
#[inline]
pub fn waitpid(pid: pid_t) -> Result<c_int, Errno> {
    // SAFETY: wait4 only writes to the status slot it owns
    unsafe { crate::syscall::wait4(pid).map(|(_, status)| status) }
}

#[inline]
pub fn chdir(path: &CStr) -> Result<(), Errno> {
    unsafe { crate::syscall::chdir(path) }
}
