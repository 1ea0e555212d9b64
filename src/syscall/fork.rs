use crate::err::*;
use crate::types::pid_t;
use syscalls::{Sysno, syscall};

#[cfg(target_arch = "aarch64")]
const CLONE_VM: usize = 0x0000_0100;
#[cfg(target_arch = "aarch64")]
const CLONE_VFORK: usize = 0x0000_4000;
/// Low byte of the clone flags: signal sent to the parent when the child dies
#[cfg(target_arch = "aarch64")]
const CLONE_EXIT_SIGCHLD: usize = 17;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForkResult {
    /// In parent process with child PID
    Parent(pid_t),
    /// In child process
    Child,
}

impl ForkResult {
    #[inline(always)]
    fn from_ret(ret: usize) -> Self {
        match ret as pid_t {
            0 => ForkResult::Child,
            pid => ForkResult::Parent(pid),
        }
    }
}

/// Fork the current process
///
/// Returns ForkResult::Parent(pid) in the parent process, ForkResult::Child in the child
///
/// # Safety
///
/// In a multi-threaded process only the calling thread is copied.  The child must restrict
/// itself to async-signal-safe operations until it execs or exits.
#[cfg(target_arch = "x86_64")]
pub unsafe fn fork() -> Result<ForkResult, Errno> {
    syscall!(Sysno::fork).map(ForkResult::from_ret)
}

// aarch64 has no fork or vfork system call numbers; both are clone() with the matching flags.
#[cfg(target_arch = "aarch64")]
pub unsafe fn fork() -> Result<ForkResult, Errno> {
    syscall!(Sysno::clone, CLONE_EXIT_SIGCHLD, 0, 0, 0, 0).map(ForkResult::from_ret)
}

/// Fork the current process with vfork semantics
///
/// Like fork(), but only the calling thread is suspended until the child calls exec or _exit.
/// The child shares memory with the parent until exec or _exit.
///
/// The system call is issued with inline assembly and the function is always inlined: the child
/// runs on the caller's stack, so no function frame may sit between the caller and the syscall
/// instruction.  A frame the child returns out of would be reused by the child's next call,
/// clobbering the return address the suspended parent later resumes through.
///
/// # Safety
///
/// - The child must not return from the function that called vfork
/// - The child must not modify any data other than a variable of type pid_t used to store the return value
/// - The child must call exec or _exit before doing anything else
#[cfg(target_arch = "x86_64")]
#[inline(always)]
pub unsafe fn vfork() -> Result<ForkResult, Errno> {
    let ret: usize;
    unsafe {
        core::arch::asm!(
            "syscall",
            inlateout("rax") Sysno::vfork as usize => ret,
            lateout("rcx") _,
            lateout("r11") _,
            options(nostack),
        );
    }
    fork_result(ret)
}

#[cfg(target_arch = "aarch64")]
#[inline(always)]
pub unsafe fn vfork() -> Result<ForkResult, Errno> {
    let ret: usize;
    unsafe {
        core::arch::asm!(
            "svc 0",
            in("x8") Sysno::clone as usize,
            inlateout("x0") CLONE_VM | CLONE_VFORK | CLONE_EXIT_SIGCHLD => ret,
            in("x1") 0usize,
            in("x2") 0usize,
            in("x3") 0usize,
            in("x4") 0usize,
            options(nostack),
        );
    }
    fork_result(ret)
}

/// Raw return register to result: -4095..=-1 is a negated errno
#[inline(always)]
fn fork_result(ret: usize) -> Result<ForkResult, Errno> {
    match ret as isize {
        e @ -4095..=-1 => Err(Errno::new(-e as i32)),
        _ => Ok(ForkResult::from_ret(ret)),
    }
}
