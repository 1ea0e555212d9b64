//! Operating system seam of the spawn protocol
//!
//! The spawner and the child continuation talk to the kernel only through `SpawnOs`, so both
//! protocols can be driven by a scripted fake in tests.  `LinuxOs` is the real thing.

use crate::constants::REPORT_SIZE;
use crate::err::*;
use crate::os::{self, Disposition, Fd, ForkResult, PipeFlags};
use crate::spawn::SpawnRequest;
use crate::types::*;

/// Which primitive creates the child
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpawnMode {
    /// Share the address space and suspend only the calling thread until exec or exit
    #[default]
    Vfork,
    /// Copy the address space; for kernels without the vfork guarantee
    Fork,
}

impl SpawnMode {
    pub const fn name(self) -> &'static str {
        match self {
            SpawnMode::Vfork => "vfork",
            SpawnMode::Fork => "fork",
        }
    }
}

pub trait SpawnOs {
    /// Close-on-exec pipe for the failure report, as (read end, write end)
    fn new_report_pipe(&self) -> Result<(Fd, Fd), Errno>;

    /// Block every signal, returning the previous mask
    fn block_all_signals(&self) -> Result<sigset_t, Errno>;

    fn set_signal_mask(&self, mask: &sigset_t) -> Result<(), Errno>;

    /// Create the child
    ///
    /// # Safety
    ///
    /// With `SpawnMode::Vfork` the child runs in the caller's frame: it must not return from the
    /// calling function and must end in execve() or exit.  Implementations must be inlined into
    /// the caller for the same reason.
    unsafe fn spawn(&self, mode: SpawnMode) -> Result<ForkResult, Errno>;

    fn query_disposition(&self, signo: c_int) -> Result<Disposition, Errno>;

    fn reset_disposition(&self, signo: c_int) -> Result<(), Errno>;

    fn chdir(&self, path: &CStr) -> Result<(), Errno>;

    /// Replace the process image; only returns on failure
    fn execve(&self, request: &SpawnRequest<'_>) -> Errno;

    /// Single write of a whole report
    fn write_report(&self, fd: &Fd, report: &[u8; REPORT_SIZE]) -> Result<(), Errno>;

    fn read(&self, fd: &Fd, buf: &mut [u8]) -> Result<usize, Errno>;

    fn close(&self, fd: Fd) -> Result<(), Errno>;

    /// Raw wait status of `pid`
    fn waitpid(&self, pid: pid_t) -> Result<c_int, Errno>;

    fn exit(&self, code: c_int) -> !;
}

/// Direct Linux system calls
#[derive(Clone, Copy, Debug, Default)]
pub struct LinuxOs;

impl SpawnOs for LinuxOs {
    #[inline]
    fn new_report_pipe(&self) -> Result<(Fd, Fd), Errno> {
        Fd::new_pipe(PipeFlags::O_CLOEXEC)
    }

    #[inline]
    fn block_all_signals(&self) -> Result<sigset_t, Errno> {
        os::block_all_signals()
    }

    #[inline]
    fn set_signal_mask(&self, mask: &sigset_t) -> Result<(), Errno> {
        os::set_signal_mask(mask)
    }

    #[inline(always)]
    unsafe fn spawn(&self, mode: SpawnMode) -> Result<ForkResult, Errno> {
        match mode {
            SpawnMode::Vfork => unsafe { os::vfork() },
            SpawnMode::Fork => unsafe { os::fork() },
        }
    }

    #[inline]
    fn query_disposition(&self, signo: c_int) -> Result<Disposition, Errno> {
        os::query_disposition(signo)
    }

    #[inline]
    fn reset_disposition(&self, signo: c_int) -> Result<(), Errno> {
        os::reset_disposition(signo)
    }

    #[inline]
    fn chdir(&self, path: &CStr) -> Result<(), Errno> {
        os::chdir(path)
    }

    #[inline]
    fn execve(&self, request: &SpawnRequest<'_>) -> Errno {
        // SAFETY: SpawnRequest::new checked both arrays are null-terminated
        unsafe { os::execve(request.path(), request.argv_ptr(), request.envp_ptr()) }
    }

    #[inline]
    fn write_report(&self, fd: &Fd, report: &[u8; REPORT_SIZE]) -> Result<(), Errno> {
        match fd.write(report)? {
            REPORT_SIZE => Ok(()),
            _ => Err(Errno::EIO),
        }
    }

    #[inline]
    fn read(&self, fd: &Fd, buf: &mut [u8]) -> Result<usize, Errno> {
        fd.read(buf)
    }

    #[inline]
    fn close(&self, fd: Fd) -> Result<(), Errno> {
        fd.close()
    }

    #[inline]
    fn waitpid(&self, pid: pid_t) -> Result<c_int, Errno> {
        os::waitpid(pid)
    }

    #[inline]
    fn exit(&self, code: c_int) -> ! {
        os::exit(code)
    }
}
