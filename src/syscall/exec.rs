use crate::err::*;
use core::ffi::{CStr, c_char};
use syscalls::{Sysno, syscall};

// `man 2 execve`:
//
// SYNOPSIS
//       int execve(const char *pathname, char *const _Nullable argv[],
//                  char *const _Nullable envp[]);
//
// RETURN VALUE
//        On success, execve() does not return, on error -1 is returned, and errno is set to indicate the error.
//
// Only ever returns the failure.
pub unsafe fn execve(pathname: &CStr, argv: *const *const c_char, envp: *const *const c_char) -> Errno {
    match syscall!(
        Sysno::execve,
        pathname.as_ptr() as usize,
        argv as usize,
        envp as usize
    ) {
        Err(errno) => errno,
        // The kernel never returns success from execve in the calling image.
        Ok(_) => Errno::EINVAL,
    }
}
