use crate::err::*;
use crate::types::{gid_t, uid_t};
use syscalls::{Sysno, syscall};

// Credentials are per-thread at the system call level.  glibc's set*id() wrappers broadcast the
// change to every thread; these raw calls only change the calling thread.

// `man 2 setuid`:
//
// SYNOPSIS
//        int setuid(uid_t uid);
pub unsafe fn setuid(uid: uid_t) -> Result<(), Errno> {
    syscall!(Sysno::setuid, uid).map(|_| ())
}

// `man 2 setgid`:
//
// SYNOPSIS
//        int setgid(gid_t gid);
pub unsafe fn setgid(gid: gid_t) -> Result<(), Errno> {
    syscall!(Sysno::setgid, gid).map(|_| ())
}

// `man 2 setresuid`:
//
// SYNOPSIS
//        int setresuid(uid_t ruid, uid_t euid, uid_t suid);
pub unsafe fn setresuid(ruid: uid_t, euid: uid_t, suid: uid_t) -> Result<(), Errno> {
    syscall!(Sysno::setresuid, ruid, euid, suid).map(|_| ())
}

// `man 2 setresgid`:
//
// SYNOPSIS
//        int setresgid(gid_t rgid, gid_t egid, gid_t sgid);
pub unsafe fn setresgid(rgid: gid_t, egid: gid_t, sgid: gid_t) -> Result<(), Errno> {
    syscall!(Sysno::setresgid, rgid, egid, sgid).map(|_| ())
}

// `man 2 getuid`:
//
// SYNOPSIS
//        uid_t getuid(void);
//
// ERRORS
//        These functions are always successful.
pub unsafe fn getuid() -> uid_t {
    unsafe { syscall!(Sysno::getuid).unwrap_unchecked() as uid_t }
}

// `man 2 getgid`:
//
// SYNOPSIS
//        gid_t getgid(void);
//
// ERRORS
//        These functions are always successful.
pub unsafe fn getgid() -> gid_t {
    unsafe { syscall!(Sysno::getgid).unwrap_unchecked() as gid_t }
}
