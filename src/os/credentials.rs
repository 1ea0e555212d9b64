//! Credential changes that cooperate with in-flight spawns
//!
//! A vfork child runs in the parent's address space until it execs.  If a sibling thread drops
//! (or raises) privileges during that window, the two end up sharing memory under different
//! credentials.  These wrappers take the exclusive side of `SPAWN_LOCK`, so they wait until no
//! spawn-wait cycle that holds a `SpawnPermit` is in progress.
//!
//! The lock is advisory: a direct system call (or libc's set*id) bypasses it.

use crate::err::*;
use crate::spawn::SPAWN_LOCK;
use crate::types::{gid_t, uid_t};

/// Set the user ID of the calling thread
///
/// Requires appropriate privileges (typically root) unless `uid` is the real or saved user ID.
pub fn setuid(uid: uid_t) -> Result<(), Errno> {
    let _permit = SPAWN_LOCK.credential_permit();
    unsafe { crate::syscall::setuid(uid) }
}

/// Set the group ID of the calling thread
pub fn setgid(gid: gid_t) -> Result<(), Errno> {
    let _permit = SPAWN_LOCK.credential_permit();
    unsafe { crate::syscall::setgid(gid) }
}

/// Set real, effective, and saved user IDs of the calling thread
pub fn setresuid(ruid: uid_t, euid: uid_t, suid: uid_t) -> Result<(), Errno> {
    let _permit = SPAWN_LOCK.credential_permit();
    unsafe { crate::syscall::setresuid(ruid, euid, suid) }
}

/// Set real, effective, and saved group IDs of the calling thread
pub fn setresgid(rgid: gid_t, egid: gid_t, sgid: gid_t) -> Result<(), Errno> {
    let _permit = SPAWN_LOCK.credential_permit();
    unsafe { crate::syscall::setresgid(rgid, egid, sgid) }
}

#[inline]
pub fn getuid() -> uid_t {
    unsafe { crate::syscall::getuid() }
}

#[inline]
pub fn getgid() -> gid_t {
    unsafe { crate::syscall::getgid() }
}
