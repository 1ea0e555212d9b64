#![cfg_attr(not(any(test, feature = "std")), no_std)]

// The spawn protocol (`spawn`, `os`, `syscall`) is written against `core` only.  The child side
// of vfork runs inside the parent's memory and must not allocate or take libc locks, so nothing
// on that path may reach for `std` even when the `std` feature is enabled.
//
// `coordinator` is the only module that needs threads and owned strings.

pub mod constants;
#[cfg(any(test, feature = "std"))]
pub mod coordinator;
pub mod err;
pub mod os;
pub mod spawn;
pub mod syscall;
pub mod types;
