//! Raw Linux system calls
//!
//! One file per system call (or per tight family of them).  Each wrapper is a thin `unsafe fn`
//! over `syscalls::syscall!` that maps the raw return into `Result<_, Errno>` and nothing else.
//! Policy lives in `crate::os` and `crate::spawn`.
//!
//! Everything here must stay async-signal-safe: these functions run in a vfork child that shares
//! the parent's memory.

mod chdir;
mod credentials;
mod exec;
mod exit;
mod fork;
mod io;
mod nanosleep;
mod pipe;
mod sigaction;
mod sigprocmask;
mod wait4;

pub use chdir::*;
pub use credentials::*;
pub use exec::*;
pub use exit::*;
pub use fork::*;
pub use io::*;
pub use nanosleep::*;
pub use pipe::*;
pub use sigaction::*;
pub use sigprocmask::*;
pub use wait4::*;
