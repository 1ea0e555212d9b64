//! Safe(r) wrappers over `crate::syscall`
//!
//! Wrappers that cannot violate memory safety on their own are plain `fn`s.  The fork family
//! stays `unsafe`: what the child may do afterwards is the caller's contract.

mod credentials;
mod fd;
mod print;
mod process;
mod signal;
mod sleep;

pub use credentials::*;
pub use fd::*;
pub use print::*;
pub use process::*;
pub use signal::*;
pub use sleep::*;
