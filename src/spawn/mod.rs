//! One spawn-wait cycle through vfork
//!
//! ```text
//! spawner thread                          child (parent's memory, until execve)
//! ──────────────                          ─────────────────────────────────────
//! pipe2(O_CLOEXEC) for the failure report
//! block all signals, keep old mask
//! vfork ───────────────────────────────► reset custom handlers to SIG_DFL
//!   (suspended)                           restore old mask
//!                                         chdir (optional)
//!                                         execve ──► target program
//!                                           └─ on any failure: write report, _exit(1|2|3)
//! restore old mask ◄──────────────────── (exec or exit resumes the parent)
//! read failure report
//! wait4(pid), decode status
//! ```

mod child;
mod credentials;
#[cfg(test)]
mod fake;
mod mask;
mod ops;
mod report;
mod request;
mod spawner;
mod status;

pub use child::{prepare_and_exec, reset_dispositions};
pub use credentials::*;
pub use mask::*;
pub use ops::*;
pub use report::*;
pub use request::*;
pub use spawner::*;
pub use status::*;
