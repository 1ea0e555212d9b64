use crate::types::{CStr, c_int};

// Linux standard pipe size
// Writes <= to this are guaranteed to be atomic
pub const PIPE_BUF: usize = 4096;

/// One past the highest signal number the kernel accepts.
///
/// Valid signals are `1..NSIG`.  Both x86_64 and aarch64 use the generic 64-signal layout.
pub const NSIG: c_int = 65;

// Reserved exit codes for a child that terminates before it replaces its image.
//
// These are only meaningful together with the failure report the child writes to the report
// pipe; a target program is free to exit with the same values.

/// The child could not enumerate its signal dispositions (or finish another setup step)
pub const EXIT_SETUP_FAILED: c_int = 1;
/// The child could not reset a signal disposition that the kernel allows to be reset
pub const EXIT_RESET_FAILED: c_int = 2;
/// execve() returned
pub const EXIT_EXEC_FAILED: c_int = 3;

/// Failure report layout: stage (u32 LE) followed by errno (i32 LE)
pub const REPORT_SIZE: usize = 8;
const _: () = assert!(REPORT_SIZE <= PIPE_BUF);

/// Program run when none is given on the command line
pub const DEFAULT_PROGRAM: &CStr = c"/bin/ls";

/// Name given to the spawner thread
pub const SPAWNER_THREAD_NAME: &str = "vspawn-spawner";

/// How long a waiter on the credential lock sleeps between attempts
pub const CREDENTIAL_LOCK_BACKOFF_NANOS: i64 = 1_000_000;
