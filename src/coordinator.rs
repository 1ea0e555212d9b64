//! Spawner thread start/join
//!
//! The request travels into the spawner thread by value and the outcome comes back through
//! `JoinHandle::join`; nothing is shared through globals except the advisory `SPAWN_LOCK`.

use crate::constants::SPAWNER_THREAD_NAME;
use crate::err::*;
use crate::os::eprint;
use crate::spawn::{ExitStatus, LinuxOs, SPAWN_LOCK, SpawnMode, SpawnRequest, spawn_and_wait_in};
use crate::types::*;
use std::ffi::CString;
use std::thread::{self, JoinHandle};

/// Owned program, arguments, environment, and working directory
///
/// `Send`, unlike `SpawnRequest`: the pointer arrays are only built on the spawner thread.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecArgs {
    path: CString,
    argv: Vec<CString>,
    envp: Vec<CString>,
    cwd: Option<CString>,
}

impl ExecArgs {
    /// `argv[0]` is the path itself, the environment starts empty
    ///
    /// EINVAL if `path` contains a NUL byte.
    pub fn new(path: impl Into<Vec<u8>>) -> Result<Self, Errno> {
        let path = to_cstring(path)?;
        Ok(Self {
            argv: vec![path.clone()],
            path,
            envp: Vec::new(),
            cwd: None,
        })
    }

    pub fn push_arg(&mut self, arg: impl Into<Vec<u8>>) -> Result<(), Errno> {
        self.argv.push(to_cstring(arg)?);
        Ok(())
    }

    /// `entry` is a `KEY=VALUE` pair
    pub fn push_env(&mut self, entry: impl Into<Vec<u8>>) -> Result<(), Errno> {
        self.envp.push(to_cstring(entry)?);
        Ok(())
    }

    pub fn set_cwd(&mut self, cwd: impl Into<Vec<u8>>) -> Result<(), Errno> {
        self.cwd = Some(to_cstring(cwd)?);
        Ok(())
    }

    pub fn path(&self) -> &CStr {
        &self.path
    }

    pub fn args(&self) -> impl Iterator<Item = &CStr> {
        self.argv.iter().map(CString::as_c_str)
    }

    pub fn env(&self) -> impl Iterator<Item = &CStr> {
        self.envp.iter().map(CString::as_c_str)
    }

    pub fn cwd(&self) -> Option<&CStr> {
        self.cwd.as_deref()
    }

    /// Build the null-terminated pointer arrays and hand the borrowed request to `f`
    pub fn with_request<R>(&self, f: impl FnOnce(&SpawnRequest<'_>) -> R) -> Result<R, Errno> {
        let argv = null_terminated(&self.argv);
        let envp = null_terminated(&self.envp);

        // SAFETY: every pointer comes from a CString owned by `self`, which outlives the request
        let mut request = unsafe { SpawnRequest::new(&self.path, &argv, &envp)? };
        if let Some(cwd) = &self.cwd {
            request = request.with_cwd(cwd);
        }

        Ok(f(&request))
    }
}

fn to_cstring(bytes: impl Into<Vec<u8>>) -> Result<CString, Errno> {
    CString::new(bytes).map_err(|_| Errno::EINVAL)
}

fn null_terminated(strings: &[CString]) -> Vec<*const c_char> {
    strings
        .iter()
        .map(|s| s.as_ptr())
        .chain(core::iter::once(core::ptr::null()))
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoordinatorError {
    /// The spawner thread could not be created
    ActivityStartFailed(Errno),
    /// The spawner thread panicked
    ActivityJoinFailed,
}

impl ErrorDetail for CoordinatorError {
    fn eprint_detail(&self) {
        match self {
            CoordinatorError::ActivityStartFailed(e) => {
                eprint(": unable to start spawner thread");
                e.eprint_detail();
            }
            CoordinatorError::ActivityJoinFailed => eprint(": spawner thread panicked"),
        }
    }
}

/// Handle to a running spawner thread
pub struct Coordinator {
    handle: JoinHandle<Result<ExitStatus, SpawnError>>,
}

impl Coordinator {
    /// Start the spawner thread, which runs one spawn-wait cycle for `args`
    pub fn start(args: ExecArgs, mode: SpawnMode) -> Result<Self, CoordinatorError> {
        Self::start_with(move || run_spawner(&args, mode))
    }

    fn start_with(
        spawner: impl FnOnce() -> Result<ExitStatus, SpawnError> + Send + 'static,
    ) -> Result<Self, CoordinatorError> {
        let handle = thread::Builder::new()
            .name(SPAWNER_THREAD_NAME.into())
            .spawn(spawner)
            .map_err(start_error)?;

        Ok(Self { handle })
    }

    /// Wait for the spawner thread and take the outcome of its cycle
    ///
    /// `ActivityJoinFailed` needs the spawner to unwind.  Under `panic = "abort"` (the dev and
    /// release profiles) a panicking spawner takes the process down instead, so the binary never
    /// sees it.
    pub fn join(self) -> Result<Result<ExitStatus, SpawnError>, CoordinatorError> {
        self.handle
            .join()
            .map_err(|_| CoordinatorError::ActivityJoinFailed)
    }

    /// Start a spawner, run `work` on this thread meanwhile, then join
    pub fn run_concurrently<T>(
        args: ExecArgs,
        mode: SpawnMode,
        work: impl FnOnce() -> T,
    ) -> Result<(T, Result<ExitStatus, SpawnError>), CoordinatorError> {
        let coordinator = Self::start(args, mode)?;
        let output = work();
        let outcome = coordinator.join()?;
        Ok((output, outcome))
    }
}

fn start_error(e: std::io::Error) -> CoordinatorError {
    CoordinatorError::ActivityStartFailed(e.raw_os_error().map_or(Errno::EAGAIN, Errno::new))
}

fn run_spawner(args: &ExecArgs, mode: SpawnMode) -> Result<ExitStatus, SpawnError> {
    let _permit = SPAWN_LOCK.spawn_permit();
    args.with_request(|request| spawn_and_wait_in(&LinuxOs, request, mode))
        .map_err(SpawnError::SpawnFailed)?
}
