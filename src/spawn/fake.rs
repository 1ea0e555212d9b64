//! Scripted `SpawnOs` for protocol tests
//!
//! Records every call in order and answers from a script.  `exit` unwinds with an `Exited`
//! payload instead of terminating, so a child continuation can be run on the test thread.

use crate::constants::REPORT_SIZE;
use crate::err::*;
use crate::os::{Disposition, Fd, ForkResult};
use crate::spawn::{SpawnMode, SpawnOs, SpawnRequest};
use crate::types::*;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::panic::{AssertUnwindSafe, catch_unwind, panic_any};

pub const REPORT_READ_FD: c_int = 100;
pub const REPORT_WRITE_FD: c_int = 101;
pub const CHILD_PID: pid_t = 4242;
pub const HANDLER: usize = 0x1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Call {
    NewPipe,
    BlockAll,
    SetMask(sigset_t),
    Spawn(SpawnMode),
    Query(c_int),
    Reset(c_int),
    Chdir,
    Exec,
    WriteReport([u8; REPORT_SIZE]),
    Read,
    Close(c_int),
    Wait(pid_t),
    Exit(c_int),
}

/// Unwind payload of `FakeOs::exit`
#[derive(Debug)]
pub struct Exited(pub c_int);

pub struct FakeOs {
    calls: RefCell<Vec<Call>>,
    mask: Cell<sigset_t>,
    pipe_error: Cell<Option<Errno>>,
    block_error: Cell<Option<Errno>>,
    set_mask_error: Cell<Option<Errno>>,
    spawn_result: Cell<Result<ForkResult, Errno>>,
    dispositions: RefCell<HashMap<c_int, Disposition>>,
    query_errors: RefCell<HashMap<c_int, Errno>>,
    reset_errors: RefCell<HashMap<c_int, Errno>>,
    chdir_error: Cell<Option<Errno>>,
    exec_error: Cell<Errno>,
    reads: RefCell<VecDeque<Result<Vec<u8>, Errno>>>,
    waits: RefCell<VecDeque<Result<c_int, Errno>>>,
}

impl FakeOs {
    /// SIGUSR1 blocked, every disposition SIG_DFL, spawn yields `CHILD_PID`, execve fails with
    /// ENOENT, no report, no wait results
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            mask: Cell::new(sigset_t::new_empty_set() | Signal::SIGUSR1),
            pipe_error: Cell::new(None),
            block_error: Cell::new(None),
            set_mask_error: Cell::new(None),
            spawn_result: Cell::new(Ok(ForkResult::Parent(CHILD_PID))),
            dispositions: RefCell::new(HashMap::new()),
            query_errors: RefCell::new(HashMap::new()),
            reset_errors: RefCell::new(HashMap::new()),
            chdir_error: Cell::new(None),
            exec_error: Cell::new(Errno::ENOENT),
            reads: RefCell::new(VecDeque::new()),
            waits: RefCell::new(VecDeque::new()),
        }
    }

    pub fn report_write_end() -> Fd {
        Fd::from_raw(REPORT_WRITE_FD)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn mask(&self) -> sigset_t {
        self.mask.get()
    }

    pub fn disposition(&self, signo: c_int) -> Disposition {
        self.dispositions
            .borrow()
            .get(&signo)
            .copied()
            .unwrap_or(Disposition::Default)
    }

    pub fn set_disposition(&self, signo: c_int, disposition: Disposition) {
        self.dispositions.borrow_mut().insert(signo, disposition);
    }

    pub fn fail_pipe(&self, e: Errno) {
        self.pipe_error.set(Some(e));
    }

    pub fn fail_block_all(&self, e: Errno) {
        self.block_error.set(Some(e));
    }

    pub fn fail_set_mask(&self, e: Errno) {
        self.set_mask_error.set(Some(e));
    }

    pub fn spawn_returns(&self, result: Result<ForkResult, Errno>) {
        self.spawn_result.set(result);
    }

    pub fn fail_query(&self, signo: c_int, e: Errno) {
        self.query_errors.borrow_mut().insert(signo, e);
    }

    pub fn fail_reset(&self, signo: c_int, e: Errno) {
        self.reset_errors.borrow_mut().insert(signo, e);
    }

    pub fn fail_chdir(&self, e: Errno) {
        self.chdir_error.set(Some(e));
    }

    pub fn exec_fails_with(&self, e: Errno) {
        self.exec_error.set(e);
    }

    /// Queue the result of the next read of the report pipe; an empty queue reads end of file
    pub fn push_read(&self, result: Result<&[u8], Errno>) {
        self.reads.borrow_mut().push_back(result.map(<[u8]>::to_vec));
    }

    /// Queue the result of the next waitpid; an empty queue fails with ECHILD
    pub fn push_wait(&self, result: Result<c_int, Errno>) {
        self.waits.borrow_mut().push_back(result);
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl SpawnOs for FakeOs {
    fn new_report_pipe(&self) -> Result<(Fd, Fd), Errno> {
        self.record(Call::NewPipe);
        match self.pipe_error.get() {
            Some(e) => Err(e),
            None => Ok((
                Fd::from_raw(REPORT_READ_FD),
                Fd::from_raw(REPORT_WRITE_FD),
            )),
        }
    }

    fn block_all_signals(&self) -> Result<sigset_t, Errno> {
        self.record(Call::BlockAll);
        if let Some(e) = self.block_error.get() {
            return Err(e);
        }
        Ok(self.mask.replace(sigset_t::new_full_set()))
    }

    fn set_signal_mask(&self, mask: &sigset_t) -> Result<(), Errno> {
        self.record(Call::SetMask(*mask));
        if let Some(e) = self.set_mask_error.get() {
            return Err(e);
        }
        self.mask.set(*mask);
        Ok(())
    }

    unsafe fn spawn(&self, mode: SpawnMode) -> Result<ForkResult, Errno> {
        self.record(Call::Spawn(mode));
        self.spawn_result.get()
    }

    fn query_disposition(&self, signo: c_int) -> Result<Disposition, Errno> {
        self.record(Call::Query(signo));
        match self.query_errors.borrow().get(&signo) {
            Some(e) => Err(*e),
            None => Ok(self.disposition(signo)),
        }
    }

    fn reset_disposition(&self, signo: c_int) -> Result<(), Errno> {
        self.record(Call::Reset(signo));
        if let Some(e) = self.reset_errors.borrow().get(&signo) {
            return Err(*e);
        }
        self.set_disposition(signo, Disposition::Default);
        Ok(())
    }

    fn chdir(&self, _path: &CStr) -> Result<(), Errno> {
        self.record(Call::Chdir);
        match self.chdir_error.get() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn execve(&self, _request: &SpawnRequest<'_>) -> Errno {
        self.record(Call::Exec);
        self.exec_error.get()
    }

    fn write_report(&self, _fd: &Fd, report: &[u8; REPORT_SIZE]) -> Result<(), Errno> {
        self.record(Call::WriteReport(*report));
        Ok(())
    }

    fn read(&self, _fd: &Fd, buf: &mut [u8]) -> Result<usize, Errno> {
        self.record(Call::Read);
        let Some(next) = self.reads.borrow_mut().pop_front() else {
            return Ok(0);
        };
        let bytes = next?;
        let n = bytes.len().min(buf.len());
        buf[..n].copy_from_slice(&bytes[..n]);
        if n < bytes.len() {
            self.reads.borrow_mut().push_front(Ok(bytes[n..].to_vec()));
        }
        Ok(n)
    }

    fn close(&self, fd: Fd) -> Result<(), Errno> {
        self.record(Call::Close(fd.into_raw()));
        Ok(())
    }

    fn waitpid(&self, pid: pid_t) -> Result<c_int, Errno> {
        self.record(Call::Wait(pid));
        self.waits
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(Errno::ECHILD))
    }

    fn exit(&self, code: c_int) -> ! {
        self.record(Call::Exit(code));
        panic_any(Exited(code))
    }
}

/// Build a `/bin/true` request with an empty environment and hand it to `f`
pub fn with_request<R>(cwd: Option<&CStr>, f: impl FnOnce(&SpawnRequest<'_>) -> R) -> R {
    let argv = [c"/bin/true".as_ptr(), core::ptr::null()];
    let envp = [core::ptr::null()];
    let mut request = unsafe { SpawnRequest::new(c"/bin/true", &argv, &envp) }.unwrap();
    if let Some(cwd) = cwd {
        request = request.with_cwd(cwd);
    }
    f(&request)
}

/// Run a child continuation and return the code it exited with
pub fn exit_code_of(f: impl FnOnce()) -> c_int {
    let payload = match catch_unwind(AssertUnwindSafe(f)) {
        Ok(()) => panic!("child continuation returned"),
        Err(payload) => payload,
    };
    match payload.downcast::<Exited>() {
        Ok(exited) => exited.0,
        Err(_) => panic!("child continuation panicked"),
    }
}
