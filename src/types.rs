//! System call types that are strongly associated with specific system calls are defined in the
//! corresponding system call file.  Those shared across many are defined here.

#[allow(non_camel_case_types)]
pub type pid_t = i32;

#[allow(non_camel_case_types)]
pub type uid_t = u32;

#[allow(non_camel_case_types)]
pub type gid_t = u32;

#[allow(non_camel_case_types)]
pub type c_int = core::ffi::c_int;

#[allow(non_camel_case_types)]
pub type c_char = core::ffi::c_char;

pub type CStr = core::ffi::CStr;

#[allow(non_camel_case_types)]
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct timespec {
    pub tv_sec: i64,
    pub tv_nsec: i64,
}
const _: () = assert!(core::mem::size_of::<timespec>() == 16);

#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(i32)]
// Standard signals; x86_64 and aarch64 share the generic numbering.  Real-time signals
// (32..=64) have no names here and are handled as raw numbers.
pub enum Signal {
    SIGHUP = 1,
    SIGINT = 2,
    SIGQUIT = 3,
    SIGILL = 4,
    SIGTRAP = 5,
    SIGABRT = 6,
    SIGBUS = 7,
    SIGFPE = 8,
    SIGKILL = 9,
    SIGUSR1 = 10,
    SIGSEGV = 11,
    SIGUSR2 = 12,
    SIGPIPE = 13,
    SIGALRM = 14,
    SIGTERM = 15,
    SIGSTKFLT = 16,
    SIGCHLD = 17,
    SIGCONT = 18,
    SIGSTOP = 19,
    SIGTSTP = 20,
    SIGTTIN = 21,
    SIGTTOU = 22,
    SIGURG = 23,
    SIGXCPU = 24,
    SIGXFSZ = 25,
    SIGVTALRM = 26,
    SIGPROF = 27,
    SIGWINCH = 28,
    SIGIO = 29,
    SIGPWR = 30,
    SIGSYS = 31,
}

impl Signal {
    const ALL: [Signal; 31] = [
        Signal::SIGHUP,
        Signal::SIGINT,
        Signal::SIGQUIT,
        Signal::SIGILL,
        Signal::SIGTRAP,
        Signal::SIGABRT,
        Signal::SIGBUS,
        Signal::SIGFPE,
        Signal::SIGKILL,
        Signal::SIGUSR1,
        Signal::SIGSEGV,
        Signal::SIGUSR2,
        Signal::SIGPIPE,
        Signal::SIGALRM,
        Signal::SIGTERM,
        Signal::SIGSTKFLT,
        Signal::SIGCHLD,
        Signal::SIGCONT,
        Signal::SIGSTOP,
        Signal::SIGTSTP,
        Signal::SIGTTIN,
        Signal::SIGTTOU,
        Signal::SIGURG,
        Signal::SIGXCPU,
        Signal::SIGXFSZ,
        Signal::SIGVTALRM,
        Signal::SIGPROF,
        Signal::SIGWINCH,
        Signal::SIGIO,
        Signal::SIGPWR,
        Signal::SIGSYS,
    ];

    pub fn from_raw(signo: c_int) -> Option<Self> {
        let index = usize::try_from(signo).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    pub const fn as_raw(self) -> c_int {
        self as c_int
    }

    pub const fn name(self) -> &'static str {
        match self {
            Signal::SIGHUP => "SIGHUP",
            Signal::SIGINT => "SIGINT",
            Signal::SIGQUIT => "SIGQUIT",
            Signal::SIGILL => "SIGILL",
            Signal::SIGTRAP => "SIGTRAP",
            Signal::SIGABRT => "SIGABRT",
            Signal::SIGBUS => "SIGBUS",
            Signal::SIGFPE => "SIGFPE",
            Signal::SIGKILL => "SIGKILL",
            Signal::SIGUSR1 => "SIGUSR1",
            Signal::SIGSEGV => "SIGSEGV",
            Signal::SIGUSR2 => "SIGUSR2",
            Signal::SIGPIPE => "SIGPIPE",
            Signal::SIGALRM => "SIGALRM",
            Signal::SIGTERM => "SIGTERM",
            Signal::SIGSTKFLT => "SIGSTKFLT",
            Signal::SIGCHLD => "SIGCHLD",
            Signal::SIGCONT => "SIGCONT",
            Signal::SIGSTOP => "SIGSTOP",
            Signal::SIGTSTP => "SIGTSTP",
            Signal::SIGTTIN => "SIGTTIN",
            Signal::SIGTTOU => "SIGTTOU",
            Signal::SIGURG => "SIGURG",
            Signal::SIGXCPU => "SIGXCPU",
            Signal::SIGXFSZ => "SIGXFSZ",
            Signal::SIGVTALRM => "SIGVTALRM",
            Signal::SIGPROF => "SIGPROF",
            Signal::SIGWINCH => "SIGWINCH",
            Signal::SIGIO => "SIGIO",
            Signal::SIGPWR => "SIGPWR",
            Signal::SIGSYS => "SIGSYS",
        }
    }

    pub fn as_bitmask(self) -> u64 {
        1 << (self as u64 - 1)
    }
}

/// Kernel signal set.
///
/// The kernel's `sigset_t` is 64 bits on every architecture we build for, which is not the same
/// as glibc's 1024-bit userspace type.  rt_sigprocmask() and rt_sigaction() want
/// `sizeof(kernel sigset_t)` and return EINVAL for anything else.
#[allow(non_camel_case_types)]
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct sigset_t(u64);
const _: () = assert!(core::mem::size_of::<sigset_t>() == 8);

impl sigset_t {
    pub const fn new_empty_set() -> Self {
        Self(0)
    }

    pub const fn new_full_set() -> Self {
        Self(!0)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Add a raw signal number; numbers outside `1..=64` are ignored
    pub fn add_raw(&mut self, signo: c_int) {
        if let Some(bit) = Self::bit(signo) {
            self.0 |= bit;
        }
    }

    pub fn contains_raw(self, signo: c_int) -> bool {
        Self::bit(signo).is_some_and(|bit| self.0 & bit != 0)
    }

    pub fn contains(self, signal: Signal) -> bool {
        self.0 & signal.as_bitmask() != 0
    }

    fn bit(signo: c_int) -> Option<u64> {
        let shift = u32::try_from(signo).ok()?.checked_sub(1)?;
        1u64.checked_shl(shift)
    }
}

impl core::ops::BitOr<Signal> for sigset_t {
    type Output = Self;

    fn bitor(self, signal: Signal) -> Self::Output {
        Self(self.0 | signal.as_bitmask())
    }
}

impl core::ops::BitOrAssign<Signal> for sigset_t {
    fn bitor_assign(&mut self, signal: Signal) {
        self.0 |= signal.as_bitmask();
    }
}
