use crate::os::{Fd, Print, wexitstatus, wifexited, wifsignaled, wtermsig};
use crate::types::{Signal, c_int};

/// How a reaped child terminated
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Normal exit with this code
    Exited(u8),
    /// Killed by this signal number
    Signaled(c_int),
}

impl ExitStatus {
    /// Decode a raw wait status
    ///
    /// Returns None for stop/continue notifications, which are not terminations.
    pub const fn from_raw(status: c_int) -> Option<Self> {
        if wifexited(status) {
            Some(ExitStatus::Exited(wexitstatus(status) as u8))
        } else if wifsignaled(status) {
            Some(ExitStatus::Signaled(wtermsig(status)))
        } else {
            None
        }
    }

    pub const fn code(self) -> Option<u8> {
        match self {
            ExitStatus::Exited(code) => Some(code),
            ExitStatus::Signaled(_) => None,
        }
    }

    pub const fn signal(self) -> Option<c_int> {
        match self {
            ExitStatus::Exited(_) => None,
            ExitStatus::Signaled(signo) => Some(signo),
        }
    }

    pub const fn success(self) -> bool {
        matches!(self, ExitStatus::Exited(0))
    }

    /// Shell convention: the exit code, or 128 + signal number
    pub const fn as_shell_code(self) -> c_int {
        match self {
            ExitStatus::Exited(code) => code as c_int,
            ExitStatus::Signaled(signo) => 128 + signo,
        }
    }
}

impl Print for ExitStatus {
    fn print(&self, fd: Fd) {
        match *self {
            ExitStatus::Exited(code) => {
                "Exited, status=".print(fd.clone());
                code.print(fd);
            }
            ExitStatus::Signaled(signo) => {
                "Killed by signal ".print(fd.clone());
                signo.print(fd.clone());
                if let Some(signal) = Signal::from_raw(signo) {
                    " (".print(fd.clone());
                    signal.name().print(fd.clone());
                    ")".print(fd);
                }
            }
        }
    }
}
