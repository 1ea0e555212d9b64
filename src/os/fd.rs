use crate::err::*;
use crate::syscall::*;
use crate::types::*;

pub const STDOUT: Fd = Fd(1);
pub const STDERR: Fd = Fd(2);

pub use crate::syscall::PipeFlags;

/// File descriptor
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fd(c_int);

impl Fd {
    pub fn read(&self, buf: &mut [u8]) -> Result<usize, Errno> {
        unsafe { read(self.0, buf) }
    }

    pub fn write(&self, buf: &[u8]) -> Result<usize, Errno> {
        unsafe { write(self.0, buf) }
    }

    /// Write all of `buf`, retrying short writes and EINTR
    pub fn write_all(&self, mut buf: &[u8]) -> Result<(), Errno> {
        while !buf.is_empty() {
            match self.write(buf) {
                Ok(0) => return Err(Errno::EIO),
                Ok(n) => buf = buf.get(n..).ok_or(Errno::EIO)?,
                Err(Errno::EINTR) => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    pub fn close(self) -> Result<(), Errno> {
        unsafe { close(self.0) }
    }

    pub fn into_raw(self) -> c_int {
        self.0
    }

    pub fn from_raw(fd: c_int) -> Self {
        Self(fd)
    }

    pub fn as_raw(&self) -> c_int {
        self.0
    }

    /// Returns (read end, write end)
    pub fn new_pipe(flags: PipeFlags) -> Result<(Self, Self), Errno> {
        let [read_fd, write_fd] = unsafe { pipe2(flags)? };
        Ok((Self::from_raw(read_fd), Self::from_raw(write_fd)))
    }
}

// Fds are not closed on drop.  Across vfork the child holds the same `Fd` values as the parent's
// stack frame; a drop in the child must never be able to close anything on the parent's behalf,
// and the spawn protocol closes each end explicitly at a known point instead.
