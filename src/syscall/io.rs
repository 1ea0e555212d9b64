use crate::err::*;
use crate::types::c_int;
use syscalls::{Sysno, syscall};

// `man 2 read`:
//
// SYNOPSIS
//        ssize_t read(int fd, void *buf, size_t count);
//
// RETURN VALUE
//        On success, the number of bytes read is returned (zero indicates end of file).  On
//        error, -1 is returned, and errno is set to indicate the error.
pub unsafe fn read(fd: c_int, buf: &mut [u8]) -> Result<usize, Errno> {
    syscall!(Sysno::read, fd, buf.as_mut_ptr(), buf.len())
}

// `man 2 write`:
//
// SYNOPSIS
//        ssize_t write(int fd, const void buf[.count], size_t count);
//
// NOTES
//        Writes of up to PIPE_BUF bytes to a pipe are atomic.
pub unsafe fn write(fd: c_int, buf: &[u8]) -> Result<usize, Errno> {
    syscall!(Sysno::write, fd, buf.as_ptr(), buf.len())
}

// `man 2 close`:
//
// SYNOPSIS
//        int close(int fd);
//
// NOTES
//        Retrying close() after EINTR is wrong on Linux: the descriptor is already released.
pub unsafe fn close(fd: c_int) -> Result<(), Errno> {
    syscall!(Sysno::close, fd).map(|_| ())
}
