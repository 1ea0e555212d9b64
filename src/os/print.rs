//! Print framework
//!
//! Writes go straight to the fd with write(2): no buffering, no allocation, no locks.  That makes
//! these safe to call from any thread at any time, including while another thread is suspended in
//! vfork.

use crate::os::{Fd, STDERR, STDOUT};
use crate::types::{CStr, c_int};

pub fn print<T: Print>(s: T) {
    s.print(STDOUT);
}

pub fn println<T: Print>(s: T) {
    s.print(STDOUT);
    b"\n".print(STDOUT);
}

pub fn eprint<T: Print>(s: T) {
    s.print(STDERR);
}

pub fn eprintln<T: Print>(s: T) {
    s.print(STDERR);
    b"\n".print(STDERR);
}

pub trait Print {
    fn print(&self, fd: Fd);
}

impl<T: Print + ?Sized> Print for &T {
    fn print(&self, fd: Fd) {
        (**self).print(fd)
    }
}

impl Print for [u8] {
    fn print(&self, fd: Fd) {
        let _ = fd.write_all(self);
    }
}

impl<const N: usize> Print for [u8; N] {
    fn print(&self, fd: Fd) {
        let _ = fd.write_all(self);
    }
}

impl Print for str {
    fn print(&self, fd: Fd) {
        let _ = fd.write_all(self.as_bytes());
    }
}

impl Print for CStr {
    fn print(&self, fd: Fd) {
        let _ = fd.write_all(self.to_bytes());
    }
}

macro_rules! impl_print_integer {
    ($($t:ty),*) => {
        $(
            impl Print for $t {
                fn print(&self, fd: Fd) {
                    let _ = fd.write_all(itoa::Buffer::new().format(*self).as_bytes());
                }
            }
        )*
    };
}

impl_print_integer!(u8, u32, u64, usize, c_int);
