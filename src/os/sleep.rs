use crate::err::*;
use crate::syscall::nanosleep;
use crate::types::*;

/// Sleep for the provided number of nanoseconds (less than one second).
pub fn sleep_nanos(nanos: i64) -> Result<(), Errno> {
    if !(0..1_000_000_000).contains(&nanos) {
        return Err(Errno::EINVAL);
    }

    let request = timespec {
        tv_sec: 0,
        tv_nsec: nanos,
    };

    unsafe { nanosleep(&request) }
}
