use crate::constants::*;
use crate::err::*;
use crate::types::c_int;

/// Step of the child's setup at which it gave up
///
/// Values are the wire encoding of the failure report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum ChildStage {
    QueryDisposition = 1,
    ResetDisposition = 2,
    RestoreMask = 3,
    Prepare = 4,
    Replace = 5,
}

impl ChildStage {
    /// Reserved exit code the child terminates with at this stage
    pub const fn exit_code(self) -> c_int {
        match self {
            ChildStage::QueryDisposition | ChildStage::RestoreMask | ChildStage::Prepare => {
                EXIT_SETUP_FAILED
            }
            ChildStage::ResetDisposition => EXIT_RESET_FAILED,
            ChildStage::Replace => EXIT_EXEC_FAILED,
        }
    }

    /// What the child was trying to do, for error messages
    pub const fn action(self) -> &'static str {
        match self {
            ChildStage::QueryDisposition => "query a signal disposition",
            ChildStage::ResetDisposition => "reset a signal handler",
            ChildStage::RestoreMask => "restore the signal mask",
            ChildStage::Prepare => "change directory",
            ChildStage::Replace => "execute the program",
        }
    }

    pub const fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            1 => Some(ChildStage::QueryDisposition),
            2 => Some(ChildStage::ResetDisposition),
            3 => Some(ChildStage::RestoreMask),
            4 => Some(ChildStage::Prepare),
            5 => Some(ChildStage::Replace),
            _ => None,
        }
    }

    pub const fn as_raw(self) -> u32 {
        self as u32
    }
}

/// Failure report a child writes to the report pipe before its reserved exit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChildFailure {
    pub stage: ChildStage,
    pub errno: Errno,
}

impl ChildFailure {
    pub const fn new(stage: ChildStage, errno: Errno) -> Self {
        Self { stage, errno }
    }

    pub const fn exit_code(&self) -> c_int {
        self.stage.exit_code()
    }

    /// `[stage: u32 LE][errno: i32 LE]`
    pub fn encode(&self) -> [u8; REPORT_SIZE] {
        let [s0, s1, s2, s3] = self.stage.as_raw().to_le_bytes();
        let [e0, e1, e2, e3] = self.errno.into_raw().to_le_bytes();
        [s0, s1, s2, s3, e0, e1, e2, e3]
    }

    /// None for an unknown stage or a non-positive errno
    pub fn decode(report: &[u8; REPORT_SIZE]) -> Option<Self> {
        let [s0, s1, s2, s3, e0, e1, e2, e3] = *report;
        let stage = ChildStage::from_raw(u32::from_le_bytes([s0, s1, s2, s3]))?;
        let errno = i32::from_le_bytes([e0, e1, e2, e3]);
        if errno <= 0 {
            return None;
        }
        Some(Self::new(stage, Errno::new(errno)))
    }
}
