use crate::err::*;
use crate::spawn::SpawnOs;
use crate::types::sigset_t;

/// All-signals-blocked window around the spawn
///
/// Restores the mask that was in effect before `block_all` when dropped or on `restore`.  It
/// lives in the spawner's frame; the vfork child shares that frame but never drops it, because
/// the child continuation ends in execve() or exit.
pub struct MaskGuard<'a, O: SpawnOs> {
    os: &'a O,
    old_mask: sigset_t,
    restored: bool,
}

impl<'a, O: SpawnOs> MaskGuard<'a, O> {
    pub fn block_all(os: &'a O) -> Result<Self, Errno> {
        let old_mask = os.block_all_signals()?;
        Ok(Self {
            os,
            old_mask,
            restored: false,
        })
    }

    /// The mask to hand back to the thread (and to the child before it execs)
    pub fn old_mask(&self) -> sigset_t {
        self.old_mask
    }

    /// Restore now and report the outcome; dropping afterwards does nothing
    pub fn restore(mut self) -> Result<(), Errno> {
        self.restored = true;
        self.os.set_signal_mask(&self.old_mask)
    }
}

impl<O: SpawnOs> Drop for MaskGuard<'_, O> {
    fn drop(&mut self) {
        if !self.restored {
            let _ = self.os.set_signal_mask(&self.old_mask);
        }
    }
}
