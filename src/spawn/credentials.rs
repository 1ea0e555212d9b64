//! Advisory lock between spawn-wait cycles and credential changes
//!
//! While a vfork child shares the parent's memory, no sibling thread may change the process
//! credentials.  `SPAWN_LOCK` is a reader/writer lock over that window: spawners hold a shared
//! `SpawnPermit` for the whole cycle, the `crate::os` set*id wrappers take an exclusive
//! `CredentialPermit`.  Waiters sleep briefly between attempts.

use crate::constants::CREDENTIAL_LOCK_BACKOFF_NANOS;
use crate::os::sleep_nanos;
use core::sync::atomic::{AtomicUsize, Ordering};

const EXCLUSIVE: usize = 1 << (usize::BITS - 1);

pub static SPAWN_LOCK: AdvisoryLock = AdvisoryLock::new();

pub struct AdvisoryLock {
    // High bit: credential change in progress.  Remaining bits: spawns in flight.
    state: AtomicUsize,
}

impl AdvisoryLock {
    pub const fn new() -> Self {
        Self {
            state: AtomicUsize::new(0),
        }
    }

    pub fn try_spawn_permit(&self) -> Option<SpawnPermit<'_>> {
        let mut current = self.state.load(Ordering::Relaxed);
        loop {
            if current & EXCLUSIVE != 0 {
                return None;
            }
            match self.state.compare_exchange_weak(
                current,
                current + 1,
                Ordering::Acquire,
                Ordering::Relaxed,
            ) {
                Ok(_) => return Some(SpawnPermit { lock: self }),
                Err(actual) => current = actual,
            }
        }
    }

    /// Wait until no credential change is in progress
    pub fn spawn_permit(&self) -> SpawnPermit<'_> {
        loop {
            if let Some(permit) = self.try_spawn_permit() {
                return permit;
            }
            backoff();
        }
    }

    pub fn try_credential_permit(&self) -> Option<CredentialPermit<'_>> {
        self.state
            .compare_exchange(0, EXCLUSIVE, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| CredentialPermit { lock: self })
    }

    /// Wait until no spawn-wait cycle holds a permit
    pub fn credential_permit(&self) -> CredentialPermit<'_> {
        loop {
            if let Some(permit) = self.try_credential_permit() {
                return permit;
            }
            backoff();
        }
    }

    pub fn spawns_in_flight(&self) -> usize {
        self.state.load(Ordering::Relaxed) & !EXCLUSIVE
    }

    pub fn is_credential_change_in_progress(&self) -> bool {
        self.state.load(Ordering::Relaxed) & EXCLUSIVE != 0
    }
}

impl Default for AdvisoryLock {
    fn default() -> Self {
        Self::new()
    }
}

fn backoff() {
    // Only fails for an out-of-range duration, which the constant is not
    let _ = sleep_nanos(CREDENTIAL_LOCK_BACKOFF_NANOS);
}

/// Shared side, held for one spawn-wait cycle
#[must_use]
pub struct SpawnPermit<'a> {
    lock: &'a AdvisoryLock,
}

impl Drop for SpawnPermit<'_> {
    fn drop(&mut self) {
        self.lock.state.fetch_sub(1, Ordering::Release);
    }
}

/// Exclusive side, held across one credential change
#[must_use]
pub struct CredentialPermit<'a> {
    lock: &'a AdvisoryLock,
}

impl Drop for CredentialPermit<'_> {
    fn drop(&mut self) {
        self.lock.state.fetch_and(!EXCLUSIVE, Ordering::Release);
    }
}
