//! Accounting for active (checked-out) slots

use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{Semaphore, TryAcquireError};

use crate::errors::{PoolError, PoolResult};

/// Counting semaphore of `max_active` permits plus a count of reservations
/// currently held by callers.
///
/// Reserved permits are forgotten rather than held as guards, so a slot is
/// given back only through [`ActiveSlots::release`]. Releasing more slots than
/// were reserved never creates extra permits.
pub(crate) struct ActiveSlots {
    permits: Semaphore,
    outstanding: AtomicUsize,
    max_active: usize,
}

impl ActiveSlots {
    pub fn new(max_active: usize) -> Self {
        Self {
            permits: Semaphore::new(max_active),
            outstanding: AtomicUsize::new(0),
            max_active,
        }
    }

    /// Reserve a slot without waiting. `Ok(false)` means every slot is taken.
    pub fn try_reserve(&self) -> PoolResult<bool> {
        match self.permits.try_acquire() {
            Ok(permit) => {
                permit.forget();
                self.outstanding.fetch_add(1, Ordering::AcqRel);
                Ok(true)
            }
            Err(TryAcquireError::NoPermits) => Ok(false),
            Err(TryAcquireError::Closed) => Err(PoolError::Closed),
        }
    }

    /// Wait for a slot. Dropping the future before it resolves reserves nothing.
    pub async fn reserve(&self) -> PoolResult<()> {
        let permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| PoolError::Closed)?;
        permit.forget();
        self.outstanding.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }

    /// Give back one reserved slot. Returns `false` if none was outstanding.
    pub fn release(&self) -> bool {
        let released = self
            .outstanding
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
            .is_ok();
        if released {
            self.permits.add_permits(1);
        }
        released
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Acquire)
    }

    pub fn max_active(&self) -> usize {
        self.max_active
    }

    /// Wake every waiter with `Closed` and refuse further reservations
    pub fn close(&self) {
        self.permits.close();
    }
}
