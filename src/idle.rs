//! Bounded cache of idle resources

use crossbeam::queue::ArrayQueue;

/// Lock-free bounded queue of idle resources.
///
/// `ArrayQueue` cannot have zero capacity, so a pool that caches nothing
/// carries no queue at all.
pub(crate) struct IdleCache<R> {
    queue: Option<ArrayQueue<R>>,
}

impl<R> IdleCache<R> {
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: (capacity > 0).then(|| ArrayQueue::new(capacity)),
        }
    }

    /// Cache a resource, handing it back if the cache is full
    pub fn try_push(&self, resource: R) -> Result<(), R> {
        match &self.queue {
            Some(queue) => queue.push(resource),
            None => Err(resource),
        }
    }

    pub fn try_pop(&self) -> Option<R> {
        self.queue.as_ref().and_then(ArrayQueue::pop)
    }

    pub fn len(&self) -> usize {
        self.queue.as_ref().map_or(0, ArrayQueue::len)
    }

    pub fn capacity(&self) -> usize {
        self.queue.as_ref().map_or(0, ArrayQueue::capacity)
    }

    /// Pop every cached resource, passing each to `discard`
    pub fn drain(&self, mut discard: impl FnMut(R)) -> usize {
        let mut drained = 0;
        while let Some(resource) = self.try_pop() {
            discard(resource);
            drained += 1;
        }
        drained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_rejects_everything() {
        let cache = IdleCache::new(0);
        assert_eq!(cache.try_push(1), Err(1));
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.capacity(), 0);
        assert!(cache.try_pop().is_none());
    }

    #[test]
    fn test_push_until_full() {
        let cache = IdleCache::new(2);
        assert!(cache.try_push(1).is_ok());
        assert!(cache.try_push(2).is_ok());
        assert_eq!(cache.try_push(3), Err(3));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_drain_empties_cache() {
        let cache = IdleCache::new(3);
        for i in 0..3 {
            cache.try_push(i).unwrap();
        }

        let mut seen = Vec::new();
        assert_eq!(cache.drain(|r| seen.push(r)), 3);
        assert_eq!(seen, vec![0, 1, 2]);
        assert_eq!(cache.len(), 0);
    }
}
