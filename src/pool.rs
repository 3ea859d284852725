//! Core pool implementation

use crate::config::PoolConfiguration;
use crate::errors::{PoolError, PoolResult};
use crate::idle::IdleCache;
use crate::resource::{Resource, close_quietly};
use crate::slots::ActiveSlots;

use parking_lot::RwLock;
use std::future::Future;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// A pooled resource that goes back to the pool when dropped
///
/// Dropping it is equivalent to [`Pool::put`]. Use [`PooledResource::detach`]
/// to keep the resource and only give back its active slot.
pub struct PooledResource<R: Resource> {
    value: Option<R>,
    pool: Pool<R>,
}

impl<R: Resource> PooledResource<R> {
    fn new(value: R, pool: Pool<R>) -> Self {
        Self {
            value: Some(value),
            pool,
        }
    }

    /// Take the resource out of the pool's management
    ///
    /// The active slot is released and the resource is not closed.
    pub fn detach(mut self) -> R {
        self.pool.release();
        self.value.take().expect("Value already taken")
    }
}

impl<R: Resource> Deref for PooledResource<R> {
    type Target = R;

    fn deref(&self) -> &Self::Target {
        self.value.as_ref().expect("Value already taken")
    }
}

impl<R: Resource> DerefMut for PooledResource<R> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.value.as_mut().expect("Value already taken")
    }
}

impl<R: Resource> Drop for PooledResource<R> {
    fn drop(&mut self) {
        if let Some(value) = self.value.take() {
            self.pool.put(value);
        }
    }
}

struct PoolState {
    closed: bool,
}

struct PoolInner<R: Resource> {
    state: RwLock<PoolState>,
    slots: ActiveSlots,
    idle: IdleCache<R>,
    factory: Arc<dyn Fn() -> R + Send + Sync>,
    operation_timeout: Option<Duration>,
}

/// Thread-safe pool bounding both checked-out and idle resources
///
/// `get`, `put` and `release` share the pool's lock and run concurrently.
/// `fill`, `clear`, `close` and `freeze` take it exclusively.
///
/// Cloning a `Pool` yields another handle to the same pool.
///
/// # Examples
///
/// ```
/// use bounded_pool::{Pool, Resource};
/// use tokio_util::sync::CancellationToken;
///
/// struct Conn(u32);
///
/// impl Resource for Conn {
///     type Error = std::convert::Infallible;
///     fn close(self) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// # tokio_test_block_on(async {
/// let pool = Pool::new(|| Conn(7), 2, 1).unwrap();
/// let conn = pool.get(&CancellationToken::new()).await.unwrap();
/// assert_eq!(conn.0, 7);
/// pool.put(conn);
/// assert_eq!(pool.idle_num(), 1);
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Runtime::new().unwrap().block_on(f)
/// # }
/// ```
pub struct Pool<R: Resource> {
    inner: Arc<PoolInner<R>>,
}

impl<R: Resource> Clone for Pool<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Resource> Pool<R> {
    /// Create a pool allowing `max_active` checked-out and `max_idle` cached resources
    ///
    /// `max_idle` is clamped to `max_active`. The pool starts empty; call
    /// [`Pool::fill`] to pre-populate it.
    pub fn new<F>(factory: F, max_active: usize, max_idle: usize) -> PoolResult<Self>
    where
        F: Fn() -> R + Send + Sync + 'static,
    {
        let config = PoolConfiguration::new()
            .with_max_active(max_active)
            .with_max_idle(max_idle);
        Self::with_config(factory, config)
    }

    /// Create a pool from a full configuration
    pub fn with_config<F>(factory: F, config: PoolConfiguration) -> PoolResult<Self>
    where
        F: Fn() -> R + Send + Sync + 'static,
    {
        config.validate()?;
        let max_idle = config.effective_max_idle();

        let pool = Self {
            inner: Arc::new(PoolInner {
                state: RwLock::new(PoolState { closed: false }),
                slots: ActiveSlots::new(config.max_active),
                idle: IdleCache::new(max_idle),
                factory: Arc::new(factory),
                operation_timeout: config.operation_timeout,
            }),
        };
        tracing::debug!(
            max_active = config.max_active,
            max_idle,
            "created resource pool"
        );

        if config.fill_on_create {
            pool.fill();
        }
        Ok(pool)
    }

    /// Populate the idle cache up to `max_idle` resources
    pub fn fill(&self) {
        let state = self.inner.state.write();
        if state.closed {
            return;
        }

        let mut created = 0;
        while self.inner.idle.len() < self.inner.idle.capacity() {
            let resource = (self.inner.factory)();
            if let Err(resource) = self.inner.idle.try_push(resource) {
                close_quietly(resource, "idle cache full during fill");
                break;
            }
            created += 1;
        }
        tracing::debug!(created, "filled idle cache");
    }

    /// Get a resource, waiting for an active slot until `cancel` fires
    ///
    /// Returns a cached resource when one is idle, otherwise builds a new one.
    /// The caller must hand it back with [`Pool::put`] or [`Pool::release`].
    ///
    /// The pool's lock is not held while waiting for a slot. If [`Pool::close`]
    /// runs during that wait, this call fails with [`PoolError::Closed`]
    /// instead of completing.
    pub async fn get(&self, cancel: &CancellationToken) -> PoolResult<R> {
        self.get_until(cancel.cancelled(), PoolError::Cancelled).await
    }

    /// Get a resource, waiting at most `timeout` for an active slot
    pub async fn get_timeout(&self, timeout: Duration) -> PoolResult<R> {
        self.get_until(tokio::time::sleep(timeout), PoolError::Timeout(timeout))
            .await
    }

    /// Get a resource using the configured operation timeout, if any
    pub async fn get_default_timeout(&self) -> PoolResult<R> {
        match self.inner.operation_timeout {
            Some(timeout) => self.get_timeout(timeout).await,
            None => {
                self.get_until(std::future::pending::<()>(), PoolError::Cancelled)
                    .await
            }
        }
    }

    /// Get a resource without waiting, failing with `Exhausted` when every slot is taken
    pub fn try_get(&self) -> PoolResult<R> {
        self.try_get_reserved()?.ok_or(PoolError::Exhausted)
    }

    /// Like [`Pool::get`], but wraps the resource so dropping it puts it back
    pub async fn get_guarded(&self, cancel: &CancellationToken) -> PoolResult<PooledResource<R>> {
        let resource = self.get(cancel).await?;
        Ok(PooledResource::new(resource, self.clone()))
    }

    async fn get_until<A>(&self, abort: A, abort_error: PoolError) -> PoolResult<R>
    where
        A: Future<Output = ()>,
    {
        if let Some(resource) = self.try_get_reserved()? {
            return Ok(resource);
        }

        // No lock is held while waiting, so a pending `close` cannot starve
        // the `put` that would free a slot.
        tokio::select! {
            biased;
            reserved = self.inner.slots.reserve() => reserved?,
            _ = abort => return Err(abort_error),
        }
        tracing::trace!("reserved active slot after waiting");

        let state = self.inner.state.read();
        if state.closed {
            self.inner.slots.release();
            return Err(PoolError::Closed);
        }
        Ok(self.take_or_create())
    }

    /// Reserve a slot without waiting and hand out a resource for it.
    /// `Ok(None)` means every slot is taken.
    fn try_get_reserved(&self) -> PoolResult<Option<R>> {
        let state = self.inner.state.read();
        if state.closed {
            return Err(PoolError::Closed);
        }
        if !self.inner.slots.try_reserve()? {
            return Ok(None);
        }
        tracing::trace!("reserved active slot");
        Ok(Some(self.take_or_create()))
    }

    fn take_or_create(&self) -> R {
        self.inner
            .idle
            .try_pop()
            .unwrap_or_else(|| (self.inner.factory)())
    }

    /// Return a resource for reuse and release its active slot
    ///
    /// When the idle cache is full, or the pool is closed, the resource is
    /// closed instead. A `put` without a matching `get` still caches or closes
    /// the resource but leaves the slot count untouched.
    pub fn put(&self, resource: R) {
        let state = self.inner.state.read();
        if state.closed {
            close_quietly(resource, "pool closed");
            return;
        }

        if let Err(resource) = self.inner.idle.try_push(resource) {
            close_quietly(resource, "idle cache full");
        }
        if self.inner.slots.release() {
            tracing::trace!("released active slot");
        }
    }

    /// Release an active slot without returning the resource
    ///
    /// The resource now belongs to the caller and is not closed.
    pub fn release(&self) {
        let state = self.inner.state.read();
        if state.closed {
            return;
        }
        if self.inner.slots.release() {
            tracing::trace!("released active slot");
        }
    }

    /// Close every idle resource. Checked-out resources are unaffected.
    pub fn clear(&self) {
        let state = self.inner.state.write();
        if state.closed {
            return;
        }
        let closed = self
            .inner
            .idle
            .drain(|resource| close_quietly(resource, "pool cleared"));
        tracing::debug!(closed, "cleared idle cache");
    }

    /// Close the pool and every idle resource in it
    ///
    /// Calls waiting for an active slot fail with [`PoolError::Closed`].
    /// Closing twice has no further effect.
    pub fn close(&self) {
        let mut state = self.inner.state.write();
        if state.closed {
            return;
        }
        state.closed = true;

        let closed = self
            .inner
            .idle
            .drain(|resource| close_quietly(resource, "pool closed"));
        self.inner.slots.close();
        tracing::debug!(closed, "closed resource pool");
    }

    /// Number of idle resources right now
    pub fn idle_num(&self) -> usize {
        self.inner.idle.len()
    }

    /// Number of active slots currently reserved
    pub fn active_num(&self) -> usize {
        self.inner.slots.outstanding()
    }

    pub fn max_active(&self) -> usize {
        self.inner.slots.max_active()
    }

    /// Idle ceiling after clamping to `max_active`
    pub fn max_idle(&self) -> usize {
        self.inner.idle.capacity()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.state.read().closed
    }

    /// Take the pool's lock exclusively, blocking every other operation
    ///
    /// The lock stays held until [`Pool::thaw`] is called. Any pool operation
    /// from the freezing thread before that deadlocks, including dropping a
    /// [`PooledResource`].
    pub fn freeze(&self) {
        std::mem::forget(self.inner.state.write());
    }

    /// Release the lock taken by [`Pool::freeze`]
    ///
    /// # Safety
    ///
    /// Must be paired with exactly one earlier call to [`Pool::freeze`] on this
    /// pool that has not already been thawed.
    pub unsafe fn thaw(&self) {
        // SAFETY: the caller guarantees the lock is held exclusively by `freeze`.
        unsafe { self.inner.state.force_unlock_write() }
    }
}
