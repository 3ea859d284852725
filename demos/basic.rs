//! Basic usage examples for Pool

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bounded_pool::{CancellationToken, Pool, PoolConfiguration, PoolError, Resource};

struct Connection {
    id: usize,
}

impl Resource for Connection {
    type Error = std::io::Error;

    fn close(self) -> Result<(), Self::Error> {
        println!("   closing connection {}", self.id);
        Ok(())
    }
}

fn connection_factory() -> impl Fn() -> Connection + Send + Sync + 'static {
    let next_id = Arc::new(AtomicUsize::new(0));
    move || Connection {
        id: next_id.fetch_add(1, Ordering::Relaxed),
    }
}

#[tokio::main]
async fn main() -> Result<(), PoolError> {
    println!("=== bounded_pool - Basic Examples ===\n");

    // Example 1: Fill and reuse
    fill_and_reuse().await?;

    // Example 2: Waiting for a free slot
    waiting_for_slot().await?;

    // Example 3: Guards and detaching
    guards().await?;

    // Example 4: Shutdown
    shutdown();

    Ok(())
}

async fn fill_and_reuse() -> Result<(), PoolError> {
    println!("1. Fill and Reuse:");
    let pool = Pool::new(connection_factory(), 4, 2)?;
    pool.fill();
    println!("   Idle after fill: {}", pool.idle_num());

    let token = CancellationToken::new();
    let conn = pool.get(&token).await?;
    println!("   Got connection {}", conn.id);
    pool.put(conn);

    println!("   Idle after put: {}\n", pool.idle_num());
    Ok(())
}

async fn waiting_for_slot() -> Result<(), PoolError> {
    println!("2. Waiting for a Slot:");
    let config = PoolConfiguration::new()
        .with_max_active(1)
        .with_timeout(Duration::from_millis(100));
    let pool = Pool::with_config(connection_factory(), config)?;

    let held = pool.get_default_timeout().await?;
    match pool.get_default_timeout().await {
        Err(PoolError::Timeout(after)) => println!("   Timed out after {:?}", after),
        other => println!("   Unexpected: {:?}", other.map(|c| c.id)),
    }

    let waiter = {
        let pool = pool.clone();
        tokio::spawn(async move { pool.get(&CancellationToken::new()).await })
    };
    pool.put(held);
    let conn = waiter.await.expect("waiter panicked")?;
    println!("   Waiter got connection {}\n", conn.id);
    pool.release();
    Ok(())
}

async fn guards() -> Result<(), PoolError> {
    println!("3. Guards:");
    let pool = Pool::new(connection_factory(), 2, 2)?;
    let token = CancellationToken::new();

    {
        let conn = pool.get_guarded(&token).await?;
        println!("   Using connection {} (active: {})", conn.id, pool.active_num());
    }
    println!("   After drop - active: {}, idle: {}", pool.active_num(), pool.idle_num());

    let kept = pool.get_guarded(&token).await?.detach();
    println!("   Detached connection {} (active: {})\n", kept.id, pool.active_num());
    Ok(())
}

fn shutdown() {
    println!("4. Shutdown:");
    let Ok(pool) = Pool::new(connection_factory(), 3, 3) else {
        return;
    };
    pool.fill();
    pool.close();
    println!("   Closed: {}", pool.is_closed());
    println!("   try_get after close: {:?}", pool.try_get().map(|c| c.id));
}
