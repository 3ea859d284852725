// bounded_pool
// Bounded, thread-safe resource pool with separate active and idle limits

// This is just a binary wrapper - the actual library is in lib.rs
// Run the demo with: cargo run --example basic

use bounded_pool::{CancellationToken, Pool, Resource};

struct Counter(usize);

impl Resource for Counter {
    type Error = std::convert::Infallible;

    fn close(self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), bounded_pool::PoolError> {
    println!("=== bounded_pool ===");
    println!("Run: cargo run --example basic");
    println!();

    println!("Quick Demo:");
    let pool = Pool::new(|| Counter(42), 2, 1)?;

    let counter = pool.get(&CancellationToken::new()).await?;
    println!("  Got resource: {}", counter.0);
    pool.put(counter);

    println!("  Idle after return: {}", pool.idle_num());
    pool.close();
    Ok(())
}
