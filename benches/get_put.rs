use criterion::{Criterion, black_box, criterion_group, criterion_main};

use bounded_pool::{Pool, Resource};

struct Buffer(Vec<u8>);

impl Resource for Buffer {
    type Error = std::convert::Infallible;

    fn close(self) -> Result<(), Self::Error> {
        Ok(())
    }
}

fn bench_try_get_put(c: &mut Criterion) {
    let pool = Pool::new(|| Buffer(vec![0; 4096]), 64, 64).unwrap();
    pool.fill();

    c.bench_function("try_get_put_idle", |b| {
        b.iter(|| {
            let buffer = pool.try_get().unwrap();
            black_box(buffer.0.len());
            pool.put(buffer);
        })
    });
}

fn bench_async_get_put(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let pool = Pool::new(|| Buffer(vec![0; 4096]), 64, 64).unwrap();
    pool.fill();
    let token = bounded_pool::CancellationToken::new();

    c.bench_function("async_get_put_idle", |b| {
        b.iter(|| {
            runtime.block_on(async {
                let buffer = pool.get(&token).await.unwrap();
                black_box(buffer.0.len());
                pool.put(buffer);
            })
        })
    });
}

criterion_group!(benches, bench_try_get_put, bench_async_get_put);
criterion_main!(benches);
