use criterion::{black_box, criterion_group, criterion_main, Criterion};
use http::Method;
use stratarouter::{Next, Router};

type Ctx = u64;

fn tick(ctx: &mut Ctx, next: Next<Ctx>) -> anyhow::Result<()> {
    *ctx += 1;
    next.run(ctx)
}

fn tick_param(_value: &str, ctx: &mut Ctx, next: Next<Ctx>) -> anyhow::Result<()> {
    *ctx += 1;
    next.run(ctx)
}

fn build_router(route_count: usize) -> Router<Ctx> {
    let mut router = Router::new();
    router.use_("/", tick);
    router.param("id", tick_param);
    for i in 0..route_count {
        router.get(&format!("/resource{i}/:id"), tick);
    }
    router
}

fn bench_compose_throughput(c: &mut Criterion) {
    for route_count in [10_usize, 100, 500] {
        let router = build_router(route_count);
        // Worst case: the layer walk scans every registered layer.
        let path = format!("/resource{}/123", route_count - 1);

        c.bench_function(&format!("compose_{route_count}_layers"), |b| {
            b.iter(|| {
                let composed = router.compose(&Method::GET, &path);
                black_box(&composed);
            })
        });

        c.bench_function(&format!("dispatch_{route_count}_layers"), |b| {
            b.iter(|| {
                let mut ctx: Ctx = 0;
                if let Some((_, chain)) = router.compose(&Method::GET, &path) {
                    chain.execute(&mut ctx).expect("chain execution failed");
                }
                black_box(ctx);
            })
        });
    }
}

criterion_group!(benches, bench_compose_throughput);
criterion_main!(benches);
