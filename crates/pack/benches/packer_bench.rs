//! Benchmarks for container packing.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use u_loading_pack::{Config, Container, Item, PackingMethod, Packer, Solver};

fn packer_benchmark(c: &mut Criterion) {
    let items: Vec<Item> = (1..=40)
        .filter_map(|id| {
            let zone = format!("po{}", id % 5 + 1);
            let w = 20.0 + (id % 4) as f64 * 5.0;
            let l = 20.0 + (id % 3) as f64 * 10.0;
            Item::new(id, w, l, 20.0, 10.0, zone).ok()
        })
        .collect();

    let Ok(container) = Container::from_nominal(170.0, 275.0, 160.0) else {
        return;
    };

    for method in PackingMethod::ALL {
        let packer = Packer::new(
            Config::new()
                .with_method(method)
                .with_iterations(3)
                .with_seed(42),
        );

        c.bench_function(&format!("pack_40_boxes_{}", method), |b| {
            b.iter(|| {
                let result = packer.solve(black_box(&items), black_box(&container));
                black_box(result)
            })
        });
    }
}

criterion_group!(benches, packer_benchmark);
criterion_main!(benches);
