use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ts_core::{Cell, Plane, ThresholdWindow};
use ts_trace::{find_seeds, select_loop, trace_loop};

fn synthetic_plateau(rows: usize, cols: usize) -> Plane<f32> {
    let mut data = vec![0.0f32; rows * cols];
    let (r0, r1) = (rows / 8, rows - rows / 8);
    let (c0, c1) = (cols / 8, cols - cols / 8);
    for r in r0..r1 {
        for c in c0..c1 {
            data[r * cols + c] = 500.0;
        }
    }
    Plane::from_vec(rows, cols, data).expect("valid plane")
}

fn bench_trace_and_select(c: &mut Criterion) {
    let grid = synthetic_plateau(512, 512);
    let view = grid.as_view();
    let window = ThresholdWindow::new(400.0, 600.0);
    let origin = Cell::new(256, 256);

    c.bench_function("trace_plateau_512", |b| {
        b.iter(|| {
            let seeds = find_seeds(black_box(origin), 600, window, &view);
            let outcomes: Vec<_> = seeds
                .iter()
                .map(|&s| trace_loop(s, window, &view))
                .collect();
            let winner = select_loop(&outcomes, origin, false);
            black_box(winner);
        });
    });
}

criterion_group!(benches, bench_trace_and_select);
criterion_main!(benches);
