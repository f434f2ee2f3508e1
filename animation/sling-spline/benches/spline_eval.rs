use criterion::{Criterion, criterion_group, criterion_main};
use std::fmt::Write;
use std::hint::black_box;
use sling_spline::Spline;

fn create_spline_text(points: usize) -> String {
    let mut text = format!("1\n{points}\n10.0\n");
    for i in 0..points {
        let x = i as f32;
        // Position then rotation
        let _ = writeln!(text, "{x}, {}, {}", (x * 0.3).sin() * 4.0, -x * 0.5);
        let _ = writeln!(text, "0, {}, 0", x * 12.0);
    }
    text
}

fn spline_benchmark(c: &mut Criterion) {
    let text = create_spline_text(256);

    c.bench_function("parse_256_points", |b| {
        b.iter(|| {
            let spline = Spline::parse(black_box(&text)).unwrap();
            black_box(spline.control_point_count());
        })
    });

    let spline = Spline::parse(&text).unwrap();

    c.bench_function("evaluate_1000_samples", |b| {
        b.iter(|| {
            for step in 0..1000 {
                let sample = spline.evaluate(black_box(step as f32 / 1000.0));
                black_box(sample);
            }
        })
    });
}

criterion_group!(benches, spline_benchmark);
criterion_main!(benches);
