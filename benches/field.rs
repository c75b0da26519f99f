//! Benchmarks for field computation.

use criterion::{criterion_group, criterion_main, Criterion};
use crossfield::prelude::*;
use nalgebra::Point2;

fn grid_mesh(n: usize) -> PlanarMesh {
    let mut vertices = Vec::with_capacity((n + 1) * (n + 1));
    let mut faces = Vec::with_capacity(n * n * 2);

    // Create grid vertices
    for j in 0..=n {
        for i in 0..=n {
            vertices.push(Point2::new(i as f64, j as f64));
        }
    }

    // Create triangles
    for j in 0..n {
        for i in 0..n {
            let v00 = j * (n + 1) + i;
            let v10 = v00 + 1;
            let v01 = v00 + (n + 1);
            let v11 = v01 + 1;

            faces.push([v00, v10, v11]);
            faces.push([v00, v11, v01]);
        }
    }

    build_from_triangles(&vertices, &faces).unwrap()
}

fn bench_mesh_construction(c: &mut Criterion) {
    c.bench_function("build_grid_16x16", |b| {
        b.iter(|| grid_mesh(16));
    });
}

fn bench_rosy_field(c: &mut Criterion) {
    for n in [8, 16, 32] {
        let mesh = grid_mesh(n);
        c.bench_function(&format!("rosy_field_grid_{n}x{n}"), |b| {
            b.iter(|| rosy_field(&mesh).unwrap());
        });
    }
}

criterion_group!(benches, bench_mesh_construction, bench_rosy_field);
criterion_main!(benches);
