//! Benchmarks for mesh cleanup and vertex merging.
//!
//! Run with: cargo bench -p mesh-repair
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p mesh-repair -- --save-baseline main
//! 2. After changes: cargo bench -p mesh-repair -- --baseline main

#![allow(missing_docs, clippy::cast_possible_truncation, clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mesh_repair::{merge_vertices, CleanupPolicy, MeshCleaner, PassStrategy, DEFAULT_MERGE_TOLERANCE};
use mesh_types::{IndexedMesh, Vertex};

// =============================================================================
// Test Mesh Generation
// =============================================================================

/// Create a latitude/longitude sphere with `rings × segments` quads split into triangles.
fn create_sphere(rings: u32, segments: u32) -> IndexedMesh {
    let mut mesh = IndexedMesh::new();

    for r in 0..=rings {
        let theta = std::f64::consts::PI * f64::from(r) / f64::from(rings);
        for s in 0..segments {
            let phi = std::f64::consts::TAU * f64::from(s) / f64::from(segments);
            mesh.vertices.push(Vertex::from_coords(
                theta.sin() * phi.cos(),
                theta.sin() * phi.sin(),
                theta.cos(),
            ));
        }
    }

    for r in 0..rings {
        for s in 0..segments {
            let a = r * segments + s;
            let b = r * segments + (s + 1) % segments;
            let c = a + segments;
            let d = b + segments;
            mesh.faces.push([a, c, b]);
            mesh.faces.push([b, c, d]);
        }
    }

    mesh
}

/// Give every face its own three vertices, the way a binary STL stores them.
fn unshare(mesh: &IndexedMesh) -> IndexedMesh {
    let mut soup = IndexedMesh::with_capacity(mesh.faces.len() * 3, mesh.faces.len());
    for face in &mesh.faces {
        let base = soup.vertices.len() as u32;
        for &i in face {
            soup.vertices.push(mesh.vertices[i as usize].clone());
        }
        soup.faces.push([base, base + 1, base + 2]);
    }
    soup
}

fn test_cases() -> Vec<(&'static str, IndexedMesh)> {
    vec![
        ("sphere_512tri", unshare(&create_sphere(16, 16))),
        ("sphere_8192tri", unshare(&create_sphere(64, 64))),
        ("sphere_32768tri", unshare(&create_sphere(128, 128))),
    ]
}

// =============================================================================
// Merge Benchmarks
// =============================================================================

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("Merge");

    for (name, mesh) in &test_cases() {
        group.throughput(Throughput::Elements(mesh.vertices.len() as u64));

        group.bench_with_input(BenchmarkId::new("merge_vertices", name), mesh, |b, mesh| {
            b.iter(|| merge_vertices(black_box(mesh), DEFAULT_MERGE_TOLERANCE));
        });
    }

    group.finish();
}

// =============================================================================
// Cleanup Benchmarks
// =============================================================================

fn bench_cleanup(c: &mut Criterion) {
    let mut group = c.benchmark_group("Cleanup");

    for (name, soup) in &test_cases() {
        let (mesh, _) = merge_vertices(soup, DEFAULT_MERGE_TOLERANCE);
        group.throughput(Throughput::Elements(mesh.faces.len() as u64));

        for strategy in [PassStrategy::Indexed, PassStrategy::Explicit] {
            let cleaner = MeshCleaner::new(strategy, CleanupPolicy::BestEffort);
            let id = BenchmarkId::new(format!("{strategy:?}").to_lowercase(), name);
            group.bench_with_input(id, &mesh, |b, mesh| {
                b.iter(|| cleaner.clean(black_box(mesh)).unwrap());
            });
        }
    }

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_merge, bench_cleanup);

criterion_main!(benches);
