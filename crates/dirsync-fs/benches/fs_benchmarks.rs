use criterion::{Criterion, black_box, criterion_group, criterion_main};
use dirsync_fs::{SnapshotOptions, Snapshotter, hash_file};
use std::fs;
use tempfile::tempdir;

fn hash_file_benchmark(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("large.bin");
    let content: Vec<u8> = (0..4 * 1024 * 1024u32).map(|i| (i % 253) as u8).collect();
    fs::write(&path, &content).unwrap();

    c.bench_function("checksum::hash_file (4 MiB)", |b| {
        b.iter(|| hash_file(black_box(&path)).unwrap())
    });
}

fn snapshot_benchmark(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    for i in 0..200 {
        let sub = dir.path().join(format!("d{}", i % 10));
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join(format!("f{i}")), vec![i as u8; 16 * 1024]).unwrap();
    }

    for parallel in [false, true] {
        let snapshotter = Snapshotter::new(SnapshotOptions {
            parallel,
            ..SnapshotOptions::default()
        });
        let name = format!("snapshot::Snapshotter::snapshot (parallel={parallel})");
        c.bench_function(&name, |b| {
            b.iter(|| snapshotter.snapshot(black_box(dir.path())).unwrap())
        });
    }
}

criterion_group!(benches, hash_file_benchmark, snapshot_benchmark);
criterion_main!(benches);
