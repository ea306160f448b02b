use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mycloud_web::export::file_export_spec;
use mycloud_web::listing::{FileSortKey, ListController, SortDirection};
use mycloud_web::types::{FileRecord, OwnerRef};

fn synthetic_files(count: usize) -> Vec<FileRecord> {
    (0..count)
        .map(|i| FileRecord {
            id: i as i64,
            original_name: Some(format!("Document {:05}, draft.pdf", (i * 7919) % count)),
            size: if i % 13 == 0 { None } else { Some(((i * 104729) % 50_000_000) as i64) },
            uploaded_at: Some(format!("2024-{:02}-{:02}T{:02}:00:00Z", i % 12 + 1, i % 28 + 1, i % 24)),
            description: (i % 3 == 0).then(|| "quarterly \"numbers\"".to_string()),
            user: Some(OwnerRef { id: Some((i % 50) as i64), username: Some(format!("user{}", i % 50)) }),
            ..FileRecord::default()
        })
        .collect()
}

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");
    for size in [100usize, 1_000, 10_000] {
        let files = synthetic_files(size);
        for key in [FileSortKey::Name, FileSortKey::Size, FileSortKey::UploadedAt] {
            let ctl = ListController::new(key, SortDirection::Descending);
            group.bench_with_input(BenchmarkId::new(format!("{:?}", key), size), &files, |b, files| {
                b.iter(|| black_box(ctl.project_refs(black_box(files))))
            });
        }
    }
    group.finish();
}

fn bench_csv(c: &mut Criterion) {
    let files = synthetic_files(10_000);
    let spec = file_export_spec();
    c.bench_function("csv_render_10k", |b| b.iter(|| black_box(spec.render(black_box(&files)))));
}

criterion_group!(benches, bench_projection, bench_csv);
criterion_main!(benches);
