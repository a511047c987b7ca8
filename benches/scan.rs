use backtail::{tail, Cursor, TailRequest};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::io::Write;
use tempfile::NamedTempFile;

fn create_test_file(size_kb: usize) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let target_size = size_kb * 1024;
    let mut current_size = 0;
    let mut line_num = 0;

    while current_size < target_size {
        let level = if line_num % 97 == 0 { "ERROR" } else { "INFO" };
        let log_line = format!(
            "[2024-09-02T10:{:02}:{:02}] {}: Request {} user_{}\n",
            (line_num / 60) % 60,
            line_num % 60,
            level,
            line_num,
            line_num % 1000
        );
        temp_file.write_all(log_line.as_bytes()).unwrap();
        current_size += log_line.len();
        line_num += 1;
    }

    temp_file.flush().unwrap();
    temp_file
}

fn bench_last_lines(c: &mut Criterion) {
    let file = create_test_file(8 * 1024);
    let mut group = c.benchmark_group("last_lines");

    for &window in &[4 * 1024, 32 * 1024, 256 * 1024] {
        group.bench_with_input(BenchmarkId::new("window", window), &window, |b, &window| {
            let request = TailRequest::new(1000).window_size(window);
            b.iter(|| black_box(tail(file.path(), &request).unwrap().lines.len()));
        });
    }
    group.finish();
}

fn bench_sparse_keyword(c: &mut Criterion) {
    let file = create_test_file(8 * 1024);
    let mut group = c.benchmark_group("sparse_keyword");
    group.sample_size(20);

    for &case_sensitive in &[true, false] {
        group.bench_with_input(
            BenchmarkId::new("case_sensitive", case_sensitive),
            &case_sensitive,
            |b, &case_sensitive| {
                let request = TailRequest::new(200)
                    .keyword("error")
                    .case_sensitive(case_sensitive);
                b.iter(|| black_box(tail(file.path(), &request).unwrap().cursor));
            },
        );
    }
    group.finish();
}

fn bench_full_pagination(c: &mut Criterion) {
    let file = create_test_file(2 * 1024);

    c.bench_function("paginate_to_exhaustion", |b| {
        b.iter(|| {
            let mut cursor = Cursor::START;
            let mut pages = 0usize;
            loop {
                let request = TailRequest::new(500).cursor(cursor);
                let page = tail(file.path(), &request).unwrap();
                pages += 1;
                if page.exhausted {
                    break;
                }
                cursor = page.cursor;
            }
            black_box(pages)
        });
    });
}

criterion_group!(
    benches,
    bench_last_lines,
    bench_sparse_keyword,
    bench_full_pagination
);
criterion_main!(benches);
