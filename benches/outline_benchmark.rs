//! Benchmarks for outline construction.
//!
//! Run with: cargo bench
//!
//! These benchmarks build outlines from synthetic bookmark text against an
//! in-memory page table, so no file I/O is measured.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pdfmark::{build_outline, CountMode, DocumentModel, IndentNormalizer, PageId};

/// Page table with `n` pages and no backing file.
struct Pages(u32);

impl DocumentModel for Pages {
    fn page_count(&self) -> u32 {
        self.0
    }

    fn page_handle(&self, index: u32) -> Option<PageId> {
        (index < self.0).then_some((index + 1, 0))
    }
}

/// A table of contents with `chapters` chapters, each with sections and
/// subsections, indented two spaces per level.
fn create_toc(chapters: usize) -> String {
    let mut text = String::new();
    let mut page = 1;
    for c in 1..=chapters {
        text.push_str(&format!("Chapter {} {}\n", c, page));
        for s in 1..=5 {
            text.push_str(&format!("  Section {}.{} {}\n", c, s, page));
            for u in 1..=3 {
                text.push_str(&format!("    Topic {}.{}.{} {}\n", c, s, u, page));
                page += 1;
            }
        }
    }
    text
}

/// A single chain nested `depth` levels deep.
fn create_deep_toc(depth: usize) -> String {
    (0..depth)
        .map(|d| format!("{}Level {} 1\n", " ".repeat(d), d))
        .collect()
}

/// Benchmark classification, resolution and assembly at various sizes.
fn bench_build_outline(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_outline");
    let pages = Pages(100_000);

    for chapters in [10, 100, 1000].iter() {
        let text = create_toc(*chapters);

        group.bench_function(format!("{}_chapters", chapters), |b| {
            b.iter(|| {
                let assembler =
                    build_outline(black_box(&text), &pages, 0, CountMode::Siblings).unwrap();
                assembler.assemble()
            });
        });
    }

    group.finish();
}

/// Benchmark pathological nesting depth.
fn bench_deep_outline(c: &mut Criterion) {
    let text = create_deep_toc(5_000);
    let pages = Pages(1);

    c.bench_function("deep_outline_5000", |b| {
        b.iter(|| {
            let assembler =
                build_outline(black_box(&text), &pages, 0, CountMode::Descendants).unwrap();
            assembler.assemble()
        });
    });
}

/// Benchmark indent normalization.
fn bench_normalize(c: &mut Criterion) {
    let normalizer = IndentNormalizer::new();
    let text: String = (1..=2000)
        .map(|i| format!("{}.{}.{} Item {}\n", i / 100, (i / 10) % 10, i % 10, i))
        .collect();

    c.bench_function("normalize_2000_lines", |b| {
        b.iter(|| normalizer.normalize(black_box(&text)));
    });
}

criterion_group!(
    benches,
    bench_build_outline,
    bench_deep_outline,
    bench_normalize,
);
criterion_main!(benches);
