//! Criterion benchmarks for the ranking pipeline hot paths.
//!
//! Benchmarks:
//! 1. Markup parsing (full page to rows of cells)
//! 2. Dataset build (extraction, quality gate, sector canonicalization)
//! 3. 2-in-1 ranking
//! 4. Filtering a ranked dataset

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use fiirank_core::markup::{parse_rows, TableSelectors};
use fiirank_core::{build_dataset, rank_two_in_one, FilterCriteria, SectorTable};

// ── Helpers ──────────────────────────────────────────────────────────

const SECTORS: [&str; 6] = [
    "logistica",
    "Papéis",
    "Shoppings",
    "Lajes-Corporativas",
    "Hibrido",
    "Indefinido",
];

fn make_rows(n: usize) -> Vec<Vec<String>> {
    (0..n)
        .map(|i| {
            let pvp = 0.7 + (i as f64 * 0.37).sin().abs() * 0.5;
            let dy = 0.5 + (i as f64 * 0.11).cos().abs() * 0.6;
            let mut cells = vec![
                format!("F{i:04}11"),
                SECTORS[i % SECTORS.len()].to_string(),
                format!("{:.2}", 50.0 + i as f64 % 120.0).replace('.', ","),
                format!("{}", 100_000 + (i * 7919) % 5_000_000),
                format!("{pvp:.2}").replace('.', ","),
                "0,85".to_string(),
                format!("{dy:.2}%").replace('.', ","),
            ];
            cells.extend(
                ["2,4%", "4,9%", "9,8%", "0,8%", "0,8%", "0,8%", "6,1%"]
                    .iter()
                    .map(|s| s.to_string()),
            );
            cells
        })
        .collect()
}

fn make_page(rows: &[Vec<String>]) -> String {
    let mut page = String::from(
        "<html><body><table><tbody class=\"default-fiis-table__container__table__body\">",
    );
    for row in rows {
        page.push_str("<tr>");
        for cell in row {
            page.push_str("<td>");
            page.push_str(cell);
            page.push_str("</td>");
        }
        page.push_str("</tr>");
    }
    page.push_str("</tbody></table></body></html>");
    page
}

// ── 1. Markup ────────────────────────────────────────────────────────

fn bench_markup(c: &mut Criterion) {
    let mut group = c.benchmark_group("markup_parse");
    let selectors = TableSelectors::default();

    for n in [100usize, 500] {
        let page = make_page(&make_rows(n));
        group.bench_with_input(BenchmarkId::from_parameter(n), &page, |b, page| {
            b.iter(|| parse_rows(black_box(page), &selectors))
        });
    }

    group.finish();
}

// ── 2. Dataset build ─────────────────────────────────────────────────

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("dataset_build");
    let sectors = SectorTable::default_b3();

    for n in [100usize, 500] {
        let rows = make_rows(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &rows, |b, rows| {
            b.iter(|| build_dataset(black_box(rows), &sectors))
        });
    }

    group.finish();
}

// ── 3. Ranking + 4. Filter ───────────────────────────────────────────

fn bench_rank_and_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_filter");
    let dataset = build_dataset(&make_rows(500), &SectorTable::default_b3());
    let criteria = FilterCriteria::default();

    group.bench_function("rank_500", |b| {
        b.iter(|| rank_two_in_one(black_box(dataset.clone())))
    });

    let ranked = rank_two_in_one(dataset.clone());
    group.bench_function("filter_500", |b| b.iter(|| criteria.apply(black_box(&ranked))));

    group.finish();
}

criterion_group!(benches, bench_markup, bench_build, bench_rank_and_filter);
criterion_main!(benches);
