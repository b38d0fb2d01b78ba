//! Benchmarks for plandoc composition performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks compose synthetic plans of increasing size.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use plandoc::model::{FieldValue, Initiative, Metric, ObjectiveSummary};
use plandoc::{
    build_sections, export_to_pdf, ExportOptions, Exporter, MemoryRasterSource, RasterImage,
    StrategicPlanData,
};

/// Creates a plan with `count` objectives, each with a few initiatives and
/// metrics.
fn create_test_plan(count: usize) -> StrategicPlanData {
    let mut data = StrategicPlanData::new("Benchmark Ltda");
    let objectives = (0..count)
        .map(|i| ObjectiveSummary {
            title: Some(format!("Objetivo estratégico número {}", i + 1)),
            description: Some("Descrição longa do objetivo para forçar quebra de linha em várias linhas de texto no corpo da seção.".repeat(2)),
            status: Some("ativo".to_string()),
            progress: Some(FieldValue::Number((i * 7 % 100) as f64)),
            initiatives: (0..3)
                .map(|j| Initiative {
                    title: Some(format!("Iniciativa {}.{}", i + 1, j + 1)),
                    status: Some("em andamento".to_string()),
                    ..Default::default()
                })
                .collect(),
            metrics: (0..2)
                .map(|j| Metric {
                    name: Some(format!("Métrica {}.{}", i + 1, j + 1)),
                    current_value: Some(FieldValue::Number(j as f64 * 10.0)),
                    target: Some(FieldValue::Text("100%".to_string())),
                })
                .collect(),
        })
        .collect();
    data.objectives = Some(objectives);
    data
}

/// Benchmark section building.
fn bench_build_sections(c: &mut Criterion) {
    let data = create_test_plan(50);

    c.bench_function("build_sections_50", |b| {
        b.iter(|| build_sections(black_box(&data)));
    });
}

/// Benchmark full plan composition at various sizes.
fn bench_plan_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_export");
    let options = ExportOptions::new()
        .with_export_permission(true)
        .with_watermark_text("DEMO");

    for count in [5, 50, 200].iter() {
        let data = create_test_plan(*count);

        group.bench_function(format!("{}_objectives", count), |b| {
            b.iter(|| {
                Exporter::new(options.clone())
                    .export_plan(black_box(&data))
                    .unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark strip slicing and PDF serialization of a tall capture.
fn bench_tall_region(c: &mut Criterion) {
    let source = MemoryRasterSource::new().with(
        "dashboard",
        RasterImage::solid(400, 4000, [40, 90, 160]).unwrap(),
    );
    let options = ExportOptions::new().with_export_permission(true);

    c.bench_function("tall_region_to_pdf", |b| {
        b.iter(|| {
            let doc = export_to_pdf(&source, black_box("dashboard"), &options).unwrap();
            doc.to_pdf_bytes().unwrap()
        });
    });
}

criterion_group!(
    benches,
    bench_build_sections,
    bench_plan_export,
    bench_tall_region,
);
criterion_main!(benches);
