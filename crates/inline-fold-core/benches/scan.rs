use criterion::{Criterion, black_box, criterion_group, criterion_main};
use inline_fold_core::{
    FilterOptions, FoldConfig, FoldController, FoldPattern, LineRange, MemoryEditor, Position,
    RegionScanner, Selection, Viewport, partition,
};

const PATTERN: &str = r"(/\*\* @injector-start:[^*]*\*/)[\s\S]*?/\*\* @injector-stop:[^*]*\*/";

fn annotated_text(region_count: usize) -> String {
    let mut out = String::with_capacity(region_count * 160);
    for i in 0..region_count {
        out.push_str(&format!(
            "/** @injector-start: name:region-{i} */\nconst value{i} = compute({i});\n/** @injector-stop: name:region-{i} */\nplain_line({i});\n"
        ));
    }
    out
}

fn bench_scan_full_document(c: &mut Criterion) {
    let text = annotated_text(5_000);
    let pattern = FoldPattern::compile(PATTERN, 1, "g").unwrap();

    c.bench_function("scan/5k_regions", |b| {
        b.iter(|| {
            let records = RegionScanner::new(&pattern)
                .scan_all(black_box(&text))
                .unwrap();
            black_box(records.len());
        })
    });
}

fn bench_partition_viewport(c: &mut Criterion) {
    let text = annotated_text(5_000);
    let pattern = FoldPattern::compile(PATTERN, 1, "g").unwrap();
    let records = RegionScanner::new(&pattern).scan_all(&text).unwrap();
    let viewport = Viewport::new(10_000, 10_100);
    let selections = vec![Selection::caret(Position::new(10_050, 3))];

    c.bench_function("partition/5k_regions_100_line_viewport", |b| {
        b.iter(|| {
            let result = partition(
                black_box(&records),
                viewport,
                &selections,
                FilterOptions::default(),
            );
            black_box(result.mask.len());
        })
    });
}

fn bench_controller_refresh(c: &mut Criterion) {
    let text = annotated_text(5_000);
    let mut editor = MemoryEditor::new("typescript", &text);
    editor.set_visible_range(LineRange::new(10_000, 10_060));
    let config = FoldConfig {
        regex: Some(PATTERN.to_string()),
        supported_languages: vec!["typescript".to_string()],
        ..FoldConfig::default()
    };
    let mut controller = FoldController::new();
    controller.update_configs(&mut editor, &config).unwrap();

    c.bench_function("controller/active_editor_5k_regions", |b| {
        b.iter(|| {
            let outcome = controller.active_editor(&mut editor);
            black_box(outcome.partition().map(|p| p.mask.len()));
        })
    });
}

criterion_group!(
    benches,
    bench_scan_full_document,
    bench_partition_viewport,
    bench_controller_refresh
);
criterion_main!(benches);
