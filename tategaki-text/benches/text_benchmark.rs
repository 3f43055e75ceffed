use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use tategaki_core::{CompleteTextStyleDeclaration, TextOptions};
use tategaki_text::{font_declaration, FixedMeasurer, MeasureContext, PrevGrapheme};

fn style() -> CompleteTextStyleDeclaration {
    TextOptions::default().defaults()
}

fn bench_measure_cached_char(c: &mut Criterion) {
    let mut ctx = MeasureContext::new(FixedMeasurer::new(10.0));
    let style = style();
    ctx.measure_char("縦", &style, None);

    c.bench_function("measure_cached_char", |b| {
        b.iter(|| ctx.measure_char(black_box("縦"), black_box(&style), None));
    });
}

fn bench_measure_cached_couple(c: &mut Criterion) {
    let mut ctx = MeasureContext::new(FixedMeasurer::new(10.0).with_couple("A", "V", 18.0));
    let style = style();
    let prev = PrevGrapheme { grapheme: "A", style: &style };
    ctx.measure_char("V", &style, Some(prev));

    c.bench_function("measure_cached_couple", |b| {
        b.iter(|| ctx.measure_char(black_box("V"), black_box(&style), Some(prev)));
    });
}

fn bench_measure_cold_paragraph(c: &mut Criterion) {
    let style = style();
    let text: Vec<String> = "縦書きの文章を計測する。Vertical text, measured cold."
        .chars()
        .map(String::from)
        .collect();

    c.bench_function("measure_cold_paragraph", |b| {
        b.iter(|| {
            let mut ctx = MeasureContext::new(FixedMeasurer::new(10.0));
            let mut prev: Option<&str> = None;
            for g in &text {
                let p = prev.map(|grapheme| PrevGrapheme { grapheme, style: &style });
                black_box(ctx.measure_char(g, &style, p));
                prev = Some(g.as_str());
            }
        });
    });
}

fn bench_font_declaration(c: &mut Criterion) {
    let style = style();
    c.bench_function("font_declaration", |b| {
        b.iter(|| font_declaration(black_box(&style), true));
    });
}

criterion_group!(
    benches,
    bench_measure_cached_char,
    bench_measure_cached_couple,
    bench_measure_cold_paragraph,
    bench_font_declaration
);
criterion_main!(benches);
