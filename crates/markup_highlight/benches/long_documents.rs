use criterion::{criterion_group, criterion_main, Criterion};

use markup_highlight::{highlight, HighlightOptions};

/// Build a long synthetic document that exercises every construct: plain
/// text, escapes, directives with argument lists and nested bodies, comments,
/// and code blocks.
fn build_document(paragraphs: usize) -> String {
    let mut document = String::new();
    for index in 0..paragraphs {
        document.push_str("Some leading prose with an escaped \\{ brace and a lone \\ slash. ");
        document.push_str("\\b[id=");
        document.push_str(&index.to_string());
        document.push_str(", strong]{nested \\i{emphasis} and more text} ");
        document.push_str("\\comment{ignore {all of} this \\b{too}} ");
        document.push_str("\\code[lang=rust]{let value = compute(");
        document.push_str(&index.to_string());
        document.push_str(");} trailing text\n");
    }
    document
}

fn long_documents(c: &mut Criterion) {
    let options = HighlightOptions::default();
    let mut group = c.benchmark_group("long documents");
    for paragraphs in [10, 1_000] {
        let document = build_document(paragraphs);
        group.bench_function(format!("{paragraphs} paragraphs"), |b| {
            b.iter(|| highlight(&document, &options))
        });
    }
    group.finish();
}

fn short_inlines(c: &mut Criterion) {
    let options = HighlightOptions::default();
    let mut group = c.benchmark_group("inlines");
    group.bench_function("directive heavy", |b| {
        b.iter(|| highlight("\\a[x=1,y=\\b{2}]{\\c{\\d{deep}} text}", &options))
    });
    group.bench_function("plain text", |b| {
        b.iter(|| {
            highlight(
                "a perfectly ordinary sentence with no markup in it at all",
                &options,
            )
        })
    });
    group.finish();
}

criterion_group!(benches, long_documents, short_inlines);
criterion_main!(benches);
