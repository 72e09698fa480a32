use criterion::{black_box, criterion_group, criterion_main, Criterion};
use opencv::core::{Mat, Rect, Scalar, CV_8UC3};
use opencv::imgproc::{rectangle, FILLED, LINE_8};
use pdf_table_slides::BorderDetector;

/// A4 page rendered at zoom 3 with one purple-framed table
fn framed_page() -> Mat {
    let mut page =
        Mat::new_rows_cols_with_default(2526, 1785, CV_8UC3, Scalar::all(255.0)).unwrap();
    let purple = Scalar::new(200.0, 0.0, 128.0, 0.0);
    rectangle(&mut page, Rect::new(150, 600, 1400, 900), purple, FILLED, LINE_8, 0).unwrap();
    rectangle(&mut page, Rect::new(160, 610, 1380, 880), Scalar::all(255.0), FILLED, LINE_8, 0)
        .unwrap();
    page
}

fn benchmark_border_detection(c: &mut Criterion) {
    let detector = BorderDetector::new();
    let page = framed_page();
    let blank =
        Mat::new_rows_cols_with_default(2526, 1785, CV_8UC3, Scalar::all(255.0)).unwrap();

    c.bench_function("detect_framed_page", |b| {
        b.iter(|| detector.detect(black_box(&page)).unwrap())
    });

    c.bench_function("detect_blank_page", |b| {
        b.iter(|| detector.detect(black_box(&blank)).unwrap())
    });

    let region = detector.detect(&page).unwrap().unwrap();
    c.bench_function("crop_table", |b| {
        b.iter(|| detector.crop(black_box(&page), &region).unwrap())
    });
}

criterion_group!(benches, benchmark_border_detection);
criterion_main!(benches);
