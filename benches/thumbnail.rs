use criterion::{Criterion, criterion_group, criterion_main};
use image::{DynamicImage, Rgba, RgbaImage};
use std::hint::black_box;

use pasteimg::image::{BoundingBox, make_thumbnail};

fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
    }))
}

fn bench_thumbnails(c: &mut Criterion) {
    let bounds = BoundingBox::default();
    let screenshot = gradient(2560, 1440);
    let small = gradient(300, 100);

    c.bench_function("thumbnail 2560x1440", |b| {
        b.iter(|| make_thumbnail(black_box(&screenshot), bounds))
    });
    c.bench_function("thumbnail already fits", |b| {
        b.iter(|| make_thumbnail(black_box(&small), bounds))
    });
}

criterion_group!(benches, bench_thumbnails);
criterion_main!(benches);
