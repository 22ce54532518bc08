// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the slip enhancement stages. Uses a small
// synthetic slip image (light field with a dark text bar) so relative
// stage costs are visible without fixture files.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use belegwerk_core::types::{ProcessingPass, ProcessingSettings};
use belegwerk_raster::{RasterBuffer, SlipEnhancer, binarize, gaussian_blur};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// 100x100 synthetic slip: light gray field, one dark horizontal bar.
fn synthetic_slip() -> RasterBuffer {
    let mut raster = RasterBuffer::new_filled(100, 100, [220, 220, 220]).unwrap();
    for y in 40..46 {
        for x in 10..90 {
            raster.set_pixel(x, y, [30, 30, 30]);
        }
    }
    raster
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Adaptive binarization with the default window and sensitivity.
fn bench_binarize(c: &mut Criterion) {
    let raster = synthetic_slip();
    c.bench_function("binarize (100x100, window 15)", |b| {
        b.iter(|| {
            let (out, plane) = binarize(black_box(&raster), 15, 0.2).unwrap();
            black_box((out, plane));
        });
    });
}

/// Separable Gaussian blur at the default and fallback sigmas.
fn bench_blur(c: &mut Criterion) {
    let raster = synthetic_slip();
    for sigma in [0.5f64, 0.8] {
        c.bench_function(&format!("gaussian_blur (100x100, sigma {})", sigma), |b| {
            b.iter(|| {
                let out = gaussian_blur(black_box(&raster), sigma).unwrap();
                black_box(out);
            });
        });
    }
}

/// The full in-memory stage sequence under the default preset.
fn bench_full_pipeline(c: &mut Criterion) {
    let settings = ProcessingSettings::preset(ProcessingPass::Default);
    let enhancer = SlipEnhancer::new(settings);
    let raster = synthetic_slip();

    c.bench_function("enhance_raster default preset (100x100)", |b| {
        b.iter(|| {
            let out = enhancer.enhance_raster(black_box(raster.clone())).unwrap();
            black_box(out);
        });
    });
}

criterion_group!(benches, bench_binarize, bench_blur, bench_full_pipeline);
criterion_main!(benches);
