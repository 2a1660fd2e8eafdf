//! Benchmarks for the SVG optimizer and sprite assembly.

use std::fs;
use std::path::{Path, PathBuf};

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use vjs_sprite::{optimize, OptimizeConfig, SpriterConfig, SvgSpriter};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("icons")
}

fn load_fixture(name: &str) -> String {
    fs::read_to_string(fixtures_dir().join(name)).unwrap()
}

// -- Optimizer benchmarks --

fn bench_optimize(c: &mut Criterion) {
    let mut group = c.benchmark_group("optimize");

    let icon_config = OptimizeConfig::icon_default();
    let play = load_fixture("play.svg");
    let fullscreen = load_fixture("controls/fullscreen.svg");

    group.bench_function("icon_sketch_export", |b| {
        b.iter(|| optimize(black_box(&play), &icon_config).unwrap())
    });

    group.bench_function("icon_with_defs", |b| {
        b.iter(|| optimize(black_box(&fullscreen), &icon_config).unwrap())
    });

    // Long path data dominates real-world icons
    let mut d = String::from("M0 0");
    for i in 0..500 {
        d.push_str(&format!(" L {}.125,{}.5 C 1,2 3,4 {},{}", i, i * 2, i + 1, i));
    }
    let heavy = format!("<svg viewBox=\"0 0 1000 1000\"><path d=\"{}\"/></svg>", d);

    group.bench_function("icon_long_path", |b| {
        b.iter(|| optimize(black_box(&heavy), &icon_config).unwrap())
    });

    group.finish();
}

// -- Assembly benchmarks --

fn bench_sprite(c: &mut Criterion) {
    let mut group = c.benchmark_group("sprite");

    let icon_config = OptimizeConfig::icon_default();
    let sprite_config = OptimizeConfig::sprite_default();
    let icon = optimize(&load_fixture("play.svg"), &icon_config).unwrap();

    group.bench_function("compile_100_symbols", |b| {
        b.iter(|| {
            let mut spriter = SvgSpriter::new(SpriterConfig::default(), ".");
            for i in 0..100 {
                let path = format!("icon-{}.svg", i);
                spriter.add(Path::new(&path), black_box(&icon)).unwrap();
            }
            spriter.compile().unwrap()
        })
    });

    let mut spriter = SvgSpriter::new(SpriterConfig::default(), ".");
    for i in 0..100 {
        spriter
            .add(Path::new(&format!("icon-{}.svg", i)), &icon)
            .unwrap();
    }
    let sprite = spriter.compile().unwrap().remove(0).contents;

    group.bench_function("clean_100_symbol_sprite", |b| {
        b.iter(|| vjs_sprite::optimize_sprite(black_box(&sprite), &sprite_config).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_optimize, bench_sprite);
criterion_main!(benches);
