mod common;

use asciidonut::gbuffer::GBuffer;
use asciidonut::raster;
use asciidonut::shader::BuiltinShader;
use asciidonut::targets::BufferTarget;
use asciidonut::{Renderer, ShaderId};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn glyph_resolve(c: &mut Criterion) {
    let scene = common::make_scene();
    let renderer = Renderer::new(common::make_config(ShaderId::DepthBlend));
    let config = renderer.config();

    // Fill the z-buffer once; the benchmark focuses on resolving to glyphs.
    let mut gbuf = GBuffer::new(common::WIDTH, common::HEIGHT);
    let shader = BuiltinShader::new(config.shader(), scene.light, *config.phong());
    raster::render_to_gbuffer(&scene, &shader, config.steps(), &mut gbuf);

    let mut out = BufferTarget::new(common::WIDTH, common::HEIGHT);

    c.bench_function("glyph/resolve", |b| {
        b.iter(|| {
            renderer.resolve_gbuffer_to_buffer(black_box(&gbuf), black_box(&mut out));
            black_box(out.hash64());
        })
    });
}

criterion_group!(benches, glyph_resolve);
criterion_main!(benches);
