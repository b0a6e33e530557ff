mod common;

use asciidonut::gbuffer::GBuffer;
use asciidonut::raster;
use asciidonut::shader::{BuiltinShader, PhongParams};
use asciidonut::torus::SampleSteps;
use asciidonut::ShaderId;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn raster_sampling(c: &mut Criterion) {
    let scene = common::make_scene();
    let steps = SampleSteps::default();
    let mut gbuf = GBuffer::new(common::WIDTH, common::HEIGHT);

    for id in [ShaderId::Classic, ShaderId::DepthBlend, ShaderId::Phong] {
        let shader = BuiltinShader::new(id, scene.light, PhongParams::default());
        c.bench_function(&format!("raster/{id}"), |b| {
            b.iter(|| {
                gbuf.clear();
                let stats =
                    raster::render_to_gbuffer(black_box(&scene), &shader, &steps, &mut gbuf);
                black_box((stats.plotted, gbuf.filled()))
            })
        });
    }
}

criterion_group!(benches, raster_sampling);
criterion_main!(benches);
