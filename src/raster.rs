use crate::{
    camera::Projector,
    gbuffer::{Fragment, GBuffer},
    shader::{ShadeInput, Shader},
    torus::SampleSteps,
    Scene,
};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RasterStats {
    pub samples: u64,
    pub plotted: u64,
    pub occluded: u64,
    pub unlit: u64,
    pub offscreen: u64,
}

impl RasterStats {
    fn record(&mut self, outcome: &Outcome, gbuf: &mut GBuffer) {
        self.samples += 1;
        match outcome {
            Outcome::Hit { x, y, frag } => {
                if gbuf.try_write(*x, *y, frag) {
                    self.plotted += 1;
                } else {
                    self.occluded += 1;
                }
            }
            Outcome::Unlit => self.unlit += 1,
            Outcome::Offscreen => self.offscreen += 1,
        }
    }
}

#[derive(Copy, Clone, Debug)]
enum Outcome {
    Hit { x: usize, y: usize, frag: Fragment },
    Unlit,
    Offscreen,
}

struct RasterContext<'a, S> {
    scene: &'a Scene,
    shader: &'a S,
    projector: Projector,
    extent: f32,
}

impl<S: Shader> RasterContext<'_, S> {
    fn point(&self, theta: f32, phi: f32) -> Outcome {
        let s = self
            .scene
            .geometry
            .sample(theta, phi, &self.scene.orientation);
        let view_pos = self.scene.camera.to_view(s.position);
        let Some(p) = self.projector.project(view_pos) else {
            return Outcome::Offscreen;
        };
        let depth = self.scene.camera.normalized_depth(view_pos.z, self.extent);
        let input = ShadeInput {
            view_pos,
            normal: s.normal,
            depth,
            theta,
            phi,
            orientation: self.scene.orientation,
        };
        match self.shader.shade(&input) {
            Some(shade) => Outcome::Hit {
                x: p.x,
                y: p.y,
                frag: Fragment {
                    ooz: p.ooz,
                    depth,
                    normal: s.normal,
                    intensity: shade.intensity,
                    rgb: shade.rgb,
                },
            },
            None => Outcome::Unlit,
        }
    }

    fn ring(&self, theta: f32, steps: &SampleSteps) -> Vec<Outcome> {
        steps.phis().map(|phi| self.point(theta, phi)).collect()
    }
}

/// Samples the whole torus surface into `gbuf`. The buffer is not cleared first.
pub fn render_to_gbuffer<S: Shader + Sync>(
    scene: &Scene,
    shader: &S,
    steps: &SampleSteps,
    gbuf: &mut GBuffer,
) -> RasterStats {
    let extent = scene.geometry.extent();
    let ctx = RasterContext {
        scene,
        shader,
        projector: scene
            .camera
            .projector(gbuf.width(), gbuf.height(), extent),
        extent,
    };

    #[cfg(not(feature = "rayon"))]
    let stats = raster_serial(&ctx, steps, gbuf);

    #[cfg(feature = "rayon")]
    let stats = {
        let mut stats = RasterStats::default();
        let thetas: Vec<f32> = steps.thetas().collect();
        // Rings shade in parallel; merging in ring order keeps depth ties identical to the
        // serial path.
        let rings: Vec<Vec<Outcome>> = thetas
            .par_iter()
            .map(|&theta| ctx.ring(theta, steps))
            .collect();
        for ring in &rings {
            for outcome in ring {
                stats.record(outcome, gbuf);
            }
        }
        stats
    };

    stats
}

#[cfg(any(test, not(feature = "rayon")))]
fn raster_serial<S: Shader>(
    ctx: &RasterContext<'_, S>,
    steps: &SampleSteps,
    gbuf: &mut GBuffer,
) -> RasterStats {
    let mut stats = RasterStats::default();
    for theta in steps.thetas() {
        for outcome in ctx.ring(theta, steps) {
            stats.record(&outcome, gbuf);
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{shader::BuiltinShader, Orientation, ShaderId};

    fn face_on() -> Scene {
        Scene::default().with_orientation(Orientation::new(std::f32::consts::FRAC_PI_2, 0.0))
    }

    #[test]
    fn counts_every_sample() {
        let steps = SampleSteps::default();
        let mut gbuf = GBuffer::new(80, 24);
        let stats = render_to_gbuffer(
            &Scene::default(),
            &BuiltinShader::from_id(ShaderId::Classic),
            &steps,
            &mut gbuf,
        );
        assert_eq!(stats.samples, steps.total() as u64);
        assert_eq!(
            stats.samples,
            stats.plotted + stats.occluded + stats.unlit + stats.offscreen
        );
        assert!(stats.plotted > 0);
        assert!(stats.unlit > 0);
        assert!(gbuf.filled() as u64 <= stats.plotted);
    }

    #[test]
    fn face_on_torus_leaves_hole_in_center() {
        let mut gbuf = GBuffer::new(80, 40);
        render_to_gbuffer(
            &face_on(),
            &BuiltinShader::from_id(ShaderId::Phong),
            &SampleSteps::default(),
            &mut gbuf,
        );
        assert!(gbuf.at(40, 20).unwrap().is_empty());
        // k1 = 80 * 5 * 3 / 24 = 50; the tube spans 10 to 30 columns either side
        assert!(!gbuf.at(60, 20).unwrap().is_empty());
        assert!(!gbuf.at(20, 20).unwrap().is_empty());
        assert!(gbuf.at(0, 0).unwrap().is_empty());
    }

    #[test]
    fn parallel_feature_matches_ring_order_merge() {
        let scene = Scene::default().with_orientation(Orientation::new(1.0, 0.5));
        let steps = SampleSteps::default();
        for id in [ShaderId::Classic, ShaderId::DepthBlend, ShaderId::Phong] {
            let shader = BuiltinShader::from_id(id);
            let mut built = GBuffer::new(110, 50);
            let stats = render_to_gbuffer(&scene, &shader, &steps, &mut built);

            let mut serial = GBuffer::new(110, 50);
            let ctx = RasterContext {
                scene: &scene,
                shader: &shader,
                projector: scene.camera.projector(110, 50, scene.geometry.extent()),
                extent: scene.geometry.extent(),
            };
            let serial_stats = raster_serial(&ctx, &steps, &mut serial);

            assert_eq!(stats, serial_stats, "{id}");
            assert_eq!(built, serial, "{id}");
        }
    }

    #[test]
    fn classic_shader_plots_only_lit_cells() {
        let steps = SampleSteps::default();
        let mut classic = GBuffer::new(60, 30);
        let mut phong = GBuffer::new(60, 30);
        let scene = Scene::default().with_orientation(Orientation::new(1.0, 0.5));
        render_to_gbuffer(
            &scene,
            &BuiltinShader::from_id(ShaderId::Classic),
            &steps,
            &mut classic,
        );
        render_to_gbuffer(
            &scene,
            &BuiltinShader::from_id(ShaderId::Phong),
            &steps,
            &mut phong,
        );
        assert!(classic.filled() < phong.filled());
    }
}
