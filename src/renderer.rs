use std::time::Instant;

use crate::{
    debug::scalar_for_view,
    glyph::AsciiRamp,
    profile::RenderStats,
    raster,
    shader::{BuiltinShader, PhongParams, ShaderId},
    targets::{BufferTarget, Cell},
    torus::SampleSteps,
    types::{ColorScheme, Rgb8},
    GBuffer, Scene,
};

pub use crate::debug::DebugView;

#[derive(Clone, Debug)]
pub struct RendererConfig {
    width: usize,
    height: usize,
    ramp: AsciiRamp,
    shader: ShaderId,
    phong: PhongParams,
    color_scheme: ColorScheme,
    debug_view: DebugView,
    steps: SampleSteps,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
            ramp: AsciiRamp::classic(),
            shader: ShaderId::Classic,
            phong: PhongParams::default(),
            color_scheme: ColorScheme::Mono,
            debug_view: DebugView::Final,
            steps: SampleSteps::default(),
        }
    }
}

impl RendererConfig {
    pub fn new(width: usize, height: usize) -> Self {
        Self::default().with_size(width, height)
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_ascii_ramp(mut self, ramp: AsciiRamp) -> Self {
        self.ramp = if ramp.is_empty() {
            AsciiRamp::new("#")
        } else {
            ramp
        };
        self
    }

    pub fn with_shader(mut self, shader: ShaderId) -> Self {
        self.shader = shader;
        self
    }

    pub fn with_phong(mut self, phong: PhongParams) -> Self {
        self.phong = phong;
        self
    }

    pub fn with_color_scheme(mut self, scheme: ColorScheme) -> Self {
        self.color_scheme = scheme;
        self
    }

    pub fn with_debug_view(mut self, view: DebugView) -> Self {
        self.debug_view = view;
        self
    }

    pub fn with_steps(mut self, steps: SampleSteps) -> Self {
        self.steps = steps;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn ramp(&self) -> &AsciiRamp {
        &self.ramp
    }

    pub fn shader(&self) -> ShaderId {
        self.shader
    }

    pub fn phong(&self) -> &PhongParams {
        &self.phong
    }

    pub fn color_scheme(&self) -> &ColorScheme {
        &self.color_scheme
    }

    pub fn debug_view(&self) -> DebugView {
        self.debug_view
    }

    pub fn steps(&self) -> &SampleSteps {
        &self.steps
    }
}

/// Owns the z-buffer reused across frames.
#[derive(Clone, Debug)]
pub struct Renderer {
    config: RendererConfig,
    gbuf: GBuffer,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        let gbuf = GBuffer::new(config.width(), config.height());
        Self { config, gbuf }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn set_debug_view(&mut self, view: DebugView) {
        self.config.debug_view = view;
    }

    pub fn set_phong(&mut self, phong: PhongParams) {
        self.config.phong = phong;
    }

    pub fn gbuffer(&self) -> &GBuffer {
        &self.gbuf
    }

    pub fn render(&mut self, scene: &Scene, target: &mut BufferTarget) -> RenderStats {
        let start = Instant::now();
        let (w, h) = (self.config.width(), self.config.height());
        if target.width() != w || target.height() != h {
            *target = BufferTarget::new(w, h);
        }
        if self.gbuf.width() != w || self.gbuf.height() != h {
            self.gbuf = GBuffer::new(w, h);
        }
        target.clear(Cell::default());
        self.gbuf.clear();
        let cleared = Instant::now();

        let shader = BuiltinShader::new(self.config.shader(), scene.light, self.config.phong);
        let raster = raster::render_to_gbuffer(scene, &shader, self.config.steps(), &mut self.gbuf);
        let sampled = Instant::now();

        let cells_drawn = self.resolve_gbuffer_to_buffer(&self.gbuf, target);
        let done = Instant::now();

        let stats = RenderStats {
            width: w,
            height: h,
            raster,
            cells_drawn,
            total: done - start,
            clear: cleared - start,
            sample: sampled - cleared,
            resolve: done - sampled,
        };
        log::trace!("{}", stats.overlay_text());
        stats
    }

    /// Maps every filled z-buffer cell to a glyph and color. Returns the number of cells written.
    pub fn resolve_gbuffer_to_buffer(&self, gbuf: &GBuffer, out: &mut BufferTarget) -> usize {
        let view = self.config.debug_view();
        let ramp = self.config.ramp();
        let mut drawn = 0;
        for y in 0..gbuf.height() {
            for x in 0..gbuf.width() {
                let Some(px) = gbuf.at(x, y) else {
                    continue;
                };
                if px.is_empty() {
                    continue;
                }
                let t = scalar_for_view(view, &px);
                let fg = match self.config.color_scheme() {
                    ColorScheme::Mono => Rgb8::WHITE,
                    ColorScheme::DepthBands(palette) => palette.pick(px.depth),
                    ColorScheme::Shaded if view == DebugView::Final => Rgb8::from_unit(px.rgb),
                    ColorScheme::Shaded => Rgb8::from_unit(glam::Vec3::splat(t)),
                };
                if out.set(x, y, Cell::new(ramp.map_scalar_to_char(t), fg, px.depth)) {
                    drawn += 1;
                }
            }
        }
        drawn
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        targets::BufferTarget, types::ColorScheme, types::Palette, variant::Variant, AsciiRamp,
        DebugView, Orientation, Renderer, RendererConfig, Scene, ShaderId,
    };

    fn spun() -> Scene {
        Scene::default().with_orientation(Orientation::new(1.0, 0.5))
    }

    #[test]
    fn render_is_deterministic() {
        let mut renderer = Renderer::new(RendererConfig::new(80, 24));
        let mut target = BufferTarget::new(80, 24);
        let empty_hash = target.hash64();
        renderer.render(&spun(), &mut target);
        let h1 = target.hash64();
        assert_ne!(h1, empty_hash);
        renderer.render(&spun(), &mut target);
        assert_eq!(h1, target.hash64());
    }

    #[test]
    fn classic_frame_uses_only_ramp_glyphs() {
        let mut renderer = Renderer::new(RendererConfig::new(80, 24));
        let mut target = BufferTarget::new(80, 24);
        let stats = renderer.render(&spun(), &mut target);
        let ramp = AsciiRamp::classic();
        for c in target.as_slice() {
            assert!(c.ch == ' ' || ramp.chars().contains(&c.ch));
        }
        assert_eq!(stats.cells_drawn, target.non_blank());
        assert_eq!(stats.cells_drawn, renderer.gbuffer().filled());
    }

    #[test]
    fn rotation_changes_frame() {
        let mut renderer = Renderer::new(RendererConfig::new(80, 24));
        let mut a = BufferTarget::new(80, 24);
        let mut b = BufferTarget::new(80, 24);
        renderer.render(&spun(), &mut a);
        renderer.render(
            &Scene::default().with_orientation(Orientation::new(1.04, 0.52)),
            &mut b,
        );
        assert_ne!(a.hash64(), b.hash64());
    }

    #[test]
    fn depth_bands_color_by_distance() {
        let cfg = RendererConfig::new(110, 50)
            .with_shader(ShaderId::DepthBlend)
            .with_ascii_ramp(AsciiRamp::extended())
            .with_color_scheme(ColorScheme::DepthBands(Palette::ansi_rainbow()));
        let mut renderer = Renderer::new(cfg);
        let mut target = BufferTarget::new(110, 50);
        renderer.render(&spun(), &mut target);
        let palette = Palette::ansi_rainbow();
        let mut seen = std::collections::HashSet::new();
        for c in target.as_slice().iter().filter(|c| c.depth().is_finite()) {
            assert_eq!(c.fg, palette.pick(c.depth()));
            seen.insert(c.fg);
        }
        assert!(seen.len() > 2);
    }

    #[test]
    fn debug_views_produce_distinct_frames() {
        let mut hashes = std::collections::HashSet::new();
        for view in [DebugView::Final, DebugView::Depth, DebugView::Normals] {
            let mut renderer = Renderer::new(
                RendererConfig::new(80, 40)
                    .with_shader(ShaderId::Phong)
                    .with_ascii_ramp(AsciiRamp::basic())
                    .with_debug_view(view),
            );
            let mut target = BufferTarget::new(80, 40);
            renderer.render(&spun(), &mut target);
            hashes.insert(target.hash64());
        }
        assert_eq!(hashes.len(), 3);
    }

    /// Double-precision colorized donut loop: glyph and palette index per cell, `None` where
    /// nothing was plotted.
    fn colorized_reference(a: f64, b: f64) -> Vec<Option<(char, usize)>> {
        const W: usize = 110;
        const H: usize = 50;
        let shades: Vec<char> = " .:!/r(l1Z4H9W8$@".chars().collect();
        let (r1, r2, k2) = (1.0f64, 2.0f64, 5.0f64);
        let k1 = W as f64 * k2 * 3.0 / (8.0 * (r1 + r2));
        let mut cells = vec![None; W * H];
        let mut zbuf = vec![-1e10f64; W * H];

        let mut theta = 0.0f64;
        while theta < 2.0 * std::f64::consts::PI {
            let mut phi = 0.0f64;
            while phi < 2.0 * std::f64::consts::PI {
                let (sin_p, cos_p) = phi.sin_cos();
                let (sin_t, cos_t) = theta.sin_cos();
                let circle_x = r2 + r1 * cos_t;
                let circle_y = r1 * sin_t;
                let x = circle_x * (b.cos() * cos_p + a.sin() * b.sin() * sin_p)
                    - circle_y * a.cos() * b.sin();
                let y = circle_x * (b.sin() * cos_p - a.sin() * b.cos() * sin_p)
                    + circle_y * a.cos() * b.cos();
                let z = k2 + a.cos() * circle_x * sin_p + circle_y * a.sin();
                let ooz = 1.0 / z;
                let xp = ((W / 2) as f64 + k1 * ooz * x) as i64;
                let yp = ((H / 2) as f64 - k1 * ooz * y / 2.0) as i64;
                let l = cos_p * cos_t * b.sin() - a.cos() * cos_t * sin_p - a.sin() * sin_t + 0.5;
                let depth = (z - k2 + r1 + r2) / (2.0 * (r1 + r2));

                if l > 0.0 && xp >= 0 && (xp as usize) < W && yp >= 0 && (yp as usize) < H {
                    let i = yp as usize * W + xp as usize;
                    if ooz > zbuf[i] {
                        zbuf[i] = ooz;
                        let shade = (((l * 0.7 + depth * 0.3) * 16.0) as i64).clamp(0, 16);
                        let color = ((depth * 6.0) as i64).clamp(0, 6);
                        cells[i] = Some((shades[shade as usize], color as usize));
                    }
                }
                phi += 0.02;
            }
            theta += 0.07;
        }
        cells
    }

    #[test]
    fn color_variant_matches_double_precision_reference() {
        let cfg = Variant::Color.preset();
        let palette = Palette::ansi_rainbow();
        let mut renderer = Renderer::new(cfg.renderer_config());
        let mut target = BufferTarget::new(cfg.width, cfg.height);

        for (a, b) in [(0.0f32, 0.0f32), (1.0, 0.5), (2.4, 1.3)] {
            renderer.render(&cfg.scene(Orientation::new(a, b)), &mut target);
            let reference = colorized_reference(f64::from(a), f64::from(b));

            let mut differing = 0;
            let mut ours_plotted = 0;
            let mut ref_plotted = 0;
            for (cell, expected) in target.as_slice().iter().zip(&reference) {
                let plotted = cell.depth().is_finite();
                ours_plotted += usize::from(plotted);
                ref_plotted += usize::from(expected.is_some());
                let same = match expected {
                    Some((ch, color)) => {
                        plotted && cell.ch == *ch && cell.fg == palette.colors()[*color]
                    }
                    None => !plotted,
                };
                differing += usize::from(!same);
            }
            assert_eq!(ours_plotted, ref_plotted, "({a}, {b})");
            assert_eq!(differing, 0, "({a}, {b}): cells differ");
        }
    }

    #[test]
    fn target_is_resized_to_config() {
        let mut renderer = Renderer::new(RendererConfig::new(30, 12));
        let mut target = BufferTarget::new(5, 5);
        renderer.render(&spun(), &mut target);
        assert_eq!((target.width(), target.height()), (30, 12));
    }
}
