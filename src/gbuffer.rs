use glam::Vec3;

/// One shaded surface point that survived projection.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Fragment {
    pub ooz: f32,
    pub depth: f32,
    pub normal: Vec3,
    pub intensity: f32,
    pub rgb: Vec3,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GBufferPixel {
    pub ooz: f32,
    pub depth: f32,
    pub normal: Vec3,
    pub intensity: f32,
    pub rgb: Vec3,
}

impl GBufferPixel {
    pub fn is_empty(&self) -> bool {
        self.ooz <= 0.0
    }
}

/// Z-buffer keyed on `1/z`: an empty cell holds 0 and nearer points hold larger values.
#[derive(Clone, Debug, PartialEq)]
pub struct GBuffer {
    width: usize,
    height: usize,
    ooz: Vec<f32>,
    depth: Vec<f32>,
    normal: Vec<Vec3>,
    intensity: Vec<f32>,
    rgb: Vec<Vec3>,
}

impl GBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let n = width.saturating_mul(height);
        Self {
            width,
            height,
            ooz: vec![0.0; n],
            depth: vec![0.0; n],
            normal: vec![Vec3::ZERO; n],
            intensity: vec![0.0; n],
            rgb: vec![Vec3::ZERO; n],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.ooz.fill(0.0);
        self.depth.fill(0.0);
        self.normal.fill(Vec3::ZERO);
        self.intensity.fill(0.0);
        self.rgb.fill(Vec3::ZERO);
    }

    pub fn filled(&self) -> usize {
        self.ooz.iter().filter(|&&v| v > 0.0).count()
    }

    pub fn try_write(&mut self, x: usize, y: usize, frag: &Fragment) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let i = y * self.width + x;
        if frag.ooz > self.ooz[i] {
            self.ooz[i] = frag.ooz;
            self.depth[i] = frag.depth;
            self.normal[i] = frag.normal;
            self.intensity[i] = frag.intensity;
            self.rgb[i] = frag.rgb;
            true
        } else {
            false
        }
    }

    pub fn at(&self, x: usize, y: usize) -> Option<GBufferPixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = y * self.width + x;
        Some(GBufferPixel {
            ooz: self.ooz[i],
            depth: self.depth[i],
            normal: self.normal[i],
            intensity: self.intensity[i],
            rgb: self.rgb[i],
        })
    }
}
