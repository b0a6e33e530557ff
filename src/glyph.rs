#[derive(Clone, Debug, PartialEq)]
pub struct AsciiRamp {
    chars: Vec<char>,
    gamma: f32,
}

impl Default for AsciiRamp {
    fn default() -> Self {
        AsciiRamp::classic()
    }
}

impl AsciiRamp {
    pub fn new(chars: &str) -> Self {
        AsciiRamp {
            chars: chars.chars().collect(),
            gamma: 1.0,
        }
    }

    pub fn with_gamma(mut self, gamma: f32) -> Self {
        self.gamma = sanitize_gamma(gamma);
        self
    }

    pub fn gamma(&self) -> f32 {
        self.gamma
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Index is `trunc(t * (len - 1))`, so the last glyph is reserved for full intensity.
    pub fn map_scalar_to_char(&self, t: f32) -> char {
        if self.chars.is_empty() {
            return ' ';
        }
        let mut tt = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        if self.gamma != 1.0 {
            tt = tt.powf(self.gamma);
        }
        let last = self.chars.len() - 1;
        let i = (tt * last as f32) as usize;
        self.chars[i.min(last)]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "classic" => Some(AsciiRamp::classic()),
            "extended" => Some(AsciiRamp::extended()),
            "basic" => Some(AsciiRamp::basic()),
            "blocks" => Some(AsciiRamp::blocks()),
            _ => None,
        }
    }

    pub fn from_arg(arg: &str) -> Self {
        AsciiRamp::from_name(arg).unwrap_or_else(|| AsciiRamp::new(arg))
    }

    pub fn classic() -> Self {
        AsciiRamp::new(".,-~:;=!*#$@")
    }

    pub fn extended() -> Self {
        AsciiRamp::new(" .:!/r(l1Z4H9W8$@")
    }

    pub fn basic() -> Self {
        AsciiRamp::new(" .:-=+*#%@")
    }

    pub fn blocks() -> Self {
        AsciiRamp::new(" ░▒▓█")
    }
}

fn sanitize_gamma(gamma: f32) -> f32 {
    if gamma.is_finite() && gamma > 0.0 {
        gamma
    } else {
        1.0
    }
}
