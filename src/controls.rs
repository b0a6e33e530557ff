use crate::{
    animation::{MAX_SPEED, MIN_SPEED},
    config::DonutConfig,
    DebugView, TorusGeometry,
};

pub const RADIUS_STEP: f32 = 0.1;
pub const DISTANCE_STEP: f32 = 0.25;
pub const SPEED_FACTOR: f32 = 1.25;
pub const SHININESS_FACTOR: f32 = 2.0;

const MIN_RADIUS: f32 = 0.1;
const MAX_RADIUS: f32 = 5.0;
const MIN_SHININESS: f32 = 1.0;
const MAX_SHININESS: f32 = 512.0;
const MAX_DISTANCE: f32 = 50.0;
const KEY_HELP: &str =
    "arrows radii, +/- distance, [/] speed, o/p shine, v view, space pause, r reset, q quit";

/// Gap kept between the eye and the nearest possible surface point.
const VIEWER_MARGIN: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    Quit,
    TogglePause,
    Reset,
    RingRadius(f32),
    TubeRadius(f32),
    Distance(f32),
    SpeedScale(f32),
    ShininessScale(f32),
    CycleView,
}

#[cfg(feature = "terminal")]
pub fn action_for_key(key: crossterm::event::KeyEvent) -> Option<Action> {
    use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};

    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Action::Quit),
            _ => None,
        };
    }
    Some(match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char(' ') => Action::TogglePause,
        KeyCode::Char('r') | KeyCode::Char('R') => Action::Reset,
        KeyCode::Up => Action::RingRadius(RADIUS_STEP),
        KeyCode::Down => Action::RingRadius(-RADIUS_STEP),
        KeyCode::Right => Action::TubeRadius(RADIUS_STEP),
        KeyCode::Left => Action::TubeRadius(-RADIUS_STEP),
        KeyCode::Char('+') | KeyCode::Char('=') => Action::Distance(DISTANCE_STEP),
        KeyCode::Char('-') | KeyCode::Char('_') => Action::Distance(-DISTANCE_STEP),
        KeyCode::Char(']') => Action::SpeedScale(SPEED_FACTOR),
        KeyCode::Char('[') => Action::SpeedScale(SPEED_FACTOR.recip()),
        KeyCode::Char('p') => Action::ShininessScale(SHININESS_FACTOR),
        KeyCode::Char('o') => Action::ShininessScale(SHININESS_FACTOR.recip()),
        KeyCode::Char('v') | KeyCode::Char('V') => Action::CycleView,
        _ => return None,
    })
}

/// Parameters the user can change while the animation runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tuning {
    pub geometry: TorusGeometry,
    pub distance: f32,
    pub shininess: f32,
    pub speed: f32,
    pub view: DebugView,
}

impl Tuning {
    pub fn from_config(cfg: &DonutConfig) -> Self {
        let mut t = Self {
            geometry: cfg.geometry,
            distance: cfg.camera.distance,
            shininess: cfg.phong.shininess,
            speed: 1.0,
            view: cfg.view,
        };
        t.keep_viewer_outside();
        t
    }

    pub fn min_distance(&self) -> f32 {
        self.geometry.extent() + VIEWER_MARGIN
    }

    /// Applies a parameter action. Quit, pause and reset belong to the caller and are
    /// ignored here. Returns whether anything changed.
    pub fn apply(&mut self, action: Action) -> bool {
        let before = *self;
        match action {
            Action::RingRadius(d) => {
                self.geometry.ring_radius =
                    (self.geometry.ring_radius + d).clamp(MIN_RADIUS, MAX_RADIUS);
            }
            Action::TubeRadius(d) => {
                self.geometry.tube_radius =
                    (self.geometry.tube_radius + d).clamp(MIN_RADIUS, MAX_RADIUS);
            }
            Action::Distance(d) => self.distance += d,
            Action::SpeedScale(f) => self.speed = (self.speed * f).clamp(MIN_SPEED, MAX_SPEED),
            Action::ShininessScale(f) => {
                self.shininess = (self.shininess * f).clamp(MIN_SHININESS, MAX_SHININESS)
            }
            Action::CycleView => self.view = self.view.next(),
            Action::Quit | Action::TogglePause | Action::Reset => {}
        }
        self.keep_viewer_outside();
        *self != before
    }

    fn keep_viewer_outside(&mut self) {
        let min = self.min_distance();
        self.distance = if self.distance.is_finite() {
            self.distance.clamp(min, MAX_DISTANCE.max(min))
        } else {
            min
        };
    }

    pub fn status_text(&self, paused: bool) -> String {
        format!(
            "R1={:.2} R2={:.2} K2={:.2} shine={:.0} speed={:.2}x view={}{}  [{KEY_HELP}]",
            self.geometry.tube_radius,
            self.geometry.ring_radius,
            self.distance,
            self.shininess,
            self.speed,
            self.view.as_str(),
            if paused { " PAUSED" } else { "" },
        )
    }
}
