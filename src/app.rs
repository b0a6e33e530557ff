use std::io::{self, Write};
use std::thread;
use std::time::Instant;

use crossterm::event::{self, Event};

use crate::{
    animation::Animator,
    config::DonutConfig,
    controls::{action_for_key, Action, Tuning},
    error::DonutError,
    shader::PhongParams,
    targets::{
        BufferTarget, PresentMode, TerminalGuard, TerminalPresenter, TerminalPresenterConfig,
    },
    Camera, Renderer, Scene,
};

/// Runs the variant the configuration asks for, writing to stdout.
pub fn run(cfg: &DonutConfig, dump: bool) -> Result<(), DonutError> {
    if dump {
        let stdout = io::stdout();
        return run_dump(cfg, &mut stdout.lock()).map(|_| ());
    }
    if cfg.variant.is_interactive() {
        return run_interactive(cfg);
    }
    let stdout = io::stdout();
    run_animation(cfg, &mut stdout.lock()).map(|_| ())
}

/// Redraws the whole grid every frame until `frames` runs out, or forever. Returns the number
/// of frames written.
pub fn run_animation<W: Write>(cfg: &DonutConfig, out: &mut W) -> Result<u64, DonutError> {
    cfg.validate()?;
    log::info!(
        "animating {} variant at {}x{}",
        cfg.variant,
        cfg.width,
        cfg.height
    );

    let mut renderer = Renderer::new(cfg.renderer_config());
    let mut target = BufferTarget::new(cfg.width, cfg.height);
    let mut presenter = TerminalPresenter::with_config(
        cfg.width,
        cfg.height,
        TerminalPresenterConfig {
            color_mode: cfg.color_mode,
            present_mode: cfg.present_mode,
        },
    );
    let mut anim = Animator::new(cfg.spin);
    let interval = cfg.frame_interval();

    let mut rendered = 0u64;
    while cfg.frames.map_or(true, |n| rendered < n) {
        renderer.render(&cfg.scene(anim.orientation()), &mut target);
        presenter.present(out, &target)?;
        rendered += 1;
        anim.tick();
        if !interval.is_zero() {
            thread::sleep(interval);
        }
    }
    Ok(rendered)
}

/// Writes frames as plain text separated by blank lines. Renders one frame unless `frames`
/// says otherwise.
pub fn run_dump<W: Write>(cfg: &DonutConfig, out: &mut W) -> Result<u64, DonutError> {
    cfg.validate()?;
    let frames = cfg.frames.unwrap_or(1);
    let mut renderer = Renderer::new(cfg.renderer_config());
    let mut target = BufferTarget::new(cfg.width, cfg.height);
    let mut anim = Animator::new(cfg.spin);

    for i in 0..frames {
        if i > 0 {
            writeln!(out)?;
        }
        let stats = renderer.render(&cfg.scene(anim.orientation()), &mut target);
        log::debug!("frame {i}: {}", stats.overlay_text());
        writeln!(out, "{}", target.to_text())?;
        anim.tick();
    }
    out.flush()?;
    Ok(frames)
}

/// Interactive session on the real terminal. Keys are read between frames; the grid is
/// presented as diffs with two status rows underneath.
pub fn run_interactive(cfg: &DonutConfig) -> Result<(), DonutError> {
    cfg.validate()?;
    let _guard = TerminalGuard::new()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut renderer = Renderer::new(cfg.renderer_config());
    let mut target = BufferTarget::new(cfg.width, cfg.height);
    let mut presenter = TerminalPresenter::with_config(
        cfg.width,
        cfg.height,
        TerminalPresenterConfig {
            color_mode: cfg.color_mode,
            present_mode: PresentMode::Diff,
        },
    );
    let mut anim = Animator::new(cfg.spin);
    let mut tuning = Tuning::from_config(cfg);
    let interval = cfg.frame_interval();
    log::info!("interactive session at {}x{}", cfg.width, cfg.height);

    let mut rendered = 0u64;
    while cfg.frames.map_or(true, |n| rendered < n) {
        let deadline = Instant::now() + interval;

        renderer.set_debug_view(tuning.view);
        renderer.set_phong(PhongParams {
            shininess: tuning.shininess,
            ..cfg.phong
        });
        let stats = renderer.render(&tuned_scene(cfg, &tuning, &anim), &mut target);
        presenter.present(&mut out, &target)?;
        presenter.write_line(&mut out, cfg.height, &tuning.status_text(anim.is_paused()))?;
        presenter.write_line(&mut out, cfg.height + 1, &stats.overlay_text())?;
        rendered += 1;
        anim.tick();

        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) => {
                    let Some(action) = action_for_key(key) else {
                        continue;
                    };
                    if !handle_action(action, cfg, &mut tuning, &mut anim) {
                        return Ok(());
                    }
                }
                Event::Resize(..) => presenter.reset(),
                _ => {}
            }
        }
    }
    Ok(())
}

fn tuned_scene(cfg: &DonutConfig, tuning: &Tuning, anim: &Animator) -> Scene {
    let camera = Camera {
        distance: tuning.distance,
        ..cfg.camera
    };
    Scene::new(tuning.geometry, camera)
        .with_light(cfg.light)
        .with_orientation(anim.orientation())
}

/// Returns false when the session should end.
fn handle_action(
    action: Action,
    cfg: &DonutConfig,
    tuning: &mut Tuning,
    anim: &mut Animator,
) -> bool {
    match action {
        Action::Quit => return false,
        Action::TogglePause => {
            let paused = anim.toggle_pause();
            log::debug!("paused: {paused}");
        }
        Action::Reset => {
            *tuning = Tuning::from_config(cfg);
            *anim = Animator::new(cfg.spin);
            log::debug!("reset to configured parameters");
        }
        other => {
            if tuning.apply(other) {
                anim.set_speed(tuning.speed);
                log::debug!("{other:?} -> {}", tuning.status_text(anim.is_paused()));
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::Variant;

    fn short(variant: Variant, frames: u64) -> DonutConfig {
        DonutConfig {
            frames: Some(frames),
            frame_interval_ms: 0,
            ..variant.preset()
        }
    }

    #[test]
    fn animation_redraws_each_frame() {
        let mut out = Vec::new();
        let n = run_animation(&short(Variant::Basic, 2), &mut out).unwrap();
        assert_eq!(n, 2);
        let s = String::from_utf8_lossy(&out);
        assert_eq!(s.matches("\x1b[2J").count(), 2);
        assert!(s.chars().any(|c| "=!*#$@".contains(c)));
    }

    #[test]
    fn color_animation_emits_ansi_colors() {
        let mut out = Vec::new();
        run_animation(&short(Variant::Color, 1), &mut out).unwrap();
        let s = String::from_utf8_lossy(&out);
        assert!(s.contains("\x1b[3"));
    }

    #[test]
    fn dump_is_plain_text() {
        let cfg = short(Variant::Basic, 2);
        let mut out = Vec::new();
        assert_eq!(run_dump(&cfg, &mut out).unwrap(), 2);
        let s = String::from_utf8(out).unwrap();
        assert!(!s.contains('\x1b'));
        // two frames of 24 rows plus one separator line
        assert_eq!(s.lines().count(), 2 * 24 + 1);
        assert!(s.lines().all(|l| l.is_empty() || l.chars().count() == 80));
    }

    #[test]
    fn dump_defaults_to_one_frame() {
        let cfg = DonutConfig {
            frames: None,
            ..Variant::Basic.preset()
        };
        let mut out = Vec::new();
        assert_eq!(run_dump(&cfg, &mut out).unwrap(), 1);
    }

    #[test]
    fn invalid_config_is_rejected_before_drawing() {
        let cfg = DonutConfig {
            width: 0,
            ..short(Variant::Basic, 1)
        };
        let mut out = Vec::new();
        assert!(matches!(
            run_animation(&cfg, &mut out),
            Err(DonutError::Config(_))
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn actions_drive_session_state() {
        let cfg = Variant::Interactive.preset();
        let mut tuning = Tuning::from_config(&cfg);
        let mut anim = Animator::new(cfg.spin);

        assert!(handle_action(Action::TogglePause, &cfg, &mut tuning, &mut anim));
        assert!(anim.is_paused());

        assert!(handle_action(Action::SpeedScale(2.0), &cfg, &mut tuning, &mut anim));
        assert_eq!(anim.speed(), 2.0);

        assert!(handle_action(Action::RingRadius(0.5), &cfg, &mut tuning, &mut anim));
        let scene = tuned_scene(&cfg, &tuning, &anim);
        assert_eq!(scene.geometry.ring_radius, 2.5);
        assert!(scene.validate().is_ok());

        assert!(handle_action(Action::Reset, &cfg, &mut tuning, &mut anim));
        assert_eq!(tuning, Tuning::from_config(&cfg));
        assert!(!anim.is_paused());

        assert!(!handle_action(Action::Quit, &cfg, &mut tuning, &mut anim));
    }
}
