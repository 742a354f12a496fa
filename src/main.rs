//! Umbra - Side-view character controller demo
//!
//! Runs a scripted, headless session through the demo scene and logs what the
//! character does. Pass a settings file path as the first argument to override
//! `~/.config/umbra/settings.toml`.

mod scene;
mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use glam::Vec2;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use umbra_core::GameTime;
use umbra_game::{InputAction, InputState, InteractionResult};

use scene::Scene;
use settings::GameSettings;

/// One stretch of scripted input
struct Step {
    frames: u32,
    horizontal: f32,
    vertical: f32,
    held: &'static [InputAction],
    /// Pressed on the first frame of the step only
    pressed: &'static [InputAction],
    /// Cursor target in world space
    aim: Option<Vec2>,
    /// Game time is frozen for the step
    paused: bool,
}

impl Step {
    const fn idle(frames: u32) -> Self {
        Self {
            frames,
            horizontal: 0.0,
            vertical: 0.0,
            held: &[],
            pressed: &[],
            aim: None,
            paused: false,
        }
    }

    const fn walk(frames: u32, horizontal: f32) -> Self {
        Self {
            horizontal,
            ..Self::idle(frames)
        }
    }

    const fn press(action: &'static [InputAction]) -> Self {
        Self {
            pressed: action,
            ..Self::idle(1)
        }
    }

    fn holds(&self, action: InputAction, frame: u32) -> bool {
        self.held.contains(&action) || (frame == 0 && self.pressed.contains(&action))
    }

    /// Update `input` for `frame` of this step. Held state carries over from
    /// `previous`, so only real presses and releases become edges.
    fn feed(&self, input: &mut InputState, previous: Option<&Step>, frame: u32) {
        input.clear_frame();
        input.set_axes(self.horizontal, self.vertical);

        // A tap still down from a one-frame step is let go before the next press
        let tapped = |action: &InputAction| {
            frame == 0
                && previous.is_some_and(|prev| prev.pressed.contains(action) && !prev.held.contains(action))
        };
        let released: Vec<InputAction> = input
            .held
            .iter()
            .filter(|action| !self.holds(**action, frame) || tapped(*action))
            .copied()
            .collect();
        for action in released {
            input.release(action);
        }

        for action in self.held {
            input.press(*action);
        }
        if frame == 0 {
            for action in self.pressed {
                input.press(*action);
            }
        }
    }
}

const SCRIPT: &[Step] = &[
    Step::idle(30),
    Step::walk(40, 1.0),
    Step::press(&[InputAction::Interact]),
    Step::walk(40, 1.0),
    Step::press(&[InputAction::Interact]),
    Step {
        aim: Some(Vec2::new(9.0, 1.5)),
        ..Step::press(&[InputAction::Use])
    },
    Step::idle(20),
    Step {
        paused: true,
        ..Step::walk(15, 1.0)
    },
    Step {
        held: &[InputAction::Jump],
        ..Step::idle(10)
    },
    Step::idle(40),
    Step {
        vertical: -1.0,
        ..Step::walk(30, -1.0)
    },
    Step {
        held: &[InputAction::Sprint],
        ..Step::walk(90, -1.0)
    },
    Step::press(&[InputAction::Drop]),
    Step::idle(30),
];

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    info!("Starting Umbra...");

    let settings_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = GameSettings::load(settings_path.as_deref());
    let mut scene = Scene::build(&settings)?;
    let mut time = GameTime::new(settings.time.clone());

    let mut input = InputState::new();
    let mut knockbacks = 0;
    let mut aim = Vec2::ZERO;

    let mut previous: Option<&Step> = None;
    for step in SCRIPT {
        if step.paused != time.paused {
            if step.paused {
                time.pause();
            } else {
                time.resume();
            }
        }
        for frame in 0..step.frames {
            step.feed(&mut input, previous, frame);
            if let Some(target) = step.aim {
                aim = target;
            }
            input.cursor_screen = scene.camera.world_to_screen(aim);

            time.update(settings.demo.frame_delta);
            for _ in 0..time.fixed_steps() {
                scene.fixed_update(&input);
            }

            let events = scene.update(&input, time.now());
            if let Some(InteractionResult::ShowText(text)) = &events.interaction {
                info!("Sign: {}", text);
            }
            if let Some(report) = &events.action {
                info!("Flash hit {} of {} rays", report.hit_count(), report.rays.len());
            }
            if events.knockback.is_some() {
                knockbacks += 1;
            }
        }
        previous = Some(step);
    }

    info!(
        "Finished at {:?} ({}), {} item(s) held, {} mark(s) in the world, {} knockback(s)",
        scene.character.position(),
        scene.character.state(),
        scene.character.inventory().len(),
        scene.marks.len(),
        knockbacks
    );

    if settings.demo.save_on_exit {
        settings.save(settings_path.as_deref())?;
    }

    Ok(())
}
