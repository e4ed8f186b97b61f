//! Snake Arcade entry point
//!
//! Headless driver: loads settings, then lets the autopilot play a few runs
//! through the mode controller, logging what a renderer would draw.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use snake_arcade::mode::{Mode, ModeController};
    use snake_arcade::platform::{Autopilot, FrameClock, InputEvent};
    use snake_arcade::settings::Settings;
    use snake_arcade::sim::GameEvent;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Snake Arcade starting...");

    let settings = Settings::load();
    log::info!(
        "Pacing {}, {} autopilot runs",
        settings.pacing.as_str(),
        settings.autopilot_runs
    );

    let mut controller = ModeController::new(settings.storage());
    let mut autopilot = Autopilot::new(settings.autopilot_runs);
    let mut clock = FrameClock::new();
    let mut run_ticks: u64 = 0;

    while controller.is_running() {
        if controller.mode() == Mode::Playing && run_ticks >= settings.max_ticks_per_run {
            log::warn!("Run hit the {} tick cap, abandoning", settings.max_ticks_per_run);
            controller.handle_input(InputEvent::Cancel);
            run_ticks = 0;
        }

        if let Some(event) = autopilot.next_event(&controller) {
            controller.handle_input(event);
        }

        if controller.mode() == Mode::Playing {
            run_ticks += 1;
            for event in controller.update() {
                match event {
                    GameEvent::GameOver { score } => {
                        let snapshot = controller.snapshot();
                        log::info!("Game over: score {} (best {})", score, snapshot.best_score);
                        for row in &snapshot.leaderboard {
                            let marker = if row.is_current { "<" } else { "" };
                            log::info!("  {:>4} {:>6} {}", row.label, row.score, marker);
                        }
                    }
                    GameEvent::LevelUp { level } => log::info!("Level {}", level),
                    other => log::debug!("{:?}", other),
                }
            }
        } else {
            run_ticks = 0;
            if let Some(status) = controller.status() {
                log::info!("{}", status.text);
            }
        }

        clock.wait(settings.pacing.frame_wait(controller.tick_interval()));
    }

    log::info!(
        "Exiting after {} frames (best score {})",
        clock.frames(),
        controller.best_score()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless driver on the web
}
