//! Slingshot entry point
//!
//! Native builds run a headless autoplay session: a simple planner tries
//! shots on a copy of the game, fires the one that collects the most stars,
//! and logs events until the game is complete. The browser build is driven
//! from `slingshot::web`.

#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use std::time::{SystemTime, UNIX_EPOCH};

    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use slingshot::Settings;
    use slingshot::sim::{GameEvent, GameState, SimError, pointer_down, pointer_move, pointer_up, tick};

    /// Ticks to simulate when judging a shot
    const LOOKAHEAD_TICKS: u32 = 240;
    /// Ticks to wait between shots
    const SHOT_INTERVAL_TICKS: u32 = 90;
    /// Give up after this many ticks (10 minutes at 60 Hz)
    const MAX_TICKS: u32 = 60 * 600;

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    /// Drag the active bird from the sling to `release` and let go
    fn shoot(state: &mut GameState, release: Vec2) -> Result<bool, SimError> {
        let at = state.spawn_point();
        if !pointer_down(state, at)? {
            return Ok(false);
        }
        pointer_move(state, release)?;
        Ok(pointer_up(state)?.is_some())
    }

    /// Stars collected (and targets toppled) by a shot, judged on a copy
    fn score_shot(state: &GameState, release: Vec2) -> Result<(usize, usize), SimError> {
        let mut trial = state.clone();
        trial.drain_events();
        if !shoot(&mut trial, release)? {
            return Ok((0, 0));
        }
        let (mut stars, mut targets) = (0, 0);
        for _ in 0..LOOKAHEAD_TICKS {
            tick(&mut trial);
            for event in trial.drain_events() {
                match event {
                    GameEvent::StarCollected { .. } => stars += 1,
                    GameEvent::TargetToppled { .. } => targets += 1,
                    _ => {}
                }
            }
        }
        Ok((stars, targets))
    }

    /// Pick the best release point from a fan of pulls toward the upper right
    fn plan_shot(state: &GameState, rng: &mut Pcg32) -> Result<Vec2, SimError> {
        let anchor = state.spawn_point();
        let mut best: Option<((usize, usize), Vec2)> = None;

        for degrees in (10..=80).step_by(5) {
            let angle = (degrees as f32).to_radians();
            for pull in (40..=220).step_by(20) {
                let release = anchor - Vec2::new(angle.cos(), -angle.sin()) * pull as f32;
                let score = score_shot(state, release)?;
                if best.is_none_or(|(s, _)| score > s) {
                    best = Some((score, release));
                }
            }
        }

        match best {
            Some((score, release)) if score > (0, 0) => Ok(release),
            _ => {
                let pull = Vec2::new(rng.random_range(40.0..200.0), -rng.random_range(0.0..150.0));
                Ok(anchor - pull)
            }
        }
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let settings = match std::env::args().nth(1) {
            Some(path) => Settings::load_from(path)?,
            None => Settings::load(),
        };
        let seed = settings.seed.unwrap_or_else(clock_seed);
        let mut planner_rng = Pcg32::seed_from_u64(seed ^ 0x5eed);
        let mut state = GameState::new(settings, seed);
        log::info!("Autoplay seed {}", state.seed);
        let mut shots = 0u32;
        let mut next_shot = 0u32;

        for frame in 0..MAX_TICKS {
            if !state.is_running() {
                break;
            }
            if frame >= next_shot && state.phase == slingshot::sim::GamePhase::Active {
                let release = plan_shot(&state, &mut planner_rng)?;
                if shoot(&mut state, release)? {
                    shots += 1;
                    log::info!("Shot {} released at ({:.0}, {:.0})", shots, release.x, release.y);
                }
                next_shot = frame + SHOT_INTERVAL_TICKS;
            }

            tick(&mut state);

            for event in state.drain_events() {
                match event {
                    GameEvent::LevelComplete { level } => {
                        log::info!("Congratulations! Level {} complete", level)
                    }
                    GameEvent::GameComplete => log::info!("Game completed"),
                    GameEvent::StarCollected { id } => log::info!("Star {} collected", id),
                    other => log::debug!("{:?}", other),
                }
            }
        }

        if state.is_running() {
            log::warn!(
                "Stopped after {} ticks on level {} with {} stars left (seed {})",
                state.time_ticks(),
                state.level,
                state.stars.len(),
                state.seed
            );
        } else {
            log::info!(
                "Finished in {} shots, {} ticks (seed {})",
                shots,
                state.time_ticks(),
                state.seed
            );
        }
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use std::sync::{Mutex, Once};

        use super::*;
        use slingshot::consts::MAX_LEVEL;
        use slingshot::sim::GamePhase;

        static RECORDS: Mutex<Vec<String>> = Mutex::new(Vec::new());
        static INIT: Once = Once::new();

        struct Capture;

        impl log::Log for Capture {
            fn enabled(&self, metadata: &log::Metadata) -> bool {
                metadata.level() <= log::Level::Info
            }

            fn log(&self, record: &log::Record) {
                if self.enabled(record.metadata()) {
                    RECORDS.lock().unwrap().push(record.args().to_string());
                }
            }

            fn flush(&self) {}
        }

        fn capture_logs() {
            INIT.call_once(|| {
                log::set_logger(&Capture).unwrap();
                log::set_max_level(log::LevelFilter::Info);
            });
        }

        fn settings() -> Settings {
            Settings::with_canvas(1920.0, 600.0)
        }

        #[test]
        fn test_trial_shot_leaves_real_game_untouched() {
            capture_logs();
            let mut state = GameState::new(settings(), 42);
            // Last level with no stars left: any trial clears it and finishes
            state.level = MAX_LEVEL;
            state.stars.clear();
            state.events.push(GameEvent::StarCollected { id: 99 });
            let before = state.snapshot();
            let ticks = state.time_ticks();

            score_shot(&state, state.spawn_point() - Vec2::new(100.0, -50.0)).unwrap();

            assert_eq!(state.snapshot(), before);
            assert_eq!(state.time_ticks(), ticks);
            assert_eq!(state.phase, GamePhase::Active);
            assert_eq!(state.events, vec![GameEvent::StarCollected { id: 99 }]);
            assert!(state.timers.is_empty());

            let records = RECORDS.lock().unwrap();
            assert!(
                records
                    .iter()
                    .all(|r| !r.starts_with("Level ") && r != "Game complete"),
                "transition logged during a trial: {:?}",
                *records
            );
        }

        #[test]
        fn test_trial_of_same_shot_reaches_completion() {
            let mut trial = GameState::new(settings(), 42);
            trial.level = MAX_LEVEL;
            trial.stars.clear();
            let release = trial.spawn_point() - Vec2::new(100.0, -50.0);
            assert!(shoot(&mut trial, release).unwrap());
            for _ in 0..LOOKAHEAD_TICKS {
                tick(&mut trial);
            }
            assert_eq!(trial.phase, GamePhase::Completed);
            assert!(trial.drain_events().contains(&GameEvent::GameComplete));
        }

        #[test]
        fn test_seed_replays_opening_board() {
            let first = GameState::new_randomized(settings(), 7);
            let replay = GameState::new_randomized(settings(), first.seed);
            assert_eq!(replay.targets, first.targets);
            assert_eq!(replay.stars, first.stars);
            assert_eq!(replay.birds, first.birds);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Slingshot (native autoplay) starting...");

    if let Err(e) = autoplay::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is slingshot::web::start, this is just to satisfy the compiler
}
