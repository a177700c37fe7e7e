//! Bullseye - native entry point
//!
//! Runs a headless, seeded session: an autopilot aims with the trajectory
//! preview and the results are logged. The browser build drives the library
//! through `web::WebGame` instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Bullseye (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let shots = args.next().and_then(|s| s.parse().ok()).unwrap_or(24);

    if let Err(e) = demo::run(seed, shots) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use bullseye::sim::{GameMode, Ring, predict_trajectory};
    use bullseye::{Game, SimConfig, SimError, from_polar};
    use glam::Vec2;

    /// Host frame length fed to the clock (60 fps display)
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Frames to wait for a target or for an arrow to settle
    const PATIENCE: u32 = 600;

    /// Host-side wall clock for a headless session
    struct Host {
        game: Game,
        now_ms: f64,
    }

    impl Host {
        fn frames(&mut self, count: u32) {
            for _ in 0..count {
                self.now_ms += FRAME_MS;
                self.game.frame(self.now_ms);
            }
        }

        fn frames_until(&mut self, done: impl Fn(&Game) -> bool) -> bool {
            for _ in 0..PATIENCE {
                if done(&self.game) {
                    return true;
                }
                self.frames(1);
            }
            done(&self.game)
        }
    }

    pub fn run(seed: u64, shots: u32) -> Result<(), SimError> {
        let mut host = Host {
            game: Game::new(SimConfig::default(), seed)?,
            now_ms: 0.0,
        };
        host.game.frame(host.now_ms);

        for shot in 0..shots {
            if !host.frames_until(|g| g.state().targets.iter().any(|t| !t.is_hit())) {
                log::warn!("No target appeared, stopping");
                break;
            }

            let Some((pull, miss_px)) = plan_shot(&host.game) else {
                log::warn!("No firing solution for shot {}", shot + 1);
                break;
            };
            log::debug!("Shot {}: pull {:?}, predicted miss {:.1}px", shot + 1, pull, miss_px);

            let origin = host.game.state().archer.center();
            let release = origin + pull;
            host.game.pointer_down(origin.x, origin.y);
            host.game.pointer_move(release.x, release.y);
            host.game.pointer_up();
            host.frames(1);

            host.frames_until(|g| g.state().active_arrows().next().is_none());

            // Move on to moving targets as soon as classic unlocks them
            let state = host.game.state();
            if state.level.mode == GameMode::Classic && state.modes.is_unlocked(GameMode::Moving) {
                host.game.select_mode(GameMode::Moving.id());
            }
        }

        report(&host.game);
        Ok(())
    }

    /// Search pull angle and length for the path passing closest to a target center
    fn plan_shot(game: &Game) -> Option<(Vec2, f32)> {
        let state = game.state();
        let config = state.config();
        let goal = state.targets.iter().find(|t| !t.is_hit())?.center();
        let bow = state.archer.bow_tip();
        let max_pull = config.physics.max_velocity / config.physics.velocity_scale;
        let min_pull = config.physics.min_launch_pull().max(20.0);

        let mut best: Option<(Vec2, f32)> = None;
        let mut distance = min_pull;
        while distance <= max_pull {
            let mut angle = -1.4f32;
            while angle <= 0.2 {
                let path = predict_trajectory(
                    bow,
                    angle,
                    distance,
                    &config.physics,
                    config.field_width,
                    config.ground_y(),
                );
                let closest = path
                    .iter()
                    .map(|p| p.distance(goal))
                    .fold(f32::INFINITY, f32::min);
                if best.is_none_or(|(_, d)| closest < d) {
                    best = Some((from_polar(distance, angle), closest));
                }
                angle += 0.01;
            }
            distance += 2.0;
        }
        best
    }

    fn report(game: &Game) {
        let snapshot = game.snapshot();
        let stats = &snapshot.stats;
        log::info!(
            "Session over at level {} ({}): score {}, {} / {} hits, accuracy {}%",
            snapshot.level.number,
            snapshot.level.mode_name,
            stats.totals.total_score,
            stats.totals.targets_hit,
            stats.totals.arrows_shot,
            stats.accuracy
        );
        log::info!(
            "Streak: current {}, best {}",
            stats.totals.current_streak,
            stats.totals.best_streak
        );
        for ring in Ring::ALL {
            log::info!(
                "  {:<8} {:>3} hits {:>5} pts",
                ring.name(),
                stats.totals.ring_hits.get(ring),
                game.state().stats.ring_points(ring)
            );
        }
        let unlocked: Vec<_> = snapshot
            .modes
            .iter()
            .filter(|m| m.unlocked)
            .map(|m| m.name)
            .collect();
        log::info!("Unlocked modes: {}", unlocked.join(", "));
    }
}
