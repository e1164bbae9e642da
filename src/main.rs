//! Lane Runner entry point
//!
//! Headless native driver: loads settings, then lets the autopilot play at a
//! fixed timestep and logs what happens. Rendering and sound playback belong
//! to a host application that consumes `DrawList` and `SoundRequest`.
//!
//! Usage: `lane-runner [settings.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lane_runner::consts::SIM_DT;
    use lane_runner::renderer::DrawList;
    use lane_runner::sim::{Game, GameEvent, TickInput, tick};
    use lane_runner::{AssetHandles, Settings};

    /// Simulated seconds the demo runs for
    const DEMO_SECONDS: f32 = 120.0;

    env_logger::init();
    log::info!("Lane Runner (native) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => load_settings(&path),
        None => Settings::default(),
    };
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::warn!("Bad seed ({}), using 0", e);
            0
        }
        None => 0,
    };

    let mut game = Game::new(settings, AssetHandles::default(), seed);
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut draw_list = DrawList::new();
    let mut runs = Vec::new();

    let ticks = (DEMO_SECONDS / SIM_DT).round() as u32;
    for _ in 0..ticks {
        tick(&mut game, &input, SIM_DT);

        let out = game.take_output();
        for event in &out.events {
            log::debug!("{:?}", event);
            if let GameEvent::RunEnded { score } = event {
                runs.push(*score);
            }
        }
        for sound in &out.sounds {
            log::trace!("play {} at {:.2}", sound.effect.as_str(), sound.volume);
        }

        draw_list.clear();
        game.draw(&mut draw_list);
    }

    log::info!(
        "Finished {} runs in {}s; current score {}, last frame had {} draw commands",
        runs.len(),
        DEMO_SECONDS,
        game.state().score(),
        draw_list.len()
    );
    println!("runs: {:?}, in progress: {}", runs, game.state().score());
}

#[cfg(not(target_arch = "wasm32"))]
fn load_settings(path: &str) -> lane_runner::Settings {
    use lane_runner::Settings;

    match std::fs::read_to_string(path) {
        Ok(json) => match Settings::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::warn!("Failed to parse {}: {:?}", path, e);
                Settings::default()
            }
        },
        Err(e) => {
            log::warn!("Failed to read {}: {:?}", path, e);
            Settings::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // A wasm host drives `lane_runner::sim::tick` itself
}
