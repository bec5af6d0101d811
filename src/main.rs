use clap::Parser;
use macroquad::prelude::*;
use neuroflap::simulation::episode::EpisodeStatus;
use neuroflap::simulation::evolution::Evolution;
use neuroflap::simulation::params::Params;
use tracing::{error, info};

mod graphics;

/// Watch a population of birds learn to fly through pipes.
#[derive(Parser, Debug)]
#[command(name = "neuroflap", version)]
struct Cli {
    /// JSON parameter file; missing fields use the defaults.
    #[arg(long)]
    config: Option<String>,
    /// Seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,
    /// Simulation ticks per rendered frame.
    #[arg(long, default_value_t = 1)]
    ticks_per_frame: u32,
}

const MAX_TICKS_PER_FRAME: u32 = 64;

#[macroquad::main("Neuroflap")]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let mut state = match build_state(&cli) {
        Ok(state) => state,
        Err(err) => {
            error!("{err:#}");
            return;
        }
    };
    let mut ticks_per_frame = cli.ticks_per_frame.clamp(1, MAX_TICKS_PER_FRAME);

    info!("Starting neuroflap viewer");

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        if is_key_pressed(KeyCode::Up) {
            ticks_per_frame = (ticks_per_frame * 2).min(MAX_TICKS_PER_FRAME);
        }
        if is_key_pressed(KeyCode::Down) {
            ticks_per_frame = (ticks_per_frame / 2).max(1);
        }

        if state.status() == EpisodeStatus::Succeeded {
            graphics::draw_success_screen(&state);
            next_frame().await;
            continue;
        }

        for _ in 0..ticks_per_frame {
            let status = match state.tick() {
                Ok(status) => status,
                Err(err) => {
                    error!("simulation failed: {err}");
                    return;
                }
            };

            match status {
                EpisodeStatus::Running => {}
                EpisodeStatus::Succeeded => break,
                EpisodeStatus::Extinct => {
                    if let Err(err) = state.evolve() {
                        error!("evolution failed: {err}");
                        return;
                    }
                }
            }
        }

        clear_background(WHITE);
        graphics::draw_pipes(&state);
        graphics::draw_birds(&state);
        graphics::draw_hud(&state, ticks_per_frame);

        next_frame().await
    }
}

fn build_state(cli: &Cli) -> anyhow::Result<Evolution> {
    let params = match &cli.config {
        Some(path) => Params::load_from_file(path)?,
        None => Params::default(),
    };

    let state = match cli.seed {
        Some(seed) => Evolution::with_seed(params, seed)?,
        None => Evolution::new(params)?,
    };
    Ok(state)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
