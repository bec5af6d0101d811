use anyhow::{Context, Result};
use clap::Parser;
use neuroflap::simulation::episode::EpisodeStatus;
use neuroflap::simulation::evolution::{Evolution, RunOutcome};
use neuroflap::simulation::history::GenerationReport;
use neuroflap::simulation::params::Params;
use tracing::info;

/// Evolve birds without a window and print one report per generation.
#[derive(Parser, Debug)]
#[command(name = "neuroflap-train", version)]
struct Cli {
    /// JSON parameter file; missing fields use the defaults.
    #[arg(long)]
    config: Option<String>,
    /// Seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many generations.
    #[arg(long)]
    generations: Option<u32>,
    /// Print reports as JSON lines instead of text.
    #[arg(long)]
    json: bool,
    /// Write the effective parameters to this file and exit.
    #[arg(long)]
    dump_config: Option<String>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let params = match &cli.config {
        Some(path) => Params::load_from_file(path)
            .with_context(|| format!("failed to load parameters from {path}"))?,
        None => Params::default(),
    };

    if let Some(path) = &cli.dump_config {
        params
            .save_to_file(path)
            .with_context(|| format!("failed to write parameters to {path}"))?;
        return Ok(());
    }

    let mut state = match cli.seed {
        Some(seed) => Evolution::with_seed(params, seed)?,
        None => Evolution::new(params)?,
    };

    let outcome = loop {
        let generation_limit = cli
            .generations
            .is_some_and(|max| state.generation() > max);
        if generation_limit {
            break RunOutcome::GenerationLimit;
        }

        let status = state.run_episode()?;
        let report = state.evolve()?;
        print_report(&report, cli.json)?;

        if status == EpisodeStatus::Succeeded {
            break RunOutcome::Succeeded {
                generation: report.generation,
            };
        }
    };

    let history = state.history();
    match outcome {
        RunOutcome::Succeeded { generation } => {
            info!(generation, best_score = state.best_score(), "training succeeded");
        }
        RunOutcome::Stopped | RunOutcome::GenerationLimit => {
            info!(best_score = state.best_score(), "generation limit reached");
        }
    }
    info!(
        generations = history.reports.len(),
        avg_max_score = history.avg_max_score(),
        avg_mean_fitness = history.avg_mean_fitness(),
        resets = history.reinitialized_count(),
        "recent generations"
    );

    Ok(())
}

fn print_report(report: &GenerationReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(report)?);
    } else {
        println!(
            "gen {:>5}  ticks {:>6}  score {:>3}  best {:>3}  mean fitness {:>9.1}{}",
            report.generation,
            report.ticks,
            report.max_score,
            report.best_score,
            report.mean_fitness,
            match (report.status, report.reinitialized) {
                (EpisodeStatus::Succeeded, _) => "  (success)",
                (_, true) => "  (reset)",
                _ => "",
            }
        );
    }
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
