use std::path::PathBuf;

use clap::{Parser, Subcommand};
use env_logger;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use follower_matrix::config::Settings;
use follower_matrix::errors::PipelineError;
use follower_matrix::export;
use follower_matrix::pipeline;
use follower_matrix::source::FollowerDir;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the bipartite follower matrix and export it
    Build {
        /// Directory of per-account media follower files
        #[arg(long)]
        media: PathBuf,
        /// Directory of politician follower files (augmentation tier)
        #[arg(long)]
        politicians: PathBuf,
        /// Output directory for the matrix files
        #[arg(short, long)]
        output: PathBuf,
        /// Run identifier used in output file names
        #[arg(long)]
        run: String,
        /// Country/region tag used in output file names
        #[arg(long)]
        country: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize the logger first thing
    env_logger::init();

    info!("Starting follower-matrix");

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            media,
            politicians,
            output,
            run,
            country,
        } => run_build(media, politicians, output, &run, &country)?,
    }
    Ok(())
}

fn run_build(
    media: PathBuf,
    politicians: PathBuf,
    output: PathBuf,
    run: &str,
    country: &str,
) -> Result<(), PipelineError> {
    let settings = Settings::new()?;
    debug!("Settings loaded: {:?}", settings);

    let mut rng = match settings.sample_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let media_source = FollowerDir::new(&media);
    let augmentation_source = FollowerDir::new(&politicians);

    let graph = pipeline::run_build(&settings, &media_source, &augmentation_source, &mut rng)?;

    info!("Pulling bipartite matrix from network graph");
    let matrix = export::extract(&graph)?;
    export::write_matrix(&matrix, &output, country, run)?;

    info!(
        "Done: {} users x {} accounts, {} nonzero entries",
        matrix.row_names.len(),
        matrix.col_names.len(),
        matrix.indices.len()
    );
    Ok(())
}
