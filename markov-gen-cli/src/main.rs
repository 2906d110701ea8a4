use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use markov_gen_core::model::MarkovGenerator;

/// Train a windowed Markov character model on a text file and print
/// generated text.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Training text file
    input: PathBuf,

    /// Length of the context window
    #[arg(long, default_value_t = 5)]
    window_size: usize,

    /// Minimum length of the generated output
    #[arg(long, default_value_t = 500)]
    output_size: usize,

    /// Seed for the random source (random runs when omitted)
    #[arg(long)]
    seed: Option<u64>,
}

/// Reads the training file and joins its lines with single spaces.
///
/// The model folds every non-letter character into the space bucket, so
/// collapsing newlines here keeps line boundaries indistinguishable from
/// ordinary word breaks.
fn read_training_text(path: &PathBuf) -> std::io::Result<String> {
    let mut contents = String::new();
    File::open(path)?.read_to_string(&mut contents)?;
    Ok(contents.lines().collect::<Vec<_>>().join(" "))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let text = read_training_text(&args.input)?;
    let mut generator = MarkovGenerator::train(&text, args.window_size)?;
    info!(
        "trained {} contexts (window size {})",
        generator.context_count(),
        generator.window_size()
    );

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let generation = generator.generate(args.output_size, &mut rng)?;
    println!("{}", generation.text);

    if generation.completed {
        info!("reached the target length of {} characters", args.output_size);
    } else {
        eprintln!(
            "generation stopped early at {} of {} characters: no matching context",
            generation.text.chars().count(),
            args.output_size
        );
    }

    Ok(())
}
