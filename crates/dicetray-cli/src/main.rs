// ABOUTME: Command-line interface for the dicetray roll engine.
// ABOUTME: Forwards chat-style arguments to the engine, with JSON and seeded output.

use clap::Parser;

use dicetray::{Error, FastRng, Report};

#[derive(Parser)]
#[command(name = "dicetray")]
#[command(about = "A chat-style dice roller with bound, keep, and explosion options")]
#[command(version)]
struct Cli {
    /// Print the report as JSON instead of display lines
    #[arg(long)]
    json: bool,

    /// Seed the RNG for reproducible rolls
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Dice notation and roll options, handed to the roll engine
    /// (`dicetray -- --help` shows the engine's own listing)
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    let mut rng = match cli.seed {
        Some(seed) => FastRng::with_seed(seed),
        None => FastRng::new(),
    };

    match dicetray::roll_with_rng(&cli.args, &mut rng) {
        Ok(report) => {
            if cli.json {
                print_json(&report);
            } else {
                for line in report.lines() {
                    println!("{}", line);
                }
            }
        }
        Err(Error::Help(usage)) => {
            println!("{}", usage);
        }
        Err(Error::InvalidArgs(message)) => {
            eprintln!("{}", message);
            std::process::exit(1);
        }
    }
}

fn print_json(report: &Report) {
    use serde_json::json;

    let output = json!({
        "count": report.spec().count,
        "sides": report.spec().sides,
        "modifier": report.spec().modifier,
        "rolls": report.rolls(),
        "total": report.total(),
        "generated": report.generated(),
        "rerolls": report.rerolls(),
        "survivors": report.survivors(),
        "sum": report.sum(),
        "mean": report.mean(),
    });

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}
