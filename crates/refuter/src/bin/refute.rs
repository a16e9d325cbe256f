//! Command-line front end: refute a set of formulas and print the proof log
//!
//! Try:
//!   refute "Human(Socrates)" "∀x(Human(x) → Mortal(x))" --goal "Mortal(Socrates)"
//!
//! Exit code: 0 refuted, 1 not refuted, 2 undetermined, 3 error.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use refuter::{ClauseSource, ProofLog, Prover, ProverConfig, SubsumptionMode, Verdict};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "refute", version, about = "Resolution refutation prover for first-order logic")]
struct Args {
    /// Formulas to refute, e.g. "∀x(Human(x) → Mortal(x))"
    formulas: Vec<String>,

    /// Read one formula per line; blank lines and lines starting with `#` are skipped
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Goal to prove; its negation is added to the formulas
    #[arg(long, value_name = "FORMULA")]
    goal: Option<String>,

    /// JSON prover configuration; the flags below override it
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[arg(long, value_name = "N")]
    max_steps: Option<usize>,

    #[arg(long, value_name = "N")]
    max_clauses: Option<usize>,

    /// Discard only resolvents that repeat a clause up to literal order
    #[arg(long)]
    exact_subsumption: bool,

    /// Print the proof log as JSON
    #[arg(long)]
    json: bool,

    /// Log every registered clause and resolution step to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok((verdict, log)) => {
            if args.json {
                match log.to_json() {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("error: {}", e);
                        return ExitCode::from(3);
                    }
                }
            } else {
                print!("{}", log);
                if let Some(ids) = log.proof_clauses() {
                    let ids: Vec<String> = ids.iter().map(|id| format!("[{}]", id)).collect();
                    println!("proof uses {}", ids.join(" "));
                }
            }
            println!("verdict: {}", verdict);
            ExitCode::from(match verdict {
                Verdict::Refuted => 0,
                Verdict::NotRefuted => 1,
                Verdict::Undetermined => 2,
            })
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(3)
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(Verdict, ProofLog), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => ProverConfig::load(path)?,
        None => ProverConfig::default(),
    };
    if let Some(n) = args.max_steps {
        config.max_steps = n;
    }
    if let Some(n) = args.max_clauses {
        config.max_clauses = n;
    }
    if args.exact_subsumption {
        config.subsumption = SubsumptionMode::Exact;
    }

    let mut formulas = args.formulas.clone();
    if let Some(path) = &args.file {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        formulas.extend(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(String::from),
        );
    }

    let mut prover = Prover::new(config);
    for (i, formula) in formulas.iter().enumerate() {
        prover.add_formula(formula, ClauseSource::Premise(i + 1))?;
    }
    if let Some(goal) = &args.goal {
        prover.add_formula(&format!("¬({})", goal), ClauseSource::NegatedGoal)?;
    }
    Ok(prover.run()?)
}
