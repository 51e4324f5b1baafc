use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use kalori_core::{Analyzer, AnalyzerOptions, Estimate, LinearModel, NotUnderstood, ReferenceData};
use kalori_data::{load_linear_model, load_or_empty};
use std::path::PathBuf;

mod config;
mod state;

const BUILD_SHA: &str = env!("KALORI_BUILD_SHA");

#[derive(Parser, Debug)]
#[command(name = "kalori", version, about = "Estimate calories and macros from a meal description")]
struct Cli {
    /// Reference data directory (overrides config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Linear model JSON (overrides config)
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate nutrition for a meal, e.g. `kalori estimate 2 adet yumurta`
    Estimate {
        /// Meal description; multiple words are joined with spaces
        #[arg(required = true)]
        text: Vec<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List known foods and their per-piece weight
    Foods {
        #[arg(long)]
        json: bool,
    },

    /// Show what was loaded: food count, features, model source
    Status,

    /// Write ~/.kalori/config.toml with defaults
    Init,
}

/// Where the calorie model came from.
#[derive(Debug, Clone)]
enum ModelSource {
    File(PathBuf),
    Atwater,
}

/// Everything a command needs after config and flags are merged.
struct Session {
    analyzer: Analyzer<LinearModel>,
    data_dir: PathBuf,
    source: ModelSource,
}

impl Session {
    fn open(data_dir: Option<PathBuf>, model: Option<PathBuf>) -> Result<Self> {
        let cfg = config::load_config()?;
        let data_dir = data_dir.unwrap_or(cfg.data.dir);
        tracing::debug!(data_dir = %data_dir.display(), "opening session");
        let store = load_or_empty(&data_dir);
        let (model, source) = load_model(model.or(cfg.model.path))?;
        let analyzer = Analyzer::new(store, model).with_options(AnalyzerOptions::from(&cfg.matching));
        Ok(Self { analyzer, data_dir, source })
    }
}

fn main() -> Result<()> {
    init_tracing()?;
    let cli = Cli::parse();

    match cli.command {
        Command::Init => {
            config::init_config()?;
        }

        Command::Estimate { text, json } => {
            let session = Session::open(cli.data_dir, cli.model)?;
            let text = text.join(" ");
            let estimate = session
                .analyzer
                .estimate(&text)
                .with_context(|| format!("estimating '{text}'"))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&estimate)?);
            } else {
                print_estimate(&text, &estimate);
            }
        }

        Command::Foods { json } => {
            let session = Session::open(cli.data_dir, cli.model)?;
            let store = session.analyzer.store();
            if store.is_empty() {
                bail!("no reference data loaded from {}", session.data_dir.display());
            }
            if json {
                println!("{}", serde_json::to_string_pretty(store.foods())?);
            } else {
                print_foods(store);
            }
        }

        Command::Status => {
            let session = Session::open(cli.data_dir, cli.model)?;
            print_status(&session);
        }
    }

    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("KALORI_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn load_model(path: Option<PathBuf>) -> Result<(LinearModel, ModelSource)> {
    match path {
        Some(p) => {
            let model = load_linear_model(&p)?;
            Ok((model, ModelSource::File(p)))
        }
        None => Ok((LinearModel::atwater(), ModelSource::Atwater)),
    }
}

fn print_estimate(input: &str, estimate: &Estimate) {
    match estimate {
        Estimate::Understood(report) => {
            println!("Input: {input}\n");
            println!(
                "{:<14} {:>8} {:<10} {:>9} {:>8} {:>8} {:>8}",
                "food", "grams", "method", "kcal", "protein", "fat", "carbs"
            );
            for item in &report.items {
                let n = &item.nutrition;
                println!(
                    "{:<14} {:>8.1} {:<10} {:>9.1} {:>8.1} {:>8.1} {:>8.1}",
                    item.food, item.amount, item.method, n.calories, n.protein, n.fat, n.carbs
                );
            }
            let t = &report.totals;
            println!(
                "\nTotal {:.1} kcal | protein {:.1} g | fat {:.1} g | carbs {:.1} g",
                t.calories, t.protein, t.fat, t.carbs
            );
        }
        Estimate::NotUnderstood(NotUnderstood::DataUnavailable) => {
            println!("Reference data is unavailable, so nothing could be understood.");
            println!("Total 0.0 kcal");
        }
        Estimate::NotUnderstood(NotUnderstood::NoUnderstandableInput) => {
            println!("Sorry, couldn't tell what you ate. Try something like \"2 adet yumurta\".");
            println!("Total 0.0 kcal");
        }
    }
}

fn print_status(session: &Session) {
    let store = session.analyzer.store();
    println!("build:    {BUILD_SHA}");
    println!("data:     {}", session.data_dir.display());
    println!("foods:    {}", store.foods().len());
    println!("units:    {}", store.unit_count());
    println!("methods:  {}", store.method_names().collect::<Vec<_>>().join(", "));
    println!("features: {}", store.feature_names().len());
    let options = session.analyzer.options();
    println!("matching: cutoff {} | default method {}", options.cutoff, options.default_method);
    let weights = session.analyzer.model().weights.len();
    match &session.source {
        ModelSource::File(p) => println!("model:    {} ({weights} weights)", p.display()),
        ModelSource::Atwater => println!("model:    atwater (no model file configured)"),
    }
    if store.is_empty() {
        println!("\nReference data unavailable; every estimate will be 'not understood'.");
    }
}

fn print_foods(store: &ReferenceData) {
    println!("{} foods\n", store.foods().len());
    for food in store.foods() {
        println!(
            "- {:<14} {:>6.1} g/piece | per 100 g: protein {:.1}, fat {:.1}, carbs {:.1}",
            food.name, food.unit_grams, food.protein_per_100g, food.fat_per_100g, food.carb_per_100g
        );
    }
}
