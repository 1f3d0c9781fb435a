#![deny(unsafe_code)]
//! Command-line driver for wavefield simulations.
//!
//! Runs a variant headless for a fixed tick count, optionally smooths the
//! result, and reports a surface summary as text or JSON. Failures exit
//! with a class-specific code (see [`error::CliError`]).

mod error;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use wavefield_core::seed::Seed;
use wavefield_core::Engine;
use wavefield_session::{snapshot, Session};

use error::CliError;

#[derive(Parser)]
#[command(name = "wavefield", version, about = "Height-field wave simulator")]
struct Cli {
    /// Emit machine-readable JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a variant headless and summarize the resulting surface.
    Run {
        /// Variant name (see `list`).
        variant: String,

        /// Number of ticks to simulate.
        #[arg(long, default_value_t = 300)]
        ticks: usize,

        /// Grid width override in cells (preset width if omitted).
        #[arg(short = 'W', long)]
        width: Option<usize>,

        /// Grid height override in cells (preset height if omitted).
        #[arg(short = 'H', long)]
        height: Option<usize>,

        /// PRNG seed for the initial surface and ambient excitation.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Parameter overrides as a JSON object.
        #[arg(long)]
        params: Option<String>,

        /// Run the smoothing pass after the final tick.
        #[arg(long)]
        smooth: bool,

        /// Write the final surface as a grayscale PNG.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the registered variants.
    List,

    /// Print a variant's parameter schema.
    Schema {
        /// Variant name (see `list`).
        variant: String,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = execute(&cli) {
        eprintln!("wavefield: {err}");
        process::exit(err.exit_code());
    }
}

fn execute(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Run {
            variant,
            ticks,
            width,
            height,
            seed,
            params,
            smooth,
            output,
        } => {
            let session = run_variant(
                variant,
                *ticks,
                *width,
                *height,
                *seed,
                params.as_deref(),
                *smooth,
            )?;
            if let Some(path) = output {
                snapshot::write_png(session.height_field(), path)?;
            }
            report(cli.json, &run_summary(&session, *ticks))?;
        }
        Command::List => {
            if cli.json {
                println!("{}", serde_json::to_string(Session::list_variants())?);
            } else {
                for name in Session::list_variants() {
                    println!("{name}");
                }
            }
        }
        Command::Schema { variant } => {
            let session = Session::from_name(variant, 0)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&session.engine().param_schema())?
            );
        }
    }
    Ok(())
}

fn run_variant(
    variant: &str,
    ticks: usize,
    width: Option<usize>,
    height: Option<usize>,
    seed_value: u64,
    params: Option<&str>,
    smooth: bool,
) -> Result<Session, CliError> {
    let (preset_w, preset_h) = Session::preset_dimensions(variant)?;
    let mut seed = Seed::new(
        variant,
        width.unwrap_or(preset_w),
        height.unwrap_or(preset_h),
        seed_value,
    );
    seed.ticks = ticks;
    if let Some(raw) = params {
        seed.params = parse_params(raw)?;
    }

    let mut session = Session::new(&seed)?;
    if smooth {
        session.smooth();
    }
    Ok(session)
}

/// Parses `--params`: must be a JSON object, not just valid JSON.
fn parse_params(raw: &str) -> Result<Value, CliError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| CliError::Input(format!("--params: {e}")))?;
    if !value.is_object() {
        return Err(CliError::Input(format!(
            "--params must be a JSON object, got: {raw}"
        )));
    }
    Ok(value)
}

fn run_summary(session: &Session, ticks: usize) -> Value {
    let field = session.height_field();
    json!({
        "variant": session.variant_name(),
        "width": field.width(),
        "height": field.height(),
        "ticks": ticks,
        "max_abs_height": field.max_abs(),
        "center_height": session.sampler().height(0.5, 0.5),
        "params": session.params(),
    })
}

fn report(as_json: bool, summary: &Value) -> Result<(), CliError> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        println!("variant:         {}", summary["variant"].as_str().unwrap_or("?"));
        println!(
            "grid:            {}x{}",
            summary["width"], summary["height"]
        );
        println!("ticks:           {}", summary["ticks"]);
        println!("max |height|:    {:.6}", summary["max_abs_height"].as_f64().unwrap_or(0.0));
        println!("center height:   {:.6}", summary["center_height"].as_f64().unwrap_or(0.0));
    }
    Ok(())
}
