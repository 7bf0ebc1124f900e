mod formatter;

use anyhow::{anyhow, Result};
use chemeng::{Fluids, SolverConfig, SolverOptions, Stoichiometry, Units};
use clap::{Parser, Subcommand};
use formatter::Formatter;
use serde_json::json;
use std::io;

#[derive(Parser)]
#[command(name = "chemeng")]
#[command(about = "Unit-safe answers to everyday chemical engineering problems.")]
#[command(
    long_about = "chemeng converts quantities between unit systems, balances chemical equations and solves single-unknown physical equations.\nResults are rounded to the significant figures of the least precise input."
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a quantity to SI (or to the given units)
    ///
    /// The input is a number followed by a unit expression. Units are joined by
    /// '*' or '/', with '**' or '^' for exponents; parentheses are not supported.
    ///
    /// Examples:
    ///   chemeng convert "212 degF"
    ///   chemeng convert "1.00000 atm" --to psi
    Convert {
        /// Quantity to convert, e.g. "32.174 ft/s**2"
        input: String,
        /// Target unit expression (default: coherent SI)
        #[arg(short = 't', long = "to")]
        to: Option<String>,
        /// Print the unrounded value
        #[arg(long)]
        exact: bool,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Balance a chemical equation
    ///
    /// Reactants and products are separated by an arrow containing '>' and
    /// molecules by '+'. Parenthesized groups are expanded and any coefficients
    /// in the input are ignored.
    ///
    /// Example: chemeng balance "CH4 + O2 --> CO2 + H2O"
    Balance {
        /// Chemical equation, e.g. "CH3(CH2)2OH + O2 --> CO2 + H2O"
        equation: String,
        /// Also show the element balance matrix
        #[arg(short = 'm', long)]
        matrix: bool,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Solve Bernoulli's equation for the one unknown term
    ///
    /// Terms: v (velocity), h (height), P (pressure), rho (density).
    /// Exactly one term in either state must be "unknown".
    ///
    /// Example:
    ///   chemeng bernoulli -i "v=0.0000 ft/s" -i "h=10.000 yard" -i "P=14.6959 psi" -i "rho=998.87 kg/m**3"
    ///                     -f v=unknown -f "h=3.00123 m" -f "P=101325 pascal" -f "rho=62.423 lb/ft**3"
    Bernoulli {
        /// Initial state term (format: name=value units), repeatable
        #[arg(short = 'i', long = "initial", value_name = "NAME=VALUE", required = true)]
        initial: Vec<String>,
        /// Final state term (format: name=value units), repeatable
        #[arg(short = 'f', long = "final", value_name = "NAME=VALUE", required = true)]
        final_state: Vec<String>,
        /// Unit expression for the result (default: the term's SI unit)
        #[arg(short = 'u', long)]
        units_out: Option<String>,
        /// Ceiling on reported significant figures
        #[arg(long, default_value_t = SolverConfig::default().max_sigfigs)]
        max_sigfigs: u32,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chemeng=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Convert {
            input,
            to,
            exact,
            json,
        } => convert_command(input, to.as_deref(), *exact, *json),
        Commands::Balance {
            equation,
            matrix,
            json,
        } => balance_command(equation, *matrix, *json),
        Commands::Bernoulli {
            initial,
            final_state,
            units_out,
            max_sigfigs,
            json,
        } => bernoulli_command(initial, final_state, units_out.clone(), *max_sigfigs, *json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn convert_command(input: &str, to: Option<&str>, exact: bool, json: bool) -> Result<()> {
    let mut units = Units::new();
    let quantity = match to {
        Some(target) => units.convert_to(input, target)?,
        None => units.convert_quantity(input)?,
    };
    let reported = if exact {
        quantity
    } else {
        units.round(&quantity)
    };

    if json {
        let output = json!({
            "input": input,
            "quantity": reported,
            "sigfigs": units.sigfigs(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", reported);
    }
    Ok(())
}

fn balance_command(equation: &str, matrix: bool, json: bool) -> Result<()> {
    let stoichiometry = Stoichiometry::new(equation)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stoichiometry)?);
        return Ok(());
    }

    let formatter = Formatter::default();
    println!("{}", stoichiometry.result);
    if matrix {
        print!("{}", formatter.format_element_balance(&stoichiometry));
    }
    Ok(())
}

fn bernoulli_command(
    initial: &[String],
    final_state: &[String],
    units_out: Option<String>,
    max_sigfigs: u32,
    json: bool,
) -> Result<()> {
    let options = SolverOptions {
        units_out,
        config: SolverConfig::with_max_sigfigs(max_sigfigs),
    };
    let mut fluids = Fluids::new(
        parse_terms(initial)?,
        parse_terms(final_state)?,
        options,
    )?;
    let solution = fluids.solve_family(&chemeng::Bernoulli)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&solution)?);
    } else {
        let formatter = Formatter::default();
        print!("{}", formatter.format_solution(&solution));
    }
    Ok(())
}

/// Split `name=value` arguments
fn parse_terms(terms: &[String]) -> Result<Vec<(String, String)>> {
    terms
        .iter()
        .map(|term| {
            term.split_once('=')
                .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
                .filter(|(name, _)| !name.is_empty())
                .ok_or_else(|| anyhow!("Invalid term '{}': expected NAME=VALUE", term))
        })
        .collect()
}
