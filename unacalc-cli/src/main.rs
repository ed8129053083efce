//! unacalc command line
//!
//! Evaluates one expression given as arguments and prints the result:
//!
//! ```text
//! $ unacalc 1 km + 500 m in m
//! 1500.000 m
//! $ unacalc --precision 1 --json 1000 g in kg
//! {"unit":"kg","value":"1.0"}
//! ```

use serde_json::json;
use std::env;
use std::process::ExitCode;
use tracing::error;
use unacalc::{evaluate_with, FormatOptions, Notation};

struct Args {
    expression: String,
    precision: u8,
    notation: Notation,
    json: bool,
}

fn print_usage() {
    eprintln!("usage: unacalc [OPTIONS] <EXPRESSION>");
    eprintln!();
    eprintln!("options:");
    eprintln!("  -p, --precision <N>   digits after the decimal point, 1-10 (default 3)");
    eprintln!("  -s, --scientific      scientific notation");
    eprintln!("      --json            JSON output: {{\"value\":...,\"unit\":...}}");
    eprintln!("  -h, --help            show this help");
    eprintln!();
    eprintln!("examples:");
    eprintln!("  unacalc '2 + 3 * 4'");
    eprintln!("  unacalc '3 * 5 m/s^2 in km/h^2'");
    eprintln!("  unacalc 'now + 5 days'");
}

fn parse_args() -> Result<Args, String> {
    let mut precision = 3;
    let mut notation = Notation::Normal;
    let mut json = false;
    let mut words = Vec::new();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage();
                std::process::exit(0);
            }
            "-p" | "--precision" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--precision requires a value".to_string())?;
                precision = value
                    .parse::<u8>()
                    .map_err(|_| format!("invalid precision: {}", value))?;
                if !(FormatOptions::MIN_PRECISION..=FormatOptions::MAX_PRECISION)
                    .contains(&precision)
                {
                    return Err(format!("precision out of range 1-10: {}", precision));
                }
            }
            "-s" | "--scientific" => notation = Notation::Scientific,
            "--json" => json = true,
            _ => words.push(arg),
        }
    }

    if words.is_empty() {
        return Err("missing expression".to_string());
    }
    Ok(Args {
        expression: words.join(" "),
        precision,
        notation,
        json,
    })
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("UNACALC_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("error: {}", message);
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    let options = FormatOptions::new(args.precision, args.notation);
    match evaluate_with(&args.expression, options) {
        Ok((value, unit)) => {
            if args.json {
                println!("{}", json!({ "value": value, "unit": unit }));
            } else if unit.is_empty() {
                println!("{}", value);
            } else {
                println!("{} {}", value, unit);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(expression = %args.expression, %err, "evaluation failed");
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
