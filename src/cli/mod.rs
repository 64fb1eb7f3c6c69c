//! Command-line parsing for the AIC comparison tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! comparison and fitting code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::ModelSpec;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "aicw", version, about = "Compare statistical models by AIC and Akaike weights")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compare models from precomputed AIC values.
    Compare(CompareArgs),
    /// Fit linear models to a CSV dataset and compare them.
    Fit(FitArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct CompareArgs {
    /// Model AIC as NAME=VALUE (repeatable).
    #[arg(long = "aic", value_name = "NAME=VALUE", value_parser = parse_named_aic)]
    pub aic: Vec<(String, f64)>,

    /// CSV with `name` and `aic` columns. Rows are appended after any --aic values.
    #[arg(long, value_name = "CSV")]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Dataset CSV with a header row.
    #[arg(long, value_name = "CSV")]
    pub data: PathBuf,

    /// Model as 'NAME=response ~ terms' (repeatable), e.g. 'gdp=lifeExp ~ gdpPercap'.
    #[arg(long = "model", value_name = "NAME=FORMULA", value_parser = ModelSpec::parse, required = true)]
    pub models: Vec<ModelSpec>,

    /// Also print coefficients and fit diagnostics for each model.
    #[arg(long)]
    pub details: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Output options shared by all subcommands.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Decimal places in the printed table.
    #[arg(long, env = "AICW_DIGITS", default_value_t = 4)]
    pub digits: usize,

    /// Print rows sorted by AIC instead of input order.
    #[arg(long)]
    pub ranked: bool,

    /// Export the comparison table to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the comparison table to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

fn parse_named_aic(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing model name in '{s}'"));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid AIC value in '{s}'"))?;
    Ok((name.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compare_arguments() {
        let cli = Cli::try_parse_from([
            "aicw",
            "compare",
            "--aic",
            "pop=13553.08",
            "--aic",
            "gdp = 12850.41",
            "--ranked",
            "--digits",
            "2",
        ])
        .unwrap();

        let Command::Compare(args) = cli.command else {
            panic!("expected compare subcommand");
        };
        assert_eq!(
            args.aic,
            vec![("pop".to_string(), 13553.08), ("gdp".to_string(), 12850.41)]
        );
        assert!(args.output.ranked);
        assert_eq!(args.output.digits, 2);
    }

    #[test]
    fn parses_fit_arguments() {
        let cli = Cli::try_parse_from([
            "aicw",
            "fit",
            "--data",
            "gapminder.csv",
            "--model",
            "gdp=lifeExp ~ gdpPercap",
            "--model",
            "both=lifeExp ~ gdpPercap * year",
        ])
        .unwrap();

        let Command::Fit(args) = cli.command else {
            panic!("expected fit subcommand");
        };
        assert_eq!(args.models.len(), 2);
        assert_eq!(args.models[1].formula, "lifeExp ~ gdpPercap * year");
    }

    #[test]
    fn rejects_malformed_aic_argument() {
        assert!(Cli::try_parse_from(["aicw", "compare", "--aic", "pop"]).is_err());
        assert!(Cli::try_parse_from(["aicw", "compare", "--aic", "pop=abc"]).is_err());
    }

    #[test]
    fn fit_requires_a_model() {
        assert!(Cli::try_parse_from(["aicw", "fit", "--data", "x.csv"]).is_err());
    }
}
