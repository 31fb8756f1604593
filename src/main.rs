// taxflow CLI - parse a Form 1040 PDF and show where the money went.
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use taxflow::calculator::{self, BudgetStore};
use taxflow::config;
use taxflow::error::TaxError;
use taxflow::export;
use taxflow::format::{format_dollar_full, format_percentage};
use taxflow::parser;
use taxflow::pdf_extraction::MAX_SCAN_PAGES;
use taxflow::types::{BreakdownResult, FicaContributions, TaxInput};

#[derive(Parser, Debug)]
#[command(author, version, about = "Break down a Form 1040 tax payment into federal spending categories")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory holding budget-<year>.json tables
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print pipeline progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a Form 1040 PDF and print its spending breakdown
    Analyze {
        pdf: PathBuf,
        /// Social Security contribution (box 4 of the W-2)
        #[arg(long)]
        social_security: Option<i64>,
        /// Medicare contribution (box 6 of the W-2)
        #[arg(long)]
        medicare: Option<i64>,
        /// Write the breakdown as JSON to this path
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Compute a breakdown from manually entered amounts
    Breakdown {
        /// Total federal income tax (line 24)
        #[arg(long)]
        income_tax: i64,
        #[arg(long)]
        year: u16,
        #[arg(long)]
        social_security: Option<i64>,
        #[arg(long)]
        medicare: Option<i64>,
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Print the detected form type without computing anything
    Classify { pdf: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let data_dir = config::resolve_data_dir(cli.data_dir.clone());
    let mut store = BudgetStore::new(&data_dir);
    let verbose = cli.verbose;

    match cli.command {
        Command::Analyze {
            pdf,
            social_security,
            medicare,
            json,
        } => {
            if verbose {
                eprintln!("Reading {} (first {} pages)", pdf.display(), MAX_SCAN_PAGES);
            }
            let parsed = parser::parse_return(&pdf)?;
            if verbose {
                eprintln!(
                    "Detected Form {} for {} (year via {}): total tax ${}",
                    parsed.form_type, parsed.year, parsed.year_source, parsed.income_tax
                );
            }
            let input = TaxInput {
                income_tax: parsed.income_tax,
                year: parsed.year,
                fica: fica_from_flags(social_security, medicare),
            };
            let result = compute(&mut store, &input, verbose)?;
            print_summary(&result);
            finish_export(&result, json.as_deref(), verbose)?;
        }
        Command::Breakdown {
            income_tax,
            year,
            social_security,
            medicare,
            json,
        } => {
            let input = TaxInput {
                income_tax,
                year,
                fica: fica_from_flags(social_security, medicare),
            };
            let result = compute(&mut store, &input, verbose)?;
            print_summary(&result);
            finish_export(&result, json.as_deref(), verbose)?;
        }
        Command::Classify { pdf } => {
            let form = parser::classify_return(&pdf)?;
            println!("{form}");
        }
    }

    Ok(())
}

fn fica_from_flags(social_security: Option<i64>, medicare: Option<i64>) -> Option<FicaContributions> {
    if social_security.is_none() && medicare.is_none() {
        return None;
    }
    Some(FicaContributions {
        social_security: social_security.unwrap_or(0),
        medicare: medicare.unwrap_or(0),
    })
}

fn compute(
    store: &mut BudgetStore,
    input: &TaxInput,
    verbose: bool,
) -> Result<BreakdownResult, TaxError> {
    let path = store.budget_path(input.year);
    let budget = store.load(input.year)?;
    if verbose {
        eprintln!("Loaded budget table for {} from {}", input.year, path.display());
    }
    calculator::calculate_breakdown(input, budget)
}

fn finish_export(
    result: &BreakdownResult,
    json: Option<&std::path::Path>,
    verbose: bool,
) -> Result<(), TaxError> {
    if let Some(path) = json {
        export::write_json(result, path)?;
        if verbose {
            eprintln!("Wrote JSON export to {}", path.display());
        }
    }
    Ok(())
}

fn print_summary(result: &BreakdownResult) {
    println!(
        "Tax year {}: income tax {}, total with FICA {}",
        result.year,
        format_dollar_full(result.income_tax),
        format_dollar_full(result.total_tax)
    );
    println!();

    for category in &result.category_breakdown {
        println!(
            "  {:<36} {:>12}  ({})",
            category.name,
            format_dollar_full(category.amount),
            format_percentage(category.percentage, 1)
        );
        for sub in &category.subcategories {
            println!(
                "    - {:<32} {:>12}",
                sub.name,
                format_dollar_full(sub.amount)
            );
        }
    }

    if let Some(fica) = &result.fica_breakdown {
        println!();
        println!(
            "  FICA / Social Security               {:>12}",
            format_dollar_full(fica.social_security.total)
        );
        for entry in &fica.social_security.categories {
            println!(
                "    - {:<32} {:>12}",
                entry.name,
                format_dollar_full(entry.amount)
            );
        }
        println!(
            "  FICA / Medicare                      {:>12}",
            format_dollar_full(fica.medicare.total)
        );
        for entry in &fica.medicare.categories {
            println!(
                "    - {:<32} {:>12}",
                entry.name,
                format_dollar_full(entry.amount)
            );
        }
    }

    if let Some(cmp) = &result.national_comparison {
        println!();
        let direction = if cmp.difference >= 0 { "above" } else { "below" };
        println!(
            "  National average: {} ({} {}, {}%)",
            format_dollar_full(cmp.national_average),
            format_dollar_full(cmp.difference.abs()),
            direction,
            cmp.percent_difference
        );
        if let Some(percentile) = cmp.percentile {
            println!("  That lands around the {percentile}th percentile of filers");
        }
    }
}
