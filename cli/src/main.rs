//! airban CLI - prohibited travel items catalog builder
//!
//! A command-line tool for building, refining, and repairing the static
//! catalog artifacts served by the items web application.

use airban::{
    assign_sub_categories, build_from_paths, build_taxonomy, repair_file, BuildOptions, Catalog,
};
use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;

/// Prohibited travel items catalog pipeline
#[derive(Parser)]
#[command(
    name = "airban",
    author = "airban",
    version,
    about = "Build the prohibited travel items catalog from spreadsheet exports",
    long_about = "airban - prohibited travel items catalog pipeline.\n\n\
                  Reconciles the authority ban list with the search-term list\n\
                  into static JSON artifacts for the items web application.\n\n\
                  Usage:\n  \
                  airban build -a authority.csv -t terms.csv   Build catalog + autocomplete\n  \
                  airban categories                            Assign sub-categories, emit taxonomy\n  \
                  airban repair                                Re-shape a catalog file canonically"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the catalog and autocomplete artifacts from the two CSV sources
    Build {
        /// Authority ban-list CSV (GUBUN/CARRY_BAN/CABIN/TRUST columns)
        #[arg(short, long)]
        authority: PathBuf,

        /// Search-term frequency CSV
        #[arg(short, long)]
        terms: PathBuf,

        /// Output directory for the JSON artifacts
        #[arg(short, long, default_value = "data")]
        out_dir: PathBuf,

        /// Jurisdiction code keying rule summaries
        #[arg(long, default_value = "KR")]
        country: String,

        /// Citation recorded for every item (default: the KR authority source)
        #[arg(long)]
        citation: Option<String>,
    },

    /// Assign sub-categories in place and emit the category taxonomy
    Categories {
        /// Catalog file to refine
        #[arg(default_value = "data/items.kr.json")]
        items: PathBuf,

        /// Taxonomy output path (default: categories.<cc>.json next to the catalog)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Re-shape a catalog file into the canonical field layout
    Repair {
        /// Catalog file to repair in place
        #[arg(default_value = "data/items.kr.json")]
        items: PathBuf,
    },

    /// Show catalog statistics
    Info {
        /// Catalog file to inspect
        #[arg(default_value = "data/items.kr.json")]
        items: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Build {
            authority,
            terms,
            out_dir,
            country,
            citation,
        } => {
            let pb = create_spinner("Reading source exports...");

            let mut options = BuildOptions::new().with_country(&country);
            if let Some(citation) = citation {
                options = options.with_source_citation(citation);
            }

            let artifacts = build_from_paths(&authority, &terms, &options)?;

            pb.set_message("Writing artifacts...");
            fs::create_dir_all(&out_dir)?;
            let cc = country.to_lowercase();
            let items_path = out_dir.join(format!("items.{}.json", cc));
            let ac_path = out_dir.join(format!("autocomplete.{}.json", cc));
            artifacts.catalog.save(&items_path)?;
            artifacts.autocomplete.save(&ac_path)?;

            pb.finish_and_clear();
            println!(
                "{} Generated {} items -> {}",
                "✓".green().bold(),
                artifacts.catalog.items.len(),
                items_path.display()
            );
            println!(
                "{} Generated {} terms -> {}",
                "✓".green().bold(),
                artifacts.autocomplete.terms.len(),
                ac_path.display()
            );
        }

        Commands::Categories { items, out } => {
            let pb = create_spinner("Refining sub-categories...");

            let mut catalog = Catalog::load(&items)?;
            assign_sub_categories(&mut catalog);
            let taxonomy = build_taxonomy(&catalog);
            catalog.save(&items)?;

            let out = out.unwrap_or_else(|| {
                let parent = items.parent().unwrap_or(std::path::Path::new("."));
                parent.join(format!("categories.{}.json", catalog.country.to_lowercase()))
            });
            taxonomy.save(&out)?;

            pb.finish_and_clear();
            println!(
                "{} Updated sub-categories in {}",
                "✓".green().bold(),
                items.display()
            );
            println!(
                "{} Generated {} categories -> {}",
                "✓".green().bold(),
                taxonomy.categories.len(),
                out.display()
            );
        }

        Commands::Repair { items } => {
            let pb = create_spinner("Repairing catalog...");

            let count = repair_file(&items)?;

            pb.finish_and_clear();
            println!(
                "{} Normalized {} items in {}",
                "✓".green().bold(),
                count,
                items.display()
            );
        }

        Commands::Info { items } => {
            let catalog = Catalog::load(&items)?;

            println!("{}", "Catalog Information".cyan().bold());
            println!("{}", "─".repeat(40));
            println!("{}: {}", "File".bold(), items.display());
            println!("{}: {}", "Country".bold(), catalog.country);
            println!("{}: {}", "Items".bold(), catalog.items.len());

            let published = catalog.items.iter().filter(|i| i.published).count();
            println!("{}: {}", "Published".bold(), published);
            let translated = catalog.items.iter().filter(|i| i.name_en.is_some()).count();
            println!("{}: {}", "With English name".bold(), translated);

            let mut per_category: Vec<(String, usize)> = Vec::new();
            for item in &catalog.items {
                let name = item.primary_category.to_string();
                match per_category.iter_mut().find(|(n, _)| *n == name) {
                    Some((_, count)) => *count += 1,
                    None => per_category.push((name, 1)),
                }
            }
            per_category.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

            println!("\n{}", "Primary Categories".cyan().bold());
            println!("{}", "─".repeat(40));
            for (name, count) in per_category {
                println!("{}: {}", name.bold(), count);
            }
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn print_version() {
    println!("{} {}", "airban".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Prohibited travel items catalog pipeline");
    println!();
    println!("Artifacts: items, autocomplete, categories (static JSON)");
    println!("Repository: https://github.com/airban/airban");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_build_args() {
        let cli = Cli::parse_from([
            "airban", "build", "-a", "authority.csv", "-t", "terms.csv", "--country", "KR",
        ]);
        match cli.command {
            Commands::Build {
                authority,
                terms,
                out_dir,
                country,
                citation,
            } => {
                assert_eq!(authority, PathBuf::from("authority.csv"));
                assert_eq!(terms, PathBuf::from("terms.csv"));
                assert_eq!(out_dir, PathBuf::from("data"));
                assert_eq!(country, "KR");
                assert!(citation.is_none());
            }
            _ => panic!("Expected build command"),
        }
    }

    #[test]
    fn test_repair_default_path() {
        let cli = Cli::parse_from(["airban", "repair"]);
        match cli.command {
            Commands::Repair { items } => {
                assert_eq!(items, PathBuf::from("data/items.kr.json"));
            }
            _ => panic!("Expected repair command"),
        }
    }
}
