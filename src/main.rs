mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing::Level;

use cli::{CatalogArgs, Cli, Commands};
use filesig::{
    normalize_extension, Catalog, CatalogOptions, FileReport, Identifier, Outcome, WildcardMode,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            eprintln!("Error: {e:#}");
            let outcome = match e.downcast_ref::<filesig::CoreError>() {
                Some(core) => Outcome::from_error(core),
                None => Outcome::IoFailure,
            };
            ExitCode::from(outcome.exit_code())
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<Outcome> {
    match cli.command {
        Commands::Identify {
            paths,
            exhaustive,
            json,
            catalog,
        } => {
            let catalog = load_catalog(&catalog)?;
            let identifier = Identifier::new(&catalog);
            let results = filesig::identify_many(&identifier, &paths, exhaustive);

            let reports: Vec<FileReport> = paths
                .iter()
                .zip(&results)
                .map(|(path, result)| FileReport::new(path, result))
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                for report in &reports {
                    print!("{}", report.render_text());
                }
            }

            Ok(Outcome::worst(reports.iter().map(|r| r.outcome)))
        }
        Commands::List {
            extension,
            json,
            catalog,
        } => {
            let catalog = load_catalog(&catalog)?;
            let identifier = Identifier::new(&catalog);
            let entries: Vec<_> = match &extension {
                Some(ext) => {
                    let ext = normalize_extension(ext);
                    identifier.index().signatures(&catalog, &ext).collect()
                }
                None => catalog.iter().collect(),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for sig in &entries {
                    let header = sig
                        .header()
                        .map(|h| format!("{} @ {}", h, sig.header_offset()))
                        .unwrap_or_else(|| "-".to_string());
                    let trailer = sig
                        .trailer()
                        .map(|t| t.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "{:<45} {:<12} {:<20} {} | {}",
                        sig.description(),
                        sig.class(),
                        sig.extensions().join("|"),
                        header,
                        trailer
                    );
                }
            }

            Ok(if entries.is_empty() {
                Outcome::NoMatch
            } else {
                Outcome::Matched
            })
        }
    }
}

fn load_catalog(args: &CatalogArgs) -> Result<Catalog> {
    let mode = if args.drop_wildcards {
        WildcardMode::Drop
    } else {
        WildcardMode::MatchAny
    };
    let options = CatalogOptions::new().with_wildcards(mode);

    let catalog = match &args.catalog {
        Some(path) => Catalog::load(path, &options)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => Catalog::builtin_with(&options).context("Failed to build built-in catalog")?,
    };
    tracing::info!(signatures = catalog.len(), "catalog ready");
    Ok(catalog)
}
