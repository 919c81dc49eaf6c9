use anyhow::{Context, Result};
use cli::Cli;
use config_wizard::Configuration;
use indicatif::{ProgressBar, ProgressStyle};
use pagination::{PaginationConfigBuilder, Paginator};
use std::process::ExitCode;

mod books;
mod cli;
mod config_wizard;
mod pagination;
mod preview;
mod references;
mod rendering;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();

    if let Err(e) = try_main() {
        eprintln!("{}: {e:#}", console::style("Error").red());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn try_main() -> Result<()> {
    use clap::Parser;
    let cli = Cli::parse();

    match &cli.command {
        cli::Commands::Config => config_wizard::run(&cli.config),
        cli::Commands::Build => {
            println!("Loading configuration...");
            let Configuration {
                books: books_config,
                pagination,
                ..
            } = Configuration::load(&cli.config)?;
            let paginator = Paginator::new(pagination);

            let progress = ProgressBar::new(0);
            progress.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .expect("can parse progress style")
                    .progress_chars("#>-"),
            );

            let stats = books::build_all(&books_config, &paginator, &progress)
                .with_context(|| "Failed to build books")?;

            println!();
            println!(
                "Wrote {} books ({} pages) to {}",
                stats.book_count,
                stats.page_count,
                books_config.catalog.display()
            );
            if stats.skipped_count > 0 {
                println!(
                    "  {} {} book(s) skipped, see warnings above",
                    console::style("!").yellow(),
                    stats.skipped_count
                );
            }
            Ok(())
        }
        cli::Commands::Refs => {
            let Configuration {
                books: books_config,
                references: references_config,
                ..
            } = Configuration::load(&cli.config)?;

            let index = references::build_index(&books_config.root)
                .with_context(|| "Failed to scan book pages")?;
            references::write_index(&references_config.output, &index)?;

            println!(
                "{} Wrote {} with {} codex ids.",
                console::style("[OK]").green(),
                references_config.output.display(),
                index.len()
            );
            Ok(())
        }
        cli::Commands::Paginate {
            manuscript,
            target_chars,
            min_chars,
        } => {
            let Configuration { pagination, .. } = Configuration::load(&cli.config)?;
            let pagination = PaginationConfigBuilder::default()
                .target_chars(target_chars.unwrap_or(pagination.target_chars))
                .min_chars(min_chars.unwrap_or(pagination.min_chars))
                .page_break(pagination.page_break)
                .build()
                .with_context(|| "Invalid pagination settings")?;
            preview::run(manuscript, &Paginator::new(pagination))
        }
    }
}
