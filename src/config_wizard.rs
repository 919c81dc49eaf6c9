//! Interactive configuration wizard for creating `pagebook.toml`.
//!
//! The wizard collects the books root, catalog and reference index output paths, and the
//! pagination budget through a series of prompts, offering the current defaults (or the values
//! of an existing configuration) as starting points.

use crate::books::BooksConfig;
use crate::pagination::PaginationConfig;
use crate::references::ReferencesConfig;
use anyhow::{anyhow, Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Complete configuration for a pagebook project.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Configuration {
    pub books: BooksConfig,
    pub pagination: PaginationConfig,
    pub references: ReferencesConfig,
}

impl Configuration {
    /// Load the configuration at `path`, falling back to the defaults when there is no such file.
    pub fn load(path: &Path) -> Result<Configuration> {
        if !path.exists() {
            log::info!("No {} found, using default configuration", path.display());
            return Ok(Configuration::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to load {} contents", path.display()))?;
        let mut config: Configuration = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        // the splitter compares against trimmed lines
        config.pagination.page_break = config.pagination.page_break.trim().to_string();
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.pagination.target_chars == 0 {
            return Err(anyhow!("pagination.target_chars must be greater than zero"));
        }
        if self.pagination.page_break.trim().is_empty() {
            return Err(anyhow!("pagination.page_break must not be blank"));
        }
        Ok(())
    }
}

/// Run the interactive configuration wizard.
///
/// Prompts for every setting, then writes the configuration to `config_path`.
pub fn run(config_path: &Path) -> Result<()> {
    let theme = ColorfulTheme {
        ..ColorfulTheme::default()
    };

    // start from whatever is already there so re-running the wizard is an edit
    let current = Configuration::load(config_path).unwrap_or_default();

    let root: String = Input::with_theme(&theme)
        .with_prompt("Books directory")
        .default(current.books.root.display().to_string())
        .interact()
        .with_context(|| "Failed to obtain books directory")?;
    let root = PathBuf::from(root);
    if !root.is_dir() {
        println!(
            "{}: '{}' isn't a directory yet",
            console::style("Warning").yellow(),
            root.display()
        );
    }

    let catalog: String = Input::with_theme(&theme)
        .with_prompt("Book catalog output file")
        .default(current.books.catalog.display().to_string())
        .interact()
        .with_context(|| "Failed to obtain catalog path")?;
    let mut catalog = PathBuf::from(catalog);
    let ext = catalog
        .extension()
        .map(std::ffi::OsStr::to_ascii_lowercase)
        .unwrap_or_default();
    if ext != *"json" {
        catalog.set_extension("json");
    }

    let clean_stale_pages = Confirm::with_theme(&theme)
        .with_prompt("Delete leftover pages when a book gets shorter?")
        .default(current.books.clean_stale_pages)
        .interact()?;

    let target_chars: usize = Input::with_theme(&theme)
        .with_prompt("Target characters per page")
        .default(current.pagination.target_chars)
        .validate_with(|input: &usize| {
            if *input > 0 {
                Ok(())
            } else {
                Err("Target must be greater than zero")
            }
        })
        .interact()?;

    let min_chars: usize = Input::with_theme(&theme)
        .with_prompt("Minimum characters for a page before a chapter heading")
        .default(current.pagination.min_chars.min(target_chars))
        .validate_with(|input: &usize| {
            if *input <= target_chars {
                Ok(())
            } else {
                Err("Minimum can't exceed the target")
            }
        })
        .interact()?;

    let page_break: String = Input::with_theme(&theme)
        .with_prompt("Forced page break line")
        .default(current.pagination.page_break.clone())
        .validate_with(|input: &String| {
            if input.trim().is_empty() {
                Err("Page break line can't be blank")
            } else {
                Ok(())
            }
        })
        .interact()?;

    let references: String = Input::with_theme(&theme)
        .with_prompt("Codex reference index output file")
        .default(current.references.output.display().to_string())
        .interact()
        .with_context(|| "Failed to obtain reference index path")?;

    let config = Configuration {
        books: BooksConfig {
            root,
            catalog,
            clean_stale_pages,
        },
        pagination: PaginationConfig {
            target_chars,
            min_chars,
            page_break: page_break.trim().to_string(),
        },
        references: ReferencesConfig {
            output: PathBuf::from(references),
        },
    };

    let contents =
        toml::to_string_pretty(&config).with_context(|| "Failed to convert configuration to TOML")?;

    if config_path.exists()
        && !Confirm::with_theme(&theme)
            .with_prompt(format!(
                "{} already exists, do you want to override it?",
                config_path.display()
            ))
            .interact()?
    {
        println!("Configuration:");
        println!("{}", contents);
    } else {
        std::fs::write(config_path, contents)
            .with_context(|| "Failed to write configuration file")?;
        println!("{} written!", config_path.display());
    }

    Ok(())
}
