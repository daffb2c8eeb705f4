//! Command dispatch and per-command handlers

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::{CatalogReport, CatalogService};
use crate::application::{ApplicationError, IoResultExt};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, OutputFormat};
use crate::domain::{flatten, parse, parse_alternative_names, to_wire, DomainError, TreeNodeConvert};
use crate::infrastructure::ServiceContainer;

/// Run the selected subcommand.
pub fn execute_command(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    match &cli.command {
        Commands::Parse { expr, format } => {
            cmd_parse(expr, format.unwrap_or(container.settings.output.format))
        }
        Commands::Flatten { expr } => cmd_flatten(expr),
        Commands::Check { file } => cmd_check(&container.catalog, file),
        Commands::Catalog { file } => cmd_catalog(&container.catalog, file),
        Commands::Aliases { file } => cmd_aliases(container, file),
        Commands::Config { command } => cmd_config(container, command),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

#[instrument(level = "debug")]
fn cmd_parse(expr: &str, format: OutputFormat) -> CliResult<()> {
    let node = parse(expr).map_err(ApplicationError::from)?;
    debug!("depth={}", node.depth());

    match format {
        OutputFormat::Tree => output::info(&node.to_tree_string()),
        OutputFormat::Json => output::info(&to_wire(&node).map_err(DomainError::from)?),
        OutputFormat::Flat => {
            let flat = serde_json::to_string(&node.flat()).map_err(|e| {
                ApplicationError::OperationFailed {
                    context: "serialize flat tokens".to_string(),
                    source: Box::new(e),
                }
            })?;
            output::info(&flat);
        }
        OutputFormat::Text => output::info(&node),
    }
    Ok(())
}

#[instrument(level = "debug")]
fn cmd_flatten(expr: &str) -> CliResult<()> {
    let node = parse(expr).map_err(ApplicationError::from)?;
    for token in flatten(&node) {
        output::info(token);
    }
    Ok(())
}

fn cmd_check(catalog: &CatalogService, file: &Path) -> CliResult<()> {
    let report = catalog.catalog_file(file)?;
    print_failures(file, &report);

    let total = report.entries.len() + report.failures.len();
    if report.is_clean() {
        output::success(&format!("{total} records parsed"));
        Ok(())
    } else {
        Err(CliError::Rejected(format!(
            "{} of {} records rejected",
            report.failures.len(),
            total
        )))
    }
}

fn cmd_catalog(catalog: &CatalogService, file: &Path) -> CliResult<()> {
    let report = catalog.catalog_file(file)?;
    for entry in &report.entries {
        let line = serde_json::to_string(entry).map_err(|e| ApplicationError::OperationFailed {
            context: format!("serialize entry for line {}", entry.line),
            source: Box::new(e),
        })?;
        output::info(&line);
    }

    for failure in &report.failures {
        output::warning(&format!(
            "{}:{}: skipped: {}",
            file.display(),
            failure.line,
            failure.error
        ));
    }
    Ok(())
}

fn print_failures(file: &Path, report: &CatalogReport) {
    if report.is_clean() {
        return;
    }
    output::header(&format!("Rejected records in {}", file.display()));
    for failure in &report.failures {
        output::failure(&format!("line {}: {}", failure.line, failure.error));
        output::detail(&failure.subgenre);
    }
}

fn cmd_aliases(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let note = container
        .fs
        .read_to_string(file)
        .with_path_context("read note", file)?;
    let names = parse_alternative_names(&note).map_err(DomainError::from)?;
    for name in &names {
        output::info(name);
    }
    Ok(())
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::action("global", "<no config directory>"),
            }
            let cwd = std::env::current_dir().with_path_context("resolve", Path::new("."))?;
            output::action("local", &local_config_path(&cwd).display());
        }
    }
    Ok(())
}
