//! Command dispatch

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::matrix;
use crate::application::services::{read_input, HierarchyService};
use crate::application::IoResultExt;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{self, TreeArena};
use crate::tree_traits::TreeNodeConvert;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see `orgtree --help`".to_string(),
        ));
    };

    if let Commands::Completion { shell } = command {
        completion(*shell);
        return Ok(());
    }

    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);

    match command {
        Commands::Report { file } => report(&settings, file.as_deref()),
        Commands::Show { file } => show(&settings, file.as_deref()),
        Commands::Trace { file } => trace(&settings, file.as_deref()),
        Commands::Export { file, output } => export(&settings, file.as_deref(), output.as_deref()),
        Commands::Import { document } => import(&settings, document),
        Commands::Find { label, file } => find(&settings, label, file.as_deref()),
        Commands::Cell { file, row, column } => cell(file, *row, *column),
        Commands::Entropy { file } => entropy(file.as_deref()),
        Commands::Config { command } => config(&settings, command),
        Commands::Completion { .. } => Ok(()),
    }
}

fn build_tree(settings: &Settings, file: Option<&Path>) -> CliResult<TreeArena> {
    let service = HierarchyService::new(settings)?;
    let input = read_input(file)?;
    Ok(service.build(&input)?)
}

#[instrument(skip(settings))]
fn report(settings: &Settings, file: Option<&Path>) -> CliResult<()> {
    let tree = build_tree(settings, file)?;
    output::data(&domain::report(&tree));
    Ok(())
}

#[instrument(skip(settings))]
fn show(settings: &Settings, file: Option<&Path>) -> CliResult<()> {
    let tree = build_tree(settings, file)?;
    print!("{}", tree.to_tree_string());
    Ok(())
}

#[instrument(skip(settings))]
fn trace(settings: &Settings, file: Option<&Path>) -> CliResult<()> {
    let tree = build_tree(settings, file)?;
    print!("{}", domain::trace(&tree));
    Ok(())
}

#[instrument(skip(settings))]
fn export(settings: &Settings, file: Option<&Path>, target: Option<&Path>) -> CliResult<()> {
    let service = HierarchyService::new(settings)?;
    let tree = service.build(&read_input(file)?)?;
    match target {
        Some(path) => {
            service.save_document(&tree, path)?;
            output::action("Exported", &path.display());
        }
        None => output::data(&service.to_json(&tree)?),
    }
    Ok(())
}

#[instrument(skip(settings))]
fn import(settings: &Settings, document: &Path) -> CliResult<()> {
    let service = HierarchyService::new(settings)?;
    let tree = service.load_document(document)?;
    output::data(&domain::report(&tree));
    Ok(())
}

#[instrument(skip(settings))]
fn find(settings: &Settings, label: &str, file: Option<&Path>) -> CliResult<()> {
    let tree = build_tree(settings, file)?;
    let idx = tree.find(label)?;
    let node = tree
        .get_node(idx)
        .ok_or_else(|| domain::DomainError::NodeNotFound(label.to_string()))?;

    output::header(&node.data.label);
    let parent = node.parent.and_then(|p| tree.label(p)).unwrap_or("-");
    output::field("parent", parent);
    let children: Vec<&str> = node.children.iter().filter_map(|&c| tree.label(c)).collect();
    output::field("children", &children.join(" "));
    output::field("relation", &node.data.relation);
    Ok(())
}

#[instrument]
fn cell(file: &Path, row: usize, column: usize) -> CliResult<()> {
    let value = matrix::cell_in_file(file, row, column)?;
    output::data(&value);
    Ok(())
}

#[instrument]
fn entropy(file: Option<&Path>) -> CliResult<()> {
    let text = read_input(file)?;
    let value = matrix::row_entropy(&text)?;
    output::data(&value);
    Ok(())
}

fn config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            print!("{}", settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Init { path, force } => config_init(path.clone(), *force),
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => {
                    let state = if path.exists() { "exists" } else { "not found" };
                    output::data(&format!("global: {} ({state})", path.display()));
                }
                None => output::warning("no global config directory available"),
            }
            Ok(())
        }
    }
}

fn config_init(path: Option<PathBuf>, force: bool) -> CliResult<()> {
    let path = path.or_else(global_config_path).ok_or_else(|| {
        CliError::InvalidArgs("no global config directory available, pass a path".into())
    })?;
    if path.exists() && !force {
        return Err(CliError::Usage(format!(
            "{} already exists, use --force to overwrite",
            path.display()
        )));
    }
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_path_context("create config dir", dir)?;
    }
    fs::write(&path, Settings::template()).with_path_context("write config", &path)?;
    output::success(&format!("Created {}", path.display()));
    Ok(())
}

fn completion(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
