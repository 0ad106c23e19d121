use super::prompts;
use crate::output::Output;
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::Path;
use watchindex_config::{Config, PathManager, StorageBackendKind};

pub fn run_config(
    cmd: ConfigCommands,
    paths: &PathManager,
    config_path: &Path,
    loaded: anyhow::Result<Config>,
    output: &Output,
) -> Result<()> {
    match cmd {
        ConfigCommands::Show => {
            let config = loaded
                .map_err(|e| eyre!("Failed to load config from {}: {}", config_path.display(), e))?;
            show_config(&config, paths, config_path, output)
        }
        ConfigCommands::Init { force } => init_config(paths, config_path, force, output),
        ConfigCommands::Path => {
            if output.is_human() {
                output.info(config_path.display().to_string());
            } else {
                output.json(&json!({ "path": config_path.display().to_string() }));
            }
            Ok(())
        }
    }
}

fn backend_label(backend: StorageBackendKind) -> &'static str {
    match backend {
        StorageBackendKind::File => "file",
        StorageBackendKind::Memory => "memory",
        StorageBackendKind::None => "none",
    }
}

fn show_config(config: &Config, paths: &PathManager, config_path: &Path, output: &Output) -> Result<()> {
    let storage_dir = config.storage.resolve_dir(paths);
    let validation = config.validate();

    if !output.is_human() {
        output.json(&json!({
            "config_file": config_path.display().to_string(),
            "config_file_exists": config_path.exists(),
            "valid": validation.is_ok(),
            "storage": {
                "backend": backend_label(config.storage.backend),
                "key": config.storage.key,
                "dir": storage_dir.display().to_string(),
            },
            "logging": {
                "level": config.logging.level,
                "json": config.logging.json_enabled(),
                "json_configured": config.logging.json,
                "file": config.logging.resolve_file(paths).map(|p| p.display().to_string()),
            },
        }));
        return Ok(());
    }

    if output.is_quiet() {
        return Ok(());
    }

    if !config_path.exists() {
        output.warn(format!(
            "Configuration file not found at {}; showing defaults. Run 'watchindex config init' to create it.",
            config_path.display()
        ));
    }

    let mut info_table = Table::new();
    info_table.set_header(vec![
        Cell::new("Config File").add_attribute(comfy_table::Attribute::Bold),
        Cell::new(config_path.display().to_string()),
    ]);
    info_table.load_preset(comfy_table::presets::UTF8_FULL);
    info_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    println!("{}", info_table);
    println!();

    let mut storage_table = Table::new();
    storage_table.set_header(vec![
        Cell::new("Storage").fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold),
    ]);
    storage_table.add_row(vec![Cell::new("Backend"), Cell::new(backend_label(config.storage.backend))]);
    storage_table.add_row(vec![Cell::new("Key"), Cell::new(&config.storage.key)]);
    if config.storage.backend == StorageBackendKind::File {
        storage_table.add_row(vec![Cell::new("Directory"), Cell::new(storage_dir.display().to_string())]);
    }
    storage_table.load_preset(comfy_table::presets::UTF8_FULL);
    storage_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    println!("{}", storage_table);
    println!();

    let mut logging_table = Table::new();
    logging_table.set_header(vec![
        Cell::new("Logging").fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold),
    ]);
    logging_table.add_row(vec![Cell::new("Level"), Cell::new(&config.logging.level)]);
    logging_table.add_row(vec![
        Cell::new("JSON"),
        Cell::new(match config.logging.json {
            Some(true) => "✓".green().to_string(),
            Some(false) => "✗".red().to_string(),
            None if config.logging.json_enabled() => format!("{} (auto, stdout is not a terminal)", "✓".green()),
            None => format!("{} (auto, stdout is a terminal)", "✗".red()),
        }),
    ]);
    logging_table.add_row(vec![
        Cell::new("File"),
        Cell::new(
            config.logging
                .resolve_file(paths)
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(stderr)".to_string()),
        ),
    ]);
    logging_table.load_preset(comfy_table::presets::UTF8_FULL);
    logging_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    println!("{}", logging_table);

    if let Err(e) = validation {
        println!();
        output.error(format!("Configuration is invalid: {}", e));
    }

    Ok(())
}

fn init_config(paths: &PathManager, config_path: &Path, force: bool, output: &Output) -> Result<()> {
    if config_path.exists() && !force {
        if !output.is_human() {
            return Err(eyre!(
                "{} already exists; pass --force to overwrite it",
                config_path.display()
            ));
        }
        let prompt = format!("{} already exists. Overwrite it with defaults?", config_path.display());
        if !prompts::prompt_yes_no(&prompt, Some(false), output)? {
            output.info("Configuration left unchanged");
            return Ok(());
        }
    }

    paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create application directories: {}", e))?;

    let config = Config::default();
    config
        .save_to_file(config_path)
        .map_err(|e| eyre!("Failed to write config to {}: {}", config_path.display(), e))?;

    if output.is_human() {
        output.success(format!("Wrote default configuration to {}", config_path.display()));
    } else {
        output.json(&json!({ "path": config_path.display().to_string(), "written": true }));
    }
    Ok(())
}
