use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;
use cinebot_config::{Config, CredentialStore, PathManager, OMDB_API_KEY_ENV, TMDB_API_KEY_ENV};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serde_json::json;

pub fn run_config(cmd: ConfigCommands, paths: &PathManager, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(paths, full, output),
        ConfigCommands::Init { force } => init_config(paths, force, output),
        ConfigCommands::Keys { tmdb, omdb } => set_keys(paths, tmdb, omdb, output),
    }
}

fn show_config(paths: &PathManager, full: bool, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    let from_file = config_file.exists();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    let mut credentials = CredentialStore::new(paths.credentials_file());
    credentials
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;

    let mask = |key: Option<String>| match key {
        Some(key) if full => key,
        Some(key) => mask_string(&key),
        None => "<not set>".to_string(),
    };
    let tmdb_key = mask(credentials.tmdb_api_key());
    let omdb_key = mask(credentials.omdb_api_key());
    let validation = config.validate().err().map(|e| e.to_string());

    match output.format() {
        OutputFormat::Human => {
            if !from_file {
                output.warn(format!(
                    "No configuration file at {}; showing defaults (run 'cinebot config init' to create one)",
                    config_file.display()
                ));
            }

            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            table.set_header(vec![
                Cell::new("Setting").add_attribute(Attribute::Bold),
                Cell::new("Value").add_attribute(Attribute::Bold),
            ]);

            let section = |name: &str| Cell::new(name).fg(Color::Cyan).add_attribute(Attribute::Bold);
            table.add_row(vec![Cell::new("Config file"), Cell::new(config_file.display())]);

            table.add_row(vec![section("Primary catalog"), Cell::new("")]);
            table.add_row(vec![Cell::new("Base URL"), Cell::new(&config.primary.base_url)]);
            table.add_row(vec![Cell::new("Image base URL"), Cell::new(&config.primary.image_base_url)]);
            table.add_row(vec![Cell::new(format!("API key ({})", TMDB_API_KEY_ENV)), Cell::new(&tmdb_key)]);

            table.add_row(vec![section("Secondary catalog"), Cell::new("")]);
            table.add_row(vec![
                Cell::new("Enabled"),
                Cell::new(if config.secondary.enabled { "✓".green().to_string() } else { "✗".red().to_string() }),
            ]);
            table.add_row(vec![Cell::new("Base URL"), Cell::new(&config.secondary.base_url)]);
            table.add_row(vec![Cell::new(format!("API key ({})", OMDB_API_KEY_ENV)), Cell::new(&omdb_key)]);

            let resolution = &config.resolution;
            table.add_row(vec![section("Resolution"), Cell::new("")]);
            table.add_row(vec![Cell::new("Strategy"), Cell::new(format!("{:?}", resolution.strategy))]);
            table.add_row(vec![Cell::new("Precedence"), Cell::new(format!("{:?}", resolution.precedence))]);
            table.add_row(vec![Cell::new("Require cross-ref"), Cell::new(resolution.require_cross_ref)]);
            table.add_row(vec![
                Cell::new("Cast limit"),
                Cell::new(resolution.cast_limit.map_or("off".to_string(), |n| n.to_string())),
            ]);
            table.add_row(vec![Cell::new("Timeout"), Cell::new(format!("{}s", resolution.timeout_secs))]);

            table.add_row(vec![section("Links"), Cell::new("")]);
            table.add_row(vec![Cell::new("Catalog template"), Cell::new(&config.links.catalog_template)]);
            table.add_row(vec![Cell::new("Streaming template"), Cell::new(&config.links.streaming_template)]);

            println!("{}", table);

            match validation {
                Some(e) => output.error(format!("Validation error: {}", e)),
                None => output.success("Configuration is valid"),
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "config_file": config_file.display().to_string(),
                "from_file": from_file,
                "config": serde_json::to_value(&config)?,
                "api_keys": {
                    "tmdb": tmdb_key,
                    "omdb": omdb_key,
                },
                "valid": validation.is_none(),
                "validation_error": validation,
            }));
        }
    }

    Ok(())
}

fn init_config(paths: &PathManager, force: bool, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    if config_file.exists() && !force {
        return Err(eyre!(
            "{} already exists (use --force to overwrite)",
            config_file.display()
        ));
    }

    paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create {}: {}", paths.config_dir().display(), e))?;
    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to write {}: {}", config_file.display(), e))?;

    output.success(format!("Wrote default configuration to {}", config_file.display()));
    Ok(())
}

fn set_keys(paths: &PathManager, tmdb: Option<String>, omdb: Option<String>, output: &Output) -> Result<()> {
    if tmdb.is_none() && omdb.is_none() {
        return Err(eyre!("Nothing to store; pass --tmdb and/or --omdb"));
    }

    let mut credentials = CredentialStore::new(paths.credentials_file());
    credentials
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;

    if let Some(key) = tmdb {
        credentials.set_tmdb_api_key(key.trim().to_string());
    }
    if let Some(key) = omdb {
        credentials.set_omdb_api_key(key.trim().to_string());
    }
    credentials
        .save()
        .map_err(|e| eyre!("Failed to save credentials: {}", e))?;

    output.success(format!("Saved API keys to {}", paths.credentials_file().display()));
    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    if s.chars().count() <= 4 {
        return "*".repeat(s.chars().count());
    }
    let chars: Vec<char> = s.chars().collect();
    format!(
        "{}***{}",
        chars[..2].iter().collect::<String>(),
        chars[chars.len() - 2..].iter().collect::<String>()
    )
}
