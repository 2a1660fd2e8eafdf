//! Create command implementation.
//!
//! Writes a starter icon config, either the fixed template or one built
//! from the SVG files in a directory.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::{SpriteConfig, DEFAULT_CONFIG_FILENAME};
use crate::discovery::config_from_directory;
use crate::error::{Result, SpriteError};
use crate::output::{display_path, plural, Printer};

/// Write a starter icon config file
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Config file to write (overwritten if it exists)
    #[arg(default_value = DEFAULT_CONFIG_FILENAME)]
    pub config_file: PathBuf,

    /// List every SVG under this directory instead of the sample icons
    #[arg(long, value_name = "DIR")]
    pub scan: Option<PathBuf>,
}

pub fn run(args: CreateArgs, printer: &Printer) -> Result<()> {
    let cwd = std::env::current_dir().map_err(|e| SpriteError::Io {
        path: PathBuf::from("."),
        message: format!("Failed to read current directory: {}", e),
    })?;
    create_config(&cwd, &args, printer).map(|_| ())
}

/// Write the config relative to `working_dir`, returning its path.
pub fn create_config(working_dir: &Path, args: &CreateArgs, printer: &Printer) -> Result<PathBuf> {
    let config = match &args.scan {
        Some(dir) => {
            printer.status("Scanning", &display_path(&working_dir.join(dir)));
            let config = config_from_directory(&working_dir.join(dir), dir);
            if config.icons.is_empty() {
                printer.warning("Warning", &format!("no SVG files found in {}", dir.display()));
            }
            config
        }
        None => SpriteConfig::template(),
    };

    let path = working_dir.join(&args.config_file);
    let mut json = config.to_json()?;
    json.push('\n');

    fs::write(&path, json).map_err(|e| SpriteError::Io {
        path: path.clone(),
        message: format!("Failed to write config: {}", e),
    })?;

    printer.success(
        "Created",
        &format!(
            "{} ({})",
            display_path(&path),
            plural(config.icons.len(), "icon", "icons")
        ),
    );
    Ok(path)
}
