//! Generate command implementation.
//!
//! Loads the icon config and any override files, then runs the pipeline
//! in the current directory.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::{load_override, parse_config_file};
use crate::error::{Result, SpriteError};
use crate::output::{display_path, plural, Printer};
use crate::pipeline::{generate_svg_sprite, GenerateOptions, GenerateReport};

/// Build the SVG sprite described by an icon config file
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Icon config file (JSON)
    pub config_file: PathBuf,

    /// Sprite assembly settings override (JSON or YAML)
    #[arg(long, value_name = "FILE", alias = "svgSpriteConfigFile")]
    pub svg_sprite_config_file: Option<PathBuf>,

    /// Per-icon optimizer override (JSON or YAML)
    #[arg(long, value_name = "FILE", alias = "svgoConfigFile")]
    pub svgo_config_file: Option<PathBuf>,

    /// Sprite optimizer override (JSON or YAML)
    #[arg(long, value_name = "FILE", alias = "svgoCleanSpriteConfigFile")]
    pub svgo_clean_sprite_config_file: Option<PathBuf>,

    /// Trace every pipeline step
    #[arg(long)]
    pub debug: bool,
}

pub fn run(args: GenerateArgs, printer: &Printer) -> Result<()> {
    let cwd = std::env::current_dir().map_err(|e| SpriteError::Io {
        path: PathBuf::from("."),
        message: format!("Failed to read current directory: {}", e),
    })?;
    generate_in(&cwd, &args, printer).map(|_| ())
}

/// Run `generate` with relative paths resolved against `working_dir`.
pub fn generate_in(
    working_dir: &Path,
    args: &GenerateArgs,
    printer: &Printer,
) -> Result<GenerateReport> {
    let config_path = working_dir.join(&args.config_file);
    let Some(config) = parse_config_file(Some(&config_path))? else {
        return Err(SpriteError::ConfigParse {
            message: "no config file given".to_string(),
            help: None,
        });
    };
    printer.debug("Loaded", &display_path(&config_path));

    let options = load_options(working_dir, args, printer)?;

    let count = plural(config.icons.len(), "icon", "icons");
    printer.status("Generating", &format!("sprite from {}", count));
    let report = generate_svg_sprite(working_dir, &config, &options, printer)?;

    for artifact in &report.artifacts {
        printer.info("Wrote", &printer.bold(&display_path(artifact)));
    }
    printer.success("Finished", &plural(report.artifacts.len(), "file", "files"));
    Ok(report)
}

/// Built-in defaults, with each override file replacing its stage's config.
fn load_options(
    working_dir: &Path,
    args: &GenerateArgs,
    printer: &Printer,
) -> Result<GenerateOptions> {
    let mut options = GenerateOptions::new();

    if let Some(path) = &args.svg_sprite_config_file {
        let path = working_dir.join(path);
        options.spriter = load_override(&path)?;
        printer.debug(
            "Override",
            &format!("sprite config from {}", display_path(&path)),
        );
    }
    if let Some(path) = &args.svgo_config_file {
        let path = working_dir.join(path);
        options.icon_optimizer = load_override(&path)?;
        printer.debug(
            "Override",
            &format!("icon optimizer from {}", display_path(&path)),
        );
    }
    if let Some(path) = &args.svgo_clean_sprite_config_file {
        let path = working_dir.join(path);
        options.sprite_optimizer = load_override(&path)?;
        printer.debug(
            "Override",
            &format!("sprite optimizer from {}", display_path(&path)),
        );
    }

    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn args(config_file: &str) -> GenerateArgs {
        GenerateArgs {
            config_file: PathBuf::from(config_file),
            svg_sprite_config_file: None,
            svgo_config_file: None,
            svgo_clean_sprite_config_file: None,
            debug: false,
        }
    }

    fn setup(dir: &Path) {
        fs::write(
            dir.join("icons.json"),
            r#"{ "icons": { "play": "play.svg" } }"#,
        )
        .unwrap();
        fs::write(
            dir.join("play.svg"),
            r#"<svg viewBox="0 0 24 24"><path d="M8 5v14l11-7z"/></svg>"#,
        )
        .unwrap();
    }

    #[test]
    fn test_generate_with_defaults() {
        let dir = tempdir().unwrap();
        setup(dir.path());

        let report = generate_in(dir.path(), &args("icons.json"), &Printer::silent()).unwrap();

        assert_eq!(report.artifacts.len(), 2);
        assert!(dir.path().join("vjs-sprite/vjs-sprite-icons.svg").exists());
    }

    #[test]
    fn test_generate_with_overrides() {
        let dir = tempdir().unwrap();
        setup(dir.path());
        fs::write(
            dir.path().join("sprite.yaml"),
            "shape:\n  id:\n    generator: \"icon-%s\"\nmode:\n  symbol:\n    example: null\n",
        )
        .unwrap();
        fs::write(dir.path().join("clean.json"), r#"{ "plugins": [] }"#).unwrap();

        let mut args = args("icons.json");
        args.svg_sprite_config_file = Some(PathBuf::from("sprite.yaml"));
        args.svgo_clean_sprite_config_file = Some(PathBuf::from("clean.json"));

        let report = generate_in(dir.path(), &args, &Printer::silent()).unwrap();
        assert_eq!(report.artifacts.len(), 1);

        let sprite =
            fs::read_to_string(dir.path().join("vjs-sprite/vjs-sprite-icons.svg")).unwrap();
        assert!(sprite.contains(r#"id="icon-play""#));
        assert!(sprite.contains("xmlns:xlink"));
    }

    #[test]
    fn test_generate_missing_config() {
        let dir = tempdir().unwrap();
        let result = generate_in(dir.path(), &args("nope.json"), &Printer::silent());
        assert!(matches!(result, Err(SpriteError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_generate_missing_override() {
        let dir = tempdir().unwrap();
        setup(dir.path());
        let mut args = args("icons.json");
        args.svgo_config_file = Some(PathBuf::from("svgo.json"));

        let result = generate_in(dir.path(), &args, &Printer::silent());
        assert!(matches!(result, Err(SpriteError::ConfigNotFound { .. })));
        assert!(!dir.path().join("vjs-sprite").exists());
    }
}
