//! The sprite generation pipeline.
//!
//! resolve icon paths → create staging dir → optimize and stage each icon
//! → assemble → compile → optimize the sprite → write outputs → remove the
//! staging dir.

mod persist;
mod resolve;
mod staging;

use std::path::{Path, PathBuf};

use crate::config::{SpriteConfig, SpriterConfig};
use crate::error::{Result, SpriteError};
use crate::output::{display_path, plural, Printer};
use crate::sprite::{CompiledArtifact, SvgSpriter};
use crate::svg::{optimize_icon, optimize_sprite, OptimizeConfig};

pub use persist::persist_artifact;
pub use resolve::{generate_icon_paths, ResolvedIconPath};
pub use staging::{
    create_temp_dir, delete_temp_dir, staging_dir_path, store_icon_in_temp_dir, STAGING_PREFIX,
};

/// Configuration for one run, with built-in defaults for everything.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub spriter: SpriterConfig,
    pub icon_optimizer: OptimizeConfig,
    pub sprite_optimizer: OptimizeConfig,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            spriter: SpriterConfig::default(),
            icon_optimizer: OptimizeConfig::icon_default(),
            sprite_optimizer: OptimizeConfig::sprite_default(),
        }
    }
}

impl GenerateOptions {
    /// Built-in defaults for every stage.
    pub fn new() -> Self {
        Self::default()
    }
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    /// The staging directory used (already removed).
    pub staging_dir: PathBuf,
    pub icons: Vec<ResolvedIconPath>,
    /// Written files, sprite first.
    pub artifacts: Vec<PathBuf>,
}

/// Run the whole pipeline rooted at `working_dir`.
///
/// The staging directory is removed whether or not the run succeeds. A
/// failed cleanup after a successful run is reported as a warning.
pub fn generate_svg_sprite(
    working_dir: &Path,
    config: &SpriteConfig,
    options: &GenerateOptions,
    printer: &Printer,
) -> Result<GenerateReport> {
    let spriter_config = match &config.output_dir {
        Some(dir) => options.spriter.with_output_dir(dir),
        None => options.spriter.clone(),
    };

    let staging_dir = staging_dir_path(working_dir);
    let icons = generate_icon_paths(working_dir, &staging_dir, config);
    printer.debug("Resolved", &plural(icons.len(), "icon", "icons"));

    create_temp_dir(&staging_dir)?;
    printer.debug("Staging", &display_path(&staging_dir));

    let result = run_staged(working_dir, &icons, spriter_config, options, printer);

    match (result, delete_temp_dir(&staging_dir)) {
        (Ok(artifacts), Ok(())) => {
            printer.debug("Removed", &display_path(&staging_dir));
            Ok(GenerateReport {
                staging_dir,
                icons,
                artifacts,
            })
        }
        (Ok(artifacts), Err(cleanup)) => {
            printer.warning("Warning", &cleanup.to_string());
            Ok(GenerateReport {
                staging_dir,
                icons,
                artifacts,
            })
        }
        (Err(e), _) => Err(e),
    }
}

/// Everything between creating and removing the staging directory.
fn run_staged(
    working_dir: &Path,
    icons: &[ResolvedIconPath],
    spriter_config: SpriterConfig,
    options: &GenerateOptions,
    printer: &Printer,
) -> Result<Vec<PathBuf>> {
    let mut spriter = SvgSpriter::new(spriter_config, working_dir);

    for icon in icons {
        let optimized = optimize_icon(&icon.icon_path, &options.icon_optimizer).map_err(|e| {
            match e {
                SpriteError::IconNotFound { path, .. } => SpriteError::IconNotFound {
                    name: icon.name.clone(),
                    path,
                },
                other => other,
            }
        })?;
        store_icon_in_temp_dir(&icon.temp_icon_path, &optimized)?;
        add_staged_icon(&mut spriter, &icon.temp_icon_path)?;
        printer.debug(
            "Optimized",
            &format!("{} ({})", icon.name, display_path(&icon.icon_path)),
        );
    }

    let artifacts = spriter.compile()?;
    printer.debug(
        "Compiled",
        &format!(
            "{} into {}",
            plural(spriter.len(), "symbol", "symbols"),
            plural(artifacts.len(), "file", "files")
        ),
    );

    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let contents = finalize(&artifact, &options.sprite_optimizer)?;
        persist_artifact(&artifact.path, &contents)?;
        printer.debug("Wrote", &display_path(&artifact.path));
        written.push(artifact.path);
    }

    Ok(written)
}

/// Read a staged icon back and register it with the spriter.
fn add_staged_icon(spriter: &mut SvgSpriter, path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path).map_err(|e| SpriteError::Staging {
        path: path.to_path_buf(),
        message: format!("failed to read staged icon: {}", e),
    })?;
    spriter.add(path, &content)
}

/// SVG artifacts get the sprite cleanup; anything else passes through.
fn finalize(artifact: &CompiledArtifact, optimizer: &OptimizeConfig) -> Result<Vec<u8>> {
    if artifact.is_svg() {
        Ok(optimize_sprite(&artifact.contents, optimizer)?.into_bytes())
    } else {
        Ok(artifact.contents.clone())
    }
}
