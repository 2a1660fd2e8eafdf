pub mod completions;
pub mod create;
pub mod generate;

use clap::{Parser, Subcommand};

/// vjs-svg-sprite - Video.js SVG icon sprite generator
#[derive(Parser, Debug)]
#[command(name = "vjs-svg-sprite")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a starter icon config file
    Create(create::CreateArgs),

    /// Build the SVG sprite described by an icon config file
    Generate(generate::GenerateArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

impl Commands {
    /// Whether this command asked for debug output.
    pub fn debug(&self) -> bool {
        matches!(self, Commands::Generate(args) if args.debug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate_flags() {
        let cli = Cli::try_parse_from([
            "vjs-svg-sprite",
            "generate",
            "icons.json",
            "--svgSpriteConfigFile",
            "sprite.json",
            "--svgo-config-file",
            "svgo.yaml",
            "--debug",
        ])
        .unwrap();

        assert!(cli.command.debug());
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.config_file.to_str(), Some("icons.json"));
        assert_eq!(
            args.svg_sprite_config_file.as_deref().and_then(|p| p.to_str()),
            Some("sprite.json")
        );
        assert!(args.svgo_clean_sprite_config_file.is_none());
    }

    #[test]
    fn test_create_default_file_name() {
        let cli = Cli::try_parse_from(["vjs-svg-sprite", "create"]).unwrap();
        let Commands::Create(args) = cli.command else {
            panic!("expected create");
        };
        assert_eq!(args.config_file.to_str(), Some("vjs-icons-config.json"));
        assert!(!Commands::Create(args).debug());
    }

    #[test]
    fn test_generate_requires_config_file() {
        assert!(Cli::try_parse_from(["vjs-svg-sprite", "generate"]).is_err());
    }
}
