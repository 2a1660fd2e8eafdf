use clap::Parser;
use miette::Result;
use vjs_sprite::cli::{Cli, Commands};
use vjs_sprite::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new().with_debug(cli.command.debug());

    match cli.command {
        Commands::Create(args) => vjs_sprite::cli::create::run(args, &printer)?,
        Commands::Generate(args) => vjs_sprite::cli::generate::run(args, &printer)?,
        Commands::Completions(args) => vjs_sprite::cli::completions::run(args)?,
    }

    Ok(())
}
