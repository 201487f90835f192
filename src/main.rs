use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use breathbox::cli::args::{Cli, Commands};
use breathbox::cli::{commands, Context};
use breathbox::error::BreathError;
use breathbox::logging::{self, LogTarget};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), BreathError> {
    let cli = Cli::parse();
    let ctx = Context::load(cli.output)?;

    let full_screen = match &cli.command {
        Commands::Start(args) => !args.plain,
        Commands::Pick(args) => !args.plain,
        _ => false,
    };
    let target = if full_screen {
        LogTarget::File(ctx.paths.log_file())
    } else {
        LogTarget::Stderr
    };
    logging::init(cli.verbose, &target)?;

    let format = ctx.format;
    let output = match cli.command {
        Commands::Start(args) => commands::start(&ctx, &args)?,
        Commands::Presets => commands::presets(format)?,
        Commands::Pattern(args) => commands::pattern(&ctx, args.command)?,
        Commands::Settings(args) => commands::settings(&ctx, args.command)?,
        Commands::Pick(args) => commands::pick(&ctx, &args)?,
        Commands::Completions(args) => commands::completions(&args)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
