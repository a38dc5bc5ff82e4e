use clap::Parser as _;
use log::LevelFilter;
use sfl::cli::{Cli, Commands};
use sfl::printer::{format_ast, format_token};
use sfl::{ParserLimits, lexer, parse};
use std::fs;
use std::process::ExitCode;

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let limits = ParserLimits::from_config_toml(&cli.config)?;
    limits.validate()?;

    match cli.command {
        Commands::Parse(args) => {
            let source = fs::read_to_string(&args.file)?;
            let ast = parse(&source, limits)?;
            println!("Parsed successfully! ({} nodes)", ast.size());
            print!("{}", format_ast(&ast, 0));
        }
        Commands::Tokens(args) => {
            let source = fs::read_to_string(&args.file)?;
            for token in lexer::tokenize(&source)? {
                println!("{}", format_token(&token));
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.trace {
        logger.filter_module("sfl", LevelFilter::Trace);
    }
    logger.init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
