use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sfl")]
#[command(about = "Parser for the sfl expression language")]
pub struct Cli {
    /// Log every parsing procedure attempt
    #[arg(long, global = true)]
    pub trace: bool,

    /// Limits configuration file
    #[arg(long, global = true, default_value = "sfl.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a source file and print the AST
    Parse(FileArgs),
    /// Lex a source file and print every token
    Tokens(FileArgs),
}

#[derive(clap::Args)]
pub struct FileArgs {
    /// Input file path
    pub file: String,
}
