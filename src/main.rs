use std::{path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser;
use lexer::{
    display_error,
    errors::errors::read_source,
    highlight::highlight,
    lexer::{
        lexer::{collect_errors, tokenize_with_options, LexerOptions},
        tokens::TokenKind,
    },
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tokenize", about = "Print the token stream of a C-family source file")]
struct Cli {
    /// Source file to scan
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Emit comment tokens instead of skipping comments
    #[arg(long)]
    comments: bool,

    /// Print the colourised source before the token list
    #[arg(long)]
    highlight: bool,

    /// Render every invalid token with its source line on stderr
    #[arg(long)]
    diagnostics: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let source = match read_source(&cli.file) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    let options = LexerOptions {
        keep_comments: cli.comments || cli.highlight,
    };
    let tokens = tokenize_with_options(&source, options);
    info!(tokens = tokens.len(), elapsed = ?start.elapsed(), "tokenized");

    if cli.highlight {
        println!("{}", highlight(&source, &tokens));
        println!();
        println!("===== TOKENS =====");
    }

    for token in &tokens {
        if token.kind == TokenKind::Comment && !cli.comments {
            continue;
        }
        println!("{}", token);
    }

    if cli.diagnostics {
        let file_name = cli.file.to_string_lossy();
        for error in collect_errors(&tokens) {
            eprint!("{}", display_error(&error, &source, &file_name));
        }
    }

    ExitCode::SUCCESS
}
