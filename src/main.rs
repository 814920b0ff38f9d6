//! CLI tool to check and dump the token stream of CIF files.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use cif_lexer::{Encoding, Lexer, LexerConfig};
use clap::{Args, Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cif-lex", version, about = "Lex CIF files")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Print one token per line
    Tokens {
        #[command(flatten)]
        options: LexOptions,

        /// Skip whitespace, line endings and comments
        #[arg(long)]
        significant: bool,
    },
    /// Check that file(s) lex without errors
    Check {
        #[command(flatten)]
        options: LexOptions,
    },
}

#[derive(Args)]
struct LexOptions {
    /// Reject characters outside printable ASCII
    #[arg(long)]
    ascii: bool,

    /// Fail on text fields left open at end of file
    #[arg(long)]
    strict: bool,

    /// Treat brackets and braces as ordinary characters
    #[arg(long)]
    no_brackets: bool,

    /// Tab stop width used for column numbers
    #[arg(long, default_value_t = 1)]
    tab_width: usize,

    #[arg(required = true)]
    files: Vec<PathBuf>,
}

impl LexOptions {
    fn config(&self) -> LexerConfig {
        let encoding = if self.ascii {
            Encoding::Ascii
        } else {
            Encoding::Utf8
        };
        LexerConfig::default()
            .with_encoding(encoding)
            .with_tolerate_unterminated_text_field(!self.strict)
            .with_brackets(!self.no_brackets)
            .with_tab_width(self.tab_width)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (options, significant) = match &cli.command {
        Command::Tokens {
            options,
            significant,
        } => (options, Some(*significant)),
        Command::Check { options } => (options, None),
    };
    let config = options.config();

    let mut had_error = false;

    for path in &options.files {
        let shown = path.display();
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{shown}: {e}");
                had_error = true;
                continue;
            }
        };

        let mut count = 0usize;
        let mut lexer = Lexer::with_config(&content, config);
        loop {
            match lexer.next_token() {
                Ok(Some(token)) => {
                    count += 1;
                    if let Some(warning) = &token.warning {
                        eprintln!(
                            "{shown}:{}:{}: warning: {warning}",
                            token.span.line, token.span.column
                        );
                    }
                    match significant {
                        Some(true) if token.kind.is_trivia() => {}
                        Some(_) => println!(
                            "{}:{}\t{}\t{:?}",
                            token.span.line, token.span.column, token.kind, token.text
                        ),
                        None => {}
                    }
                }
                Ok(None) => {
                    info!(file = %shown, tokens = count, "lexed");
                    if significant.is_none() {
                        eprintln!("{shown}: ok ({count} token(s))");
                    }
                    break;
                }
                Err(e) => {
                    eprintln!("{shown}: {e}");
                    had_error = true;
                    break;
                }
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
