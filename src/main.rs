//! Command-line wrapper: reads wikitext from standard input and prints the
//! syntax tree (or its plain-text collapse) to standard output.

use anyhow::Context as _;
use std::io::{Read as _, Write as _};
use wikitext_ast::{Options, Parser, TextOptions, ast_to_text};

/// Command-line arguments.
struct Args {
    /// The parse configuration.
    options: Options,
    /// Print the plain-text extraction instead of the syntax tree.
    text: bool,
    /// Print one-line JSON instead of pretty JSON.
    compact: bool,
}

impl Args {
    /// Tries to create an [`Args`] from the command line.
    fn new() -> Result<Args, pico_args::Error> {
        let mut args = pico_args::Arguments::from_env();
        let backtracking_limit = args
            .opt_value_from_str("--backtracking-limit")?
            .unwrap_or_else(|| Options::default().backtracking_limit);
        let debug = args.contains("--debug");
        let text = args.contains("--text");
        let compact = args.contains("--compact");
        let rest = args.finish();
        if !rest.is_empty() {
            return Err(pico_args::Error::ArgumentParsingFailed {
                cause: format!("unknown arguments: {rest:?}"),
            });
        }
        Ok(Self {
            options: Options {
                backtracking_limit,
                debug,
            },
            text,
            compact,
        })
    }
}

/// Command line usage instructions.
fn usage() {
    let exe = std::env::args().next().unwrap_or_default();
    eprintln!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    eprintln!("Usage: {exe} [options] < article.wikitext\n");
    eprintln!("Options:");
    eprintln!("  --text: Print the plain-text collapse instead of the syntax tree");
    eprintln!("  --compact: Print one-line JSON instead of pretty JSON");
    eprintln!("  --backtracking-limit <n>: Backtrack event budget (default: 50000)");
    eprintln!("  --debug: Trace backtracking to standard error");
}

fn run() -> anyhow::Result<()> {
    let args = match Args::new() {
        Ok(args) => args,
        Err(error) => {
            usage();
            return Err(error.into());
        }
    };

    env_logger::init_from_env(
        env_logger::Env::default()
            .default_filter_or(if args.options.debug { "debug" } else { "info" }),
    );

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("reading standard input")?;

    let ast = Parser::new(args.options)
        .parse(&input)
        .context("parsing standard input")?;

    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();
    if args.text {
        stdout.write_all(ast_to_text(&ast, &TextOptions::default()).as_bytes())?;
    } else if args.compact {
        serde_json::to_writer(&mut stdout, &ast)?;
    } else {
        serde_json::to_writer_pretty(&mut stdout, &ast)?;
    }
    writeln!(stdout)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    run()
}
