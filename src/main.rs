use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

use clap::ArgAction::{Set, SetTrue};
use clap::Parser;
use tracing::{event, span, Level};
use tracing_subscriber::prelude::*;

use luz_syntax::{parse_file, LuaVersion, LuzError, SyntaxTree, TokenValue};

/// Parses a Lua source file and prints its concrete syntax tree
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Cli {
    /// Lua source file.
    #[clap(action = Set)]
    input: PathBuf,

    /// Language version to check the file against (5.1, 5.2, 5.3, 5.4 or jit).
    #[clap(action = Set, long = "lua", default_value = "5.4")]
    version: LuaVersion,

    /// Print one line per token instead of the tree.
    #[clap(action = SetTrue, long, conflicts_with = "trivia")]
    tokens: bool,

    /// Include whitespace and comments in the tree.
    #[clap(action = SetTrue, long)]
    trivia: bool,
}

#[derive(Debug)]
enum Fail {
    /// The file could not be read or is not valid Lua.
    Parse(LuzError),
    /// The tree was built but has error diagnostics.
    Diagnostics(usize),
    InitialisationFailure(String),
}

impl Display for Fail {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Fail::Parse(err) => err.fmt(f),
            Fail::Diagnostics(1) => f.write_str("1 error"),
            Fail::Diagnostics(count) => write!(f, "{count} errors"),
            Fail::InitialisationFailure(msg) => f.write_str(msg.as_str()),
        }
    }
}

impl Error for Fail {}

fn token_listing(tree: &SyntaxTree) -> String {
    let mut out = String::new();
    for token in tree.root().tokens() {
        let location = tree.location(token.span().start);
        out.push_str(&format!(
            "{}:{} {} {:?}",
            location.line,
            location.column,
            token.kind(),
            token.text()
        ));
        match token.value() {
            TokenValue::None => {}
            value => out.push_str(&format!(" = {value}")),
        }
        out.push('\n');
    }
    out
}

fn run_parser() -> Result<(), Fail> {
    let cli = Cli::parse();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);
    let filter_layer = match tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
    {
        Err(e) => {
            return Err(Fail::InitialisationFailure(format!(
                "failed to initialise tracing filter (perhaps there is a problem with environment variables): {e}"
            )));
        }
        Ok(layer) => layer,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    let span = span!(Level::ERROR, "parse", input = ?cli.input, version = %cli.version);
    let _enter = span.enter();

    let tree = parse_file(&cli.input, &cli.version.options()).map_err(Fail::Parse)?;
    if cli.tokens {
        print!("{}", token_listing(&tree));
    } else if cli.trivia {
        print!("{}", tree.dump_with_trivia());
    } else {
        print!("{}", tree.dump());
    }

    for diagnostic in tree.diagnostics() {
        eprintln!("{}", tree.render_diagnostic(diagnostic));
    }
    let errors = tree.diagnostics().iter().filter(|d| d.is_error()).count();
    if errors > 0 {
        event!(Level::ERROR, errors, "parse produced errors");
        return Err(Fail::Diagnostics(errors));
    }
    event!(Level::INFO, "parse succeeded");
    Ok(())
}

fn main() {
    match run_parser() {
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Ok(()) => {
            std::process::exit(0);
        }
    }
}
