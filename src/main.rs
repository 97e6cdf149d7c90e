use clap::{ArgAction, CommandFactory, Parser};
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;

use colored::*;

use ccinfo::report;
use ccinfo::{Aggregator, OsFileSystem, RuleRegistry, StderrDiagnostics, WalkOptions};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Counts total, comment and blank source lines per language",
    long_about = "Counts total, comment and blank source lines per language. Supported extensions: .py, .js, .go, .mod, .cpp, .h, .java."
)]
struct Args {
    /// Files or directories to count
    paths: Vec<PathBuf>,

    /// Skip directories whose path ends with this name (repeatable)
    #[arg(short, long, action = ArgAction::Append)]
    ignore: Vec<String>,

    /// Only count files whose name or relative path matches this glob
    #[arg(short = 'f', long)]
    filespec: Option<String>,

    /// Deepest directory level to descend into
    #[arg(short = 'd', long, default_value = "100")]
    max_depth: usize,

    /// Print a per-file breakdown
    #[arg(short, long)]
    verbose: bool,

    /// List supported languages and exit
    #[arg(short, long)]
    languages: bool,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,
}

fn main() -> io::Result<()> {
    run_with_args(std::env::args_os())
}

fn run_with_args<I, T>(args: I) -> io::Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = Args::parse_from(args);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_cli(args, &mut out)
}

fn run_cli(args: Args, out: &mut dyn Write) -> io::Result<()> {
    if args.no_color {
        colored::control::set_override(false);
    }

    let registry = RuleRegistry::with_defaults();

    if args.languages {
        write!(out, "{}", report::build_language_listing(&registry))?;
        return Ok(());
    }

    if args.paths.is_empty() {
        writeln!(out, "{}", Args::command().render_usage())?;
        return Ok(());
    }

    let walk = WalkOptions {
        ignore: args.ignore.clone(),
        max_depth: args.max_depth,
        filespec: None,
    }
    .with_filespec(args.filespec.as_deref())?;

    writeln!(
        out,
        "{} {}",
        env!("CARGO_PKG_NAME").bright_cyan().bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).bright_yellow()
    )?;

    let fs = OsFileSystem::new(walk);
    let mut diagnostics = StderrDiagnostics::new();
    let outcome = Aggregator::new(&registry, &fs, &mut diagnostics).run(&args.paths);

    write!(
        out,
        "{}",
        report::build_report(&outcome, args.verbose, report::rule_width())
    )?;
    out.flush()
}
