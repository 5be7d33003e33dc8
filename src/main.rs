use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use avl_trace::session::{self, Outcome, Session};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "avl-trace",
    about = "Drive a height-balanced search tree from the terminal and watch it rebalance"
)]
struct Cli {
    /// Comma-separated keys to insert before reading commands (e.g. 20,10,30).
    #[arg(long)]
    init: Option<String>,

    /// Read commands from this file instead of standard input.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Tracing filter directive; RUST_LOG takes precedence when set.
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Do not draw the tree after commands that change it.
    #[arg(long)]
    no_shape: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let mut session = match cli.init.as_deref() {
        Some(list) => {
            let keys = session::parse_keys(list).context("invalid --init key list")?;
            Session::with_keys(keys)
        }
        None => Session::new(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &cli.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            run(&mut session, BufReader::new(file), &mut out, !cli.no_shape, false)?;
        }
        None => {
            let stdin = io::stdin();
            run(&mut session, stdin.lock(), &mut out, !cli.no_shape, true)?;
        }
    }

    Ok(())
}

fn init_tracing(default_directive: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directive)
            .with_context(|| format!("invalid log level '{default_directive}'"))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn run<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    out: &mut W,
    draw: bool,
    interactive: bool,
) -> Result<()> {
    if interactive {
        writeln!(out, "type 'help' for commands")?;
        prompt(out)?;
    }
    for line in input.lines() {
        let line = line.context("failed to read command")?;
        match session.run_line(&line) {
            Ok(Some(outcome)) => report(session, &outcome, out, draw)?,
            Ok(None) => {}
            // Bad input is reported and the session carries on.
            Err(err) => writeln!(out, "error: {err}")?,
        }
        if interactive {
            prompt(out)?;
        }
    }
    Ok(())
}

fn report<W: Write>(session: &Session, outcome: &Outcome, out: &mut W, draw: bool) -> Result<()> {
    writeln!(out, "{outcome}")?;
    if !draw {
        return Ok(());
    }
    match outcome {
        Outcome::Found { key, .. } => write!(out, "{}", session.trace(*key))?,
        Outcome::Inserted(_) | Outcome::Deleted { .. } | Outcome::Cleared => {
            write!(out, "{}", session.shape())?
        }
        _ => {}
    }
    Ok(())
}

fn prompt<W: Write>(out: &mut W) -> Result<()> {
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}
