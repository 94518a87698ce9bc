//! Tabula CLI - run cell scripts against a sheet

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::str::FromStr;
use tabula::prelude::*;

#[derive(Parser)]
#[command(name = "tabula")]
#[command(
    author,
    version,
    about = "Run a script of cell commands against an in-memory sheet"
)]
struct Cli {
    /// Script file, one command per line (default: stdin)
    ///
    /// Commands: `set <A1> <text>`, `clear <A1>`, `values`, `texts`, `size`.
    /// Blank lines and lines starting with `#` are skipped.
    script: Option<PathBuf>,

    /// Stop at the first failing command
    #[arg(short, long)]
    strict: bool,
}

/// One line of a script
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Set(Position, String),
    Clear(Position),
    Values,
    Texts,
    Size,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest),
            None => (line, ""),
        };

        match keyword {
            "set" => {
                let rest = rest.trim_start();
                let (address, text) = rest.split_once(' ').unwrap_or((rest, ""));
                Ok(Command::Set(parse_address(address)?, text.to_string()))
            }
            "clear" => Ok(Command::Clear(parse_address(rest.trim())?)),
            "values" | "texts" | "size" if !rest.trim().is_empty() => {
                bail!("'{}' takes no arguments", keyword)
            }
            "values" => Ok(Command::Values),
            "texts" => Ok(Command::Texts),
            "size" => Ok(Command::Size),
            other => bail!("unknown command '{}'", other),
        }
    }
}

fn parse_address(address: &str) -> Result<Position> {
    if address.is_empty() {
        bail!("missing cell address");
    }
    address
        .parse()
        .with_context(|| format!("bad cell address '{}'", address))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let failures = match &cli.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open '{}'", path.display()))?;
            run(BufReader::new(file), &mut out, cli.strict)?
        }
        None => run(io::stdin().lock(), &mut out, cli.strict)?,
    };

    if failures > 0 {
        eprintln!("{} command(s) failed", failures);
    }
    Ok(())
}

/// Execute every command of `input` against a fresh sheet
///
/// Returns the number of failed commands. In strict mode the first failure is
/// returned as an error instead.
fn run<R: BufRead, W: Write>(input: R, out: &mut W, strict: bool) -> Result<usize> {
    let mut sheet = Sheet::new();
    let mut failures = 0;

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("Failed to read line {}", line_no))?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        let result = line
            .trim_start()
            .parse::<Command>()
            .and_then(|command| execute(&mut sheet, command, out));

        if let Err(err) = result {
            if strict {
                return Err(err.context(format!("line {}", line_no)));
            }
            eprintln!("line {}: {:#}", line_no, err);
            failures += 1;
        }
    }

    Ok(failures)
}

fn execute<W: Write>(sheet: &mut Sheet, command: Command, out: &mut W) -> Result<()> {
    log::debug!("executing {:?}", command);
    match command {
        Command::Set(pos, text) => sheet
            .set_cell(pos, &text)
            .with_context(|| format!("Failed to set {}", pos))?,
        Command::Clear(pos) => sheet
            .clear_cell(pos)
            .with_context(|| format!("Failed to clear {}", pos))?,
        Command::Values => sheet
            .print_values(out)
            .context("Failed to write to stdout")?,
        Command::Texts => sheet
            .print_texts(out)
            .context("Failed to write to stdout")?,
        Command::Size => {
            let size = sheet.printable_size();
            writeln!(out, "{}x{}", size.rows, size.cols).context("Failed to write to stdout")?;
        }
    }
    Ok(())
}
