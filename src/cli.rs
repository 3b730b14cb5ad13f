//! Command-line parsing and the player name prompt.

use crate::constants::{DEFAULT_PLAYER_NAMES, PLAYER_COUNT};
use crate::web::parse_serve_arg;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

pub const USAGE: &str = "\
Snake Duel - two snakes, one food, a wrapping field

Usage: snake_duel [options]

Options:
  --config PATH     Load match settings from a JSON file
  --seed N          Seed the random generator (repeatable matches)
  --p1 NAME         Name of player 1 (skips the prompt for it)
  --p2 NAME         Name of player 2 (skips the prompt for it)
  --no-prompt       Use default names instead of asking
  --log PATH        Write the log here instead of the data directory
  --serve[=PORT]    Stream the match to browsers (web builds only)
  --version         Show version information
  --help            Show this help message";

/// Options for a match run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub config: Option<PathBuf>,
    pub seed: Option<u64>,
    pub names: [Option<String>; PLAYER_COUNT],
    pub prompt: bool,
    pub log: Option<PathBuf>,
    pub serve: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(RunOptions),
    Version,
    Help,
}

/// Parse arguments, excluding the program name.
pub fn parse_args<I, S>(args: I) -> Result<Command, String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut options = RunOptions {
        prompt: true,
        ..RunOptions::default()
    };
    let mut args = args.into_iter().map(Into::into);

    while let Some(arg) = args.next() {
        if let Some(port) = parse_serve_arg(&arg) {
            options.serve = Some(port?);
            continue;
        }
        match arg.as_str() {
            "--version" | "-v" => return Ok(Command::Version),
            "--help" | "-h" => return Ok(Command::Help),
            "--no-prompt" => options.prompt = false,
            "--config" => options.config = Some(PathBuf::from(value_for(&arg, args.next())?)),
            "--log" => options.log = Some(PathBuf::from(value_for(&arg, args.next())?)),
            "--seed" => {
                let value = value_for(&arg, args.next())?;
                let seed = value
                    .parse::<u64>()
                    .map_err(|_| format!("invalid seed: {value}"))?;
                options.seed = Some(seed);
            }
            "--p1" => options.names[0] = Some(value_for(&arg, args.next())?),
            "--p2" => options.names[1] = Some(value_for(&arg, args.next())?),
            other => return Err(format!("unknown option: {other}")),
        }
    }

    Ok(Command::Run(options))
}

fn value_for(flag: &str, value: Option<String>) -> Result<String, String> {
    value
        .filter(|v| !v.starts_with("--"))
        .ok_or_else(|| format!("{flag} needs a value"))
}

/// Resolve player names: given names win, then the prompt, then defaults.
///
/// An empty answer keeps the default name.
pub fn resolve_names<R: BufRead, W: Write>(
    given: &[Option<String>; PLAYER_COUNT],
    prompt: bool,
    input: &mut R,
    output: &mut W,
) -> io::Result<Vec<String>> {
    let mut names = Vec::with_capacity(PLAYER_COUNT);
    for (i, name) in given.iter().enumerate() {
        let default = DEFAULT_PLAYER_NAMES[i];
        let resolved = match name {
            Some(name) => name.clone(),
            None if prompt => {
                write!(output, "Name of player {} [{}]: ", i + 1, default)?;
                output.flush()?;
                let mut line = String::new();
                input.read_line(&mut line)?;
                line.trim().to_string()
            }
            None => String::new(),
        };
        names.push(if resolved.trim().is_empty() {
            default.to_string()
        } else {
            resolved.trim().to_string()
        });
    }
    Ok(names)
}
