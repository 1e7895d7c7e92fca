use std::ffi::OsString;
use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::commands;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "tick",
    version,
    about = "Tick: a small to-do list for the terminal",
    disable_help_subcommand = true,
    arg_required_else_help = false
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,

    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    #[arg(long = "data")]
    pub data: Option<PathBuf>,

    #[arg(long = "lang")]
    pub lang: Option<String>,

    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub rest: Vec<OsString>,
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

/// Command word plus its arguments, split off the trailing CLI words.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub command: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// No words at all means the default `list` command. The command word
    /// may be abbreviated as long as the prefix is unambiguous.
    pub fn parse(rest: Vec<OsString>) -> anyhow::Result<Self> {
        let mut words = Vec::with_capacity(rest.len());
        for raw in rest {
            let word = raw.into_string().map_err(|raw| {
                anyhow!("argument is not valid UTF-8: {}", raw.to_string_lossy())
            })?;
            words.push(word);
        }

        let Some((first, args)) = words.split_first() else {
            return Ok(Self {
                command: "list".to_string(),
                args: vec![],
            });
        };

        let known = commands::known_command_names();
        let command = commands::expand_command_abbrev(first, &known)
            .unwrap_or(first.as_str())
            .to_string();

        Ok(Self {
            command,
            args: args.to_vec(),
        })
    }
}
