//! The `metapeg` command-line driver.

use std::collections::VecDeque;
use std::io::{self, IsTerminal, Read, Write};

use anyhow::{anyhow, bail, Context, Result};
use log::{debug, info, LevelFilter};

use metapeg::support::{text, CompileError, Rules};
use metapeg::{bootstrap_rules, compile_with, SUPPORT};

fn main() {
    let args = cli::Cli::init();

    let level_filter = level_filter_from_env_and_verbosity(args.additional_verbosity);
    env_logger::Builder::new()
        .filter_level(level_filter)
        .format_timestamp_micros()
        .init();

    if let Some(shell) = args.shell {
        debug!("Generating completions file for {shell:?}.");
        cli::print_completions(shell, &mut cli::Cli::command());
        debug!("Done generating completions file, exiting.");

        return;
    }

    info!("Launching app with args: {:?}", args);

    // Diagnostics go to stderr; highlight the error position exactly when
    // that is a terminal, regardless of where stdout ends up.
    colored::control::set_override(io::stderr().is_terminal());

    if let Err(e) = run(&args) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }

    info!("Done, exiting");
}

fn run(args: &cli::Cli) -> Result<()> {
    let mut commands: VecDeque<String> = args.commands.iter().cloned().collect();
    if commands.is_empty() {
        debug!("No commands given, defaulting to '--compile -'.");
        commands.extend(["--compile".to_owned(), "-".to_owned()]);
    }

    let rules = bootstrap_rules();
    let mut stdout = io::stdout().lock();

    while let Some(command) = commands.pop_front() {
        debug!("Processing command: {command}");
        match command.as_str() {
            "--support" => {
                stdout
                    .write_all(SUPPORT.as_bytes())
                    .context("Failed writing support source")?;
            }
            "--copy" => {
                let path = operand(&mut commands, &command)?;
                let contents = read_input(&path)?;
                stdout
                    .write_all(contents.as_bytes())
                    .context("Failed writing copied contents")?;
            }
            "--embed" => {
                let name = operand(&mut commands, &command)?;
                let path = operand(&mut commands, &command)?;
                let contents = read_input(&path)?;
                writeln!(stdout, "{name} = {}", text(&contents).repr())
                    .context("Failed writing embedded contents")?;
            }
            "--compile" => {
                let path = operand(&mut commands, &command)?;
                let source = read_input(&path)?;
                let output = compile(&rules, &source)?;
                stdout
                    .write_all(output.as_bytes())
                    .context("Failed writing compiled source")?;
            }
            other => bail!("ERROR: Unknown command '{other}'"),
        }
    }

    Ok(())
}

/// Pop the next queue element, which `command` requires as its operand.
fn operand(commands: &mut VecDeque<String>, command: &str) -> Result<String> {
    commands
        .pop_front()
        .ok_or_else(|| anyhow!("ERROR: Missing argument for '{command}'"))
}

/// Read a file's contents, with `-` meaning stdin.
fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        debug!("Reading from stdin.");
        let mut buf = String::new();
        io::stdin()
            .lock()
            .read_to_string(&mut buf)
            .context("Failed reading stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed reading file: {path}"))
    }
}

fn compile(rules: &Rules, source: &str) -> Result<String> {
    match compile_with(rules, source) {
        Ok(output) => Ok(output),
        // Match failures carry their own user-facing diagnostic; everything
        // else gets the generic context chain.
        Err(CompileError::Match(e)) => bail!("{}", e.diagnostic()),
        Err(e) => Err(anyhow!("Failed evaluating semantic actions: {e}")),
    }
}

/// To the default log level found in the environment, adds the requested
/// additional verbosity level, clamped to the maximum available.
///
/// See also
/// https://docs.rs/env_logger/latest/env_logger/struct.Env.html#default-environment-variables
/// and https://docs.rs/env_logger/latest/env_logger/#enabling-logging
fn level_filter_from_env_and_verbosity(additional_verbosity: u8) -> LevelFilter {
    let available = LevelFilter::iter().collect::<Vec<_>>();
    let default = env_logger::Builder::from_default_env().build().filter();

    let mut level = default as usize; // Implementation detail of `log` crate
    level += additional_verbosity as usize;

    available.get(level).copied().unwrap_or_else(|| {
        eprintln!("Requested additional verbosity on top of env default exceeds maximum, will use maximum");

        available
            .last()
            .copied()
            .expect("At least one level must be available")
    })
}

mod cli {
    use clap::{ArgAction, Command, CommandFactory, Parser};
    use clap_complete::{generate, Generator, Shell};

    /// Main CLI entrypoint.
    ///
    /// Using `verbatim_doc_comment` a lot as otherwise lines wouldn't wrap
    /// neatly. I format them narrowly manually anyway, so can just use them
    /// verbatim.
    #[derive(Parser, Debug)]
    #[command(author, version, about, verbatim_doc_comment, long_about = None)]
    pub(super) struct Cli {
        /// Commands, processed left to right as a queue
        ///
        /// --support            Write the embedded runtime-support source to stdout
        ///
        /// --copy PATH          Write the contents of PATH to stdout
        ///
        /// --embed NAME PATH    Write `NAME = <literal of PATH's contents>` to stdout
        ///
        /// --compile PATH       Compile the grammar at PATH to Rust source on stdout
        ///
        /// A PATH of '-' reads stdin. The default, given no commands at all,
        /// is '--compile -'.
        #[arg(
            value_name = "COMMAND",
            allow_hyphen_values = true,
            trailing_var_arg = true,
            verbatim_doc_comment
        )]
        pub commands: Vec<String>,

        /// Print shell completions for the given shell
        // This thing needs to live up here to show up within `Options` next
        // to `--help` and `--version`.
        #[arg(long = "completions", value_enum, verbatim_doc_comment)]
        pub shell: Option<Shell>,

        /// Increase log verbosity level
        ///
        /// The base log level to use is read from the `RUST_LOG` environment
        /// variable (if missing, 'error'), and increased according to the
        /// number of times this flag is given.
        #[arg(
            short = 'v',
            long = "verbose",
            action = ArgAction::Count,
            verbatim_doc_comment
        )]
        pub additional_verbosity: u8,
    }

    /// https://github.com/clap-rs/clap/blob/f65d421607ba16c3175ffe76a20820f123b6c4cb/clap_complete/examples/completion-derive.rs#L69
    pub(super) fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
        generate(gen, cmd, cmd.get_name().to_string(), &mut std::io::stdout());
    }

    impl Cli {
        pub(super) fn init() -> Self {
            Self::parse()
        }

        pub(super) fn command() -> clap::Command {
            <Self as CommandFactory>::command()
        }
    }
}
