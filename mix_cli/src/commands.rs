//! Interactive command parsing and execution

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::{debug, info, warn};

use mix_core::element::StructureKind;
use mix_core::errors::CalcError;
use mix_core::session::{EstimateSettings, Session};

use crate::cli::{Cli, OutputFormat};
use crate::output;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Calc(#[from] CalcError),

    #[error("{0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    fn parse(message: impl Into<String>) -> Self {
        CliError::Parse(message.into())
    }

    /// Errors that only reject the current command; the session keeps going.
    pub fn is_recoverable(&self) -> bool {
        match self {
            CliError::Calc(e) => e.is_recoverable(),
            CliError::Parse(_) => true,
            CliError::Io(_) => false,
        }
    }

    /// Short code for programmatic handling in JSON output
    pub fn error_code(&self) -> &'static str {
        match self {
            CliError::Calc(e) => e.error_code(),
            CliError::Parse(_) => "PARSE_ERROR",
            CliError::Io(_) => "IO_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;

/// One line of user input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add {
        kind: StructureKind,
        dims: [f64; 3],
        label: String,
    },
    Reset,
    List,
    Summary,
    Loss(i64),
    Truck(f64),
    Help,
    Quit,
}

impl Command {
    /// Parse a command line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };

        let command = match name.to_lowercase().as_str() {
            "add" | "a" => {
                let kind = words
                    .next()
                    .ok_or_else(|| CliError::parse("usage: add <slab|wall> <d1> <d2> <d3> [label]"))?;
                let kind = StructureKind::from_str_flexible(kind)?;
                let mut dims = [0.0; 3];
                for (slot, label) in dims.iter_mut().zip(kind.dimension_labels()) {
                    let word = words
                        .next()
                        .ok_or_else(|| CliError::parse(format!("missing {label}")))?;
                    *slot = parse_number(word, label)?;
                }
                let label = words.collect::<Vec<_>>().join(" ");
                Command::Add { kind, dims, label }
            }
            "reset" | "clear" => Command::Reset,
            "list" | "ls" => Command::List,
            "summary" | "sum" => Command::Summary,
            "loss" => {
                let word = single_argument(&mut words, "loss <percent>")?;
                let percent = word
                    .parse::<i64>()
                    .map_err(|_| CliError::parse(format!("loss rate must be a whole number, got '{word}'")))?;
                Command::Loss(percent)
            }
            "truck" => {
                let word = single_argument(&mut words, "truck <m3>")?;
                Command::Truck(parse_number(word, "truck capacity")?)
            }
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CliError::parse(format!("unknown command '{other}' (try 'help')"))),
        };
        Ok(Some(command))
    }
}

fn single_argument<'a>(words: &mut impl Iterator<Item = &'a str>, usage: &str) -> Result<&'a str> {
    let word = words
        .next()
        .ok_or_else(|| CliError::parse(format!("usage: {usage}")))?;
    if words.next().is_some() {
        return Err(CliError::parse(format!("usage: {usage}")));
    }
    Ok(word)
}

fn parse_number(word: &str, what: &str) -> Result<f64> {
    word.parse::<f64>()
        .map_err(|_| CliError::parse(format!("{what} must be a number, got '{word}'")))
}

/// Whether the loop should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A session plus the output format, driven one command at a time.
pub struct Shell {
    pub session: Session,
    pub format: OutputFormat,
}

impl Shell {
    pub fn new(session: Session, format: OutputFormat) -> Self {
        Shell { session, format }
    }

    /// Run one command, writing its output to `out`.
    ///
    /// A rejected command leaves the session as it was.
    pub fn execute(&mut self, command: Command, out: &mut impl Write) -> Result<Flow> {
        debug!(?command, "executing");
        match command {
            Command::Add { kind, dims, label } => {
                let [d1, d2, d3] = dims;
                let item = self.session.add_item(kind, &label, d1, d2, d3)?;
                info!(label = %item.label, volume_m3 = item.volume_m3, "item added");
                if self.format == OutputFormat::Table {
                    writeln!(out, "Added '{}' ({:.2} m³)", item.label, item.volume_m3)?;
                }
                output::write_state(&self.session, self.format, out)?;
            }
            Command::Reset => {
                self.session.reset();
                if self.format == OutputFormat::Table {
                    writeln!(out, "All entries cleared.")?;
                }
                output::write_state(&self.session, self.format, out)?;
            }
            Command::List => output::write_items(&self.session, self.format, out)?,
            Command::Summary => output::write_summary(&self.session, self.format, out)?,
            Command::Loss(percent) => {
                self.session.set_loss_rate(percent)?;
                output::write_state(&self.session, self.format, out)?;
            }
            Command::Truck(capacity) => {
                self.session.set_truck_capacity(capacity)?;
                output::write_state(&self.session, self.format, out)?;
            }
            Command::Help => output::write_help(out)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Read commands from `input` until EOF or `quit`.
    ///
    /// Recoverable errors are reported on `err` and the loop continues.
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write, err: &mut impl Write) -> Result<()> {
        let interactive = self.format == OutputFormat::Table;
        if interactive {
            output::write_banner(&self.session, out)?;
            prompt(out)?;
        }

        for line in input.lines() {
            let line = line?;
            let result = match Command::parse(&line) {
                Ok(Some(cmd)) => self.execute(cmd, &mut *out),
                Ok(None) => Ok(Flow::Continue),
                Err(e) => Err(e),
            };
            let flow = match result {
                Ok(flow) => flow,
                Err(e) if e.is_recoverable() => {
                    warn!(error = %e, "command rejected");
                    output::write_error(&e, self.format, &mut *err)?;
                    Flow::Continue
                }
                Err(e) => return Err(e),
            };

            if flow == Flow::Quit {
                break;
            }
            if interactive {
                prompt(out)?;
            }
        }
        Ok(())
    }
}

fn prompt(out: &mut impl Write) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

/// Entry point: build the session from the flags and run the loop on stdio.
pub fn execute(cli: Cli) -> Result<()> {
    let settings = EstimateSettings::new(cli.loss_rate, cli.truck_capacity)?;
    let mut shell = Shell::new(Session::with_settings(settings), cli.format);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    shell.run(stdin.lock(), &mut stdout, &mut stderr)
}
