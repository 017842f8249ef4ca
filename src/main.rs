//! shline: run a shell-style command line without a shell.
//!
//! Tokenizes the command line with shell-like quoting, expands `$name` /
//! `${name}` references, then either runs the program or prints the result.
//!
//! Handles:
//!   - Single quotes (literal) and double quotes (grouping, expansion, `\"`)
//!   - Quoted runs joined into one argument: ab'c d'"e"
//!   - Unterminated quotes (extend to end of line)
//!   - Variable sources: extra --env vars first, then the process env

use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser};
use shline::config::Config;
use shline::{Line, Sh, command, logging, parse, resolve};

// ─── Options ─────────────────────────────────────────

/// Tokenize WORDS (joined with spaces) as a shell-style command line, expand
/// $name / ${name} references, and run the result. With no WORDS, one line
/// is read from stdin.
#[derive(Parser, Debug)]
#[command(name = "shline", version)]
struct Cli {
    /// Extra variable (repeatable)
    #[arg(short = 'e', long = "env", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    env: Vec<(String, String)>,

    /// Working directory
    #[arg(short = 'C', long, value_name = "DIR")]
    dir: Option<String>,

    /// Disable variable expansion
    #[arg(long, conflicts_with = "strict")]
    no_expand: bool,

    /// Abort on unresolved variables
    #[arg(long, conflicts_with = "no_expand")]
    strict: bool,

    /// Treat WORDS as pre-split arguments (no tokenizing)
    #[arg(long = "args")]
    pre_split: bool,

    #[command(flatten)]
    mode: Mode,

    /// More logging (repeatable; SHLINE_LOG overrides)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// The command line; everything after the first word is passed through
    #[arg(trailing_var_arg = true, value_name = "WORDS")]
    words: Vec<String>,
}

#[derive(Args, Debug)]
#[group(multiple = false)]
struct Mode {
    /// Print the command instead of running it
    #[arg(long)]
    print: bool,

    /// Print the command as POSIX shell words
    #[arg(long)]
    shell: bool,

    /// Print the resolved arguments as a JSON array
    #[arg(long)]
    json: bool,

    /// Print the tokenized line as JSON
    #[arg(long)]
    tokens: bool,

    /// Print the effective configuration
    #[arg(long)]
    dump_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Run,
    Print,
    Shell,
    Json,
    Tokens,
    DumpConfig,
}

impl Mode {
    fn output(&self) -> Output {
        if self.print {
            Output::Print
        } else if self.shell {
            Output::Shell
        } else if self.json {
            Output::Json
        } else if self.tokens {
            Output::Tokens
        } else if self.dump_config {
            Output::DumpConfig
        } else {
            Output::Run
        }
    }
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got {s:?}")),
    }
}

// ─── Building ────────────────────────────────────────

fn read_stdin_line() -> std::io::Result<String> {
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

fn build(opts: &Cli, config: &Config) -> std::io::Result<Sh> {
    let mut sh = Sh::from_config(config);

    if opts.no_expand {
        sh = sh.expand(resolve::disabled());
    } else if opts.strict {
        sh = sh.expand(resolve::chain([resolve::env(), resolve::fail()]));
    }
    if !opts.env.is_empty() {
        let mut env: HashMap<String, String> = config.env.vars.clone().into_iter().collect();
        env.extend(opts.env.iter().cloned());
        sh = sh.env(env);
    }
    if let Some(dir) = &opts.dir {
        sh = sh.dir(dir);
    }

    Ok(if opts.pre_split {
        sh.line_args(opts.words.iter().cloned())
    } else if opts.words.is_empty() {
        sh.line(&read_stdin_line()?)
    } else {
        sh.line(&opts.words.join(" "))
    })
}

fn print_tokens(line: &Line) -> std::io::Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, line)?;
    writeln!(out)
}

// ─── Entry point ─────────────────────────────────────

fn run(opts: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = Config::load();
    let output = opts.mode.output();

    if output == Output::DumpConfig {
        print!("{}", config.to_toml());
        return Ok(ExitCode::SUCCESS);
    }

    let sh = build(&opts, &config)?;
    match output {
        Output::Print => println!("{sh}"),
        Output::Shell => {
            let joined = parse::shell_join(&sh.args())
                .ok_or("argument contains a NUL byte and cannot be shell-quoted")?;
            println!("{joined}");
        }
        Output::Json => command::write_json(&mut std::io::stdout().lock(), &sh.args())?,
        Output::Tokens => print_tokens(sh.parsed())?,
        Output::Run => {
            let code = sh.exec()?;
            return Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)));
        }
        Output::DumpConfig => unreachable!("handled above"),
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let opts = Cli::parse();
    logging::init(opts.verbose);

    match run(opts) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("shline: {e}");
            ExitCode::FAILURE
        }
    }
}

// ─── Tests ───────────────────────────────────────────
