//! Copy-on-write command builder.
//!
//! [`Sh`] collects everything needed to launch a process: the tokenized
//! line, the resolver, extra env vars, a working directory and a command
//! log. Every setter returns a new `Sh` and leaves the receiver untouched,
//! so a shared base can be specialized freely:
//!
//! ```no_run
//! use std::collections::HashMap;
//! use shline::Sh;
//!
//! let base = Sh::new().env(HashMap::from([("hello".into(), "world".into())]));
//! let rc = base.line("echo ${hello}").exec()?;
//! let in_tmp = base.dir("/tmp").line("ls");
//! # let _ = (rc, in_tmp);
//! # Ok::<(), shline::Error>(())
//! ```

use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::expand;
use crate::logging::CommandLog;
use crate::parse::{self, Line};
use crate::resolve::{self, SharedResolver};

#[derive(Clone)]
pub struct Sh {
    line: Line,
    resolver: SharedResolver,
    env: Option<HashMap<String, String>>,
    dir: Option<PathBuf>,
    command_log: Option<CommandLog>,
    command_log_prefix: String,
}

impl Default for Sh {
    fn default() -> Self {
        Self {
            line: Line::default(),
            resolver: resolve::env(),
            env: None,
            dir: None,
            command_log: None,
            command_log_prefix: String::new(),
        }
    }
}

impl Sh {
    /// A builder that expands from the process environment and runs in the
    /// current directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder seeded from configuration: resolver, env vars, working
    /// directory and command log.
    pub fn from_config(config: &Config) -> Self {
        let mut sh = Self::new()
            .expand(config.resolver())
            .command_log_prefix(config.settings.command_log_prefix.clone());
        if !config.env.vars.is_empty() {
            sh = sh.env(config.env.vars.clone().into_iter().collect());
        }
        if let Some(dir) = &config.settings.dir {
            sh = sh.dir(dir);
        }
        if config.settings.command_log {
            sh = sh.command_log(CommandLog::stderr());
        }
        sh
    }

    /// Set the command from one shell-style line. Single and double quotes
    /// group words as in a shell; single-quoted text is not expanded.
    pub fn line(&self, raw: &str) -> Self {
        let mut sh = self.clone();
        sh.line = parse::parse(raw);
        sh
    }

    /// Set the command from explicit arguments. No quote processing is done,
    /// but variable references in every argument are still expanded.
    pub fn line_args<I, S>(&self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut sh = self.clone();
        sh.line = Line::from_args(args);
        sh
    }

    /// Set the resolver. Use [`resolve::disabled()`] to turn expansion off.
    pub fn expand(&self, resolver: SharedResolver) -> Self {
        let mut sh = self.clone();
        sh.resolver = resolver;
        sh
    }

    /// Set extra env vars for the process. They are also consulted before
    /// the resolver when expanding references.
    pub fn env(&self, env: HashMap<String, String>) -> Self {
        let mut sh = self.clone();
        sh.env = Some(env);
        sh
    }

    /// Set the working directory. A leading `~` is expanded when the
    /// command is built.
    pub fn dir(&self, dir: impl Into<PathBuf>) -> Self {
        let mut sh = self.clone();
        sh.dir = Some(dir.into());
        sh
    }

    /// Send each fully expanded command to `log` before it runs.
    pub fn command_log(&self, log: CommandLog) -> Self {
        let mut sh = self.clone();
        sh.command_log = Some(log);
        sh
    }

    pub fn command_log_prefix(&self, prefix: impl Into<String>) -> Self {
        let mut sh = self.clone();
        sh.command_log_prefix = prefix.into();
        sh
    }

    pub fn parsed(&self) -> &Line {
        &self.line
    }

    /// The resolved arguments; the first is the program.
    ///
    /// Extra env vars take precedence over the configured resolver, unless
    /// expansion is disabled.
    pub fn args(&self) -> Vec<String> {
        if self.resolver.is_disabled() {
            return self.line.literal();
        }
        match &self.env {
            Some(env) => {
                let chain = resolve::chain([resolve::map(env.clone()), self.resolver.clone()]);
                expand::resolve(&self.line, &chain)
            }
            None => expand::resolve(&self.line, &self.resolver),
        }
    }

    fn resolved_dir(&self) -> Option<PathBuf> {
        let dir = self.dir.as_ref()?;
        match dir.to_str() {
            Some(s) => Some(PathBuf::from(shellexpand::tilde(s).as_ref())),
            None => Some(dir.clone()),
        }
    }

    /// Build a [`Command`] with all settings applied. Stdio is inherited.
    pub fn command(&self) -> Result<Command> {
        self.command_for(&self.args())
    }

    fn command_for(&self, args: &[String]) -> Result<Command> {
        let (program, rest) = args.split_first().ok_or(Error::EmptyCommand)?;
        let mut cmd = Command::new(program);
        cmd.args(rest);
        if let Some(env) = &self.env {
            cmd.envs(env);
        }
        if let Some(dir) = self.resolved_dir() {
            cmd.current_dir(dir);
        }
        Ok(cmd)
    }

    /// Resolve the line once, run it, and return the exit code together
    /// with the display form of what ran.
    fn run(&self) -> Result<(i32, String)> {
        let args = self.args();
        let mut cmd = self.command_for(&args)?;
        let display = parse::quote_line(&args);
        if let Some(log) = &self.command_log {
            log.record(&self.command_log_prefix, &display);
        }
        log::debug!("exec: {display}");

        let program = cmd.get_program().to_string_lossy().into_owned();
        let status = cmd.status().map_err(|source| Error::Spawn { program, source })?;
        let code = exit_code(status);
        log::debug!("exit {code}: {display}");
        Ok((code, display))
    }

    /// Run the command and return its exit code.
    pub fn exec(&self) -> Result<i32> {
        self.run().map(|(code, _)| code)
    }

    /// Run the command and fail unless it exits with code 0.
    pub fn exec_checked(&self) -> Result<()> {
        match self.run()? {
            (0, _) => Ok(()),
            (code, command) => Err(Error::Failed { command, code }),
        }
    }
}

impl fmt::Display for Sh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&parse::quote_line(&self.args()))
    }
}

impl fmt::Debug for Sh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sh")
            .field("line", &self.line)
            .field("env", &self.env)
            .field("dir", &self.dir)
            .field("command_log_prefix", &self.command_log_prefix)
            .finish_non_exhaustive()
    }
}

/// Translate a process exit status to a shell-style exit code: the exit
/// code itself, `128 + N` for death by signal N, else 1.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

/// Write `args` as one JSON array line. Used by the CLI's `--json` output.
pub fn write_json<W: Write>(out: &mut W, args: &[String]) -> std::io::Result<()> {
    serde_json::to_writer(&mut *out, args)?;
    writeln!(out)
}
