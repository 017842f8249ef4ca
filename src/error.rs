use std::io;

/// Errors from turning a resolved line into a running process.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The line resolved to no arguments, so there is no program to run.
    #[error("empty command line")]
    EmptyCommand,

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The process ran but exited unsuccessfully.
    #[error("<{command}> failed: return code={code}")]
    Failed { command: String, code: i32 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
