#[derive(Debug, thiserror::Error)]
pub enum Error {
    // --------------------------------- generic errors --------------------------------------------
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    RegEx(#[from] regex::Error),
    #[error("payload serialization: {0}")]
    Serialize(#[from] serde_json::Error),

    // --------------------------------- protocol errors -------------------------------------------
    #[error("invalid frame tag `{0}`")]
    InvalidTag(String),

    // --------------------------------- dispatch errors -------------------------------------------
    #[error("undefined command: \"{0}\"")]
    UnknownCommand(String),
    #[error("command `{0}` already registered")]
    DuplicateCommand(String),
    #[error("{command}: {error:#}")]
    Command {
        command: String,
        error: anyhow::Error,
    },

    // --------------------------------- host debugger errors --------------------------------------
    #[error("{0}")]
    Host(String),
    /// Command failed after it had already written something (including event frames).
    #[error("{message}")]
    Execute { message: String, output: String },
    #[error("no frame selected")]
    NoFrameSelected,
    #[error("cannot locate block for frame")]
    NoBlock,

    // --------------------------------- replay host errors ----------------------------------------
    #[error("debugger state file: {0}")]
    Snapshot(#[from] toml::de::Error),
}

impl Error {
    /// Return a hint to the host loop - keep serving commands after error or stop the session.
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::RegEx(_) => false,
            Error::Serialize(_) => false,
            Error::InvalidTag(_) => false,
            Error::UnknownCommand(_) => false,
            Error::DuplicateCommand(_) => false,
            Error::Command { .. } => false,
            Error::Host(_) => false,
            Error::Execute { .. } => false,
            Error::NoFrameSelected => false,
            Error::NoBlock => false,
            Error::Snapshot(_) => false,

            // output stream is gone, nobody can read frames anymore
            Error::IO(_) => true,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Transforms `Result` into `Option` and logs an error if it occurs.
#[macro_export]
macro_rules! weak_error {
    ($res: expr) => {
        match $res {
            Ok(value) => Some(value),
            Err(e) => {
                $crate::gdbjs_warn!(target: "gdbjs", "{:#}", e);
                None
            }
        }
    };
    ($res: expr, $msg: tt) => {
        match $res {
            Ok(value) => Some(value),
            Err(e) => {
                $crate::gdbjs_warn!(target: "gdbjs", concat!($msg, " {:#}"), e);
                None
            }
        }
    };
}
