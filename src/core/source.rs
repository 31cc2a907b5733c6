//! Input sources
//!
//! A source is anything that can be opened into a byte stream. Sources are
//! opened by the worker that reads them, so the stream itself never has to
//! cross threads.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Name used for standard input on the command line
pub const STDIN_ARG: &str = "-";

/// Something a worker can open and read words from
pub trait InputSource: Sync {
    /// Human-readable name for diagnostics and summaries
    fn name(&self) -> String;

    /// Open the source for reading
    fn open(&self) -> io::Result<Box<dyn BufRead + '_>>;
}

/// A file on disk or the process's standard input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    /// Interpret a command-line argument; `-` means standard input
    pub fn from_arg(arg: &Path) -> Self {
        if arg.as_os_str() == STDIN_ARG {
            Source::Stdin
        } else {
            Source::File(arg.to_path_buf())
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Stdin => write!(f, "<stdin>"),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl InputSource for Source {
    fn name(&self) -> String {
        self.to_string()
    }

    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        match self {
            Source::Stdin => Ok(Box::new(io::stdin().lock())),
            Source::File(path) => {
                let file = File::open(path)?;
                if file.metadata()?.is_dir() {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        "is a directory",
                    ));
                }
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }
}
