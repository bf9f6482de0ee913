/*!
    Timestamped in-memory log.

    Playback draws over the whole terminal, so nothing is printed while it
    runs. Messages are kept in memory and dumped to stderr when something
    fails; in verbose mode they are also echoed live to a log file.
*/

use std::collections::VecDeque;
use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use parking_lot::Mutex;

/**
    Number of lines kept in memory, older lines are dropped first.
*/
pub const HISTORY_LIMIT: usize = 4096;

/**
    Log file written in verbose mode, relative to the working directory.
*/
pub const LOG_FILE_NAME: &str = "ttydisp.log";

struct LoggerInner {
    history: VecDeque<String>,
    echo: Option<Box<dyn Write + Send>>,
}

/**
    Append-only log shared by everything that runs during playback.
*/
pub struct Logger {
    inner: Mutex<LoggerInner>,
}

impl Logger {
    /**
        Create a logger that only keeps history.
    */
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(LoggerInner {
                history: VecDeque::new(),
                echo: None,
            }),
        }
    }

    /**
        Create a logger that also writes every line to `echo` as it is logged.
    */
    pub fn with_echo(echo: impl Write + Send + 'static) -> Self {
        let logger = Self::new();
        logger.inner.lock().echo = Some(Box::new(echo));
        logger
    }

    /**
        Create a logger echoing to a freshly truncated file at `path`.
    */
    pub fn echo_to_file(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::with_echo(File::create(path)?))
    }

    /**
        Append a message, prefixed with the local wall clock time.
    */
    pub fn log(&self, message: impl fmt::Display) {
        let line = format!("[{}] {message}", chrono::Local::now().format("%T"));

        let mut inner = self.inner.lock();
        if let Some(echo) = inner.echo.as_mut() {
            // Best effort, a full disk must not stop playback
            let _ = writeln!(echo, "{line}").and_then(|()| echo.flush());
        }
        if inner.history.len() == HISTORY_LIMIT {
            inner.history.pop_front();
        }
        inner.history.push_back(line);
    }

    /**
        Write the whole history to `sink`, one line per message.
    */
    pub fn dump(&self, sink: &mut dyn Write) -> io::Result<()> {
        let inner = self.inner.lock();
        for line in &inner.history {
            writeln!(sink, "{line}")?;
        }
        sink.flush()
    }

    #[cfg(test)]
    /**
        Copy of the history, oldest first.
    */
    pub fn lines(&self) -> Vec<String> {
        self.inner.lock().history.iter().cloned().collect()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("Logger")
            .field("lines", &inner.history.len())
            .field("echo", &inner.echo.is_some())
            .finish()
    }
}

static_assertions::assert_impl_all!(Logger: Send, Sync);
