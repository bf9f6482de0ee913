/*!
    State shared by everything taking part in one playback session.
*/

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::logger::Logger;

/**
    Cooperative cancellation flag.

    Set from the interrupt thread, read by the playback loop once per frame.
*/
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /**
        Request that playback stops after the current frame.
    */
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/**
    Logger and cancellation flag, created once at startup and passed down
    by reference.
*/
#[derive(Clone)]
pub struct PlaybackContext {
    pub logger: Arc<Logger>,
    pub cancel: CancelToken,
}

impl PlaybackContext {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger: Arc::new(logger),
            cancel: CancelToken::new(),
        }
    }

    /**
        Shorthand for `self.logger.log(message)`.
    */
    pub fn log(&self, message: impl fmt::Display) {
        self.logger.log(message);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl fmt::Debug for PlaybackContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackContext")
            .field("logger", &self.logger)
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
