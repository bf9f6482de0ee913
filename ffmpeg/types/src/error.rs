/*!
    Error types for the ffmpeg crate ecosystem.
*/

use std::fmt;

/**
    Error type for the ffmpeg crate ecosystem.

    Messages carry FFmpeg's own diagnostic text where there is one, since
    library logging is usually silenced while a frame is on screen.
*/
#[derive(Debug)]
pub enum Error {
    /// Container could not be opened or read
    Input { message: String },
    /// Codec error (codec open, decode or scale failure)
    Codec { message: String },
    /// Invalid data (malformed input)
    InvalidData { message: String },
    /// Unsupported format (valid but not handled)
    UnsupportedFormat { message: String },
    /// The container holds no video stream
    StreamNotFound,
    /// End of stream reached where more data was required
    Eof,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input { message } => write!(f, "input error: {message}"),
            Self::Codec { message } => write!(f, "codec error: {message}"),
            Self::InvalidData { message } => write!(f, "invalid data: {message}"),
            Self::UnsupportedFormat { message } => write!(f, "unsupported format: {message}"),
            Self::StreamNotFound => write!(f, "could not read any video stream"),
            Self::Eof => write!(f, "unexpected end of stream"),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /**
        Create an input error with the given message.
    */
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
        }
    }

    /**
        Create a codec error with the given message.
    */
    pub fn codec(message: impl Into<String>) -> Self {
        Self::Codec {
            message: message.into(),
        }
    }

    /**
        Create an invalid data error with the given message.
    */
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /**
        Create an unsupported format error with the given message.
    */
    pub fn unsupported_format(message: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            message: message.into(),
        }
    }
}

/**
    Result type alias for the ffmpeg crate ecosystem.
*/
pub type Result<T> = std::result::Result<T, Error>;
