/*!
    Container opening and video stream selection.
*/

use std::path::Path;

use ffmpeg_next::{format, media};

use ffmpeg_types::{Error, Result};

/**
    An opened media container with a selected video stream.

    Holds no decoder yet; pass it to [`VideoDecoder::new`](crate::VideoDecoder::new)
    to open one. Packets of other streams are skipped while decoding.
*/
pub struct MediaSource {
    pub(crate) input: format::context::Input,
    pub(crate) stream_index: usize,
}

impl MediaSource {
    /**
        Get the container format name (e.g. "mov,mp4,m4a,3gp,3g2,mj2").
    */
    pub fn format_name(&self) -> String {
        self.input.format().name().to_string()
    }
}

/**
    Open a media file, read its stream information, and select the best
    video stream.

    Fails with [`Error::Input`] if the file cannot be opened or probed, and
    with [`Error::StreamNotFound`] if it holds no video.
*/
pub fn open<P: AsRef<Path>>(path: P) -> Result<MediaSource> {
    let path = path.as_ref();

    ffmpeg_next::init().map_err(|e| Error::codec(e.to_string()))?;

    let input = format::input(&path).map_err(|e| {
        Error::input(format!(
            "error reading input from file `{}': {e}",
            path.display()
        ))
    })?;

    let stream_index = input
        .streams()
        .best(media::Type::Video)
        .map(|stream| stream.index())
        .ok_or(Error::StreamNotFound)?;

    Ok(MediaSource {
        input,
        stream_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_missing_file_is_input_error() {
        let result = open("/nonexistent/definitely-not-here.mp4");
        match result {
            Err(Error::Input { message }) => {
                assert!(message.contains("definitely-not-here.mp4"));
            }
            Err(other) => panic!("expected input error, got {other}"),
            Ok(_) => panic!("expected input error, got an opened source"),
        }
    }
}
