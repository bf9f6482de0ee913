/*!
    Video decoder implementation.
*/

use ffmpeg_next::{
    Error as FfmpegError, Packet, codec, decoder::Video as VideoDecoderFFmpeg,
    util::error::{EAGAIN, EINVAL},
    util::frame::video::Video as VideoFrameFFmpeg,
};

use ffmpeg_types::{
    Error, FALLBACK_FRAME_RATE, Plane, Rational, Result, VideoFrame, VideoStreamInfo,
};

use crate::pixel;
use crate::source::MediaSource;

/**
    Outcome of one attempt to pull a frame out of the decoder.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DecodeStep {
    /// A frame was decoded and is ready to be read.
    Frame,
    /// The decoder needs another packet before it can produce a frame.
    NeedMoreInput,
    /// The decoder is drained, no frames remain.
    EndOfStream,
}

/**
    Video decoder.

    Reads packets of the selected stream from its [`MediaSource`] and
    decodes them into frames, one frame per call to [`next_frame`](Self::next_frame).
*/
pub struct VideoDecoder {
    source: MediaSource,
    decoder: VideoDecoderFFmpeg,
    info: VideoStreamInfo,
    decoded: VideoFrameFFmpeg,
    frame: VideoFrame,
    input_done: bool,
}

impl VideoDecoder {
    /**
        Open a decoder for the source's video stream.

        Fails with [`Error::UnsupportedFormat`] if FFmpeg has no decoder for
        the stream's codec, and with [`Error::Codec`] if the decoder cannot
        be opened.
    */
    pub fn new(source: MediaSource) -> Result<Self> {
        let (parameters, time_base, stream_rates) = {
            let stream = source
                .input
                .stream(source.stream_index)
                .ok_or(Error::StreamNotFound)?;
            (
                stream.parameters(),
                to_rational(stream.time_base()),
                [stream.avg_frame_rate(), stream.rate()],
            )
        };

        let context = codec::context::Context::from_parameters(parameters)
            .map_err(|e| Error::codec(format!("error reading codec context: {e}")))?;

        let decoder = context.decoder().video().map_err(|e| match e {
            FfmpegError::DecoderNotFound => Error::unsupported_format("unsupported codec"),
            e => Error::codec(format!("error opening codec: {e}")),
        })?;

        // Container rates first, the codec's own rate is often unset
        let frame_rate = stream_rates
            .into_iter()
            .chain(decoder.frame_rate())
            .map(to_rational)
            .find(|rate| rate.is_positive())
            .unwrap_or(FALLBACK_FRAME_RATE);

        let info = VideoStreamInfo {
            index: source.stream_index,
            codec: decoder.id().name().to_string(),
            width: decoder.width(),
            height: decoder.height(),
            format: pixel::from_ffmpeg(decoder.format()),
            time_base,
            frame_rate,
        };

        Ok(Self {
            source,
            decoder,
            info,
            decoded: VideoFrameFFmpeg::empty(),
            frame: VideoFrame::empty(),
            input_done: false,
        })
    }

    /**
        Get the metadata of the stream being decoded.
    */
    pub fn stream_info(&self) -> &VideoStreamInfo {
        &self.info
    }

    /**
        Decode the next frame.

        Feeds packets until the decoder produces a frame. Once the container
        is exhausted the decoder is flushed, so frames it buffered internally
        are still returned. Returns `Ok(None)` when no frames remain.

        The returned frame is overwritten by the next call.
    */
    pub fn next_frame(&mut self) -> Result<Option<&VideoFrame>> {
        loop {
            match self.receive()? {
                DecodeStep::Frame => {
                    self.copy_decoded()?;
                    return Ok(Some(&self.frame));
                }
                DecodeStep::NeedMoreInput => self.feed()?,
                DecodeStep::EndOfStream => return Ok(None),
            }
        }
    }

    /**
        Try to pull one decoded frame out of the decoder, without feeding it.
    */
    fn receive(&mut self) -> Result<DecodeStep> {
        match self.decoder.receive_frame(&mut self.decoded) {
            Ok(()) => Ok(DecodeStep::Frame),
            Err(FfmpegError::Other { errno }) if errno == EAGAIN => {
                if self.input_done {
                    Ok(DecodeStep::EndOfStream)
                } else {
                    Ok(DecodeStep::NeedMoreInput)
                }
            }
            Err(FfmpegError::Eof) => Ok(DecodeStep::EndOfStream),
            Err(e) => Err(Error::codec(format!("error receiving frame: {e}"))),
        }
    }

    /**
        Send the next packet of the video stream to the decoder, or signal
        end of input once the container has no packets left.
    */
    fn feed(&mut self) -> Result<()> {
        if self.input_done {
            return Ok(());
        }

        loop {
            let mut packet = Packet::empty();
            match packet.read(&mut self.source.input) {
                Ok(()) if packet.stream() == self.source.stream_index => {
                    return self.decoder.send_packet(&packet).map_err(send_error);
                }
                Ok(()) => continue,
                Err(FfmpegError::Other { errno }) if errno == EAGAIN => continue,
                Err(FfmpegError::Eof) => {
                    self.input_done = true;
                    return self.decoder.send_eof().map_err(send_error);
                }
                Err(e) => return Err(Error::input(format!("error reading packet: {e}"))),
            }
        }
    }

    /**
        Copy the FFmpeg frame into the reusable output frame.
    */
    fn copy_decoded(&mut self) -> Result<()> {
        let format = pixel::from_ffmpeg(self.decoded.format()).ok_or_else(|| {
            Error::unsupported_format(format!("{:?}", self.decoded.format()).to_lowercase())
        })?;

        self.frame.width = self.decoded.width();
        self.frame.height = self.decoded.height();
        self.frame.format = format;
        self.frame
            .planes
            .resize_with(self.decoded.planes(), Plane::default);

        for (index, plane) in self.frame.planes.iter_mut().enumerate() {
            plane.stride = self.decoded.stride(index);
            plane.data.clear();
            plane.data.extend_from_slice(self.decoded.data(index));
        }

        Ok(())
    }
}

/**
    Map a failure to submit input to the decoder.

    End of stream and invalid data are distinct here, since both abort playback
    with different diagnostics.
*/
fn send_error(e: FfmpegError) -> Error {
    match e {
        FfmpegError::Eof => Error::Eof,
        FfmpegError::InvalidData => Error::invalid_data("decoder rejected packet"),
        FfmpegError::Other { errno } if errno == EINVAL => {
            Error::invalid_data("decoder is not accepting packets")
        }
        e => Error::codec(format!("error sending packet: {e}")),
    }
}

fn to_rational(value: ffmpeg_next::Rational) -> Rational {
    Rational {
        num: value.numerator(),
        den: value.denominator(),
    }
}
