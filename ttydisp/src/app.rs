/*!
    Program entry: argument handling, startup and teardown around the
    playback loop.
*/

use std::ffi::OsString;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::PathBuf;

use clap::Parser;

use ffmpeg_decode::VideoDecoder;
use ffmpeg_transform::{VideoTransform, VideoTransformConfig};

use crate::cli::{self, Args, Command};
use crate::config::RenderConfig;
use crate::context::PlaybackContext;
use crate::error::{StartupError, describe};
use crate::logger::{LOG_FILE_NAME, Logger};
use crate::playback::{FrameScaler, FrameSource, PacingScheduler, PlaybackController};
use crate::signal;
use crate::terminal::{TerminalProbe, TerminalSizeProbe};

const EXIT_SUCCESS: u8 = 0;
const EXIT_FAILURE: u8 = 1;

/**
    Everything the program touches outside its own memory.
*/
pub struct AppEnv<'a> {
    /// Where frames and help text go.
    pub out: &'a mut dyn Write,
    /// Where errors and the log dump go.
    pub err: &'a mut dyn Write,
    /// Whether `out` is an interactive terminal.
    pub is_terminal: bool,
    pub probe: &'a dyn TerminalProbe,
    /// Log file used in verbose mode, None to never write one.
    pub log_file: Option<PathBuf>,
    /// Install the interrupt handler before playback.
    pub handle_interrupts: bool,
}

/**
    Run the program against the real process environment, returning its exit code.
*/
pub fn run() -> u8 {
    ffmpeg_decode::silence_library_logging();

    let stdout = io::stdout();
    let is_terminal = stdout.is_terminal();
    let mut out = BufWriter::new(stdout.lock());
    let mut err = io::stderr().lock();

    let env = AppEnv {
        out: &mut out,
        err: &mut err,
        is_terminal,
        probe: &TerminalSizeProbe,
        log_file: Some(PathBuf::from(LOG_FILE_NAME)),
        handle_interrupts: true,
    };

    run_with(
        std::env::args_os(),
        env,
        open_decoder,
        VideoTransform::new(VideoTransformConfig::default()),
    )
}

/**
    Run the program with injected arguments, environment, decoder and scaler.

    `open` is only called once the arguments are known to be valid.
*/
pub fn run_with<I, T, S, O, C>(args: I, env: AppEnv<'_>, open: O, mut scaler: C) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    S: FrameSource,
    O: FnOnce(&RenderConfig, &PlaybackContext) -> Result<S, StartupError>,
    C: FrameScaler,
{
    let AppEnv {
        out,
        err,
        is_terminal,
        probe,
        log_file,
        handle_interrupts,
    } = env;

    let args = match Args::try_parse_from(args) {
        Ok(args) => args,
        Err(e) => {
            let _ = write!(err, "{e}");
            return EXIT_FAILURE;
        }
    };

    let ctx = PlaybackContext::new(create_logger(args.verbose, log_file, &mut *err));

    let config = match args.validate(is_terminal) {
        Ok(Command::Help) => {
            let _ = write!(out, "{}", cli::usage());
            let _ = out.flush();
            return EXIT_FAILURE;
        }
        Ok(Command::Play(config)) => config,
        Err(e) => return fail(&ctx, err, &e),
    };

    if handle_interrupts {
        if let Err(e) = signal::install(&ctx) {
            ctx.log(format_args!("Could not install interrupt handler: {e}"));
        }
    }

    ctx.log(format_args!("Reading from file `{}'", config.path.display()));
    let mut source = match open(&config, &ctx) {
        Ok(source) => source,
        Err(e) => return fail(&ctx, err, &e),
    };

    let pacing = PacingScheduler::new(&source.timing());
    let mut controller = PlaybackController::new(&ctx, &config, probe, pacing, &mut *out);
    match controller.run(&mut source, &mut scaler) {
        Ok(_) => EXIT_SUCCESS,
        Err(e) => {
            drop(controller);
            let _ = writeln!(out);
            let _ = out.flush();
            fail(&ctx, err, &e)
        }
    }
}

/**
    Open the file and its video decoder, logging each step.
*/
fn open_decoder(
    config: &RenderConfig,
    ctx: &PlaybackContext,
) -> Result<VideoDecoder, StartupError> {
    let source = ffmpeg_decode::open(&config.path).map_err(StartupError::Format)?;
    ctx.log("Finished reading format");
    if config.verbose {
        ctx.log(format_args!("Container format: {}", source.format_name()));
    }

    let decoder = VideoDecoder::new(source).map_err(StartupError::Codec)?;
    ctx.log("Finished reading video codec");
    if config.verbose {
        ctx.log(decoder.stream_info());
    }

    Ok(decoder)
}

fn create_logger(verbose: bool, log_file: Option<PathBuf>, err: &mut dyn Write) -> Logger {
    match log_file.filter(|_| verbose) {
        Some(path) => Logger::echo_to_file(&path).unwrap_or_else(|e| {
            let _ = writeln!(err, "could not open {}: {e}", path.display());
            Logger::new()
        }),
        None => Logger::new(),
    }
}

/**
    Report a fatal error on `err`, followed by the log so far.
*/
fn fail(ctx: &PlaybackContext, err: &mut dyn Write, error: &dyn std::error::Error) -> u8 {
    let message = describe(error);
    ctx.log(&message);
    let _ = writeln!(err, "{message}");
    let _ = ctx.logger.dump(err);
    EXIT_FAILURE
}
