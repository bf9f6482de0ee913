/*!
    Interrupt handling.

    A background thread runs a single-threaded tokio runtime that waits for
    Ctrl+C. Each interrupt only sets the context's cancel flag; the playback
    loop notices it after finishing the frame in flight.
*/

use std::io;
use std::thread;

use tokio::runtime::Builder;

use crate::context::PlaybackContext;

#[cfg(unix)]
fn listen() -> io::Result<tokio::signal::unix::Signal> {
    use tokio::signal::unix::{SignalKind, signal};
    signal(SignalKind::interrupt())
}

#[cfg(windows)]
fn listen() -> io::Result<tokio::signal::windows::CtrlC> {
    tokio::signal::windows::ctrl_c()
}

/**
    Start listening for interrupts on a background thread.

    The handler is registered before this returns, so from then on an
    interrupt no longer terminates the process.
*/
pub fn install(ctx: &PlaybackContext) -> io::Result<()> {
    let runtime = Builder::new_current_thread().enable_all().build()?;
    let mut interrupts = {
        let _guard = runtime.enter();
        listen()?
    };
    let ctx = ctx.clone();

    thread::Builder::new()
        .name("interrupt".to_string())
        .spawn(move || {
            runtime.block_on(async {
                while interrupts.recv().await.is_some() {
                    ctx.log("Got SIGINT. Exiting...");
                    ctx.cancel.cancel();
                }
            });
        })?;

    Ok(())
}
