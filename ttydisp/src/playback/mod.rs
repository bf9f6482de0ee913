/*!
    The playback loop and its collaborators.
*/

mod pacing;
mod player;
mod source;

#[cfg(test)]
pub(crate) mod fakes;

pub use pacing::PacingScheduler;
pub use player::PlaybackController;
pub use source::{FrameScaler, FrameSource};
