/*!
    Turning scaled frames into terminal output.

    Every pixel becomes one space with its background set to an entry of the
    xterm 256-color cube. Frames are redrawn in place by moving the cursor
    back up over the previous frame before drawing the next one.
*/

mod quantize;
mod renderer;

pub use quantize::quantize;
pub use renderer::FrameRenderer;
