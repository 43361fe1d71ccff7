use std::sync::Arc;

use inscribe_render::Frame;

/// Downstream consumer of annotated frames.
pub trait FrameSink: Send + Sync {
    fn on_frame(&self, frame: Arc<Frame>);
}

impl<F> FrameSink for F
where
    F: Fn(Arc<Frame>) + Send + Sync,
{
    fn on_frame(&self, frame: Arc<Frame>) {
        self(frame)
    }
}
