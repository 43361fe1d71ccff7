use inscribe_core::ConfigError;
use inscribe_render::CompositeError;

/// Errors surfaced by the overlay engine.
///
/// Text problems are not errors here: they stay on the descriptor as a
/// [`inscribe_text::TextError`] and the overlay simply draws nothing.
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Composite(#[from] CompositeError),

    #[error("overlay slot {slot} out of range ({count} slots)")]
    SlotOutOfRange { slot: usize, count: usize },
}

pub type OverlayResult<T> = Result<T, OverlayError>;
