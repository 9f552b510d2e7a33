//! Event composer: the create-event form and its pickers.

mod render;
mod state;
mod update;

pub use render::render_composer;
pub use state::{ComposerFocus, ComposerLayout, ComposerState, FeedbackState};
pub use update::{
    ComposerInput, apply, failure_message, handle_cover_loaded, handle_key, handle_submit_result,
};
