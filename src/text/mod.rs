pub mod edits;
pub mod position;

pub use edits::apply_content_changes;
pub use position::{PositionMapper, compute_line_starts};
