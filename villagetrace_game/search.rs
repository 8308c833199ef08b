mod expander;
mod layer;
mod pipeline;

pub use expander::StateExpander;
pub use layer::{LayerOutcome, LayerSearch, LayerStats};
pub use pipeline::{ExpansionPipeline, SearchLimits};
