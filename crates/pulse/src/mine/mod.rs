//! Mine module — pattern discovery over free-text log lines.

pub mod model;
pub mod tokenize;
pub mod similarity;
pub mod align;
pub mod path;
pub mod assemble;
pub mod error;
pub mod report;
pub mod engine;

pub use engine::{Analysis, DropReason, MinerStats, PatternMiner};
pub use error::AlignError;
pub use model::{Pattern, Token, Variation, Vertex, VertexDistance};
pub use report::{ChannelReporter, MinerEvent, Reporter, TracingReporter};
