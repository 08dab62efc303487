//! Data models shared by the parsers, the orchestrator and the registry.
//!
//! - [`Reading`]: tagged number (missing / malformed / value)
//! - [`LevelRecord`]: one row of the per-level compaction table
//! - [`EngineStatus`]: status scalars plus the raw dump lines
//! - [`StatsReport`]: the full structured result of a parse pass

mod level;
mod reading;
mod report;
mod status;

pub use level::{LevelFiles, LevelRecord};
pub use reading::Reading;
pub use report::{DbCounters, DbGauges, StatsReport};
pub use status::EngineStatus;
