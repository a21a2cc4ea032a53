//! Session module - per-view trial lifecycle
//!
//! Re-exports only. All logic in submodules.

mod record;
mod sit_to_stand;
mod stability;

pub use record::{AnalysisRecord, StabilityRecord};
pub use sit_to_stand::{finalize_history, AnalysisSession};
pub use stability::StabilitySession;
