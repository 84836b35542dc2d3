//! Output sinks for finalized classification results.

pub mod output;

pub use output::{CollectingSink, JsonEmitter};
