//! Collaborator traits at the engine's boundaries.

use std::path::Path;

use crate::core::errors::Result;
use crate::core::field::{FieldDescriptor, InstantiationDescription};

/// Documentation collaborator: one-line comments keyed by source location.
///
/// The two opt-out predicates are independent; either one suppresses comment
/// capture for a member in the affected file.
pub trait CommentSource {
    /// Comment recorded on the given line, if any.
    fn comment(&self, file: &Path, line: usize) -> Option<String>;

    /// File-level opt-out marker is present in this file.
    fn file_opted_out(&self, file: &Path) -> bool;

    /// A path-level opt-out rule covers this file.
    fn path_opted_out(&self, file: &Path) -> bool;
}

/// A comment source with no comments and no opt-outs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoComments;

impl CommentSource for NoComments {
    fn comment(&self, _file: &Path, _line: usize) -> Option<String> {
        None
    }

    fn file_opted_out(&self, _file: &Path) -> bool {
        false
    }

    fn path_opted_out(&self, _file: &Path) -> bool {
        false
    }
}

/// Emission collaborator: receives finalized descriptors in discovery order.
pub trait EmissionSink {
    /// One finalized descriptor per processed member.
    fn emit_field(&mut self, field: &FieldDescriptor) -> Result<()>;

    /// One aggregate description per newly discovered template
    /// instantiation.
    fn emit_instantiation(&mut self, instantiation: &InstantiationDescription) -> Result<()>;
}
