//! Core data model: input tree, field descriptors, errors and the
//! collaborator traits.

pub mod errors;
pub mod field;
pub mod traits;
pub mod types;

pub use errors::{Error, Result};
pub use field::{FieldDescriptor, InstantiationDescription, IoMask, TypeCategory, POINTER_DIM};
pub use traits::{CommentSource, EmissionSink, NoComments};
pub use types::{AccessLevel, BuiltinKind, MemberDecl, RecordNode, TemplateInfo, TypeNode};
