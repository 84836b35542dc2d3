//! fieldmap classifies the declared members of class/struct declarations in
//! a C++-shaped source language and produces normalized, serializable
//! descriptions of each member's storage shape and io eligibility, for
//! consumption by a downstream reflection/marshalling code generator.
//!
//! The parsing front end lowers declarations into [`crate::core::MemberDecl`]
//! values; [`classify::classify_member`] walks each one into a finalized
//! [`crate::core::FieldDescriptor`] and reports newly discovered template
//! instantiations to the emission sink exactly once.

pub mod classify;
pub mod config;
pub mod core;
pub mod io;

// Re-export commonly used types
pub use crate::classify::registry::TemplateInstantiationRegistry;
pub use crate::classify::{classify_member, ClassifyContext, TypeClassifier};
pub use crate::config::ClassifierConfig;
pub use crate::core::{
    AccessLevel, BuiltinKind, CommentSource, EmissionSink, Error, FieldDescriptor,
    InstantiationDescription, IoMask, MemberDecl, NoComments, RecordNode, Result, TypeCategory,
    TypeNode, POINTER_DIM,
};
pub use crate::io::{CollectingSink, JsonEmitter};
