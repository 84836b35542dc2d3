//! Recursive classification of member declarations.
//!
//! [`classify_member`] is the entry point: it binds declaration metadata to a
//! fresh [`FieldDescriptor`], then walks the member's type tree depth-first
//! until a terminal category is reached. Template instantiations detour
//! through the [`TemplateInstantiationRegistry`] so each distinct canonical
//! spelling is traversed and emitted once per run.

pub mod containers;
pub mod registry;

use log::{debug, trace, warn};

use crate::config::ClassifierConfig;
use crate::core::errors::Result;
use crate::core::field::{
    FieldDescriptor, InstantiationDescription, IoMask, TypeCategory, POINTER_DIM,
};
use crate::core::traits::{CommentSource, EmissionSink};
use crate::core::types::{BuiltinKind, MemberDecl, RecordNode, TemplateInfo, TypeNode};

use containers::StdRecognition;
use registry::TemplateInstantiationRegistry;

/// Shared state threaded through one classification run.
///
/// The registry is the only cross-member state; holding it by `&mut` here
/// keeps the single-writer discipline without any hidden global.
pub struct ClassifyContext<'a> {
    pub config: &'a ClassifierConfig,
    pub registry: &'a mut TemplateInstantiationRegistry,
    pub comments: &'a dyn CommentSource,
    pub sink: &'a mut dyn EmissionSink,
}

impl<'a> ClassifyContext<'a> {
    pub fn new(
        config: &'a ClassifierConfig,
        registry: &'a mut TemplateInstantiationRegistry,
        comments: &'a dyn CommentSource,
        sink: &'a mut dyn EmissionSink,
    ) -> Self {
        Self {
            config,
            registry,
            comments,
            sink,
        }
    }
}

/// Classify one member declaration of `container_class` and hand the
/// finalized descriptor to the emission sink.
pub fn classify_member(
    decl: &MemberDecl,
    container_class: &str,
    inherited: bool,
    ctx: &mut ClassifyContext,
) -> Result<FieldDescriptor> {
    let mut classifier = TypeClassifier::new(container_class, inherited);
    classifier.classify(decl, ctx)?;
    let fdes = classifier.into_descriptor();
    ctx.sink.emit_field(&fdes)?;
    Ok(fdes)
}

/// Recursive dispatcher over type-node kinds.
///
/// Owns exactly one descriptor for the duration of one member's traversal;
/// nested instantiation walks get their own classifier per member, so no
/// descriptor is ever aliased across traversal frames.
pub struct TypeClassifier {
    fdes: FieldDescriptor,
}

impl TypeClassifier {
    pub fn new(container_class: &str, inherited: bool) -> Self {
        Self {
            fdes: FieldDescriptor::new(container_class, inherited),
        }
    }

    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.fdes
    }

    pub fn into_descriptor(self) -> FieldDescriptor {
        self.fdes
    }

    /// Bind declaration metadata, then walk the member's type.
    pub fn classify(&mut self, decl: &MemberDecl, ctx: &mut ClassifyContext) -> Result<()> {
        self.bind_declaration(decl, ctx);

        // Once storage rules have shut io off completely nothing downstream
        // can touch the member; skip the type walk.
        if self.fdes.io().is_disabled() {
            debug!(
                "member {}::{} has no io, skipping type walk",
                self.fdes.container_class, self.fdes.name
            );
            return Ok(());
        }

        match &decl.ty {
            // Surface type is not fully resolved; remember the spelling the
            // user wrote, then classify the canonical form instead.
            TypeNode::Alias { spelling, resolved } => {
                trace!("member {} declared as alias '{spelling}'", self.fdes.name);
                self.fdes.non_canonical_type_name = Some(spelling.clone());
                self.visit(resolved, ctx)
            }
            ty => self.visit(ty, ctx),
        }
    }

    /// Metadata supplied by the declaration adapter: identity, location,
    /// layout, access, storage class and the optional one-line comment.
    fn bind_declaration(&mut self, decl: &MemberDecl, ctx: &mut ClassifyContext) {
        let fdes = &mut self.fdes;
        fdes.name = decl.name.clone();
        fdes.access = decl.access;
        fdes.file = decl.file.clone();
        fdes.line = decl.line;
        fdes.byte_offset = decl.bit_offset / 8;
        fdes.byte_width = decl.byte_width;
        fdes.is_static = decl.is_static;

        if let Some(width) = decl.bit_width {
            fdes.set_bitfield(decl.bit_offset, width);
        }

        if decl.is_static && decl.is_const && decl.has_initializer {
            // The compiler substitutes the value in place; no storage exists
            // to marshal.
            fdes.disable_io();
        } else if decl.is_static && decl.is_const {
            // Readable externally, never writable.
            fdes.restrict_io(IoMask::OUTPUT);
        }

        if ctx.config.capture_comments
            && !ctx.comments.file_opted_out(&decl.file)
            && !ctx.comments.path_opted_out(&decl.file)
        {
            fdes.comment = ctx.comments.comment(&decl.file, decl.line);
        }
    }

    fn visit(&mut self, ty: &TypeNode, ctx: &mut ClassifyContext) -> Result<()> {
        match ty {
            TypeNode::Builtin(kind) => {
                self.visit_builtin(kind);
                Ok(())
            }
            TypeNode::Reference(inner) => {
                // Referenced storage cannot be marshalled; still descend so
                // the shape is on record.
                debug!("member {} is a reference, io disabled", self.fdes.name);
                self.fdes.disable_io();
                self.visit(inner, ctx)
            }
            TypeNode::Pointer(pointee) => {
                self.fdes.add_array_dim(POINTER_DIM);
                self.visit(pointee, ctx)
            }
            TypeNode::Array { len, element } => {
                self.fdes.add_array_dim(*len as i64);
                self.visit(element, ctx)
            }
            TypeNode::Enum { spelling } => {
                self.visit_enum(spelling);
                Ok(())
            }
            TypeNode::Record(record) => self.visit_record(record, ctx),
            // A surface type below the top level; classify its canonical
            // form transparently.
            TypeNode::Alias { resolved, .. } => self.visit(resolved, ctx),
        }
    }

    fn visit_builtin(&mut self, kind: &BuiltinKind) {
        trace!("member {} builtin '{}'", self.fdes.name, kind.spelling());
        self.fdes.type_name = kind.spelling().to_string();

        if self.fdes.is_bitfield() {
            let category = if kind.is_unsigned() {
                TypeCategory::UnsignedBitfield
            } else {
                TypeCategory::Bitfield
            };
            self.fdes.set_category(category);
            return;
        }

        let category = match kind {
            BuiltinKind::Bool => TypeCategory::Boolean,
            BuiltinKind::SChar => TypeCategory::Character,
            BuiltinKind::UChar => TypeCategory::UnsignedCharacter,
            BuiltinKind::WChar => TypeCategory::WideCharacter,
            BuiltinKind::Short => TypeCategory::Short,
            BuiltinKind::UShort => TypeCategory::UnsignedShort,
            BuiltinKind::Int => TypeCategory::Integer,
            BuiltinKind::UInt => TypeCategory::UnsignedInteger,
            BuiltinKind::Long => TypeCategory::Long,
            BuiltinKind::ULong => TypeCategory::UnsignedLong,
            BuiltinKind::LongLong => TypeCategory::LongLong,
            BuiltinKind::ULongLong => TypeCategory::UnsignedLongLong,
            BuiltinKind::Float => TypeCategory::Float,
            BuiltinKind::Double => TypeCategory::Double,
            BuiltinKind::Other(spelling) => {
                warn!(
                    "unmapped builtin '{}' on {}::{}, degrading to void",
                    spelling, self.fdes.container_class, self.fdes.name
                );
                TypeCategory::Void
            }
        };
        self.fdes.set_category(category);
    }

    fn visit_enum(&mut self, spelling: &str) {
        let mut name = containers::strip_enum_keyword(spelling);
        // An enum scoped inside an uninstantiated template has no attribute
        // data of its own; keep a placeholder spelling.
        if name.contains('<') {
            name = containers::sanitize_uninstantiated(&name);
        }
        trace!("member {} enumerated '{name}'", self.fdes.name);
        self.fdes.mangled_type_name.clear();
        self.fdes.type_name = name;
        self.fdes.set_category(TypeCategory::Enumerated);
        self.fdes.mark_enum();
    }

    fn visit_record(&mut self, record: &RecordNode, ctx: &mut ClassifyContext) -> Result<()> {
        // String wrappers are record-typed but categorized separately, under
        // one normalized spelling whatever the ABI namespace was.
        if containers::is_string_like(&record.qualified_name, ctx.config) {
            self.fdes.type_name = "std::string".to_string();
            self.fdes.set_category(TypeCategory::String);
            self.fdes.mark_string();
            return Ok(());
        }

        let spelling = containers::normalize_spelling(&record.spelling);

        match containers::recognize_std(&spelling, ctx.config) {
            StdRecognition::Container { clearable } => {
                self.fdes.type_name = spelling;
                self.fdes.set_category(TypeCategory::StlContainer);
                self.fdes.mark_stl(clearable);
                // Downstream shows the spelling the user actually wrote for
                // container members, not the desugared one.
                self.fdes.mangled_type_name = self
                    .fdes
                    .non_canonical_type_name
                    .clone()
                    .unwrap_or_default();
                return Ok(());
            }
            StdRecognition::UnknownStd => {
                debug!(
                    "member {} has unsupported std type '{spelling}', io disabled",
                    self.fdes.name
                );
                self.fdes.disable_io();
                return Ok(());
            }
            StdRecognition::NotStd => {}
        }

        if let Some(template) = &record.template {
            return self.process_template(&spelling, template, ctx);
        }

        match &record.linkage_name {
            Some(name) => self.fdes.type_name = name.clone(),
            None => {
                // No stable emission target exists for a fully anonymous
                // aggregate.
                debug!(
                    "member {} has anonymous aggregate type, io disabled",
                    self.fdes.name
                );
                self.fdes.disable_io();
            }
        }
        self.fdes.set_category(TypeCategory::Structured);
        self.fdes.mark_record();
        Ok(())
    }

    /// Resolve a template instantiation through the registry, traversing and
    /// emitting its members on first encounter only.
    fn process_template(
        &mut self,
        spelling: &str,
        template: &TemplateInfo,
        ctx: &mut ClassifyContext,
    ) -> Result<()> {
        let mangled = match ctx.registry.identifier(spelling) {
            Some(identifier) => identifier.to_string(),
            None => {
                let identifier =
                    ctx.registry
                        .insert(spelling, &self.fdes.container_class, &self.fdes.name);

                // The mapping is stored before the nested walk; a
                // self-referential instantiation resolves to a hit above
                // instead of recursing without bound.
                let mut fields = Vec::with_capacity(template.members.len());
                for member in &template.members {
                    let mut nested = TypeClassifier::new(spelling, false);
                    nested.classify(member, ctx)?;
                    fields.push(nested.into_descriptor());
                }

                let description = InstantiationDescription {
                    name: spelling.to_string(),
                    mangled_name: identifier.clone(),
                    file: self.fdes.file.clone(),
                    fields,
                };
                ctx.sink.emit_instantiation(&description)?;
                identifier
            }
        };

        self.fdes.mangled_type_name = mangled;
        self.fdes.set_category(TypeCategory::Structured);
        self.fdes.mark_record();
        Ok(())
    }
}
