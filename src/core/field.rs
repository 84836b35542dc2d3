//! The field descriptor: one accumulator record per classified member.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::types::AccessLevel;

/// Sentinel dimension value marking one level of pointer indirection.
pub const POINTER_DIM: i64 = -1;

/// Closed set of categories a member can land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeCategory {
    Boolean,
    Character,
    UnsignedCharacter,
    WideCharacter,
    Short,
    UnsignedShort,
    Integer,
    UnsignedInteger,
    Long,
    UnsignedLong,
    LongLong,
    UnsignedLongLong,
    Float,
    Double,
    Bitfield,
    UnsignedBitfield,
    Enumerated,
    String,
    Structured,
    StlContainer,
    /// Fallback for shapes the generator cannot represent.
    Void,
}

/// Read/write eligibility of a member for generated marshalling code.
///
/// Bit 0 allows output (external read), bit 1 allows input (external write).
/// The mask only ever narrows during one classification pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IoMask(u8);

impl IoMask {
    pub const OUTPUT: IoMask = IoMask(0b01);
    pub const INPUT: IoMask = IoMask(0b10);

    pub fn all() -> Self {
        IoMask(0b11)
    }

    pub fn none() -> Self {
        IoMask(0)
    }

    pub fn allows_output(&self) -> bool {
        self.0 & Self::OUTPUT.0 != 0
    }

    pub fn allows_input(&self) -> bool {
        self.0 & Self::INPUT.0 != 0
    }

    pub fn is_disabled(&self) -> bool {
        self.0 == 0
    }

    /// Intersection with another mask; the result never gains a bit.
    pub fn intersect(self, other: IoMask) -> IoMask {
        IoMask(self.0 & other.0)
    }

    pub fn bits(&self) -> u8 {
        self.0
    }
}

impl Default for IoMask {
    fn default() -> Self {
        IoMask::all()
    }
}

/// Normalized description of one class member, built up in a single
/// classification pass and never reused.
///
/// Shape state (category, io mask, bitfield layout, classification flags) is
/// private so the mutator surface can hold the pass invariants: the category
/// is assigned once, the io mask only narrows, and bitfield width and offset
/// travel together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub container_class: String,
    pub inherited: bool,

    category: Option<TypeCategory>,
    pub type_name: String,
    pub non_canonical_type_name: Option<String>,
    pub mangled_type_name: String,
    /// Outer-to-inner dimensions; [`POINTER_DIM`] marks pointer levels.
    pub dims: Vec<i64>,

    is_bitfield: bool,
    bitfield_width: u32,
    bitfield_offset: u32,

    is_enum: bool,
    is_record: bool,
    is_stl: bool,
    is_string: bool,
    stl_clear: bool,

    pub access: AccessLevel,
    pub is_static: bool,

    io: IoMask,

    pub file: PathBuf,
    pub line: usize,
    pub comment: Option<String>,

    pub byte_offset: u64,
    pub byte_width: u64,
}

impl FieldDescriptor {
    pub fn new(container_class: impl Into<String>, inherited: bool) -> Self {
        Self {
            name: String::new(),
            container_class: container_class.into(),
            inherited,
            category: None,
            type_name: String::new(),
            non_canonical_type_name: None,
            mangled_type_name: String::new(),
            dims: Vec::new(),
            is_bitfield: false,
            bitfield_width: 0,
            bitfield_offset: 0,
            is_enum: false,
            is_record: false,
            is_stl: false,
            is_string: false,
            stl_clear: false,
            access: AccessLevel::Public,
            is_static: false,
            io: IoMask::all(),
            file: PathBuf::new(),
            line: 0,
            comment: None,
            byte_offset: 0,
            byte_width: 0,
        }
    }

    /// Terminal category; [`TypeCategory::Void`] until one is assigned.
    pub fn category(&self) -> TypeCategory {
        self.category.unwrap_or(TypeCategory::Void)
    }

    /// Assign the terminal category. The first assignment wins; later calls
    /// on an already-categorized descriptor are ignored.
    pub fn set_category(&mut self, category: TypeCategory) {
        if self.category.is_none() {
            self.category = Some(category);
        }
    }

    pub fn io(&self) -> IoMask {
        self.io
    }

    /// Narrow the io mask. Cleared permissions are never restored.
    pub fn restrict_io(&mut self, mask: IoMask) {
        self.io = self.io.intersect(mask);
    }

    /// Shut off marshalling for this member entirely.
    pub fn disable_io(&mut self) {
        self.io = IoMask::none();
    }

    pub fn is_bitfield(&self) -> bool {
        self.is_bitfield
    }

    pub fn bitfield_width(&self) -> u32 {
        self.bitfield_width
    }

    pub fn bitfield_offset(&self) -> u32 {
        self.bitfield_offset
    }

    /// Record bitfield layout. Width, intra-byte offset and the byte offset
    /// are derived together from the declared width and the member's bit
    /// offset; they are never set independently.
    pub fn set_bitfield(&mut self, bit_offset: u64, width: u32) {
        self.is_bitfield = true;
        self.bitfield_width = width;
        self.byte_offset = bit_offset / 8;
        self.bitfield_offset = (bit_offset % 8) as u32;
    }

    pub fn is_enum(&self) -> bool {
        self.is_enum
    }

    pub fn is_record(&self) -> bool {
        self.is_record
    }

    pub fn is_stl(&self) -> bool {
        self.is_stl
    }

    pub fn is_string(&self) -> bool {
        self.is_string
    }

    /// Clear-support flag; meaningful only when [`is_stl`](Self::is_stl).
    pub fn stl_clear(&self) -> bool {
        self.stl_clear
    }

    pub fn mark_enum(&mut self) {
        self.clear_kind_flags();
        self.is_enum = true;
    }

    pub fn mark_record(&mut self) {
        self.clear_kind_flags();
        self.is_record = true;
    }

    pub fn mark_stl(&mut self, clearable: bool) {
        self.clear_kind_flags();
        self.is_stl = true;
        self.stl_clear = clearable;
    }

    pub fn mark_string(&mut self) {
        self.clear_kind_flags();
        self.is_string = true;
    }

    // At most one kind flag may be set at a time.
    fn clear_kind_flags(&mut self) {
        self.is_enum = false;
        self.is_record = false;
        self.is_stl = false;
        self.is_string = false;
        self.stl_clear = false;
    }

    /// Append one dimension, outer dimensions first.
    pub fn add_array_dim(&mut self, dim: i64) {
        self.dims.push(dim);
    }
}

/// Description of one newly discovered template instantiation, handed to the
/// emission collaborator exactly once per canonical spelling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstantiationDescription {
    /// Canonical instantiation spelling.
    pub name: String,
    /// Symbol-safe generated identifier.
    pub mangled_name: String,
    /// File of the member that first referenced the instantiation.
    pub file: PathBuf,
    /// Classified members of the instantiation, in declaration order.
    pub fields: Vec<FieldDescriptor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_mask_only_narrows() {
        let mut fdes = FieldDescriptor::new("Ball", false);
        assert!(fdes.io().allows_input());
        assert!(fdes.io().allows_output());

        fdes.restrict_io(IoMask::OUTPUT);
        assert!(!fdes.io().allows_input());
        assert!(fdes.io().allows_output());

        // Intersecting with the full mask must not restore input.
        fdes.restrict_io(IoMask::all());
        assert!(!fdes.io().allows_input());
    }

    #[test]
    fn test_category_assigned_once() {
        let mut fdes = FieldDescriptor::new("Ball", false);
        assert_eq!(fdes.category(), TypeCategory::Void);

        fdes.set_category(TypeCategory::Double);
        fdes.set_category(TypeCategory::Integer);
        assert_eq!(fdes.category(), TypeCategory::Double);
    }

    #[test]
    fn test_bitfield_layout_derived_together() {
        let mut fdes = FieldDescriptor::new("Ball", false);
        fdes.set_bitfield(35, 3);
        assert!(fdes.is_bitfield());
        assert_eq!(fdes.bitfield_width(), 3);
        assert_eq!(fdes.byte_offset, 4);
        assert_eq!(fdes.bitfield_offset(), 3);
    }

    #[test]
    fn test_kind_flags_exclusive() {
        let mut fdes = FieldDescriptor::new("Ball", false);
        fdes.mark_stl(true);
        assert!(fdes.is_stl() && fdes.stl_clear());

        fdes.mark_string();
        assert!(fdes.is_string());
        assert!(!fdes.is_stl());
        assert!(!fdes.stl_clear());
    }
}
