//! Input tree handed to the classifier by the parsing front end.
//!
//! The front end lowers each member declaration into a [`MemberDecl`] whose
//! type is a closed [`TypeNode`] tree. Keeping the node kinds a closed enum
//! lets every dispatch site match exhaustively instead of falling through a
//! silent default.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Builtin sub-kinds the front end can report.
///
/// `Other` carries the printed spelling of anything outside the mapped set
/// (e.g. `__int128`); the classifier degrades those to the void category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuiltinKind {
    Bool,
    SChar,
    UChar,
    WChar,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    LongLong,
    ULongLong,
    Float,
    Double,
    Other(String),
}

impl BuiltinKind {
    /// Canonical printed spelling for this sub-kind.
    pub fn spelling(&self) -> &str {
        match self {
            BuiltinKind::Bool => "bool",
            BuiltinKind::SChar => "char",
            BuiltinKind::UChar => "unsigned char",
            BuiltinKind::WChar => "wchar_t",
            BuiltinKind::Short => "short",
            BuiltinKind::UShort => "unsigned short",
            BuiltinKind::Int => "int",
            BuiltinKind::UInt => "unsigned int",
            BuiltinKind::Long => "long",
            BuiltinKind::ULong => "unsigned long",
            BuiltinKind::LongLong => "long long",
            BuiltinKind::ULongLong => "unsigned long long",
            BuiltinKind::Float => "float",
            BuiltinKind::Double => "double",
            BuiltinKind::Other(spelling) => spelling,
        }
    }

    /// Whether the sub-kind is an unsigned integer type. `bool` counts as
    /// unsigned, matching how compilers type boolean bitfields.
    pub fn is_unsigned(&self) -> bool {
        matches!(
            self,
            BuiltinKind::Bool
                | BuiltinKind::UChar
                | BuiltinKind::UShort
                | BuiltinKind::UInt
                | BuiltinKind::ULong
                | BuiltinKind::ULongLong
        )
    }
}

/// One node of a member's declared type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeNode {
    Builtin(BuiltinKind),
    /// Reference to another type. Referenced storage cannot be marshalled
    /// externally, but the shape underneath is still recorded.
    Reference(Box<TypeNode>),
    Pointer(Box<TypeNode>),
    /// Fixed-size array; `len` is the literal element count.
    Array { len: u64, element: Box<TypeNode> },
    /// Enumerated type with its printed spelling (keyword token included).
    Enum { spelling: String },
    /// Aggregates, standard containers, strings and template specializations
    /// all surface as records, exactly as canonical types print them.
    Record(RecordNode),
    /// Non-canonical surface type (typedef or substituted parameter).
    /// `resolved` is the fully canonical form.
    Alias {
        spelling: String,
        resolved: Box<TypeNode>,
    },
}

/// A record (struct/class) type node.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordNode {
    /// Fully qualified declaration name, e.g. `std::basic_string`.
    pub qualified_name: String,
    /// Printed spelling of the canonical type, keyword tokens included.
    pub spelling: String,
    /// Stable external name: the declared name, or one derived from an
    /// enclosing alias for otherwise-anonymous records. `None` when the
    /// record is fully anonymous.
    pub linkage_name: Option<String>,
    /// Present when the record is a template specialization; carries the
    /// instantiation's own members for nested traversal.
    pub template: Option<TemplateInfo>,
}

impl RecordNode {
    /// A plain named record whose spelling matches its qualified name.
    pub fn named(qualified_name: impl Into<String>) -> Self {
        let qualified_name = qualified_name.into();
        Self {
            spelling: qualified_name.clone(),
            linkage_name: Some(qualified_name.clone()),
            qualified_name,
            template: None,
        }
    }

    /// An anonymous record with no reachable external name.
    pub fn anonymous(spelling: impl Into<String>) -> Self {
        Self {
            qualified_name: String::new(),
            spelling: spelling.into(),
            linkage_name: None,
            template: None,
        }
    }

    /// Override the printed spelling.
    pub fn with_spelling(mut self, spelling: impl Into<String>) -> Self {
        self.spelling = spelling.into();
        self
    }

    /// Mark the record as a template specialization with its members.
    pub fn with_template(mut self, members: Vec<MemberDecl>) -> Self {
        self.template = Some(TemplateInfo { members });
        self
    }
}

/// Members of a template specialization, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateInfo {
    pub members: Vec<MemberDecl>,
}

/// Access specifier on a member declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessLevel {
    Public,
    Protected,
    Private,
}

/// One member declaration as reported by the front end.
///
/// This is the adapter boundary: source location, access, qualifiers,
/// initializer presence and layout all arrive pre-resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberDecl {
    pub name: String,
    pub ty: TypeNode,
    /// Offset of the member in bits from the start of the containing record.
    pub bit_offset: u64,
    /// Size of the member's type in bytes.
    pub byte_width: u64,
    /// Declared bitfield width; `Some` iff the member is a bitfield.
    pub bit_width: Option<u32>,
    pub access: AccessLevel,
    pub is_static: bool,
    pub is_const: bool,
    pub has_initializer: bool,
    pub file: PathBuf,
    pub line: usize,
}

impl MemberDecl {
    pub fn new(name: impl Into<String>, ty: TypeNode) -> Self {
        Self {
            name: name.into(),
            ty,
            bit_offset: 0,
            byte_width: 0,
            bit_width: None,
            access: AccessLevel::Public,
            is_static: false,
            is_const: false,
            has_initializer: false,
            file: PathBuf::new(),
            line: 0,
        }
    }

    pub fn with_location(mut self, file: impl Into<PathBuf>, line: usize) -> Self {
        self.file = file.into();
        self.line = line;
        self
    }

    pub fn with_layout(mut self, bit_offset: u64, byte_width: u64) -> Self {
        self.bit_offset = bit_offset;
        self.byte_width = byte_width;
        self
    }

    pub fn with_bitfield(mut self, width: u32) -> Self {
        self.bit_width = Some(width);
        self
    }

    pub fn with_access(mut self, access: AccessLevel) -> Self {
        self.access = access;
        self
    }

    pub fn with_storage(mut self, is_static: bool, is_const: bool, has_initializer: bool) -> Self {
        self.is_static = is_static;
        self.is_const = is_const;
        self.has_initializer = has_initializer;
        self
    }
}
