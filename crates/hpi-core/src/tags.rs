//! Scalar type tags and the native marshalling table.
//!
//! Every parameter and return value crossing the bridge is one of these
//! scalar tags. The table drives three artifacts that must agree with each
//! other: native declaration syntax, conversion-to-`PyObject` expressions,
//! and the single-character `PyArg_ParseTuple` format codes used when an
//! inbound argument tuple is unpacked.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GenError;

/// Scalar type tag for a bridged parameter or return value.
///
/// The serialized form is the canonical short code used in registry
/// manifests: `i`, `iu`, `h`, `hu`, `b`, `bu`, `l`, `lu`, `s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    /// Signed 32-bit integer (`int`).
    #[serde(rename = "i")]
    Int,
    /// Unsigned 32-bit integer (`unsigned int`).
    #[serde(rename = "iu")]
    UInt,
    /// Signed short (`short`).
    #[serde(rename = "h")]
    Short,
    /// Unsigned short (`unsigned short`).
    #[serde(rename = "hu")]
    UShort,
    /// Signed byte (`char`).
    #[serde(rename = "b")]
    Byte,
    /// Unsigned byte (`unsigned char`).
    #[serde(rename = "bu")]
    UByte,
    /// Signed 64-bit integer (`long long`).
    #[serde(rename = "l")]
    Long,
    /// Unsigned 64-bit integer (`unsigned long long`).
    #[serde(rename = "lu")]
    ULong,
    /// String (`const char *`).
    #[serde(rename = "s")]
    Str,
}

impl TypeTag {
    /// All tags, in canonical order.
    pub const ALL: [TypeTag; 9] = [
        TypeTag::Int,
        TypeTag::UInt,
        TypeTag::Short,
        TypeTag::UShort,
        TypeTag::Byte,
        TypeTag::UByte,
        TypeTag::Long,
        TypeTag::ULong,
        TypeTag::Str,
    ];

    /// Resolve a canonical short code.
    ///
    /// An unknown code is a generation-time fatal error.
    pub fn from_code(code: &str) -> Result<TypeTag, GenError> {
        match code {
            "i" => Ok(TypeTag::Int),
            "iu" => Ok(TypeTag::UInt),
            "h" => Ok(TypeTag::Short),
            "hu" => Ok(TypeTag::UShort),
            "b" => Ok(TypeTag::Byte),
            "bu" => Ok(TypeTag::UByte),
            "l" => Ok(TypeTag::Long),
            "lu" => Ok(TypeTag::ULong),
            "s" => Ok(TypeTag::Str),
            _ => Err(GenError::UnknownTypeTag {
                code: code.to_string(),
            }),
        }
    }

    /// The canonical short code.
    pub const fn code(self) -> &'static str {
        match self {
            TypeTag::Int => "i",
            TypeTag::UInt => "iu",
            TypeTag::Short => "h",
            TypeTag::UShort => "hu",
            TypeTag::Byte => "b",
            TypeTag::UByte => "bu",
            TypeTag::Long => "l",
            TypeTag::ULong => "lu",
            TypeTag::Str => "s",
        }
    }

    /// Native storage type.
    pub const fn c_type(self) -> &'static str {
        match self {
            TypeTag::Int => "int",
            TypeTag::UInt => "unsigned int",
            TypeTag::Short => "short",
            TypeTag::UShort => "unsigned short",
            TypeTag::Byte => "char",
            TypeTag::UByte => "unsigned char",
            TypeTag::Long => "long long",
            TypeTag::ULong => "unsigned long long",
            TypeTag::Str => "const char *",
        }
    }

    /// Native parameter declaration, e.g. `unsigned int count`.
    ///
    /// Pointer types attach directly to the name.
    pub fn c_param(self, name: &str) -> String {
        match self {
            TypeTag::Str => format!("const char *{name}"),
            other => format!("{} {name}", other.c_type()),
        }
    }

    /// Local-variable declaration used when unpacking an argument tuple.
    ///
    /// Strings unpack into a mutable `char *` slot.
    pub fn c_local(self, name: &str) -> String {
        match self {
            TypeTag::Str => format!("char *{name}"),
            other => format!("{} {name}", other.c_type()),
        }
    }

    /// Conversion of a native expression to a `PyObject *`.
    ///
    /// Sub-`long` integers promote through `long`; 64-bit tags use the
    /// `LongLong` constructors.
    pub fn to_py(self, expr: &str) -> String {
        match self {
            TypeTag::Str => format!("PyUnicode_FromString({expr})"),
            TypeTag::Long => format!("PyLong_FromLongLong({expr})"),
            TypeTag::ULong => format!("PyLong_FromUnsignedLongLong({expr})"),
            TypeTag::UInt | TypeTag::UShort | TypeTag::UByte => {
                format!("PyLong_FromUnsignedLong({expr})")
            }
            TypeTag::Int | TypeTag::Short | TypeTag::Byte => {
                format!("PyLong_FromLong({expr})")
            }
        }
    }

    /// Single-character `PyArg_ParseTuple` format code.
    ///
    /// Signedness is not distinguished on the unpacking side; the code is
    /// the first character of the canonical tag code.
    pub const fn parse_code(self) -> char {
        match self {
            TypeTag::Int | TypeTag::UInt => 'i',
            TypeTag::Short | TypeTag::UShort => 'h',
            TypeTag::Byte | TypeTag::UByte => 'b',
            TypeTag::Long | TypeTag::ULong => 'l',
            TypeTag::Str => 's',
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
