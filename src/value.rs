// SPDX-License-Identifier: MIT

use std::{
    fmt,
    hash::{Hash, Hasher},
};

use indexmap::{Equivalent, IndexMap};

use crate::{format_hex, link::OperState};

/// A decoded attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// An attribute that carries no payload worth reading, such as
    /// `IFLA_UNSPEC`.
    None,
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I32(i32),
    String(String),
    /// A link-layer address, rendered as colon separated hex octets.
    LinkAddress(String),
    /// A symbolic name resolved from a small kernel enum, for instance
    /// the hardware type of an interface.
    Name(&'static str),
    State(OperState),
    /// Bytes left undecoded on purpose: either a payload the kernel
    /// defines as opaque, or the part of a structure past what is
    /// understood. Its length always comes from the enclosing record.
    Opaque(Vec<u8>),
    /// A nested attribute stream or a decoded fixed-layout struct.
    Attributes(Attributes),
}

impl Value {
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::U32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::U64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::LinkAddress(s) => Some(s.as_str()),
            Self::Name(s) => Some(*s),
            Self::State(state) => Some(state.name()),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Opaque(bytes) => Some(bytes.as_slice()),
            _ => None,
        }
    }

    pub fn as_attributes(&self) -> Option<&Attributes> {
        match self {
            Self::Attributes(attrs) => Some(attrs),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::U8(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::String(s) | Self::LinkAddress(s) => f.write_str(s),
            Self::Name(s) => f.write_str(s),
            Self::State(state) => f.write_str(state.name()),
            Self::Opaque(bytes) => f.write_str(&format_hex(bytes)),
            Self::Attributes(attrs) => write!(f, "{attrs}"),
        }
    }
}

/// Key of a decoded attribute: its display name when the code is known
/// to the table it was read with, the raw code otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKey {
    Name(&'static str),
    Code(u16),
}

// Hashed by hand so that `NameLookup` can hash a borrowed name the same
// way.
impl Hash for AttributeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Name(name) => NameLookup(name).hash(state),
            Self::Code(code) => {
                state.write_u8(1);
                code.hash(state);
            }
        }
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Code(code) => write!(f, "{code}"),
        }
    }
}

impl From<&'static str> for AttributeKey {
    fn from(name: &'static str) -> Self {
        Self::Name(name)
    }
}

/// Looks up an [`AttributeKey::Name`] from a name of any lifetime.
struct NameLookup<'a>(&'a str);

impl Hash for NameLookup<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(0);
        self.0.hash(state);
    }
}

impl Equivalent<AttributeKey> for NameLookup<'_> {
    fn equivalent(&self, key: &AttributeKey) -> bool {
        matches!(key, AttributeKey::Name(name) if *name == self.0)
    }
}

/// Ordered mapping from attribute key to decoded value.
///
/// Entries keep the order in which they were first inserted. Inserting a
/// key that is already present replaces its value in place, so when a
/// code shows up twice in one stream the last record wins. Two mappings
/// are equal only if their entries are equal in the same order.
#[derive(Debug, Clone, Default)]
pub struct Attributes {
    entries: IndexMap<AttributeKey, Value>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<AttributeKey>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(&NameLookup(name))
    }

    pub fn get_code(&self, code: u16) -> Option<&Value> {
        self.entries.get(&AttributeKey::Code(code))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &AttributeKey> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AttributeKey, &Value)> {
        self.entries.iter()
    }

    /// Append every entry of `other`, with the same overwrite rule as
    /// [`insert`](Self::insert).
    pub fn merge(&mut self, other: Attributes) {
        self.entries.extend(other.entries);
    }
}

impl PartialEq for Attributes {
    fn eq(&self, other: &Self) -> bool {
        self.entries.iter().eq(other.entries.iter())
    }
}

impl Eq for Attributes {}

impl IntoIterator for Attributes {
    type Item = (AttributeKey, Value);
    type IntoIter = indexmap::map::IntoIter<AttributeKey, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        f.write_str("}")
    }
}
