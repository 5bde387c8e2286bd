//! Deterministic hash-based declaration identity.
//!
//! [`DeclHash`] identifies an externally described declaration (class, type
//! parameter, member, constructor) by its name and position rather than by
//! object identity. The descriptor cache keys type parameters and the
//! declaration-to-descriptor map with it, so two lookups of the same source
//! declaration meet in the same slot.
//!
//! # Examples
//!
//! ```
//! use tern_core::{DeclHash, QualifiedName};
//!
//! let list = DeclHash::from_class(&QualifiedName::from_dotted("java.util.List"));
//! let e = DeclHash::from_type_parameter(list, "E");
//! assert_eq!(e, DeclHash::from_type_parameter(list, "E"));
//!
//! let set = DeclHash::from_class(&QualifiedName::from_dotted("java.util.Set"));
//! assert_ne!(e, DeclHash::from_type_parameter(set, "E"));
//! ```

use std::fmt;
use xxhash_rust::xxh64::xxh64;

use crate::QualifiedName;

/// Domain-specific mixing constants.
///
/// Keep class, type-parameter, member and constructor hashes apart even when
/// they share a name.
pub mod hash_constants {
    /// Separator constant for path components
    pub const SEP: u64 = 0x4bc94d6bd06053ad;

    /// Domain marker for class hashes
    pub const CLASS: u64 = 0x2fac10b63a6cc57c;

    /// Domain marker for package hashes
    pub const PACKAGE: u64 = 0x1a095090689d4647;

    /// Domain marker for type-parameter hashes
    pub const TYPE_PARAMETER: u64 = 0x3e9f5d2a8c7b1403;

    /// Domain marker for method hashes
    pub const MEMBER: u64 = 0x7d3c8b4a92e15f6d;

    /// Domain marker for field hashes
    pub const FIELD: u64 = 0x5ea77ffbcdf5f302;

    /// Domain marker for constructor hashes
    pub const CONSTRUCTOR: u64 = 0x9a7f3d5e2b8c4601;

    /// Parameter position mixing constants.
    pub const PARAM_MARKERS: [u64; 8] = [
        0x9e3779b97f4a7c15,
        0xbf58476d1ce4e5b9,
        0x94d049bb133111eb,
        0xd6e8feb86659fd93,
        0xe7037ed1a0b428db,
        0xc6a4a7935bd1e995,
        0x8648dbbc94d49b8d,
        0xa2b48b2c69e0d657,
    ];
}

/// A deterministic 64-bit hash identifying a declaration.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct DeclHash(pub u64);

impl DeclHash {
    /// Empty/invalid hash constant.
    pub const EMPTY: DeclHash = DeclHash(0);

    /// Hash of a class, from its qualified name.
    #[inline]
    pub fn from_class(name: &QualifiedName) -> Self {
        DeclHash(hash_constants::CLASS ^ xxh64(name.to_string().as_bytes(), 0))
    }

    /// Hash of a package, from its qualified name.
    #[inline]
    pub fn from_package(name: &QualifiedName) -> Self {
        DeclHash(hash_constants::PACKAGE ^ xxh64(name.to_string().as_bytes(), 0))
    }

    /// Hash of the type parameter `name` declared by `owner`.
    #[inline]
    pub fn from_type_parameter(owner: DeclHash, name: &str) -> Self {
        let hash = hash_constants::TYPE_PARAMETER ^ xxh64(name.as_bytes(), 0);
        DeclHash(hash.wrapping_mul(hash_constants::SEP).wrapping_add(owner.0))
    }

    /// Hash of a method of `owner`. Parameter order matters.
    #[inline]
    pub fn from_member(owner: DeclHash, name: &str, param_hashes: &[DeclHash]) -> Self {
        let seed = hash_constants::MEMBER ^ owner.0 ^ xxh64(name.as_bytes(), 0);
        DeclHash(mix_params(seed, param_hashes))
    }

    /// Hash of the field `name` of `owner`.
    #[inline]
    pub fn from_field(owner: DeclHash, name: &str) -> Self {
        DeclHash(hash_constants::FIELD ^ owner.0 ^ xxh64(name.as_bytes(), 0))
    }

    /// Hash of a constructor of `owner`, identified by its parameters.
    #[inline]
    pub fn from_constructor(owner: DeclHash, param_hashes: &[DeclHash]) -> Self {
        DeclHash(mix_params(hash_constants::CONSTRUCTOR ^ owner.0, param_hashes))
    }

    /// Hash of a parameter type name, used as input to the member hashes.
    #[inline]
    pub fn from_type_name(name: &str) -> Self {
        DeclHash(xxh64(name.as_bytes(), 0))
    }

    /// Check if this is an empty/invalid hash.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Get the underlying u64 value.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

#[inline]
fn marker(i: usize) -> u64 {
    hash_constants::PARAM_MARKERS
        .get(i)
        .copied()
        .unwrap_or_else(|| hash_constants::PARAM_MARKERS[0].wrapping_add(i as u64))
}

#[inline]
fn mix_params(seed: u64, params: &[DeclHash]) -> u64 {
    params.iter().enumerate().fold(seed, |hash, (i, param)| {
        // wrapping_mul keeps parameter order significant
        hash.wrapping_mul(hash_constants::SEP)
            .wrapping_add(marker(i) ^ param.0)
    })
}

impl fmt::Debug for DeclHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeclHash({:#018x})", self.0)
    }
}

impl fmt::Display for DeclHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(name: &str) -> DeclHash {
        DeclHash::from_class(&QualifiedName::from_dotted(name))
    }

    #[test]
    fn class_hash_is_deterministic() {
        assert_eq!(class("java.util.List"), class("java.util.List"));
        assert_ne!(class("java.util.List"), class("java.util.Set"));
    }

    #[test]
    fn class_and_package_domains_differ() {
        let name = QualifiedName::from_dotted("java.util");
        assert_ne!(DeclHash::from_class(&name), DeclHash::from_package(&name));
    }

    #[test]
    fn constructor_parameter_order_matters() {
        let owner = class("Point");
        let int = DeclHash::from_type_name("int");
        let string = DeclHash::from_type_name("String");
        assert_ne!(
            DeclHash::from_constructor(owner, &[int, string]),
            DeclHash::from_constructor(owner, &[string, int])
        );
        assert_ne!(
            DeclHash::from_constructor(owner, &[]),
            DeclHash::from_member(owner, "", &[])
        );
    }

    #[test]
    fn field_and_method_of_same_name_differ() {
        let owner = class("List");
        assert_ne!(DeclHash::from_field(owner, "size"), DeclHash::from_member(owner, "size", &[]));
    }

    #[test]
    fn many_parameters_do_not_panic() {
        let owner = class("Wide");
        let params: Vec<_> = (0..20)
            .map(|i| DeclHash::from_type_name(&format!("T{i}")))
            .collect();
        assert!(!DeclHash::from_member(owner, "call", &params).is_empty());
    }
}
