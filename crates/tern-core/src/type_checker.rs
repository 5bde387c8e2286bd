//! The type-checker collaborator.
//!
//! Resolution needs two answers from the type checker: whether one type
//! conforms to another, and the intersection of several bounds.

use crate::DataType;

/// Subtyping and intersection, supplied by the type checker.
pub trait TypeChecker {
    /// Whether a value of type `sub` may be used where `sup` is expected.
    fn is_subtype_of(&self, sub: &DataType, sup: &DataType) -> bool;

    /// A type that is a subtype of every member of `types`.
    ///
    /// Callers pass at least two types.
    fn intersect(&self, types: &[DataType]) -> DataType;
}

/// A checker that only knows the structural rules: error types conform
/// both ways, everything conforms to `Any?`, nullability is respected,
/// and an intersection conforms to each of its members.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuralTypeChecker;

impl TypeChecker for StructuralTypeChecker {
    fn is_subtype_of(&self, sub: &DataType, sup: &DataType) -> bool {
        use crate::TypeKind;

        if sub.is_error() || sup.is_error() {
            return true;
        }
        if sub.nullable && !sup.nullable {
            return false;
        }
        if sup.is_any() {
            return true;
        }
        match &sub.kind {
            TypeKind::Intersection(members) => members
                .iter()
                .any(|m| self.is_subtype_of(&m.clone().with_nullability(sub.nullable), sup)),
            kind => *kind == sup.kind,
        }
    }

    fn intersect(&self, types: &[DataType]) -> DataType {
        DataType::intersection(types.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BuiltinType, DescriptorId};

    #[test]
    fn everything_conforms_to_nullable_any() {
        let checker = StructuralTypeChecker;
        let x = DataType::class(DescriptorId::new(0)).make_nullable();
        assert!(checker.is_subtype_of(&x, &DataType::nullable_any()));
        assert!(!checker.is_subtype_of(&x, &DataType::any()));
    }

    #[test]
    fn intersection_conforms_to_members() {
        let checker = StructuralTypeChecker;
        let x = DataType::class(DescriptorId::new(0));
        let y = DataType::class(DescriptorId::new(1));
        let both = checker.intersect(&[x.clone(), y.clone()]);
        assert!(checker.is_subtype_of(&both, &x));
        assert!(checker.is_subtype_of(&both, &y));
        assert!(!checker.is_subtype_of(&x, &y));
    }

    #[test]
    fn error_type_conforms() {
        let checker = StructuralTypeChecker;
        let int = DataType::builtin(BuiltinType::Int);
        assert!(checker.is_subtype_of(&DataType::error(), &int));
        assert!(checker.is_subtype_of(&int, &DataType::error()));
    }
}
