use crate::DataType;

/// Descriptor of a type parameter.
///
/// `bound` is the single type standing for all of `upper_bounds`: `Any?`
/// with none declared, the bound itself with one, their intersection with
/// several.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeParameterDescriptor {
    pub name: String,
    /// Position in the owner's type-parameter list.
    pub index: u32,
    pub upper_bounds: Vec<DataType>,
    pub bound: DataType,
}

impl TypeParameterDescriptor {
    /// A parameter with the default `Any?` bound, before declared bounds
    /// are attached.
    pub fn unbounded(name: impl Into<String>, index: u32) -> Self {
        let bound = DataType::nullable_any();
        Self {
            name: name.into(),
            index,
            upper_bounds: vec![bound.clone()],
            bound,
        }
    }
}
