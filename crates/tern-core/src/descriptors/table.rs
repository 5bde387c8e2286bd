use crate::DescriptorId;

use super::{ClassDescriptor, Descriptor};

/// Arena owning every descriptor of one resolution session.
///
/// Descriptors are never removed, so a [`DescriptorId`] stays valid for the
/// session's lifetime and id equality is descriptor identity.
#[derive(Debug, Default)]
pub struct DescriptorTable {
    entries: Vec<Descriptor>,
}

impl DescriptorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a descriptor and return its id.
    pub fn alloc(&mut self, descriptor: Descriptor) -> DescriptorId {
        let id = DescriptorId::new(self.entries.len() as u32);
        self.entries.push(descriptor);
        id
    }

    pub fn get(&self, id: DescriptorId) -> Option<&Descriptor> {
        self.entries.get(id.index() as usize)
    }

    pub fn get_mut(&mut self, id: DescriptorId) -> Option<&mut Descriptor> {
        self.entries.get_mut(id.index() as usize)
    }

    /// The class descriptor at `id`, if it is one.
    pub fn class(&self, id: DescriptorId) -> Option<&ClassDescriptor> {
        self.get(id).and_then(Descriptor::as_class)
    }

    pub fn class_mut(&mut self, id: DescriptorId) -> Option<&mut ClassDescriptor> {
        match self.get_mut(id) {
            Some(Descriptor::Class(c)) => Some(c),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DescriptorId, &Descriptor)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, d)| (DescriptorId::new(i as u32), d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClassKind, DataType, Modality, VariableDescriptor};

    #[test]
    fn alloc_hands_out_dense_ids() {
        let mut table = DescriptorTable::new();
        let a = table.alloc(Descriptor::Variable(VariableDescriptor::local("a", DataType::any())));
        let b = table.alloc(Descriptor::Variable(VariableDescriptor::local("b", DataType::any())));
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(b).map(Descriptor::name), Some("b"));
    }

    #[test]
    fn class_accessors() {
        let mut table = DescriptorTable::new();
        let id = table.alloc(Descriptor::Class(ClassDescriptor::skeleton(
            "Point".into(),
            ClassKind::Class,
            Modality::Final,
        )));
        if let Some(class) = table.class_mut(id) {
            class.supertypes.push(DataType::any());
        }
        assert_eq!(table.class(id).map(|c| c.supertypes.len()), Some(1));

        let var = table.alloc(Descriptor::Variable(VariableDescriptor::local("v", DataType::any())));
        assert!(table.class(var).is_none());
        assert!(table.get(DescriptorId::new(99)).is_none());
    }
}
