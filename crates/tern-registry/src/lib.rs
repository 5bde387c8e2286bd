//! Tern descriptor registry.
//!
//! Builds descriptors for declarations that come from outside the source
//! being compiled (libraries, class files) and memoizes them so each
//! declaration gets exactly one descriptor per session.
//!
//! # Architecture
//!
//! - [`ExternalDeclarationProvider`] supplies raw, unresolved declarations
//! - [`DescriptorCache`] tracks the three-state build protocol per key
//! - [`DescriptorResolver`] transforms raw declarations into descriptors,
//!   tolerating self-referential classes through published skeletons
//! - [`LazyMemberScope`] defers member construction until a name is asked for

mod cache;
mod external;
mod member_scope;
mod resolver;

pub use cache::{DescriptorCache, SlotState};
pub use external::{
    ExternalDeclarationProvider, InMemoryProvider, RawClass, RawField, RawMethod, RawModifiers,
    RawParameter, RawType, RawTypeParameter,
};
pub use member_scope::LazyMemberScope;
pub use resolver::{CacheStats, DescriptorResolver};
