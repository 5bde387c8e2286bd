//! Binding traces.
//!
//! Resolution writes everything it learns about an expression node into a
//! [`BindingTrace`]: its [`TypeInfo`], the descriptor a reference binds to,
//! resolved calls, qualifiers, constants and diagnostics.
//!
//! A [`TemporaryTrace`] is a copy-on-write overlay over a parent trace. Reads
//! fall through to the parent; writes stay in the overlay's ordered log until
//! [`TemporaryTrace::into_delta`] hands them back as a [`TraceDelta`] the
//! parent can [`commit`](BindingTrace::commit). A dropped overlay leaves the
//! parent untouched.

use rustc_hash::{FxHashMap, FxHashSet};
use tern_core::{
    CompileTimeConstant, DataFlowInfo, DataType, DescriptorId, Diagnostic, NodeId, Qualifier,
    TypeInfo,
};
use tracing::trace;

use crate::call::ResolvedCall;

/// One fact written into a trace.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceRecord {
    /// Full typing result of an expression.
    TypeInfo { node: NodeId, info: TypeInfo },
    /// Type of an expression, without flow facts.
    Type { node: NodeId, ty: DataType },
    /// Declaration a reference expression binds to.
    ReferenceTarget { node: NodeId, descriptor: DescriptorId },
    ResolvedCall { node: NodeId, call: ResolvedCall },
    /// The node denotes a package or class rather than a value.
    Qualifier { node: NodeId, qualifier: Qualifier },
    /// The qualified expression has had its result recorded.
    Processed { node: NodeId },
    ConstantValue { node: NodeId, constant: CompileTimeConstant },
    /// Flow facts valid at the node.
    DataFlowInfo { node: NodeId, flow: DataFlowInfo },
    Diagnostic(Diagnostic),
}

/// Destination for resolution results.
pub trait BindingTrace {
    /// Write one record.
    fn record(&mut self, record: TraceRecord);

    fn type_info(&self, node: NodeId) -> Option<&TypeInfo>;
    fn expression_type(&self, node: NodeId) -> Option<&DataType>;
    fn reference_target(&self, node: NodeId) -> Option<DescriptorId>;
    fn resolved_call(&self, node: NodeId) -> Option<&ResolvedCall>;
    fn qualifier(&self, node: NodeId) -> Option<Qualifier>;
    fn is_processed(&self, node: NodeId) -> bool;
    fn constant(&self, node: NodeId) -> Option<&CompileTimeConstant>;
    fn data_flow(&self, node: NodeId) -> Option<&DataFlowInfo>;

    /// Report a diagnostic. Never fails.
    fn report(&mut self, diagnostic: Diagnostic) {
        self.record(TraceRecord::Diagnostic(diagnostic));
    }

    /// Replay the records of a finished trial, in order.
    fn commit(&mut self, delta: TraceDelta) {
        for record in delta.records {
            self.record(record);
        }
    }
}

// ============================================================================
// Bindings
// ============================================================================

/// Indexed view of a sequence of records.
#[derive(Debug, Default, Clone)]
struct Bindings {
    type_infos: FxHashMap<NodeId, TypeInfo>,
    types: FxHashMap<NodeId, DataType>,
    targets: FxHashMap<NodeId, DescriptorId>,
    calls: FxHashMap<NodeId, ResolvedCall>,
    qualifiers: FxHashMap<NodeId, Qualifier>,
    processed: FxHashSet<NodeId>,
    constants: FxHashMap<NodeId, CompileTimeConstant>,
    flows: FxHashMap<NodeId, DataFlowInfo>,
    diagnostics: Vec<Diagnostic>,
}

impl Bindings {
    fn apply(&mut self, record: TraceRecord) {
        match record {
            TraceRecord::TypeInfo { node, info } => {
                self.type_infos.insert(node, info);
            }
            TraceRecord::Type { node, ty } => {
                self.types.insert(node, ty);
            }
            TraceRecord::ReferenceTarget { node, descriptor } => {
                self.targets.insert(node, descriptor);
            }
            TraceRecord::ResolvedCall { node, call } => {
                self.calls.insert(node, call);
            }
            TraceRecord::Qualifier { node, qualifier } => {
                self.qualifiers.insert(node, qualifier);
            }
            TraceRecord::Processed { node } => {
                self.processed.insert(node);
            }
            TraceRecord::ConstantValue { node, constant } => {
                self.constants.insert(node, constant);
            }
            TraceRecord::DataFlowInfo { node, flow } => {
                self.flows.insert(node, flow);
            }
            TraceRecord::Diagnostic(diagnostic) => self.diagnostics.push(diagnostic),
        }
    }
}

// ============================================================================
// Trace
// ============================================================================

/// The session's root trace.
#[derive(Debug, Default, Clone)]
pub struct Trace {
    bindings: Bindings,
    records: usize,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    /// All diagnostics, in report order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.bindings.diagnostics
    }

    /// Diagnostics reported on `node`.
    pub fn diagnostics_for(&self, node: NodeId) -> impl Iterator<Item = &Diagnostic> {
        self.bindings
            .diagnostics
            .iter()
            .filter(move |d| d.node == node)
    }

    pub fn has_errors(&self) -> bool {
        self.bindings.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Number of records written so far.
    pub fn record_count(&self) -> usize {
        self.records
    }
}

impl BindingTrace for Trace {
    fn record(&mut self, record: TraceRecord) {
        self.records += 1;
        self.bindings.apply(record);
    }

    fn type_info(&self, node: NodeId) -> Option<&TypeInfo> {
        self.bindings.type_infos.get(&node)
    }

    fn expression_type(&self, node: NodeId) -> Option<&DataType> {
        self.bindings.types.get(&node)
    }

    fn reference_target(&self, node: NodeId) -> Option<DescriptorId> {
        self.bindings.targets.get(&node).copied()
    }

    fn resolved_call(&self, node: NodeId) -> Option<&ResolvedCall> {
        self.bindings.calls.get(&node)
    }

    fn qualifier(&self, node: NodeId) -> Option<Qualifier> {
        self.bindings.qualifiers.get(&node).copied()
    }

    fn is_processed(&self, node: NodeId) -> bool {
        self.bindings.processed.contains(&node)
    }

    fn constant(&self, node: NodeId) -> Option<&CompileTimeConstant> {
        self.bindings.constants.get(&node)
    }

    fn data_flow(&self, node: NodeId) -> Option<&DataFlowInfo> {
        self.bindings.flows.get(&node)
    }
}

// ============================================================================
// Temporary traces
// ============================================================================

/// Records written by a trial, ready to be committed into its parent.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TraceDelta {
    records: Vec<TraceRecord>,
}

impl TraceDelta {
    pub fn records(&self) -> &[TraceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A discardable overlay over a parent trace.
pub struct TemporaryTrace<'p> {
    parent: &'p mut dyn BindingTrace,
    label: &'static str,
    bindings: Bindings,
    log: Vec<TraceRecord>,
}

impl<'p> TemporaryTrace<'p> {
    /// Create an overlay; `label` names the trial in logs.
    pub fn new(parent: &'p mut dyn BindingTrace, label: &'static str) -> Self {
        Self {
            parent,
            label,
            bindings: Bindings::default(),
            log: Vec::new(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Records written so far, in order.
    pub fn records(&self) -> &[TraceRecord] {
        &self.log
    }

    /// Give up the parent and keep only the writes.
    pub fn into_delta(self) -> TraceDelta {
        trace!(trial = self.label, records = self.log.len(), "trial finished");
        TraceDelta { records: self.log }
    }
}

impl BindingTrace for TemporaryTrace<'_> {
    fn record(&mut self, record: TraceRecord) {
        self.bindings.apply(record.clone());
        self.log.push(record);
    }

    fn type_info(&self, node: NodeId) -> Option<&TypeInfo> {
        self.bindings
            .type_infos
            .get(&node)
            .or_else(|| self.parent.type_info(node))
    }

    fn expression_type(&self, node: NodeId) -> Option<&DataType> {
        self.bindings
            .types
            .get(&node)
            .or_else(|| self.parent.expression_type(node))
    }

    fn reference_target(&self, node: NodeId) -> Option<DescriptorId> {
        self.bindings
            .targets
            .get(&node)
            .copied()
            .or_else(|| self.parent.reference_target(node))
    }

    fn resolved_call(&self, node: NodeId) -> Option<&ResolvedCall> {
        self.bindings
            .calls
            .get(&node)
            .or_else(|| self.parent.resolved_call(node))
    }

    fn qualifier(&self, node: NodeId) -> Option<Qualifier> {
        self.bindings
            .qualifiers
            .get(&node)
            .copied()
            .or_else(|| self.parent.qualifier(node))
    }

    fn is_processed(&self, node: NodeId) -> bool {
        self.bindings.processed.contains(&node) || self.parent.is_processed(node)
    }

    fn constant(&self, node: NodeId) -> Option<&CompileTimeConstant> {
        self.bindings
            .constants
            .get(&node)
            .or_else(|| self.parent.constant(node))
    }

    fn data_flow(&self, node: NodeId) -> Option<&DataFlowInfo> {
        self.bindings
            .flows
            .get(&node)
            .or_else(|| self.parent.data_flow(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tern_core::{DiagnosticKind, Span};

    fn node(n: u32) -> NodeId {
        NodeId::new(n)
    }

    #[test]
    fn overlay_reads_through_to_parent() {
        let mut root = Trace::new();
        root.record(TraceRecord::ReferenceTarget {
            node: node(1),
            descriptor: DescriptorId::new(7),
        });

        let overlay = TemporaryTrace::new(&mut root, "read");
        assert_eq!(overlay.reference_target(node(1)), Some(DescriptorId::new(7)));
        assert_eq!(overlay.reference_target(node(2)), None);
    }

    #[test]
    fn dropped_overlay_leaves_parent_untouched() {
        let mut root = Trace::new();
        {
            let mut overlay = TemporaryTrace::new(&mut root, "discard");
            overlay.record(TraceRecord::Processed { node: node(3) });
            overlay.report(Diagnostic::new(DiagnosticKind::IllegalSelector, node(3), Span::default()));
            assert!(overlay.is_processed(node(3)));
        }
        assert!(!root.is_processed(node(3)));
        assert!(root.diagnostics().is_empty());
        assert_eq!(root.record_count(), 0);
    }

    #[test]
    fn commit_replays_in_order() {
        let mut root = Trace::new();
        let mut overlay = TemporaryTrace::new(&mut root, "commit");
        overlay.record(TraceRecord::Type {
            node: node(4),
            ty: DataType::unit(),
        });
        overlay.record(TraceRecord::Type {
            node: node(4),
            ty: DataType::any(),
        });
        let delta = overlay.into_delta();
        assert_eq!(delta.len(), 2);

        root.commit(delta);
        // later write wins, as it did inside the trial
        assert_eq!(root.expression_type(node(4)), Some(&DataType::any()));
        assert_eq!(root.record_count(), 2);
    }

    #[test]
    fn nested_overlays_commit_outward() {
        let mut root = Trace::new();
        let mut outer = TemporaryTrace::new(&mut root, "outer");
        let inner_delta = {
            let mut inner = TemporaryTrace::new(&mut outer, "inner");
            inner.record(TraceRecord::Qualifier {
                node: node(5),
                qualifier: Qualifier::Package(DescriptorId::new(0)),
            });
            inner.into_delta()
        };
        assert_eq!(outer.qualifier(node(5)), None);
        outer.commit(inner_delta);
        assert!(outer.qualifier(node(5)).is_some());
        let outer_delta = outer.into_delta();
        root.commit(outer_delta);
        assert_eq!(root.qualifier(node(5)), Some(Qualifier::Package(DescriptorId::new(0))));
    }

    #[test]
    fn diagnostics_for_node() {
        let mut root = Trace::new();
        root.report(Diagnostic::new(DiagnosticKind::IllegalSelector, node(1), Span::default()));
        root.report(Diagnostic::new(DiagnosticKind::UnexpectedSafeCall, node(2), Span::default()));
        assert_eq!(root.diagnostics_for(node(2)).count(), 1);
        assert!(root.has_errors());
    }
}
