//! ResolutionContext - the state threaded through every resolution step.

use tern_core::{DataFlowInfo, DataType};

use crate::trace::{BindingTrace, TemporaryTrace, TraceDelta};

/// Whether the caller checks the result type itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContextDependency {
    /// The result is final; check it against the expected type here.
    #[default]
    Independent,
    /// The caller completes inference and checks later.
    Dependent,
}

/// Context for resolving one expression.
///
/// Carries the trace results are written to, plus the expected type and the
/// flow facts in effect.
pub struct ResolutionContext<'t> {
    pub trace: &'t mut dyn BindingTrace,
    /// `None` when nothing is expected.
    pub expected_type: Option<DataType>,
    pub dependency: ContextDependency,
    pub data_flow: DataFlowInfo,
    /// Inside an argument of an annotation literal.
    pub in_annotation_argument: bool,
    /// The expression being resolved is the receiver of a following `.`.
    pub lhs_of_dot: bool,
}

impl<'t> ResolutionContext<'t> {
    pub fn new(trace: &'t mut dyn BindingTrace) -> Self {
        Self {
            trace,
            expected_type: None,
            dependency: ContextDependency::Independent,
            data_flow: DataFlowInfo::empty(),
            in_annotation_argument: false,
            lhs_of_dot: false,
        }
    }

    /// A context over the same trace, with the same settings.
    pub fn reborrow(&mut self) -> ResolutionContext<'_> {
        ResolutionContext {
            trace: &mut *self.trace,
            expected_type: self.expected_type.clone(),
            dependency: self.dependency,
            data_flow: self.data_flow.clone(),
            in_annotation_argument: self.in_annotation_argument,
            lhs_of_dot: self.lhs_of_dot,
        }
    }

    /// Run `f` against a trial trace layered over this context's trace.
    ///
    /// Returns what `f` produced and the trial's records; committing them is
    /// up to the caller.
    pub fn trial<R>(
        &mut self,
        label: &'static str,
        f: impl FnOnce(&mut ResolutionContext<'_>) -> R,
    ) -> (R, TraceDelta) {
        let mut overlay = TemporaryTrace::new(&mut *self.trace, label);
        let result = {
            let mut ctx = ResolutionContext {
                trace: &mut overlay,
                expected_type: self.expected_type.clone(),
                dependency: self.dependency,
                data_flow: self.data_flow.clone(),
                in_annotation_argument: self.in_annotation_argument,
                lhs_of_dot: self.lhs_of_dot,
            };
            f(&mut ctx)
        };
        (result, overlay.into_delta())
    }

    /// Merge a trial's records into this context's trace.
    pub fn commit(&mut self, delta: TraceDelta) {
        self.trace.commit(delta);
    }

    pub fn with_expected_type(mut self, expected_type: Option<DataType>) -> Self {
        self.expected_type = expected_type;
        self
    }

    pub fn with_dependency(mut self, dependency: ContextDependency) -> Self {
        self.dependency = dependency;
        self
    }

    pub fn with_data_flow(mut self, data_flow: DataFlowInfo) -> Self {
        self.data_flow = data_flow;
        self
    }

    pub fn with_annotation_argument(mut self, in_annotation_argument: bool) -> Self {
        self.in_annotation_argument = in_annotation_argument;
        self
    }

    pub fn with_lhs_of_dot(mut self, lhs_of_dot: bool) -> Self {
        self.lhs_of_dot = lhs_of_dot;
        self
    }

    pub fn is_independent(&self) -> bool {
        self.dependency == ContextDependency::Independent
    }
}
