//! Overload resolution service interface.
//!
//! The engine does not choose between candidates itself. It builds a
//! [`Call`] and asks an [`OverloadResolver`] to resolve it against either
//! variable-like or function-like candidates, then acts on the
//! [`OverloadResult`].
//!
//! ## Result codes
//!
//! - `Success`: exactly one candidate applies
//! - `NameNotFound`: no candidate with that name exists
//! - `CandidatesWithWrongReceiver`: candidates exist, none for this receiver
//! - `Ambiguity`: several candidates apply equally well
//! - `InapplicableArguments`: candidates exist, the arguments do not fit

use std::fmt;

use tern_core::ResolutionError;

use crate::call::{Call, ResolvedCall};
use crate::context::ResolutionContext;

/// Which candidates a resolution considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateFilter {
    /// Locals, properties and object placeholders.
    Variables,
    /// Functions and constructors.
    Functions,
}

impl fmt::Display for CandidateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateFilter::Variables => f.write_str("variables"),
            CandidateFilter::Functions => f.write_str("functions"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultCode {
    Success,
    NameNotFound,
    CandidatesWithWrongReceiver,
    Ambiguity,
    InapplicableArguments,
}

/// Outcome of one overload resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct OverloadResult {
    code: ResultCode,
    calls: Vec<ResolvedCall>,
}

impl OverloadResult {
    pub fn new(code: ResultCode, calls: Vec<ResolvedCall>) -> Self {
        Self { code, calls }
    }

    pub fn success(call: ResolvedCall) -> Self {
        Self::new(ResultCode::Success, vec![call])
    }

    /// No candidate by that name.
    pub fn nothing() -> Self {
        Self::new(ResultCode::NameNotFound, Vec::new())
    }

    pub fn ambiguity(calls: Vec<ResolvedCall>) -> Self {
        Self::new(ResultCode::Ambiguity, calls)
    }

    pub fn wrong_receiver(calls: Vec<ResolvedCall>) -> Self {
        Self::new(ResultCode::CandidatesWithWrongReceiver, calls)
    }

    pub fn code(&self) -> ResultCode {
        self.code
    }

    /// No candidate exists at all.
    pub fn is_nothing(&self) -> bool {
        self.code == ResultCode::NameNotFound
    }

    pub fn is_success(&self) -> bool {
        self.code == ResultCode::Success
    }

    /// Exactly one resulting call, for the right receiver.
    pub fn is_single_result(&self) -> bool {
        self.calls.len() == 1 && self.code != ResultCode::CandidatesWithWrongReceiver
    }

    pub fn has_wrong_receiver(&self) -> bool {
        self.code == ResultCode::CandidatesWithWrongReceiver
    }

    /// The resulting call, when there is exactly one.
    pub fn resulting_call(&self) -> Option<&ResolvedCall> {
        match self.calls.as_slice() {
            [call] if self.is_single_result() => Some(call),
            _ => None,
        }
    }

    pub fn calls(&self) -> &[ResolvedCall] {
        &self.calls
    }
}

/// Resolves calls against the candidates in scope.
///
/// Implementations may type the call's arguments through `ctx`; everything
/// they record lands in the caller's trial trace.
pub trait OverloadResolver {
    fn resolve(
        &self,
        call: &Call<'_>,
        filter: CandidateFilter,
        ctx: &mut ResolutionContext<'_>,
    ) -> Result<OverloadResult, ResolutionError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tern_core::{DescriptorId, NodeId};

    fn call(n: u32) -> ResolvedCall {
        ResolvedCall::new(NodeId::new(0), DescriptorId::new(n), None)
    }

    #[test]
    fn nothing_is_not_single() {
        let result = OverloadResult::nothing();
        assert!(result.is_nothing());
        assert!(!result.is_single_result());
        assert!(result.resulting_call().is_none());
    }

    #[test]
    fn wrong_receiver_is_not_single() {
        let result = OverloadResult::wrong_receiver(vec![call(1)]);
        assert!(!result.is_nothing());
        assert!(!result.is_single_result());
        assert!(result.has_wrong_receiver());
    }

    #[test]
    fn success_yields_call() {
        let result = OverloadResult::success(call(4));
        assert_eq!(result.resulting_call().map(|c| c.candidate), Some(DescriptorId::new(4)));
    }

    #[test]
    fn ambiguity_has_no_resulting_call() {
        let result = OverloadResult::ambiguity(vec![call(1), call(2)]);
        assert!(!result.is_nothing());
        assert!(result.resulting_call().is_none());
        assert_eq!(result.calls().len(), 2);
    }
}
