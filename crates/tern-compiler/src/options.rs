//! Session-level resolver switches.

/// Options for a [`CallExpressionResolver`](crate::CallExpressionResolver).
///
/// # Example
///
/// ```
/// use tern_compiler::ResolverOptions;
///
/// let options = ResolverOptions::default().with_fold_constants(false);
/// assert!(!options.fold_constants);
/// assert!(options.check_nested_class_access);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolverOptions {
    /// Fold qualified expressions that evaluate to pure constants.
    pub fold_constants: bool,
    /// Report nested classes reached through an instance.
    pub check_nested_class_access: bool,
    /// Warn about `?.` on receivers that cannot be null.
    pub report_unnecessary_safe_call: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            fold_constants: true,
            check_nested_class_access: true,
            report_unnecessary_safe_call: true,
        }
    }
}

impl ResolverOptions {
    pub fn with_fold_constants(mut self, fold_constants: bool) -> Self {
        self.fold_constants = fold_constants;
        self
    }

    pub fn with_check_nested_class_access(mut self, check: bool) -> Self {
        self.check_nested_class_access = check;
        self
    }

    pub fn with_report_unnecessary_safe_call(mut self, report: bool) -> Self {
        self.report_unnecessary_safe_call = report;
        self
    }
}
