//! Shared fixtures for the integration tests.
//!
//! [`Fixture`] owns a descriptor table plus name tables per scope and acts
//! as every collaborator the resolution engine consumes: overload
//! resolution, qualifier lookup, expression typing and constant evaluation.
//! [`RecordingCodegen`] stands in for the argument code generator.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use rustc_hash::FxHashMap;
use tern::compiler::{
    BindingTrace, Call, CallExpressionResolver, CandidateFilter, ConstantEvaluator, ExpressionCodegen,
    ExpressionTyper, OverloadResolver, OverloadResult, QualifierResolver, ResolutionContext, ResolvedCall,
    ResolvedValueArgument, ResolverOptions, TraceRecord,
};
use tern::core::{
    BuiltinType, ClassDescriptor, ClassKind, CodegenError, CompileTimeConstant, ConstructorDescriptor,
    DataFlowInfo, DataType, Descriptor, DescriptorId, DescriptorTable, Diagnostic, FlowValue,
    FunctionDescriptor, Modality, NodeId, Nullability, PackageDescriptor, QualifiedName, Qualifier, Receiver,
    ResolutionError, StructuralTypeChecker, TypeInfo, ValueParameter, VariableDescriptor,
};
use tern::syntax::{Expr, IdentExpr, LiteralKind};

/// Where a name is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Visible without a receiver.
    Top,
    /// Member of values of this class.
    Instance(DescriptorId),
    /// Inside this package or class, reached through a qualifier.
    Static(DescriptorId),
}

impl Scope {
    fn of(receiver: &Receiver) -> Option<Scope> {
        match receiver {
            Receiver::None => Some(Scope::Top),
            Receiver::Expression { ty, .. } => ty.class_descriptor().map(Scope::Instance),
            Receiver::Qualifier { qualifier, .. } => Some(Scope::Static(qualifier.descriptor())),
        }
    }
}

type Names<T> = FxHashMap<(Scope, String), T>;

pub struct Fixture {
    pub table: DescriptorTable,
    pub checker: StructuralTypeChecker,
    pub constants: FxHashMap<NodeId, CompileTimeConstant>,
    variables: Names<Vec<DescriptorId>>,
    functions: Names<Vec<DescriptorId>>,
    qualifiers: Names<Qualifier>,
    /// `resolve_as_standalone` / `resolve_as_receiver` calls, in order.
    pub hooks: RefCell<Vec<String>>,
    pub overload_calls: Cell<usize>,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            table: DescriptorTable::new(),
            checker: StructuralTypeChecker,
            constants: FxHashMap::default(),
            variables: FxHashMap::default(),
            functions: FxHashMap::default(),
            qualifiers: FxHashMap::default(),
            hooks: RefCell::new(Vec::new()),
            overload_calls: Cell::new(0),
        }
    }

    pub fn resolver(&self) -> CallExpressionResolver<'_> {
        CallExpressionResolver::new(&self.table, self, self, &self.checker, self).with_constant_evaluator(self)
    }

    pub fn resolver_with(&self, options: ResolverOptions) -> CallExpressionResolver<'_> {
        self.resolver().with_options(options)
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    pub fn class(&mut self, name: &str, kind: ClassKind, modality: Modality) -> DescriptorId {
        let class = ClassDescriptor::skeleton(QualifiedName::from_dotted(name), kind, modality);
        self.table.alloc(Descriptor::Class(class))
    }

    pub fn package(&mut self, name: &str) -> DescriptorId {
        let package = PackageDescriptor::package(QualifiedName::from_dotted(name));
        self.table.alloc(Descriptor::Package(package))
    }

    pub fn variable(&mut self, scope: Scope, name: &str, ty: DataType) -> DescriptorId {
        let owner = match scope {
            Scope::Top => None,
            Scope::Instance(id) | Scope::Static(id) => Some(id),
        };
        let id = self
            .table
            .alloc(Descriptor::Variable(VariableDescriptor::property(name, ty, owner)));
        self.variables.entry((scope, name.to_string())).or_default().push(id);
        id
    }

    /// An object usable as a value under its own name.
    pub fn object_value(&mut self, scope: Scope, name: &str, object: DescriptorId) -> DescriptorId {
        let id = self
            .table
            .alloc(Descriptor::Variable(VariableDescriptor::object_qualifier(name, object)));
        self.variables.entry((scope, name.to_string())).or_default().push(id);
        id
    }

    pub fn function(&mut self, scope: Scope, name: &str, params: Vec<ValueParameter>, ret: DataType) -> DescriptorId {
        let id = self
            .table
            .alloc(Descriptor::Function(FunctionDescriptor::new(name, params, ret)));
        self.functions.entry((scope, name.to_string())).or_default().push(id);
        id
    }

    /// A constructor of `class` callable as `name(...)`.
    pub fn constructor(&mut self, scope: Scope, name: &str, class: DescriptorId) -> DescriptorId {
        let id = self
            .table
            .alloc(Descriptor::Constructor(ConstructorDescriptor::new(class, Vec::new())));
        if let Some(owner) = self.table.class_mut(class) {
            owner.constructors.push(id);
        }
        self.functions.entry((scope, name.to_string())).or_default().push(id);
        id
    }

    pub fn qualifier(&mut self, scope: Scope, name: &str, qualifier: Qualifier) {
        self.qualifiers.insert((scope, name.to_string()), qualifier);
    }

    // ========================================================================
    // Argument typing
    // ========================================================================

    /// Type an argument or other leaf expression.
    ///
    /// An opaque expression labelled `jump:...` may jump out; its jump flow
    /// marks its own node as non-null so tests can tell flows apart.
    pub fn type_leaf(&self, expr: Expr<'_>, flow: &DataFlowInfo) -> TypeInfo {
        match expr {
            Expr::Literal(literal) => {
                let ty = match literal.kind {
                    LiteralKind::Int(_) => DataType::builtin(BuiltinType::Int),
                    LiteralKind::Double(_) => DataType::builtin(BuiltinType::Double),
                    LiteralKind::Bool(_) => DataType::builtin(BuiltinType::Boolean),
                    LiteralKind::Char(_) => DataType::builtin(BuiltinType::Char),
                    LiteralKind::String(_) => DataType::builtin(BuiltinType::String),
                    LiteralKind::Null => DataType::builtin(BuiltinType::Nothing).make_nullable(),
                };
                TypeInfo::new(Some(ty), flow.clone())
            }
            Expr::Opaque(opaque) if opaque.label.starts_with("jump") => TypeInfo::with_jump(
                Some(DataType::builtin(BuiltinType::Nothing)),
                flow.clone(),
                jump_flow(expr.id()),
            ),
            _ => TypeInfo::new(Some(DataType::any()), flow.clone()),
        }
    }

    fn map_arguments(&self, call: &Call<'_>, params: &[ValueParameter]) -> Vec<ResolvedValueArgument> {
        let args = call.value_arguments();
        params
            .iter()
            .enumerate()
            .map(|(i, param)| {
                if param.is_varargs() {
                    ResolvedValueArgument::Varargs(args.iter().skip(i).map(|a| a.value.map(|v| v.id())).collect())
                } else if let Some(arg) = args.get(i) {
                    ResolvedValueArgument::Expression(arg.value.map(|v| v.id()))
                } else {
                    ResolvedValueArgument::Default
                }
            })
            .collect()
    }
}

/// The jump flow the fixture gives an opaque `jump:...` expression.
pub fn jump_flow(node: NodeId) -> DataFlowInfo {
    DataFlowInfo::empty().with(FlowValue::Expression(node), Nullability::NotNull)
}

impl OverloadResolver for Fixture {
    fn resolve(
        &self,
        call: &Call<'_>,
        filter: CandidateFilter,
        ctx: &mut ResolutionContext<'_>,
    ) -> Result<OverloadResult, ResolutionError> {
        self.overload_calls.set(self.overload_calls.get() + 1);
        let mut jump = None;
        for argument in call.argument_expressions() {
            let info = self.type_leaf(*argument, &ctx.data_flow);
            if jump.is_none() && info.jump_out_possible {
                jump = Some(info.jump_flow.clone());
            }
            ctx.trace.record(TraceRecord::TypeInfo {
                node: argument.id(),
                info,
            });
        }

        let (Some(name), Some(scope)) = (call.callee_name(), Scope::of(&call.receiver)) else {
            return Ok(OverloadResult::nothing());
        };
        let names = match filter {
            CandidateFilter::Variables => &self.variables,
            CandidateFilter::Functions => &self.functions,
        };
        let candidates = names.get(&(scope, name.to_string())).cloned().unwrap_or_default();

        let mut calls = Vec::with_capacity(candidates.len());
        for id in &candidates {
            let descriptor = self
                .table
                .get(*id)
                .ok_or(ResolutionError::UnknownDescriptor { id: *id })?;
            let arguments = self.map_arguments(call, descriptor.value_parameters());
            let mut resolved = ResolvedCall::new(call.node, *id, descriptor.return_type())
                .with_receiver(call.receiver.clone())
                .with_arguments(arguments)
                .with_data_flow(ctx.data_flow.clone(), ctx.data_flow.clone());
            if let Some(jump) = &jump {
                resolved = resolved.with_jump_flow(jump.clone());
            }
            calls.push(resolved);
        }

        Ok(match calls.len() {
            0 => OverloadResult::nothing(),
            1 => OverloadResult::success(calls.remove(0)),
            _ => OverloadResult::ambiguity(calls),
        })
    }
}

impl QualifierResolver for Fixture {
    fn resolve_name_as_qualifier(
        &self,
        name: &IdentExpr<'_>,
        receiver: &Receiver,
        _ctx: &mut ResolutionContext<'_>,
    ) -> Result<Option<Qualifier>, ResolutionError> {
        Ok(Scope::of(receiver).and_then(|scope| self.qualifiers.get(&(scope, name.name().to_string())).copied()))
    }

    fn resolve_as_standalone(
        &self,
        qualifier: Qualifier,
        node: NodeId,
        _ctx: &mut ResolutionContext<'_>,
    ) -> Result<(), ResolutionError> {
        self.hooks.borrow_mut().push(format!("standalone {qualifier} at {node}"));
        Ok(())
    }

    fn resolve_as_receiver(
        &self,
        qualifier: Qualifier,
        node: NodeId,
        selector_target: Option<DescriptorId>,
        _ctx: &mut ResolutionContext<'_>,
    ) -> Result<(), ResolutionError> {
        let target = selector_target.map_or_else(|| "nothing".to_string(), |t| t.to_string());
        self.hooks
            .borrow_mut()
            .push(format!("receiver {qualifier} at {node} -> {target}"));
        Ok(())
    }
}

impl ExpressionTyper for Fixture {
    fn type_of(&self, expr: Expr<'_>, ctx: &mut ResolutionContext<'_>) -> Result<TypeInfo, ResolutionError> {
        let info = self.type_leaf(expr, &ctx.data_flow);
        ctx.trace.record(TraceRecord::TypeInfo {
            node: expr.id(),
            info: info.clone(),
        });
        Ok(info)
    }
}

impl ConstantEvaluator for Fixture {
    fn evaluate(
        &self,
        expr: Expr<'_>,
        _trace: &dyn BindingTrace,
        _expected_type: Option<&DataType>,
    ) -> Option<CompileTimeConstant> {
        self.constants.get(&expr.id()).cloned()
    }
}

/// Names of the diagnostics in a trace, in report order.
pub fn diagnostic_names(diagnostics: &[Diagnostic]) -> Vec<&'static str> {
    diagnostics.iter().map(|d| d.kind.name()).collect()
}

// ============================================================================
// Codegen
// ============================================================================

/// Records what argument generation asked the backend to do.
#[derive(Debug, Default)]
pub struct RecordingCodegen {
    pub events: Vec<String>,
    pub mark_line_numbers: bool,
    /// Line-marking state seen by each `gen` call.
    pub marks_seen: Vec<bool>,
    /// `gen` on this node fails.
    pub fail_on: Option<NodeId>,
}

impl RecordingCodegen {
    pub fn marking() -> Self {
        Self {
            mark_line_numbers: true,
            ..Self::default()
        }
    }
}

impl ExpressionCodegen for RecordingCodegen {
    fn gen_expression(&mut self, node: NodeId, _ty: &DataType) -> Result<(), CodegenError> {
        self.marks_seen.push(self.mark_line_numbers);
        if self.fail_on == Some(node) {
            return Err(CodegenError::Backend {
                message: format!("cannot generate {node}"),
            });
        }
        self.events.push(format!("gen {node}"));
        Ok(())
    }

    fn pack_varargs(&mut self, _element_type: &DataType, count: usize) -> Result<(), CodegenError> {
        self.events.push(format!("pack {count}"));
        Ok(())
    }

    fn should_mark_line_numbers(&self) -> bool {
        self.mark_line_numbers
    }

    fn set_should_mark_line_numbers(&mut self, mark: bool) {
        self.mark_line_numbers = mark;
    }
}
