use tern_core::{CodegenError, DataType, ValueParameter};
use tracing::{debug, trace};

use super::{
    ArgumentGenerator, DefaultCallArgs, ExpressionCodegen, GeneratedArguments, GeneratedValueArgument, Result,
    StackValue,
};
use crate::call::ResolvedValueArgument;

/// Generates arguments from a resolved call's argument mapping.
///
/// `types` are the parameter types after substitution, parallel to
/// `parameters`.
pub struct CallBasedArgumentGenerator<'a> {
    parameters: &'a [ValueParameter],
    types: &'a [DataType],
    constructor: bool,
}

impl<'a> CallBasedArgumentGenerator<'a> {
    pub fn new(parameters: &'a [ValueParameter], types: &'a [DataType]) -> Result<Self> {
        if parameters.len() != types.len() {
            return Err(CodegenError::ParameterTypeMismatch {
                parameters: parameters.len(),
                types: types.len(),
            });
        }
        Ok(Self {
            parameters,
            types,
            constructor: false,
        })
    }

    /// Generate for a constructor call: line numbers are not marked while
    /// the arguments are generated.
    pub fn for_constructor(mut self) -> Self {
        self.constructor = true;
        self
    }

    fn generate_all(
        &self,
        arguments: &[ResolvedValueArgument],
        codegen: &mut dyn ExpressionCodegen,
    ) -> Result<GeneratedArguments> {
        let mut generated = GeneratedArguments {
            arguments: Vec::with_capacity(arguments.len()),
            defaults: DefaultCallArgs::new(),
        };
        for (index, argument) in arguments.iter().enumerate() {
            let ty = &self.types[index];
            let value = match argument {
                ResolvedValueArgument::Expression(node) => {
                    let node = node.ok_or(CodegenError::MissingArgumentExpression { index })?;
                    codegen.gen_expression(node, ty)?;
                    GeneratedValueArgument::Evaluated { ty: ty.clone() }
                }
                ResolvedValueArgument::Default => {
                    trace!(index, "default recorded");
                    generated.defaults.record(index)?;
                    GeneratedValueArgument::Default
                }
                ResolvedValueArgument::Varargs(nodes) => {
                    let element_type = self.element_type(index)?;
                    trace!(index, count = nodes.len(), "vararg deferred");
                    GeneratedValueArgument::Deferred(StackValue::Varargs {
                        index,
                        element_type,
                        array_type: ty.clone(),
                        arguments: nodes.clone(),
                    })
                }
            };
            generated.arguments.push(value);
        }
        Ok(generated)
    }

    /// The element type of the vararg parameter at `index`.
    fn element_type(&self, index: usize) -> Result<DataType> {
        self.types[index]
            .array_element()
            .or(self.parameters[index].varargs_element.as_ref())
            .cloned()
            .ok_or(CodegenError::UnsupportedArgument { index })
    }
}

impl ArgumentGenerator for CallBasedArgumentGenerator<'_> {
    fn generate(
        &mut self,
        arguments: &[ResolvedValueArgument],
        codegen: &mut dyn ExpressionCodegen,
    ) -> Result<GeneratedArguments> {
        if arguments.len() != self.parameters.len() {
            return Err(CodegenError::ArgumentCountMismatch {
                expected: self.parameters.len(),
                got: arguments.len(),
            });
        }
        if !self.constructor {
            return self.generate_all(arguments, codegen);
        }

        let mark = codegen.should_mark_line_numbers();
        codegen.set_should_mark_line_numbers(false);
        let generated = self.generate_all(arguments, codegen);
        codegen.set_should_mark_line_numbers(mark);
        if let Err(error) = &generated {
            debug!(%error, "constructor argument generation failed");
        }
        generated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tern_core::{BuiltinType, NodeId};

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
        mark: bool,
        marks_seen: Vec<bool>,
    }

    impl ExpressionCodegen for Recorder {
        fn gen_expression(&mut self, node: NodeId, _ty: &DataType) -> Result<()> {
            self.marks_seen.push(self.mark);
            if node == NodeId::new(99) {
                return Err(CodegenError::Backend {
                    message: "boom".to_string(),
                });
            }
            self.events.push(format!("gen {node}"));
            Ok(())
        }

        fn pack_varargs(&mut self, _element_type: &DataType, count: usize) -> Result<()> {
            self.events.push(format!("pack {count}"));
            Ok(())
        }

        fn should_mark_line_numbers(&self) -> bool {
            self.mark
        }

        fn set_should_mark_line_numbers(&mut self, mark: bool) {
            self.mark = mark;
        }
    }

    fn int() -> DataType {
        DataType::builtin(BuiltinType::Int)
    }

    fn params(count: u32) -> Vec<ValueParameter> {
        (0..count).map(|i| ValueParameter::new(format!("p{i}"), i, int())).collect()
    }

    #[test]
    fn length_mismatch_is_fatal() {
        let params = params(2);
        let types = vec![int()];
        assert!(matches!(
            CallBasedArgumentGenerator::new(&params, &types),
            Err(CodegenError::ParameterTypeMismatch { parameters: 2, types: 1 })
        ));
    }

    #[test]
    fn missing_expression_is_fatal() {
        let params = params(1);
        let types = vec![int()];
        let mut generator = CallBasedArgumentGenerator::new(&params, &types).unwrap();
        let mut backend = Recorder::default();
        let result = generator.generate(&[ResolvedValueArgument::Expression(None)], &mut backend);
        assert_eq!(result, Err(CodegenError::MissingArgumentExpression { index: 0 }));
    }

    #[test]
    fn constructor_restores_line_marking_on_error() {
        let params = params(2);
        let types = vec![int(), int()];
        let mut generator = CallBasedArgumentGenerator::new(&params, &types).unwrap().for_constructor();
        let mut backend = Recorder {
            mark: true,
            ..Recorder::default()
        };
        let arguments = [
            ResolvedValueArgument::Expression(Some(NodeId::new(1))),
            ResolvedValueArgument::Expression(Some(NodeId::new(99))),
        ];
        assert!(generator.generate(&arguments, &mut backend).is_err());
        assert_eq!(backend.marks_seen, vec![false, false]);
        assert!(backend.mark);
    }

    #[test]
    fn ordinary_call_keeps_line_marking() {
        let params = params(1);
        let types = vec![int()];
        let mut generator = CallBasedArgumentGenerator::new(&params, &types).unwrap();
        let mut backend = Recorder {
            mark: true,
            ..Recorder::default()
        };
        generator
            .generate(&[ResolvedValueArgument::Expression(Some(NodeId::new(4)))], &mut backend)
            .unwrap();
        assert_eq!(backend.marks_seen, vec![true]);
    }

    #[test]
    fn varargs_are_not_evaluated_until_forced() {
        let params = vec![ValueParameter::varargs("xs", 0, int())];
        let types = vec![DataType::array_of(int())];
        let mut generator = CallBasedArgumentGenerator::new(&params, &types).unwrap();
        let mut backend = Recorder::default();
        let arguments = [ResolvedValueArgument::Varargs(vec![Some(NodeId::new(2)), Some(NodeId::new(3))])];
        let generated = generator.generate(&arguments, &mut backend).unwrap();
        assert!(backend.events.is_empty());

        let (index, value) = generated.deferred().next().unwrap();
        assert_eq!(index, 0);
        assert_eq!(value.ty(), &DataType::array_of(int()));

        generated.put_deferred(&mut backend).unwrap();
        assert_eq!(backend.events, vec!["gen node_2", "gen node_3", "pack 2"]);
    }
}
