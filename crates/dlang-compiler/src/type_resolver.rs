//! Signature and type-annotation resolution.
//!
//! The generator does not type-check. It asks a [`SignatureResolver`] what a
//! type annotation means and what a function's final type is. The default
//! [`NumericResolver`] knows a single numeric type, `i32`.

use dlang_ast::{FunctionType, Param, TypeRef};
use dlang_core::{CompilationError, ValType};

use crate::ir::FuncType;

type Result<T> = std::result::Result<T, CompilationError>;

/// Pluggable typing policy for the code generator.
///
/// Implementations must be `Send + Sync` so functions can be generated in
/// parallel.
pub trait SignatureResolver: Send + Sync {
    /// Resolve a type annotation to a value type.
    fn resolve_value_type(&self, ty: &TypeRef<'_>) -> Result<ValType>;

    /// Value type of a parameter.
    fn resolve_param(&self, param: &Param<'_>) -> Result<ValType> {
        match &param.ty {
            Some(ty) => self.resolve_value_type(ty),
            None => Ok(ValType::NUMERIC),
        }
    }

    /// Build the function type once the body has been lowered.
    ///
    /// Called exactly once per function. `body_result` is the type of the
    /// value the body leaves on the stack, if any.
    fn resolve_signature(
        &self,
        signature: &FunctionType<'_>,
        body_result: Option<ValType>,
    ) -> Result<FuncType>;
}

/// Default resolver: every value is `i32`.
///
/// - Parameters are `i32`; an annotation must name `i32`.
/// - The result is `[i32]` when the body yields a value and `[]` otherwise.
/// - An explicit result annotation must name `i32` and the body must yield.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericResolver;

impl SignatureResolver for NumericResolver {
    fn resolve_value_type(&self, ty: &TypeRef<'_>) -> Result<ValType> {
        match ValType::from_name(ty.name.name) {
            Some(ValType::I32) => Ok(ValType::I32),
            _ => Err(CompilationError::TypeMismatch {
                message: format!("unknown type '{}', only i32 is supported", ty.name.name),
                span: ty.span,
            }),
        }
    }

    fn resolve_signature(
        &self,
        signature: &FunctionType<'_>,
        body_result: Option<ValType>,
    ) -> Result<FuncType> {
        let params = signature
            .params
            .iter()
            .map(|p| self.resolve_param(p))
            .collect::<Result<Vec<_>>>()?;

        let results = match &signature.result {
            None => body_result.into_iter().collect(),
            Some(annotation) => {
                let declared = self.resolve_value_type(annotation)?;
                match body_result {
                    Some(found) if found == declared => vec![declared],
                    Some(found) => {
                        return Err(CompilationError::TypeMismatch {
                            message: format!(
                                "function declares result {declared} but its body yields {found}"
                            ),
                            span: annotation.span,
                        });
                    }
                    None => {
                        return Err(CompilationError::TypeMismatch {
                            message: format!(
                                "function declares result {declared} but its body yields no value"
                            ),
                            span: annotation.span,
                        });
                    }
                }
            }
        };

        Ok(FuncType::new(params, results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dlang_ast::{Ident, Span};

    fn type_ref(name: &str) -> TypeRef<'_> {
        TypeRef::named(Ident::new(name, Span::new(1, 1, name.len() as u32)))
    }

    fn signature<'a>(params: &'a [Param<'a>], result: Option<TypeRef<'a>>) -> FunctionType<'a> {
        FunctionType {
            params,
            result,
            span: Span::default(),
        }
    }

    #[test]
    fn value_type_accepts_only_i32() {
        let resolver = NumericResolver;
        assert_eq!(resolver.resolve_value_type(&type_ref("i32")), Ok(ValType::I32));
        assert!(matches!(
            resolver.resolve_value_type(&type_ref("f64")),
            Err(CompilationError::TypeMismatch { .. })
        ));
        assert!(resolver.resolve_value_type(&type_ref("string")).is_err());
    }

    #[test]
    fn result_follows_body() {
        let resolver = NumericResolver;
        let sig = signature(&[], None);
        assert_eq!(
            resolver.resolve_signature(&sig, Some(ValType::I32)).unwrap(),
            FuncType::new(vec![], vec![ValType::I32])
        );
        assert_eq!(
            resolver.resolve_signature(&sig, None).unwrap(),
            FuncType::default()
        );
    }

    #[test]
    fn params_are_i32() {
        let resolver = NumericResolver;
        let params = [
            Param {
                name: Ident::new("a", Span::default()),
                ty: None,
                span: Span::default(),
            },
            Param {
                name: Ident::new("b", Span::default()),
                ty: Some(type_ref("i32")),
                span: Span::default(),
            },
        ];
        let sig = signature(&params, None);
        let ty = resolver.resolve_signature(&sig, None).unwrap();
        assert_eq!(ty.params, vec![ValType::I32, ValType::I32]);
    }

    #[test]
    fn declared_result_requires_body_value() {
        let resolver = NumericResolver;
        let sig = signature(&[], Some(type_ref("i32")));
        assert!(resolver.resolve_signature(&sig, Some(ValType::I32)).is_ok());
        let err = resolver.resolve_signature(&sig, None).unwrap_err();
        assert!(err.to_string().contains("yields no value"));
    }
}
