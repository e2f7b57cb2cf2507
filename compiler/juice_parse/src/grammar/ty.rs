//! Type expressions and type declaration bodies.

use juice_diagnostic::ErrorCode;
use juice_ir::{
    Operator, Span, TokenKind, TypeConstructor, TypeDefinition, TypeExpr, TypeExprKind, TypeField,
    TypeOp,
};
use juice_stack::ensure_sufficient_stack;

use crate::{ErrorContext, ParseError, Parser};

/// One entry of a `{ ... }` type body before it is known whether the body
/// lists constructors or shorthand fields.
enum BodyEntry {
    Constructor(TypeConstructor),
    Field { field: TypeField, typed: bool },
}

impl Parser<'_> {
    /// `$a`, `$list($a)`, `($a, $b)`, joined left to right by `|` and `&`.
    pub(crate) fn parse_type_expr(&mut self) -> Result<TypeExpr, ParseError> {
        self.in_error_context(ErrorContext::TypeExpression, |p| {
            let mut left = p.parse_type_operand()?;
            loop {
                let op = match p.current_kind() {
                    TokenKind::Operator(Operator::Pipe) => TypeOp::Union,
                    TokenKind::Operator(Operator::Amp) => TypeOp::Intersection,
                    _ => break,
                };
                p.advance();
                let right = p.parse_type_operand()?;
                let span = left.span.merge(right.span);
                left = TypeExpr {
                    kind: TypeExprKind::Binary {
                        op,
                        left: Box::new(left),
                        right: Box::new(right),
                    },
                    span,
                };
            }
            Ok(left)
        })
    }

    fn parse_type_operand(&mut self) -> Result<TypeExpr, ParseError> {
        ensure_sufficient_stack(|| match self.current_kind() {
            TokenKind::TypeIdentifier(name) => {
                let name = name.clone();
                let start = self.advance().span;
                if !(self.check(&TokenKind::OpenParen) && self.cursor.is_adjacent()) {
                    return Ok(TypeExpr {
                        kind: TypeExprKind::Named(name),
                        span: start,
                    });
                }
                let (args, _, close) = self.parse_type_list()?;
                Ok(TypeExpr {
                    kind: TypeExprKind::Applied { name, args },
                    span: start.merge(close),
                })
            }
            TokenKind::OpenParen => {
                let start = self.current_span();
                let (mut items, trailing_comma, close) = self.parse_type_list()?;
                if items.len() == 1 && !trailing_comma {
                    if let Some(inner) = items.pop() {
                        return Ok(TypeExpr {
                            kind: inner.kind,
                            span: start.merge(close),
                        });
                    }
                }
                Ok(TypeExpr {
                    kind: TypeExprKind::Tuple(items),
                    span: start.merge(close),
                })
            }
            _ => Err(self.cursor.make_expect_error("a type")),
        })
    }

    /// `( type, type, )`; returns the items, whether a comma came last, and
    /// the span of the `)`.
    fn parse_type_list(&mut self) -> Result<(Vec<TypeExpr>, bool, Span), ParseError> {
        let open = self.advance().span;
        let mut items = Vec::new();
        let mut trailing_comma = false;
        while !self.check(&TokenKind::CloseParen) && !self.is_at_end() {
            items.push(self.parse_type_expr()?);
            trailing_comma = self.eat_operator(Operator::Comma);
            if !trailing_comma {
                break;
            }
        }
        let close = self.expect_closing(&TokenKind::CloseParen, open)?;
        Ok((items, trailing_comma, close))
    }

    /// Everything after `$T :=`: an alias type expression or a `{ ... }`
    /// body.
    ///
    /// A body where any entry has a parameter list declares constructors;
    /// bare names among them are constructors without fields. Otherwise
    /// the body is a field list for a single constructor named `name`.
    pub(crate) fn parse_type_definition(
        &mut self,
        name: &str,
    ) -> Result<TypeDefinition, ParseError> {
        match self.current_kind() {
            TokenKind::OpenBrace => {}
            TokenKind::TypeIdentifier(_) | TokenKind::OpenParen => {
                return Ok(TypeDefinition::Alias(self.parse_type_expr()?));
            }
            found => {
                return Err(ParseError::new(
                    ErrorCode::E1006,
                    format!(
                        "expected a type or `{{`, found {}",
                        found.display_name()
                    ),
                    self.current_span(),
                )
                .with_hint("write `$name := $other` or `$name := { ... }`"));
            }
        }

        let open = self.advance().span;
        let mut entries = Vec::new();
        while !self.check(&TokenKind::CloseBrace) && !self.is_at_end() {
            entries.push(self.parse_body_entry()?);
            self.eat_operator(Operator::Comma);
        }
        let close = self.expect_closing(&TokenKind::CloseBrace, open)?;

        let has_constructors = entries
            .iter()
            .any(|entry| matches!(entry, BodyEntry::Constructor(_)));
        if !has_constructors {
            let fields = entries
                .into_iter()
                .filter_map(|entry| match entry {
                    BodyEntry::Field { field, .. } => Some(field),
                    BodyEntry::Constructor(_) => None,
                })
                .collect();
            return Ok(TypeDefinition::Constructors(vec![TypeConstructor {
                name: name.to_string(),
                fields,
                is_shorthand: true,
                span: open.merge(close),
            }]));
        }

        let mut constructors = Vec::with_capacity(entries.len());
        for entry in entries {
            match entry {
                BodyEntry::Constructor(ctor) => constructors.push(ctor),
                BodyEntry::Field { field, typed: false } => constructors.push(TypeConstructor {
                    name: field.name,
                    fields: Vec::new(),
                    is_shorthand: false,
                    span: field.span,
                }),
                BodyEntry::Field { field, typed: true } => {
                    return Err(ParseError::new(
                        ErrorCode::E1006,
                        format!("field `{}` is outside of any constructor", field.name),
                        field.span,
                    )
                    .with_hint("fields belong inside a constructor, as in `ok(value: $int)`"));
                }
            }
        }
        Ok(TypeDefinition::Constructors(constructors))
    }

    fn parse_body_entry(&mut self) -> Result<BodyEntry, ParseError> {
        let (name, start) = self.expect_ident()?;
        if self.check(&TokenKind::OpenParen) {
            let open = self.advance().span;
            let mut fields = Vec::new();
            while !self.check(&TokenKind::CloseParen) && !self.is_at_end() {
                fields.push(self.parse_type_field()?);
                if !self.eat_operator(Operator::Comma) {
                    break;
                }
            }
            let close = self.expect_closing(&TokenKind::CloseParen, open)?;
            return Ok(BodyEntry::Constructor(TypeConstructor {
                name,
                fields,
                is_shorthand: false,
                span: start.merge(close),
            }));
        }

        let ty = self.parse_field_annotation()?;
        let typed = ty.is_some();
        Ok(BodyEntry::Field {
            field: TypeField {
                name,
                ty,
                span: start.merge(self.previous_span()),
            },
            typed,
        })
    }

    fn parse_type_field(&mut self) -> Result<TypeField, ParseError> {
        let (name, start) = self.expect_ident()?;
        let ty = self.parse_field_annotation()?;
        Ok(TypeField {
            name,
            ty,
            span: start.merge(self.previous_span()),
        })
    }

    fn parse_field_annotation(&mut self) -> Result<Option<TypeExpr>, ParseError> {
        if self.eat_operator(Operator::Colon) {
            Ok(Some(self.parse_type_expr()?))
        } else {
            Ok(None)
        }
    }
}
