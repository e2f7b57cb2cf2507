//! Blocks, functions and control flow.

use juice_diagnostic::ErrorCode;
use juice_ir::{
    Block, ElseBranch, For, ForIterable, Function, Identifier, If, Impl, Keyword, Match, MatchArm,
    Operator, Param, Range, TokenKind,
};
use juice_stack::ensure_sufficient_stack;

use crate::{ErrorContext, ParseError, Parser};

impl Parser<'_> {
    /// `{ statement* }`
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        ensure_sufficient_stack(|| {
            self.in_error_context(ErrorContext::Block, |p| {
                let open = p.expect(&TokenKind::OpenBrace)?;
                let mut statements = Vec::new();
                while !p.check(&TokenKind::CloseBrace) && !p.is_at_end() {
                    statements.push(p.parse_statement()?);
                }
                let close = p.expect_closing(&TokenKind::CloseBrace, open)?;
                Ok(Block {
                    statements,
                    span: open.merge(close),
                })
            })
        })
    }

    /// `[async] [static] fn [name[!]](params) [-> $T] { body }`
    pub(crate) fn parse_function(&mut self) -> Result<Function, ParseError> {
        let start = self.current_span();
        let mut is_async = false;
        let mut is_static = false;
        loop {
            if self.check_keyword(Keyword::Async) {
                is_async = true;
            } else if self.check_keyword(Keyword::Static) {
                is_static = true;
            } else {
                break;
            }
            self.advance();
        }
        self.cursor.expect_keyword(Keyword::Fn)?;

        self.in_error_context(ErrorContext::Function, |p| {
            let (name, is_macro) = match p.current_kind() {
                TokenKind::Identifier(name) => {
                    let name = name.clone();
                    let span = p.advance().span;
                    (Some(Identifier::simple(name, span)), false)
                }
                TokenKind::MacroIdentifier(name) => {
                    let name = name.clone();
                    let span = p.advance().span;
                    (Some(Identifier::simple(name, span)), true)
                }
                _ => (None, false),
            };

            let params = match p.current_kind() {
                TokenKind::MacroArgs(tokens) => {
                    let tokens = tokens.clone();
                    let span = p.advance().span;
                    let mut nested = Parser::nested(&tokens, span);
                    let params = nested.parse_params()?;
                    if !nested.is_at_end() {
                        return Err(nested.cursor.make_expect_error("`,` or `)`"));
                    }
                    params
                }
                _ => {
                    let open = p.expect(&TokenKind::OpenParen)?;
                    let params = p.parse_params()?;
                    p.expect_closing(&TokenKind::CloseParen, open)?;
                    params
                }
            };

            let return_type = if p.eat_operator(Operator::Arrow) {
                Some(p.parse_type_expr()?)
            } else {
                None
            };

            // A macro body is raw text for the macro expander; nothing to parse.
            let body = if let TokenKind::MacroBody(_) = p.current_kind() {
                let span = p.advance().span;
                Block {
                    statements: Vec::new(),
                    span,
                }
            } else {
                p.parse_block()?
            };

            Ok(Function {
                name,
                params,
                return_type,
                span: start.merge(body.span),
                body,
                is_async,
                is_static,
                is_macro,
            })
        })
    }

    /// `a, b: $T, c = 1` up to the closing `)` or end of a nested slice.
    fn parse_params(&mut self) -> Result<Vec<Param>, ParseError> {
        self.in_error_context(ErrorContext::Parameters, |p| {
            let mut params = Vec::new();
            while !p.check(&TokenKind::CloseParen) && !p.is_at_end() {
                let (name, start) = p.expect_ident()?;
                let ty = if p.eat_operator(Operator::Colon) {
                    Some(p.parse_type_expr()?)
                } else {
                    None
                };
                let default = if p.eat_operator(Operator::Eq) {
                    Some(p.parse_expr()?)
                } else {
                    None
                };
                params.push(Param {
                    name,
                    ty,
                    default,
                    span: start.merge(p.previous_span()),
                });
                if !p.eat_operator(Operator::Comma) {
                    break;
                }
            }
            Ok(params)
        })
    }

    /// `if cond { } [else if cond { }]* [else { }]`
    ///
    /// A blank line between `}` and `else` ends the chain; the `else` then
    /// starts the next statement and fails there.
    pub(crate) fn parse_if(&mut self) -> Result<If, ParseError> {
        let start = self.advance().span;
        self.in_error_context(ErrorContext::IfStatement, |p| {
            let condition = p.parse_expr()?;
            let body = p.parse_block()?;
            let continues = p.check_keyword(Keyword::Else) && !p.cursor.has_blank_line_before();
            let else_branch = if continues {
                p.advance();
                if p.check_keyword(Keyword::If) {
                    let next = ensure_sufficient_stack(|| p.parse_if())?;
                    Some(ElseBranch::If(Box::new(next)))
                } else {
                    Some(ElseBranch::Block(p.parse_block()?))
                }
            } else {
                None
            };
            Ok(If {
                condition,
                body,
                else_branch,
                span: start.merge(p.previous_span()),
            })
        })
    }

    /// The four loop shapes: `for { }`, `for xs { }`, `for x of xs { }` and
    /// a `from..to` range with or without a binding.
    pub(crate) fn parse_for(&mut self) -> Result<For, ParseError> {
        let start = self.advance().span;
        self.in_error_context(ErrorContext::ForLoop, |p| {
            if p.check(&TokenKind::OpenBrace) {
                let body = p.parse_block()?;
                return Ok(For {
                    binding: None,
                    iterable: None,
                    span: start.merge(body.span),
                    body,
                });
            }

            let binding = match p.current_kind() {
                TokenKind::Identifier(name) if p.cursor.peek_kind_at(1).is_keyword(Keyword::Of) => {
                    let name = name.clone();
                    p.advance();
                    p.advance();
                    Some(name)
                }
                _ => None,
            };

            let from = p.parse_expr()?;
            let iterable = if p.eat_operator(Operator::DotDot) {
                let to = p.parse_expr()?;
                let span = from.span.merge(to.span);
                ForIterable::Range(Range { from, to, span })
            } else {
                ForIterable::Expr(from)
            };

            let body = p.parse_block()?;
            Ok(For {
                binding,
                iterable: Some(iterable),
                span: start.merge(body.span),
                body,
            })
        })
    }

    /// `impl [$trait for] target { fn ... }`
    pub(crate) fn parse_impl(&mut self) -> Result<Impl, ParseError> {
        let start = self.advance().span;
        self.in_error_context(ErrorContext::ImplBlock, |p| {
            let trait_name = match p.current_kind() {
                TokenKind::TypeIdentifier(name)
                    if p.cursor.peek_kind_at(1).is_keyword(Keyword::For) =>
                {
                    let name = name.clone();
                    p.advance();
                    p.advance();
                    Some(name)
                }
                _ => None,
            };

            let target = p.parse_expr()?;
            let open = p.expect(&TokenKind::OpenBrace)?;
            let mut methods = Vec::new();
            while !p.check(&TokenKind::CloseBrace) && !p.is_at_end() {
                if !matches!(
                    p.current_kind(),
                    TokenKind::Keyword(Keyword::Fn | Keyword::Async | Keyword::Static)
                ) {
                    return Err(p.cursor.make_expect_error("a method"));
                }
                methods.push(p.parse_function()?);
            }
            let close = p.expect_closing(&TokenKind::CloseBrace, open)?;
            Ok(Impl {
                target,
                trait_name,
                methods,
                span: start.merge(close),
            })
        })
    }

    /// `match target { pattern { } ... [else { }] }`
    pub(crate) fn parse_match(&mut self) -> Result<Match, ParseError> {
        let start = self.advance().span;
        self.in_error_context(ErrorContext::MatchExpression, |p| {
            let target = p.parse_expr()?;
            let open = p.expect(&TokenKind::OpenBrace)?;
            let mut arms = Vec::new();
            let mut fallback = None;
            while !p.check(&TokenKind::CloseBrace) && !p.is_at_end() {
                if p.check_keyword(Keyword::Else) {
                    let else_span = p.advance().span;
                    if fallback.is_some() {
                        return Err(ParseError::new(
                            ErrorCode::E1001,
                            "a `match` can only have one `else` arm",
                            else_span,
                        ));
                    }
                    fallback = Some(p.parse_block()?);
                    continue;
                }
                let pattern = p.parse_expr()?;
                let body = p.parse_block()?;
                let span = pattern.span.merge(body.span);
                arms.push(MatchArm {
                    pattern,
                    body,
                    span,
                });
            }
            let close = p.expect_closing(&TokenKind::CloseBrace, open)?;
            Ok(Match {
                target,
                arms,
                fallback,
                span: start.merge(close),
            })
        })
    }
}
