//! Compound literals: strings, lists, records, tuples and macro calls.

use juice_ir::{
    Expr, ExprKind, Identifier, MacroCall, Operator, RecordEntry, Span, StringLiteral, StringPart,
    StringSegment, Token, TokenKind,
};

use crate::{ErrorContext, ParseError, Parser};

impl Parser<'_> {
    /// Re-parse each `${ ... }` segment of the current string token.
    pub(crate) fn parse_string_literal(&mut self) -> Result<StringLiteral, ParseError> {
        let TokenKind::String(segments) = self.current_kind() else {
            return Err(self.cursor.make_expect_error("a string"));
        };
        let segments = segments.clone();
        let span = self.advance().span;

        let mut parts = Vec::with_capacity(segments.len());
        for segment in segments {
            match segment {
                StringSegment::Raw { text, .. } => parts.push(StringPart::Raw(text)),
                StringSegment::Interpolation { tokens, span } => {
                    let expr = Self::parse_nested_expr(&tokens, span)?;
                    parts.push(StringPart::Interpolation(expr));
                }
            }
        }
        Ok(StringLiteral { parts, span })
    }

    /// Decide whether the `{` at the cursor opens a record or a block.
    ///
    /// A record starts with `key:`, where the key is a name, string or
    /// number. `x: $T = 1` also starts that way but is a typed binding, so
    /// the scan continues to the first top-level `,`, `=` or closing `}`.
    pub(super) fn at_record_start(&self) -> bool {
        let cursor = &self.cursor;
        if matches!(cursor.peek_kind_at(1), TokenKind::CloseBrace) {
            return true;
        }

        let mut n = 1;
        match cursor.peek_kind_at(n) {
            TokenKind::String(_) | TokenKind::Number(_) | TokenKind::Keyword(_) => n += 1,
            TokenKind::Identifier(_) | TokenKind::Interpolation(_) => {
                while matches!(
                    cursor.peek_kind_at(n),
                    TokenKind::Identifier(_) | TokenKind::Interpolation(_)
                ) {
                    n += 1;
                }
            }
            _ => return false,
        }
        if !cursor.peek_kind_at(n).is_operator(Operator::Colon) {
            return false;
        }

        let mut depth = 0usize;
        loop {
            n += 1;
            match cursor.peek_kind_at(n) {
                TokenKind::OpenBrace | TokenKind::OpenParen | TokenKind::OpenBracket => depth += 1,
                TokenKind::CloseParen | TokenKind::CloseBracket => depth = depth.saturating_sub(1),
                TokenKind::CloseBrace => {
                    if depth == 0 {
                        return true;
                    }
                    depth -= 1;
                }
                TokenKind::Operator(Operator::Comma) if depth == 0 => return true,
                TokenKind::Operator(Operator::Eq) if depth == 0 => return false,
                TokenKind::Eof => return false,
                _ => {}
            }
        }
    }

    /// `{ key: value, "quoted": value, 1: value }`; entries are separated by
    /// commas or line breaks.
    pub(super) fn parse_record(&mut self) -> Result<Expr, ParseError> {
        let open = self.advance().span;
        self.in_error_context(ErrorContext::Record, |p| {
            let mut entries = Vec::new();
            while !p.check(&TokenKind::CloseBrace) && !p.is_at_end() {
                let key = p.parse_record_key()?;
                p.expect_operator(Operator::Colon)?;
                let value = p.parse_expr()?;
                let span = key.span.merge(value.span);
                entries.push(RecordEntry { key, value, span });

                if !p.eat_operator(Operator::Comma)
                    && !p.check(&TokenKind::CloseBrace)
                    && !p.cursor.has_newline_before()
                {
                    return Err(p.cursor.make_expect_error("`,` or `}`"));
                }
            }
            let close = p.expect_closing(&TokenKind::CloseBrace, open)?;
            Ok(Expr::new(ExprKind::Record(entries), open.merge(close)))
        })
    }

    fn parse_record_key(&mut self) -> Result<Expr, ParseError> {
        let span = self.current_span();
        match self.current_kind() {
            TokenKind::String(_) => {
                let string = self.parse_string_literal()?;
                Ok(Expr::new(ExprKind::String(string), span))
            }
            TokenKind::Number(number) => {
                let number = number.clone();
                self.advance();
                Ok(Expr::new(ExprKind::Number(number), span))
            }
            TokenKind::Keyword(kw) => {
                let name = kw.as_str();
                self.advance();
                Ok(Expr::new(
                    ExprKind::Identifier(Identifier::simple(name, span)),
                    span,
                ))
            }
            TokenKind::Identifier(_) | TokenKind::Interpolation(_) => {
                let ident = self.parse_identifier()?;
                let span = ident.span;
                Ok(Expr::new(ExprKind::Identifier(ident), span))
            }
            _ => Err(self.cursor.make_expect_error("a record key")),
        }
    }

    /// `[a, b, c]` with an optional trailing comma.
    pub(super) fn parse_list(&mut self) -> Result<Expr, ParseError> {
        let open = self.advance().span;
        self.in_error_context(ErrorContext::List, |p| {
            let items = p.parse_comma_list(&TokenKind::CloseBracket)?;
            let close = p.expect_closing(&TokenKind::CloseBracket, open)?;
            Ok(Expr::new(ExprKind::List(items), open.merge(close)))
        })
    }

    /// `()` is the empty tuple, `(x)` a grouping and `(x,)` or `(x, y)` a
    /// tuple.
    pub(super) fn parse_group_or_tuple(&mut self) -> Result<Expr, ParseError> {
        let open = self.advance().span;
        self.in_error_context(ErrorContext::Tuple, |p| {
            if p.check(&TokenKind::CloseParen) {
                let close = p.advance().span;
                return Ok(Expr::new(ExprKind::Tuple(Vec::new()), open.merge(close)));
            }

            let first = p.parse_expr()?;
            if !p.check_operator(Operator::Comma) {
                let close = p.expect_closing(&TokenKind::CloseParen, open)?;
                return Ok(Expr::new(first.kind, open.merge(close)));
            }

            p.advance();
            let mut items = vec![first];
            items.extend(p.parse_comma_list(&TokenKind::CloseParen)?);
            let close = p.expect_closing(&TokenKind::CloseParen, open)?;
            Ok(Expr::new(ExprKind::Tuple(items), open.merge(close)))
        })
    }

    /// Expressions separated by commas up to (not including) `close`.
    fn parse_comma_list(&mut self, close: &TokenKind) -> Result<Vec<Expr>, ParseError> {
        let mut items = Vec::new();
        while !self.check(close) && !self.is_at_end() {
            items.push(self.parse_expr()?);
            if !self.eat_operator(Operator::Comma) {
                break;
            }
        }
        Ok(items)
    }

    /// `name!`, then an optional argument list, then an optional raw body.
    pub(super) fn parse_macro_call(&mut self) -> Result<Expr, ParseError> {
        let TokenKind::MacroIdentifier(name) = self.current_kind() else {
            return Err(self.cursor.make_expect_error("a macro"));
        };
        let name = name.clone();
        let start = self.advance().span;

        let args = if let TokenKind::MacroArgs(tokens) = self.current_kind() {
            let tokens = tokens.clone();
            let span = self.advance().span;
            Some(parse_macro_args(&tokens, span)?)
        } else {
            None
        };

        let body = if let TokenKind::MacroBody(text) = self.current_kind() {
            let text = text.clone();
            self.advance();
            Some(text)
        } else {
            None
        };

        let span = start.merge(self.previous_span());
        Ok(Expr::new(
            ExprKind::MacroCall(MacroCall {
                name,
                args,
                body,
                span,
            }),
            span,
        ))
    }
}

/// The re-tokenized contents of `name!( ... )`: comma-separated expressions.
fn parse_macro_args(tokens: &[Token], span: Span) -> Result<Vec<Expr>, ParseError> {
    let mut nested = Parser::nested(tokens, span);
    let mut args = Vec::new();
    while !nested.is_at_end() {
        let arg = nested
            .parse_expr()
            .map_err(|err| err.with_context(ErrorContext::MacroArguments))?;
        args.push(arg);
        if !nested.eat_operator(Operator::Comma) {
            break;
        }
    }
    if !nested.is_at_end() {
        return Err(nested
            .cursor
            .make_expect_error("`,` or `)`")
            .with_context(ErrorContext::MacroArguments));
    }
    Ok(args)
}
