//! Source rendering of the syntax tree.
//!
//! Output re-parses to an equal tree (modulo spans). Binary expressions
//! are always parenthesized so nesting is visible; statements inside a
//! block go one per line.

use std::fmt::{self, Display, Formatter, Write};

use super::{
    Assignment, Block, CallArg, ElseBranch, Expr, ExprKind, For, ForIterable, Function,
    IdentSegment, Identifier, If, Impl, Import, MacroCall, Match, Param, Program, RecordEntry,
    Statement, StatementKind, StringLiteral, StringPart, TypeAssignment, TypeConstructor,
    TypeDefinition, TypeExpr, TypeExprKind, TypeField,
};

/// Write `items` separated by `", "`.
fn comma_separated<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for statement in &self.body {
            if matches!(statement.kind, StatementKind::Eof) {
                continue;
            }
            if !first {
                f.write_char('\n')?;
            }
            first = false;
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StatementKind::Expression(expr) => write!(f, "{expr}"),
            StatementKind::Import(import) => write!(f, "{import}"),
            StatementKind::Export(inner) => write!(f, "export {inner}"),
            StatementKind::Assignment(assignment) => write!(f, "{assignment}"),
            StatementKind::TypeAssignment(assignment) => write!(f, "{assignment}"),
            StatementKind::Function(function) => write!(f, "{function}"),
            StatementKind::If(if_node) => write!(f, "{if_node}"),
            StatementKind::For(for_node) => write!(f, "{for_node}"),
            StatementKind::Impl(impl_node) => write!(f, "{impl_node}"),
            StatementKind::Break => f.write_str("break"),
            StatementKind::Return(None) => f.write_str("return"),
            StatementKind::Return(Some(value)) => write!(f, "return {value}"),
            StatementKind::Match(match_node) => write!(f, "{match_node}"),
            StatementKind::Eof => Ok(()),
        }
    }
}

impl Display for Import {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("import ")?;
        if self.foreign {
            f.write_str("foreign ")?;
        }
        if self.internal {
            f.write_str("internal ")?;
        }
        f.write_str(&self.path.join("."))?;
        if let Some(alias) = &self.alias {
            write!(f, " as {alias}")?;
        }
        if !self.expose.is_empty() {
            write!(f, " ({})", self.expose.join(", "))?;
        }
        Ok(())
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.annotation {
            Some(ty) => write!(f, "{}: {} = {}", self.target, ty, self.value),
            None => write!(f, "{} := {}", self.target, self.value),
        }
    }
}

impl Display for TypeAssignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "${} := ", self.name)?;
        match &self.definition {
            TypeDefinition::Alias(ty) => write!(f, "{ty}"),
            TypeDefinition::Constructors(ctors) => match ctors.as_slice() {
                [ctor] if ctor.is_shorthand => {
                    if ctor.fields.is_empty() {
                        f.write_str("{}")
                    } else {
                        f.write_str("{ ")?;
                        comma_separated(f, &ctor.fields)?;
                        f.write_str(" }")
                    }
                }
                _ => {
                    f.write_str("{\n")?;
                    for ctor in ctors {
                        writeln!(f, "{ctor}")?;
                    }
                    f.write_char('}')
                }
            },
        }
    }
}

impl Display for TypeConstructor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        comma_separated(f, &self.fields)?;
        f.write_char(')')
    }
}

impl Display for TypeField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(ty) = &self.ty {
            write!(f, ": {ty}")?;
        }
        Ok(())
    }
}

impl Display for TypeExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeExprKind::Named(name) => write!(f, "${name}"),
            TypeExprKind::Applied { name, args } => {
                write!(f, "${name}(")?;
                comma_separated(f, args)?;
                f.write_char(')')
            }
            TypeExprKind::Tuple(items) => {
                f.write_char('(')?;
                comma_separated(f, items)?;
                if items.len() == 1 {
                    f.write_char(',')?;
                }
                f.write_char(')')
            }
            TypeExprKind::Binary { op, left, right } => {
                write!(f, "{left} {} {right}", op.as_symbol())
            }
        }
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_async {
            f.write_str("async ")?;
        }
        if self.is_static {
            f.write_str("static ")?;
        }
        f.write_str("fn")?;
        if let Some(name) = &self.name {
            write!(f, " {name}")?;
            if self.is_macro {
                f.write_char('!')?;
            }
        }
        f.write_char('(')?;
        comma_separated(f, &self.params)?;
        f.write_char(')')?;
        if let Some(ret) = &self.return_type {
            write!(f, " -> {ret}")?;
        }
        write!(f, " {}", self.body)
    }
}

impl Display for Param {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(ty) = &self.ty {
            write!(f, ": {ty}")?;
        }
        if let Some(default) = &self.default {
            write!(f, " = {default}")?;
        }
        Ok(())
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.statements.is_empty() {
            return f.write_str("{}");
        }
        f.write_str("{\n")?;
        for statement in &self.statements {
            writeln!(f, "{statement}")?;
        }
        f.write_char('}')
    }
}

impl Display for If {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "if {} {}", self.condition, self.body)?;
        match &self.else_branch {
            None => Ok(()),
            Some(ElseBranch::If(next)) => write!(f, " else {next}"),
            Some(ElseBranch::Block(block)) => write!(f, " else {block}"),
        }
    }
}

impl Display for For {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("for ")?;
        if let Some(binding) = &self.binding {
            write!(f, "{binding} of ")?;
        }
        match &self.iterable {
            None => {}
            Some(ForIterable::Expr(expr)) => write!(f, "{expr} ")?,
            Some(ForIterable::Range(range)) => write!(f, "{}..{} ", range.from, range.to)?,
        }
        write!(f, "{}", self.body)
    }
}

impl Display for Impl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("impl ")?;
        if let Some(trait_name) = &self.trait_name {
            write!(f, "${trait_name} for ")?;
        }
        writeln!(f, "{} {{", self.target)?;
        for method in &self.methods {
            writeln!(f, "{method}")?;
        }
        f.write_char('}')
    }
}

impl Display for Match {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "match {} {{", self.target)?;
        for arm in &self.arms {
            writeln!(f, "{} {}", arm.pattern, arm.body)?;
        }
        if let Some(fallback) = &self.fallback {
            writeln!(f, "else {fallback}")?;
        }
        f.write_char('}')
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Number(number) => f.write_str(&number.raw),
            ExprKind::Boolean(value) => write!(f, "{value}"),
            ExprKind::String(string) => write!(f, "{string}"),
            ExprKind::Identifier(ident) => write!(f, "{ident}"),
            ExprKind::TypeIdentifier(name) => write!(f, "${name}"),
            ExprKind::Function(function) => write!(f, "{function}"),
            ExprKind::Block(block) => write!(f, "{block}"),
            ExprKind::List(items) => {
                f.write_char('[')?;
                comma_separated(f, items)?;
                f.write_char(']')
            }
            ExprKind::Record(entries) => {
                if entries.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                comma_separated(f, entries)?;
                f.write_str(" }")
            }
            ExprKind::Tuple(items) => {
                f.write_char('(')?;
                comma_separated(f, items)?;
                if items.len() == 1 {
                    f.write_char(',')?;
                }
                f.write_char(')')
            }
            ExprKind::If(if_node) => write!(f, "{if_node}"),
            ExprKind::Match(match_node) => write!(f, "{match_node}"),
            ExprKind::MacroCall(call) => write!(f, "{call}"),
            ExprKind::Unwrap(inner) => write!(f, "{inner}?"),
            // `!!x` and `!-1` would lex as one operator.
            ExprKind::Unary { op, operand } => match operand.kind {
                ExprKind::Unary { .. } => write!(f, "{}({operand})", op.as_symbol()),
                _ => write!(f, "{}{operand}", op.as_symbol()),
            },
            ExprKind::Binary { op, left, right } => {
                write!(f, "({left} {} {right})", op.as_symbol())
            }
            ExprKind::Postfix { op, operand } => write!(f, "{operand}{}", op.as_symbol()),
            ExprKind::Member { object, member } => write!(f, "{object}.{member}"),
            ExprKind::Call { target, args } => {
                write!(f, "{target}(")?;
                comma_separated(f, args)?;
                f.write_char(')')
            }
        }
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                IdentSegment::Name(name) => f.write_str(name)?,
                IdentSegment::Quoted(string) => write!(f, "{string}")?,
                IdentSegment::Interpolation(expr) => write!(f, "${{{expr}}}")?,
            }
        }
        Ok(())
    }
}

impl Display for StringLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('"')?;
        for part in &self.parts {
            match part {
                StringPart::Raw(text) => {
                    let mut chars = text.chars().peekable();
                    while let Some(c) = chars.next() {
                        match c {
                            '"' => f.write_str("\\\"")?,
                            '\\' => f.write_str("\\\\")?,
                            '\n' => f.write_str("\\n")?,
                            '\r' => f.write_str("\\r")?,
                            '\t' => f.write_str("\\t")?,
                            '$' if chars.peek() == Some(&'{') => f.write_str("\\$")?,
                            c => f.write_char(c)?,
                        }
                    }
                }
                StringPart::Interpolation(expr) => write!(f, "${{{expr}}}")?,
            }
        }
        f.write_char('"')
    }
}

impl Display for RecordEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

impl Display for CallArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{name}: ")?;
        }
        write!(f, "{}", self.value)
    }
}

impl Display for MacroCall {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}!", self.name)?;
        if let Some(args) = &self.args {
            f.write_char('(')?;
            comma_separated(f, args)?;
            f.write_char(')')?;
        }
        if let Some(body) = &self.body {
            write!(f, " {{{body}}}")?;
        }
        Ok(())
    }
}
