//! Expression, condition and function rendering.

use super::Compiler;
use crate::dialect::{Feature, JsonObjectStyle, JsonPathStyle};
use crate::error::{SqlError, SqlResult};
use crate::expr::{
    Call, CompareOp, Condition, Direction, Expr, Field, FrameUnit, Function, InList, Nulls,
    OrderBy, Over, PathStep, Window,
};
use crate::value::quote_literal;

impl Compiler<'_> {
    pub(super) fn expr(&mut self, expr: &Expr, out: &mut String) -> SqlResult<()> {
        match expr {
            Expr::Field(field) => self.field(field, out),
            Expr::Value(value) => {
                self.binder.bind_into(value.clone(), out);
                Ok(())
            }
            Expr::Function(func) => self.function(func, out),
            Expr::Subquery(stmt) => self.subquery(stmt, out),
            Expr::Cast { expr, ty } => {
                out.push_str("CAST(");
                self.expr(expr, out)?;
                out.push_str(" AS ");
                out.push_str(ty);
                out.push(')');
                Ok(())
            }
            Expr::Condition(cond) => match cond.as_ref() {
                Condition::And(_) | Condition::Or(_) => self.condition(cond, out),
                other => {
                    out.push('(');
                    self.condition(other, out)?;
                    out.push(')');
                    Ok(())
                }
            },
            Expr::Star(None) => {
                out.push('*');
                Ok(())
            }
            Expr::Star(Some(table)) => {
                let identity = table.identity();
                if self.options.check_scope && !self.in_scope(identity) {
                    return Err(SqlError::UnboundIdentifier {
                        table: identity.to_string(),
                        column: "*".to_string(),
                    });
                }
                self.dialect.write_ident(out, identity);
                out.push_str(".*");
                Ok(())
            }
            Expr::Raw(sql) => {
                out.push_str(sql);
                self.raw_fragments += 1;
                Ok(())
            }
            Expr::Aliased(inner, _) => self.expr(inner, out),
        }
    }

    pub(super) fn expr_list(&mut self, exprs: &[Expr], out: &mut String) -> SqlResult<()> {
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.expr(expr, out)?;
        }
        Ok(())
    }

    fn field(&mut self, field: &Field, out: &mut String) -> SqlResult<()> {
        let qualifier = match field.table_identity() {
            Some(identity) => {
                if self.options.check_scope && !self.in_scope(identity) {
                    return Err(SqlError::UnboundIdentifier {
                        table: identity.to_string(),
                        column: field.column().to_string(),
                    });
                }
                (!self.bare_in_current_frame(identity)).then_some(identity)
            }
            None => None,
        };
        self.check_ident(field.column())?;

        let path = field.path();
        if path.is_empty() {
            self.column_ref(qualifier, field.column(), out);
            return Ok(());
        }
        match self.dialect.json_path {
            JsonPathStyle::Arrows => {
                self.column_ref(qualifier, field.column(), out);
                let last = path.len() - 1;
                for (i, step) in path.iter().enumerate() {
                    out.push_str(if i == last { "->>" } else { "->" });
                    match step {
                        PathStep::Key(key) => out.push_str(&quote_literal(key)),
                        PathStep::Index(index) => out.push_str(&index.to_string()),
                    }
                }
            }
            JsonPathStyle::PathFunction(func) => {
                out.push_str(func);
                out.push('(');
                self.column_ref(qualifier, field.column(), out);
                out.push_str(", ");
                out.push_str(&quote_literal(&json_path(path)));
                out.push(')');
            }
        }
        Ok(())
    }

    fn column_ref(&self, qualifier: Option<&str>, column: &str, out: &mut String) {
        if let Some(table) = qualifier {
            self.dialect.write_ident(out, table);
            out.push('.');
        }
        self.dialect.write_ident(out, column);
    }

    pub(super) fn condition(&mut self, cond: &Condition, out: &mut String) -> SqlResult<()> {
        match cond {
            Condition::Compare { lhs, op, rhs } => {
                if matches!(op, CompareOp::ILike | CompareOp::NotILike) {
                    self.dialect.require(Feature::ILike)?;
                }
                self.expr(lhs, out)?;
                out.push(' ');
                out.push_str(op.as_sql());
                out.push(' ');
                self.expr(rhs, out)
            }
            Condition::And(children) => self.group(children, " AND ", "1=1", out),
            Condition::Or(children) => self.group(children, " OR ", "1=0", out),
            Condition::Not(inner) => match inner.as_ref() {
                Condition::And(children) | Condition::Or(children) if children.len() > 1 => {
                    out.push_str("NOT ");
                    self.condition(inner, out)
                }
                other => {
                    out.push_str("NOT (");
                    self.condition(other, out)?;
                    out.push(')');
                    Ok(())
                }
            },
            Condition::In { lhs, list, negated } => match list {
                InList::Values(values) if values.is_empty() => {
                    out.push_str(if *negated { "1=1" } else { "1=0" });
                    Ok(())
                }
                InList::Values(values) => {
                    self.expr(lhs, out)?;
                    out.push_str(if *negated { " NOT IN (" } else { " IN (" });
                    for (i, value) in values.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        self.binder.bind_into(value.clone(), out);
                    }
                    out.push(')');
                    Ok(())
                }
                InList::Subquery(query) => {
                    self.expr(lhs, out)?;
                    out.push_str(if *negated { " NOT IN " } else { " IN " });
                    self.subquery(query, out)
                }
            },
            Condition::Between {
                lhs,
                low,
                high,
                negated,
            } => {
                self.expr(lhs, out)?;
                out.push_str(if *negated { " NOT BETWEEN " } else { " BETWEEN " });
                self.expr(low, out)?;
                out.push_str(" AND ");
                self.expr(high, out)
            }
            Condition::NullCheck { lhs, negated } => {
                self.expr(lhs, out)?;
                out.push_str(if *negated { " IS NOT NULL" } else { " IS NULL" });
                Ok(())
            }
            Condition::Exists { query, negated } => {
                out.push_str(if *negated { "NOT EXISTS " } else { "EXISTS " });
                self.subquery(query, out)
            }
            Condition::Raw(sql) => {
                out.push_str(sql);
                self.raw_fragments += 1;
                Ok(())
            }
        }
    }

    /// `(a AND b)`. A single child renders alone; an empty group renders `empty`.
    fn group(&mut self, children: &[Condition], sep: &str, empty: &str, out: &mut String) -> SqlResult<()> {
        match children {
            [] => {
                out.push_str(empty);
                Ok(())
            }
            [single] => self.condition(single, out),
            many => {
                out.push('(');
                for (i, child) in many.iter().enumerate() {
                    if i > 0 {
                        out.push_str(sep);
                    }
                    self.operand(child, out)?;
                }
                out.push(')');
                Ok(())
            }
        }
    }

    /// A condition joined to siblings by AND/OR. Raw fragments are opaque and
    /// get their own parentheses; single-child groups collapse onto their child.
    pub(super) fn operand(&mut self, cond: &Condition, out: &mut String) -> SqlResult<()> {
        match cond {
            Condition::Raw(sql) => {
                out.push('(');
                out.push_str(sql);
                out.push(')');
                self.raw_fragments += 1;
                Ok(())
            }
            Condition::And(children) | Condition::Or(children) if children.len() == 1 => {
                self.operand(&children[0], out)
            }
            other => self.condition(other, out),
        }
    }

    fn function(&mut self, func: &Function, out: &mut String) -> SqlResult<()> {
        if func.is_polymorphic() && !self.dialect.infers_polymorphic_params {
            if let Some(index) = func.args().position(|arg| matches!(arg, Expr::Value(_))) {
                return Err(SqlError::IndeterminateType {
                    function: func.name().to_string(),
                    position: index + 1,
                });
            }
        }

        if func.cast_type().is_some() {
            out.push_str("CAST(");
        }
        match func.call_body() {
            Call::Args(args) => {
                out.push_str(func.name());
                out.push('(');
                if func.is_distinct() {
                    out.push_str("DISTINCT ");
                }
                self.expr_list(args, out)?;
                out.push(')');
            }
            Call::JsonObject(entries) => self.json_object(entries, out)?,
        }
        if let Some(filter) = func.filter_condition() {
            self.dialect.require(Feature::AggregateFilter)?;
            out.push_str(" FILTER (WHERE ");
            self.condition(filter, out)?;
            out.push(')');
        }
        match func.over_clause() {
            Some(Over::Named(name)) => {
                self.dialect.require(Feature::NamedWindow)?;
                out.push_str(" OVER ");
                self.dialect.write_ident(out, name);
            }
            Some(Over::Window(window)) => {
                out.push_str(" OVER (");
                self.window_spec(window, func.is_ranking(), out)?;
                out.push(')');
            }
            None => {}
        }
        if let Some(ty) = func.cast_type() {
            out.push_str(" AS ");
            out.push_str(ty);
            out.push(')');
        }
        Ok(())
    }

    fn json_object(&mut self, entries: &[(String, Expr)], out: &mut String) -> SqlResult<()> {
        self.dialect.require(Feature::JsonObject)?;
        let (name, separator) = match self.dialect.json_object {
            JsonObjectStyle::Pairs(name) => (name, ", "),
            JsonObjectStyle::Colon => ("JSON_OBJECT", ": "),
            JsonObjectStyle::KeyValue => ("JSON_OBJECT", " VALUE "),
            JsonObjectStyle::Unsupported => {
                return Err(SqlError::unsupported(Feature::JsonObject, self.dialect.vendor));
            }
        };
        out.push_str(name);
        out.push('(');
        for (i, (key, value)) in entries.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&quote_literal(key));
            out.push_str(separator);
            self.expr(value, out)?;
        }
        out.push(')');
        Ok(())
    }

    /// Body of `OVER (...)` or `WINDOW w AS (...)`.
    pub(super) fn window_spec(&mut self, window: &Window, ranking: bool, out: &mut String) -> SqlResult<()> {
        let start = out.len();
        if !window.partition_by.is_empty() {
            out.push_str("PARTITION BY ");
            self.expr_list(&window.partition_by, out)?;
        }
        if !window.order_by.is_empty() {
            if out.len() > start {
                out.push(' ');
            }
            out.push_str("ORDER BY ");
            self.order_list(&window.order_by, out)?;
        } else if let Some(default) = self.dialect.ranking_default_order.filter(|_| ranking) {
            if out.len() > start {
                out.push(' ');
            }
            out.push_str("ORDER BY ");
            out.push_str(default);
        }
        if let Some(frame) = &window.frame {
            if out.len() > start {
                out.push(' ');
            }
            out.push_str(match frame.unit {
                FrameUnit::Rows => "ROWS BETWEEN ",
                FrameUnit::Range => "RANGE BETWEEN ",
            });
            out.push_str(&frame.start.to_sql());
            out.push_str(" AND ");
            out.push_str(&frame.end.to_sql());
        }
        Ok(())
    }

    pub(super) fn order_list(&mut self, items: &[OrderBy], out: &mut String) -> SqlResult<()> {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.expr(&item.expr, out)?;
            out.push_str(match item.direction {
                Direction::Asc => " ASC",
                Direction::Desc => " DESC",
            });
            if let Some(nulls) = item.nulls {
                self.dialect.require(Feature::NullsOrdering)?;
                out.push_str(match nulls {
                    Nulls::First => " NULLS FIRST",
                    Nulls::Last => " NULLS LAST",
                });
            }
        }
        Ok(())
    }
}

/// `$.a[0]."b c"` for path-function dialects.
fn json_path(path: &[PathStep]) -> String {
    let mut out = String::from("$");
    for step in path {
        match step {
            PathStep::Key(key) if is_plain_key(key) => {
                out.push('.');
                out.push_str(key);
            }
            PathStep::Key(key) => {
                out.push_str(".\"");
                out.push_str(&key.replace('"', "\\\""));
                out.push('"');
            }
            PathStep::Index(index) => {
                out.push('[');
                out.push_str(&index.to_string());
                out.push(']');
            }
        }
    }
    out
}

fn is_plain_key(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_path_literals() {
        let path = [
            PathStep::Key("a".into()),
            PathStep::Index(0),
            PathStep::Key("b c".into()),
        ];
        assert_eq!(json_path(&path), r#"$.a[0]."b c""#);
    }

    #[test]
    fn plain_keys() {
        assert!(is_plain_key("user_id"));
        assert!(!is_plain_key("1st"));
        assert!(!is_plain_key(""));
    }
}
