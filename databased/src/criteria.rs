// SPDX-FileCopyrightText: 2025 databased contributors
// SPDX-License-Identifier: MIT

//! Match criteria used to select rows for reads, updates and deletes.

use crate::types::Value;

/// Comparison applied between a column and a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    /// Substring match (`LIKE '%value%'`). `%` and `_` in the value match
    /// themselves.
    Contains,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Op {
    fn as_sql(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Contains => "LIKE",
            Op::Lt => "<",
            Op::Le => "<=",
            Op::Gt => ">",
            Op::Ge => ">=",
        }
    }
}

/// A single column constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: String,
    pub op: Op,
    pub value: Value,
}

/// How conditions are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Combine {
    #[default]
    All,
    Any,
}

/// An ordered list of conditions, AND-combined unless built with
/// [`Criteria::any`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    conditions: Vec<Condition>,
    combine: Combine,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Criteria where a row matches when any condition holds.
    pub fn any() -> Self {
        Self {
            conditions: Vec::new(),
            combine: Combine::Any,
        }
    }

    pub fn with(mut self, column: impl Into<String>, op: Op, value: impl Into<Value>) -> Self {
        let value = value.into();
        let value = match op {
            Op::Contains => Value::Text(format!("%{}%", escape_like(&value.to_string()))),
            _ => value,
        };
        self.conditions.push(Condition {
            column: column.into(),
            op,
            value,
        });
        self
    }

    pub fn eq(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(column, Op::Eq, value)
    }

    pub fn contains(self, column: impl Into<String>, needle: impl Into<Value>) -> Self {
        self.with(column, Op::Contains, needle)
    }

    pub fn lt(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(column, Op::Lt, value)
    }

    pub fn le(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(column, Op::Le, value)
    }

    pub fn gt(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(column, Op::Gt, value)
    }

    pub fn ge(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(column, Op::Ge, value)
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Render the `WHERE` body with `?N` placeholders numbered from
    /// `first_param`, plus the values to bind in order.
    pub(crate) fn to_sql(&self, first_param: usize) -> (String, Vec<&Value>) {
        let joiner = match self.combine {
            Combine::All => " AND ",
            Combine::Any => " OR ",
        };
        let clause = self
            .conditions
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let escape = match c.op {
                    Op::Contains => r" ESCAPE '\'",
                    _ => "",
                };
                format!(
                    "{} {} ?{}{escape}",
                    quote_ident(&c.column),
                    c.op.as_sql(),
                    first_param + i
                )
            })
            .collect::<Vec<_>>()
            .join(joiner);
        let params = self.conditions.iter().map(|c| &c.value).collect();
        (format!("({clause})"), params)
    }
}

impl<C: Into<String>, V: Into<Value>> FromIterator<(C, V)> for Criteria {
    /// Equality constraints from `(column, value)` pairs.
    fn from_iter<I: IntoIterator<Item = (C, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Criteria::new(), |criteria, (column, value)| {
                criteria.eq(column, value)
            })
    }
}

/// Escape `LIKE` wildcards with a backslash.
fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Quote an SQL identifier, doubling embedded quotes.
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_clause_numbering() {
        let criteria = Criteria::new().eq("shape", "round").gt("numLegs", 3);
        let (sql, params) = criteria.to_sql(2);
        assert_eq!(sql, r#"("shape" = ?2 AND "numLegs" > ?3)"#);
        assert_eq!(params, [&Value::from("round"), &Value::Integer(3)]);
    }

    #[test]
    fn test_any_with_contains() {
        let criteria = Criteria::any().contains("a", "bir").contains("b", 7);
        let (sql, params) = criteria.to_sql(1);
        assert_eq!(sql, r#"("a" LIKE ?1 ESCAPE '\' OR "b" LIKE ?2 ESCAPE '\')"#);
        assert_eq!(params, [&Value::from("%bir%"), &Value::from("%7%")]);
    }

    #[test]
    fn test_contains_escapes_wildcards() {
        assert_eq!(escape_like("50%"), r"50\%");
        assert_eq!(escape_like(r"a_b\c"), r"a\_b\\c");
        let criteria = Criteria::new().contains("label", "50%");
        assert_eq!(criteria.conditions()[0].value, Value::from(r"%50\%%"));
    }

    #[test]
    fn test_from_pairs() {
        let criteria: Criteria = [("numLegs", 3)].into_iter().collect();
        assert_eq!(criteria.conditions().len(), 1);
        assert_eq!(criteria.conditions()[0].op, Op::Eq);
    }

    #[test]
    fn test_quote_ident_escapes() {
        assert_eq!(quote_ident("plain"), "\"plain\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }
}
