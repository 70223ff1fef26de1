//! Parameterized insert/upsert builder
//!
//! Values are bound through positional placeholders (`$1`, `$2`, ...) so no
//! caller-supplied text is ever spliced into SQL. Constant columns (status
//! literals, `NULL`, fixed flags) are written inline. [`Statement::render`]
//! produces a display copy with every placeholder replaced by a quoted,
//! formatted literal.

use serde::{Deserialize, Serialize};

use super::format::{format_grouped, format_money, format_number};

/// A value bound to a placeholder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SqlValue {
    Text(String),
    /// Monetary figure, rendered at two decimals
    Money(f64),
    /// Price-like quantity, rendered with thousands grouping
    Quantity(f64),
    /// Rate or other plain number
    Number(f64),
    Integer(i64),
    Bool(bool),
    /// RFC 3339 timestamp
    Timestamp(String),
    Null,
}

impl SqlValue {
    /// SQL literal for display rendering
    pub fn render(&self, grouping: char) -> String {
        match self {
            SqlValue::Text(s) | SqlValue::Timestamp(s) => quote(s),
            SqlValue::Money(v) => format_money(*v),
            SqlValue::Quantity(v) => format_grouped(*v, grouping),
            SqlValue::Number(v) => format_number(*v),
            SqlValue::Integer(v) => v.to_string(),
            SqlValue::Bool(b) => b.to_string(),
            SqlValue::Null => "NULL".to_string(),
        }
    }
}

/// Single-quoted SQL string literal with embedded quotes doubled
fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// A statement with positional placeholders and its bound values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl Statement {
    /// Inline every placeholder as a formatted literal
    ///
    /// # Example
    /// ```
    /// use commission_engine_core_rs::statements::{InsertBuilder, SqlValue};
    ///
    /// let stmt = InsertBuilder::new("notes")
    ///     .bind("author", SqlValue::Text("O'Neil".to_string()))
    ///     .bind("price", SqlValue::Quantity(1_250_000.0))
    ///     .literal("deleted_at", "NULL")
    ///     .build();
    ///
    /// assert_eq!(stmt.sql, "INSERT INTO notes (\n  author, price, deleted_at\n) VALUES (\n  $1, $2, NULL\n);");
    /// assert_eq!(
    ///     stmt.render('_'),
    ///     "INSERT INTO notes (\n  author, price, deleted_at\n) VALUES (\n  'O''Neil', 1_250_000, NULL\n);"
    /// );
    /// ```
    pub fn render(&self, grouping: char) -> String {
        let mut out = String::with_capacity(self.sql.len() * 2);
        let mut chars = self.sql.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch != '$' {
                out.push(ch);
                continue;
            }

            let mut digits = String::new();
            while let Some(d) = chars.peek().copied().filter(char::is_ascii_digit) {
                digits.push(d);
                chars.next();
            }

            let param = digits
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|idx| self.params.get(idx));
            match param {
                Some(value) => out.push_str(&value.render(grouping)),
                None => {
                    out.push('$');
                    out.push_str(&digits);
                }
            }
        }

        out
    }

    /// Columns named in the insert list, in order
    pub fn columns(&self) -> Vec<&str> {
        let start = match self.sql.find('(') {
            Some(idx) => idx + 1,
            None => return Vec::new(),
        };
        let end = match self.sql[start..].find(')') {
            Some(idx) => start + idx,
            None => return Vec::new(),
        };
        self.sql[start..end].split(',').map(str::trim).collect()
    }
}

#[derive(Debug, Clone)]
enum ColumnValue {
    Param(usize),
    Literal(&'static str),
}

#[derive(Debug, Clone)]
enum Assignment {
    /// `col = table.col + <insert value of col>`
    Increment(&'static str),
    /// `col = <insert value of col>`
    Replace(&'static str),
}

/// Builder for `INSERT ... VALUES ...` with an optional
/// `ON CONFLICT (...) DO UPDATE SET` clause
#[derive(Debug, Clone)]
pub struct InsertBuilder {
    table: String,
    columns: Vec<(&'static str, ColumnValue)>,
    params: Vec<SqlValue>,
    conflict_keys: Vec<&'static str>,
    assignments: Vec<Assignment>,
}

impl InsertBuilder {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            params: Vec::new(),
            conflict_keys: Vec::new(),
            assignments: Vec::new(),
        }
    }

    /// Column bound to a placeholder
    pub fn bind(mut self, column: &'static str, value: SqlValue) -> Self {
        self.params.push(value);
        self.columns.push((column, ColumnValue::Param(self.params.len())));
        self
    }

    /// Column with a constant SQL literal
    pub fn literal(mut self, column: &'static str, sql: &'static str) -> Self {
        self.columns.push((column, ColumnValue::Literal(sql)));
        self
    }

    pub fn on_conflict(mut self, keys: &[&'static str]) -> Self {
        self.conflict_keys = keys.to_vec();
        self
    }

    /// On conflict, add this row's value to the stored one
    pub fn increment(mut self, column: &'static str) -> Self {
        self.assignments.push(Assignment::Increment(column));
        self
    }

    /// On conflict, overwrite the stored value with this row's value
    pub fn replace(mut self, column: &'static str) -> Self {
        self.assignments.push(Assignment::Replace(column));
        self
    }

    pub fn build(self) -> Statement {
        let names: Vec<&str> = self.columns.iter().map(|(name, _)| *name).collect();
        let values: Vec<String> = self
            .columns
            .iter()
            .map(|(_, value)| self.value_sql(value))
            .collect();

        let mut sql = format!(
            "INSERT INTO {} (\n  {}\n) VALUES (\n  {}\n)",
            self.table,
            names.join(", "),
            values.join(", ")
        );

        if !self.conflict_keys.is_empty() {
            sql.push_str(&format!(
                " ON CONFLICT ({}) DO UPDATE SET",
                self.conflict_keys.join(", ")
            ));
            let sets: Vec<String> = self
                .assignments
                .iter()
                .map(|assignment| self.assignment_sql(assignment))
                .collect();
            sql.push_str("\n  ");
            sql.push_str(&sets.join(",\n  "));
        }
        sql.push(';');

        Statement {
            sql,
            params: self.params,
        }
    }

    fn value_sql(&self, value: &ColumnValue) -> String {
        match value {
            ColumnValue::Param(n) => format!("${}", n),
            ColumnValue::Literal(sql) => sql.to_string(),
        }
    }

    /// SQL for the insert value of `column`; `NULL` if the column is unknown
    fn column_value_sql(&self, column: &str) -> String {
        self.columns
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| self.value_sql(value))
            .unwrap_or_else(|| "NULL".to_string())
    }

    fn assignment_sql(&self, assignment: &Assignment) -> String {
        match assignment {
            Assignment::Increment(column) => format!(
                "{col} = {table}.{col} + {value}",
                col = column,
                table = self.table,
                value = self.column_value_sql(column)
            ),
            Assignment::Replace(column) => {
                format!("{} = {}", column, self.column_value_sql(column))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_digit_placeholders_render() {
        let mut builder = InsertBuilder::new("t");
        let names = [
            "c1", "c2", "c3", "c4", "c5", "c6", "c7", "c8", "c9", "c10", "c11",
        ];
        for (i, name) in names.iter().enumerate() {
            builder = builder.bind(*name, SqlValue::Integer(i as i64 + 1));
        }
        let stmt = builder.build();

        assert!(stmt.sql.contains("$10, $11"));
        assert!(stmt.render('_').contains("9, 10, 11"));
    }

    #[test]
    fn test_upsert_reuses_insert_placeholder() {
        let stmt = InsertBuilder::new("wallets")
            .bind("agent_id", SqlValue::Text("a".to_string()))
            .bind("total", SqlValue::Quantity(5.0))
            .bind("updated_at", SqlValue::Timestamp("t".to_string()))
            .on_conflict(&["agent_id"])
            .increment("total")
            .replace("updated_at")
            .build();

        assert!(stmt.sql.ends_with(
            ") ON CONFLICT (agent_id) DO UPDATE SET\n  total = wallets.total + $2,\n  updated_at = $3;"
        ));
        assert_eq!(stmt.params.len(), 3);
    }

    #[test]
    fn test_injection_attempt_stays_quoted() {
        let stmt = InsertBuilder::new("t")
            .bind("name", SqlValue::Text("x'); DROP TABLE t; --".to_string()))
            .build();

        assert_eq!(stmt.params[0], SqlValue::Text("x'); DROP TABLE t; --".to_string()));
        assert!(stmt.render('_').contains("'x''); DROP TABLE t; --'"));
    }

    #[test]
    fn test_dollar_inside_text_value_not_reinterpreted() {
        let stmt = InsertBuilder::new("t")
            .bind("a", SqlValue::Text("$2".to_string()))
            .bind("b", SqlValue::Integer(7))
            .build();
        assert!(stmt.render('_').contains("'$2', 7"));
    }

    #[test]
    fn test_columns_listed_in_order() {
        let stmt = InsertBuilder::new("t")
            .bind("a", SqlValue::Null)
            .literal("b", "true")
            .build();
        assert_eq!(stmt.columns(), vec!["a", "b"]);
    }
}
