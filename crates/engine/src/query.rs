//! Parameterized write-statement assembly.
//!
//! A [`WriteRow`] is an ordered `(column, bound value)` list built by
//! walking an entity's fields in a fixed order, omitting fields that are
//! unset. Entities append through the typed `set_*` helpers so the
//! unset-skipping and zero-money rules live in exactly one place.

use rust_decimal::Decimal;
use sea_orm::Value;

/// Ordered columns and bind values for one INSERT or UPDATE.
#[derive(Debug, Default)]
pub(crate) struct WriteRow {
    columns: Vec<&'static str>,
    values: Vec<Value>,
}

impl WriteRow {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends a column unconditionally.
    pub(crate) fn set(&mut self, column: &'static str, value: impl Into<Value>) {
        self.columns.push(column);
        self.values.push(value.into());
    }

    /// Appends a text column unless the value is empty (empty ⇒ unset).
    pub(crate) fn set_text_if(&mut self, column: &'static str, value: &str) {
        if !value.is_empty() {
            self.set(column, value);
        }
    }

    /// Appends an optional text column when present.
    pub(crate) fn set_opt_text(&mut self, column: &'static str, value: Option<&str>) {
        if let Some(v) = value {
            self.set(column, v);
        }
    }

    /// Appends an optional integer column when present.
    pub(crate) fn set_opt_i64(&mut self, column: &'static str, value: Option<i64>) {
        if let Some(v) = value {
            self.set(column, v);
        }
    }

    /// Appends an optional boolean column when present.
    pub(crate) fn set_opt_bool(&mut self, column: &'static str, value: Option<bool>) {
        if let Some(v) = value {
            self.set(column, v);
        }
    }

    /// Appends a monetary column when present.
    ///
    /// An amount of exactly zero is written as SQL NULL: a collected amount
    /// of zero is indistinguishable from "not yet collected", and NULL is
    /// the canonical spelling for that state.
    pub(crate) fn set_money(&mut self, column: &'static str, value: Option<Decimal>) {
        match value {
            Some(amount) if amount.is_zero() => {
                self.columns.push(column);
                self.values.push(Value::String(None));
            }
            Some(amount) => self.set(column, amount.to_string()),
            None => {}
        }
    }

    /// `insert into {table}({cols}) values ({placeholders})`.
    pub(crate) fn insert_sql(&self, table: &str) -> String {
        let placeholders = vec!["?"; self.columns.len()].join(", ");
        format!(
            "insert into {table} ({}) values ({placeholders})",
            self.columns.join(", ")
        )
    }

    /// `update {table} set c1 = ?, c2 = ? {where_clause}`.
    pub(crate) fn update_sql(&self, table: &str, where_clause: &str) -> String {
        let assignments: Vec<String> =
            self.columns.iter().map(|c| format!("{c} = ?")).collect();
        let sql = format!("update {table} set {}", assignments.join(", "));
        if where_clause.is_empty() {
            sql
        } else {
            format!("{sql} {where_clause}")
        }
    }

    pub(crate) fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Values with one extra bind appended, for WHERE parameters.
    pub(crate) fn into_values_with(self, extra: impl Into<Value>) -> Vec<Value> {
        let mut values = self.values;
        values.push(extra.into());
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_fields_are_omitted() {
        let mut row = WriteRow::new();
        row.set("id", "o-1");
        row.set_text_if("comments", "");
        row.set_opt_i64("delivery_id", None);
        assert_eq!(row.insert_sql("orders"), "insert into orders (id) values (?)");
    }

    #[test]
    fn zero_money_binds_null() {
        let mut row = WriteRow::new();
        row.set_money("total_amount_collected", Some(Decimal::ZERO));
        row.set_money("cash_amount_collected", Some(Decimal::new(1050, 2)));
        row.set_money("check_amount_collected", None);

        let values = row.into_values();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0], Value::String(None));
        assert_eq!(values[1], Value::from("10.50"));
    }

    #[test]
    fn update_sql_lists_assignments_in_order() {
        let mut row = WriteRow::new();
        row.set("city", "Gotham");
        row.set("zipcode", 12345i64);
        assert_eq!(
            row.update_sql("neighborhoods", "where name = ?"),
            "update neighborhoods set city = ?, zipcode = ? where name = ?"
        );
    }
}
