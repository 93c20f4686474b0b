//! Declarative field/column mapping.
//!
//! Each entity module declares one table of [`FieldSpec`]s; [`project`] is
//! the single generic function that turns a requested field list into
//! column expressions. Keeping the mapping declarative makes projection
//! completeness mechanically checkable instead of being spread across
//! hand-written switch arms.

use sea_orm::QueryResult;

use crate::{EngineError, ResultEngine};

/// Mapping of one external field name to its physical columns.
pub(crate) struct FieldSpec {
    /// External field name as the query layer requests it.
    pub name: &'static str,
    /// Column expressions, in the fixed order hydration consumes them.
    pub columns: &'static [&'static str],
    /// Join clause attached to the statement when this field is selected.
    pub join: Option<&'static str>,
    /// Deliberately handled by a separate resolver path; selecting it is
    /// not an error, it is simply not projected here.
    pub skip: bool,
}

impl FieldSpec {
    pub(crate) const fn map(name: &'static str, columns: &'static [&'static str]) -> Self {
        Self {
            name,
            columns,
            join: None,
            skip: false,
        }
    }

    pub(crate) const fn joined(
        name: &'static str,
        columns: &'static [&'static str],
        join: &'static str,
    ) -> Self {
        Self {
            name,
            columns,
            join: Some(join),
            skip: false,
        }
    }

    pub(crate) const fn skipped(name: &'static str) -> Self {
        Self {
            name,
            columns: &[],
            join: None,
            skip: true,
        }
    }
}

/// Result of resolving a requested field list against a mapping table.
#[derive(Debug, Default)]
pub(crate) struct Projection {
    /// Resolved field names, selection order kept, skip-listed names removed.
    pub fields: Vec<&'static str>,
    /// Column expressions in hydration order.
    pub columns: Vec<&'static str>,
    pub join: Option<&'static str>,
}

impl Projection {
    pub(crate) fn column_list(&self) -> String {
        self.columns.join(", ")
    }

    pub(crate) fn join_clause(&self) -> &'static str {
        self.join.unwrap_or("")
    }
}

/// Resolves `selected` against `specs`.
///
/// Pure function, consulted once to build the SELECT list and once per row
/// for hydration. An unrecognized name fails with
/// [`EngineError::UnknownField`] naming the field.
pub(crate) fn project(specs: &'static [FieldSpec], selected: &[String]) -> ResultEngine<Projection> {
    let mut projection = Projection::default();
    for name in selected {
        let spec = specs
            .iter()
            .find(|s| s.name == name.as_str())
            .ok_or_else(|| EngineError::UnknownField(name.clone()))?;
        if spec.skip {
            continue;
        }
        projection.fields.push(spec.name);
        projection.columns.extend_from_slice(spec.columns);
        if spec.join.is_some() {
            projection.join = spec.join;
        }
    }
    Ok(projection)
}

/// Sequential reader over one result row.
///
/// Scan targets cannot be reused across rows, so hydration builds a fresh
/// reader per row and consumes columns in projection order.
pub(crate) struct RowReader<'a> {
    row: &'a QueryResult,
    idx: usize,
}

impl<'a> RowReader<'a> {
    pub(crate) fn new(row: &'a QueryResult) -> Self {
        Self { row, idx: 0 }
    }

    pub(crate) fn next<T: sea_orm::TryGetable>(&mut self) -> ResultEngine<T> {
        let value = self.row.try_get_by_index::<T>(self.idx)?;
        self.idx += 1;
        Ok(value)
    }
}
