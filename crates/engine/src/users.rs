//! Seller accounts.
//!
//! The user projection is the one place the generic mapping table does not
//! fit: `name` is synthesized from first and last name, so selecting it
//! pulls both underlying columns, and selecting overlapping fields must not
//! select a column twice. The projection here dedups while keeping
//! first-seen column order.

use sea_orm::QueryResult;

use crate::query::WriteRow;
use crate::util;
use crate::{EngineError, ResultEngine};

pub(crate) const TABLE: &str = "users";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct User {
    pub id: String,
    pub group: String,
    pub first_name: String,
    pub last_name: String,
    /// Synthesized full name, present only when `name` was selected.
    pub name: Option<String>,
    pub has_auth_creds: Option<bool>,
}

#[derive(Debug)]
pub(crate) struct UserProjection {
    pub columns: Vec<&'static str>,
    pub wants_name: bool,
}

pub(crate) fn project(selected: &[String]) -> ResultEngine<UserProjection> {
    fn push(columns: &mut Vec<&'static str>, column: &'static str) {
        if !columns.contains(&column) {
            columns.push(column);
        }
    }

    let mut columns = Vec::new();
    let mut wants_name = false;
    for field in selected {
        match field.as_str() {
            "id" => push(&mut columns, "id"),
            "group" => push(&mut columns, "group_id"),
            "firstName" => push(&mut columns, "first_name"),
            "lastName" => push(&mut columns, "last_name"),
            "name" => {
                wants_name = true;
                push(&mut columns, "first_name");
                push(&mut columns, "last_name");
            }
            "hasAuthCreds" => push(&mut columns, "has_auth_creds"),
            other => return Err(EngineError::UnknownField(other.to_string())),
        }
    }
    if columns.is_empty() {
        columns.push("id");
    }
    Ok(UserProjection {
        columns,
        wants_name,
    })
}

pub(crate) fn from_row(projection: &UserProjection, row: &QueryResult) -> ResultEngine<User> {
    let mut user = User::default();
    for (idx, column) in projection.columns.iter().enumerate() {
        match *column {
            "id" => user.id = row.try_get_by_index(idx)?,
            "group_id" => {
                user.group = row
                    .try_get_by_index::<Option<String>>(idx)?
                    .unwrap_or_default();
            }
            "first_name" => user.first_name = row.try_get_by_index(idx)?,
            "last_name" => user.last_name = row.try_get_by_index(idx)?,
            "has_auth_creds" => user.has_auth_creds = row.try_get_by_index(idx)?,
            other => unreachable!("unmapped user column {other}"),
        }
    }
    if projection.wants_name {
        user.name = Some(format!("{} {}", user.first_name, user.last_name));
    }
    Ok(user)
}

/// Columns and bind values for writing one user.
///
/// Identity fields and the created timestamp are written only on insert;
/// `has_auth_creds` changes only on update. The group and the modified
/// timestamp move both ways.
pub(crate) fn write_row(user: &User, is_update: bool) -> WriteRow {
    let now = util::now_rfc3339();
    let mut row = WriteRow::new();
    if is_update {
        row.set_opt_bool("has_auth_creds", user.has_auth_creds);
    } else {
        row.set_text_if("id", &user.id);
        row.set_text_if("first_name", &user.first_name);
        row.set_text_if("last_name", &user.last_name);
        row.set("has_auth_creds", false);
        row.set("created_time", now.clone());
    }
    row.set_text_if("group_id", &user.group);
    row.set("last_modified_time", now);
    row
}
