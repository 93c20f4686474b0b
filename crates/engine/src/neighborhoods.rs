//! Neighborhood reference records.

use sea_orm::QueryResult;

use crate::ResultEngine;
use crate::fields::{FieldSpec, RowReader};
use crate::query::WriteRow;
use crate::util;

pub(crate) const TABLE: &str = "neighborhoods";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Neighborhood {
    pub name: String,
    pub zipcode: Option<i64>,
    pub city: Option<String>,
    pub is_visible: Option<bool>,
    pub distribution_point: Option<String>,
}

pub(crate) const FIELDS: &[FieldSpec] = &[
    FieldSpec::map("name", &["name"]),
    FieldSpec::map("zipcode", &["zipcode"]),
    FieldSpec::map("city", &["city"]),
    FieldSpec::map("isVisible", &["is_visible"]),
    FieldSpec::map("distributionPoint", &["dist_pt"]),
];

pub(crate) fn from_row(fields: &[&'static str], row: &QueryResult) -> ResultEngine<Neighborhood> {
    let mut reader = RowReader::new(row);
    let mut hood = Neighborhood::default();
    for field in fields {
        match *field {
            "name" => hood.name = reader.next()?,
            "zipcode" => hood.zipcode = reader.next()?,
            "city" => hood.city = reader.next()?,
            "isVisible" => hood.is_visible = reader.next()?,
            "distributionPoint" => hood.distribution_point = reader.next()?,
            other => unreachable!("unmapped neighborhood field {other}"),
        }
    }
    Ok(hood)
}

/// Columns and bind values for writing one neighborhood. The name is only
/// written on insert; updates address the row through their WHERE clause.
pub(crate) fn write_row(hood: &Neighborhood, is_update: bool) -> WriteRow {
    let mut row = WriteRow::new();
    if !is_update {
        row.set_text_if("name", &hood.name);
    }
    row.set_opt_i64("zipcode", hood.zipcode);
    row.set_opt_text("city", hood.city.as_deref());
    row.set_opt_text("dist_pt", hood.distribution_point.as_deref());
    row.set_opt_bool("is_visible", hood.is_visible);
    row.set("last_modified_time", util::now_rfc3339());
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_rows_omit_the_name_column() {
        let hood = Neighborhood {
            name: "Avondale".to_string(),
            city: Some("Gotham".to_string()),
            ..Neighborhood::default()
        };
        let insert = write_row(&hood, false);
        assert!(insert.insert_sql(TABLE).contains("name"));
        let update = write_row(&hood, true);
        assert_eq!(
            update.update_sql(TABLE, "where name = ?"),
            "update neighborhoods set city = ?, last_modified_time = ? where name = ?"
        );
    }
}
