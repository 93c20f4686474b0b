//! Delivery-day timecards.
//!
//! A timecard records one worker's shift during a delivery event. The
//! composite identity is (uid, delivery id, time in); clock values are
//! stored as `HH:MM:SS` text.

use sea_orm::QueryResult;

use crate::ResultEngine;
use crate::fields::{FieldSpec, RowReader};

pub(crate) const TABLE: &str = "delivery_timecards";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timecard {
    pub uid: String,
    pub delivery_id: i64,
    pub last_modified_time: Option<String>,
    pub time_in: String,
    pub time_out: String,
    pub time_total: String,
}

impl Timecard {
    /// A zero-duration card is deleted-and-not-reinserted on write.
    pub(crate) fn is_zero_duration(&self) -> bool {
        self.time_total.is_empty() || self.time_total == "00:00:00"
    }
}

pub(crate) const FIELDS: &[FieldSpec] = &[
    FieldSpec::map("id", &["uid"]),
    FieldSpec::map("deliveryId", &["delivery_id"]),
    FieldSpec::map("lastModifiedTime", &["last_modified_time"]),
    FieldSpec::map("timeIn", &["time_in"]),
    FieldSpec::map("timeOut", &["time_out"]),
    FieldSpec::map("timeTotal", &["time_total"]),
];

pub(crate) fn from_row(fields: &[&'static str], row: &QueryResult) -> ResultEngine<Timecard> {
    let mut reader = RowReader::new(row);
    let mut card = Timecard::default();
    for field in fields {
        match *field {
            "id" => card.uid = reader.next()?,
            "deliveryId" => card.delivery_id = reader.next()?,
            "lastModifiedTime" => card.last_modified_time = reader.next()?,
            "timeIn" => card.time_in = reader.next()?,
            "timeOut" => card.time_out = reader.next()?,
            "timeTotal" => card.time_total = reader.next()?,
            other => unreachable!("unmapped timecard field {other}"),
        }
    }
    Ok(card)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_duration_detection() {
        let mut card = Timecard::default();
        assert!(card.is_zero_duration());
        card.time_total = "00:00:00".to_string();
        assert!(card.is_zero_duration());
        card.time_total = "01:15:00".to_string();
        assert!(!card.is_zero_duration());
    }
}
