//! Ordering of display records by the active sort criterion.
//!
//! Two criteria exist: ascending by title and descending by publication time.
//! Both sorts are stable, so records with equal keys keep their API order.
//!
//! Records without a timestamp need a key when sorting by date. By default
//! they are keyed as "now", which places them in front of every dated record
//! in a descending sort. [`MissingDatetime::Last`] sorts them to the end
//! instead.

use super::document::DisplayRecord;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::cmp::Ordering;

/// Active ordering key for the displayed list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortCriterion {
    /// Ascending lexicographic by title. Missing titles sort first.
    #[default]
    ByTitle,
    /// Descending by publication time (most recent first).
    ByDatetime,
}

impl SortCriterion {
    /// Short label for headers and logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ByTitle => "Title",
            Self::ByDatetime => "Datetime",
        }
    }
}

/// Placement of records without a timestamp in a date sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingDatetime {
    /// Treat a missing timestamp as the moment of sorting.
    #[default]
    Now,
    /// Place records without a timestamp after all dated records.
    Last,
}

/// Returns a new vector with `records` ordered by `criterion`.
///
/// # Examples
///
/// ```
/// use blogsearch::domain::{sort_records, DisplayRecord, MissingDatetime, SortCriterion};
///
/// let record = |title: &str| DisplayRecord {
///     thumbnail_url: None,
///     name: None,
///     title: Some(title.to_string()),
///     datetime: None,
/// };
///
/// let sorted = sort_records(
///     &[record("b"), record("a")],
///     SortCriterion::ByTitle,
///     MissingDatetime::Now,
/// );
/// assert_eq!(sorted[0].title.as_deref(), Some("a"));
/// ```
#[must_use]
pub fn sort_records(
    records: &[DisplayRecord],
    criterion: SortCriterion,
    missing: MissingDatetime,
) -> Vec<DisplayRecord> {
    sort_records_at(records, criterion, missing, Utc::now())
}

/// Same as [`sort_records`] with an explicit "now" for missing timestamps.
#[must_use]
pub fn sort_records_at(
    records: &[DisplayRecord],
    criterion: SortCriterion,
    missing: MissingDatetime,
    now: DateTime<Utc>,
) -> Vec<DisplayRecord> {
    let _span = tracing::trace_span!("sort_records",
        count = records.len(),
        criterion = ?criterion
    )
    .entered();

    let mut sorted = records.to_vec();
    match criterion {
        SortCriterion::ByTitle => {
            sorted.sort_by(|a, b| a.title_key().cmp(b.title_key()));
        }
        SortCriterion::ByDatetime => {
            sorted.sort_by(|a, b| compare_datetime_desc(a, b, missing, now));
        }
    }
    sorted
}

fn compare_datetime_desc(
    a: &DisplayRecord,
    b: &DisplayRecord,
    missing: MissingDatetime,
    now: DateTime<Utc>,
) -> Ordering {
    match missing {
        MissingDatetime::Now => {
            let key_a = a.datetime.unwrap_or(now);
            let key_b = b.datetime.unwrap_or(now);
            key_b.cmp(&key_a)
        }
        MissingDatetime::Last => match (a.datetime, b.datetime) {
            (Some(key_a), Some(key_b)) => key_b.cmp(&key_a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn record(name: &str, title: Option<&str>, datetime: Option<DateTime<Utc>>) -> DisplayRecord {
        DisplayRecord {
            thumbnail_url: None,
            name: Some(name.to_string()),
            title: title.map(str::to_string),
            datetime,
        }
    }

    fn names(records: &[DisplayRecord]) -> Vec<&str> {
        records.iter().filter_map(|r| r.name.as_deref()).collect()
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 1, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn title_sort_is_ascending_and_stable() {
        let records = vec![
            record("r0", Some("b"), None),
            record("r1", Some("a"), None),
            record("r2", Some("a"), None),
        ];

        let sorted = sort_records(&records, SortCriterion::ByTitle, MissingDatetime::Now);
        assert_eq!(names(&sorted), ["r1", "r2", "r0"]);
    }

    #[test]
    fn missing_title_sorts_first() {
        let records = vec![
            record("titled", Some("alpha"), None),
            record("untitled", None, None),
        ];

        let sorted = sort_records(&records, SortCriterion::ByTitle, MissingDatetime::Now);
        assert_eq!(names(&sorted), ["untitled", "titled"]);
    }

    #[test]
    fn datetime_sort_is_descending() {
        let records = vec![
            record("older", Some("x"), Some(day(1))),
            record("newer", Some("y"), Some(day(2))),
        ];

        let sorted = sort_records(&records, SortCriterion::ByDatetime, MissingDatetime::Now);
        assert_eq!(names(&sorted), ["newer", "older"]);
    }

    #[test]
    fn datetime_sort_is_stable_for_equal_keys() {
        let records = vec![
            record("first", None, Some(day(3))),
            record("second", None, Some(day(3))),
            record("third", None, Some(day(3))),
        ];

        let sorted = sort_records(&records, SortCriterion::ByDatetime, MissingDatetime::Last);
        assert_eq!(names(&sorted), ["first", "second", "third"]);
    }

    #[rstest]
    #[case(MissingDatetime::Now, ["undated", "newer", "older"])]
    #[case(MissingDatetime::Last, ["newer", "older", "undated"])]
    fn missing_datetime_policy(#[case] policy: MissingDatetime, #[case] expected: [&str; 3]) {
        let records = vec![
            record("older", None, Some(day(1))),
            record("undated", None, None),
            record("newer", None, Some(day(2))),
        ];

        let sorted = sort_records_at(&records, SortCriterion::ByDatetime, policy, day(20));
        assert_eq!(names(&sorted), expected);
    }

    #[test]
    fn future_dated_record_beats_missing_as_now() {
        let records = vec![
            record("undated", None, None),
            record("scheduled", None, Some(day(25))),
        ];

        let sorted = sort_records_at(
            &records,
            SortCriterion::ByDatetime,
            MissingDatetime::Now,
            day(20),
        );
        assert_eq!(names(&sorted), ["scheduled", "undated"]);
    }

    #[test]
    fn sorting_leaves_input_untouched() {
        let records = vec![record("b", Some("b"), None), record("a", Some("a"), None)];
        let _ = sort_records(&records, SortCriterion::ByTitle, MissingDatetime::Now);
        assert_eq!(names(&records), ["b", "a"]);
    }
}
