//! Monthly aggregation of request records into chart series points

use chrono::{Datelike, NaiveDate, TimeZone};
use dashboard_chart_shared::SeriesPoint;
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::{DataError, DataResult, RequestRecord, RequestStatus};

#[derive(Debug, Default, Clone, Copy)]
struct MonthlyCounts {
    total: u64,
    success: u64,
    failure: u64,
    processing: u64,
}

impl MonthlyCounts {
    fn record(&mut self, status: Option<RequestStatus>) {
        self.total += 1;
        match status {
            Some(RequestStatus::Success) => self.success += 1,
            Some(RequestStatus::Failure) => self.failure += 1,
            Some(RequestStatus::Processing) => self.processing += 1,
            None => {}
        }
    }
}

/// Group records by calendar month, with each timestamp read in `zone`.
///
/// Points come out in ascending month order, one per month that has at
/// least one record. Labels use the first day of the month rendered with
/// `label_format` (a chrono strftime string such as `%Y/%m`).
pub fn aggregate_monthly<Z: TimeZone>(
    records: &[RequestRecord],
    zone: &Z,
    label_format: &str,
) -> DataResult<Vec<SeriesPoint>> {
    let mut months: BTreeMap<(i32, u32), MonthlyCounts> = BTreeMap::new();

    for record in records {
        let local = record.timestamp.with_timezone(zone);
        months
            .entry((local.year(), local.month()))
            .or_default()
            .record(record.status);
    }

    months
        .into_iter()
        .map(|((year, month), counts)| {
            Ok(SeriesPoint {
                date: Some(month_label(year, month, label_format)?),
                total: Some(counts.total as f64),
                sucesso: Some(counts.success as f64),
                falha: Some(counts.failure as f64),
                processando: Some(counts.processing as f64),
            })
        })
        .collect()
}

fn month_label(year: i32, month: u32, label_format: &str) -> DataResult<String> {
    let invalid = || DataError::LabelFormat {
        format: label_format.to_string(),
    };
    let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;

    // Display on an invalid strftime string fails instead of printing
    let mut label = String::new();
    write!(label, "{}", first_day.format(label_format)).map_err(|_| invalid())?;
    Ok(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn fortaleza() -> FixedOffset {
        FixedOffset::west_opt(3 * 3600).unwrap()
    }

    fn record(y: i32, m: u32, d: u32, status: Option<RequestStatus>) -> RequestRecord {
        RequestRecord::new(Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap(), status)
    }

    #[test]
    fn test_groups_by_month_in_order() {
        let records = vec![
            record(2024, 3, 2, Some(RequestStatus::Success)),
            record(2023, 12, 31, Some(RequestStatus::Failure)),
            record(2024, 3, 20, Some(RequestStatus::Processing)),
            record(2024, 1, 15, Some(RequestStatus::Success)),
        ];

        let series = aggregate_monthly(&records, &Utc, "%Y/%m").unwrap();
        let labels: Vec<_> = series.iter().map(|p| p.date.clone().unwrap()).collect();

        assert_eq!(labels, ["2023/12", "2024/01", "2024/03"]);
        assert_eq!(series[2], SeriesPoint::new("2024/03", 2.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn test_undefined_status_counts_toward_total_only() {
        let records = vec![
            record(2024, 5, 1, None),
            record(2024, 5, 2, Some(RequestStatus::Success)),
        ];

        let series = aggregate_monthly(&records, &Utc, "%Y/%m").unwrap();
        assert_eq!(series, vec![SeriesPoint::new("2024/05", 2.0, 1.0, 0.0, 0.0)]);
    }

    #[test]
    fn test_empty_records() {
        assert!(aggregate_monthly(&[], &Utc, "%Y/%m").unwrap().is_empty());
    }

    #[test]
    fn test_custom_label_format() {
        let series = aggregate_monthly(&[record(2024, 7, 9, None)], &Utc, "%m/%Y").unwrap();
        assert_eq!(series[0].date.as_deref(), Some("07/2024"));
    }

    #[test]
    fn test_invalid_label_format() {
        let err = aggregate_monthly(&[record(2024, 7, 9, None)], &Utc, "%Q").unwrap_err();
        assert!(matches!(err, DataError::LabelFormat { .. }));
    }

    #[test]
    fn test_month_boundary_follows_local_offset() {
        // 01:00 UTC on Feb 1st is still Jan 31st at -03:00
        let early = RequestRecord::new(
            Utc.with_ymd_and_hms(2024, 2, 1, 1, 0, 0).unwrap(),
            Some(RequestStatus::Success),
        );
        let later = RequestRecord::new(
            Utc.with_ymd_and_hms(2024, 2, 1, 3, 0, 0).unwrap(),
            Some(RequestStatus::Failure),
        );

        let series = aggregate_monthly(&[early.clone(), later.clone()], &fortaleza(), "%Y/%m").unwrap();
        assert_eq!(
            series,
            vec![
                SeriesPoint::new("2024/01", 1.0, 1.0, 0.0, 0.0),
                SeriesPoint::new("2024/02", 1.0, 0.0, 1.0, 0.0),
            ]
        );

        let series = aggregate_monthly(&[early, later], &Utc, "%Y/%m").unwrap();
        assert_eq!(series, vec![SeriesPoint::new("2024/02", 2.0, 1.0, 1.0, 0.0)]);
    }
}
