mod common;

use common::{date, raw_scene, score_grid};
use s2mosaic::{DateRange, Error, ImageCollection, Image};

/// A single month covers exactly that month
#[test]
fn test_single_month_window() {
    let range = DateRange::for_months(2024, 9, 9).unwrap();
    assert_eq!(range.start, date(2024, 9, 1));
    assert_eq!(range.end, date(2024, 10, 1));
    assert_eq!(range.days(), 30);
    assert_eq!(range.year(), 2024);
}

/// The end is exclusive, the start inclusive
#[test]
fn test_window_boundaries() {
    let range = DateRange::for_months(2024, 9, 9).unwrap();
    assert!(range.contains(date(2024, 9, 1)));
    assert!(range.contains(date(2024, 9, 30)));
    assert!(!range.contains(date(2024, 10, 1)));
    assert!(!range.contains(date(2024, 8, 31)));
}

/// A December end rolls over into January of the next year
#[test]
fn test_december_rollover() {
    let range = DateRange::for_months(2024, 12, 12).unwrap();
    assert_eq!(range.start, date(2024, 12, 1));
    assert_eq!(range.end, date(2025, 1, 1));
    assert!(range.contains(date(2024, 12, 31)));

    let year = DateRange::for_months(2024, 1, 12).unwrap();
    assert_eq!(year.days(), 366);
}

/// Multi-month windows span whole months
#[test]
fn test_multi_month_window() {
    let range = DateRange::for_months(2023, 6, 8).unwrap();
    assert_eq!(range.start, date(2023, 6, 1));
    assert_eq!(range.end, date(2023, 9, 1));
    assert_eq!(range.to_string(), "[2023-06-01, 2023-09-01)");
}

/// Months outside 1..=12 are rejected
#[test]
fn test_invalid_month_rejected() {
    assert!(matches!(
        DateRange::for_months(2024, 0, 3),
        Err(Error::InvalidMonth { month: 0 })
    ));
    assert!(matches!(
        DateRange::for_months(2024, 1, 13),
        Err(Error::InvalidMonth { month: 13 })
    ));
}

/// An end month before the start month is rejected
#[test]
fn test_reversed_range_rejected() {
    assert!(matches!(
        DateRange::for_months(2024, 9, 8),
        Err(Error::InvalidMonthRange { start: 9, end: 8 })
    ));
}

/// Date filtering keeps collection order and drops undated images
#[test]
fn test_collection_filter_date() {
    let score = score_grid((1, 1), |_, _| 1.0);
    let raw = [100.0, 200.0, 300.0, 400.0, 500.0];
    let collection = ImageCollection::new(vec![
        raw_scene("c", date(2024, 9, 20), raw, score.clone()),
        raw_scene("a", date(2024, 8, 31), raw, score.clone()),
        raw_scene("b", date(2024, 9, 2), raw, score.clone()),
        raw_scene("d", date(2024, 10, 1), raw, score),
        Image::new("undated", (1, 1)),
    ]);

    let range = DateRange::for_months(2024, 9, 9).unwrap();
    let filtered = collection.filter_date(&range);
    let ids: Vec<&str> = filtered.iter().map(|img| img.id.as_str()).collect();
    assert_eq!(ids, ["c", "b"]);
}
