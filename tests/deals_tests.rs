//! Tests for the offline deals workflow
//!
//! A deals file on disk is loaded, narrowed by the wizard's preferences,
//! ranked for recommendations and summarised in a report.

use std::io::Write;

use chrono::NaiveDate;
use tempfile::NamedTempFile;

use dealfinder::api::{DealQuery, DealSource, FileDealSource};
use dealfinder::catalog::Catalog;
use dealfinder::deals::{recommend, DealFilter, DealReport, RecommendationCriteria};
use dealfinder::preferences::{PriceRange, Preferences};

const DEALS: &str = r#"[
    {"id": 1, "product": "OLED TV 55in", "discountPrice": 899.0, "originalPrice": 1499.0,
     "store": "Best Buy", "category": "electronics", "quality_score": 92, "location": "Austin"},
    {"id": 2, "title": "Noise Cancelling Headphones", "price": 199.0, "original_price": 349.0,
     "retailer": "Amazon", "category": "electronics", "quality_score": 75},
    {"id": 3, "title": "Winter Jacket", "price": 80.0, "original_price": 100.0,
     "retailer": "Macy's", "category": "fashion", "quality_score": 60, "inStock": false},
    {"id": 4, "title": "Stand Mixer", "price": 249.0, "original_price": 449.0,
     "retailer": "Target", "category": "home"}
]"#;

fn deals_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(DEALS.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_and_fetch_by_category() {
    let file = deals_file();
    let source = FileDealSource::load(file.path()).unwrap();
    assert_eq!(source.deals().len(), 4);
    assert!(!source.deals()[2].in_stock);

    let electronics = source.fetch_deals(&DealQuery::category("electronics")).unwrap();
    let ids: Vec<u64> = electronics.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn test_load_rejects_malformed_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"{\"deals\": ").unwrap();
    assert!(FileDealSource::load(file.path()).is_err());
}

#[test]
fn test_preferences_narrow_deals() {
    let file = deals_file();
    let source = FileDealSource::load(file.path()).unwrap();
    let catalog = Catalog::default();

    let mut preferences = Preferences::default();
    preferences.selection.toggle(&catalog, "electronics", Some("Audio"));
    preferences.price_range = PriceRange::new(100, 500);

    let matches = source.filter_deals(&preferences.to_submission()).unwrap();
    let ids: Vec<u64> = matches.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![2], "TV is over budget, mixer is the wrong category");

    // No categories selected means every category
    preferences.selection = Default::default();
    let matches = source.filter_deals(&preferences.to_submission()).unwrap();
    let ids: Vec<u64> = matches.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![2, 4]);
}

#[test]
fn test_search_filter_is_case_insensitive() {
    let file = deals_file();
    let source = FileDealSource::load(file.path()).unwrap();
    let filter = DealFilter {
        category: None,
        query: "JACKET".to_string(),
    };
    let matches = filter.apply(source.deals());
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].retailer, "Macy's");
}

#[test]
fn test_recommendations_from_file() {
    let file = deals_file();
    let source = FileDealSource::load(file.path()).unwrap();

    let criteria = RecommendationCriteria::new(None, 30.0, Vec::new());
    let picks: Vec<u64> = recommend(source.deals(), &criteria).iter().map(|d| d.id).collect();
    // Jacket scores below the quality bar, mixer has no score
    assert_eq!(picks, vec![1, 2]);

    let criteria = RecommendationCriteria::new(Some(500.0), 30.0, vec!["Headphones".to_string()]);
    let picks: Vec<u64> = recommend(source.deals(), &criteria).iter().map(|d| d.id).collect();
    assert_eq!(picks, vec![2]);
}

#[test]
fn test_report_from_file() {
    let file = deals_file();
    let source = FileDealSource::load(file.path()).unwrap();
    let now = NaiveDate::from_ymd_opt(2025, 11, 28)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();

    let report = DealReport::compute(source.deals(), now).unwrap();
    assert_eq!(report.total_deals, 4);
    assert_eq!(report.retailers.len(), 4);
    assert_eq!(report.price_ranges.min, 80.0);
    assert_eq!(report.price_ranges.max, 899.0);
    // Only scored deals count towards the average
    let avg = report.avg_quality_score.unwrap();
    assert!((avg - (92.0 + 75.0 + 60.0) / 3.0).abs() < 1e-9);
    assert_eq!(report.quality_distribution.excellent, 1);
    assert_eq!(report.quality_distribution.good, 1);
    assert_eq!(report.quality_distribution.fair, 1);
    assert_eq!(report.timestamp, now);
    assert!(report.lines()[0].contains("Total Deals Found: 4"));

    assert!(DealReport::compute(&[], now).is_none());
}
