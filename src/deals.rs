//! Deals: records, dashboard filtering, saved deals, recommendations and reports.
//!
//! Everything here is pure; fetching deals is the `api` module's job.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::types::QualityTier;

/// Number of deals shown in the trending and local sections.
pub const SECTION_SIZE: usize = 4;
/// Minimum quality score for a deal to be recommended.
pub const RECOMMEND_MIN_QUALITY: u8 = 70;
/// Default minimum discount for recommendations, in percent.
pub const DEFAULT_MIN_DISCOUNT: f64 = 20.0;

/// A retail deal as served by the backend.
///
/// Field aliases accept the dashboard's sample-data naming (`product`,
/// `discountPrice`, `store`, ...) as well as the backend schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub id: u64,
    #[serde(alias = "product")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(alias = "discountPrice")]
    pub price: f64,
    #[serde(alias = "originalPrice")]
    pub original_price: f64,
    #[serde(alias = "discountPercentage", default)]
    pub discount_percentage: Option<f64>,
    #[serde(alias = "store")]
    pub retailer: String,
    #[serde(default)]
    pub url: String,
    #[serde(alias = "image", default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub quality_score: Option<u8>,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(alias = "inStock", default = "in_stock_default")]
    pub in_stock: bool,
}

fn in_stock_default() -> bool {
    true
}

impl Deal {
    pub fn savings(&self) -> f64 {
        (self.original_price - self.price).max(0.0)
    }

    /// Discount in percent, derived from the prices when the backend left it out.
    pub fn discount(&self) -> f64 {
        match self.discount_percentage {
            Some(pct) => pct,
            None if self.original_price > 0.0 => self.savings() / self.original_price * 100.0,
            None => 0.0,
        }
    }

    pub fn quality_tier(&self) -> Option<QualityTier> {
        self.quality_score.map(QualityTier::from_score)
    }
}

/// Dashboard filter: category tab plus search box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DealFilter {
    /// `None` is the "All Deals" tab.
    pub category: Option<String>,
    pub query: String,
}

impl DealFilter {
    /// Category equality (when a tab is active) and a case-insensitive title match.
    pub fn matches(&self, deal: &Deal) -> bool {
        let category_ok = match &self.category {
            None => true,
            Some(id) => deal.category.as_deref() == Some(id.as_str()),
        };
        if !category_ok {
            return false;
        }

        self.query.is_empty() || deal.title.to_lowercase().contains(&self.query.to_lowercase())
    }

    pub fn apply<'a>(&self, deals: &'a [Deal]) -> Vec<&'a Deal> {
        deals.iter().filter(|d| self.matches(d)).collect()
    }
}

/// Deals currently loaded on the dashboard, plus the user's saved list.
#[derive(Debug, Clone, Default)]
pub struct DealBoard {
    deals: Vec<Deal>,
    saved: Vec<Deal>,
    pub filter: DealFilter,
    /// City used for the local deals section.
    pub home_city: Option<String>,
}

impl DealBoard {
    pub fn new(deals: Vec<Deal>) -> Self {
        Self {
            deals,
            ..Self::default()
        }
    }

    /// Replace the loaded deals. Saved deals survive a reload.
    pub fn set_deals(&mut self, deals: Vec<Deal>) {
        self.deals = deals;
    }

    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }

    /// All deals passing the filter, in load order.
    pub fn filtered(&self) -> Vec<&Deal> {
        self.filter.apply(&self.deals)
    }

    /// "Trending in Your Region"
    pub fn trending(&self) -> Vec<&Deal> {
        self.filtered().into_iter().take(SECTION_SIZE).collect()
    }

    /// "Local Deals for You"
    pub fn local(&self) -> Vec<&Deal> {
        let Some(city) = self.home_city.as_deref() else {
            return Vec::new();
        };
        self.filtered()
            .into_iter()
            .filter(|d| d.location.as_deref() == Some(city))
            .take(SECTION_SIZE)
            .collect()
    }

    pub fn saved(&self) -> &[Deal] {
        &self.saved
    }

    pub fn is_saved(&self, id: u64) -> bool {
        self.saved.iter().any(|d| d.id == id)
    }

    /// Save a deal, or unsave it if it is already saved. Returns the new saved state.
    pub fn toggle_saved(&mut self, deal: &Deal) -> bool {
        if self.is_saved(deal.id) {
            self.saved.retain(|d| d.id != deal.id);
            false
        } else {
            self.saved.push(deal.clone());
            true
        }
    }
}

/// What the user is shopping for, as the recommendation engine sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationCriteria {
    pub max_price: Option<f64>,
    /// Percent, clamped to 0-100.
    pub min_discount: f64,
    /// Case-insensitive title keywords; a deal needs to match any one of them.
    pub keywords: Vec<String>,
}

impl Default for RecommendationCriteria {
    fn default() -> Self {
        Self {
            max_price: None,
            min_discount: DEFAULT_MIN_DISCOUNT,
            keywords: Vec::new(),
        }
    }
}

impl RecommendationCriteria {
    /// A non-positive max price means "no limit".
    pub fn new(max_price: Option<f64>, min_discount: f64, keywords: Vec<String>) -> Self {
        Self {
            max_price: max_price.filter(|p| *p > 0.0),
            min_discount: min_discount.clamp(0.0, 100.0),
            keywords: keywords
                .into_iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    fn accepts(&self, deal: &Deal) -> bool {
        if deal.quality_score.unwrap_or(0) < RECOMMEND_MIN_QUALITY {
            return false;
        }
        if self.max_price.is_some_and(|max| deal.price > max) {
            return false;
        }
        if !self.keywords.is_empty() {
            let title = deal.title.to_lowercase();
            if !self.keywords.iter().any(|k| title.contains(k.as_str())) {
                return false;
            }
        }
        deal.discount() >= self.min_discount
    }
}

/// Best deals first: quality score, then discount, both descending.
pub fn recommend<'a>(deals: &'a [Deal], criteria: &RecommendationCriteria) -> Vec<&'a Deal> {
    let mut picked: Vec<&Deal> = deals.iter().filter(|d| criteria.accepts(d)).collect();
    picked.sort_by(|a, b| {
        b.quality_score
            .cmp(&a.quality_score)
            .then_with(|| b.discount().partial_cmp(&a.discount()).unwrap_or(Ordering::Equal))
    });
    picked
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityDistribution {
    pub excellent: usize,
    pub good: usize,
    pub fair: usize,
    pub poor: usize,
}

/// Summary statistics over a set of deals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealReport {
    pub total_deals: usize,
    pub avg_discount: f64,
    pub max_discount: f64,
    /// `None` when no deal carries a quality score.
    pub avg_quality_score: Option<f64>,
    pub retailers: BTreeMap<String, usize>,
    pub price_ranges: PriceStats,
    pub quality_distribution: QualityDistribution,
    pub timestamp: NaiveDateTime,
}

impl DealReport {
    /// Compute a report, or `None` for an empty deal list.
    pub fn compute(deals: &[Deal], now: NaiveDateTime) -> Option<Self> {
        if deals.is_empty() {
            return None;
        }
        let n = deals.len() as f64;

        let discounts: Vec<f64> = deals.iter().map(Deal::discount).collect();
        let avg_discount = discounts.iter().sum::<f64>() / n;
        let max_discount = discounts.iter().copied().fold(f64::MIN, f64::max);

        let scores: Vec<u8> = deals.iter().filter_map(|d| d.quality_score).collect();
        let avg_quality_score = if scores.is_empty() {
            None
        } else {
            Some(scores.iter().map(|&s| s as f64).sum::<f64>() / scores.len() as f64)
        };

        let mut retailers = BTreeMap::new();
        for deal in deals {
            *retailers.entry(deal.retailer.clone()).or_insert(0) += 1;
        }

        let prices = deals.iter().map(|d| d.price);
        let price_ranges = PriceStats {
            min: prices.clone().fold(f64::MAX, f64::min),
            max: prices.clone().fold(f64::MIN, f64::max),
            avg: prices.sum::<f64>() / n,
        };

        let mut quality_distribution = QualityDistribution::default();
        for score in scores {
            match QualityTier::from_score(score) {
                QualityTier::Excellent => quality_distribution.excellent += 1,
                QualityTier::Good => quality_distribution.good += 1,
                QualityTier::Fair => quality_distribution.fair += 1,
                QualityTier::Poor => quality_distribution.poor += 1,
            }
        }

        Some(Self {
            total_deals: deals.len(),
            avg_discount,
            max_discount,
            avg_quality_score,
            retailers,
            price_ranges,
            quality_distribution,
            timestamp: now,
        })
    }

    /// Plain-text rendering used by the CLI and the dashboard's report panel.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Total Deals Found: {}", self.total_deals),
            format!("Average Discount: {:.1}%", self.avg_discount),
            format!("Maximum Discount: {:.1}%", self.max_discount),
        ];
        if let Some(avg) = self.avg_quality_score {
            lines.push(format!("Average Quality Score: {:.1}", avg));
        }
        lines.push(String::new());
        lines.push("Retailers:".to_string());
        for (retailer, count) in &self.retailers {
            lines.push(format!("- {}: {} deals", retailer, count));
        }
        lines.push(String::new());
        lines.push("Price Ranges:".to_string());
        lines.push(format!("Min: ${:.2}", self.price_ranges.min));
        lines.push(format!("Max: ${:.2}", self.price_ranges.max));
        lines.push(format!("Avg: ${:.2}", self.price_ranges.avg));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn deal(id: u64, title: &str, category: &str, price: f64, original: f64) -> Deal {
        Deal {
            id,
            title: title.to_string(),
            description: None,
            price,
            original_price: original,
            discount_percentage: None,
            retailer: "TechMart".to_string(),
            url: format!("https://example.com/deals/{}", id),
            image_url: None,
            category: Some(category.to_string()),
            quality_score: None,
            timestamp: None,
            location: None,
            rating: None,
            in_stock: true,
        }
    }

    #[test]
    fn test_parses_dashboard_sample_shape() {
        let json = r#"{
            "id": 1, "product": "4K Smart TV", "originalPrice": 999.99,
            "discountPrice": 599.99, "store": "TechMart",
            "image": "https://placehold.co/300x200", "category": "electronics",
            "savings": 400, "discountPercentage": 40, "location": "New York",
            "rating": 4.5, "inStock": true
        }"#;
        let deal: Deal = serde_json::from_str(json).unwrap();
        assert_eq!(deal.title, "4K Smart TV");
        assert_eq!(deal.retailer, "TechMart");
        assert_eq!(deal.discount(), 40.0);
        assert!((deal.savings() - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_parses_backend_shape() {
        let json = r#"{
            "id": 7, "title": "Air Fryer", "price": 49.0, "original_price": 99.0,
            "discount_percentage": 50.5, "retailer": "HomeCo",
            "url": "https://homeco.example/af", "quality_score": 82,
            "timestamp": "2024-11-29T08:15:00"
        }"#;
        let deal: Deal = serde_json::from_str(json).unwrap();
        assert_eq!(deal.quality_tier(), Some(QualityTier::Good));
        assert!(deal.in_stock);
        assert!(deal.timestamp.is_some());
    }

    #[test]
    fn test_filter_category_and_query() {
        let deals = vec![
            deal(1, "4K Smart TV", "electronics", 599.0, 999.0),
            deal(2, "Running Shoes", "fashion", 60.0, 100.0),
            deal(3, "Gaming Laptop", "electronics", 900.0, 1200.0),
        ];

        let mut filter = DealFilter::default();
        assert_eq!(filter.apply(&deals).len(), 3);

        filter.category = Some("electronics".to_string());
        assert_eq!(filter.apply(&deals).len(), 2);

        filter.query = "LAPTOP".to_string();
        let hits = filter.apply(&deals);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 3);

        filter.category = Some("fashion".to_string());
        assert!(filter.apply(&deals).is_empty());
    }

    #[test]
    fn test_filter_query_is_literal() {
        let deals = vec![
            deal(1, "4K Smart TV", "electronics", 599.0, 999.0),
            deal(2, "Lamp", "home", 20.0, 35.0),
        ];
        let mut filter = DealFilter::default();

        // Whitespace is part of the substring
        filter.query = " ".to_string();
        let hits = filter.apply(&deals);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);

        filter.query = "tv ".to_string();
        assert!(filter.apply(&deals).is_empty());

        filter.query = "smart tv".to_string();
        assert_eq!(filter.apply(&deals).len(), 1);
    }

    #[test]
    fn test_saved_toggle() {
        let tv = deal(1, "4K Smart TV", "electronics", 599.0, 999.0);
        let mut board = DealBoard::new(vec![tv.clone()]);

        assert!(board.toggle_saved(&tv));
        assert!(board.is_saved(1));
        assert!(!board.toggle_saved(&tv));
        assert!(board.saved().is_empty());
    }

    #[test]
    fn test_sections() {
        let mut deals: Vec<Deal> = (1..=6)
            .map(|i| deal(i, &format!("Deal {}", i), "home", 10.0, 20.0))
            .collect();
        deals[4].location = Some("Austin".to_string());
        deals[5].location = Some("Austin".to_string());

        let mut board = DealBoard::new(deals);
        assert_eq!(board.trending().len(), SECTION_SIZE);
        assert!(board.local().is_empty());

        board.home_city = Some("Austin".to_string());
        let local: Vec<u64> = board.local().iter().map(|d| d.id).collect();
        assert_eq!(local, vec![5, 6]);
    }

    #[test]
    fn test_recommend_ordering_and_filters() {
        let mut a = deal(1, "Laptop Stand", "electronics", 30.0, 60.0);
        a.quality_score = Some(75);
        let mut b = deal(2, "Gaming Laptop", "electronics", 900.0, 1500.0);
        b.quality_score = Some(92);
        let mut c = deal(3, "Laptop Sleeve", "fashion", 15.0, 30.0);
        c.quality_score = Some(75);
        c.discount_percentage = Some(60.0);
        let mut d = deal(4, "Laptop Bag", "fashion", 40.0, 42.0);
        d.quality_score = Some(99);
        let mut e = deal(5, "Cheap Laptop", "electronics", 100.0, 300.0);
        e.quality_score = Some(40);

        let deals = vec![a, b, c, d, e];
        let criteria = RecommendationCriteria::new(None, 20.0, vec!["laptop".to_string()]);
        let ids: Vec<u64> = recommend(&deals, &criteria).iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);

        let capped = RecommendationCriteria::new(Some(500.0), 20.0, Vec::new());
        let ids: Vec<u64> = recommend(&deals, &capped).iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_report() {
        let now = NaiveDateTime::parse_from_str("2024-11-29 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        assert!(DealReport::compute(&[], now).is_none());

        let mut a = deal(1, "A", "home", 50.0, 100.0);
        a.quality_score = Some(95);
        let mut b = deal(2, "B", "home", 150.0, 200.0);
        b.quality_score = Some(55);
        b.retailer = "HomeCo".to_string();

        let report = DealReport::compute(&[a, b], now).unwrap();
        assert_eq!(report.total_deals, 2);
        assert!((report.avg_discount - 37.5).abs() < 1e-9);
        assert!((report.max_discount - 50.0).abs() < 1e-9);
        assert_eq!(report.avg_quality_score, Some(75.0));
        assert_eq!(report.retailers.get("HomeCo"), Some(&1));
        assert_eq!(report.price_ranges.min, 50.0);
        assert_eq!(report.price_ranges.max, 150.0);
        assert_eq!(report.quality_distribution.excellent, 1);
        assert_eq!(report.quality_distribution.fair, 1);
        assert!(report.lines()[0].contains("Total Deals Found: 2"));
    }
}
