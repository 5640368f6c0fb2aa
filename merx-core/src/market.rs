use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One product search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingItem {
    pub title: String,
    pub price: i64,
    pub seller_name: String,
}

/// Price statistics over a set of listings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceRangeSummary {
    pub min: i64,
    pub max: i64,
    /// Mean price, rounded to the nearest whole unit
    pub avg: i64,
}

/// How often one seller appears in a result set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SellerFrequency {
    pub seller_name: String,
    pub count: u64,
}

/// Min/max/average over a non-empty listing set.
///
/// Empty input is an error here (the average would divide by zero); contrast
/// with [`rank_sellers`], which tolerates it.
pub fn summarize_price_range(items: &[ListingItem]) -> Result<PriceRangeSummary, CoreError> {
    if items.is_empty() {
        return Err(CoreError::EmptyInput);
    }

    let mut min = i64::MAX;
    let mut max = i64::MIN;
    let mut sum: i64 = 0;
    for item in items {
        min = min.min(item.price);
        max = max.max(item.price);
        sum += item.price;
    }
    let avg = (sum as f64 / items.len() as f64).round() as i64;

    Ok(PriceRangeSummary { min, max, avg })
}

/// Count listings per seller and return the `top_n` most frequent.
///
/// Grouping is exact string equality, no normalization. Ordering is count
/// descending; ties keep first-appearance order (stable sort). An empty
/// input yields an empty ranking rather than an error.
pub fn rank_sellers(items: &[ListingItem], top_n: usize) -> Vec<SellerFrequency> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut ranking: Vec<SellerFrequency> = Vec::new();

    for item in items {
        match index.get(item.seller_name.as_str()) {
            Some(&i) => ranking[i].count += 1,
            None => {
                index.insert(item.seller_name.as_str(), ranking.len());
                ranking.push(SellerFrequency {
                    seller_name: item.seller_name.clone(),
                    count: 1,
                });
            }
        }
    }

    // Vec::sort_by is stable, so equal counts stay in first-seen order
    ranking.sort_by(|a, b| b.count.cmp(&a.count));
    ranking.truncate(top_n);
    ranking
}

/// One point of a search-interest time series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    pub period: String,
    pub ratio: f64,
}

/// Coarse direction of recent search interest
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Rising,
    Falling,
    Flat,
}

/// Compare the first and last of the final three points of a series.
///
/// Fewer than two points gives no signal, reported as `Flat`.
pub fn trend_direction(points: &[TrendPoint]) -> TrendDirection {
    let recent = &points[points.len().saturating_sub(3)..];
    match (recent.first(), recent.last()) {
        (Some(first), Some(last)) if recent.len() >= 2 => {
            if last.ratio > first.ratio {
                TrendDirection::Rising
            } else if last.ratio < first.ratio {
                TrendDirection::Falling
            } else {
                TrendDirection::Flat
            }
        }
        _ => TrendDirection::Flat,
    }
}
