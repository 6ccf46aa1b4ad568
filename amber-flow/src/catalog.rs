//! Read-only reward catalog: wishes, merchants, coupon offers and the coupon feed.
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::display::{progress_percent, remaining};
use crate::error::CatalogError;

/// Number of offers presented at the forced coupon choice.
pub const COUPON_OFFER_COUNT: usize = 2;

/// A crowd-funded "0 yuan" wish that wish cards are invested into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub total_needed: u32,
    pub current: u32,
    pub participants: u32,
}

impl WishItem {
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        progress_percent(self.current, self.total_needed)
    }

    /// Cards still missing before the wish is fulfilled.
    #[must_use]
    pub const fn cards_remaining(&self) -> u32 {
        remaining(self.total_needed, self.current)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Merchant {
    pub id: String,
    pub name: String,
    pub category: String,
    pub rating: f32,
    #[serde(default)]
    pub image: String,
    pub distance_km: f32,
}

/// One side of the forced coupon choice. Prices are in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponOffer {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub desc: String,
    pub price_cents: i64,
    pub original_price_cents: i64,
}

impl CouponOffer {
    /// Savings against the original price as a whole percentage.
    #[must_use]
    pub fn discount_percent(&self) -> u8 {
        if self.original_price_cents <= 0 {
            return 0;
        }
        let original = i128::from(self.original_price_cents);
        let saved = (original - i128::from(self.price_cents)).clamp(0, original);
        u8::try_from(saved * 100 / original).unwrap_or(100)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedStatus {
    #[default]
    Live,
    SoldOut,
    Upcoming,
}

/// A limited "god coupon" in the home feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    pub id: String,
    pub merchant: String,
    pub title: String,
    #[serde(default)]
    pub value: String,
    pub participants_count: u32,
    pub total_needed: u32,
    #[serde(default)]
    pub status: FeedStatus,
}

impl FeedItem {
    #[must_use]
    pub const fn remaining_slots(&self) -> u32 {
        remaining(self.total_needed, self.participants_count)
    }

    /// Claimable only while live with slots left.
    #[must_use]
    pub fn is_claimable(&self) -> bool {
        self.status == FeedStatus::Live && self.remaining_slots() > 0
    }
}

/// Container for all catalog data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Catalog {
    #[serde(default)]
    pub wishes: Vec<WishItem>,
    #[serde(default)]
    pub merchants: Vec<Merchant>,
    #[serde(default)]
    pub coupon_offers: Vec<CouponOffer>,
    #[serde(default)]
    pub feed: Vec<FeedItem>,
}

impl Catalog {
    /// Create an empty catalog (useful for tests)
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load catalog data from a JSON string and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or breaks a catalog invariant.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load the catalog embedded with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded data is malformed.
    pub fn load_from_static() -> Result<Self, CatalogError> {
        Self::from_json(include_str!("../data/catalog.json"))
    }

    /// Check ids are unique per collection, totals are positive, coupon prices
    /// sit in `0..=original` and exactly two coupon offers exist.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), CatalogError> {
        ensure_unique("wish", self.wishes.iter().map(|w| w.id.as_str()))?;
        ensure_unique("merchant", self.merchants.iter().map(|m| m.id.as_str()))?;
        ensure_unique("coupon", self.coupon_offers.iter().map(|c| c.id.as_str()))?;
        ensure_unique("feed", self.feed.iter().map(|f| f.id.as_str()))?;

        if let Some(wish) = self.wishes.iter().find(|w| w.total_needed == 0) {
            return Err(CatalogError::ZeroTotal {
                collection: "wish",
                id: wish.id.clone(),
            });
        }
        if let Some(item) = self.feed.iter().find(|f| f.total_needed == 0) {
            return Err(CatalogError::ZeroTotal {
                collection: "feed",
                id: item.id.clone(),
            });
        }
        if let Some(offer) = self
            .coupon_offers
            .iter()
            .find(|c| c.price_cents < 0 || c.price_cents > c.original_price_cents)
        {
            return Err(CatalogError::InvalidPrice {
                id: offer.id.clone(),
                price_cents: offer.price_cents,
                original_price_cents: offer.original_price_cents,
            });
        }
        if self.coupon_offers.len() != COUPON_OFFER_COUNT {
            return Err(CatalogError::CouponOfferCount(self.coupon_offers.len()));
        }
        Ok(())
    }

    #[must_use]
    pub fn find_wish(&self, id: &str) -> Option<&WishItem> {
        self.wishes.iter().find(|w| w.id == id)
    }

    #[must_use]
    pub fn find_coupon(&self, id: &str) -> Option<&CouponOffer> {
        self.coupon_offers.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn find_merchant(&self, id: &str) -> Option<&Merchant> {
        self.merchants.iter().find(|m| m.id == id)
    }

    #[must_use]
    pub fn find_feed_item(&self, id: &str) -> Option<&FeedItem> {
        self.feed.iter().find(|f| f.id == id)
    }
}

fn ensure_unique<'a>(
    collection: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                collection,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(id: &str, price: i64, original: i64) -> CouponOffer {
        CouponOffer {
            id: id.to_string(),
            title: id.to_uppercase(),
            desc: String::new(),
            price_cents: price,
            original_price_cents: original,
        }
    }

    #[test]
    fn static_catalog_loads() {
        let catalog = Catalog::load_from_static().unwrap();
        assert_eq!(catalog.wishes.len(), 3);
        assert_eq!(catalog.merchants.len(), 3);
        assert_eq!(catalog.coupon_offers.len(), COUPON_OFFER_COUNT);
        assert_eq!(catalog.feed.len(), 3);

        let phone = catalog.find_wish("1").unwrap();
        assert_eq!(phone.progress_percent(), 68);
        assert_eq!(phone.cards_remaining(), 158);
        assert_eq!(catalog.find_feed_item("g1").unwrap().remaining_slots(), 5);
        assert!(catalog.find_coupon("c1").is_some());
        assert_eq!(catalog.find_merchant("2").unwrap().category, "Health");
    }

    #[test]
    fn validate_rejects_bad_catalogs() {
        let mut catalog = Catalog::load_from_static().unwrap();
        catalog.coupon_offers.pop();
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::CouponOfferCount(1))
        ));

        let mut catalog = Catalog::load_from_static().unwrap();
        catalog.wishes[2].total_needed = 0;
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::ZeroTotal { collection: "wish", .. })
        ));

        let mut catalog = Catalog::load_from_static().unwrap();
        let dup = catalog.merchants[0].clone();
        catalog.merchants.push(dup);
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::DuplicateId { collection: "merchant", .. })
        ));
    }

    #[test]
    fn from_json_surfaces_parse_errors() {
        assert!(matches!(
            Catalog::from_json("{ not json"),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn discount_percent_handles_edges() {
        assert_eq!(offer("half", 1500, 3000).discount_percent(), 50);
        assert_eq!(offer("free", 0, 2800).discount_percent(), 100);
        assert_eq!(offer("none", 500, 0).discount_percent(), 0);
        assert_eq!(offer("markup", 4000, 3000).discount_percent(), 0);
        assert_eq!(offer("huge", 0, i64::MAX).discount_percent(), 100);
        assert_eq!(offer("wide", i64::MIN, i64::MAX).discount_percent(), 100);
        assert_eq!(offer("tiny", 1, 100_000_000_000_000_000).discount_percent(), 99);
    }

    #[test]
    fn validate_rejects_out_of_range_prices() {
        let mut catalog = Catalog::load_from_static().unwrap();
        catalog.coupon_offers[0].original_price_cents = 100_000_000_000_000_000;
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.coupon_offers[0].discount_percent(), 99);

        let mut catalog = Catalog::load_from_static().unwrap();
        catalog.coupon_offers[1].price_cents = -150;
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::InvalidPrice { price_cents: -150, .. })
        ));

        let mut catalog = Catalog::load_from_static().unwrap();
        let original = catalog.coupon_offers[0].original_price_cents;
        catalog.coupon_offers[0].price_cents = original + 1;
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::InvalidPrice { .. })
        ));
    }

    #[test]
    fn feed_claimability_tracks_status_and_slots() {
        let mut item = FeedItem {
            id: "g9".into(),
            merchant: "Somewhere".into(),
            title: "Deal".into(),
            value: String::new(),
            participants_count: 10,
            total_needed: 10,
            status: FeedStatus::Live,
        };
        assert!(!item.is_claimable());
        item.participants_count = 3;
        assert!(item.is_claimable());
        item.status = FeedStatus::Upcoming;
        assert!(!item.is_claimable());
    }
}
