//! Marketplace listing types.
//!
//! A listing moves through exactly one transition: unsold -> sold. The buyer
//! is set in the same step, so `buyer.is_some() == sold` always holds.

use serde::{Deserialize, Serialize};

use std::fmt;

/// Monotonic identifier assigned by the store when a listing is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(pub i64);

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An item offered for sale by a bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub item: String,
    pub price: f64,
    pub seller: String,
    pub buyer: Option<String>,
    pub sold: bool,
}

impl Listing {
    /// Whether the buyer/sold pair is consistent.
    pub fn is_consistent(&self) -> bool {
        self.buyer.is_some() == self.sold
    }
}

/// A validated listing ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    pub item: String,
    pub price: f64,
    pub seller: String,
}

/// Raw request to create a listing; every field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateListingRequest {
    pub item: Option<String>,
    pub price: Option<String>,
    pub seller: Option<String>,
}

/// Parse a price string. Rejects non-numeric, non-finite and negative values.
pub fn parse_price(raw: &str) -> Result<f64, String> {
    let price: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("price '{raw}' is not a number"))?;
    if !price.is_finite() {
        return Err(format!("price '{raw}' is not finite"));
    }
    if price < 0.0 {
        return Err(format!("price '{raw}' is negative"));
    }
    Ok(price)
}
