//! Listing ledger service.
//!
//! Create, query and settle listings. Settlement is delegated to the
//! repository as one atomic claim so a listing never gets two buyers.

use bazaar_types::error::BazaarError;
use bazaar_types::listing::{CreateListingRequest, Listing, NewListing, parse_price};
use tracing::{debug, info};

use crate::repository::listing::ListingRepository;
use crate::service::{require, require_present};

pub struct ListingLedger<L: ListingRepository> {
    listings: L,
}

impl<L: ListingRepository> ListingLedger<L> {
    pub fn new(listings: L) -> Self {
        Self { listings }
    }

    /// Create an unsold listing.
    ///
    /// Fails with `Validation` if item, price or seller is missing, or the
    /// price is not a non-negative number.
    pub async fn create(&self, request: CreateListingRequest) -> Result<Listing, BazaarError> {
        let item = require("item", request.item)?;
        let raw_price = require("price", request.price)?;
        let seller = require("seller", request.seller)?;
        let price = parse_price(&raw_price).map_err(BazaarError::Validation)?;

        let listing = self
            .listings
            .create(&NewListing {
                item,
                price,
                seller,
            })
            .await?;

        info!(id = %listing.id, item = %listing.item, price = listing.price, seller = %listing.seller, "listed");
        Ok(listing)
    }

    /// Unsold listings whose item contains `item` (case-sensitive, empty matches all).
    pub async fn available(&self, item: Option<String>) -> Result<Vec<Listing>, BazaarError> {
        let needle = require_present("item", item)?;
        Ok(self.listings.available(&needle).await?)
    }

    /// Sell the lowest-id unsold listing matching `item` to `buyer`.
    ///
    /// Fails with `NotFound` when no unsold listing matches; nothing changes then.
    pub async fn settle(
        &self,
        item: Option<String>,
        buyer: Option<String>,
    ) -> Result<Listing, BazaarError> {
        let needle = require_present("item", item)?;
        let buyer = require("buyer", buyer)?;

        match self.listings.settle(&needle, &buyer).await? {
            Some(listing) => {
                info!(id = %listing.id, item = %listing.item, buyer = %buyer, "sold");
                Ok(listing)
            }
            None => {
                debug!(item = %needle, buyer = %buyer, "no unsold match");
                Err(BazaarError::NotFound(format!(
                    "no unsold listing matching '{needle}'"
                )))
            }
        }
    }

    /// Listings bought by `buyer`.
    pub async fn inventory(&self, buyer: Option<String>) -> Result<Vec<Listing>, BazaarError> {
        let buyer = require("buyer", buyer)?;
        Ok(self.listings.inventory(&buyer).await?)
    }
}
