//! SQLite listing repository implementation.
//!
//! Settlement runs as one transaction on the single-connection writer pool:
//! pick the lowest-id unsold match, then mark it sold only if it is still
//! unsold. A schema CHECK keeps `buyer` and `sold` consistent.

use bazaar_core::repository::listing::ListingRepository;
use bazaar_types::error::RepositoryError;
use bazaar_types::listing::{Listing, ListingId, NewListing};
use sqlx::Row;

use super::pool::DatabasePool;
use super::query_error;

/// SQLite-backed implementation of `ListingRepository`.
pub struct SqliteListingRepository {
    pool: DatabasePool,
}

impl SqliteListingRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn row_to_listing(row: &sqlx::sqlite::SqliteRow) -> Result<Listing, RepositoryError> {
    let sold: i64 = row.try_get("sold").map_err(query_error)?;
    Ok(Listing {
        id: ListingId(row.try_get("id").map_err(query_error)?),
        item: row.try_get("item").map_err(query_error)?,
        price: row.try_get("price").map_err(query_error)?,
        seller: row.try_get("seller").map_err(query_error)?,
        buyer: row.try_get("buyer").map_err(query_error)?,
        sold: sold != 0,
    })
}

fn rows_to_listings(rows: &[sqlx::sqlite::SqliteRow]) -> Result<Vec<Listing>, RepositoryError> {
    rows.iter().map(row_to_listing).collect()
}

impl ListingRepository for SqliteListingRepository {
    async fn create(&self, listing: &NewListing) -> Result<Listing, RepositoryError> {
        let result = sqlx::query("INSERT INTO listings (item, price, seller) VALUES (?, ?, ?)")
            .bind(&listing.item)
            .bind(listing.price)
            .bind(&listing.seller)
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;

        Ok(Listing {
            id: ListingId(result.last_insert_rowid()),
            item: listing.item.clone(),
            price: listing.price,
            seller: listing.seller.clone(),
            buyer: None,
            sold: false,
        })
    }

    async fn available(&self, needle: &str) -> Result<Vec<Listing>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM listings WHERE sold = 0 AND instr(item, ?) > 0 ORDER BY id",
        )
        .bind(needle)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_error)?;

        rows_to_listings(&rows)
    }

    async fn settle(&self, needle: &str, buyer: &str) -> Result<Option<Listing>, RepositoryError> {
        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;

        let candidate = sqlx::query(
            "SELECT id FROM listings WHERE sold = 0 AND instr(item, ?) > 0 ORDER BY id LIMIT 1",
        )
        .bind(needle)
        .fetch_optional(&mut *tx)
        .await
        .map_err(query_error)?;

        let Some(candidate) = candidate else {
            tx.rollback().await.map_err(query_error)?;
            return Ok(None);
        };
        let id: i64 = candidate.try_get("id").map_err(query_error)?;

        let claimed = sqlx::query(
            "UPDATE listings SET sold = 1, buyer = ? WHERE id = ? AND sold = 0
             RETURNING id, item, price, seller, buyer, sold",
        )
        .bind(buyer)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(query_error)?;

        let listing = claimed.as_ref().map(row_to_listing).transpose()?;
        tx.commit().await.map_err(query_error)?;
        Ok(listing)
    }

    async fn inventory(&self, buyer: &str) -> Result<Vec<Listing>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM listings WHERE buyer = ? AND sold = 1 ORDER BY id")
            .bind(buyer)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        rows_to_listings(&rows)
    }
}
