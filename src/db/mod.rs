pub mod auctiondb;
pub mod chatdb;
pub mod contractdb;
pub mod contractordb;
pub mod db;
pub mod reviewdb;
pub mod userdb;

/// Unique-constraint violations are the enforcement point for "at most one"
/// invariants (contract per auction, review per reviewer+contractor, profile
/// per user, chat per pair), so handlers need to tell them apart from other
/// database failures.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
