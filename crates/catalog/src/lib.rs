//! `snackkart-catalog` — product read model and the discovery pipeline.
//!
//! Products are owned by the remote gateway; this crate treats each fetch
//! as an immutable snapshot and derives the visible listing page from it.

pub mod discovery;
pub mod product;

pub use discovery::{
    CategoryFilter, DiscoveryPage, FilterState, PriceRange, SortKey, discover, PAGE_SIZE,
};
pub use product::Product;
