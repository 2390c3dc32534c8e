//! skuwatch - catalog discovery and SKU stock tracking for a luxury
//! retailer's storefront.
//!
//! Two halves share one HTTP stack:
//! - [`catalog`] walks the public storefront (regions, navigation
//!   categories, product listings) with CSS selectors.
//! - [`resolver`] queries the catalog REST API for product links and
//!   back-order state, and [`server`] exposes that as a small JSON service.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod json_nav;
pub mod resolver;
pub mod scrapers;
pub mod server;

#[cfg(test)]
mod test_utils;
