//! Lumera Core - Pricing, catalog and cart types.
//!
//! This crate provides the domain used by every Lumera component:
//! - `storefront` - Public JSON storefront service
//! - `cli` - Command-line tools for quoting prices and exporting the catalog
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. Every operation takes its inputs by value or reference
//! and returns a new value, so it can be called from a request handler, a CLI or a
//! test without any setup.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, money, contact details and statuses
//! - [`catalog`] - Products and categories
//! - [`customization`] - Purchase type, jewelry type, metal and ring size selection
//! - [`pricing`] - Unit price computation for a customized product
//! - [`cart`] - Line-item identity and cart aggregation
//! - [`wishlist`] - Product-keyed wishlist
//! - [`order`] - Checkout payloads and orders
//! - [`inquiry`] - Customer inquiries
//! - [`bank`] - Bank-transfer payment details

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod bank;
pub mod cart;
pub mod catalog;
pub mod customization;
pub mod inquiry;
pub mod order;
pub mod pricing;
pub mod types;
pub mod wishlist;

pub use bank::BankDetails;
pub use cart::{Cart, LineItem, LineKey, ProductSnapshot, derive_key};
pub use catalog::{Category, CategoryKind, CategorySummary, Product};
pub use customization::{
    CustomizationSelection, JewelryType, MetalType, PurchaseType, RingSize, RingSizeError,
    SelectionError, UnknownOptionError,
};
pub use inquiry::{Inquiry, InquiryError, NewInquiry};
pub use order::{CheckoutError, Customer, CustomerDetails, NewOrder, Order};
pub use pricing::{PriceBreakdown, PricingEngine};
pub use types::*;
pub use wishlist::{Wishlist, WishlistItem};
