//! Status enums for orders and inquiries.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// Orders are paid by manual bank transfer, so every order starts as
/// `Pending` until the payment receipt has been checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Whether the order has reached a final state.
    #[must_use]
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

/// Customer inquiry status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InquiryStatus {
    #[default]
    New,
    Resolved,
}
