//! Checkout payloads and orders.
//!
//! An order is a frozen copy of the cart lines plus the customer's shipping
//! details and, for bank-transfer payments, the URL of the uploaded payment
//! receipt. The total is always recomputed from the lines; it is never taken
//! from the client.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, LineItem};
use crate::types::{Email, EmailError, OrderId, OrderStatus};

/// Reasons a checkout cannot be turned into an order.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
    #[error("mobile number must contain 10 to 15 digits")]
    InvalidMobile,
    #[error("cart is empty")]
    EmptyCart,
}

/// Shipping and contact details entered at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerDetails {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub address: String,
    pub city: Option<String>,
    pub zip_code: Option<String>,
}

/// Validated customer details stored on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub name: String,
    pub email: Email,
    pub mobile: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
}

impl CustomerDetails {
    /// Validate the details, trimming whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError`] for blank required fields, a malformed email
    /// or a mobile number without 10 to 15 digits.
    pub fn validate(self) -> Result<Customer, CheckoutError> {
        let name = required(self.name, "name")?;
        let email = Email::parse(&required(self.email, "email")?)?;
        let mobile = required(self.mobile, "mobile")?;
        let address = required(self.address, "address")?;

        let digits = mobile.chars().filter(char::is_ascii_digit).count();
        let allowed = mobile
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'));
        if !allowed || !(10..=15).contains(&digits) {
            return Err(CheckoutError::InvalidMobile);
        }

        Ok(Customer {
            name,
            email,
            mobile,
            address,
            city: optional(self.city),
            zip_code: optional(self.zip_code),
        })
    }
}

fn required(value: String, field: &'static str) -> Result<String, CheckoutError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CheckoutError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// An order ready to be recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub customer: Customer,
    pub items: Vec<LineItem>,
    pub total_amount: Decimal,
    pub payment_receipt_url: Option<String>,
}

impl NewOrder {
    /// Build an order from the checkout form and the shopper's cart.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] for an empty cart, or the first
    /// validation failure of the customer details.
    pub fn from_checkout(
        details: CustomerDetails,
        cart: &Cart,
        payment_receipt_url: Option<String>,
    ) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let customer = details.validate()?;

        Ok(Self {
            customer,
            items: cart.items().to_vec(),
            total_amount: cart.subtotal(),
            payment_receipt_url: optional(payment_receipt_url),
        })
    }

    /// Assign an identity and creation time. New orders are always pending.
    #[must_use]
    pub fn into_order(self, id: OrderId, created_at: DateTime<Utc>) -> Order {
        Order {
            id,
            created_at,
            customer: self.customer,
            items: self.items,
            total_amount: self.total_amount,
            payment_receipt_url: self.payment_receipt_url,
            status: OrderStatus::Pending,
        }
    }
}

/// A recorded order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub created_at: DateTime<Utc>,
    pub customer: Customer,
    pub items: Vec<LineItem>,
    pub total_amount: Decimal,
    pub payment_receipt_url: Option<String>,
    pub status: OrderStatus,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::ProductSnapshot;
    use crate::catalog::CategoryKind;
    use crate::customization::CustomizationSelection;
    use crate::types::ProductId;

    fn details() -> CustomerDetails {
        CustomerDetails {
            name: " Asha Rao ".to_string(),
            email: "asha@example.in".to_string(),
            mobile: "+91 98765 43210".to_string(),
            address: "12 MG Road".to_string(),
            city: Some("Jaipur".to_string()),
            zip_code: Some("  ".to_string()),
        }
    }

    fn cart() -> Cart {
        let snapshot = ProductSnapshot {
            name: "Ruby (Manik)".to_string(),
            image: String::new(),
            hint: String::new(),
            sub_heading: None,
        };
        let selection = CustomizationSelection::loose();
        Cart::new()
            .add_line_item(
                ProductId::new(10),
                CategoryKind::Gemstone,
                &selection,
                Decimal::from(3500),
                "Loose Stone".to_string(),
                snapshot.clone(),
            )
            .add_line_item(
                ProductId::new(10),
                CategoryKind::Gemstone,
                &selection,
                Decimal::from(3500),
                "Loose Stone".to_string(),
                snapshot,
            )
    }

    #[test]
    fn test_from_checkout_computes_total() {
        let order = NewOrder::from_checkout(details(), &cart(), Some("https://r.example/1.png".into()))
            .unwrap();

        assert_eq!(order.total_amount, Decimal::from(7000));
        assert_eq!(order.customer.name, "Asha Rao");
        assert_eq!(order.customer.zip_code, None);
        assert_eq!(order.items.len(), 1);
    }

    #[test]
    fn test_from_checkout_rejects_empty_cart() {
        assert_eq!(
            NewOrder::from_checkout(details(), &Cart::new(), None),
            Err(CheckoutError::EmptyCart)
        );
    }

    #[test]
    fn test_validate_reports_missing_fields() {
        let mut d = details();
        d.address = "   ".to_string();
        assert_eq!(d.validate(), Err(CheckoutError::MissingField("address")));

        let mut d = details();
        d.email = "not-an-email".to_string();
        assert!(matches!(d.validate(), Err(CheckoutError::InvalidEmail(_))));

        let mut d = details();
        d.mobile = "12345".to_string();
        assert_eq!(d.validate(), Err(CheckoutError::InvalidMobile));
    }

    #[test]
    fn test_into_order_is_pending() {
        let order = NewOrder::from_checkout(details(), &cart(), None)
            .unwrap()
            .into_order(OrderId::generate(), Utc::now());
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_receipt_url, None);
    }
}
