//! Customer inquiries sent from product pages and the contact form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Email, EmailError, InquiryId, InquiryStatus, ProductId};

/// Reasons an inquiry is rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InquiryError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
}

/// An inquiry as submitted by a customer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewInquiry {
    pub name: String,
    pub email: Option<String>,
    pub mobile: String,
    pub message: String,
    pub product_id: Option<ProductId>,
    pub product_name: Option<String>,
}

/// A recorded inquiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: InquiryId,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub email: Option<Email>,
    pub mobile: String,
    pub message: String,
    pub product_id: Option<ProductId>,
    pub product_name: Option<String>,
    pub status: InquiryStatus,
}

impl NewInquiry {
    /// Validate the inquiry and assign an identity. New inquiries have status `New`.
    ///
    /// # Errors
    ///
    /// Returns [`InquiryError`] if name, mobile or message are blank, or if an
    /// email was given but is malformed.
    pub fn into_inquiry(
        self,
        id: InquiryId,
        created_at: DateTime<Utc>,
    ) -> Result<Inquiry, InquiryError> {
        let name = non_blank(&self.name, "name")?;
        let mobile = non_blank(&self.mobile, "mobile")?;
        let message = non_blank(&self.message, "message")?;
        let email = match self.email.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(Email::parse(raw)?),
            _ => None,
        };

        Ok(Inquiry {
            id,
            created_at,
            name,
            email,
            mobile,
            message,
            product_id: self.product_id,
            product_name: self.product_name,
            status: InquiryStatus::New,
        })
    }
}

fn non_blank(value: &str, field: &'static str) -> Result<String, InquiryError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(InquiryError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn inquiry() -> NewInquiry {
        NewInquiry {
            name: "Ravi".to_string(),
            email: Some(String::new()),
            mobile: "9876543210".to_string(),
            message: "Is the emerald certified?".to_string(),
            product_id: Some(ProductId::new(9)),
            product_name: Some("Emerald (Panna)".to_string()),
        }
    }

    #[test]
    fn test_blank_email_is_treated_as_absent() {
        let recorded = inquiry()
            .into_inquiry(InquiryId::generate(), Utc::now())
            .unwrap();
        assert_eq!(recorded.email, None);
        assert_eq!(recorded.status, InquiryStatus::New);
    }

    #[test]
    fn test_rejects_blank_message_and_bad_email() {
        let mut blank = inquiry();
        blank.message = " ".to_string();
        assert_eq!(
            blank.into_inquiry(InquiryId::generate(), Utc::now()),
            Err(InquiryError::MissingField("message"))
        );

        let mut bad = inquiry();
        bad.email = Some("ravi".to_string());
        assert!(matches!(
            bad.into_inquiry(InquiryId::generate(), Utc::now()),
            Err(InquiryError::InvalidEmail(_))
        ));
    }
}
