//! Bank-transfer payment details shown at checkout.

use serde::{Deserialize, Serialize};

/// Account the customer pays into before uploading a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDetails {
    pub account_holder: String,
    pub bank_name: String,
    pub account_number: String,
    pub ifsc_code: String,
    pub account_type: String,
    pub upi_id: String,
    pub qr_image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gst_details: Option<String>,
}
