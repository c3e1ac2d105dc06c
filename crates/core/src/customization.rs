//! Customization options a shopper can choose for a product.
//!
//! Every axis is a closed enum so that surcharge tables and line keys are
//! checked exhaustively at compile time. A [`CustomizationSelection`] may carry
//! stale values from the UI (a metal picked before switching back to a loose
//! stone, say); [`CustomizationSelection::normalized_for`] reduces it to the
//! values that actually matter for a given [`CategoryKind`].

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::CategoryKind;

/// Error returned when a ring size is outside the supported range.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("ring size {0} is outside {min}..={max}", min = RingSize::MIN, max = RingSize::MAX)]
pub struct RingSizeError(pub u8);

/// Error returned when a selection is incomplete for the product it targets.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    #[error("a jewelry type is required when mounting a stone")]
    MissingJewelryType,
    #[error("a metal type is required for {0}")]
    MissingMetalType(JewelryType),
    #[error("a ring size is required")]
    MissingRingSize,
}

/// Error returned when parsing an option name fails.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {axis}: {value}")]
pub struct UnknownOptionError {
    pub axis: &'static str,
    pub value: String,
}

/// How a gemstone is bought.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseType {
    #[default]
    Loose,
    Mounted,
}

impl PurchaseType {
    /// Stable code used in line keys.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Loose => "loose",
            Self::Mounted => "mounted",
        }
    }
}

/// Jewelry setting a gemstone can be mounted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JewelryType {
    #[serde(rename = "Ring", alias = "ring")]
    Ring,
    #[serde(rename = "Pendant", alias = "pendant")]
    Pendant,
    #[serde(
        rename = "Engagement Ring",
        alias = "EngagementRing",
        alias = "engagement_ring"
    )]
    EngagementRing,
    #[serde(rename = "Other", alias = "other")]
    Other,
}

impl JewelryType {
    pub const ALL: [Self; 4] = [Self::Ring, Self::Pendant, Self::EngagementRing, Self::Other];

    /// Stable code used in line keys.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ring => "ring",
            Self::Pendant => "pendant",
            Self::EngagementRing => "engagement-ring",
            Self::Other => "other",
        }
    }

    /// Name shown to customers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ring => "Ring",
            Self::Pendant => "Pendant",
            Self::EngagementRing => "Engagement Ring",
            Self::Other => "Other",
        }
    }

    /// Whether this setting is worn on a finger and therefore sized.
    #[must_use]
    pub const fn is_ring(self) -> bool {
        matches!(self, Self::Ring | Self::EngagementRing)
    }
}

impl fmt::Display for JewelryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for JewelryType {
    type Err = UnknownOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|j| j.code().eq_ignore_ascii_case(wanted) || j.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownOptionError {
                axis: "jewelry type",
                value: s.to_string(),
            })
    }
}

/// Metal and karat of a jewelry setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetalType {
    #[serde(rename = "14K Gold – Yellow", alias = "Gold – Yellow (14K)")]
    Gold14kYellow,
    #[serde(rename = "14K Gold – White", alias = "Gold – White (14K)")]
    Gold14kWhite,
    #[serde(rename = "18K Gold – Yellow", alias = "Gold – Yellow (18K)")]
    Gold18kYellow,
    #[serde(rename = "18K Gold – White", alias = "Gold – White (18K)")]
    Gold18kWhite,
    #[serde(rename = "22K Gold – Yellow", alias = "Gold – Yellow (22K)")]
    Gold22kYellow,
    #[serde(rename = "22K Gold – White", alias = "Gold – White (22K)")]
    Gold22kWhite,
    #[serde(rename = "Silver")]
    Silver,
    #[serde(rename = "Panch Dhatu")]
    PanchDhatu,
}

impl MetalType {
    pub const ALL: [Self; 8] = [
        Self::Gold14kYellow,
        Self::Gold14kWhite,
        Self::Gold18kYellow,
        Self::Gold18kWhite,
        Self::Gold22kYellow,
        Self::Gold22kWhite,
        Self::Silver,
        Self::PanchDhatu,
    ];

    /// Stable code used in line keys.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Gold14kYellow => "gold-14k-yellow",
            Self::Gold14kWhite => "gold-14k-white",
            Self::Gold18kYellow => "gold-18k-yellow",
            Self::Gold18kWhite => "gold-18k-white",
            Self::Gold22kYellow => "gold-22k-yellow",
            Self::Gold22kWhite => "gold-22k-white",
            Self::Silver => "silver",
            Self::PanchDhatu => "panch-dhatu",
        }
    }

    /// Name shown to customers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Gold14kYellow => "14K Gold – Yellow",
            Self::Gold14kWhite => "14K Gold – White",
            Self::Gold18kYellow => "18K Gold – Yellow",
            Self::Gold18kWhite => "18K Gold – White",
            Self::Gold22kYellow => "22K Gold – Yellow",
            Self::Gold22kWhite => "22K Gold – White",
            Self::Silver => "Silver",
            Self::PanchDhatu => "Panch Dhatu",
        }
    }
}

impl fmt::Display for MetalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MetalType {
    type Err = UnknownOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.code().eq_ignore_ascii_case(wanted) || m.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownOptionError {
                axis: "metal type",
                value: s.to_string(),
            })
    }
}

/// A ring size in the supported range `5..=30`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RingSize(u8);

impl RingSize {
    pub const MIN: u8 = 5;
    pub const MAX: u8 = 30;
    /// Size priced at the base price; larger sizes carry a surcharge.
    pub const BASELINE: Self = Self(Self::MIN);
    /// Size preselected on product pages.
    pub const DEFAULT: Self = Self(15);

    /// Create a ring size, rejecting values outside `5..=30`.
    ///
    /// # Errors
    ///
    /// Returns [`RingSizeError`] for out-of-range sizes. Sizes are never clamped.
    pub const fn new(size: u8) -> Result<Self, RingSizeError> {
        if size < Self::MIN || size > Self::MAX {
            return Err(RingSizeError(size));
        }
        Ok(Self(size))
    }

    /// Get the underlying size.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Number of size steps above the baseline.
    #[must_use]
    pub const fn steps_above_baseline(self) -> u8 {
        self.0.saturating_sub(Self::BASELINE.0)
    }
}

impl fmt::Display for RingSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for RingSize {
    type Error = RingSizeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RingSize> for u8 {
    fn from(size: RingSize) -> Self {
        size.0
    }
}

/// The customization options chosen for one product.
///
/// Missing fields deserialize to their empty value, so `{"jewelryType": null}`
/// and `{}` describe the same selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomizationSelection {
    pub purchase_type: PurchaseType,
    pub jewelry_type: Option<JewelryType>,
    pub metal_type: Option<MetalType>,
    pub ring_size: Option<RingSize>,
}

impl CustomizationSelection {
    /// A loose stone or an uncustomized product.
    #[must_use]
    pub const fn loose() -> Self {
        Self {
            purchase_type: PurchaseType::Loose,
            jewelry_type: None,
            metal_type: None,
            ring_size: None,
        }
    }

    /// A stone mounted into `jewelry` made of `metal`.
    #[must_use]
    pub const fn mounted(jewelry: JewelryType, metal: MetalType) -> Self {
        Self {
            purchase_type: PurchaseType::Mounted,
            jewelry_type: Some(jewelry),
            metal_type: Some(metal),
            ring_size: None,
        }
    }

    /// Set the ring size.
    #[must_use]
    pub const fn with_ring_size(mut self, size: RingSize) -> Self {
        self.ring_size = Some(size);
        self
    }

    /// Whether mounting surcharges apply.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        matches!(self.purchase_type, PurchaseType::Mounted)
    }

    /// Whether the ring size affects this selection of a `kind` product.
    #[must_use]
    pub fn ring_size_applies(&self, kind: CategoryKind) -> bool {
        kind.is_sized() || (self.is_mounted() && self.jewelry_type.is_some_and(JewelryType::is_ring))
    }

    /// Reduce the selection to the values that matter for a `kind` product.
    ///
    /// - only gemstones can be mounted
    /// - a loose purchase has no jewelry or metal
    /// - a metal without a jewelry type is meaningless
    /// - the ring size is kept only where it applies
    #[must_use]
    pub fn normalized_for(self, kind: CategoryKind) -> Self {
        let purchase_type = if kind.is_mountable() {
            self.purchase_type
        } else {
            PurchaseType::Loose
        };

        let (jewelry_type, metal_type) = match purchase_type {
            PurchaseType::Loose => (None, None),
            PurchaseType::Mounted => (
                self.jewelry_type,
                self.jewelry_type.and(self.metal_type),
            ),
        };

        let mut normalized = Self {
            purchase_type,
            jewelry_type,
            metal_type,
            ring_size: self.ring_size,
        };
        if !normalized.ring_size_applies(kind) {
            normalized.ring_size = None;
        }
        normalized
    }

    /// Check that every option required for a `kind` product has been chosen.
    ///
    /// # Errors
    ///
    /// Returns the first missing option as a [`SelectionError`].
    pub fn validate(&self, kind: CategoryKind) -> Result<(), SelectionError> {
        let effective = self.normalized_for(kind);
        if effective.is_mounted() {
            let jewelry = effective
                .jewelry_type
                .ok_or(SelectionError::MissingJewelryType)?;
            if effective.metal_type.is_none() {
                return Err(SelectionError::MissingMetalType(jewelry));
            }
        }
        if effective.ring_size_applies(kind) && effective.ring_size.is_none() {
            return Err(SelectionError::MissingRingSize);
        }
        Ok(())
    }

    /// Human-readable description of the selection, shown on cart lines and orders.
    #[must_use]
    pub fn label(&self, kind: CategoryKind) -> String {
        let effective = self.normalized_for(kind);
        let size = effective.ring_size.map(|s| format!("Size: {s}"));

        match kind {
            CategoryKind::Ring => size.unwrap_or_default(),
            CategoryKind::Gemstone if !effective.is_mounted() => "Loose Stone".to_string(),
            CategoryKind::Gemstone => {
                let jewelry = effective.jewelry_type.map_or("Jewelry", JewelryType::label);
                let mut label = match effective.metal_type {
                    Some(metal) => format!("Mounted in {jewelry} ({metal})"),
                    None => format!("Mounted in {jewelry}"),
                };
                if let Some(size) = size {
                    label.push_str(", ");
                    label.push_str(&size);
                }
                label
            }
            CategoryKind::Other => String::new(),
        }
    }
}
