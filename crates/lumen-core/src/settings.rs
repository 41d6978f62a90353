//! # Store Settings
//!
//! The single global configuration record: store identity, tax
//! configuration, print preferences and appearance.
//!
//! ## Explicit Configuration
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Settings are loaded once, then passed BY VALUE where needed.   │
//! │                                                                 │
//! │  load() ──► StoreSettings ──┬──► &TaxConfig ──► compute_totals  │
//! │                             ├──► receipt rendering              │
//! │                             └──► CLI display (currency symbol)  │
//! │                                                                 │
//! │  No calculation reads a global; the tax configuration handed    │
//! │  to checkout is an immutable snapshot.                          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// Tax Configuration
// =============================================================================

/// Tax (VAT) configuration, passed explicitly into every total calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxConfig {
    /// Whether tax is applied at all.
    pub enabled: bool,

    /// Tax rate in basis points (1500 = 15%).
    pub rate_bps: u32,

    /// Whether listed prices already contain the tax component.
    /// When true the tax is extracted from the taxable amount rather
    /// than added on top of it.
    pub prices_include_tax: bool,
}

impl TaxConfig {
    /// Tax switched off entirely.
    pub const fn disabled() -> Self {
        TaxConfig {
            enabled: false,
            rate_bps: 0,
            prices_include_tax: false,
        }
    }

    /// Exclusive tax at the given rate (price + tax shown separately).
    pub const fn exclusive(rate_bps: u32) -> Self {
        TaxConfig {
            enabled: true,
            rate_bps,
            prices_include_tax: false,
        }
    }

    /// Inclusive tax at the given rate (listed prices contain the tax).
    pub const fn inclusive(rate_bps: u32) -> Self {
        TaxConfig {
            enabled: true,
            rate_bps,
            prices_include_tax: true,
        }
    }

    /// Rate as a display percentage.
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.rate_bps as f64 / 100.0
    }
}

impl Default for TaxConfig {
    /// 15% exclusive VAT, the original store's configuration.
    fn default() -> Self {
        TaxConfig::exclusive(1500)
    }
}

// =============================================================================
// Print Preferences
// =============================================================================

/// Receipt paper size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    /// 80mm thermal roll (default).
    #[serde(rename = "80mm")]
    Mm80,
    /// 58mm thermal roll.
    #[serde(rename = "58mm")]
    Mm58,
    /// Full A4 page.
    #[serde(rename = "A4")]
    A4,
}

impl PaperSize {
    /// Character width used when rendering plain-text receipts.
    pub const fn columns(&self) -> usize {
        match self {
            PaperSize::Mm80 => 42,
            PaperSize::Mm58 => 32,
            PaperSize::A4 => 64,
        }
    }
}

impl Default for PaperSize {
    fn default() -> Self {
        PaperSize::Mm80
    }
}

// =============================================================================
// Store Settings
// =============================================================================

/// The global settings record.
///
/// Persisted as a single row; a missing or malformed stored value falls
/// back to these defaults wholesale rather than failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Store display name (header of every receipt).
    pub store_name: String,

    /// VAT registration number printed on receipts.
    pub tax_number: String,

    /// Contact phone number.
    pub phone: String,

    /// Store address (free-form, may span lines).
    pub address: String,

    /// Currency symbol for display. Calculations never use it.
    pub currency: String,

    /// Tax configuration handed to checkout.
    pub tax: TaxConfig,

    /// Receipt paper size.
    pub paper_size: PaperSize,

    /// Thank-you line at the bottom of receipts.
    pub footer_message: String,

    /// Return policy text printed under the footer.
    pub return_policy: String,

    /// Dark mode preference (presentation only).
    pub dark_mode: bool,

    /// BCP 47 language tag for display formatting.
    pub language: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            store_name: "Lumen Trading Est.".to_string(),
            tax_number: "310029384800003".to_string(),
            phone: "966500000000".to_string(),
            address: "Riyadh, Saudi Arabia".to_string(),
            currency: "SAR".to_string(),
            tax: TaxConfig::default(),
            paper_size: PaperSize::default(),
            footer_message: "Thank you for your visit - see you soon".to_string(),
            return_policy: "Goods may be exchanged within 3 days of purchase with receipt."
                .to_string(),
            dark_mode: false,
            language: "en".to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tax_is_fifteen_percent_exclusive() {
        let tax = TaxConfig::default();
        assert!(tax.enabled);
        assert_eq!(tax.rate_bps, 1500);
        assert!(!tax.prices_include_tax);
        assert!((tax.percentage() - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_settings_json_round_trip() {
        let settings = StoreSettings {
            store_name: "Corner Shop".into(),
            tax: TaxConfig::inclusive(500),
            paper_size: PaperSize::Mm58,
            dark_mode: true,
            ..StoreSettings::default()
        };

        let json = serde_json::to_string(&settings).unwrap();
        let back: StoreSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_paper_size_serializes_as_labels() {
        assert_eq!(serde_json::to_string(&PaperSize::Mm80).unwrap(), "\"80mm\"");
        assert_eq!(serde_json::to_string(&PaperSize::A4).unwrap(), "\"A4\"");
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        // Partial blobs deserialize with defaults filled in
        let partial: StoreSettings = serde_json::from_str(r#"{"store_name":"X"}"#).unwrap();
        assert_eq!(partial.store_name, "X");
        assert_eq!(partial.tax, TaxConfig::default());
    }
}
