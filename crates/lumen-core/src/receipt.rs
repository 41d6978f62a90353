//! # Receipt Rendering
//!
//! Plain-text receipt rendering and the machine-readable QR payload.
//!
//! ## Receipt Layout (80mm, 42 columns)
//! ```text
//! ┌──────────────────────────────────────────┐
//! │            Lumen Trading Est.            │  store header, centered
//! │          VAT: 310029384800003            │
//! │------------------------------------------│
//! │  INV-20260829-142233-0917                │  reference + timestamp
//! │------------------------------------------│
//! │  Lavender Perfume                        │  one block per line item
//! │    2 x 150.00                300.00      │
//! │------------------------------------------│
//! │  Subtotal                    300.00      │  money block
//! │  Discount                    -50.00      │  (omitted when zero)
//! │  VAT 15%                      37.50      │
//! │  TOTAL                   SAR 287.50      │
//! │------------------------------------------│
//! │  Thank you for your visit                │  footer + return policy
//! └──────────────────────────────────────────┘
//! ```
//!
//! The renderer produces a `String`; printing, PDF generation and QR
//! image encoding are the caller's concern.

use crate::settings::StoreSettings;
use crate::types::{Invoice, InvoiceItem, PaymentMethod};

// =============================================================================
// QR Payload
// =============================================================================

/// The pipe-delimited payload encoded into the receipt QR code:
/// `invoice_number|total|tax`, amounts with two decimals.
///
/// ## Example
/// ```rust
/// use lumen_core::receipt::qr_payload;
/// # use lumen_core::types::{Invoice, PaymentMethod};
/// # use chrono::Utc;
/// # let invoice = Invoice {
/// #     id: "x".into(),
/// #     invoice_number: "INV-20260829-142233-0917".into(),
/// #     issued_at: Utc::now(),
/// #     subtotal_cents: 15000, discount_cents: 0,
/// #     tax_cents: 2250, total_cents: 17250,
/// #     payment_method: PaymentMethod::Cash,
/// #     paid_cash_cents: Some(17250), paid_card_cents: Some(0),
/// # };
/// assert_eq!(qr_payload(&invoice), "INV-20260829-142233-0917|172.50|22.50");
/// ```
pub fn qr_payload(invoice: &Invoice) -> String {
    format!(
        "{}|{}|{}",
        invoice.invoice_number,
        invoice.total(),
        invoice.tax()
    )
}

// =============================================================================
// Text Renderer
// =============================================================================

/// Renders a finalized invoice as a plain-text receipt sized to the
/// configured paper width.
pub fn render_text(
    invoice: &Invoice,
    items: &[InvoiceItem],
    settings: &StoreSettings,
) -> String {
    let width = settings.paper_size.columns();
    let rule = "-".repeat(width);
    let mut out = String::new();

    // Header
    push_centered(&mut out, &settings.store_name, width);
    if !settings.tax_number.is_empty() {
        push_centered(&mut out, &format!("VAT: {}", settings.tax_number), width);
    }
    if !settings.phone.is_empty() {
        push_centered(&mut out, &settings.phone, width);
    }
    if !settings.address.is_empty() {
        push_centered(&mut out, &settings.address, width);
    }
    out.push_str(&rule);
    out.push('\n');

    // Reference block
    out.push_str(&invoice.invoice_number);
    out.push('\n');
    out.push_str(&invoice.issued_at.format("%Y-%m-%d %H:%M:%S").to_string());
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    // Line items
    for item in items {
        out.push_str(&item.name_snapshot);
        out.push('\n');
        push_amount_line(
            &mut out,
            &format!("  {} x {}", item.quantity, item.unit_price()),
            &item.line_total().to_string(),
            width,
        );
    }
    out.push_str(&rule);
    out.push('\n');

    // Money block
    push_amount_line(&mut out, "Subtotal", &invoice.subtotal().to_string(), width);
    if invoice.discount_cents > 0 {
        push_amount_line(
            &mut out,
            "Discount",
            &format!("-{}", invoice.discount()),
            width,
        );
    }
    if invoice.tax_cents > 0 {
        let label = if settings.tax.prices_include_tax {
            format!("VAT {}% (incl.)", settings.tax.percentage())
        } else {
            format!("VAT {}%", settings.tax.percentage())
        };
        push_amount_line(&mut out, &label, &invoice.tax().to_string(), width);
    }
    push_amount_line(
        &mut out,
        "TOTAL",
        &format!("{} {}", settings.currency, invoice.total()),
        width,
    );

    // Payment block
    match invoice.payment_method {
        PaymentMethod::Mixed => {
            if let Some(cash) = invoice.paid_cash_cents {
                push_amount_line(
                    &mut out,
                    "Paid cash",
                    &crate::money::Money::from_cents(cash).to_string(),
                    width,
                );
            }
            if let Some(card) = invoice.paid_card_cents {
                push_amount_line(
                    &mut out,
                    "Paid card",
                    &crate::money::Money::from_cents(card).to_string(),
                    width,
                );
            }
        }
        method => {
            push_amount_line(&mut out, "Paid by", &method.to_string(), width);
        }
    }
    out.push_str(&rule);
    out.push('\n');

    // Footer
    if !settings.footer_message.is_empty() {
        push_centered(&mut out, &settings.footer_message, width);
    }
    if !settings.return_policy.is_empty() {
        push_centered(&mut out, &settings.return_policy, width);
    }
    push_centered(&mut out, &qr_payload(invoice), width);

    out
}

/// Centers a line within the paper width. Lines wider than the paper are
/// emitted as-is rather than truncated.
fn push_centered(out: &mut String, text: &str, width: usize) {
    let len = text.chars().count();
    if len < width {
        let pad = (width - len) / 2;
        out.push_str(&" ".repeat(pad));
    }
    out.push_str(text);
    out.push('\n');
}

/// Emits `label` left-aligned and `amount` right-aligned on one line.
fn push_amount_line(out: &mut String, label: &str, amount: &str, width: usize) {
    let used = label.chars().count() + amount.chars().count();
    if used < width {
        out.push_str(label);
        out.push_str(&" ".repeat(width - used));
        out.push_str(amount);
    } else {
        out.push_str(label);
        out.push(' ');
        out.push_str(amount);
    }
    out.push('\n');
}

// =============================================================================
// Unit Tests
// =============================================================================
