//! # CLI Commands
//!
//! One module per subcommand group, mirroring the command tree. Each
//! exposes its clap types plus an async `run(&Database, ...)`.

pub mod invoice;
pub mod product;
pub mod report;
pub mod seed;
pub mod sell;
pub mod settings;
pub mod user;

use anyhow::{bail, Result};
use lumen_core::Money;

/// Parses an operator-typed amount ("150", "149.99") into Money.
///
/// At most two decimal places; a third would silently drop precision,
/// so it is rejected instead.
pub fn parse_money(input: &str) -> Result<Money> {
    let input = input.trim();
    if input.is_empty() {
        bail!("amount is empty");
    }

    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };

    let (major_str, minor_str) = match digits.split_once('.') {
        Some((major, minor)) => (major, minor),
        None => (digits, ""),
    };

    if minor_str.len() > 2 {
        bail!("amount '{input}' has more than two decimal places");
    }

    let major: i64 = if major_str.is_empty() {
        0
    } else {
        major_str
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid amount: '{input}'"))?
    };

    let minor: i64 = if minor_str.is_empty() {
        0
    } else {
        // "5.5" means 5.50, not 5.05
        let padded = format!("{minor_str:0<2}");
        padded
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid amount: '{input}'"))?
    };

    let cents = major * 100 + minor;
    Ok(Money::from_cents(if negative { -cents } else { cents }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_money() {
        assert_eq!(parse_money("150").unwrap().cents(), 15000);
        assert_eq!(parse_money("149.99").unwrap().cents(), 14999);
        assert_eq!(parse_money("5.5").unwrap().cents(), 550);
        assert_eq!(parse_money(".75").unwrap().cents(), 75);
        assert_eq!(parse_money("0").unwrap().cents(), 0);

        assert!(parse_money("1.999").is_err());
        assert!(parse_money("abc").is_err());
        assert!(parse_money("").is_err());
    }
}
