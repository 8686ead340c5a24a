// ============================================================================
// Common Currencies
// Preset currency table used to seed a registry
// ============================================================================

use crate::domain::Currency;

/// One row of the preset table.
struct Preset {
    code: &'static str,
    scale: u32,
    symbol: &'static str,
    name: &'static str,
    pattern: Option<&'static str>,
    invert_separators: bool,
}

const fn preset(
    code: &'static str,
    scale: u32,
    symbol: &'static str,
    name: &'static str,
) -> Preset {
    Preset {
        code,
        scale,
        symbol,
        name,
        pattern: None,
        invert_separators: false,
    }
}

const PRESETS: &[Preset] = &[
    preset("USD", 2, "$", "US Dollar"),
    preset("AUD", 2, "$", "Australian Dollar"),
    preset("CAD", 2, "$", "Canadian Dollar"),
    preset("NZD", 2, "$", "New Zealand Dollar"),
    preset("SGD", 2, "$", "Singapore Dollar"),
    preset("HKD", 2, "$", "Hong Kong Dollar"),
    preset("GBP", 2, "£", "Pound Sterling"),
    preset("CHF", 2, "CHF ", "Swiss Franc"),
    preset("CNY", 2, "¥", "Yuan Renminbi"),
    preset("INR", 2, "₹", "Indian Rupee"),
    preset("JPY", 0, "¥", "Yen"),
    preset("KRW", 0, "₩", "Won"),
    preset("KWD", 3, "KD ", "Kuwaiti Dinar"),
    preset("BHD", 3, "BD ", "Bahraini Dinar"),
    Preset {
        pattern: Some("S#.##0,00"),
        invert_separators: true,
        ..preset("EUR", 2, "€", "Euro")
    },
    Preset {
        pattern: Some("S #.##0,00"),
        invert_separators: true,
        ..preset("BRL", 2, "R$", "Brazilian Real")
    },
    preset("BTC", 8, "₿", "Bitcoin"),
    preset("ETH", 18, "Ξ", "Ether"),
];

/// The preset currencies: major fiat currencies plus BTC and ETH.
pub fn common_currencies() -> impl Iterator<Item = Currency> {
    PRESETS.iter().filter_map(|p| {
        let currency = Currency::new(p.code, p.scale)
            .ok()?
            .with_symbol(p.symbol)
            .with_name(p.name)
            .with_invert_separators(p.invert_separators);
        Some(match p.pattern {
            Some(pattern) => currency.with_pattern(pattern),
            None => currency,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_presets_are_valid() {
        for currency in common_currencies() {
            assert!(currency.validate().is_ok(), "{} is invalid", currency.code());
        }
    }

    #[test]
    fn test_presets_are_unique() {
        let codes: HashSet<String> = common_currencies().map(|c| c.code().to_string()).collect();
        assert_eq!(codes.len(), PRESETS.len());
    }

    #[test]
    fn test_euro_preset() {
        let eur = common_currencies().find(|c| c.code() == "EUR").unwrap();
        assert_eq!(eur.symbol(), "€");
        assert_eq!(eur.pattern(), "S#.##0,00");
        assert!(eur.invert_separators());
    }
}
