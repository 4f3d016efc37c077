//! Per-locale number symbols.

use msgspec_core::LocaleTag;

/// No-break space, used between numbers and units.
pub const NBSP: char = '\u{a0}';

/// Narrow no-break space, the French and Russian grouping separator.
pub const NARROW_NBSP: char = '\u{202f}';

/// Currency symbol and its placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencySymbol {
    /// Symbol text, e.g. `€` or `CHF`.
    pub symbol: &'static str,
    /// Whether the symbol precedes the amount.
    pub prefix: bool,
    /// Whether a no-break space separates symbol and amount.
    pub spaced: bool,
    /// Fraction digits of the currency.
    pub digits: usize,
}

/// Separators and unit placement for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleSymbols {
    /// Decimal separator.
    pub decimal: char,
    /// Grouping separator.
    pub grouping: char,
    /// Separator between a number and `%`, if any.
    pub percent_separator: Option<char>,
    /// Local currency.
    pub currency: CurrencySymbol,
}

impl LocaleSymbols {
    /// Symbols for `locale`, keyed on its language and region.
    #[must_use]
    pub fn for_locale(locale: &LocaleTag) -> Self {
        let language = locale.language();
        let region = locale.region();

        let (decimal, grouping) = match (language, region) {
            ("de" | "it" | "fr", Some("CH" | "LI")) => ('.', '\u{2019}'),
            ("fr" | "ru", _) => (',', NARROW_NBSP),
            ("pl" | "cs" | "sv" | "fi" | "nb" | "no" | "uk", _) => (',', NBSP),
            ("de" | "es" | "it" | "pt" | "nl" | "da" | "id" | "tr", _) => (',', '.'),
            _ => ('.', ','),
        };

        let percent_separator = match language {
            "fr" => Some(NARROW_NBSP),
            "de" | "es" | "ru" | "sv" | "fi" | "nb" | "no" | "da" | "cs" | "pl" => Some(NBSP),
            _ => None,
        };

        Self {
            decimal,
            grouping,
            percent_separator,
            currency: currency_for(language, region),
        }
    }
}

fn currency_for(language: &str, region: Option<&str>) -> CurrencySymbol {
    const fn symbol(symbol: &'static str, prefix: bool, spaced: bool, digits: usize) -> CurrencySymbol {
        CurrencySymbol {
            symbol,
            prefix,
            spaced,
            digits,
        }
    }

    match region {
        Some("US" | "CA" | "AU" | "NZ") => symbol("$", true, false, 2),
        Some("GB") => symbol("£", true, false, 2),
        Some("JP") => symbol("¥", true, false, 0),
        Some("CN") => symbol("¥", true, false, 2),
        Some("KR") => symbol("₩", true, false, 0),
        Some("IN") => symbol("₹", true, false, 2),
        Some("CH") => symbol("CHF", true, true, 2),
        Some("BR") => symbol("R$", true, true, 2),
        Some("RU") => symbol("₽", false, true, 2),
        Some(
            "DE" | "FR" | "ES" | "IT" | "NL" | "AT" | "BE" | "FI" | "IE" | "PT" | "LU" | "GR"
            | "SK" | "SI" | "EE" | "LV" | "LT" | "MT" | "CY",
        ) => match language {
            "en" => symbol("€", true, false, 2),
            "nl" => symbol("€", true, true, 2),
            _ => symbol("€", false, true, 2),
        },
        _ => match language {
            "en" | "ja" | "zh" | "ko" => symbol("¤", true, false, 2),
            _ => symbol("¤", false, true, 2),
        },
    }
}
