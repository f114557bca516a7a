use chrono::NaiveDate;

/// Pattern every date column is parsed with: `DD-MM-YYYY`.
pub const DATE_PATTERN: &str = "%d-%m-%Y";

// ── DateFormat ────────────────────────────────────────────────────────────────

/// Immutable date parser/renderer, built once and passed to whoever needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
}

impl DateFormat {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Parse `text` (surrounding whitespace ignored) with the configured
    /// pattern. Trailing characters are rejected.
    pub fn parse(&self, text: &str) -> Result<NaiveDate, chrono::ParseError> {
        NaiveDate::parse_from_str(text.trim(), &self.pattern)
    }

    pub fn format(&self, date: NaiveDate) -> String {
        date.format(&self.pattern).to_string()
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self::new(DATE_PATTERN)
    }
}

// ── CurrencyFormat ────────────────────────────────────────────────────────────

/// Immutable currency renderer: symbol, thousands separators and a fixed
/// number of decimals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    symbol: String,
    decimals: u32,
}

impl CurrencyFormat {
    pub fn new(symbol: impl Into<String>, decimals: u32) -> Self {
        Self {
            symbol: symbol.into(),
            decimals,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Render `amount`, e.g. `"$1,234.56"` or `"-$9.99"`.
    ///
    /// ```
    /// use merge_core::formatting::CurrencyFormat;
    ///
    /// let usd = CurrencyFormat::default();
    /// assert_eq!(usd.format(1234.56), "$1,234.56");
    /// assert_eq!(usd.format(-9.99), "-$9.99");
    /// ```
    pub fn format(&self, amount: f64) -> String {
        let body = format_number(amount.abs(), self.decimals);
        if amount < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
            format!("-{}{}", self.symbol, body)
        } else {
            format!("{}{}", self.symbol, body)
        }
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::new("$", 2)
    }
}

// ── Numbers ───────────────────────────────────────────────────────────────────

/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use merge_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Nudge by a relative epsilon so exact midpoints like 1.005 round up.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let integer_part = rounded.trunc() as u64;
    let frac_part = rounded - rounded.trunc();

    let grouped = group_thousands(&integer_part.to_string());

    let result = if decimals == 0 {
        grouped
    } else {
        // "0.50" -> ".50"
        let frac_str = format!("{:.prec$}", frac_part, prec = decimals as usize);
        format!("{}{}", grouped, &frac_str[1..])
    };

    if negative {
        format!("-{}", result)
    } else {
        result
    }
}

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────
