//! Display-only formatting helpers.
//!
//! Everything here produces strings for presentation; the stored value is
//! always the raw number or digit string, never the formatted form.

/// Thousands/decimal separators used when rendering numeric fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberLocale {
    pub thousands_sep: char,
    pub decimal_sep: char,
}

impl Default for NumberLocale {
    /// Brazilian Portuguese grouping, `1.234,56`.
    fn default() -> Self {
        Self {
            thousands_sep: '.',
            decimal_sep: ',',
        }
    }
}

/// Formats a number with fixed-point precision and grouped thousands.
pub fn format_number(value: f64, precision: u8, locale: &NumberLocale) -> String {
    let negative = value.is_sign_negative() && value != 0.0;
    let fixed = format!("{:.*}", precision as usize, value.abs());
    let (integer, fraction) = match fixed.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::new();
    for (index, ch) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(locale.thousands_sep);
        }
        grouped.push(ch);
    }

    let mut result = String::new();
    if negative {
        result.push('-');
    }
    result.push_str(&grouped);
    if let Some(fraction) = fraction {
        result.push(locale.decimal_sep);
        result.push_str(fraction);
    }
    result
}

/// Fixed display masks for the masked identifier fields.
pub const PHONE_MASK: &str = "(##) #####-####";
pub const CPF_MASK: &str = "###.###.###-##";
pub const CNPJ_MASK: &str = "##.###.###/####-##";

/// Applies a `#`-placeholder mask over a digit string. Digits beyond the
/// mask are dropped; a short input yields a partially filled mask with the
/// trailing literals omitted.
pub fn apply_mask(digits: &str, mask: &str) -> String {
    let mut source = digits.chars().filter(|ch| ch.is_ascii_digit());
    let mut output = String::new();
    let mut pending = String::new();

    for slot in mask.chars() {
        if slot == '#' {
            match source.next() {
                Some(digit) => {
                    output.push_str(&pending);
                    pending.clear();
                    output.push(digit);
                }
                None => break,
            }
        } else {
            pending.push(slot);
        }
    }
    output
}
