//! Check-digit validators for Brazilian tax identifiers.
//!
//! Both are pure functions over the decimal digits of the input; any
//! non-digit characters (mask punctuation) are stripped before checking.

fn digits_of(value: &str) -> Vec<u32> {
    value.chars().filter_map(|ch| ch.to_digit(10)).collect()
}

/// Validates an 11-digit CPF by recomputing both check digits.
///
/// The first check digit weighs digits 1..=9 with 10..=2, takes
/// `(sum * 10) % 11` and maps 10 to 0; the second repeats over the first
/// ten digits with weights 11..=2.
pub fn validate_cpf(value: &str) -> bool {
    let digits = digits_of(value);
    if digits.len() != 11 {
        return false;
    }

    let check = |take: usize| -> u32 {
        let sum: u32 = digits[..take]
            .iter()
            .enumerate()
            .map(|(i, digit)| digit * (take as u32 + 1 - i as u32))
            .sum();
        let remainder = (sum * 10) % 11;
        if remainder >= 10 { 0 } else { remainder }
    };

    check(9) == digits[9] && check(10) == digits[10]
}

/// Validates a 14-digit CNPJ by recomputing both check digits.
///
/// Weights cycle 2..=9 from the rightmost position; the check digit is 0
/// when `sum % 11 < 2`, otherwise `11 - sum % 11`.
pub fn validate_cnpj(value: &str) -> bool {
    let digits = digits_of(value);
    if digits.len() != 14 {
        return false;
    }

    let check = |take: usize| -> u32 {
        let mut weight = take as u32 - 7;
        let mut sum = 0;
        for digit in &digits[..take] {
            sum += digit * weight;
            weight -= 1;
            if weight < 2 {
                weight = 9;
            }
        }
        let remainder = sum % 11;
        if remainder < 2 { 0 } else { 11 - remainder }
    };

    check(12) == digits[12] && check(13) == digits[13]
}
