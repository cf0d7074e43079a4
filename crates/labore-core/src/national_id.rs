//! CPF (Brazilian national ID) helpers.
//!
//! A CPF is 11 digits; the last two are check digits computed from the
//! first nine (and ten) with descending weights, modulo 11.

/// Keep only ASCII digits.
pub fn digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Remove the mask characters used by [`format`] plus surrounding
/// whitespace. Used for lookups, where other characters must still count.
pub fn strip_punctuation(input: &str) -> String {
    input.trim().replace(['.', '-'], "")
}

/// Checksum validation. Punctuation in the input is ignored.
pub fn is_valid(input: &str) -> bool {
    let cpf: Vec<u32> = digits(input)
        .chars()
        .filter_map(|c| c.to_digit(10))
        .collect();

    if cpf.len() != 11 || cpf.iter().all(|d| *d == cpf[0]) {
        return false;
    }

    check_digit(&cpf[..9]) == cpf[9] && check_digit(&cpf[..10]) == cpf[10]
}

/// Weights run from `len + 1` down to 2.
fn check_digit(body: &[u32]) -> u32 {
    let top = body.len() as u32 + 1;
    let sum: u32 = body
        .iter()
        .enumerate()
        .map(|(i, d)| d * (top - i as u32))
        .sum();
    match 11 - (sum % 11) {
        10 | 11 => 0,
        r => r,
    }
}

/// Progressive mask applied while the user types: `123`, `123.456`,
/// `123.456.789`, `123.456.789-09`. Digits past the eleventh are dropped.
pub fn format(input: &str) -> String {
    let d: String = digits(input).chars().take(11).collect();
    match d.len() {
        0..=3 => d,
        4..=6 => format!("{}.{}", &d[..3], &d[3..]),
        7..=9 => format!("{}.{}.{}", &d[..3], &d[3..6], &d[6..]),
        _ => format!("{}.{}.{}-{}", &d[..3], &d[3..6], &d[6..9], &d[9..]),
    }
}

/// Keeps only the first three digits, for log lines.
pub fn mask_for_log(input: &str) -> String {
    let prefix: String = digits(input).chars().take(3).collect();
    format!("{prefix}.***.***-**")
}
