//! Check digit verification
//!
//! CPF carries two mod-11 check digits; RG (São Paulo scheme) carries one
//! mod-11 check symbol that may be the letter `X`. Both routines re-derive
//! the digits from the raw string and verify its shape before doing any
//! arithmetic, so they are safe to call on unclassified input.

use super::digits::is_repeated_run;
use super::error::{DocumentError, DocumentFamily};

const CPF_LEN: usize = 11;
const RG_LEN: usize = 9;

/// Compute the two CPF check digits for the first nine digits.
pub fn cpf_check_digits(base: &[u8; 9]) -> [u8; 2] {
    let first = cpf_check_digit(base);
    let mut extended = [0u8; 10];
    extended[..9].copy_from_slice(base);
    extended[9] = first;
    [first, cpf_check_digit(&extended)]
}

/// Weights run from `len + 1` down to 2; a result of 10 or 11 maps to 0.
fn cpf_check_digit(digits: &[u8]) -> u8 {
    let sum: usize = digits
        .iter()
        .zip((2..=digits.len() + 1).rev())
        .map(|(&d, weight)| usize::from(d) * weight)
        .sum();
    match 11 - sum % 11 {
        check @ 0..=9 => check as u8,
        _ => 0,
    }
}

/// Compute the RG check symbol for the eight body digits.
///
/// Returns `None` when the weighted sum is a multiple of 11: the scheme
/// yields 11 there, which no single symbol represents, so such documents
/// can never validate.
pub fn rg_check_symbol(base: &[u8; 8]) -> Option<char> {
    let sum: usize = base
        .iter()
        .zip(2..)
        .map(|(&d, weight)| usize::from(d) * weight)
        .sum();
    match 11 - sum % 11 {
        10 => Some('X'),
        check @ 1..=9 => Some(char::from(b'0' + check as u8)),
        _ => None,
    }
}

/// Verify the check digits of a CPF.
///
/// Fails with [`DocumentError::RepeatedDigits`] when all eleven digits are
/// the same, even though such numbers are arithmetically consistent.
pub fn check_cpf(document: &str) -> Result<(), DocumentError> {
    let chars = alphanumerics(document);
    if chars.len() != CPF_LEN {
        return Err(malformed(
            DocumentFamily::Cpf,
            format!("expected {} digits, found {}", CPF_LEN, chars.len()),
        ));
    }

    let digits = to_digits(DocumentFamily::Cpf, &chars)?;
    if is_repeated_run(&digits) {
        return Err(DocumentError::RepeatedDigits);
    }

    let mut base = [0u8; 9];
    base.copy_from_slice(&digits[..9]);
    if cpf_check_digits(&base) == [digits[9], digits[10]] {
        Ok(())
    } else {
        Err(DocumentError::ChecksumMismatch {
            family: DocumentFamily::Cpf,
        })
    }
}

/// Verify the check symbol of an RG. A lowercase `x` terminal counts as `X`.
pub fn check_rg(document: &str) -> Result<(), DocumentError> {
    let chars = alphanumerics(document);
    let Some((&terminal, body)) = chars.split_last().filter(|_| chars.len() == RG_LEN) else {
        return Err(malformed(
            DocumentFamily::Rg,
            format!("expected {} characters, found {}", RG_LEN, chars.len()),
        ));
    };

    let digits = to_digits(DocumentFamily::Rg, body)?;
    let terminal = terminal.to_ascii_uppercase();
    if !(terminal.is_ascii_digit() || terminal == 'X') {
        return Err(malformed(
            DocumentFamily::Rg,
            format!("check symbol '{}' is neither a digit nor X", terminal),
        ));
    }

    let mut base = [0u8; 8];
    base.copy_from_slice(&digits);
    match rg_check_symbol(&base) {
        Some(expected) if expected == terminal => Ok(()),
        _ => Err(DocumentError::ChecksumMismatch {
            family: DocumentFamily::Rg,
        }),
    }
}

fn alphanumerics(document: &str) -> Vec<char> {
    document.chars().filter(|c| c.is_alphanumeric()).collect()
}

fn to_digits(family: DocumentFamily, chars: &[char]) -> Result<Vec<u8>, DocumentError> {
    chars
        .iter()
        .map(|c| {
            c.to_digit(10)
                .map(|d| d as u8)
                .ok_or_else(|| malformed(family, format!("unexpected character '{}'", c)))
        })
        .collect()
}

fn malformed(family: DocumentFamily, reason: String) -> DocumentError {
    DocumentError::MalformedChecksumInput { family, reason }
}
