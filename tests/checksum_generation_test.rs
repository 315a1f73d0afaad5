//! Integration tests for check digit generation
//!
//! Builds documents from arbitrary bodies, computes their check digits and
//! checks that every punctuation style classifies and validates.

use br_doc_validator::prelude::*;

/// Deterministic spread of 9-digit CPF bodies
fn cpf_bodies() -> impl Iterator<Item = [u8; 9]> {
    (0u64..2000).map(|seed| {
        let mut n = seed.wrapping_mul(2_654_435_761).wrapping_add(12_345) % 1_000_000_000;
        let mut body = [0u8; 9];
        for slot in body.iter_mut().rev() {
            *slot = (n % 10) as u8;
            n /= 10;
        }
        body
    })
}

fn digits_to_string(digits: &[u8]) -> String {
    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

/// Every generated CPF validates bare, fully and partially punctuated
#[test]
fn test_cpf_round_trip_all_punctuation_styles() {
    for body in cpf_bodies() {
        let [first, second] = cpf_check_digits(&body);
        let mut all = body.to_vec();
        all.extend([first, second]);
        let bare = digits_to_string(&all);

        let full = format!("{}.{}.{}-{}", &bare[..3], &bare[3..6], &bare[6..9], &bare[9..]);
        let partial = format!("{}.{}{}-{}", &bare[..3], &bare[3..6], &bare[6..9], &bare[9..]);
        let hyphen_only = format!("{}-{}", &bare[..9], &bare[9..]);

        for doc in [&bare, &full, &partial, &hyphen_only] {
            assert_eq!(classify(doc), Ok(DocumentFamily::Cpf), "{}", doc);
            if has_repeated_digits(doc) {
                assert_eq!(check_cpf(doc), Err(DocumentError::RepeatedDigits));
            } else {
                assert_eq!(check_cpf(doc), Ok(()), "{}", doc);
                assert!(validate_document(doc).validated, "{}", doc);
            }
        }
    }
}

/// Changing the last check digit always breaks a CPF
#[test]
fn test_cpf_altered_check_digit_fails() {
    for body in cpf_bodies().take(200) {
        let [first, second] = cpf_check_digits(&body);
        let altered = (second + 1) % 10;
        let mut all = body.to_vec();
        all.extend([first, altered]);
        let doc = digits_to_string(&all);
        assert!(check_cpf(&doc).is_err(), "{}", doc);
        assert!(!validate_document(&doc).validated, "{}", doc);
    }
}

/// Generated RGs validate unless their sum has no check symbol
#[test]
fn test_rg_round_trip() {
    let mut validated = 0;
    for body in cpf_bodies() {
        let mut rg_body = [0u8; 8];
        rg_body.copy_from_slice(&body[1..]);
        let bare_body = digits_to_string(&rg_body);

        match rg_check_symbol(&rg_body) {
            Some(symbol) => {
                let doc = format!(
                    "{}.{}.{}-{}",
                    &bare_body[..2],
                    &bare_body[2..5],
                    &bare_body[5..],
                    symbol
                );
                assert_eq!(classify(&doc), Ok(DocumentFamily::Rg), "{}", doc);
                assert_eq!(check_rg(&doc), Ok(()), "{}", doc);
                validated += 1;
            }
            None => {
                let doc = format!("{}0", bare_body);
                assert!(check_rg(&doc).is_err(), "{}", doc);
            }
        }
    }
    assert!(validated > 0);
}

/// An X check symbol validates the same in either case
#[test]
fn test_rg_x_terminal_case_insensitive() {
    let upper = validate_document("33.331.427-X");
    let lower = validate_document("33.331.427-x");
    assert!(upper.validated);
    assert_eq!(upper.validated, lower.validated);
    assert_eq!(upper.valid_format, lower.valid_format);
    assert_eq!(upper.check_digits_valid, lower.check_digits_valid);
    assert_eq!(upper.message, lower.message);
}

/// Checksum routines called directly on garbage fail cleanly
#[test]
fn test_checksum_misuse_is_reported() {
    for doc in ["", "x", "12", "811.835.170-0912", "not a document"] {
        assert!(matches!(
            check_cpf(doc),
            Err(DocumentError::MalformedChecksumInput { .. })
        ));
        assert!(matches!(
            check_rg(doc),
            Err(DocumentError::MalformedChecksumInput { .. })
        ));
    }
}
