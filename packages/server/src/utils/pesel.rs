use chrono::NaiveDate;
use thiserror::Error;

/// Why a PESEL number was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeselError {
    #[error("PESEL must be exactly 11 digits long (got {0})")]
    BadLength(usize),
    #[error("PESEL must consist of digits only")]
    NotNumeric,
    #[error("PESEL checksum does not match")]
    BadChecksum,
    #[error("PESEL encodes a nonexistent birth date")]
    BadBirthDate,
}

/// Weights for the PESEL checksum, per the official format.
/// https://en.wikipedia.org/wiki/PESEL#Format
const CHECKSUM_WEIGHTS: [u32; 11] = [1, 3, 7, 9, 1, 3, 7, 9, 1, 3, 1];

/// Century offsets encoded in the month field, indexed by `month / 20`.
const CENTURY_BY_MONTH_OFFSET: [i32; 5] = [1900, 2000, 2100, 2200, 1800];

/// Validate a PESEL number. An empty string is accepted for legacy records.
pub fn validate(pesel: &str) -> Result<(), PeselError> {
    if pesel.is_empty() {
        return Ok(());
    }

    if pesel.len() != 11 {
        return Err(PeselError::BadLength(pesel.len()));
    }
    if !pesel.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PeselError::NotNumeric);
    }

    let sum: u32 = pesel
        .bytes()
        .zip(CHECKSUM_WEIGHTS)
        .map(|(b, w)| u32::from(b - b'0') * w)
        .sum();
    if sum % 10 != 0 {
        return Err(PeselError::BadChecksum);
    }

    if extract_birth_date(pesel).is_none() {
        return Err(PeselError::BadBirthDate);
    }

    Ok(())
}

/// Extract the birth date encoded in the first six digits of a PESEL.
///
/// Returns `None` when the input is too short, non-numeric, or encodes a
/// date that does not exist.
pub fn extract_birth_date(pesel: &str) -> Option<NaiveDate> {
    if pesel.len() < 6 || !pesel.is_char_boundary(6) {
        return None;
    }

    let year: i32 = pesel[0..2].parse().ok()?;
    let month: u32 = pesel[2..4].parse().ok()?;
    let day: u32 = pesel[4..6].parse().ok()?;

    let century = CENTURY_BY_MONTH_OFFSET.get(month as usize / 20)?;
    let month = month % 20;

    NaiveDate::from_ymd_opt(century + year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_twentieth_century_dates() {
        assert_eq!(
            extract_birth_date("44051401359"),
            NaiveDate::from_ymd_opt(1944, 5, 14)
        );
        assert_eq!(
            extract_birth_date("900101"),
            NaiveDate::from_ymd_opt(1990, 1, 1)
        );
    }

    #[test]
    fn extracts_twenty_first_century_dates() {
        // Month 21 = January 2000s
        assert_eq!(
            extract_birth_date("062101"),
            NaiveDate::from_ymd_opt(2006, 1, 1)
        );
        assert_eq!(
            extract_birth_date("063201"),
            NaiveDate::from_ymd_opt(2006, 12, 1)
        );
    }

    #[test]
    fn extracts_other_century_offsets() {
        assert_eq!(
            extract_birth_date("054101"),
            NaiveDate::from_ymd_opt(2105, 1, 1)
        );
        assert_eq!(
            extract_birth_date("058101"),
            NaiveDate::from_ymd_opt(1805, 1, 1)
        );
    }

    #[test]
    fn rejects_nonexistent_dates() {
        assert_eq!(extract_birth_date("990230"), None); // Feb 30
        assert_eq!(extract_birth_date("990001"), None); // month 0
    }

    #[test]
    fn rejects_short_or_garbage_input() {
        assert_eq!(extract_birth_date(""), None);
        assert_eq!(extract_birth_date("12345"), None);
        assert_eq!(extract_birth_date("ab0101xxxxx"), None);
    }

    #[test]
    fn validate_accepts_correct_pesel() {
        assert_eq!(validate("44051401359"), Ok(()));
    }

    #[test]
    fn validate_accepts_empty_for_legacy_records() {
        assert_eq!(validate(""), Ok(()));
    }

    #[test]
    fn validate_rejects_bad_length() {
        assert_eq!(validate("4405140135"), Err(PeselError::BadLength(10)));
    }

    #[test]
    fn validate_rejects_non_digits() {
        assert_eq!(validate("4405140135x"), Err(PeselError::NotNumeric));
    }

    #[test]
    fn validate_rejects_bad_checksum() {
        assert_eq!(validate("44051401358"), Err(PeselError::BadChecksum));
    }
}
