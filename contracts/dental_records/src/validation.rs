//! Input checks run before any candidate record reaches storage.
//!
//! Every check here is a precondition: a failure means nothing was read from
//! or written to the collections.

use clinic_common::text::MAX_TEXT_BYTES;
use clinic_common::{is_blank, read_bytes};
use soroban_sdk::{Bytes, String, Vec};

use crate::appointment::{AppointmentInput, Attachment};
use crate::patient::PatientInput;
use crate::{ClinicConfig, ContractError};

// ==================== CONSTANTS ====================

/// Maximum length for a patient name
pub const MAX_NAME_LENGTH: u32 = 128;
/// Maximum length for a contact string (phone number or similar)
pub const MAX_CONTACT_LENGTH: u32 = 64;
/// Maximum length for an e-mail address
pub const MAX_EMAIL_LENGTH: u32 = 254;
/// Maximum length for a password
pub const MAX_PASSWORD_LENGTH: u32 = 128;
/// Maximum length for identifiers supplied by callers
pub const MAX_ID_LENGTH: u32 = 64;
/// Maximum length for an appointment title or treatment label
pub const MAX_TITLE_LENGTH: u32 = 200;
/// Maximum length for free text (health info, description, comments).
/// Kept within what the search helpers can inspect.
pub const MAX_TEXT_LENGTH: u32 = MAX_TEXT_BYTES as u32;
/// Maximum length for an attachment file name
pub const MAX_FILE_NAME_LENGTH: u32 = 255;
/// Maximum length for an attachment MIME type
pub const MAX_MIME_TYPE_LENGTH: u32 = 127;

// ==================== STRING VALIDATION ====================

/// A field that must be present and within `max_length`.
pub fn validate_required(value: &String, max_length: u32) -> Result<(), ContractError> {
    if value.len() > max_length || is_blank(value) {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

/// A field that may be empty but not longer than `max_length`.
pub fn validate_optional(value: &String, max_length: u32) -> Result<(), ContractError> {
    if value.len() > max_length {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

/// Loose address shape: one `@`, a non-empty local part, a dotted domain and
/// no whitespace.
pub fn validate_email(email: &String) -> Result<(), ContractError> {
    if email.is_empty() || email.len() > MAX_EMAIL_LENGTH {
        return Err(ContractError::InvalidEmail);
    }

    let mut buf = [0u8; MAX_TEXT_BYTES];
    let bytes = read_bytes(email, &mut buf).ok_or(ContractError::InvalidEmail)?;

    if bytes.iter().any(|b| b.is_ascii_whitespace()) {
        return Err(ContractError::InvalidEmail);
    }

    let mut parts = bytes.split(|b| *b == b'@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ContractError::InvalidEmail);
    };

    let dotted = domain.contains(&b'.')
        && domain.first() != Some(&b'.')
        && domain.last() != Some(&b'.');
    if local.is_empty() || !dotted {
        return Err(ContractError::InvalidEmail);
    }

    Ok(())
}

/// ISO calendar date, `YYYY-MM-DD`.
pub fn validate_iso_date(date: &String) -> Result<(), ContractError> {
    if date.len() != 10 {
        return Err(ContractError::InvalidDate);
    }

    let mut buf = [0u8; MAX_TEXT_BYTES];
    let b = read_bytes(date, &mut buf).ok_or(ContractError::InvalidDate)?;

    let digits_at = |range: core::ops::Range<usize>| b[range].iter().all(|c| c.is_ascii_digit());
    if !digits_at(0..4) || b[4] != b'-' || !digits_at(5..7) || b[7] != b'-' || !digits_at(8..10) {
        return Err(ContractError::InvalidDate);
    }

    let two = |i: usize| u32::from(b[i] - b'0') * 10 + u32::from(b[i + 1] - b'0');
    let year = two(0) * 100 + two(2);
    let (month, day) = (two(5), two(8));
    if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
        return Err(ContractError::InvalidDate);
    }

    Ok(())
}

/// Gregorian month length; `month` is 1..=12.
fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

pub fn validate_password(password: &String) -> Result<(), ContractError> {
    if password.is_empty() || password.len() > MAX_PASSWORD_LENGTH {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

// ==================== RECORD VALIDATION ====================

pub fn validate_patient(candidate: &PatientInput) -> Result<(), ContractError> {
    validate_required(&candidate.name, MAX_NAME_LENGTH)?;
    validate_iso_date(&candidate.dob)?;
    validate_required(&candidate.contact, MAX_CONTACT_LENGTH)?;
    validate_email(&candidate.email)?;
    validate_optional(&candidate.health_info, MAX_TEXT_LENGTH)?;
    Ok(())
}

pub fn validate_appointment(
    candidate: &AppointmentInput,
    config: &ClinicConfig,
) -> Result<(), ContractError> {
    validate_required(&candidate.patient_id, MAX_ID_LENGTH)?;
    validate_required(&candidate.title, MAX_TITLE_LENGTH)?;
    validate_optional(&candidate.description, MAX_TEXT_LENGTH)?;
    validate_optional(&candidate.comments, MAX_TEXT_LENGTH)?;

    if candidate.appointment_date == 0 {
        return Err(ContractError::MissingAppointmentDate);
    }

    if let Some(treatment) = &candidate.treatment {
        validate_optional(treatment, MAX_TITLE_LENGTH)?;
    }

    if candidate.cost < 0 {
        return Err(ContractError::NegativeCost);
    }

    validate_attachments(&candidate.files, config)
}

pub fn validate_attachments(
    files: &Vec<Attachment>,
    config: &ClinicConfig,
) -> Result<(), ContractError> {
    if files.len() > config.max_attachments {
        return Err(ContractError::TooManyAttachments);
    }

    for file in files.iter() {
        validate_required(&file.name, MAX_FILE_NAME_LENGTH)?;
        validate_optional(&file.mime_type, MAX_MIME_TYPE_LENGTH)?;
        validate_optional(&file.id, MAX_ID_LENGTH)?;
        validate_attachment_size(&file.data, config)?;
    }

    Ok(())
}

fn validate_attachment_size(data: &Bytes, config: &ClinicConfig) -> Result<(), ContractError> {
    if data.len() > config.max_attachment_bytes {
        return Err(ContractError::AttachmentTooLarge);
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use soroban_sdk::Env;

    #[test]
    fn test_validate_required() {
        let env = Env::default();

        assert!(validate_required(&String::from_str(&env, "Patient 1"), 20).is_ok());
        assert_eq!(
            validate_required(&String::from_str(&env, ""), 20),
            Err(ContractError::InvalidInput)
        );
        assert_eq!(
            validate_required(&String::from_str(&env, "   "), 20),
            Err(ContractError::InvalidInput)
        );
        assert_eq!(
            validate_required(&String::from_str(&env, "much too long"), 4),
            Err(ContractError::InvalidInput)
        );
    }

    #[test]
    fn test_validate_email() {
        let env = Env::default();
        let ok = |s: &str| validate_email(&String::from_str(&env, s)).is_ok();

        assert!(ok("patient1@entnt.in"));
        assert!(ok("a.b+c@mail.example.com"));
        assert!(!ok(""));
        assert!(!ok("patient1"));
        assert!(!ok("@entnt.in"));
        assert!(!ok("patient1@entnt"));
        assert!(!ok("patient1@.in"));
        assert!(!ok("patient1@entnt."));
        assert!(!ok("a@b@entnt.in"));
        assert!(!ok("john doe@entnt.in"));
    }

    #[test]
    fn test_validate_iso_date() {
        let env = Env::default();
        let ok = |s: &str| validate_iso_date(&String::from_str(&env, s)).is_ok();

        assert!(ok("1990-01-02"));
        assert!(ok("2001-12-31"));
        assert!(!ok("1990-1-2"));
        assert!(!ok("1990/01/02"));
        assert!(!ok("1990-13-01"));
        assert!(!ok("1990-00-10"));
        assert!(!ok("1990-01-32"));
        assert!(!ok("1990-02-31"));
        assert!(!ok("1990-04-31"));
        assert!(!ok("1900-02-29"));
        assert!(ok("2000-02-29"));
        assert!(ok("2024-02-29"));
        assert!(!ok("2023-02-29"));
        assert!(!ok("yyyy-mm-dd"));
    }
}
