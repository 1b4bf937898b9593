// Booking intake validation: every rule runs, failures come back keyed by
// field, and submission is gated on an empty error set

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

use crate::model::ContactDetails;

// A prospective booking as captured from the guest, before any checks.
// Optional dates model unfilled form fields.
#[derive(Debug, Clone, Default)]
pub struct BookingRequest {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub guests: u32,
}

// Context the caller supplies explicitly; the validator holds no globals
#[derive(Debug, Clone, Copy)]
pub struct IntakeContext {
    pub today: NaiveDate,
    pub max_guests: u32,
}

// Field-keyed human-readable messages. Ordered so rendered output is stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    errors: BTreeMap<&'static str, Vec<String>>,
}

impl ValidationErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    pub fn field(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.errors.keys().copied()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.errors {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// The checked fields of a request that passed every rule, ready to be turned
// into a pending booking record
#[derive(Debug, Clone, PartialEq)]
pub struct ValidBooking {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub contact: ContactDetails,
    pub guests: u32,
}

// Run every intake rule and report all failures at once. The gate is
// all-or-nothing: a request only converts when no rule fired.
pub fn validate(
    request: &BookingRequest,
    ctx: &IntakeContext,
) -> Result<ValidBooking, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let name = request.contact_name.trim();
    if name.is_empty() {
        errors.push("contact_name", "name is required");
    }

    let email = request.contact_email.trim();
    if email.is_empty() {
        errors.push("contact_email", "email is required");
    } else if !plausible_email(email) {
        errors.push("contact_email", "email address looks invalid");
    }

    let phone = request.contact_phone.trim();
    if phone.is_empty() {
        errors.push("contact_phone", "phone number is required");
    } else if phone.chars().filter(char::is_ascii_digit).count() < 7 {
        errors.push("contact_phone", "phone number looks invalid");
    }

    if request.guests == 0 {
        errors.push("guests", "at least one guest is required");
    } else if request.guests > ctx.max_guests {
        errors.push(
            "guests",
            format!("this property sleeps at most {} guests", ctx.max_guests),
        );
    }

    match request.check_in {
        None => errors.push("check_in", "check-in date is required"),
        Some(check_in) if check_in < ctx.today => {
            errors.push("check_in", "check-in cannot be in the past");
        }
        Some(_) => {}
    }

    match (request.check_in, request.check_out) {
        (_, None) => errors.push("check_out", "check-out date is required"),
        (Some(check_in), Some(check_out)) if check_out <= check_in => {
            errors.push("check_out", "check-out must fall after check-in");
        }
        _ => {}
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidBooking {
        check_in: request.check_in.unwrap_or(ctx.today),
        check_out: request.check_out.unwrap_or(ctx.today),
        contact: ContactDetails {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        },
        guests: request.guests,
    })
}

fn plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
