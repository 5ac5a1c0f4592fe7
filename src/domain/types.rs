//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (e.g., positive identifiers,
//! non-negative prices, positive durations) so that once a value reaches the
//! domain layer it can be treated as trusted.
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::iter::Sum;
use std::ops::{Add, Deref};
use std::str::FromStr;

use chrono::TimeDelta;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Price is not a decimal number with at most two fractional digits.
    #[error("invalid price")]
    InvalidPrice,
    /// Price is below zero.
    #[error("price cannot be negative")]
    NegativePrice,
    /// Duration is not an integer number of minutes.
    #[error("invalid duration")]
    InvalidDuration,
    /// Duration is zero or negative.
    #[error("duration must be greater than zero")]
    NonPositiveDuration,
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(ClientId, "Unique identifier for a salon client.");
id_newtype!(ServiceId, "Unique identifier for a catalog service.");
id_newtype!(AppointmentId, "Unique identifier for an appointment.");
id_newtype!(
    AppointmentServiceId,
    "Unique identifier for a service booked within an appointment."
);

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

non_empty_string_newtype!(ClientName, "Client name wrapper enforcing non-empty values.");

non_empty_string_newtype!(ServiceName, "Service name wrapper enforcing non-empty values.");

non_empty_string_newtype!(
    PhoneNumber,
    "Free-form contact phone, trimmed and non-empty."
);

non_empty_string_newtype!(
    OwnerId,
    "Identifier of the staff member who created a record."
);

/// Appointment notes as plain text: markup is stripped, the text is trimmed.
///
/// Escaping is left to the template engine.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct AppointmentNotes(String);

/// Undoes the entity escaping ammonia applies to text nodes.
fn unescape_text(html: &str) -> String {
    html.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

impl AppointmentNotes {
    /// Constructs a tag-free, trimmed, non-empty value.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let stripped = ammonia::Builder::default()
            .tags(HashSet::<&str>::new())
            .clean(&value.into())
            .to_string();
        let inner = NonEmptyString::new(unescape_text(&stripped))?;
        Ok(Self(inner.into_inner()))
    }

    /// Borrow the value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for AppointmentNotes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-negative amount of money kept in hundredths of the currency unit.
///
/// Stored exactly, so sums never drift. Parsed from and rendered as a
/// decimal string (`"12.50"`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Price(i64);

impl Price {
    pub const ZERO: Price = Price(0);

    /// Creates a price from an amount of cents.
    pub fn from_cents(cents: i64) -> Result<Self, TypeConstraintError> {
        if cents < 0 {
            return Err(TypeConstraintError::NegativePrice);
        }
        Ok(Self(cents))
    }

    /// Parses a decimal amount such as `"35"`, `"35.5"` or `"35,50"`.
    pub fn parse(value: &str) -> Result<Self, TypeConstraintError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }

        let amount = Decimal::from_str(&trimmed.replace(',', "."))
            .map_err(|_| TypeConstraintError::InvalidPrice)?;
        if amount.is_sign_negative() {
            return Err(TypeConstraintError::NegativePrice);
        }
        if amount.scale() > 2 {
            return Err(TypeConstraintError::InvalidPrice);
        }

        amount
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .map(Self)
            .ok_or(TypeConstraintError::InvalidPrice)
    }

    /// Returns the amount in cents.
    pub const fn cents(self) -> i64 {
        self.0
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Decimal::new(self.0, 2))
    }
}

impl FromStr for Price {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Price {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Price> for String {
    fn from(value: Price) -> Self {
        value.to_string()
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Self) -> Self::Output {
        Price(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Price::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Price> for Price {
    fn sum<I: Iterator<Item = &'a Price>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Positive service duration in whole minutes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DurationMinutes(i32);

impl DurationMinutes {
    /// Creates a duration ensuring it is greater than zero.
    pub fn new(minutes: i32) -> Result<Self, TypeConstraintError> {
        if minutes > 0 {
            Ok(Self(minutes))
        } else {
            Err(TypeConstraintError::NonPositiveDuration)
        }
    }

    /// Parses a whole number of minutes from user input.
    pub fn parse(value: &str) -> Result<Self, TypeConstraintError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        let minutes: i32 = trimmed
            .parse()
            .map_err(|_| TypeConstraintError::InvalidDuration)?;
        Self::new(minutes)
    }

    /// Returns the raw number of minutes.
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Converts the duration into a `chrono` time delta.
    pub fn as_time_delta(self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.0))
    }
}

impl Display for DurationMinutes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for DurationMinutes {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Lifecycle state of an appointment.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
    Other(String),
}

impl Display for AppointmentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::Other(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for AppointmentStatus {
    fn from(s: &str) -> Self {
        match s.trim() {
            "" | "scheduled" => AppointmentStatus::Scheduled,
            "completed" => AppointmentStatus::Completed,
            "cancelled" => AppointmentStatus::Cancelled,
            other => AppointmentStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for AppointmentStatus {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

impl From<AppointmentStatus> for String {
    fn from(value: AppointmentStatus) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_reject_non_positive_values() {
        assert_eq!(ClientId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(ServiceId::new(-3), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(AppointmentId::new(7).map(AppointmentId::get), Ok(7));
    }

    #[test]
    fn names_are_trimmed_and_required() {
        assert_eq!(ClientName::new("  Ana ").unwrap().as_str(), "Ana");
        assert_eq!(ServiceName::new("   "), Err(TypeConstraintError::EmptyString));
    }

    #[test]
    fn price_parses_decimal_amounts() {
        assert_eq!(Price::parse("35").unwrap().cents(), 3500);
        assert_eq!(Price::parse("35.5").unwrap().cents(), 3550);
        assert_eq!(Price::parse("35,05").unwrap().cents(), 3505);
        assert_eq!(Price::parse("0,5").unwrap().cents(), 50);
        assert_eq!(Price::parse("35.50").unwrap().cents(), 3550);
        assert_eq!(Price::parse("0").unwrap(), Price::ZERO);
    }

    #[test]
    fn price_rejects_negative_and_malformed_input() {
        assert_eq!(Price::parse("-5"), Err(TypeConstraintError::NegativePrice));
        assert_eq!(Price::parse("abc"), Err(TypeConstraintError::InvalidPrice));
        assert_eq!(Price::parse("1.234"), Err(TypeConstraintError::InvalidPrice));
        assert_eq!(Price::parse("."), Err(TypeConstraintError::InvalidPrice));
        assert_eq!(Price::parse(""), Err(TypeConstraintError::EmptyString));
        assert_eq!(Price::from_cents(-1), Err(TypeConstraintError::NegativePrice));
        assert_eq!(
            Price::parse("999999999999999999999"),
            Err(TypeConstraintError::InvalidPrice)
        );
    }

    #[test]
    fn price_displays_two_fraction_digits() {
        assert_eq!(Price::from_cents(1205).unwrap().to_string(), "12.05");
        assert_eq!(Price::from_cents(7).unwrap().to_string(), "0.07");
    }

    #[test]
    fn price_sums_exactly() {
        let prices = [
            Price::parse("0.10").unwrap(),
            Price::parse("0.20").unwrap(),
            Price::parse("0.70").unwrap(),
        ];
        let total: Price = prices.iter().sum();
        assert_eq!(total, Price::parse("1").unwrap());
    }

    #[test]
    fn price_serializes_as_decimal_string() {
        let price = Price::parse("19.9").unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "\"19.90\"");
        let back: Price = serde_json::from_str("\"19.90\"").unwrap();
        assert_eq!(back, price);
    }

    #[test]
    fn duration_requires_positive_minutes() {
        assert_eq!(
            DurationMinutes::parse("0"),
            Err(TypeConstraintError::NonPositiveDuration)
        );
        assert_eq!(
            DurationMinutes::parse("1.5"),
            Err(TypeConstraintError::InvalidDuration)
        );
        assert_eq!(DurationMinutes::parse(" 45 ").unwrap().get(), 45);
        assert_eq!(
            DurationMinutes::new(90).unwrap().as_time_delta(),
            TimeDelta::minutes(90)
        );
    }

    #[test]
    fn appointment_status_round_trips_known_and_unknown_values() {
        assert_eq!(AppointmentStatus::from(""), AppointmentStatus::Scheduled);
        assert_eq!(AppointmentStatus::from("completed"), AppointmentStatus::Completed);
        assert_eq!(
            AppointmentStatus::from("no-show"),
            AppointmentStatus::Other("no-show".to_string())
        );
        assert_eq!(AppointmentStatus::Cancelled.to_string(), "cancelled");
    }

    #[test]
    fn notes_are_sanitized() {
        let notes = AppointmentNotes::new("<script>alert(1)</script>Bring photos").unwrap();
        assert_eq!(notes.as_str(), "Bring photos");
        assert!(AppointmentNotes::new("<script></script>").is_err());
    }

    #[test]
    fn notes_keep_plain_text_across_saves() {
        let first = AppointmentNotes::new("  Ana & Bia <3 \"franja\"  ").unwrap();
        assert_eq!(first.as_str(), "Ana & Bia <3 \"franja\"");

        let resaved = AppointmentNotes::new(first.as_str()).unwrap();
        assert_eq!(resaved, first);
    }

    #[test]
    fn notes_drop_markup_but_keep_text() {
        let notes = AppointmentNotes::new("<b>first</b> visit, 1 < 2").unwrap();
        assert_eq!(notes.as_str(), "first visit, 1 < 2");
    }
}
