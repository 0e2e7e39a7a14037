// bistro/core/src/forms/reservation.rs
use super::{non_blank, FormError};
use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of guests, 1 to 10. Larger parties book by phone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct PartySize(u8);

/// Party sizes arrive either as numbers or as the select box's string values.
#[derive(Deserialize)]
#[serde(untagged)]
enum PartySizeInput {
  Number(i64),
  Text(String),
}

impl PartySize {
  pub const MIN: u8 = 1;
  pub const MAX: u8 = 10;

  pub fn get(self) -> u8 {
    self.0
  }

  pub fn all() -> impl Iterator<Item = PartySize> {
    (Self::MIN..=Self::MAX).map(PartySize)
  }
}

impl TryFrom<i64> for PartySize {
  type Error = FormError;

  fn try_from(value: i64) -> Result<Self, Self::Error> {
    if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
      Ok(PartySize(value as u8))
    } else {
      Err(FormError::PartySizeOutOfRange { got: value })
    }
  }
}

impl<'de> Deserialize<'de> for PartySize {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let parsed = match PartySizeInput::deserialize(deserializer)? {
      PartySizeInput::Number(n) => PartySize::try_from(n),
      PartySizeInput::Text(s) => s.parse(),
    };
    parsed.map_err(serde::de::Error::custom)
  }
}

impl FromStr for PartySize {
  type Err = FormError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let n: i64 = s
      .trim()
      .parse()
      .map_err(|_| FormError::InvalidPartySize(s.to_string()))?;
    PartySize::try_from(n)
  }
}

impl From<PartySize> for u8 {
  fn from(size: PartySize) -> u8 {
    size.0
  }
}

/// One of the bookable times: 11:00 through 21:00 on the half hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot(NaiveTime);

impl TimeSlot {
  const FIRST_HOUR: u32 = 11;
  const LAST_HOUR: u32 = 21;

  pub fn all() -> Vec<TimeSlot> {
    (Self::FIRST_HOUR..=Self::LAST_HOUR)
      .flat_map(|hour| [0, 30].map(move |minute| (hour, minute)))
      .filter(|&(hour, minute)| hour < Self::LAST_HOUR || minute == 0)
      .filter_map(|(hour, minute)| NaiveTime::from_hms_opt(hour, minute, 0))
      .map(TimeSlot)
      .collect()
  }

  pub fn time(&self) -> NaiveTime {
    self.0
  }

  fn is_offered(time: NaiveTime) -> bool {
    let (hour, minute) = (time.hour(), time.minute());
    time.second() == 0
      && (minute == 0 || minute == 30)
      && (Self::FIRST_HOUR..=Self::LAST_HOUR).contains(&hour)
      && !(hour == Self::LAST_HOUR && minute == 30)
  }
}

impl TryFrom<NaiveTime> for TimeSlot {
  type Error = FormError;

  fn try_from(time: NaiveTime) -> Result<Self, Self::Error> {
    if Self::is_offered(time) {
      Ok(TimeSlot(time))
    } else {
      Err(FormError::UnknownTimeSlot(time.format("%H:%M:%S").to_string()))
    }
  }
}

impl FromStr for TimeSlot {
  type Err = FormError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let time = NaiveTime::parse_from_str(s.trim(), "%H:%M")
      .or_else(|_| NaiveTime::parse_from_str(s.trim(), "%H:%M:%S"))
      .map_err(|_| FormError::UnknownTimeSlot(s.to_string()))?;
    TimeSlot::try_from(time).map_err(|_| FormError::UnknownTimeSlot(s.to_string()))
  }
}

impl TryFrom<String> for TimeSlot {
  type Error = FormError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<TimeSlot> for String {
  fn from(slot: TimeSlot) -> String {
    slot.to_string()
  }
}

impl fmt::Display for TimeSlot {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.format("%H:%M"))
  }
}

/// A select box value: the text it submits, or an already typed value.
#[derive(Deserialize)]
#[serde(untagged)]
enum SelectValue<T> {
  Text(String),
  Value(T),
}

/// Reads an unselected (`""`) or missing choice as `None`.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de> + FromStr,
  T::Err: fmt::Display,
{
  match Option::<SelectValue<T>>::deserialize(deserializer)? {
    None => Ok(None),
    Some(SelectValue::Value(value)) => Ok(Some(value)),
    Some(SelectValue::Text(text)) if text.trim().is_empty() => Ok(None),
    Some(SelectValue::Text(text)) => text.parse().map(Some).map_err(serde::de::Error::custom),
  }
}

/// The booking form as filled in so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservationForm {
  #[serde(deserialize_with = "blank_as_none")]
  pub date: Option<NaiveDate>,
  #[serde(deserialize_with = "blank_as_none")]
  pub time: Option<TimeSlot>,
  #[serde(deserialize_with = "blank_as_none")]
  pub party_size: Option<PartySize>,
  pub name: String,
  pub email: String,
  pub phone: String,
  pub requests: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReservationDraft {
  pub reservation_date: NaiveDate,
  pub reservation_time: TimeSlot,
  pub party_size: PartySize,
  pub customer_name: String,
  pub customer_email: String,
  pub customer_phone: Option<String>,
  pub special_requests: Option<String>,
}

/// Requires date, time, party size, name and email; rejects dates before
/// `today`.
pub fn validate_reservation(form: &ReservationForm, today: NaiveDate) -> Result<ReservationDraft, FormError> {
  let (Some(date), Some(time), Some(party_size), Some(name), Some(email)) = (
    form.date,
    form.time,
    form.party_size,
    non_blank(&form.name),
    non_blank(&form.email),
  ) else {
    return Err(FormError::MissingReservationFields);
  };

  if date < today {
    return Err(FormError::DateInPast(date));
  }

  Ok(ReservationDraft {
    reservation_date: date,
    reservation_time: time,
    party_size,
    customer_name: name,
    customer_email: email,
    customer_phone: non_blank(&form.phone),
    special_requests: non_blank(&form.requests),
  })
}
