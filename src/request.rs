use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Root of the inbound dialog-turn payload.
///
/// The host runtime decodes one [`Request`] per turn and hands it to an
/// [`Action`](crate::Action). All four top-level fields are required by the
/// external protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// The user that initiated the conversation.
    pub user: User,
    /// The device the conversation is taking place on.
    pub device: Device,
    /// Session data for the ongoing conversation.
    pub conversation: Conversation,
    /// Semantically parsed inputs for this turn. The platform currently
    /// sends exactly one element; the schema stays permissive and leaves
    /// strictness to [`Validator`](crate::Validator).
    pub inputs: Vec<Input>,
}

impl Request {
    /// The first (and per the platform, only) input of this turn.
    pub fn primary_input(&self) -> Option<&Input> {
        self.inputs.first()
    }
}

/// Identity and consent-gated profile data for the requesting user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Random identifier for the user. Users can reset it at any time, so
    /// it is a session-tracking handle, not a stable storage key.
    pub user_id: String,
    /// Personal details, present only after the user granted consent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
    /// OAuth2 token identifying the user, present only with account linking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

/// Name fields shared once the user grants the NAME permission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// First name.
    #[serde(default)]
    pub given_name: String,
    /// Last name. May be empty even when the profile is present.
    #[serde(default)]
    pub family_name: String,
    /// Full display name.
    #[serde(default)]
    pub display_name: String,
}

/// The device the conversation was initiated from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Device position, present only with a location permission.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

/// A place, down to whatever precision the granted permission allows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude/longitude pair, precise-location permission only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    /// Display address, e.g. "1600 Amphitheatre Pkwy, Mountain View, CA".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
    /// City name, available with either location permission.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// ZIP code, available with either location permission.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
}

/// Geographic coordinates in degrees.
///
/// Latitude is meaningful in `[-90, 90]` and longitude in `[-180, 180]`;
/// decoding does not reject out-of-range values, the opt-in
/// [`Validator`](crate::Validator) does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Session data about the ongoing conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    /// Unique id assigned on the first turn and stable until the
    /// conversation ends.
    pub conversation_id: String,
    /// Stage of the dialog's life cycle.
    #[serde(rename = "type")]
    pub lifecycle: ConversationLifecycle,
    /// Opaque token echoed from the agent's previous response. Empty on the
    /// first turn, when there is no previous response to echo.
    #[serde(default)]
    pub conversation_token: String,
}

/// Life-cycle stage of a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConversationLifecycle {
    /// First turn of a fresh conversation.
    New,
    /// An ongoing multi-turn conversation.
    Active,
    /// The conversation timed out.
    Expired,
    /// The conversation was archived.
    Archived,
    /// Stage not communicated, or a value this crate does not know yet.
    #[serde(rename = "TYPE_UNSPECIFIED", other)]
    Unspecified,
}

impl Default for ConversationLifecycle {
    fn default() -> Self {
        ConversationLifecycle::Unspecified
    }
}

/// One semantically parsed input: the matched intent, the raw transcripts
/// that produced it and the typed arguments extracted from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Input {
    /// Id of the matched intent, one of the `possible_intents` the agent
    /// declared on the previous turn.
    pub intent: String,
    /// Raw transcriptions from each exchange that fed this input.
    #[serde(default)]
    pub raw_inputs: Vec<RawInput>,
    /// Typed values extracted from the user's utterance.
    #[serde(default)]
    pub arguments: Vec<Argument>,
}

/// A single raw transcription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInput {
    /// When the input was captured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<Timestamp>,
    /// How the input was produced.
    #[serde(default)]
    pub input_type: InputType,
    /// Keyboard or spoken input from the end user.
    pub query: String,
}

/// How a raw input reached the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InputType {
    /// Typed query.
    Touch,
    /// Voice query.
    Voice,
    /// Unknown capture channel, or a value this crate does not know yet.
    #[serde(rename = "UNSPECIFIC_INPUT_TYPE", other)]
    Unspecific,
}

impl Default for InputType {
    fn default() -> Self {
        InputType::Unspecific
    }
}

/// Seconds-and-nanos instant, as the protocol carries timestamps.
///
/// `seconds` counts UTC seconds since the Unix epoch and may be negative;
/// `nanos` counts forward from that second and is meaningful in
/// `[0, 999_999_999]`.
///
/// # Examples
///
/// ```
/// use parley::request::Timestamp;
///
/// let ts = Timestamp { seconds: 1_700_000_000, nanos: 0 };
/// let dt = ts.to_datetime().unwrap();
/// assert_eq!(Timestamp::from_datetime(dt), ts);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    /// Whole seconds since `1970-01-01T00:00:00Z`.
    pub seconds: i64,
    /// Non-negative nanosecond fraction of the second.
    pub nanos: i32,
}

impl Timestamp {
    /// Convert to a [`DateTime`], if the pair denotes a representable
    /// instant. Negative or overlarge `nanos` yield `None`.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let nanos = u32::try_from(self.nanos).ok()?;
        DateTime::from_timestamp(self.seconds, nanos)
    }

    /// Build a [`Timestamp`] from a [`DateTime`].
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Timestamp {
            seconds: at.timestamp(),
            nanos: at.timestamp_subsec_nanos() as i32,
        }
    }
}

/// A named argument extracted from the user's input.
///
/// Exactly one of the typed value fields is populated in practice; the wire
/// format leaves the others absent. [`Argument::value`] surfaces the
/// populated alternative as a single sum type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    /// Name of the payload in the query.
    pub name: String,
    /// Raw text the value was extracted from.
    #[serde(default)]
    pub raw_text: String,
    /// Populated for a number argument.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub int_value: Option<i64>,
    /// Populated for a yes/no argument. The wire carries a number here even
    /// though the meaning is boolean; any non-zero value reads as yes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bool_value: Option<f64>,
    /// Populated for a free-text argument.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_value: Option<String>,
    /// Populated for a calendar-date argument.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_value: Option<DateValue>,
    /// Populated for a time-of-day argument.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_value: Option<TimeValue>,
    /// Populated for a place argument.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_value: Option<Location>,
}

impl Argument {
    /// The populated typed value, if any.
    ///
    /// When more than one field is populated (which the platform does not
    /// send), the first in wire order wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use parley::request::{Argument, ArgumentValue};
    ///
    /// let arg = Argument {
    ///     name: "guests".into(),
    ///     raw_text: "four".into(),
    ///     int_value: Some(4),
    ///     bool_value: None,
    ///     text_value: None,
    ///     date_value: None,
    ///     time_value: None,
    ///     location_value: None,
    /// };
    /// assert_eq!(arg.value(), Some(ArgumentValue::Int(4)));
    /// ```
    pub fn value(&self) -> Option<ArgumentValue<'_>> {
        if let Some(n) = self.int_value {
            Some(ArgumentValue::Int(n))
        } else if let Some(b) = self.bool_value {
            Some(ArgumentValue::YesNo(b != 0.0))
        } else if let Some(t) = &self.text_value {
            Some(ArgumentValue::Text(t))
        } else if let Some(d) = &self.date_value {
            Some(ArgumentValue::Date(d))
        } else if let Some(t) = &self.time_value {
            Some(ArgumentValue::Time(t))
        } else if let Some(l) = &self.location_value {
            Some(ArgumentValue::Location(l))
        } else {
            None
        }
    }
}

/// The one populated alternative of an [`Argument`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArgumentValue<'a> {
    /// A number argument.
    Int(i64),
    /// A yes/no argument; non-zero wire values read as yes.
    YesNo(bool),
    /// A free-text argument.
    Text(&'a str),
    /// A calendar-date argument.
    Date(&'a DateValue),
    /// A time-of-day argument.
    Time(&'a TimeValue),
    /// A place argument.
    Location(&'a Location),
}

/// Calendar date as the protocol carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateValue {
    pub year: i32,
    /// Month of the year, 1 through 12.
    pub month: u32,
    /// Day of the month, 1 through 31.
    pub day: u32,
}

impl DateValue {
    /// Convert to a [`NaiveDate`], if the fields denote a real date.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

/// Time of day as the protocol carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeValue {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub nanos: u32,
}

impl TimeValue {
    /// Convert to a [`NaiveTime`], if the fields denote a real time of day.
    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_nano_opt(self.hours, self.minutes, self.seconds, self.nanos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_argument(name: &str) -> Argument {
        Argument {
            name: name.into(),
            raw_text: String::new(),
            int_value: None,
            bool_value: None,
            text_value: None,
            date_value: None,
            time_value: None,
            location_value: None,
        }
    }

    #[test]
    fn argument_value_picks_populated_alternative() {
        let mut arg = bare_argument("when");
        assert_eq!(arg.value(), None);

        arg.date_value = Some(DateValue {
            year: 2024,
            month: 6,
            day: 1,
        });
        assert_eq!(
            arg.value(),
            Some(ArgumentValue::Date(&DateValue {
                year: 2024,
                month: 6,
                day: 1,
            }))
        );
    }

    #[test]
    fn argument_yes_no_reads_nonzero_as_yes() {
        let mut arg = bare_argument("confirmed");
        arg.bool_value = Some(1.0);
        assert_eq!(arg.value(), Some(ArgumentValue::YesNo(true)));

        arg.bool_value = Some(0.0);
        assert_eq!(arg.value(), Some(ArgumentValue::YesNo(false)));
    }

    #[test]
    fn fallback_variants_keep_their_wire_names() {
        assert_eq!(
            serde_json::to_string(&ConversationLifecycle::Unspecified).unwrap(),
            "\"TYPE_UNSPECIFIED\""
        );
        assert_eq!(
            serde_json::from_str::<ConversationLifecycle>("\"SOME_FUTURE_STAGE\"").unwrap(),
            ConversationLifecycle::Unspecified
        );

        assert_eq!(
            serde_json::to_string(&InputType::Unspecific).unwrap(),
            "\"UNSPECIFIC_INPUT_TYPE\""
        );
        assert_eq!(
            serde_json::from_str::<InputType>("\"GESTURE\"").unwrap(),
            InputType::Unspecific
        );
    }

    #[test]
    fn timestamp_round_trips_through_chrono() {
        let ts = Timestamp {
            seconds: 1_700_000_000,
            nanos: 250_000_000,
        };
        let dt = ts.to_datetime().unwrap();
        assert_eq!(Timestamp::from_datetime(dt), ts);
    }

    #[test]
    fn timestamp_rejects_negative_nanos() {
        let ts = Timestamp {
            seconds: 0,
            nanos: -1,
        };
        assert!(ts.to_datetime().is_none());
    }

    #[test]
    fn date_and_time_conversions_checked() {
        let date = DateValue {
            year: 2024,
            month: 2,
            day: 30,
        };
        assert!(date.to_naive_date().is_none());

        let time = TimeValue {
            hours: 23,
            minutes: 59,
            seconds: 59,
            nanos: 0,
        };
        assert!(time.to_naive_time().is_some());

        let bad = TimeValue {
            hours: 24,
            minutes: 0,
            seconds: 0,
            nanos: 0,
        };
        assert!(bad.to_naive_time().is_none());
    }
}
