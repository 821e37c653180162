use thiserror::Error;

use crate::config::ValidationConfig;
use crate::request::{Location, Request};
use crate::response::{Response, SpeechResponse, MAX_NO_INPUT_PROMPTS};

/// A payload constraint the platform documents but decoding does not check.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ValidationError {
    #[error("latitude {0} outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} outside [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("nanos {0} outside [0, 999999999]")]
    NanosOutOfRange(i64),
    #[error("expected exactly one input, request carries {0}")]
    InputCount(usize),
    #[error("empty intent id")]
    EmptyIntent,
    #[error("no_input_prompts carries {0} entries, protocol cap is 3")]
    TooManyReprompts(usize),
    #[error("speech contains non-ASCII characters")]
    NonAsciiSpeech,
}

/// Opt-in checker for the constraints the schema types stay permissive
/// about.
///
/// Decoding never rejects an out-of-range coordinate or an oversized
/// reprompt list; hosts that want those constraints enforced run decoded
/// requests and built responses through a [`Validator`]. Checks stop at the
/// first violation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// A validator with the default (fully permissive) policy.
    pub fn new() -> Self {
        Validator {
            config: ValidationConfig::default(),
        }
    }

    /// A validator applying `config`.
    pub fn with_config(config: ValidationConfig) -> Self {
        Validator { config }
    }

    /// Check an inbound request against the documented constraints.
    pub fn check_request(&self, request: &Request) -> Result<(), ValidationError> {
        if self.config.single_input && request.inputs.len() != 1 {
            return Err(ValidationError::InputCount(request.inputs.len()));
        }
        if let Some(location) = &request.device.location {
            check_location(location)?;
        }
        for input in &request.inputs {
            if input.intent.is_empty() {
                return Err(ValidationError::EmptyIntent);
            }
            for raw in &input.raw_inputs {
                if let Some(at) = &raw.create_time {
                    if !(0..=999_999_999).contains(&at.nanos) {
                        return Err(ValidationError::NanosOutOfRange(i64::from(at.nanos)));
                    }
                }
            }
            for argument in &input.arguments {
                if let Some(time) = &argument.time_value {
                    if time.nanos > 999_999_999 {
                        return Err(ValidationError::NanosOutOfRange(i64::from(time.nanos)));
                    }
                }
                if let Some(location) = &argument.location_value {
                    check_location(location)?;
                }
            }
        }
        Ok(())
    }

    /// Check an outbound response against the documented constraints.
    pub fn check_response(&self, response: &Response) -> Result<(), ValidationError> {
        match response {
            Response::Expecting {
                expected_inputs, ..
            } => {
                for expected in expected_inputs {
                    let prompt = &expected.input_prompt;
                    if prompt.no_input_prompts.len() > MAX_NO_INPUT_PROMPTS {
                        return Err(ValidationError::TooManyReprompts(
                            prompt.no_input_prompts.len(),
                        ));
                    }
                    for speech in prompt.initial_prompts.iter().chain(&prompt.no_input_prompts) {
                        self.check_speech(speech)?;
                    }
                    for intent in &expected.possible_intents {
                        if intent.intent.is_empty() {
                            return Err(ValidationError::EmptyIntent);
                        }
                    }
                }
                Ok(())
            }
            Response::Final { final_response, .. } => {
                self.check_speech(&final_response.speech_response)
            }
        }
    }

    fn check_speech(&self, speech: &SpeechResponse) -> Result<(), ValidationError> {
        if !self.config.ascii_speech {
            return Ok(());
        }
        let content = match speech {
            SpeechResponse::Text { text_to_speech } => text_to_speech,
            SpeechResponse::Ssml { ssml } => ssml,
        };
        if content.is_ascii() {
            Ok(())
        } else {
            Err(ValidationError::NonAsciiSpeech)
        }
    }
}

fn check_location(location: &Location) -> Result<(), ValidationError> {
    if let Some(coordinates) = &location.coordinates {
        if !(-90.0..=90.0).contains(&coordinates.latitude) {
            return Err(ValidationError::LatitudeOutOfRange(coordinates.latitude));
        }
        if !(-180.0..=180.0).contains(&coordinates.longitude) {
            return Err(ValidationError::LongitudeOutOfRange(coordinates.longitude));
        }
    }
    Ok(())
}
