use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Protocol cap on the number of reprompts in an [`InputPrompt`].
pub const MAX_NO_INPUT_PROMPTS: usize = 3;

/// Outbound payload for one dialog turn.
///
/// A response is exactly one of two shapes: the agent either expects another
/// user turn or delivers a terminal utterance. On the wire the two are told
/// apart by the boolean `expect_user_response` field next to the payload of
/// the active shape; in memory the enum makes a disagreeing combination
/// unrepresentable. Both shapes echo the opaque conversation token the
/// builder was given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "Envelope", try_from = "Envelope")]
pub enum Response {
    /// The dialog continues; the platform should collect another input.
    Expecting {
        /// Opaque token circulated back on the next turn.
        conversation_token: String,
        /// Inputs the agent can handle next.
        expected_inputs: Vec<ExpectedInput>,
    },
    /// The dialog is over; deliver the final utterance.
    Final {
        /// Opaque token circulated back by the platform.
        conversation_token: String,
        /// The terminal speech payload.
        final_response: FinalResponse,
    },
}

impl Response {
    /// The conversation token carried by either shape.
    pub fn conversation_token(&self) -> &str {
        match self {
            Response::Expecting {
                conversation_token, ..
            }
            | Response::Final {
                conversation_token, ..
            } => conversation_token,
        }
    }

    /// Whether the agent expects another user turn.
    pub fn expects_user_response(&self) -> bool {
        matches!(self, Response::Expecting { .. })
    }
}

/// A decoded response envelope whose tag and payload disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// `expect_user_response` was true but `expected_inputs` was absent.
    #[error("expecting envelope carries no expected_inputs")]
    MissingExpectedInputs,
    /// `expect_user_response` was false but `final_response` was absent.
    #[error("final envelope carries no final_response")]
    MissingFinalResponse,
    /// Both payload fields were present at once.
    #[error("envelope populates both expected_inputs and final_response")]
    ConflictingPayloads,
}

/// Wire layout of a [`Response`].
///
/// Serialization always emits the tag plus exactly the payload field of the
/// active variant; deserialization re-checks that the tag and the populated
/// payload agree.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Envelope {
    conversation_token: String,
    expect_user_response: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expected_inputs: Option<Vec<ExpectedInput>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    final_response: Option<FinalResponse>,
}

impl From<Response> for Envelope {
    fn from(response: Response) -> Self {
        match response {
            Response::Expecting {
                conversation_token,
                expected_inputs,
            } => Envelope {
                conversation_token,
                expect_user_response: true,
                expected_inputs: Some(expected_inputs),
                final_response: None,
            },
            Response::Final {
                conversation_token,
                final_response,
            } => Envelope {
                conversation_token,
                expect_user_response: false,
                expected_inputs: None,
                final_response: Some(final_response),
            },
        }
    }
}

impl TryFrom<Envelope> for Response {
    type Error = EnvelopeError;

    fn try_from(envelope: Envelope) -> Result<Self, Self::Error> {
        if envelope.expected_inputs.is_some() && envelope.final_response.is_some() {
            return Err(EnvelopeError::ConflictingPayloads);
        }
        if envelope.expect_user_response {
            match envelope.expected_inputs {
                Some(expected_inputs) => Ok(Response::Expecting {
                    conversation_token: envelope.conversation_token,
                    expected_inputs,
                }),
                None => Err(EnvelopeError::MissingExpectedInputs),
            }
        } else {
            match envelope.final_response {
                Some(final_response) => Ok(Response::Final {
                    conversation_token: envelope.conversation_token,
                    final_response,
                }),
                None => Err(EnvelopeError::MissingFinalResponse),
            }
        }
    }
}

/// One input the agent requires on the next turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectedInput {
    /// The prompt asking the user for the input.
    pub input_prompt: InputPrompt,
    /// Intents that can fulfill the input.
    pub possible_intents: Vec<ExpectedIntent>,
}

/// The customized prompt that asks the user for input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputPrompt {
    /// Prompts spoken when the input is first requested.
    pub initial_prompts: Vec<SpeechResponse>,
    /// Reprompts spoken when the user stays silent, at most
    /// [`MAX_NO_INPUT_PROMPTS`] of them.
    pub no_input_prompts: Vec<SpeechResponse>,
}

impl InputPrompt {
    /// Build a prompt, clamping the reprompt list to the protocol cap.
    pub fn new(
        initial_prompts: Vec<SpeechResponse>,
        mut no_input_prompts: Vec<SpeechResponse>,
    ) -> Self {
        if no_input_prompts.len() > MAX_NO_INPUT_PROMPTS {
            warn!(
                dropped = no_input_prompts.len() - MAX_NO_INPUT_PROMPTS,
                "no_input_prompts over the protocol cap, clamping"
            );
            no_input_prompts.truncate(MAX_NO_INPUT_PROMPTS);
        }
        InputPrompt {
            initial_prompts,
            no_input_prompts,
        }
    }

    /// A prompt with a single plain-text initial prompt and no reprompts.
    pub fn text(prompt: impl Into<String>) -> Self {
        InputPrompt {
            initial_prompts: vec![SpeechResponse::text(prompt)],
            no_input_prompts: Vec::new(),
        }
    }
}

/// An intent the agent declares it can handle on the next turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectedIntent {
    /// Id of the platform-provided intent.
    pub intent: String,
    /// Set when matching the intent requires asking the user for a
    /// permission first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_value_spec: Option<InputValueSpec>,
}

impl ExpectedIntent {
    /// An intent with no attached value spec.
    pub fn named(intent: impl Into<String>) -> Self {
        ExpectedIntent {
            intent: intent.into(),
            input_value_spec: None,
        }
    }

    /// An intent gated on the given permissions. `opt_context` is spoken to
    /// the user to explain why the agent asks.
    pub fn with_permissions(
        intent: impl Into<String>,
        opt_context: impl Into<String>,
        permissions: Vec<Permission>,
    ) -> Self {
        ExpectedIntent {
            intent: intent.into(),
            input_value_spec: Some(InputValueSpec {
                permission_value_spec: PermissionValueSpec {
                    opt_context: opt_context.into(),
                    permissions,
                },
            }),
        }
    }
}

/// Container for the value spec attached to an [`ExpectedIntent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputValueSpec {
    /// Permission request details.
    pub permission_value_spec: PermissionValueSpec,
}

/// A request for the user's consent to share protected data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionValueSpec {
    /// Spoken context explaining why the permission is needed.
    pub opt_context: String,
    /// The permissions being requested.
    pub permissions: Vec<Permission>,
}

/// A capability the agent may request access to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    /// The user's name fields.
    Name,
    /// Exact device coordinates.
    DevicePreciseLocation,
    /// City/ZIP level device location.
    DeviceCoarseLocation,
}

/// The audible output of a turn: plain text or SSML markup, never both.
///
/// Plain text is expected to be ASCII-only by the platform; this crate does
/// not enforce that. The opt-in check lives in
/// [`Validator`](crate::Validator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpeechResponse {
    /// Plain text-to-speech output.
    Text { text_to_speech: String },
    /// Structured SSML output.
    Ssml { ssml: String },
}

impl SpeechResponse {
    /// Plain text speech.
    pub fn text(text: impl Into<String>) -> Self {
        SpeechResponse::Text {
            text_to_speech: text.into(),
        }
    }

    /// SSML markup speech.
    pub fn ssml(markup: impl Into<String>) -> Self {
        SpeechResponse::Ssml {
            ssml: markup.into(),
        }
    }

    /// The plain text, when this is the text alternative.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SpeechResponse::Text { text_to_speech } => Some(text_to_speech),
            SpeechResponse::Ssml { .. } => None,
        }
    }

    /// The markup, when this is the SSML alternative.
    pub fn as_ssml(&self) -> Option<&str> {
        match self {
            SpeechResponse::Ssml { ssml } => Some(ssml),
            SpeechResponse::Text { .. } => None,
        }
    }
}

/// Terminal payload of a [`Response::Final`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalResponse {
    /// The utterance delivered to the user.
    pub speech_response: SpeechResponse,
}
