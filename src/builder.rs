use tracing::trace;

use crate::response::{
    ExpectedInput, ExpectedIntent, FinalResponse, InputPrompt, Response, SpeechResponse,
};

/// Builds well-formed [`Response`] envelopes for one conversation turn.
///
/// A builder is constructed with the opaque conversation token of the turn
/// being answered and echoes it verbatim into every envelope it produces;
/// the token is never inspected and may be empty. Beyond the stored token
/// the builder is stateless: it can be reused, and every call returns an
/// independent value.
///
/// Each operation produces exactly one valid envelope shape, so callers
/// cannot assemble a response whose tag and payload disagree.
///
/// # Examples
///
/// ```
/// use parley::ResponseBuilder;
///
/// let builder = ResponseBuilder::new("state-42");
/// let response = builder.send_text("Good night.");
/// assert!(!response.expects_user_response());
/// assert_eq!(response.conversation_token(), "state-42");
/// ```
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    conversation_token: String,
}

impl ResponseBuilder {
    /// Create a builder echoing `conversation_token`.
    pub fn new(conversation_token: impl Into<String>) -> Self {
        ResponseBuilder {
            conversation_token: conversation_token.into(),
        }
    }

    /// A terminal envelope speaking `text` as plain text-to-speech.
    ///
    /// The platform expects ASCII-only text here; the builder does not
    /// enforce that.
    pub fn send_text(&self, text: impl Into<String>) -> Response {
        self.finish(SpeechResponse::text(text))
    }

    /// A terminal envelope speaking `markup` as SSML.
    pub fn send_ssml(&self, markup: impl Into<String>) -> Response {
        self.finish(SpeechResponse::ssml(markup))
    }

    /// A continuing envelope: ask `prompt` and offer `possible_intents` for
    /// the next turn.
    pub fn ask(&self, prompt: InputPrompt, possible_intents: Vec<ExpectedIntent>) -> Response {
        trace!(
            token = %self.conversation_token,
            intents = possible_intents.len(),
            "built expecting envelope"
        );
        Response::Expecting {
            conversation_token: self.conversation_token.clone(),
            expected_inputs: vec![ExpectedInput {
                input_prompt: prompt,
                possible_intents,
            }],
        }
    }

    fn finish(&self, speech: SpeechResponse) -> Response {
        trace!(token = %self.conversation_token, "built final envelope");
        Response::Final {
            conversation_token: self.conversation_token.clone(),
            final_response: FinalResponse {
                speech_response: speech,
            },
        }
    }
}
