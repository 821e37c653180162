use thiserror::Error;

use crate::request::Request;
use crate::response::Response;

/// Failure at the JSON boundary.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The payload did not decode into (or encode from) the target shape.
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Decode one inbound turn payload.
pub fn decode_request(json: &str) -> Result<Request, CodecError> {
    Ok(serde_json::from_str(json)?)
}

/// Decode a response envelope. Envelopes whose tag and payload disagree are
/// rejected here.
pub fn decode_response(json: &str) -> Result<Response, CodecError> {
    Ok(serde_json::from_str(json)?)
}

/// Encode a response envelope for the wire.
pub fn encode_response(response: &Response) -> Result<String, CodecError> {
    Ok(serde_json::to_string(response)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_request_reports_bad_json() {
        let err = decode_request("{not json").unwrap_err();
        assert!(err.to_string().starts_with("malformed payload"));
    }

    #[test]
    fn decode_response_rejects_tag_payload_mismatch() {
        // Tag says the dialog continues, payload says it is over.
        let json = r#"{
            "conversation_token": "tok",
            "expect_user_response": true,
            "final_response": { "speech_response": { "text_to_speech": "bye" } }
        }"#;
        let err = decode_response(json).unwrap_err();
        assert!(err.to_string().contains("expected_inputs"));
    }
}
