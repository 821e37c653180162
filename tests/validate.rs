use parley::{
    Argument, Conversation, ConversationLifecycle, Coordinates, Device, ExpectedInput,
    ExpectedIntent, Input, InputPrompt, Location, RawInput, Request, Response, ResponseBuilder,
    SpeechResponse, Timestamp, TimeValue, User, ValidationConfig, ValidationError, Validator,
};
use tempfile::tempdir;

fn plain_request() -> Request {
    Request {
        user: User {
            user_id: "u".into(),
            profile: None,
            access_token: None,
        },
        device: Device { location: None },
        conversation: Conversation {
            conversation_id: "c".into(),
            lifecycle: ConversationLifecycle::Active,
            conversation_token: String::new(),
        },
        inputs: vec![Input {
            intent: "assistant.intent.action.TEXT".into(),
            raw_inputs: Vec::new(),
            arguments: Vec::new(),
        }],
    }
}

fn located_request(latitude: f64, longitude: f64) -> Request {
    let mut request = plain_request();
    request.device.location = Some(Location {
        coordinates: Some(Coordinates {
            latitude,
            longitude,
        }),
        formatted_address: None,
        city: None,
        zip_code: None,
    });
    request
}

#[test]
fn accepts_a_plain_turn() {
    let validator = Validator::new();
    assert_eq!(validator.check_request(&located_request(37.4, -122.1)), Ok(()));
    assert_eq!(
        validator.check_response(&ResponseBuilder::new("t").send_text("bye")),
        Ok(())
    );
}

#[test]
fn rejects_out_of_range_coordinates() {
    let validator = Validator::new();
    assert_eq!(
        validator.check_request(&located_request(97.0, 0.0)),
        Err(ValidationError::LatitudeOutOfRange(97.0))
    );
    assert_eq!(
        validator.check_request(&located_request(0.0, -200.5)),
        Err(ValidationError::LongitudeOutOfRange(-200.5))
    );
}

#[test]
fn rejects_out_of_range_nanos() {
    let mut request = plain_request();
    request.inputs[0].raw_inputs.push(RawInput {
        create_time: Some(Timestamp {
            seconds: 0,
            nanos: 1_500_000_000,
        }),
        input_type: Default::default(),
        query: "hi".into(),
    });
    assert_eq!(
        Validator::new().check_request(&request),
        Err(ValidationError::NanosOutOfRange(1_500_000_000))
    );
}

#[test]
fn rejects_out_of_range_time_argument_nanos() {
    let mut request = plain_request();
    request.inputs[0].arguments.push(Argument {
        name: "at".into(),
        raw_text: "noon".into(),
        int_value: None,
        bool_value: None,
        text_value: None,
        date_value: None,
        time_value: Some(TimeValue {
            hours: 12,
            minutes: 0,
            seconds: 0,
            nanos: 1_000_000_000,
        }),
        location_value: None,
    });
    assert_eq!(
        Validator::new().check_request(&request),
        Err(ValidationError::NanosOutOfRange(1_000_000_000))
    );
}

#[test]
fn input_count_is_policy() {
    let mut request = plain_request();
    let second = request.inputs[0].clone();
    request.inputs.push(second);

    assert_eq!(Validator::new().check_request(&request), Ok(()));
    let strict = Validator::with_config(ValidationConfig {
        single_input: true,
        ascii_speech: false,
    });
    assert_eq!(
        strict.check_request(&request),
        Err(ValidationError::InputCount(2))
    );
}

#[test]
fn ascii_speech_is_policy() {
    let response = ResponseBuilder::new("t").send_text("Gr\u{fc}\u{df} dich!");

    assert_eq!(Validator::new().check_response(&response), Ok(()));
    let strict = Validator::with_config(ValidationConfig {
        single_input: false,
        ascii_speech: true,
    });
    assert_eq!(
        strict.check_response(&response),
        Err(ValidationError::NonAsciiSpeech)
    );
    assert_eq!(
        strict.check_response(&ResponseBuilder::new("t").send_text("Hello!")),
        Ok(())
    );
}

#[test]
fn rejects_reprompts_over_the_cap() {
    let response = Response::Expecting {
        conversation_token: "t".into(),
        expected_inputs: vec![ExpectedInput {
            input_prompt: InputPrompt {
                initial_prompts: vec![SpeechResponse::text("hm?")],
                no_input_prompts: (0..4).map(|_| SpeechResponse::text("there?")).collect(),
            },
            possible_intents: vec![ExpectedIntent::named("assistant.intent.action.TEXT")],
        }],
    };
    assert_eq!(
        Validator::new().check_response(&response),
        Err(ValidationError::TooManyReprompts(4))
    );
}

#[test]
fn rejects_an_empty_intent_id() {
    let mut request = plain_request();
    request.inputs[0].intent.clear();
    assert_eq!(
        Validator::new().check_request(&request),
        Err(ValidationError::EmptyIntent)
    );

    let response = ResponseBuilder::new("t").ask(
        InputPrompt::text("and then?"),
        vec![ExpectedIntent::named("")],
    );
    assert_eq!(
        Validator::new().check_response(&response),
        Err(ValidationError::EmptyIntent)
    );
}

#[tokio::test]
async fn config_loads_from_toml() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("parley.toml");
    tokio::fs::write(&path, "single_input = true\n").await.unwrap();

    let cfg = parley::config::load(&path).await.unwrap();
    assert!(cfg.single_input);
    assert!(!cfg.ascii_speech);
}

#[tokio::test]
async fn config_defaults_to_permissive() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("parley.toml");
    tokio::fs::write(&path, "").await.unwrap();

    let cfg = parley::config::load(&path).await.unwrap();
    assert!(!cfg.single_input);
    assert!(!cfg.ascii_speech);
}
