use async_trait::async_trait;
use tracing::debug;

use crate::builder::ResponseBuilder;
use crate::request::Request;
use crate::response::Response;

/// Greeting spoken by [`GreetingAction`] on every turn.
const GREETING: &str = "Hello Report IO!";

/// A turn handler: maps one inbound [`Request`] to one outbound
/// [`Response`].
///
/// The operation is async so an implementation can call out to a backend
/// before answering without changing its signature; nothing shipped here
/// actually suspends. Handlers are total: whatever the request carries,
/// some well-formed response comes back.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use parley::{Action, Request, Response, ResponseBuilder};
///
/// struct EchoAction;
///
/// #[async_trait]
/// impl Action for EchoAction {
///     async fn execute(&self, request: Request) -> Response {
///         let heard = request
///             .primary_input()
///             .and_then(|input| input.raw_inputs.first())
///             .map(|raw| raw.query.clone())
///             .unwrap_or_default();
///         ResponseBuilder::new(request.conversation.conversation_token).send_text(heard)
///     }
/// }
/// ```
#[async_trait]
pub trait Action: Send + Sync {
    /// Answer one dialog turn.
    async fn execute(&self, request: Request) -> Response;
}

/// Placeholder handler that replies with a fixed greeting.
///
/// Reads nothing from the request except the conversation token, which it
/// echoes back through a [`ResponseBuilder`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GreetingAction;

#[async_trait]
impl Action for GreetingAction {
    async fn execute(&self, request: Request) -> Response {
        debug!(
            conversation = %request.conversation.conversation_id,
            "answering turn with the fixed greeting"
        );
        ResponseBuilder::new(request.conversation.conversation_token).send_text(GREETING)
    }
}
