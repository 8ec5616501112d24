//! Conversation turn loop for the Nimbus Discord bot.
//!
//! The [`Orchestrator`] drives one full conversation turn:
//!
//! 1. Strip the bot's mention from the inbound text; prepend quoted context
//!    for replies; append a note for image attachments.
//! 2. Pull history from conversation memory.
//! 3. Call the language model once with system instructions, history, the
//!    new turn, and the caller's privilege-filtered tool list.
//! 4. Dispatch any returned tool calls in order, streaming each non-empty
//!    result to the channel immediately.
//! 5. Persist the user turn and, if the model produced text, the assistant
//!    turn.
//! 6. Deliver the text, chunked at line boundaries under the platform's
//!    message size limit.
//!
//! Tool results are deliberately not fed back into a second model call; the
//! raw handler output reaches the channel alongside any same-response text.
//! Any failure inside the pipeline degrades to a single apology message -
//! the event loop never sees an error.

mod error;
mod formatting;
mod orchestrator;

pub use error::OrchestratorError;
pub use formatting::{chunk_message, strip_continuation_marker, CONTINUATION_MARKER, MAX_MESSAGE_LEN};
pub use orchestrator::Orchestrator;
