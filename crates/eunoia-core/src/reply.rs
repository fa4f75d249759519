//! Decoding backend replies, and a reply source for offline use.
//!
//! The chat backend is expected to answer with a bare JSON [`Instruction`],
//! but model-generated bodies sometimes wrap the object in prose or a code
//! fence. [`decode_reply`] cuts the text down to the outermost `{ ... }`
//! before decoding. [`resolve_reply`] turns any failure into the fallback
//! instruction so the character always responds.

use eunoia_types::Instruction;
use tracing::warn;

/// Errors from obtaining or decoding a reply.
#[derive(Debug, thiserror::Error)]
pub enum ReplyError {
    /// The body contained no `{ ... }` span.
    #[error("reply contains no JSON object")]
    NoJsonObject,

    /// The `{ ... }` span did not decode as an instruction.
    #[error("malformed instruction: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The reply source itself failed (transport, status code, timeout).
    #[error("reply source unavailable: {message}")]
    Unavailable {
        /// Description of the failure.
        message: String,
    },
}

/// A source of instructions for chat messages.
///
/// The engine's HTTP client is one implementation; [`ScriptedReplies`] is a
/// canned offline one, also used in tests.
pub trait ReplySource {
    /// Produce an instruction in answer to `message`.
    ///
    /// # Errors
    ///
    /// Returns [`ReplyError`] if no instruction could be obtained. Callers
    /// normally pass the result through [`resolve_reply`].
    fn reply(&mut self, message: &str) -> Result<Instruction, ReplyError>;
}

/// Decode a reply body, tolerating prose around the JSON object.
pub fn decode_reply(body: &str) -> Result<Instruction, ReplyError> {
    let trimmed = body.trim();
    if let Ok(instruction) = serde_json::from_str::<Instruction>(trimmed) {
        return Ok(instruction);
    }
    let json = extract_object(trimmed).ok_or(ReplyError::NoJsonObject)?;
    Ok(serde_json::from_str(json)?)
}

/// The span from the first `{` to the last `}`, inclusive.
fn extract_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    text.get(start..=end)
}

/// Unwrap a reply result, substituting [`Instruction::fallback`] on failure.
pub fn resolve_reply(result: Result<Instruction, ReplyError>) -> Instruction {
    match result {
        Ok(instruction) => instruction,
        Err(e) => {
            warn!(error = %e, "Chat backend failed, using fallback reply");
            Instruction::fallback()
        }
    }
}

/// Keyword-matched canned replies for running without a backend.
///
/// Mirrors the companion's offline behaviour: sadness gets concern,
/// happiness gets celebration, anything else gets an open prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedReplies;

impl ScriptedReplies {
    /// Create a new scripted source.
    pub const fn new() -> Self {
        Self
    }
}

impl ReplySource for ScriptedReplies {
    fn reply(&mut self, message: &str) -> Result<Instruction, ReplyError> {
        let text = message.to_lowercase();
        let instruction = if text.contains("sad") {
            Instruction::new("I'm here for you. Tell me more?", "CONCERNED", "IDLE", "NONE")
        } else if text.contains("happy") {
            Instruction::new("Yay! I love seeing you happy!", "HAPPY", "IDLE", "NONE")
        } else {
            Instruction::new("I'm listening. How else are you feeling?", "CALM", "IDLE", "NONE")
        };
        Ok(instruction)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use eunoia_types::FALLBACK_REPLY;

    use super::*;

    #[test]
    fn decodes_bare_json() {
        let body = r#"{"reply":"Hi","emotion":"HAPPY","action":"IDLE","targetObject":"NONE"}"#;
        let instruction = decode_reply(body).unwrap();
        assert_eq!(instruction.reply, "Hi");
        assert_eq!(instruction.target_object, "NONE");
    }

    #[test]
    fn decodes_json_wrapped_in_prose() {
        let body = concat!(
            "Sure! Here you go:\n```json\n",
            r#"{"reply": "Rest up", "action": "SLEEP", "targetObject": "BED"}"#,
            "\n```\nHope that helps.",
        );
        let instruction = decode_reply(body).unwrap();
        assert_eq!(instruction.reply, "Rest up");
        assert_eq!(instruction.action, "SLEEP");
        assert_eq!(instruction.emotion, "");
    }

    #[test]
    fn missing_target_defaults_to_none() {
        let instruction = decode_reply(r#"{"reply":"ok"}"#).unwrap();
        assert_eq!(instruction.target_object, "NONE");
    }

    #[test]
    fn rejects_bodies_without_an_object() {
        assert!(matches!(decode_reply("no json here"), Err(ReplyError::NoJsonObject)));
        assert!(matches!(decode_reply("} backwards {"), Err(ReplyError::NoJsonObject)));
        assert!(matches!(decode_reply("{not json}"), Err(ReplyError::Malformed(_))));
    }

    #[test]
    fn failure_resolves_to_fallback() {
        let instruction = resolve_reply(Err(ReplyError::Unavailable {
            message: "connection refused".to_owned(),
        }));
        assert_eq!(instruction.reply, FALLBACK_REPLY);
        assert_eq!(instruction.emotion, "ANXIOUS");
        assert_eq!(instruction.action, "IDLE");
        assert_eq!(instruction.target_object, "NONE");
    }

    #[test]
    fn scripted_replies_match_keywords() {
        let mut source = ScriptedReplies::new();
        assert_eq!(source.reply("I'm so SAD today").unwrap().emotion, "CONCERNED");
        assert_eq!(source.reply("feeling happy").unwrap().emotion, "HAPPY");
        let other = source.reply("hello").unwrap();
        assert_eq!(other.emotion, "CALM");
        assert_eq!(other.reply, "I'm listening. How else are you feeling?");
    }
}
