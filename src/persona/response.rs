use crate::engine::ToneDimension;

pub const JOY_REPLY: &str =
    "I can sense the positive energy in your words! That's wonderful to hear.";
pub const FEAR_REPLY: &str =
    "I'm picking up some anxiety in your message. Would you like to talk about what's concerning you?";
pub const ANGER_REPLY: &str =
    "I can feel the intensity in your words. Sometimes it helps to express these feelings.";
pub const SADNESS_REPLY: &str =
    "I sense some heaviness in what you're sharing. I'm here to listen.";
pub const SURPRISE_REPLY: &str =
    "That's quite interesting! Tell me more about your thoughts on this.";
/// Used for any label outside the five tone dimensions.
pub const FALLBACK_REPLY: &str = "I hear you. Tell me more about what's on your mind.";

/// Canned reply keyed by dominant-tone label. Unknown labels get
/// `FALLBACK_REPLY` instead of failing.
pub fn synthesize(label: &str) -> &'static str {
    match ToneDimension::parse(label) {
        Some(dimension) => reply_for(dimension),
        None => FALLBACK_REPLY,
    }
}

pub fn reply_for(dimension: ToneDimension) -> &'static str {
    match dimension {
        ToneDimension::Joy => JOY_REPLY,
        ToneDimension::Fear => FEAR_REPLY,
        ToneDimension::Anger => ANGER_REPLY,
        ToneDimension::Sadness => SADNESS_REPLY,
        ToneDimension::Surprise => SURPRISE_REPLY,
    }
}
