//! Chat send failures, synthesized into assistant-style messages.
//!
//! A failed send never surfaces as a dialog or broken page: the error is
//! classified and a human-readable message is streamed into the response
//! area exactly like a normal assistant reply.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorKind {
    Connection,
    Timeout,
    RateLimit,
    ContentSafety,
    Generic,
}

/// Classify an error string from the transport or backend.
pub fn classify(error: &str) -> ChatErrorKind {
    let e = error.to_lowercase();
    if e.contains("timeout") || e.contains("timed out") {
        ChatErrorKind::Timeout
    } else if e.contains("429")
        || e.contains("rate limit")
        || e.contains("quota")
        || e.contains("overload")
    {
        ChatErrorKind::RateLimit
    } else if e.contains("safety") || e.contains("blocked") || e.contains("content policy") {
        ChatErrorKind::ContentSafety
    } else if e.contains("failed to send")
        || e.contains("network")
        || e.contains("connection")
        || e.contains("fetch")
    {
        ChatErrorKind::Connection
    } else {
        ChatErrorKind::Generic
    }
}

/// The tutor keeps its voice even when the backend lets it down.
pub fn synthesized_message(kind: ChatErrorKind) -> &'static str {
    match kind {
        ChatErrorKind::Connection => {
            "I can't reach the server right now. Check your connection and try again - \
             I'll still be here."
        }
        ChatErrorKind::Timeout => {
            "That request took far too long. Obviously something is stuck on the server \
             side; give it a moment and try again."
        }
        ChatErrorKind::RateLimit => {
            "Hmph, the API is being overloaded right now. Try again in a minute - I don't \
             have infinite processing power, you know."
        }
        ChatErrorKind::ContentSafety => {
            "I can't answer that one. Let's keep things focused on mathematics, shall we?"
        }
        ChatErrorKind::Generic => {
            "Something went wrong on my end. That's... embarrassing. Ask me again."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_each_category() {
        assert_eq!(
            classify("Failed to send request: network error"),
            ChatErrorKind::Connection
        );
        assert_eq!(classify("request timed out after 30s"), ChatErrorKind::Timeout);
        assert_eq!(classify("HTTP 429 Too Many Requests"), ChatErrorKind::RateLimit);
        assert_eq!(classify("quota exceeded for model"), ChatErrorKind::RateLimit);
        assert_eq!(
            classify("response blocked by safety filter"),
            ChatErrorKind::ContentSafety
        );
        assert_eq!(classify("HTTP 500 internal error"), ChatErrorKind::Generic);
    }

    #[test]
    fn every_category_has_a_message() {
        for kind in [
            ChatErrorKind::Connection,
            ChatErrorKind::Timeout,
            ChatErrorKind::RateLimit,
            ChatErrorKind::ContentSafety,
            ChatErrorKind::Generic,
        ] {
            assert!(!synthesized_message(kind).is_empty());
        }
    }
}
