//! Finite-state scanner for assistant response markup.
//!
//! Assistant text can embed three delimited constructs:
//! - `<artifact>{json}</artifact>` blocks carrying an [`ArtifactSpec`],
//! - inline commands such as `[GRAPH:function:x^2:-5:5]`,
//! - placeholder tokens `⟦artifact:<key>⟧` inserted by the artifact
//!   pipeline after a block has been registered with the backend.
//!
//! The scanner turns a text blob into an ordered, non-overlapping token
//! stream. Anything incomplete or undecodable stays literal text, so
//! rescanning a growing stream buffer is safe: a construct matches exactly
//! once, and only once its closing delimiter has arrived.

pub mod command;

use contracts::domain::artifact::ArtifactSpec;

pub use command::InlineCommand;

pub const ARTIFACT_OPEN: &str = "<artifact>";
pub const ARTIFACT_CLOSE: &str = "</artifact>";
pub const PLACEHOLDER_OPEN: &str = "\u{27e6}artifact:"; // ⟦artifact:
pub const PLACEHOLDER_CLOSE: char = '\u{27e7}'; // ⟧

/// Build the full placeholder token for a pipeline key.
pub fn placeholder_token(key: &str) -> String {
    format!("{}{}{}", PLACEHOLDER_OPEN, key, PLACEHOLDER_CLOSE)
}

/// One scanned span. `raw` is the exact source slice, so concatenating the
/// raw fields of a token stream reproduces the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub raw: String,
    pub kind: TokenKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Text,
    Artifact(ArtifactSpec),
    Command(InlineCommand),
    Placeholder(String),
}

impl Token {
    fn text(raw: impl Into<String>) -> Self {
        Token {
            raw: raw.into(),
            kind: TokenKind::Text,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, TokenKind::Text)
    }
}

/// Scan `input` into an ordered token stream.
///
/// A malformed artifact block (bad JSON or unknown type) is logged and
/// emitted as literal text; it never aborts scanning of later occurrences.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut text = String::new();
    let mut rest = input;

    let mut flush = |text: &mut String, tokens: &mut Vec<Token>| {
        if !text.is_empty() {
            tokens.push(Token::text(std::mem::take(text)));
        }
    };

    while !rest.is_empty() {
        if rest.starts_with(ARTIFACT_OPEN) {
            if let Some(end) = rest.find(ARTIFACT_CLOSE) {
                let block = &rest[..end + ARTIFACT_CLOSE.len()];
                let json = &rest[ARTIFACT_OPEN.len()..end];
                match serde_json::from_str::<ArtifactSpec>(json.trim()) {
                    Ok(spec) => {
                        flush(&mut text, &mut tokens);
                        tokens.push(Token {
                            raw: block.to_string(),
                            kind: TokenKind::Artifact(spec),
                        });
                    }
                    Err(err) => {
                        log::error!("discarding malformed artifact block: {}", err);
                        text.push_str(block);
                    }
                }
                rest = &rest[block.len()..];
                continue;
            }
            // No closing tag yet: literal text (possibly a partial stream).
        } else if rest.starts_with(PLACEHOLDER_OPEN) {
            if let Some(end) = rest.find(PLACEHOLDER_CLOSE) {
                let token = &rest[..end + PLACEHOLDER_CLOSE.len_utf8()];
                let key = &rest[PLACEHOLDER_OPEN.len()..end];
                flush(&mut text, &mut tokens);
                tokens.push(Token {
                    raw: token.to_string(),
                    kind: TokenKind::Placeholder(key.to_string()),
                });
                rest = &rest[token.len()..];
                continue;
            }
        } else if rest.starts_with('[') {
            if let Some(end) = rest.find(']') {
                let body = &rest[1..end];
                if let Some(cmd) = command::parse(body) {
                    let raw = &rest[..end + 1];
                    flush(&mut text, &mut tokens);
                    tokens.push(Token {
                        raw: raw.to_string(),
                        kind: TokenKind::Command(cmd),
                    });
                    rest = &rest[raw.len()..];
                    continue;
                }
            }
        }

        let ch = rest.chars().next().expect("rest is non-empty");
        text.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    flush(&mut text, &mut tokens);
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::artifact::ArtifactBody;

    fn graph_block(title: &str, function: &str) -> String {
        format!(
            r#"<artifact>{{"type":"graph","title":"{}","content":{{"function":"{}","x_min":-2,"x_max":2}}}}</artifact>"#,
            title, function
        )
    }

    #[test]
    fn plain_text_is_one_token() {
        let tokens = tokenize("just some prose with x < y and a [note].");
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_text());
    }

    #[test]
    fn artifact_block_matches_once_and_round_trips() {
        let input = format!("Solve this: {}", graph_block("t", "x^2"));
        let tokens = tokenize(&input);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].raw, "Solve this: ");
        match &tokens[1].kind {
            TokenKind::Artifact(spec) => {
                assert_eq!(spec.title.as_deref(), Some("t"));
                match &spec.body {
                    ArtifactBody::Graph(g) => assert_eq!(g.function, "x^2"),
                    other => panic!("expected graph, got {:?}", other),
                }
            }
            other => panic!("expected artifact, got {:?}", other),
        }
        let joined: String = tokens.iter().map(|t| t.raw.as_str()).collect();
        assert_eq!(joined, input);
    }

    #[test]
    fn malformed_json_degrades_to_text_without_killing_later_matches() {
        let input = format!(
            "a <artifact>{{not json}}</artifact> b {} c",
            graph_block("ok", "sin(x)")
        );
        let tokens = tokenize(&input);
        let artifacts: Vec<_> = tokens
            .iter()
            .filter(|t| matches!(t.kind, TokenKind::Artifact(_)))
            .collect();
        assert_eq!(artifacts.len(), 1);
        let joined: String = tokens.iter().map(|t| t.raw.as_str()).collect();
        assert_eq!(joined, input);
    }

    #[test]
    fn unknown_artifact_type_degrades_to_text() {
        let input = r#"<artifact>{"type":"video","content":{}}</artifact>"#;
        let tokens = tokenize(input);
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_text());
    }

    #[test]
    fn unterminated_block_stays_literal() {
        let input = r#"<artifact>{"type":"graph","#;
        let tokens = tokenize(input);
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_text());
        assert_eq!(tokens[0].raw, input);
    }

    #[test]
    fn inline_graph_command_is_scanned() {
        let tokens = tokenize("answer is [GRAPH:function:x:0:10] done");
        assert_eq!(tokens.len(), 3);
        match &tokens[1].kind {
            TokenKind::Command(InlineCommand::Graph {
                function,
                x_min,
                x_max,
            }) => {
                assert_eq!(function, "x");
                assert_eq!(*x_min, 0.0);
                assert_eq!(*x_max, 10.0);
            }
            other => panic!("expected graph command, got {:?}", other),
        }
    }

    #[test]
    fn unknown_bracket_text_stays_literal() {
        let tokens = tokenize("see [chapter 3] for details");
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_text());
    }

    #[test]
    fn placeholder_tokens_are_recognized() {
        let input = format!("before {} after", placeholder_token("k1"));
        let tokens = tokenize(&input);
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].kind, TokenKind::Placeholder("k1".to_string()));
    }

    #[test]
    fn two_artifacts_yield_two_matches() {
        let input = format!("{} and {}", graph_block("a", "x"), graph_block("b", "x^3"));
        let tokens = tokenize(&input);
        let artifacts: Vec<_> = tokens
            .iter()
            .filter(|t| matches!(t.kind, TokenKind::Artifact(_)))
            .collect();
        assert_eq!(artifacts.len(), 2);
    }
}
