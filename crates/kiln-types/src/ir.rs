//! The compiled instruction tree.
//!
//! A template compiles to a flat-ish tree of [`Node`]s. Expression strings
//! inside nodes are carried verbatim (surrounding whitespace trimmed) and are
//! only parsed by the execution layer at render time. The serialized JSON form
//! of a [`Template`] is the on-disk cache artifact, so every node derives
//! `Serialize`/`Deserialize`, and serialization of a given tree is
//! deterministic.

use serde::{Deserialize, Serialize};

/// A compiled template: the instruction sequence for one source file,
/// includes already expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub nodes: Vec<Node>,
}

impl Template {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Serialize to the cache artifact format.
    pub fn to_artifact(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Deserialize from cache artifact bytes.
    pub fn from_artifact(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// One instruction in a compiled template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Node {
    /// Emit this text verbatim.
    Literal(String),
    /// Evaluate the expression and emit its HTML-escaped string form.
    Output(String),
    /// Conditional chain: the first truthy branch runs, else the fallback.
    If {
        branches: Vec<Branch>,
        fallback: Option<Vec<Node>>,
    },
    /// Iteration. `header` is the verbatim `collection as item` (or
    /// `collection as key => item`) loop header.
    ForEach { header: String, body: Vec<Node> },
}

/// One `@if`/`@elseif` arm of a conditional chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub cond: String,
    pub body: Vec<Node>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Template {
        Template::new(vec![
            Node::Literal("Hello ".into()),
            Node::Output("name".into()),
            Node::If {
                branches: vec![Branch {
                    cond: "admin".into(),
                    body: vec![Node::Literal(" (admin)".into())],
                }],
                fallback: Some(vec![Node::Literal(" (user)".into())]),
            },
            Node::ForEach {
                header: "items as i".into(),
                body: vec![Node::Output("i".into())],
            },
        ])
    }

    #[test]
    fn artifact_round_trip() {
        let template = sample();
        let bytes = template.to_artifact().unwrap();
        let decoded = Template::from_artifact(&bytes).unwrap();
        assert_eq!(template, decoded);
    }

    #[test]
    fn artifact_is_deterministic() {
        let a = sample().to_artifact().unwrap();
        let b = sample().to_artifact().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn artifact_rejects_garbage() {
        assert!(Template::from_artifact(b"not json").is_err());
        assert!(Template::from_artifact(b"{\"nodes\":[{\"bogus\":1}]}").is_err());
    }
}
