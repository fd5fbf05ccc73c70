//! The tree-walking interpreter.
//!
//! Walks a compiled [`Template`] with a scoped [`Environment`] and writes
//! into an owned [`Sink`]. The sink and environment are created per call and
//! torn down on every exit path — nothing leaks into the next render.

use crate::env::Environment;
use crate::error::{EvalError, EvalResult};
use crate::expr::eval_expr;
use crate::sink::Sink;
use crate::value::Value;
use kiln_types::{Branch, Node, Template};
use std::collections::BTreeMap;

/// Per-render variable bindings.
pub type Bindings = BTreeMap<String, Value>;

/// Execute a compiled template against `bindings`, returning the rendered
/// output.
///
/// Every name in `bindings` is defined into the root scope, so generated
/// output referencing `item` resolves to `bindings["item"]`. Faults
/// propagate uncaught.
pub fn execute(template: &Template, bindings: &Bindings) -> EvalResult<String> {
    let mut env = Environment::new();
    for (name, value) in bindings {
        env.define(name, value.clone());
    }
    let mut sink = Sink::new();
    run_nodes(&template.nodes, &mut env, &mut sink)?;
    Ok(sink.finish())
}

fn run_nodes(nodes: &[Node], env: &mut Environment, sink: &mut Sink) -> EvalResult<()> {
    for node in nodes {
        match node {
            Node::Literal(text) => sink.write_literal(text),
            Node::Output(expr) => {
                let value = eval_expr(expr, env)?;
                sink.write_escaped(&value.render_string());
            }
            Node::If { branches, fallback } => {
                run_if(branches, fallback.as_deref(), env, sink)?;
            }
            Node::ForEach { header, body } => run_foreach(header, body, env, sink)?,
        }
    }
    Ok(())
}

fn run_if(
    branches: &[Branch],
    fallback: Option<&[Node]>,
    env: &mut Environment,
    sink: &mut Sink,
) -> EvalResult<()> {
    for branch in branches {
        if eval_expr(&branch.cond, env)?.is_truthy() {
            return run_nodes(&branch.body, env, sink);
        }
    }
    if let Some(nodes) = fallback {
        run_nodes(nodes, env, sink)?;
    }
    Ok(())
}

/// A parsed `collection as item` / `collection as key => item` header.
struct LoopHeader<'a> {
    collection: &'a str,
    key: Option<&'a str>,
    item: &'a str,
}

fn parse_header(header: &str) -> EvalResult<LoopHeader<'_>> {
    let bad = || EvalError::BadLoopHeader(header.to_string());
    // The rightmost ` as ` separates the collection expression from the
    // binding list, so collection expressions containing ` as ` in string
    // literals still split sensibly.
    let at = header.rfind(" as ").ok_or_else(bad)?;
    let collection = header[..at].trim();
    let bindings = header[at + 4..].trim();
    let (key, item) = match bindings.split_once("=>") {
        Some((key, item)) => (Some(key.trim()), item.trim()),
        None => (None, bindings),
    };
    if collection.is_empty() || !is_identifier(item) || !key.is_none_or(is_identifier) {
        return Err(bad());
    }
    Ok(LoopHeader {
        collection,
        key,
        item,
    })
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn run_foreach(
    header: &str,
    body: &[Node],
    env: &mut Environment,
    sink: &mut Sink,
) -> EvalResult<()> {
    let parsed = parse_header(header)?;
    match eval_expr(parsed.collection, env)? {
        Value::List(items) => {
            for (index, item) in items.into_iter().enumerate() {
                env.push_scope();
                if let Some(key) = parsed.key {
                    env.define(key, Value::Number(index as f64));
                }
                env.define(parsed.item, item);
                let result = run_nodes(body, env, sink);
                env.pop_scope();
                result?;
            }
        }
        Value::Map(entries) => {
            for (entry_key, value) in entries {
                env.push_scope();
                if let Some(key) = parsed.key {
                    env.define(key, Value::String(entry_key));
                }
                env.define(parsed.item, value);
                let result = run_nodes(body, env, sink);
                env.pop_scope();
                result?;
            }
        }
        other => return Err(EvalError::NotIterable(other.type_name())),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_with_item_only() {
        let h = parse_header("items as i").unwrap();
        assert_eq!(h.collection, "items");
        assert_eq!(h.key, None);
        assert_eq!(h.item, "i");
    }

    #[test]
    fn header_with_key_and_item() {
        let h = parse_header("user.roles as name => role").unwrap();
        assert_eq!(h.collection, "user.roles");
        assert_eq!(h.key, Some("name"));
        assert_eq!(h.item, "role");
    }

    #[test]
    fn malformed_headers_fault() {
        assert!(parse_header("items").is_err());
        assert!(parse_header(" as i").is_err());
        assert!(parse_header("items as ").is_err());
        assert!(parse_header("items as 1x").is_err());
        assert!(parse_header("items as k =>").is_err());
    }
}
