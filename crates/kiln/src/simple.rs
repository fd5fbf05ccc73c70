//! The standalone `{{ key }}` substitution utility.
//!
//! Pure key-for-value interpolation: no escaping, no caching, no
//! compilation, and no other directive is recognized.

use std::collections::BTreeMap;

/// Replace every `{{ key }}` whose key is bound. Unknown keys keep their
/// original tag text, unterminated tags stay literal.
pub(crate) fn substitute(text: &str, bindings: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(at) = rest.find("{{") {
        let (before, tail) = rest.split_at(at);
        out.push_str(before);
        let Some(rel) = tail[2..].find("}}") else {
            rest = tail;
            break;
        };
        let key = tail[2..2 + rel].trim();
        match bindings.get(key) {
            Some(value) => out.push_str(value),
            None => out.push_str(&tail[..2 + rel + 2]),
        }
        rest = &tail[2 + rel + 2..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn bound_keys_substitute() {
        assert_eq!(
            substitute("Hi {{ name }}", &bindings(&[("name", "Ada")])),
            "Hi Ada"
        );
    }

    #[test]
    fn unknown_keys_keep_their_tag_text() {
        assert_eq!(substitute("Hi {{ x }}", &bindings(&[])), "Hi {{ x }}");
    }

    #[test]
    fn no_escaping_is_applied() {
        assert_eq!(
            substitute("{{ html }}", &bindings(&[("html", "<b>&</b>")])),
            "<b>&</b>"
        );
    }

    #[test]
    fn multiple_tags_substitute_independently() {
        assert_eq!(
            substitute(
                "{{ a }}-{{ missing }}-{{ b }}",
                &bindings(&[("a", "1"), ("b", "2")])
            ),
            "1-{{ missing }}-2"
        );
    }

    #[test]
    fn unterminated_tag_stays_literal() {
        assert_eq!(substitute("Hi {{ name", &bindings(&[("name", "Ada")])), "Hi {{ name");
    }
}
