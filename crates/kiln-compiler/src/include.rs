//! `@include` expansion — the first compilation step, applied to raw text
//! before any other directive is interpreted.

use kiln_types::{CompileError, CompileErrorKind, Result, Span};

/// Source of raw template text, keyed by logical template name.
///
/// The facade's filesystem loader implements this; tests substitute
/// in-memory maps.
pub trait Loader {
    fn load(&self, name: &str) -> std::io::Result<String>;
}

const OPEN: &str = "@include(";

/// Inline every `@include(name)` with the named template's raw, uncompiled
/// text, recursively expanding the inlined text as well — so included files
/// may contain any directive, including further includes.
///
/// `name` may be bare or wrapped in single or double quotes. An `@include`
/// with no closing paren is not a directive and stays literal. There is no
/// cycle detection: templates that include each other recurse until the
/// stack gives out.
pub fn expand_includes(source: &str, loader: &dyn Loader) -> Result<String> {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;
    let mut line = 1u32;
    let mut col = 1u32;

    while let Some(at) = rest.find(OPEN) {
        let (before, tail) = rest.split_at(at);
        let Some(rel) = tail[OPEN.len()..].find(')') else {
            // No closing paren anywhere in the remainder, so no later
            // occurrence can terminate either.
            break;
        };
        out.push_str(before);
        advance_position(before, &mut line, &mut col);
        let span = Span::new(line, col);

        let name = unquote(tail[OPEN.len()..OPEN.len() + rel].trim());
        let text = loader.load(name).map_err(|err| {
            CompileError::new(
                CompileErrorKind::Include {
                    name: name.to_string(),
                    reason: err.to_string(),
                },
                span,
            )
        })?;
        out.push_str(&expand_includes(&text, loader)?);

        let directive = &tail[..OPEN.len() + rel + 1];
        advance_position(directive, &mut line, &mut col);
        rest = &tail[OPEN.len() + rel + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

fn advance_position(text: &str, line: &mut u32, col: &mut u32) {
    for ch in text.chars() {
        if ch == '\n' {
            *line += 1;
            *col = 1;
        } else {
            *col += 1;
        }
    }
}

fn unquote(name: &str) -> &str {
    name.strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| name.strip_prefix('"').and_then(|s| s.strip_suffix('"')))
        .unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::io;

    struct MapLoader(BTreeMap<&'static str, &'static str>);

    impl Loader for MapLoader {
        fn load(&self, name: &str) -> io::Result<String> {
            self.0
                .get(name)
                .map(|s| s.to_string())
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such template"))
        }
    }

    fn loader(entries: &[(&'static str, &'static str)]) -> MapLoader {
        MapLoader(entries.iter().copied().collect())
    }

    #[test]
    fn no_include_passes_through() {
        let l = loader(&[]);
        assert_eq!(expand_includes("plain text", &l).unwrap(), "plain text");
    }

    #[test]
    fn include_inlines_raw_text() {
        let l = loader(&[("partials.head", "<head>{{ title }}</head>")]);
        assert_eq!(
            expand_includes("@include(partials.head)body", &l).unwrap(),
            "<head>{{ title }}</head>body"
        );
    }

    #[test]
    fn quoted_names_are_accepted() {
        let l = loader(&[("nav", "NAV")]);
        assert_eq!(expand_includes("@include('nav')", &l).unwrap(), "NAV");
        assert_eq!(expand_includes("@include(\"nav\")", &l).unwrap(), "NAV");
        assert_eq!(expand_includes("@include( nav )", &l).unwrap(), "NAV");
    }

    #[test]
    fn expansion_is_recursive() {
        let l = loader(&[("outer", "[@include(inner)]"), ("inner", "deep")]);
        assert_eq!(expand_includes("@include(outer)", &l).unwrap(), "[deep]");
    }

    #[test]
    fn unterminated_include_stays_literal() {
        let l = loader(&[]);
        assert_eq!(
            expand_includes("@include(never closed", &l).unwrap(),
            "@include(never closed"
        );
    }

    #[test]
    fn missing_template_is_a_compile_error() {
        let l = loader(&[]);
        let err = expand_includes("line one\n  @include(ghost)", &l).unwrap_err();
        assert!(matches!(
            err.kind,
            CompileErrorKind::Include { ref name, .. } if name == "ghost"
        ));
        assert_eq!(err.span, Span::new(2, 3));
    }
}
