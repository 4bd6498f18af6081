use serde_json::Value;

/// Ordered token → replacement mapping.
///
/// Tokens include their delimiters (for example, `"{{CLIENT_NAME}}"`) and are
/// matched as literal text. Iteration order is insertion order; inserting an
/// existing token replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionMap {
    entries: Vec<(String, String)>,
}

impl SubstitutionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, token: impl Into<String>, replacement: impl Into<String>) {
        let token = token.into();
        let replacement = replacement.into();
        match self.entries.iter_mut().find(|(t, _)| *t == token) {
            Some(entry) => entry.1 = replacement,
            None => self.entries.push((token, replacement)),
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.iter().any(|(t, _)| t == token)
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(t, _)| t == token)
            .map(|(_, r)| r.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, r)| (t.as_str(), r.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SubstitutionMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (token, replacement) in iter {
            map.insert(token, replacement);
        }
        map
    }
}

/// Piece of a string being rendered: untouched input or inserted replacement
#[derive(Debug, Clone, Copy)]
enum Segment<'a> {
    Original(&'a str),
    Replaced(&'a str),
}

/// Render literal tokens in map order without re-scanning replacements.
///
/// Each token replaces all of its occurrences within the text that no earlier
/// token has replaced, so inserted text is never substituted again and an
/// earlier token wins over a later one that overlaps it. Empty tokens never
/// match.
pub fn render_single_pass(text: &str, map: &SubstitutionMap) -> String {
    if map.is_empty() || text.is_empty() {
        return text.to_string();
    }

    let mut segments = vec![Segment::Original(text)];

    for (token, replacement) in map.iter().filter(|(token, _)| !token.is_empty()) {
        if !segments
            .iter()
            .any(|seg| matches!(seg, Segment::Original(s) if s.contains(token)))
        {
            continue;
        }

        let mut next = Vec::with_capacity(segments.len() + 2);
        for seg in segments {
            match seg {
                Segment::Original(s) if s.contains(token) => {
                    for (i, part) in s.split(token).enumerate() {
                        if i > 0 {
                            next.push(Segment::Replaced(replacement));
                        }
                        if !part.is_empty() {
                            next.push(Segment::Original(part));
                        }
                    }
                }
                other => next.push(other),
            }
        }
        segments = next;
    }

    segments
        .into_iter()
        .map(|seg| match seg {
            Segment::Original(s) | Segment::Replaced(s) => s,
        })
        .collect()
}

/// Substitute tokens in every string leaf of `value`.
///
/// Object keys, numbers, booleans and nulls are left unchanged; arrays keep
/// their order and length. The input is never modified.
pub fn substitute(value: &Value, map: &SubstitutionMap) -> Value {
    match value {
        Value::String(s) => Value::String(render_single_pass(s, map)),
        Value::Array(items) => Value::Array(items.iter().map(|v| substitute(v, map)).collect()),
        Value::Object(obj) => Value::Object(
            obj.iter()
                .map(|(k, v)| (k.clone(), substitute(v, map)))
                .collect(),
        ),
        Value::Null | Value::Bool(_) | Value::Number(_) => value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(pairs: &[(&str, &str)]) -> SubstitutionMap {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_replaces_all_occurrences() {
        let m = map(&[("{{CLIENT_NAME}}", "Acme")]);
        let rendered = render_single_pass("{{CLIENT_NAME}} and {{CLIENT_NAME}}", &m);
        assert_eq!(rendered, "Acme and Acme");
    }

    #[test]
    fn test_tokens_are_literal_not_patterns() {
        let m = map(&[("{{A.*}}", "x"), ("$(price)", "9")]);
        assert_eq!(render_single_pass("{{A.*}} {{AB}} $(price)", &m), "x {{AB}} 9");
    }

    #[test]
    fn test_replacement_is_not_rescanned() {
        let m = map(&[
            ("{{OUTPUT}}", "injected {{TASK_ID}}"),
            ("{{TASK_ID}}", "task-123"),
        ]);
        assert_eq!(
            render_single_pass("value={{OUTPUT}} {{TASK_ID}}", &m),
            "value=injected {{TASK_ID}} task-123"
        );
    }

    #[test]
    fn test_overlapping_tokens_follow_insertion_order() {
        let first = map(&[("{{A}}", "short"), ("{{A}}B", "long")]);
        assert_eq!(render_single_pass("{{A}}B", &first), "shortB");

        let second = map(&[("{{A}}B", "long"), ("{{A}}", "short")]);
        assert_eq!(render_single_pass("{{A}}B", &second), "long");

        // The earlier token wins even when a later one starts further left.
        assert_eq!(render_single_pass("ABC", &map(&[("BC", "1"), ("AB", "2")])), "A1");
        assert_eq!(render_single_pass("ABC", &map(&[("AB", "2"), ("BC", "1")])), "2C");
    }

    #[test]
    fn test_token_never_matches_across_a_replacement() {
        let m = map(&[("{{X}}", "{{"), ("{{Y}}", "Y}}")]);
        assert_eq!(render_single_pass("{{X}}Y}} {{Y}}", &m), "{{Y}} Y}}");
    }

    #[test]
    fn test_empty_token_ignored_and_multibyte_text_kept() {
        let m = map(&[("", "boom"), ("{{X}}", "ü")]);
        assert_eq!(render_single_pass("héllo {{X}} ✓", &m), "héllo ü ✓");
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut m = map(&[("{{A}}", "1"), ("{{B}}", "2")]);
        m.insert("{{A}}", "3");
        let tokens: Vec<_> = m.iter().collect();
        assert_eq!(tokens, vec![("{{A}}", "3"), ("{{B}}", "2")]);
    }

    #[test]
    fn test_substitute_walks_nested_structures() {
        let value = json!({
            "{{KEY}}": "{{KEY}}",
            "list": ["{{KEY}}", 1, true, null, {"deep": "x{{KEY}}y"}],
            "count": 3
        });
        let out = substitute(&value, &map(&[("{{KEY}}", "v")]));
        assert_eq!(
            out,
            json!({
                "{{KEY}}": "v",
                "list": ["v", 1, true, null, {"deep": "xvy"}],
                "count": 3
            })
        );
    }

    #[test]
    fn test_empty_map_returns_equal_copy() {
        let value = json!({"a": ["{{X}}", {"b": 1.5}], "c": false});
        let out = substitute(&value, &SubstitutionMap::new());
        assert_eq!(out, value);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let value = json!({"path": "/{{SLUG}}-book", "tags": ["{{SLUG}}"]});
        let before = value.clone();
        let mut out = substitute(&value, &map(&[("{{SLUG}}", "acme")]));
        out["tags"][0] = json!("changed");
        assert_eq!(value, before);
        assert_eq!(out["path"], json!("/acme-book"));
    }

    #[test]
    fn test_no_token_remains_after_substitution() {
        let tokens = ["{{CLIENT_NAME}}", "{{CLIENT_EMAIL}}", "{{X}}"];
        let m = map(&[
            ("{{CLIENT_NAME}}", "Acme Vets"),
            ("{{CLIENT_EMAIL}}", "hi@acme.test"),
            ("{{X}}", ""),
        ]);
        let text = "{{CLIENT_NAME}}<{{CLIENT_EMAIL}}>{{X}}{{X}}{{CLIENT_NAME}}";
        let rendered = render_single_pass(text, &m);
        for token in tokens {
            assert!(!rendered.contains(token), "{token} left in {rendered}");
        }
        assert_eq!(rendered, "Acme Vets<hi@acme.test>Acme Vets");
    }
}
