//! Encode and decode lists of strings in the database array literal syntax

use log::trace;
use sqlfield_declaration::ArraySyntax;

use crate::internal::strip_delimiters;

/// Decode a list of strings written in `syntax`.
///
/// - `null` (any case) is the absent list
/// - an empty string or just the delimiters is the empty list
/// - elements are split on commas outside of quotes, trimmed
///   and stripped of one layer of quotes
/// - the escape sequence is replaced with a literal quote
pub fn decode_string_array(text: &str, syntax: &ArraySyntax) -> Option<Vec<String>> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("null") {
        return None;
    }
    if text.is_empty() || text == syntax.empty() {
        return Some(Vec::new());
    }

    trace!("Decoding string array {text}");
    let inner = strip_delimiters(text, syntax.open, syntax.close);
    Some(
        split_elements(inner, syntax)
            .into_iter()
            .map(|element| unquote(element.trim(), syntax))
            .collect(),
    )
}

/// Encode a list of strings in `syntax`.
///
/// Every element is wrapped in quotes after escaping the quotes it contains.
pub fn encode_string_array<S: AsRef<str>>(values: &[S], syntax: &ArraySyntax) -> String {
    let quote = syntax.quote.to_string();
    let mut buffer = String::new();
    buffer.push(syntax.open);
    for (index, value) in values.iter().enumerate() {
        if index > 0 {
            buffer.push(',');
        }
        buffer.push(syntax.quote);
        buffer.push_str(&value.as_ref().replace(&quote, &syntax.escape));
        buffer.push(syntax.quote);
    }
    buffer.push(syntax.close);
    buffer
}

/// Split on every comma which isn't inside a quoted element
fn split_elements<'a>(inner: &'a str, syntax: &ArraySyntax) -> Vec<&'a str> {
    // A doubled quote toggles twice, so it needs no special treatment
    let skip_escapes = !syntax.escape_is_doubled_quote() && !syntax.escape.is_empty();
    let escape_tail = syntax.escape.chars().count().saturating_sub(1);

    let mut elements = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    let mut chars = inner.char_indices();
    while let Some((index, char)) = chars.next() {
        if quoted && skip_escapes && inner[index..].starts_with(&*syntax.escape) {
            for _ in 0..escape_tail {
                chars.next();
            }
        } else if char == syntax.quote {
            quoted = !quoted;
        } else if char == ',' && !quoted {
            elements.push(&inner[start..index]);
            start = index + 1;
        }
    }
    elements.push(&inner[start..]);
    elements
}

fn unquote(element: &str, syntax: &ArraySyntax) -> String {
    let quote_len = syntax.quote.len_utf8();
    let unwrapped = if element.len() >= 2 * quote_len
        && element.starts_with(syntax.quote)
        && element.ends_with(syntax.quote)
    {
        &element[quote_len..element.len() - quote_len]
    } else {
        element
    };
    if syntax.escape.is_empty() {
        unwrapped.to_string()
    } else {
        unwrapped.replace(&*syntax.escape, &syntax.quote.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use sqlfield_declaration::ArraySyntax;

    use super::{decode_string_array, encode_string_array};

    #[test]
    fn absent_and_empty() {
        assert_eq!(decode_string_array("null", &ArraySyntax::DATABASE), None);
        assert_eq!(decode_string_array("NULL", &ArraySyntax::DATABASE), None);
        assert_eq!(
            decode_string_array("{}", &ArraySyntax::DATABASE),
            Some(vec![])
        );
        assert_eq!(decode_string_array("", &ArraySyntax::DATABASE), Some(vec![]));
        assert_eq!(encode_string_array::<&str>(&[], &ArraySyntax::DATABASE), "{}");
    }

    #[test]
    fn surrounding_whitespace() {
        assert_eq!(
            decode_string_array(" {a,b} ", &ArraySyntax::DATABASE),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(decode_string_array(" NULL\n", &ArraySyntax::DATABASE), None);
        assert_eq!(
            decode_string_array("  {}  ", &ArraySyntax::DATABASE),
            Some(vec![])
        );
    }

    #[test]
    fn unquoted_elements() {
        assert_eq!(
            decode_string_array("{10000,10000,10000}", &ArraySyntax::DATABASE),
            Some(vec!["10000".to_string(), "10000".to_string(), "10000".to_string()])
        );
        assert_eq!(
            decode_string_array("{a,c,b}", &ArraySyntax::DATABASE),
            Some(vec!["a".to_string(), "c".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn quoted_elements_with_escapes() {
        let literal = r##"{"breakfast", "consulting", "bar-""#1"""}"##;
        let values = decode_string_array(literal, &ArraySyntax::DATABASE).unwrap();
        assert_eq!(values, vec!["breakfast", "consulting", r##"bar-"#1""##]);
        assert_eq!(
            encode_string_array(&values, &ArraySyntax::DATABASE),
            literal.replace(' ', "")
        );
    }

    #[test]
    fn commas_inside_quotes() {
        let values = decode_string_array(r#"{"a,b",c}"#, &ArraySyntax::DATABASE).unwrap();
        assert_eq!(values, vec!["a,b", "c"]);
        assert_eq!(
            encode_string_array(&values, &ArraySyntax::DATABASE),
            r#"{"a,b","c"}"#
        );
    }

    #[test]
    fn backslash_escape() {
        let values =
            decode_string_array(r#"["say \"hi\", then go","x"]"#, &ArraySyntax::JSON).unwrap();
        assert_eq!(values, vec![r#"say "hi", then go"#, "x"]);
        assert_eq!(
            encode_string_array(&values, &ArraySyntax::JSON),
            r#"["say \"hi\", then go","x"]"#
        );
    }

    #[test]
    fn custom_syntax() {
        let syntax = ArraySyntax {
            open: '(',
            close: ')',
            quote: '\'',
            escape: Cow::Borrowed("''"),
        };
        let values = decode_string_array("('it''s', plain)", &syntax).unwrap();
        assert_eq!(values, vec!["it's", "plain"]);
        assert_eq!(encode_string_array(&values, &syntax), "('it''s','plain')");
    }
}
