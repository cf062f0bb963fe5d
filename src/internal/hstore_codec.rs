//! Encode and decode postgres' hstore text format: `"key"=>"value", "other"=>NULL`

use std::collections::BTreeMap;
use std::iter::Peekable;
use std::str::Chars;

use sqlfield_db::Error;

/// The content of a hstore
pub type HstoreMap = BTreeMap<String, Option<String>>;

/// Decode a hstore's text representation.
///
/// Keys and values may be bare or wrapped in double quotes,
/// inside quotes a backslash escapes the following character.
/// An unquoted `NULL` value (any case) is stored as `None`.
pub fn decode_hstore(text: &str) -> Result<HstoreMap, Error> {
    let mut parser = Parser {
        chars: text.chars().peekable(),
    };
    let mut map = BTreeMap::new();

    parser.skip_whitespace();
    if parser.chars.peek().is_none() {
        return Ok(map);
    }

    loop {
        parser.skip_whitespace();
        let key = parser.token()?;
        parser.skip_whitespace();
        parser.arrow()?;
        parser.skip_whitespace();
        let value = parser.token()?;
        let value = if !value.quoted && value.text.eq_ignore_ascii_case("null") {
            None
        } else {
            Some(value.text)
        };
        map.insert(key.text, value);

        parser.skip_whitespace();
        match parser.chars.next() {
            None => return Ok(map),
            Some(',') => continue,
            Some(char) => {
                return Err(Error::DecodeError(format!(
                    "unexpected {char:?} in hstore, expected ','"
                )))
            }
        }
    }
}

/// Encode a hstore's text representation, quoting every key and value
pub fn encode_hstore(map: &HstoreMap) -> String {
    let mut buffer = String::new();
    for (index, (key, value)) in map.iter().enumerate() {
        if index > 0 {
            buffer.push_str(", ");
        }
        push_quoted(&mut buffer, key);
        buffer.push_str("=>");
        match value {
            Some(value) => push_quoted(&mut buffer, value),
            None => buffer.push_str("NULL"),
        }
    }
    buffer
}

fn push_quoted(buffer: &mut String, text: &str) {
    buffer.push('"');
    for char in text.chars() {
        if char == '"' || char == '\\' {
            buffer.push('\\');
        }
        buffer.push(char);
    }
    buffer.push('"');
}

struct Token {
    text: String,
    quoted: bool,
}

struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
}

impl Parser<'_> {
    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|char| char.is_whitespace()).is_some() {}
    }

    fn token(&mut self) -> Result<Token, Error> {
        let mut text = String::new();
        if self.chars.next_if_eq(&'"').is_some() {
            loop {
                match self.chars.next() {
                    Some('"') => break,
                    Some('\\') => match self.chars.next() {
                        Some(char) => text.push(char),
                        None => break,
                    },
                    Some(char) => text.push(char),
                    None => {
                        return Err(Error::DecodeError(
                            "unterminated quote in hstore".to_string(),
                        ))
                    }
                }
            }
            return Ok(Token { text, quoted: true });
        }

        while let Some(char) = self
            .chars
            .next_if(|char| !char.is_whitespace() && *char != ',' && *char != '=')
        {
            text.push(char);
        }
        if text.is_empty() {
            return Err(Error::DecodeError(
                "expected a key or value in hstore".to_string(),
            ));
        }
        Ok(Token {
            text,
            quoted: false,
        })
    }

    fn arrow(&mut self) -> Result<(), Error> {
        if self.chars.next_if_eq(&'=').is_some() && self.chars.next_if_eq(&'>').is_some() {
            Ok(())
        } else {
            Err(Error::DecodeError("expected '=>' in hstore".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use sqlfield_db::Error;

    use super::{decode_hstore, encode_hstore};

    #[test]
    fn decode_quoted_and_bare() {
        let map = decode_hstore(r#""a"=>"1", b => 2 ,"c"=>NULL, "d"=>"NULL""#).unwrap();
        assert_eq!(map.get("a"), Some(&Some("1".to_string())));
        assert_eq!(map.get("b"), Some(&Some("2".to_string())));
        assert_eq!(map.get("c"), Some(&None));
        assert_eq!(map.get("d"), Some(&Some("NULL".to_string())));
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn decode_empty() {
        assert!(decode_hstore("").unwrap().is_empty());
        assert!(decode_hstore("   ").unwrap().is_empty());
    }

    #[test]
    fn escapes_survive() {
        let mut map = BTreeMap::new();
        map.insert(r#"quo"te"#.to_string(), Some(r"back\slash".to_string()));
        map.insert("comma, arrow=>".to_string(), None);

        let text = encode_hstore(&map);
        assert_eq!(
            text,
            r#""comma, arrow=>"=>NULL, "quo\"te"=>"back\\slash""#
        );
        assert_eq!(decode_hstore(&text).unwrap(), map);
    }

    #[test]
    fn malformed() {
        assert!(matches!(decode_hstore("a"), Err(Error::DecodeError(_))));
        assert!(matches!(decode_hstore("a=>"), Err(Error::DecodeError(_))));
        assert!(matches!(
            decode_hstore(r#""a"=>"1" "b"=>"2""#),
            Err(Error::DecodeError(_))
        ));
        assert!(matches!(
            decode_hstore(r#""a=>"1""#),
            Err(Error::DecodeError(_))
        ));
    }
}
