//! This module holds the definition of the configurable array syntax

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/**
The delimiters used to write and read a list of values.

A database array literal looks like `{"a","b"}`,
a json array looks like `["a","b"]`.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "PascalCase")]
pub struct ArraySyntax {
    /// Character opening the list
    pub open: char,
    /// Character closing the list
    pub close: char,
    /// Character an element may be wrapped in
    pub quote: char,
    /// Sequence representing a literal `quote` inside a wrapped element
    pub escape: Cow<'static, str>,
}

impl ArraySyntax {
    /// The array literal syntax used by the database driver: `{"a","b""c"}`
    pub const DATABASE: ArraySyntax = ArraySyntax {
        open: '{',
        close: '}',
        quote: '"',
        escape: Cow::Borrowed("\"\""),
    };

    /// The json array syntax: `["a","b\"c"]`
    pub const JSON: ArraySyntax = ArraySyntax {
        open: '[',
        close: ']',
        quote: '"',
        escape: Cow::Borrowed("\\\""),
    };

    /// The literal of an empty list i.e. `{}` or `[]`
    pub fn empty(&self) -> String {
        let mut string = String::with_capacity(2);
        string.push(self.open);
        string.push(self.close);
        string
    }

    /// Does the escape sequence consist of the doubled quote character?
    pub fn escape_is_doubled_quote(&self) -> bool {
        let mut chars = self.escape.chars();
        chars.next() == Some(self.quote) && chars.next() == Some(self.quote) && chars.next().is_none()
    }
}

impl Default for ArraySyntax {
    fn default() -> Self {
        Self::DATABASE
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ArraySyntax;

    #[test]
    fn presets() {
        assert_eq!(ArraySyntax::DATABASE.empty(), "{}");
        assert_eq!(ArraySyntax::JSON.empty(), "[]");
        assert!(ArraySyntax::DATABASE.escape_is_doubled_quote());
        assert!(!ArraySyntax::JSON.escape_is_doubled_quote());
        assert_eq!(ArraySyntax::default(), ArraySyntax::DATABASE);
    }

    #[test]
    fn deserialize_custom_syntax() {
        let syntax: ArraySyntax = serde_json::from_str(
            r#"{"Open": "(", "Close": ")", "Quote": "'", "Escape": "''"}"#,
        )
        .unwrap();
        assert_eq!(syntax.open, '(');
        assert_eq!(syntax.close, ')');
        assert_eq!(syntax.quote, '\'');
        assert!(syntax.escape_is_doubled_quote());
    }
}
