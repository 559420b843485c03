//! SQL identifier quoting.
//!
//! Every identifier that reaches generated query text goes through this
//! module exactly once. Quoting is unconditional: rather than deciding when
//! a name needs delimiters, every name gets them, which removes the whole
//! class of bugs where a name that happens to be a keyword (or happens to
//! match a synthetic alias) is emitted bare.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A name wrapped in identifier delimiters, safe to splice into SQL text.
///
/// Values of this type are only produced by [`quote_identifier`] and
/// [`quote_qualified_identifier`]; nothing else hand-builds delimited names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuotedIdentifier(String);

impl QuotedIdentifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuotedIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A tight upper bound on the quoted length of a name of `name_len` bytes:
/// two delimiters, every byte potentially doubled, and a terminator's worth
/// of slack. Callers use it to pre-size buffers.
pub const fn quoted_len_bound(name_len: usize) -> usize {
    2 * name_len + 3
}

/// Safely quote a single SQL name.
///
/// The name is wrapped in double quotes and every embedded double quote is
/// escaped by doubling it. Total, pure, and never "smart" about whether the
/// quotes were needed.
pub fn quote_identifier(name: &str) -> QuotedIdentifier {
    let mut out = String::with_capacity(quoted_len_bound(name.len()));
    out.push('"');
    for c in name.chars() {
        if c == '"' {
            out.push('"');
        }
        out.push(c);
    }
    out.push('"');
    QuotedIdentifier(out)
}

/// Quote a possibly schema-qualified name.
///
/// Each part is quoted independently and the parts are joined with a single
/// unescaped `.`; if `schema` is absent only the quoted name is emitted.
pub fn quote_qualified_identifier(schema: Option<&str>, name: &str) -> QuotedIdentifier {
    match schema {
        Some(schema) => QuotedIdentifier(format!(
            "{}.{}",
            quote_identifier(schema),
            quote_identifier(name)
        )),
        None => quote_identifier(name),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use sqlparser::dialect::PostgreSqlDialect;
    use sqlparser::tokenizer::{Token, Tokenizer};

    use super::*;

    /// Run the quoted form back through the host tokenizer and recover the
    /// original spelling.
    fn unquote(quoted: &QuotedIdentifier) -> String {
        let tokens = Tokenizer::new(&PostgreSqlDialect {}, quoted.as_str())
            .tokenize()
            .expect("quoted identifier must tokenize");
        match tokens.as_slice() {
            [Token::Word(word)] => {
                assert_eq!(word.quote_style, Some('"'));
                word.value.clone()
            }
            other => panic!("expected a single quoted word, got {other:?}"),
        }
    }

    #[test]
    fn quotes_plain_names() {
        assert_eq!(quote_identifier("employees").as_str(), "\"employees\"");
    }

    #[test]
    fn doubles_embedded_delimiters() {
        assert_eq!(quote_identifier("we\"ird").as_str(), "\"we\"\"ird\"");
        assert_eq!(quote_identifier("\"\"").as_str(), "\"\"\"\"\"\"");
    }

    #[test]
    fn qualified_joins_with_bare_dot() {
        assert_eq!(
            quote_qualified_identifier(Some("public"), "a").as_str(),
            "\"public\".\"a\""
        );
        assert_eq!(quote_qualified_identifier(None, "a").as_str(), "\"a\"");
    }

    #[test]
    fn empty_name_stays_within_bound() {
        let quoted = quote_identifier("");
        assert_eq!(quoted.as_str(), "\"\"");
        assert!(quoted.as_str().len() <= quoted_len_bound(0));
    }

    proptest! {
        #[test]
        fn round_trips_through_host_tokenizer(name in "[ -~]+") {
            let quoted = quote_identifier(&name);
            prop_assert_eq!(unquote(&quoted), name);
        }

        #[test]
        fn output_length_is_bounded(name in "\\PC*") {
            let quoted = quote_identifier(&name);
            prop_assert!(quoted.as_str().len() <= quoted_len_bound(name.len()));
        }
    }
}
