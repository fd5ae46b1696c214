//! Validated lexical leaf types.
//!
//! One type per SPARQL 1.1 terminal production that appears as a leaf of
//! the node hierarchy. Each wraps the raw token text with its delimiters
//! stripped (an [`Iriref`] stores the text between `<` and `>`), validates
//! it on construction against an anchored pattern, and reproduces the
//! exact surface form when rendered. Escape sequences present in the
//! stored text are emitted verbatim, never re-escaped.
//!
//! Terminals are immutable and compare and hash by their raw value, which
//! is what gives the node hierarchy its derived structural equality.

mod regexes;

use crate::error::LexicalError;
use crate::render::Render;
use std::fmt;
use std::sync::Arc;

macro_rules! terminal {
    (
        $(#[$meta:meta])*
        $name:ident, $grammar_name:literal, $pattern:path,
        prefix: $prefix:literal, suffix: $suffix:literal
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash)]
        pub struct $name(Arc<str>);

        impl $name {
            /// Validate `value` against the terminal's lexical pattern.
            pub fn new(value: impl Into<Arc<str>>) -> Result<Self, LexicalError> {
                let value = value.into();
                if $pattern.is_match(&value) {
                    Ok(Self(value))
                } else {
                    Err(LexicalError::new($grammar_name, value))
                }
            }

            /// The stored text, without surface delimiters.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Render for $name {
            fn render(&self, buf: &mut String) {
                buf.push_str($prefix);
                buf.push_str(&self.0);
                buf.push_str($suffix);
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_sparql())
            }
        }
    };
}

terminal! {
    /// `[139] IRIREF`. Stores the text between `<` and `>`.
    Iriref, "IRIREF", regexes::IRIREF, prefix: "<", suffix: ">"
}

terminal! {
    /// `[140] PNAME_NS`. Stores the whole token including the trailing `:`.
    PnameNs, "PNAME_NS", regexes::PNAME_NS, prefix: "", suffix: ""
}

terminal! {
    /// `[141] PNAME_LN`. Stores the whole token, e.g. `ex:local`.
    PnameLn, "PNAME_LN", regexes::PNAME_LN, prefix: "", suffix: ""
}

terminal! {
    /// `[142] BLANK_NODE_LABEL`. Stores the label after `_:`.
    BlankNodeLabel, "BLANK_NODE_LABEL", regexes::BLANK_NODE_LABEL, prefix: "_:", suffix: ""
}

terminal! {
    /// `[143] VAR1`. Stores the name after `?`.
    Var1, "VAR1", regexes::VARNAME, prefix: "?", suffix: ""
}

terminal! {
    /// `[144] VAR2`. Stores the name after `$`.
    Var2, "VAR2", regexes::VARNAME, prefix: "$", suffix: ""
}

terminal! {
    /// `[145] LANGTAG`. Stores the tag after `@`.
    LangTag, "LANGTAG", regexes::LANGTAG, prefix: "@", suffix: ""
}

terminal! {
    /// `[146] INTEGER`.
    Integer, "INTEGER", regexes::INTEGER, prefix: "", suffix: ""
}

terminal! {
    /// `[147] DECIMAL`.
    Decimal, "DECIMAL", regexes::DECIMAL, prefix: "", suffix: ""
}

terminal! {
    /// `[148] DOUBLE`.
    Double, "DOUBLE", regexes::DOUBLE, prefix: "", suffix: ""
}

terminal! {
    /// `[149] INTEGER_POSITIVE`. Stores the digits after `+`.
    IntegerPositive, "INTEGER_POSITIVE", regexes::INTEGER, prefix: "+", suffix: ""
}

terminal! {
    /// `[150] DECIMAL_POSITIVE`. Stores the digits after `+`.
    DecimalPositive, "DECIMAL_POSITIVE", regexes::DECIMAL, prefix: "+", suffix: ""
}

terminal! {
    /// `[151] DOUBLE_POSITIVE`. Stores the digits after `+`.
    DoublePositive, "DOUBLE_POSITIVE", regexes::DOUBLE, prefix: "+", suffix: ""
}

terminal! {
    /// `[152] INTEGER_NEGATIVE`. Stores the digits after `-`.
    IntegerNegative, "INTEGER_NEGATIVE", regexes::INTEGER, prefix: "-", suffix: ""
}

terminal! {
    /// `[153] DECIMAL_NEGATIVE`. Stores the digits after `-`.
    DecimalNegative, "DECIMAL_NEGATIVE", regexes::DECIMAL, prefix: "-", suffix: ""
}

terminal! {
    /// `[154] DOUBLE_NEGATIVE`. Stores the digits after `-`.
    DoubleNegative, "DOUBLE_NEGATIVE", regexes::DOUBLE, prefix: "-", suffix: ""
}

terminal! {
    /// `[156] STRING_LITERAL1`. Stores the text between the `'` quotes.
    StringLiteral1, "STRING_LITERAL1", regexes::STRING_LITERAL1, prefix: "'", suffix: "'"
}

terminal! {
    /// `[157] STRING_LITERAL2`. Stores the text between the `"` quotes.
    StringLiteral2, "STRING_LITERAL2", regexes::STRING_LITERAL2, prefix: "\"", suffix: "\""
}

terminal! {
    /// `[158] STRING_LITERAL_LONG1`. Stores the text between the `'''` quotes.
    StringLiteralLong1, "STRING_LITERAL_LONG1", regexes::STRING_LITERAL_LONG1,
    prefix: "'''", suffix: "'''"
}

terminal! {
    /// `[159] STRING_LITERAL_LONG2`. Stores the text between the `"""` quotes.
    StringLiteralLong2, "STRING_LITERAL_LONG2", regexes::STRING_LITERAL_LONG2,
    prefix: "\"\"\"", suffix: "\"\"\""
}

terminal! {
    /// `[161] NIL ::= '(' WS* ')'`. Stores the interior whitespace.
    Nil, "NIL", regexes::WS_ONLY, prefix: "(", suffix: ")"
}

terminal! {
    /// `[163] ANON ::= '[' WS* ']'`. Stores the interior whitespace.
    Anon, "ANON", regexes::WS_ONLY, prefix: "[", suffix: "]"
}

impl Default for Nil {
    fn default() -> Self {
        Self(Arc::from(""))
    }
}

impl Default for Anon {
    fn default() -> Self {
        Self(Arc::from(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iriref_round_trips_with_angle_brackets() {
        let iri = Iriref::new("http://example.org/name").unwrap();
        assert_eq!(iri.to_sparql(), "<http://example.org/name>");
        assert_eq!(iri.as_str(), "http://example.org/name");
    }

    #[test]
    fn iriref_rejects_forbidden_characters() {
        let err = Iriref::new("http://example.org/a b").unwrap_err();
        assert_eq!(err.terminal, "IRIREF");
        assert!(Iriref::new("has<nested>").is_err());
        assert!(Iriref::new(r"http://example.org/a\b").is_err());
        assert!(Iriref::new(r"backslash\only").is_err());
    }

    #[test]
    fn var_sigils() {
        assert_eq!(Var1::new("name").unwrap().to_sparql(), "?name");
        assert_eq!(Var2::new("name").unwrap().to_sparql(), "$name");
        assert!(Var1::new("").is_err());
        assert!(Var1::new("a-b").is_err());
    }

    #[test]
    fn anchoring_rejects_embedded_tokens() {
        // A valid token surrounded by junk must not validate.
        assert!(Integer::new("12a").is_err());
        assert!(LangTag::new("en ").is_err());
        assert!(PnameLn::new("ex:name extra").is_err());
    }

    #[test]
    fn prefixed_names() {
        assert_eq!(PnameNs::new("ex:").unwrap().to_sparql(), "ex:");
        assert_eq!(PnameNs::new(":").unwrap().to_sparql(), ":");
        assert!(PnameNs::new("ex").is_err());
        assert_eq!(PnameLn::new("ex:name").unwrap().to_sparql(), "ex:name");
        assert_eq!(PnameLn::new(":name").unwrap().to_sparql(), ":name");
    }

    #[test]
    fn blank_node_label_sigil() {
        let b = BlankNodeLabel::new("b0").unwrap();
        assert_eq!(b.to_sparql(), "_:b0");
        assert!(BlankNodeLabel::new("-b").is_err());
    }

    #[test]
    fn string_literals_keep_escapes_verbatim() {
        let s = StringLiteral2::new(r#"say \"hi\"\n"#).unwrap();
        assert_eq!(s.to_sparql(), r#""say \"hi\"\n""#);
        // Raw newlines are only legal in the long forms.
        assert!(StringLiteral2::new("a\nb").is_err());
        let long = StringLiteralLong2::new("a\nb").unwrap();
        assert_eq!(long.to_sparql(), "\"\"\"a\nb\"\"\"");
    }

    #[test]
    fn numeric_shapes() {
        assert!(Integer::new("42").is_ok());
        assert!(Decimal::new(".5").is_ok());
        assert!(Decimal::new("5.").is_err());
        assert!(Double::new("4.2e1").is_ok());
        assert_eq!(DoubleNegative::new("4.2e1").unwrap().to_sparql(), "-4.2e1");
        assert_eq!(IntegerPositive::new("7").unwrap().to_sparql(), "+7");
    }

    #[test]
    fn nil_and_anon() {
        assert_eq!(Nil::default().to_sparql(), "()");
        assert_eq!(Anon::default().to_sparql(), "[]");
        assert_eq!(Nil::new(" ").unwrap().to_sparql(), "( )");
        assert!(Nil::new("x").is_err());
    }

    #[test]
    fn equality_is_by_raw_value() {
        use std::collections::HashSet;
        let a = Iriref::new("http://example.org/x").unwrap();
        let b = Iriref::new("http://example.org/x").unwrap();
        assert_eq!(a, b);
        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }
}
