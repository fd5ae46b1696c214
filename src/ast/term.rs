//! RDF term productions: IRIs, literals, variables, blank nodes.
//!
//! These are the leaves of the node hierarchy proper; below them sit only
//! the validated terminals from [`crate::terminal`].

use crate::error::LexicalError;
use crate::render::Render;
use crate::terminal::{
    Anon, BlankNodeLabel, Decimal, DecimalNegative, DecimalPositive, Double, DoubleNegative,
    DoublePositive, Integer, IntegerNegative, IntegerPositive, Iriref, LangTag, Nil, PnameLn,
    PnameNs, StringLiteral1, StringLiteral2, StringLiteralLong1, StringLiteralLong2, Var1, Var2,
};

/// `[108] Var ::= VAR1 | VAR2`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Var {
    Var1(Var1),
    Var2(Var2),
}

impl Var {
    /// Build a `?name` variable from its bare name.
    pub fn new(name: impl Into<std::sync::Arc<str>>) -> Result<Self, LexicalError> {
        Ok(Self::Var1(Var1::new(name)?))
    }
}

impl Render for Var {
    fn render(&self, buf: &mut String) {
        match self {
            Self::Var1(v) => v.render(buf),
            Self::Var2(v) => v.render(buf),
        }
    }
}

/// `[137] PrefixedName ::= PNAME_LN | PNAME_NS`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrefixedName {
    Ln(PnameLn),
    Ns(PnameNs),
}

impl PrefixedName {
    pub fn new(value: impl Into<std::sync::Arc<str>>) -> Result<Self, LexicalError> {
        let value = value.into();
        match PnameLn::new(value.clone()) {
            Ok(ln) => Ok(Self::Ln(ln)),
            Err(_) => Ok(Self::Ns(PnameNs::new(value)?)),
        }
    }
}

impl Render for PrefixedName {
    fn render(&self, buf: &mut String) {
        match self {
            Self::Ln(p) => p.render(buf),
            Self::Ns(p) => p.render(buf),
        }
    }
}

/// `[136] iri ::= IRIREF | PrefixedName`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Iri {
    Full(Iriref),
    Prefixed(PrefixedName),
}

impl Iri {
    /// Build from either surface form: `http://...` becomes a full IRI,
    /// `ex:name` a prefixed name. Angle brackets are supplied at render
    /// time and must not be part of the input.
    pub fn from_string(value: impl Into<std::sync::Arc<str>>) -> Result<Self, LexicalError> {
        let value = value.into();
        if let Ok(name) = PrefixedName::new(value.clone()) {
            return Ok(Self::Prefixed(name));
        }
        match Iriref::new(value.clone()) {
            Ok(iriref) => Ok(Self::Full(iriref)),
            Err(_) => Err(LexicalError::new("iri", value)),
        }
    }

    /// Build a full `<...>` IRI.
    pub fn full(value: impl Into<std::sync::Arc<str>>) -> Result<Self, LexicalError> {
        Ok(Self::Full(Iriref::new(value)?))
    }
}

impl Render for Iri {
    fn render(&self, buf: &mut String) {
        match self {
            Self::Full(i) => i.render(buf),
            Self::Prefixed(p) => p.render(buf),
        }
    }
}

/// `[135] String`, one of the four quoting forms.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum StringLiteral {
    Single(StringLiteral1),
    Double(StringLiteral2),
    LongSingle(StringLiteralLong1),
    LongDouble(StringLiteralLong2),
}

impl Render for StringLiteral {
    fn render(&self, buf: &mut String) {
        match self {
            Self::Single(s) => s.render(buf),
            Self::Double(s) => s.render(buf),
            Self::LongSingle(s) => s.render(buf),
            Self::LongDouble(s) => s.render(buf),
        }
    }
}

/// The optional tail of an RDF literal: a language tag or a datatype,
/// never both.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LiteralSuffix {
    Lang(LangTag),
    Datatype(Iri),
}

impl Render for LiteralSuffix {
    fn render(&self, buf: &mut String) {
        match self {
            Self::Lang(tag) => tag.render(buf),
            Self::Datatype(iri) => {
                buf.push_str("^^");
                iri.render(buf);
            }
        }
    }
}

/// `[129] RDFLiteral ::= String ( LANGTAG | ( '^^' iri ) )?`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RdfLiteral {
    pub value: StringLiteral,
    pub suffix: Option<LiteralSuffix>,
}

impl RdfLiteral {
    /// Build a plain double-quoted literal from its inner text. Escape
    /// sequences must already be applied; they are stored verbatim.
    pub fn from_string(value: impl Into<std::sync::Arc<str>>) -> Result<Self, LexicalError> {
        Ok(Self {
            value: StringLiteral::Double(StringLiteral2::new(value)?),
            suffix: None,
        })
    }

    /// Attach a language tag.
    pub fn with_lang(mut self, tag: LangTag) -> Self {
        self.suffix = Some(LiteralSuffix::Lang(tag));
        self
    }

    /// Attach a datatype IRI.
    pub fn with_datatype(mut self, datatype: Iri) -> Self {
        self.suffix = Some(LiteralSuffix::Datatype(datatype));
        self
    }
}

impl Render for RdfLiteral {
    fn render(&self, buf: &mut String) {
        self.value.render(buf);
        if let Some(suffix) = &self.suffix {
            suffix.render(buf);
        }
    }
}

/// `[131] NumericLiteralUnsigned ::= INTEGER | DECIMAL | DOUBLE`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NumericLiteralUnsigned {
    Integer(Integer),
    Decimal(Decimal),
    Double(Double),
}

impl Render for NumericLiteralUnsigned {
    fn render(&self, buf: &mut String) {
        match self {
            Self::Integer(n) => n.render(buf),
            Self::Decimal(n) => n.render(buf),
            Self::Double(n) => n.render(buf),
        }
    }
}

/// `[132] NumericLiteralPositive`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NumericLiteralPositive {
    Integer(IntegerPositive),
    Decimal(DecimalPositive),
    Double(DoublePositive),
}

impl Render for NumericLiteralPositive {
    fn render(&self, buf: &mut String) {
        match self {
            Self::Integer(n) => n.render(buf),
            Self::Decimal(n) => n.render(buf),
            Self::Double(n) => n.render(buf),
        }
    }
}

/// `[133] NumericLiteralNegative`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NumericLiteralNegative {
    Integer(IntegerNegative),
    Decimal(DecimalNegative),
    Double(DoubleNegative),
}

impl Render for NumericLiteralNegative {
    fn render(&self, buf: &mut String) {
        match self {
            Self::Integer(n) => n.render(buf),
            Self::Decimal(n) => n.render(buf),
            Self::Double(n) => n.render(buf),
        }
    }
}

/// `[130] NumericLiteral`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NumericLiteral {
    Unsigned(NumericLiteralUnsigned),
    Positive(NumericLiteralPositive),
    Negative(NumericLiteralNegative),
}

impl NumericLiteral {
    /// Build an unsigned integer literal.
    pub fn integer(value: u64) -> Self {
        let digits = value.to_string();
        match Integer::new(digits) {
            Ok(n) => Self::Unsigned(NumericLiteralUnsigned::Integer(n)),
            // A formatted u64 is always a digit run.
            Err(_) => unreachable!("formatted u64 satisfies the INTEGER pattern"),
        }
    }
}

impl Render for NumericLiteral {
    fn render(&self, buf: &mut String) {
        match self {
            Self::Unsigned(n) => n.render(buf),
            Self::Positive(n) => n.render(buf),
            Self::Negative(n) => n.render(buf),
        }
    }
}

/// `[134] BooleanLiteral ::= 'true' | 'false'`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BooleanLiteral(pub bool);

impl Render for BooleanLiteral {
    fn render(&self, buf: &mut String) {
        buf.push_str(if self.0 { "true" } else { "false" });
    }
}

/// `[138] BlankNode ::= BLANK_NODE_LABEL | ANON`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum BlankNode {
    Label(BlankNodeLabel),
    Anon(Anon),
}

impl BlankNode {
    /// Build a labelled blank node, `_:label`.
    pub fn labelled(label: impl Into<std::sync::Arc<str>>) -> Result<Self, LexicalError> {
        Ok(Self::Label(BlankNodeLabel::new(label)?))
    }

    /// Build an anonymous blank node, `[]`.
    pub fn anon() -> Self {
        Self::Anon(Anon::default())
    }
}

impl Render for BlankNode {
    fn render(&self, buf: &mut String) {
        match self {
            Self::Label(label) => label.render(buf),
            Self::Anon(anon) => anon.render(buf),
        }
    }
}

/// `[109] GraphTerm ::= iri | RDFLiteral | NumericLiteral | BooleanLiteral | BlankNode | NIL`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GraphTerm {
    Iri(Iri),
    Literal(RdfLiteral),
    Numeric(NumericLiteral),
    Boolean(BooleanLiteral),
    BlankNode(BlankNode),
    Nil(Nil),
}

impl Render for GraphTerm {
    fn render(&self, buf: &mut String) {
        match self {
            Self::Iri(iri) => iri.render(buf),
            Self::Literal(lit) => lit.render(buf),
            Self::Numeric(num) => num.render(buf),
            Self::Boolean(b) => b.render(buf),
            Self::BlankNode(b) => b.render(buf),
            Self::Nil(nil) => nil.render(buf),
        }
    }
}

/// `[106] VarOrTerm ::= Var | GraphTerm`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum VarOrTerm {
    Var(Var),
    Term(GraphTerm),
}

impl Render for VarOrTerm {
    fn render(&self, buf: &mut String) {
        match self {
            Self::Var(v) => v.render(buf),
            Self::Term(t) => t.render(buf),
        }
    }
}

impl From<Var> for VarOrTerm {
    fn from(var: Var) -> Self {
        Self::Var(var)
    }
}

impl From<GraphTerm> for VarOrTerm {
    fn from(term: GraphTerm) -> Self {
        Self::Term(term)
    }
}

/// `[107] VarOrIri ::= Var | iri`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum VarOrIri {
    Var(Var),
    Iri(Iri),
}

impl Render for VarOrIri {
    fn render(&self, buf: &mut String) {
        match self {
            Self::Var(v) => v.render(buf),
            Self::Iri(i) => i.render(buf),
        }
    }
}

impl From<Var> for VarOrIri {
    fn from(var: Var) -> Self {
        Self::Var(var)
    }
}

impl From<Iri> for VarOrIri {
    fn from(iri: Iri) -> Self {
        Self::Iri(iri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iri_from_string_prefers_prefixed_names() {
        assert!(matches!(
            Iri::from_string("ex:name").unwrap(),
            Iri::Prefixed(PrefixedName::Ln(_))
        ));
        assert!(matches!(
            Iri::from_string("http://example.org/x").unwrap(),
            Iri::Full(_)
        ));
        assert!(Iri::from_string("not valid").is_err());
    }

    #[test]
    fn literal_suffixes_are_exclusive_by_shape() {
        let tagged = RdfLiteral::from_string("chat")
            .unwrap()
            .with_lang(LangTag::new("fr").unwrap());
        assert_eq!(tagged.to_sparql(), "\"chat\"@fr");

        let typed = RdfLiteral::from_string("42")
            .unwrap()
            .with_datatype(Iri::full("http://www.w3.org/2001/XMLSchema#integer").unwrap());
        assert_eq!(
            typed.to_sparql(),
            "\"42\"^^<http://www.w3.org/2001/XMLSchema#integer>"
        );
    }

    #[test]
    fn numeric_literal_rendering() {
        assert_eq!(NumericLiteral::integer(7).to_sparql(), "7");
        let neg = NumericLiteral::Negative(NumericLiteralNegative::Decimal(
            DecimalNegative::new("0.5").unwrap(),
        ));
        assert_eq!(neg.to_sparql(), "-0.5");
    }

    #[test]
    fn blank_nodes() {
        assert_eq!(BlankNode::labelled("b1").unwrap().to_sparql(), "_:b1");
        assert_eq!(BlankNode::anon().to_sparql(), "[]");
    }

    #[test]
    fn boolean_literal() {
        assert_eq!(BooleanLiteral(true).to_sparql(), "true");
        assert_eq!(BooleanLiteral(false).to_sparql(), "false");
    }
}
