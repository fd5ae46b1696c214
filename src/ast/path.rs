//! Property-path productions.
//!
//! A [`Path`] stands in for a single predicate position. The type ladder
//! mirrors the grammar's precedence: alternatives over sequences over
//! possibly-inverted, possibly-modified primaries.

use crate::ast::term::Iri;
use crate::error::StructuralError;
use crate::render::Render;

/// `[88] Path ::= PathAlternative`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Path {
    pub alternative: PathAlternative,
}

impl Path {
    /// Wrap a plain IRI predicate in the canonical single-step path.
    pub fn from_iri(iri: Iri) -> Self {
        Self {
            alternative: PathAlternative {
                first: PathSequence {
                    first: PathEltOrInverse {
                        inverse: false,
                        elt: PathElt {
                            primary: PathPrimary::Iri(iri),
                            modifier: None,
                        },
                    },
                    rest: Vec::new(),
                },
                rest: Vec::new(),
            },
        }
    }
}

impl Render for Path {
    fn render(&self, buf: &mut String) {
        self.alternative.render(buf);
    }
}

/// `[89] PathAlternative ::= PathSequence ( '|' PathSequence )*`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathAlternative {
    pub first: PathSequence,
    pub rest: Vec<PathSequence>,
}

impl PathAlternative {
    /// Build from a non-empty list of sequences.
    pub fn from_vec(mut sequences: Vec<PathSequence>) -> Result<Self, StructuralError> {
        if sequences.is_empty() {
            return Err(StructuralError::empty_list("PathAlternative"));
        }
        let first = sequences.remove(0);
        Ok(Self {
            first,
            rest: sequences,
        })
    }
}

impl Render for PathAlternative {
    fn render(&self, buf: &mut String) {
        self.first.render(buf);
        for sequence in &self.rest {
            buf.push('|');
            sequence.render(buf);
        }
    }
}

/// `[90] PathSequence ::= PathEltOrInverse ( '/' PathEltOrInverse )*`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathSequence {
    pub first: PathEltOrInverse,
    pub rest: Vec<PathEltOrInverse>,
}

impl PathSequence {
    /// Build from a non-empty list of steps.
    pub fn from_vec(mut steps: Vec<PathEltOrInverse>) -> Result<Self, StructuralError> {
        if steps.is_empty() {
            return Err(StructuralError::empty_list("PathSequence"));
        }
        let first = steps.remove(0);
        Ok(Self { first, rest: steps })
    }
}

impl Render for PathSequence {
    fn render(&self, buf: &mut String) {
        self.first.render(buf);
        for step in &self.rest {
            buf.push('/');
            step.render(buf);
        }
    }
}

/// `[92] PathEltOrInverse ::= PathElt | '^' PathElt`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathEltOrInverse {
    pub inverse: bool,
    pub elt: PathElt,
}

impl Render for PathEltOrInverse {
    fn render(&self, buf: &mut String) {
        if self.inverse {
            buf.push('^');
        }
        self.elt.render(buf);
    }
}

/// `[91] PathElt ::= PathPrimary PathMod?`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathElt {
    pub primary: PathPrimary,
    pub modifier: Option<PathMod>,
}

impl Render for PathElt {
    fn render(&self, buf: &mut String) {
        self.primary.render(buf);
        if let Some(modifier) = &self.modifier {
            modifier.render(buf);
        }
    }
}

/// `[93] PathMod ::= '?' | '*' | '+'`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PathMod {
    ZeroOrOne,
    ZeroOrMore,
    OneOrMore,
}

impl Render for PathMod {
    fn render(&self, buf: &mut String) {
        buf.push(match self {
            Self::ZeroOrOne => '?',
            Self::ZeroOrMore => '*',
            Self::OneOrMore => '+',
        });
    }
}

/// `[94] PathPrimary ::= iri | 'a' | '!' PathNegatedPropertySet | '(' Path ')'`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathPrimary {
    Iri(Iri),
    /// The `rdf:type` shorthand.
    A,
    Negated(PathNegatedPropertySet),
    Group(Box<Path>),
}

impl Render for PathPrimary {
    fn render(&self, buf: &mut String) {
        match self {
            Self::Iri(iri) => iri.render(buf),
            Self::A => buf.push('a'),
            Self::Negated(set) => {
                buf.push('!');
                set.render(buf);
            }
            Self::Group(path) => {
                buf.push('(');
                path.render(buf);
                buf.push(')');
            }
        }
    }
}

/// `[95] PathNegatedPropertySet`
///
/// Rendered without parentheses for a single alternative and with them
/// otherwise, so `!ex:p` and `!(ex:p|^ex:q)` both come out canonical.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathNegatedPropertySet {
    pub first: PathOneInPropertySet,
    pub rest: Vec<PathOneInPropertySet>,
}

impl PathNegatedPropertySet {
    /// Build from a non-empty list of alternatives.
    pub fn from_vec(mut alternatives: Vec<PathOneInPropertySet>) -> Result<Self, StructuralError> {
        if alternatives.is_empty() {
            return Err(StructuralError::empty_list("PathNegatedPropertySet"));
        }
        let first = alternatives.remove(0);
        Ok(Self {
            first,
            rest: alternatives,
        })
    }
}

impl Render for PathNegatedPropertySet {
    fn render(&self, buf: &mut String) {
        if self.rest.is_empty() {
            self.first.render(buf);
        } else {
            buf.push('(');
            self.first.render(buf);
            for alternative in &self.rest {
                buf.push('|');
                alternative.render(buf);
            }
            buf.push(')');
        }
    }
}

/// `[96] PathOneInPropertySet ::= iri | 'a' | '^' ( iri | 'a' )`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathOneInPropertySet {
    pub inverse: bool,
    pub predicate: IriOrA,
}

impl Render for PathOneInPropertySet {
    fn render(&self, buf: &mut String) {
        if self.inverse {
            buf.push('^');
        }
        self.predicate.render(buf);
    }
}

/// A predicate position that is either an IRI or the `a` shorthand.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum IriOrA {
    Iri(Iri),
    A,
}

impl Render for IriOrA {
    fn render(&self, buf: &mut String) {
        match self {
            Self::Iri(iri) => iri.render(buf),
            Self::A => buf.push('a'),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iri(s: &str) -> Iri {
        Iri::from_string(s).unwrap()
    }

    fn step(primary: PathPrimary, modifier: Option<PathMod>) -> PathEltOrInverse {
        PathEltOrInverse {
            inverse: false,
            elt: PathElt { primary, modifier },
        }
    }

    #[test]
    fn single_iri_path() {
        assert_eq!(
            Path::from_iri(iri("http://ex/p")).to_sparql(),
            "<http://ex/p>"
        );
    }

    #[test]
    fn sequence_and_alternative_separators() {
        let seq = PathSequence::from_vec(vec![
            step(PathPrimary::Iri(iri("ex:a")), None),
            step(PathPrimary::Iri(iri("ex:b")), Some(PathMod::OneOrMore)),
        ])
        .unwrap();
        let alt = PathAlternative::from_vec(vec![
            seq,
            PathSequence::from_vec(vec![step(PathPrimary::A, None)]).unwrap(),
        ])
        .unwrap();
        assert_eq!(Path { alternative: alt }.to_sparql(), "ex:a/ex:b+|a");
    }

    #[test]
    fn inverse_and_grouping() {
        let inner = Path::from_iri(iri("ex:p"));
        let grouped = PathEltOrInverse {
            inverse: true,
            elt: PathElt {
                primary: PathPrimary::Group(Box::new(inner)),
                modifier: Some(PathMod::ZeroOrMore),
            },
        };
        assert_eq!(grouped.to_sparql(), "^(ex:p)*");
    }

    #[test]
    fn negated_set_parenthesized_only_when_plural() {
        let single = PathPrimary::Negated(
            PathNegatedPropertySet::from_vec(vec![PathOneInPropertySet {
                inverse: false,
                predicate: IriOrA::Iri(iri("ex:p")),
            }])
            .unwrap(),
        );
        assert_eq!(single.to_sparql(), "!ex:p");

        let plural = PathPrimary::Negated(
            PathNegatedPropertySet::from_vec(vec![
                PathOneInPropertySet {
                    inverse: false,
                    predicate: IriOrA::Iri(iri("ex:p")),
                },
                PathOneInPropertySet {
                    inverse: true,
                    predicate: IriOrA::A,
                },
            ])
            .unwrap(),
        );
        assert_eq!(plural.to_sparql(), "!(ex:p|^a)");
    }

    #[test]
    fn empty_lists_fail_construction() {
        assert!(PathAlternative::from_vec(Vec::new()).is_err());
        assert!(PathSequence::from_vec(Vec::new()).is_err());
        assert!(PathNegatedPropertySet::from_vec(Vec::new()).is_err());
    }
}
