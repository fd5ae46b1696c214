//! Triple block productions.
//!
//! Two parallel families mirror the grammar: the plain family
//! (`TriplesSameSubject`, `Verb`, `ObjectList`, ...) used by templates
//! and quad data, and the path family (`TriplesSameSubjectPath`,
//! `VerbPath`, `ObjectListPath`, ...) used inside `WHERE` groups where
//! predicates may be property paths.

use crate::ast::path::Path;
use crate::ast::term::{BlankNode, GraphTerm, Iri, Var, VarOrIri, VarOrTerm};
use crate::collect::CollectTriples;
use crate::error::StructuralError;
use crate::render::Render;
use std::collections::HashSet;

/// Operand accepted by the `from_spo` helpers.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpoTerm {
    Var(Var),
    Iri(Iri),
    BlankNode(BlankNode),
}

impl SpoTerm {
    fn into_var_or_term(self) -> VarOrTerm {
        match self {
            Self::Var(v) => VarOrTerm::Var(v),
            Self::Iri(iri) => VarOrTerm::Term(GraphTerm::Iri(iri)),
            Self::BlankNode(b) => VarOrTerm::Term(GraphTerm::BlankNode(b)),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Var(_) => "a variable",
            Self::Iri(_) => "an iri",
            Self::BlankNode(_) => "a blank node",
        }
    }
}

impl From<Var> for SpoTerm {
    fn from(var: Var) -> Self {
        Self::Var(var)
    }
}

impl From<Iri> for SpoTerm {
    fn from(iri: Iri) -> Self {
        Self::Iri(iri)
    }
}

impl From<BlankNode> for SpoTerm {
    fn from(node: BlankNode) -> Self {
        Self::BlankNode(node)
    }
}

/// `[75] TriplesSameSubject`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TriplesSameSubject {
    Term {
        subject: VarOrTerm,
        properties: PropertyListNotEmpty,
    },
    Node {
        node: TriplesNode,
        properties: PropertyList,
    },
}

impl TriplesSameSubject {
    /// Build a single `subject predicate object` clause. The predicate
    /// must be a variable or an iri.
    pub fn from_spo(
        subject: impl Into<SpoTerm>,
        predicate: impl Into<SpoTerm>,
        object: impl Into<SpoTerm>,
    ) -> Result<Self, StructuralError> {
        let verb = match predicate.into() {
            SpoTerm::Var(v) => Verb::VarOrIri(VarOrIri::Var(v)),
            SpoTerm::Iri(iri) => Verb::VarOrIri(VarOrIri::Iri(iri)),
            other => {
                return Err(StructuralError::unsupported_operand(
                    "TriplesSameSubject::from_spo",
                    "predicate",
                    other.kind(),
                ))
            }
        };
        Ok(Self::Term {
            subject: subject.into().into_var_or_term(),
            properties: PropertyListNotEmpty {
                first: (
                    verb,
                    ObjectList {
                        first: Object(GraphNode::VarOrTerm(object.into().into_var_or_term())),
                        rest: Vec::new(),
                    },
                ),
                rest: Vec::new(),
            },
        })
    }
}

impl Render for TriplesSameSubject {
    fn render(&self, buf: &mut String) {
        match self {
            Self::Term {
                subject,
                properties,
            } => {
                subject.render(buf);
                buf.push(' ');
                properties.render(buf);
            }
            Self::Node { node, properties } => {
                node.render(buf);
                properties.render(buf);
            }
        }
    }
}

/// `[76] PropertyList ::= PropertyListNotEmpty?`
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PropertyList(pub Option<PropertyListNotEmpty>);

impl Render for PropertyList {
    fn render(&self, buf: &mut String) {
        if let Some(properties) = &self.0 {
            properties.render(buf);
        }
    }
}

/// `[77] PropertyListNotEmpty ::= Verb ObjectList ( ';' ( Verb ObjectList )? )*`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertyListNotEmpty {
    pub first: (Verb, ObjectList),
    pub rest: Vec<(Verb, ObjectList)>,
}

impl PropertyListNotEmpty {
    pub fn from_vec(mut pairs: Vec<(Verb, ObjectList)>) -> Result<Self, StructuralError> {
        if pairs.is_empty() {
            return Err(StructuralError::empty_list("PropertyListNotEmpty"));
        }
        let first = pairs.remove(0);
        Ok(Self { first, rest: pairs })
    }
}

impl Render for PropertyListNotEmpty {
    fn render(&self, buf: &mut String) {
        let (verb, objects) = &self.first;
        verb.render(buf);
        buf.push(' ');
        objects.render(buf);
        for (verb, objects) in &self.rest {
            buf.push(';');
            verb.render(buf);
            buf.push(' ');
            objects.render(buf);
        }
    }
}

/// `[78] Verb ::= VarOrIri | 'a'`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Verb {
    VarOrIri(VarOrIri),
    A,
}

impl Render for Verb {
    fn render(&self, buf: &mut String) {
        match self {
            Self::VarOrIri(v) => v.render(buf),
            Self::A => buf.push('a'),
        }
    }
}

/// `[79] ObjectList ::= Object ( ',' Object )*`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectList {
    pub first: Object,
    pub rest: Vec<Object>,
}

impl ObjectList {
    pub fn from_vec(mut objects: Vec<Object>) -> Result<Self, StructuralError> {
        if objects.is_empty() {
            return Err(StructuralError::empty_list("ObjectList"));
        }
        let first = objects.remove(0);
        Ok(Self {
            first,
            rest: objects,
        })
    }
}

impl Render for ObjectList {
    fn render(&self, buf: &mut String) {
        self.first.render(buf);
        for object in &self.rest {
            buf.push(',');
            object.render(buf);
        }
    }
}

/// `[80] Object ::= GraphNode`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Object(pub GraphNode);

impl Render for Object {
    fn render(&self, buf: &mut String) {
        self.0.render(buf);
    }
}

/// `[81] TriplesSameSubjectPath`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TriplesSameSubjectPath {
    Term {
        subject: VarOrTerm,
        properties: PropertyListPathNotEmpty,
    },
    Node {
        node: TriplesNodePath,
        properties: PropertyListPath,
    },
}

impl TriplesSameSubjectPath {
    /// Build a single `subject predicate object` clause. An iri predicate
    /// is wrapped in the full canonical path chain; the predicate must be
    /// a variable or an iri.
    pub fn from_spo(
        subject: impl Into<SpoTerm>,
        predicate: impl Into<SpoTerm>,
        object: impl Into<SpoTerm>,
    ) -> Result<Self, StructuralError> {
        let verb = match predicate.into() {
            SpoTerm::Var(v) => PathVerb::Simple(VerbSimple { var: v }),
            SpoTerm::Iri(iri) => PathVerb::Path(VerbPath {
                path: Path::from_iri(iri),
            }),
            other => {
                return Err(StructuralError::unsupported_operand(
                    "TriplesSameSubjectPath::from_spo",
                    "predicate",
                    other.kind(),
                ))
            }
        };
        Ok(Self::Term {
            subject: subject.into().into_var_or_term(),
            properties: PropertyListPathNotEmpty {
                first: (
                    verb,
                    ObjectListPath {
                        first: ObjectPath(GraphNodePath::VarOrTerm(
                            object.into().into_var_or_term(),
                        )),
                        rest: Vec::new(),
                    },
                ),
                rest: Vec::new(),
            },
        })
    }
}

impl Render for TriplesSameSubjectPath {
    fn render(&self, buf: &mut String) {
        match self {
            Self::Term {
                subject,
                properties,
            } => {
                subject.render(buf);
                buf.push(' ');
                properties.render(buf);
            }
            Self::Node { node, properties } => {
                node.render(buf);
                properties.render(buf);
            }
        }
    }
}

impl CollectTriples for TriplesSameSubjectPath {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        out.insert(self.clone());
    }
}

/// `[82] PropertyListPath ::= PropertyListPathNotEmpty?`
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PropertyListPath(pub Option<PropertyListPathNotEmpty>);

impl Render for PropertyListPath {
    fn render(&self, buf: &mut String) {
        if let Some(properties) = &self.0 {
            properties.render(buf);
        }
    }
}

/// `[83] PropertyListPathNotEmpty`
///
/// The grammar gives the first pair an `ObjectListPath` and the trailing
/// pairs plain `ObjectList`s; the asymmetry is kept.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertyListPathNotEmpty {
    pub first: (PathVerb, ObjectListPath),
    pub rest: Vec<(PathVerb, ObjectList)>,
}

impl Render for PropertyListPathNotEmpty {
    fn render(&self, buf: &mut String) {
        let (verb, objects) = &self.first;
        verb.render(buf);
        buf.push(' ');
        objects.render(buf);
        for (verb, objects) in &self.rest {
            buf.push(';');
            verb.render(buf);
            buf.push(' ');
            objects.render(buf);
        }
    }
}

/// `[84] VerbPath ::= Path`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VerbPath {
    pub path: Path,
}

impl Render for VerbPath {
    fn render(&self, buf: &mut String) {
        self.path.render(buf);
    }
}

/// `[85] VerbSimple ::= Var`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VerbSimple {
    pub var: Var,
}

impl Render for VerbSimple {
    fn render(&self, buf: &mut String) {
        self.var.render(buf);
    }
}

/// Predicate position of a path triple: `VerbPath | VerbSimple`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathVerb {
    Path(VerbPath),
    Simple(VerbSimple),
}

impl Render for PathVerb {
    fn render(&self, buf: &mut String) {
        match self {
            Self::Path(p) => p.render(buf),
            Self::Simple(s) => s.render(buf),
        }
    }
}

/// `[86] ObjectListPath ::= ObjectPath ( ',' ObjectPath )*`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectListPath {
    pub first: ObjectPath,
    pub rest: Vec<ObjectPath>,
}

impl ObjectListPath {
    pub fn from_vec(mut objects: Vec<ObjectPath>) -> Result<Self, StructuralError> {
        if objects.is_empty() {
            return Err(StructuralError::empty_list("ObjectListPath"));
        }
        let first = objects.remove(0);
        Ok(Self {
            first,
            rest: objects,
        })
    }
}

impl Render for ObjectListPath {
    fn render(&self, buf: &mut String) {
        self.first.render(buf);
        for object in &self.rest {
            buf.push(',');
            object.render(buf);
        }
    }
}

/// `[87] ObjectPath ::= GraphNodePath`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectPath(pub GraphNodePath);

impl Render for ObjectPath {
    fn render(&self, buf: &mut String) {
        self.0.render(buf);
    }
}

/// `[98] TriplesNode ::= Collection | BlankNodePropertyList`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TriplesNode {
    Collection(Collection),
    BlankNodePropertyList(BlankNodePropertyList),
}

impl Render for TriplesNode {
    fn render(&self, buf: &mut String) {
        match self {
            Self::Collection(c) => c.render(buf),
            Self::BlankNodePropertyList(b) => b.render(buf),
        }
    }
}

/// `[99] BlankNodePropertyList ::= '[' PropertyListNotEmpty ']'`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlankNodePropertyList {
    pub properties: PropertyListNotEmpty,
}

impl Render for BlankNodePropertyList {
    fn render(&self, buf: &mut String) {
        buf.push('[');
        self.properties.render(buf);
        buf.push(']');
    }
}

/// `[100] TriplesNodePath ::= CollectionPath | BlankNodePropertyListPath`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TriplesNodePath {
    Collection(CollectionPath),
    BlankNodePropertyList(BlankNodePropertyListPath),
}

impl Render for TriplesNodePath {
    fn render(&self, buf: &mut String) {
        match self {
            Self::Collection(c) => c.render(buf),
            Self::BlankNodePropertyList(b) => b.render(buf),
        }
    }
}

/// `[101] BlankNodePropertyListPath ::= '[' PropertyListPathNotEmpty ']'`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlankNodePropertyListPath {
    pub properties: PropertyListPathNotEmpty,
}

impl Render for BlankNodePropertyListPath {
    fn render(&self, buf: &mut String) {
        buf.push('[');
        self.properties.render(buf);
        buf.push(']');
    }
}

/// `[102] Collection ::= '(' GraphNode+ ')'`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Collection {
    pub first: GraphNode,
    pub rest: Vec<GraphNode>,
}

impl Collection {
    pub fn from_vec(mut nodes: Vec<GraphNode>) -> Result<Self, StructuralError> {
        if nodes.is_empty() {
            return Err(StructuralError::empty_list("Collection"));
        }
        let first = nodes.remove(0);
        Ok(Self { first, rest: nodes })
    }
}

impl Render for Collection {
    fn render(&self, buf: &mut String) {
        buf.push('(');
        self.first.render(buf);
        for node in &self.rest {
            buf.push(' ');
            node.render(buf);
        }
        buf.push(')');
    }
}

/// `[103] CollectionPath ::= '(' GraphNodePath+ ')'`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CollectionPath {
    pub first: GraphNodePath,
    pub rest: Vec<GraphNodePath>,
}

impl CollectionPath {
    pub fn from_vec(mut nodes: Vec<GraphNodePath>) -> Result<Self, StructuralError> {
        if nodes.is_empty() {
            return Err(StructuralError::empty_list("CollectionPath"));
        }
        let first = nodes.remove(0);
        Ok(Self { first, rest: nodes })
    }
}

impl Render for CollectionPath {
    fn render(&self, buf: &mut String) {
        buf.push('(');
        self.first.render(buf);
        for node in &self.rest {
            buf.push(' ');
            node.render(buf);
        }
        buf.push(')');
    }
}

/// `[104] GraphNode ::= VarOrTerm | TriplesNode`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GraphNode {
    VarOrTerm(VarOrTerm),
    Node(Box<TriplesNode>),
}

impl Render for GraphNode {
    fn render(&self, buf: &mut String) {
        match self {
            Self::VarOrTerm(v) => v.render(buf),
            Self::Node(n) => n.render(buf),
        }
    }
}

/// `[105] GraphNodePath ::= VarOrTerm | TriplesNodePath`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GraphNodePath {
    VarOrTerm(VarOrTerm),
    Node(Box<TriplesNodePath>),
}

impl Render for GraphNodePath {
    fn render(&self, buf: &mut String) {
        match self {
            Self::VarOrTerm(v) => v.render(buf),
            Self::Node(n) => n.render(buf),
        }
    }
}

/// `[55] TriplesBlock ::= TriplesSameSubjectPath ( '.' TriplesBlock? )?`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TriplesBlock {
    pub triples: TriplesSameSubjectPath,
    pub rest: Option<Box<TriplesBlock>>,
}

impl TriplesBlock {
    /// Chain a list of clauses into a block, preserving order. Returns
    /// `None` for an empty list.
    pub fn from_list(triples: Vec<TriplesSameSubjectPath>) -> Option<Self> {
        triples.into_iter().rev().fold(None, |rest, triples| {
            Some(Self {
                triples,
                rest: rest.map(Box::new),
            })
        })
    }
}

impl Render for TriplesBlock {
    fn render(&self, buf: &mut String) {
        self.triples.render(buf);
        buf.push_str(" .");
        if let Some(rest) = &self.rest {
            buf.push('\n');
            rest.render(buf);
        }
    }
}

impl CollectTriples for TriplesBlock {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        self.triples.collect_into(out);
        self.rest.collect_into(out);
    }
}

/// `[52] TriplesTemplate ::= TriplesSameSubject ( '.' TriplesTemplate? )?`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TriplesTemplate {
    pub triples: TriplesSameSubject,
    pub rest: Option<Box<TriplesTemplate>>,
}

impl TriplesTemplate {
    /// Chain a list of clauses into a template, preserving order. Returns
    /// `None` for an empty list.
    pub fn from_list(triples: Vec<TriplesSameSubject>) -> Option<Self> {
        triples.into_iter().rev().fold(None, |rest, triples| {
            Some(Self {
                triples,
                rest: rest.map(Box::new),
            })
        })
    }
}

impl Render for TriplesTemplate {
    fn render(&self, buf: &mut String) {
        self.triples.render(buf);
        buf.push_str(" .");
        if let Some(rest) = &self.rest {
            buf.push('\n');
            rest.render(buf);
        }
    }
}

/// `[74] ConstructTriples ::= TriplesSameSubject ( '.' ConstructTriples? )?`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConstructTriples {
    pub triples: TriplesSameSubject,
    pub rest: Option<Box<ConstructTriples>>,
}

impl ConstructTriples {
    /// Chain a list of clauses, preserving order. Returns `None` for an
    /// empty list.
    pub fn from_list(triples: Vec<TriplesSameSubject>) -> Option<Self> {
        triples.into_iter().rev().fold(None, |rest, triples| {
            Some(Self {
                triples,
                rest: rest.map(Box::new),
            })
        })
    }

    /// Flatten the chain back into a list, in order.
    pub fn to_list(&self) -> Vec<TriplesSameSubject> {
        let mut out = vec![self.triples.clone()];
        let mut cursor = &self.rest;
        while let Some(next) = cursor {
            out.push(next.triples.clone());
            cursor = &next.rest;
        }
        out
    }

    /// Concatenate several chains into one. The operands are consumed
    /// and no existing chain is modified.
    pub fn merge(chains: Vec<ConstructTriples>) -> Option<ConstructTriples> {
        let all: Vec<TriplesSameSubject> =
            chains.iter().flat_map(|chain| chain.to_list()).collect();
        Self::from_list(all)
    }
}

impl Render for ConstructTriples {
    fn render(&self, buf: &mut String) {
        self.triples.render(buf);
        if let Some(rest) = &self.rest {
            buf.push_str(" .\n");
            rest.render(buf);
        }
    }
}

/// `[73] ConstructTemplate ::= '{' ConstructTriples? '}'`
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ConstructTemplate {
    pub triples: Option<ConstructTriples>,
}

impl Render for ConstructTemplate {
    fn render(&self, buf: &mut String) {
        match &self.triples {
            Some(triples) => {
                buf.push_str("{\n");
                triples.render(buf);
                buf.push_str("\n}");
            }
            None => buf.push_str("{ }"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::term::GraphTerm;

    fn var(name: &str) -> Var {
        Var::new(name).unwrap()
    }

    fn iri(curie: &str) -> Iri {
        Iri::from_string(curie).unwrap()
    }

    fn node(name: &str) -> GraphNode {
        GraphNode::VarOrTerm(VarOrTerm::Var(var(name)))
    }

    #[test]
    fn object_list_joins_with_commas() {
        let list = ObjectList::from_vec(vec![
            Object(node("o1")),
            Object(node("o2")),
            Object(node("o3")),
        ])
        .unwrap();
        assert_eq!(list.to_sparql(), "?o1,?o2,?o3");
    }

    #[test]
    fn object_list_rejects_empty() {
        assert_eq!(
            ObjectList::from_vec(Vec::new()),
            Err(StructuralError::empty_list("ObjectList"))
        );
    }

    #[test]
    fn property_list_joins_with_semicolons() {
        let objects = |name: &str| ObjectList {
            first: Object(node(name)),
            rest: Vec::new(),
        };
        let list = PropertyListNotEmpty::from_vec(vec![
            (Verb::VarOrIri(VarOrIri::Var(var("v1"))), objects("o1")),
            (Verb::VarOrIri(VarOrIri::Var(var("v2"))), objects("o2")),
        ])
        .unwrap();
        assert_eq!(list.to_sparql(), "?v1 ?o1;?v2 ?o2");
    }

    #[test]
    fn from_spo_wraps_iri_predicate_in_path() {
        let triple = TriplesSameSubjectPath::from_spo(var("s"), iri("ex:p"), var("o")).unwrap();
        assert_eq!(triple.to_sparql(), "?s ex:p ?o");
    }

    #[test]
    fn from_spo_rejects_blank_node_predicate() {
        let err = TriplesSameSubjectPath::from_spo(var("s"), BlankNode::anon(), var("o"))
            .unwrap_err();
        assert_eq!(
            err,
            StructuralError::unsupported_operand(
                "TriplesSameSubjectPath::from_spo",
                "predicate",
                "a blank node"
            )
        );
    }

    #[test]
    fn triples_block_preserves_order() {
        let t1 = TriplesSameSubjectPath::from_spo(var("a"), var("p"), var("b")).unwrap();
        let t2 = TriplesSameSubjectPath::from_spo(var("c"), var("q"), var("d")).unwrap();
        let block = TriplesBlock::from_list(vec![t1, t2]).unwrap();
        assert_eq!(block.to_sparql(), "?a ?p ?b .\n?c ?q ?d .");
    }

    #[test]
    fn triples_block_from_empty_list() {
        assert!(TriplesBlock::from_list(Vec::new()).is_none());
    }

    #[test]
    fn collection_renders_space_separated() {
        let collection =
            Collection::from_vec(vec![node("a"), node("b"), node("c")]).unwrap();
        assert_eq!(collection.to_sparql(), "(?a ?b ?c)");
    }

    #[test]
    fn blank_node_property_list() {
        let properties = PropertyListNotEmpty::from_vec(vec![(
            Verb::A,
            ObjectList {
                first: Object(GraphNode::VarOrTerm(VarOrTerm::Term(GraphTerm::Iri(iri(
                    "ex:Thing",
                ))))),
                rest: Vec::new(),
            },
        )])
        .unwrap();
        let bnpl = BlankNodePropertyList { properties };
        assert_eq!(bnpl.to_sparql(), "[a ex:Thing]");
    }

    #[test]
    fn construct_triples_merge_is_pure() {
        let t1 = TriplesSameSubject::from_spo(var("a"), var("p"), var("b")).unwrap();
        let t2 = TriplesSameSubject::from_spo(var("c"), var("q"), var("d")).unwrap();
        let left = ConstructTriples::from_list(vec![t1.clone()]).unwrap();
        let right = ConstructTriples::from_list(vec![t2.clone()]).unwrap();
        let left_before = left.clone();

        let merged = ConstructTriples::merge(vec![left.clone(), right]).unwrap();
        assert_eq!(merged.to_list(), vec![t1, t2]);
        assert_eq!(left, left_before);
    }

    #[test]
    fn construct_template_empty_and_full() {
        assert_eq!(ConstructTemplate::default().to_sparql(), "{ }");
        let t = TriplesSameSubject::from_spo(var("s"), var("p"), var("o")).unwrap();
        let template = ConstructTemplate {
            triples: ConstructTriples::from_list(vec![t]),
        };
        assert_eq!(template.to_sparql(), "{\n?s ?p ?o\n}");
    }
}
