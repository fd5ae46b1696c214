//! Update productions: graph management (`LOAD`, `CLEAR`, ...) and graph
//! update (`INSERT DATA`, `DELETE/INSERT ... WHERE`) operations, plus the
//! quad structures they carry.

use crate::ast::pattern::GroupGraphPattern;
use crate::ast::query::Prologue;
use crate::ast::term::{Iri, VarOrIri};
use crate::ast::triples::{TriplesSameSubjectPath, TriplesTemplate};
use crate::collect::CollectTriples;
use crate::error::StructuralError;
use crate::render::Render;
use std::collections::HashSet;

/// `[3] UpdateUnit ::= Update` and `[29] Update ::= Prologue ( Update1 ( ';' Update )? )?`
///
/// A request is a chain of operations, each with its own prologue,
/// joined by `;`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Update {
    pub prologue: Prologue,
    pub operation: Option<Update1>,
    pub rest: Option<Box<Update>>,
}

impl Render for Update {
    fn render(&self, buf: &mut String) {
        if !self.prologue.decls.is_empty() {
            self.prologue.render(buf);
            buf.push('\n');
        }
        match (&self.operation, &self.rest) {
            (Some(operation), Some(rest)) => {
                operation.render(buf);
                buf.push_str(" ;\n");
                rest.render(buf);
            }
            (Some(operation), None) => operation.render(buf),
            // No operation of its own: the chain continues without a
            // leading separator.
            (None, Some(rest)) => rest.render(buf),
            (None, None) => {}
        }
    }
}

impl CollectTriples for Update {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        self.operation.collect_into(out);
        self.rest.collect_into(out);
    }
}

/// `[30] Update1`, one variant per update operation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Update1 {
    Load {
        silent: bool,
        source: Iri,
        into: Option<GraphRef>,
    },
    Clear {
        silent: bool,
        target: GraphRefAll,
    },
    Drop {
        silent: bool,
        target: GraphRefAll,
    },
    Create {
        silent: bool,
        graph: GraphRef,
    },
    Add {
        silent: bool,
        from: GraphOrDefault,
        to: GraphOrDefault,
    },
    Move {
        silent: bool,
        from: GraphOrDefault,
        to: GraphOrDefault,
    },
    Copy {
        silent: bool,
        from: GraphOrDefault,
        to: GraphOrDefault,
    },
    InsertData {
        data: QuadData,
    },
    DeleteData {
        data: QuadData,
    },
    DeleteWhere {
        pattern: QuadPattern,
    },
    Modify(Box<Modify>),
}

fn render_silent(buf: &mut String, silent: bool) {
    if silent {
        buf.push_str("SILENT ");
    }
}

fn render_from_to(buf: &mut String, keyword: &str, silent: bool, from: &GraphOrDefault, to: &GraphOrDefault) {
    buf.push_str(keyword);
    buf.push(' ');
    render_silent(buf, silent);
    from.render(buf);
    buf.push_str(" TO ");
    to.render(buf);
}

impl Render for Update1 {
    fn render(&self, buf: &mut String) {
        match self {
            Self::Load {
                silent,
                source,
                into,
            } => {
                buf.push_str("LOAD ");
                render_silent(buf, *silent);
                source.render(buf);
                if let Some(graph) = into {
                    buf.push_str(" INTO ");
                    graph.render(buf);
                }
            }
            Self::Clear { silent, target } => {
                buf.push_str("CLEAR ");
                render_silent(buf, *silent);
                target.render(buf);
            }
            Self::Drop { silent, target } => {
                buf.push_str("DROP ");
                render_silent(buf, *silent);
                target.render(buf);
            }
            Self::Create { silent, graph } => {
                buf.push_str("CREATE ");
                render_silent(buf, *silent);
                graph.render(buf);
            }
            Self::Add { silent, from, to } => render_from_to(buf, "ADD", *silent, from, to),
            Self::Move { silent, from, to } => render_from_to(buf, "MOVE", *silent, from, to),
            Self::Copy { silent, from, to } => render_from_to(buf, "COPY", *silent, from, to),
            Self::InsertData { data } => {
                buf.push_str("INSERT DATA ");
                data.render(buf);
            }
            Self::DeleteData { data } => {
                buf.push_str("DELETE DATA ");
                data.render(buf);
            }
            Self::DeleteWhere { pattern } => {
                buf.push_str("DELETE WHERE ");
                pattern.render(buf);
            }
            Self::Modify(modify) => modify.render(buf),
        }
    }
}

impl CollectTriples for Update1 {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        match self {
            Self::Modify(modify) => modify.pattern.collect_into(out),
            Self::Load { .. }
            | Self::Clear { .. }
            | Self::Drop { .. }
            | Self::Create { .. }
            | Self::Add { .. }
            | Self::Move { .. }
            | Self::Copy { .. }
            | Self::InsertData { .. }
            | Self::DeleteData { .. }
            | Self::DeleteWhere { .. } => {}
        }
    }
}

/// The delete/insert part of a `Modify`: `DeleteClause InsertClause? | InsertClause`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ModifyOperation {
    DeleteInsert {
        delete: DeleteClause,
        insert: Option<InsertClause>,
    },
    Insert(InsertClause),
}

impl Render for ModifyOperation {
    fn render(&self, buf: &mut String) {
        match self {
            Self::DeleteInsert { delete, insert } => {
                delete.render(buf);
                if let Some(insert) = insert {
                    buf.push('\n');
                    insert.render(buf);
                }
            }
            Self::Insert(insert) => insert.render(buf),
        }
    }
}

/// `[41] Modify ::= ( 'WITH' iri )? ( DeleteClause InsertClause? | InsertClause ) UsingClause* 'WHERE' GroupGraphPattern`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Modify {
    pub with_graph: Option<Iri>,
    pub operation: ModifyOperation,
    pub using_clauses: Vec<UsingClause>,
    pub pattern: GroupGraphPattern,
}

impl Render for Modify {
    fn render(&self, buf: &mut String) {
        if let Some(with_graph) = &self.with_graph {
            buf.push_str("WITH ");
            with_graph.render(buf);
            buf.push('\n');
        }
        self.operation.render(buf);
        for using in &self.using_clauses {
            buf.push('\n');
            using.render(buf);
        }
        buf.push_str("\nWHERE ");
        self.pattern.render(buf);
    }
}

/// `[42] DeleteClause ::= 'DELETE' QuadPattern`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DeleteClause {
    pub pattern: QuadPattern,
}

impl Render for DeleteClause {
    fn render(&self, buf: &mut String) {
        buf.push_str("DELETE ");
        self.pattern.render(buf);
    }
}

/// `[43] InsertClause ::= 'INSERT' QuadPattern`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InsertClause {
    pub pattern: QuadPattern,
}

impl Render for InsertClause {
    fn render(&self, buf: &mut String) {
        buf.push_str("INSERT ");
        self.pattern.render(buf);
    }
}

/// `[44] UsingClause ::= 'USING' ( iri | 'NAMED' iri )`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UsingClause {
    pub named: bool,
    pub iri: Iri,
}

impl Render for UsingClause {
    fn render(&self, buf: &mut String) {
        buf.push_str("USING ");
        if self.named {
            buf.push_str("NAMED ");
        }
        self.iri.render(buf);
    }
}

/// `[45] GraphOrDefault ::= 'DEFAULT' | 'GRAPH'? iri`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GraphOrDefault {
    Default,
    Graph(Iri),
}

impl Render for GraphOrDefault {
    fn render(&self, buf: &mut String) {
        match self {
            Self::Default => buf.push_str("DEFAULT"),
            Self::Graph(iri) => iri.render(buf),
        }
    }
}

/// `[46] GraphRef ::= 'GRAPH' iri`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GraphRef {
    pub iri: Iri,
}

impl Render for GraphRef {
    fn render(&self, buf: &mut String) {
        buf.push_str("GRAPH ");
        self.iri.render(buf);
    }
}

/// `[47] GraphRefAll ::= GraphRef | 'DEFAULT' | 'NAMED' | 'ALL'`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GraphRefAll {
    Graph(GraphRef),
    Default,
    Named,
    All,
}

impl Render for GraphRefAll {
    fn render(&self, buf: &mut String) {
        match self {
            Self::Graph(graph) => graph.render(buf),
            Self::Default => buf.push_str("DEFAULT"),
            Self::Named => buf.push_str("NAMED"),
            Self::All => buf.push_str("ALL"),
        }
    }
}

/// `[48] QuadPattern ::= '{' Quads '}'`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QuadPattern {
    pub quads: Quads,
}

impl Render for QuadPattern {
    fn render(&self, buf: &mut String) {
        buf.push_str("{ ");
        self.quads.render(buf);
        buf.push_str(" }");
    }
}

/// `[49] QuadData ::= '{' Quads '}'`
///
/// Same shape as [`QuadPattern`]; the surrounding operation decides
/// whether variables are allowed, which this layer does not police.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QuadData {
    pub quads: Quads,
}

impl Render for QuadData {
    fn render(&self, buf: &mut String) {
        buf.push_str("{ ");
        self.quads.render(buf);
        buf.push_str(" }");
    }
}

/// `[50] Quads ::= TriplesTemplate? ( QuadsNotTriples '.'? TriplesTemplate? )*`
///
/// Same interleaving shape as a group graph pattern body: templates
/// separated by `GRAPH` sections, checked at construction.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Quads {
    templates: Vec<TriplesTemplate>,
    graphs: Vec<QuadsNotTriples>,
}

impl Quads {
    /// At least one template is required; with `N > 1` templates there
    /// must be at least `N - 1` `GRAPH` sections between them.
    pub fn new(
        templates: Vec<TriplesTemplate>,
        graphs: Vec<QuadsNotTriples>,
    ) -> Result<Self, StructuralError> {
        if templates.is_empty() {
            return Err(StructuralError::empty_list("Quads"));
        }
        if templates.len() > 1 && graphs.len() < templates.len() - 1 {
            return Err(StructuralError::pairing_mismatch(
                "Quads",
                templates.len(),
                graphs.len(),
            ));
        }
        Ok(Self { templates, graphs })
    }

    pub fn templates(&self) -> &[TriplesTemplate] {
        &self.templates
    }

    pub fn graphs(&self) -> &[QuadsNotTriples] {
        &self.graphs
    }
}

impl Render for Quads {
    fn render(&self, buf: &mut String) {
        self.templates[0].render(buf);
        for (i, graph) in self.graphs.iter().enumerate() {
            buf.push('\n');
            graph.render(buf);
            if let Some(template) = self.templates.get(i + 1) {
                buf.push('\n');
                template.render(buf);
            }
        }
    }
}

/// `[51] QuadsNotTriples ::= 'GRAPH' VarOrIri '{' TriplesTemplate? '}'`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QuadsNotTriples {
    pub graph: VarOrIri,
    pub template: Option<TriplesTemplate>,
}

impl Render for QuadsNotTriples {
    fn render(&self, buf: &mut String) {
        buf.push_str("GRAPH ");
        self.graph.render(buf);
        buf.push_str(" {");
        if let Some(template) = &self.template {
            buf.push(' ');
            template.render(buf);
            buf.push(' ');
        }
        buf.push('}');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::term::Var;
    use crate::ast::triples::TriplesSameSubject;

    fn iri(curie: &str) -> Iri {
        Iri::from_string(curie).unwrap()
    }

    fn template(s: &str, p: &str, o: &str) -> TriplesTemplate {
        let triple = TriplesSameSubject::from_spo(iri(s), iri(p), iri(o)).unwrap();
        TriplesTemplate::from_list(vec![triple]).unwrap()
    }

    fn quad_data(s: &str, p: &str, o: &str) -> QuadData {
        QuadData {
            quads: Quads::new(vec![template(s, p, o)], Vec::new()).unwrap(),
        }
    }

    #[test]
    fn quads_require_a_template() {
        assert_eq!(
            Quads::new(Vec::new(), Vec::new()),
            Err(StructuralError::empty_list("Quads"))
        );
    }

    #[test]
    fn quads_pairing_mismatch() {
        let templates = vec![
            template("ex:a", "ex:p", "ex:b"),
            template("ex:c", "ex:q", "ex:d"),
        ];
        assert_eq!(
            Quads::new(templates, Vec::new()),
            Err(StructuralError::pairing_mismatch("Quads", 2, 0))
        );
    }

    #[test]
    fn insert_data_rendering() {
        let op = Update1::InsertData {
            data: quad_data("ex:s", "ex:p", "ex:o"),
        };
        assert_eq!(op.to_sparql(), "INSERT DATA { ex:s ex:p ex:o . }");
    }

    #[test]
    fn quads_with_graph_section() {
        let quads = Quads::new(
            vec![
                template("ex:a", "ex:p", "ex:b"),
                template("ex:c", "ex:q", "ex:d"),
            ],
            vec![QuadsNotTriples {
                graph: VarOrIri::Iri(iri("ex:g")),
                template: Some(template("ex:e", "ex:r", "ex:f")),
            }],
        )
        .unwrap();
        assert_eq!(
            quads.to_sparql(),
            "ex:a ex:p ex:b .\nGRAPH ex:g { ex:e ex:r ex:f . }\nex:c ex:q ex:d ."
        );
    }

    #[test]
    fn load_and_clear_rendering() {
        let load = Update1::Load {
            silent: true,
            source: iri("ex:data"),
            into: Some(GraphRef {
                iri: iri("ex:target"),
            }),
        };
        assert_eq!(load.to_sparql(), "LOAD SILENT ex:data INTO GRAPH ex:target");

        let clear = Update1::Clear {
            silent: false,
            target: GraphRefAll::All,
        };
        assert_eq!(clear.to_sparql(), "CLEAR ALL");
    }

    #[test]
    fn move_rendering() {
        let op = Update1::Move {
            silent: false,
            from: GraphOrDefault::Default,
            to: GraphOrDefault::Graph(iri("ex:archive")),
        };
        assert_eq!(op.to_sparql(), "MOVE DEFAULT TO ex:archive");
    }

    #[test]
    fn chained_operations_join_with_semicolons() {
        let first = Update {
            prologue: Prologue::default(),
            operation: Some(Update1::Clear {
                silent: false,
                target: GraphRefAll::Default,
            }),
            rest: Some(Box::new(Update {
                prologue: Prologue::default(),
                operation: Some(Update1::InsertData {
                    data: quad_data("ex:s", "ex:p", "ex:o"),
                }),
                rest: None,
            })),
        };
        assert_eq!(
            first.to_sparql(),
            "CLEAR DEFAULT ;\nINSERT DATA { ex:s ex:p ex:o . }"
        );
    }

    #[test]
    fn headless_chain_still_renders_tail() {
        let headless = Update {
            prologue: Prologue::default(),
            operation: None,
            rest: Some(Box::new(Update {
                prologue: Prologue::default(),
                operation: Some(Update1::Clear {
                    silent: false,
                    target: GraphRefAll::All,
                }),
                rest: None,
            })),
        };
        assert_eq!(headless.to_sparql(), "CLEAR ALL");
    }

    #[test]
    fn modify_collects_where_triples() {
        use crate::ast::pattern::{GroupGraphPattern, GroupGraphPatternSub};
        use crate::ast::triples::TriplesBlock;

        let var = |name: &str| Var::new(name).unwrap();
        let triple = TriplesSameSubjectPath::from_spo(var("s"), var("p"), var("o")).unwrap();
        let block = TriplesBlock::from_list(vec![triple]).unwrap();
        let modify = Update1::Modify(Box::new(Modify {
            with_graph: None,
            operation: ModifyOperation::DeleteInsert {
                delete: DeleteClause {
                    pattern: QuadPattern {
                        quads: Quads::new(
                            vec![template("ex:a", "ex:p", "ex:b")],
                            Vec::new(),
                        )
                        .unwrap(),
                    },
                },
                insert: None,
            },
            using_clauses: Vec::new(),
            pattern: GroupGraphPattern::Sub(
                GroupGraphPatternSub::new(vec![block], Vec::new()).unwrap(),
            ),
        }));
        assert_eq!(modify.collect_triples().len(), 1);
        assert_eq!(
            modify.to_sparql(),
            "DELETE { ex:a ex:p ex:b . }\nWHERE {\n?s ?p ?o .\n}"
        );
    }
}
