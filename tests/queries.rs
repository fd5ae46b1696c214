//! End-to-end query assembly and rendering tests.

use sparql_grammar::ast::expr::{Aggregate, BuiltInCall, CountTarget, Expression};
use sparql_grammar::ast::pattern::{
    Filter, FilterOperand, GraphPatternNotTriples, GroupGraphPattern, GroupGraphPatternSub,
    GroupOrUnionGraphPattern, OptionalGraphPattern, RelationalOperator,
};
use sparql_grammar::ast::query::{
    DatasetClause, DefaultGraphClause, DistinctReduced, OrderClause, OrderCondition,
    OrderDirection, PrefixDecl, Projection, ProjectionItem, Prologue, PrologueDecl, Query,
    QueryForm, QueryUnit, SelectClause, SelectQuery, SolutionModifier, SourceSelector, SubSelect,
    ValuesClause, WhereClause,
};
use sparql_grammar::ast::term::{GraphTerm, Iri, Var, VarOrTerm};
use sparql_grammar::ast::triples::{
    ConstructTriples, ObjectListPath, ObjectPath, GraphNodePath, PathVerb,
    PropertyListPathNotEmpty, TriplesBlock, TriplesSameSubject, TriplesSameSubjectPath, VerbPath,
};
use sparql_grammar::ast::{ConstructQuery, ConstructTemplate, PrimaryExpression};
use sparql_grammar::ast::path::Path;
use sparql_grammar::terminal::{Iriref, PnameNs};
use sparql_grammar::{CollectTriples, Render, StructuralError};

fn var(name: &str) -> Var {
    Var::new(name).unwrap()
}

fn iri(curie: &str) -> Iri {
    Iri::from_string(curie).unwrap()
}

fn spo(s: &str, p: &str, o: &str) -> TriplesSameSubjectPath {
    TriplesSameSubjectPath::from_spo(var(s), var(p), var(o)).unwrap()
}

fn group(blocks: Vec<TriplesBlock>, patterns: Vec<GraphPatternNotTriples>) -> GroupGraphPattern {
    GroupGraphPattern::Sub(GroupGraphPatternSub::new(blocks, patterns).unwrap())
}

fn select(
    clause: SelectClause,
    dataset_clauses: Vec<DatasetClause>,
    pattern: GroupGraphPattern,
    solution_modifier: SolutionModifier,
) -> QueryUnit {
    QueryUnit {
        query: Query {
            prologue: Prologue::default(),
            form: QueryForm::Select(SelectQuery {
                select_clause: clause,
                dataset_clauses,
                where_clause: WhereClause { pattern },
                solution_modifier,
            }),
            values: ValuesClause::default(),
        },
    }
}

#[test]
fn select_with_prologue_dataset_and_modifiers() {
    let block = TriplesBlock::from_list(vec![spo("person", "p", "name")]).unwrap();
    let query = QueryUnit {
        query: Query {
            prologue: Prologue {
                decls: vec![PrologueDecl::Prefix(PrefixDecl {
                    prefix: PnameNs::new("foaf:").unwrap(),
                    iri: Iriref::new("http://xmlns.com/foaf/0.1/").unwrap(),
                })],
            },
            form: QueryForm::Select(SelectQuery {
                select_clause: SelectClause {
                    distinct_or_reduced: Some(DistinctReduced::Distinct),
                    projection: Projection::from_vec(vec![ProjectionItem::Var(var("name"))])
                        .unwrap(),
                },
                dataset_clauses: vec![DatasetClause::Default(DefaultGraphClause {
                    selector: SourceSelector(Iri::full("http://example.org/graph").unwrap()),
                })],
                where_clause: WhereClause {
                    pattern: group(vec![block], Vec::new()),
                },
                solution_modifier: SolutionModifier::default()
                    .with_order_by(
                        OrderClause::from_vec(vec![OrderCondition {
                            direction: Some(OrderDirection::Desc),
                            var: var("name"),
                        }])
                        .unwrap(),
                    )
                    .with_limit(10),
            }),
            values: ValuesClause::default(),
        },
    };
    assert_eq!(
        query.to_sparql(),
        "PREFIX foaf: <http://xmlns.com/foaf/0.1/>\n\
         SELECT DISTINCT ?name\n\
         FROM <http://example.org/graph>\n\
         WHERE {\n\
         ?person ?p ?name .\n\
         }\n\
         ORDER BY DESC(?name)\n\
         LIMIT 10"
    );
}

#[test]
fn from_spo_matches_manually_built_tree() {
    let helper = TriplesSameSubjectPath::from_spo(var("s"), iri("ex:p"), var("o")).unwrap();
    let manual = TriplesSameSubjectPath::Term {
        subject: VarOrTerm::Var(var("s")),
        properties: PropertyListPathNotEmpty {
            first: (
                PathVerb::Path(VerbPath {
                    path: Path::from_iri(iri("ex:p")),
                }),
                ObjectListPath {
                    first: ObjectPath(GraphNodePath::VarOrTerm(VarOrTerm::Var(var("o")))),
                    rest: Vec::new(),
                },
            ),
            rest: Vec::new(),
        },
    };
    assert_eq!(helper, manual);
    assert_eq!(helper.to_sparql(), manual.to_sparql());
}

#[test]
fn duplicate_triple_across_optional_collects_once() {
    let inner = group(
        vec![TriplesBlock::from_list(vec![spo("s", "p", "o")]).unwrap()],
        Vec::new(),
    );
    let outer = group(
        vec![TriplesBlock::from_list(vec![spo("s", "p", "o")]).unwrap()],
        vec![GraphPatternNotTriples::Optional(OptionalGraphPattern {
            pattern: inner,
        })],
    );
    let query = select(
        SelectClause::from_vars(vec![var("s")]).unwrap(),
        Vec::new(),
        outer,
        SolutionModifier::default(),
    );
    let triples = query.collect_triples();
    assert_eq!(triples.len(), 1);
    assert!(triples.contains(&spo("s", "p", "o")));
}

#[test]
fn distinct_triples_all_collected() {
    let union = GroupOrUnionGraphPattern::from_vec(vec![
        group(
            vec![TriplesBlock::from_list(vec![spo("s", "p", "a")]).unwrap()],
            Vec::new(),
        ),
        group(
            vec![TriplesBlock::from_list(vec![spo("s", "p", "b")]).unwrap()],
            Vec::new(),
        ),
    ])
    .unwrap();
    let outer = group(
        vec![TriplesBlock::from_list(vec![spo("s", "p", "c")]).unwrap()],
        vec![GraphPatternNotTriples::GroupOrUnion(union)],
    );
    assert_eq!(outer.collect_triples().len(), 3);
}

#[test]
fn filter_in_inside_group() {
    let filter = Filter::relational(
        PrimaryExpression::Var(var("s")),
        RelationalOperator::In,
        FilterOperand::List(vec![
            PrimaryExpression::IriOrFunction(sparql_grammar::ast::IriOrFunction {
                iri: iri("ex:a"),
                args: None,
            }),
            PrimaryExpression::IriOrFunction(sparql_grammar::ast::IriOrFunction {
                iri: iri("ex:b"),
                args: None,
            }),
        ]),
    )
    .unwrap();
    let pattern = group(
        vec![TriplesBlock::from_list(vec![spo("s", "p", "o")]).unwrap()],
        vec![GraphPatternNotTriples::Filter(filter)],
    );
    assert_eq!(
        pattern.to_sparql(),
        "{\n?s ?p ?o .\nFILTER (?s IN (ex:a, ex:b))\n}"
    );
}

#[test]
fn structural_errors_on_malformed_pairing() {
    assert!(matches!(
        GroupGraphPatternSub::new(Vec::new(), Vec::new()),
        Err(StructuralError::EmptyList { .. })
    ));

    let blocks = vec![
        TriplesBlock::from_list(vec![spo("a", "p", "b")]).unwrap(),
        TriplesBlock::from_list(vec![spo("c", "q", "d")]).unwrap(),
    ];
    assert!(matches!(
        GroupGraphPatternSub::new(blocks.clone(), Vec::new()),
        Err(StructuralError::PairingMismatch {
            primary: 2,
            secondary: 0,
            ..
        })
    ));

    let single = vec![TriplesBlock::from_list(vec![spo("a", "p", "b")]).unwrap()];
    assert!(GroupGraphPatternSub::new(single, Vec::new()).is_ok());
}

#[test]
fn sub_select_inside_group() {
    let inner_block = TriplesBlock::from_list(vec![spo("s", "p", "count")]).unwrap();
    let sub = SubSelect {
        select_clause: SelectClause {
            distinct_or_reduced: None,
            projection: Projection::from_vec(vec![ProjectionItem::Alias {
                expression: Expression::from_primary(PrimaryExpression::BuiltIn(
                    BuiltInCall::Aggregate(Box::new(Aggregate::Count {
                        distinct: false,
                        target: CountTarget::Wildcard,
                    })),
                )),
                alias: var("n"),
            }])
            .unwrap(),
        },
        where_clause: WhereClause {
            pattern: group(vec![inner_block], Vec::new()),
        },
        solution_modifier: SolutionModifier::default(),
        values_clause: ValuesClause::default(),
    };
    let outer = GroupGraphPattern::SubSelect(Box::new(sub));
    assert_eq!(
        outer.to_sparql(),
        "{\nSELECT (COUNT(*) AS ?n)\nWHERE {\n?s ?p ?count .\n}\n}"
    );
    assert_eq!(outer.collect_triples().len(), 1);
}

#[test]
fn construct_query_with_merged_template() {
    let t1 = TriplesSameSubject::from_spo(var("s"), iri("ex:p"), var("o")).unwrap();
    let t2 = TriplesSameSubject::from_spo(var("s"), iri("ex:q"), var("o2")).unwrap();
    let left = ConstructTriples::from_list(vec![t1]).unwrap();
    let right = ConstructTriples::from_list(vec![t2]).unwrap();
    let merged = ConstructTriples::merge(vec![left, right]).unwrap();

    let where_block = TriplesBlock::from_list(vec![spo("s", "p", "o"), spo("s", "q", "o2")])
        .unwrap();
    let query = ConstructQuery {
        template: ConstructTemplate {
            triples: Some(merged),
        },
        dataset_clauses: Vec::new(),
        where_clause: WhereClause {
            pattern: group(vec![where_block], Vec::new()),
        },
        solution_modifier: SolutionModifier::default(),
    };
    assert_eq!(
        query.to_sparql(),
        "CONSTRUCT {\n\
         ?s ex:p ?o .\n\
         ?s ex:q ?o2\n\
         }\n\
         WHERE {\n\
         ?s ?p ?o .\n\
         ?s ?q ?o2 .\n\
         }"
    );
}

#[test]
fn values_clause_at_query_level() {
    use sparql_grammar::ast::pattern::{DataBlock, DataBlockValue, InlineDataOneVar};

    let block = TriplesBlock::from_list(vec![spo("s", "p", "o")]).unwrap();
    let query = QueryUnit {
        query: Query {
            prologue: Prologue::default(),
            form: QueryForm::Select(SelectQuery {
                select_clause: SelectClause::from_vars(vec![var("s")]).unwrap(),
                dataset_clauses: Vec::new(),
                where_clause: WhereClause {
                    pattern: group(vec![block], Vec::new()),
                },
                solution_modifier: SolutionModifier::default(),
            }),
            values: ValuesClause {
                data: Some(DataBlock::OneVar(InlineDataOneVar {
                    variable: var("s"),
                    values: vec![DataBlockValue::Iri(iri("ex:a")), DataBlockValue::Undef],
                })),
            },
        },
    };
    assert_eq!(
        query.to_sparql(),
        "SELECT ?s\nWHERE {\n?s ?p ?o .\n}\nVALUES ?s { ex:a UNDEF }"
    );
}

#[test]
fn iri_subject_and_object_in_from_spo() {
    let triple =
        TriplesSameSubjectPath::from_spo(iri("ex:alice"), iri("ex:knows"), iri("ex:bob"))
            .unwrap();
    assert_eq!(triple.to_sparql(), "ex:alice ex:knows ex:bob");

    match &triple {
        TriplesSameSubjectPath::Term { subject, .. } => {
            assert_eq!(
                subject,
                &VarOrTerm::Term(GraphTerm::Iri(iri("ex:alice")))
            );
        }
        TriplesSameSubjectPath::Node { .. } => panic!("expected a term subject"),
    }
}
