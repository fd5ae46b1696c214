//! # SPARQL Grammar
//!
//! A typed tree for the SPARQL 1.1 Query and Update grammar with:
//! - One immutable node type per grammar production, built bottom-up
//! - Canonical text rendering via [`Render`]
//! - Deduplicating triple collection via [`CollectTriples`]
//! - Construction-time checks: terminals validate their lexical form,
//!   node constructors validate structural invariants
//!
//! This crate builds and serializes trees; it does not parse SPARQL
//! text or evaluate queries.
//!
//! ## Quick Start
//!
//! ```
//! use sparql_grammar::ast::{
//!     GroupGraphPattern, GroupGraphPatternSub, Query, QueryForm, QueryUnit, SelectClause,
//!     SelectQuery, TriplesBlock, TriplesSameSubjectPath, Var, WhereClause,
//! };
//! use sparql_grammar::ast::query::{Prologue, SolutionModifier, ValuesClause};
//! use sparql_grammar::Render;
//!
//! let var = |name: &str| Var::new(name).unwrap();
//! let triple = TriplesSameSubjectPath::from_spo(var("s"), var("p"), var("o")).unwrap();
//! let block = TriplesBlock::from_list(vec![triple]).unwrap();
//! let query = QueryUnit {
//!     query: Query {
//!         prologue: Prologue::default(),
//!         form: QueryForm::Select(SelectQuery {
//!             select_clause: SelectClause::from_vars(vec![var("s")]).unwrap(),
//!             dataset_clauses: Vec::new(),
//!             where_clause: WhereClause {
//!                 pattern: GroupGraphPattern::Sub(
//!                     GroupGraphPatternSub::new(vec![block], Vec::new()).unwrap(),
//!                 ),
//!             },
//!             solution_modifier: SolutionModifier::default(),
//!         }),
//!         values: ValuesClause::default(),
//!     },
//! };
//! assert_eq!(query.to_sparql(), "SELECT ?s\nWHERE {\n?s ?p ?o .\n}");
//! ```

pub mod ast;
pub mod collect;
pub mod error;
pub mod render;
pub mod terminal;

// Re-exports
pub use collect::CollectTriples;
pub use error::{LexicalError, StructuralError};
pub use render::Render;
