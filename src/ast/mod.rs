//! The typed grammar tree.
//!
//! One type per grammar production, grouped by area: terms and
//! literals, property paths, triple blocks, expressions, graph
//! patterns, query forms and update operations. The commonly used
//! types are re-exported here.

pub mod expr;
pub mod path;
pub mod pattern;
pub mod query;
pub mod term;
pub mod triples;
pub mod update;

pub use expr::{
    Aggregate, ArgList, BrackettedExpression, BuiltInCall, CountTarget, Expression,
    ExpressionList, FunctionCall, IriOrFunction, PrimaryExpression,
};
pub use path::{Path, PathAlternative, PathMod, PathPrimary, PathSequence};
pub use pattern::{
    Bind, Constraint, DataBlock, DataBlockValue, Filter, FilterOperand, GraphGraphPattern,
    GraphPatternNotTriples, GroupGraphPattern, GroupGraphPatternSub, GroupOrUnionGraphPattern,
    InlineData, InlineDataFull, InlineDataOneVar, MinusGraphPattern, OptionalGraphPattern,
    RelationalOperator, ServiceGraphPattern,
};
pub use query::{
    AskQuery, BaseDecl, ConstructQuery, DatasetClause, DescribeQuery, DescribeTarget,
    DistinctReduced,
    GroupClause, GroupCondition, HavingClause, HavingCondition, LimitClause, LimitOffsetClauses,
    OffsetClause, OrderClause, OrderCondition, OrderDirection, PrefixDecl, Projection,
    ProjectionItem, Prologue, PrologueDecl, Query, QueryForm, QueryUnit, SelectClause,
    SelectQuery, SolutionModifier, SubSelect, ValuesClause, WhereClause,
};
pub use term::{
    BlankNode, BooleanLiteral, GraphTerm, Iri, LiteralSuffix, NumericLiteral, PrefixedName,
    RdfLiteral, StringLiteral, Var, VarOrIri, VarOrTerm,
};
pub use triples::{
    Collection, CollectionPath, ConstructTemplate, ConstructTriples, GraphNode, GraphNodePath,
    Object, ObjectList, ObjectListPath, ObjectPath, PathVerb, PropertyList,
    PropertyListNotEmpty, PropertyListPath, PropertyListPathNotEmpty, SpoTerm, TriplesBlock,
    TriplesNode, TriplesNodePath, TriplesSameSubject, TriplesSameSubjectPath, TriplesTemplate,
    Verb, VerbPath, VerbSimple,
};
pub use update::{
    DeleteClause, GraphOrDefault, GraphRef, GraphRefAll, InsertClause, Modify, ModifyOperation,
    QuadData, QuadPattern, Quads, QuadsNotTriples, Update, Update1, UsingClause,
};
