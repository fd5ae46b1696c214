//! Graph pattern productions.
//!
//! A `WHERE` body is a [`GroupGraphPattern`], either a sub-select or a
//! [`GroupGraphPatternSub`] interleaving triple blocks with the
//! non-triple patterns (`OPTIONAL`, `FILTER`, `BIND`, `VALUES`, ...).
//! The interleaving cardinality is checked at construction, so a group
//! that renders is always well formed.

use crate::ast::expr::{
    BrackettedExpression, BuiltInCall, CompareOp, Expression, FunctionCall, NumericExpression,
    PrimaryExpression, RelationalRhs,
};
use crate::ast::query::SubSelect;
use crate::ast::term::{BooleanLiteral, Iri, NumericLiteral, RdfLiteral, Var, VarOrIri};
use crate::ast::triples::{TriplesBlock, TriplesSameSubjectPath};
use crate::collect::CollectTriples;
use crate::error::StructuralError;
use crate::render::{render_joined, Render};
use std::collections::HashSet;

/// `[53] GroupGraphPattern ::= '{' ( SubSelect | GroupGraphPatternSub ) '}'`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GroupGraphPattern {
    SubSelect(Box<SubSelect>),
    Sub(GroupGraphPatternSub),
}

impl Render for GroupGraphPattern {
    fn render(&self, buf: &mut String) {
        buf.push_str("{\n");
        match self {
            Self::SubSelect(sub) => sub.render(buf),
            Self::Sub(sub) => sub.render(buf),
        }
        buf.push_str("\n}");
    }
}

impl CollectTriples for GroupGraphPattern {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        match self {
            Self::SubSelect(sub) => sub.collect_into(out),
            Self::Sub(sub) => sub.collect_into(out),
        }
    }
}

/// `[54] GroupGraphPatternSub ::= TriplesBlock? ( GraphPatternNotTriples '.'? TriplesBlock? )*`
///
/// Represented as the list of triple blocks and the list of non-triple
/// patterns separating them. The fields are private: [`Self::new`]
/// rejects a shape the grammar cannot produce, and the render order is
/// block, pattern, block, pattern, ...
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GroupGraphPatternSub {
    triples_blocks: Vec<TriplesBlock>,
    patterns: Vec<GraphPatternNotTriples>,
}

impl GroupGraphPatternSub {
    /// At least one triples block is required; with `N > 1` blocks there
    /// must be at least `N - 1` separating patterns. One block with no
    /// patterns is the common case and is legal.
    pub fn new(
        triples_blocks: Vec<TriplesBlock>,
        patterns: Vec<GraphPatternNotTriples>,
    ) -> Result<Self, StructuralError> {
        if triples_blocks.is_empty() {
            return Err(StructuralError::empty_list("GroupGraphPatternSub"));
        }
        if triples_blocks.len() > 1 && patterns.len() < triples_blocks.len() - 1 {
            return Err(StructuralError::pairing_mismatch(
                "GroupGraphPatternSub",
                triples_blocks.len(),
                patterns.len(),
            ));
        }
        Ok(Self {
            triples_blocks,
            patterns,
        })
    }

    pub fn triples_blocks(&self) -> &[TriplesBlock] {
        &self.triples_blocks
    }

    pub fn patterns(&self) -> &[GraphPatternNotTriples] {
        &self.patterns
    }
}

impl Render for GroupGraphPatternSub {
    fn render(&self, buf: &mut String) {
        self.triples_blocks[0].render(buf);
        for (i, pattern) in self.patterns.iter().enumerate() {
            buf.push('\n');
            pattern.render(buf);
            if let Some(block) = self.triples_blocks.get(i + 1) {
                buf.push('\n');
                block.render(buf);
            }
        }
    }
}

impl CollectTriples for GroupGraphPatternSub {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        self.triples_blocks.collect_into(out);
        self.patterns.collect_into(out);
    }
}

/// `[56] GraphPatternNotTriples`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GraphPatternNotTriples {
    GroupOrUnion(GroupOrUnionGraphPattern),
    Optional(OptionalGraphPattern),
    Minus(MinusGraphPattern),
    Graph(GraphGraphPattern),
    Service(ServiceGraphPattern),
    Filter(Filter),
    Bind(Bind),
    InlineData(InlineData),
}

impl Render for GraphPatternNotTriples {
    fn render(&self, buf: &mut String) {
        match self {
            Self::GroupOrUnion(p) => p.render(buf),
            Self::Optional(p) => p.render(buf),
            Self::Minus(p) => p.render(buf),
            Self::Graph(p) => p.render(buf),
            Self::Service(p) => p.render(buf),
            Self::Filter(p) => p.render(buf),
            Self::Bind(p) => p.render(buf),
            Self::InlineData(p) => p.render(buf),
        }
    }
}

impl CollectTriples for GraphPatternNotTriples {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        match self {
            Self::GroupOrUnion(p) => p.collect_into(out),
            Self::Optional(p) => p.pattern.collect_into(out),
            Self::Minus(p) => p.pattern.collect_into(out),
            Self::Graph(p) => p.pattern.collect_into(out),
            Self::Service(p) => p.pattern.collect_into(out),
            Self::Filter(p) => p.collect_into(out),
            Self::Bind(p) => p.expression.collect_into(out),
            Self::InlineData(_) => {}
        }
    }
}

/// `[57] OptionalGraphPattern ::= 'OPTIONAL' GroupGraphPattern`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OptionalGraphPattern {
    pub pattern: GroupGraphPattern,
}

impl Render for OptionalGraphPattern {
    fn render(&self, buf: &mut String) {
        buf.push_str("OPTIONAL ");
        self.pattern.render(buf);
    }
}

/// `[58] GraphGraphPattern ::= 'GRAPH' VarOrIri GroupGraphPattern`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GraphGraphPattern {
    pub graph: VarOrIri,
    pub pattern: GroupGraphPattern,
}

impl Render for GraphGraphPattern {
    fn render(&self, buf: &mut String) {
        buf.push_str("GRAPH ");
        self.graph.render(buf);
        buf.push(' ');
        self.pattern.render(buf);
    }
}

/// `[59] ServiceGraphPattern ::= 'SERVICE' 'SILENT'? VarOrIri GroupGraphPattern`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ServiceGraphPattern {
    pub silent: bool,
    pub graph: VarOrIri,
    pub pattern: GroupGraphPattern,
}

impl Render for ServiceGraphPattern {
    fn render(&self, buf: &mut String) {
        buf.push_str("SERVICE ");
        if self.silent {
            buf.push_str("SILENT ");
        }
        self.graph.render(buf);
        buf.push(' ');
        self.pattern.render(buf);
    }
}

/// `[66] MinusGraphPattern ::= 'MINUS' GroupGraphPattern`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MinusGraphPattern {
    pub pattern: GroupGraphPattern,
}

impl Render for MinusGraphPattern {
    fn render(&self, buf: &mut String) {
        buf.push_str("MINUS ");
        self.pattern.render(buf);
    }
}

/// `[67] GroupOrUnionGraphPattern ::= GroupGraphPattern ( 'UNION' GroupGraphPattern )*`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GroupOrUnionGraphPattern {
    pub first: GroupGraphPattern,
    pub rest: Vec<GroupGraphPattern>,
}

impl GroupOrUnionGraphPattern {
    pub fn from_vec(mut groups: Vec<GroupGraphPattern>) -> Result<Self, StructuralError> {
        if groups.is_empty() {
            return Err(StructuralError::empty_list("GroupOrUnionGraphPattern"));
        }
        let first = groups.remove(0);
        Ok(Self { first, rest: groups })
    }
}

impl Render for GroupOrUnionGraphPattern {
    fn render(&self, buf: &mut String) {
        self.first.render(buf);
        for group in &self.rest {
            buf.push_str("\nUNION\n");
            group.render(buf);
        }
    }
}

impl CollectTriples for GroupOrUnionGraphPattern {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        self.first.collect_into(out);
        self.rest.collect_into(out);
    }
}

/// Operator accepted by [`Filter::relational`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelationalOperator {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    In,
    NotIn,
}

impl RelationalOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
        }
    }

    fn compare_op(self) -> Option<CompareOp> {
        match self {
            Self::Eq => Some(CompareOp::Eq),
            Self::Ne => Some(CompareOp::Ne),
            Self::Lt => Some(CompareOp::Lt),
            Self::Gt => Some(CompareOp::Gt),
            Self::Le => Some(CompareOp::Le),
            Self::Ge => Some(CompareOp::Ge),
            Self::In | Self::NotIn => None,
        }
    }
}

/// Right-hand operand handed to [`Filter::relational`]. Comparison
/// operators take `Single`; the membership tests take `List`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FilterOperand {
    Single(PrimaryExpression),
    List(Vec<PrimaryExpression>),
}

/// `[68] Filter ::= 'FILTER' Constraint`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Filter {
    pub constraint: Constraint,
}

impl Filter {
    /// Build `FILTER (focus OP operand)`. The operand shape must match
    /// the operator: `IN` and `NOT IN` take a list, everything else a
    /// single expression.
    pub fn relational(
        focus: PrimaryExpression,
        operator: RelationalOperator,
        operand: FilterOperand,
    ) -> Result<Self, StructuralError> {
        let expression = match (operator.compare_op(), operand) {
            (Some(op), FilterOperand::Single(rhs)) => {
                let mut expr = Expression::from_primary(focus);
                expr.conditional_or.first.first.0.rhs =
                    Some(RelationalRhs::Compare(op, NumericExpression::from_primary(rhs)));
                expr
            }
            (None, FilterOperand::List(members)) => Expression::in_list(
                focus,
                matches!(operator, RelationalOperator::NotIn),
                members,
            ),
            (Some(_), FilterOperand::List(_)) => {
                return Err(StructuralError::operand_shape(
                    "Filter::relational",
                    operator.as_str(),
                    "a single expression",
                ))
            }
            (None, FilterOperand::Single(_)) => {
                return Err(StructuralError::operand_shape(
                    "Filter::relational",
                    operator.as_str(),
                    "an expression list",
                ))
            }
        };
        Ok(Self {
            constraint: Constraint::Bracketted(BrackettedExpression(Box::new(expression))),
        })
    }
}

impl Render for Filter {
    fn render(&self, buf: &mut String) {
        buf.push_str("FILTER ");
        self.constraint.render(buf);
    }
}

impl CollectTriples for Filter {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        self.constraint.collect_into(out);
    }
}

/// `[69] Constraint ::= BrackettedExpression | BuiltInCall | FunctionCall`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Constraint {
    Bracketted(BrackettedExpression),
    BuiltIn(Box<BuiltInCall>),
    Function(FunctionCall),
}

impl Render for Constraint {
    fn render(&self, buf: &mut String) {
        match self {
            Self::Bracketted(e) => e.render(buf),
            Self::BuiltIn(call) => call.render(buf),
            Self::Function(f) => f.render(buf),
        }
    }
}

impl CollectTriples for Constraint {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        match self {
            Self::Bracketted(e) => e.collect_into(out),
            Self::BuiltIn(call) => call.collect_into(out),
            Self::Function(f) => f.collect_into(out),
        }
    }
}

/// `[60] Bind ::= 'BIND' '(' Expression 'AS' Var ')'`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Bind {
    pub expression: Expression,
    pub var: Var,
}

impl Render for Bind {
    fn render(&self, buf: &mut String) {
        buf.push_str("BIND(");
        self.expression.render(buf);
        buf.push_str(" AS ");
        self.var.render(buf);
        buf.push(')');
    }
}

/// `[61] InlineData ::= 'VALUES' DataBlock`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InlineData {
    pub data: DataBlock,
}

impl Render for InlineData {
    fn render(&self, buf: &mut String) {
        buf.push_str("VALUES ");
        self.data.render(buf);
    }
}

/// `[62] DataBlock ::= InlineDataOneVar | InlineDataFull`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DataBlock {
    OneVar(InlineDataOneVar),
    Full(InlineDataFull),
}

impl Render for DataBlock {
    fn render(&self, buf: &mut String) {
        match self {
            Self::OneVar(d) => d.render(buf),
            Self::Full(d) => d.render(buf),
        }
    }
}

/// `[63] InlineDataOneVar ::= Var '{' DataBlockValue* '}'`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InlineDataOneVar {
    pub variable: Var,
    pub values: Vec<DataBlockValue>,
}

impl Render for InlineDataOneVar {
    fn render(&self, buf: &mut String) {
        self.variable.render(buf);
        buf.push_str(" { ");
        render_joined(&self.values, " ", buf);
        buf.push_str(" }");
    }
}

/// `[64] InlineDataFull ::= ( NIL | '(' Var* ')' ) '{' ( '(' DataBlockValue* ')' | NIL )* '}'`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InlineDataFull {
    pub vars: Vec<Var>,
    pub rows: Vec<Vec<DataBlockValue>>,
}

impl Render for InlineDataFull {
    fn render(&self, buf: &mut String) {
        buf.push('(');
        render_joined(&self.vars, " ", buf);
        buf.push_str(") {\n");
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                buf.push('\n');
            }
            buf.push('(');
            render_joined(row, " ", buf);
            buf.push(')');
        }
        buf.push_str("\n}");
    }
}

/// `[65] DataBlockValue ::= iri | RDFLiteral | NumericLiteral | BooleanLiteral | 'UNDEF'`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DataBlockValue {
    Iri(Iri),
    Literal(RdfLiteral),
    Numeric(NumericLiteral),
    Boolean(BooleanLiteral),
    Undef,
}

impl Render for DataBlockValue {
    fn render(&self, buf: &mut String) {
        match self {
            Self::Iri(iri) => iri.render(buf),
            Self::Literal(lit) => lit.render(buf),
            Self::Numeric(num) => num.render(buf),
            Self::Boolean(b) => b.render(buf),
            Self::Undef => buf.push_str("UNDEF"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Var {
        Var::new(name).unwrap()
    }

    fn triple(s: &str, p: &str, o: &str) -> TriplesSameSubjectPath {
        TriplesSameSubjectPath::from_spo(var(s), var(p), var(o)).unwrap()
    }

    fn block(s: &str, p: &str, o: &str) -> TriplesBlock {
        TriplesBlock::from_list(vec![triple(s, p, o)]).unwrap()
    }

    #[test]
    fn group_requires_a_triples_block() {
        assert_eq!(
            GroupGraphPatternSub::new(Vec::new(), Vec::new()),
            Err(StructuralError::empty_list("GroupGraphPatternSub"))
        );
    }

    #[test]
    fn group_pairing_mismatch() {
        let blocks = vec![block("a", "p", "b"), block("c", "q", "d"), block("e", "r", "f")];
        let patterns = vec![GraphPatternNotTriples::Optional(OptionalGraphPattern {
            pattern: GroupGraphPattern::Sub(
                GroupGraphPatternSub::new(vec![block("x", "y", "z")], Vec::new()).unwrap(),
            ),
        })];
        assert_eq!(
            GroupGraphPatternSub::new(blocks, patterns),
            Err(StructuralError::pairing_mismatch("GroupGraphPatternSub", 3, 1))
        );
    }

    #[test]
    fn single_block_no_patterns_is_legal() {
        let sub = GroupGraphPatternSub::new(vec![block("s", "p", "o")], Vec::new()).unwrap();
        assert_eq!(sub.to_sparql(), "?s ?p ?o .");
    }

    #[test]
    fn optional_renders_after_block() {
        let inner = GroupGraphPattern::Sub(
            GroupGraphPatternSub::new(vec![block("s", "p", "name")], Vec::new()).unwrap(),
        );
        let sub = GroupGraphPatternSub::new(
            vec![block("s", "p", "o")],
            vec![GraphPatternNotTriples::Optional(OptionalGraphPattern {
                pattern: inner,
            })],
        )
        .unwrap();
        assert_eq!(
            sub.to_sparql(),
            "?s ?p ?o .\nOPTIONAL {\n?s ?p ?name .\n}"
        );
    }

    #[test]
    fn duplicate_triple_in_optional_collects_once() {
        let inner = GroupGraphPattern::Sub(
            GroupGraphPatternSub::new(vec![block("s", "p", "o")], Vec::new()).unwrap(),
        );
        let sub = GroupGraphPatternSub::new(
            vec![block("s", "p", "o")],
            vec![GraphPatternNotTriples::Optional(OptionalGraphPattern {
                pattern: inner,
            })],
        )
        .unwrap();
        assert_eq!(sub.collect_triples().len(), 1);
    }

    #[test]
    fn filter_in_list() {
        let filter = Filter::relational(
            PrimaryExpression::Var(var("s")),
            RelationalOperator::In,
            FilterOperand::List(vec![
                PrimaryExpression::Var(var("a")),
                PrimaryExpression::Var(var("b")),
            ]),
        )
        .unwrap();
        assert_eq!(filter.to_sparql(), "FILTER (?s IN (?a, ?b))");
    }

    #[test]
    fn filter_in_rejects_single_operand() {
        let err = Filter::relational(
            PrimaryExpression::Var(var("s")),
            RelationalOperator::In,
            FilterOperand::Single(PrimaryExpression::Var(var("a"))),
        )
        .unwrap_err();
        assert_eq!(
            err,
            StructuralError::operand_shape("Filter::relational", "IN", "an expression list")
        );
    }

    #[test]
    fn filter_compare_rejects_list_operand() {
        let err = Filter::relational(
            PrimaryExpression::Var(var("s")),
            RelationalOperator::Eq,
            FilterOperand::List(vec![PrimaryExpression::Var(var("a"))]),
        )
        .unwrap_err();
        assert_eq!(
            err,
            StructuralError::operand_shape("Filter::relational", "=", "a single expression")
        );
    }

    #[test]
    fn union_of_two_groups() {
        let left = GroupGraphPattern::Sub(
            GroupGraphPatternSub::new(vec![block("s", "p", "a")], Vec::new()).unwrap(),
        );
        let right = GroupGraphPattern::Sub(
            GroupGraphPatternSub::new(vec![block("s", "p", "b")], Vec::new()).unwrap(),
        );
        let union = GroupOrUnionGraphPattern::from_vec(vec![left, right]).unwrap();
        assert_eq!(
            union.to_sparql(),
            "{\n?s ?p ?a .\n}\nUNION\n{\n?s ?p ?b .\n}"
        );
    }

    #[test]
    fn inline_data_rendering() {
        let one = InlineDataOneVar {
            variable: var("x"),
            values: vec![
                DataBlockValue::Numeric(NumericLiteral::integer(1)),
                DataBlockValue::Undef,
            ],
        };
        assert_eq!(one.to_sparql(), "?x { 1 UNDEF }");

        let full = InlineDataFull {
            vars: vec![var("x"), var("y")],
            rows: vec![
                vec![
                    DataBlockValue::Numeric(NumericLiteral::integer(1)),
                    DataBlockValue::Numeric(NumericLiteral::integer(2)),
                ],
                vec![DataBlockValue::Undef, DataBlockValue::Undef],
            ],
        };
        assert_eq!(full.to_sparql(), "(?x ?y) {\n(1 2)\n(UNDEF UNDEF)\n}");
    }
}
