//! Query-level productions: the four query forms, prologue, dataset
//! clauses, solution modifiers and sub-selects.
//!
//! Solution modifier clauses render in the order `GROUP BY`, `HAVING`,
//! `ORDER BY`, `LIMIT`/`OFFSET`, which is the order the grammar admits.

use crate::ast::expr::{BuiltInCall, Expression, FunctionCall};
use crate::ast::pattern::{Constraint, DataBlock, GroupGraphPattern};
use crate::ast::term::{Iri, Var, VarOrIri};
use crate::ast::triples::{ConstructTemplate, TriplesSameSubjectPath};
use crate::collect::CollectTriples;
use crate::error::StructuralError;
use crate::render::Render;
use crate::terminal::{Iriref, PnameNs};
use std::collections::HashSet;

/// `[1] QueryUnit ::= Query`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QueryUnit {
    pub query: Query,
}

impl Render for QueryUnit {
    fn render(&self, buf: &mut String) {
        self.query.render(buf);
    }
}

impl CollectTriples for QueryUnit {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        self.query.collect_into(out);
    }
}

/// `[2] Query ::= Prologue ( SelectQuery | ConstructQuery | DescribeQuery | AskQuery ) ValuesClause`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Query {
    pub prologue: Prologue,
    pub form: QueryForm,
    pub values: ValuesClause,
}

impl Render for Query {
    fn render(&self, buf: &mut String) {
        if !self.prologue.decls.is_empty() {
            self.prologue.render(buf);
            buf.push('\n');
        }
        self.form.render(buf);
        self.values.render(buf);
    }
}

impl CollectTriples for Query {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        self.form.collect_into(out);
    }
}

/// The four query forms.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum QueryForm {
    Select(SelectQuery),
    Construct(ConstructQuery),
    Describe(DescribeQuery),
    Ask(AskQuery),
}

impl Render for QueryForm {
    fn render(&self, buf: &mut String) {
        match self {
            Self::Select(q) => q.render(buf),
            Self::Construct(q) => q.render(buf),
            Self::Describe(q) => q.render(buf),
            Self::Ask(q) => q.render(buf),
        }
    }
}

impl CollectTriples for QueryForm {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        match self {
            Self::Select(q) => q.collect_into(out),
            Self::Construct(q) => q.collect_into(out),
            Self::Describe(q) => q.collect_into(out),
            Self::Ask(q) => q.collect_into(out),
        }
    }
}

/// `[4] Prologue ::= ( BaseDecl | PrefixDecl )*`
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Prologue {
    pub decls: Vec<PrologueDecl>,
}

impl Render for Prologue {
    fn render(&self, buf: &mut String) {
        for (i, decl) in self.decls.iter().enumerate() {
            if i > 0 {
                buf.push('\n');
            }
            decl.render(buf);
        }
    }
}

/// `BaseDecl | PrefixDecl`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrologueDecl {
    Base(BaseDecl),
    Prefix(PrefixDecl),
}

impl Render for PrologueDecl {
    fn render(&self, buf: &mut String) {
        match self {
            Self::Base(d) => d.render(buf),
            Self::Prefix(d) => d.render(buf),
        }
    }
}

/// `[5] BaseDecl ::= 'BASE' IRIREF`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BaseDecl {
    pub iri: Iriref,
}

impl Render for BaseDecl {
    fn render(&self, buf: &mut String) {
        buf.push_str("BASE ");
        self.iri.render(buf);
    }
}

/// `[6] PrefixDecl ::= 'PREFIX' PNAME_NS IRIREF`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PrefixDecl {
    pub prefix: PnameNs,
    pub iri: Iriref,
}

impl Render for PrefixDecl {
    fn render(&self, buf: &mut String) {
        buf.push_str("PREFIX ");
        self.prefix.render(buf);
        buf.push(' ');
        self.iri.render(buf);
    }
}

/// `[7] SelectQuery ::= SelectClause DatasetClause* WhereClause SolutionModifier`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SelectQuery {
    pub select_clause: SelectClause,
    pub dataset_clauses: Vec<DatasetClause>,
    pub where_clause: WhereClause,
    pub solution_modifier: SolutionModifier,
}

impl Render for SelectQuery {
    fn render(&self, buf: &mut String) {
        self.select_clause.render(buf);
        for clause in &self.dataset_clauses {
            clause.render(buf);
        }
        self.where_clause.render(buf);
        self.solution_modifier.render(buf);
    }
}

impl CollectTriples for SelectQuery {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        self.where_clause.collect_into(out);
        self.solution_modifier.collect_into(out);
    }
}

/// `[8] SubSelect ::= SelectClause WhereClause SolutionModifier ValuesClause`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubSelect {
    pub select_clause: SelectClause,
    pub where_clause: WhereClause,
    pub solution_modifier: SolutionModifier,
    pub values_clause: ValuesClause,
}

impl Render for SubSelect {
    fn render(&self, buf: &mut String) {
        self.select_clause.render(buf);
        self.where_clause.render(buf);
        self.solution_modifier.render(buf);
        self.values_clause.render(buf);
    }
}

impl CollectTriples for SubSelect {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        self.where_clause.collect_into(out);
        self.solution_modifier.collect_into(out);
    }
}

/// `DISTINCT` or `REDUCED` on a select clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DistinctReduced {
    Distinct,
    Reduced,
}

/// What a select clause projects.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Projection {
    Wildcard,
    Items {
        first: ProjectionItem,
        rest: Vec<ProjectionItem>,
    },
}

impl Projection {
    pub fn from_vec(mut items: Vec<ProjectionItem>) -> Result<Self, StructuralError> {
        if items.is_empty() {
            return Err(StructuralError::empty_list("Projection"));
        }
        let first = items.remove(0);
        Ok(Self::Items { first, rest: items })
    }
}

/// A projected variable or `(expression AS ?alias)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ProjectionItem {
    Var(Var),
    Alias { expression: Expression, alias: Var },
}

impl Render for ProjectionItem {
    fn render(&self, buf: &mut String) {
        match self {
            Self::Var(v) => v.render(buf),
            Self::Alias { expression, alias } => {
                buf.push('(');
                expression.render(buf);
                buf.push_str(" AS ");
                alias.render(buf);
                buf.push(')');
            }
        }
    }
}

/// `[9] SelectClause ::= 'SELECT' ( 'DISTINCT' | 'REDUCED' )? ( ( Var | ( '(' Expression 'AS' Var ')' ) )+ | '*' )`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SelectClause {
    pub distinct_or_reduced: Option<DistinctReduced>,
    pub projection: Projection,
}

impl SelectClause {
    /// Project a plain list of variables.
    pub fn from_vars(vars: Vec<Var>) -> Result<Self, StructuralError> {
        Ok(Self {
            distinct_or_reduced: None,
            projection: Projection::from_vec(
                vars.into_iter().map(ProjectionItem::Var).collect(),
            )?,
        })
    }
}

impl Render for SelectClause {
    fn render(&self, buf: &mut String) {
        buf.push_str("SELECT");
        match self.distinct_or_reduced {
            Some(DistinctReduced::Distinct) => buf.push_str(" DISTINCT"),
            Some(DistinctReduced::Reduced) => buf.push_str(" REDUCED"),
            None => {}
        }
        match &self.projection {
            Projection::Wildcard => buf.push_str(" *"),
            Projection::Items { first, rest } => {
                buf.push(' ');
                first.render(buf);
                for item in rest {
                    buf.push(' ');
                    item.render(buf);
                }
            }
        }
    }
}

/// `[10] ConstructQuery`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConstructQuery {
    pub template: ConstructTemplate,
    pub dataset_clauses: Vec<DatasetClause>,
    pub where_clause: WhereClause,
    pub solution_modifier: SolutionModifier,
}

impl Render for ConstructQuery {
    fn render(&self, buf: &mut String) {
        buf.push_str("CONSTRUCT ");
        self.template.render(buf);
        for clause in &self.dataset_clauses {
            clause.render(buf);
        }
        self.where_clause.render(buf);
        self.solution_modifier.render(buf);
    }
}

impl CollectTriples for ConstructQuery {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        self.where_clause.collect_into(out);
        self.solution_modifier.collect_into(out);
    }
}

/// Target of a `DESCRIBE`: `*` or one or more resources.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DescribeTarget {
    Wildcard,
    Resources {
        first: VarOrIri,
        rest: Vec<VarOrIri>,
    },
}

impl DescribeTarget {
    pub fn from_vec(mut resources: Vec<VarOrIri>) -> Result<Self, StructuralError> {
        if resources.is_empty() {
            return Err(StructuralError::empty_list("DescribeTarget"));
        }
        let first = resources.remove(0);
        Ok(Self::Resources {
            first,
            rest: resources,
        })
    }
}

/// `[11] DescribeQuery ::= 'DESCRIBE' ( VarOrIri+ | '*' ) DatasetClause* WhereClause? SolutionModifier`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DescribeQuery {
    pub target: DescribeTarget,
    pub dataset_clauses: Vec<DatasetClause>,
    pub where_clause: Option<WhereClause>,
    pub solution_modifier: SolutionModifier,
}

impl Render for DescribeQuery {
    fn render(&self, buf: &mut String) {
        buf.push_str("DESCRIBE");
        match &self.target {
            DescribeTarget::Wildcard => buf.push_str(" *"),
            DescribeTarget::Resources { first, rest } => {
                buf.push(' ');
                first.render(buf);
                for resource in rest {
                    buf.push(' ');
                    resource.render(buf);
                }
            }
        }
        for clause in &self.dataset_clauses {
            clause.render(buf);
        }
        if let Some(where_clause) = &self.where_clause {
            where_clause.render(buf);
        }
        self.solution_modifier.render(buf);
    }
}

impl CollectTriples for DescribeQuery {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        self.where_clause.collect_into(out);
        self.solution_modifier.collect_into(out);
    }
}

/// `[12] AskQuery ::= 'ASK' DatasetClause* WhereClause SolutionModifier`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AskQuery {
    pub dataset_clauses: Vec<DatasetClause>,
    pub where_clause: WhereClause,
    pub solution_modifier: SolutionModifier,
}

impl Render for AskQuery {
    fn render(&self, buf: &mut String) {
        buf.push_str("ASK");
        for clause in &self.dataset_clauses {
            clause.render(buf);
        }
        self.where_clause.render(buf);
        self.solution_modifier.render(buf);
    }
}

impl CollectTriples for AskQuery {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        self.where_clause.collect_into(out);
        self.solution_modifier.collect_into(out);
    }
}

/// `[13] DatasetClause ::= 'FROM' ( DefaultGraphClause | NamedGraphClause )`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DatasetClause {
    Default(DefaultGraphClause),
    Named(NamedGraphClause),
}

impl Render for DatasetClause {
    fn render(&self, buf: &mut String) {
        buf.push_str("\nFROM ");
        match self {
            Self::Default(c) => c.render(buf),
            Self::Named(c) => c.render(buf),
        }
    }
}

/// `[14] DefaultGraphClause ::= SourceSelector`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DefaultGraphClause {
    pub selector: SourceSelector,
}

impl Render for DefaultGraphClause {
    fn render(&self, buf: &mut String) {
        self.selector.render(buf);
    }
}

/// `[15] NamedGraphClause ::= 'NAMED' SourceSelector`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NamedGraphClause {
    pub selector: SourceSelector,
}

impl Render for NamedGraphClause {
    fn render(&self, buf: &mut String) {
        buf.push_str("NAMED ");
        self.selector.render(buf);
    }
}

/// `[16] SourceSelector ::= iri`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceSelector(pub Iri);

impl Render for SourceSelector {
    fn render(&self, buf: &mut String) {
        self.0.render(buf);
    }
}

/// `[17] WhereClause ::= 'WHERE'? GroupGraphPattern`
///
/// The keyword is always emitted.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WhereClause {
    pub pattern: GroupGraphPattern,
}

impl Render for WhereClause {
    fn render(&self, buf: &mut String) {
        buf.push_str("\nWHERE ");
        self.pattern.render(buf);
    }
}

impl CollectTriples for WhereClause {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        self.pattern.collect_into(out);
    }
}

/// `[18] SolutionModifier ::= GroupClause? HavingClause? OrderClause? LimitOffsetClauses?`
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SolutionModifier {
    pub group_by: Option<GroupClause>,
    pub having: Option<HavingClause>,
    pub order_by: Option<OrderClause>,
    pub limit_offset: Option<LimitOffsetClauses>,
}

impl SolutionModifier {
    pub fn with_group_by(mut self, clause: GroupClause) -> Self {
        self.group_by = Some(clause);
        self
    }

    pub fn with_having(mut self, clause: HavingClause) -> Self {
        self.having = Some(clause);
        self
    }

    pub fn with_order_by(mut self, clause: OrderClause) -> Self {
        self.order_by = Some(clause);
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit_offset = Some(match self.limit_offset {
            Some(LimitOffsetClauses::OffsetFirst { offset, .. })
            | Some(LimitOffsetClauses::LimitFirst {
                offset: Some(offset),
                ..
            }) => LimitOffsetClauses::LimitFirst {
                limit: LimitClause(limit),
                offset: Some(offset),
            },
            _ => LimitOffsetClauses::LimitFirst {
                limit: LimitClause(limit),
                offset: None,
            },
        });
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.limit_offset = Some(match self.limit_offset {
            Some(LimitOffsetClauses::LimitFirst { limit, .. })
            | Some(LimitOffsetClauses::OffsetFirst {
                limit: Some(limit), ..
            }) => LimitOffsetClauses::LimitFirst {
                limit,
                offset: Some(OffsetClause(offset)),
            },
            _ => LimitOffsetClauses::OffsetFirst {
                offset: OffsetClause(offset),
                limit: None,
            },
        });
        self
    }
}

impl Render for SolutionModifier {
    fn render(&self, buf: &mut String) {
        if let Some(group_by) = &self.group_by {
            group_by.render(buf);
        }
        if let Some(having) = &self.having {
            having.render(buf);
        }
        if let Some(order_by) = &self.order_by {
            order_by.render(buf);
        }
        if let Some(limit_offset) = &self.limit_offset {
            buf.push('\n');
            limit_offset.render(buf);
        }
    }
}

impl CollectTriples for SolutionModifier {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        if let Some(group_by) = &self.group_by {
            group_by.first.collect_into(out);
            group_by.rest.collect_into(out);
        }
        if let Some(having) = &self.having {
            having.first.collect_into(out);
            having.rest.collect_into(out);
        }
    }
}

/// `[19] GroupClause ::= 'GROUP' 'BY' GroupCondition+`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GroupClause {
    pub first: GroupCondition,
    pub rest: Vec<GroupCondition>,
}

impl GroupClause {
    pub fn from_vec(mut conditions: Vec<GroupCondition>) -> Result<Self, StructuralError> {
        if conditions.is_empty() {
            return Err(StructuralError::empty_list("GroupClause"));
        }
        let first = conditions.remove(0);
        Ok(Self {
            first,
            rest: conditions,
        })
    }
}

impl Render for GroupClause {
    fn render(&self, buf: &mut String) {
        buf.push_str("\nGROUP BY ");
        self.first.render(buf);
        for condition in &self.rest {
            buf.push(' ');
            condition.render(buf);
        }
    }
}

/// `[20] GroupCondition ::= BuiltInCall | FunctionCall | '(' Expression ( 'AS' Var )? ')' | Var`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GroupCondition {
    BuiltIn(Box<BuiltInCall>),
    Function(FunctionCall),
    Expr {
        expression: Box<Expression>,
        alias: Option<Var>,
    },
    Var(Var),
}

impl Render for GroupCondition {
    fn render(&self, buf: &mut String) {
        match self {
            Self::BuiltIn(call) => call.render(buf),
            Self::Function(f) => f.render(buf),
            Self::Expr { expression, alias } => {
                buf.push('(');
                expression.render(buf);
                if let Some(alias) = alias {
                    buf.push_str(" AS ");
                    alias.render(buf);
                }
                buf.push(')');
            }
            Self::Var(v) => v.render(buf),
        }
    }
}

impl CollectTriples for GroupCondition {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        match self {
            Self::BuiltIn(call) => call.collect_into(out),
            Self::Function(f) => f.collect_into(out),
            Self::Expr { expression, .. } => expression.collect_into(out),
            Self::Var(_) => {}
        }
    }
}

/// `[21] HavingClause ::= 'HAVING' HavingCondition+`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HavingClause {
    pub first: HavingCondition,
    pub rest: Vec<HavingCondition>,
}

impl HavingClause {
    pub fn from_vec(mut conditions: Vec<HavingCondition>) -> Result<Self, StructuralError> {
        if conditions.is_empty() {
            return Err(StructuralError::empty_list("HavingClause"));
        }
        let first = conditions.remove(0);
        Ok(Self {
            first,
            rest: conditions,
        })
    }
}

impl Render for HavingClause {
    fn render(&self, buf: &mut String) {
        buf.push_str("\nHAVING ");
        self.first.render(buf);
        for condition in &self.rest {
            buf.push(' ');
            condition.render(buf);
        }
    }
}

/// `[22] HavingCondition ::= Constraint`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HavingCondition(pub Constraint);

impl Render for HavingCondition {
    fn render(&self, buf: &mut String) {
        self.0.render(buf);
    }
}

impl CollectTriples for HavingCondition {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        self.0.collect_into(out);
    }
}

/// `[23] OrderClause ::= 'ORDER' 'BY' OrderCondition+`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OrderClause {
    pub first: OrderCondition,
    pub rest: Vec<OrderCondition>,
}

impl OrderClause {
    pub fn from_vec(mut conditions: Vec<OrderCondition>) -> Result<Self, StructuralError> {
        if conditions.is_empty() {
            return Err(StructuralError::empty_list("OrderClause"));
        }
        let first = conditions.remove(0);
        Ok(Self {
            first,
            rest: conditions,
        })
    }
}

impl Render for OrderClause {
    fn render(&self, buf: &mut String) {
        buf.push_str("\nORDER BY ");
        self.first.render(buf);
        for condition in &self.rest {
            buf.push(' ');
            condition.render(buf);
        }
    }
}

/// `ASC` or `DESC`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// `[24] OrderCondition`
///
/// Without a direction the variable renders bare; with one it renders
/// as `ASC(?x)` / `DESC(?x)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OrderCondition {
    pub direction: Option<OrderDirection>,
    pub var: Var,
}

impl Render for OrderCondition {
    fn render(&self, buf: &mut String) {
        match self.direction {
            Some(direction) => {
                buf.push_str(direction.as_str());
                buf.push('(');
                self.var.render(buf);
                buf.push(')');
            }
            None => self.var.render(buf),
        }
    }
}

/// `[25] LimitOffsetClauses ::= LimitClause OffsetClause? | OffsetClause LimitClause?`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LimitOffsetClauses {
    LimitFirst {
        limit: LimitClause,
        offset: Option<OffsetClause>,
    },
    OffsetFirst {
        offset: OffsetClause,
        limit: Option<LimitClause>,
    },
}

impl Render for LimitOffsetClauses {
    fn render(&self, buf: &mut String) {
        match self {
            Self::LimitFirst { limit, offset } => {
                limit.render(buf);
                if let Some(offset) = offset {
                    buf.push('\n');
                    offset.render(buf);
                }
            }
            Self::OffsetFirst { offset, limit } => {
                offset.render(buf);
                if let Some(limit) = limit {
                    buf.push('\n');
                    limit.render(buf);
                }
            }
        }
    }
}

/// `[26] LimitClause ::= 'LIMIT' INTEGER`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LimitClause(pub u64);

impl Render for LimitClause {
    fn render(&self, buf: &mut String) {
        buf.push_str("LIMIT ");
        buf.push_str(&self.0.to_string());
    }
}

/// `[27] OffsetClause ::= 'OFFSET' INTEGER`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OffsetClause(pub u64);

impl Render for OffsetClause {
    fn render(&self, buf: &mut String) {
        buf.push_str("OFFSET ");
        buf.push_str(&self.0.to_string());
    }
}

/// `[28] ValuesClause ::= ( 'VALUES' DataBlock )?`
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ValuesClause {
    pub data: Option<DataBlock>,
}

impl Render for ValuesClause {
    fn render(&self, buf: &mut String) {
        if let Some(data) = &self.data {
            buf.push_str("\nVALUES ");
            data.render(buf);
        }
    }
}
