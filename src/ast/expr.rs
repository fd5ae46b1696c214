//! Expression productions.
//!
//! The grammar's expression precedence is reproduced structurally: an
//! [`Expression`] is a disjunction of conjunctions of value logicals,
//! each a relational test over additive/multiplicative chains bottoming
//! out in a [`PrimaryExpression`]. Builder helpers wrap a primary in the
//! full canonical chain so callers rarely spell the ladder out.

use crate::ast::pattern::GroupGraphPattern;
use crate::ast::term::{
    BooleanLiteral, Iri, NumericLiteral, NumericLiteralNegative, NumericLiteralPositive,
    RdfLiteral, StringLiteral, Var,
};
use crate::ast::TriplesSameSubjectPath;
use crate::collect::CollectTriples;
use crate::render::{render_joined, Render};
use crate::terminal::Nil;
use std::collections::HashSet;

/// `[110] Expression ::= ConditionalOrExpression`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Expression {
    pub conditional_or: ConditionalOrExpression,
}

impl Expression {
    /// Wrap a primary expression in the full canonical precedence chain.
    pub fn from_primary(primary: PrimaryExpression) -> Self {
        Self {
            conditional_or: ConditionalOrExpression {
                first: ConditionalAndExpression {
                    first: ValueLogical(RelationalExpression {
                        left: NumericExpression::from_primary(primary),
                        rhs: None,
                    }),
                    rest: Vec::new(),
                },
                rest: Vec::new(),
            },
        }
    }

    /// Shorthand for an expression that is just a variable.
    pub fn from_var(var: Var) -> Self {
        Self::from_primary(PrimaryExpression::Var(var))
    }

    /// Build `left IN (members...)` or `left NOT IN (members...)`.
    pub fn in_list(left: PrimaryExpression, negated: bool, members: Vec<PrimaryExpression>) -> Self {
        let list = ExpressionList {
            expressions: members.into_iter().map(Expression::from_primary).collect(),
        };
        Self {
            conditional_or: ConditionalOrExpression {
                first: ConditionalAndExpression {
                    first: ValueLogical(RelationalExpression {
                        left: NumericExpression::from_primary(left),
                        rhs: Some(RelationalRhs::In { negated, list }),
                    }),
                    rest: Vec::new(),
                },
                rest: Vec::new(),
            },
        }
    }
}

impl Render for Expression {
    fn render(&self, buf: &mut String) {
        self.conditional_or.render(buf);
    }
}

impl CollectTriples for Expression {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        self.conditional_or.collect_into(out);
    }
}

/// `[111] ConditionalOrExpression ::= ConditionalAndExpression ( '||' ConditionalAndExpression )*`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConditionalOrExpression {
    pub first: ConditionalAndExpression,
    pub rest: Vec<ConditionalAndExpression>,
}

impl Render for ConditionalOrExpression {
    fn render(&self, buf: &mut String) {
        self.first.render(buf);
        for operand in &self.rest {
            buf.push_str(" || ");
            operand.render(buf);
        }
    }
}

impl CollectTriples for ConditionalOrExpression {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        self.first.collect_into(out);
        self.rest.collect_into(out);
    }
}

/// `[112] ConditionalAndExpression ::= ValueLogical ( '&&' ValueLogical )*`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConditionalAndExpression {
    pub first: ValueLogical,
    pub rest: Vec<ValueLogical>,
}

impl Render for ConditionalAndExpression {
    fn render(&self, buf: &mut String) {
        self.first.render(buf);
        for operand in &self.rest {
            buf.push_str(" && ");
            operand.render(buf);
        }
    }
}

impl CollectTriples for ConditionalAndExpression {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        self.first.collect_into(out);
        self.rest.collect_into(out);
    }
}

/// `[113] ValueLogical ::= RelationalExpression`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ValueLogical(pub RelationalExpression);

impl Render for ValueLogical {
    fn render(&self, buf: &mut String) {
        self.0.render(buf);
    }
}

impl CollectTriples for ValueLogical {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        self.0.collect_into(out);
    }
}

/// Comparison operators of `[114] RelationalExpression`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl CompareOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
        }
    }
}

/// The optional right-hand side of a relational expression. Comparison
/// operators carry a numeric expression; the membership tests carry an
/// expression list, so an impossible operator/operand pairing cannot be
/// constructed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RelationalRhs {
    Compare(CompareOp, NumericExpression),
    In { negated: bool, list: ExpressionList },
}

/// `[114] RelationalExpression`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RelationalExpression {
    pub left: NumericExpression,
    pub rhs: Option<RelationalRhs>,
}

impl Render for RelationalExpression {
    fn render(&self, buf: &mut String) {
        self.left.render(buf);
        match &self.rhs {
            None => {}
            Some(RelationalRhs::Compare(op, right)) => {
                buf.push(' ');
                buf.push_str(op.as_str());
                buf.push(' ');
                right.render(buf);
            }
            Some(RelationalRhs::In { negated, list }) => {
                buf.push_str(if *negated { " NOT IN " } else { " IN " });
                list.render(buf);
            }
        }
    }
}

impl CollectTriples for RelationalExpression {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        self.left.collect_into(out);
        match &self.rhs {
            None => {}
            Some(RelationalRhs::Compare(_, right)) => right.collect_into(out),
            Some(RelationalRhs::In { list, .. }) => list.collect_into(out),
        }
    }
}

/// `[115] NumericExpression ::= AdditiveExpression`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NumericExpression(pub AdditiveExpression);

impl NumericExpression {
    /// Wrap a primary expression in the additive/multiplicative/unary chain.
    pub fn from_primary(primary: PrimaryExpression) -> Self {
        Self(AdditiveExpression {
            base: MultiplicativeExpression {
                base: UnaryExpression {
                    operator: None,
                    primary,
                },
                rest: Vec::new(),
            },
            rest: Vec::new(),
        })
    }
}

impl Render for NumericExpression {
    fn render(&self, buf: &mut String) {
        self.0.render(buf);
    }
}

impl CollectTriples for NumericExpression {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        self.0.collect_into(out);
    }
}

/// `*` or `/`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MulDivOp {
    Multiply,
    Divide,
}

impl MulDivOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }
}

/// A signed numeric literal appearing in additive position, which the
/// grammar lets stand in for `+ n` / `- n`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SignedLiteral {
    Positive(NumericLiteralPositive),
    Negative(NumericLiteralNegative),
}

impl Render for SignedLiteral {
    fn render(&self, buf: &mut String) {
        match self {
            Self::Positive(n) => n.render(buf),
            Self::Negative(n) => n.render(buf),
        }
    }
}

/// One trailing step of `[116] AdditiveExpression`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AdditiveTail {
    Add(MultiplicativeExpression),
    Subtract(MultiplicativeExpression),
    Signed {
        literal: SignedLiteral,
        factors: Vec<(MulDivOp, UnaryExpression)>,
    },
}

/// `[116] AdditiveExpression`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AdditiveExpression {
    pub base: MultiplicativeExpression,
    pub rest: Vec<AdditiveTail>,
}

impl Render for AdditiveExpression {
    fn render(&self, buf: &mut String) {
        self.base.render(buf);
        for tail in &self.rest {
            match tail {
                AdditiveTail::Add(operand) => {
                    buf.push_str(" + ");
                    operand.render(buf);
                }
                AdditiveTail::Subtract(operand) => {
                    buf.push_str(" - ");
                    operand.render(buf);
                }
                AdditiveTail::Signed { literal, factors } => {
                    literal.render(buf);
                    for (op, factor) in factors {
                        buf.push(' ');
                        buf.push_str(op.as_str());
                        buf.push(' ');
                        factor.render(buf);
                    }
                }
            }
        }
    }
}

impl CollectTriples for AdditiveExpression {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        self.base.collect_into(out);
        for tail in &self.rest {
            match tail {
                AdditiveTail::Add(operand) | AdditiveTail::Subtract(operand) => {
                    operand.collect_into(out)
                }
                AdditiveTail::Signed { factors, .. } => {
                    for (_, factor) in factors {
                        factor.collect_into(out);
                    }
                }
            }
        }
    }
}

/// `[117] MultiplicativeExpression ::= UnaryExpression ( '*' UnaryExpression | '/' UnaryExpression )*`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MultiplicativeExpression {
    pub base: UnaryExpression,
    pub rest: Vec<(MulDivOp, UnaryExpression)>,
}

impl Render for MultiplicativeExpression {
    fn render(&self, buf: &mut String) {
        self.base.render(buf);
        for (op, operand) in &self.rest {
            buf.push(' ');
            buf.push_str(op.as_str());
            buf.push(' ');
            operand.render(buf);
        }
    }
}

impl CollectTriples for MultiplicativeExpression {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        self.base.collect_into(out);
        for (_, operand) in &self.rest {
            operand.collect_into(out);
        }
    }
}

/// `!`, `+` or `-` in unary position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
    Plus,
    Minus,
}

impl UnaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Not => "!",
            Self::Plus => "+",
            Self::Minus => "-",
        }
    }
}

/// `[118] UnaryExpression`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UnaryExpression {
    pub operator: Option<UnaryOp>,
    pub primary: PrimaryExpression,
}

impl Render for UnaryExpression {
    fn render(&self, buf: &mut String) {
        if let Some(op) = self.operator {
            buf.push_str(op.as_str());
        }
        self.primary.render(buf);
    }
}

impl CollectTriples for UnaryExpression {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        self.primary.collect_into(out);
    }
}

/// `[119] PrimaryExpression`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrimaryExpression {
    Bracketted(BrackettedExpression),
    BuiltIn(BuiltInCall),
    IriOrFunction(IriOrFunction),
    Literal(RdfLiteral),
    Numeric(NumericLiteral),
    Boolean(BooleanLiteral),
    Var(Var),
}

impl Render for PrimaryExpression {
    fn render(&self, buf: &mut String) {
        match self {
            Self::Bracketted(e) => e.render(buf),
            Self::BuiltIn(call) => call.render(buf),
            Self::IriOrFunction(f) => f.render(buf),
            Self::Literal(lit) => lit.render(buf),
            Self::Numeric(num) => num.render(buf),
            Self::Boolean(b) => b.render(buf),
            Self::Var(v) => v.render(buf),
        }
    }
}

impl CollectTriples for PrimaryExpression {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        match self {
            Self::Bracketted(e) => e.collect_into(out),
            Self::BuiltIn(call) => call.collect_into(out),
            Self::IriOrFunction(f) => f.collect_into(out),
            Self::Literal(_) | Self::Numeric(_) | Self::Boolean(_) | Self::Var(_) => {}
        }
    }
}

/// `[120] BrackettedExpression ::= '(' Expression ')'`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BrackettedExpression(pub Box<Expression>);

impl Render for BrackettedExpression {
    fn render(&self, buf: &mut String) {
        buf.push('(');
        self.0.render(buf);
        buf.push(')');
    }
}

impl CollectTriples for BrackettedExpression {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        self.0.collect_into(out);
    }
}

/// `[128] iriOrFunction ::= iri ArgList?`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IriOrFunction {
    pub iri: Iri,
    pub args: Option<ArgList>,
}

impl Render for IriOrFunction {
    fn render(&self, buf: &mut String) {
        self.iri.render(buf);
        if let Some(args) = &self.args {
            args.render(buf);
        }
    }
}

impl CollectTriples for IriOrFunction {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        self.args.collect_into(out);
    }
}

/// `[70] FunctionCall ::= iri ArgList`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionCall {
    pub iri: Iri,
    pub args: ArgList,
}

impl Render for FunctionCall {
    fn render(&self, buf: &mut String) {
        self.iri.render(buf);
        self.args.render(buf);
    }
}

impl CollectTriples for FunctionCall {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        self.args.collect_into(out);
    }
}

/// `[71] ArgList ::= NIL | '(' 'DISTINCT'? Expression ( ',' Expression )* ')'`
///
/// The `DISTINCT` flag only exists on the non-empty form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArgList {
    Nil(Nil),
    Exprs {
        distinct: bool,
        first: Box<Expression>,
        rest: Vec<Expression>,
    },
}

impl Render for ArgList {
    fn render(&self, buf: &mut String) {
        match self {
            Self::Nil(nil) => nil.render(buf),
            Self::Exprs {
                distinct,
                first,
                rest,
            } => {
                buf.push('(');
                if *distinct {
                    buf.push_str("DISTINCT ");
                }
                first.render(buf);
                for expr in rest {
                    buf.push_str(", ");
                    expr.render(buf);
                }
                buf.push(')');
            }
        }
    }
}

impl CollectTriples for ArgList {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        match self {
            Self::Nil(_) => {}
            Self::Exprs { first, rest, .. } => {
                first.collect_into(out);
                rest.collect_into(out);
            }
        }
    }
}

/// `[72] ExpressionList ::= NIL | '(' Expression ( ',' Expression )* ')'`
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ExpressionList {
    pub expressions: Vec<Expression>,
}

impl Render for ExpressionList {
    fn render(&self, buf: &mut String) {
        if self.expressions.is_empty() {
            buf.push_str("()");
        } else {
            buf.push('(');
            render_joined(&self.expressions, ", ", buf);
            buf.push(')');
        }
    }
}

impl CollectTriples for ExpressionList {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        self.expressions.collect_into(out);
    }
}

/// `[122] RegexExpression ::= 'REGEX' '(' Expression ',' Expression ( ',' Expression )? ')'`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RegexExpression {
    pub text: Box<Expression>,
    pub pattern: Box<Expression>,
    pub flags: Option<Box<Expression>>,
}

impl Render for RegexExpression {
    fn render(&self, buf: &mut String) {
        buf.push_str("REGEX(");
        self.text.render(buf);
        buf.push_str(", ");
        self.pattern.render(buf);
        if let Some(flags) = &self.flags {
            buf.push_str(", ");
            flags.render(buf);
        }
        buf.push(')');
    }
}

/// `[123] SubstringExpression ::= 'SUBSTR' '(' Expression ',' Expression ( ',' Expression )? ')'`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubstringExpression {
    pub source: Box<Expression>,
    pub starting_loc: Box<Expression>,
    pub length: Option<Box<Expression>>,
}

impl Render for SubstringExpression {
    fn render(&self, buf: &mut String) {
        buf.push_str("SUBSTR(");
        self.source.render(buf);
        buf.push_str(", ");
        self.starting_loc.render(buf);
        if let Some(length) = &self.length {
            buf.push_str(", ");
            length.render(buf);
        }
        buf.push(')');
    }
}

/// `[124] StrReplaceExpression ::= 'REPLACE' '(' Expression ',' Expression ',' Expression ( ',' Expression )? ')'`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StrReplaceExpression {
    pub arg: Box<Expression>,
    pub pattern: Box<Expression>,
    pub replacement: Box<Expression>,
    pub flags: Option<Box<Expression>>,
}

impl Render for StrReplaceExpression {
    fn render(&self, buf: &mut String) {
        buf.push_str("REPLACE(");
        self.arg.render(buf);
        buf.push_str(", ");
        self.pattern.render(buf);
        buf.push_str(", ");
        self.replacement.render(buf);
        if let Some(flags) = &self.flags {
            buf.push_str(", ");
            flags.render(buf);
        }
        buf.push(')');
    }
}

/// `[125] ExistsFunc ::= 'EXISTS' GroupGraphPattern`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExistsFunc {
    pub pattern: GroupGraphPattern,
}

impl Render for ExistsFunc {
    fn render(&self, buf: &mut String) {
        buf.push_str("EXISTS ");
        self.pattern.render(buf);
    }
}

/// `[126] NotExistsFunc ::= 'NOT' 'EXISTS' GroupGraphPattern`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NotExistsFunc {
    pub pattern: GroupGraphPattern,
}

impl Render for NotExistsFunc {
    fn render(&self, buf: &mut String) {
        buf.push_str("NOT EXISTS ");
        self.pattern.render(buf);
    }
}

/// The `COUNT` argument: `*` or an expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CountTarget {
    Wildcard,
    Expr(Box<Expression>),
}

/// `[127] Aggregate`, one variant per aggregate kind.
///
/// Only `Count` admits the `*` target and only `GroupConcat` carries a
/// separator, so the illegal combinations have no representation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Aggregate {
    Count {
        distinct: bool,
        target: CountTarget,
    },
    Sum {
        distinct: bool,
        expr: Box<Expression>,
    },
    Min {
        distinct: bool,
        expr: Box<Expression>,
    },
    Max {
        distinct: bool,
        expr: Box<Expression>,
    },
    Avg {
        distinct: bool,
        expr: Box<Expression>,
    },
    Sample {
        distinct: bool,
        expr: Box<Expression>,
    },
    GroupConcat {
        distinct: bool,
        expr: Box<Expression>,
        separator: Option<StringLiteral>,
    },
}

impl Render for Aggregate {
    fn render(&self, buf: &mut String) {
        match self {
            Self::Count { distinct, target } => {
                buf.push_str("COUNT(");
                if *distinct {
                    buf.push_str("DISTINCT ");
                }
                match target {
                    CountTarget::Wildcard => buf.push('*'),
                    CountTarget::Expr(expr) => expr.render(buf),
                }
                buf.push(')');
            }
            Self::Sum { distinct, expr } => render_simple_aggregate(buf, "SUM", *distinct, expr),
            Self::Min { distinct, expr } => render_simple_aggregate(buf, "MIN", *distinct, expr),
            Self::Max { distinct, expr } => render_simple_aggregate(buf, "MAX", *distinct, expr),
            Self::Avg { distinct, expr } => render_simple_aggregate(buf, "AVG", *distinct, expr),
            Self::Sample { distinct, expr } => {
                render_simple_aggregate(buf, "SAMPLE", *distinct, expr)
            }
            Self::GroupConcat {
                distinct,
                expr,
                separator,
            } => {
                buf.push_str("GROUP_CONCAT(");
                if *distinct {
                    buf.push_str("DISTINCT ");
                }
                expr.render(buf);
                if let Some(separator) = separator {
                    buf.push_str(" ; SEPARATOR=");
                    separator.render(buf);
                }
                buf.push(')');
            }
        }
    }
}

fn render_simple_aggregate(buf: &mut String, name: &str, distinct: bool, expr: &Expression) {
    buf.push_str(name);
    buf.push('(');
    if distinct {
        buf.push_str("DISTINCT ");
    }
    expr.render(buf);
    buf.push(')');
}

/// `[121] BuiltInCall`, the closed inventory of built-in functions.
///
/// Each variant carries exactly the operands its function takes; render
/// dispatch is one exhaustive match, so adding a function is a
/// compile-enforced update everywhere it matters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum BuiltInCall {
    Aggregate(Box<Aggregate>),
    Str(Box<Expression>),
    Lang(Box<Expression>),
    LangMatches {
        tag: Box<Expression>,
        range: Box<Expression>,
    },
    Datatype(Box<Expression>),
    Bound(Var),
    Iri(Box<Expression>),
    Uri(Box<Expression>),
    BNode(Option<Box<Expression>>),
    Rand,
    Abs(Box<Expression>),
    Ceil(Box<Expression>),
    Floor(Box<Expression>),
    Round(Box<Expression>),
    Concat(ExpressionList),
    SubStr(SubstringExpression),
    StrLen(Box<Expression>),
    Replace(StrReplaceExpression),
    UCase(Box<Expression>),
    LCase(Box<Expression>),
    EncodeForUri(Box<Expression>),
    Contains {
        haystack: Box<Expression>,
        needle: Box<Expression>,
    },
    StrStarts {
        value: Box<Expression>,
        prefix: Box<Expression>,
    },
    StrEnds {
        value: Box<Expression>,
        suffix: Box<Expression>,
    },
    StrBefore {
        value: Box<Expression>,
        delimiter: Box<Expression>,
    },
    StrAfter {
        value: Box<Expression>,
        delimiter: Box<Expression>,
    },
    Year(Box<Expression>),
    Month(Box<Expression>),
    Day(Box<Expression>),
    Hours(Box<Expression>),
    Minutes(Box<Expression>),
    Seconds(Box<Expression>),
    Timezone(Box<Expression>),
    Tz(Box<Expression>),
    Now,
    Uuid,
    StrUuid,
    Md5(Box<Expression>),
    Sha1(Box<Expression>),
    Sha256(Box<Expression>),
    Sha384(Box<Expression>),
    Sha512(Box<Expression>),
    Coalesce(ExpressionList),
    If {
        condition: Box<Expression>,
        then: Box<Expression>,
        otherwise: Box<Expression>,
    },
    StrLang {
        value: Box<Expression>,
        tag: Box<Expression>,
    },
    StrDt {
        value: Box<Expression>,
        datatype: Box<Expression>,
    },
    SameTerm {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    IsIri(Box<Expression>),
    IsUri(Box<Expression>),
    IsBlank(Box<Expression>),
    IsLiteral(Box<Expression>),
    IsNumeric(Box<Expression>),
    Regex(RegexExpression),
    Exists(ExistsFunc),
    NotExists(NotExistsFunc),
}

impl BuiltInCall {
    /// `STR(expr)`.
    pub fn str(expr: Expression) -> Self {
        Self::Str(Box::new(expr))
    }

    /// `LANG(expr)`.
    pub fn lang(expr: Expression) -> Self {
        Self::Lang(Box::new(expr))
    }

    /// `DATATYPE(expr)`.
    pub fn datatype(expr: Expression) -> Self {
        Self::Datatype(Box::new(expr))
    }

    /// `BOUND(?var)`.
    pub fn bound(var: Var) -> Self {
        Self::Bound(var)
    }

    /// `isIRI(expr)`.
    pub fn is_iri(expr: Expression) -> Self {
        Self::IsIri(Box::new(expr))
    }

    /// `isBLANK(expr)`.
    pub fn is_blank(expr: Expression) -> Self {
        Self::IsBlank(Box::new(expr))
    }

    /// `sameTerm(left, right)`.
    pub fn same_term(left: Expression, right: Expression) -> Self {
        Self::SameTerm {
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

fn render_call1(buf: &mut String, name: &str, expr: &Expression) {
    buf.push_str(name);
    buf.push('(');
    expr.render(buf);
    buf.push(')');
}

fn render_call2(buf: &mut String, name: &str, a: &Expression, b: &Expression) {
    buf.push_str(name);
    buf.push('(');
    a.render(buf);
    buf.push_str(", ");
    b.render(buf);
    buf.push(')');
}

impl Render for BuiltInCall {
    fn render(&self, buf: &mut String) {
        match self {
            Self::Aggregate(aggregate) => aggregate.render(buf),
            Self::Str(e) => render_call1(buf, "STR", e),
            Self::Lang(e) => render_call1(buf, "LANG", e),
            Self::LangMatches { tag, range } => render_call2(buf, "LANGMATCHES", tag, range),
            Self::Datatype(e) => render_call1(buf, "DATATYPE", e),
            Self::Bound(var) => {
                buf.push_str("BOUND(");
                var.render(buf);
                buf.push(')');
            }
            Self::Iri(e) => render_call1(buf, "IRI", e),
            Self::Uri(e) => render_call1(buf, "URI", e),
            Self::BNode(Some(e)) => render_call1(buf, "BNODE", e),
            Self::BNode(None) => buf.push_str("BNODE()"),
            Self::Rand => buf.push_str("RAND()"),
            Self::Abs(e) => render_call1(buf, "ABS", e),
            Self::Ceil(e) => render_call1(buf, "CEIL", e),
            Self::Floor(e) => render_call1(buf, "FLOOR", e),
            Self::Round(e) => render_call1(buf, "ROUND", e),
            Self::Concat(list) => {
                buf.push_str("CONCAT");
                list.render(buf);
            }
            Self::SubStr(e) => e.render(buf),
            Self::StrLen(e) => render_call1(buf, "STRLEN", e),
            Self::Replace(e) => e.render(buf),
            Self::UCase(e) => render_call1(buf, "UCASE", e),
            Self::LCase(e) => render_call1(buf, "LCASE", e),
            Self::EncodeForUri(e) => render_call1(buf, "ENCODE_FOR_URI", e),
            Self::Contains { haystack, needle } => {
                render_call2(buf, "CONTAINS", haystack, needle)
            }
            Self::StrStarts { value, prefix } => render_call2(buf, "STRSTARTS", value, prefix),
            Self::StrEnds { value, suffix } => render_call2(buf, "STRENDS", value, suffix),
            Self::StrBefore { value, delimiter } => {
                render_call2(buf, "STRBEFORE", value, delimiter)
            }
            Self::StrAfter { value, delimiter } => render_call2(buf, "STRAFTER", value, delimiter),
            Self::Year(e) => render_call1(buf, "YEAR", e),
            Self::Month(e) => render_call1(buf, "MONTH", e),
            Self::Day(e) => render_call1(buf, "DAY", e),
            Self::Hours(e) => render_call1(buf, "HOURS", e),
            Self::Minutes(e) => render_call1(buf, "MINUTES", e),
            Self::Seconds(e) => render_call1(buf, "SECONDS", e),
            Self::Timezone(e) => render_call1(buf, "TIMEZONE", e),
            Self::Tz(e) => render_call1(buf, "TZ", e),
            Self::Now => buf.push_str("NOW()"),
            Self::Uuid => buf.push_str("UUID()"),
            Self::StrUuid => buf.push_str("STRUUID()"),
            Self::Md5(e) => render_call1(buf, "MD5", e),
            Self::Sha1(e) => render_call1(buf, "SHA1", e),
            Self::Sha256(e) => render_call1(buf, "SHA256", e),
            Self::Sha384(e) => render_call1(buf, "SHA384", e),
            Self::Sha512(e) => render_call1(buf, "SHA512", e),
            Self::Coalesce(list) => {
                buf.push_str("COALESCE");
                list.render(buf);
            }
            Self::If {
                condition,
                then,
                otherwise,
            } => {
                buf.push_str("IF(");
                condition.render(buf);
                buf.push_str(", ");
                then.render(buf);
                buf.push_str(", ");
                otherwise.render(buf);
                buf.push(')');
            }
            Self::StrLang { value, tag } => render_call2(buf, "STRLANG", value, tag),
            Self::StrDt { value, datatype } => render_call2(buf, "STRDT", value, datatype),
            Self::SameTerm { left, right } => render_call2(buf, "sameTerm", left, right),
            Self::IsIri(e) => render_call1(buf, "isIRI", e),
            Self::IsUri(e) => render_call1(buf, "isURI", e),
            Self::IsBlank(e) => render_call1(buf, "isBLANK", e),
            Self::IsLiteral(e) => render_call1(buf, "isLITERAL", e),
            Self::IsNumeric(e) => render_call1(buf, "isNUMERIC", e),
            Self::Regex(e) => e.render(buf),
            Self::Exists(e) => e.render(buf),
            Self::NotExists(e) => e.render(buf),
        }
    }
}

impl CollectTriples for BuiltInCall {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        match self {
            Self::Aggregate(aggregate) => match &**aggregate {
                Aggregate::Count {
                    target: CountTarget::Expr(expr),
                    ..
                } => expr.collect_into(out),
                Aggregate::Count {
                    target: CountTarget::Wildcard,
                    ..
                } => {}
                Aggregate::Sum { expr, .. }
                | Aggregate::Min { expr, .. }
                | Aggregate::Max { expr, .. }
                | Aggregate::Avg { expr, .. }
                | Aggregate::Sample { expr, .. }
                | Aggregate::GroupConcat { expr, .. } => expr.collect_into(out),
            },
            Self::Str(e)
            | Self::Lang(e)
            | Self::Datatype(e)
            | Self::Iri(e)
            | Self::Uri(e)
            | Self::Abs(e)
            | Self::Ceil(e)
            | Self::Floor(e)
            | Self::Round(e)
            | Self::StrLen(e)
            | Self::UCase(e)
            | Self::LCase(e)
            | Self::EncodeForUri(e)
            | Self::Year(e)
            | Self::Month(e)
            | Self::Day(e)
            | Self::Hours(e)
            | Self::Minutes(e)
            | Self::Seconds(e)
            | Self::Timezone(e)
            | Self::Tz(e)
            | Self::Md5(e)
            | Self::Sha1(e)
            | Self::Sha256(e)
            | Self::Sha384(e)
            | Self::Sha512(e)
            | Self::IsIri(e)
            | Self::IsUri(e)
            | Self::IsBlank(e)
            | Self::IsLiteral(e)
            | Self::IsNumeric(e) => e.collect_into(out),
            Self::BNode(e) => e.collect_into(out),
            Self::LangMatches { tag: a, range: b }
            | Self::Contains {
                haystack: a,
                needle: b,
            }
            | Self::StrStarts {
                value: a,
                prefix: b,
            }
            | Self::StrEnds {
                value: a,
                suffix: b,
            }
            | Self::StrBefore {
                value: a,
                delimiter: b,
            }
            | Self::StrAfter {
                value: a,
                delimiter: b,
            }
            | Self::StrLang { value: a, tag: b }
            | Self::StrDt {
                value: a,
                datatype: b,
            }
            | Self::SameTerm { left: a, right: b } => {
                a.collect_into(out);
                b.collect_into(out);
            }
            Self::If {
                condition,
                then,
                otherwise,
            } => {
                condition.collect_into(out);
                then.collect_into(out);
                otherwise.collect_into(out);
            }
            Self::Concat(list) | Self::Coalesce(list) => list.collect_into(out),
            Self::SubStr(e) => {
                e.source.collect_into(out);
                e.starting_loc.collect_into(out);
                e.length.collect_into(out);
            }
            Self::Replace(e) => {
                e.arg.collect_into(out);
                e.pattern.collect_into(out);
                e.replacement.collect_into(out);
                e.flags.collect_into(out);
            }
            Self::Regex(e) => {
                e.text.collect_into(out);
                e.pattern.collect_into(out);
                e.flags.collect_into(out);
            }
            Self::Exists(e) => e.pattern.collect_into(out),
            Self::NotExists(e) => e.pattern.collect_into(out),
            Self::Bound(_) | Self::Rand | Self::Now | Self::Uuid | Self::StrUuid => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var_expr(name: &str) -> Expression {
        Expression::from_var(Var::new(name).unwrap())
    }

    #[test]
    fn primary_chain_renders_bare() {
        assert_eq!(var_expr("x").to_sparql(), "?x");
    }

    #[test]
    fn logical_connectives() {
        let lhs = var_expr("a").conditional_or.first;
        let rhs = var_expr("b").conditional_or.first;
        let or = ConditionalOrExpression {
            first: lhs,
            rest: vec![rhs],
        };
        assert_eq!(or.to_sparql(), "?a || ?b");
    }

    #[test]
    fn in_list_rendering() {
        let expr = Expression::in_list(
            PrimaryExpression::Var(Var::new("s").unwrap()),
            false,
            vec![
                PrimaryExpression::Var(Var::new("a").unwrap()),
                PrimaryExpression::Var(Var::new("b").unwrap()),
            ],
        );
        assert_eq!(expr.to_sparql(), "?s IN (?a, ?b)");

        let negated = Expression::in_list(
            PrimaryExpression::Var(Var::new("s").unwrap()),
            true,
            vec![PrimaryExpression::Var(Var::new("a").unwrap())],
        );
        assert_eq!(negated.to_sparql(), "?s NOT IN (?a)");
    }

    #[test]
    fn builtin_casing() {
        assert_eq!(
            BuiltInCall::is_iri(var_expr("x")).to_sparql(),
            "isIRI(?x)"
        );
        assert_eq!(
            BuiltInCall::same_term(var_expr("a"), var_expr("b")).to_sparql(),
            "sameTerm(?a, ?b)"
        );
        assert_eq!(BuiltInCall::Rand.to_sparql(), "RAND()");
        assert_eq!(
            BuiltInCall::bound(Var::new("x").unwrap()).to_sparql(),
            "BOUND(?x)"
        );
    }

    #[test]
    fn aggregates() {
        let count_star = Aggregate::Count {
            distinct: true,
            target: CountTarget::Wildcard,
        };
        assert_eq!(count_star.to_sparql(), "COUNT(DISTINCT *)");

        let concat = Aggregate::GroupConcat {
            distinct: false,
            expr: Box::new(var_expr("name")),
            separator: Some(StringLiteral::Double(
                crate::terminal::StringLiteral2::new(", ").unwrap(),
            )),
        };
        assert_eq!(concat.to_sparql(), "GROUP_CONCAT(?name ; SEPARATOR=\", \")");
    }

    #[test]
    fn empty_expression_list_renders_nil() {
        assert_eq!(ExpressionList::default().to_sparql(), "()");
    }

    #[test]
    fn arg_list_distinct_inside_parens() {
        let args = ArgList::Exprs {
            distinct: true,
            first: Box::new(var_expr("x")),
            rest: vec![var_expr("y")],
        };
        assert_eq!(args.to_sparql(), "(DISTINCT ?x, ?y)");
    }
}
