//! Condition builder
//!
//! Accumulates predicates and connectors into a single parameterized boolean
//! expression. Placeholders are written as `?`; every placeholder in the rendered
//! text has exactly one entry in the argument list, in the same order.
//!
//! Besides the flat top-level expression a builder owns two bracket groups. Each
//! group is another [`ConditionBuilder`] holding already parenthesized sub-conditions:
//! the AND group joins them with `AND`, the OR group with `OR`. [`ConditionBuilder::build`]
//! merges them after the top-level predicates, AND group first, without touching
//! the builder itself.

use crate::query_builder::arg::Arg;
use crate::query_builder::filter::{LogicalOperator, QueryOperator};

/// Positional placeholder used in condition text
pub const PLACEHOLDER: char = '?';

/// A rendered condition: SQL text with `?` placeholders plus its arguments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Condition {
    pub sql: String,
    pub args: Vec<Arg>,
}

impl Condition {
    pub fn new<A: Into<Arg>>(sql: impl Into<String>, args: Vec<A>) -> Self {
        Self {
            sql: sql.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sql.trim().is_empty()
    }

    /// Count of `?` placeholders outside single-quoted literals
    pub fn placeholder_count(&self) -> usize {
        let mut in_literal = false;
        self.sql
            .chars()
            .filter(|c| {
                if *c == '\'' {
                    in_literal = !in_literal;
                }
                !in_literal && *c == PLACEHOLDER
            })
            .count()
    }

    /// Wrap the text in parentheses
    pub fn parenthesized(self) -> Self {
        Self {
            sql: format!("({})", self.sql),
            args: self.args,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Predicate(Condition),
    Connector(LogicalOperator),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionBuilder {
    tokens: Vec<Token>,
    and_bracket: Option<Box<ConditionBuilder>>,
    or_bracket: Option<Box<ConditionBuilder>>,
}

impl ConditionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `column <operator> ?` and queue its arguments.
    ///
    /// `connector` joins the predicate to whatever precedes it; `None` means the
    /// implicit `AND`.
    pub fn append(
        &mut self,
        column: &str,
        operator: QueryOperator,
        args: Vec<Arg>,
        connector: Option<LogicalOperator>,
    ) {
        debug_assert_eq!(
            operator.arity(),
            args.len(),
            "{:?} binds {} argument(s)",
            operator,
            operator.arity()
        );
        if let Some(connector) = connector {
            self.connector(connector);
        }
        self.tokens.push(Token::Predicate(Condition::new(
            operator.render(column),
            args,
        )));
    }

    /// Append `column IN ?` with the whole list bound to the single placeholder
    pub fn in_values(&mut self, column: &str, values: Vec<Arg>) {
        self.append(column, QueryOperator::In, vec![Arg::List(values)], None);
    }

    /// Append raw condition text.
    ///
    /// Empty text with no arguments is ignored. Empty text that still carries
    /// arguments is kept as arguments only, so the placeholder/argument mismatch
    /// is reported when the condition is executed instead of being dropped.
    pub fn raw(&mut self, sql: impl Into<String>, args: Vec<Arg>) {
        let condition = Condition {
            sql: sql.into(),
            args,
        };
        if !condition.is_empty() || !condition.args.is_empty() {
            self.tokens.push(Token::Predicate(condition));
        }
    }

    /// Join the next predicate with `connector` instead of the implicit `AND`
    pub fn connector(&mut self, connector: LogicalOperator) {
        self.tokens.push(Token::Connector(connector));
    }

    /// Queue a sub-condition on the AND bracket group
    pub fn and_bracket(&mut self, group: Condition) {
        if group.is_empty() {
            return;
        }
        let group = group.parenthesized();
        self.and_bracket
            .get_or_insert_with(Default::default)
            .raw(group.sql, group.args);
    }

    /// Queue a sub-condition on the OR bracket group
    pub fn or_bracket(&mut self, group: Condition) {
        if group.is_empty() {
            return;
        }
        let group = group.parenthesized();
        let bracket = self.or_bracket.get_or_insert_with(Default::default);
        bracket.connector(LogicalOperator::Or);
        bracket.raw(group.sql, group.args);
    }

    /// True when neither the top level nor any bracket group holds a predicate
    pub fn is_empty(&self) -> bool {
        !self.has_predicates()
            && self.and_bracket.as_ref().is_none_or(|b| b.is_empty())
            && self.or_bracket.as_ref().is_none_or(|b| b.is_empty())
    }

    fn has_predicates(&self) -> bool {
        self.tokens
            .iter()
            .any(|token| matches!(token, Token::Predicate(p) if !p.is_empty()))
    }

    /// Render the top level followed by the AND group and then the OR group.
    ///
    /// Connectors with nothing on one side are dropped, so an expression never
    /// starts or ends with `AND`/`OR`. An empty builder renders an empty condition.
    pub fn build(&self) -> Condition {
        let mut merged = self.render_tokens();

        let groups = [
            (LogicalOperator::And, &self.and_bracket),
            (LogicalOperator::Or, &self.or_bracket),
        ];
        for (connector, bracket) in groups {
            let Some(bracket) = bracket else { continue };
            let group = bracket.build();
            if group.is_empty() {
                continue;
            }
            if !merged.is_empty() {
                merged.sql.push(' ');
                merged.sql.push_str(connector.to_sql());
                merged.sql.push(' ');
            }
            merged.sql.push_str(&group.sql);
            merged.args.extend(group.args);
        }

        merged
    }

    fn render_tokens(&self) -> Condition {
        let mut rendered = Condition::default();
        let mut pending: Option<LogicalOperator> = None;

        for token in &self.tokens {
            match token {
                Token::Connector(connector) => pending = Some(*connector),
                Token::Predicate(predicate) if predicate.is_empty() => {
                    rendered.args.extend(predicate.args.iter().cloned());
                }
                Token::Predicate(predicate) => {
                    if !rendered.is_empty() {
                        rendered.sql.push(' ');
                        rendered.sql.push_str(pending.unwrap_or_default().to_sql());
                        rendered.sql.push(' ');
                    }
                    rendered.sql.push_str(&predicate.sql);
                    rendered.args.extend(predicate.args.iter().cloned());
                    pending = None;
                }
            }
        }

        rendered
    }
}
