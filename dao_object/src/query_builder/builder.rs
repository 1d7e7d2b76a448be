//! Query descriptor
//!
//! [`Query`] collects predicates, bracket groups, projection, ordering, grouping,
//! having and update values for one entity type. It is only ever read by the
//! facade: [`Query::build_condition`] and [`Query::to_statement`] return freshly
//! merged values, so a query can be executed any number of times.

use crate::query_builder::arg::Arg;
use crate::query_builder::condition::{Condition, ConditionBuilder};
use crate::query_builder::filter::{LogicalOperator, QueryOperator};
use crate::query_builder::grouping::GroupBy;
use crate::query_builder::ordering::{OrderBy, SortOrder};
use crate::query_builder::sql_generation::SelectStatement;
use crate::query_builder::update::UpdateMap;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;

pub struct Query<T> {
    pub(crate) conditions: ConditionBuilder,
    pub(crate) order_by: OrderBy,
    pub(crate) group_by: GroupBy,
    pub(crate) having: ConditionBuilder,
    pub(crate) select_columns: Vec<String>,
    pub(crate) distinct_columns: Vec<String>,
    pub(crate) update_map: UpdateMap,
    next_connector: Option<LogicalOperator>,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Query<T> {
    pub fn new() -> Self {
        Self {
            conditions: ConditionBuilder::new(),
            order_by: OrderBy::new(),
            group_by: GroupBy::new(),
            having: ConditionBuilder::new(),
            select_columns: Vec::new(),
            distinct_columns: Vec::new(),
            update_map: UpdateMap::new(),
            next_connector: None,
            _phantom: PhantomData,
        }
    }

    fn push(mut self, column: &str, operator: QueryOperator, args: Vec<Arg>) -> Self {
        let connector = self.next_connector.take();
        self.conditions.append(column, operator, args, connector);
        self
    }

    /// `column = value`
    pub fn eq(self, column: &str, value: impl Into<Arg>) -> Self {
        self.push(column, QueryOperator::Eq, vec![value.into()])
    }

    /// `column <> value`
    pub fn ne(self, column: &str, value: impl Into<Arg>) -> Self {
        self.push(column, QueryOperator::Ne, vec![value.into()])
    }

    /// `column > value`
    pub fn gt(self, column: &str, value: impl Into<Arg>) -> Self {
        self.push(column, QueryOperator::Gt, vec![value.into()])
    }

    /// `column >= value`
    pub fn ge(self, column: &str, value: impl Into<Arg>) -> Self {
        self.push(column, QueryOperator::Ge, vec![value.into()])
    }

    /// `column < value`
    pub fn lt(self, column: &str, value: impl Into<Arg>) -> Self {
        self.push(column, QueryOperator::Lt, vec![value.into()])
    }

    /// `column <= value`
    pub fn le(self, column: &str, value: impl Into<Arg>) -> Self {
        self.push(column, QueryOperator::Le, vec![value.into()])
    }

    /// `column LIKE '%value%'`
    pub fn like(self, column: &str, value: &str) -> Self {
        self.push(column, QueryOperator::Like, vec![Arg::from(format!("%{}%", value))])
    }

    /// `column NOT LIKE '%value%'`
    pub fn not_like(self, column: &str, value: &str) -> Self {
        self.push(column, QueryOperator::NotLike, vec![Arg::from(format!("%{}%", value))])
    }

    /// `column LIKE '%value'`
    pub fn like_left(self, column: &str, value: &str) -> Self {
        self.push(column, QueryOperator::Like, vec![Arg::from(format!("%{}", value))])
    }

    /// `column LIKE 'value%'`
    pub fn like_right(self, column: &str, value: &str) -> Self {
        self.push(column, QueryOperator::Like, vec![Arg::from(format!("{}%", value))])
    }

    pub fn is_null(self, column: &str) -> Self {
        self.push(column, QueryOperator::IsNull, Vec::new())
    }

    pub fn is_not_null(self, column: &str) -> Self {
        self.push(column, QueryOperator::IsNotNull, Vec::new())
    }

    /// `column IN (...)`, the whole list bound to one placeholder
    pub fn in_values<I, V>(self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Arg>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.push(column, QueryOperator::In, vec![Arg::List(values)])
    }

    /// `column NOT IN (...)`
    pub fn not_in<I, V>(self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Arg>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.push(column, QueryOperator::NotIn, vec![Arg::List(values)])
    }

    /// `column BETWEEN from AND to`
    pub fn between(self, column: &str, from: impl Into<Arg>, to: impl Into<Arg>) -> Self {
        self.push(column, QueryOperator::Between, vec![from.into(), to.into()])
    }

    /// `column NOT BETWEEN from AND to`
    pub fn not_between(self, column: &str, from: impl Into<Arg>, to: impl Into<Arg>) -> Self {
        self.push(column, QueryOperator::NotBetween, vec![from.into(), to.into()])
    }

    /// Join the next predicate with `OR`
    pub fn or(mut self) -> Self {
        self.next_connector = Some(LogicalOperator::Or);
        self
    }

    /// Join the next predicate with `AND` (the default)
    pub fn and(mut self) -> Self {
        self.next_connector = Some(LogicalOperator::And);
        self
    }

    /// Add `AND (...)` built by `build` on a fresh query.
    ///
    /// Bracket groups always join with their own connector, so a pending
    /// [`Query::or`]/[`Query::and`] is consumed here and never carried over to
    /// the next predicate.
    ///
    /// ```
    /// # use dao_object::Query;
    /// # struct User;
    /// let query = Query::<User>::new()
    ///     .eq("active", true)
    ///     .and_bracket(|q| q.gt("age", 18).or().eq("vip", true));
    /// assert_eq!(query.build_condition().sql, "active = ? AND (age > ? OR vip = ?)");
    /// ```
    pub fn and_bracket<F>(mut self, build: F) -> Self
    where
        F: FnOnce(Query<T>) -> Query<T>,
    {
        self.next_connector = None;
        let nested = build(Query::new()).build_condition();
        self.conditions.and_bracket(nested);
        self
    }

    /// Add `OR (...)` built by `build` on a fresh query
    pub fn or_bracket<F>(mut self, build: F) -> Self
    where
        F: FnOnce(Query<T>) -> Query<T>,
    {
        self.next_connector = None;
        let nested = build(Query::new()).build_condition();
        self.conditions.or_bracket(nested);
        self
    }

    /// Restrict the projection to `columns`
    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select_columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// `SELECT DISTINCT columns`
    pub fn distinct<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.distinct_columns.extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn order_by_asc<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order_by.add(columns, SortOrder::Asc);
        self
    }

    pub fn order_by_desc<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order_by.add(columns, SortOrder::Desc);
        self
    }

    pub fn group_by<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_by.add(columns);
        self
    }

    /// Append a HAVING expression with its own `?` arguments; repeated calls are
    /// joined with `AND`.
    ///
    /// An empty expression with arguments is not dropped: the arguments stay on
    /// the statement and the store rejects it with
    /// [`DaoError::PlaceholderMismatch`](crate::DaoError::PlaceholderMismatch).
    pub fn having<I, V>(mut self, expression: &str, args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Arg>,
    {
        self.having
            .raw(expression, args.into_iter().map(Into::into).collect());
        self
    }

    /// Column value for [`Dao::update`](crate::Dao::update)
    pub fn set(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.update_map.set(column, value);
        self
    }

    pub fn update_map(&self) -> &UpdateMap {
        &self.update_map
    }

    /// Merge the top-level predicates with the bracket groups
    pub fn build_condition(&self) -> Condition {
        self.conditions.build()
    }

    /// Finalize into a read statement
    pub fn to_statement(&self) -> SelectStatement {
        let having = self.having.build();
        let columns = if self.select_columns.is_empty() {
            self.distinct_columns.clone()
        } else {
            self.select_columns.clone()
        };

        SelectStatement {
            condition: self.build_condition(),
            columns,
            distinct: !self.distinct_columns.is_empty(),
            order: self.order_by.to_sql(),
            group: self.group_by.to_sql(),
            having: (!having.is_empty() || !having.args.is_empty()).then_some(having),
            pagination: None,
        }
    }
}

impl<T> Default for Query<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            conditions: self.conditions.clone(),
            order_by: self.order_by.clone(),
            group_by: self.group_by.clone(),
            having: self.having.clone(),
            select_columns: self.select_columns.clone(),
            distinct_columns: self.distinct_columns.clone(),
            update_map: self.update_map.clone(),
            next_connector: self.next_connector,
            _phantom: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("condition", &self.build_condition())
            .field("order_by", &self.order_by)
            .field("group_by", &self.group_by)
            .field("select_columns", &self.select_columns)
            .field("distinct_columns", &self.distinct_columns)
            .field("update_map", &self.update_map)
            .finish()
    }
}
