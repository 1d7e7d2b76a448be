//! Comparison operators and logical connectors

use crate::query_builder::condition::PLACEHOLDER;

/// Query condition operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOperator {
    Eq,         // =
    Ne,         // <>
    Gt,         // >
    Ge,         // >=
    Lt,         // <
    Le,         // <=
    Like,       // LIKE
    NotLike,    // NOT LIKE
    In,         // IN
    NotIn,      // NOT IN
    IsNull,     // IS NULL
    IsNotNull,  // IS NOT NULL
    Between,    // BETWEEN ? AND ?
    NotBetween, // NOT BETWEEN ? AND ?
}

impl QueryOperator {
    pub fn to_sql(&self) -> &'static str {
        match self {
            QueryOperator::Eq => "=",
            QueryOperator::Ne => "<>",
            QueryOperator::Gt => ">",
            QueryOperator::Ge => ">=",
            QueryOperator::Lt => "<",
            QueryOperator::Le => "<=",
            QueryOperator::Like => "LIKE",
            QueryOperator::NotLike => "NOT LIKE",
            QueryOperator::In => "IN",
            QueryOperator::NotIn => "NOT IN",
            QueryOperator::IsNull => "IS NULL",
            QueryOperator::IsNotNull => "IS NOT NULL",
            QueryOperator::Between => "BETWEEN",
            QueryOperator::NotBetween => "NOT BETWEEN",
        }
    }

    /// Number of bound arguments the operator consumes.
    ///
    /// Set membership takes the whole list as a single argument.
    pub fn arity(&self) -> usize {
        match self {
            QueryOperator::IsNull | QueryOperator::IsNotNull => 0,
            QueryOperator::Between | QueryOperator::NotBetween => 2,
            _ => 1,
        }
    }

    /// Render `column <op> ?` with as many placeholders as the operator binds
    pub fn render(&self, column: &str) -> String {
        match self.arity() {
            0 => format!("{} {}", column, self.to_sql()),
            2 => format!(
                "{} {} {} AND {}",
                column,
                self.to_sql(),
                PLACEHOLDER,
                PLACEHOLDER
            ),
            _ => format!("{} {} {}", column, self.to_sql(), PLACEHOLDER),
        }
    }
}

/// Logical operators for combining conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogicalOperator {
    #[default]
    And,
    Or,
}

impl LogicalOperator {
    pub fn to_sql(&self) -> &'static str {
        match self {
            LogicalOperator::And => "AND",
            LogicalOperator::Or => "OR",
        }
    }
}
