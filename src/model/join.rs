//! Join edges between tables.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinType {
    #[default]
    Left,
    Inner,
    Right,
    Full,
}

/// Join conditions only support equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JoinOperator {
    #[default]
    #[serde(rename = "=")]
    Eq,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinCondition {
    pub left_column: String,
    pub right_column: String,
    #[serde(default)]
    pub operator: JoinOperator,
}

impl JoinCondition {
    pub fn eq(left_column: impl Into<String>, right_column: impl Into<String>) -> Self {
        Self {
            left_column: left_column.into(),
            right_column: right_column.into(),
            operator: JoinOperator::Eq,
        }
    }
}

/// A declared relationship between two tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinEdge {
    pub name: String,
    #[serde(default)]
    pub join_type: JoinType,
    pub left_table: String,
    pub right_table: String,
    #[serde(default)]
    pub conditions: Vec<JoinCondition>,
    #[serde(default)]
    pub autogenerated: bool,
}

impl JoinEdge {
    /// A user-authored left join with a single equality condition.
    pub fn left(
        left_table: impl Into<String>,
        right_table: impl Into<String>,
        left_column: impl Into<String>,
        right_column: impl Into<String>,
    ) -> Self {
        let left_table = left_table.into();
        let right_table = right_table.into();
        Self {
            name: format!("{}_{}_join", left_table, right_table),
            join_type: JoinType::Left,
            left_table,
            right_table,
            conditions: vec![JoinCondition::eq(left_column, right_column)],
            autogenerated: false,
        }
    }

    pub fn with_join_type(mut self, join_type: JoinType) -> Self {
        self.join_type = join_type;
        self
    }

    pub fn pair_key(&self) -> String {
        pair_key(&self.left_table, &self.right_table)
    }

    pub fn connects(&self, table: &str) -> bool {
        self.left_table == table || self.right_table == table
    }
}

/// Order-independent key for a table pair: `sort([a, b]).join("|")`.
pub fn pair_key(a: &str, b: &str) -> String {
    if a <= b {
        format!("{}|{}", a, b)
    } else {
        format!("{}|{}", b, a)
    }
}
