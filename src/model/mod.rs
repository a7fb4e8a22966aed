//! Schema model types: column references, values, conditions and members.

pub mod column;
pub mod condition;
pub mod join;
pub mod member;
pub mod operator;
pub mod order;
pub mod policy;
pub mod transform;
pub mod value;

pub use column::ColumnField;
pub use condition::{Combinator, ConditionTree, Predicate, WhenClause};
pub use join::{pair_key, JoinCondition, JoinEdge, JoinOperator, JoinType};
pub use member::{CombinePart, MemberSource, OutputFormat, SchemaMember};
pub use operator::{ComparisonOperator, ValueShape};
pub use order::{NullsOrder, OrderReference, OrderSequence, OrderType, SemanticType};
pub use policy::{CachePolicy, RefreshPolicy};
pub use transform::{Transform, TransformFunction, TransformPipeline};
pub use value::{Literal, Scalar, ValueKind, ValueRef};
