#[cfg(test)]
mod tests {
    use metric_schema::model::{
        ColumnField, Combinator, ComparisonOperator, ConditionTree, Literal, Predicate, ValueRef,
        WhenClause,
    };
    use metric_schema::SchemaError;
    use serde_json::{json, Value};
    use std::collections::HashMap;

    fn row(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    fn eq(column: &str, value: &str) -> Predicate {
        Predicate::new(
            ColumnField::new(column),
            ComparisonOperator::Eq,
            Some(ValueRef::literal(value)),
        )
        .unwrap()
    }

    #[test]
    fn test_fallback_exists_after_adding_clause() {
        let mut tree = ConditionTree::for_measure();
        let index = tree.add_when_clause();

        assert_eq!(index, 0);
        assert_eq!(tree.when_clauses[0], WhenClause::empty());
        assert_eq!(tree.else_return, ValueRef::literal(0));
    }

    #[test]
    fn test_dimension_fallback_is_empty_string() {
        let tree = ConditionTree::for_dimension();
        assert_eq!(tree.evaluate(&row(&[])).unwrap(), json!(""));
    }

    #[test]
    fn test_first_match_wins() {
        let tree = ConditionTree::for_measure()
            .when(eq("tier", "gold"), ValueRef::literal(1))
            .when(eq("region", "west"), ValueRef::literal(2));

        let both = row(&[("tier", json!("gold")), ("region", json!("west"))]);
        assert_eq!(tree.evaluate(&both).unwrap(), json!(1));
        assert_eq!(tree.matching_branch(&both).unwrap(), Some(0));

        let second = row(&[("tier", json!("silver")), ("region", json!("west"))]);
        assert_eq!(tree.evaluate(&second).unwrap(), json!(2));

        let neither = row(&[("tier", json!("silver")), ("region", json!("east"))]);
        assert_eq!(tree.evaluate(&neither).unwrap(), json!(0));
    }

    #[test]
    fn test_and_combination() {
        let clause = WhenClause::new(eq("tier", "gold"), Some(ValueRef::literal("vip")))
            .with_additional(Combinator::And, eq("region", "west"));
        let mut tree = ConditionTree::for_dimension();
        tree.when_clauses.push(clause);

        let hit = row(&[("tier", json!("gold")), ("region", json!("west"))]);
        let miss = row(&[("tier", json!("gold")), ("region", json!("east"))]);
        assert_eq!(tree.evaluate(&hit).unwrap(), json!("vip"));
        assert_eq!(tree.evaluate(&miss).unwrap(), json!(""));
    }

    #[test]
    fn test_column_return_value() {
        let tree = ConditionTree::new(ValueRef::column(ColumnField::new("amount"))).when(
            Predicate::is_null(ColumnField::new("amount")),
            ValueRef::literal(0),
        );

        assert_eq!(tree.evaluate(&row(&[("amount", json!(12))])).unwrap(), json!(12));
        assert_eq!(tree.evaluate(&row(&[])).unwrap(), json!(0));
    }

    #[test]
    fn test_remove_and_update_out_of_range() {
        let mut tree = ConditionTree::for_measure().when(eq("tier", "gold"), ValueRef::literal(1));
        assert!(tree.remove_when_clause(3).is_none());
        assert!(!tree.update_when_clause(3, WhenClause::empty()));
        assert_eq!(tree.when_clauses.len(), 1);
    }

    #[test]
    fn test_operator_shape_is_checked() {
        let err = Predicate::new(
            ColumnField::new("status"),
            ComparisonOperator::In,
            Some(ValueRef::literal("open")),
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidPredicate { .. }));

        let err = Predicate::new(
            ColumnField::new("status"),
            ComparisonOperator::IsNull,
            Some(ValueRef::literal("x")),
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidPredicate { .. }));
    }

    #[test]
    fn test_switching_operator_resets_value_shape() {
        let predicate = eq("status", "open");

        let same_shape = predicate.with_operator(ComparisonOperator::NotEq);
        assert_eq!(same_shape.compare_value, Some(ValueRef::literal("open")));

        let set = predicate.with_operator(ComparisonOperator::In);
        assert_eq!(
            set.compare_value.as_ref().and_then(ValueRef::as_literal),
            Some(&Literal::List(Vec::new()))
        );
        assert!(set.check_shape().is_ok());

        let null_check = predicate.with_operator(ComparisonOperator::IsNotNull);
        assert!(null_check.compare_value.is_none());
    }

    #[test]
    fn test_tree_json_shape() {
        let tree = ConditionTree::for_measure().when(eq("tier", "gold"), ValueRef::literal(1));
        let json = serde_json::to_value(&tree).unwrap();

        assert_eq!(json["elseReturn"], json!({"kind": "literal", "value": 0}));
        assert_eq!(json["whenClauses"][0]["predicate"]["operator"], "=");
        assert_eq!(json["whenClauses"][0]["thenReturn"]["value"], 1);

        let back: ConditionTree = serde_json::from_value(json).unwrap();
        assert_eq!(back, tree);
    }
}
