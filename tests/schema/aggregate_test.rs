#[cfg(test)]
mod tests {
    use metric_schema::config::Settings;
    use metric_schema::model::{
        CachePolicy, ColumnField, CombinePart, ComparisonOperator, ConditionTree, JoinEdge,
        JoinType, MemberSource, OrderSequence, OrderType, OutputFormat, Predicate, RefreshPolicy,
        SchemaMember, ValueRef,
    };
    use metric_schema::{Collection, MetricSchema, SchemaError, SchemaUpdate};
    use std::collections::BTreeSet;

    fn measure(name: &str, column: &str) -> SchemaMember {
        SchemaMember::new(name, MemberSource::Column(ColumnField::new(column)))
    }

    fn sales() -> MetricSchema {
        let mut schema = MetricSchema::new("orders");
        schema
            .apply(SchemaUpdate::Measures(vec![measure("revenue", "amount")]))
            .unwrap();
        schema
            .apply(SchemaUpdate::AddDimension(SchemaMember::from_column(
                ColumnField::qualified("customers", "region"),
            )))
            .unwrap();
        schema
    }

    #[test]
    fn test_rejects_duplicate_measure_names() {
        let mut schema = sales();
        let err = schema
            .apply(SchemaUpdate::AddMeasure(measure("revenue", "total")))
            .unwrap_err();

        assert_eq!(
            err,
            SchemaError::DuplicateName {
                collection: Collection::Measures,
                name: "revenue".to_string()
            }
        );
        assert_eq!(schema.measures().len(), 1);
    }

    #[test]
    fn test_same_name_allowed_across_collections() {
        let mut schema = sales();
        schema
            .apply(SchemaUpdate::AddDimension(measure("revenue", "amount")))
            .unwrap();
        assert!(schema.dimension("revenue").is_some());
        assert!(schema.measure("revenue").is_some());
    }

    #[test]
    fn test_rejects_empty_names() {
        let mut schema = sales();
        let err = schema
            .apply(SchemaUpdate::UpdateMeasure(0, measure("  ", "amount")))
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::EmptyName {
                collection: Collection::Measures,
                index: 0
            }
        );
        assert!(schema.measure("revenue").is_some());
    }

    #[test]
    fn test_index_out_of_range() {
        let mut schema = sales();
        let err = schema.apply(SchemaUpdate::RemoveFilter(0)).unwrap_err();
        assert_eq!(
            err,
            SchemaError::IndexOutOfRange {
                collection: Collection::Filters,
                index: 0,
                len: 0
            }
        );
    }

    #[test]
    fn test_used_tables_from_members_and_filters() {
        let mut schema = sales();
        schema
            .apply(SchemaUpdate::AddFilter(Predicate::is_not_null(
                ColumnField::qualified("stores", "city"),
            )))
            .unwrap();
        schema
            .apply(SchemaUpdate::AddDimension(SchemaMember::new(
                "label",
                MemberSource::Combine {
                    parts: vec![
                        CombinePart::new(ColumnField::qualified("products", "brand"), " - "),
                        CombinePart::new(ColumnField::new("sku"), ""),
                    ],
                },
            )))
            .unwrap();

        let expected: BTreeSet<String> = ["customers", "orders", "products", "stores"]
            .iter()
            .map(|t| t.to_string())
            .collect();
        assert_eq!(schema.used_tables(), expected);
    }

    #[test]
    fn test_order_is_not_a_table_source() {
        let mut schema = sales();
        schema
            .apply(SchemaUpdate::AddOrder(OrderSequence::by_column(
                "by_rank",
                "rank",
                OrderType::Desc,
            )))
            .unwrap();
        assert_eq!(schema.used_tables().len(), 2);
    }

    #[test]
    fn test_manual_join_replaces_inferred() {
        let mut schema = sales();
        let mut auto = JoinEdge::left("orders", "customers", "id", "id");
        auto.autogenerated = true;
        schema.apply(SchemaUpdate::Joins(vec![auto])).unwrap();

        let manual = JoinEdge::left("customers", "orders", "id", "customer_id")
            .with_join_type(JoinType::Inner);
        schema.apply(SchemaUpdate::AddJoin(manual.clone())).unwrap();

        assert_eq!(schema.joins(), &[manual]);
    }

    #[test]
    fn test_second_manual_join_for_pair_is_rejected() {
        let mut schema = sales();
        schema
            .apply(SchemaUpdate::AddJoin(JoinEdge::left(
                "orders",
                "customers",
                "customer_id",
                "id",
            )))
            .unwrap();
        let err = schema
            .apply(SchemaUpdate::AddJoin(JoinEdge::left(
                "customers",
                "orders",
                "id",
                "customer_id",
            )))
            .unwrap_err();

        assert!(matches!(err, SchemaError::DuplicateJoin { .. }));
        assert_eq!(schema.joins().len(), 1);
    }

    #[test]
    fn test_unresolved_order() {
        let mut schema = sales();
        schema
            .apply(SchemaUpdate::Order(vec![
                OrderSequence::by_measure("top", "revenue", OrderType::Desc),
                OrderSequence::by_dimension("alpha", "missing", OrderType::Asc),
            ]))
            .unwrap();

        let unresolved: Vec<_> = schema
            .unresolved_order()
            .into_iter()
            .map(|o| o.name.as_str())
            .collect();
        assert_eq!(unresolved, vec!["alpha"]);
    }

    #[test]
    fn test_json_round_trip() {
        let mut schema = sales();
        schema
            .apply(SchemaUpdate::AddMeasure(
                SchemaMember::new(
                    "large_orders",
                    MemberSource::Condition(ConditionTree::for_measure().when(
                        Predicate::new(
                            ColumnField::new("amount"),
                            ComparisonOperator::Gt,
                            Some(ValueRef::literal(1000)),
                        )
                        .unwrap(),
                        ValueRef::literal(1),
                    )),
                )
                .with_format(OutputFormat::Number { decimals: 0 }),
            ))
            .unwrap();
        schema
            .apply(SchemaUpdate::RefreshPolicy(RefreshPolicy::Interval { seconds: 300 }))
            .unwrap();

        let json = schema.to_json().unwrap();
        let back = MetricSchema::from_json(&json).unwrap();
        assert_eq!(back, schema);
    }

    #[test]
    fn test_reads_untagged_values() {
        let json = r#"{
            "baseTable": "orders",
            "measures": [
                {"name": "revenue", "source": {"type": "column", "column": "amount"}}
            ],
            "dimensions": [
                {
                    "name": "segment",
                    "source": {
                        "type": "condition",
                        "whenClauses": [
                            {
                                "predicate": {"field": {"column": "amount"}, "operator": ">", "compareValue": 500},
                                "thenReturn": {"table": "customers", "column": "tier"}
                            }
                        ],
                        "elseReturn": "standard"
                    }
                }
            ],
            "filters": [
                {"field": {"column": "status"}, "operator": "IN", "compareValue": ["open", "paid"]}
            ]
        }"#;

        let schema = MetricSchema::from_json(json).unwrap();
        let MemberSource::Condition(tree) = &schema.dimensions()[0].source else {
            panic!("expected a condition source");
        };
        assert!(tree.when_clauses[0]
            .then_return
            .as_ref()
            .is_some_and(ValueRef::is_column_field));
        assert_eq!(tree.else_return, ValueRef::literal("standard"));
        assert!(schema.used_tables().contains("customers"));
        assert_eq!(schema.refresh_policy(), &RefreshPolicy::Manual);
    }

    #[test]
    fn test_deserialize_validates_names() {
        let json = r#"{
            "baseTable": "orders",
            "measures": [
                {"name": "revenue", "source": {"type": "column", "column": "amount"}},
                {"name": "revenue", "source": {"type": "column", "column": "total"}}
            ]
        }"#;
        assert!(matches!(
            MetricSchema::from_json(json),
            Err(SchemaError::Serialization(_))
        ));
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let schema = sales();
        let same = sales();
        assert_eq!(schema.fingerprint().unwrap(), same.fingerprint().unwrap());

        let mut changed = sales();
        changed
            .apply(SchemaUpdate::AddMeasure(measure("orders", "id")))
            .unwrap();
        assert_ne!(schema.fingerprint().unwrap(), changed.fingerprint().unwrap());
        assert_eq!(schema.fingerprint().unwrap().len(), 64);
    }

    #[test]
    fn test_cache_key_follows_policy() {
        let mut schema = sales();
        let key = schema.cache_key().unwrap().unwrap();
        assert_eq!(key.ttl_seconds, 3600);
        assert_eq!(key.to_string(), format!("metric:{}", key.fingerprint));

        schema
            .apply(SchemaUpdate::CachePolicy(CachePolicy::disabled()))
            .unwrap();
        assert!(schema.cache_key().unwrap().is_none());
    }

    #[test]
    fn test_configured_cache_defaults() {
        let settings = Settings::parse("[cache]\nenabled = false\n").unwrap();
        let schema = MetricSchema::new("orders").with_cache_policy(settings.cache.to_policy());
        assert!(!schema.cache_policy().enabled);
        assert!(schema.cache_key().unwrap().is_none());
    }
}
