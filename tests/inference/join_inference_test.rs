#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use metric_schema::inference::{InferenceConfig, JoinInferenceEngine, Singularization};
    use metric_schema::metadata::{TableCatalog, TableSchema, TableSchemaProvider};
    use metric_schema::model::{JoinCondition, JoinEdge};
    use std::collections::{BTreeSet, HashSet};

    fn warehouse() -> TableCatalog {
        TableCatalog::new(vec![
            TableSchema::new("orders")
                .column("id", "INT")
                .column("customer_id", "INT")
                .column("store_id", "INT")
                .column("amount", "DECIMAL"),
            TableSchema::new("customers")
                .column("id", "INT")
                .column("name", "VARCHAR"),
            TableSchema::new("stores")
                .column("store_id", "INT")
                .column("city", "VARCHAR"),
            TableSchema::new("products")
                .column("sku", "VARCHAR")
                .column("title", "VARCHAR"),
        ])
    }

    fn used(tables: &[&str]) -> BTreeSet<String> {
        tables.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_foreign_key_pattern_scenario() {
        let catalog = TableCatalog::new(vec![
            TableSchema::new("orders").column("customer_id", "INT"),
            TableSchema::new("customers").column("id", "INT"),
        ]);
        let engine = JoinInferenceEngine::default();
        let report = engine.infer("orders", &used(&["orders", "customers"]), &catalog, &[]);

        assert_eq!(report.inferred.len(), 1);
        let edge = &report.inferred[0];
        assert_eq!(edge.left_table, "orders");
        assert_eq!(edge.right_table, "customers");
        assert_eq!(edge.conditions, vec![JoinCondition::eq("customer_id", "id")]);

        assert_snapshot!(
            serde_json::to_string(edge).unwrap(),
            @r#"{"name":"orders_customers_join","joinType":"left","leftTable":"orders","rightTable":"customers","conditions":[{"leftColumn":"customer_id","rightColumn":"id","operator":"="}],"autogenerated":true}"#
        );
    }

    #[test]
    fn test_no_common_columns_scenario() {
        let engine = JoinInferenceEngine::default();
        let report = engine.infer("orders", &used(&["orders", "products"]), &warehouse(), &[]);
        assert!(report.inferred.is_empty());
        assert_eq!(report.unmatched, vec!["products".to_string()]);
    }

    #[test]
    fn test_same_name_column_joins_both_sides() {
        let engine = JoinInferenceEngine::default();
        let report = engine.infer("orders", &used(&["orders", "stores"]), &warehouse(), &[]);

        assert_eq!(report.inferred.len(), 1);
        assert_eq!(
            report.inferred[0].conditions,
            vec![JoinCondition::eq("store_id", "store_id")]
        );
    }

    #[test]
    fn test_inferred_conditions_name_existing_columns() {
        let catalog = warehouse();
        let report = JoinInferenceEngine::default().infer(
            "orders",
            &used(&["orders", "customers", "stores"]),
            &catalog,
            &[],
        );
        assert_eq!(report.inferred.len(), 2);

        for edge in &report.inferred {
            let left = catalog.table(&edge.left_table).unwrap();
            let right = catalog.table(&edge.right_table).unwrap();
            for condition in &edge.conditions {
                assert!(
                    left.has_column(&condition.left_column),
                    "{}.{} does not exist",
                    edge.left_table,
                    condition.left_column
                );
                assert!(
                    right.has_column(&condition.right_column),
                    "{}.{} does not exist",
                    edge.right_table,
                    condition.right_column
                );
            }
        }
    }

    #[test]
    fn test_star_topology_from_base() {
        let engine = JoinInferenceEngine::default();
        let report = engine.infer(
            "orders",
            &used(&["orders", "customers", "stores", "products"]),
            &warehouse(),
            &[],
        );

        assert_eq!(report.inferred.len(), 2);
        assert!(report.inferred.iter().all(|e| e.left_table == "orders"));
        let right: Vec<_> = report.inferred.iter().map(|e| e.right_table.as_str()).collect();
        assert_eq!(right, vec!["customers", "stores"]);
    }

    #[test]
    fn test_inference_is_idempotent() {
        let engine = JoinInferenceEngine::default();
        let tables = used(&["orders", "customers", "stores"]);

        let first = engine.infer("orders", &tables, &warehouse(), &[]);
        assert_eq!(first.inferred.len(), 2);

        let second = engine.infer("orders", &tables, &warehouse(), &first.inferred);
        assert!(second.inferred.is_empty());
        assert_eq!(second.covered.len(), 2);
    }

    #[test]
    fn test_pairs_stay_unique() {
        let engine = JoinInferenceEngine::default();
        let mut joins = vec![JoinEdge::left("customers", "orders", "id", "customer_id")];
        let report = engine.infer(
            "orders",
            &used(&["orders", "customers", "stores"]),
            &warehouse(),
            &joins,
        );
        joins.extend(report.inferred);

        let pairs: HashSet<String> = joins.iter().map(JoinEdge::pair_key).collect();
        assert_eq!(pairs.len(), joins.len());
    }

    #[test]
    fn test_inflector_singularization() {
        let catalog = TableCatalog::new(vec![
            TableSchema::new("products")
                .column("sku", "VARCHAR")
                .column("category_id", "INT"),
            TableSchema::new("categories")
                .column("id", "INT")
                .column("label", "VARCHAR"),
        ]);
        let tables = used(&["products", "categories"]);

        let naive = JoinInferenceEngine::default();
        assert!(naive.infer("products", &tables, &catalog, &[]).inferred.is_empty());

        let config = InferenceConfig::default().with_singularization(Singularization::Inflector);
        let report = JoinInferenceEngine::with_config(config).infer("products", &tables, &catalog, &[]);
        assert_eq!(report.inferred.len(), 1);
        assert_eq!(
            report.inferred[0].conditions,
            vec![JoinCondition::eq("category_id", "id")]
        );
    }

    #[test]
    fn test_key_pattern_preference() {
        let tables = used(&["orders", "customers"]);

        let default = JoinInferenceEngine::default().infer("orders", &tables, &warehouse(), &[]);
        assert_eq!(
            default.inferred[0].conditions,
            vec![JoinCondition::eq("id", "id")]
        );

        let config = InferenceConfig::default().with_key_pattern_preference(true);
        let preferred = JoinInferenceEngine::with_config(config).infer("orders", &tables, &warehouse(), &[]);
        assert_eq!(
            preferred.inferred[0].conditions,
            vec![JoinCondition::eq("customer_id", "id")]
        );
    }
}
