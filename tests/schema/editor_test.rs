#[cfg(test)]
mod tests {
    use metric_schema::inference::{InferenceConfig, JoinInferenceEngine};
    use metric_schema::metadata::{TableCatalog, TableSchema};
    use metric_schema::model::{ColumnField, JoinCondition, JoinEdge, Predicate, SchemaMember};
    use metric_schema::{MetricEditor, MetricSchema, SchemaUpdate};

    fn catalog() -> TableCatalog {
        TableCatalog::new(vec![
            TableSchema::new("orders")
                .column("id", "INT")
                .column("customer_id", "INT")
                .column("amount", "DECIMAL"),
            TableSchema::new("customers")
                .column("id", "INT")
                .column("region", "VARCHAR"),
            TableSchema::new("products")
                .column("sku", "VARCHAR")
                .column("title", "VARCHAR"),
        ])
    }

    fn editor() -> MetricEditor<TableCatalog> {
        let engine = JoinInferenceEngine::with_config(
            InferenceConfig::default().with_key_pattern_preference(true),
        );
        MetricEditor::new(MetricSchema::new("orders"), catalog(), engine)
    }

    #[test]
    fn test_new_editor_does_not_infer() {
        let mut schema = MetricSchema::new("orders");
        schema
            .apply(SchemaUpdate::AddDimension(SchemaMember::from_column(
                ColumnField::qualified("customers", "region"),
            )))
            .unwrap();

        let mut editor = MetricEditor::new(schema, catalog(), JoinInferenceEngine::default());
        assert!(editor.schema().joins().is_empty());
        assert_eq!(editor.unjoined_tables(), vec!["customers".to_string()]);

        editor.reconcile_joins();
        assert_eq!(editor.schema().joins().len(), 1);
    }

    #[test]
    fn test_filter_on_new_table_infers_join() {
        let mut editor = editor();
        editor
            .add_filter(Predicate::is_not_null(ColumnField::qualified("customers", "region")))
            .unwrap();

        let joins = editor.schema().joins();
        assert_eq!(joins.len(), 1);
        assert_eq!(joins[0].conditions, vec![JoinCondition::eq("customer_id", "id")]);
        assert!(joins[0].autogenerated);
    }

    #[test]
    fn test_into_schema_keeps_inferred_joins() {
        let mut editor = editor();
        editor
            .pick_dimension(ColumnField::qualified("customers", "region"))
            .unwrap();

        let schema = editor.into_schema();
        assert_eq!(schema.joins().len(), 1);
        assert_eq!(schema.dimensions()[0].name, "region");
    }

    #[test]
    fn test_repeated_reconcile_is_stable() {
        let mut editor = editor();
        editor
            .pick_dimension(ColumnField::qualified("customers", "region"))
            .unwrap();
        let before = editor.schema().joins().to_vec();

        assert!(editor.reconcile_joins().inferred.is_empty());
        assert!(editor.reconcile_joins().inferred.is_empty());
        assert_eq!(editor.schema().joins(), before.as_slice());
    }

    #[test]
    fn test_unmatched_table_is_left_unjoined() {
        let mut editor = editor();
        editor
            .pick_dimension(ColumnField::qualified("products", "title"))
            .unwrap();

        assert!(editor.schema().joins().is_empty());
        assert_eq!(editor.last_report().unmatched, vec!["products".to_string()]);
        assert_eq!(editor.unjoined_tables(), vec!["products".to_string()]);
    }

    #[test]
    fn test_manual_join_is_kept() {
        let mut editor = editor();
        let manual = JoinEdge::left("orders", "customers", "id", "id");
        editor.add_join(manual.clone()).unwrap();
        editor
            .pick_measure(ColumnField::qualified("customers", "id"))
            .unwrap();

        assert_eq!(editor.schema().joins(), &[manual]);
        assert_eq!(editor.last_report().covered, vec!["customers".to_string()]);
    }

    #[test]
    fn test_removing_last_reference_keeps_join() {
        let mut editor = editor();
        editor
            .pick_dimension(ColumnField::qualified("customers", "region"))
            .unwrap();
        editor.remove_dimension(0).unwrap();

        assert!(!editor.used_tables().contains("customers"));
        assert_eq!(editor.schema().joins().len(), 1);
    }

    #[test]
    fn test_changing_base_table_reconciles() {
        let mut editor = editor();
        editor
            .pick_dimension(ColumnField::qualified("orders", "amount"))
            .unwrap();
        editor.set_base_table("customers").unwrap();

        let joins = editor.schema().joins();
        assert_eq!(joins.len(), 1);
        assert_eq!(joins[0].left_table, "customers");
        assert_eq!(joins[0].right_table, "orders");
        assert_eq!(joins[0].conditions, vec![JoinCondition::eq("id", "customer_id")]);
    }

    #[test]
    fn test_rejected_update_leaves_state() {
        let mut editor = editor();
        editor.pick_measure(ColumnField::new("amount")).unwrap();
        assert!(editor.remove_measure(4).is_err());
        assert_eq!(editor.schema().measures().len(), 1);
    }
}
