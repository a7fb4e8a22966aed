#[cfg(test)]
mod tests {
    use metric_schema::model::{ColumnField, Transform, TransformFunction, TransformPipeline};

    fn pipeline() -> TransformPipeline {
        TransformPipeline::from(vec![
            Transform::new(TransformFunction::Trim),
            Transform::new(TransformFunction::Lower),
            Transform::new(TransformFunction::Coalesce).with_param("default", "unknown"),
        ])
    }

    fn functions(pipeline: &TransformPipeline) -> Vec<TransformFunction> {
        pipeline.iter().map(|t| t.function).collect()
    }

    #[test]
    fn test_move_there_and_back_restores_order() {
        let original = pipeline();
        let moved = original.move_by(0, 2);
        assert_eq!(
            functions(&moved),
            vec![
                TransformFunction::Lower,
                TransformFunction::Coalesce,
                TransformFunction::Trim
            ]
        );
        assert_eq!(moved.move_by(2, -2), original);
    }

    #[test]
    fn test_out_of_range_move_is_noop() {
        let original = pipeline();
        assert_eq!(original.move_by(0, -1), original);
        assert_eq!(original.move_by(2, 1), original);
        assert_eq!(original.move_by(5, -1), original);
    }

    #[test]
    fn test_edits_do_not_mutate_source() {
        let original = pipeline();
        let removed = original.remove(1);
        let updated = original.update(0, Transform::new(TransformFunction::Upper));

        assert_eq!(original.len(), 3);
        assert_eq!(removed.len(), 2);
        assert_eq!(updated.get(0).map(|t| t.function), Some(TransformFunction::Upper));
        assert_eq!(original.get(0).map(|t| t.function), Some(TransformFunction::Trim));
    }

    #[test]
    fn test_column_field_transform_edits() {
        let field = ColumnField::qualified("customers", "name")
            .add_transform(Transform::new(TransformFunction::Trim))
            .add_transform(Transform::new(TransformFunction::Upper));

        let swapped = field.move_transform(1, -1);
        assert_eq!(
            functions(&swapped.transforms),
            vec![TransformFunction::Upper, TransformFunction::Trim]
        );
        assert_eq!(swapped.table_name(), Some("customers"));
        assert_eq!(field.remove_transform(0).transforms.len(), 1);
    }

    #[test]
    fn test_pipeline_serializes_as_array() {
        let json = serde_json::to_value(pipeline()).unwrap();
        assert_eq!(json.as_array().map(Vec::len), Some(3));
        assert_eq!(json[0]["function"], "TRIM");
        assert_eq!(json[2]["params"]["default"], "unknown");
    }
}
