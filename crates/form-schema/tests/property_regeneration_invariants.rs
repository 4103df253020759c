use form_schema::{
    compute_schema, ComputeSchemaArgs, ComputedSchema, ComputedSchemaStatus, Schema, SchemaItem,
    SchemaLimits,
};
use proptest::prelude::*;
use serde_json::{Map, Value};

fn json_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        (-1000i64..1000).prop_map(Value::from),
        "[a-z ]{0,8}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..3).prop_map(Value::Array),
            prop::collection::vec(("[a-zA-Z_ 0-9]{1,6}", inner), 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

fn sample_strategy() -> impl Strategy<Value = Value> {
    prop::collection::vec(("[a-z]{1,6}", json_strategy()), 0..6)
        .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>()))
}

fn run(curr: &Value, prev: Option<&Schema>) -> ComputedSchema {
    compute_schema(ComputeSchemaArgs {
        curr_source_data: curr,
        prev_source_data: prev.map(|s| &s["__root_schema__"].source_data),
        prev_schema: prev,
        current_dynamic_property_path_list: &[],
        widget_name: "Form1",
        field_theme_stylesheets: None,
    })
}

fn non_root_count(schema: &Schema) -> usize {
    schema.values().map(SchemaItem::count).sum::<usize>() - schema.len()
}

fn siblings_have_unique_accessors(item: &SchemaItem) -> bool {
    let mut seen = std::collections::HashSet::new();
    item.children.values().all(|c| seen.insert(c.accessor.as_str()))
        && item.children.values().all(siblings_have_unique_accessors)
}

fn depth(item: &SchemaItem) -> usize {
    item.children.values().map(|c| 1 + depth(c)).max().unwrap_or(0)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        failure_persistence: None,
        ..ProptestConfig::default()
    })]

    #[test]
    fn regeneration_with_same_sample_is_unchanged(sample in sample_strategy()) {
        let first = run(&sample, None);
        prop_assume!(first.status == ComputedSchemaStatus::Updated);
        let second = run(&sample, Some(&first.schema));
        prop_assert_eq!(second.status, ComputedSchemaStatus::Unchanged);
    }

    #[test]
    fn generated_schema_respects_limits(sample in sample_strategy()) {
        let limits = SchemaLimits::default();
        let out = run(&sample, None);
        match out.status {
            ComputedSchemaStatus::Updated => {
                prop_assert!(non_root_count(&out.schema) <= limits.max_field_count);
                let root = &out.schema["__root_schema__"];
                prop_assert!(depth(root) <= limits.max_nesting_level);
                prop_assert!(siblings_have_unique_accessors(root));
            }
            ComputedSchemaStatus::LimitExceeded => prop_assert!(out.schema.is_empty()),
            ComputedSchemaStatus::Unchanged => prop_assert!(false, "no previous sample"),
        }
    }

    #[test]
    fn merge_keeps_limits_and_unique_accessors(a in sample_strategy(), b in sample_strategy()) {
        let first = run(&a, None);
        prop_assume!(first.status == ComputedSchemaStatus::Updated);
        let second = run(&b, Some(&first.schema));
        if second.status == ComputedSchemaStatus::Updated {
            let root = &second.schema["__root_schema__"];
            prop_assert!(non_root_count(&second.schema) <= SchemaLimits::default().max_field_count);
            prop_assert!(siblings_have_unique_accessors(root));
            prop_assert_eq!(&root.source_data, &b);
        } else if second.status == ComputedSchemaStatus::LimitExceeded {
            prop_assert_eq!(&second.schema, &first.schema);
        }
    }
}
