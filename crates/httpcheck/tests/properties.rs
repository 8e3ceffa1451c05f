//! Property tests for whole-request checks.

use httpcheck::prelude::*;
use proptest::prelude::*;

fn field_type() -> impl Strategy<Value = FieldType> {
    prop_oneof![
        Just(FieldType::Int),
        Just(FieldType::Float),
        Just(FieldType::Bool),
        Just(FieldType::String),
        Just(FieldType::Empty),
    ]
}

fn field_spec() -> impl Strategy<Value = FieldSpec> {
    ("[a-z]{1,8}", field_type(), any::<bool>()).prop_map(|(key, ty, nullable)| {
        if nullable {
            FieldSpec::nullable(key, ty)
        } else {
            FieldSpec::required(key, ty)
        }
    })
}

fn query_value() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        any::<i32>().prop_map(|n| n.to_string()),
        Just("true".to_string()),
        "[a-z]{1,6}",
    ]
}

proptest! {
    #[test]
    fn success_means_every_declared_key_is_present(
        params in prop::collection::vec(field_spec(), 0..4),
        queries in prop::collection::vec(field_spec(), 0..4),
        values in prop::collection::vec(("[a-z]{1,8}", query_value()), 0..6),
    ) {
        let mut builder = Schema::builder();
        for spec in params {
            builder = builder.param(spec);
        }
        for spec in queries {
            builder = builder.query(spec);
        }
        let schema = builder.build();

        let mut ctx = RequestContextBuilder::new();
        for (key, value) in &values {
            ctx = ctx.path_param(key, value.clone());
        }
        let query: Vec<String> = values.iter().map(|(k, v)| format!("{k}={v}")).collect();
        let uri = format!("/r?{}", query.join("&"));
        let ctx = ctx.uri(uri.parse().unwrap()).build();

        let result = check(&ctx, &schema);

        if result.is_success() {
            for spec in schema.params() {
                prop_assert!(result.params.contains_key(spec.key()));
            }
            for spec in schema.queries() {
                prop_assert!(result.queries.contains_key(spec.key()));
            }
        } else {
            prop_assert_eq!(result.status, http::StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn string_queries_pass_through_unchanged(value in "[a-zA-Z0-9]{1,16}") {
        let schema = Schema::builder()
            .query(FieldSpec::required("v", FieldType::String))
            .build();
        let uri = format!("/r?v={value}");
        let ctx = RequestContextBuilder::new().uri(uri.parse().unwrap()).build();

        let result = check(&ctx, &schema);

        prop_assert_eq!(
            result.get(FieldSource::Queries, "v"),
            Some(&TypedValue::Text(value))
        );
    }
}
