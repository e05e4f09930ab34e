use proptest::prelude::*;
use recordquery::{
    FieldType, FilterCondition, Operator, QueryRequest, Record, Schema, SortDirection, apply_query, count_matching,
};
use serde_json::json;
use std::sync::LazyLock;

#[derive(Debug, Clone)]
struct Row {
    id: i64,
    v: Option<i64>,
}

static ROW: LazyLock<Schema<Row>> = LazyLock::new(|| {
    Schema::builder("Row")
        .field("Id", FieldType::Int, |r: &Row| r.id.into())
        .nullable("V", FieldType::Int, |r: &Row| r.v.into())
        .build()
});

impl Record for Row {
    fn schema() -> &'static Schema<Self> {
        &ROW
    }
}

fn rows(vals: &[Option<i64>]) -> Vec<Row> {
    vals.iter().enumerate().map(|(i, v)| Row { id: i as i64, v: *v }).collect()
}

fn ids(out: &[&Row]) -> Vec<i64> {
    out.iter().map(|r| r.id).collect()
}

fn any_values() -> impl Strategy<Value = Vec<Option<i64>>> {
    proptest::collection::vec(proptest::option::of(-20i64..20), 0..40)
}

proptest! {
    #![proptest_config(proptest::test_runner::Config {
        failure_persistence: Some(Box::new(proptest::test_runner::FileFailurePersistence::WithSource("proptest-regressions"))),
        .. proptest::test_runner::Config::default()
    })]

    // Each operator agrees with the plain integer comparison; nulls only pass neq.
    #[test]
    fn prop_operator_semantics(vals in any_values(), k in -20i64..20) {
        let data = rows(&vals);
        for op in [Operator::Eq, Operator::Neq, Operator::Gt, Operator::Gte, Operator::Lt, Operator::Lte] {
            let req = QueryRequest::new().unsorted().with_page(1, 1000).with_filter("V", FilterCondition::new(op, json!(k)));
            let got = ids(&apply_query(&data, &req).unwrap());
            let want: Vec<i64> = data
                .iter()
                .filter(|r| match (op, r.v) {
                    (Operator::Neq, None) => true,
                    (_, None) => false,
                    (Operator::Eq, Some(v)) => v == k,
                    (Operator::Neq, Some(v)) => v != k,
                    (Operator::Gt, Some(v)) => v > k,
                    (Operator::Gte, Some(v)) => v >= k,
                    (Operator::Lt, Some(v)) => v < k,
                    (Operator::Lte, Some(v)) => v <= k,
                    (Operator::In, Some(_)) => unreachable!(),
                })
                .map(|r| r.id)
                .collect();
            prop_assert_eq!(got, want, "operator {}", op);
        }
    }

    #[test]
    fn prop_in_matches_membership(vals in any_values(), set in proptest::collection::vec(-20i64..20, 0..6)) {
        let data = rows(&vals);
        let req = QueryRequest::new()
            .unsorted()
            .with_page(1, 1000)
            .with_filter("v", FilterCondition::is_in(set.iter().map(|s| json!(s)).collect()));
        let got = ids(&apply_query(&data, &req).unwrap());
        let want: Vec<i64> = data.iter().filter(|r| r.v.is_some_and(|v| set.contains(&v))).map(|r| r.id).collect();
        prop_assert_eq!(got, want);
    }

    // Sorting is stable: equal keys keep ascending id order in both directions.
    #[test]
    fn prop_sort_is_ordered_and_stable(vals in any_values(), desc in any::<bool>()) {
        let data = rows(&vals);
        let dir = if desc { SortDirection::Desc } else { SortDirection::Asc };
        let req = QueryRequest::new().with_sort("V", dir).with_page(1, 1000);
        let out = apply_query(&data, &req).unwrap();
        prop_assert_eq!(out.len(), data.len());
        for w in out.windows(2) {
            let (a, b) = (w[0], w[1]);
            if a.v == b.v {
                prop_assert!(a.id < b.id);
            } else if desc {
                prop_assert!(a.v > b.v);
            } else {
                prop_assert!(a.v < b.v);
            }
        }
    }

    // Consecutive pages concatenate to the unpaged result.
    #[test]
    fn prop_pages_partition_result(vals in any_values(), size in 1i64..7, k in -20i64..20) {
        let data = rows(&vals);
        let base = QueryRequest::new()
            .with_filter("V", FilterCondition::new(Operator::Gte, json!(k)))
            .with_sort("V", SortDirection::Desc);
        let all = ids(&apply_query(&data, &base.clone().with_page(1, 1000)).unwrap());
        let total = count_matching(&data, &base).unwrap();
        prop_assert_eq!(all.len(), total);
        let mut joined = Vec::new();
        let mut page = 1;
        loop {
            let chunk = ids(&apply_query(&data, &base.clone().with_page(page, size)).unwrap());
            prop_assert!(chunk.len() as i64 <= size);
            if chunk.is_empty() {
                break;
            }
            joined.extend(chunk);
            page += 1;
        }
        prop_assert_eq!(joined, all);
    }
}
