//! Benchmark for rule tree evaluation performance

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rulegate::rule::cache::clear_cache;
use rulegate::{Rule, RuleGroup, Value, ValueMap};

/// Build a realistic three-level eligibility tree
fn create_test_tree() -> RuleGroup {
    let account_checks = RuleGroup {
        logic: "and".to_string(),
        rules: vec![
            Rule::leaf("age", "gt_eq", 18),
            Rule::leaf("verified", "eq", true),
            Rule::leaf("country", "in", vec!["se", "no", "dk", "fi"]),
        ],
    };

    let activity_checks = RuleGroup {
        logic: "or".to_string(),
        rules: vec![
            Rule::leaf("orders", "gt", 10),
            Rule::leaf("tags", "has", "beta"),
            Rule::group(RuleGroup {
                logic: "and".to_string(),
                rules: vec![
                    Rule::leaf("email", "regex", r"@example\.(com|org)$"),
                    Rule::leaf("score", "gt_eq", 7.5),
                ],
            }),
        ],
    };

    account_checks.and(activity_checks)
}

fn create_test_values() -> ValueMap {
    let mut values = ValueMap::new();
    values.insert("age".to_string(), Value::from(27));
    values.insert("verified".to_string(), Value::from(true));
    values.insert("country".to_string(), Value::from("se"));
    values.insert("orders".to_string(), Value::from(3));
    values.insert("tags".to_string(), Value::from(vec!["trial", "newsletter"]));
    values.insert("email".to_string(), Value::from("ada@example.com"));
    values.insert("score".to_string(), Value::from(8.25));
    values
}

fn benchmark_evaluation(c: &mut Criterion) {
    let tree = create_test_tree();
    let values = create_test_values();

    c.bench_function("evaluate_nested_tree", |b| {
        b.iter(|| black_box(&tree).test(black_box(&values)))
    });
}

fn benchmark_regex_cache(c: &mut Criterion) {
    let tree = RuleGroup {
        logic: "and".to_string(),
        rules: vec![Rule::leaf("email", "regex", r"^[\w.+-]+@[\w-]+\.[\w.]+$")],
    };
    let values = create_test_values();

    c.bench_function("regex_leaf_cold", |b| {
        b.iter(|| {
            clear_cache();
            black_box(&tree).test(black_box(&values))
        })
    });

    c.bench_function("regex_leaf_cached", |b| {
        // Warm up cache
        let _ = tree.test(&values);

        b.iter(|| black_box(&tree).test(black_box(&values)))
    });
}

fn benchmark_construction(c: &mut Criterion) {
    let json = serde_json::to_string(&create_test_tree()).unwrap();

    c.bench_function("rule_group_from_json", |b| {
        b.iter(|| RuleGroup::from_json(black_box(&json)))
    });
}

criterion_group!(
    benches,
    benchmark_evaluation,
    benchmark_regex_cache,
    benchmark_construction
);
criterion_main!(benches);
