//! Snapshot tests
//!
//! Loads each *.yaml file in /tests/ individually, sorts its `records` by its `keys` and compares if the output
//! changes.
use keysort::value::Value;

fn fixture(value: Value) -> (Vec<String>, Vec<Value>) {
    let Value::Object(mut fixture) = value else {
        panic!("fixture must be a map with `keys` and `records`");
    };

    let keys = match fixture.shift_remove("keys") {
        Some(Value::Array(keys)) => keys
            .into_iter()
            .map(|key| match key {
                Value::String(key) => key,
                other => panic!("keys must be strings, got {other:?}"),
            })
            .collect(),
        other => panic!("fixture `keys` must be a list, got {other:?}"),
    };

    let Some(Value::Array(records)) = fixture.shift_remove("records") else {
        panic!("fixture `records` must be a list");
    };

    (keys, records)
}

#[test]
fn snapshots() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("KEYSORT_LOG"))
        .with_writer(std::io::stderr)
        .init();

    insta::glob!("*.yaml", |path| {
        let reader = std::fs::read_to_string(path).unwrap();
        let (keys, mut sorted) = fixture(serde_yaml::from_str(&reader).unwrap());

        let spec = keysort::sorter::by_keys(&keys).expect("must be valid sort keys");
        spec.sort(&mut sorted).expect("records must be sortable");

        insta::assert_yaml_snapshot!(sorted);
    });
}
