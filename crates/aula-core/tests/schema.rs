use aula_core::plan::parse_plan;
use aula_core::schema::{build_response_schema, field};
use serde_json::{Map, Value, json};

const FIXTURE: &str = include_str!("fixtures/plan.json");

/// Build the smallest document the schema allows: only required properties,
/// empty arrays, placeholder scalars.
fn minimal_instance(schema: &Value) -> Value {
    match schema["type"].as_str() {
        Some("OBJECT") => {
            let required: Vec<&str> = schema["required"]
                .as_array()
                .map(|r| r.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default();
            let mut obj = Map::new();
            for name in required {
                obj.insert(name.to_string(), minimal_instance(&schema["properties"][name]));
            }
            Value::Object(obj)
        }
        Some("ARRAY") => json!([]),
        Some("STRING") => json!("x"),
        Some("INTEGER") => json!(1),
        Some("NUMBER") => json!(1.0),
        other => panic!("unexpected schema type {other:?}"),
    }
}

fn plan_properties(schema: &Value) -> &Map<String, Value> {
    schema["properties"][field::LESSON_PLAN]["properties"]
        .as_object()
        .expect("lesson_plan properties")
}

#[test]
fn minimal_schema_instance_parses_as_plan() {
    let schema = build_response_schema();
    let instance = minimal_instance(&schema);

    let plan = parse_plan(&instance.to_string()).expect("minimal instance should parse");
    assert!(plan.descriptors.is_empty());
    assert!(plan.remediation_activities.is_none());
    assert!(plan.evaluation.weights.is_none());
}

#[test]
fn every_serialized_field_is_declared_in_schema() {
    let schema = build_response_schema();
    let props = plan_properties(&schema);

    let plan = parse_plan(FIXTURE).unwrap();
    let value = serde_json::to_value(&plan).unwrap();

    for key in value.as_object().unwrap().keys() {
        assert!(props.contains_key(key), "field {key} missing from schema");
    }
}

#[test]
fn optional_fields_are_not_required() {
    let schema = build_response_schema();
    let required: Vec<&str> = schema["properties"][field::LESSON_PLAN]["required"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();

    for optional in [
        field::DESCRIPTORS,
        field::REMEDIATION_ACTIVITIES,
        field::EXPORT_FORMATS,
        field::VALIDATION_HASH,
    ] {
        assert!(!required.contains(&optional), "{optional} should be optional");
    }
    assert!(required.contains(&field::METHODOLOGY));
    assert!(required.contains(&field::ACCESSIBILITY_ADAPTATIONS));
}

#[test]
fn nested_objects_declare_their_required_fields() {
    let schema = build_response_schema();
    let props = plan_properties(&schema);

    assert_eq!(
        props[field::SPECIFIC_COMPETENCY]["required"],
        json!([field::CODE, field::TEXT])
    );
    assert_eq!(
        props[field::METHODOLOGY]["items"]["required"],
        json!([
            field::STAGE,
            field::DURATION_MIN,
            field::ACTIVITIES,
            field::RESOURCES
        ])
    );
    assert_eq!(
        props[field::EVALUATION]["properties"][field::WEIGHTS]["required"],
        json!([
            field::WEIGHT_TEST,
            field::WEIGHT_ACTIVITY,
            field::WEIGHT_PARTICIPATION
        ])
    );
}

/// Build the largest document the schema allows: every property present,
/// one element per array.
fn full_instance(schema: &Value) -> Value {
    match schema["type"].as_str() {
        Some("OBJECT") => {
            let mut obj = Map::new();
            for (name, sub) in schema["properties"].as_object().expect("properties") {
                obj.insert(name.clone(), full_instance(sub));
            }
            Value::Object(obj)
        }
        Some("ARRAY") => json!([full_instance(&schema["items"])]),
        other => minimal_instance(&json!({ "type": other })),
    }
}

/// Paths to every property the schema does not require, descending through
/// the first element of arrays.
fn optional_paths(schema: &Value, prefix: &mut Vec<String>, out: &mut Vec<Vec<String>>) {
    match schema["type"].as_str() {
        Some("OBJECT") => {
            let required: Vec<&str> = schema["required"]
                .as_array()
                .map(|r| r.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default();
            for (name, sub) in schema["properties"].as_object().expect("properties") {
                prefix.push(name.clone());
                if !required.contains(&name.as_str()) {
                    out.push(prefix.clone());
                }
                optional_paths(sub, prefix, out);
                prefix.pop();
            }
        }
        Some("ARRAY") => {
            prefix.push("0".to_string());
            optional_paths(&schema["items"], prefix, out);
            prefix.pop();
        }
        _ => {}
    }
}

fn remove_at(value: &mut Value, path: &[String]) {
    let (last, parents) = path.split_last().expect("non-empty path");
    let mut node = value;
    for segment in parents {
        node = match node {
            Value::Array(items) => &mut items[segment.parse::<usize>().unwrap()],
            other => &mut other[segment.as_str()],
        };
    }
    node.as_object_mut().unwrap().remove(last);
}

#[test]
fn full_schema_instance_parses_as_plan() {
    let schema = build_response_schema();
    let plan = parse_plan(&full_instance(&schema).to_string()).expect("full instance");

    assert_eq!(plan.descriptors.len(), 1);
    assert_eq!(plan.remediation_activities.as_ref().map(Vec::len), Some(1));
    assert_eq!(plan.evaluation.weights.map(|w| w.test), Some(1.0));
    assert!(plan.export_formats.is_some());
    assert!(plan.validation_hash.is_some());
}

#[test]
fn every_optional_property_may_be_omitted() {
    let schema = build_response_schema();
    let full = full_instance(&schema);

    let mut paths = Vec::new();
    optional_paths(&schema, &mut Vec::new(), &mut paths);

    let dotted: Vec<String> = paths.iter().map(|p| p.join(".")).collect();
    for expected in [
        "lesson_plan.descriptors",
        "lesson_plan.remediation_activities",
        "lesson_plan.export_formats",
        "lesson_plan.validation_hash",
        "lesson_plan.evaluation.weights",
    ] {
        assert!(dotted.iter().any(|p| p == expected), "{expected} should be optional");
    }

    for path in &paths {
        let mut doc = full.clone();
        remove_at(&mut doc, path);
        if let Err(e) = parse_plan(&doc.to_string()) {
            panic!("omitting {} was rejected: {e}", path.join("."));
        }
    }
}

#[test]
fn partial_weights_are_rejected_by_both_schema_and_parser() {
    let schema = build_response_schema();
    let weights = &plan_properties(&schema)[field::EVALUATION]["properties"][field::WEIGHTS];
    assert_eq!(weights["required"].as_array().map(Vec::len), Some(3));

    let mut doc: Value = serde_json::from_str(FIXTURE).unwrap();
    doc[field::LESSON_PLAN][field::EVALUATION][field::WEIGHTS] = json!({ "test": 0.5 });
    assert!(parse_plan(&doc.to_string()).is_err());

    doc[field::LESSON_PLAN][field::EVALUATION]
        .as_object_mut()
        .unwrap()
        .remove(field::WEIGHTS);
    let plan = parse_plan(&doc.to_string()).unwrap();
    assert!(plan.evaluation.weights.is_none());
}
