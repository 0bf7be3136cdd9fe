use serde_json::{Map, Value, json};

/// Field names of the Plan Document, shared by the response schema and the
/// serde models in [`crate::models::plan`].
pub mod field {
    pub const LESSON_PLAN: &str = "lesson_plan";

    pub const TITLE: &str = "title";
    pub const CURRICULAR_COMPONENT: &str = "curricular_component";
    pub const SUBJECT: &str = "subject";
    pub const GRADE: &str = "grade";
    pub const KNOWLEDGE_OBJECTS: &str = "knowledge_objects";
    pub const TOTAL_DURATION_MIN: &str = "total_duration_min";
    pub const LESSON_COUNT: &str = "lesson_count";
    pub const SPECIFIC_COMPETENCY: &str = "specific_competency";
    pub const SKILLS: &str = "skills";
    pub const LEARNING_OBJECTIVES: &str = "learning_objectives";
    pub const DESCRIPTORS: &str = "descriptors";
    pub const METHODOLOGY: &str = "methodology";
    pub const SUPPORT_MATERIALS: &str = "support_materials";
    pub const EVALUATION: &str = "evaluation";
    pub const REMEDIATION_ACTIVITIES: &str = "remediation_activities";
    pub const ACCESSIBILITY_ADAPTATIONS: &str = "accessibility_adaptations";
    pub const NOTES: &str = "notes";
    pub const EXPORT_FORMATS: &str = "export_formats";
    pub const VALIDATION_HASH: &str = "validation_hash";

    // Coded items (competency, skills, descriptors)
    pub const CODE: &str = "code";
    pub const TEXT: &str = "text";

    // Methodology stages
    pub const STAGE: &str = "stage";
    pub const DURATION_MIN: &str = "duration_min";
    pub const ACTIVITIES: &str = "activities";
    pub const RESOURCES: &str = "resources";

    // Support materials
    pub const KIND: &str = "kind";
    pub const MATERIAL_TITLE: &str = "title";
    pub const LINK: &str = "link";

    // Evaluation
    pub const CRITERIA: &str = "criteria";
    pub const INSTRUMENTS: &str = "instruments";
    pub const WEIGHTS: &str = "weights";
    pub const WEIGHT_TEST: &str = "test";
    pub const WEIGHT_ACTIVITY: &str = "activity";
    pub const WEIGHT_PARTICIPATION: &str = "participation";
}

fn string() -> Value {
    json!({ "type": "STRING" })
}

fn integer() -> Value {
    json!({ "type": "INTEGER" })
}

fn number() -> Value {
    json!({ "type": "NUMBER" })
}

fn array_of(items: Value) -> Value {
    json!({ "type": "ARRAY", "items": items })
}

/// Build an `OBJECT` node. `properties` order is kept as `propertyOrdering`
/// so the model emits fields in a stable, readable order.
fn object(properties: &[(&str, Value)], required: &[&str]) -> Value {
    let mut props = Map::new();
    for (name, schema) in properties {
        props.insert((*name).to_string(), schema.clone());
    }
    let ordering: Vec<&str> = properties.iter().map(|(name, _)| *name).collect();

    json!({
        "type": "OBJECT",
        "properties": props,
        "propertyOrdering": ordering,
        "required": required,
    })
}

fn coded_item() -> Value {
    object(
        &[(field::CODE, string()), (field::TEXT, string())],
        &[field::CODE, field::TEXT],
    )
}

fn methodology_stage() -> Value {
    object(
        &[
            (field::STAGE, string()),
            (field::DURATION_MIN, integer()),
            (field::ACTIVITIES, array_of(string())),
            (field::RESOURCES, array_of(string())),
        ],
        &[
            field::STAGE,
            field::DURATION_MIN,
            field::ACTIVITIES,
            field::RESOURCES,
        ],
    )
}

fn support_material() -> Value {
    object(
        &[
            (field::KIND, string()),
            (field::MATERIAL_TITLE, string()),
            (field::LINK, string()),
        ],
        &[field::KIND, field::MATERIAL_TITLE, field::LINK],
    )
}

fn evaluation() -> Value {
    let weights = object(
        &[
            (field::WEIGHT_TEST, number()),
            (field::WEIGHT_ACTIVITY, number()),
            (field::WEIGHT_PARTICIPATION, number()),
        ],
        &[
            field::WEIGHT_TEST,
            field::WEIGHT_ACTIVITY,
            field::WEIGHT_PARTICIPATION,
        ],
    );

    object(
        &[
            (field::CRITERIA, array_of(string())),
            (field::INSTRUMENTS, array_of(string())),
            (field::WEIGHTS, weights),
        ],
        &[field::CRITERIA, field::INSTRUMENTS],
    )
}

/// Build the structured-output schema sent with every generation request.
///
/// Uses the OpenAPI subset accepted by Gemini's `responseSchema`
/// (upper-case type names, `required` lists, no `$ref`).
pub fn build_response_schema() -> Value {
    let plan = object(
        &[
            (field::TITLE, string()),
            (field::CURRICULAR_COMPONENT, string()),
            (field::SUBJECT, string()),
            (field::GRADE, string()),
            (field::KNOWLEDGE_OBJECTS, array_of(string())),
            (field::TOTAL_DURATION_MIN, integer()),
            (field::LESSON_COUNT, integer()),
            (field::SPECIFIC_COMPETENCY, coded_item()),
            (field::SKILLS, array_of(coded_item())),
            (field::LEARNING_OBJECTIVES, array_of(string())),
            (field::DESCRIPTORS, array_of(coded_item())),
            (field::METHODOLOGY, array_of(methodology_stage())),
            (field::SUPPORT_MATERIALS, array_of(support_material())),
            (field::EVALUATION, evaluation()),
            (field::REMEDIATION_ACTIVITIES, array_of(string())),
            (field::ACCESSIBILITY_ADAPTATIONS, array_of(string())),
            (field::NOTES, string()),
            (field::EXPORT_FORMATS, array_of(string())),
            (field::VALIDATION_HASH, string()),
        ],
        &[
            field::TITLE,
            field::CURRICULAR_COMPONENT,
            field::SUBJECT,
            field::GRADE,
            field::KNOWLEDGE_OBJECTS,
            field::TOTAL_DURATION_MIN,
            field::LESSON_COUNT,
            field::SPECIFIC_COMPETENCY,
            field::SKILLS,
            field::LEARNING_OBJECTIVES,
            field::METHODOLOGY,
            field::SUPPORT_MATERIALS,
            field::EVALUATION,
            field::ACCESSIBILITY_ADAPTATIONS,
            field::NOTES,
        ],
    );

    object(&[(field::LESSON_PLAN, plan)], &[field::LESSON_PLAN])
}
