use quickcheck::QuickCheck;
use serde_json::{Map, Value};

use super::arbitrary::Junk;
use crate::model::{self, ecs::TaskDefinition};

/// Inserts `junk` members into `object` at positions driven by `slots`.
fn interleave(object: &mut Map<String, Value>, junk: &[Junk], slots: &[usize], prefix: &str) {
    let mut entries: Vec<(String, Value)> = std::mem::take(object).into_iter().collect();
    for (i, Junk(value)) in junk.iter().enumerate() {
        let at = slots.get(i).copied().unwrap_or(i) % (entries.len() + 1);
        entries.insert(at, (format!("{prefix}{i}"), value.clone()));
    }
    *object = entries.into_iter().collect();
}

/// Property: unknown members anywhere in a task definition or its containers
/// are skipped without disturbing the fields that follow them.
#[test]
fn unknown_fields_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(task: TaskDefinition, junk: Vec<Junk>, slots: Vec<usize>) -> bool {
        let mut value = serde_json::to_value(&task).unwrap();
        let Value::Object(root) = &mut value else {
            return false;
        };
        if let Some(Value::Array(containers)) = root.get_mut("containerDefinitions") {
            for container in containers {
                if let Value::Object(members) = container {
                    interleave(members, &junk, &slots, "logConfiguration");
                }
            }
        }
        interleave(root, &junk, &slots, "requiresAttributes");

        let json = serde_json::to_string(&value).unwrap();
        let decoded: Option<TaskDefinition> = model::registry().from_str(&json).unwrap();
        decoded == Some(task)
    }

    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(TaskDefinition, Vec<Junk>, Vec<usize>) -> bool);
}

#[test]
fn unknown_member_named_like_its_parent() {
    let json = r#"{
        "family": "web",
        "containerDefinitions": [
            {"containerDefinitions": {"containerDefinitions": [{"name": "ghost"}]}, "name": "real"}
        ],
        "revision": 7
    }"#;
    let task: TaskDefinition = model::registry().from_str(json).unwrap().unwrap();
    let containers = task.container_definitions.unwrap();
    assert_eq!(containers.len(), 1);
    assert_eq!(containers[0].name.as_deref(), Some("real"));
    assert_eq!(task.revision, Some(7));
}
