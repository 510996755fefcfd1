//! Decodes a task definition from a file (or a built-in sample) and prints a
//! summary of its containers.
//!
//! ```text
//! cargo run --example task_definition -- path/to/task-definition.json
//! ```
#![allow(missing_docs)]

use std::{env, fs, process::ExitCode};

use depthwalk::model::{self, ecs::TaskDefinition};

const SAMPLE: &str = r#"{
    "family": "web",
    "revision": 3,
    "containerDefinitions": [
        {"name": "nginx", "image": "nginx:1.25", "memory": 512,
         "portMappings": [{"containerPort": 80, "hostPort": 8080}]},
        {"name": "sidecar", "image": "envoy:1.30", "essential": false}
    ]
}"#;

fn main() -> ExitCode {
    let text = match env::args().nth(1) {
        Some(path) => match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                eprintln!("cannot read {path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => SAMPLE.to_owned(),
    };

    let registry = model::registry();
    let task: TaskDefinition = match registry.from_str(&text) {
        Ok(Some(task)) => task,
        Ok(None) => {
            eprintln!("document is null");
            return ExitCode::FAILURE;
        }
        Err(err) => {
            eprintln!("decode failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "{}:{}",
        task.family.as_deref().unwrap_or("?"),
        task.revision.unwrap_or_default()
    );
    for container in task.container_definitions.unwrap_or_default() {
        let ports: Vec<String> = container
            .port_mappings
            .unwrap_or_default()
            .iter()
            .map(|p| {
                format!(
                    "{}->{}",
                    p.host_port.unwrap_or_default(),
                    p.container_port.unwrap_or_default()
                )
            })
            .collect();
        println!(
            "  {:<10} {:<12} essential={} ports=[{}]",
            container.name.as_deref().unwrap_or("?"),
            container.image.as_deref().unwrap_or("?"),
            container.essential.unwrap_or(true),
            ports.join(", ")
        );
    }
    ExitCode::SUCCESS
}
