use quickcheck::{Arbitrary, Gen};
use serde_json::{Map, Value};
use time::OffsetDateTime;

use crate::model::{
    cloudfront::{Aliases, DistributionConfig, DistributionConfigWithTags, Tag, Tags},
    ecs::{ContainerDefinition, Deployment, KeyValuePair, MountPoint, PortMapping, TaskDefinition},
};

fn small_vec<T: Arbitrary>(g: &mut Gen, max: usize) -> Option<Vec<T>> {
    Option::<Vec<T>>::arbitrary(g).map(|mut items| {
        items.truncate(max);
        items
    })
}

/// Epoch timestamps after 2001 with millisecond precision, as the services
/// send them.
fn timestamp(g: &mut Gen) -> Option<OffsetDateTime> {
    let (secs, millis) = Option::<(u32, u16)>::arbitrary(g)?;
    let secs = 1_000_000_000 + i128::from(secs % 1_000_000_000);
    let nanos = secs * 1_000_000_000 + i128::from(millis % 1000) * 1_000_000;
    OffsetDateTime::from_unix_timestamp_nanos(nanos).ok()
}

impl Arbitrary for MountPoint {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            source_volume: Arbitrary::arbitrary(g),
            container_path: Arbitrary::arbitrary(g),
            read_only: Arbitrary::arbitrary(g),
        }
    }
}

impl Arbitrary for PortMapping {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            container_port: Arbitrary::arbitrary(g),
            host_port: Arbitrary::arbitrary(g),
            protocol: Arbitrary::arbitrary(g),
        }
    }
}

impl Arbitrary for KeyValuePair {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            name: Arbitrary::arbitrary(g),
            value: Arbitrary::arbitrary(g),
        }
    }
}

impl Arbitrary for ContainerDefinition {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            name: Arbitrary::arbitrary(g),
            image: Arbitrary::arbitrary(g),
            cpu: Arbitrary::arbitrary(g),
            memory: Arbitrary::arbitrary(g),
            essential: Arbitrary::arbitrary(g),
            entry_point: small_vec(g, 4),
            command: small_vec(g, 4),
            environment: small_vec(g, 4),
            mount_points: small_vec(g, 4),
            port_mappings: small_vec(g, 4),
            docker_labels: Arbitrary::arbitrary(g),
        }
    }
}

impl Arbitrary for TaskDefinition {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            task_definition_arn: Arbitrary::arbitrary(g),
            family: Arbitrary::arbitrary(g),
            revision: Arbitrary::arbitrary(g),
            status: Arbitrary::arbitrary(g),
            cpu: Arbitrary::arbitrary(g),
            memory: Arbitrary::arbitrary(g),
            container_definitions: small_vec(g, 3),
            registered_at: timestamp(g),
        }
    }
}

impl Arbitrary for Deployment {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            id: Arbitrary::arbitrary(g),
            status: Arbitrary::arbitrary(g),
            task_definition: Arbitrary::arbitrary(g),
            desired_count: Arbitrary::arbitrary(g),
            pending_count: Arbitrary::arbitrary(g),
            running_count: Arbitrary::arbitrary(g),
            created_at: timestamp(g),
            updated_at: timestamp(g),
        }
    }
}

impl Arbitrary for Tag {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            key: Arbitrary::arbitrary(g),
            value: Arbitrary::arbitrary(g),
        }
    }
}

impl Arbitrary for Tags {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            items: small_vec(g, 4),
        }
    }
}

impl Arbitrary for Aliases {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            quantity: Arbitrary::arbitrary(g),
            items: small_vec(g, 4),
        }
    }
}

impl Arbitrary for DistributionConfig {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            caller_reference: Arbitrary::arbitrary(g),
            aliases: Arbitrary::arbitrary(g),
            default_root_object: Arbitrary::arbitrary(g),
            comment: Arbitrary::arbitrary(g),
            price_class: Arbitrary::arbitrary(g),
            enabled: Arbitrary::arbitrary(g),
            http_version: Arbitrary::arbitrary(g),
            is_ipv6_enabled: Arbitrary::arbitrary(g),
        }
    }
}

impl Arbitrary for DistributionConfigWithTags {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            distribution_config: Arbitrary::arbitrary(g),
            tags: Arbitrary::arbitrary(g),
        }
    }
}

/// An arbitrary JSON value standing in for members a model does not know.
///
/// Object keys are drawn from real member names so skipped values often
/// contain fields named like the enclosing composite's own.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Junk(pub Value);

const JUNK_KEYS: &[&str] = &[
    "name",
    "family",
    "containerDefinitions",
    "mountPoints",
    "sourceVolume",
    "x",
];

impl Arbitrary for Junk {
    fn arbitrary(g: &mut Gen) -> Self {
        fn gen_val(g: &mut Gen, depth: usize) -> Value {
            let choices = if depth == 0 { 4 } else { 6 };
            match usize::arbitrary(g) % choices {
                0 => Value::Null,
                1 => Value::Bool(bool::arbitrary(g)),
                2 => Value::from(i64::arbitrary(g)),
                3 => Value::String(String::arbitrary(g)),
                4 => {
                    let len = usize::arbitrary(g) % 3;
                    Value::Array((0..len).map(|_| gen_val(g, depth - 1)).collect())
                }
                _ => {
                    let len = usize::arbitrary(g) % 3;
                    let mut map = Map::new();
                    for _ in 0..len {
                        let key = (*g.choose(JUNK_KEYS).unwrap_or(&"x")).to_owned();
                        map.insert(key, gen_val(g, depth - 1));
                    }
                    Value::Object(map)
                }
            }
        }

        let depth = usize::arbitrary(g) % 4;
        Junk(gen_val(g, depth))
    }
}
