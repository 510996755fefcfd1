//! Amazon ECS task-definition and service-deployment types.
use std::collections::BTreeMap;

use time::OffsetDateTime;

use super::builders;
use crate::{Composite, FieldTable, impl_composite_decode};

/// A volume mounted into a container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct MountPoint {
    /// Name of the task volume to mount.
    pub source_volume: Option<String>,
    /// Path inside the container.
    pub container_path: Option<String>,
    /// Whether the container gets read-only access.
    pub read_only: Option<bool>,
}

impl Composite for MountPoint {
    const NAME: &'static str = "MountPoint";

    fn fields() -> FieldTable<Self> {
        FieldTable::<Self>::new()
            .field("sourceVolume", |m, v| m.source_volume = v)
            .field("containerPath", |m, v| m.container_path = v)
            .field("readOnly", |m, v| m.read_only = v)
    }
}

builders!(MountPoint {
    with_source_volume => source_volume: String,
    with_container_path => container_path: String,
    with_read_only => read_only: bool,
});

/// A container port published on the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct PortMapping {
    /// Port the container listens on.
    pub container_port: Option<i32>,
    /// Port on the container instance.
    pub host_port: Option<i32>,
    /// `tcp` or `udp`.
    pub protocol: Option<String>,
}

impl Composite for PortMapping {
    const NAME: &'static str = "PortMapping";

    fn fields() -> FieldTable<Self> {
        FieldTable::<Self>::new()
            .field("containerPort", |p, v| p.container_port = v)
            .field("hostPort", |p, v| p.host_port = v)
            .field("protocol", |p, v| p.protocol = v)
    }
}

builders!(PortMapping {
    with_container_port => container_port: i32,
    with_host_port => host_port: i32,
    with_protocol => protocol: String,
});

/// An environment variable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
pub struct KeyValuePair {
    /// Variable name.
    pub name: Option<String>,
    /// Variable value.
    pub value: Option<String>,
}

impl Composite for KeyValuePair {
    const NAME: &'static str = "KeyValuePair";

    fn fields() -> FieldTable<Self> {
        FieldTable::<Self>::new()
            .field("name", |p, v| p.name = v)
            .field("value", |p, v| p.value = v)
    }
}

builders!(KeyValuePair {
    with_name => name: String,
    with_value => value: String,
});

/// One container of a task definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct ContainerDefinition {
    /// Container name, unique within the task.
    pub name: Option<String>,
    /// Image reference.
    pub image: Option<String>,
    /// CPU units reserved.
    pub cpu: Option<i32>,
    /// Hard memory limit in MiB.
    pub memory: Option<i32>,
    /// Whether the task stops when this container stops.
    pub essential: Option<bool>,
    /// Entry point override.
    pub entry_point: Option<Vec<String>>,
    /// Command override.
    pub command: Option<Vec<String>>,
    /// Environment variables.
    pub environment: Option<Vec<KeyValuePair>>,
    /// Volume mounts.
    pub mount_points: Option<Vec<MountPoint>>,
    /// Published ports.
    pub port_mappings: Option<Vec<PortMapping>>,
    /// Docker labels.
    pub docker_labels: Option<BTreeMap<String, String>>,
}

impl Composite for ContainerDefinition {
    const NAME: &'static str = "ContainerDefinition";

    fn fields() -> FieldTable<Self> {
        FieldTable::<Self>::new()
            .field("name", |c, v| c.name = v)
            .field("image", |c, v| c.image = v)
            .field("cpu", |c, v| c.cpu = v)
            .field("memory", |c, v| c.memory = v)
            .field("essential", |c, v| c.essential = v)
            .field("entryPoint", |c, v| c.entry_point = v)
            .field("command", |c, v| c.command = v)
            .field("environment", |c, v| c.environment = v)
            .field("mountPoints", |c, v| c.mount_points = v)
            .field("portMappings", |c, v| c.port_mappings = v)
            .field("dockerLabels", |c, v| c.docker_labels = v)
    }
}

builders!(ContainerDefinition {
    with_name => name: String,
    with_image => image: String,
    with_cpu => cpu: i32,
    with_memory => memory: i32,
    with_essential => essential: bool,
    with_entry_point => entry_point: Vec<String>,
    with_command => command: Vec<String>,
    with_environment => environment: Vec<KeyValuePair>,
    with_mount_points => mount_points: Vec<MountPoint>,
    with_port_mappings => port_mappings: Vec<PortMapping>,
    with_docker_labels => docker_labels: BTreeMap<String, String>,
});

/// A registered task definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct TaskDefinition {
    /// Full ARN.
    pub task_definition_arn: Option<String>,
    /// Family the revision belongs to.
    pub family: Option<String>,
    /// Revision number within the family.
    pub revision: Option<i32>,
    /// `ACTIVE` or `INACTIVE`.
    pub status: Option<String>,
    /// Task-level CPU, as the service's string form.
    pub cpu: Option<String>,
    /// Task-level memory, as the service's string form.
    pub memory: Option<String>,
    /// The containers.
    pub container_definitions: Option<Vec<ContainerDefinition>>,
    /// When the revision was registered.
    #[cfg_attr(
        any(test, feature = "serde"),
        serde(serialize_with = "super::epoch_seconds")
    )]
    pub registered_at: Option<OffsetDateTime>,
}

impl Composite for TaskDefinition {
    const NAME: &'static str = "TaskDefinition";

    fn fields() -> FieldTable<Self> {
        FieldTable::<Self>::new()
            .field("taskDefinitionArn", |t, v| t.task_definition_arn = v)
            .field("family", |t, v| t.family = v)
            .field("revision", |t, v| t.revision = v)
            .field("status", |t, v| t.status = v)
            .field("cpu", |t, v| t.cpu = v)
            .field("memory", |t, v| t.memory = v)
            .field("containerDefinitions", |t, v| t.container_definitions = v)
            .field("registeredAt", |t, v| t.registered_at = v)
    }
}

builders!(TaskDefinition {
    with_task_definition_arn => task_definition_arn: String,
    with_family => family: String,
    with_revision => revision: i32,
    with_status => status: String,
    with_cpu => cpu: String,
    with_memory => memory: String,
    with_container_definitions => container_definitions: Vec<ContainerDefinition>,
    with_registered_at => registered_at: OffsetDateTime,
});

/// One deployment of a service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct Deployment {
    /// Deployment id.
    pub id: Option<String>,
    /// `PRIMARY`, `ACTIVE` or `INACTIVE`.
    pub status: Option<String>,
    /// ARN of the task definition being deployed.
    pub task_definition: Option<String>,
    /// Tasks the deployment should run.
    pub desired_count: Option<i32>,
    /// Tasks still starting.
    pub pending_count: Option<i32>,
    /// Tasks running.
    pub running_count: Option<i32>,
    /// Creation time.
    #[cfg_attr(
        any(test, feature = "serde"),
        serde(serialize_with = "super::epoch_seconds")
    )]
    pub created_at: Option<OffsetDateTime>,
    /// Last update time.
    #[cfg_attr(
        any(test, feature = "serde"),
        serde(serialize_with = "super::epoch_seconds")
    )]
    pub updated_at: Option<OffsetDateTime>,
}

impl Composite for Deployment {
    const NAME: &'static str = "Deployment";

    fn fields() -> FieldTable<Self> {
        FieldTable::<Self>::new()
            .field("id", |d, v| d.id = v)
            .field("status", |d, v| d.status = v)
            .field("taskDefinition", |d, v| d.task_definition = v)
            .field("desiredCount", |d, v| d.desired_count = v)
            .field("pendingCount", |d, v| d.pending_count = v)
            .field("runningCount", |d, v| d.running_count = v)
            .field("createdAt", |d, v| d.created_at = v)
            .field("updatedAt", |d, v| d.updated_at = v)
    }
}

builders!(Deployment {
    with_id => id: String,
    with_status => status: String,
    with_task_definition => task_definition: String,
    with_desired_count => desired_count: i32,
    with_pending_count => pending_count: i32,
    with_running_count => running_count: i32,
    with_created_at => created_at: OffsetDateTime,
    with_updated_at => updated_at: OffsetDateTime,
});

impl_composite_decode!(
    MountPoint,
    PortMapping,
    KeyValuePair,
    ContainerDefinition,
    TaskDefinition,
    Deployment,
);
