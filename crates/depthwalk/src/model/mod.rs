//! Sample generated models.
//!
//! These mirror the shape of types a service-SDK generator emits: every
//! member optional, camelCase (ECS) or PascalCase (CloudFront) wire names,
//! `with_*` builders, and a field table instead of hand-written parsing.
pub mod cloudfront;
pub mod ecs;

use crate::registry::Registry;

/// A registry with every sample model registered.
#[must_use]
pub fn registry() -> Registry {
    Registry::new()
        .with::<ecs::MountPoint>()
        .with::<ecs::PortMapping>()
        .with::<ecs::KeyValuePair>()
        .with::<ecs::ContainerDefinition>()
        .with::<ecs::TaskDefinition>()
        .with::<ecs::Deployment>()
        .with::<cloudfront::Tag>()
        .with::<cloudfront::Tags>()
        .with::<cloudfront::Aliases>()
        .with::<cloudfront::DistributionConfig>()
        .with::<cloudfront::DistributionConfigWithTags>()
}

// One `with_*` setter per member.
macro_rules! builders {
    ($t:ty { $($with:ident => $field:ident: $v:ty),+ $(,)? }) => {
        impl $t {
            $(
                #[doc = concat!("Sets `", stringify!($field), "`.")]
                #[must_use]
                pub fn $with(mut self, value: impl Into<$v>) -> Self {
                    self.$field = Some(value.into());
                    self
                }
            )+
        }
    };
}
pub(crate) use builders;

/// Writes timestamps the way the service sends them: epoch seconds.
#[cfg(any(test, feature = "serde"))]
#[allow(clippy::ref_option, clippy::cast_precision_loss)]
pub(crate) fn epoch_seconds<S: serde::Serializer>(
    value: &Option<time::OffsetDateTime>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(ts) if ts.nanosecond() == 0 => serializer.serialize_i64(ts.unix_timestamp()),
        Some(ts) => serializer.serialize_f64(
            ts.unix_timestamp() as f64 + f64::from(ts.nanosecond()) / 1e9,
        ),
        None => serializer.serialize_none(),
    }
}
