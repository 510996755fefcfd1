//! Amazon CloudFront distribution configuration with tags.
//!
//! Only the members needed to exercise nested composites and lists are
//! modelled; everything else in a real payload is skipped as unknown.
use super::builders;
use crate::{Composite, FieldTable, impl_composite_decode};

/// A resource tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize),
    serde(rename_all = "PascalCase")
)]
pub struct Tag {
    /// Tag key.
    pub key: Option<String>,
    /// Tag value.
    pub value: Option<String>,
}

impl Composite for Tag {
    const NAME: &'static str = "Tag";

    fn fields() -> FieldTable<Self> {
        FieldTable::<Self>::new()
            .field("Key", |t, v| t.key = v)
            .field("Value", |t, v| t.value = v)
    }
}

builders!(Tag {
    with_key => key: String,
    with_value => value: String,
});

/// The tag list wrapper.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize),
    serde(rename_all = "PascalCase")
)]
pub struct Tags {
    /// The tags.
    pub items: Option<Vec<Tag>>,
}

impl Composite for Tags {
    const NAME: &'static str = "Tags";

    fn fields() -> FieldTable<Self> {
        FieldTable::<Self>::new().field("Items", |t, v| t.items = v)
    }
}

builders!(Tags {
    with_items => items: Vec<Tag>,
});

/// Alternate domain names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize),
    serde(rename_all = "PascalCase")
)]
pub struct Aliases {
    /// Number of entries in `items`.
    pub quantity: Option<i32>,
    /// The CNAMEs.
    pub items: Option<Vec<String>>,
}

impl Composite for Aliases {
    const NAME: &'static str = "Aliases";

    fn fields() -> FieldTable<Self> {
        FieldTable::<Self>::new()
            .field("Quantity", |a, v| a.quantity = v)
            .field("Items", |a, v| a.items = v)
    }
}

builders!(Aliases {
    with_quantity => quantity: i32,
    with_items => items: Vec<String>,
});

/// Distribution settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize),
    serde(rename_all = "PascalCase")
)]
pub struct DistributionConfig {
    /// Idempotency token chosen by the caller.
    pub caller_reference: Option<String>,
    /// Alternate domain names.
    pub aliases: Option<Aliases>,
    /// Object served for requests to the root URL.
    pub default_root_object: Option<String>,
    /// Free-form comment.
    pub comment: Option<String>,
    /// `PriceClass_All`, `PriceClass_200` or `PriceClass_100`.
    pub price_class: Option<String>,
    /// Whether the distribution accepts requests.
    pub enabled: Option<bool>,
    /// `http1.1`, `http2` and so on.
    pub http_version: Option<String>,
    /// Whether IPv6 is enabled.
    #[cfg_attr(any(test, feature = "serde"), serde(rename = "IsIPV6Enabled"))]
    pub is_ipv6_enabled: Option<bool>,
}

impl Composite for DistributionConfig {
    const NAME: &'static str = "DistributionConfig";

    fn fields() -> FieldTable<Self> {
        FieldTable::<Self>::new()
            .field("CallerReference", |d, v| d.caller_reference = v)
            .field("Aliases", |d, v| d.aliases = v)
            .field("DefaultRootObject", |d, v| d.default_root_object = v)
            .field("Comment", |d, v| d.comment = v)
            .field("PriceClass", |d, v| d.price_class = v)
            .field("Enabled", |d, v| d.enabled = v)
            .field("HttpVersion", |d, v| d.http_version = v)
            .field("IsIPV6Enabled", |d, v| d.is_ipv6_enabled = v)
    }
}

builders!(DistributionConfig {
    with_caller_reference => caller_reference: String,
    with_aliases => aliases: Aliases,
    with_default_root_object => default_root_object: String,
    with_comment => comment: String,
    with_price_class => price_class: String,
    with_enabled => enabled: bool,
    with_http_version => http_version: String,
    with_is_ipv6_enabled => is_ipv6_enabled: bool,
});

/// Request body of `CreateDistributionWithTags`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize),
    serde(rename_all = "PascalCase")
)]
pub struct DistributionConfigWithTags {
    /// The distribution's configuration.
    pub distribution_config: Option<DistributionConfig>,
    /// Tags applied on creation.
    pub tags: Option<Tags>,
}

impl Composite for DistributionConfigWithTags {
    const NAME: &'static str = "DistributionConfigWithTags";

    fn fields() -> FieldTable<Self> {
        FieldTable::<Self>::new()
            .field("DistributionConfig", |d, v| d.distribution_config = v)
            .field("Tags", |d, v| d.tags = v)
    }
}

builders!(DistributionConfigWithTags {
    with_distribution_config => distribution_config: DistributionConfig,
    with_tags => tags: Tags,
});

impl_composite_decode!(Tag, Tags, Aliases, DistributionConfig, DistributionConfigWithTags);
