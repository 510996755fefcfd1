#[cfg(feature = "model")]
mod arbitrary;
#[cfg(feature = "model")]
mod property_unknown_fields;
