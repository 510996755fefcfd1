//! The field-driven composite decoder.
//!
//! A composite type describes itself once as a [`FieldTable`]: field name to
//! decoding rule. A single generic [`Unmarshaller`] walks the token stream and
//! dispatches on that table, so adding a type never adds decoding logic.
use core::fmt;
use std::collections::HashMap;

use tracing::{trace, warn};

use crate::{
    cursor::Cursor,
    decode::{Decode, Shape},
    error::DecodeError,
    registry::Registry,
    token::{Token, TokenKind},
};

/// A JSON object mapped onto a Rust struct by a [`FieldTable`].
///
/// Implementors usually also invoke [`impl_composite_decode!`] so the type
/// can appear as a field of another composite or inside a collection.
///
/// [`impl_composite_decode!`]: crate::impl_composite_decode
pub trait Composite: Default + Send + Sync + 'static {
    /// Type name used in shapes, logs and errors.
    const NAME: &'static str;

    /// Builds the field table. Called once per registration.
    fn fields() -> FieldTable<Self>;
}

type Assign<T> =
    Box<dyn Fn(&mut Cursor<'_>, &Registry, &mut T) -> Result<(), DecodeError> + Send + Sync>;

struct FieldRule<T> {
    name: &'static str,
    shape: Shape,
    assign: Assign<T>,
}

/// Field name to decoding rule for one composite type.
///
/// ```
/// use depthwalk::FieldTable;
///
/// #[derive(Default)]
/// struct Volume {
///     name: Option<String>,
///     size: Option<u32>,
/// }
///
/// let table = FieldTable::<Volume>::new()
///     .field("name", |v, x| v.name = x)
///     .field("sizeInGiB", |v, x| v.size = x);
/// let shapes: Vec<String> = table.fields().map(|(n, s)| format!("{n}: {s}")).collect();
/// assert_eq!(shapes, ["name: string", "sizeInGiB: u32"]);
/// ```
pub struct FieldTable<T> {
    rules: Vec<FieldRule<T>>,
    // name -> position in `rules`
    index: HashMap<&'static str, usize>,
}

impl<T> Default for FieldTable<T> {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> fmt::Debug for FieldTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.rules.iter().map(|r| (r.name, &r.shape)))
            .finish()
    }
}

impl<T: 'static> FieldTable<T> {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule decoding field `name` as a `V` and storing it with `set`.
    ///
    /// `set` receives `None` when the field's value is `null`. Declaring the
    /// same name twice replaces the earlier rule.
    #[must_use]
    pub fn field<V: Decode + 'static>(
        mut self,
        name: &'static str,
        set: fn(&mut T, Option<V>),
    ) -> Self {
        let assign: Assign<T> = Box::new(
            move |cursor: &mut Cursor<'_>, registry: &Registry, target: &mut T| {
                let value = V::decode(cursor, registry)?;
                set(target, value);
                Ok(())
            },
        );
        let rule = FieldRule {
            name,
            shape: V::shape(),
            assign,
        };
        if let Some(&at) = self.index.get(name) {
            warn!(field = name, "field declared twice, keeping the later rule");
            self.rules[at] = rule;
        } else {
            self.index.insert(name, self.rules.len());
            self.rules.push(rule);
        }
        self
    }

    fn rule(&self, name: &str) -> Option<&FieldRule<T>> {
        self.index.get(name).map(|&at| &self.rules[at])
    }

    /// The shape registered for `name`.
    #[must_use]
    pub fn shape(&self, name: &str) -> Option<&Shape> {
        self.rule(name).map(|r| &r.shape)
    }

    /// Every field and its shape, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &Shape)> {
        self.rules.iter().map(|r| (r.name, &r.shape))
    }

    /// Number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no field is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Decodes one composite type by walking the token stream at a fixed depth.
///
/// Built once from [`Composite::fields`] and immutable afterwards, so one
/// instance can serve any number of concurrent decodes.
pub struct Unmarshaller<T> {
    fields: FieldTable<T>,
}

impl<T> fmt::Debug for Unmarshaller<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unmarshaller")
            .field("fields", &self.fields)
            .finish()
    }
}

impl<T: Composite> Default for Unmarshaller<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Composite> Unmarshaller<T> {
    /// Builds the unmarshaller from `T`'s field table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fields: T::fields(),
        }
    }

    /// The field table driving this unmarshaller.
    #[must_use]
    pub fn fields(&self) -> &FieldTable<T> {
        &self.fields
    }

    /// Decodes one `T`.
    ///
    /// The cursor is either unset, in which case the first token is fetched
    /// here, or sits on the object's opening token. On success it is left on
    /// the object's closing token.
    ///
    /// An empty stream yields `T::default()` and a leading `null` yields
    /// `None` after consuming that single token. Fields without a rule are
    /// skipped together with their values.
    ///
    /// # Errors
    ///
    /// Fails when the first token is neither an object nor `null`, when a
    /// field's value does not decode, or when the stream ends inside the
    /// object.
    pub fn unmarshall(
        &self,
        cursor: &mut Cursor<'_>,
        registry: &Registry,
    ) -> Result<Option<T>, DecodeError> {
        let original_depth = cursor.current_depth();
        let current_parent = cursor.current_parent_field_name().map(str::to_owned);
        let target_depth = original_depth + 1;

        if cursor.current().is_none() {
            cursor.advance()?;
        }
        match cursor.current() {
            None => return Ok(Some(T::default())),
            Some(Token::Null) => return Ok(None),
            Some(Token::StartObject) => {}
            Some(other) => return Err(cursor.unexpected("object", other.kind())),
        }

        let mut result = T::default();
        loop {
            let kind = match cursor.advance()? {
                Some(token) => token.kind(),
                None => return Err(cursor.unexpected_end()),
            };
            match kind {
                TokenKind::FieldName => {
                    if cursor.current_depth() != target_depth {
                        continue;
                    }
                    let rule = cursor.current_name().and_then(|name| self.fields.rule(name));
                    match rule {
                        Some(rule) => {
                            if cursor.advance()?.is_none() {
                                return Err(cursor.unexpected_end());
                            }
                            (rule.assign)(cursor, registry, &mut result)?;
                        }
                        None => {
                            trace!(
                                composite = T::NAME,
                                field = cursor.current_name().unwrap_or_default(),
                                depth = target_depth,
                                "skipping unknown field"
                            );
                            if cursor.advance()?.is_none() {
                                return Err(cursor.unexpected_end());
                            }
                            cursor.skip_value()?;
                        }
                    }
                }
                TokenKind::EndObject | TokenKind::EndArray => {
                    let closed = cursor.last_closed_parent_field_name();
                    let ours = closed.is_none() || closed == current_parent.as_deref();
                    if ours && cursor.current_depth() <= original_depth {
                        break;
                    }
                }
                other => return Err(cursor.unexpected("field name", other)),
            }
        }
        Ok(Some(result))
    }
}

/// Implements [`Decode`](crate::Decode) for [`Composite`] types by looking up
/// their unmarshaller in the registry.
///
/// ```
/// use depthwalk::{Composite, FieldTable, Registry, impl_composite_decode};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Port {
///     number: Option<u16>,
/// }
///
/// impl Composite for Port {
///     const NAME: &'static str = "Port";
///
///     fn fields() -> FieldTable<Self> {
///         FieldTable::<Self>::new().field("number", |p, v| p.number = v)
///     }
/// }
///
/// impl_composite_decode!(Port);
///
/// let registry = Registry::new().with::<Port>();
/// let ports: Option<Vec<Port>> = registry.from_str(r#"[{"number": 80}]"#).unwrap();
/// assert_eq!(ports.unwrap()[0].number, Some(80));
/// ```
#[macro_export]
macro_rules! impl_composite_decode {
    ($($t:ty),+ $(,)?) => {
        $(
            impl $crate::Decode for $t {
                fn decode(
                    cursor: &mut $crate::Cursor<'_>,
                    registry: &$crate::Registry,
                ) -> ::core::result::Result<::core::option::Option<Self>, $crate::DecodeError> {
                    registry.unmarshall::<Self>(cursor)
                }

                fn shape() -> $crate::Shape {
                    $crate::Shape::Composite(<Self as $crate::Composite>::NAME)
                }
            }
        )+
    };
}
