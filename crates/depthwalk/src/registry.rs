//! Type identity to shared unmarshaller.
use std::{
    any::{Any, TypeId, type_name},
    collections::HashMap,
};

use tracing::debug;

use crate::{
    cursor::Cursor,
    decode::Decode,
    error::DecodeError,
    lexer::JsonLexer,
    options::{DecodeOptions, LexerOptions},
    unmarshaller::{Composite, Unmarshaller},
};

/// Holds one [`Unmarshaller`] per registered [`Composite`] type.
///
/// Each unmarshaller is built once, at registration, and shared by every
/// decode afterwards. Nested composites are looked up here while decoding,
/// so registration order is irrelevant and recursive types work.
///
/// A `Registry` is `Send + Sync`; wrap it in an `Arc` to decode from several
/// threads.
///
/// ```
/// use depthwalk::model::{self, ecs::MountPoint};
///
/// let registry = model::registry();
/// let mount: MountPoint = registry
///     .from_str(r#"{"sourceVolume": "data", "readOnly": true}"#)
///     .unwrap()
///     .unwrap();
/// assert_eq!(mount.read_only, Some(true));
/// ```
#[derive(Default)]
pub struct Registry {
    unmarshallers: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
    names: Vec<&'static str>,
}

impl core::fmt::Debug for Registry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("types", &self.names)
            .finish()
    }
}

impl Registry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds and stores the unmarshaller for `T`. Registering a type again
    /// rebuilds it.
    pub fn register<T: Composite>(&mut self) -> &mut Self {
        let unmarshaller = Unmarshaller::<T>::new();
        debug!(
            composite = T::NAME,
            fields = unmarshaller.fields().len(),
            "registered unmarshaller"
        );
        if self
            .unmarshallers
            .insert(TypeId::of::<T>(), Box::new(unmarshaller))
            .is_none()
        {
            self.names.push(T::NAME);
        }
        self
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with<T: Composite>(mut self) -> Self {
        self.register::<T>();
        self
    }

    /// The unmarshaller registered for `T`.
    #[must_use]
    pub fn get<T: Composite>(&self) -> Option<&Unmarshaller<T>> {
        self.unmarshallers
            .get(&TypeId::of::<T>())
            .and_then(|u| u.downcast_ref::<Unmarshaller<T>>())
    }

    /// Whether `T` has been registered.
    #[must_use]
    pub fn contains<T: Composite>(&self) -> bool {
        self.unmarshallers.contains_key(&TypeId::of::<T>())
    }

    /// Names of the registered types, in registration order.
    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.names.iter().copied()
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.unmarshallers.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.unmarshallers.is_empty()
    }

    /// Decodes a `T` with its registered unmarshaller.
    ///
    /// # Errors
    ///
    /// [`DecodeError::NotRegistered`] when `T` is unknown, otherwise whatever
    /// [`Unmarshaller::unmarshall`] reports.
    pub fn unmarshall<T: Composite>(
        &self,
        cursor: &mut Cursor<'_>,
    ) -> Result<Option<T>, DecodeError> {
        let Some(unmarshaller) = self.get::<T>() else {
            return Err(DecodeError::NotRegistered { type_name: T::NAME });
        };
        unmarshaller.unmarshall(cursor, self)
    }

    /// Decodes any [`Decode`] type, fetching the first token if the cursor
    /// has not moved yet.
    ///
    /// # Errors
    ///
    /// Whatever `T::decode` reports.
    pub fn decode<T: Decode>(&self, cursor: &mut Cursor<'_>) -> Result<Option<T>, DecodeError> {
        if cursor.current().is_none() && cursor.tokens_consumed() == 0 {
            cursor.advance()?;
        }
        T::decode(cursor, self)
    }

    /// Decodes a single JSON document with default options.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON, on any decode failure, and with
    /// [`DecodeError::TrailingTokens`] when the document is followed by
    /// another value.
    pub fn from_str<T: Decode>(&self, json: &str) -> Result<Option<T>, DecodeError> {
        self.from_str_with(json, LexerOptions::default(), DecodeOptions::default())
    }

    /// Decodes a single JSON document with explicit options.
    ///
    /// # Errors
    ///
    /// See [`from_str`](Self::from_str).
    pub fn from_str_with<T: Decode>(
        &self,
        json: &str,
        lexer_options: LexerOptions,
        decode_options: DecodeOptions,
    ) -> Result<Option<T>, DecodeError> {
        let mut cursor =
            Cursor::with_options(JsonLexer::with_options(json, lexer_options), decode_options);
        let result = self.decode_document(&mut cursor);
        if let Err(err) = &result {
            debug!(
                target_type = type_name::<T>(),
                consumed = cursor.tokens_consumed(),
                error = %err,
                "decode failed"
            );
        }
        result
    }

    fn decode_document<T: Decode>(
        &self,
        cursor: &mut Cursor<'_>,
    ) -> Result<Option<T>, DecodeError> {
        let value = self.decode(cursor)?;
        if let Some(extra) = cursor.advance()? {
            return Err(DecodeError::TrailingTokens {
                found: extra.kind(),
            });
        }
        Ok(value)
    }
}
