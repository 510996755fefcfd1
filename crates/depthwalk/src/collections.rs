//! Sequence and mapping decoders.
//!
//! Both leave the cursor on the collection's own close token, so the caller's
//! loop continues with the next sibling. `null` elements and values are
//! dropped: the Rust collections have no slot for an absent element.
use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

use crate::{
    cursor::Cursor,
    decode::{Decode, Shape},
    error::DecodeError,
    registry::Registry,
    token::Token,
};

impl<T: Decode> Decode for Vec<T> {
    fn decode(cursor: &mut Cursor<'_>, registry: &Registry) -> Result<Option<Self>, DecodeError> {
        match cursor.current() {
            Some(Token::Null) => return Ok(None),
            Some(Token::StartArray) => {}
            Some(other) => return Err(cursor.unexpected("array", other.kind())),
            None => return Err(cursor.unexpected_end()),
        }

        let mut items = Vec::new();
        loop {
            match cursor.advance()? {
                None => return Err(cursor.unexpected_end()),
                Some(Token::EndArray) => return Ok(Some(items)),
                Some(_) => {
                    if let Some(item) = T::decode(cursor, registry)? {
                        items.push(item);
                    }
                }
            }
        }
    }

    fn shape() -> Shape {
        Shape::Sequence(Box::new(T::shape()))
    }
}

/// Walks the members of the object under the cursor, handing each key and
/// decoded value to `insert`.
fn decode_members<T: Decode>(
    cursor: &mut Cursor<'_>,
    registry: &Registry,
    mut insert: impl FnMut(String, T),
) -> Result<bool, DecodeError> {
    match cursor.current() {
        Some(Token::Null) => return Ok(false),
        Some(Token::StartObject) => {}
        Some(other) => return Err(cursor.unexpected("object", other.kind())),
        None => return Err(cursor.unexpected_end()),
    }

    loop {
        let key = match cursor.advance()? {
            None => return Err(cursor.unexpected_end()),
            Some(Token::EndObject) => return Ok(true),
            Some(Token::FieldName(key)) => key.clone(),
            Some(other) => {
                let found = other.kind();
                return Err(cursor.unexpected("field name", found));
            }
        };
        if cursor.advance()?.is_none() {
            return Err(cursor.unexpected_end());
        }
        if let Some(value) = T::decode(cursor, registry)? {
            insert(key, value);
        }
    }
}

impl<T: Decode> Decode for BTreeMap<String, T> {
    fn decode(cursor: &mut Cursor<'_>, registry: &Registry) -> Result<Option<Self>, DecodeError> {
        let mut map = BTreeMap::new();
        let present = decode_members(cursor, registry, |k, v| {
            map.insert(k, v);
        })?;
        Ok(present.then_some(map))
    }

    fn shape() -> Shape {
        Shape::Mapping(Box::new(T::shape()))
    }
}

impl<T: Decode, S: BuildHasher + Default> Decode for HashMap<String, T, S> {
    fn decode(cursor: &mut Cursor<'_>, registry: &Registry) -> Result<Option<Self>, DecodeError> {
        let mut map = HashMap::default();
        let present = decode_members(cursor, registry, |k, v| {
            map.insert(k, v);
        })?;
        Ok(present.then_some(map))
    }

    fn shape() -> Shape {
        Shape::Mapping(Box::new(T::shape()))
    }
}
