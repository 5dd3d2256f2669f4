use serde_json::Value;

/// A parsed wire-protocol document: string keys, heterogeneous values.
pub type JsonObject = serde_json::Map<String, Value>;

/// Common accessors over a wire-protocol JSON object.
///
/// Implementors hold a borrowed [`JsonObject`] and never mutate it. Scalar
/// lookups substitute wire-defined defaults (`0`, `false`) when the field is
/// absent or mistyped; reference lookups read as absent instead.
pub trait Element<'a> {
    /// The underlying document.
    fn json(&self) -> &'a JsonObject;

    /// String field, `None` when absent or not a string.
    fn get_string(&self, key: &str) -> Option<&'a str> {
        self.json().get(key).and_then(Value::as_str)
    }

    /// Integer field; absent or mistyped values read as 0.
    fn get_int(&self, key: &str) -> i64 {
        self.json().get(key).and_then(Value::as_i64).unwrap_or(0)
    }

    /// Boolean field; absent or mistyped values read as false.
    fn get_bool(&self, key: &str) -> bool {
        self.json().get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Nested object field.
    fn get_object(&self, key: &str) -> Option<&'a JsonObject> {
        self.json().get(key).and_then(Value::as_object)
    }

    /// Array field.
    fn get_array(&self, key: &str) -> Option<&'a [Value]> {
        self.json()
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }

    /// The protocol `type` tag (`"Instance"`, `"@Instance"`, ...).
    fn type_tag(&self) -> Option<&'a str> {
        self.get_string("type")
    }

    /// Reads a nested reference field, honoring the protocol's null-wrapper
    /// convention: when the enclosing object is an `Instance` whose `kind` is
    /// `Null`, reference-valued fields are placeholders for null and read as
    /// absent.
    fn get_ref_object(&self, key: &str) -> Option<&'a JsonObject> {
        let object = self.get_object(key)?;
        if matches!(self.type_tag(), Some("Instance" | "@Instance"))
            && self.get_string("kind") == Some("Null")
        {
            return None;
        }
        Some(object)
    }
}

/// A lazy, restartable view over a JSON array of protocol objects.
///
/// Elements materialize on access, in storage order; iterating twice yields
/// the same sequence. Array entries that are not objects read as absent from
/// [`ElementList::get`] and are skipped by [`ElementList::iter`] -- the array
/// is untrusted wire data.
pub struct ElementList<'a, T> {
    values: &'a [Value],
    wrap: fn(&'a JsonObject) -> T,
}

impl<'a, T: 'a> ElementList<'a, T> {
    pub(crate) fn new(values: &'a [Value], wrap: fn(&'a JsonObject) -> T) -> Self {
        Self { values, wrap }
    }

    /// Number of entries in the underlying array.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The element at `index`, or `None` when out of range or when the stored
    /// value is not an object.
    pub fn get(&self, index: usize) -> Option<T> {
        self.values.get(index)?.as_object().map(self.wrap)
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + 'a {
        let wrap = self.wrap;
        self.values
            .iter()
            .filter_map(Value::as_object)
            .map(move |object| wrap(object))
    }
}
