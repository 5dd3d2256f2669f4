use crate::element::{Element, JsonObject};
use crate::instance::InstanceRef;

/// A reference to a class.
#[derive(Clone, Copy, Debug)]
pub struct ClassRef<'a> {
    json: &'a JsonObject,
}

impl<'a> ClassRef<'a> {
    pub fn new(json: &'a JsonObject) -> Self {
        Self { json }
    }

    /// The id which can be passed to `getObject` to load this class.
    pub fn id(&self) -> Option<&'a str> {
        self.get_string("id")
    }

    /// The name of this class.
    pub fn name(&self) -> Option<&'a str> {
        self.get_string("name")
    }
}

impl<'a> Element<'a> for ClassRef<'a> {
    fn json(&self) -> &'a JsonObject {
        self.json
    }
}

/// A reference to a function.
#[derive(Clone, Copy, Debug)]
pub struct FuncRef<'a> {
    json: &'a JsonObject,
}

impl<'a> FuncRef<'a> {
    pub fn new(json: &'a JsonObject) -> Self {
        Self { json }
    }

    pub fn id(&self) -> Option<&'a str> {
        self.get_string("id")
    }

    pub fn name(&self) -> Option<&'a str> {
        self.get_string("name")
    }

    /// Whether this function is declared `static`.
    pub fn is_static(&self) -> bool {
        self.get_bool("static")
    }
}

impl<'a> Element<'a> for FuncRef<'a> {
    fn json(&self) -> &'a JsonObject {
        self.json
    }
}

/// A reference to the captured context of a closure.
#[derive(Clone, Copy, Debug)]
pub struct ContextRef<'a> {
    json: &'a JsonObject,
}

impl<'a> ContextRef<'a> {
    pub fn new(json: &'a JsonObject) -> Self {
        Self { json }
    }

    pub fn id(&self) -> Option<&'a str> {
        self.get_string("id")
    }

    /// The number of variables in this context.
    pub fn length(&self) -> i64 {
        self.get_int("length")
    }
}

impl<'a> Element<'a> for ContextRef<'a> {
    fn json(&self) -> &'a JsonObject {
        self.json
    }
}

/// A single parameter of a function type.
#[derive(Clone, Copy, Debug)]
pub struct Parameter<'a> {
    json: &'a JsonObject,
}

impl<'a> Parameter<'a> {
    pub fn new(json: &'a JsonObject) -> Self {
        Self { json }
    }

    /// The type of this parameter.
    pub fn parameter_type(&self) -> Option<InstanceRef<'a>> {
        self.get_object("parameterType").map(InstanceRef::new)
    }

    /// The name of a named optional parameter.
    pub fn name(&self) -> Option<&'a str> {
        self.get_string("name")
    }

    /// Whether this is a fixed (non-optional) parameter.
    pub fn fixed(&self) -> bool {
        self.get_bool("fixed")
    }

    /// Whether this is a required named parameter.
    pub fn required(&self) -> bool {
        self.get_bool("required")
    }
}

impl<'a> Element<'a> for Parameter<'a> {
    fn json(&self) -> &'a JsonObject {
        self.json
    }
}
