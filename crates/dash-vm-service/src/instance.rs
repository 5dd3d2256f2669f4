use crate::element::{Element, ElementList, JsonObject};
use crate::kind::InstanceKind;
use crate::refs::{ClassRef, ContextRef, FuncRef, Parameter};

/// A reference to a Dart VM instance.
///
/// Field availability depends on [`InstanceRef::kind`]: for example `length`
/// is only reported for lists, maps, strings and typed data, and the closure
/// fields only for `Closure` instances. Absent scalar fields read as their
/// wire defaults; absent references read as `None`.
#[derive(Clone, Copy, Debug)]
pub struct InstanceRef<'a> {
    json: &'a JsonObject,
}

impl<'a> InstanceRef<'a> {
    pub fn new(json: &'a JsonObject) -> Self {
        Self { json }
    }

    /// The id which can be passed to `getObject` to load this instance.
    pub fn id(&self) -> Option<&'a str> {
        self.get_string("id")
    }

    /// What kind of instance is this?
    pub fn kind(&self) -> InstanceKind {
        InstanceKind::parse(self.get_string("kind"))
    }

    /// Instance references always include their class.
    pub fn class_ref(&self) -> Option<ClassRef<'a>> {
        self.get_object("class").map(ClassRef::new)
    }

    /// The context associated with a `Closure` instance.
    pub fn closure_context(&self) -> Option<ContextRef<'a>> {
        self.get_ref_object("closureContext").map(ContextRef::new)
    }

    /// The function associated with a `Closure` instance.
    pub fn closure_function(&self) -> Option<FuncRef<'a>> {
        self.get_ref_object("closureFunction").map(FuncRef::new)
    }

    /// A name associated with a `ReceivePort`, used for debugging.
    pub fn debug_name(&self) -> Option<&'a str> {
        self.get_string("debugName")
    }

    /// The identity hash code assigned to the allocated object.
    pub fn identity_hash_code(&self) -> i64 {
        self.get_int("identityHashCode")
    }

    /// The length of a `List`, the number of associations in a `Map`, or the
    /// number of code units in a `String`.
    pub fn length(&self) -> i64 {
        self.get_int("length")
    }

    /// The name of a `Type` instance.
    pub fn name(&self) -> Option<&'a str> {
        self.get_string("name")
    }

    /// The parameterized class of a `TypeParameter`.
    pub fn parameterized_class(&self) -> Option<ClassRef<'a>> {
        self.get_ref_object("parameterizedClass").map(ClassRef::new)
    }

    /// The parameter types of a `FunctionType`.
    pub fn parameters(&self) -> Option<ElementList<'a, Parameter<'a>>> {
        self.get_array("parameters")
            .map(|values| ElementList::new(values, Parameter::new))
    }

    /// The pattern of a `RegExp` instance; always of kind `String`.
    pub fn pattern(&self) -> Option<InstanceRef<'a>> {
        self.get_object("pattern").map(InstanceRef::new)
    }

    /// The port id of a `ReceivePort`.
    pub fn port_id(&self) -> i64 {
        self.get_int("portId")
    }

    /// The return type of a `FunctionType`.
    pub fn return_type(&self) -> Option<InstanceRef<'a>> {
        self.get_object("returnType").map(InstanceRef::new)
    }

    /// The corresponding class if this `Type` has a resolved type class.
    pub fn type_class(&self) -> Option<ClassRef<'a>> {
        self.get_ref_object("typeClass").map(ClassRef::new)
    }

    /// The type parameters of a `FunctionType`.
    pub fn type_parameters(&self) -> Option<ElementList<'a, InstanceRef<'a>>> {
        self.get_array("typeParameters")
            .map(|values| ElementList::new(values, InstanceRef::new))
    }

    /// The stack trace associated with the allocation of a `ReceivePort`.
    pub fn allocation_location(&self) -> Option<InstanceRef<'a>> {
        self.get_object("allocationLocation").map(InstanceRef::new)
    }

    /// The value of this instance as a string, for kinds that have one
    /// (`Null`, `Bool`, `Int`, `Double`, `String`, ...). String values may be
    /// truncated; see [`InstanceRef::value_as_string_is_truncated`].
    pub fn value_as_string(&self) -> Option<&'a str> {
        self.get_string("valueAsString")
    }

    /// Whether `valueAsString` was truncated by the VM.
    pub fn value_as_string_is_truncated(&self) -> bool {
        self.get_bool("valueAsStringIsTruncated")
    }

    /// Whether this reference represents the `null` instance.
    pub fn is_null(&self) -> bool {
        self.kind() == InstanceKind::Null
    }
}

impl<'a> Element<'a> for InstanceRef<'a> {
    fn json(&self) -> &'a JsonObject {
        self.json
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn doc(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn missing_kind_reads_as_unknown() {
        let json = doc(json!({ "type": "@Instance", "id": "objects/1" }));
        let instance = InstanceRef::new(&json);
        assert_eq!(instance.kind(), InstanceKind::Unknown);
        assert!(!instance.is_null());
    }

    #[test]
    fn unrecognized_kind_reads_as_unknown() {
        let json = doc(json!({ "type": "@Instance", "kind": "SomethingNew" }));
        assert_eq!(InstanceRef::new(&json).kind(), InstanceKind::Unknown);
    }

    #[test]
    fn string_instance_exposes_value_and_truncation() {
        let json = doc(json!({
            "type": "@Instance",
            "kind": "String",
            "id": "objects/2",
            "class": { "type": "@Class", "id": "classes/5", "name": "_OneByteString" },
            "valueAsString": "hello wo",
            "valueAsStringIsTruncated": true,
            "length": 11
        }));
        let instance = InstanceRef::new(&json);

        assert_eq!(instance.kind(), InstanceKind::String);
        assert_eq!(instance.value_as_string(), Some("hello wo"));
        assert!(instance.value_as_string_is_truncated());
        assert_eq!(instance.length(), 11);
        assert_eq!(instance.class_ref().unwrap().name(), Some("_OneByteString"));
        assert_eq!(instance.identity_hash_code(), 0);
    }

    #[test]
    fn null_kind_suppresses_wrapped_references() {
        // The VM represents a null closure field as an `@Instance` of kind
        // `Null` that still carries the wrapper keys.
        let json = doc(json!({
            "type": "@Instance",
            "kind": "Null",
            "closureContext": { "type": "@Context", "id": "ctx/1" },
            "closureFunction": { "type": "@Function", "id": "fn/1" },
            "typeClass": { "type": "@Class", "id": "classes/9" },
            "parameterizedClass": { "type": "@Class", "id": "classes/9" },
            "pattern": { "type": "@Instance", "kind": "String", "valueAsString": "a+" }
        }));
        let instance = InstanceRef::new(&json);

        assert!(instance.closure_context().is_none());
        assert!(instance.closure_function().is_none());
        assert!(instance.type_class().is_none());
        assert!(instance.parameterized_class().is_none());
        // `pattern` is not part of the null-wrapper convention.
        assert!(instance.pattern().is_some());
        assert!(instance.is_null());
    }

    #[test]
    fn closure_exposes_context_and_function() {
        let json = doc(json!({
            "type": "@Instance",
            "kind": "Closure",
            "closureContext": { "type": "@Context", "id": "ctx/7", "length": 2 },
            "closureFunction": { "type": "@Function", "id": "fn/3", "name": "main" }
        }));
        let instance = InstanceRef::new(&json);

        assert_eq!(instance.closure_context().unwrap().length(), 2);
        assert_eq!(instance.closure_function().unwrap().name(), Some("main"));
    }

    #[test]
    fn function_type_lists_parameters_in_order() {
        let json = doc(json!({
            "type": "@Instance",
            "kind": "FunctionType",
            "returnType": { "type": "@Instance", "kind": "Type", "name": "void" },
            "parameters": [
                { "parameterType": { "kind": "Type", "name": "int" }, "fixed": true },
                { "parameterType": { "kind": "Type", "name": "String" }, "name": "label" }
            ],
            "typeParameters": [
                { "type": "@Instance", "kind": "TypeParameter", "name": "T" }
            ]
        }));
        let instance = InstanceRef::new(&json);

        assert_eq!(instance.return_type().unwrap().name(), Some("void"));

        let parameters = instance.parameters().unwrap();
        assert_eq!(parameters.len(), 2);
        let names: Vec<_> = parameters
            .iter()
            .map(|parameter| {
                parameter
                    .parameter_type()
                    .and_then(|ty| ty.name())
                    .unwrap_or("")
            })
            .collect();
        assert_eq!(names, vec!["int", "String"]);

        let type_parameters = instance.type_parameters().unwrap();
        assert_eq!(type_parameters.get(0).unwrap().name(), Some("T"));
    }

    #[test]
    fn receive_port_fields() {
        let json = doc(json!({
            "type": "@Instance",
            "kind": "ReceivePort",
            "portId": 4123,
            "debugName": "timer",
            "allocationLocation": { "type": "@Instance", "kind": "StackTrace" }
        }));
        let instance = InstanceRef::new(&json);

        assert_eq!(instance.port_id(), 4123);
        assert_eq!(instance.debug_name(), Some("timer"));
        assert_eq!(
            instance.allocation_location().unwrap().kind(),
            InstanceKind::StackTrace
        );
    }
}
