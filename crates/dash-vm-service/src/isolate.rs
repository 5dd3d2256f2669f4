use crate::element::{Element, JsonObject};

/// A reference to an isolate group.
#[derive(Clone, Copy, Debug)]
pub struct IsolateGroupRef<'a> {
    json: &'a JsonObject,
}

impl<'a> IsolateGroupRef<'a> {
    pub fn new(json: &'a JsonObject) -> Self {
        Self { json }
    }

    /// The id which can be passed to `getIsolateGroup` to load this group.
    pub fn id(&self) -> Option<&'a str> {
        self.get_string("id")
    }

    /// A name identifying this group; not guaranteed to be unique.
    pub fn name(&self) -> Option<&'a str> {
        self.get_string("name")
    }

    /// A numeric id for this group, represented as a string. Unique.
    pub fn number(&self) -> Option<&'a str> {
        self.get_string("number")
    }

    /// Whether the group was spawned by the VM or embedder for internal use.
    /// If false, the group is likely running user code.
    pub fn is_system_isolate_group(&self) -> bool {
        self.get_bool("isSystemIsolateGroup")
    }
}

impl<'a> Element<'a> for IsolateGroupRef<'a> {
    fn json(&self) -> &'a JsonObject {
        self.json
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn isolate_group_ref_reads_all_fields() {
        let value = json!({
            "type": "IsolateGroupRef",
            "id": "isolateGroups/1",
            "number": "1",
            "name": "main",
            "isSystemIsolateGroup": false
        });
        let group = IsolateGroupRef::new(value.as_object().unwrap());

        assert_eq!(group.id(), Some("isolateGroups/1"));
        assert_eq!(group.name(), Some("main"));
        assert_eq!(group.number(), Some("1"));
        assert!(!group.is_system_isolate_group());
    }

    #[test]
    fn absent_fields_read_as_defaults() {
        let value = json!({ "type": "IsolateGroupRef" });
        let group = IsolateGroupRef::new(value.as_object().unwrap());

        assert_eq!(group.id(), None);
        assert_eq!(group.name(), None);
        assert_eq!(group.number(), None);
        assert!(!group.is_system_isolate_group());
    }
}
