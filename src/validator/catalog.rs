use ahash::AHashMap;
use serde_json::{Map, Value};

/// Known action types and the config fields each one requires.
///
/// An action whose type is not in the catalog is not an error, only an
/// unknown extension. Required fields are checked only for known types.
#[derive(Debug, Clone)]
pub struct ActionCatalog {
    types: AHashMap<String, Vec<String>>,
}

/// Defines the built-in action types and their required config fields.
macro_rules! define_action_types {
    ( $( ($name:expr, [ $( $field:expr ),* $(,)? ]) ),* $(,)? ) => {
        fn register_default_action_types(types: &mut AHashMap<String, Vec<String>>) {
            $( types.insert($name.to_string(), vec![ $( $field.to_string() ),* ]); )*
        }

        /// Names of the built-in action types.
        pub const BUILTIN_ACTION_TYPES: &[&str] = &[ $( $name ),* ];
    };
}

define_action_types! {
    ("SendNotification", ["notificationType"]),
    ("SendEmail", ["recipients", "subject"]),
    ("ForEach", ["sourceCollection"]),
    ("Loop", ["sourceCollection"]),
    ("Condition", ["expression"]),
    ("SetVariable", ["targetVariable"]),
    ("CallWorkflow", ["workflowSystemName"]),
    ("HttpRequest", ["url", "method"]),
    ("GenerateDocument", ["templateName"]),
    ("UpdateCase", []),
    ("AssignTask", ["assignee"]),
    ("Wait", []),
}

impl Default for ActionCatalog {
    fn default() -> Self {
        let mut types = AHashMap::new();
        register_default_action_types(&mut types);
        Self { types }
    }
}

impl ActionCatalog {
    /// A catalog with no known types. Every action will be reported as unknown.
    pub fn empty() -> Self {
        Self {
            types: AHashMap::new(),
        }
    }

    /// Adds or replaces an action type.
    pub fn register<I, S>(&mut self, action_type: &str, required_fields: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types.insert(
            action_type.to_string(),
            required_fields.into_iter().map(Into::into).collect(),
        );
    }

    pub fn is_known(&self, action_type: &str) -> bool {
        self.types.contains_key(action_type)
    }

    pub fn required_fields(&self, action_type: &str) -> &[String] {
        self.types
            .get(action_type)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Required fields that are absent, `null` or an empty string in `config`.
    pub fn missing_fields<'a>(
        &'a self,
        action_type: &str,
        config: &Map<String, Value>,
    ) -> Vec<&'a str> {
        self.required_fields(action_type)
            .iter()
            .filter(|field| match config.get(field.as_str()) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.trim().is_empty(),
                Some(_) => false,
            })
            .map(String::as_str)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
