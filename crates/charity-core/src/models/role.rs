use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Role as returned by the backend. Fields other than `id` and `name` are
/// kept verbatim in `extra`.
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    #[cfg_attr(feature = "ts", ts(skip))]
    pub extra: Map<String, Value>,
}

impl Role {
    pub fn description(&self) -> Option<&str> {
        self.extra.get("description").and_then(Value::as_str)
    }
}

/// Payload for creating or renaming a role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_keeps_unknown_fields() {
        let json = r#"{"id": 2, "name": "Moderator", "description": "Reviews campaigns", "permissions": ["campaign:review"]}"#;
        let role: Role = serde_json::from_str(json).unwrap();
        assert_eq!(role.id, 2);
        assert_eq!(role.description(), Some("Reviews campaigns"));
        assert!(role.extra.contains_key("permissions"));

        let back = serde_json::to_value(&role).unwrap();
        assert_eq!(back["permissions"][0], "campaign:review");
    }

    #[test]
    fn test_role_input_omits_missing_description() {
        let input = RoleInput { name: "Viewer".to_string(), description: None };
        assert_eq!(serde_json::to_string(&input).unwrap(), r#"{"name":"Viewer"}"#);
    }
}
