//! Grouping and property extraction for the object inspector.

use serde_json::{Map, Value};

use crate::api::ObjectItem;

/// Property rows for an object's `desc`, sorted by key. Values are rendered
/// as JSON text except plain strings, which are shown bare.
pub fn inspect(desc: &str) -> Vec<(String, String)> {
    let properties = match serde_json::from_str::<Value>(desc) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            map
        }
        Err(_) => {
            let mut map = Map::new();
            map.insert("error".to_string(), Value::String("Parse error".to_string()));
            map.insert("data".to_string(), Value::String(desc.to_string()));
            map
        }
    };

    let mut rows: Vec<(String, String)> = properties
        .into_iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (key, text)
        })
        .collect();
    rows.sort_by(|a, b| a.0.cmp(&b.0));
    rows
}

/// Objects grouped by class name, groups in first-seen order.
pub fn group_by_class(objects: &[ObjectItem]) -> Vec<(String, Vec<ObjectItem>)> {
    let mut groups: Vec<(String, Vec<ObjectItem>)> = Vec::new();
    for object in objects {
        match groups.iter_mut().find(|(name, _)| *name == object.name) {
            Some((_, members)) => members.push(object.clone()),
            None => groups.push((object.name.clone(), vec![object.clone()])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(name: &str, subname: &str, id: &str) -> ObjectItem {
        ObjectItem {
            name: name.to_string(),
            subname: subname.to_string(),
            id: id.to_string(),
            parent: String::new(),
            desc: String::new(),
        }
    }

    fn row(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn test_object_properties_sorted() {
        let rows = inspect(r#"{"rate":50,"name":"imu","axes":["x","y"]}"#);
        assert_eq!(
            rows,
            vec![row("axes", r#"["x","y"]"#), row("name", "imu"), row("rate", "50")]
        );
    }

    #[test]
    fn test_malformed_desc_reports_parse_error() {
        let rows = inspect("{not json");
        assert_eq!(rows, vec![row("data", "{not json"), row("error", "Parse error")]);
    }

    #[test]
    fn test_scalar_desc_is_single_value() {
        assert_eq!(inspect("42"), vec![row("value", "42")]);
        assert_eq!(inspect(r#""motor""#), vec![row("value", "motor")]);
    }

    #[test]
    fn test_group_by_class_keeps_first_seen_order() {
        let objects = vec![
            object("block", "motor", "3"),
            object("sensor", "imu", "4"),
            object("block", "servo", "5"),
        ];
        let groups = group_by_class(&objects);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "block");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[0].1[1].subname, "servo");
        assert_eq!(groups[1].0, "sensor");
    }
}
