//! Entity normalization.
//!
//! One function normalizes every entity type:
//!
//! 1. flatten the raw fragment (attributes and children merged),
//! 2. take the fields every entity has,
//! 3. run the family extension, then drop the family's raw-only keys,
//! 4. keep whatever is left as properties.

use super::families::family_descriptor;
use super::fragment::{text, Fragment};
use crate::config::ParsingConfig;
use crate::error::{ConsoleError, Result};
use crate::model::{Entity, EntityType, Permissions, UserTag};
use crate::raw::{self, Flattened};
use serde_json::{Map, Value};

/// Normalize a raw fragment as the given entity type.
///
/// # Errors
///
/// Fails only when the fragment has no id, which means the caller passed
/// something that does not describe an addressable entity.
pub fn normalize(raw: &Value, entity_type: EntityType) -> Result<Entity> {
    normalize_with(raw, entity_type, &ParsingConfig::default())
}

/// [`normalize`] with explicit parsing options.
///
/// # Errors
///
/// Fails only when the fragment has no id.
pub fn normalize_with(
    raw: &Value,
    entity_type: EntityType,
    config: &ParsingConfig,
) -> Result<Entity> {
    let mut fragment = match raw::flatten(raw) {
        Flattened::Object(fields) => Fragment::new(fields),
        Flattened::Text(_) => {
            return Err(ConsoleError::missing_field("id", entity_type.name()));
        }
    };

    let descriptor = family_descriptor(entity_type);
    let id = fragment
        .take_text("id")
        .or_else(|| descriptor.id_fallback.and_then(|key| fragment.peek_text(key)))
        .ok_or_else(|| ConsoleError::missing_field("id", entity_type.name()))?;

    let mut entity = Entity::new(entity_type, id);
    entity.owner = fragment.take("owner").as_ref().and_then(owner_name);
    entity.name = fragment.take_text("name");
    entity.comment = fragment.take_text("comment");
    entity.creation_time = fragment.take_date("creation_time");
    entity.modification_time = fragment.take_date("modification_time");
    entity.writable = fragment.take_yes_no("writable");
    entity.in_use = fragment.take_yes_no("in_use");
    entity.orphan = fragment.take_yes_no("orphan");
    entity.permissions = Permissions::new(
        fragment
            .take_list("permissions", "permission")
            .iter()
            .filter_map(|permission| {
                text(permission, "name")
                    .or_else(|| raw::text_of(permission).filter(|t| !t.is_empty()))
            }),
    );
    entity.user_tags = fragment
        .take_list("user_tags", "tag")
        .iter()
        .filter_map(user_tag)
        .collect();

    entity.details = (descriptor.extend)(&mut fragment);
    fragment.discard(descriptor.discard);

    entity.properties = if config.retain_properties {
        fragment.into_properties()
    } else {
        Map::new()
    };
    Ok(entity)
}

/// `<owner><name>admin</name></owner>`, or plain text.
fn owner_name(value: &Value) -> Option<String> {
    text(value, "name").or_else(|| raw::text_of(value).filter(|t| !t.is_empty()))
}

fn user_tag(value: &Value) -> Option<UserTag> {
    Some(UserTag {
        id: text(value, "id")?,
        name: text(value, "name")?,
        value: text(value, "value"),
        comment: text(value, "comment"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntityDetails;
    use serde_json::json;

    #[test]
    fn test_common_fields() {
        let raw = json!({
            "_id": "t1",
            "owner": {"name": "admin"},
            "name": "Weekly scan",
            "comment": "",
            "creation_time": "2023-01-02T03:04:05Z",
            "writable": "1",
            "in_use": "0",
            "permissions": {"permission": [{"name": "get_tasks"}, {"name": "modify_task"}]},
            "user_tags": {"count": "1", "tag": {"_id": "tag1", "name": "env", "value": "prod", "comment": ""}},
            "status": "Done",
        });
        let entity = normalize(&raw, EntityType::Task).unwrap();
        assert_eq!(entity.id, "t1");
        assert_eq!(entity.owner.as_deref(), Some("admin"));
        assert_eq!(entity.name.as_deref(), Some("Weekly scan"));
        assert_eq!(entity.comment, None);
        assert!(entity.creation_time.is_some());
        assert!(entity.writable);
        assert!(!entity.in_use);
        assert!(entity.permissions.may("modify_task"));
        assert_eq!(entity.user_tags[0].value.as_deref(), Some("prod"));
        assert_eq!(entity.details, EntityDetails::Generic);
        assert_eq!(entity.property("status"), Some(&json!("Done")));
        assert_eq!(entity.properties.len(), 1);
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let entity = normalize(&json!({"_id": "x"}), EntityType::Target).unwrap();
        assert!(entity.permissions.is_empty());
        assert!(entity.user_tags.is_empty());
        assert!(entity.properties.is_empty());
    }

    #[test]
    fn test_missing_id_is_malformed() {
        let err = normalize(&json!({"name": "no id"}), EntityType::Task).unwrap_err();
        assert!(err.is_malformed_input());

        let err = normalize(&json!({"__text": "just text"}), EntityType::Task).unwrap_err();
        assert!(err.is_malformed_input());

        assert!(normalize(&json!({"_id": ""}), EntityType::Task).is_err());
    }

    #[test]
    fn test_nvt_id_falls_back_to_oid() {
        let entity = normalize(&json!({"_oid": "1.3.6.1", "name": "x"}), EntityType::Nvt).unwrap();
        assert_eq!(entity.id, "1.3.6.1");
        assert_eq!(entity.as_nvt().and_then(|n| n.oid.as_deref()), Some("1.3.6.1"));
    }

    #[test]
    fn test_raw_only_keys_never_leak() {
        let raw = json!({
            "_id": "CVE-1",
            "severity": "5.0",
            "raw_data": {"entry": {"summary": "text"}},
            "update_time": "2023-01-01T00:00:00Z",
        });
        let entity = normalize(&raw, EntityType::Cve).unwrap();
        assert_eq!(entity.property("raw_data"), None);
        assert_eq!(entity.property("severity"), None);
        assert!(entity.property("update_time").is_some());
        assert_eq!(entity.as_cve().and_then(|c| c.description.as_deref()), Some("text"));
    }

    #[test]
    fn test_properties_can_be_dropped() {
        let config = ParsingConfig {
            retain_properties: false,
            ..ParsingConfig::default()
        };
        let entity = normalize_with(&json!({"_id": "x", "status": "Done"}), EntityType::Task, &config).unwrap();
        assert!(entity.properties.is_empty());
    }
}
