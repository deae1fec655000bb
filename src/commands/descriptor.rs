//! Command descriptors.
//!
//! Every entity type has one row in a static table naming its commands, id
//! parameter and pinned parameters. A [`CommandDescriptor`] for an
//! `(operation, entity type)` pair is assembled from that row.

use super::request::OperationKind;
use crate::error::{CommandErrorKind, ConsoleError, Result};
use crate::model::EntityType;
use serde::Serialize;

/// A static parameter list.
pub type StaticParams = &'static [(&'static str, &'static str)];

/// How requests of one operation on one entity type are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommandDescriptor {
    /// Value of the `cmd` parameter
    pub command: &'static str,
    /// Parameter carrying the entity id of get-one requests
    pub id_param: Option<&'static str>,
    /// Applied unless the caller sets them
    pub defaults: StaticParams,
    /// Always applied, overriding caller input
    pub forced: StaticParams,
}

impl CommandDescriptor {
    #[must_use]
    pub fn default_value(&self, name: &str) -> Option<&'static str> {
        lookup(self.defaults, name)
    }

    #[must_use]
    pub fn forced_value(&self, name: &str) -> Option<&'static str> {
        lookup(self.forced, name)
    }
}

fn lookup(params: StaticParams, name: &str) -> Option<&'static str> {
    params.iter().find(|(key, _)| *key == name).map(|(_, v)| *v)
}

struct EntityCommands {
    entity_type: EntityType,
    get_one: &'static str,
    get_list: &'static str,
    id_param: &'static str,
    /// Pins the server-side subtype on every operation
    forced: StaticParams,
    /// `None` when the server offers no aggregates for the type
    aggregate_type: Option<&'static str>,
}

const NO_PARAMS: StaticParams = &[];
const INFO_ONE_DEFAULTS: StaticParams = &[("details", "1")];
const INFO_LIST_DEFAULTS: StaticParams = &[("details", "0")];

static ENTITY_COMMANDS: [EntityCommands; 19] = [
    EntityCommands {
        entity_type: EntityType::Task,
        get_one: "get_task",
        get_list: "get_tasks",
        id_param: "task_id",
        forced: &[("usage_type", "scan")],
        aggregate_type: Some("task"),
    },
    EntityCommands {
        entity_type: EntityType::Target,
        get_one: "get_target",
        get_list: "get_targets",
        id_param: "target_id",
        forced: NO_PARAMS,
        aggregate_type: Some("target"),
    },
    EntityCommands {
        entity_type: EntityType::PortList,
        get_one: "get_port_list",
        get_list: "get_port_lists",
        id_param: "port_list_id",
        forced: NO_PARAMS,
        aggregate_type: Some("port_list"),
    },
    EntityCommands {
        entity_type: EntityType::Credential,
        get_one: "get_credential",
        get_list: "get_credentials",
        id_param: "credential_id",
        forced: NO_PARAMS,
        aggregate_type: None,
    },
    EntityCommands {
        entity_type: EntityType::Tag,
        get_one: "get_tag",
        get_list: "get_tags",
        id_param: "tag_id",
        forced: NO_PARAMS,
        aggregate_type: Some("tag"),
    },
    EntityCommands {
        entity_type: EntityType::Filter,
        get_one: "get_filter",
        get_list: "get_filters",
        id_param: "filter_id",
        forced: NO_PARAMS,
        aggregate_type: None,
    },
    EntityCommands {
        entity_type: EntityType::ScanConfig,
        get_one: "get_config",
        get_list: "get_configs",
        id_param: "config_id",
        forced: &[("usage_type", "scan")],
        aggregate_type: Some("config"),
    },
    EntityCommands {
        entity_type: EntityType::Policy,
        get_one: "get_config",
        get_list: "get_configs",
        id_param: "config_id",
        forced: &[("usage_type", "policy")],
        aggregate_type: Some("config"),
    },
    EntityCommands {
        entity_type: EntityType::Scanner,
        get_one: "get_scanner",
        get_list: "get_scanners",
        id_param: "scanner_id",
        forced: NO_PARAMS,
        aggregate_type: Some("scanner"),
    },
    EntityCommands {
        entity_type: EntityType::Host,
        get_one: "get_asset",
        get_list: "get_assets",
        id_param: "asset_id",
        forced: &[("asset_type", "host")],
        aggregate_type: Some("host"),
    },
    EntityCommands {
        entity_type: EntityType::OperatingSystem,
        get_one: "get_asset",
        get_list: "get_assets",
        id_param: "asset_id",
        forced: &[("asset_type", "os")],
        aggregate_type: Some("os"),
    },
    EntityCommands {
        entity_type: EntityType::ReportFormat,
        get_one: "get_report_format",
        get_list: "get_report_formats",
        id_param: "report_format_id",
        forced: NO_PARAMS,
        aggregate_type: Some("report_format"),
    },
    EntityCommands {
        entity_type: EntityType::Cve,
        get_one: "get_info",
        get_list: "get_info",
        id_param: "info_id",
        forced: &[("info_type", "cve")],
        aggregate_type: Some("cve"),
    },
    EntityCommands {
        entity_type: EntityType::Cpe,
        get_one: "get_info",
        get_list: "get_info",
        id_param: "info_id",
        forced: &[("info_type", "cpe")],
        aggregate_type: Some("cpe"),
    },
    EntityCommands {
        entity_type: EntityType::Nvt,
        get_one: "get_info",
        get_list: "get_info",
        id_param: "info_id",
        forced: &[("info_type", "nvt")],
        aggregate_type: Some("nvt"),
    },
    EntityCommands {
        entity_type: EntityType::OvalDef,
        get_one: "get_info",
        get_list: "get_info",
        id_param: "info_id",
        forced: &[("info_type", "ovaldef")],
        aggregate_type: Some("ovaldef"),
    },
    EntityCommands {
        entity_type: EntityType::CertBundAdv,
        get_one: "get_info",
        get_list: "get_info",
        id_param: "info_id",
        forced: &[("info_type", "cert_bund_adv")],
        aggregate_type: Some("cert_bund_adv"),
    },
    EntityCommands {
        entity_type: EntityType::DfnCertAdv,
        get_one: "get_info",
        get_list: "get_info",
        id_param: "info_id",
        forced: &[("info_type", "dfn_cert_adv")],
        aggregate_type: Some("dfn_cert_adv"),
    },
    EntityCommands {
        entity_type: EntityType::AllInfo,
        get_one: "get_info",
        get_list: "get_info",
        id_param: "info_id",
        forced: &[("info_type", "allinfo")],
        aggregate_type: Some("allinfo"),
    },
];

/// The command name of grouped queries.
pub const AGGREGATE_COMMAND: &str = "get_aggregate";

fn entity_commands(entity_type: EntityType) -> &'static EntityCommands {
    ENTITY_COMMANDS
        .iter()
        .find(|row| row.entity_type == entity_type)
        .unwrap_or(&ENTITY_COMMANDS[0])
}

/// Default aggregate type of an entity type, if it has aggregates.
#[must_use]
pub fn aggregate_type(entity_type: EntityType) -> Option<&'static str> {
    entity_commands(entity_type).aggregate_type
}

/// Look up the descriptor of an operation on an entity type.
///
/// # Errors
///
/// Fails with [`CommandErrorKind::Unsupported`] for aggregates of entity
/// types the server does not aggregate.
pub fn command_descriptor(
    operation: OperationKind,
    entity_type: EntityType,
) -> Result<CommandDescriptor> {
    let row = entity_commands(entity_type);
    let info = entity_type.is_info();
    match operation {
        OperationKind::GetOne => Ok(CommandDescriptor {
            command: row.get_one,
            id_param: Some(row.id_param),
            defaults: if info { INFO_ONE_DEFAULTS } else { NO_PARAMS },
            forced: row.forced,
        }),
        OperationKind::GetList => Ok(CommandDescriptor {
            command: row.get_list,
            id_param: None,
            defaults: if info { INFO_LIST_DEFAULTS } else { NO_PARAMS },
            forced: row.forced,
        }),
        OperationKind::GetAggregate => {
            if row.aggregate_type.is_none() {
                return Err(ConsoleError::command(
                    format!("building {AGGREGATE_COMMAND}"),
                    CommandErrorKind::Unsupported {
                        operation: operation.name().to_string(),
                        entity: entity_type.name().to_string(),
                    },
                ));
            }
            Ok(CommandDescriptor {
                command: AGGREGATE_COMMAND,
                id_param: None,
                defaults: NO_PARAMS,
                forced: row.forced,
            })
        }
    }
}
