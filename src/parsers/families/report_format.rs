//! Report formats.

use crate::model::{EntityDetails, ReportFormatDetails, ReportFormatParam, Trust, TrustValue};
use crate::parsers::fragment::{text, texts, Fragment};
use crate::raw;
use crate::utils::coerce;
use serde_json::Value;

pub(crate) fn extend(fragment: &mut Fragment) -> EntityDetails {
    let trust = fragment
        .take("trust")
        .map(|trust| Trust {
            value: raw::text_of(&trust)
                .filter(|t| !t.is_empty())
                .map(|t| TrustValue::from_text(&t)),
            time: coerce::parse_date(text(&trust, "time").as_deref()),
        })
        .unwrap_or_default();

    EntityDetails::ReportFormat(ReportFormatDetails {
        extension: fragment.take_text("extension"),
        content_type: fragment.take_text("content_type"),
        summary: fragment.take_text("summary"),
        description: fragment.take_text("description"),
        trust,
        active: fragment.take_yes_no("active"),
        predefined: fragment.take_yes_no("predefined"),
        configurable: fragment.take_yes_no("configurable"),
        deprecated: fragment.take_yes_no("deprecated"),
        params: fragment
            .take_items("param")
            .iter()
            .filter_map(param)
            .collect(),
        alerts: fragment.take_refs("alerts", "alert"),
    })
}

/// `<param><name/><type>integer<min>1</min><max>9</max></type>...</param>`
fn param(value: &Value) -> Option<ReportFormatParam> {
    let param_type = raw::child(value, "type");
    Some(ReportFormatParam {
        name: text(value, "name")?,
        param_type: param_type.and_then(raw::text_of).filter(|t| !t.is_empty()),
        min: param_type.and_then(|t| coerce::parse_int(text(t, "min").as_deref())),
        max: param_type.and_then(|t| coerce::parse_int(text(t, "max").as_deref())),
        value: text(value, "value"),
        default: text(value, "default"),
        options: texts(raw::get_path(value, &["options", "option"])),
    })
}
