//! CERT-Bund and DFN-CERT advisories.

use super::info::take_info_severity;
use crate::model::{AdvisoryInfo, AdvisoryLink, CertBundAdvDetails, DfnCertAdvDetails, EntityDetails};
use crate::parsers::fragment::{text, texts, Fragment};
use crate::raw;
use serde_json::Value;

fn raw_document(fragment: &Fragment, root: &str) -> Value {
    fragment
        .get("raw_data")
        .and_then(|raw_data| raw::child(raw_data, root))
        .cloned()
        .unwrap_or(Value::Null)
}

pub(crate) fn extend_cert_bund(fragment: &mut Fragment) -> EntityDetails {
    let advisory = raw_document(fragment, "Advisory");
    let description = raw::as_list(raw::get_path(&advisory, &["Description", "Element"]))
        .into_iter()
        .filter_map(|element| raw::child(element, "TextBlock").and_then(raw::text_of))
        .filter(|block| !block.is_empty())
        .collect();

    EntityDetails::CertBundAdv(CertBundAdvDetails {
        title: fragment
            .take_text("title")
            .or_else(|| text(&advisory, "Title")),
        summary: fragment.take_text("summary"),
        severity: take_info_severity(fragment),
        cve_ref_count: fragment.take_count("cve_refs").unwrap_or_default(),
        version: text(&advisory, "Version"),
        software: text(&advisory, "Software"),
        platform: text(&advisory, "Platform"),
        effect: text(&advisory, "Effect"),
        remote_attack: text(&advisory, "RemoteAttack"),
        risk: text(&advisory, "Risk"),
        reference_source: text(&advisory, "Reference_Source"),
        reference_url: text(&advisory, "Reference_URL"),
        categories: texts(raw::child(&advisory, "CategoryTree")),
        description,
        additional_information: raw::as_list(raw::get_path(&advisory, &["Infos", "Info"]))
            .into_iter()
            .map(|info| AdvisoryInfo {
                issuer: text(info, "Info_Issuer"),
                url: text(info, "Info_URL"),
            })
            .collect(),
        cves: texts(raw::get_path(&advisory, &["CVEList", "CVE"])),
    })
}

pub(crate) fn extend_dfn_cert(fragment: &mut Fragment) -> EntityDetails {
    let entry = raw_document(fragment, "entry");
    let links: Vec<AdvisoryLink> = raw::as_list(raw::child(&entry, "link"))
        .into_iter()
        .filter_map(|link| {
            Some(AdvisoryLink {
                rel: text(link, "rel"),
                href: text(link, "href")?,
            })
        })
        .collect();
    let (alternate, additional_links): (Vec<_>, Vec<_>) = links
        .into_iter()
        .partition(|link| link.rel.as_deref() == Some("alternate"));

    EntityDetails::DfnCertAdv(DfnCertAdvDetails {
        title: fragment
            .take_text("title")
            .or_else(|| text(&entry, "title")),
        summary: fragment
            .take_text("summary")
            .or_else(|| text(&entry, "summary")),
        severity: take_info_severity(fragment),
        cve_ref_count: fragment.take_count("cve_refs").unwrap_or_default(),
        advisory_link: alternate.into_iter().next().map(|link| link.href),
        additional_links,
        cves: texts(raw::child(&entry, "cve")),
    })
}
