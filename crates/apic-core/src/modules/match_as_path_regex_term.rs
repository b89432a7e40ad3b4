// Match Regular Expression AS-Path Term (rtctrlMatchAsPathRegexTerm)
//
// A leaf of a route-control match-rule profile: a regex matched against
// BGP AS-path attributes. Lives at
// `uni/tn-<tenant>/subj-<match_rule>/aspathrxtrm-<name>`.

use apic_api::dn::MoAddress;
use apic_api::models::Attributes;

use crate::error::CoreError;
use crate::reconcile::Plan;

pub const TENANT_CLASS: &str = "fvTenant";
pub const MATCH_RULE_CLASS: &str = "rtctrlSubjP";
pub const TERM_CLASS: &str = "rtctrlMatchAsPathRegexTerm";

const TENANT_RN: &str = "tn-";
const MATCH_RULE_RN: &str = "subj-";
const TERM_RN: &str = "aspathrxtrm-";

/// Flat optional parameter set, as supplied by the invocation surface.
///
/// `TermState` resolvers validate this into the typed union; missing
/// required keys fail here, before any network call.
#[derive(Debug, Clone, Default)]
pub struct TermParams {
    pub tenant: Option<String>,
    pub match_rule: Option<String>,
    pub name: Option<String>,
    pub regex: Option<String>,
    pub description: Option<String>,
    pub name_alias: Option<String>,
    pub annotation: Option<String>,
    pub owner_key: Option<String>,
    pub owner_tag: Option<String>,
}

/// The validated desired state for one invocation.
#[derive(Debug, Clone)]
pub enum TermState {
    Present {
        tenant: String,
        match_rule: String,
        name: String,
        regex: Option<String>,
        description: Option<String>,
        name_alias: Option<String>,
        annotation: Option<String>,
        owner_key: Option<String>,
        owner_tag: Option<String>,
    },
    Absent {
        tenant: String,
        match_rule: String,
        name: String,
    },
    Query {
        tenant: Option<String>,
        match_rule: Option<String>,
        name: Option<String>,
    },
}

impl TermState {
    /// Resolve `present` parameters. Requires tenant, match rule, and name.
    pub fn present(params: TermParams) -> Result<Self, CoreError> {
        let (tenant, match_rule, name) = require_keys("present", &params)?;
        Ok(Self::Present {
            tenant,
            match_rule,
            name,
            regex: params.regex,
            description: params.description,
            name_alias: params.name_alias,
            annotation: params.annotation,
            owner_key: params.owner_key,
            owner_tag: params.owner_tag,
        })
    }

    /// Resolve `absent` parameters. Requires tenant, match rule, and name.
    pub fn absent(params: TermParams) -> Result<Self, CoreError> {
        let (tenant, match_rule, name) = require_keys("absent", &params)?;
        Ok(Self::Absent {
            tenant,
            match_rule,
            name,
        })
    }

    /// Resolve `query` parameters. Every key is optional; unnamed levels
    /// broaden the scope up to a fleet-wide class listing.
    pub fn query(params: TermParams) -> Self {
        Self::Query {
            tenant: params.tenant,
            match_rule: params.match_rule,
            name: params.name,
        }
    }

    /// Translate into a reconciliation plan.
    pub fn plan(&self) -> Plan {
        match self {
            Self::Present {
                tenant,
                match_rule,
                name,
                regex,
                description,
                name_alias,
                annotation,
                owner_key,
                owner_tag,
            } => Plan::Ensure {
                address: address(
                    Some(tenant.clone()),
                    Some(match_rule.clone()),
                    Some(name.clone()),
                ),
                class: TERM_CLASS,
                attributes: assemble_attributes(
                    name,
                    regex.as_deref(),
                    description.as_deref(),
                    name_alias.as_deref(),
                    annotation.as_deref(),
                    owner_key.as_deref(),
                    owner_tag.as_deref(),
                ),
            },
            Self::Absent {
                tenant,
                match_rule,
                name,
            } => Plan::Remove {
                address: address(
                    Some(tenant.clone()),
                    Some(match_rule.clone()),
                    Some(name.clone()),
                ),
            },
            Self::Query {
                tenant,
                match_rule,
                name,
            } => Plan::Query {
                address: address(tenant.clone(), match_rule.clone(), name.clone()),
            },
        }
    }
}

/// Build the three-level address: tenant -> match-rule profile -> term.
fn address(tenant: Option<String>, match_rule: Option<String>, name: Option<String>) -> MoAddress {
    MoAddress::new()
        .level(TENANT_CLASS, TENANT_RN, tenant)
        .level(MATCH_RULE_CLASS, MATCH_RULE_RN, match_rule)
        .level(TERM_CLASS, TERM_RN, name)
}

/// Only provided fields participate -- never send empty overwrites.
fn assemble_attributes(
    name: &str,
    regex: Option<&str>,
    description: Option<&str>,
    name_alias: Option<&str>,
    annotation: Option<&str>,
    owner_key: Option<&str>,
    owner_tag: Option<&str>,
) -> Attributes {
    let mut attributes = Attributes::new();
    attributes.insert("name".to_owned(), name.to_owned());
    let optional = [
        ("regex", regex),
        ("descr", description),
        ("nameAlias", name_alias),
        ("annotation", annotation),
        ("ownerKey", owner_key),
        ("ownerTag", owner_tag),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            attributes.insert(key.to_owned(), value.to_owned());
        }
    }
    attributes
}

fn require_keys(
    state: &str,
    params: &TermParams,
) -> Result<(String, String, String), CoreError> {
    let missing: Vec<&str> = [
        ("tenant", params.tenant.is_none()),
        ("match_rule", params.match_rule.is_none()),
        ("name", params.name.is_none()),
    ]
    .into_iter()
    .filter_map(|(key, absent)| absent.then_some(key))
    .collect();

    if !missing.is_empty() {
        return Err(CoreError::Validation {
            message: format!("state '{state}' requires: {}", missing.join(", ")),
        });
    }

    // None cases rejected above
    match (&params.tenant, &params.match_rule, &params.name) {
        (Some(tenant), Some(match_rule), Some(name)) => {
            Ok((tenant.clone(), match_rule.clone(), name.clone()))
        }
        _ => Err(CoreError::Internal("required key check out of sync".into())),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn full_params() -> TermParams {
        TermParams {
            tenant: Some("production".into()),
            match_rule: Some("prod_match_rule".into()),
            name: Some("prod_match_as_path_regex_term".into()),
            regex: Some(".*".into()),
            ..TermParams::default()
        }
    }

    #[test]
    fn present_requires_tenant_and_name() {
        let err = TermState::present(TermParams {
            name: Some("t1".into()),
            ..TermParams::default()
        })
        .unwrap_err();
        assert!(matches!(err, CoreError::Validation { ref message }
            if message.contains("tenant") && !message.contains("name")));

        let err = TermState::absent(TermParams {
            tenant: Some("prod".into()),
            match_rule: Some("rules".into()),
            ..TermParams::default()
        })
        .unwrap_err();
        assert!(matches!(err, CoreError::Validation { ref message }
            if message.contains("name")));
    }

    #[test]
    fn query_accepts_empty_parameter_set() {
        let state = TermState::query(TermParams::default());
        let Plan::Query { address } = state.plan() else {
            panic!("expected query plan");
        };
        assert!(address.dn().is_none());
    }

    #[test]
    fn present_address_resolves_expected_dn() {
        let state = TermState::present(full_params()).unwrap();
        let Plan::Ensure { address, class, .. } = state.plan() else {
            panic!("expected ensure plan");
        };
        assert_eq!(class, TERM_CLASS);
        assert_eq!(
            address.dn().unwrap(),
            "uni/tn-production/subj-prod_match_rule/aspathrxtrm-prod_match_as_path_regex_term"
        );
    }

    #[test]
    fn payload_omits_unset_attributes() {
        let state = TermState::present(full_params()).unwrap();
        let Plan::Ensure { attributes, .. } = state.plan() else {
            panic!("expected ensure plan");
        };
        assert_eq!(
            attributes.get("name").map(String::as_str),
            Some("prod_match_as_path_regex_term")
        );
        assert_eq!(attributes.get("regex").map(String::as_str), Some(".*"));
        assert!(!attributes.contains_key("descr"));
        assert!(!attributes.contains_key("nameAlias"));
        assert!(!attributes.contains_key("annotation"));
    }

    #[test]
    fn payload_maps_parameter_names_to_wire_names() {
        let params = TermParams {
            description: Some("prod term".into()),
            name_alias: Some("alias".into()),
            annotation: Some("orchestrator:apicctl".into()),
            ..full_params()
        };
        let state = TermState::present(params).unwrap();
        let Plan::Ensure { attributes, .. } = state.plan() else {
            panic!("expected ensure plan");
        };
        assert_eq!(attributes.get("descr").map(String::as_str), Some("prod term"));
        assert_eq!(attributes.get("nameAlias").map(String::as_str), Some("alias"));
        assert_eq!(
            attributes.get("annotation").map(String::as_str),
            Some("orchestrator:apicctl")
        );
    }
}
