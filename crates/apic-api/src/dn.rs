// Managed-object addressing for the APIC management information tree.
//
// Every configurable object lives at a distinguished name (DN) built from
// relative-name (RN) fragments, e.g. `uni/tn-prod/subj-rules/aspathrxtrm-t1`.
// `MoAddress` models the ordered class hierarchy; `MoQuery` is the concrete
// read request derived from it, with scope broadening when upper levels are
// unnamed.

use std::fmt;

/// One level of the object hierarchy: class, RN prefix, and the (optional)
/// key name. An unnamed level is only legal for query-scope broadening.
#[derive(Debug, Clone)]
pub struct MoLevel {
    pub class: &'static str,
    pub rn_prefix: &'static str,
    pub name: Option<String>,
}

impl MoLevel {
    /// The RN fragment for this level, e.g. `tn-production`.
    fn rn(&self) -> Option<String> {
        self.name.as_ref().map(|n| format!("{}{}", self.rn_prefix, n))
    }
}

/// An ordered hierarchy of levels under the MIT root `uni`.
#[derive(Debug, Clone, Default)]
pub struct MoAddress {
    levels: Vec<MoLevel>,
}

impl MoAddress {
    pub fn new() -> Self {
        Self { levels: Vec::new() }
    }

    /// Append a hierarchy level. Builder-style; call in root-to-leaf order.
    pub fn level(
        mut self,
        class: &'static str,
        rn_prefix: &'static str,
        name: Option<String>,
    ) -> Self {
        self.levels.push(MoLevel { class, rn_prefix, name });
        self
    }

    /// The class of the deepest (target) level.
    pub fn target_class(&self) -> Option<&'static str> {
        self.levels.last().map(|l| l.class)
    }

    /// The full DN, available only when every level is named.
    pub fn dn(&self) -> Option<String> {
        let mut dn = String::from("uni");
        for level in &self.levels {
            dn.push('/');
            dn.push_str(&level.rn()?);
        }
        Some(dn)
    }

    /// DN of the longest named prefix, or `None` when the root is unnamed.
    fn scope_dn(&self) -> Option<(String, usize)> {
        let named = self
            .levels
            .iter()
            .take_while(|l| l.name.is_some())
            .count();
        if named == 0 {
            return None;
        }
        let mut dn = String::from("uni");
        for level in &self.levels[..named] {
            // take_while guarantees the name is present
            if let Some(rn) = level.rn() {
                dn.push('/');
                dn.push_str(&rn);
            }
        }
        Some((dn, named))
    }

    /// Build the read query for this address.
    ///
    /// - Fully named: MO read on the DN. `config_only` adds
    ///   `rsp-prop-include=config-only` (reconcile reads compare only
    ///   configurable properties).
    /// - Named prefix: subtree query from the deepest named ancestor,
    ///   scoped to the target class. Names below the gap broaden away.
    /// - Root unnamed: class-wide query, with an `eq(<class>.name, ...)`
    ///   filter when the target level is named.
    pub fn read_query(&self, config_only: bool) -> MoQuery {
        let target = self.target_class().unwrap_or_default();

        match self.scope_dn() {
            Some((dn, named)) if named == self.levels.len() => {
                let mut params = Vec::new();
                if config_only {
                    params.push(("rsp-prop-include".to_owned(), "config-only".to_owned()));
                }
                MoQuery::Mo { dn, params }
            }
            Some((dn, _)) => MoQuery::Mo {
                dn,
                params: vec![
                    ("query-target".to_owned(), "subtree".to_owned()),
                    ("target-subtree-class".to_owned(), target.to_owned()),
                ],
            },
            None => {
                let mut params = Vec::new();
                if let Some(level) = self.levels.last() {
                    if let Some(ref name) = level.name {
                        params.push((
                            "query-target-filter".to_owned(),
                            format!("eq({}.name,\"{}\")", level.class, name),
                        ));
                    }
                }
                MoQuery::Class {
                    class: target.to_owned(),
                    params,
                }
            }
        }
    }
}

/// A concrete read request against the object tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoQuery {
    /// `GET /api/mo/{dn}.json`
    Mo {
        dn: String,
        params: Vec<(String, String)>,
    },
    /// `GET /api/class/{class}.json`
    Class {
        class: String,
        params: Vec<(String, String)>,
    },
}

impl MoQuery {
    /// Relative request path, without query parameters.
    pub fn path(&self) -> String {
        match self {
            Self::Mo { dn, .. } => format!("api/mo/{dn}.json"),
            Self::Class { class, .. } => format!("api/class/{class}.json"),
        }
    }

    /// Query parameters to attach to the request.
    pub fn params(&self) -> &[(String, String)] {
        match self {
            Self::Mo { params, .. } | Self::Class { params, .. } => params,
        }
    }

    /// The filter string as it appears on the wire, for diagnostics.
    pub fn filter_string(&self) -> String {
        let params = self.params();
        if params.is_empty() {
            return String::new();
        }
        let joined = params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("?{joined}")
    }
}

impl fmt::Display for MoQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.path(), self.filter_string())
    }
}
