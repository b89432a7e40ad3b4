// APIC REST HTTP client
//
// Wraps `reqwest::Client` with object-tree URL construction, `imdata`
// envelope unwrapping, and APIC error normalization. Reads take a
// `MoQuery`; writes and deletes address a DN directly.

use tracing::debug;
use url::Url;

use crate::dn::MoQuery;
use crate::error::Error;
use crate::models::{Envelope, ManagedObject};
use crate::transport::TransportConfig;

/// Raw HTTP client for the APIC object-tree REST API.
///
/// Handles the `{ totalCount, imdata }` envelope and surfaces APIC error
/// records as `Error::Apic` with request metadata attached. All methods
/// return unwrapped `imdata` payloads.
pub struct ApicClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApicClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// If the config doesn't already include a cookie jar, one is created
    /// automatically (APIC session auth requires the `APIC-cookie`).
    /// The `base_url` should be the controller root, e.g. `https://apic1`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let http = config.build_client()?;
        Ok(Self {
            http,
            base_url: normalize_base(base_url),
        })
    }

    /// Wrap a pre-built `reqwest::Client` (caller manages cookies).
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url: normalize_base(base_url),
        }
    }

    /// The controller base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client (for auth flows that need direct access).
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Join a relative API path (e.g. `api/mo/uni/tn-prod.json`) onto the base.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        self.base_url.join(path).map_err(Error::InvalidUrl)
    }

    // ── Requests ─────────────────────────────────────────────────────

    /// Execute a read query and return the matching objects.
    ///
    /// A missing MO is not an error: the APIC answers with an empty
    /// `imdata`, which comes back as an empty vec.
    pub async fn get(&self, query: &MoQuery) -> Result<Vec<ManagedObject>, Error> {
        let url = self.url(&query.path())?;
        debug!("GET {url}{}", query.filter_string());

        let resp = self
            .http
            .get(url.clone())
            .query(query.params())
            .send()
            .await
            .map_err(Error::Transport)?;

        self.parse_envelope("GET", &url, resp).await
    }

    /// POST a configuration payload to the object at `dn`.
    pub async fn post(&self, dn: &str, payload: &ManagedObject) -> Result<Vec<ManagedObject>, Error> {
        let url = self.url(&format!("api/mo/{dn}.json"))?;
        debug!("POST {url}");

        let resp = self
            .http
            .post(url.clone())
            .json(payload)
            .send()
            .await
            .map_err(Error::Transport)?;

        self.parse_envelope("POST", &url, resp).await
    }

    /// DELETE the object at `dn`.
    pub async fn delete(&self, dn: &str) -> Result<Vec<ManagedObject>, Error> {
        let url = self.url(&format!("api/mo/{dn}.json"))?;
        debug!("DELETE {url}");

        let resp = self
            .http
            .delete(url.clone())
            .send()
            .await
            .map_err(Error::Transport)?;

        self.parse_envelope("DELETE", &url, resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    /// Parse the `{ totalCount, imdata }` envelope.
    ///
    /// An `error` record in `imdata` wins over the HTTP status -- the APIC
    /// reports structured errors on 400-class responses and occasionally
    /// on 200s. A non-2xx response with no parseable envelope becomes
    /// `Error::Http` with the raw body attached.
    pub(crate) async fn parse_envelope(
        &self,
        method: &str,
        url: &Url,
        resp: reqwest::Response,
    ) -> Result<Vec<ManagedObject>, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        match serde_json::from_str::<Envelope>(&body) {
            Ok(envelope) => {
                if let Some((code, text)) = envelope.error() {
                    if status == reqwest::StatusCode::FORBIDDEN {
                        return Err(Error::SessionExpired);
                    }
                    return Err(Error::Apic {
                        code,
                        text,
                        status: status.as_u16(),
                        method: method.to_owned(),
                        url: url.to_string(),
                    });
                }
                if !status.is_success() {
                    return Err(Error::Http {
                        status: status.as_u16(),
                        method: method.to_owned(),
                        url: url.to_string(),
                        body,
                    });
                }
                Ok(envelope.objects())
            }
            Err(e) if status.is_success() => Err(Error::ParseResponse {
                message: e.to_string(),
                raw: body,
            }),
            Err(_) => Err(Error::Http {
                status: status.as_u16(),
                method: method.to_owned(),
                url: url.to_string(),
                body,
            }),
        }
    }
}

/// Ensure the base path ends with `/` so relative joins work.
fn normalize_base(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
