// APIC session authentication
//
// Cookie-based login/logout via `aaaLogin`. The login response sets the
// `APIC-cookie` in the client's jar; subsequent requests use it
// automatically. Token refresh is out of scope -- a single invocation
// never outlives the default session timeout.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::error::Error;
use crate::rest::ApicClient;

impl ApicClient {
    /// Authenticate with the controller using username/password.
    ///
    /// On success the session cookie is stored in the client's cookie jar
    /// and used for all subsequent requests.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        let url = self.url("api/aaaLogin.json")?;
        debug!("logging in at {url}");

        let body = json!({
            "aaaUser": {
                "attributes": {
                    "name": username,
                    "pwd": password.expose_secret(),
                }
            }
        });

        let resp = self
            .http()
            .post(url.clone())
            .json(&body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        match self.parse_envelope("POST", &url, resp).await {
            Ok(_) => {
                debug!("login successful");
                Ok(())
            }
            Err(Error::Apic { text, .. }) => Err(Error::Authentication { message: text }),
            Err(Error::SessionExpired) => Err(Error::Authentication {
                message: format!("login rejected (HTTP {status})"),
            }),
            Err(e) => Err(e),
        }
    }

    /// End the current session.
    pub async fn logout(&self, username: &str) -> Result<(), Error> {
        let url = self.url("api/aaaLogout.json")?;
        debug!("logging out at {url}");

        let body = json!({
            "aaaUser": {
                "attributes": {
                    "name": username,
                }
            }
        });

        self.http()
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(Error::Transport)?;

        Ok(())
    }
}
