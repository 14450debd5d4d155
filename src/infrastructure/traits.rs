//! I/O boundary trait for testability
//!
//! The floating IP service is reached only through `FipApi`, allowing
//! services to be tested with stub implementations.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, trace};

use crate::config::Settings;
use crate::domain::FilterArgs;
use crate::infrastructure::{ApiError, ApiResult};

/// Remote floating IP API.
///
/// Arguments are forwarded unchanged; the service does all semantic validation.
pub trait FipApi: Send + Sync {
    /// Allocate `count` new floating IPs.
    fn allocate(&self, count: &str) -> ApiResult<Vec<String>>;

    /// Release a single floating IP.
    fn release(&self, ip: &str) -> ApiResult<()>;

    /// Attach a floating IP to a container.
    fn associate(&self, ip: &str, container: &str) -> ApiResult<()>;

    /// Detach whatever floating IP the container holds, returning that IP.
    fn deassociate(&self, container: &str) -> ApiResult<String>;

    /// List floating IPs matching the filters.
    fn list(&self, filters: &FilterArgs) -> ApiResult<Vec<String>>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// HTTP implementation of `FipApi` on top of a blocking ureq agent.
pub struct HttpFipClient {
    agent: ureq::Agent,
    base_url: String,
    api_version: Option<String>,
    token: Option<String>,
}

/// A list entry is either a bare IP or a record carrying it under `fip`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListEntry {
    Ip(String),
    Record { fip: String },
}

impl From<ListEntry> for String {
    fn from(entry: ListEntry) -> Self {
        match entry {
            ListEntry::Ip(ip) | ListEntry::Record { fip: ip } => ip,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl HttpFipClient {
    pub fn new(settings: &Settings) -> ApiResult<Self> {
        let base_url = normalize_host(&settings.host)?;
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(concat!("fip/", env!("CARGO_PKG_VERSION")))
            .build();
        debug!(
            "HttpFipClient: base_url={} api_version={:?}",
            base_url, settings.api_version
        );
        Ok(Self {
            agent,
            base_url,
            api_version: settings.api_version.clone(),
            token: settings.token.clone(),
        })
    }

    /// Full URL for an API path, with the version prefix when configured.
    pub fn endpoint(&self, path: &str) -> String {
        match &self.api_version {
            Some(version) => format!("{}/v{}{}", self.base_url, version, path),
            None => format!("{}{}", self.base_url, path),
        }
    }

    fn send(&self, method: &str, path: &str, query: &[(&str, &str)]) -> ApiResult<ureq::Response> {
        let url = self.endpoint(path);
        debug!("{} {} {:?}", method, url, query);

        let mut request = self.agent.request(method, &url);
        for (key, value) in query {
            request = request.query(key, value);
        }
        if let Some(token) = &self.token {
            request = request.set("Authorization", &format!("Bearer {token}"));
        }

        match request.call() {
            Ok(response) => {
                trace!("{} {} -> {}", method, url, response.status());
                Ok(response)
            }
            Err(ureq::Error::Status(status, response)) => {
                let status_text = response.status_text().to_string();
                let body = response.into_string().unwrap_or_default();
                debug!("{} {} -> {} {}", method, url, status, body.trim());
                Err(ApiError::Status {
                    status,
                    message: error_message(&status_text, &body),
                })
            }
            Err(ureq::Error::Transport(transport)) => match transport.kind() {
                ureq::ErrorKind::InvalidUrl | ureq::ErrorKind::UnknownScheme => {
                    Err(ApiError::Request {
                        message: transport.to_string(),
                    })
                }
                _ => Err(ApiError::Connect {
                    endpoint: self.base_url.clone(),
                    message: transport_reason(&transport),
                }),
            },
        }
    }

    fn send_json<T: DeserializeOwned>(
        &self,
        context: &str,
        method: &str,
        path: &str,
        query: &[(&str, &str)],
    ) -> ApiResult<T> {
        let body = self
            .send(method, path, query)?
            .into_string()
            .map_err(|e| ApiError::decode(context, e))?;
        serde_json::from_str(&body).map_err(|e| ApiError::decode(context, e))
    }
}

impl FipApi for HttpFipClient {
    fn allocate(&self, count: &str) -> ApiResult<Vec<String>> {
        self.send_json("allocate", "POST", "/fips/allocate", &[("count", count)])
    }

    fn release(&self, ip: &str) -> ApiResult<()> {
        self.send("POST", "/fips/release", &[("ip", ip)]).map(|_| ())
    }

    fn associate(&self, ip: &str, container: &str) -> ApiResult<()> {
        self.send(
            "POST",
            "/fips/associate",
            &[("ip", ip), ("container", container)],
        )
        .map(|_| ())
    }

    fn deassociate(&self, container: &str) -> ApiResult<String> {
        self.send_json(
            "deassociate",
            "POST",
            "/fips/deassociate",
            &[("container", container)],
        )
    }

    fn list(&self, filters: &FilterArgs) -> ApiResult<Vec<String>> {
        let entries: Vec<ListEntry> = if filters.is_empty() {
            self.send_json("list", "GET", "/fips", &[])?
        } else {
            let param = serde_json::to_string(filters).map_err(|e| ApiError::Request {
                message: format!("encode filters: {e}"),
            })?;
            self.send_json("list", "GET", "/fips", &[("filters", param.as_str())])?
        };
        Ok(entries.into_iter().map(String::from).collect())
    }
}

/// Turn a configured host into an HTTP base URL without trailing slash.
///
/// `tcp://` is treated as plain HTTP; a bare `host:port` gets `http://`.
pub fn normalize_host(host: &str) -> ApiResult<String> {
    let host = host.trim().trim_end_matches('/');
    if host.is_empty() {
        return Err(ApiError::Request {
            message: "empty host".into(),
        });
    }
    let url = match host.split_once("://") {
        Some(("tcp", rest)) => format!("http://{rest}"),
        Some(("http", _)) | Some(("https", _)) => host.to_string(),
        Some((scheme, _)) => {
            return Err(ApiError::Request {
                message: format!("unsupported host scheme: {scheme}"),
            })
        }
        None => format!("http://{host}"),
    };
    Ok(url)
}

/// Why a transport failed, without the request URL ureq puts in its `Display`.
fn transport_reason(transport: &ureq::Transport) -> String {
    let mut reason = transport.kind().to_string();
    if let Some(message) = transport.message() {
        reason.push_str(": ");
        reason.push_str(message);
    }
    if let Some(source) = std::error::Error::source(transport) {
        reason.push_str(": ");
        reason.push_str(&source.to_string());
    }
    reason
}

/// Message to show for a failed response: JSON `message`, else body text, else status text.
pub fn error_message(status_text: &str, body: &str) -> String {
    let body = body.trim();
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.message.trim().to_string();
    }
    if body.is_empty() {
        status_text.to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn client(api_version: Option<&str>) -> HttpFipClient {
        let settings = Settings {
            host: "tcp://10.0.0.5:2375/".into(),
            api_version: api_version.map(String::from),
            ..Default::default()
        };
        HttpFipClient::new(&settings).unwrap()
    }

    #[rstest]
    #[case("http://localhost:2375", "http://localhost:2375")]
    #[case("https://api.example/", "https://api.example")]
    #[case("tcp://10.0.0.5:2375", "http://10.0.0.5:2375")]
    #[case("10.0.0.5:2375", "http://10.0.0.5:2375")]
    fn given_host_when_normalizing_then_yields_http_base(#[case] host: &str, #[case] expected: &str) {
        assert_eq!(normalize_host(host).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("unix:///var/run/docker.sock")]
    fn given_unusable_host_when_normalizing_then_request_error(#[case] host: &str) {
        assert!(matches!(
            normalize_host(host),
            Err(ApiError::Request { .. })
        ));
    }

    #[test]
    fn given_api_version_when_building_endpoint_then_prefixes_path() {
        assert_eq!(
            client(Some("1.23")).endpoint("/fips/allocate"),
            "http://10.0.0.5:2375/v1.23/fips/allocate"
        );
    }

    #[test]
    fn given_no_api_version_when_building_endpoint_then_plain_path() {
        assert_eq!(client(None).endpoint("/fips"), "http://10.0.0.5:2375/fips");
    }

    #[rstest]
    #[case("Not Found", r#"{"message":"no such fip"}"#, "no such fip")]
    #[case("Conflict", "fip in use\n", "fip in use")]
    #[case("Internal Server Error", "", "Internal Server Error")]
    #[case("Bad Request", r#"{"other":"x"}"#, r#"{"other":"x"}"#)]
    fn given_error_body_when_extracting_message_then_prefers_json_message(
        #[case] status_text: &str,
        #[case] body: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(error_message(status_text, body), expected);
    }

    #[test]
    fn given_mixed_list_entries_when_decoding_then_yields_ips() {
        let entries: Vec<ListEntry> =
            serde_json::from_str(r#"["10.0.0.1", {"fip": "10.0.0.2", "container": "web"}]"#)
                .unwrap();
        let ips: Vec<String> = entries.into_iter().map(String::from).collect();
        assert_eq!(ips, vec!["10.0.0.1", "10.0.0.2"]);
    }
}
