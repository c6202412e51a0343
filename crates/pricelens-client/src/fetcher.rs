use std::error::Error as StdError;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use pricelens_core::config::DEFAULT_TIMEOUT;
use pricelens_core::error::AppError;
use pricelens_core::traits::{Fetcher, Header};
use reqwest::Client;
use reqwest::dns::{Addrs, Name, Resolve, Resolving};
use reqwest::redirect;
use url::{Host, Url};

/// Same hop limit reqwest applies by default.
const MAX_REDIRECTS: usize = 10;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Single-attempt HTTP fetcher using reqwest.
///
/// Sends the caller's headers (site profiles supply browser-like ones) and
/// enforces a per-request timeout. Retries are layered on top with
/// [`pricelens_core::retry::RetryingFetcher`].
///
/// SSRF protection is **enabled** by default: URLs whose host is, or
/// resolves to, a private or reserved address are refused with
/// [`AppError::BlockedUrl`]. The check covers every redirect hop and every
/// DNS answer reqwest connects to, not just the submitted URL.
/// Use [`allow_private_urls`](Self::allow_private_urls) to disable it
/// (CLI usage, local test upstreams).
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Client,
    timeout: Duration,
    ssrf_protection: bool,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self, AppError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, AppError> {
        Self::build(timeout, true)
    }

    /// Disable SSRF protection, allowing requests to private/reserved IPs.
    pub fn allow_private_urls(self) -> Result<Self, AppError> {
        Self::build(self.timeout, false)
    }

    fn build(timeout: Duration, ssrf_protection: bool) -> Result<Self, AppError> {
        let mut builder = Client::builder()
            .user_agent(concat!("PriceLens/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout);

        if ssrf_protection {
            // A proxy would resolve hosts itself, bypassing the resolver.
            builder = builder
                .no_proxy()
                .redirect(guarded_redirects())
                .dns_resolver(PublicOnlyResolver);
        }

        let client = builder
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            timeout,
            ssrf_protection,
        })
    }

    fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }

    fn map_send_error(&self, e: reqwest::Error) -> AppError {
        if let Some(reason) = blocked_reason(&e) {
            AppError::BlockedUrl(reason)
        } else if e.is_timeout() {
            AppError::Timeout(self.timeout_ms())
        } else if e.is_connect() {
            AppError::NetworkError(format!("Connection failed: {e}"))
        } else if e.is_builder() {
            AppError::Generic(format!("Invalid request: {e}"))
        } else {
            AppError::HttpError(e.to_string())
        }
    }
}

impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str, headers: &[Header]) -> Result<String, AppError> {
        let parsed = parse_http_url(url)?;
        if self.ssrf_protection {
            ensure_public_host(&parsed).await?;
        }

        let mut request = self.client.get(parsed);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await.map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::HttpError(format!(
                "HTTP {} for {}",
                status.as_u16(),
                url
            )));
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                AppError::Timeout(self.timeout_ms())
            } else {
                AppError::HttpError(format!("Failed to read response body: {e}"))
            }
        })
    }
}

// ---------------------------------------------------------------------------
// SSRF protection
// ---------------------------------------------------------------------------

/// Parse a URL and require an http(s) scheme and a host.
fn parse_http_url(url: &str) -> Result<Url, AppError> {
    let parsed = Url::parse(url).map_err(|e| AppError::BlockedUrl(format!("Invalid URL: {e}")))?;
    ensure_http_target(&parsed)?;
    Ok(parsed)
}

fn ensure_http_target(url: &Url) -> Result<(), AppError> {
    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(AppError::BlockedUrl(format!(
                "URL scheme '{scheme}' is not allowed (only http/https)"
            )));
        }
    }

    if url.host_str().is_none() {
        return Err(AppError::BlockedUrl("URL has no host".to_string()));
    }

    Ok(())
}

/// Refuse IP-literal hosts in private/reserved ranges. Domain names pass;
/// they are checked when resolved.
fn ensure_public_literal(url: &Url) -> Result<(), AppError> {
    let ip: IpAddr = match url.host() {
        Some(Host::Ipv4(v4)) => v4.into(),
        Some(Host::Ipv6(v6)) => v6.into(),
        _ => return Ok(()),
    };

    if is_private_ip(ip) {
        return Err(AppError::BlockedUrl(format!(
            "{ip} is a private/reserved address"
        )));
    }
    Ok(())
}

/// Refuse hosts that are, or resolve to, private/reserved addresses.
async fn ensure_public_host(url: &Url) -> Result<(), AppError> {
    ensure_public_literal(url)?;

    match url.host() {
        Some(Host::Domain(domain)) => public_addrs(domain).await.map(|_| ()),
        _ => Ok(()),
    }
}

/// Resolve `host`, failing if any answer is private/reserved.
async fn public_addrs(host: &str) -> Result<Vec<SocketAddr>, AppError> {
    let addrs: Vec<SocketAddr> = tokio::net::lookup_host((host, 0))
        .await
        .map_err(|e| AppError::NetworkError(format!("DNS resolution failed for {host}: {e}")))?
        .collect();

    if addrs.is_empty() {
        return Err(AppError::NetworkError(format!(
            "DNS resolution returned no addresses for {host}"
        )));
    }

    if let Some(addr) = addrs.iter().find(|a| is_private_ip(a.ip())) {
        return Err(AppError::BlockedUrl(format!(
            "{host} resolves to private/reserved address {}",
            addr.ip()
        )));
    }

    Ok(addrs)
}

/// DNS resolver that never hands reqwest a private/reserved address, so a
/// host that re-resolves after [`ensure_public_host`] (or one reached through
/// a redirect) is still refused.
struct PublicOnlyResolver;

impl Resolve for PublicOnlyResolver {
    fn resolve(&self, name: Name) -> Resolving {
        Box::pin(async move {
            match public_addrs(name.as_str()).await {
                Ok(addrs) => Ok(Box::new(addrs.into_iter()) as Addrs),
                Err(e) => Err(Box::new(e) as BoxError),
            }
        })
    }
}

/// Redirect policy that re-applies the scheme and IP-literal checks on
/// every hop.
fn guarded_redirects() -> redirect::Policy {
    redirect::Policy::custom(|attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            return attempt.error(AppError::HttpError(format!(
                "Too many redirects (more than {MAX_REDIRECTS})"
            )));
        }

        let verdict =
            ensure_http_target(attempt.url()).and_then(|()| ensure_public_literal(attempt.url()));
        match verdict {
            Ok(()) => attempt.follow(),
            Err(e) => attempt.error(e),
        }
    })
}

/// The refusal reason if a redirect hop or DNS answer was blocked.
fn blocked_reason(err: &reqwest::Error) -> Option<String> {
    let mut source = err.source();
    while let Some(cause) = source {
        if let Some(AppError::BlockedUrl(reason)) = cause.downcast_ref::<AppError>() {
            return Some(reason.clone());
        }
        source = cause.source();
    }
    None
}

/// Check if an IP address is in a private/reserved/link-local range.
fn is_private_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            let [a, b, ..] = v4.octets();
            v4.is_loopback()
                || v4.is_private()
                || v4.is_link_local()
                || v4.is_unspecified()
                || v4.is_broadcast()
                || v4.is_documentation()
                || (a == 100 && (b & 0xC0) == 64) // 100.64.0.0/10 (CGN)
        }
        IpAddr::V6(v6) => {
            let first = v6.segments()[0];
            v6.is_loopback()
                || v6.is_unspecified()
                || (first & 0xFFC0) == 0xFE80 // link-local
                || (first & 0xFE00) == 0xFC00 // unique local
                || v6
                    .to_ipv4_mapped()
                    .is_some_and(|v4| is_private_ip(IpAddr::V4(v4)))
        }
    }
}
