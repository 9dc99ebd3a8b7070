use reqwest::Url;
use thiserror::Error;

pub const NOTIFY_PATH: &str = "/notify";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TargetError {
    #[error("target address is empty")]
    Empty,

    #[error("'{target}' is not a valid address: {reason}")]
    Invalid { target: String, reason: String },

    #[error("unsupported scheme '{scheme}' in '{target}'")]
    UnsupportedScheme { target: String, scheme: String },
}

/// Turns `host`, `host:port` or a full URL into the `/notify` endpoint URL.
///
/// Inputs without a scheme get `http://`. The path gets `/notify` appended
/// unless it already ends with it, ignoring one trailing `/`; query strings are left alone and never
/// consulted. Normalizing an already normalized URL returns it unchanged.
pub fn normalize_target(target: &str) -> Result<Url, TargetError> {
    let target = target.trim();
    if target.is_empty() {
        return Err(TargetError::Empty);
    }

    // `localhost:8080` parses as scheme `localhost` without a host
    let mut url = match Url::parse(target) {
        Ok(url) if url.has_host() => url,
        _ => Url::parse(&format!("http://{}", target)).map_err(|e| TargetError::Invalid {
            target: target.to_string(),
            reason: e.to_string(),
        })?,
    };

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(TargetError::UnsupportedScheme {
            target: target.to_string(),
            scheme: url.scheme().to_string(),
        });
    }

    // `/notify/` already names the endpoint
    let path = url.path().strip_suffix('/').unwrap_or(url.path()).to_string();
    if path.ends_with(NOTIFY_PATH) {
        url.set_path(&path);
    } else {
        url.set_path(&format!("{}{}", path.trim_end_matches('/'), NOTIFY_PATH));
    }

    Ok(url)
}
