use realmscan_domain::ProbeOutcome;
use serde_json::Value;

/// Provider wording for a rejected refresh token; the realm exists.
const INVALID_REFRESH_TOKEN: &str = "invalid refresh token";

/// Longest body excerpt carried in an indeterminate reason.
const MAX_EXCERPT_CHARS: usize = 200;

/// Map a token-endpoint response to a probe outcome.
///
/// The provider exposes no structured "realm missing" code, so non-200
/// bodies are matched on case-insensitive substrings of the raw text:
///
/// | response                                   | outcome          |
/// |--------------------------------------------|------------------|
/// | 200 with JSON `access_token`               | `Provisioned`    |
/// | non-200 containing "error" and "realm"     | `NotProvisioned` |
/// | non-200 containing "invalid refresh token" | `Provisioned`    |
/// | anything else                              | `Indeterminate`  |
///
/// The realm check wins when a body matches both rules.
pub fn classify(status: u16, body: &str) -> ProbeOutcome {
    if status == 200 {
        return classify_success(body);
    }

    let lower = body.to_lowercase();
    if lower.contains("error") && lower.contains("realm") {
        return ProbeOutcome::NotProvisioned;
    }
    if lower.contains(INVALID_REFRESH_TOKEN) {
        return ProbeOutcome::Provisioned;
    }
    ProbeOutcome::indeterminate(format!(
        "unexpected response: status {}, body {:?}",
        status,
        excerpt(body)
    ))
}

fn classify_success(body: &str) -> ProbeOutcome {
    match serde_json::from_str::<Value>(body) {
        Ok(json) if json.get("access_token").is_some_and(|t| !t.is_null()) => {
            ProbeOutcome::Provisioned
        }
        Ok(_) => ProbeOutcome::indeterminate("status 200 without an access token"),
        Err(e) => ProbeOutcome::indeterminate(format!(
            "status 200 with unparseable body ({}): {:?}",
            e,
            excerpt(body)
        )),
    }
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX_EXCERPT_CHARS) {
        Some((idx, _)) => format!("{}…", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}
