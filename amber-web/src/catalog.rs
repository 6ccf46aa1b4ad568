//! Process-wide flow engine for the browser build.
//!
//! The catalog and flow variants are embedded at compile time, validated once
//! on first use and shared by every session the page starts.
use amber_flow::{ConfigError, FlowEngine, FlowMachine, StaticCatalogSource};
use once_cell::sync::Lazy;

static ENGINE: Lazy<Result<FlowEngine<StaticCatalogSource>, String>> = Lazy::new(|| {
    FlowEngine::new(StaticCatalogSource).map_err(|err| {
        log::error!("embedded catalog rejected: {err}");
        err.to_string()
    })
});

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("catalog unavailable: {0}")]
    Engine(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Shared engine, or the reason it failed to load.
///
/// # Errors
///
/// Returns the load error when the embedded catalog or configuration is invalid.
pub fn engine() -> Result<&'static FlowEngine<StaticCatalogSource>, SessionError> {
    ENGINE
        .as_ref()
        .map_err(|err| SessionError::Engine(err.clone()))
}

/// Start a fresh session for `variant`, falling back to the default variant.
///
/// # Errors
///
/// Returns an error if the engine failed to load or the variant is unknown.
pub fn start_session(variant: Option<&str>) -> Result<FlowMachine, SessionError> {
    Ok(engine()?.start_session(variant)?)
}

/// Start the session a page load asked for. An unknown variant falls back
/// to the default one instead of leaving the page blank.
///
/// # Errors
///
/// Returns an error only when the embedded data itself is unusable.
pub fn initial_session(requested: Option<&str>) -> Result<FlowMachine, SessionError> {
    match start_session(requested) {
        Err(SessionError::Config(err)) if requested.is_some() => {
            log::warn!("{err}; starting the default variant");
            start_session(None)
        }
        other => other,
    }
}

/// Decode a form-encoded query component: `+` is a space and `%XX` a byte.
/// Returns `None` for malformed escapes or bytes that are not UTF-8.
fn decode_query_component(raw: &str) -> Option<String> {
    let mut bytes = Vec::with_capacity(raw.len());
    let mut rest = raw.bytes();
    while let Some(byte) = rest.next() {
        match byte {
            b'+' => bytes.push(b' '),
            b'%' => {
                let hi = char::from(rest.next()?).to_digit(16)?;
                let lo = char::from(rest.next()?).to_digit(16)?;
                bytes.push(u8::try_from(hi * 16 + lo).ok()?);
            }
            other => bytes.push(other),
        }
    }
    String::from_utf8(bytes).ok()
}

/// Extract the `variant` parameter from a location query string.
#[must_use]
pub fn variant_from_query(search: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| decode_query_component(key).as_deref() == Some("variant"))
        .and_then(|(_, value)| decode_query_component(value))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Variant requested by the current page URL (`?variant=reveal`).
#[must_use]
pub fn requested_variant() -> Option<String> {
    crate::dom::location_search().and_then(|search| variant_from_query(&search))
}
