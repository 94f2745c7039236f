use crate::error::CatalogError;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

/// GET `url` and decode the JSON body.
///
/// Non-2xx statuses become [`CatalogError::Status`] with the response text;
/// the body is decoded separately from the transport so a schema mismatch is
/// reported as [`CatalogError::Decode`].
pub async fn get_json<T: DeserializeOwned>(
    client: &Client,
    catalog: &'static str,
    url: &str,
) -> Result<T, CatalogError> {
    debug!("{} GET {}", catalog, redact_api_key(url));

    let response = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|source| CatalogError::Transport { catalog, source })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| CatalogError::Transport { catalog, source })?;

    if !status.is_success() {
        return Err(CatalogError::Status {
            catalog,
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|source| CatalogError::Decode { catalog, source })
}

/// Mask the value of any `api_key`/`apikey` query parameter for logging
pub fn redact_api_key(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };

    let params: Vec<String> = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((name, _)) if name.eq_ignore_ascii_case("api_key") || name.eq_ignore_ascii_case("apikey") => {
                format!("{}=***", name)
            }
            _ => pair.to_string(),
        })
        .collect();

    format!("{}?{}", base, params.join("&"))
}
