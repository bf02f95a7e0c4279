use sinbound_core::{catalog_url, Catalog};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

async fn fetch_text(url: &str) -> anyhow::Result<String> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<web::Response>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    if !response.ok() {
        anyhow::bail!("{} returned HTTP {}", url, response.status());
    }
    let text = JsFuture::from(response.text().map_err(|e| anyhow::anyhow!("{:?}", e))?)
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    text.as_string().ok_or_else(|| anyhow::anyhow!("response body is not text"))
}

async fn try_fetch_catalog() -> anyhow::Result<Catalog> {
    let text = fetch_text(&catalog_url()).await?;
    Ok(Catalog::from_json(&text)?)
}

/// The track catalog, or an empty one when it cannot be fetched or parsed.
pub async fn fetch_catalog() -> Catalog {
    match try_fetch_catalog().await {
        Ok(catalog) => {
            log::info!("[catalog] {} tracks", catalog.len());
            catalog
        }
        Err(e) => {
            log::warn!("[catalog] unavailable, showing no tracks: {:?}", e);
            Catalog::default()
        }
    }
}
