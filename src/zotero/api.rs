use crate::zotero::{base_url, Database, Item};
use serde::de::DeserializeOwned;
use std::io;

/// Check whether the connector endpoint is reachable.
///
/// Transport errors mean the application is not running, which callers
/// treat as "not available" rather than a hard failure.
pub async fn ping(client: &reqwest::Client, database: Database) -> bool {
    let url = format!("{}/connector/ping", base_url(database));

    match client.get(&url).send().await {
        Ok(response) => response.status().is_success(),
        Err(_) => false,
    }
}

/// Fetch the top-level items in the user library.
pub async fn fetch_top_items(
    client: &reqwest::Client,
    database: Database,
) -> io::Result<Vec<Item>> {
    let url = format!("{}/api/users/0/items/top", base_url(database));
    get_json(client, &url).await
}

/// Fetch the child items (attachments, notes, annotations) of an item.
pub async fn fetch_children(
    client: &reqwest::Client,
    database: Database,
    key: &str,
) -> io::Result<Vec<Item>> {
    let url = format!("{}/api/users/0/items/{}/children", base_url(database), key);
    get_json(client, &url).await
}

async fn get_json<T: DeserializeOwned>(client: &reqwest::Client, url: &str) -> io::Result<T> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Request error: {}", e)))?;

    if !response.status().is_success() {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!("HTTP {} for URL: {}", response.status(), url),
        ));
    }

    let response_text = response.text().await.map_err(|e| {
        io::Error::new(
            io::ErrorKind::Other,
            format!("Failed to get response text: {}", e),
        )
    })?;

    serde_json::from_str(&response_text).map_err(|e| {
        io::Error::new(io::ErrorKind::Other, format!("Failed to parse JSON: {}", e))
    })
}
