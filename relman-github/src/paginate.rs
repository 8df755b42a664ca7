//! Draining of page-numbered list endpoints

use std::future::Future;

use tracing::debug;

use crate::api::PageChunk;
use crate::Result;

/// Fetch every page of a listing and concatenate the items in service order
///
/// `fetch_page` is called with page numbers starting at 1. The loop stops once
/// the page just fetched is the last page the service reported; a reported last
/// page of 0 (unknown) or 1 means there is nothing further to fetch. The first
/// failing page aborts the drain and no items are returned.
pub async fn drain<T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<PageChunk<T>>>,
{
    let mut items = Vec::new();
    let mut page = 1u32;

    loop {
        let chunk = fetch_page(page).await?;
        debug!(page, last_page = chunk.last_page, count = chunk.items.len(), "Fetched page");

        items.extend(chunk.items);

        if page >= chunk.last_page {
            break;
        }
        page += 1;
    }

    Ok(items)
}
