use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::debug;

use reelsync_transport::{ApiRequest, Transport};
use reelsync_types::{Page, VideoMetadata, VideoProperties};

use crate::CatalogError;

/// Initial listing target: newest first, the largest page size the API
/// grants.
const LIST_PATH: &str = "/me/videos?direction=desc&per_page=100&sort=date";

/// Catalog operations for the authenticated account's videos.
pub struct VideoCatalog<'a> {
    transport: &'a dyn Transport,
}

impl<'a> VideoCatalog<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Lists all videos, newest first, walking every page.
    ///
    /// Follows the server's `paging.next` links until a page has none,
    /// concatenating items in server order. No deduplication: if the remote
    /// collection changes between page fetches, duplicates or gaps are
    /// possible.
    pub async fn list(&self, query: Option<&str>) -> Result<Vec<VideoMetadata>, CatalogError> {
        let mut target = LIST_PATH.to_string();
        if let Some(query) = query {
            let encoded = utf8_percent_encode(query, NON_ALPHANUMERIC);
            target.push_str(&format!("&query={encoded}"));
        }

        let mut videos = Vec::new();
        let mut next = Some(target);
        while let Some(target) = next {
            let page = self.fetch_page(&target).await?;
            debug!(
                page = page.page,
                items = page.data.len(),
                total = page.total,
                "fetched listing page"
            );
            videos.extend(page.data);
            next = page.paging.next;
        }
        Ok(videos)
    }

    async fn fetch_page(&self, target: &str) -> Result<Page<VideoMetadata>, CatalogError> {
        let exchange = self.transport.exchange(ApiRequest::get(target)).await?;
        if !exchange.status.is_success() {
            return Err(CatalogError::Status(exchange.status));
        }
        Ok(serde_json::from_str(&exchange.body)?)
    }

    /// Fetches a single video by identifier.
    pub async fn get(&self, video_id: &str) -> Result<VideoMetadata, CatalogError> {
        let request = ApiRequest::get(format!("/me/videos/{video_id}"));
        let exchange = self.transport.exchange(request).await?;
        if !exchange.status.is_success() {
            return Err(CatalogError::Status(exchange.status));
        }
        Ok(serde_json::from_str(&exchange.body)?)
    }

    /// Patches settable properties onto an existing video.
    pub async fn edit(
        &self,
        video_id: &str,
        properties: &VideoProperties,
    ) -> Result<(), CatalogError> {
        let payload = serde_json::to_value(properties)?;
        let request = ApiRequest::patch(format!("/me/videos/{video_id}")).json(payload);
        let exchange = self.transport.exchange(request).await?;
        if !exchange.status.is_success() {
            return Err(CatalogError::Status(exchange.status));
        }
        Ok(())
    }

    /// Deletes a video permanently.
    pub async fn delete(&self, video_id: &str) -> Result<(), CatalogError> {
        let request = ApiRequest::delete(format!("/me/videos/{video_id}"));
        let exchange = self.transport.exchange(request).await?;
        if !exchange.status.is_success() {
            return Err(CatalogError::Status(exchange.status));
        }
        Ok(())
    }
}
