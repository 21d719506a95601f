use crate::models::Listing;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 경로별 목록을 제공하는 데이터 소스
///
/// 실패 시 재시도하지 않는다. 재시도 여부는 사용자가 다시 클릭해서 정한다.
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch_listing(&self, path: &str) -> Result<Listing>;
}
