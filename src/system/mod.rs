// System layer: 목록 데이터 소스와 비동기 요청 워커
pub mod filesystem;
pub mod source;
pub mod worker;

pub use filesystem::FsListingSource;
pub use source::ListingSource;
pub use worker::{ListingLoaded, ListingWorker};
