//! feedbrowser: 피드 출력 파일 브라우저 코어
//!
//! 플러그인 인스턴스 출력 목록 위에서 브레드크럼 탐색, 파일 분류,
//! 뷰어 지원 여부, 선택 상태를 다룬다. 렌더링은 호출자 몫이다.

pub mod app;
pub mod config;
pub mod core;
pub mod models;
pub mod system;
pub mod utils;

pub use app::{ApplyOutcome, BrowserStatus, FileBrowser, ListingRequest, RowClick, ViewerIntent};
pub use config::BrowserConfig;
pub use crate::core::formats::{classify, select_viewer_affordances, FileFormats, ViewerKind};
pub use crate::core::navigator::{derive_trail, Anchor, PathNavigator};
pub use models::{list_items, FileDescriptor, ListItem, Listing, SelectionStore};
pub use utils::error::{FeedBrowserError, Result};
