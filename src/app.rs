use crate::core::formats::{FileFormats, TableRow, ViewerAffordances, ViewerMode};
use crate::core::navigator::{Anchor, BreadcrumbSegment, PathNavigator};
use crate::models::{list_items, FileDescriptor, ListItem, Listing, SelectionStore};
use crate::utils::formatter::item_count_label;

mod navigation;


/// 목록 요청 (데이터 소스에 넘길 절대 경로)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    pub path: String,
}

/// 브라우저 상태
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BrowserStatus {
    #[default]
    Idle,
    /// 목록 요청 중
    Loading { path: String },
    /// 마지막 요청 실패. 이전 목록은 그대로 남아 있다.
    Failed { path: String, message: String },
}

/// 도착한 목록을 반영한 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    Failed,
    /// 최신 요청과 경로가 달라 버림
    Stale,
}

/// 행 클릭 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowClick {
    /// 폴더: 하위 경로 목록 요청
    Navigate(ListingRequest),
    /// 파일: 선택됨
    Selected(FileDescriptor),
}

/// 외부 뷰어 실행 요청
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerIntent {
    OpenImageViewer(FileDescriptor),
    OpenAlternateViewer {
        file: FileDescriptor,
        mode: ViewerMode,
    },
}

/// 플러그인 인스턴스 출력 파일 브라우저 (세션 상태)
///
/// 경로 이동은 항상 (1) 선택 해제 (2) 목록 요청 (3) 도착한 목록 반영 순서를
/// 따른다. 반영은 응답 경로가 최신 요청 경로와 같을 때만 한다.
#[derive(Debug, Clone)]
pub struct FileBrowser {
    anchor: Anchor,
    formats: FileFormats,
    listing: Listing,
    navigator: PathNavigator,
    selection: SelectionStore,
    pending: Option<String>,
    status: BrowserStatus,
}

impl FileBrowser {
    /// 내장 형식 테이블로 생성
    pub fn new(anchor: Anchor) -> Self {
        Self::with_formats(anchor, FileFormats::new())
    }

    pub fn with_formats(anchor: Anchor, formats: FileFormats) -> Self {
        Self::with_selection(anchor, formats, SelectionStore::new())
    }

    /// 외부에서 만든 선택 저장소 주입
    pub fn with_selection(anchor: Anchor, formats: FileFormats, selection: SelectionStore) -> Self {
        Self {
            navigator: PathNavigator::from_path("", &anchor),
            anchor,
            formats,
            listing: Listing::default(),
            selection,
            pending: None,
            status: BrowserStatus::Idle,
        }
    }

    pub fn anchor(&self) -> &Anchor {
        &self.anchor
    }

    pub fn formats(&self) -> &FileFormats {
        &self.formats
    }

    /// 마지막으로 반영된 목록
    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn status(&self) -> &BrowserStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// 응답을 기다리는 최신 요청 경로
    pub fn pending_path(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn selected_file(&self) -> Option<&FileDescriptor> {
        self.selection.get()
    }

    pub fn navigator(&self) -> &PathNavigator {
        &self.navigator
    }

    pub fn breadcrumbs(&self) -> Vec<BreadcrumbSegment> {
        self.navigator.breadcrumbs()
    }

    /// 행 순서대로 나열한 항목
    pub fn items(&self) -> Vec<ListItem<'_>> {
        list_items(&self.listing)
    }

    pub fn rows(&self) -> Vec<TableRow> {
        self.items()
            .iter()
            .map(|item| self.formats.table_row(item))
            .collect()
    }

    /// `(N items)` 헤더 문구
    pub fn item_count_label(&self) -> String {
        item_count_label(self.listing.len())
    }

    /// 선택된 파일의 뷰어 지원 여부. 선택이 없으면 `None`.
    pub fn viewer_affordances(&self) -> Option<ViewerAffordances> {
        self.selection
            .get()
            .map(|file| self.formats.viewer_affordances(file))
    }
}
