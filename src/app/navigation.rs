use super::*;
use crate::core::formats::ViewerKind;
use crate::core::navigator::PathNavigator;
use crate::system::ListingLoaded;
use crate::utils::error::{FeedBrowserError, Result};

impl FileBrowser {
    // === 경로 이동 ===

    /// 절대 경로로 이동 요청
    ///
    /// 선택을 먼저 해제하고 최신 요청 경로를 기록한다. 이전에 보낸 요청의
    /// 응답은 이후 `apply_listing`에서 버려진다.
    pub fn navigate(&mut self, path: impl Into<String>) -> ListingRequest {
        let path = path.into();
        self.selection.clear();
        if let Some(previous) = self.pending.replace(path.clone()) {
            tracing::debug!(%previous, %path, "superseding pending listing request");
        }
        self.status = BrowserStatus::Loading { path: path.clone() };
        tracing::info!(%path, "navigating");
        ListingRequest { path }
    }

    /// 앵커 루트(`<prefix>/<anchor>`)로 이동 요청
    ///
    /// 현재 목록 경로에서 앵커를 찾지 못했으면 이동할 곳을 알 수 없으므로 `None`.
    pub fn navigate_root(&mut self) -> Option<ListingRequest> {
        let root = self.navigator.root_path()?;
        Some(self.navigate(root))
    }

    /// 브레드크럼 클릭
    ///
    /// 어느 칸을 누르든 선택은 해제된다. 현재 위치(마지막 칸)나 trail에 없는
    /// 칸이면 요청 없이 `None`.
    pub fn click_breadcrumb(&mut self, index: usize) -> Option<ListingRequest> {
        self.selection.clear();
        let label = self.navigator.trail().get(index)?.clone();
        let path = self.navigator.resolve_click(index, &label)?;
        Some(self.navigate(path))
    }

    /// 테이블 행 클릭
    ///
    /// 폴더는 하위 경로로 이동 요청, 파일은 선택. 어느 쪽이든 기존 선택은
    /// 먼저 해제한다.
    pub fn click_row(&mut self, index: usize) -> Result<RowClick> {
        self.selection.clear();

        let item = {
            let items = self.items();
            let len = items.len();
            match items.get(index) {
                Some(ListItem::Folder(name)) => RowTarget::Folder(self.listing.child_path(name)),
                Some(ListItem::File(file)) => RowTarget::File((*file).clone()),
                None => return Err(FeedBrowserError::RowOutOfRange { index, len }),
            }
        };

        Ok(match item {
            RowTarget::Folder(path) => RowClick::Navigate(self.navigate(path)),
            RowTarget::File(file) => {
                tracing::debug!(fname = %file.fname, "file selected");
                self.selection.select(file.clone());
                RowClick::Selected(file)
            }
        })
    }

    /// 미리보기 닫기
    pub fn dismiss_selection(&mut self) {
        self.selection.clear();
    }

    // === 목록 반영 ===

    /// 도착한 목록 반영
    ///
    /// 응답 경로가 최신 요청 경로와 다르면 버린다(도착 순서와 무관).
    /// 실패 응답은 이전 목록을 건드리지 않고 실패 상태만 남긴다.
    pub fn apply_listing(&mut self, loaded: ListingLoaded) -> ApplyOutcome {
        let ListingLoaded { path, result } = loaded;

        if self.pending.as_deref() != Some(path.as_str()) {
            tracing::debug!(
                %path,
                pending = ?self.pending,
                "discarding stale listing response"
            );
            return ApplyOutcome::Stale;
        }
        self.pending = None;

        match result {
            Ok(listing) => {
                // 로딩 중에 이전 목록에서 고른 파일이 남지 않도록
                self.selection.clear();
                self.navigator = PathNavigator::from_path(&listing.path, &self.anchor);
                tracing::info!(
                    path = %listing.path,
                    files = listing.files.len(),
                    folders = listing.folders.len(),
                    "listing applied"
                );
                self.listing = listing;
                self.status = BrowserStatus::Idle;
                ApplyOutcome::Applied
            }
            Err(err) => {
                tracing::warn!(%path, error = %err, "listing fetch failed");
                self.status = BrowserStatus::Failed {
                    path,
                    message: err.to_string(),
                };
                ApplyOutcome::Failed
            }
        }
    }

    // === 뷰어 ===

    /// 선택 파일로 외부 뷰어 실행 요청 생성
    pub fn open_viewer(&self, viewer: ViewerKind) -> Result<ViewerIntent> {
        let file = self.selection.get().ok_or(FeedBrowserError::NoSelection)?;
        let affordances = self.formats.viewer_affordances(file);

        let intent = match (viewer, affordances.alternate) {
            (ViewerKind::Image, _) if affordances.image => {
                ViewerIntent::OpenImageViewer(file.clone())
            }
            (ViewerKind::Alternate, Some(mode)) => ViewerIntent::OpenAlternateViewer {
                file: file.clone(),
                mode,
            },
            _ => {
                return Err(FeedBrowserError::ViewerUnavailable {
                    viewer: viewer.to_string(),
                    fname: file.fname.clone(),
                })
            }
        };
        tracing::info!(fname = %file.fname, %viewer, "opening viewer");
        Ok(intent)
    }
}

/// 행 클릭 대상 (목록 빌림을 끝낸 뒤 상태를 바꾸기 위한 중간값)
enum RowTarget {
    Folder(String),
    File(FileDescriptor),
}
