use crate::models::listing::FileDescriptor;

/// 선택된 파일 저장소
///
/// 브라우징 세션이 소유하며 필요한 컴포넌트에 참조로 넘긴다.
/// 선택 파일이 현재 목록에 속하는지는 검사하지 않는다. 경로 이동 시 `clear()`
/// 호출은 호출자 책임이다.
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    selected: Option<FileDescriptor>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 현재 선택된 파일
    pub fn get(&self) -> Option<&FileDescriptor> {
        self.selected.as_ref()
    }

    /// 파일 선택 (마지막 선택이 이긴다)
    pub fn select(&mut self, file: FileDescriptor) {
        self.selected = Some(file);
    }

    /// 선택 해제
    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_none()
    }
}
