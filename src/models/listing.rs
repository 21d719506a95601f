use serde::{Deserialize, Serialize};

/// 피드 출력 파일 하나
///
/// `fname`은 슬래시로 구분된 전체 경로다. 데이터 소스가 넘겨준 그대로 보관한다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// 전체 경로 (예: `chris/feed_1/pl-dircopy_7/data/scan.dcm`)
    pub fname: String,
    /// 바이트 단위 크기
    pub fsize: u64,
}

impl FileDescriptor {
    pub fn new(fname: impl Into<String>, fsize: u64) -> Self {
        Self {
            fname: fname.into(),
            fsize,
        }
    }

    /// 경로의 마지막 세그먼트 (표시용 파일 이름)
    pub fn file_name(&self) -> &str {
        self.fname.rsplit('/').next().unwrap_or(&self.fname)
    }
}

/// 한 경로의 직계 하위 파일/폴더 목록
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// 앵커 세그먼트(`<plugin_name>_<id>`)를 포함하는 절대 경로
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub files: Vec<FileDescriptor>,
    #[serde(default)]
    pub folders: Vec<String>,
}

impl Listing {
    pub fn new(path: impl Into<String>, files: Vec<FileDescriptor>, folders: Vec<String>) -> Self {
        Self {
            path: path.into(),
            files,
            folders,
        }
    }

    /// API 응답 JSON에서 목록 파싱
    pub fn from_json(data: &str) -> crate::utils::error::Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// 하위 폴더의 절대 경로
    pub fn child_path(&self, folder: &str) -> String {
        format!("{}/{}", self.path.trim_end_matches('/'), folder)
    }

    /// 전체 항목 수 (파일 + 폴더)
    pub fn len(&self) -> usize {
        self.files.len() + self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.folders.is_empty()
    }
}

/// 테이블 한 행에 대응하는 항목
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListItem<'a> {
    File(&'a FileDescriptor),
    Folder(&'a str),
}

impl<'a> ListItem<'a> {
    /// 표시용 이름
    pub fn display_name(&self) -> &'a str {
        match self {
            ListItem::File(file) => file.file_name(),
            ListItem::Folder(name) => name,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, ListItem::Folder(_))
    }
}

/// 목록을 행 순서로 펼친다.
///
/// 파일을 먼저, 그 다음 폴더를 각각 데이터 소스가 준 순서대로 나열한다.
/// 반환된 벡터의 인덱스가 곧 행 번호다.
pub fn list_items(listing: &Listing) -> Vec<ListItem<'_>> {
    listing
        .files
        .iter()
        .map(ListItem::File)
        .chain(listing.folders.iter().map(|name| ListItem::Folder(name.as_str())))
        .collect()
}
