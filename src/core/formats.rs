//! 파일 형식 테이블: 확장자 → 아이콘 분류, 뷰어 지원 여부
//!
//! 모든 매핑은 데이터다. 새 형식은 아래 테이블이나 설정 파일에 한 줄을
//! 추가하는 것으로 끝나야 한다.

use crate::models::{FileDescriptor, ListItem};
use crate::utils::formatter::format_file_size;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::LazyLock;

/// 확장자가 없는 파일의 종류 표시
pub const UNKNOWN_FORMAT: &str = "UNKNOWN FORMAT";

/// 디렉토리 종류 표시
pub const DIRECTORY_KIND: &str = "dir";

/// 사용할 수 있는 뷰어가 없을 때 보여 줄 안내
pub const NO_VIEWER_MESSAGE: &str = "No viewer available for this file";

/// 아이콘 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconClass {
    Folder,
    Image,
    Code,
    Text,
    File,
}

impl IconClass {
    /// 텍스트 출력용 기호
    pub fn glyph(self) -> &'static str {
        match self {
            IconClass::Folder => "[D]",
            IconClass::Image => "[I]",
            IconClass::Code => "[C]",
            IconClass::Text => "[T]",
            IconClass::File => "[F]",
        }
    }
}

/// 대체(3D/볼륨) 뷰어 표시 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewerMode {
    Volume,
    Mesh,
    Fibers,
}

impl fmt::Display for ViewerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewerMode::Volume => "volume",
            ViewerMode::Mesh => "mesh",
            ViewerMode::Fibers => "fibers",
        };
        f.write_str(name)
    }
}

/// 항목 종류
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FileKind {
    Directory,
    /// 대문자 확장자 (예: `DCM`)
    Extension(String),
    Unknown,
}

impl FileKind {
    /// 파일 이름(마지막 세그먼트)의 마지막 `.` 뒤를 대문자로
    pub fn from_file_name(name: &str) -> Self {
        match name.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => FileKind::Extension(ext.to_uppercase()),
            _ => FileKind::Unknown,
        }
    }

    /// 테이블 조회용 소문자 키. 확장자가 없으면 `None`.
    pub fn lookup_key(&self) -> Option<String> {
        match self {
            FileKind::Directory => Some(DIRECTORY_KIND.to_string()),
            FileKind::Extension(ext) => Some(ext.to_lowercase()),
            FileKind::Unknown => None,
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Directory => f.write_str(DIRECTORY_KIND),
            FileKind::Extension(ext) => f.write_str(ext),
            FileKind::Unknown => f.write_str(UNKNOWN_FORMAT),
        }
    }
}

/// 분류 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub kind: FileKind,
    pub icon: IconClass,
}

/// 파일 테이블 한 행 (이름, 크기, 아이콘)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub icon: IconClass,
    pub kind: FileKind,
    pub name: String,
    /// 사람이 읽는 크기. 폴더는 `None`.
    pub size: Option<String>,
}

/// 뷰어 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewerKind {
    Image,
    Alternate,
}

impl fmt::Display for ViewerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerKind::Image => f.write_str("Image viewer"),
            ViewerKind::Alternate => f.write_str("Alternate viewer"),
        }
    }
}

/// 선택 파일에 대해 열 수 있는 뷰어들
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewerAffordances {
    pub image: bool,
    pub alternate: Option<ViewerMode>,
}

impl ViewerAffordances {
    pub fn is_empty(&self) -> bool {
        !self.image && self.alternate.is_none()
    }

    pub fn supports(&self, viewer: ViewerKind) -> bool {
        match viewer {
            ViewerKind::Image => self.image,
            ViewerKind::Alternate => self.alternate.is_some(),
        }
    }

    /// 사용 가능한 뷰어 목록 (이미지 뷰어 먼저)
    pub fn viewers(&self) -> Vec<ViewerKind> {
        let mut viewers = Vec::new();
        if self.image {
            viewers.push(ViewerKind::Image);
        }
        if self.alternate.is_some() {
            viewers.push(ViewerKind::Alternate);
        }
        viewers
    }

    /// 뷰어가 하나도 없을 때의 안내 문구
    pub fn message(&self) -> Option<&'static str> {
        self.is_empty().then_some(NO_VIEWER_MESSAGE)
    }
}

const ICON_TABLE: &[(&str, IconClass)] = &[
    (DIRECTORY_KIND, IconClass::Folder),
    ("dcm", IconClass::Image),
    ("jpg", IconClass::Image),
    ("png", IconClass::Image),
    ("html", IconClass::Code),
    ("json", IconClass::Code),
    ("txt", IconClass::Text),
];

const IMAGE_EXTENSIONS: &[&str] = &["dcm", "png", "jpg", "nii", "gz", "jpeg"];

const VIEWER_MODE_TABLE: &[(&str, ViewerMode)] = &[
    ("nii", ViewerMode::Volume),
    ("gz", ViewerMode::Volume),
    ("mgz", ViewerMode::Volume),
    ("mgh", ViewerMode::Volume),
    ("nrrd", ViewerMode::Volume),
    ("vtk", ViewerMode::Mesh),
    ("stl", ViewerMode::Mesh),
    ("obj", ViewerMode::Mesh),
    ("fsm", ViewerMode::Mesh),
    ("pial", ViewerMode::Mesh),
    ("white", ViewerMode::Mesh),
    ("inflated", ViewerMode::Mesh),
    ("smoothwm", ViewerMode::Mesh),
    ("sphere", ViewerMode::Mesh),
    ("orig", ViewerMode::Mesh),
    ("trk", ViewerMode::Fibers),
];

static BUILTIN: LazyLock<FileFormats> = LazyLock::new(FileFormats::new);

/// 형식 테이블 묶음
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFormats {
    icons: HashMap<String, IconClass>,
    image_extensions: BTreeSet<String>,
    viewer_modes: HashMap<String, ViewerMode>,
}

impl FileFormats {
    /// 내장 테이블로 생성
    pub fn new() -> Self {
        Self {
            icons: ICON_TABLE
                .iter()
                .map(|(ext, icon)| (ext.to_string(), *icon))
                .collect(),
            image_extensions: IMAGE_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            viewer_modes: VIEWER_MODE_TABLE
                .iter()
                .map(|(ext, mode)| (ext.to_string(), *mode))
                .collect(),
        }
    }

    /// 공유 내장 테이블
    pub fn builtin() -> &'static FileFormats {
        &BUILTIN
    }

    /// 아이콘 매핑 추가/덮어쓰기
    pub fn set_icon(&mut self, extension: &str, icon: IconClass) {
        self.icons.insert(extension.to_lowercase(), icon);
    }

    /// 이미지 뷰어 확장자 집합 교체
    pub fn set_image_extensions<I, S>(&mut self, extensions: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.image_extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().to_lowercase())
            .collect();
    }

    /// 대체 뷰어 모드 매핑 추가/덮어쓰기
    pub fn set_viewer_mode(&mut self, extension: &str, mode: ViewerMode) {
        self.viewer_modes.insert(extension.to_lowercase(), mode);
    }

    /// 종류 → 아이콘. 테이블에 없으면 일반 파일 아이콘.
    pub fn icon_for(&self, kind: &FileKind) -> IconClass {
        kind.lookup_key()
            .and_then(|key| self.icons.get(&key).copied())
            .unwrap_or(IconClass::File)
    }

    pub fn classify(&self, item: &ListItem<'_>) -> Classification {
        let kind = match item {
            ListItem::Folder(_) => FileKind::Directory,
            ListItem::File(file) => FileKind::from_file_name(file.file_name()),
        };
        let icon = self.icon_for(&kind);
        Classification { kind, icon }
    }

    /// 확장자 → 대체 뷰어 모드
    pub fn viewer_mode(&self, extension: &str) -> Option<ViewerMode> {
        self.viewer_modes.get(&extension.to_lowercase()).copied()
    }

    pub fn is_image_extension(&self, extension: &str) -> bool {
        self.image_extensions.contains(&extension.to_lowercase())
    }

    /// 선택 파일에 대해 제공할 뷰어 결정
    ///
    /// 이미지 뷰어와 대체 뷰어 조건은 서로 독립이다.
    pub fn viewer_affordances(&self, file: &FileDescriptor) -> ViewerAffordances {
        match FileKind::from_file_name(file.file_name()) {
            FileKind::Extension(ext) => ViewerAffordances {
                image: self.is_image_extension(&ext),
                alternate: self.viewer_mode(&ext),
            },
            FileKind::Directory | FileKind::Unknown => ViewerAffordances::default(),
        }
    }

    /// 테이블 행 생성
    pub fn table_row(&self, item: &ListItem<'_>) -> TableRow {
        let Classification { kind, icon } = self.classify(item);
        let size = match item {
            ListItem::File(file) => Some(format_file_size(file.fsize)),
            ListItem::Folder(_) => None,
        };
        TableRow {
            icon,
            kind,
            name: item.display_name().to_string(),
            size,
        }
    }
}

impl Default for FileFormats {
    fn default() -> Self {
        Self::new()
    }
}

/// 내장 테이블로 항목 분류
pub fn classify(item: &ListItem<'_>) -> Classification {
    FileFormats::builtin().classify(item)
}

/// 내장 테이블로 뷰어 지원 여부 결정
pub fn select_viewer_affordances(file: &FileDescriptor) -> ViewerAffordances {
    FileFormats::builtin().viewer_affordances(file)
}
