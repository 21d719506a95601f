use crate::models::{FileDescriptor, Listing};
use crate::system::source::ListingSource;
use crate::utils::error::{FeedBrowserError, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;

/// 로컬 디렉토리를 목록으로 제공하는 데이터 소스
///
/// 목록 경로 문자열을 그대로 로컬 경로로 사용한다.
#[derive(Debug, Clone, Default)]
pub struct FsListingSource;

impl FsListingSource {
    pub fn new() -> Self {
        Self
    }

    fn map_io_error(path: &str, err: std::io::Error) -> FeedBrowserError {
        match err.kind() {
            ErrorKind::NotFound => FeedBrowserError::PathNotFound {
                path: path.to_string(),
            },
            ErrorKind::PermissionDenied => FeedBrowserError::PermissionDenied {
                path: path.to_string(),
            },
            _ => FeedBrowserError::Io(err),
        }
    }
}

#[async_trait]
impl ListingSource for FsListingSource {
    async fn fetch_listing(&self, path: &str) -> Result<Listing> {
        // 1. 경로 확인
        let metadata = fs::metadata(path)
            .await
            .map_err(|e| Self::map_io_error(path, e))?;
        if !metadata.is_dir() {
            return Err(FeedBrowserError::NotADirectory {
                path: path.to_string(),
            });
        }

        // 2. 디렉토리 읽기
        let mut read_dir = fs::read_dir(path)
            .await
            .map_err(|e| Self::map_io_error(path, e))?;

        let mut files = Vec::new();
        let mut folders = Vec::new();

        while let Some(entry) = read_dir.next_entry().await? {
            let entry_path = entry.path();
            // 깨진 링크 등 메타데이터를 못 읽는 항목은 스킵
            let Ok(entry_metadata) = fs::metadata(&entry_path).await else {
                tracing::debug!(path = %entry_path.display(), "skipping unreadable entry");
                continue;
            };
            let name = entry.file_name().to_string_lossy().to_string();

            if entry_metadata.is_dir() {
                folders.push(name);
            } else {
                let fname = Path::new(path).join(&name).to_string_lossy().to_string();
                files.push(FileDescriptor::new(fname, entry_metadata.len()));
            }
        }

        // 3. 이름순 정렬 (read_dir 순서는 플랫폼마다 다름)
        files.sort_by(|a, b| a.fname.cmp(&b.fname));
        folders.sort();

        Ok(Listing::new(path, files, folders))
    }
}
