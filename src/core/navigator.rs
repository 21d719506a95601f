//! 앵커 기반 경로 탐색: 브레드크럼 생성과 클릭 경로 복원
//!
//! 목록 경로에는 선택된 플러그인 인스턴스를 가리키는 앵커 세그먼트
//! (`<plugin_name>_<id>`)가 들어 있다. 앵커 뒤쪽 세그먼트만 브레드크럼으로
//! 보여 주고, 브레드크럼을 누르면 앵커 앞부분(prefix)과 다시 이어 붙여
//! 절대 경로를 만든다.

use crate::models::PluginInstance;
use std::fmt;

/// 탐색 루트를 표시하는 앵커 세그먼트
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Anchor {
    pub plugin_name: String,
    pub id: u64,
}

impl Anchor {
    pub fn new(plugin_name: impl Into<String>, id: u64) -> Self {
        Self {
            plugin_name: plugin_name.into(),
            id,
        }
    }

    /// 선택된 플러그인 인스턴스의 앵커
    pub fn for_instance(instance: &PluginInstance) -> Self {
        Self::new(instance.plugin_name.clone(), instance.id)
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.plugin_name, self.id)
    }
}

/// `path`를 `/<anchor>/` 첫 등장 위치에서 나눠 (prefix, 나머지) 반환
///
/// 경로가 앵커에서 끝나면(`.../<anchor>`) 나머지는 빈 문자열이다.
fn split_at_anchor<'a>(path: &'a str, anchor: &str) -> Option<(&'a str, &'a str)> {
    if path.is_empty() || anchor.is_empty() {
        return None;
    }
    let delimiter = format!("/{}/", anchor);
    if let Some(start) = path.find(&delimiter) {
        return Some((&path[..start], &path[start + delimiter.len()..]));
    }
    let prefix = path.strip_suffix(&delimiter[..delimiter.len() - 1])?;
    Some((prefix, ""))
}

fn split_segments(rest: &str) -> Vec<String> {
    let trimmed = rest.trim_end_matches('/');
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split('/').map(str::to_string).collect()
}

/// 앵커 뒤 경로 세그먼트(trail) 추출
///
/// 앵커가 없거나 경로가 비어 있으면 빈 벡터를 반환한다. 아직 탐색할 목록이
/// 없다는 뜻이지 에러가 아니다. 끝의 슬래시로 생기는 빈 세그먼트는 버린다.
///
/// # Examples
/// ```
/// use feedbrowser::core::navigator::derive_trail;
///
/// assert_eq!(derive_trail("/home/user_5/a/b", "user_5"), vec!["a", "b"]);
/// assert!(derive_trail("/home/other/a", "user_5").is_empty());
/// ```
pub fn derive_trail(path: &str, anchor: &str) -> Vec<String> {
    split_at_anchor(path, anchor)
        .map(|(_, rest)| split_segments(rest))
        .unwrap_or_default()
}

/// 브레드크럼 한 칸
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreadcrumbSegment {
    pub label: String,
    pub index: usize,
    /// 현재 위치(마지막 칸) 여부. 누를 수 없다.
    pub is_terminal: bool,
}

/// 현재 목록 경로에서 만든 탐색 상태
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathNavigator {
    prefix: String,
    anchor: String,
    trail: Vec<String>,
    located: bool,
}

impl PathNavigator {
    /// 목록 경로로부터 생성. 앵커가 없으면 빈 탐색 상태가 된다.
    pub fn from_path(path: &str, anchor: &Anchor) -> Self {
        let anchor = anchor.to_string();
        match split_at_anchor(path, &anchor) {
            Some((prefix, rest)) => Self {
                prefix: prefix.to_string(),
                trail: split_segments(rest),
                anchor,
                located: true,
            },
            None => Self {
                anchor,
                ..Self::default()
            },
        }
    }

    pub fn trail(&self) -> &[String] {
        &self.trail
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn is_empty(&self) -> bool {
        self.trail.is_empty()
    }

    /// 앵커 루트의 절대 경로. 경로에서 앵커를 찾지 못했으면 `None`.
    pub fn root_path(&self) -> Option<String> {
        self.located.then(|| self.join(&[]))
    }

    /// 렌더링용 브레드크럼 목록
    pub fn breadcrumbs(&self) -> Vec<BreadcrumbSegment> {
        let last = self.trail.len().saturating_sub(1);
        self.trail
            .iter()
            .enumerate()
            .map(|(index, label)| BreadcrumbSegment {
                label: label.clone(),
                index,
                is_terminal: index == last,
            })
            .collect()
    }

    /// trail 일부를 prefix, anchor와 이어 붙인 절대 경로
    fn join(&self, segments: &[String]) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(segments.len() + 2);
        parts.push(&self.prefix);
        parts.push(&self.anchor);
        parts.extend(segments.iter().map(String::as_str));
        parts.join("/")
    }

    /// 현재 위치의 절대 경로
    pub fn current_path(&self) -> String {
        self.join(&self.trail)
    }

    /// 브레드크럼 클릭을 이동할 절대 경로로 변환
    ///
    /// - 마지막 칸(현재 위치) 클릭: `None`
    /// - 그 외: `label`과 같은 **첫 번째** 세그먼트까지 잘라 경로를 만든다.
    /// - trail에 없는 label: `None`
    ///
    /// 같은 이름이 trail에 여러 번 나오면(`data/archive/data`) 뒤쪽 칸을 눌러도
    /// 앞쪽 칸으로 이동한다. 라벨로만 위치를 찾는 이상 피할 수 없는 모호함이며
    /// 기존 동작을 그대로 유지한다.
    pub fn resolve_click(&self, index: usize, label: &str) -> Option<String> {
        if self.trail.is_empty() || index == self.trail.len() - 1 {
            return None;
        }
        let position = self.trail.iter().position(|segment| segment == label)?;
        Some(self.join(&self.trail[..=position]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn navigator(path: &str) -> PathNavigator {
        PathNavigator::from_path(path, &Anchor::new("user", 5))
    }

    fn trail(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_anchor_display() {
        assert_eq!(Anchor::new("pl-dircopy", 12).to_string(), "pl-dircopy_12");
        let instance = PluginInstance {
            id: 4,
            plugin_name: "pl-fshack".to_string(),
            status: None,
            previous_id: Some(3),
        };
        assert_eq!(Anchor::for_instance(&instance).to_string(), "pl-fshack_4");
    }

    #[test]
    fn test_derive_trail_basic() {
        assert_eq!(derive_trail("/home/user_5/a/b", "user_5"), trail(&["a", "b"]));
    }

    #[test]
    fn test_derive_trail_without_anchor_is_empty() {
        assert!(derive_trail("", "user_5").is_empty());
        assert!(derive_trail("/home/user_6/a", "user_5").is_empty());
        // 앵커 루트 자체
        assert!(derive_trail("/home/user_5", "user_5").is_empty());
    }

    #[test]
    fn test_derive_trail_drops_trailing_empty_segments() {
        assert_eq!(derive_trail("/home/user_5/a/b/", "user_5"), trail(&["a", "b"]));
        assert_eq!(derive_trail("/home/user_5/a//", "user_5"), trail(&["a"]));
        assert!(derive_trail("/home/user_5/", "user_5").is_empty());
    }

    #[test]
    fn test_derive_trail_keeps_interior_empty_segments() {
        assert_eq!(derive_trail("/home/user_5/a//b", "user_5"), trail(&["a", "", "b"]));
    }

    #[test]
    fn test_derive_trail_uses_first_anchor_occurrence() {
        assert_eq!(
            derive_trail("/x/user_5/a/user_5/b", "user_5"),
            trail(&["a", "user_5", "b"])
        );
    }

    #[test]
    fn test_derive_trail_does_not_match_partial_segment() {
        assert!(derive_trail("/home/user_55/a", "user_5").is_empty());
    }

    #[test]
    fn test_round_trip() {
        let cases: [(&str, &[&str]); 5] = [
            ("/home", &["a", "b"]),
            ("", &["a"]),
            ("chris/feed_1", &["data", "archive", "data"]),
            ("/deep/prefix/path", &["x", "", "y"]),
            ("/home", &["user_5", "nested"]),
        ];

        for (prefix, segments) in cases {
            let path = [&[prefix, "user_5"][..], segments].concat().join("/");
            assert_eq!(derive_trail(&path, "user_5"), trail(segments), "path: {}", path);

            let nav = navigator(&path);
            assert_eq!(nav.prefix(), prefix);
            assert_eq!(nav.current_path(), path);
        }
    }

    #[test]
    fn test_breadcrumbs_mark_terminal() {
        let crumbs = navigator("/home/user_5/a/b/c").breadcrumbs();
        assert_eq!(crumbs.len(), 3);
        assert!(!crumbs[0].is_terminal);
        assert!(!crumbs[1].is_terminal);
        assert!(crumbs[2].is_terminal);
        assert_eq!(crumbs[1].label, "b");
        assert_eq!(crumbs[1].index, 1);
    }

    #[test]
    fn test_breadcrumbs_empty_without_anchor() {
        assert!(navigator("/elsewhere/a").breadcrumbs().is_empty());
        assert!(navigator("").is_empty());
        assert_eq!(navigator("/elsewhere/a").root_path(), None);
    }

    #[test]
    fn test_anchor_root_path() {
        let nav = navigator("/home/user_5");
        assert!(nav.is_empty());
        assert_eq!(nav.prefix(), "/home");
        assert_eq!(nav.root_path(), Some("/home/user_5".to_string()));
        assert_eq!(nav.current_path(), "/home/user_5");

        let nav = navigator("/home/user_5/a/b");
        assert_eq!(nav.root_path(), Some("/home/user_5".to_string()));

        // 접미사만 비슷한 경우는 앵커가 아니다
        assert_eq!(navigator("/home/xuser_5").root_path(), None);
    }

    #[test]
    fn test_resolve_click_parent_segment() {
        let nav = navigator("/home/user_5/a/b");
        assert_eq!(nav.resolve_click(0, "a"), Some("/home/user_5/a".to_string()));
    }

    #[test]
    fn test_resolve_click_terminal_is_noop() {
        for path in ["/home/user_5/a", "/home/user_5/a/b", "/home/user_5/a/b/c/d"] {
            let nav = navigator(path);
            let last = nav.trail().len() - 1;
            let label = nav.trail()[last].clone();
            assert_eq!(nav.resolve_click(last, &label), None, "path: {}", path);
        }
    }

    #[test]
    fn test_resolve_click_duplicate_label_uses_first_occurrence() {
        let nav = navigator("/home/user_5/a/b/a/c");
        assert_eq!(nav.resolve_click(0, "a"), Some("/home/user_5/a".to_string()));
        // 뒤쪽 "a"를 눌러도 첫 번째 위치로 이동
        assert_eq!(nav.resolve_click(2, "a"), Some("/home/user_5/a".to_string()));

        let nav = navigator("/home/user_5/a/b/a");
        assert_eq!(nav.resolve_click(0, "a"), Some("/home/user_5/a".to_string()));
        assert_eq!(nav.resolve_click(2, "a"), None);
    }

    #[test]
    fn test_resolve_click_unknown_label_is_noop() {
        let nav = navigator("/home/user_5/a/b");
        assert_eq!(nav.resolve_click(0, "zzz"), None);
        assert_eq!(nav.resolve_click(7, "zzz"), None);
    }

    #[test]
    fn test_resolve_click_on_empty_trail_is_noop() {
        let nav = navigator("/nowhere");
        assert_eq!(nav.resolve_click(0, "a"), None);
    }
}
