use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

/// 문자열을 최대 너비에 맞춰 중간 생략한다.
///
/// 긴 DICOM 시리즈 파일 이름은 앞뒤가 모두 의미 있으므로 가운데를 잘라낸다.
pub fn truncate_middle(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    if text.width() <= max_width {
        return text.to_string();
    }

    if max_width < 5 {
        return take_prefix_by_width(text, max_width);
    }

    let side_width = (max_width - ELLIPSIS.width()) / 2;
    let start = take_prefix_by_width(text, side_width);
    let end = take_suffix_by_width(text, side_width);
    format!("{}{}{}", start, ELLIPSIS, end)
}

/// 표시 너비 기준으로 오른쪽을 공백으로 채운다. (넘치면 중간 생략)
pub fn pad_to_width(text: &str, width: usize) -> String {
    let fitted = truncate_middle(text, width);
    let padding = width.saturating_sub(fitted.width());
    format!("{}{}", fitted, " ".repeat(padding))
}

fn take_prefix_by_width(text: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + ch_width > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

fn take_suffix_by_width(text: &str, max_width: usize) -> String {
    let mut rev_chars: Vec<char> = Vec::new();
    let mut width = 0;
    for ch in text.chars().rev() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + ch_width > max_width {
            break;
        }
        rev_chars.push(ch);
        width += ch_width;
    }
    rev_chars.reverse();
    rev_chars.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_middle() {
        assert_eq!(truncate_middle("short.dcm", 10), "short.dcm");
        assert_eq!(truncate_middle("series0001_slice.dcm", 11), "seri....dcm");
        assert_eq!(truncate_middle("series.dcm", 4), "seri");
        assert_eq!(truncate_middle("anything", 0), "");
    }

    #[test]
    fn test_truncate_middle_wide_chars() {
        let truncated = truncate_middle("뇌영상_분할_결과_최종본.nii", 12);
        assert!(truncated.width() <= 12);
    }

    #[test]
    fn test_pad_to_width() {
        assert_eq!(pad_to_width("a.txt", 8), "a.txt   ");
        assert_eq!(pad_to_width("결과", 6), "결과  ");
        assert_eq!(pad_to_width("exact", 5), "exact");
    }
}
