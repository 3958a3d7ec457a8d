//! Case- and accent-insensitive substring search for filtering suggestions

/// Char offset of the first occurrence of `query` in `text`, ignoring case.
///
/// With `ignore_accents`, common Latin diacritics are folded first so that
/// `"jose"` finds `"José"`. Folding maps every char to exactly one char, so
/// the returned offset is valid in the original `text`.
pub fn get_substring_index(text: &str, query: &str, ignore_accents: bool) -> Option<usize> {
    let normalize = |s: &str| -> Vec<char> {
        s.chars()
            .map(|ch| {
                let lower = to_lower(ch);
                if ignore_accents {
                    remove_accent(lower)
                } else {
                    lower
                }
            })
            .collect()
    };

    let haystack = normalize(text);
    let needle = normalize(query);
    if needle.is_empty() {
        return Some(0);
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle.as_slice())
}

fn to_lower(ch: char) -> char {
    let mut lower = ch.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(single), None) => single,
        // Multi-char lowercase forms would shift offsets
        _ => ch,
    }
}

/// Base letter of a lowercase Latin letter with a diacritic.
fn remove_accent(ch: char) -> char {
    match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' | 'ǎ' | 'ạ' | 'ả' | 'ấ' | 'ầ' | 'ẩ'
        | 'ẫ' | 'ậ' | 'ắ' | 'ằ' | 'ẳ' | 'ẵ' | 'ặ' => 'a',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' | 'ẹ' | 'ẻ' | 'ẽ' | 'ế' | 'ề' | 'ể'
        | 'ễ' | 'ệ' => 'e',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'ĥ' | 'ħ' => 'h',
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' | 'ǐ' | 'ỉ' | 'ị' => 'i',
        'ĵ' => 'j',
        'ķ' => 'k',
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => 'l',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' | 'ơ' | 'ǒ' | 'ọ' | 'ỏ' | 'ố' | 'ồ'
        | 'ổ' | 'ỗ' | 'ộ' | 'ớ' | 'ờ' | 'ở' | 'ỡ' | 'ợ' => 'o',
        'ŕ' | 'ŗ' | 'ř' => 'r',
        'ś' | 'ŝ' | 'ş' | 'š' | 'ș' => 's',
        'ţ' | 'ť' | 'ŧ' | 'ț' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' | 'ư' | 'ǔ' | 'ụ' | 'ủ' | 'ứ'
        | 'ừ' | 'ử' | 'ữ' | 'ự' => 'u',
        'ŵ' => 'w',
        'ý' | 'ÿ' | 'ŷ' | 'ỳ' | 'ỵ' | 'ỷ' | 'ỹ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive() {
        assert_eq!(get_substring_index("John Doe", "doe", false), Some(5));
        assert_eq!(get_substring_index("John Doe", "xyz", false), None);
    }

    #[test]
    fn test_accents_only_fold_when_asked() {
        assert_eq!(get_substring_index("José Álvarez", "jose", false), None);
        assert_eq!(get_substring_index("José Álvarez", "jose", true), Some(0));
        assert_eq!(get_substring_index("José Álvarez", "ALVA", true), Some(5));
        assert_eq!(get_substring_index("Jose", "josé", true), Some(0));
    }

    #[test]
    fn test_empty_query_matches_start() {
        assert_eq!(get_substring_index("anything", "", false), Some(0));
    }
}
