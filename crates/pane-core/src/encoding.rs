//! Character encodings offered in the pane's encoding menu

/// (charset, label, group)
pub const ENCODINGS: &[(&str, &str, &str)] = &[
    ("UTF-8", "Unicode", "Unicode"),
    ("ISO-8859-1", "Western", "European"),
    ("ISO-8859-15", "Western", "European"),
    ("WINDOWS-1252", "Western", "European"),
    ("ISO-8859-2", "Central European", "European"),
    ("WINDOWS-1250", "Central European", "European"),
    ("ISO-8859-5", "Cyrillic", "European"),
    ("KOI8-R", "Cyrillic", "European"),
    ("KOI8-U", "Cyrillic/Ukrainian", "European"),
    ("WINDOWS-1251", "Cyrillic", "European"),
    ("ISO-8859-7", "Greek", "European"),
    ("ISO-8859-9", "Turkish", "European"),
    ("ISO-8859-13", "Baltic", "European"),
    ("ISO-8859-8", "Hebrew Visual", "Middle Eastern"),
    ("WINDOWS-1255", "Hebrew", "Middle Eastern"),
    ("WINDOWS-1256", "Arabic", "Middle Eastern"),
    ("GB18030", "Chinese Simplified", "East Asian"),
    ("BIG5", "Chinese Traditional", "East Asian"),
    ("BIG5-HKSCS", "Chinese Traditional", "East Asian"),
    ("EUC-JP", "Japanese", "East Asian"),
    ("SHIFT_JIS", "Japanese", "East Asian"),
    ("EUC-KR", "Korean", "East Asian"),
    ("TIS-620", "Thai", "Asian"),
    ("WINDOWS-1258", "Vietnamese", "Asian"),
];

pub fn is_known_encoding(charset: &str) -> bool {
    ENCODINGS.iter().any(|(c, _, _)| c.eq_ignore_ascii_case(charset))
}

/// Menu label, e.g. "Western (ISO-8859-15)"
pub fn encoding_label(charset: &str) -> Option<String> {
    ENCODINGS
        .iter()
        .find(|(c, _, _)| c.eq_ignore_ascii_case(charset))
        .map(|(c, label, _)| format!("{} ({})", label, c))
}
