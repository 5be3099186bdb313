//! Turtle character class predicates.
//!
//! Based on the Turtle grammar name productions:
//! - nameStartChar, nameChar (prefixed names, local names, node IDs)
//! - whitespace and URI reference characters

/// Check if a character can start a name, excluding `_`.
///
/// ```text
/// nameStartChar - '_' ::= [A-Z] | [a-z] | [#x00C0-#x00D6] | [#x00D8-#x00F6]
///                       | [#x00F8-#x02FF] | [#x0370-#x037D] | [#x037F-#x1FFF]
///                       | [#x200C-#x200D] | [#x2070-#x218F] | [#x2C00-#x2FEF]
///                       | [#x3001-#xD7FF] | [#xF900-#xFDCF] | [#xFDF0-#xFFFD]
///                       | [#x10000-#xEFFFF]
/// ```
pub fn is_name_start_char_minus_underscore(c: char) -> bool {
    matches!(c,
        'A'..='Z' |
        'a'..='z' |
        '\u{00C0}'..='\u{00D6}' |
        '\u{00D8}'..='\u{00F6}' |
        '\u{00F8}'..='\u{02FF}' |
        '\u{0370}'..='\u{037D}' |
        '\u{037F}'..='\u{1FFF}' |
        '\u{200C}'..='\u{200D}' |
        '\u{2070}'..='\u{218F}' |
        '\u{2C00}'..='\u{2FEF}' |
        '\u{3001}'..='\u{D7FF}' |
        '\u{F900}'..='\u{FDCF}' |
        '\u{FDF0}'..='\u{FFFD}' |
        '\u{10000}'..='\u{EFFFF}'
    )
}

/// Check if a character can start a name.
///
/// ```text
/// nameStartChar ::= (nameStartChar - '_') | '_'
/// ```
pub fn is_name_start_char(c: char) -> bool {
    is_name_start_char_minus_underscore(c) || c == '_'
}

/// Check if a character can continue a name.
///
/// ```text
/// nameChar ::= nameStartChar | '-' | [0-9] | #x00B7 | [#x0300-#x036F] | [#x203F-#x2040]
/// ```
pub fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || c == '-'
        || c.is_ascii_digit()
        || c == '\u{00B7}'
        || matches!(c, '\u{0300}'..='\u{036F}' | '\u{203F}'..='\u{2040}')
}

/// Check if a character is Turtle whitespace.
pub fn is_ws(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Check if a character is an uppercase hex digit (`0-9 A-F`).
pub fn is_hex_upper(c: char) -> bool {
    matches!(c, '0'..='9' | 'A'..='F')
}

/// Check if a character can appear unescaped in a URI reference.
///
/// Anything in `[U+0020, U+10FFFF]` except the closing `>`; `\` starts an
/// escape and is handled separately.
pub fn is_uri_char(c: char) -> bool {
    c >= '\u{0020}' && c != '>' && c != '\\'
}
