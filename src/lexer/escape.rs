//! Single-character escape table for quoted atoms, transcribed from
//! `original_source/src/lexer.cpp`'s `escape()` function. `\xHH` is handled by the caller since
//! it consumes two extra bytes; every other escape is a one-to-one character mapping with an
//! identity fallback ("any other c maps to c itself").

pub fn escape_char(c: char) -> char {
    match c {
        '0' => '\0',
        'a' => '\u{07}',
        'b' => '\u{08}',
        't' => '\t',
        'n' => '\n',
        'v' => '\u{0B}',
        'f' => '\u{0C}',
        'r' => '\r',
        other => other,
    }
}
