//! Lexical patterns for the SPARQL 1.1 terminal productions (§19.8).
//!
//! Component productions (`PN_CHARS*`, `PLX`, `ECHAR`, ...) live here as
//! pattern fragments only; the public leaf types in the parent module
//! compile them into anchored whole-string matchers. Character classes
//! are flattened where the grammar writes a union of single-character
//! alternatives.

use once_cell::sync::Lazy;
use regex::Regex;

/// `[164] PN_CHARS_BASE`
pub(super) const PN_CHARS_BASE: &str = r"[A-Za-z\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0370}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\u{10000}-\u{EFFFF}]";

/// `[165] PN_CHARS_U ::= PN_CHARS_BASE | '_'`
pub(super) const PN_CHARS_U: &str = r"[A-Za-z_\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0370}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\u{10000}-\u{EFFFF}]";

/// `[167] PN_CHARS ::= PN_CHARS_U | '-' | [0-9] | #x00B7 | [#x0300-#x036F] | [#x203F-#x2040]`
pub(super) const PN_CHARS: &str = r"[A-Za-z0-9_\-\u{00B7}\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0300}-\u{036F}\u{0370}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{203F}-\u{2040}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\u{10000}-\u{EFFFF}]";

/// `[172] HEX` and `[171] PERCENT`, folded: `'%' HEX HEX`
const PERCENT: &str = r"%[0-9A-Fa-f]{2}";

/// `[173] PN_LOCAL_ESC ::= '\' ( '_' | '~' | '.' | '-' | ... | '%' )`
const PN_LOCAL_ESC: &str = r"\\[_~.!$&'()*+,;=/?#@%\-]";

/// `[160] ECHAR ::= '\' [tbnrf\"']`
pub(super) const ECHAR: &str = r#"\\[tbnrf"'\\]"#;

/// `[155] EXPONENT ::= [eE] [+-]? [0-9]+`
pub(super) const EXPONENT: &str = r"[eE][+-]?[0-9]+";

/// `[168] PN_PREFIX ::= PN_CHARS_BASE ((PN_CHARS|'.')* PN_CHARS)?`
fn pn_prefix() -> String {
    format!("{PN_CHARS_BASE}(?:(?:{PN_CHARS}|\\.)*{PN_CHARS})?")
}

/// `[170] PLX ::= PERCENT | PN_LOCAL_ESC`
fn plx() -> String {
    format!("(?:{PERCENT}|{PN_LOCAL_ESC})")
}

/// `[169] PN_LOCAL ::= (PN_CHARS_U | ':' | [0-9] | PLX) ((PN_CHARS | '.' | ':' | PLX)* (PN_CHARS | ':' | PLX))?`
fn pn_local() -> String {
    let plx = plx();
    format!(
        "(?:{PN_CHARS_U}|:|[0-9]|{plx})(?:(?:{PN_CHARS}|\\.|:|{plx})*(?:{PN_CHARS}|:|{plx}))?"
    )
}

fn anchored(fragment: &str) -> Regex {
    // Terminal validation is a whole-string match, never a search.
    Regex::new(&format!("^(?:{fragment})$")).expect("terminal pattern is well-formed")
}

/// `[139] IRIREF`, inner text between `<` and `>`.
pub(super) static IRIREF: Lazy<Regex> =
    Lazy::new(|| anchored(r#"[^<>"{}|^`\\\x00-\x20]*"#));

/// `[140] PNAME_NS ::= PN_PREFIX? ':'`
pub(super) static PNAME_NS: Lazy<Regex> =
    Lazy::new(|| anchored(&format!("(?:{})?:", pn_prefix())));

/// `[141] PNAME_LN ::= PNAME_NS PN_LOCAL`
pub(super) static PNAME_LN: Lazy<Regex> =
    Lazy::new(|| anchored(&format!("(?:{})?:{}", pn_prefix(), pn_local())));

/// `[142] BLANK_NODE_LABEL`, inner text after `_:`.
pub(super) static BLANK_NODE_LABEL: Lazy<Regex> = Lazy::new(|| {
    anchored(&format!(
        "(?:{PN_CHARS_U}|[0-9])(?:(?:{PN_CHARS}|\\.)*{PN_CHARS})?"
    ))
});

/// `[166] VARNAME`, inner text after `?` or `$`.
pub(super) static VARNAME: Lazy<Regex> = Lazy::new(|| {
    anchored(&format!(
        "(?:{PN_CHARS_U}|[0-9])(?:{PN_CHARS_U}|[0-9\\u{{00B7}}\\u{{0300}}-\\u{{036F}}\\u{{203F}}-\\u{{2040}}])*"
    ))
});

/// `[145] LANGTAG`, inner text after `@`.
pub(super) static LANGTAG: Lazy<Regex> =
    Lazy::new(|| anchored("[a-zA-Z]+(?:-[a-zA-Z0-9]+)*"));

/// `[146] INTEGER ::= [0-9]+`
pub(super) static INTEGER: Lazy<Regex> = Lazy::new(|| anchored("[0-9]+"));

/// `[147] DECIMAL ::= [0-9]* '.' [0-9]+`
pub(super) static DECIMAL: Lazy<Regex> = Lazy::new(|| anchored(r"[0-9]*\.[0-9]+"));

/// `[148] DOUBLE`
pub(super) static DOUBLE: Lazy<Regex> = Lazy::new(|| {
    anchored(&format!(
        r"[0-9]+\.[0-9]*{EXPONENT}|\.[0-9]+{EXPONENT}|[0-9]+{EXPONENT}"
    ))
});

/// `[156] STRING_LITERAL1`, inner text between the `'` quotes.
pub(super) static STRING_LITERAL1: Lazy<Regex> =
    Lazy::new(|| anchored(&format!(r"(?:[^'\\\n\r]|{ECHAR})*")));

/// `[157] STRING_LITERAL2`, inner text between the `"` quotes.
pub(super) static STRING_LITERAL2: Lazy<Regex> =
    Lazy::new(|| anchored(&format!(r#"(?:[^"\\\n\r]|{ECHAR})*"#)));

/// `[158] STRING_LITERAL_LONG1`, inner text between the `'''` quotes.
pub(super) static STRING_LITERAL_LONG1: Lazy<Regex> =
    Lazy::new(|| anchored(&format!(r"(?:(?:''|')?(?:[^'\\]|{ECHAR}))*")));

/// `[159] STRING_LITERAL_LONG2`, inner text between the `"""` quotes.
pub(super) static STRING_LITERAL_LONG2: Lazy<Regex> =
    Lazy::new(|| anchored(&format!(r#"(?:(?:""|")?(?:[^"\\]|{ECHAR}))*"#)));

/// `[162] WS*`, the interior of `[161] NIL` and `[163] ANON`.
pub(super) static WS_ONLY: Lazy<Regex> = Lazy::new(|| anchored(r"[ \t\r\n]*"));
