//! Individual rewrite passes of the repair engine.
//!
//! Every pass is a pure `&str -> String` function built on compiled
//! regex statics. Each pass is idempotent on its own: applying it to its
//! own output is a no-op.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::kind::DiagramKind;

static MERMAID_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```mermaid\s*(.*?)\s*```").unwrap());
static ANY_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```\s*(.*?)\s*```").unwrap());

/// Keep only the interior of a fenced code block, preferring a block
/// tagged `mermaid`; text without fences passes through. Surrounding
/// whitespace is trimmed either way.
pub fn extract_fenced(raw: &str) -> String {
    let inner = if let Some(caps) = MERMAID_FENCE.captures(raw) {
        caps.get(1).map_or("", |m| m.as_str())
    } else if let Some(caps) = ANY_FENCE.captures(raw) {
        caps.get(1).map_or("", |m| m.as_str())
    } else {
        raw
    };
    inner.trim().to_string()
}

static GLUED_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([a-z0-9])(classDef|class|click|subgraph|state|graph|flowchart)\b").unwrap()
});

/// Break a structural keyword off the token it was glued to, e.g.
/// `B]subgraph` or `F2[x]classDef` (the bracket cases are handled by the
/// letter/digit that precedes the keyword inside the glued run).
pub fn split_glued_keywords(code: &str) -> String {
    GLUED_KEYWORD.replace_all(code, "${1}\n${2}").into_owned()
}

static SPLIT_SUBGRAPH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bsub\s*\n\s*graph\b").unwrap());
static SPLIT_END_SUBGRAPH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bend\s*\n\s*subgraph\b").unwrap());
static SPLIT_CLASSDEF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bclass\s*\n\s*Def\b").unwrap());

/// Rejoin keywords the model broke across a line break (`sub\ngraph`,
/// `class\nDef`). The `end\nsubgraph` pattern keeps its line break so the
/// two keywords stay on separate lines.
pub fn rejoin_split_keywords(code: &str) -> String {
    let code = SPLIT_SUBGRAPH.replace_all(code, "subgraph");
    let code = SPLIT_END_SUBGRAPH.replace_all(&code, "end\nsubgraph");
    SPLIT_CLASSDEF.replace_all(&code, "classDef").into_owned()
}

static CLOSER_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)([\])])end\b").unwrap());
static CLOSER_END_EOL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)([\])])[ \t]*end[ \t]*$").unwrap());

/// Put `end` on its own line when it trails a closing bracket or
/// parenthesis.
pub fn break_end_after_closer(code: &str) -> String {
    let code = CLOSER_END.replace_all(code, "${1}\nend");
    CLOSER_END_EOL.replace_all(&code, "${1}\nend").into_owned()
}

static HEADER_PRESENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:%%.*\n)*\s*(flowchart|graph|classDiagram|stateDiagram-v2|stateDiagram|C4Context)")
        .unwrap()
});
static HEADER_SAME_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^(\s*)(flowchart\s+\w+|graph\s+\w+|classDiagram|stateDiagram-v2|stateDiagram|C4Context)[^\S\r\n]+",
    )
    .unwrap()
});

/// Guarantee a diagram header: when no valid header line exists
/// (leading `%%` comment lines are skipped), prepend the header for
/// `kind`. A header followed by content on the same line gets a line
/// break inserted after the header token.
pub fn enforce_header(code: &str, kind: DiagramKind) -> String {
    let code = if HEADER_PRESENT.is_match(code) {
        code.to_string()
    } else if code.is_empty() {
        kind.header().to_string()
    } else {
        format!("{}\n{}", kind.header(), code)
    };
    HEADER_SAME_LINE.replace_all(&code, "${1}${2}\n").into_owned()
}

static DANGLING_CLASS_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m):::\s*$").unwrap());

/// Drop a class-apply marker (`:::`) left hanging at the end of a line.
pub fn strip_dangling_class_marker(code: &str) -> String {
    DANGLING_CLASS_MARKER.replace_all(code, "").into_owned()
}

static CLASSDEF_SPLIT_STYLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(classDef\s+\w+)\s*\n\s*((?:fill|stroke|color):#)").unwrap()
});
static STYLE_GLUED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([a-zA-Z]+)((?:fill|stroke|color):#)").unwrap());
static BARE_CLASSDEF: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*classDef[ \t]*$").unwrap());
static INCOMPLETE_CLASSDEF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*classDef[ \t]+\w+[ \t]*$").unwrap());
static CLASSDEF_TRAILING_COMMA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)(classDef.*),\s*$").unwrap());

/// Reassemble `classDef` lines: rejoin a name split from its style
/// properties across a line break, insert the missing space when a name
/// is glued to `fill:#`/`stroke:#`/`color:#`, delete bare or incomplete
/// `classDef` lines, and drop trailing commas.
pub fn reassemble_class_defs(code: &str) -> String {
    let code = CLASSDEF_SPLIT_STYLE.replace_all(code, "${1} ${2}");
    let code = STYLE_GLUED.replace_all(&code, "${1} ${2}");
    let code = BARE_CLASSDEF.replace_all(&code, "");
    let code = INCOMPLETE_CLASSDEF.replace_all(&code, "");
    CLASSDEF_TRAILING_COMMA
        .replace_all(&code, "${1}")
        .into_owned()
}

static CLOSER_NAMED_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([\])])endsubgraph_\w*").unwrap());
static NAMED_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)endsubgraph_\w+").unwrap());
static END_SUBGRAPH_GLUED: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)endsubgraph").unwrap());
static END_CLICK_GLUED: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)endclick").unwrap());
static END_CLASSDEF_GLUED: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)endclassDef").unwrap());
static BLANK_END_GLUED: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)_blankend").unwrap());

/// Rewrite invented closing tags. Models sometimes "name" an `end` tag
/// after the subgraph it closes (`endsubgraph_frontend`); only a bare
/// `end` is valid. Also splits `end` glued directly to a following
/// keyword, and `_blank` glued to `end`.
pub fn rewrite_hallucinated_closers(code: &str) -> String {
    let code = CLOSER_NAMED_END.replace_all(code, "${1}\nend");
    let code = NAMED_END.replace_all(&code, "\nend");
    let code = END_SUBGRAPH_GLUED.replace_all(&code, "end\nsubgraph");
    let code = END_CLICK_GLUED.replace_all(&code, "end\nclick");
    let code = END_CLASSDEF_GLUED.replace_all(&code, "end\nclassDef");
    BLANK_END_GLUED
        .replace_all(&code, "_blank\nend")
        .into_owned()
}

static CLICK_MISSING_HREF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)click\s+([\w\-]+)\s+"(http[^"]+)""#).unwrap());

/// Insert the `href` keyword a link directive requires:
/// `click ID "URL"` becomes `click ID href "URL"`.
pub fn insert_missing_href(code: &str) -> String {
    CLICK_MISSING_HREF
        .replace_all(code, "click ${1} href \"${2}\"")
        .into_owned()
}

static QUOTE_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(")(classDef|class|click|subgraph|state|graph|flowchart)"#).unwrap()
});

/// Break a structural keyword off a closing quote it was glued to, e.g.
/// `"https://x/y"click`.
pub fn split_quote_keyword(code: &str) -> String {
    QUOTE_KEYWORD.replace_all(code, "${1}\n${2}").into_owned()
}

static CLICK_MISSING_BLANK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)(click\s+[\w\-]+\s+href\s+"[^"]+"(?:\s+"[^"]+")?)[ \t]*$"#).unwrap()
});

/// Append the `_blank` open-in-new-tab marker to a completed link
/// directive that ends its line without one.
pub fn append_missing_blank(code: &str) -> String {
    CLICK_MISSING_BLANK
        .replace_all(code, "${1} _blank")
        .into_owned()
}

static STATE_LINK_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?m)(click\s+[\w\-]+\s+href\s+"[^"]+").*$"#).unwrap());

/// State diagrams only: the strict stateDiagram parser rejects tooltip
/// and `_blank` tokens after the URL, so everything past the URL is cut.
pub fn strip_state_link_suffixes(code: &str) -> String {
    STATE_LINK_SUFFIX.replace_all(code, "${1}").into_owned()
}

static END_THEN_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bend\s+([a-zA-Z])").unwrap());

/// Put a line break between a bare `end` keyword and a following word.
/// The word boundary keeps identifiers like `frontend` intact.
pub fn separate_trailing_end(code: &str) -> String {
    END_THEN_WORD.replace_all(code, "end\n${1}").into_owned()
}
