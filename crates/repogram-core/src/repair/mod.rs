//! Mermaid repair engine
//!
//! Coerces unreliable, free-form model output into syntactically valid
//! Mermaid source. The engine is a fixed sequence of independent lexical
//! rewrite passes; it never builds an AST, because the whole point is to
//! accept input a grammar-aware parser would reject.
//!
//! Each pass targets one observed class of model hallucination: markdown
//! fences around the code, keywords glued to preceding tokens, keywords
//! broken across line breaks, invented closing tags like
//! `endsubgraph_frontend`, `click` directives missing their `href` or
//! `_blank` tokens, and `classDef` lines split from their style
//! properties.
//!
//! The pass order is fixed. Fence extraction runs first so every later
//! pass sees one contiguous code blob; header enforcement runs right
//! after the keyword fixes so the kind-specific rules below it can assume
//! a header exists. Quote/keyword splitting runs before the `_blank`
//! appender so that a directive buried mid-line reaches its own line
//! before "end of line" is tested; this keeps a second engine run a
//! strict no-op. The state-diagram suffix strip runs after the `_blank`
//! appender for the same reason.
//!
//! `repair` is total: no input fails, and absence of a match is a no-op
//! for each pass. Running the engine on its own output changes nothing.

mod stages;

use crate::kind::DiagramKind;

/// Normalize raw model output into clean Mermaid source for `kind`.
///
/// Pure and deterministic; idempotent over the whole pass sequence.
/// Empty input still yields the mandatory header line for `kind`.
pub fn repair(raw: &str, kind: DiagramKind) -> String {
    let code = stages::extract_fenced(raw);
    let code = stages::split_glued_keywords(&code);
    let code = stages::rejoin_split_keywords(&code);
    let code = stages::break_end_after_closer(&code);
    let code = stages::enforce_header(&code, kind);
    let code = stages::strip_dangling_class_marker(&code);
    let code = stages::reassemble_class_defs(&code);
    let code = stages::rewrite_hallucinated_closers(&code);
    let code = stages::insert_missing_href(&code);
    let code = stages::split_quote_keyword(&code);
    let code = stages::append_missing_blank(&code);
    let code = if kind == DiagramKind::State {
        stages::strip_state_link_suffixes(&code)
    } else {
        code
    };
    stages::separate_trailing_end(&code)
}
