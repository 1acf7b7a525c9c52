//! End-to-end checks for the repair engine: full pass composition over
//! realistic broken model output, plus the engine-level guarantees
//! (header always present, fences never survive, repairing twice is a
//! no-op).

use repogram_core::{repair, DiagramKind};

const ALL_KINDS: [DiagramKind; 4] = [
    DiagramKind::Flowchart,
    DiagramKind::Class,
    DiagramKind::State,
    DiagramKind::C4,
];

#[test]
fn fenced_output_is_unwrapped() {
    let raw = "Here is your diagram:\n```mermaid\ngraph TD\nA[App]-->B[DB]\n```\nHope it helps!";
    assert_eq!(
        repair(raw, DiagramKind::Flowchart),
        "graph TD\nA[App]-->B[DB]"
    );
}

#[test]
fn plain_fence_is_unwrapped_too() {
    let raw = "```\ngraph TD\nA-->B\n```";
    assert_eq!(repair(raw, DiagramKind::Flowchart), "graph TD\nA-->B");
}

#[test]
fn header_is_guaranteed_for_every_kind() {
    for kind in ALL_KINDS {
        let repaired = repair("", kind);
        assert_eq!(repaired, kind.header(), "kind: {kind:?}");

        let repaired = repair("some freeform text", kind);
        assert!(
            repaired.starts_with(kind.header()),
            "kind: {kind:?}, got: {repaired:?}"
        );
    }
}

#[test]
fn c4_requests_render_as_flowcharts() {
    assert_eq!(repair("A-->B", DiagramKind::C4), "flowchart TD\nA-->B");
}

#[test]
fn named_end_tag_is_rewritten_to_bare_end() {
    let raw = "flowchart TD\nsubgraph frontend\nA[Node]endsubgraph_frontend";
    assert_eq!(
        repair(raw, DiagramKind::Flowchart),
        "flowchart TD\nsubgraph frontend\nA[Node]\nend"
    );
}

#[test]
fn click_without_href_gains_href_and_blank() {
    let raw = "flowchart TD\nA[App]\nclick A \"https://github.com/octo/demo/blob/main/src/app.rs\"";
    assert_eq!(
        repair(raw, DiagramKind::Flowchart),
        "flowchart TD\nA[App]\nclick A href \"https://github.com/octo/demo/blob/main/src/app.rs\" _blank"
    );
}

#[test]
fn complete_click_directive_is_left_alone() {
    let raw = "flowchart TD\nclick A href \"https://x/y\" \"Tooltip\" _blank";
    assert_eq!(repair(raw, DiagramKind::Flowchart), raw);
}

#[test]
fn state_diagram_links_lose_everything_after_the_url() {
    let raw = "stateDiagram-v2\n[*] --> Idle\nclick Idle href \"https://x/y\" \"Tooltip\" _blank";
    assert_eq!(
        repair(raw, DiagramKind::State),
        "stateDiagram-v2\n[*] --> Idle\nclick Idle href \"https://x/y\""
    );
}

#[test]
fn flowchart_links_keep_their_blank_marker() {
    let raw = "flowchart TD\nclick A href \"https://x/y\" _blank";
    assert_eq!(repair(raw, DiagramKind::Flowchart), raw);
}

#[test]
fn classdef_broken_across_lines_is_reassembled() {
    let raw = "flowchart TD\nA[App]\nclassDef frontend\nfill:#3b82f6,stroke:#1e40af";
    assert_eq!(
        repair(raw, DiagramKind::Flowchart),
        "flowchart TD\nA[App]\nclassDef frontend fill:#3b82f6,stroke:#1e40af"
    );
}

#[test]
fn glued_keywords_are_separated_onto_their_own_lines() {
    let raw = "flowchart TD\nA[App]-->B2click B2 \"https://x/y\"";
    let repaired = repair(raw, DiagramKind::Flowchart);
    assert_eq!(
        repaired,
        "flowchart TD\nA[App]-->B2\nclick B2 href \"https://x/y\" _blank"
    );
}

#[test]
fn quote_glued_directives_are_separated() {
    let raw = "flowchart TD\nclick A href \"https://x/a\"click B href \"https://x/b\"";
    assert_eq!(
        repair(raw, DiagramKind::Flowchart),
        "flowchart TD\nclick A href \"https://x/a\" _blank\nclick B href \"https://x/b\" _blank"
    );
}

#[test]
fn split_subgraph_keyword_is_rejoined() {
    let raw = "flowchart TD\nsub\ngraph services\nA-->B\nend";
    assert_eq!(
        repair(raw, DiagramKind::Flowchart),
        "flowchart TD\nsubgraph services\nA-->B\nend"
    );
}

#[test]
fn header_sharing_a_line_with_content_is_split() {
    assert_eq!(
        repair("flowchart TD A-->B", DiagramKind::Flowchart),
        "flowchart TD\nA-->B"
    );
}

#[test]
fn fences_never_survive_repair() {
    let samples = [
        "```mermaid\ngraph TD\nA-->B\n```",
        "```\nclassDiagram\nFoo <|-- Bar\n```",
        "text\n```mermaid\nstateDiagram-v2\n[*] --> A\n```\ntext",
    ];
    for sample in samples {
        for kind in ALL_KINDS {
            let repaired = repair(sample, kind);
            assert!(
                !repaired.contains("```"),
                "kind: {kind:?}, input: {sample:?}"
            );
        }
    }
}

#[test]
fn repair_is_idempotent() {
    let samples = [
        "",
        "graph TD\nA-->B",
        "```mermaid\ngraph TD\nA-->B\n```",
        "flowchart TD A-->B:::",
        "A[Node]endsubgraph_frontend",
        "click A \"https://x/y\"",
        "classDef frontend\nfill:#3b82f6,stroke:#1e40af,",
        "sub\ngraph sg\nB1[x]end click B1 \"https://x\"",
        "stateDiagram-v2\nclick Idle href \"https://x\" \"tip\" _blank",
        "endsubgraph_backend\nclassDef orphan\nA-->B2classDef c fill:#111",
    ];
    for sample in samples {
        for kind in ALL_KINDS {
            let once = repair(sample, kind);
            let twice = repair(&once, kind);
            assert_eq!(once, twice, "kind: {kind:?}, input: {sample:?}");
        }
    }
}

#[test]
fn repaired_structural_keywords_are_line_initial() {
    // Malformed samples whose keywords arrive glued, quote-glued, or
    // inside invented closers; after repair every surviving structural
    // keyword must open its line.
    let samples = [
        "flowchart TD\nA[App]-->B2click B2 \"https://x/y\"",
        "flowchart TD\nclick A href \"https://x/a\"click B href \"https://x/b\"",
        "flowchart TD\nsubgraph sg_a[A]\nN1[n]endsubgraph_sg_a",
        "sub\ngraph sg\nB1[x]end click B1 \"https://x\"",
        "endsubgraph_backend\nA-->B2classDef c fill:#111",
        "endclick A \"https://x\"\nendclassDef foo fill:#222",
        "graph TD\nX[x]end subgraph sg_b[B]\nY[y]\"https://x\"subgraph sg_c[C]\nend",
    ];
    let keywords = ["subgraph", "end", "classDef", "click"];

    for sample in samples {
        for kind in ALL_KINDS {
            let repaired = repair(sample, kind);
            for line in repaired.lines() {
                let trimmed = line.trim_start();
                for keyword in keywords {
                    for at in word_offsets(trimmed, keyword) {
                        assert_eq!(
                            at, 0,
                            "`{keyword}` not line-initial in {trimmed:?} \
                             (kind: {kind:?}, input: {sample:?})"
                        );
                    }
                }
            }
        }
    }
}

/// Byte offsets where `word` occurs with alphanumeric/underscore
/// boundaries on both sides.
fn word_offsets(line: &str, word: &str) -> Vec<usize> {
    let is_word = |b: u8| b.is_ascii_alphanumeric() || b == b'_';
    let bytes = line.as_bytes();
    let mut offsets = Vec::new();
    let mut from = 0;
    while let Some(i) = line[from..].find(word) {
        let at = from + i;
        let end = at + word.len();
        let bounded_left = at == 0 || !is_word(bytes[at - 1]);
        let bounded_right = end == bytes.len() || !is_word(bytes[end]);
        if bounded_left && bounded_right {
            offsets.push(at);
        }
        from = at + 1;
    }
    offsets
}

#[test]
fn placeholder_text_becomes_a_headed_diagram() {
    let placeholder = "Error generating diagram: upstream returned status 429";
    let repaired = repair(placeholder, DiagramKind::Flowchart);
    assert!(repaired.starts_with("flowchart TD\n"));
    assert!(repaired.contains("Error generating diagram"));
}
