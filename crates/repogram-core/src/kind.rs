//! Diagram kinds

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RepogramError;

/// The kind of diagram to generate.
///
/// Selects the instruction template, the required Mermaid header, and the
/// kind-specific repair rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagramKind {
    #[default]
    Flowchart,
    Class,
    State,
    C4,
}

impl DiagramKind {
    /// Lowercase token used in cache keys and request payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagramKind::Flowchart => "flowchart",
            DiagramKind::Class => "class",
            DiagramKind::State => "state",
            DiagramKind::C4 => "c4",
        }
    }

    /// Header line the repair engine installs when none is present.
    ///
    /// C4 diagrams are rendered as flowcharts: Mermaid's native C4 support
    /// is too limited for reliable model output.
    pub fn header(&self) -> &'static str {
        match self {
            DiagramKind::Flowchart | DiagramKind::C4 => "flowchart TD",
            DiagramKind::Class => "classDiagram",
            DiagramKind::State => "stateDiagram-v2",
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DiagramKind {
    type Err = RepogramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flowchart" => Ok(DiagramKind::Flowchart),
            "class" => Ok(DiagramKind::Class),
            "state" => Ok(DiagramKind::State),
            "c4" => Ok(DiagramKind::C4),
            other => Err(RepogramError::InvalidInput(format!(
                "unknown diagram type: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_kinds_case_insensitively() {
        assert_eq!("flowchart".parse::<DiagramKind>().unwrap(), DiagramKind::Flowchart);
        assert_eq!("Class".parse::<DiagramKind>().unwrap(), DiagramKind::Class);
        assert_eq!("STATE".parse::<DiagramKind>().unwrap(), DiagramKind::State);
        assert_eq!("c4".parse::<DiagramKind>().unwrap(), DiagramKind::C4);
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = "gantt".parse::<DiagramKind>().unwrap_err();
        assert!(matches!(err, RepogramError::InvalidInput(_)));
    }

    #[test]
    fn headers_per_kind() {
        assert_eq!(DiagramKind::Flowchart.header(), "flowchart TD");
        assert_eq!(DiagramKind::C4.header(), "flowchart TD");
        assert_eq!(DiagramKind::Class.header(), "classDiagram");
        assert_eq!(DiagramKind::State.header(), "stateDiagram-v2");
    }

    #[test]
    fn serde_roundtrip_uses_lowercase_tokens() {
        let json = serde_json::to_string(&DiagramKind::C4).expect("serialize");
        assert_eq!(json, "\"c4\"");
        let kind: DiagramKind = serde_json::from_str("\"state\"").expect("deserialize");
        assert_eq!(kind, DiagramKind::State);
    }

    #[test]
    fn default_is_flowchart() {
        assert_eq!(DiagramKind::default(), DiagramKind::Flowchart);
    }
}
