use std::fmt;

#[derive(Debug)]
pub enum InspectorError {
    /// XML hierarchy dump is not well-formed
    DumpParse { source: quick_xml::Error },

    /// Dump parsed but does not describe a single element tree
    DumpStructure(String),

    /// JSON parsing failed (hierarchy dump or config)
    JsonParse { context: String, source: serde_json::Error },

    /// Reading a dump file failed
    Io { path: String, source: std::io::Error },

    /// Node index outside the current tree
    UnknownNode(String),
}

impl fmt::Display for InspectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InspectorError::DumpParse { source } => {
                write!(f, "Hierarchy dump is not well-formed XML: {}", source)
            }
            InspectorError::DumpStructure(msg) => {
                write!(f, "Unexpected hierarchy structure: {}", msg)
            }
            InspectorError::JsonParse { context, source } => {
                write!(f, "JSON parse error ({}): {}", context, source)
            }
            InspectorError::Io { path, source } => {
                write!(f, "Failed to read '{}': {}", path, source)
            }
            InspectorError::UnknownNode(msg) => {
                write!(f, "Unknown node: {}", msg)
            }
        }
    }
}

impl std::error::Error for InspectorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InspectorError::DumpParse { source } => Some(source),
            InspectorError::JsonParse { source, .. } => Some(source),
            InspectorError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
