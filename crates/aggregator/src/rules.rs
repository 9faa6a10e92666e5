use crate::text::BlockMarkers;

/// One of the composed outputs served per namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Json,
    Script,
    Stylesheet,
    Template,
}

/// How fragments of one artifact are composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composition {
    /// Parse each fragment as JSON and merge into one object.
    Merge,
    /// Concatenate raw content wrapped in markers.
    Concat(BlockMarkers),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuffixRule {
    pub suffix: &'static str,
    pub composition: Composition,
}

const JSON_RULE: SuffixRule = SuffixRule {
    suffix: ".json",
    composition: Composition::Merge,
};

const SCRIPT_RULE: SuffixRule = SuffixRule {
    suffix: ".js",
    composition: Composition::Concat(BlockMarkers::new("/* {key}.js */", "/* {key}.js */")),
};

const STYLESHEET_RULE: SuffixRule = SuffixRule {
    suffix: ".css",
    composition: Composition::Concat(BlockMarkers::new("/* {key}.css */", "/* {key}.css */")),
};

const TEMPLATE_RULE: SuffixRule = SuffixRule {
    suffix: ".ract",
    composition: Composition::Concat(BlockMarkers::new(
        "<!-- {{>{key}}} -->",
        "<!-- {{/{key}}} -->",
    )),
};

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::Json,
        ArtifactKind::Script,
        ArtifactKind::Stylesheet,
        ArtifactKind::Template,
    ];

    pub fn rule(self) -> &'static SuffixRule {
        match self {
            Self::Json => &JSON_RULE,
            Self::Script => &SCRIPT_RULE,
            Self::Stylesheet => &STYLESHEET_RULE,
            Self::Template => &TEMPLATE_RULE,
        }
    }

    /// File name under `/apps/{app}/` that serves this artifact.
    pub fn route_file(self) -> &'static str {
        match self {
            Self::Json => "data.json",
            Self::Script => "data.js",
            Self::Stylesheet => "data.css",
            Self::Template => "data.ract",
        }
    }

    pub fn from_route_file(file: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.route_file() == file)
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Script => "application/javascript; charset=utf-8",
            Self::Stylesheet => "text/css; charset=utf-8",
            Self::Template => "text/html; charset=utf-8",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Script => "script",
            Self::Stylesheet => "stylesheet",
            Self::Template => "template",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
