use serde::{Deserialize, Serialize};

/// Embedding spaces stored on every object of the collection. Column order
/// everywhere follows `TargetVector::ALL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetVector {
    MetaClip2,
    ModernVbert,
    VitB32Laion5b,
    SigLip2,
}

impl TargetVector {
    pub const ALL: [TargetVector; 4] = [
        TargetVector::MetaClip2,
        TargetVector::ModernVbert,
        TargetVector::VitB32Laion5b,
        TargetVector::SigLip2,
    ];

    /// Name of the named vector inside the Weaviate collection.
    pub fn vector_name(self) -> &'static str {
        match self {
            TargetVector::MetaClip2 => "metaclip2",
            TargetVector::ModernVbert => "modernvbert",
            TargetVector::VitB32Laion5b => "vitb32laion5b",
            TargetVector::SigLip2 => "siglip2",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TargetVector::MetaClip2 => "MetaCLIP2",
            TargetVector::ModernVbert => "ModernVBERT",
            TargetVector::VitB32Laion5b => "ViT-B/32 LAION-5B",
            TargetVector::SigLip2 => "SigLIP2",
        }
    }

    pub fn position(self) -> usize {
        match self {
            TargetVector::MetaClip2 => 0,
            TargetVector::ModernVbert => 1,
            TargetVector::VitB32Laion5b => 2,
            TargetVector::SigLip2 => 3,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ImageResult {
    pub id: String,
    pub index: i64,
    pub base64_image: String,
    pub dataset_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

/// One column per target vector. A failed column is empty, never missing.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SearchResults {
    columns: [Vec<ImageResult>; 4],
}

impl SearchResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(&self, target: TargetVector) -> &[ImageResult] {
        &self.columns[target.position()]
    }

    pub fn set_column(&mut self, target: TargetVector, images: Vec<ImageResult>) {
        self.columns[target.position()] = images;
    }

    pub fn columns(&self) -> impl Iterator<Item = (TargetVector, &[ImageResult])> {
        TargetVector::ALL
            .into_iter()
            .map(move |target| (target, self.column(target)))
    }

    pub fn column_lengths(&self) -> [usize; 4] {
        TargetVector::ALL.map(|target| self.column(target).len())
    }

    pub fn total(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn find(&self, id: &str) -> Option<&ImageResult> {
        self.columns.iter().flatten().find(|image| image.id == id)
    }
}

/// The query that produced the current results, replayed by "show more".
#[derive(Debug, Clone, PartialEq)]
pub enum LastSearch {
    Text(String),
    Image(Vec<u8>),
    SimilarTo(String),
}

impl LastSearch {
    pub fn kind(&self) -> QueryKind {
        match self {
            LastSearch::Text(_) => QueryKind::Text,
            LastSearch::Image(_) => QueryKind::Image,
            LastSearch::SimilarTo(_) => QueryKind::Similar,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Text,
    Image,
    Similar,
    FetchByIndex,
}

impl QueryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            QueryKind::Text => "text",
            QueryKind::Image => "image",
            QueryKind::Similar => "similar",
            QueryKind::FetchByIndex => "fetch-by-index",
        }
    }
}

impl std::fmt::Display for QueryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which input affordance is shown. Changing it never triggers a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    Text,
    Image,
    #[default]
    Similar,
}

impl SearchMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "text" => Some(SearchMode::Text),
            "image" => Some(SearchMode::Image),
            "similar" => Some(SearchMode::Similar),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected,
}

/// Read-only view of the orchestrator handed to the renderer.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub phase: Phase,
    pub mode: SearchMode,
    pub connection: ConnectionState,
    pub results: Option<SearchResults>,
    pub error: Option<String>,
    pub page_size: usize,
    pub has_last_search: bool,
    pub predefined: Vec<ImageResult>,
}
