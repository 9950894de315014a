//! CSV file handles and the three-slot upload set used by the batch workflow.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

/// Errors raised while turning a picked path into a [`CsvFile`].
#[derive(Debug, thiserror::Error)]
pub enum CsvFileError {
    /// The file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The path has no usable file name component.
    #[error("Not a file: {0}")]
    NoFileName(PathBuf),
}

/// An in-memory CSV file, the native equivalent of a browser `File` handle.
///
/// Contents are shared, so cloning a handle into a background job is cheap.
#[derive(Clone, PartialEq, Eq)]
pub struct CsvFile {
    file_name: String,
    bytes: Arc<[u8]>,
}

impl CsvFile {
    /// Wrap already-loaded bytes under the given display name.
    pub fn from_bytes(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: Arc::from(bytes.into()),
        }
    }

    /// Read a file from disk.
    pub fn open(path: &Path) -> Result<Self, CsvFileError> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| CsvFileError::NoFileName(path.to_path_buf()))?
            .to_string();
        let bytes = std::fs::read(path).map_err(|source| CsvFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_bytes(file_name, bytes))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for CsvFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsvFile")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// One of the three inputs of the batch workflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UploadSlot {
    /// Labelled source-domain data.
    Source,
    /// Target-domain data.
    Target,
    /// Single-row CSV naming the useful columns.
    Columns,
}

impl UploadSlot {
    /// All slots in display order.
    pub const ALL: [UploadSlot; 3] = [Self::Source, Self::Target, Self::Columns];

    /// Multipart field name expected by `/process-data`.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Source => "source_file",
            Self::Target => "target_file",
            Self::Columns => "columns_file",
        }
    }

    /// Human-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Source => "Source Data",
            Self::Target => "Target Data",
            Self::Columns => "Useful Columns",
        }
    }
}

/// The three batch inputs, each optional until picked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadSet {
    source: Option<CsvFile>,
    target: Option<CsvFile>,
    columns: Option<CsvFile>,
}

impl UploadSet {
    pub fn get(&self, slot: UploadSlot) -> Option<&CsvFile> {
        self.slot_ref(slot).as_ref()
    }

    pub fn set(&mut self, slot: UploadSlot, file: CsvFile) {
        *self.slot_mut(slot) = Some(file);
    }

    pub fn clear(&mut self, slot: UploadSlot) {
        *self.slot_mut(slot) = None;
    }

    /// Slots that still need a file.
    pub fn missing(&self) -> Vec<UploadSlot> {
        UploadSlot::ALL
            .into_iter()
            .filter(|slot| self.get(*slot).is_none())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.source.is_some() && self.target.is_some() && self.columns.is_some()
    }

    /// Snapshot the set when all three files are present.
    pub fn complete(&self) -> Option<CompleteUploads> {
        Some(CompleteUploads {
            source: self.source.clone()?,
            target: self.target.clone()?,
            columns: self.columns.clone()?,
        })
    }

    fn slot_ref(&self, slot: UploadSlot) -> &Option<CsvFile> {
        match slot {
            UploadSlot::Source => &self.source,
            UploadSlot::Target => &self.target,
            UploadSlot::Columns => &self.columns,
        }
    }

    fn slot_mut(&mut self, slot: UploadSlot) -> &mut Option<CsvFile> {
        match slot {
            UploadSlot::Source => &mut self.source,
            UploadSlot::Target => &mut self.target,
            UploadSlot::Columns => &mut self.columns,
        }
    }
}

/// A fully populated upload set, ready to be sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompleteUploads {
    pub source: CsvFile,
    pub target: CsvFile,
    pub columns: CsvFile,
}

impl CompleteUploads {
    /// Files paired with their multipart field names, in request order.
    pub fn parts(&self) -> [(UploadSlot, &CsvFile); 3] {
        [
            (UploadSlot::Source, &self.source),
            (UploadSlot::Target, &self.target),
            (UploadSlot::Columns, &self.columns),
        ]
    }
}
