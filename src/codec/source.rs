use std::path::PathBuf;

use crate::codec::data_uri::parse_data_uri;
use crate::error::DecodeError;

/// Where an input image comes from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// A file on disk
    Path(PathBuf),
    /// Bytes already in memory, e.g. an upload
    Bytes { name: String, data: Vec<u8> },
    /// A `data:<mime>;base64,...` string handed over by a browser
    DataUri { name: String, uri: String },
}

impl ImageSource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn bytes(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self::Bytes {
            name: name.into(),
            data,
        }
    }

    pub fn data_uri(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self::DataUri {
            name: name.into(),
            uri: uri.into(),
        }
    }

    /// Display name of the input, the file name for paths.
    pub fn name(&self) -> String {
        match self {
            Self::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            Self::Bytes { name, .. } | Self::DataUri { name, .. } => name.clone(),
        }
    }

    /// Fetch the encoded bytes.
    pub async fn read(&self) -> Result<Vec<u8>, DecodeError> {
        match self {
            Self::Path(path) => Ok(tokio::fs::read(path).await?),
            Self::Bytes { data, .. } => Ok(data.clone()),
            Self::DataUri { uri, .. } => parse_data_uri(uri).map(|(_, bytes)| bytes),
        }
    }
}
