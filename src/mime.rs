//! Content-type inference from a key's file extension.
//!
//! Reads never consult the content type declared at write time. The type
//! served on `GET` is derived from the path alone.

/// The content types a read can be served with.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ContentType {
    Json,        // application/json
    OctetStream, // application/octet-stream
    Pdf,         // application/pdf
    Text,        // text/plain
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json        => "application/json",
            Self::OctetStream => "application/octet-stream",
            Self::Pdf         => "application/pdf",
            Self::Text        => "text/plain",
        }
    }

    /// Maps a lower-cased extension to a content type.
    pub fn from_extension(extension: &str) -> Self {
        match extension {
            "json" => Self::Json,
            "pdf"  => Self::Pdf,
            "txt"  => Self::Text,
            _      => Self::OctetStream,
        }
    }

    /// Infers the content type of a stored object from its key.
    pub fn for_path(path: &str) -> Self {
        Self::from_extension(&extension(path))
    }
}

/// Everything after the last `.` in `path`, lower-cased. Empty when the path
/// has no `.`.
///
/// The dot is not required to sit in the final segment, so `/v1.2/file`
/// yields `2/file`, which maps to no known type.
pub fn extension(path: &str) -> String {
    path.rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}
