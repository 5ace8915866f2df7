use uuid::Uuid;

/// Why an upload was refused before reaching storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadRejection {
    #[error("File is empty")]
    Empty,

    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("File is {size} bytes, the limit is {max}")]
    TooLarge { size: u64, max: u64 },
}

#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_file_size_bytes: u64,
    pub allowed_mime_types: &'static [(&'static str, &'static str)],
}

impl UploadPolicy {
    pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

    /// `(mime type, file extension)` pairs accepted by default.
    pub const DEFAULT_ALLOWED_MIME_TYPES: &'static [(&'static str, &'static str)] = &[
        ("image/jpeg", "jpg"),
        ("image/png", "png"),
        ("image/webp", "webp"),
        ("image/gif", "gif"),
        ("image/svg+xml", "svg"),
    ];

    pub fn new(max_file_size_bytes: u64) -> Self {
        Self {
            max_file_size_bytes,
            allowed_mime_types: Self::DEFAULT_ALLOWED_MIME_TYPES,
        }
    }

    /// Extension for an accepted mime type. Parameters such as `; charset=` are ignored.
    pub fn extension_for(&self, content_type: &str) -> Option<&'static str> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        self.allowed_mime_types
            .iter()
            .find(|(mime, _)| *mime == essence)
            .map(|(_, ext)| *ext)
    }

    pub fn check_size(&self, size: u64) -> Result<(), UploadRejection> {
        if size == 0 {
            return Err(UploadRejection::Empty);
        }
        if size > self.max_file_size_bytes {
            return Err(UploadRejection::TooLarge {
                size,
                max: self.max_file_size_bytes,
            });
        }
        Ok(())
    }

    /// Validates type and size, returning the file extension to store under.
    pub fn validate(&self, content_type: &str, size: u64) -> Result<&'static str, UploadRejection> {
        let ext = self
            .extension_for(content_type)
            .ok_or_else(|| UploadRejection::UnsupportedType(content_type.to_string()))?;
        self.check_size(size)?;
        Ok(ext)
    }

    /// Fresh object name, `uploads/<uuid>.<ext>`.
    pub fn object_name(ext: &str) -> String {
        format!("uploads/{}.{}", Uuid::new_v4(), ext)
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_FILE_SIZE_BYTES)
    }
}
