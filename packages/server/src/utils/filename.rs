/// Result of validating an object key for upload.
#[derive(Debug)]
pub enum KeyError {
    /// Key is empty or whitespace-only.
    Empty,
    /// Key contains path separators (`/` or `\`).
    ContainsPathSeparator,
    /// Key is exactly `..`.
    PathTraversal,
    /// Key contains null bytes.
    NullByte,
    /// Key starts with a dot (hidden object).
    Hidden,
    /// Key contains control characters (CR, LF, etc.).
    ControlCharacter,
    /// Key is longer than 255 characters.
    TooLong,
}

impl KeyError {
    /// Returns a human-readable error message.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "Object key cannot be empty",
            Self::ContainsPathSeparator => "Invalid object key: path separators are not allowed",
            Self::PathTraversal => "Invalid object key: '..' is not allowed",
            Self::NullByte => "Invalid object key: null bytes are not allowed",
            Self::Hidden => "Invalid object key: keys starting with '.' are not allowed",
            Self::ControlCharacter => "Invalid object key: control characters are not allowed",
            Self::TooLong => "Invalid object key: maximum length is 255 characters",
        }
    }
}

/// Validates a flat object key (no directory components allowed).
///
/// Uploaded assets live in a single bucket namespace; a key that smuggles
/// separators or traversal would break the public-URL scheme.
pub fn validate_object_key(key: &str) -> Result<&str, KeyError> {
    let trimmed = key.trim();

    if trimmed.is_empty() {
        return Err(KeyError::Empty);
    }

    if trimmed.len() > 255 {
        return Err(KeyError::TooLong);
    }

    if trimmed.contains('\0') {
        return Err(KeyError::NullByte);
    }

    // Reject ASCII control characters to keep the key safe inside URLs
    // and response headers.
    if trimmed.chars().any(|c| c.is_ascii_control()) {
        return Err(KeyError::ControlCharacter);
    }

    if trimmed.contains('/') || trimmed.contains('\\') {
        return Err(KeyError::ContainsPathSeparator);
    }

    if trimmed == ".." {
        return Err(KeyError::PathTraversal);
    }

    if trimmed.starts_with('.') {
        return Err(KeyError::Hidden);
    }

    Ok(trimmed)
}
