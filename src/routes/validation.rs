use chrono::Utc;
use chrono_tz::Asia::Kolkata;

use crate::constants::{
    ERR_UNSUPPORTED_FILE, IST_TIME_FORMAT, MAX_UPLOAD_SIZE_BYTES, PDF_EXTENSION, PDF_MAGIC,
};
use crate::error::AppError;

/// Current wall-clock time in IST, formatted for catalog records and
/// simulated answers
pub fn ist_timestamp() -> String {
    Utc::now()
        .with_timezone(&Kolkata)
        .format(IST_TIME_FORMAT)
        .to_string()
}

/// Case-insensitive `.pdf` suffix check on the client-supplied filename
pub fn has_pdf_extension(filename: &str) -> bool {
    filename.to_ascii_lowercase().ends_with(PDF_EXTENSION)
}

/// Validate one uploaded file against the acceptance rules
///
/// All three checks run against what was actually received: the `.pdf` name
/// suffix, the length of the bytes read from the stream (never the declared
/// Content-Length), and the `%PDF` signature at the start of the content.
/// Every rejection uses the same client-facing message.
pub fn validate_pdf_upload(filename: &str, bytes: &[u8]) -> Result<(), AppError> {
    if !has_pdf_extension(filename) {
        tracing::warn!("Rejected upload '{}': not a .pdf filename", filename);
        return Err(AppError::InvalidInput(ERR_UNSUPPORTED_FILE.to_string()));
    }

    if bytes.len() > MAX_UPLOAD_SIZE_BYTES {
        tracing::warn!(
            "Rejected upload '{}': {} bytes exceeds limit of {}",
            filename,
            bytes.len(),
            MAX_UPLOAD_SIZE_BYTES
        );
        return Err(AppError::InvalidInput(ERR_UNSUPPORTED_FILE.to_string()));
    }

    if !bytes.starts_with(PDF_MAGIC) {
        tracing::warn!("Rejected upload '{}': missing %PDF signature", filename);
        return Err(AppError::InvalidInput(ERR_UNSUPPORTED_FILE.to_string()));
    }

    Ok(())
}
