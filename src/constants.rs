/// Maximum accepted size of a single uploaded PDF in bytes (10MB)
/// Checked against the bytes actually read, never the declared Content-Length
pub const MAX_UPLOAD_SIZE_BYTES: usize = 10_485_760;

/// Maximum size of a whole multipart request body in bytes (64MB)
/// Leaves room for a batch of several maximum-size files plus framing
pub const MAX_REQUEST_BODY_BYTES: usize = 67_108_864;

/// Magic bytes every accepted upload must start with
pub const PDF_MAGIC: &[u8] = b"%PDF";

/// Required filename suffix for uploads (matched case-insensitively)
pub const PDF_EXTENSION: &str = ".pdf";

/// Timestamp format used for catalog records and simulated answers
pub const IST_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timeout for one round trip to the upstream answer API
pub const LLM_REQUEST_TIMEOUT_SECS: u64 = 60;

/// System role sent with every upstream completion request
pub const LLM_SYSTEM_PROMPT: &str =
    "You are a helpful study assistant. Answer the question using only the provided document text.";

// =============================================================================
// Error Messages
// =============================================================================

/// Error message when a signup field is missing or empty
pub const ERR_FIELDS_REQUIRED: &str = "All fields are required";

/// Error message for signup with a taken username or email
pub const ERR_DUPLICATE_USER: &str = "Username or email already exists";

/// Error message for failed logins (deliberately does not say which part was wrong)
pub const ERR_INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Error message when an upload request carries no file field
pub const ERR_NO_FILE_PART: &str = "No file part";

/// Error message for any rejected upload (wrong extension, too large, or bad magic)
pub const ERR_UNSUPPORTED_FILE: &str = "Only PDFs up to 10MB are supported";

/// Error message when the ask endpoint receives no question
pub const ERR_QUESTION_REQUIRED: &str = "Question is required";

/// Error message when the delegated engine is asked without a document reference
pub const ERR_FILENAME_REQUIRED: &str = "Filename is required";

// =============================================================================
// Client Redirect Hints
// =============================================================================

/// Page the client should show after a successful signup
pub const REDIRECT_AFTER_SIGNUP: &str = "index.html";

/// Page the client should show after a successful login
pub const REDIRECT_AFTER_LOGIN: &str = "studymate.html";

/// Page the client should show after logout
pub const REDIRECT_AFTER_LOGOUT: &str = "index.html";
