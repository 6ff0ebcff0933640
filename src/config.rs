use std::env;
use std::fmt;

/// Which answer design is active. Exactly one engine runs per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerEngineKind {
    /// Template-based answers fabricated locally, no document access
    Simulated,
    /// Answers delegated to an external chat-completions API over extracted
    /// document text
    Llm,
}

impl AnswerEngineKind {
    fn parse(value: &str) -> Result<Self, String> {
        match value.to_ascii_lowercase().as_str() {
            "simulated" => Ok(Self::Simulated),
            "llm" => Ok(Self::Llm),
            other => Err(format!(
                "Invalid ANSWER_ENGINE '{other}' (expected 'simulated' or 'llm')"
            )),
        }
    }
}

impl fmt::Display for AnswerEngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simulated => write!(f, "simulated"),
            Self::Llm => write!(f, "llm"),
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_path: String,
    pub upload_dir: String,
    pub static_dir: String,
    pub allowed_origins: Vec<String>,
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
    pub answer_engine: AnswerEngineKind,
    pub llm_api_key: Option<String>,
    pub llm_api_base_url: String,
    pub llm_model: String,
    pub llm_max_tokens: u32,
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .map_err(|_| "Invalid SERVER_PORT")?;

        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "./data/studymate.db".to_string());

        let upload_dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "./uploads".to_string());

        let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| "./static".to_string());

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| "JWT_SECRET must be set for token signing")?;

        let token_ttl_secs = env::var("TOKEN_TTL_SECS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()
            .map_err(|_| "Invalid TOKEN_TTL_SECS")?;

        let answer_engine = AnswerEngineKind::parse(
            &env::var("ANSWER_ENGINE").unwrap_or_else(|_| "simulated".to_string()),
        )?;

        let llm_api_key = env::var("OPENAI_API_KEY").ok();
        if answer_engine == AnswerEngineKind::Llm && llm_api_key.is_none() {
            return Err("OPENAI_API_KEY must be set when ANSWER_ENGINE=llm".to_string());
        }

        let llm_api_base_url = env::var("LLM_API_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

        let llm_model = env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string());

        let llm_max_tokens = env::var("LLM_MAX_TOKENS")
            .unwrap_or_else(|_| "512".to_string())
            .parse()
            .map_err(|_| "Invalid LLM_MAX_TOKENS")?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            server_host,
            server_port,
            database_path,
            upload_dir,
            static_dir,
            allowed_origins,
            jwt_secret,
            token_ttl_secs,
            answer_engine,
            llm_api_key,
            llm_api_base_url,
            llm_model,
            llm_max_tokens,
            environment,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
