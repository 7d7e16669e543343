use fittrack_supabase::SupabaseConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the hosted backend credentials have defaults suitable
/// for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Externally visible base URL, used to build the OAuth callback URL.
    pub public_url: String,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Whether the session cookie carries the `Secure` attribute.
    pub secure_cookies: bool,
    /// Minutes without a request after which a session expires (default: `60`).
    pub session_idle_minutes: i64,
    /// OAuth providers offered on the login screen.
    pub oauth_providers: Vec<String>,
    /// Identity provider and data store connection settings.
    pub supabase: SupabaseConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                  |
    /// |------------------------|--------------------------|
    /// | `HOST`                 | `0.0.0.0`                |
    /// | `PORT`                 | `3000`                   |
    /// | `PUBLIC_URL`           | `http://localhost:3000`  |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                     |
    /// | `SECURE_COOKIES`       | `false`                  |
    /// | `SESSION_IDLE_MINUTES` | `60`                     |
    /// | `OAUTH_PROVIDERS`      | `google`                 |
    ///
    /// `SUPABASE_URL` and `SUPABASE_ANON_KEY` are required, see
    /// [`SupabaseConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let public_url = std::env::var("PUBLIC_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .trim_end_matches('/')
            .to_string();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let secure_cookies: bool = std::env::var("SECURE_COOKIES")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("SECURE_COOKIES must be true or false");

        let session_idle_minutes: i64 = std::env::var("SESSION_IDLE_MINUTES")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("SESSION_IDLE_MINUTES must be a valid i64");
        assert!(
            session_idle_minutes > 0,
            "SESSION_IDLE_MINUTES must be positive"
        );

        let oauth_providers: Vec<String> = std::env::var("OAUTH_PROVIDERS")
            .unwrap_or_else(|_| "google".into())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        assert!(
            !oauth_providers.is_empty(),
            "OAUTH_PROVIDERS must name at least one provider"
        );

        let supabase = SupabaseConfig::from_env();

        Self {
            host,
            port,
            public_url,
            request_timeout_secs,
            secure_cookies,
            session_idle_minutes,
            oauth_providers,
            supabase,
        }
    }

    /// Where the identity provider sends the browser after sign-in.
    pub fn callback_url(&self) -> String {
        format!("{}/auth/callback", self.public_url)
    }
}
