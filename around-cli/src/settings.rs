use anyhow::{Context, Result, anyhow};

const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";
const DEFAULT_TOKEN_FILE: &str = ".around_token";

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub auth_url: String,
    pub token_file: String,
    pub log_level: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let api_url = normalize_server(
            std::env::var("AROUND_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        );
        // сервис авторизации по умолчанию живёт там же, где API
        let auth_url = std::env::var("AROUND_AUTH_URL")
            .map(normalize_server)
            .unwrap_or_else(|_| api_url.clone());
        let token_file =
            std::env::var("AROUND_TOKEN_FILE").unwrap_or_else(|_| DEFAULT_TOKEN_FILE.to_string());
        if token_file.trim().is_empty() {
            return Err(anyhow!("AROUND_TOKEN_FILE must not be empty"));
        }
        let log_level = std::env::var("LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "warn".to_string());
        let connect_timeout_secs = parse_u64_env("AROUND_CONNECT_TIMEOUT_SECS", 5)?;
        let request_timeout_secs = parse_u64_env("AROUND_REQUEST_TIMEOUT_SECS", 15)?;

        Ok(Self {
            api_url,
            auth_url,
            token_file,
            log_level,
            connect_timeout_secs,
            request_timeout_secs,
        })
    }

    /// Флаги командной строки важнее переменных окружения.
    pub fn with_overrides(mut self, api: Option<String>, auth: Option<String>) -> Self {
        if let Some(api) = api {
            self.api_url = normalize_server(api);
        }
        if let Some(auth) = auth {
            self.auth_url = normalize_server(auth);
        }
        self
    }
}

pub fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn parse_u64_env(key: &str, default: u64) -> Result<u64> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<u64>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Settings {
        Settings {
            api_url: DEFAULT_API_URL.to_string(),
            auth_url: DEFAULT_API_URL.to_string(),
            token_file: DEFAULT_TOKEN_FILE.to_string(),
            log_level: "warn".to_string(),
            connect_timeout_secs: 5,
            request_timeout_secs: 15,
        }
    }

    #[test]
    fn normalize_server_keeps_scheme() {
        let s = normalize_server("https://around.example.com/v1".to_string());
        assert_eq!(s, "https://around.example.com/v1");
    }

    #[test]
    fn normalize_server_adds_http_scheme() {
        let s = normalize_server("127.0.0.1:3000".to_string());
        assert_eq!(s, "http://127.0.0.1:3000");
    }

    #[test]
    fn overrides_replace_urls_independently() {
        let settings = sample().with_overrides(None, Some("auth.local:4000".to_string()));
        assert_eq!(settings.api_url, DEFAULT_API_URL);
        assert_eq!(settings.auth_url, "http://auth.local:4000");

        let settings = sample().with_overrides(Some("https://api.example.com".to_string()), None);
        assert_eq!(settings.api_url, "https://api.example.com");
        assert_eq!(settings.auth_url, DEFAULT_API_URL);
    }
}
