use std::env;

/// Email delivery settings. Absent when the email channel is not configured.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub api_url: String,
    pub api_key: String,
    pub from_address: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub sweep_interval_secs: u64,
    pub renotify_cooldown_secs: i64,
    pub email: Option<EmailConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenv::dotenv().ok();

        let database_url = env::var("DATABASE_URL")?;

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()?;

        let sweep_interval_secs = env::var("SWEEP_INTERVAL_SECS")
            .unwrap_or_else(|_| "300".to_string())
            .parse()?;

        // 0 disables the re-notify window entirely.
        let renotify_cooldown_secs: i64 = env::var("RENOTIFY_COOLDOWN_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()?;

        if renotify_cooldown_secs < 0 {
            return Err("RENOTIFY_COOLDOWN_SECS cannot be negative".into());
        }

        // Only configure the email channel when an API URL is set
        let email = match env::var("EMAIL_API_URL") {
            Ok(api_url) => {
                let api_key = env::var("EMAIL_API_KEY")
                    .map_err(|_| "EMAIL_API_KEY is required when EMAIL_API_URL is set")?;
                let from_address = env::var("EMAIL_FROM")
                    .unwrap_or_else(|_| "no-reply@washhub.app".to_string());

                Some(EmailConfig {
                    api_url,
                    api_key,
                    from_address,
                })
            }
            Err(_) => None,
        };

        Ok(Config {
            database_url,
            server_host,
            server_port,
            sweep_interval_secs,
            renotify_cooldown_secs,
            email,
        })
    }
}
