use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    /// Service-role connection string. The form inserts run as a trusted
    /// backend job, so this connection must bypass row level security.
    pub database_url: String,
    pub bind_addr: String,
    pub resend_api_key: Option<String>,
    pub green_api_id_instance: Option<String>,
    pub green_api_token: Option<String>,
    pub admin_whatsapp_number: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").map_err(|_| {
            let found: Vec<String> = env::vars()
                .map(|(k, _)| k)
                .filter(|k| k.contains("DATABASE") || k.contains("SUPABASE"))
                .collect();
            anyhow::anyhow!(
                "DATABASE_URL is required: a service-role Postgres connection string that bypasses row level security. Related env vars found: {}",
                if found.is_empty() { "none".to_string() } else { found.join(", ") }
            )
        })?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

        Ok(Self {
            database_url,
            bind_addr,
            resend_api_key: non_empty_var("RESEND_API_KEY"),
            green_api_id_instance: non_empty_var("GREEN_API_ID_INSTANCE"),
            green_api_token: non_empty_var("GREEN_API_API_TOKEN"),
            admin_whatsapp_number: non_empty_var("ADMIN_WHATSAPP_NUMBER"),
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
