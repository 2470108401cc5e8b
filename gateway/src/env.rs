use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Env {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

fn default_bind_address() -> String {
    "127.0.0.1:9001".to_owned()
}

/// Access to parsed environment variables.
pub static ENV: Lazy<Env> = Lazy::new(|| envy::from_env().expect("some env vars missing"));
