use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use crate::ledger::SLOT_COUNT;

/// Highest unit price for which the value of every slot together still
/// fits in a `u64`.
pub const MAX_UNIT_PRICE: u64 = u64::MAX / SLOT_COUNT as u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    File,
    Redis,
    /// Nothing survives a restart.
    Memory,
}

/// Details printed in customer messages.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RaffleInfo {
    pub manager_name: String,
    pub manager_phone: String,
    pub manager_nequi: String,
    pub draw_date: String,
    pub plays_with: String,
    pub prize: String,
}

#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_port: u16,
    pub store_backend: StoreBackend,
    pub data_dir: PathBuf,
    pub redis_url: String,
    pub unit_price: u64,
    pub admin: AdminCredentials,
    pub raffle: RaffleInfo,
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.into())
}

fn parse_store_backend(raw: &str) -> Result<StoreBackend> {
    match raw {
        "file" => Ok(StoreBackend::File),
        "redis" => Ok(StoreBackend::Redis),
        "memory" => Ok(StoreBackend::Memory),
        other => bail!("STORE_BACKEND must be `file`, `redis` or `memory`, got `{other}`"),
    }
}

fn parse_unit_price(raw: &str) -> Result<u64> {
    let price: u64 = raw.parse().context("UNIT_PRICE must be u64")?;
    if price > MAX_UNIT_PRICE {
        bail!("UNIT_PRICE must be at most {MAX_UNIT_PRICE}, got {price}");
    }
    Ok(price)
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let store_backend = parse_store_backend(&var_or("STORE_BACKEND", "file"))?;
        Ok(Self {
            api_port: var_or("API_PORT", "8080")
                .parse()
                .context("API_PORT must be u16")?,
            store_backend,
            data_dir: var_or("DATA_DIR", "./data").into(),
            redis_url: var_or("REDIS_URL", "redis://localhost:6379"),
            unit_price: parse_unit_price(&var_or("UNIT_PRICE", "5000"))?,
            admin: AdminCredentials {
                email: var_or("ADMIN_EMAIL", "admin@rifa.local"),
                password: std::env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD must be set")?,
                name: var_or("ADMIN_NAME", "Administrador"),
            },
            raffle: RaffleInfo {
                manager_name: var_or("MANAGER_NAME", "María Gómez"),
                manager_phone: var_or("MANAGER_PHONE", ""),
                manager_nequi: var_or("MANAGER_NEQUI", ""),
                draw_date: var_or("DRAW_DATE", "22 de agosto de 2024"),
                plays_with: var_or(
                    "PLAYS_WITH",
                    "las 2 últimas cifras de la Lotería de Santander",
                ),
                prize: var_or("PRIZE", "Cafetera"),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_price_bound() {
        assert_eq!(parse_unit_price("5000").unwrap(), 5000);
        assert_eq!(parse_unit_price(&MAX_UNIT_PRICE.to_string()).unwrap(), MAX_UNIT_PRICE);
        assert!(parse_unit_price(&(MAX_UNIT_PRICE + 1).to_string()).is_err());
        assert!(parse_unit_price("200000000000000000").is_err());
        assert!(parse_unit_price("-1").is_err());
    }

    #[test]
    fn test_store_backend_names() {
        assert_eq!(parse_store_backend("file").unwrap(), StoreBackend::File);
        assert_eq!(parse_store_backend("redis").unwrap(), StoreBackend::Redis);
        assert_eq!(parse_store_backend("memory").unwrap(), StoreBackend::Memory);
        assert!(parse_store_backend("postgres").is_err());
    }
}
