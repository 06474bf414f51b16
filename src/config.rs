use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::{Result, SeatingError};

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_EXPORT_DIR: &str = "data";

/// Configuración leída del entorno (y de `.env` si existe).
///
/// - `SEATPLAN_BIND`: dirección de la API HTTP
/// - `SEATPLAN_SEED`: semilla u64 opcional para barajar los grupos
/// - `SEATPLAN_EXPORT_DIR`: directorio donde la API escribe las exportaciones
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind: String,
    pub seed: Option<u64>,
    pub export_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig { bind: DEFAULT_BIND.to_string(), seed: None, export_dir: PathBuf::from(DEFAULT_EXPORT_DIR) }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// Construye desde una función de búsqueda de claves (los tests pasan un mapa).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = AppConfig::default();
        if let Some(b) = lookup("SEATPLAN_BIND").filter(|s| !s.trim().is_empty()) {
            cfg.bind = b.trim().to_string();
        }
        if let Some(raw) = lookup("SEATPLAN_SEED") {
            match raw.trim().parse::<u64>() {
                Ok(seed) => cfg.seed = Some(seed),
                Err(_) => tracing::warn!(value = %raw, "ignoring non-numeric SEATPLAN_SEED"),
            }
        }
        if let Some(dir) = lookup("SEATPLAN_EXPORT_DIR").filter(|s| !s.trim().is_empty()) {
            cfg.export_dir = PathBuf::from(dir.trim());
        }
        cfg
    }

    /// Ruta final de una exportación pedida por la API, siempre bajo `export_dir`.
    /// Rechaza rutas absolutas, vacías o con `..`.
    pub fn resolve_export_path(&self, requested: &str) -> Result<PathBuf> {
        let p = Path::new(requested.trim());
        let only_plain_parts = p.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if requested.trim().is_empty() || p.has_root() || !only_plain_parts {
            return Err(SeatingError::InvalidExportPath(requested.to_string()));
        }
        Ok(self.export_dir.join(p))
    }
}
