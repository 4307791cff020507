use serde::{Deserialize, Serialize};

/// Default checkpoint proximity radius in meters, overridable per call and
/// via `TRILHA_PROXIMITY_RADIUS_METERS`.
pub const DEFAULT_PROXIMITY_RADIUS_METERS: f64 = 50.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub validation: ValidationConfig,
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Default checkpoint proximity radius in meters, overridable per call.
    pub proximity_radius_meters: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Interval for on-demand connectivity probes issued by the app shell.
    pub connectivity_probe_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "sqlite:data/trilha.db".to_string(),
                max_connections: 5,
            },
            validation: ValidationConfig {
                proximity_radius_meters: DEFAULT_PROXIMITY_RADIUS_METERS,
            },
            sync: SyncConfig {
                connectivity_probe_secs: 30,
            },
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("TRILHA_DATABASE_URL") {
            if !v.trim().is_empty() {
                cfg.database.url = v;
            }
        }
        if let Ok(v) = std::env::var("TRILHA_DB_MAX_CONNECTIONS") {
            if let Ok(value) = v.parse::<u32>() {
                cfg.database.max_connections = value;
            }
        }
        if let Ok(v) = std::env::var("TRILHA_PROXIMITY_RADIUS_METERS") {
            if let Ok(value) = v.parse::<f64>() {
                cfg.validation.proximity_radius_meters = value;
            }
        }
        if let Ok(v) = std::env::var("TRILHA_CONNECTIVITY_PROBE_SECS") {
            if let Ok(value) = v.parse::<u64>() {
                cfg.sync.connectivity_probe_secs = value.max(1);
            }
        }

        cfg
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.database.url.trim().is_empty() {
            return Err("Database url must not be empty".to_string());
        }
        if self.database.max_connections == 0 {
            return Err("Database max_connections must be greater than 0".to_string());
        }
        if !self.validation.proximity_radius_meters.is_finite()
            || self.validation.proximity_radius_meters <= 0.0
        {
            return Err("Proximity radius must be a positive number of meters".to_string());
        }
        Ok(())
    }
}
