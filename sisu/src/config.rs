use std::path::PathBuf;

use crate::models::RunMode;
use crate::report::OUTPUT_FILE_NAME;

/// Ruta relativa por defecto del mapeo ramo -> 교과(군).
pub const DEFAULT_MAPPING_PATH: &str = "subject_group_mapping.json";

/// Variables de entorno (también leídas desde `.env`).
pub const ENV_MAPPING_PATH: &str = "SISU_MAPPING_PATH";
pub const ENV_OUTPUT_DIR: &str = "SISU_OUTPUT_DIR";

/// Configuración de una ejecución del pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub inputs: Vec<PathBuf>,
    pub mode: RunMode,
    pub mapping_path: PathBuf,
    pub output_dir: PathBuf,
    pub auto_open: bool,
    pub dump_json: Option<PathBuf>,
}

impl RunConfig {
    /// Valores por defecto: modo por colegio, mapeo y salida según entorno o constantes.
    pub fn new(inputs: Vec<PathBuf>) -> Self {
        RunConfig {
            inputs,
            mode: RunMode::PerSchool,
            mapping_path: env_path(ENV_MAPPING_PATH).unwrap_or_else(|| PathBuf::from(DEFAULT_MAPPING_PATH)),
            output_dir: env_path(ENV_OUTPUT_DIR).unwrap_or_else(|| PathBuf::from(".")),
            auto_open: false,
            dump_json: None,
        }
    }

    /// Ruta destino del informe (antes de resolver colisiones).
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(OUTPUT_FILE_NAME)
    }
}

/// Carga `.env` si existe; su ausencia no es un error.
pub fn load_dotenv() {
    if let Err(e) = dotenv::dotenv() {
        log::debug!(".env no cargado: {}", e);
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty()).map(PathBuf::from)
}
