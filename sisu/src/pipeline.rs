//! Orquestación: archivos -> registros por colegio -> agregación -> informe.

use std::path::{Path, PathBuf};

use crate::aggregate::{aggregate, ReportData};
use crate::config::RunConfig;
use crate::excel::{process_workbook_file, school_name_from_path};
use crate::grouping::{SubjectGroupMapping, SubjectGroupResolver};
use crate::models::{RunMode, SchoolDataset};
use crate::report::{open_in_default_app, write_report};

/// Resultado de una ejecución.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub data: ReportData,
    /// Ruta escrita; `None` si no había nada que procesar.
    pub report_path: Option<PathBuf>,
    /// El archivo de mapeo no existía (aviso para el operador).
    pub mapping_missing: bool,
}

/// Lee un libro y lo convierte en `SchoolDataset` (nombre desde el archivo).
pub fn load_dataset(path: &Path) -> Result<SchoolDataset, Box<dyn std::error::Error>> {
    let school_name = school_name_from_path(path);
    log::info!("Cargando archivo: {} (colegio: {})", path.display(), school_name);
    let records = process_workbook_file(path)?;
    log::info!("{}: {} registros tras fusionar duplicados", school_name, records.len());
    Ok(SchoolDataset::new(school_name, records))
}

/// Procesa los libros en orden; cada uno se extrae y fusiona por completo antes del siguiente.
pub fn load_datasets(paths: &[PathBuf]) -> Result<Vec<SchoolDataset>, Box<dyn std::error::Error>> {
    paths.iter().map(|p| load_dataset(p)).collect()
}

/// Hay algo que informar: en modo único hace falta al menos un registro.
pub fn has_reportable_data(datasets: &[SchoolDataset], mode: RunMode) -> bool {
    match mode {
        RunMode::Merged => datasets.iter().any(|d| !d.records.is_empty()),
        RunMode::PerSchool => !datasets.is_empty(),
    }
}

/// Ejecuta el pipeline completo según la configuración.
pub fn run(config: &RunConfig) -> Result<RunOutcome, Box<dyn std::error::Error>> {
    let loaded = SubjectGroupMapping::load(&config.mapping_path)?;
    let mapping_missing = loaded.is_missing();
    let resolver = SubjectGroupResolver::with_default_rules(loaded.into_mapping());

    let datasets = load_datasets(&config.inputs)?;
    let data = aggregate(&datasets, &resolver, config.mode);

    if let Some(dump) = &config.dump_json {
        let json = serde_json::to_string_pretty(&data)?;
        std::fs::write(dump, json).map_err(|e| format!("No se pudo escribir '{}': {}", dump.display(), e))?;
        log::info!("ReportData volcado en {}", dump.display());
    }

    if !has_reportable_data(&datasets, config.mode) {
        log::warn!("No hay datos para procesar");
        return Ok(RunOutcome {
            data,
            report_path: None,
            mapping_missing,
        });
    }

    let saved = write_report(&data, &config.output_path())?;
    log::info!("Informe guardado en {}", saved.display());
    if config.auto_open {
        open_in_default_app(&saved);
    }

    Ok(RunOutcome {
        data,
        report_path: Some(saved),
        mapping_missing,
    })
}
