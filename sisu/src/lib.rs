// Biblioteca raíz del crate `sisu`.
// Reexporta los módulos principales y la función `run` que orquesta el flujo:
// planillas 시수배정현황 -> registros -> 교과(군) -> estadísticas -> 결과집계표.xlsx
pub mod aggregate;
pub mod config;
pub mod excel;
pub mod grouping;
pub mod mapping_text;
pub mod models;
pub mod pipeline;
pub mod report;

/// Ejecuta el pipeline completo (reexport para facilitar uso desde `main`)
pub use pipeline::run;
