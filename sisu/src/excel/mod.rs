//! Módulo `excel` dividido en submódulos para mantener el código organizado.
//!
//! Submódulos:
//! - `io`: lectura de libros con calamine y conversión de celdas
//! - `extract`: extractor de registros por hoja (encabezado `총시수`)
//! - `merge`: fusión de registros duplicados dentro de un libro
//! - `school`: nombre del colegio a partir del nombre de archivo

/// Helpers de IO para lectura de Excel
pub mod io;

/// Extractor perezoso de registros: `extract_records`
pub mod extract;

/// Fusión por (과목, 교사명): `merge_records`, `process_workbook_file`
pub mod merge;

/// Nombre de colegio desde `2024(가온고).xlsx`
pub mod school;

pub use extract::{extract_records, RecordExtractor};
pub use io::read_workbook_sheets;
pub use merge::{merge_records, process_workbook, process_workbook_file};
pub use school::{school_name_from_path, SINGLE_SCHOOL_FALLBACK, UNKNOWN_SCHOOL};
