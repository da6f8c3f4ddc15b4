//! Extracción de registros (과목, 교사명, 총시수) desde una hoja de 시수배정현황.
//!
//! Formato esperado de la hoja (NEIS):
//! ```text
//!  A     B (과목)           C     D (교사명)   ...  총시수
//!  ...   국어-기초          ...   김*수        ...  10
//! ```
//! - la fila de encabezado se detecta por la celda `총시수`
//! - B = ramo, D = docente; el índice de `총시수` se toma del encabezado
//! - filas vacías, subtítulos y filas de fecha ("2024…") se descartan

use crate::models::{anonymize_name, CellValue, Row, TeachingRecord};

/// Etiqueta centinela de la columna de horas totales.
pub const TOTAL_HOURS_HEADER: &str = "총시수";
/// Etiqueta literal de la columna de ramo (filas de encabezado repetidas).
pub const SUBJECT_HEADER: &str = "과목";

const SUBJECT_COL: usize = 1;
const TEACHER_COL: usize = 3;
const MIN_DATA_COLS: usize = 4;
/// Tope por celda de 총시수; con totales en u64 las sumas no pueden desbordar.
pub const MAX_CELL_HOURS: f64 = u32::MAX as f64;

/// Iterador perezoso sobre los registros de una hoja.
pub struct RecordExtractor<'a, I>
where
    I: Iterator<Item = &'a Row>,
{
    rows: I,
    total_hours_col: Option<usize>,
}

impl<'a, I> RecordExtractor<'a, I>
where
    I: Iterator<Item = &'a Row>,
{
    pub fn new(rows: I) -> Self {
        RecordExtractor {
            rows,
            total_hours_col: None,
        }
    }

    /// Procesa una fila; `None` si no produce registro.
    fn process_row(&mut self, row: &Row) -> Option<TeachingRecord> {
        if row.iter().all(CellValue::is_empty) {
            return None;
        }

        // Cualquier fila con `총시수` (re)define la columna de horas
        if let Some(idx) = row.iter().position(|c| c.as_text() == Some(TOTAL_HOURS_HEADER)) {
            self.total_hours_col = Some(idx);
            return None;
        }

        let hours_col = self.total_hours_col?;
        if row.len() < MIN_DATA_COLS {
            return None;
        }

        let subject_raw = row.get(SUBJECT_COL)?.as_text()?;
        if subject_raw.is_empty() || subject_raw == SUBJECT_HEADER || subject_raw.starts_with("20") {
            return None;
        }

        let hours = match row.get(hours_col).and_then(CellValue::as_number) {
            Some(h) if h.is_finite() && (0.0..=MAX_CELL_HOURS).contains(&h) => h.trunc() as u64,
            _ => {
                log::debug!("Fila descartada: '{}' sin 총시수 numérico válido", subject_raw.trim());
                return None;
            }
        };

        let subject_full = subject_raw.trim();
        let subject = subject_full.split('-').next().unwrap_or(subject_full).trim();
        let teacher = teacher_name(row.get(TEACHER_COL));

        log::info!(
            "Dato encontrado: {} (original: {}) - {} - {}",
            subject,
            subject_full,
            anonymize_name(&teacher),
            hours
        );

        Some(TeachingRecord::new(subject, teacher, hours))
    }
}

impl<'a, I> Iterator for RecordExtractor<'a, I>
where
    I: Iterator<Item = &'a Row>,
{
    type Item = TeachingRecord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let row = self.rows.next()?;
            if let Some(rec) = self.process_row(row) {
                return Some(rec);
            }
        }
    }
}

/// Nombre del docente desde la columna D: texto recortado, número como texto, resto vacío.
fn teacher_name(cell: Option<&CellValue>) -> String {
    match cell {
        Some(CellValue::Text(s)) => s.trim().to_string(),
        Some(CellValue::Number(n)) if n.fract() == 0.0 => format!("{}", *n as i64),
        Some(CellValue::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Atajo: extrae todos los registros de una hoja.
pub fn extract_records(rows: &[Row]) -> RecordExtractor<'_, std::slice::Iter<'_, Row>> {
    RecordExtractor::new(rows.iter())
}
