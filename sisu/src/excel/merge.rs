use std::collections::HashMap;
use std::path::Path;

use crate::excel::extract::extract_records;
use crate::excel::io::read_workbook_sheets;
use crate::models::{Sheet, TeachingRecord};

/// Deduplica por (과목, 교사명) conservando el registro con más horas.
/// En empate gana el primero visto; se preserva el orden de primera aparición.
pub fn merge_records<I>(records: I) -> Vec<TeachingRecord>
where
    I: IntoIterator<Item = TeachingRecord>,
{
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut merged: Vec<TeachingRecord> = Vec::new();

    for rec in records {
        let key = (rec.subject.clone(), rec.teacher.clone());
        match index.get(&key) {
            Some(&pos) => {
                if rec.total_hours > merged[pos].total_hours {
                    merged[pos] = rec;
                }
            }
            None => {
                index.insert(key, merged.len());
                merged.push(rec);
            }
        }
    }

    merged
}

/// Ejecuta el extractor sobre todas las hojas del libro y fusiona los duplicados.
pub fn process_workbook(sheets: &[Sheet]) -> Vec<TeachingRecord> {
    let all = sheets.iter().flat_map(|s| {
        let recs: Vec<TeachingRecord> = extract_records(&s.rows).collect();
        if !recs.is_empty() {
            log::debug!("Hoja '{}': {} registros", s.name, recs.len());
        }
        recs
    });
    merge_records(all)
}

/// Lee un archivo .xlsx y devuelve sus registros ya fusionados.
pub fn process_workbook_file<P: AsRef<Path>>(path: P) -> Result<Vec<TeachingRecord>, Box<dyn std::error::Error>> {
    let sheets = read_workbook_sheets(path)?;
    Ok(process_workbook(&sheets))
}
