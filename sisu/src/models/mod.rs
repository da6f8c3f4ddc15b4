// Estructuras de datos principales

use serde::{Deserialize, Serialize};

/// Valor de una celda tal como lo entrega la capa de lectura de planillas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
}

impl CellValue {
    /// Vacío = celda nula o texto vacío.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// Fila cruda: secuencia ordenada de celdas (puede venir más corta que el encabezado).
pub type Row = Vec<CellValue>;

/// Hoja de cálculo: nombre + filas.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Row>,
}

/// Un registro (과목, 교사명, 총시수) extraído de una hoja.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeachingRecord {
    pub subject: String,
    pub teacher: String,
    pub total_hours: u64,
}

impl TeachingRecord {
    pub fn new(subject: impl Into<String>, teacher: impl Into<String>, total_hours: u64) -> Self {
        TeachingRecord {
            subject: subject.into(),
            teacher: teacher.into(),
            total_hours,
        }
    }

    /// Nombre del ramo sin los marcadores `*` iniciales (clave para el mapeo de 교과(군)).
    pub fn lookup_subject(&self) -> &str {
        self.subject.trim_start_matches('*')
    }
}

/// Registros de un colegio (o del conjunto combinado en modo único).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolDataset {
    pub school_name: String,
    pub records: Vec<TeachingRecord>,
}

impl SchoolDataset {
    pub fn new(school_name: impl Into<String>, records: Vec<TeachingRecord>) -> Self {
        SchoolDataset {
            school_name: school_name.into(),
            records,
        }
    }
}

/// Modo de agregación: todos los archivos como un solo colegio, o uno por colegio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunMode {
    Merged,
    PerSchool,
}

impl RunMode {
    pub fn is_single_school(self) -> bool {
        matches!(self, RunMode::Merged)
    }
}

impl std::str::FromStr for RunMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "merged" | "single" => Ok(RunMode::Merged),
            "per-school" | "multi" => Ok(RunMode::PerSchool),
            other => Err(format!("modo desconocido: '{}' (usar merged | per-school)", other)),
        }
    }
}

/// Anonimiza un nombre para los logs: primer carácter + `*`… + último carácter.
pub fn anonymize_name(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    match chars.as_slice() {
        [] | [_] => name.to_string(),
        [first, middle @ .., last] => {
            let mut out = String::new();
            out.push(*first);
            out.extend(std::iter::repeat_n('*', middle.len()));
            out.push(*last);
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymize_name() {
        assert_eq!(anonymize_name("김민수"), "김*수");
        assert_eq!(anonymize_name("이수"), "이수");
        assert_eq!(anonymize_name("박"), "박");
        assert_eq!(anonymize_name(""), "");
    }

    #[test]
    fn test_lookup_subject_strips_markers() {
        let r = TeachingRecord::new("**국어", "김*수", 4);
        assert_eq!(r.lookup_subject(), "국어");
        assert_eq!(r.subject, "**국어");
    }

    #[test]
    fn test_run_mode_from_str() {
        assert_eq!("merged".parse::<RunMode>(), Ok(RunMode::Merged));
        assert_eq!("Per-School".parse::<RunMode>(), Ok(RunMode::PerSchool));
        assert!("otro".parse::<RunMode>().is_err());
    }
}
