use std::path::Path;

/// Nombre usado cuando el archivo no trae `(…)` en su nombre.
pub const UNKNOWN_SCHOOL: &str = "알수없음";
/// Nombre del colegio combinado en modo único cuando no hay ninguno.
pub const SINGLE_SCHOOL_FALLBACK: &str = "단일학교";

const HIGH_SUFFIX: &str = "고";
const HIGH_SCHOOL_SUFFIX: &str = "고등학교";

/// Deriva el nombre del colegio del nombre de archivo: `2024(가온고).xlsx` -> `가온고등학교`.
pub fn school_name_from_path<P: AsRef<Path>>(path: P) -> String {
    let file_name = path
        .as_ref()
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    school_name_from_file_name(&file_name)
}

/// Igual que `school_name_from_path` pero sobre el nombre ya extraído.
pub fn school_name_from_file_name(file_name: &str) -> String {
    let inner = file_name.find('(').and_then(|open| {
        let rest = &file_name[open + 1..];
        rest.find(')').map(|close| &rest[..close])
    });

    match inner {
        Some(name) => normalize_school_suffix(name),
        None => UNKNOWN_SCHOOL.to_string(),
    }
}

/// `xx고` -> `xx고등학교`; el resto queda igual.
pub fn normalize_school_suffix(name: &str) -> String {
    match name.strip_suffix(HIGH_SUFFIX) {
        Some(stem) => format!("{}{}", stem, HIGH_SCHOOL_SUFFIX),
        None => name.to_string(),
    }
}
