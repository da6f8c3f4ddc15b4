use std::io;
use std::path::{Path, PathBuf};

/// Nombre fijo del informe.
pub const OUTPUT_FILE_NAME: &str = "결과집계표.xlsx";

/// Tope de reintentos con sufijo, para no girar sin fin en un directorio de sólo lectura.
pub const MAX_SUFFIX: u32 = 1000;

/// `결과집계표.xlsx` + 2 -> `결과집계표(2).xlsx`.
pub fn suffixed_path(base: &Path, n: u32) -> PathBuf {
    let stem = base.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default();
    let name = match base.extension() {
        Some(ext) => format!("{}({}).{}", stem, n, ext.to_string_lossy()),
        None => format!("{}({})", stem, n),
    };
    base.with_file_name(name)
}

/// Archivo bloqueado (abierto en Excel, sin permiso de escritura).
fn is_locked(e: &io::Error) -> bool {
    // ERROR_SHARING_VIOLATION en Windows
    e.kind() == io::ErrorKind::PermissionDenied || (cfg!(windows) && e.raw_os_error() == Some(32))
}

/// Intenta escribir en `target`; si está bloqueado, reintenta con `(2)`, `(3)`, …
/// Cualquier otro error de IO se propaga.
pub fn save_with_retry<F>(target: &Path, mut write: F) -> Result<PathBuf, Box<dyn std::error::Error>>
where
    F: FnMut(&Path) -> io::Result<()>,
{
    let mut candidate = target.to_path_buf();
    let mut n = 1;
    loop {
        match write(&candidate) {
            Ok(()) => return Ok(candidate),
            Err(e) if is_locked(&e) => {
                log::warn!("'{}' está bloqueado ({}), probando otro nombre", candidate.display(), e);
                n += 1;
                if n > MAX_SUFFIX {
                    return Err(format!("No se encontró un nombre de archivo escribible para '{}'", target.display()).into());
                }
                candidate = suffixed_path(target, n);
            }
            Err(e) => return Err(format!("No se pudo guardar '{}': {}", candidate.display(), e).into()),
        }
    }
}

/// Abre el archivo con la aplicación por defecto del sistema. Un fallo sólo se registra.
pub fn open_in_default_app(path: &Path) {
    let result = if cfg!(target_os = "windows") {
        std::process::Command::new("cmd").args(["/C", "start", ""]).arg(path).spawn()
    } else if cfg!(target_os = "macos") {
        std::process::Command::new("open").arg(path).spawn()
    } else {
        std::process::Command::new("xdg-open").arg(path).spawn()
    };

    if let Err(e) = result {
        log::warn!("No se pudo abrir automáticamente '{}': {}", path.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffixed_path() {
        let base = Path::new("/tmp/out/결과집계표.xlsx");
        assert_eq!(suffixed_path(base, 2), PathBuf::from("/tmp/out/결과집계표(2).xlsx"));
        assert_eq!(suffixed_path(Path::new("informe"), 3), PathBuf::from("informe(3)"));
    }

    #[test]
    fn test_reintenta_si_bloqueado() {
        let target = Path::new("결과집계표.xlsx");
        let mut attempts: Vec<PathBuf> = Vec::new();
        let saved = save_with_retry(target, |p| {
            attempts.push(p.to_path_buf());
            if attempts.len() < 3 {
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "bloqueado"))
            } else {
                Ok(())
            }
        })
        .expect("debe guardar al tercer intento");
        assert_eq!(saved, PathBuf::from("결과집계표(3).xlsx"));
        assert_eq!(
            attempts,
            vec![
                PathBuf::from("결과집계표.xlsx"),
                PathBuf::from("결과집계표(2).xlsx"),
                PathBuf::from("결과집계표(3).xlsx"),
            ]
        );
    }

    #[test]
    fn test_otro_error_se_propaga() {
        let result = save_with_retry(Path::new("x.xlsx"), |_| Err(io::Error::other("disco lleno")));
        assert!(result.is_err());
    }

    #[test]
    fn test_tope_de_reintentos() {
        let result = save_with_retry(Path::new("x.xlsx"), |_| {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "ro"))
        });
        assert!(result.is_err());
    }
}
