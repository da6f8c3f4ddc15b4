//! Mapeo ramo -> 교과(군) cargado una sola vez por ejecución.
//!
//! Formato del archivo JSON (`subject_group_mapping.json`):
//! ```text
//! {
//!     "국어": "국어",
//!     "화법과 작문": "국어",
//!     "물리학Ⅰ": "과학"
//! }
//! ```
//! Un ramo ausente del mapeo se clasifica como `기타`.

use std::collections::HashMap;
use std::path::Path;

/// Etiqueta por defecto para ramos sin mapeo.
pub const OTHER_GROUP: &str = "기타";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubjectGroupMapping {
    groups: HashMap<String, String>,
}

/// Resultado de cargar el mapeo: el archivo puede faltar sin que sea fatal.
#[derive(Debug, Clone, PartialEq)]
pub enum MappingLoad {
    Loaded(SubjectGroupMapping),
    /// El archivo no existe; se usa un mapeo vacío (todo -> `기타`).
    Missing(SubjectGroupMapping),
}

impl MappingLoad {
    pub fn into_mapping(self) -> SubjectGroupMapping {
        match self {
            MappingLoad::Loaded(m) | MappingLoad::Missing(m) => m,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, MappingLoad::Missing(_))
    }
}

impl SubjectGroupMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        SubjectGroupMapping {
            groups: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let groups: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(SubjectGroupMapping { groups })
    }

    /// Carga el mapeo desde disco. Sólo la ausencia del archivo se tolera;
    /// un JSON inválido es un error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<MappingLoad, Box<dyn std::error::Error>> {
        let path = path.as_ref();
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("No se encontró el archivo de 교과(군) '{}'; todos los ramos serán '{}'", path.display(), OTHER_GROUP);
                return Ok(MappingLoad::Missing(SubjectGroupMapping::new()));
            }
            Err(e) => return Err(format!("No se pudo leer '{}': {}", path.display(), e).into()),
        };

        let mapping = Self::from_json_str(&contents)
            .map_err(|e| format!("JSON de 교과(군) inválido en '{}': {}", path.display(), e))?;
        log::info!("Mapeo de 교과(군) cargado: {} ramos", mapping.len());
        Ok(MappingLoad::Loaded(mapping))
    }

    /// Busca el grupo de un ramo (sin marcadores `*`), con `기타` por defecto.
    pub fn group_of(&self, subject: &str) -> &str {
        let key = subject.trim_start_matches('*');
        self.groups.get(key).map(String::as_str).unwrap_or(OTHER_GROUP)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_of_por_defecto() {
        let m = SubjectGroupMapping::from_pairs([("국어", "국어"), ("물리학Ⅰ", "과학")]);
        assert_eq!(m.group_of("국어"), "국어");
        assert_eq!(m.group_of("*물리학Ⅰ"), "과학");
        assert_eq!(m.group_of("창체"), OTHER_GROUP);
    }

    #[test]
    fn test_from_json_str() {
        let m = SubjectGroupMapping::from_json_str(r#"{"수학Ⅰ": "수학", "정보": "정보"}"#).expect("json válido");
        assert_eq!(m.len(), 2);
        assert_eq!(m.group_of("수학Ⅰ"), "수학");
        assert!(SubjectGroupMapping::from_json_str("[1, 2]").is_err());
    }
}
