//! Conversor de texto pegado desde Excel (dos columnas: ramo, 교과(군)) al JSON del mapeo.

use regex::Regex;
use serde_json::{Map, Value};

/// Convierte el texto en pares clave/valor, en orden de aparición.
///
/// - columnas separadas por tabulador o por 2+ espacios
/// - se omite la cabecera `Key`/`Keys`
/// - si no sale ningún par, se emparejan las secuencias de palabras en hangul (si son pares)
pub fn parse_mapping_text(text: &str) -> Result<Map<String, Value>, regex::Error> {
    let splitter = Regex::new(r"\t+|\s{2,}")?;
    let mut result = Map::new();
    let lines: Vec<&str> = text.trim().split('\n').collect();

    for line in &lines {
        let parts: Vec<&str> = splitter
            .split(line.trim())
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        if let [key, value, ..] = parts.as_slice() {
            let lower = key.to_lowercase();
            if lower == "key" || lower == "keys" {
                continue;
            }
            result.insert(key.to_string(), Value::String(value.to_string()));
        }
    }

    if result.is_empty() {
        let all_text = lines.join(" ");
        let words_re = Regex::new(r"[가-힣]+(?:\s+[가-힣]+)*")?;
        let words: Vec<&str> = words_re.find_iter(&all_text).map(|m| m.as_str()).collect();
        if words.len() % 2 == 0 {
            for pair in words.chunks(2) {
                if let [k, v] = pair {
                    result.insert(k.trim().to_string(), Value::String(v.trim().to_string()));
                }
            }
        }
    }

    Ok(result)
}

/// JSON con sangría de 4 espacios y sin escapar caracteres no ASCII.
pub fn to_pretty_json(map: &Map<String, Value>) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    serde::Serialize::serialize(map, &mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
