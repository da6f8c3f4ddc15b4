use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

use crate::models::{CellValue, Row, Sheet};

/// Convierte un `Data` de calamine al `CellValue` que consume el extractor.
pub fn data_to_cell(d: &Data) -> CellValue {
    match d {
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Empty => CellValue::Empty,
        Data::Error(_) => CellValue::Empty,
        // Fechas: se conservan como texto; el extractor nunca las toma como horas
        Data::DateTime(_) => CellValue::Text(d.to_string()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

/// Convierte un `Range` a filas indexadas desde la columna A.
///
/// calamine recorta las columnas vacías a la izquierda; el extractor trabaja con
/// índices absolutos (B = 1, D = 3), así que rellenamos con celdas vacías.
pub fn range_to_rows(range: &Range<Data>) -> Vec<Row> {
    let col_offset = range.start().map(|(_, c)| c as usize).unwrap_or(0);
    range
        .rows()
        .map(|r| {
            let mut row: Row = Vec::with_capacity(col_offset + r.len());
            row.extend(std::iter::repeat_n(CellValue::Empty, col_offset));
            row.extend(r.iter().map(data_to_cell));
            row
        })
        .collect()
}

/// Lee todas las hojas de un libro Excel como `Sheet`s, en orden de aparición.
/// Una hoja ilegible se omite (se registra en el log) en lugar de abortar el libro.
pub fn read_workbook_sheets<P: AsRef<Path>>(path: P) -> Result<Vec<Sheet>, Box<dyn std::error::Error>> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| format!("No se pudo abrir el libro '{}': {}", path.display(), e))?;

    let names = workbook.sheet_names().to_owned();
    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        match workbook.worksheet_range(&name) {
            Ok(range) => sheets.push(Sheet {
                rows: range_to_rows(&range),
                name,
            }),
            Err(e) => {
                log::warn!("Hoja '{}' de '{}' ilegible, se omite: {}", name, path.display(), e);
            }
        }
    }
    Ok(sheets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_to_cell() {
        assert_eq!(data_to_cell(&Data::Int(10)), CellValue::Number(10.0));
        assert_eq!(data_to_cell(&Data::Float(2.5)), CellValue::Number(2.5));
        assert_eq!(data_to_cell(&Data::String(" 국어 ".into())), CellValue::Text(" 국어 ".into()));
        assert_eq!(data_to_cell(&Data::Empty), CellValue::Empty);
        assert_eq!(data_to_cell(&Data::Bool(true)), CellValue::Bool(true));
    }

    #[test]
    fn test_range_to_rows_pads_leading_columns() {
        // Rango que empieza en B1 (fila 0, columna 1)
        let mut range: Range<Data> = Range::new((0, 1), (1, 2));
        range.set_value((0, 1), Data::String("과목".into()));
        range.set_value((0, 2), Data::String("총시수".into()));
        range.set_value((1, 1), Data::String("국어".into()));
        range.set_value((1, 2), Data::Float(3.0));

        let rows = range_to_rows(&range);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], CellValue::Empty);
        assert_eq!(rows[0][1], CellValue::Text("과목".into()));
        assert_eq!(rows[1][2], CellValue::Number(3.0));
    }
}
