use std::path::{Path, PathBuf};

use umya_spreadsheet::structs::drawing::spreadsheet::MarkerType;
use umya_spreadsheet::structs::{Chart, ChartType};
use umya_spreadsheet::{Border, HorizontalAlignmentValues, Spreadsheet, VerticalAlignmentValues, Worksheet};

use crate::aggregate::ReportData;
use crate::report::layout::{build_layouts, column_letter, ChartKind, ChartSpec, OutCell, SheetLayout, HEADER_FILL};
use crate::report::save::save_with_retry;

/// Construye el libro completo (4 hojas) a partir de la agregación.
pub fn render_workbook(data: &ReportData) -> Result<Spreadsheet, Box<dyn std::error::Error>> {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    for layout in build_layouts(data) {
        let sheet = book
            .new_sheet(layout.name.as_str())
            .map_err(|e| format!("No se pudo crear la hoja '{}': {}", layout.name, e))?;
        render_sheet(sheet, &layout);
    }
    Ok(book)
}

fn render_sheet(ws: &mut Worksheet, layout: &SheetLayout) {
    let max_col = layout.max_col();

    for (r, row) in layout.rows.iter().enumerate() {
        let row_no = r as u32 + 1;
        for (c, cell) in row.iter().enumerate() {
            let coord = (c as u32 + 1, row_no);
            match cell {
                OutCell::Empty => {}
                OutCell::Text(s) => {
                    ws.get_cell_mut(coord).set_value(s.as_str());
                }
                OutCell::Number(n) => {
                    ws.get_cell_mut(coord).set_value_number(*n);
                }
                OutCell::Formula(f) => {
                    ws.get_cell_mut(coord).set_formula(f.trim_start_matches('='));
                }
            }
        }

        // Bordes y alineación en todo el ancho de la tabla
        for col in 1..=max_col {
            let style = ws.get_style_mut((col, row_no));
            let borders = style.get_borders_mut();
            borders.get_left_mut().set_border_style(Border::BORDER_THIN);
            borders.get_right_mut().set_border_style(Border::BORDER_THIN);
            borders.get_top_mut().set_border_style(Border::BORDER_THIN);
            borders.get_bottom_mut().set_border_style(Border::BORDER_THIN);
            let horizontal = if layout.left_aligned_cols.contains(&col) {
                HorizontalAlignmentValues::Left
            } else {
                HorizontalAlignmentValues::Center
            };
            style.get_alignment_mut().set_horizontal(horizontal);
            style.get_alignment_mut().set_vertical(VerticalAlignmentValues::Center);
            if row_no == 1 {
                style.get_font_mut().set_bold(true);
                style.set_background_color(HEADER_FILL);
            }
        }
    }

    for (&(col, row), color) in &layout.fills {
        ws.get_style_mut((col, row)).set_background_color(color.as_str());
    }
    for (&(col, row), code) in &layout.number_formats {
        ws.get_style_mut((col, row)).get_number_format_mut().set_format_code(code.as_str());
    }
    for &(col, width) in &layout.widths {
        ws.get_column_dimension_mut(&column_letter(col)).set_width(width);
    }
    for spec in &layout.charts {
        ws.add_chart(build_chart(spec));
    }
}

fn build_chart(spec: &ChartSpec) -> Chart {
    let mut from_marker = MarkerType::default();
    from_marker.set_coordinate(spec.from.as_str());
    let mut to_marker = MarkerType::default();
    to_marker.set_coordinate(spec.to.as_str());

    let chart_type = match spec.kind {
        ChartKind::Bar => ChartType::BarChart,
        ChartKind::Pie => ChartType::PieChart,
    };
    log::debug!("Gráfico '{}' en {}:{} ({} series)", spec.title, spec.from, spec.to, spec.series.len());

    let series: Vec<&str> = spec.series.iter().map(String::as_str).collect();
    let mut chart = Chart::default();
    chart.new_chart(chart_type, from_marker, to_marker, series);
    chart
}

/// Renderiza y guarda el informe; si `target` está bloqueado prueba `(2)`, `(3)`, …
/// Devuelve la ruta efectivamente escrita.
pub fn write_report(data: &ReportData, target: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let book = render_workbook(data)?;
    save_with_retry(target, |path| {
        let file = std::fs::File::create(path)?;
        umya_spreadsheet::writer::xlsx::write_writer(&book, file).map_err(|e| {
            // No dejar un archivo a medio escribir con el nombre pedido
            if let Err(rm) = std::fs::remove_file(path) {
                log::warn!("No se pudo borrar '{}': {}", path.display(), rm);
            }
            std::io::Error::other(format!("error al escribir xlsx: {}", e))
        })
    })
}
