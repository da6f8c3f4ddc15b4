//! Disposición de las cuatro hojas del informe, independiente de la librería de escritura.
//!
//! Coordenadas 1-based `(columna, fila)`, igual que en umya-spreadsheet.

use std::collections::BTreeMap;

use crate::aggregate::formulas::TEACHER_TOTALS_SHEET;
use crate::aggregate::ReportData;

pub const RECORDS_SHEET: &str = "교사별시수현황";
pub const STATISTICS_SHEET: &str = "학교통계";
pub const COMBINATIONS_SHEET: &str = "교과군조합현황";

pub const HEADER_FILL: &str = "FFD3D3D3";
pub const FORMULA_FILL: &str = "FFFFF2CC";
pub const TWO_DECIMALS: &str = "0.00";

/// Paleta para las columnas de cada 교과(군) en 학교통계.
pub const GROUP_PALETTE: [&str; 8] = [
    "FFFFCCCC", "FFCCFFCC", "FFCCCCFF", "FFFFE4B5", "FFE6E6FA", "FFFFFFCC", "FFCCFFFF", "FFFFCCFF",
];

#[derive(Debug, Clone, PartialEq)]
pub enum OutCell {
    Empty,
    Text(String),
    Number(f64),
    /// Fórmula con `=` inicial.
    Formula(String),
}

impl OutCell {
    pub fn text(s: impl Into<String>) -> Self {
        OutCell::Text(s.into())
    }

    pub fn num<N: Into<f64>>(n: N) -> Self {
        OutCell::Number(n.into())
    }

    fn count(n: usize) -> Self {
        OutCell::Number(n as f64)
    }

    fn hours(n: u64) -> Self {
        OutCell::Number(n as f64)
    }

    /// Largo aproximado del contenido mostrado (para anchos de columna).
    pub fn display_len(&self) -> usize {
        match self {
            OutCell::Empty => 0,
            OutCell::Text(s) | OutCell::Formula(s) => s.chars().count(),
            OutCell::Number(n) => n.to_string().len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Pie,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub from: String,
    pub to: String,
    pub series: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetLayout {
    pub name: String,
    /// Filas (0-based) de celdas (0-based).
    pub rows: Vec<Vec<OutCell>>,
    pub fills: BTreeMap<(u32, u32), String>,
    pub number_formats: BTreeMap<(u32, u32), String>,
    pub widths: Vec<(u32, f64)>,
    pub left_aligned_cols: Vec<u32>,
    pub charts: Vec<ChartSpec>,
}

impl SheetLayout {
    fn new(name: &str, header: Vec<String>) -> Self {
        SheetLayout {
            name: name.to_string(),
            rows: vec![header.into_iter().map(OutCell::Text).collect()],
            ..Default::default()
        }
    }

    pub fn max_col(&self) -> u32 {
        self.rows.iter().map(Vec::len).max().unwrap_or(0) as u32
    }

    pub fn max_row(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Celda 1-based, si existe.
    pub fn cell(&self, col: u32, row: u32) -> Option<&OutCell> {
        let r = self.rows.get((row as usize).checked_sub(1)?)?;
        r.get((col as usize).checked_sub(1)?)
    }

    /// Ancho = contenido más largo + 2, con un mínimo.
    fn autofit(&mut self, min_width: f64, skip_first: bool) {
        let start = if skip_first { 2 } else { 1 };
        for col in start..=self.max_col() {
            let longest = (1..=self.max_row())
                .filter_map(|r| self.cell(col, r))
                .map(OutCell::display_len)
                .max()
                .unwrap_or(0);
            self.widths.push((col, (longest as f64 + 2.0).max(min_width)));
        }
    }

    fn fill_formulas(&mut self) {
        for row in 2..=self.max_row() {
            for col in 1..=self.max_col() {
                if let Some(OutCell::Formula(_)) = self.cell(col, row) {
                    self.fills.insert((col, row), FORMULA_FILL.to_string());
                }
            }
        }
    }
}

/// Convierte un índice de columna 1-based en letras (1 -> A, 27 -> AA).
pub fn column_letter(mut index: u32) -> String {
    let mut letters = Vec::new();
    while index > 0 {
        let rem = (index - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        index = (index - 1) / 26;
    }
    letters.iter().rev().collect()
}

fn group_colors(data: &ReportData) -> Vec<(String, String)> {
    data.statistics
        .group_labels
        .iter()
        .enumerate()
        .map(|(i, g)| (g.clone(), GROUP_PALETTE[i % GROUP_PALETTE.len()].to_string()))
        .collect()
}

/// Hoja 1: 교사별시수현황.
pub fn records_sheet(data: &ReportData) -> SheetLayout {
    let header = ["학교명", "교사명", "과목", "총시수", "교과(군)"].map(String::from).to_vec();
    let mut sheet = SheetLayout::new(RECORDS_SHEET, header);
    for r in &data.raw_rows {
        sheet.rows.push(vec![
            OutCell::text(&r.school),
            OutCell::text(&r.teacher),
            OutCell::text(&r.subject),
            OutCell::hours(r.total_hours),
            OutCell::text(&r.group),
        ]);
    }
    sheet
}

/// Hoja 2: 교사별총시수, con las filas de totales al final.
pub fn teacher_totals_sheet(data: &ReportData) -> SheetLayout {
    let header = ["학교명", "교사명", "담당교과", "총시수", "담당과목 수", "담당과목명", "교과(군)조합"]
        .map(String::from)
        .to_vec();
    let mut sheet = SheetLayout::new(TEACHER_TOTALS_SHEET, header);
    for t in &data.teacher_totals {
        sheet.rows.push(vec![
            OutCell::text(&t.school),
            OutCell::text(&t.teacher),
            OutCell::text(t.resolved.to_string()),
            OutCell::hours(t.total_hours),
            OutCell::count(t.subject_count),
            OutCell::text(t.subject_names.join(", ")),
            OutCell::text(t.raw_combination()),
        ]);
    }
    sheet.rows.push(vec![
        OutCell::Empty,
        OutCell::text("전체 교사수"),
        OutCell::Empty,
        OutCell::count(data.overall.teacher_count),
    ]);
    sheet.rows.push(vec![
        OutCell::Empty,
        OutCell::text("전체 시수"),
        OutCell::Empty,
        OutCell::hours(data.overall.total_hours),
    ]);
    sheet.autofit(15.0, false);
    sheet
}

/// Encabezados de 학교통계 en el orden de columnas.
pub fn statistics_headers(data: &ReportData) -> Vec<String> {
    let st = &data.statistics;
    let mut headers = vec!["학교명".to_string()];
    for i in 1..=st.max_subjects {
        headers.push(format!("{i}과목_교사수"));
        headers.push(format!("{i}과목_비율"));
    }
    for g in &st.group_labels {
        headers.push(format!("{g}_교사수"));
        headers.push(format!("{g}_총시수"));
        headers.push(format!("{g}_평균시수"));
        headers.push(format!("{g}_평균과목수"));
    }
    for i in 1..=st.max_groups {
        headers.push(format!("{i}개교과군_교사수"));
        headers.push(format!("{i}개교과군_비율"));
    }
    headers.extend(
        ["전체_교사수", "전체_시수", "평균시수", "전체_과목수", "개설_과목수", "평균_과목수"].map(String::from),
    );
    headers
}

fn statistics_values(data: &ReportData) -> Vec<Vec<OutCell>> {
    data.statistics
        .rows
        .iter()
        .map(|s| {
            let mut row = vec![OutCell::text(&s.school)];
            for t in &s.subject_load {
                row.push(OutCell::count(t.count));
                row.push(OutCell::num(t.percentage));
            }
            for g in &s.groups {
                row.push(OutCell::Formula(g.formulas.teacher_count.clone()));
                row.push(OutCell::Formula(g.formulas.total_hours.clone()));
                row.push(OutCell::Formula(g.formulas.average_hours.clone()));
                row.push(OutCell::num(g.average_subject_count));
            }
            for t in &s.group_count_tiers {
                row.push(OutCell::count(t.count));
                row.push(OutCell::num(t.percentage));
            }
            let tot = &s.totals;
            row.push(OutCell::count(tot.teacher_count));
            row.push(OutCell::hours(tot.total_hours));
            row.push(OutCell::num(tot.average_hours));
            row.push(OutCell::count(tot.total_subject_instances));
            row.push(OutCell::count(tot.unique_subject_count));
            row.push(OutCell::num(tot.average_subjects));
            row
        })
        .collect()
}

/// Hoja 3: 학교통계 (horizontal, o vertical 항목/값 en modo único con un colegio).
pub fn statistics_sheet(data: &ReportData) -> SheetLayout {
    let headers = statistics_headers(data);
    let values = statistics_values(data);
    let colors = group_colors(data);

    if data.uses_vertical_statistics() {
        let mut sheet = SheetLayout::new(STATISTICS_SHEET, vec!["항목".into(), "값".into()]);
        let first = values.into_iter().next().unwrap_or_default();
        for (h, v) in headers.iter().zip(first) {
            sheet.rows.push(vec![OutCell::text(h), v]);
        }
        for row in 2..=sheet.max_row() {
            let label = match sheet.cell(1, row) {
                Some(OutCell::Text(s)) => s.clone(),
                _ => continue,
            };
            for (group, color) in &colors {
                if label.starts_with(&format!("{group}_")) {
                    sheet.fills.insert((1, row), color.clone());
                    sheet.fills.insert((2, row), color.clone());
                }
            }
            if label.contains("평균시수") {
                sheet.number_formats.insert((2, row), TWO_DECIMALS.to_string());
            }
        }
        sheet.fill_formulas();
        sheet.widths = vec![(1, 25.0), (2, 15.0)];
        return sheet;
    }

    let mut sheet = SheetLayout::new(STATISTICS_SHEET, headers.clone());
    sheet.rows.extend(values);
    let data_end_row = sheet.max_row();

    // Columnas de cada 교과(군): 4 a partir de la primera tras los tramos de ramos
    let first_group_col = 2 + 2 * data.statistics.max_subjects as u32;
    for (i, (_, color)) in colors.iter().enumerate() {
        let start = first_group_col + 4 * i as u32;
        for row in 1..=data_end_row {
            for col in start..start + 4 {
                sheet.fills.insert((col, row), color.clone());
            }
            if row >= 2 {
                sheet.number_formats.insert((start + 2, row), TWO_DECIMALS.to_string());
            }
        }
    }
    let position = |name: &str| headers.iter().position(|h| h == name).map(|p| p as u32 + 1);
    let teacher_col = position("전체_교사수").unwrap_or(1);
    let avg_col = position("평균시수").unwrap_or(1);
    for row in 2..=data_end_row {
        sheet.number_formats.insert((avg_col, row), TWO_DECIMALS.to_string());
    }
    sheet.fill_formulas();

    if !data.is_single_school() {
        let chart_col = column_letter(sheet.max_col() + 2);
        let series = (teacher_col..=avg_col)
            .map(|c| {
                let letter = column_letter(c);
                format!("{STATISTICS_SHEET}!${letter}$2:${letter}${data_end_row}")
            })
            .collect();
        sheet.charts.push(ChartSpec {
            kind: ChartKind::Bar,
            title: "교사수 및 평균시수".to_string(),
            from: format!("{chart_col}2"),
            to: format!("{}{}", column_letter(sheet.max_col() + 10), 17),
            series,
        });

        let summary_start = data_end_row + 2;
        while sheet.max_row() < summary_start - 1 {
            sheet.rows.push(Vec::new());
        }
        sheet.rows.push(vec![OutCell::text("과목수"), OutCell::text("비율")]);
        for share in &data.statistics.subject_load_summary {
            sheet.rows.push(vec![OutCell::text(format!("{}과목", share.tier)), OutCell::num(share.percentage)]);
        }
        let summary_end = summary_start + data.statistics.max_subjects as u32;
        sheet.charts.push(ChartSpec {
            kind: ChartKind::Pie,
            title: "과목수별 비율".to_string(),
            from: format!("{chart_col}{summary_start}"),
            to: format!("{}{}", column_letter(sheet.max_col() + 8), summary_start + 15),
            series: vec![format!("{STATISTICS_SHEET}!$B${}:$B${summary_end}", summary_start + 1)],
        });
    }

    sheet.widths.push((1, 25.0));
    sheet.autofit(12.0, true);
    sheet
}

/// Hoja 4: 교과군조합현황.
pub fn combinations_sheet(data: &ReportData) -> SheetLayout {
    let header = ["학교명", "교과(군) 조합", "교사수", "해당 교사명"].map(String::from).to_vec();
    let mut sheet = SheetLayout::new(COMBINATIONS_SHEET, header);
    for c in &data.combinations {
        sheet.rows.push(vec![
            OutCell::text(&c.school),
            OutCell::text(c.label()),
            OutCell::count(c.count()),
            OutCell::text(c.teachers.join(", ")),
        ]);
    }
    sheet.widths = vec![(1, 25.0), (2, 30.0), (3, 10.0), (4, 40.0)];
    sheet.left_aligned_cols = vec![4];
    sheet
}

/// Las cuatro hojas en orden.
pub fn build_layouts(data: &ReportData) -> Vec<SheetLayout> {
    vec![
        records_sheet(data),
        teacher_totals_sheet(data),
        statistics_sheet(data),
        combinations_sheet(data),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letter() {
        assert_eq!(column_letter(1), "A");
        assert_eq!(column_letter(26), "Z");
        assert_eq!(column_letter(27), "AA");
        assert_eq!(column_letter(53), "BA");
    }

    #[test]
    fn test_display_len() {
        assert_eq!(OutCell::text("교사명").display_len(), 3);
        assert_eq!(OutCell::num(12u32).display_len(), 2);
        assert_eq!(OutCell::Empty.display_len(), 0);
    }
}
