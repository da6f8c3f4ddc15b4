use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, DataType, Reader};
use sisu::config::RunConfig;
use sisu::models::RunMode;
use sisu::report::OUTPUT_FILE_NAME;

// Planilla mínima estilo NEIS: subtítulo, encabezado con 총시수 y filas de datos.
fn write_input(path: &Path, rows: &[(&str, &str, f64)]) {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    let ws = book.new_sheet("시수배정").expect("crear hoja");
    ws.get_cell_mut((2, 1)).set_value("2024학년도 시수배정현황");
    for (col, title) in ["번호", "과목", "학년", "교사명", "총시수"].iter().enumerate() {
        ws.get_cell_mut((col as u32 + 1, 2)).set_value(*title);
    }
    for (i, (subject, teacher, hours)) in rows.iter().enumerate() {
        let row = i as u32 + 3;
        ws.get_cell_mut((1, row)).set_value_number((i + 1) as f64);
        ws.get_cell_mut((2, row)).set_value(*subject);
        ws.get_cell_mut((3, row)).set_value("1");
        ws.get_cell_mut((4, row)).set_value(*teacher);
        ws.get_cell_mut((5, row)).set_value_number(*hours);
    }
    umya_spreadsheet::writer::xlsx::write(&book, path).expect("escribir planilla de entrada");
}

fn write_mapping(dir: &Path) -> PathBuf {
    let path = dir.join("subject_group_mapping.json");
    std::fs::write(&path, r#"{"국어": "국어", "문학": "국어", "수학Ⅰ": "수학", "물리학Ⅰ": "과학"}"#)
        .expect("escribir mapeo");
    path
}

fn config(dir: &Path, inputs: Vec<PathBuf>, mode: RunMode) -> RunConfig {
    let mut cfg = RunConfig::new(inputs);
    cfg.mode = mode;
    cfg.mapping_path = write_mapping(dir);
    cfg.output_dir = dir.to_path_buf();
    cfg.auto_open = false;
    cfg
}

fn sheet_rows(path: &Path, sheet: &str) -> Vec<Vec<Data>> {
    let mut wb = open_workbook_auto(path).expect("abrir informe");
    let range = wb.worksheet_range(sheet).expect("hoja del informe");
    range.rows().map(|r| r.to_vec()).collect()
}

#[test]
fn test_pipeline_completo_genera_informe() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("2024(가온고).xlsx");
    write_input(
        &input,
        &[
            ("국어-기초", "김*수", 10.0),
            ("국어", "김*수", 6.0),
            ("문학", "김*수", 4.0),
            ("수학Ⅰ", "이*영", 8.0),
            ("물리학Ⅰ", "이*영", 6.5),
        ],
    );

    let cfg = config(dir.path(), vec![input], RunMode::PerSchool);
    let outcome = sisu::run(&cfg).expect("pipeline");

    assert!(!outcome.mapping_missing);
    let report = outcome.report_path.expect("informe escrito");
    assert_eq!(report, dir.path().join(OUTPUT_FILE_NAME));
    assert!(report.exists());

    // 국어 duplicado: gana 10; 6.5 se trunca a 6
    let data = &outcome.data;
    assert_eq!(data.schools, vec!["가온고등학교"]);
    assert_eq!(data.overall.teacher_count, 2);
    assert_eq!(data.overall.total_hours, 28);
    assert_eq!(data.combinations.len(), 1);
    assert_eq!(data.combinations[0].label(), "과학 + 수학");

    let wb = open_workbook_auto(&report).expect("abrir informe");
    assert_eq!(wb.sheet_names(), vec!["교사별시수현황", "교사별총시수", "학교통계", "교과군조합현황"]);

    let rows = sheet_rows(&report, "교사별시수현황");
    assert_eq!(rows[0][0].to_string(), "학교명");
    assert_eq!(rows.len(), 1 + 4);
    let kim: Vec<&Vec<Data>> = rows.iter().filter(|r| r[1].to_string() == "김*수").collect();
    assert_eq!(kim.len(), 2);
    assert_eq!(kim[0][2].to_string(), "국어");
    assert_eq!(kim[0][3].as_f64(), Some(10.0));
    assert_eq!(kim[0][4].to_string(), "국어");

    let totals = sheet_rows(&report, "교사별총시수");
    let footer = totals.last().expect("pie");
    assert_eq!(footer[1].to_string(), "전체 시수");
    assert_eq!(footer[3].as_f64(), Some(28.0));
}

#[test]
fn test_modo_unico_sin_registros_no_escribe() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("2024(나래고).xlsx");
    write_input(&input, &[]);

    let cfg = config(dir.path(), vec![input], RunMode::Merged);
    let outcome = sisu::run(&cfg).expect("pipeline");
    assert!(outcome.report_path.is_none());
    assert!(!dir.path().join(OUTPUT_FILE_NAME).exists());
    assert_eq!(outcome.data.overall.teacher_count, 0);
}

#[test]
fn test_sin_mapeo_todo_es_otro() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("2024(가온고).xlsx");
    write_input(&input, &[("국어", "김*수", 4.0), ("수학Ⅰ", "김*수", 3.0)]);

    let mut cfg = config(dir.path(), vec![input], RunMode::PerSchool);
    cfg.mapping_path = dir.path().join("no_existe.json");
    let outcome = sisu::run(&cfg).expect("pipeline");

    assert!(outcome.mapping_missing);
    assert!(outcome.data.raw_rows.iter().all(|r| r.group == "기타"));
    assert_eq!(outcome.data.teacher_totals[0].resolved.to_string(), "기타");
    assert!(outcome.data.combinations.is_empty());
}

#[test]
fn test_dump_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("2024(가온고).xlsx");
    write_input(&input, &[("국어", "김*수", 4.0)]);

    let mut cfg = config(dir.path(), vec![input], RunMode::PerSchool);
    let dump = dir.path().join("report.json");
    cfg.dump_json = Some(dump.clone());
    sisu::run(&cfg).expect("pipeline");

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&dump).expect("leer json")).expect("json válido");
    assert_eq!(json["mode"], "per-school");
    assert_eq!(json["teacher_totals"][0]["resolved"], "국어");
    assert_eq!(json["overall"]["total_hours"], 4);
}

#[test]
fn test_archivo_inexistente_falla() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = config(dir.path(), vec![dir.path().join("2024(없음고).xlsx")], RunMode::PerSchool);
    assert!(sisu::run(&cfg).is_err());
}
