use sisu::grouping::{MappingLoad, ResolvedLabel, SubjectGroupMapping, SubjectGroupResolver};
use sisu::mapping_text::{parse_mapping_text, to_pretty_json};

#[test]
fn test_carga_mapeo_desde_archivo() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("subject_group_mapping.json");
    std::fs::write(&path, r#"{"통합과학": "과학", "정보": "정보", "성공적인 직업생활": "전문 교과"}"#).expect("escribir");

    let loaded = SubjectGroupMapping::load(&path).expect("cargar");
    assert!(!loaded.is_missing());
    let mapping = loaded.into_mapping();
    assert_eq!(mapping.len(), 3);
    assert_eq!(mapping.group_of("*통합과학"), "과학");
    assert_eq!(mapping.group_of("없는과목"), "기타");
}

#[test]
fn test_mapeo_ausente_no_es_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let loaded = SubjectGroupMapping::load(dir.path().join("no_existe.json")).expect("ausencia tolerada");
    assert!(matches!(loaded, MappingLoad::Missing(_)));
    assert!(loaded.into_mapping().is_empty());
}

#[test]
fn test_json_invalido_es_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("roto.json");
    std::fs::write(&path, "{\"국어\": ").expect("escribir");
    let err = SubjectGroupMapping::load(&path).expect_err("JSON inválido");
    assert!(err.to_string().contains("roto.json"));
}

#[test]
fn test_texto_pegado_a_resolver() {
    // Texto copiado de Excel: cabecera Key, columnas con tabulador y con espacios
    let text = "Key\tValue\n통합과학\t과학\n정보  정보\n성공적인 직업생활\t전문 교과\n";
    let map = parse_mapping_text(text).expect("regex");
    assert_eq!(map.len(), 3);
    assert!(!map.contains_key("Key"));

    let json = to_pretty_json(&map).expect("json");
    assert!(json.contains("    \"통합과학\": \"과학\""));

    let mapping = SubjectGroupMapping::from_json_str(&json).expect("releer");
    let resolver = SubjectGroupResolver::with_default_rules(mapping);
    assert_eq!(
        resolver.resolve(["통합과학", "정보"]),
        ResolvedLabel::Single("과학".into())
    );
    assert_eq!(
        resolver.resolve(["정보", "성공적인 직업생활"]),
        ResolvedLabel::Single("정보".into())
    );
    assert_eq!(resolver.resolve(["성공적인 직업생활"]), ResolvedLabel::Single("전문 교과".into()));
}
