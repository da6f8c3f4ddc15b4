use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::grouping::mapping::{SubjectGroupMapping, OTHER_GROUP};
use crate::grouping::rules::{GroupRuleTable, ELECTIVE_GROUPS, SPECIALIZED_GROUPS};

/// Resultado de la resolución: un único 교과(군) o una combinación explícita.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResolvedLabel {
    Single(String),
    /// Grupos ordenados; se muestran como `A + B`.
    Combination(Vec<String>),
}

impl ResolvedLabel {
    pub fn labels(&self) -> Vec<&str> {
        match self {
            ResolvedLabel::Single(s) => vec![s.as_str()],
            ResolvedLabel::Combination(v) => v.iter().map(String::as_str).collect(),
        }
    }

    pub fn is_combination(&self) -> bool {
        matches!(self, ResolvedLabel::Combination(_))
    }
}

impl fmt::Display for ResolvedLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedLabel::Single(s) => f.write_str(s),
            ResolvedLabel::Combination(v) => f.write_str(&v.join(" + ")),
        }
    }
}

/// Clasificador ramo -> 교과(군). Se construye una vez por ejecución y se pasa por referencia.
#[derive(Debug, Clone, Default)]
pub struct SubjectGroupResolver {
    mapping: SubjectGroupMapping,
    rules: GroupRuleTable,
}

impl SubjectGroupResolver {
    pub fn new(mapping: SubjectGroupMapping, rules: GroupRuleTable) -> Self {
        SubjectGroupResolver { mapping, rules }
    }

    /// Mapeo dado + tabla de reglas por defecto.
    pub fn with_default_rules(mapping: SubjectGroupMapping) -> Self {
        Self::new(mapping, GroupRuleTable::korean_default())
    }

    pub fn mapping(&self) -> &SubjectGroupMapping {
        &self.mapping
    }

    /// Búsqueda directa de un ramo (sin colapso de reglas).
    pub fn resolve_single_subject(&self, subject: &str) -> String {
        self.mapping.group_of(subject).to_string()
    }

    /// Conjunto ordenado de 교과(군) crudos de una lista de ramos.
    pub fn raw_groups<'s, I>(&self, subjects: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = &'s str>,
    {
        subjects.into_iter().map(|s| self.resolve_single_subject(s)).collect()
    }

    /// Resuelve los ramos de un docente a una etiqueta canónica.
    pub fn resolve<'s, I>(&self, subjects: I) -> ResolvedLabel
    where
        I: IntoIterator<Item = &'s str>,
    {
        self.resolve_groups(&self.raw_groups(subjects))
    }

    /// Aplica las reglas de colapso sobre un conjunto de 교과(군) ya mapeados.
    pub fn resolve_groups(&self, groups: &BTreeSet<String>) -> ResolvedLabel {
        log::debug!("교과군 antes de reglas: {:?}", groups);
        let mut candidates = groups.clone();
        if candidates.is_empty() {
            candidates.insert(OTHER_GROUP.to_string());
        }

        // 교양/기타 sobran si hay un grupo real
        if candidates.len() >= 2 {
            let real: BTreeSet<String> = candidates
                .iter()
                .filter(|g| !ELECTIVE_GROUPS.contains(&g.as_str()))
                .cloned()
                .collect();
            if !real.is_empty() {
                candidates = real;
            }
        }

        if let Some(rule) = self.rules.find(&candidates) {
            log::debug!("Regla aplicada: {:?} -> {}", rule.labels, rule.replacement);
            candidates = BTreeSet::from([rule.replacement.clone()]);
        }

        if candidates.iter().any(|g| SPECIALIZED_GROUPS.contains(&g.as_str())) {
            let rest: BTreeSet<String> = candidates
                .iter()
                .filter(|g| !SPECIALIZED_GROUPS.contains(&g.as_str()))
                .cloned()
                .collect();
            if !rest.is_empty() {
                log::debug!("Regla 전문 교과/진로 aplicada");
                candidates = rest;
            }
        }

        let mut labels: Vec<String> = candidates.into_iter().collect();
        if labels.len() == 1 {
            ResolvedLabel::Single(labels.remove(0))
        } else {
            ResolvedLabel::Combination(labels)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> SubjectGroupResolver {
        SubjectGroupResolver::with_default_rules(SubjectGroupMapping::from_pairs([
            ("물리학Ⅰ", "과학"),
            ("화학Ⅰ", "과학"),
            ("기술·가정", "기술·가정"),
            ("수학Ⅰ", "수학"),
            ("국어", "국어"),
            ("진로와 직업", "진로"),
            ("공업일반", "전문 교과"),
            ("논술", "교양"),
            ("보건", "보건"),
            ("정보", "정보"),
        ]))
    }

    fn groups(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_precedencia_ciencia_tecnologia() {
        let r = resolver();
        assert_eq!(r.resolve(["물리학Ⅰ", "기술·가정"]), ResolvedLabel::Single("과학".into()));
    }

    #[test]
    fn test_independiente_del_orden() {
        let r = resolver();
        let a = r.resolve(["국어", "수학Ⅰ", "물리학Ⅰ"]);
        let b = r.resolve(["물리학Ⅰ", "국어", "수학Ⅰ"]);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "과학 + 국어 + 수학");
    }

    #[test]
    fn test_electivos_se_descartan() {
        let r = resolver();
        assert_eq!(r.resolve(["논술", "국어"]), ResolvedLabel::Single("국어".into()));
        assert_eq!(r.resolve(["논술", "미분류"]), ResolvedLabel::Combination(vec!["교양".into(), "기타".into()]));
        assert_eq!(r.resolve(["미분류"]), ResolvedLabel::Single("기타".into()));
    }

    #[test]
    fn test_electivos_luego_regla() {
        // {과학, 기술·가정, 기타} -> sin 기타 -> regla 과학
        let r = resolver();
        assert_eq!(r.resolve(["화학Ⅰ", "기술·가정", "미분류"]), ResolvedLabel::Single("과학".into()));
    }

    #[test]
    fn test_especializados() {
        let r = resolver();
        assert_eq!(r.resolve(["진로와 직업", "공업일반"]), ResolvedLabel::Single("전문 교과".into()));
        assert_eq!(r.resolve_groups(&groups(&["진로", "과학", "수학"])), ResolvedLabel::Combination(vec!["과학".into(), "수학".into()]));
        assert_eq!(r.resolve_groups(&groups(&["진로", "사회"])), ResolvedLabel::Single("사회".into()));
        assert_eq!(r.resolve(["진로와 직업"]), ResolvedLabel::Single("진로".into()));
    }

    #[test]
    fn test_conjunto_vacio() {
        assert_eq!(resolver().resolve_groups(&BTreeSet::new()), ResolvedLabel::Single("기타".into()));
    }

    #[test]
    fn test_resolve_single_subject() {
        let r = resolver();
        assert_eq!(r.resolve_single_subject("*정보"), "정보");
        assert_eq!(r.resolve_single_subject("없는과목"), "기타");
    }
}
