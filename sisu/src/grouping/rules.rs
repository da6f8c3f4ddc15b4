use std::collections::BTreeSet;

/// Etiquetas de 교양/기타: se descartan si el docente tiene además un 교과(군) real.
pub const ELECTIVE_GROUPS: [&str; 2] = ["교양", "기타"];
/// 전문 교과 / 진로: se descartan al final si quedan otros grupos.
pub const SPECIALIZED_GROUPS: [&str; 2] = ["전문 교과", "진로"];

/// Regla: conjunto exacto de 교과(군) -> etiqueta que lo reemplaza.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRule {
    pub labels: BTreeSet<String>,
    pub replacement: String,
}

impl GroupRule {
    pub fn new<I, S>(labels: I, replacement: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        GroupRule {
            labels: labels.into_iter().map(Into::into).collect(),
            replacement: replacement.into(),
        }
    }

    /// La regla aplica sólo si el conjunto candidato es exactamente el de la regla.
    pub fn matches(&self, candidates: &BTreeSet<String>) -> bool {
        self.labels == *candidates
    }
}

/// Tabla ordenada de reglas; la primera coincidencia gana.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupRuleTable {
    rules: Vec<GroupRule>,
}

impl GroupRuleTable {
    pub fn new(rules: Vec<GroupRule>) -> Self {
        GroupRuleTable { rules }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Primera regla (en orden de declaración) cuyo conjunto coincide.
    pub fn find(&self, candidates: &BTreeSet<String>) -> Option<&GroupRule> {
        self.rules.iter().find(|r| r.matches(candidates))
    }

    pub fn rules(&self) -> &[GroupRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Tabla usada por las planillas NEIS. Ojo: `기술·가정` aparece con `·` (U+00B7)
    /// y con `∙` (U+2219) porque ambas grafías circulan en los archivos.
    pub fn korean_default() -> Self {
        let r = |a: &str, b: &str, to: &str| GroupRule::new([a, b], to);
        GroupRuleTable::new(vec![
            r("과학", "기술·가정", "과학"),
            r("과학", "기술∙가정", "과학"),
            r("보건", "기술·가정", "기술∙가정"),
            r("제2외국어", "한문", "제2외국어"),
            r("수학", "정보", "수학"),
            r("과학", "보건", "과학"),
            r("한문", "보건", "한문"),
            r("국어", "한문", "국어"),
            r("영어", "예술", "영어"),
            r("사회", "예술", "사회"),
            r("과학", "정보", "과학"),
            r("예술", "제2외국어", "예술"),
            r("정보", "기술·가정", "정보"),
            r("수학", "기술·가정", "수학"),
            r("영어", "기술·가정", "영어"),
            r("국어", "보건", "국어"),
            r("수학", "보건", "수학"),
            r("영어", "보건", "영어"),
            r("예술", "보건", "예술"),
            r("국어", "전문 교과", "국어"),
            r("수학", "전문 교과", "수학"),
            r("영어", "전문 교과", "영어"),
            r("예술", "전문 교과", "예술"),
            r("진로", "전문 교과", "전문 교과"),
            r("제2외국어", "보건", "제2외국어"),
        ])
    }
}
