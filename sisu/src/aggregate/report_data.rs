// Estructuras de salida de la agregación: lo que consume la capa de informe.

use serde::Serialize;

use crate::grouping::ResolvedLabel;
use crate::models::RunMode;

/// Fila de la vista 교사별시수현황: un registro con su 교과(군) directo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawRecordRow {
    pub school: String,
    pub teacher: String,
    pub subject: String,
    pub total_hours: u64,
    pub group: String,
}

/// Fila de la vista 교사별총시수: totales de un docente en un colegio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeacherTotal {
    pub school: String,
    pub teacher: String,
    pub resolved: ResolvedLabel,
    pub total_hours: u64,
    pub subject_count: usize,
    pub subject_names: Vec<String>,
    /// 교과(군) crudos ordenados, antes del colapso por reglas.
    pub raw_groups: Vec<String>,
}

impl TeacherTotal {
    /// `A + B` cuando hay ≥2 grupos crudos; vacío en otro caso.
    pub fn raw_combination(&self) -> String {
        if self.raw_groups.len() >= 2 {
            self.raw_groups.join(" + ")
        } else {
            String::new()
        }
    }
}

/// Conteo de un tramo del histograma (n ramos, o n grupos).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierCount {
    pub tier: usize,
    pub count: usize,
    /// round(count / docentes * 100, 1); 0 si no hay docentes.
    pub percentage: f64,
}

/// Fórmulas paralelas para cruzar 학교통계 con 교사별총시수.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupFormulas {
    pub teacher_count: String,
    pub total_hours: String,
    pub average_hours: String,
}

/// Estadística de un 교과(군) dentro de un colegio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStat {
    pub group: String,
    pub teacher_count: usize,
    pub total_hours: u64,
    pub average_hours: f64,
    pub average_subject_count: f64,
    pub formulas: GroupFormulas,
}

/// Totales generales de un colegio.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchoolTotals {
    pub teacher_count: usize,
    pub total_hours: u64,
    pub average_hours: f64,
    pub total_subject_instances: usize,
    pub unique_subject_count: usize,
    pub average_subjects: f64,
}

/// Fila de 학교통계 para un colegio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchoolStatistics {
    pub school: String,
    /// Fila (1-based) que ocupa el colegio en la hoja 학교통계.
    pub sheet_row: usize,
    pub subject_load: Vec<TierCount>,
    pub groups: Vec<GroupStat>,
    pub group_count_tiers: Vec<TierCount>,
    pub totals: SchoolTotals,
}

/// Porcentaje de todos los docentes de la ejecución en un tramo de ramos.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierShare {
    pub tier: usize,
    pub percentage: f64,
}

/// Vista 학교통계 completa. Los ejes de tramos y grupos son comunes a todos los colegios.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsTable {
    pub max_subjects: usize,
    pub max_groups: usize,
    pub group_labels: Vec<String>,
    pub rows: Vec<SchoolStatistics>,
    pub subject_load_summary: Vec<TierShare>,
}

/// Una combinación de ≥2 교과(군) y los docentes que la comparten.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinationRow {
    pub school: String,
    pub groups: Vec<String>,
    pub teachers: Vec<String>,
}

impl CombinationRow {
    pub fn label(&self) -> String {
        self.groups.join(" + ")
    }

    pub fn count(&self) -> usize {
        self.teachers.len()
    }
}

/// Totales del pie de 교사별총시수.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverallTotals {
    pub teacher_count: usize,
    pub total_hours: u64,
}

/// Resultado completo de la agregación.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportData {
    pub mode: RunMode,
    pub schools: Vec<String>,
    pub raw_rows: Vec<RawRecordRow>,
    pub teacher_totals: Vec<TeacherTotal>,
    pub overall: OverallTotals,
    pub statistics: StatisticsTable,
    pub combinations: Vec<CombinationRow>,
}

impl ReportData {
    pub fn is_single_school(&self) -> bool {
        self.mode.is_single_school()
    }

    /// Diseño vertical (항목/값) de 학교통계: modo único con un solo colegio.
    pub fn uses_vertical_statistics(&self) -> bool {
        self.is_single_school() && self.statistics.rows.len() == 1
    }
}
