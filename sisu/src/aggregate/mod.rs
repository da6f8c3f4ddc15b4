//! Motor de agregación: de los registros por colegio a las cuatro vistas del informe.
//!
//! 1. 교사별시수현황: listado plano docente/ramo/horas/교과(군)
//! 2. 교사별총시수: totales por (colegio, docente) con etiqueta resuelta
//! 3. 학교통계: histogramas por tramo, estadística por 교과(군), totales
//! 4. 교과군조합현황: docentes que comparten una combinación de ≥2 grupos
//!
//! Las divisiones por cero valen 0; un conjunto vacío produce estadísticas en cero.

pub mod formulas;
pub mod report_data;

pub use report_data::*;

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::excel::SINGLE_SCHOOL_FALLBACK;
use crate::grouping::SubjectGroupResolver;
use crate::models::{RunMode, SchoolDataset, TeachingRecord};

/// Redondeo a `decimals` decimales (mitad lejos de cero).
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// round(count / total * 100, 1), 0 si total = 0.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        round_to(count as f64 / total as f64 * 100.0, 1)
    }
}

/// Promedio redondeado a 2 decimales, 0 si el divisor es 0.
fn average(sum: f64, count: usize) -> f64 {
    if count == 0 { 0.0 } else { round_to(sum / count as f64, 2) }
}

/// Registros de un colegio agrupados por docente (orden alfabético de docentes).
struct SchoolView<'a> {
    name: &'a str,
    teachers: BTreeMap<&'a str, Vec<&'a TeachingRecord>>,
}

impl<'a> SchoolView<'a> {
    fn new(dataset: &'a SchoolDataset) -> Self {
        let mut teachers: BTreeMap<&str, Vec<&TeachingRecord>> = BTreeMap::new();
        for rec in &dataset.records {
            teachers.entry(rec.teacher.as_str()).or_default().push(rec);
        }
        SchoolView {
            name: &dataset.school_name,
            teachers,
        }
    }

    fn records(&self) -> impl Iterator<Item = &'a TeachingRecord> + '_ {
        self.teachers.values().flat_map(|v| v.iter().copied())
    }
}

/// Ramos distintos (tal como se muestran) de un docente.
fn distinct_subjects<'a>(records: &[&'a TeachingRecord]) -> BTreeSet<&'a str> {
    records.iter().map(|r| r.subject.as_str()).collect()
}

/// Prepara los colegios según el modo: todo en uno, o un colegio por nombre.
pub fn prepare_datasets(datasets: &[SchoolDataset], mode: RunMode) -> Vec<SchoolDataset> {
    match mode {
        RunMode::Merged => {
            let name = datasets
                .first()
                .map(|d| d.school_name.clone())
                .unwrap_or_else(|| SINGLE_SCHOOL_FALLBACK.to_string());
            let records = datasets.iter().flat_map(|d| d.records.iter().cloned()).collect();
            vec![SchoolDataset::new(name, records)]
        }
        RunMode::PerSchool => {
            let mut order: Vec<SchoolDataset> = Vec::new();
            let mut index: HashMap<&str, usize> = HashMap::new();
            for d in datasets {
                match index.get(d.school_name.as_str()) {
                    Some(&pos) => order[pos].records.extend(d.records.iter().cloned()),
                    None => {
                        index.insert(d.school_name.as_str(), order.len());
                        order.push(d.clone());
                    }
                }
            }
            order
        }
    }
}

/// Punto de entrada del motor.
pub fn aggregate(datasets: &[SchoolDataset], resolver: &SubjectGroupResolver, mode: RunMode) -> ReportData {
    let prepared = prepare_datasets(datasets, mode);
    let views: Vec<SchoolView> = prepared.iter().map(SchoolView::new).collect();

    let raw_rows = build_raw_rows(&views, resolver);
    let teacher_totals = build_teacher_totals(&views, resolver);
    let overall = OverallTotals {
        teacher_count: teacher_totals.len(),
        total_hours: teacher_totals.iter().map(|t| t.total_hours).sum(),
    };
    let statistics = build_statistics(&views, resolver, mode.is_single_school());
    let combinations = build_combinations(&views, resolver);

    log::info!(
        "Agregación: {} colegios, {} docentes, {} horas",
        views.len(),
        overall.teacher_count,
        overall.total_hours
    );

    ReportData {
        mode,
        schools: prepared.iter().map(|d| d.school_name.clone()).collect(),
        raw_rows,
        teacher_totals,
        overall,
        statistics,
        combinations,
    }
}

fn build_raw_rows(views: &[SchoolView], resolver: &SubjectGroupResolver) -> Vec<RawRecordRow> {
    let mut rows = Vec::new();
    for view in views {
        for (teacher, records) in &view.teachers {
            for rec in records {
                rows.push(RawRecordRow {
                    school: view.name.to_string(),
                    teacher: teacher.to_string(),
                    subject: rec.subject.clone(),
                    total_hours: rec.total_hours,
                    group: resolver.resolve_single_subject(&rec.subject),
                });
            }
        }
    }
    rows
}

fn build_teacher_totals(views: &[SchoolView], resolver: &SubjectGroupResolver) -> Vec<TeacherTotal> {
    let mut totals: Vec<TeacherTotal> = Vec::new();
    for view in views {
        for (teacher, records) in &view.teachers {
            let raw = resolver.raw_groups(records.iter().map(|r| r.subject.as_str()));
            let subjects = distinct_subjects(records);
            totals.push(TeacherTotal {
                school: view.name.to_string(),
                teacher: teacher.to_string(),
                resolved: resolver.resolve_groups(&raw),
                total_hours: records.iter().map(|r| r.total_hours).sum(),
                subject_count: subjects.len(),
                subject_names: subjects.into_iter().map(str::to_string).collect(),
                raw_groups: raw.into_iter().collect(),
            });
        }
    }
    totals.sort_by(|a, b| (&a.school, &a.teacher).cmp(&(&b.school, &b.teacher)));
    totals
}

/// Conteo por tramo 1..=max con porcentaje sobre `total`.
fn tier_counts(histogram: &HashMap<usize, usize>, max: usize, total: usize) -> Vec<TierCount> {
    (1..=max)
        .map(|tier| {
            let count = histogram.get(&tier).copied().unwrap_or(0);
            TierCount {
                tier,
                count,
                percentage: percentage(count, total),
            }
        })
        .collect()
}

fn build_statistics(views: &[SchoolView], resolver: &SubjectGroupResolver, single_school: bool) -> StatisticsTable {
    // Ejes comunes a todos los colegios (mínimo 1 tramo)
    let mut max_subjects = 1;
    let mut max_groups = 1;
    let mut group_labels: BTreeSet<String> = BTreeSet::new();
    for view in views {
        for records in view.teachers.values() {
            max_subjects = max_subjects.max(distinct_subjects(records).len());
            max_groups = max_groups.max(resolver.raw_groups(records.iter().map(|r| r.subject.as_str())).len());
        }
        group_labels.extend(view.records().map(|r| resolver.resolve_single_subject(&r.subject)));
    }
    let group_labels: Vec<String> = group_labels.into_iter().collect();

    let mut aggregated_subject_load: HashMap<usize, usize> = HashMap::new();
    let mut total_teachers_all = 0usize;

    let rows: Vec<SchoolStatistics> = views
        .iter()
        .enumerate()
        .map(|(idx, view)| {
            let stats = school_statistics(view, resolver, &group_labels, max_subjects, max_groups, single_school, idx + 2);
            for tier in &stats.subject_load {
                *aggregated_subject_load.entry(tier.tier).or_insert(0) += tier.count;
            }
            total_teachers_all += stats.totals.teacher_count;
            stats
        })
        .collect();

    let subject_load_summary = (1..=max_subjects)
        .map(|tier| {
            let count = aggregated_subject_load.get(&tier).copied().unwrap_or(0);
            let pct = if total_teachers_all == 0 {
                0.0
            } else {
                round_to(count as f64 / total_teachers_all as f64 * 100.0, 2)
            };
            TierShare { tier, percentage: pct }
        })
        .collect();

    StatisticsTable {
        max_subjects,
        max_groups,
        group_labels,
        rows,
        subject_load_summary,
    }
}

fn school_statistics(
    view: &SchoolView,
    resolver: &SubjectGroupResolver,
    group_labels: &[String],
    max_subjects: usize,
    max_groups: usize,
    single_school: bool,
    sheet_row: usize,
) -> SchoolStatistics {
    let teacher_count = view.teachers.len();

    // 1. 다과목지도: docentes por número de ramos distintos
    let mut subject_hist: HashMap<usize, usize> = HashMap::new();
    let mut total_subject_instances = 0usize;
    for records in view.teachers.values() {
        let n = distinct_subjects(records).len();
        *subject_hist.entry(n).or_insert(0) += 1;
        total_subject_instances += n;
    }

    // 2. Por 교과(군): docentes, horas y ramos distintos del grupo por docente
    struct GroupAcc<'a> {
        total_hours: u64,
        subjects_by_teacher: BTreeMap<&'a str, BTreeSet<&'a str>>,
    }
    let mut by_group: HashMap<String, GroupAcc> = HashMap::new();
    for rec in view.records() {
        let acc = by_group
            .entry(resolver.resolve_single_subject(&rec.subject))
            .or_insert_with(|| GroupAcc {
                total_hours: 0,
                subjects_by_teacher: BTreeMap::new(),
            });
        acc.total_hours += rec.total_hours;
        acc.subjects_by_teacher
            .entry(rec.teacher.as_str())
            .or_default()
            .insert(rec.lookup_subject());
    }

    let groups = group_labels
        .iter()
        .map(|group| {
            let (teachers, total_hours, subject_sum) = match by_group.get(group) {
                Some(acc) => (
                    acc.subjects_by_teacher.len(),
                    acc.total_hours,
                    acc.subjects_by_teacher.values().map(BTreeSet::len).sum::<usize>(),
                ),
                None => (0, 0, 0),
            };
            GroupStat {
                group: group.clone(),
                teacher_count: teachers,
                total_hours,
                average_hours: average(total_hours as f64, teachers),
                average_subject_count: average(subject_sum as f64, teachers),
                formulas: formulas::group_formulas(group, single_school, sheet_row),
            }
        })
        .collect();

    // 3. 복수 교과(군): docentes por número de grupos crudos
    let mut group_hist: HashMap<usize, usize> = HashMap::new();
    for records in view.teachers.values() {
        let n = resolver.raw_groups(records.iter().map(|r| r.subject.as_str())).len();
        *group_hist.entry(n).or_insert(0) += 1;
    }

    // 4. Totales
    let total_hours: u64 = view.records().map(|r| r.total_hours).sum();
    let unique_subject_count = view.records().map(|r| r.subject.as_str()).collect::<BTreeSet<_>>().len();

    SchoolStatistics {
        school: view.name.to_string(),
        sheet_row,
        subject_load: tier_counts(&subject_hist, max_subjects, teacher_count),
        groups,
        group_count_tiers: tier_counts(&group_hist, max_groups, teacher_count),
        totals: SchoolTotals {
            teacher_count,
            total_hours,
            average_hours: average(total_hours as f64, teacher_count),
            total_subject_instances,
            unique_subject_count,
            average_subjects: average(total_subject_instances as f64, teacher_count),
        },
    }
}

fn build_combinations(views: &[SchoolView], resolver: &SubjectGroupResolver) -> Vec<CombinationRow> {
    let mut rows = Vec::new();
    for view in views {
        let mut combos: BTreeMap<Vec<String>, Vec<String>> = BTreeMap::new();
        for (teacher, records) in &view.teachers {
            let groups = resolver.raw_groups(records.iter().map(|r| r.subject.as_str()));
            if groups.len() >= 2 {
                combos
                    .entry(groups.into_iter().collect())
                    .or_default()
                    .push(teacher.to_string());
            }
        }

        let mut sorted: Vec<(Vec<String>, Vec<String>)> = combos.into_iter().collect();
        sorted.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        rows.extend(sorted.into_iter().map(|(groups, mut teachers)| {
            teachers.sort();
            CombinationRow {
                school: view.name.to_string(),
                groups,
                teachers,
            }
        }));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(33.333, 1), 33.3);
        assert_eq!(round_to(2.0 / 3.0, 2), 0.67);
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(percentage(0, 0), 0.0);
    }

    #[test]
    fn test_prepare_merged_usa_primer_nombre() {
        let ds = vec![
            SchoolDataset::new("가온고등학교", vec![TeachingRecord::new("국어", "a", 1)]),
            SchoolDataset::new("나래고등학교", vec![TeachingRecord::new("국어", "b", 2)]),
        ];
        let merged = prepare_datasets(&ds, RunMode::Merged);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].school_name, "가온고등학교");
        assert_eq!(merged[0].records.len(), 2);

        let empty = prepare_datasets(&[], RunMode::Merged);
        assert_eq!(empty[0].school_name, SINGLE_SCHOOL_FALLBACK);
    }

    #[test]
    fn test_prepare_por_colegio_fusiona_homonimos() {
        let ds = vec![
            SchoolDataset::new("A", vec![TeachingRecord::new("국어", "a", 1)]),
            SchoolDataset::new("B", vec![]),
            SchoolDataset::new("A", vec![TeachingRecord::new("수학", "a", 2)]),
        ];
        let out = prepare_datasets(&ds, RunMode::PerSchool);
        assert_eq!(out.iter().map(|d| d.school_name.as_str()).collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(out[0].records.len(), 2);
    }
}
