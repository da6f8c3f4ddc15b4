use crate::aggregate::report_data::GroupFormulas;

/// Nombre de la hoja de totales por docente a la que apuntan las fórmulas.
pub const TEACHER_TOTALS_SHEET: &str = "교사별총시수";

/// Fórmulas de 교사수/총시수/평균시수 de un 교과(군).
///
/// En modo único se filtra sólo por la columna C (담당교과); con varios colegios
/// se agrega el criterio de colegio contra `$A{fila}` de la propia hoja 학교통계.
pub fn group_formulas(group: &str, single_school: bool, sheet_row: usize) -> GroupFormulas {
    let sheet = format!("'{}'", TEACHER_TOTALS_SHEET);
    let criteria = format!("{sheet}!$C:$C,\"*{group}*\"");

    if single_school {
        GroupFormulas {
            teacher_count: format!("=COUNTIF({criteria})"),
            total_hours: format!("=SUMIFS({sheet}!$D:$D,{criteria})"),
            average_hours: format!("=IFERROR(AVERAGEIF({criteria},{sheet}!$D:$D),0)"),
        }
    } else {
        let school = format!("{sheet}!$A:$A,$A{sheet_row}");
        GroupFormulas {
            teacher_count: format!("=COUNTIFS({school},{criteria})"),
            total_hours: format!("=SUMIFS({sheet}!$D:$D,{school},{criteria})"),
            average_hours: format!("=IFERROR(AVERAGEIFS({sheet}!$D:$D,{school},{criteria}),0)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formulas_modo_unico() {
        let f = group_formulas("과학", true, 2);
        assert_eq!(f.teacher_count, "=COUNTIF('교사별총시수'!$C:$C,\"*과학*\")");
        assert_eq!(f.total_hours, "=SUMIFS('교사별총시수'!$D:$D,'교사별총시수'!$C:$C,\"*과학*\")");
        assert_eq!(
            f.average_hours,
            "=IFERROR(AVERAGEIF('교사별총시수'!$C:$C,\"*과학*\",'교사별총시수'!$D:$D),0)"
        );
    }

    #[test]
    fn test_formulas_varios_colegios() {
        let f = group_formulas("수학", false, 3);
        assert_eq!(f.teacher_count, "=COUNTIFS('교사별총시수'!$A:$A,$A3,'교사별총시수'!$C:$C,\"*수학*\")");
        assert_eq!(
            f.total_hours,
            "=SUMIFS('교사별총시수'!$D:$D,'교사별총시수'!$A:$A,$A3,'교사별총시수'!$C:$C,\"*수학*\")"
        );
        assert_eq!(
            f.average_hours,
            "=IFERROR(AVERAGEIFS('교사별총시수'!$D:$D,'교사별총시수'!$A:$A,$A3,'교사별총시수'!$C:$C,\"*수학*\"),0)"
        );
    }
}
