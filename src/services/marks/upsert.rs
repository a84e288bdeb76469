use std::collections::HashSet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{MarksService, term_or_current};
use crate::models::marks::{
    entities::validate_mark,
    requests::{TermMarkEntry, TermMarkUpsert, UpsertTermMarksRequest},
    responses::UpsertTermMarksResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::require_teaches;
use crate::services::{OrInternal, Reply, bad_request, current_user, non_blank, respond};

pub async fn upsert_marks(
    service: &MarksService,
    marks: UpsertTermMarksRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    respond(upsert(service, marks, request).await)
}

fn check_entries(
    entries: &[TermMarkEntry],
    max_marks: f64,
    class_students: &HashSet<i64>,
) -> Result<(), HttpResponse> {
    if entries.is_empty() {
        return Err(bad_request(ErrorCode::BadRequest, "No marks provided"));
    }

    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !class_students.contains(&entry.student_id) {
            return Err(bad_request(
                ErrorCode::TermMarkInvalid,
                format!("Student {} does not belong to this class", entry.student_id),
            ));
        }
        if !seen.insert(entry.student_id) {
            return Err(bad_request(
                ErrorCode::TermMarkInvalid,
                format!("Student {} is listed more than once", entry.student_id),
            ));
        }
        validate_mark(entry.marks, max_marks).map_err(|msg| {
            bad_request(
                ErrorCode::TermMarkInvalid,
                format!("Student {}: {msg}", entry.student_id),
            )
        })?;
    }

    Ok(())
}

async fn upsert(service: &MarksService, marks: UpsertTermMarksRequest, request: &HttpRequest) -> Reply {
    let teacher = current_user(request)?;
    let storage = service.get_storage(request);

    require_teaches(&storage, teacher.id, marks.class_id, Some(marks.subject_id)).await?;

    let class_students: HashSet<i64> = storage
        .list_class_students(marks.class_id)
        .await
        .or_internal("Failed to list class students")?
        .into_iter()
        .map(|s| s.user_id)
        .collect();
    check_entries(&marks.entries, marks.max_marks, &class_students)?;

    let (term, academic_year) = term_or_current(marks.term, marks.academic_year).await;

    let rows: Vec<TermMarkUpsert> = marks
        .entries
        .into_iter()
        .map(|entry| TermMarkUpsert {
            student_id: entry.student_id,
            subject_id: marks.subject_id,
            class_id: marks.class_id,
            teacher_id: teacher.id,
            term: term.clone(),
            academic_year: academic_year.clone(),
            marks: entry.marks,
            max_marks: marks.max_marks,
            remarks: non_blank(entry.remarks),
        })
        .collect();

    let items = storage
        .upsert_term_marks(rows)
        .await
        .or_internal("Failed to save term marks")?;

    info!(
        "Teacher {} saved {} term marks for class {} subject {} ({} {})",
        teacher.username,
        items.len(),
        marks.class_id,
        marks.subject_id,
        term,
        academic_year
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UpsertTermMarksResponse {
            saved: items.len(),
            items,
        },
        "Term marks saved",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(student_id: i64, marks: f64) -> TermMarkEntry {
        TermMarkEntry {
            student_id,
            marks,
            remarks: None,
        }
    }

    #[test]
    fn test_check_entries() {
        let class: HashSet<i64> = [1, 2].into_iter().collect();

        assert!(check_entries(&[entry(1, 40.0), entry(2, 50.0)], 50.0, &class).is_ok());
        assert!(check_entries(&[], 50.0, &class).is_err());
        assert!(check_entries(&[entry(1, 51.0)], 50.0, &class).is_err());
        assert!(check_entries(&[entry(1, 10.0), entry(1, 20.0)], 50.0, &class).is_err());
        assert!(check_entries(&[entry(3, 10.0)], 50.0, &class).is_err());
        assert!(check_entries(&[entry(1, 10.0)], 0.0, &class).is_err());
    }
}
