//! 考试、题目、作答存储

use chrono::{DateTime, Utc};

use super::{SeaOrmStorage, page_bounds};
use crate::entity::exam_questions::encode_options;
use crate::entity::prelude::{ExamAnswers, ExamAttempts, ExamQuestions, Exams};
use crate::entity::{exam_answers, exam_attempts, exam_questions, exams};
use crate::errors::{EduBridgeError, Result};
use crate::models::{
    PaginationInfo,
    exams::{
        entities::{
            AnswerGrade, AttemptStatus, Exam, ExamAnswer, ExamAttempt, ExamQuestion, ExamStatus,
        },
        requests::{
            AnswerGradeInput, AnswerInput, ExamListQuery, NewExam, NewQuestion, UpdateExamRequest,
        },
    },
};
use crate::storage::ExamStorage;
use async_trait::async_trait;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};

#[async_trait]
impl ExamStorage for SeaOrmStorage {
    async fn create_exam(&self, exam: NewExam) -> Result<Exam> {
        let now = Utc::now().timestamp();

        let model = exams::ActiveModel {
            class_id: Set(exam.class_id),
            subject_id: Set(exam.subject_id),
            teacher_id: Set(exam.teacher_id),
            title: Set(exam.title),
            instructions: Set(exam.instructions),
            start_at: Set(exam.start_at.timestamp()),
            end_at: Set(exam.end_at.timestamp()),
            duration_minutes: Set(exam.duration_minutes),
            status: Set(ExamStatus::Draft.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("创建考试失败: {e}")))?;

        Ok(result.into_exam())
    }

    async fn get_exam_by_id(&self, exam_id: i64) -> Result<Option<Exam>> {
        let result = Exams::find_by_id(exam_id)
            .one(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询考试失败: {e}")))?;

        Ok(result.map(|m| m.into_exam()))
    }

    async fn list_exams_with_pagination(
        &self,
        query: ExamListQuery,
    ) -> Result<(Vec<Exam>, PaginationInfo)> {
        let (page, size) = page_bounds(query.page, query.size);

        let mut select = Exams::find();

        if let Some(class_id) = query.class_id {
            select = select.filter(exams::Column::ClassId.eq(class_id));
        }

        if let Some(subject_id) = query.subject_id {
            select = select.filter(exams::Column::SubjectId.eq(subject_id));
        }

        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(exams::Column::TeacherId.eq(teacher_id));
        }

        if query.published_only {
            select = select.filter(exams::Column::Status.eq(ExamStatus::Published.to_string()));
        }

        select = select
            .order_by_desc(exams::Column::StartAt)
            .order_by_desc(exams::Column::Id);

        let (items, pagination) = self.fetch_page(select, page, size).await?;

        Ok((items.into_iter().map(|m| m.into_exam()).collect(), pagination))
    }

    async fn list_upcoming_exams(
        &self,
        class_ids: &[i64],
        teacher_id: Option<i64>,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<Exam>> {
        let mut select = Exams::find().filter(exams::Column::EndAt.gt(now.timestamp()));

        select = match teacher_id {
            Some(teacher_id) => select.filter(exams::Column::TeacherId.eq(teacher_id)),
            None => select
                .filter(exams::Column::ClassId.is_in(class_ids.iter().copied()))
                .filter(exams::Column::Status.eq(ExamStatus::Published.to_string())),
        };

        let result = select
            .order_by_asc(exams::Column::StartAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询近期考试失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_exam()).collect())
    }

    async fn update_exam(&self, exam_id: i64, update: UpdateExamRequest) -> Result<Option<Exam>> {
        let Some(existing) = Exams::find_by_id(exam_id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut model: exams::ActiveModel = existing.into();

        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }

        if let Some(instructions) = update.instructions {
            model.instructions = Set(Some(instructions));
        }

        if let Some(start_at) = update.start_at {
            model.start_at = Set(start_at.timestamp());
        }

        if let Some(end_at) = update.end_at {
            model.end_at = Set(end_at.timestamp());
        }

        if let Some(duration) = update.duration_minutes {
            model.duration_minutes = Set(duration);
        }

        model.updated_at = Set(Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("更新考试失败: {e}")))?;

        Ok(Some(updated.into_exam()))
    }

    async fn publish_exam(&self, exam_id: i64) -> Result<Option<Exam>> {
        Exams::update_many()
            .col_expr(
                exams::Column::Status,
                Expr::value(ExamStatus::Published.to_string()),
            )
            .col_expr(exams::Column::UpdatedAt, Expr::value(Utc::now().timestamp()))
            .filter(exams::Column::Id.eq(exam_id))
            .filter(exams::Column::Status.eq(ExamStatus::Draft.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("发布考试失败: {e}")))?;

        self.get_exam_by_id(exam_id).await
    }

    async fn delete_exam(&self, exam_id: i64) -> Result<bool> {
        let result = Exams::delete_by_id(exam_id)
            .exec(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("删除考试失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    async fn add_question(&self, exam_id: i64, question: NewQuestion) -> Result<ExamQuestion> {
        let model = exam_questions::ActiveModel {
            exam_id: Set(exam_id),
            question_type: Set(question.question_type.to_string()),
            prompt: Set(question.prompt),
            options: Set(encode_options(&question.options)),
            correct_answer: Set(question.correct_answer),
            marks: Set(question.marks),
            position: Set(question.position),
            created_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("添加题目失败: {e}")))?;

        Ok(result.into_question())
    }

    async fn get_question_by_id(&self, question_id: i64) -> Result<Option<ExamQuestion>> {
        let result = ExamQuestions::find_by_id(question_id)
            .one(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询题目失败: {e}")))?;

        Ok(result.map(|m| m.into_question()))
    }

    async fn update_question(
        &self,
        question_id: i64,
        question: NewQuestion,
    ) -> Result<Option<ExamQuestion>> {
        let Some(existing) = ExamQuestions::find_by_id(question_id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut model: exam_questions::ActiveModel = existing.into();
        model.question_type = Set(question.question_type.to_string());
        model.prompt = Set(question.prompt);
        model.options = Set(encode_options(&question.options));
        model.correct_answer = Set(question.correct_answer);
        model.marks = Set(question.marks);
        model.position = Set(question.position);

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("更新题目失败: {e}")))?;

        Ok(Some(updated.into_question()))
    }

    async fn delete_question(&self, question_id: i64) -> Result<bool> {
        let result = ExamQuestions::delete_by_id(question_id)
            .exec(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("删除题目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    async fn list_questions(&self, exam_id: i64) -> Result<Vec<ExamQuestion>> {
        self.list_questions_for_exams(&[exam_id]).await
    }

    async fn list_questions_for_exams(&self, exam_ids: &[i64]) -> Result<Vec<ExamQuestion>> {
        if exam_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = ExamQuestions::find()
            .filter(exam_questions::Column::ExamId.is_in(exam_ids.iter().copied()))
            .order_by_asc(exam_questions::Column::ExamId)
            .order_by_asc(exam_questions::Column::Position)
            .order_by_asc(exam_questions::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询题目失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_question()).collect())
    }

    async fn create_attempt(
        &self,
        exam_id: i64,
        student_id: i64,
        started_at: DateTime<Utc>,
        deadline_at: DateTime<Utc>,
    ) -> Result<ExamAttempt> {
        let model = exam_attempts::ActiveModel {
            exam_id: Set(exam_id),
            student_id: Set(student_id),
            status: Set(AttemptStatus::InProgress.to_string()),
            started_at: Set(started_at.timestamp()),
            deadline_at: Set(deadline_at.timestamp()),
            auto_submitted: Set(false),
            ..Default::default()
        };

        // (exam_id, student_id) 唯一，并发开始时后到者得到 Conflict
        Ok(model.insert(&self.db).await?.into_attempt())
    }

    async fn get_attempt_by_id(&self, attempt_id: i64) -> Result<Option<ExamAttempt>> {
        let result = ExamAttempts::find_by_id(attempt_id)
            .one(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询作答失败: {e}")))?;

        Ok(result.map(|m| m.into_attempt()))
    }

    async fn get_student_attempt(
        &self,
        exam_id: i64,
        student_id: i64,
    ) -> Result<Option<ExamAttempt>> {
        let result = ExamAttempts::find()
            .filter(exam_attempts::Column::ExamId.eq(exam_id))
            .filter(exam_attempts::Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询作答失败: {e}")))?;

        Ok(result.map(|m| m.into_attempt()))
    }

    async fn list_exam_attempts(&self, exam_id: i64) -> Result<Vec<ExamAttempt>> {
        let result = ExamAttempts::find()
            .filter(exam_attempts::Column::ExamId.eq(exam_id))
            .order_by_asc(exam_attempts::Column::StartedAt)
            .all(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询作答列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_attempt()).collect())
    }

    async fn list_student_attempts(
        &self,
        student_id: i64,
        exam_ids: &[i64],
    ) -> Result<Vec<ExamAttempt>> {
        if exam_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = ExamAttempts::find()
            .filter(exam_attempts::Column::StudentId.eq(student_id))
            .filter(exam_attempts::Column::ExamId.is_in(exam_ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询作答列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_attempt()).collect())
    }

    async fn save_answers(
        &self,
        attempt_id: i64,
        answers: &[AnswerInput],
    ) -> Result<Option<usize>> {
        let txn = self.db.begin().await?;

        // 行锁与 finalize_attempt 互斥，交卷提交后这里读到的已不是 in_progress
        let open = ExamAttempts::find_by_id(attempt_id)
            .filter(exam_attempts::Column::Status.eq(AttemptStatus::InProgress.to_string()))
            .lock_exclusive()
            .one(&txn)
            .await?;
        if open.is_none() {
            txn.rollback().await?;
            return Ok(None);
        }

        if !answers.is_empty() {
            let now = Utc::now().timestamp();
            let models = answers.iter().map(|a| exam_answers::ActiveModel {
                attempt_id: Set(attempt_id),
                question_id: Set(a.question_id),
                answer: Set(a.answer.clone()),
                saved_at: Set(now),
                ..Default::default()
            });

            ExamAnswers::insert_many(models)
                .on_conflict(
                    OnConflict::columns([
                        exam_answers::Column::AttemptId,
                        exam_answers::Column::QuestionId,
                    ])
                    .update_columns([exam_answers::Column::Answer, exam_answers::Column::SavedAt])
                    .to_owned(),
                )
                .exec(&txn)
                .await
                .map_err(|e| EduBridgeError::database_operation(format!("保存答案失败: {e}")))?;
        }

        txn.commit().await?;
        Ok(Some(answers.len()))
    }

    async fn list_answers(&self, attempt_id: i64) -> Result<Vec<ExamAnswer>> {
        let result = ExamAnswers::find()
            .filter(exam_answers::Column::AttemptId.eq(attempt_id))
            .order_by_asc(exam_answers::Column::QuestionId)
            .all(&self.db)
            .await
            .map_err(|e| EduBridgeError::database_operation(format!("查询答案失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_answer()).collect())
    }

    async fn finalize_attempt(
        &self,
        attempt_id: i64,
        grades: Vec<AnswerGrade>,
        status: AttemptStatus,
        auto_submitted: bool,
        now: DateTime<Utc>,
    ) -> Result<Option<ExamAttempt>> {
        let txn = self.db.begin().await?;
        let in_progress = AttemptStatus::InProgress.to_string();

        // 先抢占状态，避免并发交卷重复批改
        let graded_at = (status == AttemptStatus::Graded).then(|| now.timestamp());
        let claimed = ExamAttempts::update_many()
            .col_expr(exam_attempts::Column::Status, Expr::value(status.to_string()))
            .col_expr(
                exam_attempts::Column::SubmittedAt,
                Expr::value(Some(now.timestamp())),
            )
            .col_expr(exam_attempts::Column::AutoSubmitted, Expr::value(auto_submitted))
            .col_expr(exam_attempts::Column::GradedAt, Expr::value(graded_at))
            .filter(exam_attempts::Column::Id.eq(attempt_id))
            .filter(exam_attempts::Column::Status.eq(in_progress))
            .exec(&txn)
            .await?;

        if claimed.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(None);
        }

        for grade in &grades {
            ExamAnswers::update_many()
                .col_expr(exam_answers::Column::IsCorrect, Expr::value(grade.is_correct))
                .col_expr(
                    exam_answers::Column::AwardedMarks,
                    Expr::value(grade.awarded_marks),
                )
                .filter(exam_answers::Column::AttemptId.eq(attempt_id))
                .filter(exam_answers::Column::QuestionId.eq(grade.question_id))
                .exec(&txn)
                .await?;
        }

        let score: f64 = grades.iter().filter_map(|g| g.awarded_marks).sum();
        ExamAttempts::update_many()
            .col_expr(exam_attempts::Column::Score, Expr::value(Some(score)))
            .filter(exam_attempts::Column::Id.eq(attempt_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        self.get_attempt_by_id(attempt_id).await
    }

    async fn grade_attempt_answers(
        &self,
        attempt_id: i64,
        grades: Vec<AnswerGradeInput>,
        now: DateTime<Utc>,
    ) -> Result<ExamAttempt> {
        let txn = self.db.begin().await?;

        for grade in &grades {
            ExamAnswers::update_many()
                .col_expr(
                    exam_answers::Column::AwardedMarks,
                    Expr::value(Some(grade.awarded_marks)),
                )
                .col_expr(
                    exam_answers::Column::Feedback,
                    Expr::value(grade.feedback.clone()),
                )
                .filter(exam_answers::Column::AttemptId.eq(attempt_id))
                .filter(exam_answers::Column::QuestionId.eq(grade.question_id))
                .exec(&txn)
                .await?;
        }

        let answers = ExamAnswers::find()
            .filter(exam_answers::Column::AttemptId.eq(attempt_id))
            .all(&txn)
            .await?;
        let all_graded = answers.iter().all(|a| a.awarded_marks.is_some());
        let score: f64 = answers.iter().filter_map(|a| a.awarded_marks).sum();

        let attempt = ExamAttempts::find_by_id(attempt_id)
            .one(&txn)
            .await?
            .ok_or_else(|| EduBridgeError::not_found(format!("作答不存在: {attempt_id}")))?;

        let mut model: exam_attempts::ActiveModel = attempt.into();
        model.score = Set(Some(score));
        if all_graded {
            model.status = Set(AttemptStatus::Graded.to_string());
            model.graded_at = Set(Some(now.timestamp()));
        }
        let updated = model.update(&txn).await?;

        txn.commit().await?;

        Ok(updated.into_attempt())
    }
}
