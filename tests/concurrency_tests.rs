// tests/concurrency_tests.rs

use std::path::PathBuf;

use chrono::Utc;
use exam_server::{
    database,
    error::AppError,
    models::question::{NewQuestion, OptionLabel},
    repository::{answers, attempts, exams, questions, users},
    services,
};
use sqlx::SqlitePool;

const TASKS: usize = 12;

/// File-backed database so requests run on separate connections.
struct TestDb {
    pool: SqlitePool,
    path: PathBuf,
}

impl TestDb {
    async fn new() -> Self {
        let path = std::env::temp_dir().join(format!("exam_{}.db", uuid::Uuid::new_v4()));
        let url = format!("sqlite:{}?mode=rwc", path.display());
        let pool = database::connect(&url).await.expect("Failed to open database file");
        database::migrate(&pool).await.expect("Failed to migrate database");
        Self { pool, path }
    }

    async fn cleanup(self) {
        self.pool.close().await;
        for suffix in ["", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

/// One user and a three-question exam.
async fn user_and_exam(pool: &SqlitePool) -> (i64, i64, Vec<i64>) {
    let user_id = users::insert(pool, "racer", "hash", Utc::now()).await.unwrap().id;
    let exam_id = exams::insert(pool, "Race Exam", 10).await.unwrap();

    let mut question_ids = Vec::new();
    for (i, correct) in [OptionLabel::A, OptionLabel::B, OptionLabel::C].into_iter().enumerate() {
        let text = format!("Race question {}", i);
        let id = questions::insert(
            pool,
            exam_id,
            &NewQuestion {
                question_text: &text,
                options: ["1", "2", "3", "4"],
                correct_answer: correct,
            },
        )
        .await
        .unwrap();
        question_ids.push(id);
    }

    (user_id, exam_id, question_ids)
}

async fn attempt_rows(pool: &SqlitePool) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM exam_attempts")
        .fetch_one(pool)
        .await
        .unwrap();
    count
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_starts_share_one_attempt() {
    let db = TestDb::new().await;
    let (user_id, exam_id, _) = user_and_exam(&db.pool).await;

    let mut handles = Vec::new();
    for _ in 0..TASKS {
        let pool = db.pool.clone();
        handles.push(tokio::spawn(async move {
            services::attempts::start_or_resume(&pool, user_id, exam_id, Utc::now()).await
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().expect("start should succeed").attempt_id);
    }
    ids.sort();
    ids.dedup();

    assert_eq!(ids.len(), 1, "all callers must get the same attempt");
    assert_eq!(attempt_rows(&db.pool).await, 1);

    db.cleanup().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_submits_close_the_attempt_once() {
    let db = TestDb::new().await;
    let (user_id, exam_id, question_ids) = user_and_exam(&db.pool).await;

    let view = services::attempts::start_or_resume(&db.pool, user_id, exam_id, Utc::now())
        .await
        .unwrap();
    services::answers::save_answer(&db.pool, user_id, view.attempt_id, question_ids[0], OptionLabel::A)
        .await
        .unwrap();
    services::answers::save_answer(&db.pool, user_id, view.attempt_id, question_ids[1], OptionLabel::D)
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..TASKS {
        let pool = db.pool.clone();
        let attempt_id = view.attempt_id;
        handles.push(tokio::spawn(async move {
            services::scoring::submit(&pool, user_id, attempt_id, Utc::now()).await
        }));
    }

    let mut ok = Vec::new();
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(result) => ok.push(result),
            Err(AppError::Conflict(_)) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(ok.len(), 1);
    assert_eq!(conflicts, TASKS - 1);
    assert_eq!(ok[0].score, 1);
    assert_eq!(ok[0].total_questions, 3);

    let attempt = attempts::find_by_id(&db.pool, view.attempt_id).await.unwrap().unwrap();
    assert_eq!(attempt.score, Some(1));
    assert!(attempt.end_time.is_some());

    db.cleanup().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_saves_leave_one_answer() {
    let db = TestDb::new().await;
    let (user_id, exam_id, question_ids) = user_and_exam(&db.pool).await;
    let view = services::attempts::start_or_resume(&db.pool, user_id, exam_id, Utc::now())
        .await
        .unwrap();

    let mut handles = Vec::new();
    for i in 0..TASKS {
        let pool = db.pool.clone();
        let (attempt_id, question_id) = (view.attempt_id, question_ids[2]);
        let label = OptionLabel::ALL[i % 4];
        handles.push(tokio::spawn(async move {
            services::answers::save_answer(&pool, user_id, attempt_id, question_id, label).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().expect("save should succeed");
    }

    let saved = answers::list_for_attempt(&db.pool, view.attempt_id).await.unwrap();
    assert_eq!(saved.len(), 1);
    assert!(["a", "b", "c", "d"].contains(&saved[0].selected_answer.as_str()));

    db.cleanup().await;
}
