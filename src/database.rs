use anyhow::Result;
use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::log_db_operation;
use crate::models::*;
use crate::quiz::QuizScope;

const QUESTION_COLUMNS: &str = "id, question, answer, category, difficulty";

/// Storage operations the trivia service needs.
#[async_trait]
pub trait TriviaRepository: Send + Sync {
    /// All categories ordered by id.
    async fn list_categories(&self) -> Result<Vec<Category>>;

    async fn get_category(&self, id: i64) -> Result<Option<Category>>;

    /// All questions ordered by category, then id.
    async fn list_questions(&self) -> Result<Vec<Question>>;

    async fn get_question(&self, id: i64) -> Result<Option<Question>>;

    /// Insert a question and return its generated id.
    async fn insert_question(&self, question: NewQuestion) -> Result<i64>;

    /// Delete a question; `false` when no row had that id.
    async fn delete_question(&self, id: i64) -> Result<bool>;

    /// Questions whose text contains `term`, ignoring case, ordered by id.
    async fn search_questions(&self, term: &str) -> Result<Vec<Question>>;

    /// Questions filed under `category_id`, ordered by id.
    async fn questions_in_category(&self, category_id: i64) -> Result<Vec<Question>>;

    /// Ids of every question a quiz in `scope` may ask.
    async fn question_ids(&self, scope: QuizScope) -> Result<Vec<i64>>;
}

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url).await?;
        let db = Database { pool };
        db.migrate().await?;
        Ok(db)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY,
                "type" TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        // category is the text form of a categories.id, deliberately not a foreign key
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS questions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                question TEXT,
                answer TEXT,
                category TEXT,
                difficulty INTEGER
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        log_db_operation!(info, "migrate", "schema ready");
        Ok(())
    }

    // Seeding helpers. Categories are never written through the HTTP API.
    pub async fn insert_category(&self, kind: &str) -> Result<Category> {
        let result = sqlx::query(r#"INSERT INTO categories ("type") VALUES (?1)"#)
            .bind(kind)
            .execute(&self.pool)
            .await?;

        Ok(Category {
            id: result.last_insert_rowid(),
            kind: kind.to_string(),
        })
    }

    pub async fn count_categories(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_questions(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM questions")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl TriviaRepository for Database {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(r#"SELECT id, "type" FROM categories ORDER BY id"#)
            .fetch_all(&self.pool)
            .await?;

        log_db_operation!(debug, "list_categories", count = categories.len());
        Ok(categories)
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(r#"SELECT id, "type" FROM categories WHERE id = ?1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(category)
    }

    async fn list_questions(&self) -> Result<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>(&format!(
            "SELECT {} FROM questions ORDER BY category, id",
            QUESTION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        log_db_operation!(debug, "list_questions", count = questions.len());
        Ok(questions)
    }

    async fn get_question(&self, id: i64) -> Result<Option<Question>> {
        let question = sqlx::query_as::<_, Question>(&format!(
            "SELECT {} FROM questions WHERE id = ?1",
            QUESTION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(question)
    }

    async fn insert_question(&self, question: NewQuestion) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&question.question)
        .bind(&question.answer)
        .bind(&question.category)
        .bind(question.difficulty)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        log_db_operation!(debug, "insert_question", question_id = id);
        Ok(id)
    }

    async fn delete_question(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM questions WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        log_db_operation!(debug, "delete_question", question_id = id);
        Ok(result.rows_affected() > 0)
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>> {
        // SQLite's lower() only folds ASCII, so matching happens here
        let needle = term.to_lowercase();
        let questions: Vec<Question> = sqlx::query_as::<_, Question>(&format!(
            "SELECT {} FROM questions WHERE question IS NOT NULL ORDER BY id",
            QUESTION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .filter(|q| {
            q.question
                .as_deref()
                .is_some_and(|text| text.to_lowercase().contains(&needle))
        })
        .collect();

        log_db_operation!(debug, "search_questions", count = questions.len());
        Ok(questions)
    }

    async fn questions_in_category(&self, category_id: i64) -> Result<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>(&format!(
            "SELECT {} FROM questions WHERE category = ?1 ORDER BY id",
            QUESTION_COLUMNS
        ))
        .bind(category_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        log_db_operation!(debug, "questions_in_category", count = questions.len());
        Ok(questions)
    }

    async fn question_ids(&self, scope: QuizScope) -> Result<Vec<i64>> {
        let ids: Vec<i64> = match scope {
            QuizScope::All => {
                sqlx::query_scalar("SELECT id FROM questions ORDER BY id")
                    .fetch_all(&self.pool)
                    .await?
            }
            QuizScope::Category(category_id) => {
                sqlx::query_scalar("SELECT id FROM questions WHERE category = ?1 ORDER BY id")
                    .bind(category_id.to_string())
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        log_db_operation!(debug, "question_ids", count = ids.len());
        Ok(ids)
    }
}
