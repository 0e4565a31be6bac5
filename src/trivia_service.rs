use std::sync::Arc;

use crate::database::TriviaRepository;
use crate::errors::ApiError;
use crate::models::*;
use crate::pagination::paginate;
use crate::quiz::QuizSelector;
use crate::{log_service_start, log_service_success, log_service_warn};

const SERVICE: &str = "trivia_service";

#[derive(Clone)]
pub struct TriviaService {
    repo: Arc<dyn TriviaRepository>,
    selector: QuizSelector,
}

impl TriviaService {
    pub fn new(repo: Arc<dyn TriviaRepository>) -> Self {
        Self {
            repo,
            selector: QuizSelector::new(),
        }
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        log_service_start!(SERVICE, "list_categories");
        let categories = self.repo.list_categories().await?;
        if categories.is_empty() {
            return Err(ApiError::NotFound("no categories exist".to_string()));
        }

        log_service_success!(SERVICE, "list_categories", count = categories.len());
        Ok(categories)
    }

    /// One page of questions ordered by category.
    ///
    /// `current_category` names the category of the first question on the
    /// page, not a category the client selected.
    pub async fn list_questions(&self, page: i64) -> Result<QuestionPage, ApiError> {
        log_service_start!(SERVICE, "list_questions");
        let all = self.repo.list_questions().await?;
        let questions = paginate(page, &all);
        let Some(first) = questions.first() else {
            return Err(ApiError::NotFound(format!("page {} is empty", page)));
        };

        let current_category = self.category_name_of(first).await?;
        let categories = self.repo.list_categories().await?;

        log_service_success!(SERVICE, "list_questions", count = questions.len());
        Ok(QuestionPage {
            success: true,
            total_questions: all.len(),
            questions,
            current_category,
            categories,
        })
    }

    pub async fn delete_question(&self, id: i64) -> Result<i64, ApiError> {
        log_service_start!(SERVICE, "delete_question", question_id = id);
        if self.repo.get_question(id).await?.is_none() {
            return Err(ApiError::NotFound(format!("question with id '{}' not found", id)));
        }

        if !self.repo.delete_question(id).await? {
            // Removed between lookup and delete.
            return Err(ApiError::NotFound(format!("question with id '{}' not found", id)));
        }

        log_service_success!(SERVICE, "delete_question", "question deleted");
        Ok(id)
    }

    pub async fn create_question(&self, question: NewQuestion) -> Result<i64, ApiError> {
        log_service_start!(SERVICE, "create_question");
        let id = self.repo.insert_question(question).await?;

        log_service_success!(SERVICE, "create_question", "question created");
        Ok(id)
    }

    /// Case-insensitive substring search over question text.
    ///
    /// No matches is not an error: the list is empty and `current_category`
    /// is `None`.
    pub async fn search_questions(&self, term: &str) -> Result<QuestionList, ApiError> {
        log_service_start!(SERVICE, "search_questions");
        let questions = self.repo.search_questions(term).await?;
        let current_category = match questions.first() {
            Some(first) => self.category_name_of(first).await?,
            None => None,
        };

        log_service_success!(SERVICE, "search_questions", count = questions.len());
        Ok(QuestionList {
            success: true,
            total_questions: questions.len(),
            questions,
            current_category,
        })
    }

    pub async fn questions_in_category(&self, category_id: i64) -> Result<QuestionList, ApiError> {
        log_service_start!(SERVICE, "questions_in_category");
        let Some(category) = self.repo.get_category(category_id).await? else {
            return Err(ApiError::NotFound(format!("category with id '{}' not found", category_id)));
        };

        let questions = self.repo.questions_in_category(category_id).await?;

        log_service_success!(SERVICE, "questions_in_category", count = questions.len());
        Ok(QuestionList {
            success: true,
            total_questions: questions.len(),
            questions,
            current_category: Some(category.kind),
        })
    }

    /// Pick a random question the client has not been asked yet.
    pub async fn next_quiz_question(&self, request: &QuizRequest) -> Result<Question, ApiError> {
        log_service_start!(SERVICE, "next_quiz_question");
        let scope = request.quiz_category.scope().map_err(ApiError::ValidationError)?;
        let candidates = self.repo.question_ids(scope).await?;

        let picked = {
            let mut rng = rand::thread_rng();
            self.selector.pick(&candidates, &request.previous_questions, &mut rng)
        };
        let Some(id) = picked else {
            return Err(ApiError::QuizExhausted);
        };

        match self.repo.get_question(id).await? {
            Some(question) => {
                log_service_success!(SERVICE, "next_quiz_question", "question selected");
                Ok(question)
            }
            None => Err(ApiError::NotFound(format!("question with id '{}' not found", id))),
        }
    }

    /// Display name of the question's category, `None` if the reference dangles.
    async fn category_name_of(&self, question: &Question) -> Result<Option<String>, ApiError> {
        let Some(category_id) = question.category.as_deref().and_then(|c| c.trim().parse::<i64>().ok()) else {
            log_service_warn!(SERVICE, "category_name_of", format!("question {} has no usable category", question.id));
            return Ok(None);
        };

        match self.repo.get_category(category_id).await? {
            Some(category) => Ok(Some(category.kind)),
            None => {
                log_service_warn!(
                    SERVICE,
                    "category_name_of",
                    format!("question {} references missing category {}", question.id, category_id)
                );
                Ok(None)
            }
        }
    }
}
