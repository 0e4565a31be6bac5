use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<String>, // Category id, stored as text
    pub difficulty: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

/// Fields for a question about to be inserted. None of them is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestion {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<i64>,
}

/// The two things a `POST /questions` body can ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionSubmission {
    Search(String),
    Create(NewQuestion),
}

impl QuestionSubmission {
    /// Interpret a JSON object posted to `/questions`.
    ///
    /// A non-empty string `searchTerm` selects search mode, and a `searchTerm`
    /// of any other non-null type is rejected. Everything else is a create
    /// request; field types are coerced the way a loosely typed ORM would, and
    /// anything that cannot be coerced is reported as `Err` with a short
    /// description of the offending field.
    pub fn from_json(body: &serde_json::Map<String, Value>) -> Result<Self, String> {
        match body.get("searchTerm") {
            None | Some(Value::Null) => {}
            Some(Value::String(term)) if term.is_empty() => {}
            Some(Value::String(term)) => return Ok(QuestionSubmission::Search(term.clone())),
            Some(other) => return Err(format!("field 'searchTerm' must be a string, got {}", other)),
        }

        Ok(QuestionSubmission::Create(NewQuestion {
            question: text_field(body, "question")?,
            answer: text_field(body, "answer")?,
            category: category_field(body)?,
            difficulty: integer_field(body, "difficulty")?,
        }))
    }
}

fn text_field(body: &serde_json::Map<String, Value>, name: &str) -> Result<Option<String>, String> {
    match body.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(format!("field '{}' must be a string, got {}", name, other)),
    }
}

fn category_field(body: &serde_json::Map<String, Value>) -> Result<Option<String>, String> {
    match body.get("category") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) if n.is_i64() => Ok(Some(n.to_string())),
        Some(other) => Err(format!("field 'category' must be a category id, got {}", other)),
    }
}

fn integer_field(body: &serde_json::Map<String, Value>, name: &str) -> Result<Option<i64>, String> {
    match body.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| format!("field '{}' must be an integer, got {}", name, n)),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| format!("field '{}' must be an integer, got \"{}\"", name, s)),
        Some(other) => Err(format!("field '{}' must be an integer, got {}", name, other)),
    }
}

/// Category id as a client may send it: `3` or `"3"`. Any other JSON value
/// is kept as `Other` so the quiz can reject it as a validation failure
/// rather than a malformed body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Number(i64),
    Text(String),
    Other(Value),
}

impl CategoryRef {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CategoryRef::Number(n) => Some(*n),
            CategoryRef::Text(s) => s.trim().parse().ok(),
            CategoryRef::Other(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizCategory {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub id: Option<CategoryRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub previous_questions: Vec<i64>,
    pub quiz_category: QuizCategory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
}

impl PageParams {
    /// Requested page, falling back to 1 when absent or not an integer.
    ///
    /// Integers too large for `i64` saturate, so they still land past the
    /// last page instead of on page 1.
    pub fn page(&self) -> i64 {
        let Some(raw) = self.page.as_deref().map(str::trim) else {
            return 1;
        };
        if let Ok(page) = raw.parse::<i64>() {
            return page;
        }

        let (negative, digits) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw.strip_prefix('+').unwrap_or(raw)),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            1
        } else if negative {
            i64::MIN
        } else {
            i64::MAX
        }
    }
}

// Response bodies

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionPage {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: Option<String>,
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionList {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub deleted: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResponse {
    pub success: bool,
    pub question: Question,
}
