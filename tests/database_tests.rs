use trivia_api::{Database, NewQuestion, QuizScope, TriviaRepository};

async fn new_question(db: &Database, text: Option<&str>, category: Option<&str>) -> i64 {
    db.insert_question(NewQuestion {
        question: text.map(str::to_string),
        answer: Some("answer".to_string()),
        category: category.map(str::to_string),
        difficulty: Some(3),
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn test_question_creation_and_retrieval() {
    let db = Database::new("sqlite::memory:").await.unwrap();

    let id = new_question(&db, Some("What is the largest lake in Africa?"), Some("3")).await;
    let question = db.get_question(id).await.unwrap().unwrap();

    assert_eq!(question.id, id);
    assert_eq!(question.question.as_deref(), Some("What is the largest lake in Africa?"));
    assert_eq!(question.category.as_deref(), Some("3"));
    assert_eq!(question.difficulty, Some(3));
}

#[tokio::test]
async fn test_question_with_all_fields_missing() {
    let db = Database::new("sqlite::memory:").await.unwrap();

    let id = db.insert_question(NewQuestion::default()).await.unwrap();
    let question = db.get_question(id).await.unwrap().unwrap();

    assert_eq!(question.question, None);
    assert_eq!(question.answer, None);
    assert_eq!(question.category, None);
    assert_eq!(question.difficulty, None);
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let db = Database::new("sqlite::memory:").await.unwrap();

    let first = new_question(&db, Some("first"), Some("1")).await;
    let second = new_question(&db, Some("second"), Some("1")).await;
    assert!(db.delete_question(second).await.unwrap());

    let third = new_question(&db, Some("third"), Some("1")).await;
    assert!(third > second);
    assert!(first < second);
}

#[tokio::test]
async fn test_delete_reports_missing_rows() {
    let db = Database::new("sqlite::memory:").await.unwrap();

    let id = new_question(&db, Some("to delete"), Some("1")).await;
    assert!(db.delete_question(id).await.unwrap());
    assert!(!db.delete_question(id).await.unwrap());
    assert!(db.get_question(id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_categories_are_ordered_by_id() {
    let db = Database::new("sqlite::memory:").await.unwrap();
    for name in ["Science", "Art", "Geography"] {
        db.insert_category(name).await.unwrap();
    }

    let categories = db.list_categories().await.unwrap();
    let names: Vec<&str> = categories.iter().map(|c| c.kind.as_str()).collect();
    assert_eq!(names, vec!["Science", "Art", "Geography"]);
    assert_eq!(categories.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 2, 3]);

    assert_eq!(db.get_category(2).await.unwrap().unwrap().kind, "Art");
    assert!(db.get_category(9).await.unwrap().is_none());
}

#[tokio::test]
async fn test_questions_are_listed_by_category() {
    let db = Database::new("sqlite::memory:").await.unwrap();
    let a = new_question(&db, Some("a"), Some("2")).await;
    let b = new_question(&db, Some("b"), Some("1")).await;
    let c = new_question(&db, Some("c"), Some("2")).await;
    let d = new_question(&db, Some("d"), Some("1")).await;

    let ids: Vec<i64> = db.list_questions().await.unwrap().iter().map(|q| q.id).collect();
    assert_eq!(ids, vec![b, d, a, c]);
}

#[tokio::test]
async fn test_search_is_case_insensitive_substring() {
    let db = Database::new("sqlite::memory:").await.unwrap();
    let hit = new_question(&db, Some("Whose autobiography is this?"), Some("4")).await;
    new_question(&db, Some("Which country won?"), Some("6")).await;
    new_question(&db, None, Some("1")).await;

    let results = db.search_questions("AUTOBIO").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, hit);

    assert!(db.search_questions("under_score").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_folds_non_ascii_case() {
    let db = Database::new("sqlite::memory:").await.unwrap();
    let hit = new_question(&db, Some("Which ÉCOLE trained Monet?"), Some("2")).await;
    new_question(&db, Some("Which school trained Degas?"), Some("2")).await;

    let results = db.search_questions("école").await.unwrap();
    assert_eq!(results.iter().map(|q| q.id).collect::<Vec<_>>(), vec![hit]);

    let results = db.search_questions("Ünïcode").await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_category_filters_and_quiz_scopes() {
    let db = Database::new("sqlite::memory:").await.unwrap();
    let one = new_question(&db, Some("one"), Some("1")).await;
    let two = new_question(&db, Some("two"), Some("2")).await;
    let three = new_question(&db, Some("three"), Some("1")).await;

    let science: Vec<i64> = db.questions_in_category(1).await.unwrap().iter().map(|q| q.id).collect();
    assert_eq!(science, vec![one, three]);
    assert!(db.questions_in_category(5).await.unwrap().is_empty());

    assert_eq!(db.question_ids(QuizScope::All).await.unwrap(), vec![one, two, three]);
    assert_eq!(db.question_ids(QuizScope::Category(2)).await.unwrap(), vec![two]);
    assert!(db.question_ids(QuizScope::Category(7)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_counts() {
    let db = Database::new("sqlite::memory:").await.unwrap();
    assert_eq!(db.count_categories().await.unwrap(), 0);
    assert_eq!(db.count_questions().await.unwrap(), 0);

    db.insert_category("Sports").await.unwrap();
    new_question(&db, Some("q"), Some("1")).await;

    assert_eq!(db.count_categories().await.unwrap(), 1);
    assert_eq!(db.count_questions().await.unwrap(), 1);
}
