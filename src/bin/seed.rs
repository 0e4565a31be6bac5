use anyhow::Result;
use std::env;
use trivia_api::{Database, NewQuestion, TriviaRepository};

const CATEGORIES: [&str; 6] = ["Science", "Art", "Geography", "History", "Entertainment", "Sports"];

/// (question, answer, category id, difficulty)
const QUESTIONS: &[(&str, &str, i64, i64)] = &[
    ("Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", "Maya Angelou", 4, 2),
    ("What boxer's original name is Cassius Clay?", "Muhammad Ali", 4, 1),
    ("What movie earned Tom Hanks his third straight Oscar nomination, in 1996?", "Apollo 13", 5, 4),
    ("What actor did author Anne Rice first denounce, then praise in the role of her beloved Lestat?", "Tom Cruise", 5, 4),
    ("Which is the only team to play in every soccer World Cup tournament?", "Brazil", 6, 3),
    ("Which country won the first ever soccer World Cup in 1930?", "Uruguay", 6, 4),
    ("Who invented Peanut Butter?", "George Washington Carver", 4, 2),
    ("What is the largest lake in Africa?", "Lake Victoria", 3, 2),
    ("In which royal palace would you find the Hall of Mirrors?", "The Palace of Versailles", 3, 3),
    ("The Taj Mahal is located in which Indian city?", "Agra", 3, 2),
    ("Which Dutch graphic artist-initials M C was a creator of optical illusions?", "Escher", 2, 1),
    ("La Giaconda is better known as what?", "Mona Lisa", 2, 3),
    ("How many paintings did Van Gogh sell in his lifetime?", "One", 2, 4),
    ("What is the heaviest organ in the human body?", "The Liver", 1, 4),
    ("Who discovered penicillin?", "Alexander Fleming", 1, 3),
    ("Hematology is a branch of medicine involving the study of what?", "Blood", 1, 4),
    ("Which dung beetle was worshipped by the ancient Egyptians?", "Scarab", 4, 4),
];

#[derive(Debug, Default)]
struct SeedStats {
    categories_inserted: usize,
    questions_inserted: usize,
    skipped: Vec<String>,
}

impl SeedStats {
    fn print_summary(&self, dry_run: bool) {
        println!("\n=== Seed Summary ===");
        if dry_run {
            println!("Categories that WOULD BE inserted: {}", self.categories_inserted);
            println!("Questions that WOULD BE inserted: {}", self.questions_inserted);
            println!("\n** DRY RUN MODE - No changes were made **");
        } else {
            println!("Categories inserted: {}", self.categories_inserted);
            println!("Questions inserted: {}", self.questions_inserted);
        }
        for reason in &self.skipped {
            println!("  - skipped: {}", reason);
        }
    }
}

async fn seed_categories(db: &Database, dry_run: bool, stats: &mut SeedStats) -> Result<()> {
    let existing = db.count_categories().await?;
    if existing > 0 {
        stats.skipped.push(format!("categories table already has {} rows", existing));
        return Ok(());
    }

    for name in CATEGORIES {
        if dry_run {
            println!("Would insert category '{}'", name);
        } else {
            let category = db.insert_category(name).await?;
            println!("✓ Inserted category {} ({})", category.id, category.kind);
        }
        stats.categories_inserted += 1;
    }
    Ok(())
}

async fn seed_questions(db: &Database, dry_run: bool, stats: &mut SeedStats) -> Result<()> {
    let existing = db.count_questions().await?;
    if existing > 0 {
        stats.skipped.push(format!("questions table already has {} rows", existing));
        return Ok(());
    }

    for (question, answer, category, difficulty) in QUESTIONS {
        if dry_run {
            println!("Would insert question \"{}\"", question);
        } else {
            let id = db
                .insert_question(NewQuestion {
                    question: Some(question.to_string()),
                    answer: Some(answer.to_string()),
                    category: Some(category.to_string()),
                    difficulty: Some(*difficulty),
                })
                .await?;
            println!("✓ Inserted question {}: \"{}\"", id, question);
        }
        stats.questions_inserted += 1;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().collect();
    let dry_run = args.contains(&"--dry-run".to_string());

    println!("=== Trivia Seed Tool ===");
    if dry_run {
        println!("** RUNNING IN DRY-RUN MODE **");
    }

    let database_url = env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite:trivia.db?mode=rwc".to_string());

    println!("\nConnecting to database: {}", database_url);
    let db = Database::new(&database_url).await?;

    let mut stats = SeedStats::default();
    seed_categories(&db, dry_run, &mut stats).await?;
    seed_questions(&db, dry_run, &mut stats).await?;

    stats.print_summary(dry_run);
    Ok(())
}
