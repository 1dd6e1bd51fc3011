use fake::Fake;
use fake::faker::lorem::en::{Paragraph, Sentence};
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use super::models::{EXPIRY_CHOICES, SeedConfig, SnippetSeed};

/// Generates fake snippets in parallel.
pub fn generate_snippets(config: &SeedConfig) -> Vec<SnippetSeed> {
    (0..config.count)
        .into_par_iter()
        .map(|_| {
            let sentence: String = Sentence(3..8).fake();
            let title: String = sentence
                .trim_end_matches('.')
                .chars()
                .take(config.max_title_len)
                .collect();
            let content: String = Paragraph(2..5).fake();
            let choice: usize = (0..EXPIRY_CHOICES.len()).fake();

            SnippetSeed {
                title,
                content,
                expires_days: EXPIRY_CHOICES[choice],
            }
        })
        .collect()
}

pub async fn seed_snippets(
    db: &PgPool,
    config: SeedConfig,
) -> Result<Vec<i64>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("📝 Seeding {} snippets...", config.count);

    let snippets = generate_snippets(&config);
    let ids = insert_snippets_batch(db, &snippets).await?;

    println!(
        "   ✓ Inserted {} snippets in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

/// Inserts snippets inside one transaction using multi-value INSERT statements.
pub async fn insert_snippets_batch(
    db: &PgPool,
    snippets: &[SnippetSeed],
) -> Result<Vec<i64>, Box<dyn std::error::Error>> {
    let mut tx = db.begin().await?;

    const BATCH_SIZE: usize = 500;
    let mut all_ids = Vec::with_capacity(snippets.len());

    for chunk in snippets.chunks(BATCH_SIZE) {
        let ids = insert_snippets_chunk(&mut tx, chunk).await?;
        all_ids.extend(ids);
    }

    tx.commit().await?;
    Ok(all_ids)
}

async fn insert_snippets_chunk(
    tx: &mut Transaction<'_, Postgres>,
    snippets: &[SnippetSeed],
) -> Result<Vec<i64>, Box<dyn std::error::Error>> {
    if snippets.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from("INSERT INTO snippets (title, content, created, expires) VALUES ");
    for i in 0..snippets.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let p = i * 3;
        query.push_str(&format!(
            "(${}, ${}, NOW(), NOW() + make_interval(days => ${}))",
            p + 1,
            p + 2,
            p + 3
        ));
    }
    query.push_str(" RETURNING id");

    let mut q = sqlx::query_scalar(&query);
    for snippet in snippets {
        q = q
            .bind(&snippet.title)
            .bind(&snippet.content)
            .bind(snippet.expires_days);
    }

    let ids = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}

pub async fn clear_snippets(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing snippets...");

    let result = sqlx::query("DELETE FROM snippets")
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} snippets in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_snippets_fit_the_schema() {
        let config = SeedConfig::new(200);
        let snippets = generate_snippets(&config);

        assert_eq!(snippets.len(), 200);
        for snippet in &snippets {
            assert!(!snippet.title.trim().is_empty());
            assert!(snippet.title.chars().count() <= 100);
            assert!(!snippet.content.is_empty());
            assert!(EXPIRY_CHOICES.contains(&snippet.expires_days));
        }
    }

    #[test]
    fn test_zero_count_generates_nothing() {
        assert!(generate_snippets(&SeedConfig::new(0)).is_empty());
    }
}
