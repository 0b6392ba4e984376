use dotenv::dotenv;
use social_feed::{repositories::Repositories, settings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let settings = settings::load_settings()?;
    let db = social_feed::setup_database(&settings).await?;

    seed::seed_data(&Repositories::postgres(db)).await?;

    Ok(())
}

mod seed {
    use chrono::{Duration, Utc};
    use fake::{
        faker::{internet::en::SafeEmail, lorem::en::Sentence, name::en::Name},
        Fake,
    };
    use social_feed::{
        models::{statuses::MAX_STATUS_LENGTH, users::NewUser},
        repositories::Repositories,
    };
    use uuid::Uuid;

    const USER_COUNT: usize = 50;
    const STATUSES_PER_USER: usize = 3;

    pub async fn seed_data(repos: &Repositories) -> Result<(), Box<dyn std::error::Error>> {
        if repos.users.count_users().await? > 0 {
            println!("Data already exists, skipping seed");
            return Ok(());
        }

        let user_ids = seed_users(repos, USER_COUNT).await?;
        seed_statuses(repos, &user_ids, STATUSES_PER_USER).await?;
        seed_follows(repos, &user_ids).await?;

        println!("Seed data inserted successfully");
        Ok(())
    }

    async fn seed_users(
        repos: &Repositories,
        count: usize,
    ) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
        let mut user_ids = Vec::with_capacity(count);

        for i in 0..count {
            let user = if i == 0 {
                NewUser {
                    name: "Summer".to_string(),
                    email: "summer@example.com".to_string(),
                    is_admin: true,
                }
            } else {
                let name: String = Name().fake();
                let email: String = SafeEmail().fake();
                NewUser {
                    name: name.chars().take(50).collect(),
                    // Faker emails repeat across 50 draws, the index keeps them unique.
                    email: format!("{i}.{email}"),
                    is_admin: false,
                }
            };

            let created = repos.users.create_user(user).await?;
            user_ids.push(created.id);
        }

        Ok(user_ids)
    }

    async fn seed_statuses(
        repos: &Repositories,
        user_ids: &[Uuid],
        per_user: usize,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let now = Utc::now();
        let mut minutes_ago = 0;

        for user_id in user_ids {
            for _ in 0..per_user {
                let sentence: String = Sentence(3..10).fake();
                let body: String = sentence.chars().take(MAX_STATUS_LENGTH).collect();
                minutes_ago += 7;

                repos
                    .statuses
                    .create_status(*user_id, &body, now - Duration::minutes(minutes_ago))
                    .await?;
            }
        }

        Ok(())
    }

    async fn seed_follows(
        repos: &Repositories,
        user_ids: &[Uuid],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let Some((first, others)) = user_ids.split_first() else {
            return Ok(());
        };

        repos.follows.insert_edges(*first, others).await?;
        for follower in others {
            repos.follows.insert_edges(*follower, &[*first]).await?;
        }

        Ok(())
    }
}
