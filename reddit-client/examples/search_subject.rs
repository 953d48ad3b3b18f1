use pulse_core::{AppConfig, Subject};
use reddit_client::{PostSearch, RedditClient, TokenProvider};

/// Manual check against the live API:
/// `REDDIT_CLIENT_ID=... REDDIT_CLIENT_SECRET=... cargo run -p reddit-client --example search_subject -- TSLA`
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let subject = std::env::args().nth(1).unwrap_or_else(|| "TSLA".to_string());
    let subject = Subject::parse(&subject)?;

    let config = AppConfig::load(None)?;
    let client = RedditClient::new(&config.reddit)?;

    let token = client.authenticator().obtain_token().await?;
    println!("Token acquired (expires at {:?})", token.expires_at);

    let posts = client.api().search(&subject, &token).await?;
    println!("{} posts mention {}", posts.len(), subject);
    for post in posts {
        println!("[{:>5}] r/{} {}", post.score, post.subreddit, post.title);
        println!("        {}", post.permalink);
    }

    Ok(())
}
