use crate::output::print_json;
use chirp_core::config::Credentials;
use chirp_core::publisher::HttpPublisher;

pub fn run(prefix: &str, json: bool) -> anyhow::Result<()> {
    let credentials = Credentials::from_env(prefix)?;
    let publisher = HttpPublisher::new(credentials);
    let username = publisher.verify_credentials()?;

    if json {
        return print_json(&serde_json::json!({ "username": username }));
    }
    println!("authenticated as @{username}");
    Ok(())
}
