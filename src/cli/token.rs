/// Prints a bearer token for `user` to stdout.
pub fn mint(config: mealgrid::Config, user: String, days: Option<i64>) -> anyhow::Result<()> {
    let token = mealgrid::auth::generate_token(&config.jwt, &user, days)?;

    tracing::info!(user = %user, "token generated");
    println!("{token}");

    Ok(())
}
