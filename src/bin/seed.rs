use std::sync::Arc;

use microgreens_api::{
    config::AppConfig,
    models::{Region, Role, User},
    services::auth_service,
    state::AppState,
    store::JsonFileStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    // Init bootstraps the admin account and default catalogue when the
    // state file does not exist yet.
    let store = Arc::new(JsonFileStore::new(&config.state_path));
    let state = AppState::init(store).await?;

    ensure_partner(
        &state,
        "Bistro Pod Lipou",
        "lipa123",
        Region::BratislavaArea,
        "Obchodná 52, Bratislava",
        "+421 903 111 222",
    )
    .await?;
    ensure_partner(
        &state,
        "Reštaurácia Fatra",
        "fatra123",
        Region::TrencinArea,
        "Mierové námestie 8, Trenčín",
        "+421 905 333 444",
    )
    .await?;
    ensure_partner(
        &state,
        "Penzión Vršatec",
        "vrsatec123",
        Region::TrencinArea,
        "Športovcov 655, Dubnica nad Váhom",
        "+421 907 555 666",
    )
    .await?;

    println!("Seed completed. State at {}", config.state_path);
    Ok(())
}

async fn ensure_partner(
    state: &AppState,
    name: &str,
    password: &str,
    region: Region,
    address: &str,
    phone: &str,
) -> anyhow::Result<()> {
    let password_hash = auth_service::hash_password(password)?;

    let created = state
        .update(|data| {
            if data.user_by_name_ci(name).is_some() {
                return Ok(false);
            }
            data.users.push(User {
                name: name.to_string(),
                role: Role::Customer,
                password_hash,
                email: None,
                phone: Some(phone.to_string()),
                address: Some(address.to_string()),
                region,
            });
            Ok(true)
        })
        .await?;

    if created {
        println!("Created partner {name} (region={region})");
    } else {
        println!("Partner {name} already exists");
    }
    Ok(())
}
