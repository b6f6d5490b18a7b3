use passgate_user::{RegisterInput, UserStore, verify_password};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn register_stores_hashed_password() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;

    let user = passgate_user::register(
        &state.store,
        RegisterInput {
            email: "a@x.com".to_owned(),
            username: "alice".to_owned(),
            password: "pw123".to_owned(),
        },
    )
    .await?;

    assert_eq!(user.id.len(), 26);
    assert_eq!(user.email, "a@x.com");
    assert_eq!(user.username, "alice");
    assert_ne!(user.hashed_password, "pw123");
    assert!(verify_password("pw123", &user.hashed_password));

    let stored = state.store.find_by_username("alice").await?.unwrap();
    assert_eq!(stored, user);
    let stored = state.store.find_by_email("a@x.com").await?.unwrap();
    assert_eq!(stored, user);

    Ok(())
}

#[tokio::test]
async fn validate_unique_emails() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    helpers::create_user(&state, "john").await?;

    let user_2 = passgate_user::register(
        &state.store,
        RegisterInput {
            email: "john@passgate.localhost".to_owned(),
            username: "johnny".to_owned(),
            password: "my_password_v2".to_owned(),
        },
    )
    .await;

    assert_eq!(
        user_2.unwrap_err().to_string(),
        "Email already registered".to_owned()
    );
    assert_eq!(helpers::count_users(&state).await?, 1);
    assert!(state.store.find_by_username("johnny").await?.is_none());

    Ok(())
}

#[tokio::test]
async fn validate_unique_usernames() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    helpers::create_user(&state, "john").await?;

    let user_2 = passgate_user::register(
        &state.store,
        RegisterInput {
            email: "other@passgate.localhost".to_owned(),
            username: "john".to_owned(),
            password: "my_password_v2".to_owned(),
        },
    )
    .await;

    assert_eq!(
        user_2.unwrap_err().to_string(),
        "Username already taken".to_owned()
    );
    assert_eq!(helpers::count_users(&state).await?, 1);
    assert!(
        state
            .store
            .find_by_email("other@passgate.localhost")
            .await?
            .is_none()
    );

    Ok(())
}

#[tokio::test]
async fn insert_maps_unique_violations_to_conflicts() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let john = helpers::create_user(&state, "john").await?;

    // Bypass the pre-insert lookups, as a concurrent registration would.
    let same_email = state
        .store
        .insert(passgate_user::NewUser {
            email: john.email.clone(),
            username: "someone".to_owned(),
            hashed_password: john.hashed_password.clone(),
        })
        .await;
    assert!(matches!(
        same_email,
        Err(passgate_user::UserError::EmailAlreadyExists)
    ));

    let same_username = state
        .store
        .insert(passgate_user::NewUser {
            email: "someone@passgate.localhost".to_owned(),
            username: john.username.clone(),
            hashed_password: john.hashed_password.clone(),
        })
        .await;
    assert!(matches!(
        same_username,
        Err(passgate_user::UserError::UsernameTaken)
    ));

    assert_eq!(helpers::count_users(&state).await?, 1);

    Ok(())
}

#[tokio::test]
async fn list_users_paginates() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    for name in ["ann", "bob", "cid"] {
        helpers::create_user(&state, name).await?;
    }

    let all = state.store.list(0, 100).await?;
    assert_eq!(all.len(), 3);

    let page = state.store.list(1, 1).await?;
    assert_eq!(page.len(), 1);
    assert_eq!(page[0], all[1]);

    assert!(state.store.list(3, 100).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn list_users_accepts_out_of_range_bounds() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    helpers::create_user(&state, "ann").await?;

    assert_eq!(state.store.list(0, u64::MAX).await?.len(), 1);
    assert!(state.store.list(u64::MAX, 100).await?.is_empty());
    assert!(state.store.list(i64::MAX as u64 + 1, 100).await?.is_empty());

    Ok(())
}
