//! Runs against a real MySQL server. Set `TEST_MYSQL_URL`
//! (e.g. `mysql://root:pw@127.0.0.1:3306/railway`) and run with `--ignored`.

use contact_front::db::{MySqlConnector, NewContact, Session};
use contact_front::service::{Environment, Resolver, SessionGuard, SubmissionOutcome, submit};

fn live_env() -> Environment {
    let url = std::env::var("TEST_MYSQL_URL").expect("TEST_MYSQL_URL must be set");
    Environment::from_pairs([("MYSQL_URL", url)])
}

#[tokio::test]
#[ignore = "requires TEST_MYSQL_URL"]
async fn bootstrap_twice_is_a_no_op() {
    let resolver = Resolver::new(MySqlConnector, live_env());
    let mut resolved = resolver.bootstrap().await.expect("bootstrap");

    resolved.conn.ensure_schema().await.expect("second ensure_schema");
    resolved.conn.ping().await.expect("ping");
}

#[tokio::test]
#[ignore = "requires TEST_MYSQL_URL"]
async fn submission_round_trips_with_server_defaults() {
    let guard = SessionGuard::new(Resolver::new(MySqlConnector, live_env()));
    assert!(guard.start().await);

    let contact = NewContact {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        message: "hello".to_string(),
        ..Default::default()
    };
    let SubmissionOutcome::Saved { id } = submit(&guard, &contact).await else {
        panic!("expected the contact to be saved");
    };

    let mut session = guard.with_connection().await.expect("connection");
    let row = session
        .fetch_contact(id)
        .await
        .expect("fetch")
        .expect("row exists");
    assert_eq!(row.id, id);
    assert_eq!(row.name, "Ada");
    assert_eq!(row.company, "");
    assert_eq!(row.email, "ada@example.com");
    assert_eq!(row.phone, "");
    assert_eq!(row.message, "hello");
    assert!(row.created_at <= chrono::Utc::now() + chrono::Duration::minutes(1));
}

#[tokio::test]
#[ignore = "requires TEST_MYSQL_URL"]
async fn insert_is_visible_to_other_sessions_with_autocommit_off() {
    let resolver = Resolver::new(MySqlConnector, live_env());
    let mut writer = resolver.bootstrap().await.expect("writer");
    let mut reader = resolver.resolve().await.expect("reader");

    sqlx::query("SET SESSION autocommit = 0")
        .execute(&mut writer.conn)
        .await
        .expect("disable autocommit");

    let contact = NewContact {
        name: "Grace".to_string(),
        email: "grace@example.com".to_string(),
        ..Default::default()
    };
    let id = writer.conn.insert_contact(&contact).await.expect("insert");

    let row = reader
        .conn
        .fetch_contact(id)
        .await
        .expect("fetch")
        .expect("committed row visible from a second session");
    assert_eq!(row.name, "Grace");
}
