use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{Direction, Engine, EngineError};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

fn dec(value: &str) -> Decimal {
    value.parse().unwrap()
}

fn day(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

async fn count(db: &DatabaseConnection, table: &str) -> i64 {
    let row = db
        .query_one(Statement::from_string(
            db.get_database_backend(),
            format!("SELECT COUNT(*) AS n FROM {table}"),
        ))
        .await
        .unwrap()
        .unwrap();
    row.try_get("", "n").unwrap()
}

#[tokio::test]
async fn build_registers_the_user_once() {
    let (engine, db) = engine_with_db().await;
    assert_eq!(engine.user_id(), engine::DEFAULT_USER_ID);
    assert_eq!(count(&db, "users").await, 1);

    let again = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    assert_eq!(again.user_id(), "U1");
    assert_eq!(count(&db, "users").await, 1);
}

#[tokio::test]
async fn empty_user_id_is_rejected() {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();

    let err = Engine::builder()
        .database(db)
        .user_id("")
        .build()
        .await
        .err()
        .unwrap();
    assert!(matches!(err, EngineError::InvalidArgument(_)));
}

#[tokio::test]
async fn expense_and_income_signs_are_normalized() {
    let (engine, _db) = engine_with_db().await;

    let expense = engine
        .create_transaction(dec("42.10"), Some("expense"), "food", "lunch", Some("2024-06-01"))
        .await
        .unwrap();
    assert_eq!(expense.amount, dec("-42.10"));
    assert_eq!(expense.direction, Direction::Expense);

    let income = engine
        .create_transaction(dec("-1500"), Some("INCOME"), "salary", "", Some("2024-06-02"))
        .await
        .unwrap();
    assert_eq!(income.amount, dec("1500"));
    assert_eq!(income.direction, Direction::Income);

    let stored = engine.list_transactions(None).await.unwrap();
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().any(|tx| tx.amount == dec("-42.10")));
    assert!(stored.iter().any(|tx| tx.amount == dec("1500")));
}

#[tokio::test]
async fn missing_direction_defaults_to_expense_and_unknown_is_kept() {
    let (engine, _db) = engine_with_db().await;

    let defaulted = engine
        .create_transaction(dec("9"), None, "", "", None)
        .await
        .unwrap();
    assert_eq!(defaulted.direction, Direction::Expense);
    assert_eq!(defaulted.amount, dec("-9"));
    assert_eq!(defaulted.date, Local::now().date_naive());

    let other = engine
        .create_transaction(dec("9"), Some("gift"), "", "", None)
        .await
        .unwrap();
    assert_eq!(other.direction, Direction::Other("GIFT".to_string()));
    assert_eq!(other.amount, dec("9"));

    let stored = engine.list_transactions(None).await.unwrap();
    assert!(
        stored
            .iter()
            .any(|tx| tx.direction == Direction::Other("GIFT".to_string()))
    );
}

#[tokio::test]
async fn invalid_date_is_rejected_and_nothing_is_stored() {
    let (engine, db) = engine_with_db().await;

    let err = engine
        .create_transaction(dec("1"), Some("INCOME"), "", "", Some("june first"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidArgument(_)));
    assert_eq!(count(&db, "transactions").await, 0);
}

#[tokio::test]
async fn list_is_newest_first_and_filtered_by_month() {
    let (engine, _db) = engine_with_db().await;

    for date in ["2024-06-15", "2024-05-30", "2024-06-01", "2024-07-01", "2024-06-15"] {
        engine
            .create_transaction(dec("1"), Some("EXPENSE"), "", "", Some(date))
            .await
            .unwrap();
    }

    let all = engine.list_transactions(None).await.unwrap();
    assert_eq!(all.len(), 5);
    for pair in all.windows(2) {
        assert!((pair[0].date, pair[0].created_at) >= (pair[1].date, pair[1].created_at));
    }
    assert_eq!(all[0].date, day("2024-07-01"));
    assert_eq!(all[4].date, day("2024-05-30"));

    let june = engine.list_transactions(Some("2024-06")).await.unwrap();
    assert_eq!(june.len(), 3);
    assert!(june.iter().all(|tx| tx.date.format("%Y-%m").to_string() == "2024-06"));

    let none = engine.list_transactions(Some("2023-06")).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn created_transaction_round_trips() {
    let (engine, _db) = engine_with_db().await;

    let created = engine
        .create_transaction(dec("12.34"), Some("EXPENSE"), "bills", "power", Some("2024-03-09"))
        .await
        .unwrap();

    let listed = engine.list_transactions(None).await.unwrap();
    assert_eq!(listed, vec![created.clone()]);

    let mismatched = engine.list_transactions(Some("2024-04")).await.unwrap();
    assert!(mismatched.is_empty());
}

#[tokio::test]
async fn deleting_is_idempotent() {
    let (engine, db) = engine_with_db().await;

    let tx = engine
        .create_transaction(dec("5"), Some("EXPENSE"), "", "", Some("2024-01-01"))
        .await
        .unwrap();

    engine
        .delete_transaction("00000000-0000-0000-0000-000000000000")
        .await
        .unwrap();
    engine.delete_transaction("not-a-uuid").await.unwrap();
    assert_eq!(count(&db, "transactions").await, 1);

    engine.delete_transaction(&tx.id.to_string()).await.unwrap();
    engine.delete_transaction(&tx.id.to_string()).await.unwrap();
    assert_eq!(count(&db, "transactions").await, 0);
}

#[tokio::test]
async fn savings_keep_their_sign_and_sort_newest_first() {
    let (engine, db) = engine_with_db().await;

    let withdrawal = engine
        .create_saving(dec("-20"), "withdrawal", Some("2024-02-01"))
        .await
        .unwrap();
    assert_eq!(withdrawal.amount, dec("-20"));
    engine
        .create_saving(dec("100"), "deposit", Some("2024-03-01"))
        .await
        .unwrap();

    let savings = engine.list_savings().await.unwrap();
    assert_eq!(savings.len(), 2);
    assert_eq!(savings[0].date, day("2024-03-01"));
    assert_eq!(savings[1].id, withdrawal.id);

    engine.delete_saving(&withdrawal.id.to_string()).await.unwrap();
    engine.delete_saving(&withdrawal.id.to_string()).await.unwrap();
    assert_eq!(count(&db, "savings").await, 1);
}

#[tokio::test]
async fn summary_reduces_one_month_and_all_savings() {
    let (engine, _db) = engine_with_db().await;

    engine
        .create_transaction(dec("-50"), Some("EXPENSE"), "", "", Some("2024-06-01"))
        .await
        .unwrap();
    engine
        .create_transaction(dec("200"), Some("INCOME"), "", "", Some("2024-06-15"))
        .await
        .unwrap();
    engine
        .create_transaction(dec("-10"), Some("EXPENSE"), "", "", Some("2024-07-01"))
        .await
        .unwrap();
    engine
        .create_saving(dec("30"), "", Some("2024-06-20"))
        .await
        .unwrap();
    engine
        .create_saving(dec("70"), "", Some("2023-01-01"))
        .await
        .unwrap();

    let summary = engine.summary(Some("2024-06")).await.unwrap();
    assert_eq!(summary.ym, "2024-06");
    assert_eq!(summary.income, dec("200"));
    assert_eq!(summary.expense, dec("50"));
    assert_eq!(summary.net, dec("150"));
    assert_eq!(summary.total_saving, dec("100"));
}

#[tokio::test]
async fn summary_defaults_to_current_month() {
    let (engine, _db) = engine_with_db().await;

    engine
        .create_transaction(dec("8"), Some("INCOME"), "", "", None)
        .await
        .unwrap();

    let expected_ym = Local::now().date_naive().format("%Y-%m").to_string();
    for ym in [None, Some("")] {
        let summary = engine.summary(ym).await.unwrap();
        assert_eq!(summary.ym, expected_ym);
        assert_eq!(summary.income, dec("8"));
    }
}

#[tokio::test]
async fn summary_overflow_is_an_error_not_a_panic() {
    let (engine, _db) = engine_with_db().await;
    let big = dec("50000000000000000000000000000");

    for date in ["2024-06-01", "2024-06-02"] {
        engine
            .create_transaction(big, Some("INCOME"), "", "", Some(date))
            .await
            .unwrap();
    }
    let err = engine.summary(Some("2024-06")).await.unwrap_err();
    assert_eq!(err, EngineError::Overflow("income".to_string()));

    // other months are unaffected until the savings total overflows too
    let summary = engine.summary(Some("2024-07")).await.unwrap();
    assert_eq!(summary.income, Decimal::ZERO);

    for date in ["2020-01-01", "2021-01-01"] {
        engine.create_saving(big, "", Some(date)).await.unwrap();
    }
    let err = engine.summary(Some("2024-07")).await.unwrap_err();
    assert_eq!(err, EngineError::Overflow("total_saving".to_string()));
}

#[tokio::test]
async fn split_is_rounded_and_recorded_today() {
    let (engine, db) = engine_with_db().await;

    let split = engine.split(dec("100"), 3).await.unwrap();
    assert_eq!(split.per_person, dec("33.33"));
    assert_eq!(split.total_amount, dec("100"));
    assert_eq!(split.people_count, 3);
    assert_eq!(split.date, Local::now().date_naive());

    let splits = engine.list_splits().await.unwrap();
    assert_eq!(splits, vec![split.clone()]);

    engine.delete_split(&split.id.to_string()).await.unwrap();
    engine.delete_split(&split.id.to_string()).await.unwrap();
    assert_eq!(count(&db, "splits").await, 0);
}

#[tokio::test]
async fn split_with_no_people_fails_without_storing() {
    let (engine, db) = engine_with_db().await;

    let err = engine.split(dec("100"), 0).await.unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidArgument("people_count must be > 0".to_string())
    );
    assert_eq!(count(&db, "splits").await, 0);
}

#[tokio::test]
async fn records_are_scoped_to_the_configured_user() {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let alice = Engine::builder()
        .database(db.clone())
        .user_id("alice")
        .build()
        .await
        .unwrap();
    let bob = Engine::builder()
        .database(db.clone())
        .user_id("bob")
        .build()
        .await
        .unwrap();

    let tx = alice
        .create_transaction(dec("3"), Some("INCOME"), "", "", Some("2024-06-01"))
        .await
        .unwrap();
    assert_eq!(tx.user_id, "alice");
    assert!(bob.list_transactions(None).await.unwrap().is_empty());

    bob.delete_transaction(&tx.id.to_string()).await.unwrap();
    assert_eq!(alice.list_transactions(None).await.unwrap().len(), 1);
    assert_eq!(count(&db, "users").await, 2);
}
