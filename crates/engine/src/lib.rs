use chrono::{DateTime, Local, NaiveDate, SubsecRound, Utc};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, Condition, DatabaseConnection};
use uuid::Uuid;

pub use error::EngineError;
pub use normalize::{Direction, default_date, format_date, normalize_amount, parse_date};
pub use savings::Saving;
pub use splits::{Split, compute_split};
pub use summary::{Summary, in_month, summarize};
pub use transactions::Transaction;

use store::Collection;

mod error;
mod normalize;
mod savings;
mod splits;
mod store;
mod summary;
mod transactions;
mod users;
mod util;

type ResultEngine<T> = Result<T, EngineError>;

/// User id used when the builder is not given one.
pub const DEFAULT_USER_ID: &str = "U1";

/// The ledger service.
///
/// Owns the ledger collections and scopes every read and write to
/// the user id it was built with.
pub struct Engine {
    user_id: String,
    transactions: Collection<transactions::Entity>,
    savings: Collection<savings::Entity>,
    splits: Collection<splits::Entity>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Creation instant, kept to microseconds.
    fn now() -> DateTime<Utc> {
        Utc::now().trunc_subsecs(6)
    }

    /// Store a new income or expense.
    ///
    /// `direction` defaults to `EXPENSE`; the amount sign is flipped to agree
    /// with it. A missing or empty `date` means today (local calendar).
    pub async fn create_transaction(
        &self,
        amount: Decimal,
        direction: Option<&str>,
        category: &str,
        note: &str,
        date: Option<&str>,
    ) -> ResultEngine<Transaction> {
        let direction = direction.map(Direction::parse).unwrap_or_default();
        let tx = Transaction {
            id: Uuid::new_v4(),
            user_id: self.user_id.clone(),
            amount: normalize_amount(amount, &direction),
            direction,
            category: category.to_string(),
            note: note.to_string(),
            date: default_date(date, Self::today())?,
            created_at: Self::now(),
        };

        self.transactions
            .insert(transactions::Model::from(&tx))
            .await?;
        tracing::info!(
            "transaction {} stored: {} {} on {}",
            tx.id,
            tx.direction.as_str(),
            tx.amount,
            tx.date
        );
        Ok(tx)
    }

    /// List transactions, newest first by `(date, created_at)`.
    ///
    /// `ym` keeps only those whose date starts with it.
    pub async fn list_transactions(&self, ym: Option<&str>) -> ResultEngine<Vec<Transaction>> {
        let mut txs = self
            .all_transactions()
            .await?
            .into_iter()
            .filter(|tx| ym.is_none_or(|ym| in_month(tx, ym)))
            .collect::<Vec<_>>();
        txs.sort_by(|a, b| (b.date, b.created_at).cmp(&(a.date, a.created_at)));
        tracing::debug!("listed {} transactions (ym: {:?})", txs.len(), ym);
        Ok(txs)
    }

    /// Remove a transaction. Unknown ids are not an error.
    pub async fn delete_transaction(&self, id: &str) -> ResultEngine<()> {
        let removed = self
            .transactions
            .remove(
                Condition::all()
                    .add(transactions::Column::UserId.eq(self.user_id.as_str()))
                    .add(transactions::Column::Id.eq(id)),
            )
            .await?;
        tracing::info!("transaction {id} delete requested, {removed} removed");
        Ok(())
    }

    /// Store a savings deposit. The amount is kept as given.
    pub async fn create_saving(
        &self,
        amount: Decimal,
        note: &str,
        date: Option<&str>,
    ) -> ResultEngine<Saving> {
        let saving = Saving {
            id: Uuid::new_v4(),
            user_id: self.user_id.clone(),
            amount,
            note: note.to_string(),
            date: default_date(date, Self::today())?,
            created_at: Self::now(),
        };

        self.savings.insert(savings::Model::from(&saving)).await?;
        tracing::info!(
            "saving {} stored: {} on {}",
            saving.id,
            saving.amount,
            saving.date
        );
        Ok(saving)
    }

    /// List savings, newest first by `(date, created_at)`.
    pub async fn list_savings(&self) -> ResultEngine<Vec<Saving>> {
        let mut savings = self.all_savings().await?;
        savings.sort_by(|a, b| (b.date, b.created_at).cmp(&(a.date, a.created_at)));
        tracing::debug!("listed {} savings", savings.len());
        Ok(savings)
    }

    /// Remove a saving. Unknown ids are not an error.
    pub async fn delete_saving(&self, id: &str) -> ResultEngine<()> {
        let removed = self
            .savings
            .remove(
                Condition::all()
                    .add(savings::Column::UserId.eq(self.user_id.as_str()))
                    .add(savings::Column::Id.eq(id)),
            )
            .await?;
        tracing::info!("saving {id} delete requested, {removed} removed");
        Ok(())
    }

    /// Split `total_amount` evenly and record the result, dated today.
    pub async fn split(&self, total_amount: Decimal, people_count: i64) -> ResultEngine<Split> {
        let per_person = compute_split(total_amount, people_count)?;
        let split = Split {
            id: Uuid::new_v4(),
            user_id: self.user_id.clone(),
            total_amount,
            people_count,
            per_person,
            date: Self::today(),
            created_at: Self::now(),
        };

        self.splits.insert(splits::Model::from(&split)).await?;
        tracing::info!(
            "split {} stored: {} / {} = {}",
            split.id,
            split.total_amount,
            split.people_count,
            split.per_person
        );
        Ok(split)
    }

    /// List splits, newest first by `(date, created_at)`.
    pub async fn list_splits(&self) -> ResultEngine<Vec<Split>> {
        let mut splits = self
            .splits
            .search(Condition::all().add(splits::Column::UserId.eq(self.user_id.as_str())))
            .await?
            .into_iter()
            .map(Split::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;
        splits.sort_by(|a, b| (b.date, b.created_at).cmp(&(a.date, a.created_at)));
        tracing::debug!("listed {} splits", splits.len());
        Ok(splits)
    }

    /// Remove a split. Unknown ids are not an error.
    pub async fn delete_split(&self, id: &str) -> ResultEngine<()> {
        let removed = self
            .splits
            .remove(
                Condition::all()
                    .add(splits::Column::UserId.eq(self.user_id.as_str()))
                    .add(splits::Column::Id.eq(id)),
            )
            .await?;
        tracing::info!("split {id} delete requested, {removed} removed");
        Ok(())
    }

    /// Totals for month `ym` (`YYYY-MM`, current local month when absent).
    pub async fn summary(&self, ym: Option<&str>) -> ResultEngine<Summary> {
        let ym = match ym {
            Some(ym) if !ym.is_empty() => ym.to_string(),
            _ => Self::today().format("%Y-%m").to_string(),
        };
        let txs = self.all_transactions().await?;
        let savings = self.all_savings().await?;
        summarize(&ym, &txs, &savings)
    }

    async fn all_transactions(&self) -> ResultEngine<Vec<Transaction>> {
        self.transactions
            .search(Condition::all().add(transactions::Column::UserId.eq(self.user_id.as_str())))
            .await?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }

    async fn all_savings(&self) -> ResultEngine<Vec<Saving>> {
        self.savings
            .search(Condition::all().add(savings::Column::UserId.eq(self.user_id.as_str())))
            .await?
            .into_iter()
            .map(Saving::try_from)
            .collect()
    }
}

#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    user_id: Option<String>,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Scope the engine to `user_id` instead of [`DEFAULT_USER_ID`].
    pub fn user_id(mut self, user_id: impl Into<String>) -> EngineBuilder {
        self.user_id = Some(user_id.into());
        self
    }

    /// Construct `Engine`, registering the user if it is not stored yet.
    pub async fn build(self) -> ResultEngine<Engine> {
        let user_id = self
            .user_id
            .unwrap_or_else(|| DEFAULT_USER_ID.to_string());
        if user_id.is_empty() {
            return Err(EngineError::InvalidArgument(
                "user_id must not be empty".to_string(),
            ));
        }

        let users = Collection::<users::Entity>::new(self.database.clone());
        let existing = users
            .search(Condition::all().add(users::Column::Id.eq(user_id.as_str())))
            .await?;
        if existing.is_empty() {
            users
                .insert(users::Model {
                    id: user_id.clone(),
                    created_at: Engine::now(),
                })
                .await?;
            tracing::info!("registered ledger user {user_id}");
        }

        Ok(Engine {
            user_id,
            transactions: Collection::new(self.database.clone()),
            savings: Collection::new(self.database.clone()),
            splits: Collection::new(self.database),
        })
    }
}
