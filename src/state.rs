use crate::{config::DatabaseConfig, storage::DbStorage};
use rand::{
    rngs::{adapter::ReseedingRng, OsRng},
    Rng, SeedableRng,
};
use rand_chacha::{ChaCha20Core, ChaCha20Rng};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DbConn, TransactionTrait};
use std::{cell::RefCell, sync::Arc};
use tracing::log::LevelFilter;

pub trait StateTrait: Send + Sync + Clone + 'static {
    type Db: ConnectionTrait + TransactionTrait + Clone + Send + Sync + 'static;
    type Rand: Rng + Send;

    fn db(&self) -> &Self::Db;
    fn rng(&self) -> Self::Rand;

    fn storage(&self) -> DbStorage<Self::Db> {
        DbStorage::new(self.db().clone())
    }
}

pub struct State {
    database: DbConn,
}

impl State {
    pub async fn new(config: &DatabaseConfig) -> anyhow::Result<Arc<Self>> {
        Ok(Self::with_database(Self::connect_database(config).await?))
    }

    pub fn with_database(conn: DbConn) -> Arc<Self> {
        Arc::new(Self { database: conn })
    }

    async fn connect_database(config: &DatabaseConfig) -> anyhow::Result<DbConn> {
        info!("trying to connect to database");

        let mut opts = ConnectOptions::new(config.url.clone());
        opts.max_connections(config.max_connections)
            .sqlx_logging_level(LevelFilter::Debug);

        let db = Database::connect(opts)
            .await
            .inspect_err(|error| error!("failed to connect to database: {error}"))?;

        info!("connected to database");

        Ok(db)
    }
}

thread_local! {
    static CHACHA_THREAD_RNG: RefCell<ReseedingRng<ChaCha20Core, OsRng>> = {
        let rng = ChaCha20Core::from_entropy();
        RefCell::new(ReseedingRng::new(rng, 1024 * 64, OsRng))
    }
}

impl StateTrait for Arc<State> {
    type Db = DbConn;
    type Rand = ChaCha20Rng;

    fn db(&self) -> &Self::Db {
        &self.database
    }

    fn rng(&self) -> Self::Rand {
        CHACHA_THREAD_RNG.with(|rng| ChaCha20Rng::from_seed(rng.borrow_mut().gen()))
    }
}
