use crate::config::Config;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::info;

pub struct DatabaseManager {
    pub pool: Arc<PgPool>,
}

impl DatabaseManager {
    /// 데이터베이스 매니저 생성
    pub async fn new(config: &Config) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;
        info!(
            "{:<12} --> 커넥션 풀 생성 (max_connections: {})",
            "Database", config.max_connections
        );
        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// 트랜잭션 실행
    pub async fn transaction<F, R, E>(&self, f: F) -> Result<R, E>
    where
        F: for<'c> FnOnce(
            &'c mut sqlx::Transaction<'_, sqlx::Postgres>,
        ) -> Pin<Box<dyn Future<Output = Result<R, E>> + Send + 'c>>,
        E: From<sqlx::Error>,
    {
        let mut tx = self.pool.begin().await?;
        let result = f(&mut tx).await;
        match result {
            Ok(r) => {
                tx.commit().await?;
                Ok(r)
            }
            Err(e) => {
                tx.rollback().await?;
                Err(e)
            }
        }
    }

    /// 스키마 초기화 (테이블이 없을 때만 생성)
    pub async fn initialize_database(&self) -> Result<(), sqlx::Error> {
        let create_schema_sql = include_str!("../sql/01-create-schema.sql");
        self.execute_multi_query(create_schema_sql).await?;
        info!("{:<12} --> 스키마 초기화 완료", "Database");
        Ok(())
    }

    /// 여러 쿼리 실행
    async fn execute_multi_query(&self, sql: &str) -> Result<(), sqlx::Error> {
        for query in sql.split(';') {
            let query = query.trim();
            if !query.is_empty() {
                sqlx::query(query).execute(&*self.pool).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn schema_script_creates_every_table() {
        let sql = include_str!("../sql/01-create-schema.sql");
        let statements: Vec<&str> = sql
            .split(';')
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .collect();
        assert_eq!(statements.len(), 6);
        for table in ["profiles", "categories", "auctions", "bids"] {
            assert!(
                statements
                    .iter()
                    .any(|q| q.contains(&format!("CREATE TABLE IF NOT EXISTS {}", table))),
                "missing table {}",
                table
            );
        }
    }
}
