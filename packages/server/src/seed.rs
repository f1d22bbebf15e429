use sea_orm::sea_query::{Index, PostgresQueryBuilder};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr};
use tracing::info;

use crate::entity::{event, player, token};

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't support composite non-unique indexes,
/// so we create them manually on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Composite index for the default event listing:
    // WHERE is_deleted = false AND sale_end BETWEEN ? AND ? ORDER BY sale_end
    let statements = [
        Index::create()
            .if_not_exists()
            .name("idx_events_deleted_sale_end")
            .table(event::Entity)
            .col(event::Column::IsDeleted)
            .col(event::Column::SaleEnd)
            .to_string(PostgresQueryBuilder),
        // The always-include query on every player listing.
        Index::create()
            .if_not_exists()
            .name("idx_players_is_prediction")
            .table(player::Entity)
            .col(player::Column::IsPrediction)
            .to_string(PostgresQueryBuilder),
        // Token listing filtered by chain.
        Index::create()
            .if_not_exists()
            .name("idx_tokens_chain_id")
            .table(token::Entity)
            .col(token::Column::ChainId)
            .to_string(PostgresQueryBuilder),
    ];

    for stmt in statements {
        match db.execute_unprepared(&stmt).await {
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("Failed to create index: {} ({})", e, stmt);
            }
        }
    }

    info!("Ensured listing indexes exist");
    Ok(())
}
