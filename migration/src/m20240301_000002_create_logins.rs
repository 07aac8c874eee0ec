use sea_orm_migration::prelude::*;

use crate::m20240301_000001_create_users::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // a login row may only exist for a user with the same username
        manager
            .create_table(
                Table::create()
                    .table(Login::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Login::Username)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Login::Password).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_logins_username")
                            .from(Login::Table, Login::Username)
                            .to(User::Table, User::Username)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .take(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(Login::Table).take())
            .await
    }
}

#[derive(DeriveIden)]
enum Login {
    #[sea_orm(iden = "logins")]
    Table,
    Username,
    Password,
}
