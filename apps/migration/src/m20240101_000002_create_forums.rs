use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn id_col<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn flag<T: IntoIden>(name: T, default: bool) -> ColumnDef {
    ColumnDef::new(name)
        .boolean()
        .not_null()
        .default(default)
        .to_owned()
}

fn created_at<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ForumAreas::Table)
                    .if_not_exists()
                    .col(id_col(ForumAreas::Id))
                    .col(ColumnDef::new(ForumAreas::ContextId).string().not_null())
                    .col(ColumnDef::new(ForumAreas::TypeId).string().not_null())
                    .col(ColumnDef::new(ForumAreas::Name).string().not_null())
                    .col(flag(ForumAreas::Enabled, true))
                    .col(flag(ForumAreas::Hidden, true))
                    .col(flag(ForumAreas::Locked, false))
                    .col(flag(ForumAreas::Moderated, false))
                    .col(flag(ForumAreas::PostFirst, false))
                    .col(flag(ForumAreas::AutoMarkThreadsRead, false))
                    .col(flag(ForumAreas::SendEmailOut, true))
                    .col(flag(ForumAreas::AvailabilityRestricted, false))
                    .col(created_at(ForumAreas::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_forum_areas_context_type")
                    .table(ForumAreas::Table)
                    .col(ForumAreas::ContextId)
                    .col(ForumAreas::TypeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DiscussionForums::Table)
                    .if_not_exists()
                    .col(id_col(DiscussionForums::Id))
                    .col(ColumnDef::new(DiscussionForums::AreaId).big_integer().not_null())
                    .col(ColumnDef::new(DiscussionForums::ContextId).string().not_null())
                    .col(ColumnDef::new(DiscussionForums::Title).string().not_null())
                    .col(ColumnDef::new(DiscussionForums::CreatedBy).string().not_null())
                    .col(flag(DiscussionForums::Draft, false))
                    .col(flag(DiscussionForums::Moderated, false))
                    .col(flag(DiscussionForums::PostFirst, false))
                    .col(created_at(DiscussionForums::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_discussion_forums_area")
                            .from(DiscussionForums::Table, DiscussionForums::AreaId)
                            .to(ForumAreas::Table, ForumAreas::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_discussion_forums_context")
                    .table(DiscussionForums::Table)
                    .col(DiscussionForums::ContextId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DiscussionTopics::Table)
                    .if_not_exists()
                    .col(id_col(DiscussionTopics::Id))
                    .col(ColumnDef::new(DiscussionTopics::ForumId).big_integer().not_null())
                    .col(ColumnDef::new(DiscussionTopics::Title).string().not_null())
                    .col(ColumnDef::new(DiscussionTopics::CreatedBy).string().not_null())
                    .col(flag(DiscussionTopics::Draft, false))
                    .col(created_at(DiscussionTopics::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_discussion_topics_forum")
                            .from(DiscussionTopics::Table, DiscussionTopics::ForumId)
                            .to(DiscussionForums::Table, DiscussionForums::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ForumMessages::Table)
                    .if_not_exists()
                    .col(id_col(ForumMessages::Id))
                    .col(ColumnDef::new(ForumMessages::TopicId).big_integer().not_null())
                    .col(ColumnDef::new(ForumMessages::Title).string().not_null())
                    .col(ColumnDef::new(ForumMessages::Body).text().not_null())
                    .col(ColumnDef::new(ForumMessages::Author).string().not_null())
                    .col(flag(ForumMessages::Draft, false))
                    .col(flag(ForumMessages::Deleted, false))
                    .col(flag(ForumMessages::Approved, true))
                    .col(ColumnDef::new(ForumMessages::InReplyTo).big_integer().null())
                    .col(created_at(ForumMessages::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_forum_messages_topic")
                            .from(ForumMessages::Table, ForumMessages::TopicId)
                            .to(DiscussionTopics::Table, DiscussionTopics::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ForumMessages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DiscussionTopics::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DiscussionForums::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ForumAreas::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ForumAreas {
    Table,
    Id,
    ContextId,
    TypeId,
    Name,
    Enabled,
    Hidden,
    Locked,
    Moderated,
    PostFirst,
    AutoMarkThreadsRead,
    SendEmailOut,
    AvailabilityRestricted,
    CreatedAt,
}

#[derive(DeriveIden)]
enum DiscussionForums {
    Table,
    Id,
    AreaId,
    ContextId,
    Title,
    CreatedBy,
    Draft,
    Moderated,
    PostFirst,
    CreatedAt,
}

#[derive(DeriveIden)]
enum DiscussionTopics {
    Table,
    Id,
    ForumId,
    Title,
    CreatedBy,
    Draft,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ForumMessages {
    Table,
    Id,
    TopicId,
    Title,
    Body,
    Author,
    Draft,
    Deleted,
    Approved,
    InReplyTo,
    CreatedAt,
}
