use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Post: lookup of an author's posts
        manager
            .create_index(
                Index::create()
                    .name("idx_post_author")
                    .table(Post::Table)
                    .col(Post::AuthorId)
                    .to_owned(),
            )
            .await?;

        // PostTag: lookup of a tag's posts
        manager
            .create_index(
                Index::create()
                    .name("idx_post_tag_tag")
                    .table(PostTag::Table)
                    .col(PostTag::TagId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_post_tag_tag").table(PostTag::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_post_author").table(Post::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Post { Table, AuthorId }

#[derive(DeriveIden)]
enum PostTag { Table, TagId }
