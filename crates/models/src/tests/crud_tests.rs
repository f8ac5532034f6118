use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, Set};

use super::memory_db;
use crate::{author, post, post_tag, tag};

#[tokio::test]
async fn author_crud() -> anyhow::Result<()> {
    let db = memory_db().await?;

    let created = author::ActiveModel {
        name: Set(Some("Ada".into())),
        email: Set(Some("ada@example.com".into())),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    assert!(created.id > 0);

    let mut am: author::ActiveModel = created.clone().into();
    am.name = Set(Some("Ada L.".into()));
    let updated = am.update(&db).await?;
    assert_eq!(updated.name.as_deref(), Some("Ada L."));
    assert_eq!(updated.email, created.email);

    author::Entity::delete_by_id(created.id).exec(&db).await?;
    assert!(author::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn post_relations_resolve() -> anyhow::Result<()> {
    let db = memory_db().await?;

    let a = author::ActiveModel { name: Set(Some("Bob".into())), email: Set(Some("bob@example.com".into())), ..Default::default() }
        .insert(&db)
        .await?;
    let p = post::ActiveModel {
        title: Set(Some("Hello".into())),
        content: Set(Some("World".into())),
        author_id: Set(Some(a.id)),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    let t1 = tag::ActiveModel { name: Set(Some("rust".into())), ..Default::default() }.insert(&db).await?;
    let t2 = tag::ActiveModel { name: Set(None), ..Default::default() }.insert(&db).await?;
    for t in [&t1, &t2] {
        post_tag::ActiveModel { post_id: Set(p.id), tag_id: Set(t.id) }.insert(&db).await?;
    }

    let owner = p.find_related(author::Entity).one(&db).await?;
    assert_eq!(owner.map(|o| o.id), Some(a.id));

    let tags = p.find_related(tag::Entity).all(&db).await?;
    assert_eq!(tags.len(), 2);

    let tagged = t1.find_related(post::Entity).all(&db).await?;
    assert_eq!(tagged.iter().map(|x| x.id).collect::<Vec<_>>(), vec![p.id]);

    let authored = post::Entity::find().filter(post::Column::AuthorId.eq(a.id)).all(&db).await?;
    assert_eq!(authored.len(), 1);
    Ok(())
}
