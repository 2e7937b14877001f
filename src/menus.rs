//! Menu records and their ownership rules.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::db::entities::{menu, Menu};
use crate::error::{AppError, Result};

/// Insert a menu row for a freshly stored image.
pub async fn create(
    db: &DatabaseConnection,
    vendor_id: i32,
    image_filename: &str,
    slug: &str,
) -> Result<menu::Model> {
    let model = menu::ActiveModel {
        vendor_id: Set(vendor_id),
        image_filename: Set(image_filename.to_string()),
        slug: Set(slug.to_string()),
        created_at: Set(crate::db::unix_now()),
        ..Default::default()
    };
    Ok(model.insert(db).await?)
}

/// All menus belonging to one vendor, newest first.
pub async fn list_for_vendor(
    db: &DatabaseConnection,
    vendor_id: i32,
) -> Result<Vec<menu::Model>> {
    Ok(Menu::find()
        .filter(menu::Column::VendorId.eq(vendor_id))
        .order_by_desc(menu::Column::CreatedAt)
        .all(db)
        .await?)
}

/// Public lookup by slug.
pub async fn find_by_slug(db: &DatabaseConnection, slug: &str) -> Result<Option<menu::Model>> {
    Ok(Menu::find()
        .filter(menu::Column::Slug.eq(slug))
        .one(db)
        .await?)
}

/// Fetch a menu on behalf of its owner. A missing row is NotFound; a row
/// owned by someone else is Unauthorized, not NotFound.
pub async fn find_owned(
    db: &DatabaseConnection,
    menu_id: i32,
    vendor_id: i32,
) -> Result<menu::Model> {
    let menu = Menu::find_by_id(menu_id)
        .one(db)
        .await?
        .ok_or(AppError::NotFound)?;
    if menu.vendor_id != vendor_id {
        return Err(AppError::Unauthorized);
    }
    Ok(menu)
}

/// Delete a menu row.
pub async fn delete(db: &DatabaseConnection, menu: menu::Model) -> Result<()> {
    menu.delete(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::entities::vendor;

    async fn seed_vendor(db: &DatabaseConnection, username: &str) -> vendor::Model {
        vendor::ActiveModel {
            username: Set(username.to_string()),
            password_hash: Set("hash".to_string()),
            restaurant_name: Set(format!("{username}'s place")),
            created_at: Set(0),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn slug_lookup_misses_unknown_slugs() {
        let db = crate::db::test_connection().await;
        let vendor = seed_vendor(&db, "rosa").await;
        create(&db, vendor.id, "ab12_menu.png", "slug01").await.unwrap();

        assert!(find_by_slug(&db, "slug01").await.unwrap().is_some());
        assert!(find_by_slug(&db, "nosuch").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn listing_is_scoped_to_the_vendor() {
        let db = crate::db::test_connection().await;
        let rosa = seed_vendor(&db, "rosa").await;
        let marco = seed_vendor(&db, "marco").await;
        create(&db, rosa.id, "a_menu.png", "slug01").await.unwrap();
        create(&db, rosa.id, "b_menu.png", "slug02").await.unwrap();
        create(&db, marco.id, "c_menu.png", "slug03").await.unwrap();

        assert_eq!(list_for_vendor(&db, rosa.id).await.unwrap().len(), 2);
        assert_eq!(list_for_vendor(&db, marco.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn owner_check_distinguishes_missing_from_foreign() {
        let db = crate::db::test_connection().await;
        let rosa = seed_vendor(&db, "rosa").await;
        let marco = seed_vendor(&db, "marco").await;
        let menu = create(&db, rosa.id, "a_menu.png", "slug01").await.unwrap();

        assert!(matches!(
            find_owned(&db, 9999, rosa.id).await.unwrap_err(),
            AppError::NotFound
        ));
        assert!(matches!(
            find_owned(&db, menu.id, marco.id).await.unwrap_err(),
            AppError::Unauthorized
        ));

        let owned = find_owned(&db, menu.id, rosa.id).await.unwrap();
        delete(&db, owned).await.unwrap();
        assert!(find_by_slug(&db, "slug01").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn deleting_a_vendor_cascades_to_its_menus() {
        let db = crate::db::test_connection().await;
        let vendor = seed_vendor(&db, "rosa").await;
        create(&db, vendor.id, "a_menu.png", "slug01").await.unwrap();

        vendor.delete(&db).await.unwrap();
        assert!(Menu::find().all(&db).await.unwrap().is_empty());
    }
}
