use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use learnhub_core::AppError;

use crate::modules::content::model::{Content, CreateContentDto, UpdateContentDto};
use crate::store::Store;

pub struct ContentService;

impl ContentService {
    #[instrument(skip(store))]
    pub async fn create_content(store: &Store, dto: CreateContentDto) -> Result<Content, AppError> {
        let now = Utc::now();
        let content = Content {
            id: Uuid::new_v4(),
            module_id: dto.module_id,
            title: dto.title,
            description: dto.description,
            content_type: dto.content_type,
            url: dto.url,
            created_at: now,
            updated_at: now,
        };

        Ok(store.contents.insert(content.id, content).await)
    }

    /// Contents of a module, oldest first.
    #[instrument(skip(store))]
    pub async fn get_contents_by_module(
        store: &Store,
        module_id: Uuid,
    ) -> Result<Vec<Content>, AppError> {
        let mut contents = store
            .contents
            .filter(|content| content.module_id == module_id)
            .await;
        contents.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(contents)
    }

    #[instrument(skip(store))]
    pub async fn get_content_by_id(store: &Store, id: Uuid) -> Result<Content, AppError> {
        store
            .contents
            .get(id)
            .await
            .ok_or_else(|| AppError::not_found("Content not found"))
    }

    #[instrument(skip(store))]
    pub async fn update_content(
        store: &Store,
        id: Uuid,
        dto: UpdateContentDto,
    ) -> Result<Content, AppError> {
        store
            .contents
            .update(id, |content| {
                if let Some(title) = dto.title {
                    content.title = title;
                }
                if let Some(description) = dto.description {
                    content.description = Some(description);
                }
                if let Some(content_type) = dto.content_type {
                    content.content_type = content_type;
                }
                if let Some(url) = dto.url {
                    content.url = Some(url);
                }
                content.updated_at = Utc::now();
            })
            .await
            .ok_or_else(|| AppError::not_found("Content not found"))
    }

    #[instrument(skip(store))]
    pub async fn delete_content(store: &Store, id: Uuid) -> Result<Content, AppError> {
        store
            .contents
            .remove(id)
            .await
            .ok_or_else(|| AppError::not_found("Content not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::content::model::ContentType;
    use axum::http::StatusCode;

    fn new_content(module_id: Uuid, title: &str) -> CreateContentDto {
        CreateContentDto {
            module_id,
            title: title.to_string(),
            description: None,
            content_type: ContentType::Video,
            url: Some("https://cdn.example.com/v.mp4".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = Store::new();
        let created = ContentService::create_content(&store, new_content(Uuid::new_v4(), "Intro"))
            .await
            .unwrap();

        let fetched = ContentService::get_content_by_id(&store, created.id)
            .await
            .unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_by_module_only_returns_that_module() {
        let store = Store::new();
        let module_id = Uuid::new_v4();
        ContentService::create_content(&store, new_content(module_id, "One"))
            .await
            .unwrap();
        ContentService::create_content(&store, new_content(module_id, "Two"))
            .await
            .unwrap();
        ContentService::create_content(&store, new_content(Uuid::new_v4(), "Other"))
            .await
            .unwrap();

        let contents = ContentService::get_contents_by_module(&store, module_id)
            .await
            .unwrap();
        assert_eq!(contents.len(), 2);
        assert!(contents.iter().all(|c| c.module_id == module_id));
    }

    #[tokio::test]
    async fn test_update_is_partial() {
        let store = Store::new();
        let created = ContentService::create_content(&store, new_content(Uuid::new_v4(), "Intro"))
            .await
            .unwrap();

        let updated = ContentService::update_content(
            &store,
            created.id,
            UpdateContentDto {
                title: Some("Welcome".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.title, "Welcome");
        assert_eq!(updated.url, created.url);
        assert_eq!(updated.content_type, created.content_type);
    }

    #[tokio::test]
    async fn test_missing_content_is_not_found() {
        let store = Store::new();
        let id = Uuid::new_v4();

        let err = ContentService::get_content_by_id(&store, id).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err = ContentService::update_content(&store, id, UpdateContentDto::default())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err = ContentService::delete_content(&store, id).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_removes_content() {
        let store = Store::new();
        let created = ContentService::create_content(&store, new_content(Uuid::new_v4(), "Intro"))
            .await
            .unwrap();

        ContentService::delete_content(&store, created.id).await.unwrap();
        assert!(ContentService::get_content_by_id(&store, created.id).await.is_err());
    }
}
