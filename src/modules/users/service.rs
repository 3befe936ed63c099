use std::collections::HashMap;

use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use learnhub_auth::{Role, UserStatus};
use learnhub_core::{AppError, Paginated, SortOrder, hash_password_with_cost};

use crate::modules::users::model::{
    ChangeRoleDto, CreateUserDto, UpdateUserDto, User, UserFilterParams, UserRecord,
};
use crate::store::Store;

pub struct UserService;

fn email_taken(rows: &HashMap<Uuid, UserRecord>, email: &str, except: Option<Uuid>) -> bool {
    rows.values()
        .any(|user| Some(user.id) != except && user.email.eq_ignore_ascii_case(email))
}

fn not_found() -> AppError {
    AppError::not_found("User not found")
}

impl UserService {
    /// Creates a user with the given role.
    ///
    /// Emails are unique ignoring ASCII case; a clash is a 409.
    #[instrument(skip(store, dto), fields(email = %dto.email))]
    pub async fn create_user(
        store: &Store,
        dto: CreateUserDto,
        role: Role,
        password_cost: u32,
    ) -> Result<User, AppError> {
        let password_hash = hash_password_with_cost(&dto.password, password_cost)?;
        let email = dto.email.trim().to_lowercase();

        let mut rows = store.users.write().await;
        if email_taken(&rows, &email, None) {
            return Err(AppError::conflict("User with this email already exists"));
        }

        let now = Utc::now();
        let record = UserRecord {
            id: Uuid::new_v4(),
            name: dto.name,
            email,
            password_hash,
            role,
            status: UserStatus::Active,
            created_at: now,
            updated_at: now,
        };
        let user = record.to_user();
        rows.insert(record.id, record);

        info!(user_id = %user.id, role = %role, "User created");
        Ok(user)
    }

    /// Profile of the authenticated caller.
    #[instrument(skip(store))]
    pub async fn get_me(store: &Store, user_id: &str) -> Result<User, AppError> {
        let id = Uuid::parse_str(user_id).map_err(|_| not_found())?;
        store
            .users
            .get(id)
            .await
            .map(|record| record.to_user())
            .ok_or_else(not_found)
    }

    #[instrument(skip(store))]
    pub async fn get_users(
        store: &Store,
        filters: UserFilterParams,
    ) -> Result<Paginated<User>, AppError> {
        let search_term = filters.search_term.as_deref().map(str::to_lowercase);

        let mut users: Vec<User> = store
            .users
            .filter(|user| {
                filters
                    .email
                    .as_deref()
                    .is_none_or(|email| user.email.eq_ignore_ascii_case(email.trim()))
                    && filters.role.is_none_or(|role| user.role == role)
                    && filters.status.is_none_or(|status| user.status == status)
                    && search_term.as_deref().is_none_or(|term| {
                        user.name.to_lowercase().contains(term) || user.email.contains(term)
                    })
            })
            .await
            .iter()
            .map(UserRecord::to_user)
            .collect();

        let sort_by = filters.pagination.sort_by.as_deref().unwrap_or("createdAt");
        let sort_order = filters.pagination.sort_order();
        users.sort_by(|a, b| {
            let ordering = match sort_by {
                "name" => a.name.cmp(&b.name),
                "email" => a.email.cmp(&b.email),
                _ => a.created_at.cmp(&b.created_at),
            }
            .then(a.id.cmp(&b.id));

            match sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        Ok(Paginated::from_items(users, &filters.pagination))
    }

    #[instrument(skip(store))]
    pub async fn update_user(store: &Store, id: Uuid, dto: UpdateUserDto) -> Result<User, AppError> {
        let email = dto.email.map(|email| email.trim().to_lowercase());

        let mut rows = store.users.write().await;
        if let Some(email) = &email
            && email_taken(&rows, email, Some(id))
        {
            return Err(AppError::conflict("User with this email already exists"));
        }

        let record = rows.get_mut(&id).ok_or_else(not_found)?;
        if let Some(name) = dto.name {
            record.name = name;
        }
        if let Some(email) = email {
            record.email = email;
        }
        record.updated_at = Utc::now();

        Ok(record.to_user())
    }

    #[instrument(skip(store))]
    pub async fn change_status(
        store: &Store,
        id: Uuid,
        status: UserStatus,
    ) -> Result<User, AppError> {
        let record = store
            .users
            .update(id, |user| {
                user.status = status;
                user.updated_at = Utc::now();
            })
            .await
            .ok_or_else(not_found)?;

        info!(user_id = %id, status = %status, "User status changed");
        Ok(record.to_user())
    }

    #[instrument(skip(store))]
    pub async fn change_role(store: &Store, dto: ChangeRoleDto) -> Result<User, AppError> {
        let record = store
            .users
            .update(dto.user_id, |user| {
                user.role = dto.role;
                user.updated_at = Utc::now();
            })
            .await
            .ok_or_else(not_found)?;

        info!(user_id = %dto.user_id, role = %dto.role, "User role changed");
        Ok(record.to_user())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use learnhub_core::{PaginationParams, verify_password};

    const COST: u32 = 4;

    fn dto(name: &str, email: &str) -> CreateUserDto {
        CreateUserDto {
            name: name.to_string(),
            email: email.to_string(),
            password: "password123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let store = Store::new();
        let user = UserService::create_user(&store, dto("Ada", "ada@example.com"), Role::Student, COST)
            .await
            .unwrap();

        assert_eq!(user.role, Role::Student);
        assert_eq!(user.status, UserStatus::Active);

        let record = store.users.get(user.id).await.unwrap();
        assert_ne!(record.password_hash, "password123");
        assert!(verify_password("password123", &record.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let store = Store::new();
        UserService::create_user(&store, dto("Ada", "ada@example.com"), Role::Student, COST)
            .await
            .unwrap();

        let err = UserService::create_user(&store, dto("Ada 2", "ADA@example.com"), Role::Admin, COST)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(store.users.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_me() {
        let store = Store::new();
        let user = UserService::create_user(&store, dto("Ada", "ada@example.com"), Role::Student, COST)
            .await
            .unwrap();

        let me = UserService::get_me(&store, &user.id.to_string()).await.unwrap();
        assert_eq!(me, user);

        let err = UserService::get_me(&store, "not-a-uuid").await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_users_filters() {
        let store = Store::new();
        UserService::create_user(&store, dto("Ada Lovelace", "ada@example.com"), Role::Student, COST)
            .await
            .unwrap();
        UserService::create_user(&store, dto("Alan Turing", "alan@example.com"), Role::Instructor, COST)
            .await
            .unwrap();
        UserService::create_user(&store, dto("Grace Hopper", "grace@example.com"), Role::Admin, COST)
            .await
            .unwrap();

        let by_role = UserService::get_users(
            &store,
            UserFilterParams {
                role: Some(Role::Instructor),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(by_role.meta.total, 1);
        assert_eq!(by_role.data[0].name, "Alan Turing");

        let by_search = UserService::get_users(
            &store,
            UserFilterParams {
                search_term: Some("AL".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(by_search.meta.total, 2);

        let by_email = UserService::get_users(
            &store,
            UserFilterParams {
                email: Some("grace@example.com".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(by_email.data.len(), 1);
    }

    #[tokio::test]
    async fn test_get_users_sorted_by_name() {
        let store = Store::new();
        for (name, email) in [("Carol", "c@example.com"), ("Alice", "a@example.com"), ("Bob", "b@example.com")] {
            UserService::create_user(&store, dto(name, email), Role::Student, COST)
                .await
                .unwrap();
        }

        let page = UserService::get_users(
            &store,
            UserFilterParams {
                pagination: PaginationParams {
                    sort_by: Some("name".to_string()),
                    sort_order: Some(SortOrder::Asc),
                    ..Default::default()
                },
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let names: Vec<_> = page.data.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
    }

    #[tokio::test]
    async fn test_update_user_rejects_taken_email() {
        let store = Store::new();
        let ada = UserService::create_user(&store, dto("Ada", "ada@example.com"), Role::Student, COST)
            .await
            .unwrap();
        UserService::create_user(&store, dto("Alan", "alan@example.com"), Role::Student, COST)
            .await
            .unwrap();

        let err = UserService::update_user(
            &store,
            ada.id,
            UpdateUserDto {
                email: Some("alan@example.com".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);

        let same = UserService::update_user(
            &store,
            ada.id,
            UpdateUserDto {
                email: Some("ada@example.com".to_string()),
                name: Some("Ada L.".to_string()),
            },
        )
        .await
        .unwrap();
        assert_eq!(same.name, "Ada L.");
    }

    #[tokio::test]
    async fn test_change_status_and_role() {
        let store = Store::new();
        let user = UserService::create_user(&store, dto("Ada", "ada@example.com"), Role::Student, COST)
            .await
            .unwrap();

        let suspended = UserService::change_status(&store, user.id, UserStatus::Suspended)
            .await
            .unwrap();
        assert_eq!(suspended.status, UserStatus::Suspended);

        let promoted = UserService::change_role(
            &store,
            ChangeRoleDto {
                user_id: user.id,
                role: Role::Instructor,
            },
        )
        .await
        .unwrap();
        assert_eq!(promoted.role, Role::Instructor);

        let err = UserService::change_status(&store, Uuid::new_v4(), UserStatus::Active)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
