use std::cmp::Ordering;

use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use learnhub_core::{AppError, Paginated, PaginationParams, SortOrder};

use crate::modules::course::model::{Course, CreateCourseDto};
use crate::store::Store;

pub struct CourseService;

impl CourseService {
    #[instrument(skip(store))]
    pub async fn create_course(store: &Store, dto: CreateCourseDto) -> Result<Course, AppError> {
        let course = Course {
            id: Uuid::new_v4(),
            title: dto.title,
            price: dto.price,
            created_at: Utc::now(),
        };

        Ok(store.courses.insert(course.id, course).await)
    }

    /// Lists courses, newest first unless `sortBy`/`sortOrder` say otherwise.
    ///
    /// `sortBy` accepts `title`, `price` and `createdAt`; anything else falls
    /// back to `createdAt`.
    #[instrument(skip(store))]
    pub async fn get_courses(
        store: &Store,
        params: PaginationParams,
    ) -> Result<Paginated<Course>, AppError> {
        let mut courses = store.courses.all().await;

        let sort_by = params.sort_by.as_deref().unwrap_or("createdAt");
        courses.sort_by(|a, b| {
            let ordering = match sort_by {
                "title" => a.title.cmp(&b.title),
                "price" => a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
                _ => a.created_at.cmp(&b.created_at),
            }
            .then(a.id.cmp(&b.id));

            match params.sort_order() {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        Ok(Paginated::from_items(courses, &params))
    }
}
