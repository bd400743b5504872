use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::Title;
use crate::domain::post::ports::PostRepository;
use crate::domain::user::models::UserId;
use crate::post::errors::PostError;

pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_error(e: sqlx::Error) -> PostError {
    PostError::DatabaseError(e.to_string())
}

fn row_to_post(row: PgRow) -> Result<Post, PostError> {
    Ok(Post {
        id: PostId(row.try_get("id").map_err(db_error)?),
        author_id: UserId(row.try_get("author_id").map_err(db_error)?),
        title: Title::new(row.try_get("title").map_err(db_error)?)?,
        content: row.try_get("content").map_err(db_error)?,
        created_at: row.try_get("created_at").map_err(db_error)?,
        updated_at: row.try_get("updated_at").map_err(db_error)?,
    })
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: Post) -> Result<Post, PostError> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, author_id, title, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(post.id.0)
        .bind(post.author_id.0)
        .bind(post.title.as_str())
        .bind(&post.content)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(post)
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostError> {
        let row = sqlx::query(
            r#"
            SELECT id, author_id, title, content, created_at, updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(row_to_post).transpose()
    }

    async fn find_by_author(&self, author: &UserId) -> Result<Vec<Post>, PostError> {
        let rows = sqlx::query(
            r#"
            SELECT id, author_id, title, content, created_at, updated_at
            FROM posts
            WHERE author_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(author.0)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(row_to_post).collect()
    }

    async fn update(&self, post: Post) -> Result<Post, PostError> {
        // Author-scoped predicate: if a concurrent delete removed the row
        // after the service's ownership check, no row matches and the
        // mutation reports NotFound instead of touching anything.
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = $3, content = $4, updated_at = $5
            WHERE id = $1 AND author_id = $2
            "#,
        )
        .bind(post.id.0)
        .bind(post.author_id.0)
        .bind(post.title.as_str())
        .bind(&post.content)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(PostError::NotFound(post.id.to_string()));
        }

        Ok(post)
    }

    async fn delete(&self, id: &PostId, author: &UserId) -> Result<(), PostError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1 AND author_id = $2")
            .bind(id.0)
            .bind(author.0)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(PostError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
