use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::DbConn;
use crate::models::{
    pagination::PageRequest,
    users::{NewUser, User},
};
use crate::repository::StoreResult;

const USER_COLUMNS: &str = "id, name, email, password_hash, created_at, updated_at";

/// Creates a new user in the database.
pub async fn create_user(conn: &mut DbConn, new_user: NewUser) -> StoreResult<User> {
    let id = new_user.id.unwrap_or_else(Uuid::now_v7);

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, name, email, password_hash)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, email, password_hash, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(&new_user.name)
    .bind(&new_user.email)
    .bind(new_user.password_hash.as_deref())
    .fetch_one(conn)
    .await?;

    Ok(user)
}

/// Lists all users in the database, newest first.
pub async fn list_users(conn: &mut DbConn) -> StoreResult<Vec<User>> {
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password_hash, created_at, updated_at
        FROM users
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(conn)
    .await?;

    Ok(users)
}

/// Gets a single user by their ID.
pub async fn get_user_by_id(conn: &mut DbConn, id: Uuid) -> StoreResult<User> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password_hash, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_one(conn)
    .await?;

    Ok(user)
}

/// Gets a single user by their (already normalized) email address.
pub async fn get_user_by_email(conn: &mut DbConn, email: &str) -> StoreResult<User> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password_hash, created_at, updated_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_one(conn)
    .await?;

    Ok(user)
}

/// Updates a user's profile fields.
pub async fn update_user(conn: &mut DbConn, user: &User) -> StoreResult<User> {
    let updated_user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET name = $1, email = $2, updated_at = now()
        WHERE id = $3
        RETURNING id, name, email, password_hash, created_at, updated_at
        "#,
    )
    .bind(&user.name)
    .bind(&user.email)
    .bind(user.id)
    .fetch_one(conn)
    .await?;

    Ok(updated_user)
}

/// Updates a user's password hash.
pub async fn update_user_password(
    conn: &mut DbConn,
    user_id: Uuid,
    password_hash: &str,
) -> StoreResult<()> {
    let rows_affected = sqlx::query(
        r#"
        UPDATE users
        SET password_hash = $1, updated_at = now()
        WHERE id = $2
        "#,
    )
    .bind(password_hash)
    .bind(user_id)
    .execute(conn)
    .await?
    .rows_affected();

    if rows_affected == 0 {
        return Err(sqlx::Error::RowNotFound.into());
    }

    Ok(())
}

/// Deletes a user by their ID.
pub async fn delete_user(conn: &mut DbConn, id: Uuid) -> StoreResult<()> {
    let rows_affected = sqlx::query(
        r#"
        DELETE FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(conn)
    .await?
    .rows_affected();

    if rows_affected == 0 {
        return Err(sqlx::Error::RowNotFound.into());
    }

    Ok(())
}

/// Escapes `LIKE` wildcards so the search term only ever matches literally.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn push_search_filter(builder: &mut QueryBuilder<'_, Postgres>, search: &str) {
    if search.is_empty() {
        return;
    }

    let pattern = like_pattern(search);
    builder
        .push(" WHERE (name ILIKE ")
        .push_bind(pattern.clone())
        .push(" OR email ILIKE ")
        .push_bind(pattern)
        .push(")");
}

/// Counts users matching the search term of `request`.
pub async fn count_users(conn: &mut DbConn, request: &PageRequest) -> StoreResult<i64> {
    let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM users");
    push_search_filter(&mut builder, &request.search);

    let total = builder.build_query_scalar::<i64>().fetch_one(conn).await?;

    Ok(total)
}

/// Fetches one page of users matching `request`.
///
/// The ORDER BY column comes from the `SortColumn` allow-list; the search
/// term, limit and offset are bound parameters.
pub async fn list_users_page(conn: &mut DbConn, request: &PageRequest) -> StoreResult<Vec<User>> {
    let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT {USER_COLUMNS} FROM users"));
    push_search_filter(&mut builder, &request.search);

    let direction = request.sort_direction.keyword();
    builder
        .push(format!(
            " ORDER BY {} {direction}, id {direction}",
            request.sort_column.column_name()
        ))
        .push(" LIMIT ")
        .push_bind(request.page_size)
        .push(" OFFSET ")
        .push_bind(request.offset());

    let users = builder.build_query_as::<User>().fetch_all(conn).await?;

    Ok(users)
}
