use super::db::{Column, Entity, Model, ServiceStatus};
use super::forms::{NewService, ServiceChanges};
use crate::common::pagination::{clamp_page, Page, PAGE_SIZE};
use chrono::NaiveDateTime;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, SqlErr,
};

pub enum SubmitOutcome {
    Created(Model),
    NicknameTaken,
}

fn approved() -> Select<Entity> {
    Entity::find().filter(Column::Status.eq(ServiceStatus::Approved))
}

fn nickname_matches(nickname: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(Column::Nickname))).eq(nickname.to_lowercase())
}

const LIKE_ESCAPE: char = '\\';

/// `LIKE` pattern matching `term` literally anywhere in the value.
fn contains_pattern(term: &str) -> LikeExpr {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    LikeExpr::new(pattern).escape(LIKE_ESCAPE)
}

/// Most recently submitted approved services, newest first.
pub async fn latest_submitted(db: &DatabaseConnection, limit: u64) -> Result<Vec<Model>, DbErr> {
    approved()
        .order_by_desc(Column::DateSubmitted)
        .order_by_asc(Column::Id)
        .limit(limit)
        .all(db)
        .await
}

/// Approved services ordered by name, ignoring case, optionally narrowed to
/// those whose name or nickname contains `search`. The requested page is
/// clamped into range.
pub async fn browse(
    db: &DatabaseConnection,
    search: Option<&str>,
    requested_page: i64,
) -> Result<Page<Model>, DbErr> {
    let mut query = approved();
    if let Some(term) = search.map(str::trim).filter(|term| !term.is_empty()) {
        query = query.filter(
            Condition::any()
                .add(Expr::col(Column::Name).like(contains_pattern(term)))
                .add(Expr::col(Column::Nickname).like(contains_pattern(term))),
        );
    }

    let paginator = query
        .order_by(
            SimpleExpr::from(Func::lower(Expr::col(Column::Name))),
            Order::Asc,
        )
        .order_by_asc(Column::Id)
        .paginate(db, PAGE_SIZE);

    let totals = paginator.num_items_and_pages().await?;
    let number = clamp_page(requested_page, totals.number_of_pages);
    let items = paginator.fetch_page(number - 1).await?;

    Ok(Page::new(
        items,
        number,
        totals.number_of_pages,
        totals.number_of_items,
        PAGE_SIZE,
    ))
}

pub async fn in_development(db: &DatabaseConnection) -> Result<Vec<Model>, DbErr> {
    approved()
        .filter(Column::InDevelopment.eq(true))
        .order_by_desc(Column::DateSubmitted)
        .order_by_asc(Column::Id)
        .all(db)
        .await
}

pub async fn recently_modified(db: &DatabaseConnection) -> Result<Vec<Model>, DbErr> {
    approved()
        .order_by_desc(Column::DateModified)
        .order_by_asc(Column::Id)
        .all(db)
        .await
}

pub async fn find_approved(
    db: &DatabaseConnection,
    nickname: &str,
) -> Result<Option<Model>, DbErr> {
    approved().filter(nickname_matches(nickname)).one(db).await
}

pub async fn find_owned(
    db: &DatabaseConnection,
    owner: &str,
    nickname: &str,
) -> Result<Option<Model>, DbErr> {
    Entity::find()
        .filter(nickname_matches(nickname))
        .filter(Column::Owner.eq(owner))
        .one(db)
        .await
}

/// Every service the owner submitted, whatever its status.
pub async fn owned_by(db: &DatabaseConnection, owner: &str) -> Result<Vec<Model>, DbErr> {
    Entity::find()
        .filter(Column::Owner.eq(owner))
        .order_by_desc(Column::DateSubmitted)
        .order_by_asc(Column::Id)
        .all(db)
        .await
}

pub async fn nickname_taken(db: &DatabaseConnection, nickname: &str) -> Result<bool, DbErr> {
    let count = Entity::find()
        .filter(nickname_matches(nickname))
        .count(db)
        .await?;
    Ok(count > 0)
}

pub async fn create(
    db: &DatabaseConnection,
    new: NewService,
    owner: &str,
    now: NaiveDateTime,
) -> Result<SubmitOutcome, DbErr> {
    if nickname_taken(db, &new.nickname).await? {
        return Ok(SubmitOutcome::NicknameTaken);
    }

    // The unique index still decides when two submissions race
    match new.into_active_model(owner, now).insert(db).await {
        Ok(model) => Ok(SubmitOutcome::Created(model)),
        Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            Ok(SubmitOutcome::NicknameTaken)
        }
        Err(err) => Err(err),
    }
}

pub async fn update(
    db: &DatabaseConnection,
    service: Model,
    changes: ServiceChanges,
    now: NaiveDateTime,
) -> Result<Model, DbErr> {
    changes.apply_to(service, now).update(db).await
}
