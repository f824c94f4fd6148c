use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::employees::EmployeeInput,
    entity::{
        employees::{
            ActiveModel as EmployeeActive, Column as EmployeeCol, Entity as Employees,
            Model as EmployeeModel,
        },
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users, Model as UserModel},
    },
    error::{AppError, AppResult},
    middleware::auth::SessionUser,
    models::{Employee, User},
    state::AppState,
};

pub const EMPLOYEE_EXISTS: &str = "Employee already exists for this user";

/// Users that can still be turned into employees.
pub async fn list_candidate_users(state: &AppState) -> AppResult<Vec<User>> {
    let users = Users::find()
        .left_join(Employees)
        .filter(EmployeeCol::Id.is_null())
        .order_by_asc(UserCol::Email)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(user_from_entity)
        .collect();
    Ok(users)
}

pub async fn list_employees(state: &AppState) -> AppResult<Vec<Employee>> {
    let employees = Employees::find()
        .find_also_related(Users)
        .order_by_desc(EmployeeCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|(employee, user)| employee_from_entity(employee, user.as_ref()))
        .collect();
    Ok(employees)
}

/// Insert the employee and apply the account's active flag in one transaction.
pub async fn create_employee(
    state: &AppState,
    actor: &SessionUser,
    input: EmployeeInput,
) -> AppResult<Employee> {
    let txn = state.orm.begin().await?;

    let user = find_user(&txn, input.user_id).await?;
    let existing = Employees::find()
        .filter(EmployeeCol::UserId.eq(input.user_id))
        .count(&txn)
        .await?;
    if existing > 0 {
        return Err(AppError::BadRequest(EMPLOYEE_EXISTS.into()));
    }

    let is_active = input.is_active;
    let employee = EmployeeActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(input.user_id),
        first_name: Set(input.first_name),
        last_name: Set(input.last_name),
        gender: Set(input.gender),
        address: Set(input.address),
        phone: Set(input.phone),
        birth_day: Set(input.birth_day),
        join_date: Set(input.join_date),
        end_date: Set(input.end_date),
        image: Set(input.image),
        job_title: Set(input.job_title),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await
    .map_err(|err| match err.sql_err() {
        // A concurrent create for the same user got there first.
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::BadRequest(EMPLOYEE_EXISTS.into())
        }
        _ => AppError::from(err),
    })?;

    let user = set_user_active(&txn, user, is_active).await?;
    txn.commit().await?;

    audit::record(
        &state.pool,
        Some(actor.user_id),
        "employee_create",
        "employees",
        serde_json::json!({ "employee_id": employee.id, "user_id": user.id, "is_active": is_active }),
    )
    .await;

    Ok(employee_from_entity(employee, Some(&user)))
}

/// Update the employee record of `input.user_id` and its account flag together.
pub async fn update_employee(
    state: &AppState,
    actor: &SessionUser,
    input: EmployeeInput,
) -> AppResult<Employee> {
    let txn = state.orm.begin().await?;

    let existing = Employees::find()
        .filter(EmployeeCol::UserId.eq(input.user_id))
        .one(&txn)
        .await?;
    let existing = match existing {
        Some(e) => e,
        None => return Err(AppError::NotFound),
    };
    let user = find_user(&txn, input.user_id).await?;

    let is_active = input.is_active;
    let mut active: EmployeeActive = existing.into();
    active.first_name = Set(input.first_name);
    active.last_name = Set(input.last_name);
    active.gender = Set(input.gender);
    active.address = Set(input.address);
    active.phone = Set(input.phone);
    active.birth_day = Set(input.birth_day);
    active.join_date = Set(input.join_date);
    active.end_date = Set(input.end_date);
    active.image = Set(input.image);
    active.job_title = Set(input.job_title);
    active.updated_at = Set(Utc::now().into());
    let employee = active.update(&txn).await?;

    let user = set_user_active(&txn, user, is_active).await?;
    txn.commit().await?;

    audit::record(
        &state.pool,
        Some(actor.user_id),
        "employee_update",
        "employees",
        serde_json::json!({ "employee_id": employee.id, "is_active": is_active }),
    )
    .await;

    Ok(employee_from_entity(employee, Some(&user)))
}

/// Remove the account by email; its employee record goes with it.
pub async fn delete_employee_user(
    state: &AppState,
    actor: &SessionUser,
    email: &str,
) -> AppResult<()> {
    let result = Users::delete_many()
        .filter(UserCol::Email.eq(email))
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        Some(actor.user_id),
        "employee_delete",
        "users",
        serde_json::json!({ "email": email }),
    )
    .await;

    Ok(())
}

async fn find_user(txn: &DatabaseTransaction, user_id: Uuid) -> AppResult<UserModel> {
    Users::find_by_id(user_id)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::BadRequest("User not found".into()))
}

async fn set_user_active(
    txn: &DatabaseTransaction,
    user: UserModel,
    is_active: bool,
) -> AppResult<UserModel> {
    if user.is_active == is_active {
        return Ok(user);
    }
    let mut active: UserActive = user.into();
    active.is_active = Set(is_active);
    active.updated_at = Set(Utc::now().into());
    Ok(active.update(txn).await?)
}

pub fn user_from_entity(model: UserModel) -> User {
    User {
        id: model.id,
        email: model.email,
        is_verified: model.is_verified,
        is_active: model.is_active,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

pub fn employee_from_entity(model: EmployeeModel, user: Option<&UserModel>) -> Employee {
    Employee {
        id: model.id,
        user_id: model.user_id,
        email: user.map(|u| u.email.clone()),
        is_active: user.map(|u| u.is_active),
        first_name: model.first_name,
        last_name: model.last_name,
        gender: model.gender,
        address: model.address,
        phone: model.phone,
        birth_day: model.birth_day,
        join_date: model.join_date,
        end_date: model.end_date,
        image: model.image,
        job_title: model.job_title,
    }
}
