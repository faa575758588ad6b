//! Meal diary HTTP handlers.
//!
//! ```text
//! POST   /meals
//! GET    /meals
//! GET    /meals/metrics
//! GET    /meals/{meal_id}
//! PUT    /meals/{meal_id}
//! DELETE /meals/{meal_id}
//! ```
//!
//! Every handler takes a [`CurrentUser`] (or [`AuthenticatedJson`] when it
//! has a body), so a request without a valid session is rejected with 401
//! before the body is read or any port is called. `/meals/metrics`
//! must be registered ahead of `/meals/{meal_id}`.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CreateMealRequest, DeleteMealRequest, UpdateMealRequest};
use crate::domain::{Meal, MealDetails, MealMetrics};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::{AuthenticatedJson, CurrentUser};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::CreatedBody;
use crate::inbound::http::validation::{
    MealDateInput, map_meal_validation_error, parse_meal_date, parse_meal_id,
};

/// Request body for creating or replacing a meal.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealBody {
    #[schema(example = "Greek salad")]
    pub name: String,
    #[schema(example = "Feta, olives, cucumber")]
    pub description: String,
    pub is_on_diet: bool,
    /// RFC 3339 date-time, `YYYY-MM-DD`, or epoch milliseconds.
    #[schema(value_type = String, format = "date-time", example = "2024-03-01T12:30:00Z")]
    pub date: MealDateInput,
}

impl MealBody {
    fn into_details(self) -> ApiResult<MealDetails> {
        let date = parse_meal_date(self.date)?;
        MealDetails::try_new(self.name, self.description, self.is_on_diet, date)
            .map_err(map_meal_validation_error)
    }
}

/// A meal as returned to clients.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealResponse {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub is_on_diet: bool,
    #[schema(format = "date-time")]
    pub date: String,
}

impl From<&Meal> for MealResponse {
    fn from(meal: &Meal) -> Self {
        let details = meal.details();
        Self {
            id: meal.id().to_string(),
            user_id: meal.user_id().to_string(),
            name: details.name().to_owned(),
            description: details.description().to_owned(),
            is_on_diet: details.is_on_diet(),
            date: details.date().to_rfc3339(),
        }
    }
}

/// Envelope for a single meal.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct MealEnvelope {
    pub meal: MealResponse,
}

/// Envelope for a meal listing, newest first.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct MealListEnvelope {
    pub meals: Vec<MealResponse>,
}

/// Diet adherence summary.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealMetricsBody {
    pub total_meals: u64,
    pub total_meals_on_diet: u64,
    pub total_meals_off_diet: u64,
    pub best_on_diet_sequence: u64,
}

impl From<MealMetrics> for MealMetricsBody {
    fn from(value: MealMetrics) -> Self {
        Self {
            total_meals: value.total_meals,
            total_meals_on_diet: value.total_on_diet,
            total_meals_off_diet: value.total_off_diet,
            best_on_diet_sequence: value.best_on_diet_streak,
        }
    }
}

/// Record a meal for the current user.
#[utoipa::path(
    post,
    path = "/meals",
    request_body = MealBody,
    responses(
        (status = 201, description = "Meal created", body = CreatedBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "createMeal",
    security(("SessionCookie" = []))
)]
#[post("/meals")]
pub async fn create_meal(
    state: web::Data<HttpState>,
    request: AuthenticatedJson<MealBody>,
) -> ApiResult<HttpResponse> {
    let user_id = request.user_id();
    let details = request.into_inner().into_details()?;
    let meal_id = state
        .meals
        .create_meal(CreateMealRequest {
            user_id,
            details,
        })
        .await?;
    Ok(HttpResponse::Created().json(CreatedBody {
        id: meal_id.to_string(),
    }))
}

/// List the current user's meals, newest first.
#[utoipa::path(
    get,
    path = "/meals",
    responses(
        (status = 200, description = "Meals", body = MealListEnvelope),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "listMeals",
    security(("SessionCookie" = []))
)]
#[get("/meals")]
pub async fn list_meals(
    state: web::Data<HttpState>,
    user: CurrentUser,
) -> ApiResult<web::Json<MealListEnvelope>> {
    let meals = state.meals_query.list_meals(&user.user_id()).await?;
    Ok(web::Json(MealListEnvelope {
        meals: meals.iter().map(MealResponse::from).collect(),
    }))
}

/// Summarise the current user's diet adherence.
#[utoipa::path(
    get,
    path = "/meals/metrics",
    responses(
        (status = 200, description = "Metrics", body = MealMetricsBody),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "mealMetrics",
    security(("SessionCookie" = []))
)]
#[get("/meals/metrics")]
pub async fn meal_metrics(
    state: web::Data<HttpState>,
    user: CurrentUser,
) -> ApiResult<web::Json<MealMetricsBody>> {
    let metrics = state.meals_query.meal_metrics(&user.user_id()).await?;
    Ok(web::Json(metrics.into()))
}

/// Fetch one of the current user's meals.
#[utoipa::path(
    get,
    path = "/meals/{meal_id}",
    params(("meal_id" = uuid::Uuid, Path, description = "Meal identifier")),
    responses(
        (status = 200, description = "Meal", body = MealEnvelope),
        (status = 400, description = "Malformed meal id", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "No such meal for this user", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "getMeal",
    security(("SessionCookie" = []))
)]
#[get("/meals/{meal_id}")]
pub async fn get_meal(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<MealEnvelope>> {
    let meal_id = parse_meal_id(&path)?;
    let meal = state
        .meals_query
        .get_meal(&user.user_id(), &meal_id)
        .await?;
    Ok(web::Json(MealEnvelope {
        meal: MealResponse::from(&meal),
    }))
}

/// Replace every editable field of a meal.
#[utoipa::path(
    put,
    path = "/meals/{meal_id}",
    params(("meal_id" = uuid::Uuid, Path, description = "Meal identifier")),
    request_body = MealBody,
    responses(
        (status = 204, description = "Meal updated"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "No such meal for this user", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "updateMeal",
    security(("SessionCookie" = []))
)]
#[put("/meals/{meal_id}")]
pub async fn update_meal(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    request: AuthenticatedJson<MealBody>,
) -> ApiResult<HttpResponse> {
    let user_id = request.user_id();
    let meal_id = parse_meal_id(&path)?;
    let details = request.into_inner().into_details()?;
    state
        .meals
        .update_meal(UpdateMealRequest {
            user_id,
            meal_id,
            details,
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete one of the current user's meals.
#[utoipa::path(
    delete,
    path = "/meals/{meal_id}",
    params(("meal_id" = uuid::Uuid, Path, description = "Meal identifier")),
    responses(
        (status = 204, description = "Meal deleted"),
        (status = 400, description = "Malformed meal id", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "No such meal for this user", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "deleteMeal",
    security(("SessionCookie" = []))
)]
#[delete("/meals/{meal_id}")]
pub async fn delete_meal(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let meal_id = parse_meal_id(&path)?;
    state
        .meals
        .delete_meal(DeleteMealRequest {
            user_id: user.user_id(),
            meal_id,
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "meals_tests.rs"]
mod tests;
