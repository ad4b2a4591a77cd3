use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::query::ListParams;
use crate::dto::customer::CustomerResponse;
use crate::forms::customer::{CreateCustomerForm, UpdateCustomerForm};
use crate::repository::DieselRepository;
use crate::routes::blocking;
use crate::services::{ServiceError, customer as service};

#[get("/customers")]
pub async fn list_customers(
    params: web::Query<ListParams>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let params = params.into_inner();
    let repo = repo.get_ref().clone();

    let page = blocking(move || service::list_customers(&repo, &params)).await?;

    Ok(HttpResponse::Ok().json(page))
}

#[get("/customers/{customer_id}")]
pub async fn get_customer(
    customer_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let customer_id = customer_id.into_inner();
    let repo = repo.get_ref().clone();

    let customer = blocking(move || service::get_customer(&repo, &customer_id)).await?;

    Ok(HttpResponse::Ok().json(CustomerResponse::from(customer)))
}

#[post("/customers")]
pub async fn create_customer(
    form: web::Json<CreateCustomerForm>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let form = form.into_inner();
    let repo = repo.get_ref().clone();

    let customer = blocking(move || service::create_customer(&repo, form)).await?;

    Ok(HttpResponse::Created().json(CustomerResponse::from(customer)))
}

#[put("/customers/{customer_id}")]
pub async fn update_customer(
    customer_id: web::Path<String>,
    form: web::Json<UpdateCustomerForm>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let customer_id = customer_id.into_inner();
    let form = form.into_inner();
    let repo = repo.get_ref().clone();

    let customer = blocking(move || service::update_customer(&repo, &customer_id, form)).await?;

    Ok(HttpResponse::Ok().json(CustomerResponse::from(customer)))
}

#[delete("/customers/{customer_id}")]
pub async fn delete_customer(
    customer_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let customer_id = customer_id.into_inner();
    let repo = repo.get_ref().clone();

    blocking(move || service::delete_customer(&repo, &customer_id)).await?;

    Ok(HttpResponse::NoContent().finish())
}
