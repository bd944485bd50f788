use actix_web::{get, http::StatusCode, post, web, HttpResponse, ResponseError};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::balance::{compute_balances, total_spent};
use crate::entry::{build_expense, ExpenseDraft};
use crate::error::SplitError;
use crate::rates::RateTable;
use crate::roster::Roster;
use crate::schemas::{Balances, Expense, MemberName};
use crate::settlement::settle;

impl ResponseError for SplitError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

/// Roster and expenses as the external store hands them over.
#[derive(Deserialize, Serialize)]
pub struct TripJson {
    pub members: Vec<MemberName>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

#[derive(Deserialize, Serialize)]
pub struct NewMemberJson {
    pub members: Vec<MemberName>,
    pub name: String,
}

#[derive(Deserialize, Serialize)]
pub struct NewExpenseJson {
    pub members: Vec<MemberName>,
    pub draft: ExpenseDraft,
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalancesJson {
    pub balances: Balances,
    pub total_spent: f64,
}

#[get("/rates")]
async fn get_rates(rates: web::Data<RateTable>) -> HttpResponse {
    HttpResponse::Ok().json(rates.get_ref())
}

#[post("/members")]
async fn add_member(json: web::Json<NewMemberJson>) -> Result<HttpResponse, SplitError> {
    let NewMemberJson { members, name } = json.into_inner();
    let mut roster: Roster = members.into_iter().collect();
    roster.add_member(&name)?;
    Ok(HttpResponse::Ok().json(roster))
}

#[post("/expenses")]
async fn add_expense(
    rates: web::Data<RateTable>,
    json: web::Json<NewExpenseJson>,
) -> Result<HttpResponse, SplitError> {
    let NewExpenseJson { members, draft } = json.into_inner();
    let roster: Roster = members.into_iter().collect();
    let expense = build_expense(draft, &roster, &rates, Utc::now())?;
    Ok(HttpResponse::Ok().json(expense))
}

#[post("/balances")]
async fn get_balances(json: web::Json<TripJson>) -> HttpResponse {
    let trip = json.into_inner();
    HttpResponse::Ok().json(BalancesJson {
        balances: compute_balances(&trip.members, &trip.expenses),
        total_spent: total_spent(&trip.expenses),
    })
}

#[post("/settlement")]
async fn get_settlement(json: web::Json<TripJson>) -> HttpResponse {
    let trip = json.into_inner();
    HttpResponse::Ok().json(settle(&trip.members, &trip.expenses))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_rates)
        .service(add_member)
        .service(add_expense)
        .service(get_balances)
        .service(get_settlement);
}
