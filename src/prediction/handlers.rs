use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

use crate::auth::handlers::require_user;
use crate::db::ResultRepository;
use crate::error::AppError;
use crate::prediction::disease::{Disease, FieldSpec};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct MenuEntry {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

#[derive(Debug, Serialize)]
pub struct FormDefinition {
    pub disease: Disease,
    pub title: &'static str,
    pub fields: &'static [FieldSpec],
}

impl From<Disease> for FormDefinition {
    fn from(disease: Disease) -> Self {
        Self {
            disease,
            title: disease.title(),
            fields: disease.fields(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub inputs: HashMap<String, f64>,
}

#[derive(Debug, Serialize)]
pub struct ResultEntry {
    pub disease: String,
    pub outcome: String,
    pub timestamp: String,
}

pub fn menu_entries() -> Vec<MenuEntry> {
    let mut entries = vec![MenuEntry { id: "home", label: "Home", icon: "house" }];
    entries.extend(Disease::ALL.into_iter().map(|d| MenuEntry {
        id: d.name(),
        label: d.menu_label(),
        icon: d.icon(),
    }));
    entries.push(MenuEntry { id: "results", label: "My Results", icon: "file-earmark-text" });
    entries
}

pub async fn menu(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let username = require_user(&req, &state).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "title": "Main Menu",
        "welcome": format!("Welcome, {}!", username),
        "entries": menu_entries(),
    })))
}

pub async fn home(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    require_user(&req, &state).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "title": "Welcome to Disease Prediction App",
        "description": "This app predicts the likelihood of having certain diseases based on input parameters. Select a disease from the sidebar to get started.",
        "how_to_use": [
            "Select a Disease: Choose the disease you want to predict from the sidebar.",
            "Enter Details: Fill in the required fields with the appropriate values.",
            "Get Prediction: Click on the test button to get the prediction result.",
        ],
        "image_url": state.config.ui.home_image_url,
        "background_image_url": state.config.ui.background_image_url,
    })))
}

pub async fn list_forms(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    require_user(&req, &state).await?;
    let forms: Vec<FormDefinition> = Disease::ALL.into_iter().map(FormDefinition::from).collect();
    Ok(HttpResponse::Ok().json(forms))
}

pub async fn form(
    req: HttpRequest,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require_user(&req, &state).await?;
    let disease: Disease = path.parse()?;
    Ok(HttpResponse::Ok().json(FormDefinition::from(disease)))
}

pub async fn predict(
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<PredictRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let username = require_user(&req, &state).await?;
    let disease: Disease = path.parse()?;

    let prediction = state.dispatcher.submit(&username, disease, &body.inputs).await?;
    Ok(HttpResponse::Ok().json(prediction))
}

pub async fn results(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let username = require_user(&req, &state).await?;
    let records = state.results.list_for(&username).await?;
    info!("Returning {} past results for {}", records.len(), username);

    let entries: Vec<ResultEntry> = records
        .into_iter()
        .map(|r| ResultEntry {
            disease: r.disease,
            outcome: r.outcome,
            timestamp: r.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        })
        .collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({ "results": entries })))
}
