use askama::Template;
use axum::response::Html;

use crate::auth::CurrentUser;
use crate::error::AppError;

#[derive(Template)]
#[template(path = "pages/index.html")]
pub struct IndexPageTemplate;

#[derive(Template)]
#[template(path = "pages/register.html")]
pub struct RegisterPageTemplate;

#[derive(Template)]
#[template(path = "pages/login.html")]
pub struct LoginPageTemplate;

#[derive(Template)]
#[template(path = "pages/dashboard.html")]
pub struct DashboardPageTemplate {
    pub username: String,
    pub email: String,
}

/// GET / - Landing page
pub async fn get_index() -> Result<Html<String>, AppError> {
    Ok(Html(IndexPageTemplate.render()?))
}

/// GET /register - Display registration form
pub async fn get_register() -> Result<Html<String>, AppError> {
    Ok(Html(RegisterPageTemplate.render()?))
}

/// GET /login - Display login form
pub async fn get_login() -> Result<Html<String>, AppError> {
    Ok(Html(LoginPageTemplate.render()?))
}

/// GET /dashboard - Signed-in landing page
///
/// Visitors without a valid session cookie are redirected to /login by
/// the [`CurrentUser`] extractor.
#[tracing::instrument(skip_all, fields(user_id = %user.id))]
pub async fn get_dashboard(CurrentUser(user): CurrentUser) -> Result<Html<String>, AppError> {
    let template = DashboardPageTemplate {
        username: user.username,
        email: user.email,
    };

    Ok(Html(template.render()?))
}
