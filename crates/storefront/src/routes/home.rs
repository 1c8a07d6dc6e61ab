//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::filters;
use crate::routes::catalog_error_page;
use crate::routes::products::ProductCardView;
use crate::state::AppState;

/// Home page template: three product sections fetched independently.
#[derive(Template, WebTemplate)]
#[template(path = "home/index.html")]
pub struct HomeTemplate {
    pub latest: Vec<ProductCardView>,
    pub top_rated: Vec<ProductCardView>,
    pub random: Vec<ProductCardView>,
}

/// Display the home page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Response {
    let catalog = state.catalog();
    let (latest, top_rated, random) = tokio::join!(
        catalog.latest_products(),
        catalog.top_rated_products(),
        catalog.random_products(),
    );

    let (latest, top_rated, random) = match (latest, top_rated, random) {
        (Ok(latest), Ok(top_rated), Ok(random)) => (latest, top_rated, random),
        (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
            return catalog_error_page(&e, "/");
        }
    };

    let cards = |products: Vec<crate::catalog::Product>| {
        products
            .iter()
            .map(|p| ProductCardView::from_product(p, &state))
            .collect::<Vec<_>>()
    };

    HomeTemplate {
        latest: cards(latest),
        top_rated: cards(top_rated),
        random: cards(random),
    }
    .into_response()
}
