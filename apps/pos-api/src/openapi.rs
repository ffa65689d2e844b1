//! OpenAPI documentation configuration

use domain_sales::{PaymentMethod, Sale, SaleLine};
use utoipa::OpenApi;

/// Base document: service metadata plus the client-held sale shapes.
/// Sales never hit a dedicated endpoint, but clients assemble carts
/// from these schemas so they belong in the published contract.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "POS API",
        version = "0.1.0",
        description = "Point-of-sale backend: accounts, product catalog, and sale shapes",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    components(schemas(Sale, SaleLine, PaymentMethod)),
    tags(
        (name = "Auth", description = "Login and account registration"),
        (name = "Products", description = "Product catalog management")
    )
)]
struct BaseDoc;

/// Combined OpenAPI documentation for all APIs.
///
/// Domain routers live at the root of the app, so their documents are
/// merged rather than nested under a prefix.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = BaseDoc::openapi();
        doc.merge(domain_users::ApiDoc::openapi());
        doc.merge(domain_products::ApiDoc::openapi());
        doc
    }
}
