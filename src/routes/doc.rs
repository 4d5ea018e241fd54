use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{auth, products, vendors},
    models::{Product, User, VendorProfile},
    response::{ApiResponse, Meta},
    routes::{auth as auth_routes, health, params, products as product_routes, vendors as vendor_routes},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth_routes::register,
        auth_routes::login,
        product_routes::list_products,
        product_routes::create_product,
        product_routes::update_product,
        product_routes::delete_product,
        vendor_routes::provision_vendor,
        vendor_routes::my_profile,
    ),
    components(
        schemas(
            User,
            Product,
            VendorProfile,
            auth::RegisterRequest,
            auth::LoginRequest,
            auth::LoginResponse,
            products::CreateProductRequest,
            products::UpdateProductRequest,
            products::ProductList,
            vendors::ProvisionVendorRequest,
            params::Pagination,
            Meta,
            ApiResponse<User>,
            ApiResponse<Product>,
            ApiResponse<products::ProductList>,
            ApiResponse<VendorProfile>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Vendor registration and login"),
        (name = "Vendor products", description = "Owner-scoped product management"),
        (name = "Vendors", description = "Vendor profile endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
