use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Chirp API",
        version = "0.1.0",
        description = "Minimal microblogging backend: tweets and user registration."
    ),
    paths(
        crate::routes::list_tweets,
        crate::routes::get_tweet,
        crate::routes::create_tweet,
        crate::routes::update_tweet,
        crate::routes::delete_tweet,
        crate::routes::create_user,
        crate::routes::health,
    ),
    components(schemas(
        crate::dto::TweetRequest,
        crate::dto::TweetResponse,
        crate::dto::TweetListResponse,
        crate::dto::TweetEnvelope,
        crate::dto::TweetLookupResponse,
        crate::dto::CreateUserRequest,
        crate::dto::UserResponse,
        crate::dto::UserEnvelope,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "tweets", description = "Tweet management"),
        (name = "users", description = "User registration"),
        (name = "system", description = "Health and system status"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Adds the Bearer token security scheme to the OpenAPI spec.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("token")
                        .description(Some(
                            "API token, required on /tweets when CHIRP_REQUIRE_AUTH is enabled.",
                        ))
                        .build(),
                ),
            );
        }
    }
}
