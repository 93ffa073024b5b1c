use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct SignupRequest { pub id: String, pub name: String, pub password: String, pub email: String }

#[derive(ToSchema)]
pub struct SigninRequest { pub id: String, pub password: String }

#[derive(ToSchema)]
pub struct ProfileResponse { pub id: String, pub name: String, pub email: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::user::signup,
        crate::routes::user::signin,
        crate::routes::user::profile,
        crate::routes::auth::me,
    ),
    components(
        schemas(
            HealthResponse,
            SignupRequest,
            SigninRequest,
            ProfileResponse,
        )
    ),
    tags(
        (name = "health"),
        (name = "user"),
        (name = "auth")
    )
)]
pub struct ApiDoc;
