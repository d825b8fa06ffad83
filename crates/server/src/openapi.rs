use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct UsuarioDoc { pub nome: String, pub email: String, pub senha: String }

#[derive(ToSchema)]
pub struct CredenciaisDoc { pub email: String, pub senha: String }

/// `valor` is a decimal, sent as a string or a number.
#[derive(ToSchema)]
pub struct LancamentoDoc {
    pub id: Option<Uuid>,
    pub descricao: String,
    pub mes: i32,
    pub ano: i32,
    #[schema(example = "150.00")]
    pub valor: String,
    pub usuario: Uuid,
    #[schema(example = "RECEITA")]
    pub tipo: String,
    #[schema(example = "PENDENTE")]
    pub status: Option<String>,
}

#[derive(ToSchema)]
pub struct StatusDoc {
    #[schema(example = "EFETIVADO")]
    pub status: String,
}

#[derive(ToSchema)]
pub struct SaldoDoc {
    pub usuario: Uuid,
    #[schema(example = "180.00")]
    pub saldo: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::usuarios::register,
        crate::routes::usuarios::authenticate,
        crate::routes::usuarios::balance,
        crate::routes::lancamentos::search,
        crate::routes::lancamentos::get,
        crate::routes::lancamentos::balance,
        crate::routes::lancamentos::create,
        crate::routes::lancamentos::update,
        crate::routes::lancamentos::update_status,
        crate::routes::lancamentos::delete,
    ),
    components(
        schemas(
            HealthResponse,
            UsuarioDoc,
            CredenciaisDoc,
            LancamentoDoc,
            StatusDoc,
            SaldoDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "usuarios"),
        (name = "lancamentos")
    )
)]
pub struct ApiDoc;
