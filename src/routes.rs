// Route path constants - single source of truth for all API paths

pub const HEALTH: &str = "/health";
pub const COLLECTION: &str = "/api/{collection}";
pub const ITEM: &str = "/api/{collection}/{id}";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
pub const SWAGGER_UI: &str = "/swagger-ui";
