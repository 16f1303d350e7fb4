// Headers used by TB1-HMAC-SHA256 signing.
pub const TB_CONTENT_SHA256: &str = "tb-content-sha256";
pub const TB1_HMAC_SHA256: &str = "TB1-HMAC-SHA256";

pub const CONTENT_TYPE_JSON: &str = "application/json";

// Env values used by tbapi.
pub const TB_BAAS_BASE_URI: &str = "TB_BAAS_BASE_URI";
pub const TB_BAAS_PARTNER_ID: &str = "TB_BAAS_PARTNER_ID";
pub const TB_BAAS_SECRET: &str = "TB_BAAS_SECRET";
