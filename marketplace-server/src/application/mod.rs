pub(crate) mod ad_service;
pub(crate) mod auth_service;
