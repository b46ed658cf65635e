pub(crate) mod ad_repository;
pub(crate) mod user_repository;
